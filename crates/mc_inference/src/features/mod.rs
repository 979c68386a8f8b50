use mc_core::ArticleRecord;

/// Lower-cased alphanumeric tokens of every text field of a record, in
/// field order: title, authors, then the body.
pub fn tokenize(record: &ArticleRecord) -> Vec<String> {
    [&record.title, &record.authors, &record.item_text]
        .into_iter()
        .flat_map(|field| tokenize_text(field))
        .collect()
}

pub fn tokenize_text(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(|token| token.to_lowercase())
        .collect()
}
