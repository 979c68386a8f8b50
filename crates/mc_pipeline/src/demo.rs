/// Bundled sample dataset, consumed exactly like an upload.
pub const DEMO_CSV: &str = include_str!("../data/demo_articles.csv");

/// Upload template offered to users.
pub const TEMPLATE_CSV: &str =
    ",title,authors,item_text\n0,your title,the authors,\"The document text.\"\n";

pub fn demo_bytes() -> &'static [u8] {
    DEMO_CSV.as_bytes()
}
