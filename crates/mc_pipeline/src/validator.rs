use std::collections::HashSet;
use csv::{ReaderBuilder, StringRecord};
use tracing::debug;
use mc_core::{ArticleBatch, ArticleRecord, SchemaError, REQUIRED_COLUMNS};

/// Where each required column sits in the uploaded header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    has_index: bool,
    title: usize,
    authors: usize,
    item_text: usize,
}

impl ColumnLayout {
    /// Accepts exactly `title`, `authors` and `item_text` in any order,
    /// optionally preceded by one index column of any other name.
    pub fn from_header(header: &StringRecord) -> Result<Self, SchemaError> {
        let names: Vec<&str> = header.iter().collect();
        if names.is_empty() || names.iter().all(|name| name.is_empty()) {
            return Err(SchemaError::MissingHeader);
        }

        let has_index = names.len() == REQUIRED_COLUMNS.len() + 1
            && !REQUIRED_COLUMNS.contains(&names[0]);
        let offset = usize::from(has_index);

        let mut seen = HashSet::new();
        let mut unexpected = Vec::new();
        for name in &names[offset..] {
            if !seen.insert(*name) {
                return Err(SchemaError::DuplicateColumn(name.to_string()));
            }
            if !REQUIRED_COLUMNS.contains(name) {
                unexpected.push(name.to_string());
            }
        }

        let position = |column: &str| names[offset..].iter().position(|name| *name == column);
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| position(**column).is_none())
            .map(|column| column.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(SchemaError::MissingColumns(missing));
        }
        if !unexpected.is_empty() {
            return Err(SchemaError::UnexpectedColumns(unexpected));
        }

        let index_of = |column: &str| position(column).map(|idx| idx + offset).unwrap_or_default();
        Ok(Self {
            has_index,
            title: index_of("title"),
            authors: index_of("authors"),
            item_text: index_of("item_text"),
        })
    }

    fn extract(&self, row: &StringRecord) -> ArticleRecord {
        let field = |idx: usize| row.get(idx).unwrap_or_default().to_string();
        ArticleRecord {
            title: field(self.title),
            authors: field(self.authors),
            item_text: field(self.item_text),
        }
    }
}

fn malformed(err: csv::Error) -> SchemaError {
    SchemaError::Malformed {
        line: err.position().map(|pos| pos.line()),
        message: err.to_string(),
    }
}

/// Parse an uploaded CSV into a batch numbered from zero. Any embedded
/// index values are dropped.
pub fn parse_batch(input: &[u8]) -> Result<ArticleBatch, SchemaError> {
    let text = std::str::from_utf8(input).map_err(|e| SchemaError::Encoding(e.to_string()))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let header = reader.headers().map_err(malformed)?.clone();
    let layout = ColumnLayout::from_header(&header)?;
    if layout.has_index {
        debug!("Dropping leading index column '{}'", &header[0]);
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(malformed)?;
        records.push(layout.extract(&row));
    }
    Ok(ArticleBatch::new(records))
}
