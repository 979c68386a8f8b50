use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Number of categories every classifier must expose.
pub const CATEGORY_COUNT: usize = 20;

/// Column names an upload must carry, in export order.
pub const REQUIRED_COLUMNS: [&str; 3] = ["title", "authors", "item_text"];

/// Name of the column holding the predicted label.
pub const PREDICTION_COLUMN: &str = "category_prediction";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    pub authors: String,
    pub item_text: String,
}

impl ArticleRecord {
    pub fn new(
        title: impl Into<String>,
        authors: impl Into<String>,
        item_text: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            authors: authors.into(),
            item_text: item_text.into(),
        }
    }
}

/// Ordered rows of an upload. Row identity is the position, starting at 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleBatch {
    records: Vec<ArticleRecord>,
}

impl ArticleBatch {
    pub fn new(records: Vec<ArticleRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ArticleRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArticleRecord> {
        self.records.iter()
    }
}

impl From<Vec<ArticleRecord>> for ArticleBatch {
    fn from(records: Vec<ArticleRecord>) -> Self {
        Self::new(records)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryLabel(String);

impl CategoryLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// One row of a [`PredictionResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictedArticle {
    pub index: usize,
    pub category_prediction: CategoryLabel,
    #[serde(flatten)]
    pub record: ArticleRecord,
}

/// A batch with its predictions inserted as the leading column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionResult {
    rows: Vec<PredictedArticle>,
}

impl PredictionResult {
    /// Pairs each record with the label at the same position.
    ///
    /// Returns `None` when the lengths differ, so a misaligned result can
    /// never be built.
    pub fn from_parts(batch: ArticleBatch, predictions: Vec<CategoryLabel>) -> Option<Self> {
        if batch.len() != predictions.len() {
            return None;
        }
        let rows = batch
            .records
            .into_iter()
            .zip(predictions)
            .enumerate()
            .map(|(index, (record, category_prediction))| PredictedArticle {
                index,
                category_prediction,
                record,
            })
            .collect();
        Some(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[PredictedArticle] {
        &self.rows
    }

    pub fn predictions(&self) -> impl Iterator<Item = &CategoryLabel> {
        self.rows.iter().map(|row| &row.category_prediction)
    }

    pub fn summary(&self) -> CategorySummary {
        CategorySummary::from_labels(self.predictions())
    }
}

/// Row count per predicted label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySummary {
    counts: BTreeMap<CategoryLabel, usize>,
}

impl CategorySummary {
    pub fn from_labels<'a>(labels: impl IntoIterator<Item = &'a CategoryLabel>) -> Self {
        let mut counts = BTreeMap::new();
        for label in labels {
            *counts.entry(label.clone()).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn get(&self, label: &CategoryLabel) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CategoryLabel, usize)> {
        self.counts.iter().map(|(label, count)| (label, *count))
    }
}

/// Fields of the manual entry form. Missing fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleForm {
    pub title: String,
    pub authors: String,
    pub item_text: String,
}

impl From<ArticleForm> for ArticleRecord {
    fn from(form: ArticleForm) -> Self {
        Self {
            title: form.title,
            authors: form.authors,
            item_text: form.item_text,
        }
    }
}
