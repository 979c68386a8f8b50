use async_trait::async_trait;
use std::fmt;
use crate::types::{ArticleRecord, CategoryLabel};
use crate::Result;

#[async_trait]
pub trait Classifier: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// The fixed label set this classifier predicts from.
    fn labels(&self) -> &[CategoryLabel];

    /// Predict one label per record, in input order.
    async fn predict(&self, records: &[ArticleRecord]) -> Result<Vec<CategoryLabel>>;

    fn knows_label(&self, label: &CategoryLabel) -> bool {
        self.labels().contains(label)
    }
}
