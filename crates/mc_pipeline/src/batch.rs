use std::sync::Arc;
use std::time::Instant;
use mc_core::{
    ArticleBatch, ArticleRecord, CategoryLabel, CategorySummary, Classifier, Error,
    PredictionResult, Result,
};
use crate::demo::demo_bytes;
use crate::export::{self, ExportPayload};
use crate::logging::Logger;
use crate::validator::parse_batch;

/// Everything produced for one upload.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub result: PredictionResult,
    pub summary: CategorySummary,
    pub export: ExportPayload,
}

/// Runs the classifier once over `records` and checks that it answered with
/// exactly one known label per record, in order.
pub(crate) async fn checked_predict(
    classifier: &dyn Classifier,
    records: &[ArticleRecord],
) -> Result<Vec<CategoryLabel>> {
    let labels = classifier.predict(records).await?;
    if labels.len() != records.len() {
        return Err(Error::Inference(format!(
            "{} returned {} labels for {} rows",
            classifier.name(),
            labels.len(),
            records.len()
        )));
    }
    if let Some(unknown) = labels.iter().find(|label| !classifier.knows_label(label)) {
        return Err(Error::Inference(format!(
            "{} returned unknown label '{}'",
            classifier.name(),
            unknown
        )));
    }
    Ok(labels)
}

pub struct BatchPipeline {
    classifier: Arc<dyn Classifier>,
    logger: Logger,
}

impl BatchPipeline {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            classifier,
            logger: Logger::new().with_prefix("[batch]"),
        }
    }

    pub fn classifier(&self) -> &Arc<dyn Classifier> {
        &self.classifier
    }

    /// Validate, classify, summarize and encode an uploaded CSV file.
    pub async fn run(&self, input: &[u8]) -> Result<BatchOutcome> {
        let started = Instant::now();
        self.logger.debug(&format!("📥 Received {} bytes", input.len()));

        match self.process(input).await {
            Ok(outcome) => {
                self.logger.info(&format!(
                    "✨ Classified {} rows into {} categories in {:?}",
                    outcome.result.len(),
                    outcome.summary.len(),
                    started.elapsed()
                ));
                Ok(outcome)
            }
            Err(e) => {
                self.logger.warn(&format!("⚠️ Batch rejected: {}", e));
                Err(e)
            }
        }
    }

    pub async fn run_demo(&self) -> Result<BatchOutcome> {
        self.logger.info("🧪 Running bundled demo dataset");
        self.run(demo_bytes()).await
    }

    /// Attach one prediction to every record of an already parsed batch.
    pub async fn predict(&self, batch: ArticleBatch) -> Result<PredictionResult> {
        let labels = checked_predict(self.classifier.as_ref(), batch.records()).await?;
        PredictionResult::from_parts(batch, labels)
            .ok_or_else(|| Error::Inference("predictions are not aligned with rows".to_string()))
    }

    async fn process(&self, input: &[u8]) -> Result<BatchOutcome> {
        let batch = parse_batch(input)?;
        self.logger.debug(&format!("📑 Parsed {} rows", batch.len()));

        let result = self.predict(batch).await?;
        let summary = result.summary();
        let export = export::encode(&result)?;

        Ok(BatchOutcome {
            result,
            summary,
            export,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{FixedClassifier, Misbehavior};
    use mc_core::{SchemaError, CATEGORY_COUNT};
    use mc_inference::models::{KeywordModel, LinearModel};

    const EXAMPLE_CSV: &[u8] = concat!(
        ",title,authors,item_text\n",
        "0,A,X,lung cancer treatment\n",
        "1,B,Y,cardiac arrhythmia study\n",
    )
    .as_bytes();

    fn pipeline() -> BatchPipeline {
        BatchPipeline::new(Arc::new(KeywordModel::new()))
    }

    #[tokio::test]
    async fn test_end_to_end_example() {
        let outcome = pipeline().run(EXAMPLE_CSV).await.unwrap();
        let model = KeywordModel::new();

        assert_eq!(outcome.result.len(), 2);
        assert!(outcome.result.predictions().all(|label| model.knows_label(label)));
        assert_eq!(outcome.summary.total(), 2);
        assert_eq!(outcome.result.rows()[0].record.title, "A");
        assert_eq!(outcome.result.rows()[1].record.title, "B");
    }

    #[tokio::test]
    async fn test_bundled_linear_model() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../models/medcat_model.json");
        let model = Arc::new(LinearModel::load(path).await.unwrap());
        let pipeline = BatchPipeline::new(model.clone());

        let outcome = pipeline.run(EXAMPLE_CSV).await.unwrap();
        let predictions: Vec<&str> = outcome.result.predictions().map(|l| l.as_str()).collect();
        assert_eq!(predictions, ["Oncology", "Cardiology"]);
        assert_eq!(outcome.summary.total(), 2);

        let demo = pipeline.run_demo().await.unwrap();
        assert_eq!(demo.summary.total(), 8);
        assert!(demo.result.predictions().all(|label| model.knows_label(label)));
    }

    #[tokio::test]
    async fn test_predictions_aligned_with_rows() {
        let input = b"title,authors,item_text\nr0,,\nr1,,\nr2,,\nr3,,\n";
        let classifier = Arc::new(FixedClassifier::echo_title());
        let outcome = BatchPipeline::new(classifier).run(input).await.unwrap();

        for (idx, row) in outcome.result.rows().iter().enumerate() {
            assert_eq!(row.index, idx);
            assert_eq!(row.category_prediction.as_str(), format!("label r{}", idx));
        }
    }

    #[tokio::test]
    async fn test_classifier_called_once_per_batch() {
        let classifier = Arc::new(FixedClassifier::constant());
        let pipeline = BatchPipeline::new(classifier.clone());
        pipeline.run_demo().await.unwrap();
        assert_eq!(classifier.calls(), 1);
    }

    #[tokio::test]
    async fn test_idempotent() {
        let pipeline = pipeline();
        let first = pipeline.run_demo().await.unwrap();
        let second = pipeline.run_demo().await.unwrap();

        assert_eq!(first.result, second.result);
        assert_eq!(first.summary, second.summary);
        assert_eq!(first.export.as_bytes(), second.export.as_bytes());
    }

    #[tokio::test]
    async fn test_demo_dataset() {
        let outcome = pipeline().run_demo().await.unwrap();
        assert_eq!(outcome.result.len(), 8);
        assert_eq!(outcome.summary.total(), 8);
        assert!(outcome.summary.len() <= CATEGORY_COUNT);
    }

    #[tokio::test]
    async fn test_schema_error_skips_classifier() {
        let classifier = Arc::new(FixedClassifier::constant());
        let pipeline = BatchPipeline::new(classifier.clone());

        let result = pipeline.run(b",title,authors\n0,A,X\n").await;
        assert!(matches!(result, Err(Error::Schema(SchemaError::MissingColumns(_)))));
        assert_eq!(classifier.calls(), 0);
    }

    #[tokio::test]
    async fn test_wrong_label_count_is_inference_error() {
        let classifier = Arc::new(FixedClassifier::misbehaving(Misbehavior::DropLast));
        let result = BatchPipeline::new(classifier).run_demo().await;
        assert!(matches!(result, Err(Error::Inference(_))));
    }

    #[tokio::test]
    async fn test_unknown_label_is_inference_error() {
        let classifier = Arc::new(FixedClassifier::misbehaving(Misbehavior::UnknownLabel));
        let result = BatchPipeline::new(classifier).run_demo().await;
        assert!(matches!(result, Err(Error::Inference(_))));
    }

    #[tokio::test]
    async fn test_classifier_failure_is_inference_error() {
        let classifier = Arc::new(FixedClassifier::misbehaving(Misbehavior::Fail));
        let err = BatchPipeline::new(classifier).run_demo().await.unwrap_err();
        assert!(matches!(err, Error::Inference(_)));
        assert_eq!(err.user_message(), mc_core::INVALID_FILE_MESSAGE);
    }

    #[tokio::test]
    async fn test_header_only_upload() {
        let outcome = pipeline().run(b",title,authors,item_text\n").await.unwrap();
        assert!(outcome.result.is_empty());
        assert!(outcome.summary.is_empty());
        assert_eq!(outcome.export.as_bytes(), b",category_prediction,title,authors,item_text\n");
    }
}
