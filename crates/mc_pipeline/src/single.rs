use std::sync::Arc;
use mc_core::{ArticleForm, ArticleRecord, CategoryLabel, Classifier, Error, Result};
use crate::batch::checked_predict;
use crate::logging::Logger;

/// Classifies one manually entered article. The classifier only runs on
/// submission and only when a title is present.
pub struct SinglePredictor {
    classifier: Arc<dyn Classifier>,
    logger: Logger,
}

impl SinglePredictor {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            classifier,
            logger: Logger::new().with_prefix("[form]"),
        }
    }

    pub async fn submit(&self, form: ArticleForm) -> Result<CategoryLabel> {
        if form.title.trim().is_empty() {
            self.logger.debug("Rejected submission without a title");
            return Err(Error::EmptyTitle);
        }

        let record = ArticleRecord::from(form);
        let label = checked_predict(self.classifier.as_ref(), std::slice::from_ref(&record))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Inference("no prediction returned".to_string()))?;

        self.logger.info(&format!("🏷️ '{}' classified as {}", record.title, label));
        Ok(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{FixedClassifier, Misbehavior};
    use mc_inference::models::KeywordModel;

    fn form(title: &str, authors: &str, item_text: &str) -> ArticleForm {
        ArticleForm {
            title: title.to_string(),
            authors: authors.to_string(),
            item_text: item_text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_blank_title_rejected_without_inference() {
        let classifier = Arc::new(FixedClassifier::constant());
        let predictor = SinglePredictor::new(classifier.clone());

        for title in ["", "   ", "\t\n"] {
            let result = predictor.submit(form(title, "Doe J", "cardiac arrhythmia")).await;
            assert!(matches!(result, Err(Error::EmptyTitle)));
        }
        assert_eq!(classifier.calls(), 0);
    }

    #[tokio::test]
    async fn test_title_only_submission() {
        let model = Arc::new(KeywordModel::new());
        let predictor = SinglePredictor::new(model.clone());

        let label = predictor.submit(form("Stroke outcomes", "", "")).await.unwrap();
        assert!(model.knows_label(&label));
        assert_eq!(label.as_str(), "Neurology");
    }

    #[tokio::test]
    async fn test_single_prediction_calls_classifier_once() {
        let classifier = Arc::new(FixedClassifier::constant());
        let predictor = SinglePredictor::new(classifier.clone());

        let label = predictor.submit(form("Anything", "", "")).await.unwrap();
        assert_eq!(label.as_str(), "label r0");
        assert_eq!(classifier.calls(), 1);
    }

    #[tokio::test]
    async fn test_misbehaving_classifier() {
        let classifier = Arc::new(FixedClassifier::misbehaving(Misbehavior::DropLast));
        let predictor = SinglePredictor::new(classifier);
        assert!(matches!(predictor.submit(form("A", "", "")).await, Err(Error::Inference(_))));
    }
}
