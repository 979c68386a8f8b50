pub mod models;
pub mod error;
pub mod types;

pub use error::{Error, Result, SchemaError, EMPTY_TITLE_MESSAGE, INVALID_FILE_MESSAGE};
pub use models::Classifier;
pub use types::{
    ArticleBatch, ArticleForm, ArticleRecord, CategoryLabel, CategorySummary, PredictedArticle,
    PredictionResult, CATEGORY_COUNT, PREDICTION_COLUMN, REQUIRED_COLUMNS,
};
