pub mod batch;
pub mod cli;
pub mod demo;
pub mod export;
pub mod logging;
pub mod single;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod validator;

pub use batch::{BatchOutcome, BatchPipeline};
pub use cli::{handle_command, PredictCommands};
pub use export::{ExportPayload, FILE_NAME, MIME_TYPE};
pub use logging::{init_logging, Logger};
pub use single::SinglePredictor;
pub use validator::parse_batch;

pub mod prelude {
    pub use super::batch::{BatchOutcome, BatchPipeline};
    pub use super::single::SinglePredictor;
    pub use super::export::ExportPayload;
    pub use mc_core::{ArticleForm, ArticleRecord, CategoryLabel, Classifier, Result, Error};
}
