use thiserror::Error;

/// Shown for every batch failure, whatever went wrong underneath.
pub const INVALID_FILE_MESSAGE: &str =
    "Please make sure you are using the right file format. Use the template if necessary.";

/// Shown when the form is submitted without a title.
pub const EMPTY_TITLE_MESSAGE: &str = "Please enter a title before trying to predict...";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("file is not valid UTF-8 text: {0}")]
    Encoding(String),

    #[error("file has no header row")]
    MissingHeader,

    #[error("malformed CSV{}: {message}", at_line(.line))]
    Malformed { line: Option<u64>, message: String },

    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("unexpected columns: {}", .0.join(", "))]
    UnexpectedColumns(Vec<String>),
}

fn at_line(line: &Option<u64>) -> String {
    line.map(|l| format!(" at line {}", l)).unwrap_or_default()
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// Text safe to show an end user. Schema and inference failures collapse
    /// into the same message.
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::EmptyTitle => EMPTY_TITLE_MESSAGE,
            Error::Schema(_) | Error::Inference(_) => INVALID_FILE_MESSAGE,
            _ => "Something went wrong while making your predictions.",
        }
    }

    /// Whether the failure was caused by the submitted input rather than the
    /// server.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Error::EmptyTitle | Error::Schema(_) | Error::Inference(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_failures_share_message() {
        let schema = Error::from(SchemaError::MissingColumns(vec!["title".to_string()]));
        let inference = Error::Inference("boom".to_string());

        assert_eq!(schema.user_message(), INVALID_FILE_MESSAGE);
        assert_eq!(inference.user_message(), INVALID_FILE_MESSAGE);
        assert!(schema.is_user_error());
        assert!(inference.is_user_error());
    }

    #[test]
    fn test_empty_title_message() {
        assert_eq!(Error::EmptyTitle.user_message(), EMPTY_TITLE_MESSAGE);
        assert!(!Error::Model("bad".to_string()).is_user_error());
    }

    #[test]
    fn test_malformed_display() {
        let err = SchemaError::Malformed { line: Some(3), message: "bad row".to_string() };
        assert_eq!(err.to_string(), "malformed CSV at line 3: bad row");
        let err = SchemaError::Malformed { line: None, message: "bad row".to_string() };
        assert_eq!(err.to_string(), "malformed CSV: bad row");
    }
}
