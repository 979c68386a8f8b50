use std::sync::Arc;
use csv::{Terminator, WriterBuilder};
use mc_core::{Error, PredictionResult, Result, PREDICTION_COLUMN, REQUIRED_COLUMNS};

pub const FILE_NAME: &str = "NLP-Predictions.csv";
pub const MIME_TYPE: &str = "text/csv";

/// Encoded predictions ready for download. Cloning shares the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    bytes: Arc<[u8]>,
}

impl ExportPayload {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn file_name(&self) -> &'static str {
        FILE_NAME
    }

    pub fn mime_type(&self) -> &'static str {
        MIME_TYPE
    }
}

impl AsRef<[u8]> for ExportPayload {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Serialize a result as `,category_prediction,title,authors,item_text`
/// rows. The output depends only on the result.
pub fn encode(result: &PredictionResult) -> Result<ExportPayload> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let mut header = vec!["", PREDICTION_COLUMN];
    header.extend(REQUIRED_COLUMNS);
    writer.write_record(&header).map_err(export_error)?;

    for row in result.rows() {
        let index = row.index.to_string();
        writer
            .write_record([
                index.as_str(),
                row.category_prediction.as_str(),
                row.record.title.as_str(),
                row.record.authors.as_str(),
                row.record.item_text.as_str(),
            ])
            .map_err(export_error)?;
    }

    let bytes = writer.into_inner().map_err(|e| Error::Export(e.to_string()))?;
    Ok(ExportPayload { bytes: bytes.into() })
}

fn export_error(err: csv::Error) -> Error {
    Error::Export(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mc_core::{ArticleBatch, ArticleRecord, CategoryLabel};

    fn result() -> PredictionResult {
        let batch = ArticleBatch::new(vec![
            ArticleRecord::new("A", "X", "lung cancer treatment"),
            ArticleRecord::new("Heart, again", "Doe, J", "He said \"hi\"\nthen left"),
        ]);
        let labels = vec![CategoryLabel::from("Oncology"), CategoryLabel::from("Cardiology")];
        PredictionResult::from_parts(batch, labels).unwrap()
    }

    #[test]
    fn test_encode_layout() {
        let payload = encode(&result()).unwrap();
        let text = std::str::from_utf8(payload.as_bytes()).unwrap();

        assert_eq!(
            text,
            ",category_prediction,title,authors,item_text\n\
             0,Oncology,A,X,lung cancer treatment\n\
             1,Cardiology,\"Heart, again\",\"Doe, J\",\"He said \"\"hi\"\"\nthen left\"\n"
        );
        assert_eq!(payload.file_name(), "NLP-Predictions.csv");
        assert_eq!(payload.mime_type(), "text/csv");
    }

    #[test]
    fn test_encode_decodes_back() {
        let result = result();
        let payload = encode(&result).unwrap();

        let mut reader = csv::Reader::from_reader(payload.as_bytes());
        let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(header, vec!["", "category_prediction", "title", "authors", "item_text"]);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), result.len());
        for (row, expected) in rows.iter().zip(result.rows()) {
            assert_eq!(&row[0], expected.index.to_string());
            assert_eq!(&row[1], expected.category_prediction.as_str());
            assert_eq!(&row[2], expected.record.title);
            assert_eq!(&row[3], expected.record.authors);
            assert_eq!(&row[4], expected.record.item_text);
        }
    }

    #[test]
    fn test_encode_is_deterministic() {
        let result = result();
        assert_eq!(encode(&result).unwrap(), encode(&result).unwrap());
    }

    #[test]
    fn test_encode_empty_result() {
        let payload = encode(&PredictionResult::default()).unwrap();
        assert_eq!(payload.as_bytes(), b",category_prediction,title,authors,item_text\n");
    }
}
