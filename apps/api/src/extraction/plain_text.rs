use async_trait::async_trait;

use crate::extraction::{ExtractionError, TextExtractor, UploadedDocument};

/// UTF-8 text uploads. A leading byte-order mark is dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, upload: &UploadedDocument) -> Result<String, ExtractionError> {
        let text = String::from_utf8(upload.bytes.to_vec())?;
        Ok(text.trim_start_matches('\u{FEFF}').to_string())
    }
}
