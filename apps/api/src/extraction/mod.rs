//! Text extraction: the only I/O-bound stage of an analysis.
//!
//! `DocumentExtractor` sniffs the upload and delegates to `PdfExtractor` or
//! `PlainTextExtractor`. Failures are per-document and never abort a batch.

pub mod pdf;
pub mod plain_text;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub use pdf::PdfExtractor;
pub use plain_text::PlainTextExtractor;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("not a readable document: {0}")]
    InvalidDocument(String),

    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("text is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("document parser crashed: {0}")]
    Panicked(String),
}

/// Raw upload as received from the delivery layer.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedDocument {
    pub fn new(filename: impl Into<String>, content_type: Option<String>, bytes: Bytes) -> Self {
        Self {
            filename: filename.into(),
            content_type,
            bytes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    PlainText,
}

impl DocumentFormat {
    /// Magic bytes win over the filename, the filename over the declared MIME type.
    pub fn detect(upload: &UploadedDocument) -> Option<Self> {
        if upload.bytes.starts_with(b"%PDF-") {
            return Some(DocumentFormat::Pdf);
        }

        let filename = upload.filename.to_ascii_lowercase();
        if filename.ends_with(".pdf") {
            return Some(DocumentFormat::Pdf);
        }
        if filename.ends_with(".txt") || filename.ends_with(".text") {
            return Some(DocumentFormat::PlainText);
        }

        match upload.content_type.as_deref() {
            Some("application/pdf") => Some(DocumentFormat::Pdf),
            Some(ct) if ct.starts_with("text/plain") => Some(DocumentFormat::PlainText),
            _ => None,
        }
    }
}

/// Converts uploaded bytes into raw text. Page/section order must be preserved.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, upload: &UploadedDocument) -> Result<String, ExtractionError>;
}

/// Default extractor: dispatches on `DocumentFormat::detect`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentExtractor {
    pdf: PdfExtractor,
    plain_text: PlainTextExtractor,
}

impl DocumentExtractor {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TextExtractor for DocumentExtractor {
    async fn extract(&self, upload: &UploadedDocument) -> Result<String, ExtractionError> {
        match DocumentFormat::detect(upload) {
            Some(DocumentFormat::Pdf) => self.pdf.extract(upload).await,
            Some(DocumentFormat::PlainText) => self.plain_text.extract(upload).await,
            None => Err(ExtractionError::UnsupportedFormat(
                upload
                    .content_type
                    .clone()
                    .unwrap_or_else(|| upload.filename.clone()),
            )),
        }
    }
}
