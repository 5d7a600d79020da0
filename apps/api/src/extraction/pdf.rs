use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, warn};

use crate::extraction::{ExtractionError, TextExtractor, UploadedDocument};

/// PDF text extraction via `pdf-extract`, run on the blocking pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl PdfExtractor {
    fn extract_pages(bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| ExtractionError::InvalidDocument(format!("failed to parse PDF: {e}")))
    }
}

#[async_trait]
impl TextExtractor for PdfExtractor {
    #[tracing::instrument(skip(self, upload), fields(filename = %upload.filename, bytes = upload.bytes.len()))]
    async fn extract(&self, upload: &UploadedDocument) -> Result<String, ExtractionError> {
        let bytes: Bytes = upload.bytes.clone();

        // pdf-extract is synchronous and panics on some malformed inputs.
        let pages = tokio::task::spawn_blocking(move || Self::extract_pages(&bytes))
            .await
            .map_err(|e| {
                warn!("PDF parser task failed: {e}");
                ExtractionError::Panicked(e.to_string())
            })??;

        let blank = pages.iter().filter(|p| p.trim().is_empty()).count();
        debug!(pages = pages.len(), blank, "PDF pages extracted");

        let pages: Vec<&str> = pages.iter().map(|p| strip_page_break(p)).collect();
        Ok(join_pages(&pages))
    }
}

/// pdf-extract opens every page with a `"\n\n"` page break.
fn strip_page_break(page: &str) -> &str {
    page.trim_start_matches('\n')
}

/// Joins pages in reading order with a single newline between them.
/// A page without text (e.g. a scanned image) contributes an empty string.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(|p| p.as_ref())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_pages_uses_single_newline() {
        assert_eq!(join_pages(&["page one", "page two"]), "page one\npage two");
    }

    #[test]
    fn test_join_pages_keeps_empty_pages() {
        assert_eq!(join_pages(&["first", "", "third"]), "first\n\nthird");
    }

    #[test]
    fn test_join_pages_empty_document() {
        assert_eq!(join_pages::<&str>(&[]), "");
    }

    #[tokio::test]
    async fn test_garbage_bytes_are_an_extraction_error() {
        let upload = UploadedDocument::new(
            "garbage.pdf",
            Some("application/pdf".to_string()),
            Bytes::from_static(b"definitely not a pdf"),
        );
        let result = PdfExtractor.extract(&upload).await;
        assert!(matches!(
            result,
            Err(ExtractionError::InvalidDocument(_)) | Err(ExtractionError::Panicked(_))
        ));
    }

    #[test]
    fn test_strip_page_break() {
        assert_eq!(strip_page_break("\n\nPython alpha"), "Python alpha");
        assert_eq!(strip_page_break("\n\n"), "");
        assert_eq!(strip_page_break("no break\n"), "no break\n");
    }

    /// Builds a Courier PDF with one page per entry; `None` is a page with an empty content stream.
    fn build_pdf(pages: &[Option<&str>]) -> Vec<u8> {
        use lopdf::content::{Content, Operation};
        use lopdf::{dictionary, Document, Object, Stream};

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let operations = match text {
                Some(text) => vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![100.into(), 600.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
                None => vec![],
            };
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[tokio::test]
    async fn test_pdf_pages_joined_in_order_with_blank_page() {
        let bytes = build_pdf(&[Some("Python alpha"), None, Some("Java omega")]);
        let upload = UploadedDocument::new("three_pages.pdf", None, Bytes::from(bytes));

        let text = PdfExtractor.extract(&upload).await.unwrap();
        assert_eq!(text, "Python alpha\n\nJava omega");
    }
}
