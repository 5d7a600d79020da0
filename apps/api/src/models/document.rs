use serde::Serialize;

/// A named text blob: a resume or a job description after extraction.
/// Fields are private so a document cannot change once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    id: String,
    content: String,
}

impl Document {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
        }
    }

    /// Filename or label the caller submitted the document under.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_exposes_id_and_content() {
        let doc = Document::new("alice.pdf", "Rust engineer");
        assert_eq!(doc.id(), "alice.pdf");
        assert_eq!(doc.content(), "Rust engineer");
    }
}
