//! Error types for table rendering.
//!
//! Only link-integrity violations and sink failures are errors; a reference
//! whose target simply cannot be captured is *not* one (it degrades to a
//! plain-text fallback label, see [`crate::render::resolve_link`]).

use crate::model::DocRef;

/// Fatal rendering failures. Any of these aborts the render; partial output
/// already written to the sink must be discarded by the caller.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("element \"{id}\" not found in document {}", .doc.routable_path())]
    ElementNotFound { doc: DocRef, id: String },

    #[error(
        "element \"{id}\" in document {} has a generated id; add a stable id to link to it",
        .doc.routable_path()
    )]
    GeneratedIdLink { doc: DocRef, id: String },

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_document_and_id() {
        let err = RenderError::ElementNotFound {
            doc: DocRef::new("/accounts", "/mail.page"),
            id: "imap".to_string(),
        };
        assert_eq!(err.to_string(), "element \"imap\" not found in document /accounts/mail.page");

        let err = RenderError::GeneratedIdLink {
            doc: DocRef::new("", "/setup.page"),
            id: "step-3".to_string(),
        };
        assert!(err.to_string().contains("/setup.page"));
        assert!(err.to_string().contains("generated id"));
    }

    #[test]
    fn test_io_errors_convert_with_question_mark() {
        fn write_nothing() -> Result<(), RenderError> {
            Err(std::io::Error::other("sink closed"))?;
            Ok(())
        }
        let err = write_nothing().unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }
}
