//! Cross-reference resolution.
//!
//! Turns a `(document, element, label override)` triple into something the
//! emitter can write: a clickable anchor with resolved address and label, or
//! a plain-text fallback when the target cannot be captured. Only two
//! conditions are fatal here, and both are link-integrity violations on a
//! *captured* document: a missing element id, and an element id the host
//! generated (those are unstable across edits).

use log::debug;

use crate::error::RenderError;
use crate::host::{CaptureDepth, DocumentHost, batch_anchor};
use crate::model::DocRef;

/// Outcome of resolving one cross-reference
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedLink {
    /// Target captured; render an anchor
    Anchor {
        /// Final clickable address: a local `#…` fragment for in-batch
        /// targets, a host-composed path otherwise
        href: String,

        /// Display text, per the label precedence rules
        label: String,

        /// CSS class of the targeted element kind, if the host defines one
        css_class: Option<String>,

        /// 0-based batch position; rendered as a 1-based `[n]` marker
        ordinal: Option<usize>,
    },

    /// Target not captured; render the label as plain escaped text, no anchor
    Broken { label: String },
}

/// Resolve one cross-reference against the host.
///
/// Captures at [`CaptureDepth::Metadata`] when an element id is given (the
/// element index is needed), at [`CaptureDepth::Page`] otherwise. The target
/// is captured and the element validated even when `label_override` already
/// fixes the display text, so stale references fail loudly instead of
/// rendering a correct-looking label over a dead fragment.
///
/// Label precedence: override, then the found element's label, then the
/// captured document's title. An uncaptured target falls back to the
/// override or to `¿routable_path?`.
pub fn resolve_link<H: DocumentHost>(
    host: &H,
    doc: &DocRef,
    element: Option<&str>,
    label_override: Option<&str>,
) -> Result<ResolvedLink, RenderError> {
    let depth = if element.is_some() { CaptureDepth::Metadata } else { CaptureDepth::Page };
    let captured = if host.is_accessible(doc) { host.capture(doc, depth) } else { None };

    let Some(document) = captured else {
        debug!("target {} not captured, rendering fallback text", doc.routable_path());
        let label = match label_override {
            Some(value) => value.to_string(),
            None => format!("¿{}?", doc.routable_path()),
        };
        return Ok(ResolvedLink::Broken { label });
    };

    let found = match element {
        Some(id) => {
            let Some(info) = document.element_by_id(id) else {
                return Err(RenderError::ElementNotFound { doc: doc.clone(), id: id.to_string() });
            };
            if document.is_generated_id(id) {
                return Err(RenderError::GeneratedIdLink { doc: doc.clone(), id: id.to_string() });
            }
            Some(info)
        }
        None => None,
    };

    let ordinal = host.batch_index(doc);
    let href = match ordinal {
        Some(ix) => format!("#{}", batch_anchor(ix, element)),
        None => {
            let mut path = doc.routable_path();
            if let Some(id) = element {
                path.push('#');
                path.push_str(id);
            }
            host.href(&path)
        }
    };

    let label = if let Some(value) = label_override {
        value.to_string()
    } else if let Some(info) = found {
        info.label.clone()
    } else {
        document.title.clone()
    };

    let css_class = found.and_then(|info| info.link_css_class.clone());
    Ok(ResolvedLink::Anchor { href, label, css_class, ordinal })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Document, StaticHost};

    fn doc(path: &str) -> DocRef {
        DocRef::new("/accounts", path)
    }

    fn host_with_mail() -> StaticHost {
        let mut host = StaticHost::new().with_context_path("/wiki");
        host.add_document(
            doc("/mail.page"),
            Document::new("Mail Settings")
                .with_element("imap", "IMAP", Some("settingLink"))
                .with_generated_element("step-3", "Step 3"),
        );
        host
    }

    #[test]
    fn test_title_link_out_of_batch() {
        let host = host_with_mail();
        let link = resolve_link(&host, &doc("/mail.page"), None, None).unwrap();
        assert_eq!(
            link,
            ResolvedLink::Anchor {
                href: "/wiki/accounts/mail.page".to_string(),
                label: "Mail Settings".to_string(),
                css_class: None,
                ordinal: None,
            }
        );
    }

    #[test]
    fn test_element_link_carries_fragment_and_class() {
        let host = host_with_mail();
        let link = resolve_link(&host, &doc("/mail.page"), Some("imap"), None).unwrap();
        assert_eq!(
            link,
            ResolvedLink::Anchor {
                href: "/wiki/accounts/mail.page#imap".to_string(),
                label: "IMAP".to_string(),
                css_class: Some("settingLink".to_string()),
                ordinal: None,
            }
        );
    }

    #[test]
    fn test_in_batch_targets_use_local_fragments() {
        let mut host = host_with_mail();
        host.add_document(doc("/other.page"), Document::new("Other"));
        host.set_batch(vec![doc("/other.page"), doc("/mail.page")]);

        let whole_doc = resolve_link(&host, &doc("/mail.page"), None, None).unwrap();
        assert_eq!(
            whole_doc,
            ResolvedLink::Anchor {
                href: "#page2".to_string(),
                label: "Mail Settings".to_string(),
                css_class: None,
                ordinal: Some(1),
            }
        );

        let element = resolve_link(&host, &doc("/mail.page"), Some("imap"), None).unwrap();
        match element {
            ResolvedLink::Anchor { href, ordinal, .. } => {
                assert_eq!(href, "#page2-imap");
                assert_eq!(ordinal, Some(1));
            }
            other => panic!("expected anchor, got {other:?}"),
        }
    }

    #[test]
    fn test_override_label_wins_but_still_validates() {
        let host = host_with_mail();

        let link =
            resolve_link(&host, &doc("/mail.page"), Some("imap"), Some("our IMAP box")).unwrap();
        match link {
            ResolvedLink::Anchor { label, .. } => assert_eq!(label, "our IMAP box"),
            other => panic!("expected anchor, got {other:?}"),
        }

        // A stale element id is fatal even though the display text is fixed.
        let err = resolve_link(&host, &doc("/mail.page"), Some("gone"), Some("label"));
        assert!(matches!(err, Err(RenderError::ElementNotFound { .. })));
    }

    #[test]
    fn test_generated_ids_are_rejected() {
        let host = host_with_mail();
        let err = resolve_link(&host, &doc("/mail.page"), Some("step-3"), None);
        assert!(matches!(err, Err(RenderError::GeneratedIdLink { .. })));
    }

    #[test]
    fn test_uncaptured_targets_fall_back_to_text() {
        let mut host = host_with_mail();
        host.add_inaccessible(doc("/private.page"));

        let broken = resolve_link(&host, &doc("/private.page"), Some("any"), None).unwrap();
        assert_eq!(broken, ResolvedLink::Broken { label: "¿/accounts/private.page?".to_string() });

        let labeled =
            resolve_link(&host, &doc("/missing.page"), None, Some("old server")).unwrap();
        assert_eq!(labeled, ResolvedLink::Broken { label: "old server".to_string() });
    }
}
