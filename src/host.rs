//! Host document-system abstraction.
//!
//! The renderer never walks a content repository itself; everything it needs
//! from the surrounding system arrives through [`DocumentHost`]: capturing
//! referenced documents, accessibility checks, batch placement, and address
//! composition. The trait allows rendering against the in-memory
//! [`StaticHost`] in tests and lets embedders bridge to a real capture
//! pipeline.

use std::collections::HashSet;

use indexmap::IndexMap;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::model::DocRef;

/// How much of a document a capture must materialize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureDepth {
    /// Title only
    Page,
    /// Title plus element index and generated-id set
    Metadata,
}

/// Metadata for one element of a captured document
#[derive(Debug, Clone, PartialEq)]
pub struct ElementInfo {
    /// Human-readable label, used as link text when no override is given
    pub label: String,

    /// CSS class the host wants on links targeting this element kind
    pub link_css_class: Option<String>,
}

/// A captured document: its title plus, at [`CaptureDepth::Metadata`], the
/// element index and the set of ids the host generated rather than authored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub title: String,

    /// Elements by id, in document order
    pub elements: IndexMap<String, ElementInfo>,

    /// Ids assigned by the host; unstable across edits, so persistent
    /// references must not target them
    pub generated_ids: HashSet<String>,
}

impl Document {
    pub fn new(title: &str) -> Self {
        Self { title: title.to_string(), elements: IndexMap::new(), generated_ids: HashSet::new() }
    }

    /// Add an element with the given id and link label.
    pub fn with_element(mut self, id: &str, label: &str, link_css_class: Option<&str>) -> Self {
        self.elements.insert(
            id.to_string(),
            ElementInfo {
                label: label.to_string(),
                link_css_class: link_css_class.map(|class| class.to_string()),
            },
        );
        self
    }

    /// Add an element whose id was generated by the host.
    pub fn with_generated_element(self, id: &str, label: &str) -> Self {
        let mut doc = self.with_element(id, label, None);
        doc.generated_ids.insert(id.to_string());
        doc
    }

    pub fn element_by_id(&self, id: &str) -> Option<&ElementInfo> {
        self.elements.get(id)
    }

    pub fn is_generated_id(&self, id: &str) -> bool {
        self.generated_ids.contains(id)
    }
}

/// Fragment id for the `ix`-th document of a flattened batch: `page{n}`, or
/// `page{n}-{id}` when an element id is given.
///
/// `ix` is 0-based; the rendered number is 1-based, so the first batch
/// document yields `page1`.
pub fn batch_anchor(ix: usize, id: Option<&str>) -> String {
    match id {
        Some(id) => format!("page{}-{}", ix + 1, id),
        None => format!("page{}", ix + 1),
    }
}

/// Characters percent-encoded in routable paths. Structural separators
/// (`/`, `#`, `?`, `&`, `=`) pass through so composed paths keep their shape.
const PATH_ENCODE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^');

/// Percent-encode a routable path (optionally carrying a `#fragment`).
pub fn encode_url_path(path: &str) -> String {
    utf8_percent_encode(path, PATH_ENCODE).to_string()
}

/// Whether `value` is an absolute URL carrying a scheme (`https://…`,
/// `mailto:…`) rather than a site-relative path.
pub fn has_url_scheme(value: &str) -> bool {
    let mut chars = value.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    for c in chars {
        match c {
            ':' => return true,
            c if c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-') => {}
            _ => return false,
        }
    }
    false
}

/// Access to the surrounding document system.
///
/// Captures are blocking and performed once per unresolved reference; the
/// renderer issues them sequentially.
pub trait DocumentHost {
    /// Whether the current viewer may capture the target document at all.
    fn is_accessible(&self, doc: &DocRef) -> bool;

    /// Capture `doc` at the given depth. `None` means the document could not
    /// be produced; the renderer treats that as a broken reference, not an
    /// error.
    fn capture(&self, doc: &DocRef, depth: CaptureDepth) -> Option<Document>;

    /// Position of `doc` within the current rendering batch, 0-based, when
    /// the output is a flattened multi-document view.
    fn batch_index(&self, doc: &DocRef) -> Option<usize> {
        let _ = doc;
        None
    }

    /// Compose a routable path (which may already carry a `#fragment`) into
    /// the final clickable address: context prefix, URL encoding. Absolute
    /// URLs with a scheme are already addresses and must pass through
    /// untouched.
    fn href(&self, path: &str) -> String;

    /// CSS class to stamp on rendered password spans, if the host styles
    /// them.
    fn password_css_class(&self) -> Option<&str> {
        None
    }

    /// The id attribute to write for `id` as defined by `doc`. In-batch
    /// documents get the flattened `page{n}-…` form so ids stay unique when
    /// several documents share one output page.
    fn anchor_id(&self, doc: &DocRef, id: &str) -> String {
        match self.batch_index(doc) {
            Some(ix) => batch_anchor(ix, Some(id)),
            None => id.to_string(),
        }
    }
}

/// In-memory [`DocumentHost`] with registered documents, per-document
/// accessibility, an optional batch order, and a context path prefix.
///
/// Stands in for a full content pipeline in tests and simple embeddings.
#[derive(Debug, Default)]
pub struct StaticHost {
    context_path: String,
    password_class: Option<String>,
    docs: IndexMap<DocRef, HostedDoc>,
    batch: Vec<DocRef>,
}

#[derive(Debug)]
struct HostedDoc {
    document: Document,
    accessible: bool,
}

impl StaticHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix prepended to every out-of-batch address (e.g. `/wiki`).
    pub fn with_context_path(mut self, prefix: &str) -> Self {
        self.context_path = prefix.to_string();
        self
    }

    /// CSS class stamped on every rendered password span.
    pub fn with_password_class(mut self, class: &str) -> Self {
        self.password_class = Some(class.to_string());
        self
    }

    /// Register an accessible document.
    pub fn add_document(&mut self, doc: DocRef, document: Document) {
        self.docs.insert(doc, HostedDoc { document, accessible: true });
    }

    /// Register a document the current viewer may not capture.
    pub fn add_inaccessible(&mut self, doc: DocRef) {
        self.docs.insert(doc, HostedDoc { document: Document::new(""), accessible: false });
    }

    /// Declare the flattened batch order used for in-batch addressing.
    pub fn set_batch(&mut self, batch: Vec<DocRef>) {
        self.batch = batch;
    }
}

impl DocumentHost for StaticHost {
    fn is_accessible(&self, doc: &DocRef) -> bool {
        self.docs.get(doc).map(|hosted| hosted.accessible).unwrap_or(false)
    }

    fn capture(&self, doc: &DocRef, depth: CaptureDepth) -> Option<Document> {
        let hosted = self.docs.get(doc)?;
        if !hosted.accessible {
            return None;
        }
        Some(match depth {
            CaptureDepth::Page => Document::new(&hosted.document.title),
            CaptureDepth::Metadata => hosted.document.clone(),
        })
    }

    fn batch_index(&self, doc: &DocRef) -> Option<usize> {
        self.batch.iter().position(|batched| batched == doc)
    }

    fn password_css_class(&self) -> Option<&str> {
        self.password_class.as_deref()
    }

    fn href(&self, path: &str) -> String {
        if has_url_scheme(path) {
            return path.to_string();
        }
        format!("{}{}", self.context_path, encode_url_path(path))
    }
}
