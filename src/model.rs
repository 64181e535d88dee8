//! Core data model for password tables.
//!
//! This module defines the entities the renderer consumes: document
//! references, custom field values, credential records, and the table-level
//! configuration. Nothing here is mutated after construction; rendering is a
//! pure transform over these types.

use indexmap::IndexMap;

/// Reference to a document in the host content system
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct DocRef {
    /// Mount prefix of the owning collection (empty for the root collection)
    pub collection: String,

    /// Document path within the collection, starting with `/`
    pub path: String,
}

impl DocRef {
    pub fn new(collection: &str, path: &str) -> Self {
        Self { collection: collection.to_string(), path: path.to_string() }
    }

    /// Collection prefix and document path joined into the routable form
    /// used for addressing and for broken-reference labels.
    pub fn routable_path(&self) -> String {
        format!("{}{}", self.collection, self.path)
    }
}

/// Value of a custom field: either literal text or a cross-reference.
///
/// Equality is structural and drives cell grouping: two `Link`s merge only
/// when target document, element, and label override all match.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CustomField {
    /// Plain display text
    Literal(String),

    /// Cross-reference to a document, or to an element within one
    Link {
        doc: DocRef,
        /// Element id within the target document, if targeting an element
        element: Option<String>,
        /// Explicit display text overriding the resolved label
        label: Option<String>,
    },
}

/// A single credential entry
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PasswordRecord {
    /// Stable anchor id within the owning document (assumed unique there)
    pub id: Option<String>,

    /// Site URL, plain text (not a cross-reference)
    pub href: Option<String>,

    pub username: Option<String>,

    /// Required; rendered escaped, never masked by this layer
    pub password: String,

    /// Insertion-ordered; names drive the dynamic column union
    pub custom_fields: IndexMap<String, CustomField>,

    /// Insertion-ordered question/answer pairs; one physical row each
    pub secret_questions: IndexMap<String, String>,
}

impl PasswordRecord {
    /// Create a record with only the required password set.
    pub fn new(password: &str) -> Self {
        Self {
            id: None,
            href: None,
            username: None,
            password: password.to_string(),
            custom_fields: IndexMap::new(),
            secret_questions: IndexMap::new(),
        }
    }

    /// Number of physical table rows this record occupies: one per secret
    /// question, minimum one.
    pub fn row_weight(&self) -> usize {
        self.secret_questions.len().max(1)
    }
}

/// Table-level configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PasswordTable {
    /// Anchor id of the table itself, namespaced by the owning document
    pub id: Option<String>,

    /// Caption text for the header row
    pub header: Option<String>,

    /// Inline CSS for the `style` attribute
    pub style: Option<String>,

    /// Owning document; namespaces the table id and record anchor ids
    pub doc: Option<DocRef>,

    /// Child records, rendered after any caller-supplied records
    pub records: Vec<PasswordRecord>,

    /// Trailing free-form markup block, written verbatim (pre-rendered and
    /// trusted; this layer never escapes it)
    pub body: Option<String>,
}

impl PasswordTable {
    pub fn new() -> Self {
        Self { id: None, header: None, style: None, doc: None, records: Vec::new(), body: None }
    }
}

impl Default for PasswordTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routable_path_joins_collection_and_path() {
        let doc = DocRef::new("/accounts", "/hosting.page");
        assert_eq!(doc.routable_path(), "/accounts/hosting.page");

        let root = DocRef::new("", "/index.page");
        assert_eq!(root.routable_path(), "/index.page");
    }

    #[test]
    fn test_row_weight_is_one_per_question_minimum_one() {
        let mut record = PasswordRecord::new("hunter2");
        assert_eq!(record.row_weight(), 1);

        record.secret_questions.insert("pet".to_string(), "rex".to_string());
        assert_eq!(record.row_weight(), 1);

        record.secret_questions.insert("street".to_string(), "elm".to_string());
        assert_eq!(record.row_weight(), 2);
    }

    #[test]
    fn test_custom_field_equality_is_structural() {
        let a = CustomField::Link {
            doc: DocRef::new("", "/billing.page"),
            element: Some("invoices".to_string()),
            label: None,
        };
        let b = a.clone();
        assert_eq!(a, b);

        let c = CustomField::Link {
            doc: DocRef::new("", "/billing.page"),
            element: Some("invoices".to_string()),
            label: Some("Billing".to_string()),
        };
        assert_ne!(a, c);

        assert_ne!(CustomField::Literal("x".to_string()), CustomField::Literal("y".to_string()));
    }

    #[test]
    fn test_secret_questions_keep_insertion_order() {
        let mut record = PasswordRecord::new("pw");
        record.secret_questions.insert("first?".to_string(), "1".to_string());
        record.secret_questions.insert("second?".to_string(), "2".to_string());
        record.secret_questions.insert("third?".to_string(), "3".to_string());

        let questions: Vec<&str> = record.secret_questions.keys().map(|q| q.as_str()).collect();
        assert_eq!(questions, ["first?", "second?", "third?"]);
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let mut record = PasswordRecord::new("s3cret");
        record.id = Some("mail".to_string());
        record.username = Some("alice".to_string());
        record.custom_fields.insert(
            "Account".to_string(),
            CustomField::Link {
                doc: DocRef::new("/accounts", "/mail.page"),
                element: None,
                label: None,
            },
        );
        record.secret_questions.insert("color?".to_string(), "teal".to_string());

        let json = serde_json::to_string(&record).unwrap();
        let back: PasswordRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
        assert_eq!(back.row_weight(), 1);
    }
}
