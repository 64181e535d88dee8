//! Column planning: which optional columns a table shows.
//!
//! Records are heterogeneous (one may carry a URL and custom fields, the next
//! only a password), but the table's column set must be decided before any
//! row is emitted and stay fixed for the whole table. The plan is a single
//! scan over the effective record sequence.

use indexmap::IndexSet;

use crate::model::PasswordRecord;

/// The visible column set of a table
#[derive(Debug, Clone, PartialEq)]
pub struct TablePlan {
    /// Show the Site column
    pub has_href: bool,

    /// Custom-field column names, in first-appearance order across records
    pub custom_field_names: Vec<String>,

    /// Show the Username column
    pub has_username: bool,

    /// Show the Secret Question / Secret Answer column pair
    pub has_secret_question: bool,

    /// Total columns, the always-present password column included
    pub column_count: usize,
}

impl TablePlan {
    /// Scan `records` once and decide the column set.
    ///
    /// The password column is always present; every other column appears only
    /// when some record sets the corresponding field. Custom-field columns
    /// keep the order in which their names first appear; a name used by
    /// several records occupies a single column.
    pub fn scan(records: &[&PasswordRecord]) -> Self {
        let mut has_href = false;
        let mut has_username = false;
        let mut has_secret_question = false;
        let mut names: IndexSet<&str> = IndexSet::new();

        for record in records {
            if record.href.is_some() {
                has_href = true;
            }
            if record.username.is_some() {
                has_username = true;
            }
            if !record.secret_questions.is_empty() {
                has_secret_question = true;
            }
            for name in record.custom_fields.keys() {
                names.insert(name.as_str());
            }
        }

        let custom_field_names: Vec<String> = names.into_iter().map(String::from).collect();
        let column_count = 1
            + usize::from(has_href)
            + custom_field_names.len()
            + usize::from(has_username)
            + 2 * usize::from(has_secret_question);

        Self { has_href, custom_field_names, has_username, has_secret_question, column_count }
    }
}
