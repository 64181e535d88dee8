// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Render credential records as a merged-cell HTML table.
//!
//! `passtable` turns a collection of credential records (site URL, username,
//! password, custom fields, secret question/answer pairs) into a single HTML
//! table:
//!
//! - columns appear only when some record uses them
//! - vertically-adjacent equal site and custom-field values merge into one
//!   `rowspan` cell, counted in physical rows
//! - each secret question/answer pair gets its own sub-row
//! - cross-references resolve through a pluggable [`DocumentHost`]; targets
//!   that cannot be captured degrade to plain text instead of failing the
//!   render, while stale element ids fail loudly
//!
//! The renderer is a pure transform: no caching, no shared state, output
//! streamed to any [`std::io::Write`].
//!
//! # Example
//!
//! ```
//! use passtable::{PasswordRecord, PasswordTable, StaticHost, render_password_table};
//!
//! let mut table = PasswordTable::new();
//! table.header = Some("Servers".to_string());
//!
//! let mut record = PasswordRecord::new("hunter2");
//! record.username = Some("alice".to_string());
//!
//! let mut html = Vec::new();
//! render_password_table(&mut html, &StaticHost::new(), &table, &[record], None)?;
//! assert!(String::from_utf8(html)?.contains("<th>Username</th>"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod escape;
pub mod host;
pub mod model;
pub mod render;

pub use error::RenderError;
pub use host::{CaptureDepth, Document, DocumentHost, ElementInfo, StaticHost};
pub use model::{CustomField, DocRef, PasswordRecord, PasswordTable};
pub use render::{ResolvedLink, TablePlan, render_password_span, render_password_table};
