//! Table rendering pipeline.
//!
//! This module turns planned records into streamed HTML. The emitter walks a
//! fixed, linear sequence of regions; nothing is buffered beyond the
//! per-column span vectors computed up front.
//!
//! ```text
//!   TablePlan::scan          run_spans (per grouped column)
//!        │                          │
//!        ▼                          ▼
//!   ┌─────────┐   ┌──────────────┐   ┌──────────┐   ┌──────────────┐
//!   │ <table> │──►│ header row / │──►│ body     │──►│ trailing     │──► </table>
//!   │  open   │   │ column heads │   │ rows     │   │ body block   │
//!   └─────────┘   └──────────────┘   └──────────┘   └──────────────┘
//!                                         │
//!                                         ▼
//!                                   resolve_link (per cross-reference)
//! ```
//!
//! # Module Organization
//!
//! - `plan` - column-set detection across heterogeneous records
//! - `group` - run-length grouping of adjacent equal values into row spans
//! - `resolve` - cross-reference resolution with broken-link fallback
//! - `emit` - the streaming emitter itself

pub mod emit;
pub mod group;
pub mod plan;
pub mod resolve;

// Re-export the pipeline surface for convenience
pub use emit::{render_password_span, render_password_table};
pub use group::run_spans;
pub use plan::TablePlan;
pub use resolve::{ResolvedLink, resolve_link};
