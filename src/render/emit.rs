//! Streaming table emission.
//!
//! [`render_password_table`] drives a fixed, linear sequence: the opening
//! `<table>` tag, the optional header row, the column-header row (skipped for
//! single-column tables), one group of physical rows per record, the optional
//! trailing body block, and the closing tags. Nothing loops back; every
//! region is written at most once, directly to the caller's sink.
//!
//! Merged cells are decided before the first row is written: one span vector
//! per grouped column (the site column and each custom-field column), with
//! spans counted in physical rows so records that expand into several
//! secret-question sub-rows stay covered for their full height.

use std::io::{self, Write};

use log::debug;

use crate::error::RenderError;
use crate::escape::{escape_attr, escape_body};
use crate::host::DocumentHost;
use crate::model::{CustomField, DocRef, PasswordRecord, PasswordTable};
use crate::render::group::run_spans;
use crate::render::plan::TablePlan;
use crate::render::resolve::{ResolvedLink, resolve_link};

/// Render one password table as HTML.
///
/// The effective record sequence is `records` followed by `table.records`,
/// in order. `style` overrides `table.style` when given. Output goes to
/// `out` incrementally; on error the sink holds a partial table that the
/// caller must discard.
///
/// # Arguments
/// * `out` - sink for the generated markup
/// * `host` - document system used for link resolution and anchor ids
/// * `table` - table-level configuration and child records
/// * `records` - records to render ahead of the table's own
/// * `style` - inline CSS overriding `table.style`
pub fn render_password_table<W, H>(
    out: &mut W,
    host: &H,
    table: &PasswordTable,
    records: &[PasswordRecord],
    style: Option<&str>,
) -> Result<(), RenderError>
where
    W: Write,
    H: DocumentHost,
{
    let all: Vec<&PasswordRecord> = records.iter().chain(table.records.iter()).collect();
    let plan = TablePlan::scan(&all);
    debug!("rendering password table: {} records, {} columns", all.len(), plan.column_count);

    let emitter = TableEmitter {
        out,
        host,
        table,
        style: style.or(table.style.as_deref()),
        records: all,
        plan,
    };
    emitter.render()
}

/// Render a single password as an inline `<span>`, outside any table.
///
/// The span carries the host's [`DocumentHost::password_css_class`] when one
/// is configured, and an id only when the record has one and `doc` names the
/// owning document; the id goes through [`DocumentHost::anchor_id`] so it
/// stays unique in flattened multi-document output. The table emitter uses
/// the same function for its password cells.
pub fn render_password_span<W, H>(
    out: &mut W,
    host: &H,
    doc: Option<&DocRef>,
    record: &PasswordRecord,
) -> Result<(), RenderError>
where
    W: Write,
    H: DocumentHost,
{
    out.write_all(b"<span")?;
    if let Some(class) = host.password_css_class() {
        out.write_all(b" class=\"")?;
        escape_attr(out, class)?;
        out.write_all(b"\"")?;
    }
    if let (Some(doc), Some(id)) = (doc, &record.id) {
        out.write_all(b" id=\"")?;
        escape_attr(out, &host.anchor_id(doc, id))?;
        out.write_all(b"\"")?;
    }
    out.write_all(b">")?;
    escape_body(out, &record.password)?;
    out.write_all(b"</span>")?;
    Ok(())
}

struct TableEmitter<'a, W: Write, H: DocumentHost> {
    out: &'a mut W,
    host: &'a H,
    table: &'a PasswordTable,
    style: Option<&'a str>,
    records: Vec<&'a PasswordRecord>,
    plan: TablePlan,
}

impl<W: Write, H: DocumentHost> TableEmitter<'_, W, H> {
    fn render(mut self) -> Result<(), RenderError> {
        self.open_table()?;
        self.header_row()?;
        self.column_header_row()?;
        self.body_rows()?;
        self.trailing_body()?;
        self.out.write_all(b"</tbody>\n</table>")?;
        Ok(())
    }

    fn open_table(&mut self) -> Result<(), RenderError> {
        self.out.write_all(b"<table class=\"thinTable passwordTable\"")?;
        if let (Some(id), Some(doc)) = (&self.table.id, &self.table.doc) {
            self.out.write_all(b" id=\"")?;
            escape_attr(self.out, &self.host.anchor_id(doc, id))?;
            self.out.write_all(b"\"")?;
        }
        if let Some(style) = self.style {
            self.out.write_all(b" style=\"")?;
            escape_attr(self.out, style)?;
            self.out.write_all(b"\"")?;
        }
        self.out.write_all(b">\n<thead>\n")?;
        Ok(())
    }

    fn header_row(&mut self) -> Result<(), RenderError> {
        let Some(header) = &self.table.header else {
            return Ok(());
        };
        self.out.write_all(b"<tr>\n<th class=\"passwordTableHeader\"")?;
        if self.plan.column_count > 1 {
            write!(self.out, " colspan=\"{}\"", self.plan.column_count)?;
        }
        self.out.write_all(b"><div>")?;
        escape_body(self.out, header)?;
        self.out.write_all(b"</div></th>\n</tr>\n")?;
        Ok(())
    }

    fn column_header_row(&mut self) -> Result<(), RenderError> {
        if self.plan.column_count > 1 {
            self.out.write_all(b"<tr>\n")?;
            if self.plan.has_href {
                self.out.write_all(b"<th>Site</th>\n")?;
            }
            for name in &self.plan.custom_field_names {
                self.out.write_all(b"<th>")?;
                escape_body(self.out, name)?;
                self.out.write_all(b"</th>\n")?;
            }
            if self.plan.has_username {
                self.out.write_all(b"<th>Username</th>\n")?;
            }
            self.out.write_all(b"<th>Password</th>\n")?;
            if self.plan.has_secret_question {
                self.out.write_all(b"<th>Secret Question</th>\n<th>Secret Answer</th>\n")?;
            }
            self.out.write_all(b"</tr>\n")?;
        }
        self.out.write_all(b"</thead>\n<tbody>\n")?;
        Ok(())
    }

    fn body_rows(&mut self) -> Result<(), RenderError> {
        let href_spans = column_spans(&self.records, |record| record.href.as_deref());
        let custom_spans: Vec<Vec<Option<usize>>> = self
            .plan
            .custom_field_names
            .iter()
            .map(|name| column_spans(&self.records, |record| record.custom_fields.get(name)))
            .collect();

        for ix in 0..self.records.len() {
            let record = self.records[ix];
            self.emit_record(ix, record, &href_spans, &custom_spans)?;
        }
        Ok(())
    }

    /// Emit one record: `row_weight` physical rows, primary cells on the
    /// first row only, question/answer cells on every row.
    fn emit_record(
        &mut self,
        ix: usize,
        record: &PasswordRecord,
        href_spans: &[Option<usize>],
        custom_spans: &[Vec<Option<usize>>],
    ) -> Result<(), RenderError> {
        let weight = record.row_weight();
        let mut questions = record.secret_questions.iter();

        for row in 0..weight {
            self.out.write_all(b"<tr>\n")?;
            if row == 0 {
                self.primary_cells(ix, record, href_spans, custom_spans)?;
            }
            if self.plan.has_secret_question {
                match questions.next() {
                    Some((question, answer)) => {
                        self.out.write_all(b"<td>")?;
                        escape_body(self.out, question)?;
                        self.out.write_all(b"</td>\n<td>")?;
                        escape_body(self.out, answer)?;
                        self.out.write_all(b"</td>\n")?;
                    }
                    None => self.out.write_all(b"<td></td>\n<td></td>\n")?,
                }
            }
            self.out.write_all(b"</tr>\n")?;
        }
        Ok(())
    }

    /// Emit the first-row cells of a record, honoring run coverage: a `None`
    /// span means an earlier record's cell already spans down through this
    /// record, so no cell is written at all.
    fn primary_cells(
        &mut self,
        ix: usize,
        record: &PasswordRecord,
        href_spans: &[Option<usize>],
        custom_spans: &[Vec<Option<usize>>],
    ) -> Result<(), RenderError> {
        let weight = record.row_weight();

        if self.plan.has_href
            && let Some(span) = href_spans[ix]
        {
            open_td(self.out, span)?;
            if let Some(href) = &record.href {
                let address = self.host.href(href);
                self.out.write_all(b"<a href=\"")?;
                escape_attr(self.out, &address)?;
                self.out.write_all(b"\">")?;
                escape_body(self.out, href)?;
                self.out.write_all(b"</a>")?;
            }
            self.out.write_all(b"</td>\n")?;
        }

        for (column, name) in self.plan.custom_field_names.iter().enumerate() {
            let Some(span) = custom_spans[column][ix] else {
                continue;
            };
            open_td(self.out, span)?;
            match record.custom_fields.get(name) {
                None => {}
                Some(CustomField::Literal(text)) => escape_body(self.out, text)?,
                Some(CustomField::Link { doc, element, label }) => {
                    let link =
                        resolve_link(self.host, doc, element.as_deref(), label.as_deref())?;
                    write_link(self.out, &link)?;
                }
            }
            self.out.write_all(b"</td>\n")?;
        }

        // Username and password never merge across records; they span only
        // their own record's sub-rows.
        if self.plan.has_username {
            open_td(self.out, weight)?;
            if let Some(username) = &record.username {
                escape_body(self.out, username)?;
            }
            self.out.write_all(b"</td>\n")?;
        }

        open_td(self.out, weight)?;
        render_password_span(self.out, self.host, self.table.doc.as_ref(), record)?;
        self.out.write_all(b"</td>\n")?;
        Ok(())
    }

    fn trailing_body(&mut self) -> Result<(), RenderError> {
        if let Some(body) = &self.table.body
            && !body.is_empty()
        {
            self.out.write_all(b"<tr><td class=\"passwordTableBody\"")?;
            if self.plan.column_count > 1 {
                write!(self.out, " colspan=\"{}\"", self.plan.column_count)?;
            }
            self.out.write_all(b">")?;
            self.out.write_all(body.as_bytes())?;
            self.out.write_all(b"</td></tr>\n")?;
        }
        Ok(())
    }
}

/// Span vector for one column: extract each record's value, pair it with the
/// record's physical-row weight, and group adjacent equal values.
fn column_spans<'r, V, F>(records: &[&'r PasswordRecord], value: F) -> Vec<Option<usize>>
where
    V: PartialEq,
    F: Fn(&'r PasswordRecord) -> V,
{
    let cells: Vec<(V, usize)> = records
        .iter()
        .map(|&record| (value(record), record.row_weight()))
        .collect();
    run_spans(&cells, |a, b| a.0 == b.0, |cell| cell.1)
}

fn open_td<W: Write>(out: &mut W, span: usize) -> io::Result<()> {
    out.write_all(b"<td")?;
    if span > 1 {
        write!(out, " rowspan=\"{}\"", span)?;
    }
    out.write_all(b">")
}

fn write_link<W: Write>(out: &mut W, link: &ResolvedLink) -> io::Result<()> {
    match link {
        ResolvedLink::Anchor { href, label, css_class, ordinal } => {
            out.write_all(b"<a")?;
            if let Some(class) = css_class {
                out.write_all(b" class=\"")?;
                escape_attr(out, class)?;
                out.write_all(b"\"")?;
            }
            out.write_all(b" href=\"")?;
            escape_attr(out, href)?;
            out.write_all(b"\">")?;
            escape_body(out, label)?;
            if let Some(ix) = ordinal {
                write!(out, "<sup>[{}]</sup>", ix + 1)?;
            }
            out.write_all(b"</a>")?;
        }
        ResolvedLink::Broken { label } => escape_body(out, label)?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "emit_test.rs"]
mod emit_test;
