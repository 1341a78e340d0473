//! PDF layout for the performance report.
//!
//! Thin glue over the PDF library: a title, the analysis paragraph, the
//! passed/failed sections, and the grade table, paginated onto A4 pages
//! in the built-in Helvetica faces.

use std::io::BufWriter;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use thiserror::Error;

use crate::models::{GradeRecord, Report};

const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const MARGIN: f64 = 20.0;
const LINE_HEIGHT: f64 = 6.0;
const TITLE_SIZE: f64 = 18.0;
const BODY_SIZE: f64 = 11.0;
const TABLE_SIZE: f64 = 10.0;
// Widest body line that stays inside the margins
const WRAP_WIDTH: usize = 95;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

/// Cursor that lays text down one line at a time, breaking to a fresh
/// page when it reaches the bottom margin
struct PageCursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f64,
}

impl PageCursor<'_> {
    fn ensure_room(&mut self) {
        if self.y < MARGIN {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn line(&mut self, text: &str, size: f64, font: &IndirectFontRef) {
        self.ensure_room();
        self.layer.use_text(text, size, Mm(MARGIN), Mm(self.y), font);
        self.y -= LINE_HEIGHT;
    }

    /// One four-column table row at equal column widths
    fn row(&mut self, cells: [&str; 4], font: &IndirectFontRef) {
        self.ensure_room();
        let column = (PAGE_WIDTH - 2.0 * MARGIN) / 4.0;
        for (index, cell) in cells.iter().enumerate() {
            let x = MARGIN + column * index as f64;
            self.layer.use_text(*cell, TABLE_SIZE, Mm(x), Mm(self.y), font);
        }
        self.y -= LINE_HEIGHT;
    }

    fn gap(&mut self) {
        self.y -= LINE_HEIGHT / 2.0;
    }
}

/// Lays out a report and its grade table into a paginated PDF document
///
/// ### Arguments
///
/// * `subject_name` - The subject the report covers
/// * `report` - The structured report (AI-produced or fallback)
/// * `records` - The reconciled records backing the grade table
///
/// ### Returns
///
/// The rendered document as bytes
pub fn render_report(
    subject_name: &str,
    report: &Report,
    records: &[GradeRecord],
) -> Result<Vec<u8>, RenderError> {
    let title = format!("AI Performance Report: {}", subject_name);
    let (doc, page, layer) =
        PdfDocument::new(title.as_str(), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|err| RenderError::Pdf(err.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|err| RenderError::Pdf(err.to_string()))?;

    {
        let mut cursor = PageCursor {
            doc: &doc,
            layer: doc.get_page(page).get_layer(layer),
            y: PAGE_HEIGHT - MARGIN,
        };

        cursor.line(&title, TITLE_SIZE, &bold);
        cursor.gap();

        for line in wrap(&report.analysis, WRAP_WIDTH) {
            cursor.line(&line, BODY_SIZE, &regular);
        }
        cursor.gap();

        cursor.line("Passed Students:", BODY_SIZE, &bold);
        for name in &report.passed_students {
            cursor.line(&format!("- {}", name), BODY_SIZE, &regular);
        }
        cursor.gap();

        cursor.line("Failed Students:", BODY_SIZE, &bold);
        for name in &report.failed_students {
            cursor.line(&format!("- {}", name), BODY_SIZE, &regular);
        }
        cursor.gap();

        cursor.line("Grade Details:", BODY_SIZE, &bold);
        cursor.row(["Name", "Prelim", "Midterm", "Final"], &bold);
        for record in records {
            let prelim = score_cell(record.prelim);
            let midterm = score_cell(record.midterm);
            let final_term = score_cell(record.final_term);
            cursor.row(
                [record.name.as_str(), &prelim, &midterm, &final_term],
                &regular,
            );
        }
    }

    let mut bytes = Vec::new();
    doc.save(&mut BufWriter::new(&mut bytes))
        .map_err(|err| RenderError::Pdf(err.to_string()))?;
    Ok(bytes)
}

/// Formats a table cell; absent scores print as 0
fn score_cell(value: Option<f64>) -> String {
    match value {
        Some(score) if score.fract() == 0.0 => format!("{:.0}", score),
        Some(score) => format!("{:.2}", score),
        None => "0".to_string(),
    }
}

/// Greedy word wrap at a column width
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
