//! Format readers that turn in-memory document buffers into plain text.
//!
//! Each reader is a free function over `&[u8]`; [`DocumentExtractor`] bundles
//! them behind the [`TextExtractor`] trait for the pipeline. None of them
//! return an empty string in place of an error: a buffer that cannot be read
//! always yields an [`ExtractionError`].

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Reader};
use docx_rs::{
    DocumentChild, InsertChild, Paragraph, ParagraphChild, Run, RunChild, StructuredDataTagChild,
    Table, TableCellContent, TableChild, TableRowChild,
};
use tracing::{debug, error, info};

use crate::contract::{ExtractionError, TextExtractor};

/// Production [`TextExtractor`] backed by calamine, docx-rs and pdf-extract.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentExtractor;

impl TextExtractor for DocumentExtractor {
    fn extract_spreadsheet(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        extract_spreadsheet(bytes)
    }

    fn extract_word_document(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        extract_word_document(bytes)
    }

    fn extract_pdf(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        extract_pdf(bytes)
    }
}

/// Reads an XLSX or XLS workbook and flattens every sheet with [`flatten_cells`].
pub fn extract_spreadsheet(bytes: &[u8]) -> Result<String, ExtractionError> {
    debug!(size = bytes.len(), "Opening workbook");
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let mut sheets = Vec::new();
    for sheet_name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&sheet_name)?;
        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();
        debug!(sheet = %sheet_name, rows = rows.len(), "Read worksheet");
        sheets.push(rows);
    }

    let text = flatten_cells(sheets);
    info!(chars = text.len(), "Spreadsheet extracted");
    Ok(text)
}

/// Joins all non-blank cell values with `\n`, trimmed, in sheet-major then
/// row-major order. Blank cells leave no placeholder.
pub fn flatten_cells<Sheet, Row, Cell>(sheets: impl IntoIterator<Item = Sheet>) -> String
where
    Sheet: IntoIterator<Item = Row>,
    Row: IntoIterator<Item = Cell>,
    Cell: AsRef<str>,
{
    let mut lines: Vec<String> = Vec::new();
    for sheet in sheets {
        for row in sheet {
            for cell in row {
                let value = cell.as_ref().trim();
                if !value.is_empty() {
                    lines.push(value.to_string());
                }
            }
        }
    }
    lines.join("\n")
}

/// Raw text of a DOCX package: one line per paragraph.
///
/// Paragraphs are collected wherever they sit: in table cells (nested tables
/// included), in content controls, and in tracked insertions.
pub fn extract_word_document(bytes: &[u8]) -> Result<String, ExtractionError> {
    debug!(size = bytes.len(), "Reading word document");
    let docx = docx_rs::read_docx(bytes)?;

    let paragraphs = document_paragraphs(&docx.document.children);
    let text = paragraphs.join("\n").trim().to_string();
    info!(chars = text.len(), paragraphs = paragraphs.len(), "Word document extracted");
    Ok(text)
}

fn document_paragraphs(children: &[DocumentChild]) -> Vec<String> {
    let mut lines = Vec::new();
    for child in children {
        match child {
            DocumentChild::Paragraph(paragraph) => lines.push(paragraph_text(paragraph)),
            DocumentChild::Table(table) => push_table(table, &mut lines),
            DocumentChild::StructuredDataTag(tag) => push_tag_blocks(&tag.children, &mut lines),
            _ => {}
        }
    }
    lines
}

fn push_table(table: &Table, lines: &mut Vec<String>) {
    for row in &table.rows {
        let TableChild::TableRow(tr) = row;
        for cell in &tr.cells {
            let TableRowChild::TableCell(tc) = cell;
            push_cell_contents(&tc.children, lines);
        }
    }
}

fn push_cell_contents(contents: &[TableCellContent], lines: &mut Vec<String>) {
    for content in contents {
        match content {
            TableCellContent::Paragraph(paragraph) => lines.push(paragraph_text(paragraph)),
            TableCellContent::Table(table) => push_table(table, lines),
            TableCellContent::StructuredDataTag(tag) => push_tag_blocks(&tag.children, lines),
            _ => {}
        }
    }
}

/// Block-level content control. Loose runs form one line after its blocks.
fn push_tag_blocks(children: &[StructuredDataTagChild], lines: &mut Vec<String>) {
    let mut inline = String::new();
    for child in children {
        match child {
            StructuredDataTagChild::Paragraph(paragraph) => lines.push(paragraph_text(paragraph)),
            StructuredDataTagChild::Table(table) => push_table(table, lines),
            StructuredDataTagChild::StructuredDataTag(tag) => push_tag_blocks(&tag.children, lines),
            StructuredDataTagChild::Run(run) => push_run_text(run, &mut inline),
            _ => {}
        }
    }
    if !inline.is_empty() {
        lines.push(inline);
    }
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        push_paragraph_child(child, &mut text);
    }
    text
}

fn push_paragraph_child(child: &ParagraphChild, out: &mut String) {
    match child {
        ParagraphChild::Run(run) => push_run_text(run, out),
        ParagraphChild::Hyperlink(link) => {
            for nested in &link.children {
                push_paragraph_child(nested, out);
            }
        }
        ParagraphChild::Insert(insert) => {
            for inserted in &insert.children {
                if let InsertChild::Run(run) = inserted {
                    push_run_text(run, out);
                }
            }
        }
        ParagraphChild::StructuredDataTag(tag) => push_tag_inline(&tag.children, out),
        _ => {}
    }
}

/// Inline content control inside a paragraph.
fn push_tag_inline(children: &[StructuredDataTagChild], out: &mut String) {
    for child in children {
        match child {
            StructuredDataTagChild::Run(run) => push_run_text(run, out),
            StructuredDataTagChild::Paragraph(paragraph) => out.push_str(&paragraph_text(paragraph)),
            StructuredDataTagChild::StructuredDataTag(tag) => push_tag_inline(&tag.children, out),
            _ => {}
        }
    }
}

fn push_run_text(run: &Run, out: &mut String) {
    for run_child in &run.children {
        if let RunChild::Text(text) = run_child {
            out.push_str(&text.text);
        }
    }
}

/// Full text stream of a PDF, trimmed.
///
/// pdf-extract can panic on malformed fonts; the panic is caught and reported
/// as [`ExtractionError::PdfPanicked`].
pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    debug!(size = bytes.len(), "Reading PDF");
    let text = match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(result) => result?,
        Err(_) => {
            error!(size = bytes.len(), "PDF reader panicked");
            return Err(ExtractionError::PdfPanicked);
        }
    };
    let text = text.trim().to_string();
    info!(chars = text.len(), "PDF extracted");
    Ok(text)
}
