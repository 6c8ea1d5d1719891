//! Content-type detection.
//!
//! Two predicates with different strictness live here on purpose:
//! [`is_supported_content_type`] is an exact allow-list match and must gate
//! every document before extraction, while [`classify`] uses loose substring
//! tests and only routes an already-accepted type to its extractor.

use crate::contract::DocumentFormat;
use tracing::debug;

/// Exact content types accepted for extraction.
pub const SUPPORTED_CONTENT_TYPES: [&str; 5] = [
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet", // .xlsx
    "application/vnd.ms-excel",                                          // .xls
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document", // .docx
    "application/msword",                                                // .doc
    "application/pdf",                                                   // .pdf
];

pub fn supported_content_types() -> &'static [&'static str] {
    &SUPPORTED_CONTENT_TYPES
}

/// Exact, case-sensitive membership test against [`SUPPORTED_CONTENT_TYPES`].
pub fn is_supported_content_type(content_type: &str) -> bool {
    SUPPORTED_CONTENT_TYPES
        .iter()
        .any(|supported| *supported == content_type)
}

/// Routes a content type to a format by case-sensitive substring containment.
///
/// Spreadsheet is tested first: the XLSX type also contains "document".
pub fn classify(content_type: &str) -> DocumentFormat {
    let format = if content_type.contains("spreadsheet") || content_type.contains("excel") {
        DocumentFormat::Spreadsheet
    } else if content_type.contains("word") || content_type.contains("document") {
        DocumentFormat::WordDocument
    } else if content_type.contains("pdf") {
        DocumentFormat::Pdf
    } else {
        DocumentFormat::Unsupported
    };
    debug!(content_type, ?format, "Classified content type");
    format
}
