//! # contract: shared types and seams of the prompt-checker core
//!
//! This module defines the plain data types passed between the format
//! detector, the extractors, the extraction pipeline and the analysis
//! engine, together with the two traits that form the core's seams:
//!
//! - [`TextExtractor`]: converts an in-memory document buffer into plain text.
//!   [`crate::extract::DocumentExtractor`] is the production implementation.
//! - [`EventSink`]: receives observability events emitted while a document is
//!   processed. [`crate::events::TracingEventSink`] forwards them to `tracing`.
//!
//! ## Mocking & Testing
//! Both traits are annotated for `mockall` (behind the `test-export-mocks`
//! feature, enabled by default) so that dependents can assert which events
//! were emitted and that no extractor ran for a rejected content type.

use mockall::automock;
use serde::Serialize;
use thiserror::Error;

/// The kind of document a declared content type routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentFormat {
    Spreadsheet,
    WordDocument,
    Pdf,
    Unsupported,
}

impl DocumentFormat {
    /// Human-readable name used in user-facing messages.
    pub fn description(&self) -> &'static str {
        match self {
            DocumentFormat::Spreadsheet => "Excel file",
            DocumentFormat::WordDocument => "Word document",
            DocumentFormat::Pdf => "PDF document",
            DocumentFormat::Unsupported => "Unknown file type",
        }
    }
}

/// Complexity tier of a prompt, derived only from its word count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Complexity::Simple => "Simple",
            Complexity::Moderate => "Moderate",
            Complexity::Complex => "Complex",
        };
        f.write_str(label)
    }
}

/// Structured quality assessment of a single prompt.
///
/// `clarity` and `bias` are always within `1..=10` and `suggestions` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub clarity: u8,
    pub bias: u8,
    pub word_count: usize,
    pub complexity: Complexity,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Text produced by the extraction pipeline for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    pub text: String,
    pub source_format: DocumentFormat,
}

/// Failure of a single format reader. Always carries the reader's own error.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("failed to read word document: {0}")]
    WordDocument(#[from] docx_rs::ReaderError),
    #[error("failed to read PDF: {0}")]
    Pdf(#[from] pdf_extract::OutputError),
    #[error("PDF reader panicked, the document is likely malformed")]
    PdfPanicked,
}

/// Error kinds surfaced by [`crate::pipeline::extract`].
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("unsupported content type: {content_type}")]
    UnsupportedFormat { content_type: String },
    #[error("failed to extract text from {file_name}: {source}")]
    Extraction {
        file_name: String,
        #[source]
        source: ExtractionError,
    },
    #[error("no text content found in {file_name}")]
    EmptyContent { file_name: String },
}

/// Observability events emitted while a document moves through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    AttachmentReceived {
        file_name: String,
        content_type: String,
    },
    ProcessingStarted {
        file_name: String,
        format: DocumentFormat,
    },
    ErrorEncountered {
        file_name: String,
        message: String,
    },
}

/// Receiver for [`PipelineEvent`]s. Implementations must not fail or block for long.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &PipelineEvent);
}

/// Converts document buffers into plain text, one method per supported format.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait TextExtractor: Send + Sync {
    /// Row-major, sheet-major cell values, one per line.
    fn extract_spreadsheet(&self, bytes: &[u8]) -> Result<String, ExtractionError>;

    /// Raw document text without formatting, trimmed.
    fn extract_word_document(&self, bytes: &[u8]) -> Result<String, ExtractionError>;

    /// Concatenated text stream of the document, trimmed.
    fn extract_pdf(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}
