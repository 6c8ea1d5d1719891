#![doc = "prompt-checker-core: survey prompt analysis and document text extraction."]

//! This crate contains the transport-free logic of prompt-checker: the
//! content-type detector, the spreadsheet/word/PDF text readers, the
//! extraction pipeline that ties them together, and the rule-based prompt
//! analysis engine.
//!
//! # Usage
//! ```no_run
//! use prompt_checker_core::{analyze, pipeline};
//!
//! let bytes = std::fs::read("survey.pdf").unwrap();
//! let document = pipeline::extract(&bytes, "application/pdf", "survey.pdf").unwrap();
//! let result = analyze(&document.text);
//! println!("clarity {}/10, bias {}/10", result.clarity, result.bias);
//! ```

pub mod analysis;
pub mod contract;
pub mod events;
pub mod extract;
pub mod format;
pub mod pipeline;

pub use analysis::analyze;
pub use contract::{
    AnalysisResult, Complexity, DocumentFormat, ExtractedDocument, ExtractionError, PipelineError,
};
pub use format::{classify, is_supported_content_type, supported_content_types};
