//! Extraction pipeline: allow-list check → routing → extraction → empty-content check.
//!
//! The pipeline only ever sees bytes that are already in memory. Fetching them
//! (and any authorization that involves) belongs to the caller.
//!
//! Every call emits `AttachmentReceived` first. A call that gets as far as an
//! extractor also emits `ProcessingStarted`, and any failure emits
//! `ErrorEncountered` before the error is returned.

use tracing::{debug, info};

use crate::contract::{
    DocumentFormat, EventSink, ExtractedDocument, PipelineError, PipelineEvent, TextExtractor,
};
use crate::events::TracingEventSink;
use crate::extract::DocumentExtractor;
use crate::format::{classify, is_supported_content_type};

/// Runs documents through detection and extraction using the given collaborators.
pub struct ExtractionPipeline<E = DocumentExtractor, S = TracingEventSink> {
    extractor: E,
    sink: S,
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::new(DocumentExtractor, TracingEventSink)
    }
}

impl<E, S> ExtractionPipeline<E, S>
where
    E: TextExtractor,
    S: EventSink,
{
    pub fn new(extractor: E, sink: S) -> Self {
        Self { extractor, sink }
    }

    /// Extracts the text of one document.
    ///
    /// `file_name` is only used to annotate events and errors.
    pub fn extract(
        &self,
        bytes: &[u8],
        content_type: &str,
        file_name: &str,
    ) -> Result<ExtractedDocument, PipelineError> {
        self.sink.emit(&PipelineEvent::AttachmentReceived {
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
        });

        if !is_supported_content_type(content_type) {
            return Err(self.fail(
                file_name,
                PipelineError::UnsupportedFormat {
                    content_type: content_type.to_string(),
                },
            ));
        }

        let format = classify(content_type);
        self.sink.emit(&PipelineEvent::ProcessingStarted {
            file_name: file_name.to_string(),
            format,
        });

        let extracted = match format {
            DocumentFormat::Spreadsheet => self.extractor.extract_spreadsheet(bytes),
            DocumentFormat::WordDocument => self.extractor.extract_word_document(bytes),
            DocumentFormat::Pdf => self.extractor.extract_pdf(bytes),
            // Unreachable for allow-listed types.
            DocumentFormat::Unsupported => {
                return Err(self.fail(
                    file_name,
                    PipelineError::UnsupportedFormat {
                        content_type: content_type.to_string(),
                    },
                ))
            }
        };

        let text = extracted.map_err(|source| {
            self.fail(
                file_name,
                PipelineError::Extraction {
                    file_name: file_name.to_string(),
                    source,
                },
            )
        })?;

        if text.trim().is_empty() {
            return Err(self.fail(
                file_name,
                PipelineError::EmptyContent {
                    file_name: file_name.to_string(),
                },
            ));
        }

        info!(
            file_name,
            format = format.description(),
            chars = text.len(),
            "Document text extracted"
        );
        Ok(ExtractedDocument {
            text,
            source_format: format,
        })
    }

    fn fail(&self, file_name: &str, err: PipelineError) -> PipelineError {
        debug!(file_name, error = ?err, "Extraction pipeline rejected document");
        self.sink.emit(&PipelineEvent::ErrorEncountered {
            file_name: file_name.to_string(),
            message: err.to_string(),
        });
        err
    }
}

/// Runs the default pipeline (real readers, `tracing` events) on one document.
pub fn extract(
    bytes: &[u8],
    content_type: &str,
    file_name: &str,
) -> Result<ExtractedDocument, PipelineError> {
    <ExtractionPipeline>::default().extract(bytes, content_type, file_name)
}
