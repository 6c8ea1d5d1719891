use tracing::{error, info};

use crate::contract::{EventSink, PipelineEvent};

/// Default [`EventSink`]: turns pipeline events into structured `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: &PipelineEvent) {
        match event {
            PipelineEvent::AttachmentReceived {
                file_name,
                content_type,
            } => info!(file_name = %file_name, content_type = %content_type, "attachment_received"),
            PipelineEvent::ProcessingStarted { file_name, format } => info!(
                file_name = %file_name,
                format = format.description(),
                "processing_started"
            ),
            PipelineEvent::ErrorEncountered { file_name, message } => {
                error!(file_name = %file_name, error = %message, "error_encountered")
            }
        }
    }
}
