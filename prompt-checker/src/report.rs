//! Rendering of analysis results and pipeline failures for the terminal.

use std::fmt::Write as _;

use prompt_checker_core::{AnalysisResult, DocumentFormat, PipelineError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Where a prompt came from when it was extracted from a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSource {
    pub file_name: String,
    pub format: DocumentFormat,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a DocumentSource>,
    #[serde(flatten)]
    analysis: &'a AnalysisResult,
}

/// ✅ for 8 and above, ⚠️ for 6–7, ❌ below.
pub fn score_marker(score: u8) -> &'static str {
    if score >= 8 {
        "✅"
    } else if score >= 6 {
        "⚠️"
    } else {
        "❌"
    }
}

pub fn render(
    format: OutputFormat,
    prompt: &str,
    result: &AnalysisResult,
    source: Option<&DocumentSource>,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(prompt, result, source)),
        OutputFormat::Json => render_json(prompt, result, source),
    }
}

pub fn render_text(prompt: &str, result: &AnalysisResult, source: Option<&DocumentSource>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Prompt Analysis Results");
    let _ = writeln!(out, "=======================");
    if let Some(source) = source {
        let _ = writeln!(
            out,
            "Source: {} ({})",
            source.file_name,
            source.format.description()
        );
    }

    let _ = writeln!(out, "\nYour Prompt:\n{prompt}");

    let _ = writeln!(out, "\nAnalysis:");
    let _ = writeln!(
        out,
        "  Clarity Score: {}/10 {}",
        result.clarity,
        score_marker(result.clarity)
    );
    let _ = writeln!(
        out,
        "  Bias Score:    {}/10 {}",
        result.bias,
        score_marker(result.bias)
    );
    let _ = writeln!(out, "  Word Count:    {} words", result.word_count);
    let _ = writeln!(out, "  Complexity:    {}", result.complexity);

    let _ = writeln!(out, "\nIssues Found:");
    if result.issues.is_empty() {
        let _ = writeln!(out, "  No major issues detected! ✓");
    }
    for issue in &result.issues {
        let _ = writeln!(out, "  {issue}");
    }

    let _ = writeln!(out, "\nSuggestions:");
    for suggestion in &result.suggestions {
        let _ = writeln!(out, "  {suggestion}");
    }
    out
}

pub fn render_json(
    prompt: &str,
    result: &AnalysisResult,
    source: Option<&DocumentSource>,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        prompt,
        source,
        analysis: result,
    })
}

/// User-facing explanation for each pipeline failure kind.
pub fn user_message(err: &PipelineError) -> String {
    match err {
        PipelineError::UnsupportedFormat { content_type } => format!(
            "Sorry, \"{content_type}\" files are not supported. Please send an Excel (.xlsx, .xls), Word (.docx, .doc) or PDF file."
        ),
        PipelineError::Extraction { file_name, source } => format!(
            "Could not read {file_name}: {source}. The file may be corrupt; please try a different file."
        ),
        PipelineError::EmptyContent { file_name } => format!(
            "No text content was found in {file_name}. Please check the file and try again."
        ),
    }
}
