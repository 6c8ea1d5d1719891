//!
//! This module implements the CLI interface for prompt-checker: command parsing,
//! config resolution and the user-visible output of every command.
//!
//! All analysis and extraction logic lives in the [`prompt-checker-core`] crate.
//! This module only gathers input (a string, a local file or a download), hands
//! it to the core and prints the rendered report.
//!
//! ## How To Use
//! - From the shell: `prompt-checker check --text "Do you like ice cream?"`.
//! - Programmatically / in tests: call [`run`] with a constructed [`Cli`].
//!
//! [`prompt-checker-core`]: ../../prompt-checker-core/
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use prompt_checker_core::events::TracingEventSink;
use prompt_checker_core::extract::DocumentExtractor;
use prompt_checker_core::pipeline::ExtractionPipeline;
use prompt_checker_core::{analyze, ExtractedDocument};

use crate::download::{build_client, fetch_document, file_name_from_url};
use crate::load_config::{resolve_config, Config};
use crate::report::{render, user_message, DocumentSource, OutputFormat};

/// CLI for prompt-checker: analyse survey prompts for clarity and bias.
#[derive(Parser)]
#[clap(
    name = "prompt-checker",
    version,
    about = "Analyse survey prompts, or the text of Excel/Word/PDF documents, for clarity and bias"
)]
pub struct Cli {
    /// Path to an optional YAML config file
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format; overrides the config file
    #[clap(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyse a prompt given on the command line
    Check {
        #[clap(long)]
        text: String,
    },
    /// Extract and analyse the text of a local document
    File {
        #[clap(long)]
        path: PathBuf,
        /// Declared content type; guessed from the file extension when absent
        #[clap(long)]
        content_type: Option<String>,
    },
    /// Download a document, then extract and analyse its text
    Url {
        #[clap(long)]
        url: String,
        /// File name used in messages; defaults to the last URL path segment
        #[clap(long)]
        name: Option<String>,
        /// Declared content type; taken from the response when absent
        #[clap(long)]
        content_type: Option<String>,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(cli.config.as_deref())?;
    run_with_config(cli, config).await
}

/// Runs a command against an already-loaded config.
pub async fn run_with_config(cli: Cli, config: Config) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    let format = cli.format.unwrap_or(config.output.format);

    let result = execute(cli.command, format, &config).await;

    if let Err(e) = &result {
        tracing::error!(error = %e, "Command failed");
    }

    // Emit an 'exit' span for structured tracing.
    let exit_span = tracing::info_span!("exit");
    exit_span.in_scope(|| {
        tracing::info!(success = result.is_ok(), "exit");
    });

    result
}

async fn execute(command: Commands, format: OutputFormat, config: &Config) -> Result<()> {
    match command {
        Commands::Check { text } => {
            tracing::info!(command = "check", chars = text.len(), "Analysing prompt");
            print_report(format, &text, None)
        }
        Commands::File { path, content_type } => {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let content_type = content_type.unwrap_or_else(|| guess_content_type(&path));
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            tracing::info!(command = "file", file_name = %file_name, content_type = %content_type, "Analysing document");
            analyse_document(format, bytes, content_type, file_name).await
        }
        Commands::Url {
            url,
            name,
            content_type,
        } => {
            let client = build_client(config.download.timeout_secs)?;
            let token = config.download.bearer_token();
            let fetched = fetch_document(&client, &url, token.as_deref()).await?;
            let content_type = content_type
                .or(fetched.content_type)
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let file_name = name
                .or_else(|| file_name_from_url(&url))
                .unwrap_or_else(|| "download".to_string());
            tracing::info!(command = "url", file_name = %file_name, content_type = %content_type, "Analysing downloaded document");
            analyse_document(format, fetched.bytes, content_type, file_name).await
        }
    }
}

/// Runs the extraction pipeline on a blocking thread, then analyses the text.
async fn analyse_document(
    format: OutputFormat,
    bytes: Vec<u8>,
    content_type: String,
    file_name: String,
) -> Result<()> {
    let name = file_name.clone();
    let extracted = tokio::task::spawn_blocking(move || {
        ExtractionPipeline::new(DocumentExtractor, TracingEventSink).extract(&bytes, &content_type, &name)
    })
    .await
    .context("Extraction task panicked")?;

    let ExtractedDocument {
        text,
        source_format,
    } = match extracted {
        Ok(document) => document,
        Err(e) => {
            let message = user_message(&e);
            return Err(anyhow::Error::new(e).context(message));
        }
    };

    let source = DocumentSource {
        file_name,
        format: source_format,
    };
    print_report(format, &text, Some(&source))
}

fn print_report(format: OutputFormat, prompt: &str, source: Option<&DocumentSource>) -> Result<()> {
    let result = analyze(prompt);
    tracing::debug!(
        word_count = result.word_count,
        clarity = result.clarity,
        bias = result.bias,
        issues = result.issues.len(),
        "Prompt analysed"
    );
    let rendered = render(format, prompt, &result, source).context("Failed to render report")?;
    println!("{rendered}");
    Ok(())
}

/// Content type for a local file from its extension; unknown extensions
/// map to `application/octet-stream`, which the pipeline rejects.
pub fn guess_content_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream")
        .to_string()
}
