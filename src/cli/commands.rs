//! CLI command implementations.
//!
//! Contains the business logic for each CLI command.

// Allow certain patterns that improve readability in CLI output formatting
#![allow(clippy::format_push_string)]

use std::fmt::Write as FmtWrite;
use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::agent::{
    AgentRole, ExecutionStrategy, MessageGraph, Orchestrator, PanelConfig, PanelConfigBuilder,
};
use crate::cli::output::OutputFormat;
use crate::cli::parser::{Cli, Commands};
use crate::core::{Chunk, CitationStrictness, DocumentMetadata, SystemClock};
use crate::error::{CommandError, IngestError, Result};
use crate::ingest::{ContentType, DocumentProcessor, IngestOutcome, RawDocument};
use crate::io::{map_file, read_bytes, write_file};
use crate::report::{self, Report};

/// Characters of an agent summary shown in progress logs.
const PROGRESS_PREVIEW_LEN: usize = 100;

// ==================== Parameter Structs ====================

/// Parameters for the run command.
#[derive(Debug, Clone, Default)]
pub struct RunParams<'a> {
    /// Documents to analyze.
    pub files: &'a [std::path::PathBuf],
    /// Comma-separated agent list.
    pub agents: Option<&'a str>,
    /// Number of rounds.
    pub rounds: Option<u32>,
    /// Citation strictness name.
    pub strictness: Option<&'a str>,
    /// Selection seed.
    pub seed: Option<u64>,
    /// Run agents of a round in parallel.
    pub concurrent: bool,
    /// Per-round deadline in milliseconds.
    pub round_deadline_ms: Option<u64>,
    /// Target chunk size.
    pub chunk_size: Option<usize>,
    /// Report destination.
    pub output: Option<&'a Path>,
    /// Include the message graph.
    pub graph: bool,
}

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    execute_with_env(cli, |key| std::env::var(key).ok())
}

/// Executes the CLI command, resolving `PANEL_*` settings through `env`.
fn execute_with_env(cli: &Cli, env: impl Fn(&str) -> Option<String>) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    match &cli.command {
        Commands::Chunk { file, chunk_size } => cmd_chunk(file, *chunk_size, format),
        Commands::Inspect { files, chunk_size } => cmd_inspect(files, *chunk_size, format),
        Commands::Run {
            files,
            agents,
            rounds,
            strictness,
            seed,
            concurrent,
            round_deadline_ms,
            chunk_size,
            output,
            graph,
        } => {
            let params = RunParams {
                files,
                agents: agents.as_deref(),
                rounds: *rounds,
                strictness: strictness.as_deref(),
                seed: *seed,
                concurrent: *concurrent,
                round_deadline_ms: *round_deadline_ms,
                chunk_size: *chunk_size,
                output: output.as_deref(),
                graph: *graph,
            };
            cmd_run(&params, format, env)
        }
        Commands::Agents => Ok(cmd_agents(format)),
    }
}

// ==================== Shared Helpers ====================

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    )
}

/// Reads a file into a [`RawDocument`], typing it by extension.
fn load_raw(path: &Path) -> Result<RawDocument> {
    let bytes = read_bytes(path)?;
    Ok(RawDocument::new(display_name(path), bytes, ContentType::from_path(path)))
}

fn ingest_files<P: AsRef<Path>>(files: &[P], chunk_size: usize) -> Result<IngestOutcome> {
    check_chunk_size(chunk_size)?;
    let raws = files
        .iter()
        .map(|p| load_raw(p.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    Ok(DocumentProcessor::new(chunk_size).ingest_batch(&raws))
}

fn check_chunk_size(chunk_size: usize) -> Result<()> {
    if chunk_size == 0 {
        return Err(CommandError::InvalidArgument("chunk size must be at least 1".to_string()).into());
    }
    Ok(())
}

fn skipped(failures: &[IngestError]) -> Vec<String> {
    failures.iter().map(ToString::to_string).collect()
}

// ==================== Chunk Command ====================

#[derive(Serialize)]
struct ChunkOutput<'a> {
    filename: &'a str,
    chunk_size: usize,
    chunks: &'a [Chunk],
}

fn cmd_chunk(file: &Path, chunk_size: usize, format: OutputFormat) -> Result<String> {
    check_chunk_size(chunk_size)?;
    let filename = display_name(file);
    let bytes = map_file(file)?;
    let (document, _) = DocumentProcessor::new(chunk_size)
        .process_bytes("doc_0", &filename, &bytes, &ContentType::from_path(file))
        .map_err(|source| IngestError::Extraction {
            filename: filename.clone(),
            source,
        })?;

    match format {
        OutputFormat::Text => {
            let mut output = format!(
                "{} chunks from {} (chunk size {chunk_size})\n\n",
                document.chunks.len(),
                document.filename
            );
            for chunk in &document.chunks {
                let page = chunk
                    .page_num
                    .map_or_else(String::new, |p| format!(", page {p}"));
                let _ = writeln!(
                    output,
                    "--- chunk {} (start {}{page}) ---\n{}\n",
                    chunk.chunk_id, chunk.start_char, chunk.content
                );
            }
            Ok(output)
        }
        OutputFormat::Json | OutputFormat::Ndjson => Ok(format.to_json(&ChunkOutput {
            filename: &document.filename,
            chunk_size,
            chunks: &document.chunks,
        })),
    }
}

// ==================== Inspect Command ====================

#[derive(Serialize)]
struct InspectedDocument<'a> {
    id: &'a str,
    metadata: &'a DocumentMetadata,
}

#[derive(Serialize)]
struct InspectOutput<'a> {
    documents: Vec<InspectedDocument<'a>>,
    skipped: Vec<String>,
}

fn cmd_inspect<P: AsRef<Path>>(files: &[P], chunk_size: usize, format: OutputFormat) -> Result<String> {
    let outcome = ingest_files(files, chunk_size)?;
    let corpus = &outcome.corpus;

    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            for (doc, meta) in corpus.entries() {
                let _ = writeln!(output, "{}  {}", doc.id, meta.filename);
                let _ = writeln!(output, "  Title:    {}", meta.title);
                let _ = writeln!(output, "  Authors:  {}", meta.authors_or_unknown());
                let _ = writeln!(output, "  Year:     {}", meta.year_or_unknown());
                let _ = writeln!(output, "  Datasets: {}", meta.datasets_or_none());
                let _ = writeln!(output, "  Metrics:  {}", meta.metrics_or_none());
                let _ = writeln!(
                    output,
                    "  Words:    {} | Chunks: {}\n",
                    meta.word_count, meta.chunk_count
                );
            }
            for failure in &outcome.failures {
                let _ = writeln!(output, "Skipped: {failure}");
            }
            if output.is_empty() {
                output.push_str("No documents ingested.\n");
            }
            Ok(output)
        }
        OutputFormat::Json | OutputFormat::Ndjson => {
            let documents = corpus
                .entries()
                .map(|(doc, metadata)| InspectedDocument {
                    id: &doc.id,
                    metadata,
                })
                .collect();
            Ok(format.to_json(&InspectOutput {
                documents,
                skipped: skipped(&outcome.failures),
            }))
        }
    }
}

// ==================== Run Command ====================

#[derive(Serialize)]
struct RunOutput<'a> {
    report: &'a Report,
    #[serde(skip_serializing_if = "Option::is_none")]
    graph: Option<&'a MessageGraph>,
    skipped: Vec<String>,
}

#[derive(Serialize)]
struct WrittenOutput<'a> {
    success: bool,
    path: &'a str,
    num_messages: usize,
}

/// Resolves panel configuration: CLI values, then `env`, then defaults.
fn build_config(
    params: &RunParams<'_>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<PanelConfig> {
    let mut builder: PanelConfigBuilder = PanelConfig::builder();
    if let Some(list) = params.agents {
        builder = builder.agents(AgentRole::parse_list(list)?);
    }
    if let Some(rounds) = params.rounds {
        builder = builder.rounds(rounds);
    }
    if let Some(name) = params.strictness {
        let strictness = CitationStrictness::parse(name).ok_or_else(|| {
            CommandError::InvalidArgument(format!(
                "unknown citation strictness '{name}' (expected lenient, moderate, strict, very-strict)"
            ))
        })?;
        builder = builder.citation_strictness(strictness);
    }
    if let Some(seed) = params.seed {
        builder = builder.seed(seed);
    }
    if params.concurrent {
        builder = builder.execution(ExecutionStrategy::Concurrent);
    }
    if let Some(ms) = params.round_deadline_ms {
        builder = builder.round_deadline(Duration::from_millis(ms));
    }
    if let Some(size) = params.chunk_size {
        builder = builder.chunk_size(size);
    }
    Ok(builder.from_lookup(env).build()?)
}

fn cmd_run(
    params: &RunParams<'_>,
    format: OutputFormat,
    env: impl Fn(&str) -> Option<String>,
) -> Result<String> {
    let config = build_config(params, env)?;
    let outcome = ingest_files(params.files, config.chunk_size)?;
    let skipped = skipped(&outcome.failures);
    let corpus = outcome.into_corpus()?;

    let mut progress = |round: u32, agent: AgentRole, summary: &str| {
        info!(round, %agent, summary = %truncate_str(summary, PROGRESS_PREVIEW_LEN), "Agent finished");
    };
    let run = Orchestrator::new(config).run(&corpus, &mut progress)?;
    let report = report::generate(&run.messages, &corpus, &SystemClock);

    let rendered = match format {
        OutputFormat::Text => {
            let mut text = report.markdown.clone();
            if params.graph {
                text.push_str("\n## Message Graph\n\n");
                text.push_str(&run.graph.render_text());
            }
            text
        }
        OutputFormat::Json | OutputFormat::Ndjson => format.to_json(&RunOutput {
            report: &report,
            graph: params.graph.then_some(&run.graph),
            skipped,
        }),
    };

    let Some(path) = params.output else {
        return Ok(rendered);
    };

    write_file(path, &rendered)?;
    let path_str = path.to_string_lossy();
    match format {
        OutputFormat::Text => Ok(format!(
            "Report written to {path_str} ({} messages)\n",
            report.metadata.num_messages
        )),
        OutputFormat::Json | OutputFormat::Ndjson => Ok(format.to_json(&WrittenOutput {
            success: true,
            path: &path_str,
            num_messages: report.metadata.num_messages,
        })),
    }
}

// ==================== Agents Command ====================

#[derive(Serialize)]
struct AgentListing {
    name: &'static str,
    description: &'static str,
    default: bool,
}

fn cmd_agents(format: OutputFormat) -> String {
    let listings: Vec<AgentListing> = AgentRole::ALL
        .into_iter()
        .map(|role| AgentListing {
            name: role.as_str(),
            description: role.description(),
            default: AgentRole::DEFAULT_PANEL.contains(&role),
        })
        .collect();

    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            for listing in &listings {
                let marker = if listing.default { "*" } else { " " };
                let _ = writeln!(output, "{marker} {:<14} {}", listing.name, listing.description);
            }
            output.push_str("\n* enabled by default\n");
            output
        }
        OutputFormat::Json | OutputFormat::Ndjson => format.to_json(&listings),
    }
}

/// Truncates a string to max length with ellipsis.
///
/// Uses [`crate::io::find_char_boundary`] to avoid panicking on multi-byte UTF-8 characters.
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        let end = crate::io::find_char_boundary(s, max_len);
        s[..end].to_string()
    } else {
        let end = crate::io::find_char_boundary(s, max_len - 3);
        format!("{}...", &s[..end])
    }
}
