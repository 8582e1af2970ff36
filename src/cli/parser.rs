//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::chunking::DEFAULT_CHUNK_SIZE;

/// research-panel: a scripted multi-agent panel for document analysis.
///
/// Chunks text and PDF documents, extracts metadata, runs round-synchronized
/// agents over them, and writes a citation-linked report.
#[derive(Parser, Debug)]
#[command(name = "research-panel")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose logging (debug level on stderr).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json, ndjson).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split one document into sentence-bounded chunks.
    #[command(after_help = r#"Examples:
  research-panel chunk paper.txt                   # Default 1000-char chunks
  research-panel chunk paper.pdf --chunk-size 400  # Smaller chunks
  research-panel --format json chunk paper.txt | jq '.chunks | length'
"#)]
    Chunk {
        /// Document to chunk (.pdf or plain text).
        file: PathBuf,

        /// Target chunk size in characters.
        #[arg(short, long, default_value_t = DEFAULT_CHUNK_SIZE, env = "PANEL_CHUNK_SIZE")]
        chunk_size: usize,
    },

    /// Extract metadata from documents.
    #[command(after_help = r#"Examples:
  research-panel inspect a.txt b.pdf
  research-panel --format json inspect *.txt | jq '.documents[].metadata.year'
"#)]
    Inspect {
        /// Documents to inspect.
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,

        /// Target chunk size in characters (affects chunk counts).
        #[arg(short, long, default_value_t = DEFAULT_CHUNK_SIZE, env = "PANEL_CHUNK_SIZE")]
        chunk_size: usize,
    },

    /// Run the agent panel and print the report.
    ///
    /// Unset options fall back to PANEL_* environment variables, then defaults.
    #[command(after_help = r#"Examples:
  research-panel run paper.txt                                  # Default panel, 3 rounds
  research-panel run a.txt b.pdf --agents researcher,citation-guard --rounds 2
  research-panel run a.txt --concurrent --round-deadline-ms 500
  research-panel run a.txt --output report.md --graph
  research-panel --format json run a.txt | jq '.report.metadata'
"#)]
    Run {
        /// Documents to analyze.
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,

        /// Comma-separated agents in invocation order.
        #[arg(short, long)]
        agents: Option<String>,

        /// Number of rounds.
        #[arg(short, long)]
        rounds: Option<u32>,

        /// Citation strictness: lenient, moderate, strict, very-strict.
        #[arg(short, long)]
        strictness: Option<String>,

        /// Seed for document selection.
        #[arg(long)]
        seed: Option<u64>,

        /// Run each round's agents in parallel.
        #[arg(long)]
        concurrent: bool,

        /// Per-round deadline in milliseconds.
        #[arg(long)]
        round_deadline_ms: Option<u64>,

        /// Target chunk size in characters.
        #[arg(short, long)]
        chunk_size: Option<usize>,

        /// Write the report to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Include the message graph.
        #[arg(short, long)]
        graph: bool,
    },

    /// List the available agent roles.
    Agents,
}
