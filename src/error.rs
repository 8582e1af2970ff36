//! Error types for research-panel.
//!
//! Each layer has its own error enum; [`Error`] unifies them for the CLI
//! and for callers that drive the whole pipeline.

use thiserror::Error;

use crate::agent::{AgentRole, RunState};

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Document ingestion failed.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Agent orchestration failed.
    #[error(transparent)]
    Agent(#[from] AgentError),

    /// File I/O failed.
    #[error(transparent)]
    Io(#[from] IoError),

    /// CLI command failed.
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Binary-to-text conversion failure for a single document.
///
/// Fatal to that document only; batch ingestion continues with the rest.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The PDF could not be parsed.
    #[error("Failed to read PDF: {message}")]
    Pdf {
        /// Parser diagnostic.
        message: String,
    },

    /// The bytes are not valid UTF-8 text.
    #[error("Document is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// No extractor is available for the declared content type.
    #[error("No text extractor available for content type '{content_type}'")]
    Unsupported {
        /// Declared content type.
        content_type: String,
    },
}

/// Errors raised while ingesting documents.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Text extraction failed for one document.
    #[error("Error processing {filename}: {source}")]
    Extraction {
        /// Name of the document that failed.
        filename: String,
        /// Underlying extraction failure.
        #[source]
        source: ExtractionError,
    },

    /// Every document in a batch failed to ingest.
    #[error("No documents could be ingested ({failed} failed)")]
    NothingIngested {
        /// Number of failed documents.
        failed: usize,
    },
}

/// Errors raised by the agent panel.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Configuration is invalid.
    #[error("Invalid panel configuration: {message}")]
    InvalidConfig {
        /// What is wrong.
        message: String,
    },

    /// Unknown agent role name.
    #[error("Unknown agent role: {name}")]
    UnknownRole {
        /// The unrecognised name.
        name: String,
    },

    /// An agent produced a message that violates the message invariants.
    #[error("{agent} produced an invalid message in round {round}: {reason}")]
    InvalidMessage {
        /// Offending agent.
        agent: AgentRole,
        /// Round of the invocation.
        round: u32,
        /// Violated invariant.
        reason: String,
    },

    /// An agent failed unexpectedly. Fatal to the run.
    #[error("{agent} failed in round {round}: {message}")]
    Fault {
        /// Failing agent.
        agent: AgentRole,
        /// Round of the invocation.
        round: u32,
        /// Failure description.
        message: String,
    },

    /// `run` was called on an orchestrator that has already run.
    #[error("Orchestrator has already run (state: {state:?})")]
    AlreadyRun {
        /// State the orchestrator was left in.
        state: RunState,
    },

    /// The per-round deadline expired before an agent could run.
    #[error(
        "Round {round} cancelled before {agent} ran: deadline exceeded ({completed} messages completed)"
    )]
    Cancelled {
        /// Round that overran.
        round: u32,
        /// Next agent that did not run.
        agent: AgentRole,
        /// Messages accumulated before cancellation.
        completed: usize,
    },
}

/// File I/O errors.
#[derive(Debug, Error)]
pub enum IoError {
    /// The file does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Requested path.
        path: String,
    },

    /// Reading the file failed.
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        /// Requested path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Writing the file failed.
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        /// Target path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// CLI command errors.
#[derive(Debug, Error)]
pub enum CommandError {
    /// An argument could not be interpreted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
