//! # research-panel
//!
//! A scripted multi-agent research panel. Documents are chunked on
//! sentence boundaries, described by lightweight metadata heuristics, and
//! analyzed by a fixed set of agent roles over synchronized rounds. The
//! resulting message history is linked into a graph and synthesized into
//! a Markdown and JSON report.
//!
//! ## Pipeline
//!
//! ```text
//! bytes ──► ingest (extract, chunk, metadata) ──► Corpus
//!                                                   │
//!           PanelConfig ──► Orchestrator ◄──────────┘
//!                               │
//!                 messages + MessageGraph ──► report::generate
//! ```
//!
//! ## Example
//!
//! ```
//! use research_panel::agent::{NoProgress, Orchestrator, PanelConfig};
//! use research_panel::ingest::{DocumentProcessor, RawDocument};
//!
//! let docs = [RawDocument::text("paper.txt", "A short paper. It has two sentences.")];
//! let corpus = DocumentProcessor::default().ingest_batch(&docs).into_corpus()?;
//! let config = PanelConfig::builder().rounds(1).build()?;
//! let run = Orchestrator::new(config).run(&corpus, &mut NoProgress)?;
//! assert_eq!(run.messages.len(), 4);
//! # Ok::<(), research_panel::Error>(())
//! ```

pub mod agent;
pub mod chunking;
pub mod cli;
pub mod core;
pub mod error;
pub mod ingest;
pub mod io;
pub mod report;

pub use agent::{
    Agent, AgentMessage, AgentRole, EvidenceRef, ExecutionStrategy, MessageGraph, Orchestrator,
    PanelConfig, PanelRun, ProgressObserver, RunState,
};
pub use chunking::{DEFAULT_CHUNK_SIZE, SentenceChunker, extract_chunks};
pub use core::{Chunk, CitationStrictness, Clock, Corpus, Document, DocumentMetadata};
pub use error::{Error, Result};
pub use ingest::{DocumentProcessor, RawDocument};
pub use report::{Report, generate};
