//! The scripted research panel.
//!
//! Five fixed roles analyze a corpus over a number of synchronized rounds.
//! Each role is a pure function of an immutable context snapshot; the
//! orchestrator owns the message history and the message graph.
//!
//! # Architecture
//!
//! ```text
//! Corpus + PanelConfig → Orchestrator
//!   └── for round in 1..=R
//!       ├── snapshot context (round, prior messages, seed, clock)
//!       ├── each enabled Agent::act → AgentMessage (validated)
//!       │   (sequential, or concurrent via rayon)
//!       ├── append to history, notify ProgressObserver
//!       └── register graph node (agent, round)
//!   └── connect consecutive messages → MessageGraph
//! ```

pub mod citation;
pub mod config;
pub mod context;
pub mod graph;
pub mod inspector;
pub mod message;
pub mod observer;
pub mod orchestrator;
pub mod researcher;
pub mod reviewer;
pub mod role;
pub mod synthesizer;
pub mod traits;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export key types
pub use citation::CitationAudit;
pub use config::{ExecutionStrategy, PanelConfig, PanelConfigBuilder};
pub use context::RoundContext;
pub use graph::{GraphEdge, GraphNode, MessageGraph};
pub use message::{AgentMessage, EvidenceRef, format_citations};
pub use observer::{NoProgress, ProgressEvent, ProgressObserver};
pub use orchestrator::{Orchestrator, PanelRun, RunState};
pub use role::AgentRole;
pub use traits::Agent;
