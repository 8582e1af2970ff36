//! Core data types shared by ingestion, the agent panel, and reporting.

pub mod clock;
pub mod document;
pub(crate) mod pattern;
pub mod strictness;

pub use clock::{Clock, FixedClock, SystemClock};
pub use document::{
    Chunk, Corpus, Document, DocumentMetadata, MetadataIndex, NONE_MENTIONED, UNKNOWN,
};
pub use strictness::CitationStrictness;
