//! Document, chunk, and metadata types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

/// Sentinel shown for absent authors, year, or title.
pub const UNKNOWN: &str = "Unknown";

/// Sentinel shown for absent dataset or metric mentions.
pub const NONE_MENTIONED: &str = "None mentioned";

/// A contiguous, sentence-bounded slice of a document's text.
///
/// The atomic unit of evidence citation. `chunk_id` starts at 0 and
/// increases by one within a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk text, trimmed.
    pub content: String,
    /// Ordinal within the document (0-based).
    pub chunk_id: usize,
    /// Source page, when the extractor knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_num: Option<u32>,
    /// Character offset of the chunk.
    pub start_char: usize,
}

/// An ingested document.
///
/// Created once at ingestion and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Stable identifier (`doc_0`, `doc_1`, ...).
    pub id: String,
    /// Original file name.
    pub filename: String,
    /// Full extracted text.
    pub content: String,
    /// Ordered chunks of `content`.
    pub chunks: Vec<Chunk>,
}

/// Descriptive fields derived from a document's text.
///
/// Absent values are `None`; they serialize as [`UNKNOWN`] or
/// [`NONE_MENTIONED`] so a sentinel is never mistaken for an extracted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentMetadata {
    /// Original file name.
    pub filename: String,
    /// First line of the document, or the file stem.
    pub title: String,
    /// Author line, if one was found.
    #[serde(serialize_with = "or_unknown")]
    pub authors: Option<String>,
    /// Publication year, if one was found.
    #[serde(serialize_with = "or_unknown")]
    pub year: Option<String>,
    /// Up to three dataset mentions joined with `"; "`.
    #[serde(serialize_with = "or_none_mentioned")]
    pub datasets: Option<String>,
    /// Up to three metric mentions joined with `"; "`.
    #[serde(serialize_with = "or_none_mentioned")]
    pub metrics: Option<String>,
    /// Whitespace-delimited token count.
    pub word_count: usize,
    /// Number of chunks the text splits into.
    pub chunk_count: usize,
}

impl DocumentMetadata {
    /// Authors, or [`UNKNOWN`].
    #[must_use]
    pub fn authors_or_unknown(&self) -> &str {
        self.authors.as_deref().unwrap_or(UNKNOWN)
    }

    /// Year, or [`UNKNOWN`].
    #[must_use]
    pub fn year_or_unknown(&self) -> &str {
        self.year.as_deref().unwrap_or(UNKNOWN)
    }

    /// Datasets, or [`NONE_MENTIONED`].
    #[must_use]
    pub fn datasets_or_none(&self) -> &str {
        self.datasets.as_deref().unwrap_or(NONE_MENTIONED)
    }

    /// Metrics, or [`NONE_MENTIONED`].
    #[must_use]
    pub fn metrics_or_none(&self) -> &str {
        self.metrics.as_deref().unwrap_or(NONE_MENTIONED)
    }
}

#[allow(clippy::ref_option)]
fn or_unknown<S: Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(value.as_deref().unwrap_or(UNKNOWN))
}

#[allow(clippy::ref_option)]
fn or_none_mentioned<S: Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(value.as_deref().unwrap_or(NONE_MENTIONED))
}

/// Metadata keyed by document id.
///
/// Keys sort as strings (`doc_10` before `doc_2`); iterate
/// [`Corpus::entries`] for upload order.
pub type MetadataIndex = BTreeMap<String, DocumentMetadata>;

/// The ingested document set handed to the panel.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// Documents in ingestion order.
    pub documents: Vec<Document>,
    /// Metadata for each document, keyed by id.
    pub metadata: MetadataIndex,
}

impl Corpus {
    /// Returns `true` if no documents were ingested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Number of ingested documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Adds a document and its metadata.
    pub fn insert(&mut self, document: Document, metadata: DocumentMetadata) {
        self.metadata.insert(document.id.clone(), metadata);
        self.documents.push(document);
    }

    /// Documents paired with their metadata, in upload order.
    pub fn entries(&self) -> impl Iterator<Item = (&Document, &DocumentMetadata)> {
        self.documents
            .iter()
            .filter_map(|doc| self.metadata.get(&doc.id).map(|meta| (doc, meta)))
    }
}
