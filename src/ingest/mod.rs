//! Document ingestion.
//!
//! Turns uploaded bytes into [`Document`]s with chunks and metadata.
//! Each document is processed independently; a failure is reported for
//! that document only and the rest of the batch continues.

pub mod extract;
pub mod metadata;

pub use extract::{ContentType, PageExtractor, default_page_extractor, join_pages};
pub use metadata::{MetadataExtractor, build_metadata, parse_metadata};

use tracing::{debug, info, warn};

use crate::chunking::{DEFAULT_CHUNK_SIZE, SentenceChunker};
use crate::core::{Corpus, Document, DocumentMetadata};
use crate::error::{ExtractionError, IngestError};

/// One uploaded file awaiting ingestion.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// Original file name.
    pub filename: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
    /// Declared content type.
    pub content_type: ContentType,
}

impl RawDocument {
    /// Creates a raw document.
    #[must_use]
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>, content_type: ContentType) -> Self {
        Self {
            filename: filename.into(),
            bytes,
            content_type,
        }
    }

    /// Creates a plain-text document from a string.
    #[must_use]
    pub fn text(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(filename, text.into().into_bytes(), ContentType::PlainText)
    }
}

/// Result of ingesting a batch: the documents that succeeded plus one
/// error per document that did not.
#[derive(Debug, Default)]
pub struct IngestOutcome {
    /// Successfully ingested documents and their metadata.
    pub corpus: Corpus,
    /// Per-document failures, in upload order.
    pub failures: Vec<IngestError>,
}

impl IngestOutcome {
    /// Converts to the corpus, failing only when nothing was ingested.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::NothingIngested`] if every document failed.
    pub fn into_corpus(self) -> Result<Corpus, IngestError> {
        if self.corpus.is_empty() && !self.failures.is_empty() {
            return Err(IngestError::NothingIngested {
                failed: self.failures.len(),
            });
        }
        Ok(self.corpus)
    }
}

/// Extracts text, chunks it, and derives metadata.
pub struct DocumentProcessor {
    chunker: SentenceChunker,
    pages: Option<Box<dyn PageExtractor>>,
}

impl std::fmt::Debug for DocumentProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentProcessor")
            .field("chunk_size", &self.chunker.chunk_size())
            .field("pdf", &self.pages.is_some())
            .finish()
    }
}

impl Default for DocumentProcessor {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl DocumentProcessor {
    /// Creates a processor using the page extractor compiled into this build.
    #[must_use]
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunker: SentenceChunker::new(chunk_size),
            pages: default_page_extractor(),
        }
    }

    /// Replaces the PDF page extractor.
    #[must_use]
    pub fn with_page_extractor(mut self, pages: Box<dyn PageExtractor>) -> Self {
        self.pages = Some(pages);
        self
    }

    /// Target chunk size in characters.
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunker.chunk_size()
    }

    /// Converts raw bytes to text according to the content type.
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractionError`] when the bytes cannot be decoded or
    /// no extractor handles the content type.
    pub fn extract_text(
        &self,
        bytes: &[u8],
        content_type: &ContentType,
    ) -> Result<String, ExtractionError> {
        match content_type {
            ContentType::PlainText => extract::decode_text(bytes),
            ContentType::Pdf => {
                let pages = self
                    .pages
                    .as_ref()
                    .ok_or_else(|| ExtractionError::Unsupported {
                        content_type: content_type.as_mime().to_string(),
                    })?;
                let texts = pages.extract_pages(bytes)?;
                Ok(join_pages(&texts))
            }
            ContentType::Other(mime) => Err(ExtractionError::Unsupported {
                content_type: mime.clone(),
            }),
        }
    }

    /// Processes one document into a [`Document`] and its metadata.
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractionError`] if text extraction fails.
    pub fn process(
        &self,
        id: &str,
        raw: &RawDocument,
    ) -> Result<(Document, DocumentMetadata), ExtractionError> {
        self.process_bytes(id, &raw.filename, &raw.bytes, &raw.content_type)
    }

    /// Processes borrowed bytes, such as a memory-mapped file.
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractionError`] if text extraction fails.
    pub fn process_bytes(
        &self,
        id: &str,
        filename: &str,
        bytes: &[u8],
        content_type: &ContentType,
    ) -> Result<(Document, DocumentMetadata), ExtractionError> {
        let content = self.extract_text(bytes, content_type)?;
        let chunks = self.chunker.chunk(&content);
        let metadata = build_metadata(&content, filename, chunks.len());

        debug!(
            id,
            filename,
            chunks = chunks.len(),
            words = metadata.word_count,
            "Processed document"
        );

        let document = Document {
            id: id.to_string(),
            filename: filename.to_string(),
            content,
            chunks,
        };
        Ok((document, metadata))
    }

    /// Ingests a batch of documents.
    ///
    /// Ids are assigned `doc_0`, `doc_1`, ... in upload order over the
    /// documents that succeed; failed documents do not consume an id.
    #[must_use]
    pub fn ingest_batch(&self, raws: &[RawDocument]) -> IngestOutcome {
        let mut outcome = IngestOutcome::default();

        for raw in raws {
            let id = format!("doc_{}", outcome.corpus.len());
            match self.process(&id, raw) {
                Ok((document, metadata)) => outcome.corpus.insert(document, metadata),
                Err(source) => {
                    warn!(filename = %raw.filename, error = %source, "Skipping document");
                    outcome.failures.push(IngestError::Extraction {
                        filename: raw.filename.clone(),
                        source,
                    });
                }
            }
        }

        info!(
            ingested = outcome.corpus.len(),
            failed = outcome.failures.len(),
            "Ingestion complete"
        );
        outcome
    }
}
