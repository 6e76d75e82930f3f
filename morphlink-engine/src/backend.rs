//! Capability surface consumed from analysis backends
//!
//! Every operation exists twice: a blocking `*_sync` form that returns its
//! result, and a non-blocking form that returns immediately and later calls
//! the supplied [`Completion`] exactly once, from whatever thread the
//! backend finishes on.

use std::collections::BTreeSet;

use morphlink_core::{Pos, RawParagraph, RawSentenceRef};

use crate::error::BackendResult;

/// Completion handed to a backend's non-blocking form
pub type Completion<T> = Box<dyn FnOnce(BackendResult<T>) + Send + 'static>;

/// What a parser backend is asked to parse
#[derive(Clone)]
pub enum ParseInput {
    /// Raw text, for parsers that tag on their own
    Text(String),
    /// Sentences a tagger already produced, in order
    Tagged(RawParagraph),
}

impl std::fmt::Debug for ParseInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseInput::Text(text) => f.debug_tuple("Text").field(text).finish(),
            ParseInput::Tagged(sentences) => f
                .debug_tuple("Tagged")
                .field(&format!("<{} sentences>", sentences.len()))
                .finish(),
        }
    }
}

/// One user dictionary entry in backend-facing form
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DictEntry {
    /// Surface form
    pub surface: String,
    /// Normalized tag
    pub tag: Pos,
}

impl DictEntry {
    /// Create an entry
    pub fn new(surface: impl Into<String>, tag: Pos) -> Self {
        Self {
            surface: surface.into(),
            tag,
        }
    }
}

/// Morphological tagger
pub trait TaggerBackend: Send + Sync {
    /// Tag a paragraph, blocking
    fn tag_sync(&self, text: &str) -> BackendResult<RawParagraph>;

    /// Tag a paragraph
    fn tag(&self, text: String, done: Completion<RawParagraph>);

    /// Tag text as a single sentence, blocking
    fn tag_sentence_sync(&self, text: &str) -> BackendResult<RawSentenceRef>;

    /// Tag text as a single sentence
    fn tag_sentence(&self, text: String, done: Completion<RawSentenceRef>);
}

/// Dependency parser
pub trait ParserBackend: Send + Sync {
    /// Parse a paragraph, blocking
    fn parse_sync(&self, input: ParseInput) -> BackendResult<RawParagraph>;

    /// Parse a paragraph
    fn parse(&self, input: ParseInput, done: Completion<RawParagraph>);

    /// Parse a single sentence, blocking
    fn parse_sentence_sync(&self, input: ParseInput) -> BackendResult<RawSentenceRef>;

    /// Parse a single sentence
    fn parse_sentence(&self, input: ParseInput, done: Completion<RawSentenceRef>);
}

/// Sentence boundary detector
pub trait SplitterBackend: Send + Sync {
    /// Split text into sentence strings, blocking
    fn sentences_sync(&self, text: &str) -> BackendResult<Vec<String>>;

    /// Split text into sentence strings
    fn sentences(&self, text: String, done: Completion<Vec<String>>);
}

/// System and user dictionaries of one backend
pub trait DictionaryBackend: Send + Sync {
    /// Add entries to the user dictionary as one batch, blocking
    fn add_entries_sync(&self, entries: &[DictEntry]) -> BackendResult<()>;

    /// Add entries to the user dictionary as one batch
    fn add_entries(&self, entries: Vec<DictEntry>, done: Completion<()>);

    /// Whether `surface` is known under any of `tags`, blocking
    fn contains_sync(&self, surface: &str, tags: &BTreeSet<Pos>) -> BackendResult<bool>;

    /// Whether `surface` is known under any of `tags`
    fn contains(&self, surface: String, tags: BTreeSet<Pos>, done: Completion<bool>);

    /// Candidates absent from the dictionary as (surface, raw tag), blocking
    fn get_not_existing_sync(
        &self,
        only_system: bool,
        entries: &[DictEntry],
    ) -> BackendResult<Vec<(String, String)>>;

    /// Candidates absent from the dictionary as (surface, raw tag)
    fn get_not_existing(
        &self,
        only_system: bool,
        entries: Vec<DictEntry>,
        done: Completion<Vec<(String, String)>>,
    );

    /// Entries of the user dictionary, blocking
    fn items_sync(&self) -> BackendResult<Vec<DictEntry>>;

    /// Entries of the user dictionary
    fn items(&self, done: Completion<Vec<DictEntry>>);

    /// System dictionary entries tagged with one of `tags`, blocking
    fn base_entries_sync(&self, tags: &BTreeSet<Pos>) -> BackendResult<Vec<DictEntry>>;

    /// System dictionary entries tagged with one of `tags`
    fn base_entries(&self, tags: BTreeSet<Pos>, done: Completion<Vec<DictEntry>>);
}
