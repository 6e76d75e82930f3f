//! Boundary view of backend results
//!
//! Backends expose their analysis trees through these traits: finite,
//! randomly indexable, read-only sequences with a count and an indexed
//! accessor. The materializer drains them into the canonical model right
//! away and keeps nothing but an opaque origin handle.

use std::any::Any;
use std::sync::Arc;

/// Shared handle to a backend sentence
pub type RawSentenceRef = Arc<dyn RawSentence>;

/// Shared handle to a backend word
pub type RawWordRef = Arc<dyn RawWord>;

/// A backend paragraph: sentences in linear order
pub type RawParagraph = Vec<RawSentenceRef>;

/// One morpheme as the backend reports it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMorpheme {
    /// Surface text
    pub surface: String,
    /// Tag already converted to the normalized tagset by the backend wrapper
    pub tag: String,
    /// Backend-native tag
    pub raw_tag: String,
}

impl RawMorpheme {
    /// Create a raw morpheme
    pub fn new(
        surface: impl Into<String>,
        tag: impl Into<String>,
        raw_tag: impl Into<String>,
    ) -> Self {
        Self {
            surface: surface.into(),
            tag: tag.into(),
            raw_tag: raw_tag.into(),
        }
    }
}

/// One dependency edge as the backend reports it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEdge {
    /// Head word index, `None` when the sentence itself governs
    pub head: Option<usize>,
    /// Relation label in the normalized set
    pub label: String,
    /// Backend-native relation label
    pub raw_label: String,
    /// Dependent word index
    pub target: usize,
}

impl RawEdge {
    /// Create an edge between two words
    pub fn new(
        head: Option<usize>,
        label: impl Into<String>,
        raw_label: impl Into<String>,
        target: usize,
    ) -> Self {
        Self {
            head,
            label: label.into(),
            raw_label: raw_label.into(),
            target,
        }
    }

    /// Create an edge governed by the sentence root, raw label equal to the label
    pub fn root(label: impl Into<String>, target: usize) -> Self {
        let label = label.into();
        Self {
            head: None,
            raw_label: label.clone(),
            label,
            target,
        }
    }
}

/// A backend word
pub trait RawWord: Send + Sync {
    /// Surface text of the word
    fn surface(&self) -> String;

    /// Number of morphemes
    fn morpheme_count(&self) -> usize;

    /// Morpheme at `index`
    fn morpheme(&self, index: usize) -> Option<RawMorpheme>;

    /// Number of dependents this word governs
    fn dependent_count(&self) -> usize {
        0
    }

    /// Dependent edge at `index`
    fn dependent(&self, _index: usize) -> Option<RawEdge> {
        None
    }
}

/// A backend sentence
pub trait RawSentence: Send + Sync {
    /// Number of words
    fn word_count(&self) -> usize;

    /// Word at `index`
    fn word(&self, index: usize) -> Option<RawWordRef>;

    /// Number of edges governed by the sentence root
    fn root_count(&self) -> usize {
        0
    }

    /// Root edge at `index`
    fn root(&self, _index: usize) -> Option<RawEdge> {
        None
    }

    /// Downcast hook so a backend can recognize its own sentences when they
    /// are handed back to it
    fn as_any(&self) -> &dyn Any;
}

/// In-memory word for backends that already hold plain data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableWord {
    /// Surface text
    pub surface: String,
    /// Morphemes in segmentation order
    pub morphemes: Vec<RawMorpheme>,
    /// Dependents in backend order
    pub dependents: Vec<RawEdge>,
}

impl TableWord {
    /// Create a word without morphemes
    pub fn new(surface: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            ..Self::default()
        }
    }

    /// Append a morpheme whose raw tag equals its normalized tag
    pub fn with_morpheme(mut self, surface: impl Into<String>, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        self.morphemes
            .push(RawMorpheme::new(surface, tag.clone(), tag));
        self
    }

    /// Append a fully specified morpheme
    pub fn with_raw_morpheme(mut self, morpheme: RawMorpheme) -> Self {
        self.morphemes.push(morpheme);
        self
    }

    /// Append a dependent edge
    pub fn with_dependent(mut self, edge: RawEdge) -> Self {
        self.dependents.push(edge);
        self
    }
}

impl RawWord for TableWord {
    fn surface(&self) -> String {
        self.surface.clone()
    }

    fn morpheme_count(&self) -> usize {
        self.morphemes.len()
    }

    fn morpheme(&self, index: usize) -> Option<RawMorpheme> {
        self.morphemes.get(index).cloned()
    }

    fn dependent_count(&self) -> usize {
        self.dependents.len()
    }

    fn dependent(&self, index: usize) -> Option<RawEdge> {
        self.dependents.get(index).cloned()
    }
}

/// In-memory sentence for backends that already hold plain data
#[derive(Debug, Clone, Default)]
pub struct TableSentence {
    words: Vec<Arc<TableWord>>,
    roots: Vec<RawEdge>,
}

impl TableSentence {
    /// Create an empty sentence
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a word
    pub fn with_word(mut self, word: TableWord) -> Self {
        self.words.push(Arc::new(word));
        self
    }

    /// Append a root edge
    pub fn with_root(mut self, edge: RawEdge) -> Self {
        self.roots.push(edge);
        self
    }

    /// Words in linear order
    pub fn words(&self) -> impl Iterator<Item = &TableWord> {
        self.words.iter().map(|w| w.as_ref())
    }

    /// Surface text, words joined by a single space
    pub fn surface(&self) -> String {
        self.words
            .iter()
            .map(|w| w.surface.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Erase into a shared backend handle
    pub fn into_ref(self) -> RawSentenceRef {
        Arc::new(self)
    }
}

impl RawSentence for TableSentence {
    fn word_count(&self) -> usize {
        self.words.len()
    }

    fn word(&self, index: usize) -> Option<RawWordRef> {
        self.words
            .get(index)
            .map(|w| Arc::clone(w) as RawWordRef)
    }

    fn root_count(&self) -> usize {
        self.roots.len()
    }

    fn root(&self, index: usize) -> Option<RawEdge> {
        self.roots.get(index).cloned()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
