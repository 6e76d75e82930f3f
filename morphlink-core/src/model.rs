//! Canonical linguistic data model
//!
//! Sentence → Word → Morpheme, with dependency relationships attached to
//! their head word or to the sentence root. Values are read-only once the
//! materializer hands them out.

use std::fmt;
use std::ops::Index;

use crate::error::{MaterializeError, Result};
use crate::pos::{Label, Pos};
use crate::raw::{RawSentenceRef, RawWordRef};

/// Minimal analyzed unit
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Morpheme {
    surface: String,
    tag: Pos,
    raw_tag: String,
    index: usize,
}

impl Morpheme {
    /// Create a morpheme at position `index` of its word
    pub fn new(surface: impl Into<String>, tag: Pos, raw_tag: impl Into<String>, index: usize) -> Self {
        Self {
            surface: surface.into(),
            tag,
            raw_tag: raw_tag.into(),
            index,
        }
    }

    /// Surface text
    pub fn surface(&self) -> &str {
        &self.surface
    }

    /// Normalized tag
    pub fn tag(&self) -> Pos {
        self.tag
    }

    /// Backend-native tag
    pub fn raw_tag(&self) -> &str {
        &self.raw_tag
    }

    /// Position within the owning word
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether the normalized tag starts with `prefix` (`"NN"` matches NNG, NNP, ...)
    pub fn has_tag_prefix(&self, prefix: &str) -> bool {
        self.tag.as_str().starts_with(&prefix.to_ascii_uppercase())
    }

    /// See [`Pos::is_noun`]
    pub fn is_noun(&self) -> bool {
        self.tag.is_noun()
    }

    /// See [`Pos::is_predicate`]
    pub fn is_predicate(&self) -> bool {
        self.tag.is_predicate()
    }

    /// See [`Pos::is_modifier`]
    pub fn is_modifier(&self) -> bool {
        self.tag.is_modifier()
    }

    /// See [`Pos::is_postposition`]
    pub fn is_postposition(&self) -> bool {
        self.tag.is_postposition()
    }
}

impl fmt::Display for Morpheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.surface, self.tag)
    }
}

/// One dependency edge, head → target
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Relationship {
    head: Option<usize>,
    label: Label,
    raw_label: String,
    target: usize,
}

impl Relationship {
    /// Create a relationship; `head` is `None` for the sentence root
    pub fn new(head: Option<usize>, label: Label, raw_label: impl Into<String>, target: usize) -> Self {
        Self {
            head,
            label,
            raw_label: raw_label.into(),
            target,
        }
    }

    /// Head word index, `None` for the virtual sentence root
    pub fn head(&self) -> Option<usize> {
        self.head
    }

    /// Normalized relation label
    pub fn label(&self) -> Label {
        self.label
    }

    /// Backend-native relation label
    pub fn raw_label(&self) -> &str {
        &self.raw_label
    }

    /// Dependent word index
    pub fn target(&self) -> usize {
        self.target
    }

    /// Whether the sentence root governs this edge
    pub fn is_root(&self) -> bool {
        self.head.is_none()
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.head {
            Some(head) => write!(f, "{head} -{}-> {}", self.label, self.target),
            None => write!(f, "ROOT -{}-> {}", self.label, self.target),
        }
    }
}

/// A token as it appeared in the surface text
#[derive(Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "WordParts")
)]
pub struct Word {
    surface: String,
    morphemes: Vec<Morpheme>,
    index: usize,
    dependents: Vec<Relationship>,
    #[cfg_attr(feature = "serde", serde(skip))]
    origin: Option<RawWordRef>,
}

impl Word {
    /// Create a word at position `index` of its sentence.
    ///
    /// Morphemes must already carry their own positions; the first one that
    /// does not is reported as [`MaterializeError::MisplacedIndex`].
    pub fn new(
        surface: impl Into<String>,
        morphemes: Vec<Morpheme>,
        index: usize,
    ) -> Result<Self> {
        let word = Self {
            surface: surface.into(),
            morphemes,
            index,
            dependents: Vec::new(),
            origin: None,
        };
        word.check_morphemes()?;
        Ok(word)
    }

    fn check_morphemes(&self) -> Result<()> {
        for (position, morpheme) in self.morphemes.iter().enumerate() {
            if morpheme.index != position {
                return Err(MaterializeError::MisplacedIndex {
                    kind: "morpheme",
                    expected: position,
                    found: morpheme.index,
                });
            }
        }
        Ok(())
    }

    fn check_dependents(&self) -> Result<()> {
        match self.dependents.iter().find(|d| d.head != Some(self.index)) {
            Some(edge) => Err(MaterializeError::MisplacedEdge {
                head: edge.head,
                owner: Some(self.index),
            }),
            None => Ok(()),
        }
    }

    pub(crate) fn set_origin(&mut self, origin: RawWordRef) {
        self.origin = Some(origin);
    }

    pub(crate) fn push_dependent(&mut self, relationship: Relationship) {
        self.dependents.push(relationship);
    }

    /// Surface text
    pub fn surface(&self) -> &str {
        &self.surface
    }

    /// Morphemes in segmentation order
    pub fn morphemes(&self) -> &[Morpheme] {
        &self.morphemes
    }

    /// Position within the owning sentence
    pub fn index(&self) -> usize {
        self.index
    }

    /// Edges this word governs, in backend order
    pub fn dependents(&self) -> &[Relationship] {
        &self.dependents
    }

    /// Backend word this value was read from
    ///
    /// The handle shares ownership, so it keeps the backend result alive for
    /// as long as this word (or a clone) exists.
    pub fn origin(&self) -> Option<&RawWordRef> {
        self.origin.as_ref()
    }

    /// Number of morphemes
    pub fn len(&self) -> usize {
        self.morphemes.len()
    }

    /// Whether the word has no morphemes
    pub fn is_empty(&self) -> bool {
        self.morphemes.is_empty()
    }

    /// Morpheme at `index`
    pub fn get(&self, index: usize) -> Option<&Morpheme> {
        self.morphemes.get(index)
    }

    /// Iterate over morphemes
    pub fn iter(&self) -> std::slice::Iter<'_, Morpheme> {
        self.morphemes.iter()
    }

    /// Whether any morpheme satisfies `predicate`
    pub fn exists<F>(&self, predicate: F) -> bool
    where
        F: Fn(&Morpheme) -> bool,
    {
        self.morphemes.iter().any(predicate)
    }

    /// `surface/TAG+surface/TAG` rendering
    pub fn single_line_string(&self) -> String {
        self.morphemes
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join("+")
    }
}

impl PartialEq for Word {
    fn eq(&self, other: &Self) -> bool {
        self.surface == other.surface
            && self.index == other.index
            && self.morphemes == other.morphemes
            && self.dependents == other.dependents
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Word")
            .field("surface", &self.surface)
            .field("index", &self.index)
            .field("morphemes", &self.morphemes)
            .field("dependents", &self.dependents)
            .field("origin", &self.origin.as_ref().map(|_| "<backend>"))
            .finish()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.single_line_string())
    }
}

impl Index<usize> for Word {
    type Output = Morpheme;

    fn index(&self, index: usize) -> &Self::Output {
        &self.morphemes[index]
    }
}

impl<'a> IntoIterator for &'a Word {
    type Item = &'a Morpheme;
    type IntoIter = std::slice::Iter<'a, Morpheme>;

    fn into_iter(self) -> Self::IntoIter {
        self.morphemes.iter()
    }
}

/// An analyzed sentence
#[derive(Clone, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "SentenceParts")
)]
pub struct Sentence {
    words: Vec<Word>,
    roots: Vec<Relationship>,
    #[cfg_attr(feature = "serde", serde(skip))]
    origin: Option<RawSentenceRef>,
}

impl Sentence {
    /// Create a sentence from words already carrying their positions and
    /// the edges governed by the sentence root.
    ///
    /// Fails if an index disagrees with its position, an edge points outside
    /// the sentence, or an edge sits under the wrong head.
    pub fn new(words: Vec<Word>, roots: Vec<Relationship>) -> Result<Self> {
        let sentence = Self {
            words,
            roots,
            origin: None,
        };
        sentence.validate()?;
        Ok(sentence)
    }

    fn validate(&self) -> Result<()> {
        let len = self.words.len();
        for (position, word) in self.words.iter().enumerate() {
            if word.index != position {
                return Err(MaterializeError::MisplacedIndex {
                    kind: "word",
                    expected: position,
                    found: word.index,
                });
            }
            word.check_morphemes()?;
        }

        for edge in self.relationships() {
            let head_ok = edge.head.map_or(true, |head| head < len);
            if !head_ok || edge.target >= len {
                return Err(MaterializeError::DanglingEdge {
                    head: edge.head,
                    target: edge.target,
                    len,
                });
            }
        }

        if let Some(edge) = self.roots.iter().find(|r| r.head.is_some()) {
            return Err(MaterializeError::MisplacedEdge {
                head: edge.head,
                owner: None,
            });
        }
        self.words.iter().try_for_each(Word::check_dependents)
    }

    pub(crate) fn set_origin(&mut self, origin: RawSentenceRef) {
        self.origin = Some(origin);
    }

    /// Words in linear order
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Edges governed by the virtual sentence root
    pub fn roots(&self) -> &[Relationship] {
        &self.roots
    }

    /// Backend sentence this value was read from
    ///
    /// The handle shares ownership, so it keeps the backend result alive for
    /// as long as this sentence (or a clone) exists.
    pub fn origin(&self) -> Option<&RawSentenceRef> {
        self.origin.as_ref()
    }

    /// Number of words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the sentence has no words
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Word at `index`
    pub fn get(&self, index: usize) -> Option<&Word> {
        self.words.get(index)
    }

    /// Iterate over words
    pub fn iter(&self) -> std::slice::Iter<'_, Word> {
        self.words.iter()
    }

    /// Every relationship: root edges first, then word dependents in word order
    pub fn relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.roots
            .iter()
            .chain(self.words.iter().flat_map(|w| w.dependents.iter()))
    }

    /// Surface text, words joined by a single space
    pub fn surface_string(&self) -> String {
        self.words
            .iter()
            .map(|w| w.surface())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Tagged rendering, words joined by a single space
    pub fn single_line_string(&self) -> String {
        self.words
            .iter()
            .map(|w| w.single_line_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Words containing a noun
    pub fn nouns(&self) -> Vec<&Word> {
        self.words_where(Morpheme::is_noun)
    }

    /// Words containing a predicate
    pub fn verbs(&self) -> Vec<&Word> {
        self.words_where(Morpheme::is_predicate)
    }

    /// Words containing a modifier
    pub fn modifiers(&self) -> Vec<&Word> {
        self.words_where(Morpheme::is_modifier)
    }

    fn words_where(&self, predicate: fn(&Morpheme) -> bool) -> Vec<&Word> {
        self.words.iter().filter(|w| w.exists(predicate)).collect()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct WordParts {
    surface: String,
    morphemes: Vec<Morpheme>,
    index: usize,
    #[serde(default)]
    dependents: Vec<Relationship>,
}

#[cfg(feature = "serde")]
impl TryFrom<WordParts> for Word {
    type Error = MaterializeError;

    fn try_from(parts: WordParts) -> Result<Self> {
        let mut word = Word::new(parts.surface, parts.morphemes, parts.index)?;
        word.dependents = parts.dependents;
        word.check_dependents()?;
        Ok(word)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SentenceParts {
    words: Vec<Word>,
    #[serde(default)]
    roots: Vec<Relationship>,
}

#[cfg(feature = "serde")]
impl TryFrom<SentenceParts> for Sentence {
    type Error = MaterializeError;

    fn try_from(parts: SentenceParts) -> Result<Self> {
        Sentence::new(parts.words, parts.roots)
    }
}

impl PartialEq for Sentence {
    fn eq(&self, other: &Self) -> bool {
        self.words == other.words && self.roots == other.roots
    }
}

impl fmt::Debug for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sentence")
            .field("words", &self.words)
            .field("roots", &self.roots)
            .field("origin", &self.origin.as_ref().map(|_| "<backend>"))
            .finish()
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.single_line_string())
    }
}

impl Index<usize> for Sentence {
    type Output = Word;

    fn index(&self, index: usize) -> &Self::Output {
        &self.words[index]
    }
}

impl<'a> IntoIterator for &'a Sentence {
    type Item = &'a Word;
    type IntoIter = std::slice::Iter<'a, Word>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}
