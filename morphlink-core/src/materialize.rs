//! Result materializer
//!
//! Converts backend result trees into the canonical model. Each entry point
//! is a pure function of the backend output: it reads through the raw
//! accessors, builds owned values, and keeps only the origin handle.

use std::sync::Arc;

use log::trace;

use crate::error::{MaterializeError, Result};
use crate::model::{Morpheme, Relationship, Sentence, Word};
use crate::pos::{Label, Pos};
use crate::raw::{RawEdge, RawSentenceRef, RawWordRef};

/// Materialize one backend word at position `index` of its sentence
pub fn materialize_word(raw: &RawWordRef, index: usize) -> Result<Word> {
    let count = raw.morpheme_count();
    let surface = raw.surface();

    let mut morphemes = Vec::with_capacity(count);
    for position in 0..count {
        let morpheme = raw.morpheme(position).ok_or(MaterializeError::MissingItem {
            kind: "morpheme",
            index: position,
            len: count,
        })?;
        morphemes.push(Morpheme::new(
            morpheme.surface,
            Pos::from_tag(&morpheme.tag),
            morpheme.raw_tag,
            position,
        ));
    }

    let mut word = Word::new(surface, morphemes, index)?;
    word.set_origin(Arc::clone(raw));

    let edges = raw.dependent_count();
    for position in 0..edges {
        let edge = raw.dependent(position).ok_or(MaterializeError::MissingItem {
            kind: "dependent",
            index: position,
            len: edges,
        })?;
        word.push_dependent(relationship(edge));
    }

    Ok(word)
}

/// Materialize one backend sentence
pub fn materialize_sentence(raw: &RawSentenceRef) -> Result<Sentence> {
    let count = raw.word_count();

    let mut words = Vec::with_capacity(count);
    for position in 0..count {
        let word = raw.word(position).ok_or(MaterializeError::MissingItem {
            kind: "word",
            index: position,
            len: count,
        })?;
        words.push(materialize_word(&word, position)?);
    }

    let roots = raw.root_count();
    let mut edges = Vec::with_capacity(roots);
    for position in 0..roots {
        let edge = raw.root(position).ok_or(MaterializeError::MissingItem {
            kind: "root edge",
            index: position,
            len: roots,
        })?;
        edges.push(relationship(edge));
    }

    let mut sentence = Sentence::new(words, edges)?;
    sentence.set_origin(Arc::clone(raw));
    trace!("materialized sentence: {count} words, {roots} root edges");
    Ok(sentence)
}

/// Materialize a backend paragraph, sentences in input order
pub fn materialize_paragraph(raw: &[RawSentenceRef]) -> Result<Vec<Sentence>> {
    raw.iter().map(materialize_sentence).collect()
}

fn relationship(edge: RawEdge) -> Relationship {
    Relationship::new(edge.head, Label::from_tag(&edge.label), edge.raw_label, edge.target)
}
