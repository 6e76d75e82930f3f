//! Canonical linguistic data model for pluggable Korean analysis backends
//!
//! Backends (taggers, dependency parsers) each report their results in their
//! own shape. This crate defines the one shape everything else works with,
//! and the materializer that converts into it.
//!
//! # Architecture
//!
//! - **Model**: [`Sentence`] → [`Word`] → [`Morpheme`], with [`Relationship`]
//!   edges attached to their head word or to the sentence root
//! - **Tagsets**: [`Pos`] and [`Label`], closed normalized vocabularies
//! - **Raw boundary**: [`raw`] traits through which backends expose results
//! - **Materializer**: [`materialize`] entry points draining raw results into
//!   the model
//!
//! # Example
//!
//! ```rust
//! use morphlink_core::raw::{RawEdge, TableSentence, TableWord};
//! use morphlink_core::{materialize_sentence, Pos};
//!
//! let raw = TableSentence::new()
//!     .with_word(TableWord::new("먹었다").with_morpheme("먹", "VV"))
//!     .with_root(RawEdge::root("VP", 0))
//!     .into_ref();
//!
//! let sentence = materialize_sentence(&raw).unwrap();
//! assert_eq!(sentence[0][0].tag(), Pos::VV);
//! assert_eq!(sentence.roots()[0].target(), 0);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod materialize;
pub mod model;
pub mod pos;
pub mod raw;

pub use error::{MaterializeError, UnknownTag};
pub use materialize::{materialize_paragraph, materialize_sentence, materialize_word};
pub use model::{Morpheme, Relationship, Sentence, Word};
pub use pos::{Label, Pos};
pub use raw::{RawEdge, RawMorpheme, RawParagraph, RawSentence, RawSentenceRef, RawWord, RawWordRef};
