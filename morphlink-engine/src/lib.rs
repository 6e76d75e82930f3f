//! Orchestration over pluggable Korean analysis backends
//!
//! This crate sits between callers and the analysis engines registered in a
//! [`Context`]. It checks every request against the closed capability table,
//! runs it in blocking, callback or future mode, composes tag-then-parse
//! pipelines and validates user dictionary input, returning results in the
//! model defined by `morphlink-core`.
//!
//! # Architecture
//!
//! - **Capabilities**: [`Family`] × [`Operation`] compatibility table
//! - **Backends**: [`TaggerBackend`], [`ParserBackend`], [`SplitterBackend`]
//!   and [`DictionaryBackend`], each with blocking and completion forms
//! - **Context**: caller-owned registry of backend implementations
//! - **Front-ends**: [`Tagger`], [`Parser`], [`SentenceSplitter`],
//!   [`Dictionary`]
//!
//! # Calling modes
//!
//! Every operation `op` comes in three forms:
//!
//! - `op(..)` blocks and returns the value
//! - `op_with(.., callback)` returns at once; `callback` later receives
//!   `Result<Vec<T>>`, a sequence even where `op` returns a single value
//! - `op_async(..)` returns a future
//!
//! Capability, registration and input errors are always returned directly,
//! in every mode. Backend failures travel through the mode's own channel.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use morphlink_core::raw::{TableSentence, TableWord};
//! use morphlink_core::{Pos, RawParagraph, RawSentenceRef};
//! use morphlink_engine::{
//!     BackendResult, Completion, Context, Family, Tagger, TaggerBackend,
//! };
//!
//! struct Whitespace;
//!
//! impl Whitespace {
//!     fn sentence(text: &str) -> RawSentenceRef {
//!         text.split_whitespace()
//!             .fold(TableSentence::new(), |s, w| {
//!                 s.with_word(TableWord::new(w).with_morpheme(w, "NNG"))
//!             })
//!             .into_ref()
//!     }
//! }
//!
//! impl TaggerBackend for Whitespace {
//!     fn tag_sync(&self, text: &str) -> BackendResult<RawParagraph> {
//!         Ok(text.split('.').filter(|s| !s.trim().is_empty()).map(Self::sentence).collect())
//!     }
//!     fn tag(&self, text: String, done: Completion<RawParagraph>) {
//!         done(self.tag_sync(&text))
//!     }
//!     fn tag_sentence_sync(&self, text: &str) -> BackendResult<RawSentenceRef> {
//!         Ok(Self::sentence(text))
//!     }
//!     fn tag_sentence(&self, text: String, done: Completion<RawSentenceRef>) {
//!         done(self.tag_sentence_sync(&text))
//!     }
//! }
//!
//! let context = Context::builder()
//!     .register_tagger(Family::Komoran, Arc::new(Whitespace))?
//!     .build();
//! let tagger = Tagger::new(&context, Family::Komoran)?;
//!
//! let sentences = tagger.tag("사과 먹었다. 배 먹었다.")?;
//! assert_eq!(sentences.len(), 2);
//! assert_eq!(sentences[0][0][0].tag(), Pos::NNG);
//! # Ok::<(), morphlink_engine::EngineError>(())
//! ```

#![warn(missing_docs)]

pub mod backend;
pub mod capability;
pub mod config;
pub mod context;
pub mod dictionary;
pub mod error;
mod invoke;
pub mod parser;
pub mod pipeline;
pub mod splitter;
pub mod tagger;

pub use backend::{
    Completion, DictEntry, DictionaryBackend, ParseInput, ParserBackend, SplitterBackend,
    TaggerBackend,
};
pub use capability::{validate, Family, Operation};
pub use config::{DictionaryConfig, EngineConfig};
pub use context::{Context, ContextBuilder};
pub use dictionary::{Column, Dictionary, Entries};
pub use error::{
    BackendError, BackendResult, CompatibilityError, EngineError, Result, ValidationError,
};
pub use invoke::{Batch, Callback};
pub use parser::Parser;
pub use pipeline::ParseSource;
pub use splitter::SentenceSplitter;
pub use tagger::Tagger;

pub use morphlink_core::{Label, Morpheme, Pos, Relationship, Sentence, Word};
