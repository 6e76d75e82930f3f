//! Tag-then-parse composition
//!
//! A parser configured with an auxiliary tagger runs two backend calls per
//! logical parse. Stage two is issued only after stage one has completed
//! successfully, in every mode; a stage one failure is reported as is.

use std::sync::Arc;

use log::debug;
use morphlink_core::{RawParagraph, RawSentenceRef, Sentence};

use crate::backend::{Completion, ParseInput, ParserBackend, TaggerBackend};
use crate::error::{EngineError, Result, ValidationError};
use crate::invoke::{chain, paragraph, sentence, Invocation};

/// Input to a parse
#[derive(Debug, Clone)]
pub enum ParseSource {
    /// Raw text, tagged first when an auxiliary tagger is configured
    Text(String),
    /// Sentences materialized earlier, fed to the parser without retagging
    Tagged(Vec<Sentence>),
}

impl From<&str> for ParseSource {
    fn from(text: &str) -> Self {
        ParseSource::Text(text.to_owned())
    }
}

impl From<String> for ParseSource {
    fn from(text: String) -> Self {
        ParseSource::Text(text)
    }
}

impl From<Sentence> for ParseSource {
    fn from(sentence: Sentence) -> Self {
        ParseSource::Tagged(vec![sentence])
    }
}

impl From<Vec<Sentence>> for ParseSource {
    fn from(sentences: Vec<Sentence>) -> Self {
        ParseSource::Tagged(sentences)
    }
}

impl From<&[Sentence]> for ParseSource {
    fn from(sentences: &[Sentence]) -> Self {
        ParseSource::Tagged(sentences.to_vec())
    }
}

/// What a planned parse will do once issued
#[derive(Clone)]
enum Plan {
    Direct(ParseInput),
    TagFirst(Arc<dyn TaggerBackend>, String),
}

#[derive(Clone)]
pub(crate) struct Pipeline {
    parser: Arc<dyn ParserBackend>,
    tagger: Option<Arc<dyn TaggerBackend>>,
}

impl Pipeline {
    pub(crate) fn new(
        parser: Arc<dyn ParserBackend>,
        tagger: Option<Arc<dyn TaggerBackend>>,
    ) -> Self {
        Self { parser, tagger }
    }

    pub(crate) fn has_tagger(&self) -> bool {
        self.tagger.is_some()
    }

    /// Paragraph parse of `source`; validation happens here, before any call
    pub(crate) fn paragraph(
        &self,
        source: ParseSource,
    ) -> Result<Invocation<'static, RawParagraph, Vec<Sentence>>> {
        let plan = self.plan(source)?;
        let (blocking_parser, blocking_plan) = (Arc::clone(&self.parser), plan.clone());
        let deferred_parser = Arc::clone(&self.parser);

        Ok(Invocation::new(
            "parse",
            move || match blocking_plan {
                Plan::Direct(input) => blocking_parser.parse_sync(input),
                Plan::TagFirst(tagger, text) => {
                    let tagged = tagger.tag_sync(&text)?;
                    blocking_parser.parse_sync(ParseInput::Tagged(tagged))
                }
            },
            move |done: Completion<RawParagraph>| match plan {
                Plan::Direct(input) => deferred_parser.parse(input, done),
                Plan::TagFirst(tagger, text) => chain(
                    "parse",
                    move |first: Completion<RawParagraph>| tagger.tag(text, first),
                    move |tagged: RawParagraph, done: Completion<RawParagraph>| {
                        deferred_parser.parse(ParseInput::Tagged(tagged), done)
                    },
                )(done),
            },
            paragraph,
        ))
    }

    /// Single-sentence parse of `source`
    ///
    /// Tagged input must hold exactly one sentence.
    pub(crate) fn sentence(
        &self,
        source: ParseSource,
    ) -> Result<Invocation<'static, RawSentenceRef, Sentence>> {
        if let ParseSource::Tagged(sentences) = &source {
            if sentences.len() != 1 {
                return Err(ValidationError::new(format!(
                    "single-sentence parse needs exactly one tagged sentence, got {}",
                    sentences.len()
                ))
                .into());
            }
        }

        let plan = self.plan(source)?;
        let (blocking_parser, blocking_plan) = (Arc::clone(&self.parser), plan.clone());
        let deferred_parser = Arc::clone(&self.parser);

        Ok(Invocation::new(
            "parse_sentence",
            move || match blocking_plan {
                Plan::Direct(input) => blocking_parser.parse_sentence_sync(input),
                Plan::TagFirst(tagger, text) => {
                    let tagged = tagger.tag_sentence_sync(&text)?;
                    blocking_parser.parse_sentence_sync(ParseInput::Tagged(vec![tagged]))
                }
            },
            move |done: Completion<RawSentenceRef>| match plan {
                Plan::Direct(input) => deferred_parser.parse_sentence(input, done),
                Plan::TagFirst(tagger, text) => chain(
                    "parse_sentence",
                    move |first: Completion<RawSentenceRef>| tagger.tag_sentence(text, first),
                    move |tagged: RawSentenceRef, done: Completion<RawSentenceRef>| {
                        deferred_parser.parse_sentence(ParseInput::Tagged(vec![tagged]), done)
                    },
                )(done),
            },
            sentence,
        ))
    }

    fn plan(&self, source: ParseSource) -> Result<Plan> {
        match source {
            ParseSource::Tagged(sentences) => {
                debug!("parse: {} tagged sentences, skipping tagging", sentences.len());
                Ok(Plan::Direct(ParseInput::Tagged(origins(&sentences)?)))
            }
            ParseSource::Text(text) => Ok(match &self.tagger {
                Some(tagger) => Plan::TagFirst(Arc::clone(tagger), text),
                None => Plan::Direct(ParseInput::Text(text)),
            }),
        }
    }
}

fn origins(sentences: &[Sentence]) -> Result<RawParagraph> {
    sentences
        .iter()
        .enumerate()
        .map(|(position, sentence)| {
            sentence.origin().cloned().ok_or_else(|| {
                EngineError::from(ValidationError::new(format!(
                    "sentence {position} was not produced by a backend and cannot be parsed"
                )))
            })
        })
        .collect()
}
