//! Dependency parsing front-end

use futures::future::BoxFuture;
use morphlink_core::Sentence;

use crate::capability::Family;
use crate::context::Context;
use crate::error::Result;
use crate::pipeline::{ParseSource, Pipeline};

/// Dependency parser bound to one backend family
///
/// Built with [`Parser::with_tagger`], raw text is tagged by the auxiliary
/// tagger first and the parser only sees tagged input.
#[derive(Clone)]
pub struct Parser {
    family: Family,
    tagger_family: Option<Family>,
    pipeline: Pipeline,
}

impl Parser {
    /// Bind to the parser registered for `family`
    pub fn new(context: &Context, family: Family) -> Result<Self> {
        let parser = context.parser(family)?;
        Ok(Self {
            family,
            tagger_family: None,
            pipeline: Pipeline::new(parser, None),
        })
    }

    /// Bind to the parser registered for `family`, tagging raw text with the
    /// tagger registered for `tagger`
    pub fn with_tagger(context: &Context, family: Family, tagger: Family) -> Result<Self> {
        let parser = context.parser(family)?;
        let auxiliary = context.tagger(tagger)?;
        Ok(Self {
            family,
            tagger_family: Some(tagger),
            pipeline: Pipeline::new(parser, Some(auxiliary)),
        })
    }

    /// Backend family
    pub fn family(&self) -> Family {
        self.family
    }

    /// Family of the auxiliary tagger, if any
    pub fn tagger_family(&self) -> Option<Family> {
        self.tagger_family
    }

    /// Parse a paragraph of text or previously tagged sentences
    pub fn parse(&self, source: impl Into<ParseSource>) -> Result<Vec<Sentence>> {
        self.pipeline.paragraph(source.into())?.wait()
    }

    /// Parse a paragraph; `callback` receives the sentences
    ///
    /// Malformed input is rejected here, before any backend call; backend
    /// failures of either stage go to `callback`.
    pub fn parse_with<F>(&self, source: impl Into<ParseSource>, callback: F) -> Result<()>
    where
        F: FnOnce(Result<Vec<Sentence>>) + Send + 'static,
    {
        self.pipeline.paragraph(source.into())?.then(Box::new(callback));
        Ok(())
    }

    /// Parse a paragraph, resolving once the last stage completes
    pub fn parse_async(
        &self,
        source: impl Into<ParseSource>,
    ) -> Result<BoxFuture<'static, Result<Vec<Sentence>>>> {
        Ok(self.pipeline.paragraph(source.into())?.into_future())
    }

    /// Parse exactly one sentence
    pub fn parse_sentence(&self, source: impl Into<ParseSource>) -> Result<Sentence> {
        self.pipeline.sentence(source.into())?.wait()
    }

    /// Parse one sentence; `callback` receives a one-element sequence
    pub fn parse_sentence_with<F>(&self, source: impl Into<ParseSource>, callback: F) -> Result<()>
    where
        F: FnOnce(Result<Vec<Sentence>>) + Send + 'static,
    {
        self.pipeline.sentence(source.into())?.then(Box::new(callback));
        Ok(())
    }

    /// Parse one sentence, resolving once the last stage completes
    pub fn parse_sentence_async(
        &self,
        source: impl Into<ParseSource>,
    ) -> Result<BoxFuture<'static, Result<Sentence>>> {
        Ok(self.pipeline.sentence(source.into())?.into_future())
    }
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("family", &self.family)
            .field("tagger_family", &self.tagger_family)
            .field("pipelined", &self.pipeline.has_tagger())
            .finish()
    }
}
