//! Tagging front-end

use std::sync::Arc;

use futures::future::BoxFuture;
use morphlink_core::{RawParagraph, RawSentenceRef, Sentence};

use crate::backend::{Completion, TaggerBackend};
use crate::capability::Family;
use crate::context::Context;
use crate::error::Result;
use crate::invoke::{paragraph, sentence, Invocation};

/// Morphological tagger bound to one backend family
#[derive(Clone)]
pub struct Tagger {
    family: Family,
    backend: Arc<dyn TaggerBackend>,
}

impl Tagger {
    /// Bind to the tagger registered for `family`
    pub fn new(context: &Context, family: Family) -> Result<Self> {
        let backend = context.tagger(family)?;
        Ok(Self { family, backend })
    }

    /// Backend family
    pub fn family(&self) -> Family {
        self.family
    }

    /// Tag a paragraph, one [`Sentence`] per detected sentence
    pub fn tag(&self, text: &str) -> Result<Vec<Sentence>> {
        self.tag_call(text).wait()
    }

    /// Tag a paragraph; `callback` receives the sentences
    pub fn tag_with<F>(&self, text: &str, callback: F) -> Result<()>
    where
        F: FnOnce(Result<Vec<Sentence>>) + Send + 'static,
    {
        self.tag_call(text).then(Box::new(callback));
        Ok(())
    }

    /// Tag a paragraph, resolving once the backend completes
    pub fn tag_async(&self, text: &str) -> BoxFuture<'static, Result<Vec<Sentence>>> {
        self.tag_call(text).into_future()
    }

    /// Tag text as exactly one sentence
    pub fn tag_sentence(&self, text: &str) -> Result<Sentence> {
        self.tag_sentence_call(text).wait()
    }

    /// Tag text as one sentence; `callback` receives a one-element sequence
    pub fn tag_sentence_with<F>(&self, text: &str, callback: F) -> Result<()>
    where
        F: FnOnce(Result<Vec<Sentence>>) + Send + 'static,
    {
        self.tag_sentence_call(text).then(Box::new(callback));
        Ok(())
    }

    /// Tag text as one sentence, resolving once the backend completes
    pub fn tag_sentence_async(&self, text: &str) -> BoxFuture<'static, Result<Sentence>> {
        self.tag_sentence_call(text).into_future()
    }

    fn tag_call<'a>(&'a self, text: &'a str) -> Invocation<'a, RawParagraph, Vec<Sentence>> {
        let backend = &self.backend;
        Invocation::new(
            "tag",
            move || backend.tag_sync(text),
            move |done: Completion<RawParagraph>| backend.tag(text.to_owned(), done),
            paragraph,
        )
    }

    fn tag_sentence_call<'a>(&'a self, text: &'a str) -> Invocation<'a, RawSentenceRef, Sentence> {
        let backend = &self.backend;
        Invocation::new(
            "tag_sentence",
            move || backend.tag_sentence_sync(text),
            move |done: Completion<RawSentenceRef>| backend.tag_sentence(text.to_owned(), done),
            sentence,
        )
    }
}

impl std::fmt::Debug for Tagger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tagger").field("family", &self.family).finish()
    }
}
