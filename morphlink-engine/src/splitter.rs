//! Sentence splitting front-end

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::backend::{Completion, SplitterBackend};
use crate::capability::Family;
use crate::context::Context;
use crate::error::Result;
use crate::invoke::{unchanged, Invocation};

/// Sentence boundary detector bound to one backend family
///
/// Output strings are returned exactly as the backend produced them.
#[derive(Clone)]
pub struct SentenceSplitter {
    family: Family,
    backend: Arc<dyn SplitterBackend>,
}

impl SentenceSplitter {
    /// Bind to the splitter registered for `family`
    pub fn new(context: &Context, family: Family) -> Result<Self> {
        let backend = context.splitter(family)?;
        Ok(Self { family, backend })
    }

    /// Backend family
    pub fn family(&self) -> Family {
        self.family
    }

    /// Split `text` into sentences
    pub fn sentences(&self, text: &str) -> Result<Vec<String>> {
        self.call(text).wait()
    }

    /// Split `text` into sentences; `callback` receives them
    pub fn sentences_with<F>(&self, text: &str, callback: F) -> Result<()>
    where
        F: FnOnce(Result<Vec<String>>) + Send + 'static,
    {
        self.call(text).then(Box::new(callback));
        Ok(())
    }

    /// Split `text` into sentences, resolving once the backend completes
    pub fn sentences_async(&self, text: &str) -> BoxFuture<'static, Result<Vec<String>>> {
        self.call(text).into_future()
    }

    fn call<'a>(&'a self, text: &'a str) -> Invocation<'a, Vec<String>, Vec<String>> {
        let backend = &self.backend;
        Invocation::new(
            "sentences",
            move || backend.sentences_sync(text),
            move |done: Completion<Vec<String>>| backend.sentences(text.to_owned(), done),
            unchanged,
        )
    }
}

impl std::fmt::Debug for SentenceSplitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceSplitter")
            .field("family", &self.family)
            .finish()
    }
}
