//! Backend registry
//!
//! A [`Context`] is built once by the caller and handed to every front-end.
//! Registration checks the compatibility table, so a context never holds a
//! backend under a family that cannot provide its operation.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::backend::{DictionaryBackend, ParserBackend, SplitterBackend, TaggerBackend};
use crate::capability::{validate, Family, Operation};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};

/// Registered backends and engine configuration
#[derive(Clone, Default)]
pub struct Context {
    taggers: HashMap<Family, Arc<dyn TaggerBackend>>,
    parsers: HashMap<Family, Arc<dyn ParserBackend>>,
    splitters: HashMap<Family, Arc<dyn SplitterBackend>>,
    dictionaries: HashMap<Family, Arc<dyn DictionaryBackend>>,
    config: EngineConfig,
}

impl Context {
    /// Start building a context
    pub fn builder() -> ContextBuilder {
        ContextBuilder::default()
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Families with a registered backend for `operation`, in declaration order
    pub fn registered(&self, operation: Operation) -> Vec<Family> {
        Family::ALL
            .into_iter()
            .filter(|family| match operation {
                Operation::Tagging => self.taggers.contains_key(family),
                Operation::Parsing => self.parsers.contains_key(family),
                Operation::SentenceSplitting => self.splitters.contains_key(family),
                Operation::Dictionary => self.dictionaries.contains_key(family),
            })
            .collect()
    }

    pub(crate) fn tagger(&self, family: Family) -> Result<Arc<dyn TaggerBackend>> {
        lookup(&self.taggers, family, Operation::Tagging)
    }

    pub(crate) fn parser(&self, family: Family) -> Result<Arc<dyn ParserBackend>> {
        lookup(&self.parsers, family, Operation::Parsing)
    }

    pub(crate) fn splitter(&self, family: Family) -> Result<Arc<dyn SplitterBackend>> {
        lookup(&self.splitters, family, Operation::SentenceSplitting)
    }

    pub(crate) fn dictionary(&self, family: Family) -> Result<Arc<dyn DictionaryBackend>> {
        lookup(&self.dictionaries, family, Operation::Dictionary)
    }
}

fn lookup<T: ?Sized>(
    registry: &HashMap<Family, Arc<T>>,
    family: Family,
    operation: Operation,
) -> Result<Arc<T>> {
    validate(family, operation)?;
    registry
        .get(&family)
        .cloned()
        .ok_or(EngineError::Unregistered { family, operation })
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("taggers", &self.registered(Operation::Tagging))
            .field("parsers", &self.registered(Operation::Parsing))
            .field("splitters", &self.registered(Operation::SentenceSplitting))
            .field("dictionaries", &self.registered(Operation::Dictionary))
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for [`Context`]
#[derive(Debug, Default)]
pub struct ContextBuilder {
    context: Context,
}

impl ContextBuilder {
    /// Register a tagger; replaces any earlier one for the family
    pub fn register_tagger(
        mut self,
        family: Family,
        backend: Arc<dyn TaggerBackend>,
    ) -> Result<Self> {
        validate(family, Operation::Tagging)?;
        debug!("registered {family} tagger");
        self.context.taggers.insert(family, backend);
        Ok(self)
    }

    /// Register a dependency parser; replaces any earlier one for the family
    pub fn register_parser(
        mut self,
        family: Family,
        backend: Arc<dyn ParserBackend>,
    ) -> Result<Self> {
        validate(family, Operation::Parsing)?;
        debug!("registered {family} parser");
        self.context.parsers.insert(family, backend);
        Ok(self)
    }

    /// Register a sentence splitter; replaces any earlier one for the family
    pub fn register_splitter(
        mut self,
        family: Family,
        backend: Arc<dyn SplitterBackend>,
    ) -> Result<Self> {
        validate(family, Operation::SentenceSplitting)?;
        debug!("registered {family} sentence splitter");
        self.context.splitters.insert(family, backend);
        Ok(self)
    }

    /// Register a dictionary; replaces any earlier one for the family
    pub fn register_dictionary(
        mut self,
        family: Family,
        backend: Arc<dyn DictionaryBackend>,
    ) -> Result<Self> {
        validate(family, Operation::Dictionary)?;
        debug!("registered {family} dictionary");
        self.context.dictionaries.insert(family, backend);
        Ok(self)
    }

    /// Use `config` instead of the defaults
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.context.config = config;
        self
    }

    /// Finish building
    pub fn build(self) -> Context {
        self.context
    }
}
