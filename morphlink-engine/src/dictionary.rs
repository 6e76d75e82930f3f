//! User dictionary front-end
//!
//! Entries are validated and normalized locally; the backend only ever sees
//! well-formed `(surface, tag)` batches.

use std::collections::BTreeSet;
use std::sync::Arc;

use futures::future::BoxFuture;
use log::debug;
use morphlink_core::Pos;

use crate::backend::{Completion, DictEntry, DictionaryBackend};
use crate::capability::Family;
use crate::context::Context;
use crate::error::{BackendResult, Result, ValidationError};
use crate::invoke::{chain, unchanged, Invocation};

/// One column of dictionary input: a single value or a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Column {
    /// A single value
    Single(String),
    /// A batch of values
    Batch(Vec<String>),
}

impl From<&str> for Column {
    fn from(value: &str) -> Self {
        Column::Single(value.to_owned())
    }
}

impl From<String> for Column {
    fn from(value: String) -> Self {
        Column::Single(value)
    }
}

impl From<Vec<String>> for Column {
    fn from(values: Vec<String>) -> Self {
        Column::Batch(values)
    }
}

impl From<Vec<&str>> for Column {
    fn from(values: Vec<&str>) -> Self {
        Column::Batch(values.into_iter().map(str::to_owned).collect())
    }
}

impl From<&[&str]> for Column {
    fn from(values: &[&str]) -> Self {
        Column::Batch(values.iter().map(|v| (*v).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Column {
    fn from(values: [&str; N]) -> Self {
        Column::Batch(values.iter().map(|v| (*v).to_owned()).collect())
    }
}

/// Ordered, validated dictionary entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entries(Vec<DictEntry>);

impl Entries {
    /// Empty entry list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry
    pub fn with(mut self, surface: impl Into<String>, tag: Pos) -> Self {
        self.0.push(DictEntry::new(surface, tag));
        self
    }

    /// Build from `(surface, tag string)` pairs
    ///
    /// Fails on the first tag outside the tagset.
    pub fn from_pairs<I, S, T>(pairs: I) -> std::result::Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: AsRef<str>,
    {
        pairs
            .into_iter()
            .map(|(surface, tag)| Ok(DictEntry::new(surface, parse_tag(tag.as_ref())?)))
            .collect::<std::result::Result<Vec<_>, ValidationError>>()
            .map(Entries)
    }

    /// Build from a surface column and a tag column
    ///
    /// Both columns must be single values, or batches of the same length.
    pub fn from_columns(
        surfaces: impl Into<Column>,
        tags: impl Into<Column>,
    ) -> std::result::Result<Self, ValidationError> {
        match (surfaces.into(), tags.into()) {
            (Column::Single(surface), Column::Single(tag)) => Self::from_pairs([(surface, tag)]),
            (Column::Batch(surfaces), Column::Batch(tags)) => {
                if surfaces.len() != tags.len() {
                    return Err(ValidationError::new(format!(
                        "{} surfaces but {} tags",
                        surfaces.len(),
                        tags.len()
                    )));
                }
                Self::from_pairs(surfaces.into_iter().zip(tags))
            }
            _ => Err(ValidationError::new(
                "surfaces and tags must both be batches or both be single values",
            )),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in input order
    pub fn as_slice(&self) -> &[DictEntry] {
        &self.0
    }

    /// Iterate in input order
    pub fn iter(&self) -> std::slice::Iter<'_, DictEntry> {
        self.0.iter()
    }
}

impl FromIterator<DictEntry> for Entries {
    fn from_iter<I: IntoIterator<Item = DictEntry>>(iter: I) -> Self {
        Entries(iter.into_iter().collect())
    }
}

impl IntoIterator for Entries {
    type Item = DictEntry;
    type IntoIter = std::vec::IntoIter<DictEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

fn parse_tag(tag: &str) -> std::result::Result<Pos, ValidationError> {
    tag.parse::<Pos>()
        .map_err(|err| ValidationError::new(err.to_string()))
}

fn parse_tags<I>(tags: I) -> std::result::Result<BTreeSet<Pos>, ValidationError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    tags.into_iter().map(|tag| parse_tag(tag.as_ref())).collect()
}

/// User dictionary of one backend family
///
/// Mutations against one dictionary must be serialized by the caller.
#[derive(Clone)]
pub struct Dictionary {
    family: Family,
    backend: Arc<dyn DictionaryBackend>,
    default_tags: BTreeSet<Pos>,
}

impl Dictionary {
    /// Bind to the dictionary registered for `family`
    pub fn new(context: &Context, family: Family) -> Result<Self> {
        let backend = context.dictionary(family)?;
        Ok(Self {
            family,
            backend,
            default_tags: context.config().contains_tags(),
        })
    }

    /// Backend family
    pub fn family(&self) -> Family {
        self.family
    }

    /// Tags a plain [`contains`](Self::contains) matches against
    pub fn default_tags(&self) -> &BTreeSet<Pos> {
        &self.default_tags
    }

    /// Add entries as one batch
    pub fn add_entries(&self, entries: &Entries) -> Result<()> {
        self.add_call(entries.as_slice()).wait()
    }

    /// Add entries as one batch; `callback` receives an empty sequence on success
    pub fn add_entries_with<F>(&self, entries: &Entries, callback: F) -> Result<()>
    where
        F: FnOnce(Result<Vec<()>>) + Send + 'static,
    {
        self.add_call(entries.as_slice()).then(Box::new(callback));
        Ok(())
    }

    /// Add entries as one batch, resolving once the backend completes
    pub fn add_entries_async(&self, entries: &Entries) -> BoxFuture<'static, Result<()>> {
        self.add_call(entries.as_slice()).into_future()
    }

    /// Add entries given as a surface column and a tag column
    ///
    /// Mismatched columns and unknown tags are rejected before any backend
    /// call.
    pub fn add_columns(&self, surfaces: impl Into<Column>, tags: impl Into<Column>) -> Result<()> {
        let entries = Entries::from_columns(surfaces, tags)?;
        self.add_entries(&entries)
    }

    /// Callback form of [`add_columns`](Self::add_columns)
    pub fn add_columns_with<F>(
        &self,
        surfaces: impl Into<Column>,
        tags: impl Into<Column>,
        callback: F,
    ) -> Result<()>
    where
        F: FnOnce(Result<Vec<()>>) + Send + 'static,
    {
        let entries = Entries::from_columns(surfaces, tags)?;
        self.add_entries_with(&entries, callback)
    }

    /// Future form of [`add_columns`](Self::add_columns)
    pub fn add_columns_async(
        &self,
        surfaces: impl Into<Column>,
        tags: impl Into<Column>,
    ) -> Result<BoxFuture<'static, Result<()>>> {
        let entries = Entries::from_columns(surfaces, tags)?;
        Ok(self.add_entries_async(&entries))
    }

    /// Whether `surface` is known under one of the default tags
    pub fn contains(&self, surface: &str) -> Result<bool> {
        self.contains_call(surface, self.default_tags.clone()).wait()
    }

    /// Callback form of [`contains`](Self::contains)
    pub fn contains_with<F>(&self, surface: &str, callback: F) -> Result<()>
    where
        F: FnOnce(Result<Vec<bool>>) + Send + 'static,
    {
        self.contains_call(surface, self.default_tags.clone())
            .then(Box::new(callback));
        Ok(())
    }

    /// Future form of [`contains`](Self::contains)
    pub fn contains_async(&self, surface: &str) -> BoxFuture<'static, Result<bool>> {
        self.contains_call(surface, self.default_tags.clone())
            .into_future()
    }

    /// Whether `surface` is known under any of `tags`
    pub fn contains_any<I>(&self, surface: &str, tags: I) -> Result<bool>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let tags = parse_tags(tags)?;
        self.contains_call(surface, tags).wait()
    }

    /// Callback form of [`contains_any`](Self::contains_any)
    pub fn contains_any_with<I, F>(&self, surface: &str, tags: I, callback: F) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        F: FnOnce(Result<Vec<bool>>) + Send + 'static,
    {
        let tags = parse_tags(tags)?;
        self.contains_call(surface, tags).then(Box::new(callback));
        Ok(())
    }

    /// Future form of [`contains_any`](Self::contains_any)
    pub fn contains_any_async<I>(&self, surface: &str, tags: I) -> Result<BoxFuture<'static, Result<bool>>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let tags = parse_tags(tags)?;
        Ok(self.contains_call(surface, tags).into_future())
    }

    /// Candidates missing from the dictionary, as (surface, raw tag) in
    /// backend order
    pub fn get_not_existing(&self, only_system: bool, entries: &Entries) -> Result<Vec<(String, String)>> {
        self.missing_call(only_system, entries.as_slice()).wait()
    }

    /// Callback form of [`get_not_existing`](Self::get_not_existing)
    pub fn get_not_existing_with<F>(&self, only_system: bool, entries: &Entries, callback: F) -> Result<()>
    where
        F: FnOnce(Result<Vec<(String, String)>>) + Send + 'static,
    {
        self.missing_call(only_system, entries.as_slice())
            .then(Box::new(callback));
        Ok(())
    }

    /// Future form of [`get_not_existing`](Self::get_not_existing)
    pub fn get_not_existing_async(
        &self,
        only_system: bool,
        entries: &Entries,
    ) -> BoxFuture<'static, Result<Vec<(String, String)>>> {
        self.missing_call(only_system, entries.as_slice())
            .into_future()
    }

    /// Entries of the user dictionary
    pub fn items(&self) -> Result<Vec<DictEntry>> {
        self.items_call().wait()
    }

    /// Callback form of [`items`](Self::items)
    pub fn items_with<F>(&self, callback: F) -> Result<()>
    where
        F: FnOnce(Result<Vec<DictEntry>>) + Send + 'static,
    {
        self.items_call().then(Box::new(callback));
        Ok(())
    }

    /// Future form of [`items`](Self::items)
    pub fn items_async(&self) -> BoxFuture<'static, Result<Vec<DictEntry>>> {
        self.items_call().into_future()
    }

    /// System dictionary entries whose tag passes `filter`
    pub fn base_entries(&self, filter: impl Fn(Pos) -> bool) -> Result<Vec<DictEntry>> {
        self.base_call(select(filter)).wait()
    }

    /// Callback form of [`base_entries`](Self::base_entries)
    pub fn base_entries_with<F>(&self, filter: impl Fn(Pos) -> bool, callback: F) -> Result<()>
    where
        F: FnOnce(Result<Vec<DictEntry>>) + Send + 'static,
    {
        self.base_call(select(filter)).then(Box::new(callback));
        Ok(())
    }

    /// Future form of [`base_entries`](Self::base_entries)
    pub fn base_entries_async(&self, filter: impl Fn(Pos) -> bool) -> BoxFuture<'static, Result<Vec<DictEntry>>> {
        self.base_call(select(filter)).into_future()
    }

    /// Copy the system entries of `other` whose tag passes `filter` into this
    /// user dictionary; returns how many were added
    pub fn import_from(&self, other: &Dictionary, filter: impl Fn(Pos) -> bool) -> Result<usize> {
        self.import_call(other, select(filter)).wait()
    }

    /// Callback form of [`import_from`](Self::import_from)
    pub fn import_from_with<F>(&self, other: &Dictionary, filter: impl Fn(Pos) -> bool, callback: F) -> Result<()>
    where
        F: FnOnce(Result<Vec<usize>>) + Send + 'static,
    {
        self.import_call(other, select(filter))
            .then(Box::new(callback));
        Ok(())
    }

    /// Future form of [`import_from`](Self::import_from)
    pub fn import_from_async(
        &self,
        other: &Dictionary,
        filter: impl Fn(Pos) -> bool,
    ) -> BoxFuture<'static, Result<usize>> {
        self.import_call(other, select(filter)).into_future()
    }

    fn add_call<'a>(&'a self, entries: &'a [DictEntry]) -> Invocation<'a, (), ()> {
        debug!("{} dictionary: adding {} entries", self.family, entries.len());
        let backend = &self.backend;
        Invocation::new(
            "add_entries",
            move || backend.add_entries_sync(entries),
            move |done: Completion<()>| backend.add_entries(entries.to_vec(), done),
            unchanged,
        )
    }

    fn contains_call<'a>(&'a self, surface: &'a str, tags: BTreeSet<Pos>) -> Invocation<'a, bool, bool> {
        let backend = &self.backend;
        let blocking_tags = tags.clone();
        Invocation::new(
            "contains",
            move || backend.contains_sync(surface, &blocking_tags),
            move |done: Completion<bool>| backend.contains(surface.to_owned(), tags, done),
            unchanged,
        )
    }

    fn missing_call<'a>(
        &'a self,
        only_system: bool,
        entries: &'a [DictEntry],
    ) -> Invocation<'a, Vec<(String, String)>, Vec<(String, String)>> {
        let backend = &self.backend;
        Invocation::new(
            "get_not_existing",
            move || backend.get_not_existing_sync(only_system, entries),
            move |done: Completion<Vec<(String, String)>>| {
                backend.get_not_existing(only_system, entries.to_vec(), done)
            },
            unchanged,
        )
    }

    fn items_call(&self) -> Invocation<'_, Vec<DictEntry>, Vec<DictEntry>> {
        let backend = &self.backend;
        Invocation::new(
            "items",
            move || backend.items_sync(),
            move |done: Completion<Vec<DictEntry>>| backend.items(done),
            unchanged,
        )
    }

    fn base_call(&self, tags: BTreeSet<Pos>) -> Invocation<'_, Vec<DictEntry>, Vec<DictEntry>> {
        let backend = &self.backend;
        let blocking_tags = tags.clone();
        Invocation::new(
            "base_entries",
            move || backend.base_entries_sync(&blocking_tags),
            move |done: Completion<Vec<DictEntry>>| backend.base_entries(tags, done),
            unchanged,
        )
    }

    fn import_call<'a>(&'a self, other: &'a Dictionary, tags: BTreeSet<Pos>) -> Invocation<'a, usize, usize> {
        debug!("{} dictionary: importing {} tags from {}", self.family, tags.len(), other.family);
        let (source, target) = (&other.backend, &self.backend);
        let blocking_tags = tags.clone();
        Invocation::new(
            "import_from",
            move || {
                let entries = source.base_entries_sync(&blocking_tags)?;
                target.add_entries_sync(&entries)?;
                Ok(entries.len())
            },
            move |done: Completion<usize>| {
                let target = Arc::clone(target);
                chain(
                    "import_from",
                    move |first: Completion<Vec<DictEntry>>| source.base_entries(tags, first),
                    move |entries: Vec<DictEntry>, done: Completion<usize>| {
                        let count = entries.len();
                        target.add_entries(
                            entries,
                            Box::new(move |outcome: BackendResult<()>| done(outcome.map(|()| count))),
                        )
                    },
                )(done)
            },
            unchanged,
        )
    }
}

fn select(filter: impl Fn(Pos) -> bool) -> BTreeSet<Pos> {
    Pos::ALL.iter().copied().filter(|tag| filter(*tag)).collect()
}

impl std::fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dictionary")
            .field("family", &self.family)
            .field("default_tags", &self.default_tags)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_columns_scalar_and_batch() {
        let single = Entries::from_columns("코모란", "NNP").unwrap();
        assert_eq!(single.as_slice(), &[DictEntry::new("코모란", Pos::NNP)]);

        let batch = Entries::from_columns(["코모란", "한나눔"], ["NNP", "nng"]).unwrap();
        assert_eq!(
            batch.into_iter().collect::<Vec<_>>(),
            vec![DictEntry::new("코모란", Pos::NNP), DictEntry::new("한나눔", Pos::NNG)]
        );
    }

    #[test]
    fn test_columns_mismatch() {
        let err = Entries::from_columns(["가", "나", "다"], ["NNP", "NNG"]).unwrap_err();
        assert_eq!(err.reason, "3 surfaces but 2 tags");

        let err = Entries::from_columns("가", ["NNP"]).unwrap_err();
        assert!(err.reason.contains("both be batches"));
        let err = Entries::from_columns(vec!["가"], "NNP").unwrap_err();
        assert!(err.reason.contains("both be batches"));
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let err = Entries::from_pairs([("가", "NNP"), ("나", "XYZ")]).unwrap_err();
        assert!(err.reason.contains("XYZ"));
    }

    #[test]
    fn test_select_filter() {
        let nouns = select(|tag| tag.is_noun());
        assert!(nouns.contains(&Pos::NNG));
        assert!(!nouns.contains(&Pos::VV));
        assert!(select(|_| false).is_empty());
    }

    proptest! {
        #[test]
        fn prop_columns_pair_up_or_fail(
            surfaces in prop::collection::vec("[가-힣]{1,4}", 0..8),
            tags in prop::collection::vec(prop::sample::select(Pos::ALL.to_vec()), 0..8),
        ) {
            let tag_strings: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
            let outcome = Entries::from_columns(surfaces.clone(), tag_strings);
            if surfaces.len() == tags.len() {
                let entries = outcome.unwrap();
                let expected: Vec<DictEntry> = surfaces
                    .iter()
                    .zip(&tags)
                    .map(|(s, t)| DictEntry::new(s.clone(), *t))
                    .collect();
                prop_assert_eq!(entries.as_slice(), expected.as_slice());
            } else {
                prop_assert!(outcome.is_err());
            }
        }
    }
}
