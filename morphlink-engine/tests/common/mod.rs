//! Stub backends shared by the integration tests
//!
//! Every stub counts its calls and can be told to fail or to complete its
//! non-blocking form inline instead of on a separate thread.

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use morphlink_core::raw::{RawEdge, RawMorpheme, TableSentence, TableWord};
use morphlink_core::{Pos, RawParagraph, RawSentence, RawSentenceRef};
use morphlink_engine::{
    BackendError, BackendResult, Completion, Context, DictEntry, DictionaryBackend, Family,
    ParseInput, ParserBackend, SplitterBackend, TaggerBackend,
};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// How a stub completes its non-blocking form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Threaded,
    Inline,
    /// Drop the completion without calling it
    Dropped,
}

fn deliver<T: Send + 'static>(delivery: Delivery, done: Completion<T>, outcome: BackendResult<T>) {
    match delivery {
        Delivery::Threaded => {
            thread::spawn(move || done(outcome));
        }
        Delivery::Inline => done(outcome),
        Delivery::Dropped => drop(done),
    }
}

pub fn recv<T>(rx: &Receiver<T>) -> T {
    rx.recv_timeout(Duration::from_secs(5))
        .expect("callback was not invoked")
}

/// Morphemes for one whitespace-separated word
fn analyze(word: &str) -> Vec<RawMorpheme> {
    match word {
        "먹었다" => vec![
            RawMorpheme::new("먹", "VV", "pvg"),
            RawMorpheme::new("었", "EP", "ep"),
            RawMorpheme::new("다", "EF", "ef"),
        ],
        "다" => vec![RawMorpheme::new("다", "EF", "ef")],
        _ => vec![RawMorpheme::new(word, "NNG", "ncn")],
    }
}

fn tag_one(text: &str) -> RawSentenceRef {
    text.trim_end_matches(['.', '?', '!'])
        .split_whitespace()
        .map(|w| analyze(w).into_iter().fold(TableWord::new(w), TableWord::with_raw_morpheme))
        .fold(TableSentence::new(), TableSentence::with_word)
        .into_ref()
}

fn split(text: &str) -> Vec<&str> {
    text.split_inclusive(['.', '?', '!'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Paragraph from the end-to-end scenario: "사과" alone, then "먹었다 다"
/// with one root edge onto the first word
pub fn scenario_paragraph() -> RawParagraph {
    vec![
        TableSentence::new()
            .with_word(TableWord::new("사과").with_morpheme("사과", "NNG"))
            .into_ref(),
        TableSentence::new()
            .with_word(
                TableWord::new("먹었다")
                    .with_morpheme("먹", "VV")
                    .with_morpheme("었", "EP")
                    .with_morpheme("다", "EF"),
            )
            .with_word(TableWord::new("다").with_morpheme("다", "EF"))
            .with_root(RawEdge::root("VP", 0))
            .into_ref(),
    ]
}

pub struct StubTagger {
    pub calls: AtomicUsize,
    pub failure: Option<String>,
    pub delivery: Delivery,
}

impl StubTagger {
    pub fn new() -> Arc<Self> {
        Self::build(None, Delivery::Threaded)
    }

    pub fn inline() -> Arc<Self> {
        Self::build(None, Delivery::Inline)
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Self::build(Some(message.to_string()), Delivery::Threaded)
    }

    pub fn dropping() -> Arc<Self> {
        Self::build(None, Delivery::Dropped)
    }

    fn build(failure: Option<String>, delivery: Delivery) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            failure,
            delivery,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> BackendResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(message) => Err(BackendError::new(message.clone())),
            None => Ok(()),
        }
    }
}

impl TaggerBackend for StubTagger {
    fn tag_sync(&self, text: &str) -> BackendResult<RawParagraph> {
        self.check()?;
        Ok(split(text).into_iter().map(tag_one).collect())
    }

    fn tag(&self, text: String, done: Completion<RawParagraph>) {
        deliver(self.delivery, done, self.tag_sync(&text));
    }

    fn tag_sentence_sync(&self, text: &str) -> BackendResult<RawSentenceRef> {
        self.check()?;
        Ok(tag_one(text))
    }

    fn tag_sentence(&self, text: String, done: Completion<RawSentenceRef>) {
        deliver(self.delivery, done, self.tag_sentence_sync(&text));
    }
}

/// Parser attaching every word to the last one, and the last one to the root
pub struct StubParser {
    pub calls: AtomicUsize,
    pub failure: Option<String>,
    pub delivery: Delivery,
    pub scripted: Option<RawParagraph>,
    pub inputs: Mutex<Vec<String>>,
}

impl StubParser {
    pub fn new() -> Arc<Self> {
        Self::build(None, Delivery::Threaded, None)
    }

    pub fn inline() -> Arc<Self> {
        Self::build(None, Delivery::Inline, None)
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Self::build(Some(message.to_string()), Delivery::Threaded, None)
    }

    pub fn scripted(paragraph: RawParagraph) -> Arc<Self> {
        Self::build(None, Delivery::Threaded, Some(paragraph))
    }

    fn build(failure: Option<String>, delivery: Delivery, scripted: Option<RawParagraph>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            failure,
            delivery,
            scripted,
            inputs: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }

    fn paragraph(&self, input: ParseInput) -> BackendResult<RawParagraph> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let tagged = match input {
            ParseInput::Text(text) => {
                self.inputs.lock().unwrap().push(format!("text:{text}"));
                split(&text).into_iter().map(tag_one).collect()
            }
            ParseInput::Tagged(sentences) => {
                self.inputs
                    .lock()
                    .unwrap()
                    .push(format!("tagged:{}", sentences.len()));
                sentences
            }
        };
        if let Some(message) = &self.failure {
            return Err(BackendError::new(message.clone()));
        }
        if let Some(scripted) = &self.scripted {
            return Ok(scripted.clone());
        }
        Ok(tagged.iter().map(|s| attach(&**s)).collect())
    }

    fn sentence(&self, input: ParseInput) -> BackendResult<RawSentenceRef> {
        let mut paragraph = self.paragraph(input)?;
        if paragraph.len() != 1 {
            return Err(BackendError::new(format!(
                "expected one sentence, got {}",
                paragraph.len()
            )));
        }
        Ok(paragraph.remove(0))
    }
}

fn attach(tagged: &dyn RawSentence) -> RawSentenceRef {
    let count = tagged.word_count();
    let mut sentence = TableSentence::new();
    for index in 0..count {
        let Some(raw) = tagged.word(index) else {
            continue;
        };
        let mut word = (0..raw.morpheme_count())
            .filter_map(|m| raw.morpheme(m))
            .fold(TableWord::new(raw.surface()), TableWord::with_raw_morpheme);
        if index + 1 == count {
            for dependent in 0..index {
                word = word.with_dependent(RawEdge::new(Some(index), "NP", "NP_SBJ", dependent));
            }
        }
        sentence = sentence.with_word(word);
    }
    if count > 0 {
        sentence = sentence.with_root(RawEdge::root("VP", count - 1));
    }
    sentence.into_ref()
}

impl ParserBackend for StubParser {
    fn parse_sync(&self, input: ParseInput) -> BackendResult<RawParagraph> {
        self.paragraph(input)
    }

    fn parse(&self, input: ParseInput, done: Completion<RawParagraph>) {
        deliver(self.delivery, done, self.paragraph(input));
    }

    fn parse_sentence_sync(&self, input: ParseInput) -> BackendResult<RawSentenceRef> {
        self.sentence(input)
    }

    fn parse_sentence(&self, input: ParseInput, done: Completion<RawSentenceRef>) {
        deliver(self.delivery, done, self.sentence(input));
    }
}

pub struct StubSplitter {
    pub calls: AtomicUsize,
    pub delivery: Delivery,
}

impl StubSplitter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            delivery: Delivery::Threaded,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SplitterBackend for StubSplitter {
    fn sentences_sync(&self, text: &str) -> BackendResult<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(split(text).into_iter().map(str::to_string).collect())
    }

    fn sentences(&self, text: String, done: Completion<Vec<String>>) {
        deliver(self.delivery, done, self.sentences_sync(&text));
    }
}

/// Dictionary with a fixed system part and a mutable user part
pub struct StubDictionary {
    pub calls: AtomicUsize,
    pub submissions: AtomicUsize,
    pub failure: Option<String>,
    pub delivery: Delivery,
    pub system: Vec<DictEntry>,
    pub user: Mutex<Vec<DictEntry>>,
}

impl StubDictionary {
    pub fn new() -> Arc<Self> {
        Self::build(None, Vec::new())
    }

    pub fn with_system(system: Vec<DictEntry>) -> Arc<Self> {
        Self::build(None, system)
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Self::build(Some(message.to_string()), Vec::new())
    }

    fn build(failure: Option<String>, system: Vec<DictEntry>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            submissions: AtomicUsize::new(0),
            failure,
            delivery: Delivery::Threaded,
            system,
            user: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn submissions(&self) -> usize {
        self.submissions.load(Ordering::SeqCst)
    }

    pub fn user_entries(&self) -> Vec<DictEntry> {
        self.user.lock().unwrap().clone()
    }

    fn check(&self) -> BackendResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(message) => Err(BackendError::new(message.clone())),
            None => Ok(()),
        }
    }

    fn known(&self, only_system: bool) -> Vec<DictEntry> {
        let mut known = self.system.clone();
        if !only_system {
            known.extend(self.user_entries());
        }
        known
    }
}

impl DictionaryBackend for StubDictionary {
    fn add_entries_sync(&self, entries: &[DictEntry]) -> BackendResult<()> {
        self.check()?;
        self.submissions.fetch_add(1, Ordering::SeqCst);
        self.user.lock().unwrap().extend(entries.iter().cloned());
        Ok(())
    }

    fn add_entries(&self, entries: Vec<DictEntry>, done: Completion<()>) {
        deliver(self.delivery, done, self.add_entries_sync(&entries));
    }

    fn contains_sync(&self, surface: &str, tags: &BTreeSet<Pos>) -> BackendResult<bool> {
        self.check()?;
        Ok(self
            .known(false)
            .iter()
            .any(|e| e.surface == surface && tags.contains(&e.tag)))
    }

    fn contains(&self, surface: String, tags: BTreeSet<Pos>, done: Completion<bool>) {
        deliver(self.delivery, done, self.contains_sync(&surface, &tags));
    }

    fn get_not_existing_sync(
        &self,
        only_system: bool,
        entries: &[DictEntry],
    ) -> BackendResult<Vec<(String, String)>> {
        self.check()?;
        let known = self.known(only_system);
        Ok(entries
            .iter()
            .filter(|e| !known.contains(e))
            .map(|e| (e.surface.clone(), e.tag.as_str().to_string()))
            .collect())
    }

    fn get_not_existing(
        &self,
        only_system: bool,
        entries: Vec<DictEntry>,
        done: Completion<Vec<(String, String)>>,
    ) {
        deliver(self.delivery, done, self.get_not_existing_sync(only_system, &entries));
    }

    fn items_sync(&self) -> BackendResult<Vec<DictEntry>> {
        self.check()?;
        Ok(self.user_entries())
    }

    fn items(&self, done: Completion<Vec<DictEntry>>) {
        deliver(self.delivery, done, self.items_sync());
    }

    fn base_entries_sync(&self, tags: &BTreeSet<Pos>) -> BackendResult<Vec<DictEntry>> {
        self.check()?;
        Ok(self
            .system
            .iter()
            .filter(|e| tags.contains(&e.tag))
            .cloned()
            .collect())
    }

    fn base_entries(&self, tags: BTreeSet<Pos>, done: Completion<Vec<DictEntry>>) {
        deliver(self.delivery, done, self.base_entries_sync(&tags));
    }
}

/// Context with `tagger` under every family and the other stubs under every
/// family the compatibility table allows
pub fn full_context(
    tagger: &Arc<StubTagger>,
    parser: &Arc<StubParser>,
    splitter: &Arc<StubSplitter>,
    dictionary: &Arc<StubDictionary>,
) -> Context {
    let mut builder = Context::builder();
    for family in Family::ALL {
        builder = builder
            .register_tagger(family, tagger.clone())
            .unwrap();
        if family.supports(morphlink_engine::Operation::Parsing) {
            builder = builder.register_parser(family, parser.clone()).unwrap();
        }
        if family.supports(morphlink_engine::Operation::SentenceSplitting) {
            builder = builder.register_splitter(family, splitter.clone()).unwrap();
        }
        if family.supports(morphlink_engine::Operation::Dictionary) {
            builder = builder
                .register_dictionary(family, dictionary.clone())
                .unwrap();
        }
    }
    builder.build()
}
