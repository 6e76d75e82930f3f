//! Dual-mode invocation
//!
//! One [`Invocation`] describes a single backend call: how to make it
//! blocking, how to make it non-blocking, and how to turn the raw result into
//! model values. Front-ends pick the mode by calling [`Invocation::wait`],
//! [`Invocation::then`] or [`Invocation::into_future`], so both modes share
//! the same backend selection and the same materializer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use futures::channel::oneshot;
use futures::future::BoxFuture;
use log::{debug, warn};
use morphlink_core::{materialize_paragraph, materialize_sentence, RawParagraph, RawSentenceRef, Sentence};

use crate::backend::Completion;
use crate::error::{BackendError, BackendResult, EngineError, Result};

/// Callback receiving the outcome of a non-blocking call
///
/// Results are always delivered as a sequence, even for operations whose
/// blocking form returns a single value.
pub type Callback<T> = Box<dyn FnOnce(Result<Vec<T>>) + Send + 'static>;

/// Values an operation can deliver to a [`Callback`]
pub trait Batch: Send + 'static {
    /// Element of the delivered sequence
    type Item: Send + 'static;

    /// Convert into the delivered sequence
    fn into_batch(self) -> Vec<Self::Item>;
}

impl<T: Send + 'static> Batch for Vec<T> {
    type Item = T;

    fn into_batch(self) -> Vec<T> {
        self
    }
}

impl Batch for Sentence {
    type Item = Sentence;

    fn into_batch(self) -> Vec<Sentence> {
        vec![self]
    }
}

impl Batch for bool {
    type Item = bool;

    fn into_batch(self) -> Vec<bool> {
        vec![self]
    }
}

impl Batch for usize {
    type Item = usize;

    fn into_batch(self) -> Vec<usize> {
        vec![self]
    }
}

impl Batch for () {
    type Item = ();

    fn into_batch(self) -> Vec<()> {
        Vec::new()
    }
}

type Blocking<'a, R> = Box<dyn FnOnce() -> BackendResult<R> + 'a>;
type Deferred<'a, R> = Box<dyn FnOnce(Completion<R>) + 'a>;

/// A backend call not yet issued
pub(crate) struct Invocation<'a, R, V> {
    operation: &'static str,
    blocking: Blocking<'a, R>,
    deferred: Deferred<'a, R>,
    materialize: fn(R) -> Result<V>,
}

impl<'a, R, V> Invocation<'a, R, V>
where
    R: Send + 'static,
    V: Batch,
{
    pub(crate) fn new(
        operation: &'static str,
        blocking: impl FnOnce() -> BackendResult<R> + 'a,
        deferred: impl FnOnce(Completion<R>) + 'a,
        materialize: fn(R) -> Result<V>,
    ) -> Self {
        Self {
            operation,
            blocking: Box::new(blocking),
            deferred: Box::new(deferred),
            materialize,
        }
    }

    /// Issue the blocking form and materialize its result
    pub(crate) fn wait(self) -> Result<V> {
        debug!("{}: blocking call", self.operation);
        let raw = (self.blocking)()?;
        (self.materialize)(raw)
    }

    /// Issue the non-blocking form; `callback` receives the outcome exactly once
    ///
    /// The callback never runs before this method returns. A backend that
    /// completes inline has its delivery handed to a fresh thread. A backend
    /// that drops its completion still yields a backend error.
    pub(crate) fn then(self, callback: Callback<V::Item>) {
        let operation = self.operation;
        let materialize = self.materialize;
        let returned = Arc::new(AtomicBool::new(false));
        let observed = Arc::clone(&returned);

        debug!("{operation}: non-blocking call");
        let completion: Completion<R> = Box::new(move |outcome: BackendResult<R>| {
            let delivered = outcome
                .map_err(EngineError::from)
                .and_then(materialize)
                .map(Batch::into_batch);
            if observed.load(Ordering::Acquire) {
                callback(delivered);
            } else {
                warn!("{operation}: backend completed before the call returned, deferring delivery");
                thread::spawn(move || callback(delivered));
            }
        });
        (self.deferred)(guarded(operation, completion));
        returned.store(true, Ordering::Release);
    }

    /// Issue the non-blocking form now and return a future of the outcome
    pub(crate) fn into_future(self) -> BoxFuture<'static, Result<V>> {
        let operation = self.operation;
        let materialize = self.materialize;
        let (tx, rx) = oneshot::channel();

        debug!("{operation}: non-blocking call");
        (self.deferred)(Box::new(move |outcome: BackendResult<R>| {
            // The receiver may already be gone; nothing to deliver to then
            let _ = tx.send(outcome);
        }));

        Box::pin(async move {
            let raw = match rx.await {
                Ok(Ok(raw)) => raw,
                Ok(Err(err)) => return Err(EngineError::from(err)),
                Err(oneshot::Canceled) => {
                    return Err(EngineError::from(BackendError::new(format!(
                        "{operation}: completion dropped without a result"
                    ))))
                }
            };
            materialize(raw)
        })
    }
}

/// Completion that reports a failure if dropped without being called
struct DeliverOnce<T> {
    operation: &'static str,
    done: Option<Completion<T>>,
}

impl<T> DeliverOnce<T> {
    fn deliver(mut self, outcome: BackendResult<T>) {
        if let Some(done) = self.done.take() {
            done(outcome);
        }
    }
}

impl<T> Drop for DeliverOnce<T> {
    fn drop(&mut self) {
        if let Some(done) = self.done.take() {
            warn!("{}: backend dropped its completion", self.operation);
            done(Err(BackendError::new(format!(
                "{}: completion dropped without a result",
                self.operation
            ))));
        }
    }
}

/// Wrap `done` so a backend that never calls it still produces an outcome
pub(crate) fn guarded<T: Send + 'static>(
    operation: &'static str,
    done: Completion<T>,
) -> Completion<T> {
    let once = DeliverOnce {
        operation,
        done: Some(done),
    };
    Box::new(move |outcome| once.deliver(outcome))
}

/// Compose two non-blocking stages
///
/// A failure in `first` goes straight to the outer completion and `second`
/// is never issued. Otherwise `second` is issued with the raw output of
/// `first`, from within `first`'s completion. A stage that drops its
/// completion fails the whole chain.
pub(crate) fn chain<A, R>(
    operation: &'static str,
    first: impl FnOnce(Completion<A>),
    second: impl FnOnce(A, Completion<R>) + Send + 'static,
) -> impl FnOnce(Completion<R>)
where
    A: Send + 'static,
    R: Send + 'static,
{
    move |done: Completion<R>| {
        let done = guarded(operation, done);
        first(guarded::<A>(
            operation,
            Box::new(move |outcome: BackendResult<A>| match outcome {
                Ok(intermediate) => second(intermediate, done),
                Err(err) => done(Err(err)),
            }),
        ))
    }
}

pub(crate) fn paragraph(raw: RawParagraph) -> Result<Vec<Sentence>> {
    Ok(materialize_paragraph(&raw)?)
}

pub(crate) fn sentence(raw: RawSentenceRef) -> Result<Sentence> {
    Ok(materialize_sentence(&raw)?)
}

pub(crate) fn unchanged<T>(raw: T) -> Result<T> {
    Ok(raw)
}
