//! Completion handles for asynchronous cases.
//!
//! The host hands a [`Done`] to every asynchronous case body. Calling it
//! signals that the case finished. `each_case` never times out or cancels a
//! pending handle; that is the host's business.

use std::{
    fmt,
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use futures::channel::oneshot;
use thiserror::Error;

/// Failure reported through a completion handle.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct Failure(String);

impl Failure {
    /// Wrap a failure message.
    pub fn new(message: impl Into<String>) -> Self { Self(message.into()) }

    /// The failure message.
    #[must_use]
    pub fn message(&self) -> &str { &self.0 }
}

/// Result of a finished case.
pub type Outcome = Result<(), Failure>;

type Callback = Box<dyn FnOnce(Outcome) + Send>;

/// Completion handle passed to asynchronous case bodies.
#[must_use = "an asynchronous case only finishes once its handle is called"]
pub struct Done(Callback);

impl Done {
    /// Wrap a host callback.
    pub fn new(callback: impl FnOnce(Outcome) + Send + 'static) -> Self { Self(Box::new(callback)) }

    /// Create a handle paired with a future resolving once it is called.
    ///
    /// ```
    /// use each_case::Done;
    ///
    /// let (done, completion) = Done::channel();
    /// done.complete();
    /// assert_eq!(futures::executor::block_on(completion), Ok(()));
    /// ```
    pub fn channel() -> (Self, Completion) {
        let (tx, rx) = oneshot::channel();
        let done = Self::new(move |outcome| {
            // The receiver may already be gone; nothing is waiting then.
            let _ = tx.send(outcome);
        });
        (done, Completion(Inner::Pending(rx)))
    }

    /// Signal success.
    pub fn complete(self) { (self.0)(Ok(())); }

    /// Signal failure.
    pub fn fail(self, message: impl Into<String>) { (self.0)(Err(Failure::new(message))); }

    /// Signal an arbitrary outcome.
    pub fn finish(self, outcome: Outcome) { (self.0)(outcome); }
}

impl fmt::Debug for Done {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str("Done") }
}

/// Future resolving to a case's [`Outcome`].
///
/// If the paired [`Done`] is dropped without being called the future
/// resolves to a failure.
#[must_use = "futures do nothing unless polled"]
#[derive(Debug)]
pub struct Completion(Inner);

#[derive(Debug)]
enum Inner {
    Ready(Option<Outcome>),
    Pending(oneshot::Receiver<Outcome>),
}

impl Completion {
    /// A completion that has already resolved.
    pub fn ready(outcome: Outcome) -> Self { Self(Inner::Ready(Some(outcome))) }
}

impl Future for Completion {
    type Output = Outcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.0 {
            Inner::Ready(outcome) => Poll::Ready(
                outcome
                    .take()
                    .unwrap_or_else(|| Err(Failure::new("completion polled after it resolved"))),
            ),
            Inner::Pending(rx) => Pin::new(rx).poll(cx).map(|received| {
                received.unwrap_or_else(|_| Err(Failure::new("completion handle dropped")))
            }),
        }
    }
}
