//! One-shot completion signal returned by mode switches.

use std::future::Future;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

use futures::channel::oneshot;
use futures::future::FusedFuture;
use futures::FutureExt;

use crate::error::SwitchError;

/// Outcome of a mode switch.
pub type SwitchResult = Result<(), SwitchError>;

/// Resolves once the new screen has been shown.
///
/// For a faded switch that is when the settle delay has elapsed and the
/// core switch ran, before the overlay fades back out. Resolves with
/// [`SwitchError::Abandoned`] if the orchestrator is dropped first.
///
/// The outcome is settled by the first `Ready`; polling again returns the
/// same result.
#[derive(Debug)]
pub struct SwitchCompletion {
    rx: oneshot::Receiver<SwitchResult>,
    result: Option<SwitchResult>,
}

impl SwitchCompletion {
    /// Create a completion together with the resolver that fires it.
    pub(crate) fn pending() -> (Resolver, SwitchCompletion) {
        let (tx, rx) = oneshot::channel();
        (Resolver { tx }, SwitchCompletion { rx, result: None })
    }

    /// A completion that has already resolved with `result`.
    pub(crate) fn ready(result: SwitchResult) -> SwitchCompletion {
        let (resolver, completion) = SwitchCompletion::pending();
        resolver.resolve(result);
        completion
    }
}

impl Future for SwitchCompletion {
    type Output = SwitchResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if let Some(result) = &self.result {
            return Poll::Ready(result.clone());
        }
        let result = ready!(self.rx.poll_unpin(cx)).unwrap_or(Err(SwitchError::Abandoned));
        self.result = Some(result.clone());
        Poll::Ready(result)
    }
}

impl FusedFuture for SwitchCompletion {
    fn is_terminated(&self) -> bool {
        self.result.is_some()
    }
}

/// Sending half of a [`SwitchCompletion`]. Consumed on use, so a switch
/// can resolve at most once.
#[derive(Debug)]
pub(crate) struct Resolver {
    tx: oneshot::Sender<SwitchResult>,
}

impl Resolver {
    pub(crate) fn resolve(self, result: SwitchResult) {
        // The caller may have dropped its completion; nobody is waiting then.
        let _ = self.tx.send(result);
    }
}
