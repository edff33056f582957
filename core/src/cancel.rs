//! Cancellation tokens for in-flight requests.
//!
//! A handle starts `Active` and makes exactly one transition: to `Cancelled`
//! when a caller cancels it, or to `Settled` when the client finishes the
//! request it was attached to. Later transitions are ignored, so cancelling
//! after settlement does nothing and the first reason given is the one kept.

use std::sync::Arc;

use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelState {
    Active,
    Cancelled(String),
    Settled,
}

/// Clonable cancellation token. All clones observe the same state.
#[derive(Debug, Clone)]
pub struct CancellationHandle {
    state: Arc<watch::Sender<CancelState>>,
}

impl Default for CancellationHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationHandle {
    pub fn new() -> Self {
        let (state, _) = watch::channel(CancelState::Active);
        Self {
            state: Arc::new(state),
        }
    }

    /// Cancel with `reason`. Returns `false` if the handle already left the
    /// `Active` state.
    pub fn cancel(&self, reason: impl Into<String>) -> bool {
        let reason = reason.into();
        let cancelled = self.state.send_if_modified(|state| {
            if *state == CancelState::Active {
                *state = CancelState::Cancelled(reason);
                true
            } else {
                false
            }
        });
        if cancelled {
            tracing::debug!("cancellation requested");
        }
        cancelled
    }

    pub(crate) fn settle(&self) {
        self.state.send_if_modified(|state| {
            if *state == CancelState::Active {
                *state = CancelState::Settled;
                true
            } else {
                false
            }
        });
    }

    pub fn state(&self) -> CancelState {
        self.state.borrow().clone()
    }

    pub fn reason(&self) -> Option<String> {
        match &*self.state.borrow() {
            CancelState::Cancelled(reason) => Some(reason.clone()),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(*self.state.borrow(), CancelState::Cancelled(_))
    }

    /// Resolves with the reason once the handle is cancelled. Never resolves
    /// for a handle that settles first.
    pub async fn cancelled(&self) -> String {
        let mut rx = self.state.subscribe();
        loop {
            if let CancelState::Cancelled(reason) = &*rx.borrow_and_update() {
                return reason.clone();
            }
            if rx.changed().await.is_err() {
                return std::future::pending().await;
            }
        }
    }
}
