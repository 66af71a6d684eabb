//! Form submission lifecycle.
//!
//! A form is `Idle` until submitted. Submitting disables every registered
//! control, runs the caller's async handler on a tokio task and marks the
//! form `Pending`. The handler's result comes back over a oneshot channel;
//! once it is picked up each control gets back the disabled flag it had
//! before, and the form is `Idle` again, remembering how the last submission
//! ended.

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio::sync::oneshot;

use crate::widgets::{Button, Command, Input, Select};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The handler returned an error.
    #[error("{0}")]
    Failed(String),
    /// The handler task ended without reporting back.
    #[error("submission was interrupted")]
    Interrupted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitState {
    #[default]
    Idle,
    Pending,
}

/// A control the form can lock while a submission is in flight.
pub trait Disable: Send + Sync {
    fn is_disabled(&self) -> bool;
    fn set_disabled(&self, disabled: bool);
}

impl Disable for Input {
    fn is_disabled(&self) -> bool {
        Input::is_disabled(self)
    }

    fn set_disabled(&self, disabled: bool) {
        Input::set_disabled(self, disabled)
    }
}

impl Disable for Select {
    fn is_disabled(&self) -> bool {
        Select::is_disabled(self)
    }

    fn set_disabled(&self, disabled: bool) {
        Select::set_disabled(self, disabled)
    }
}

impl Disable for Button {
    fn is_disabled(&self) -> bool {
        Button::is_disabled(self)
    }

    fn set_disabled(&self, disabled: bool) {
        Button::set_disabled(self, disabled)
    }
}

impl Disable for Command {
    fn is_disabled(&self) -> bool {
        Command::is_disabled(self)
    }

    fn set_disabled(&self, disabled: bool) {
        Command::set_disabled(self, disabled)
    }
}

#[derive(Default)]
struct FormInner {
    controls: Vec<Box<dyn Disable>>,
    /// Each control's disabled flag from before the pending submission.
    restore: Vec<bool>,
    in_flight: bool,
    pending: Option<oneshot::Receiver<Result<(), SubmitError>>>,
    outcome: Option<Result<(), SubmitError>>,
}

#[derive(Clone, Default)]
pub struct Form {
    inner: Arc<Mutex<FormInner>>,
    dirty: Arc<AtomicBool>,
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("state", &self.state())
            .field("outcome", &self.outcome())
            .finish_non_exhaustive()
    }
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a control to lock while pending.
    pub fn register(&self, control: impl Disable + 'static) {
        if let Ok(mut guard) = self.inner.lock() {
            guard.controls.push(Box::new(control));
        }
    }

    pub fn state(&self) -> SubmitState {
        match self.inner.lock() {
            Ok(guard) if guard.in_flight => SubmitState::Pending,
            _ => SubmitState::Idle,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state() == SubmitState::Pending
    }

    /// How the last settled submission ended.
    pub fn outcome(&self) -> Option<Result<(), SubmitError>> {
        self.inner
            .lock()
            .ok()
            .and_then(|guard| guard.outcome.clone())
    }

    /// Error message of the last submission, for display.
    pub fn error_message(&self) -> Option<String> {
        match self.outcome() {
            Some(Err(err)) => Some(err.to_string()),
            _ => None,
        }
    }

    /// Start a submission. Returns false, doing nothing, when one is already
    /// pending. Must be called within a tokio runtime.
    pub fn submit<Fut, E>(&self, handler: Fut) -> bool
    where
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: fmt::Display,
    {
        let Ok(mut guard) = self.inner.lock() else {
            return false;
        };
        if guard.in_flight {
            log::warn!("form submitted while a submission is pending");
            return false;
        }

        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let result = handler
                .await
                .map_err(|err| SubmitError::Failed(err.to_string()));
            let _ = tx.send(result);
        });

        log::info!("form submission started");
        guard.in_flight = true;
        guard.pending = Some(rx);
        guard.outcome = None;
        let restore = guard
            .controls
            .iter()
            .map(|control| {
                let was_disabled = control.is_disabled();
                control.set_disabled(true);
                was_disabled
            })
            .collect();
        guard.restore = restore;
        self.dirty.store(true, Ordering::SeqCst);
        true
    }

    /// Pick up the result if the handler has finished. Call from the UI loop.
    pub fn try_settle(&self) -> Option<Result<(), SubmitError>> {
        let mut guard = self.inner.lock().ok()?;
        let rx = guard.pending.as_mut()?;
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(oneshot::error::TryRecvError::Empty) => return None,
            Err(oneshot::error::TryRecvError::Closed) => Err(SubmitError::Interrupted),
        };
        Some(self.settle(&mut guard, result))
    }

    /// Wait for the pending submission to finish. `None` when idle.
    pub async fn wait(&self) -> Option<Result<(), SubmitError>> {
        let rx = self.inner.lock().ok()?.pending.take()?;
        let result = rx.await.unwrap_or(Err(SubmitError::Interrupted));
        let mut guard = self.inner.lock().ok()?;
        Some(self.settle(&mut guard, result))
    }

    fn settle(
        &self,
        guard: &mut FormInner,
        result: Result<(), SubmitError>,
    ) -> Result<(), SubmitError> {
        match &result {
            Ok(()) => log::info!("form submission succeeded"),
            Err(err) => log::warn!("form submission failed: {err}"),
        }
        guard.in_flight = false;
        guard.pending = None;
        guard.outcome = Some(result.clone());
        let restore = std::mem::take(&mut guard.restore);
        for (control, was_disabled) in guard.controls.iter().zip(restore) {
            control.set_disabled(was_disabled);
        }
        self.dirty.store(true, Ordering::SeqCst);
        result
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}
