//! Ordered storage steps with compensating rollback.
//!
//! No transaction spans the records a list operation touches. Each applied
//! step registers the action that undoes it; when a later step fails the
//! undo actions run newest first. Every undo is attempted even when an
//! earlier one fails, and undo failures are logged rather than returned so
//! the caller still sees the error that started the rollback.

use std::future::Future;
use std::pin::Pin;

use tracing::{error, warn};

use crate::todo::ports::StoreResult;

/// Boxed undo action. Nothing runs until the rollback awaits it.
pub(crate) type Undo<'a> = Pin<Box<dyn Future<Output = StoreResult<()>> + Send + 'a>>;

/// Undo stack for one multi-step operation.
pub(crate) struct Saga<'a> {
    operation: &'static str,
    undo: Vec<(&'static str, Undo<'a>)>,
}

impl<'a> Saga<'a> {
    pub(crate) const fn new(operation: &'static str) -> Self {
        Self {
            operation,
            undo: Vec::new(),
        }
    }

    /// Registers the action undoing the step that just succeeded.
    pub(crate) fn on_rollback(&mut self, label: &'static str, undo: Undo<'a>) {
        self.undo.push((label, undo));
    }

    /// Runs a forward step, rolling back every registered step if it fails.
    pub(crate) async fn step<T>(
        &mut self,
        label: &'static str,
        forward: impl Future<Output = StoreResult<T>> + Send,
    ) -> StoreResult<T> {
        match forward.await {
            Ok(value) => Ok(value),
            Err(err) => {
                warn!(
                    operation = self.operation,
                    step = label,
                    error = %err,
                    "step failed, rolling back"
                );
                self.rollback().await;
                Err(err)
            }
        }
    }

    /// Runs every registered undo action, newest first.
    ///
    /// Returns the number of undo actions that failed.
    pub(crate) async fn rollback(&mut self) -> usize {
        let steps = std::mem::take(&mut self.undo);
        let mut failed = 0;
        for (label, undo) in steps.into_iter().rev() {
            if let Err(err) = undo.await {
                failed += 1;
                warn!(
                    operation = self.operation,
                    undo = label,
                    error = %err,
                    "compensation failed"
                );
            }
        }
        if failed > 0 {
            error!(
                operation = self.operation,
                failed, "rollback incomplete, records may be inconsistent"
            );
        }
        failed
    }

    /// Ends the saga, discarding the undo actions.
    pub(crate) fn commit(self) {
        drop(self.undo);
    }
}
