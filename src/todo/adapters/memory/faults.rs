//! Scripted storage failures for exercising compensation paths.

#[cfg(any(test, feature = "test-support"))]
use std::collections::HashMap;
#[cfg(any(test, feature = "test-support"))]
use thiserror::Error;

/// Storage calls of [`super::InMemoryTodoStore`] that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    /// `IssueRegistry::save_issue`.
    SaveIssue,
    /// `IssueRegistry::issue`.
    LoadIssue,
    /// `IssueRegistry::remove_issue`.
    RemoveIssue,
    /// `IssueRegistry::take_issue`.
    TakeIssue,
    /// `ReferenceDirectory::add_reference`.
    AddReference,
    /// `ReferenceDirectory::remove_reference`.
    RemoveReference,
    /// `ReferenceDirectory::pop_reference`.
    PopReference,
    /// `ReferenceDirectory::bump_reference`.
    BumpReference,
    /// `ReferenceDirectory::find_reference` and `locate_reference`.
    FindReference,
    /// `ReferenceDirectory::list`.
    List,
    /// `AuditLedger::append_audit_log`.
    AppendAuditLog,
    /// `CommentLedger::save_comment`.
    SaveComment,
    /// `CommentLedger::delete_comment`.
    DeleteComment,
}

/// Error produced by an injected failure.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("injected failure in {0:?}")]
pub struct InjectedFault(pub StoreOperation);

#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone, Copy)]
struct Fault {
    successes_left: usize,
    persistent: bool,
}

/// Per-operation failure schedule.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub(super) struct FaultPlan {
    faults: HashMap<StoreOperation, Fault>,
}

#[cfg(any(test, feature = "test-support"))]
impl FaultPlan {
    pub(super) fn schedule(&mut self, op: StoreOperation, successes: usize, persistent: bool) {
        self.faults.insert(
            op,
            Fault {
                successes_left: successes,
                persistent,
            },
        );
    }

    pub(super) fn clear(&mut self) {
        self.faults.clear();
    }

    /// Consumes one call of `op`, returning the fault if this call must fail.
    pub(super) fn trip(&mut self, op: StoreOperation) -> Option<InjectedFault> {
        let fault = self.faults.get_mut(&op)?;
        if fault.successes_left > 0 {
            fault.successes_left -= 1;
            return None;
        }
        if !fault.persistent {
            self.faults.remove(&op);
        }
        Some(InjectedFault(op))
    }
}
