//! In-memory todo store for tests and single-process deployments.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
#[cfg(any(test, feature = "test-support"))]
use std::sync::Mutex;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[cfg(any(test, feature = "test-support"))]
use super::faults::FaultPlan;
use super::faults::StoreOperation;
use crate::todo::{
    domain::{
        AuditLog, Comment, CommentId, Issue, IssueId, IssueReference, ListKind, ListedReference,
        UserId,
    },
    ports::{
        AuditLedger, CommentLedger, IssueRegistry, ReferenceDirectory, StoreError, StoreResult,
    },
};

/// Thread-safe in-memory implementation of every todo storage port.
///
/// Each call takes the state lock once, so single-record operations are
/// atomic. Test builds and the `test-support` feature add hooks that script
/// failures per operation and inspect the stored state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoStore {
    state: Arc<RwLock<InMemoryTodoState>>,
    #[cfg(any(test, feature = "test-support"))]
    faults: Arc<Mutex<FaultPlan>>,
}

#[derive(Debug, Default)]
struct InMemoryTodoState {
    issues: HashMap<IssueId, Issue>,
    lists: HashMap<(UserId, ListKind), VecDeque<IssueReference>>,
    comments: Vec<Comment>,
    audit: Vec<AuditLog>,
}

impl InMemoryTodoState {
    fn entries(&self, user: &UserId, list: ListKind) -> Option<&VecDeque<IssueReference>> {
        self.lists.get(&(user.clone(), list))
    }

    fn entries_mut(&mut self, user: &UserId, list: ListKind) -> &mut VecDeque<IssueReference> {
        self.lists.entry((user.clone(), list)).or_default()
    }

    fn find(&self, user: &UserId, issue: IssueId, list: ListKind) -> Option<ListedReference> {
        self.entries(user, list)?
            .iter()
            .enumerate()
            .find(|(_, reference)| reference.issue() == issue)
            .map(|(position, reference)| ListedReference {
                list,
                reference: reference.clone(),
                position,
            })
    }
}

impl InMemoryTodoStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, InMemoryTodoState>> {
        self.state
            .read()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, InMemoryTodoState>> {
        self.state
            .write()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

#[cfg(not(any(test, feature = "test-support")))]
impl InMemoryTodoStore {
    #[expect(clippy::unused_self, reason = "failures are only scripted in test builds")]
    const fn check(&self, _op: StoreOperation) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
impl InMemoryTodoStore {
    /// Makes the call of `op` after `successes` successful calls fail once.
    pub fn fail_after(&self, op: StoreOperation, successes: usize) {
        if let Ok(mut plan) = self.faults.lock() {
            plan.schedule(op, successes, false);
        }
    }

    /// Makes every call of `op` fail until [`Self::clear_failures`].
    pub fn fail_always(&self, op: StoreOperation) {
        if let Ok(mut plan) = self.faults.lock() {
            plan.schedule(op, 0, true);
        }
    }

    /// Removes every scripted failure.
    pub fn clear_failures(&self) {
        if let Ok(mut plan) = self.faults.lock() {
            plan.clear();
        }
    }

    /// Returns every list holding `issue` for `user`.
    ///
    /// Lets callers check that an operation left no duplicate membership.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the state lock is poisoned.
    pub fn memberships(&self, user: &UserId, issue: IssueId) -> StoreResult<Vec<ListKind>> {
        let state = self.read()?;
        Ok(ListKind::ALL
            .into_iter()
            .filter(|list| state.find(user, issue, *list).is_some())
            .collect())
    }

    /// Returns the number of audit entries across all issues.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the state lock is poisoned.
    pub fn audit_entry_count(&self) -> StoreResult<usize> {
        Ok(self.read()?.audit.len())
    }

    fn check(&self, op: StoreOperation) -> StoreResult<()> {
        let mut plan = self.faults.lock().map_err(|err| {
            StoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        match plan.trip(op) {
            Some(fault) => Err(StoreError::persistence(fault)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl IssueRegistry for InMemoryTodoStore {
    async fn save_issue(&self, issue: &Issue) -> StoreResult<()> {
        self.check(StoreOperation::SaveIssue)?;
        let mut state = self.write()?;
        state.issues.insert(issue.id(), issue.clone());
        Ok(())
    }

    async fn issue(&self, id: IssueId) -> StoreResult<Issue> {
        self.check(StoreOperation::LoadIssue)?;
        let state = self.read()?;
        state
            .issues
            .get(&id)
            .cloned()
            .ok_or(StoreError::IssueNotFound(id))
    }

    async fn remove_issue(&self, id: IssueId) -> StoreResult<()> {
        self.check(StoreOperation::RemoveIssue)?;
        let mut state = self.write()?;
        state
            .issues
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::IssueNotFound(id))
    }

    async fn take_issue(&self, id: IssueId) -> StoreResult<Issue> {
        self.check(StoreOperation::TakeIssue)?;
        let mut state = self.write()?;
        state.issues.remove(&id).ok_or(StoreError::IssueNotFound(id))
    }
}

#[async_trait]
impl ReferenceDirectory for InMemoryTodoStore {
    async fn add_reference(
        &self,
        user: &UserId,
        list: ListKind,
        reference: IssueReference,
    ) -> StoreResult<()> {
        self.check(StoreOperation::AddReference)?;
        let mut state = self.write()?;
        let entries = state.entries_mut(user, list);
        if entries.iter().any(|entry| entry.issue() == reference.issue()) {
            return Err(StoreError::DuplicateReference {
                user: user.clone(),
                issue: reference.issue(),
                list,
            });
        }
        entries.push_front(reference);
        Ok(())
    }

    async fn remove_reference(
        &self,
        user: &UserId,
        issue: IssueId,
        list: ListKind,
    ) -> StoreResult<()> {
        self.check(StoreOperation::RemoveReference)?;
        let mut state = self.write()?;
        let entries = state.entries_mut(user, list);
        let position = entries
            .iter()
            .position(|entry| entry.issue() == issue)
            .ok_or_else(|| StoreError::ReferenceNotFound {
                user: user.clone(),
                issue,
                list,
            })?;
        entries.remove(position);
        Ok(())
    }

    async fn pop_reference(&self, user: &UserId, list: ListKind) -> StoreResult<IssueReference> {
        self.check(StoreOperation::PopReference)?;
        let mut state = self.write()?;
        state
            .entries_mut(user, list)
            .pop_front()
            .ok_or_else(|| StoreError::EmptyList {
                user: user.clone(),
                list,
            })
    }

    async fn bump_reference(
        &self,
        user: &UserId,
        issue: IssueId,
        list: ListKind,
    ) -> StoreResult<()> {
        self.check(StoreOperation::BumpReference)?;
        let mut state = self.write()?;
        let entries = state.entries_mut(user, list);
        let reference = entries
            .iter()
            .position(|entry| entry.issue() == issue)
            .and_then(|position| entries.remove(position))
            .ok_or_else(|| StoreError::ReferenceNotFound {
                user: user.clone(),
                issue,
                list,
            })?;
        entries.push_front(reference);
        Ok(())
    }

    async fn find_reference(
        &self,
        user: &UserId,
        issue: IssueId,
        list: ListKind,
    ) -> StoreResult<Option<ListedReference>> {
        self.check(StoreOperation::FindReference)?;
        let state = self.read()?;
        Ok(state.find(user, issue, list))
    }

    async fn locate_reference(
        &self,
        user: &UserId,
        issue: IssueId,
    ) -> StoreResult<Option<ListedReference>> {
        self.check(StoreOperation::FindReference)?;
        let state = self.read()?;
        Ok(ListKind::ALL
            .into_iter()
            .find_map(|list| state.find(user, issue, list)))
    }

    async fn list(&self, user: &UserId, list: ListKind) -> StoreResult<Vec<IssueReference>> {
        self.check(StoreOperation::List)?;
        let state = self.read()?;
        Ok(state
            .entries(user, list)
            .map(|entries| entries.iter().cloned().collect())
            .unwrap_or_default())
    }
}

#[async_trait]
impl AuditLedger for InMemoryTodoStore {
    async fn append_audit_log(&self, entry: &AuditLog) -> StoreResult<()> {
        self.check(StoreOperation::AppendAuditLog)?;
        let mut state = self.write()?;
        state.audit.push(entry.clone());
        Ok(())
    }

    async fn audit_logs(&self, issue: IssueId) -> StoreResult<Vec<AuditLog>> {
        let state = self.read()?;
        Ok(state
            .audit
            .iter()
            .rev()
            .filter(|entry| entry.issue == issue)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CommentLedger for InMemoryTodoStore {
    async fn save_comment(&self, comment: &Comment) -> StoreResult<()> {
        self.check(StoreOperation::SaveComment)?;
        let mut state = self.write()?;
        state.comments.push(comment.clone());
        Ok(())
    }

    async fn comments(&self, issue: IssueId) -> StoreResult<Vec<Comment>> {
        let state = self.read()?;
        Ok(state
            .comments
            .iter()
            .filter(|comment| comment.issue() == issue)
            .cloned()
            .collect())
    }

    async fn comment(&self, id: CommentId) -> StoreResult<Comment> {
        let state = self.read()?;
        state
            .comments
            .iter()
            .find(|comment| comment.id() == id)
            .cloned()
            .ok_or(StoreError::CommentNotFound(id))
    }

    async fn delete_comment(&self, id: CommentId) -> StoreResult<()> {
        self.check(StoreOperation::DeleteComment)?;
        let mut state = self.write()?;
        let position = state
            .comments
            .iter()
            .position(|comment| comment.id() == id)
            .ok_or(StoreError::CommentNotFound(id))?;
        state.comments.remove(position);
        Ok(())
    }
}
