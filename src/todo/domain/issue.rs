//! Issue aggregate and related lifecycle types.

use super::{IssueId, ParseIssueStatusError, TodoDomainError, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Issue lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    /// Issue is owned and actionable.
    Open,
    /// Issue is part of an unanswered hand-off.
    Pending,
    /// Issue has been finished.
    Completed,
    /// Issue has been removed or declined.
    Removed,
}

impl IssueStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Removed => "removed",
        }
    }

    /// Returns whether the status is terminal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Removed)
    }
}

impl TryFrom<&str> for IssueStatus {
    type Error = ParseIssueStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "open" => Ok(Self::Open),
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "removed" => Ok(Self::Removed),
            _ => Err(ParseIssueStatusError(value.to_owned())),
        }
    }
}

/// Ordinal priority of an issue. Higher values are more urgent.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Priority(u8);

impl Priority {
    /// Creates a priority from its ordinal value.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Returns the ordinal value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Link from an issue to its mirror record on another user's side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForeignLink {
    user: UserId,
    issue: IssueId,
}

impl ForeignLink {
    /// Creates a link to `issue` owned by `user`.
    #[must_use]
    pub const fn new(user: UserId, issue: IssueId) -> Self {
        Self { user, issue }
    }

    /// Returns the user owning the mirror record.
    #[must_use]
    pub const fn user(&self) -> &UserId {
        &self.user
    }

    /// Returns the mirror issue identifier.
    #[must_use]
    pub const fn issue(&self) -> IssueId {
        self.issue
    }
}

/// User-editable content of an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueFields {
    message: String,
    description: Option<String>,
    permalink: Option<String>,
    due_at: Option<DateTime<Utc>>,
    priority: Priority,
}

impl IssueFields {
    /// Creates fields with a validated message.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::EmptyMessage`] when the message is blank.
    pub fn new(message: impl Into<String>) -> Result<Self, TodoDomainError> {
        let raw = message.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TodoDomainError::EmptyMessage);
        }
        Ok(Self {
            message: trimmed.to_owned(),
            description: None,
            permalink: None,
            due_at: None,
            priority: Priority::default(),
        })
    }

    /// Sets the long-form description. Blank descriptions are dropped.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = non_blank(description.into());
        self
    }

    /// Sets the permalink to the originating conversation.
    #[must_use]
    pub fn with_permalink(mut self, permalink: impl Into<String>) -> Self {
        self.permalink = non_blank(permalink.into());
        self
    }

    /// Sets the due timestamp.
    #[must_use]
    pub const fn with_due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the permalink, if any.
    #[must_use]
    pub fn permalink(&self) -> Option<&str> {
        self.permalink.as_deref()
    }

    /// Returns the due timestamp, if any.
    #[must_use]
    pub const fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_at
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Issue aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    id: IssueId,
    fields: IssueFields,
    creator: UserId,
    assignee: UserId,
    foreign: Option<ForeignLink>,
    status: IssueStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedIssueData {
    /// Persisted issue identifier.
    pub id: IssueId,
    /// Persisted content.
    pub fields: IssueFields,
    /// Persisted creator.
    pub creator: UserId,
    /// Persisted assignee.
    pub assignee: UserId,
    /// Persisted mirror link, if any.
    pub foreign: Option<ForeignLink>,
    /// Persisted status.
    pub status: IssueStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    /// Creates an open issue owned by `owner`.
    #[must_use]
    pub fn new_owned(owner: UserId, fields: IssueFields, clock: &impl Clock) -> Self {
        Self::new(owner.clone(), owner, fields, IssueStatus::Open, clock)
    }

    /// Creates a pending issue for a hand-off from `sender` to `receiver`.
    ///
    /// The foreign link is attached separately once the mirror exists.
    #[must_use]
    pub fn new_pending(
        sender: UserId,
        receiver: UserId,
        fields: IssueFields,
        clock: &impl Clock,
    ) -> Self {
        Self::new(sender, receiver, fields, IssueStatus::Pending, clock)
    }

    fn new(
        creator: UserId,
        assignee: UserId,
        fields: IssueFields,
        status: IssueStatus,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: IssueId::new(),
            fields,
            creator,
            assignee,
            foreign: None,
            status,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs an issue from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedIssueData) -> Self {
        Self {
            id: data.id,
            fields: data.fields,
            creator: data.creator,
            assignee: data.assignee,
            foreign: data.foreign,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the issue identifier.
    #[must_use]
    pub const fn id(&self) -> IssueId {
        self.id
    }

    /// Returns the issue content.
    #[must_use]
    pub const fn fields(&self) -> &IssueFields {
        &self.fields
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.fields.message()
    }

    /// Returns the creator.
    #[must_use]
    pub const fn creator(&self) -> &UserId {
        &self.creator
    }

    /// Returns the current assignee.
    #[must_use]
    pub const fn assignee(&self) -> &UserId {
        &self.assignee
    }

    /// Returns the link to the mirror record, if any.
    #[must_use]
    pub const fn foreign(&self) -> Option<&ForeignLink> {
        self.foreign.as_ref()
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> IssueStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether `user` created or is assigned this issue.
    #[must_use]
    pub fn involves(&self, user: &UserId) -> bool {
        &self.creator == user || &self.assignee == user
    }

    /// Attaches the link to the mirror record without touching timestamps.
    ///
    /// Used while both sides of a fresh hand-off are being built.
    pub fn link_foreign(&mut self, link: ForeignLink) {
        self.foreign = Some(link);
    }

    /// Moves the issue to `status`.
    pub fn transition_to(&mut self, status: IssueStatus, clock: &impl Clock) {
        self.status = status;
        self.touch(clock);
    }

    /// Replaces message, description, due time and priority.
    ///
    /// The permalink is kept; it records where the issue came from.
    pub fn apply_edit(&mut self, edit: &IssueFields, clock: &impl Clock) {
        let permalink = self.fields.permalink.take();
        self.fields = IssueFields {
            permalink,
            ..edit.clone()
        };
        self.touch(clock);
    }

    /// Hands the issue to `assignee`, pairing it with `foreign`.
    pub fn reassign(
        &mut self,
        assignee: UserId,
        foreign: Option<ForeignLink>,
        status: IssueStatus,
        clock: &impl Clock,
    ) {
        self.assignee = assignee;
        self.foreign = foreign;
        self.status = status;
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc().max(self.updated_at);
    }
}
