//! Results of list operations.
//!
//! Every mutating operation reports enough for the caller to notify the
//! other party and refresh the right lists. The services never notify anyone
//! themselves.

use crate::todo::domain::{Issue, ListKind, UserId};

/// Result of sending an issue to another user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOutcome {
    /// Issue held in the sender's outgoing list.
    pub sender_issue: Issue,
    /// Mirror held in the receiver's incoming list.
    pub receiver_issue: Issue,
}

/// Result of accepting an incoming issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptOutcome {
    /// The accepted issue, now in the own list.
    pub issue: Issue,
    /// The original sender, if the issue is still linked.
    pub foreign_user: Option<UserId>,
}

/// Result of completing an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOutcome {
    /// The completed issue.
    pub issue: Issue,
    /// List the issue was removed from.
    pub list: ListKind,
    /// User on the other side, if shared.
    pub foreign_user: Option<UserId>,
    /// List the mirror was removed from, if it was found.
    pub foreign_list: Option<ListKind>,
}

/// Result of removing or declining an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalOutcome {
    /// The removed issue.
    pub issue: Issue,
    /// List the issue was removed from.
    pub list: ListKind,
    /// User on the other side, if shared.
    pub foreign_user: Option<UserId>,
    /// List the mirror was removed from, if it was found.
    pub foreign_list: Option<ListKind>,
    /// Whether the remover sent the issue. `false` means a decline or a
    /// removal by the receiver.
    pub is_sender: bool,
}

/// Result of editing an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// The edited issue.
    pub issue: Issue,
    /// Message before the edit.
    pub previous_message: String,
    /// User on the other side, if shared.
    pub foreign_user: Option<UserId>,
    /// List of the editing user holding the issue, if any.
    pub list: Option<ListKind>,
}

/// Result of reassigning an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReassignOutcome {
    /// The acting user's issue after reassignment.
    pub issue: Issue,
    /// Receiver of the torn-down mirror, if there was one.
    pub previous_foreign_user: Option<UserId>,
    /// Fresh mirror for the new receiver. `None` when the issue was
    /// reclaimed or left in place.
    pub receiver_issue: Option<Issue>,
}

/// Result of popping the front of the own list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopOutcome {
    /// The completed issue.
    pub issue: Issue,
    /// User on the other side, if shared.
    pub foreign_user: Option<UserId>,
}

/// Result of bumping an outgoing issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpOutcome {
    /// The receiver's mirror, now at the front of their incoming list.
    pub foreign_issue: Issue,
    /// The receiver.
    pub foreign_user: UserId,
}
