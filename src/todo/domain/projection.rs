//! Display projections handed to the presentation layer.

use super::{Comment, Issue, ListKind};
use serde::{Deserialize, Serialize};

/// An issue enriched with where its mirror currently sits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedIssue {
    /// The issue as stored.
    #[serde(flatten)]
    pub issue: Issue,
    /// Display name of the user on the other side, if shared.
    pub foreign_user: Option<String>,
    /// List holding the mirror on the other side, if it is still listed.
    pub foreign_list: Option<ListKind>,
    /// Position of the mirror in that list.
    pub foreign_position: Option<usize>,
}

impl ExtendedIssue {
    /// Wraps an issue with no mirror information.
    #[must_use]
    pub const fn unshared(issue: Issue) -> Self {
        Self {
            issue,
            foreign_user: None,
            foreign_list: None,
            foreign_position: None,
        }
    }
}

/// The three lists of one user, ready for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListsIssue {
    /// Incoming list, front first.
    pub incoming: Vec<ExtendedIssue>,
    /// Own list, front first.
    pub own: Vec<ExtendedIssue>,
    /// Outgoing list, front first.
    pub outgoing: Vec<ExtendedIssue>,
}

/// A comment together with its author's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedComment {
    /// The comment as stored.
    #[serde(flatten)]
    pub comment: Comment,
    /// Display name of the author.
    pub user_name: String,
}
