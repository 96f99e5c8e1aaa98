//! List membership types.

use super::{ForeignLink, IssueId, ParseListKindError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three per-user lists an issue reference can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    /// Items the user is responsible for.
    Own,
    /// Items sent to the user that await accept or decline.
    Incoming,
    /// Items the user sent that await the receiver.
    Outgoing,
}

impl ListKind {
    /// Every list, in the order lookups search them.
    pub const ALL: [Self; 3] = [Self::Incoming, Self::Own, Self::Outgoing];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Own => "own",
            Self::Incoming => "incoming",
            Self::Outgoing => "outgoing",
        }
    }
}

impl TryFrom<&str> for ListKind {
    type Error = ParseListKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "own" => Ok(Self::Own),
            "incoming" => Ok(Self::Incoming),
            "outgoing" => Ok(Self::Outgoing),
            _ => Err(ParseListKindError(value.to_owned())),
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Membership pointer placing an issue in one of a user's lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueReference {
    issue: IssueId,
    foreign: Option<ForeignLink>,
}

impl IssueReference {
    /// Creates a reference with no mirror.
    #[must_use]
    pub const fn local(issue: IssueId) -> Self {
        Self {
            issue,
            foreign: None,
        }
    }

    /// Creates a reference pointing at the mirror record described by `foreign`.
    #[must_use]
    pub const fn linked(issue: IssueId, foreign: ForeignLink) -> Self {
        Self {
            issue,
            foreign: Some(foreign),
        }
    }

    /// Creates a reference with an optional mirror.
    #[must_use]
    pub const fn new(issue: IssueId, foreign: Option<ForeignLink>) -> Self {
        Self { issue, foreign }
    }

    /// Returns the referenced issue.
    #[must_use]
    pub const fn issue(&self) -> IssueId {
        self.issue
    }

    /// Returns the mirror link, if any.
    #[must_use]
    pub const fn foreign(&self) -> Option<&ForeignLink> {
        self.foreign.as_ref()
    }
}

/// A reference together with the list holding it and its zero-based position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListedReference {
    /// List containing the reference.
    pub list: ListKind,
    /// The reference itself.
    pub reference: IssueReference,
    /// Zero-based position, front first.
    pub position: usize,
}

impl ListedReference {
    /// Returns the mirror link, if any.
    #[must_use]
    pub const fn foreign(&self) -> Option<&ForeignLink> {
        self.reference.foreign()
    }
}
