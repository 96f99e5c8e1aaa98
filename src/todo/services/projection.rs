//! Read-side projections of a user's lists.

use mockable::Clock;
use tracing::{debug, instrument, warn};

use super::{ListSyncResult, ListSyncService};
use crate::todo::{
    domain::{ExtendedIssue, Issue, ListKind, ListsIssue, UserId},
    ports::{TodoStore, UserDirectory},
};

/// Name shown when the directory cannot resolve a user.
pub const UNKNOWN_USER_NAME: &str = "Someone";

impl<S, U, C> ListSyncService<S, U, C>
where
    S: TodoStore,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Returns the issues of one list, front first, with mirror details.
    ///
    /// References whose issue record has gone missing are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`super::ListSyncError::Store`] for any storage failure other
    /// than a missing issue record.
    #[instrument(skip_all, fields(user = %user, list = %list))]
    pub async fn issue_list(
        &self,
        user: &UserId,
        list: ListKind,
    ) -> ListSyncResult<Vec<ExtendedIssue>> {
        let references = self.store.list(user, list).await?;
        let mut issues = Vec::with_capacity(references.len());
        for reference in references {
            let issue = match self.store.issue(reference.issue()).await {
                Ok(issue) => issue,
                Err(err) if err.is_not_found() => {
                    debug!(issue = %reference.issue(), "listed issue has no record, skipping");
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            issues.push(self.extend(issue).await?);
        }
        Ok(issues)
    }

    /// Returns all three lists of the user.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Self::issue_list`].
    pub async fn all_lists(&self, user: &UserId) -> ListSyncResult<ListsIssue> {
        Ok(ListsIssue {
            incoming: self.issue_list(user, ListKind::Incoming).await?,
            own: self.issue_list(user, ListKind::Own).await?,
            outgoing: self.issue_list(user, ListKind::Outgoing).await?,
        })
    }

    async fn extend(&self, issue: Issue) -> ListSyncResult<ExtendedIssue> {
        let Some(link) = issue.foreign().cloned() else {
            return Ok(ExtendedIssue::unshared(issue));
        };
        let foreign_user = Some(self.display_name(link.user()).await);
        let listed = self
            .store
            .locate_reference(link.user(), link.issue())
            .await?;
        Ok(ExtendedIssue {
            issue,
            foreign_user,
            foreign_list: listed.as_ref().map(|found| found.list),
            foreign_position: listed.map(|found| found.position),
        })
    }

    pub(super) async fn display_name(&self, user: &UserId) -> String {
        match self.users.display_name(user).await {
            Ok(name) => name,
            Err(err) => {
                warn!(%user, error = %err, "cannot resolve display name");
                UNKNOWN_USER_NAME.to_owned()
            }
        }
    }
}
