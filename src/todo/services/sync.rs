//! List synchronisation engine.
//!
//! Every operation here is a chain of single-record storage calls. Steps
//! that must stay paired run under a [`Saga`] so a failure part way restores
//! the records already touched. Updates to the other user's mirror are
//! best-effort: they are logged when they fail and never undo the acting
//! user's change.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info, instrument, warn};

use super::{
    ListSyncError, ListSyncResult, audit,
    outcomes::{
        AcceptOutcome, BumpOutcome, CompletionOutcome, EditOutcome, PopOutcome, ReassignOutcome,
        RemovalOutcome, SendOutcome,
    },
    saga::Saga,
};
use crate::todo::{
    domain::{
        AuditAction, ForeignLink, Issue, IssueFields, IssueId, IssueReference, IssueStatus,
        ListKind, UserId,
    },
    ports::{TodoStore, UserDirectory},
};

/// Where a new issue ended up after [`ListSyncService::dispatch_issue`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The issue stayed with its creator.
    Added(Issue),
    /// The issue was sent to another user.
    Sent(SendOutcome),
}

/// Orchestrates issue lifecycle operations across users' lists.
#[derive(Clone)]
pub struct ListSyncService<S, U, C>
where
    S: TodoStore,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    pub(super) store: Arc<S>,
    pub(super) users: Arc<U>,
    pub(super) clock: Arc<C>,
}

impl<S, U, C> ListSyncService<S, U, C>
where
    S: TodoStore,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new list synchronisation service.
    #[must_use]
    pub const fn new(store: Arc<S>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            store,
            users,
            clock,
        }
    }

    /// Creates an issue in the user's own list.
    ///
    /// # Errors
    ///
    /// Returns [`ListSyncError::Store`] when either write fails. A failed
    /// list insert deletes the saved issue again.
    #[instrument(skip_all, fields(user = %user))]
    pub async fn add_issue(&self, user: &UserId, fields: IssueFields) -> ListSyncResult<Issue> {
        let issue = Issue::new_owned(user.clone(), fields, &*self.clock);
        let id = issue.id();

        let mut saga = Saga::new("add_issue");
        saga.step("save issue", self.store.save_issue(&issue)).await?;
        saga.on_rollback("delete issue", self.store.remove_issue(id));
        saga.step(
            "add own reference",
            self.store
                .add_reference(user, ListKind::Own, IssueReference::local(id)),
        )
        .await?;
        saga.commit();

        self.audit(id, user, AuditAction::Create, None).await;
        info!(issue = %id, "issue added");
        Ok(issue)
    }

    /// Sends a new issue from `sender` to `receiver`.
    ///
    /// Both sides get their own issue record with the same content, each
    /// linked to the other. The sender's copy lands in their outgoing list
    /// and the receiver's copy in their incoming list.
    ///
    /// # Errors
    ///
    /// Returns [`ListSyncError::SelfAssignment`] when both users are the
    /// same, or [`ListSyncError::Store`] when a step fails. Every step
    /// already applied is undone before the error is returned.
    #[instrument(skip_all, fields(sender = %sender, receiver = %receiver))]
    pub async fn send_issue(
        &self,
        sender: &UserId,
        receiver: &UserId,
        fields: IssueFields,
    ) -> ListSyncResult<SendOutcome> {
        if sender == receiver {
            return Err(ListSyncError::SelfAssignment(sender.clone()));
        }

        let clock = &*self.clock;
        let mut sender_issue =
            Issue::new_pending(sender.clone(), receiver.clone(), fields.clone(), clock);
        let mut receiver_issue = Issue::new_pending(sender.clone(), receiver.clone(), fields, clock);
        let sender_id = sender_issue.id();
        let receiver_id = receiver_issue.id();
        sender_issue.link_foreign(ForeignLink::new(receiver.clone(), receiver_id));
        receiver_issue.link_foreign(ForeignLink::new(sender.clone(), sender_id));

        let mut saga = Saga::new("send_issue");
        saga.step("save sender issue", self.store.save_issue(&sender_issue))
            .await?;
        saga.on_rollback("delete sender issue", self.store.remove_issue(sender_id));

        saga.step("save receiver issue", self.store.save_issue(&receiver_issue))
            .await?;
        saga.on_rollback("delete receiver issue", self.store.remove_issue(receiver_id));

        saga.step(
            "add sender outgoing reference",
            self.store.add_reference(
                sender,
                ListKind::Outgoing,
                IssueReference::linked(sender_id, ForeignLink::new(receiver.clone(), receiver_id)),
            ),
        )
        .await?;
        saga.on_rollback(
            "remove sender outgoing reference",
            self.store
                .remove_reference(sender, sender_id, ListKind::Outgoing),
        );

        saga.step(
            "add receiver incoming reference",
            self.store.add_reference(
                receiver,
                ListKind::Incoming,
                IssueReference::linked(receiver_id, ForeignLink::new(sender.clone(), sender_id)),
            ),
        )
        .await?;
        saga.commit();

        self.audit(
            sender_id,
            sender,
            AuditAction::Send,
            Some(receiver.to_string()),
        )
        .await;
        self.audit(
            receiver_id,
            receiver,
            AuditAction::Receive,
            Some(sender.to_string()),
        )
        .await;
        info!(%sender_id, %receiver_id, "issue sent");

        Ok(SendOutcome {
            sender_issue,
            receiver_issue,
        })
    }

    /// Adds the issue for `user`, or sends it when `assignee` is someone else.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Self::add_issue`] and [`Self::send_issue`].
    pub async fn dispatch_issue(
        &self,
        user: &UserId,
        assignee: Option<&UserId>,
        fields: IssueFields,
    ) -> ListSyncResult<Dispatch> {
        match assignee {
            Some(receiver) if receiver != user => self
                .send_issue(user, receiver, fields)
                .await
                .map(Dispatch::Sent),
            _ => self.add_issue(user, fields).await.map(Dispatch::Added),
        }
    }

    /// Accepts an incoming issue into the user's own list.
    ///
    /// The link back to the sender is kept so later completion or removal
    /// can reach the sender's copy.
    ///
    /// # Errors
    ///
    /// Returns [`ListSyncError::ReferenceNotFound`] when the issue is not in
    /// the user's incoming list, or [`ListSyncError::Store`] when a step
    /// fails. On failure the user keeps exactly the incoming reference.
    #[instrument(skip_all, fields(user = %user, issue = %issue_id))]
    pub async fn accept_issue(
        &self,
        user: &UserId,
        issue_id: IssueId,
    ) -> ListSyncResult<AcceptOutcome> {
        let listed = self
            .store
            .find_reference(user, issue_id, ListKind::Incoming)
            .await?
            .ok_or_else(|| ListSyncError::reference_not_found(user, issue_id))?;
        let mut issue = self.store.issue(issue_id).await?;
        let foreign = listed.foreign().cloned();

        let mut saga = Saga::new("accept_issue");
        saga.step(
            "add own reference",
            self.store.add_reference(
                user,
                ListKind::Own,
                IssueReference::new(issue_id, foreign.clone()),
            ),
        )
        .await?;
        saga.on_rollback(
            "remove own reference",
            self.store.remove_reference(user, issue_id, ListKind::Own),
        );

        saga.step(
            "remove incoming reference",
            self.store
                .remove_reference(user, issue_id, ListKind::Incoming),
        )
        .await?;
        saga.on_rollback(
            "restore incoming reference",
            self.store
                .add_reference(user, ListKind::Incoming, listed.reference.clone()),
        );

        issue.transition_to(IssueStatus::Open, &*self.clock);
        saga.step("open issue", self.store.save_issue(&issue)).await?;
        saga.commit();

        let foreign_user = foreign.map(|link| link.user().clone());
        self.audit(
            issue_id,
            user,
            AuditAction::Accept,
            foreign_user.as_ref().map(ToString::to_string),
        )
        .await;
        info!("issue accepted");
        Ok(AcceptOutcome {
            issue,
            foreign_user,
        })
    }

    /// Completes an issue from whichever list of the user holds it.
    ///
    /// When the issue is shared, the mirror is taken off the other user's
    /// list and marked completed on a best-effort basis.
    ///
    /// # Errors
    ///
    /// Returns [`ListSyncError::ReferenceNotFound`] when none of the user's
    /// lists holds the issue, or [`ListSyncError::Store`] when the user's
    /// own records cannot be updated.
    #[instrument(skip_all, fields(user = %user, issue = %issue_id))]
    pub async fn complete_issue(
        &self,
        user: &UserId,
        issue_id: IssueId,
    ) -> ListSyncResult<CompletionOutcome> {
        let listed = self
            .store
            .locate_reference(user, issue_id)
            .await?
            .ok_or_else(|| ListSyncError::reference_not_found(user, issue_id))?;
        let issue = self
            .close(user, issue_id, &listed.reference, listed.list, IssueStatus::Completed)
            .await?;

        let foreign_user = listed.foreign().map(|link| link.user().clone());
        let foreign_list = match listed.foreign() {
            Some(link) => self.complete_mirror(link).await,
            None => None,
        };

        self.audit(issue_id, user, AuditAction::Complete, None).await;
        info!(list = %listed.list, "issue completed");
        Ok(CompletionOutcome {
            issue,
            list: listed.list,
            foreign_user,
            foreign_list,
        })
    }

    /// Removes an issue from the user's lists, or declines it when incoming.
    ///
    /// A shared issue's mirror is unlisted and deleted outright on a
    /// best-effort basis.
    ///
    /// # Errors
    ///
    /// Returns [`ListSyncError::ReferenceNotFound`] when none of the user's
    /// lists holds the issue, or [`ListSyncError::Store`] when the user's
    /// own records cannot be updated.
    #[instrument(skip_all, fields(user = %user, issue = %issue_id))]
    pub async fn remove_issue(
        &self,
        user: &UserId,
        issue_id: IssueId,
    ) -> ListSyncResult<RemovalOutcome> {
        let listed = self
            .store
            .locate_reference(user, issue_id)
            .await?
            .ok_or_else(|| ListSyncError::reference_not_found(user, issue_id))?;
        let issue = self
            .close(user, issue_id, &listed.reference, listed.list, IssueStatus::Removed)
            .await?;

        let foreign_user = listed.foreign().map(|link| link.user().clone());
        let foreign_list = match listed.foreign() {
            Some(link) => self.delete_mirror(link).await,
            None => None,
        };

        self.audit(issue_id, user, AuditAction::Remove, None).await;
        let is_sender = listed.list == ListKind::Outgoing;
        info!(list = %listed.list, is_sender, "issue removed");
        Ok(RemovalOutcome {
            issue,
            list: listed.list,
            foreign_user,
            foreign_list,
            is_sender,
        })
    }

    /// Replaces the message, description, due time and priority of an issue.
    ///
    /// The same change is copied onto the mirror on a best-effort basis.
    ///
    /// # Errors
    ///
    /// Returns [`ListSyncError::Store`] when the issue cannot be loaded or
    /// saved.
    #[instrument(skip_all, fields(user = %user, issue = %issue_id))]
    pub async fn edit_issue(
        &self,
        user: &UserId,
        issue_id: IssueId,
        fields: &IssueFields,
    ) -> ListSyncResult<EditOutcome> {
        let mut issue = self.store.issue(issue_id).await?;
        let list = self
            .store
            .locate_reference(user, issue_id)
            .await?
            .map(|listed| listed.list);
        let previous_message = issue.message().to_owned();

        issue.apply_edit(fields, &*self.clock);
        self.store.save_issue(&issue).await?;

        let foreign_user = issue.foreign().map(|link| link.user().clone());
        if let Some(link) = issue.foreign() {
            self.edit_mirror(link, fields).await;
        }

        self.audit(issue_id, user, AuditAction::Edit, None).await;
        info!("issue edited");
        Ok(EditOutcome {
            issue,
            previous_message,
            foreign_user,
            list,
        })
    }

    /// Hands an issue the user owns or sent to `new_receiver`.
    ///
    /// Items in the incoming list, and accepted items that came from someone
    /// else, cannot be reassigned. Any existing mirror is torn down first.
    /// Reassigning an outgoing item to oneself pulls it back into the own
    /// list; reassigning an unshared own item to oneself changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ListSyncError::ReferenceNotFound`] when the user or the
    /// mirror's owner has no reference to the respective issue,
    /// [`ListSyncError::NotOwner`] when the rules above forbid the change,
    /// or [`ListSyncError::Store`] when a step fails. Every step already
    /// applied is undone before the error is returned.
    #[instrument(skip_all, fields(user = %user, issue = %issue_id, receiver = %new_receiver))]
    pub async fn change_assignment(
        &self,
        issue_id: IssueId,
        user: &UserId,
        new_receiver: &UserId,
    ) -> ListSyncResult<ReassignOutcome> {
        let mut issue = self.store.issue(issue_id).await?;
        let listed = self
            .store
            .locate_reference(user, issue_id)
            .await?
            .ok_or_else(|| ListSyncError::reference_not_found(user, issue_id))?;

        let held_for_someone_else = match listed.list {
            ListKind::Incoming => true,
            ListKind::Own => listed.foreign().is_some(),
            ListKind::Outgoing => false,
        };
        if held_for_someone_else {
            return Err(ListSyncError::NotOwner {
                user: user.clone(),
                issue: issue_id,
                list: listed.list,
            });
        }

        let reclaiming = user == new_receiver;
        if reclaiming && listed.list == ListKind::Own {
            debug!("unshared own issue reassigned to its owner, nothing to do");
            return Ok(ReassignOutcome {
                issue,
                previous_foreign_user: None,
                receiver_issue: None,
            });
        }

        let previous_foreign_user = listed.foreign().map(|link| link.user().clone());
        let store = &*self.store;
        let clock = &*self.clock;
        let mut saga = Saga::new("change_assignment");

        if let Some(link) = listed.foreign() {
            self.tear_down_mirror(&mut saga, link).await?;
        }

        saga.step(
            "remove current reference",
            store.remove_reference(user, issue_id, listed.list),
        )
        .await?;
        saga.on_rollback(
            "restore current reference",
            store.add_reference(user, listed.list, listed.reference.clone()),
        );

        if reclaiming {
            saga.step(
                "add own reference",
                store.add_reference(user, ListKind::Own, IssueReference::local(issue_id)),
            )
            .await?;
            saga.on_rollback(
                "remove own reference",
                store.remove_reference(user, issue_id, ListKind::Own),
            );
            issue.reassign(user.clone(), None, IssueStatus::Open, clock);
            saga.step("save reclaimed issue", store.save_issue(&issue))
                .await?;
            saga.commit();

            self.audit(
                issue_id,
                user,
                AuditAction::Reassign,
                Some(user.to_string()),
            )
            .await;
            info!("issue reclaimed into own list");
            return Ok(ReassignOutcome {
                issue,
                previous_foreign_user,
                receiver_issue: None,
            });
        }

        let mut receiver_issue = Issue::new_pending(
            user.clone(),
            new_receiver.clone(),
            issue.fields().clone(),
            clock,
        );
        let receiver_id = receiver_issue.id();
        receiver_issue.link_foreign(ForeignLink::new(user.clone(), issue_id));
        let to_receiver = ForeignLink::new(new_receiver.clone(), receiver_id);

        saga.step("save receiver issue", store.save_issue(&receiver_issue))
            .await?;
        saga.on_rollback("delete receiver issue", store.remove_issue(receiver_id));

        saga.step(
            "add outgoing reference",
            store.add_reference(
                user,
                ListKind::Outgoing,
                IssueReference::linked(issue_id, to_receiver.clone()),
            ),
        )
        .await?;
        saga.on_rollback(
            "remove outgoing reference",
            store.remove_reference(user, issue_id, ListKind::Outgoing),
        );

        saga.step(
            "add receiver incoming reference",
            store.add_reference(
                new_receiver,
                ListKind::Incoming,
                IssueReference::linked(receiver_id, ForeignLink::new(user.clone(), issue_id)),
            ),
        )
        .await?;
        saga.on_rollback(
            "remove receiver incoming reference",
            store.remove_reference(new_receiver, receiver_id, ListKind::Incoming),
        );

        issue.reassign(
            new_receiver.clone(),
            Some(to_receiver),
            IssueStatus::Pending,
            clock,
        );
        saga.step("save reassigned issue", store.save_issue(&issue))
            .await?;
        saga.commit();

        self.audit(
            receiver_id,
            new_receiver,
            AuditAction::Receive,
            Some(user.to_string()),
        )
        .await;
        self.audit(
            issue_id,
            user,
            AuditAction::Reassign,
            Some(new_receiver.to_string()),
        )
        .await;
        info!(%receiver_id, "issue reassigned");

        Ok(ReassignOutcome {
            issue,
            previous_foreign_user,
            receiver_issue: Some(receiver_issue),
        })
    }

    /// Takes the front of the user's own list and completes it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::todo::ports::StoreError::EmptyList`] (wrapped in
    /// [`ListSyncError::Store`]) without changing anything when the own list
    /// is empty, or [`ListSyncError::Store`] when a later step fails. A
    /// failure after the pop puts the reference back at the front.
    #[instrument(skip_all, fields(user = %user))]
    pub async fn pop_issue(&self, user: &UserId) -> ListSyncResult<PopOutcome> {
        let reference = self.store.pop_reference(user, ListKind::Own).await?;
        let issue_id = reference.issue();

        let mut saga = Saga::new("pop_issue");
        saga.on_rollback(
            "restore own reference",
            self.store
                .add_reference(user, ListKind::Own, reference.clone()),
        );
        let mut issue = saga
            .step("load popped issue", self.store.issue(issue_id))
            .await?;
        issue.transition_to(IssueStatus::Completed, &*self.clock);
        saga.step("complete issue", self.store.save_issue(&issue))
            .await?;
        saga.commit();

        let foreign_user = reference.foreign().map(|link| link.user().clone());
        if let Some(link) = reference.foreign() {
            self.complete_mirror(link).await;
        }

        self.audit(issue_id, user, AuditAction::Complete, None)
            .await;
        info!(issue = %issue_id, "issue popped");
        Ok(PopOutcome {
            issue,
            foreign_user,
        })
    }

    /// Moves the receiver's copy of an outgoing issue to the front of their
    /// incoming list.
    ///
    /// # Errors
    ///
    /// Returns [`ListSyncError::ReferenceNotFound`] when the issue is not in
    /// the user's outgoing list, [`ListSyncError::MissingForeignLink`] when
    /// it has no receiver, or [`ListSyncError::Store`] when the receiver no
    /// longer holds it as incoming.
    #[instrument(skip_all, fields(user = %user, issue = %issue_id))]
    pub async fn bump_issue(&self, user: &UserId, issue_id: IssueId) -> ListSyncResult<BumpOutcome> {
        let listed = self
            .store
            .find_reference(user, issue_id, ListKind::Outgoing)
            .await?
            .ok_or_else(|| ListSyncError::reference_not_found(user, issue_id))?;
        let link = listed
            .foreign()
            .cloned()
            .ok_or(ListSyncError::MissingForeignLink(issue_id))?;

        self.store
            .bump_reference(link.user(), link.issue(), ListKind::Incoming)
            .await?;
        let foreign_issue = self.store.issue(link.issue()).await?;

        self.audit(
            link.issue(),
            link.user(),
            AuditAction::BumpBy,
            Some(user.to_string()),
        )
        .await;
        info!(receiver = %link.user(), "issue bumped");
        Ok(BumpOutcome {
            foreign_issue,
            foreign_user: link.user().clone(),
        })
    }

    /// Returns whether `user` may act on an issue.
    ///
    /// Administrators always may; otherwise the user must be the issue's
    /// creator or assignee. A failing administrator lookup counts as "not an
    /// administrator".
    ///
    /// # Errors
    ///
    /// Returns [`ListSyncError::Store`] when the issue cannot be loaded.
    pub async fn is_authorized(&self, issue_id: IssueId, user: &UserId) -> ListSyncResult<bool> {
        match self.users.is_admin(user).await {
            Ok(true) => return Ok(true),
            Ok(false) => {}
            Err(err) => debug!(%user, error = %err, "administrator lookup failed"),
        }
        let issue = self.store.issue(issue_id).await?;
        Ok(issue.involves(user))
    }

    /// Unlists and deletes the mirror ahead of a reassignment.
    ///
    /// A mirror that is not listed anywhere stops the reassignment. A mirror
    /// record that cannot be deleted is only logged.
    async fn tear_down_mirror<'a>(
        &'a self,
        saga: &mut Saga<'a>,
        link: &'a ForeignLink,
    ) -> ListSyncResult<()> {
        let store = &*self.store;
        let mirror = store
            .locate_reference(link.user(), link.issue())
            .await?
            .ok_or_else(|| ListSyncError::reference_not_found(link.user(), link.issue()))?;
        saga.step(
            "remove mirror reference",
            store.remove_reference(link.user(), link.issue(), mirror.list),
        )
        .await?;
        saga.on_rollback(
            "restore mirror reference",
            store.add_reference(link.user(), mirror.list, mirror.reference),
        );
        match store.take_issue(link.issue()).await {
            Ok(mirror_issue) => saga.on_rollback(
                "restore mirror issue",
                Box::pin(async move { store.save_issue(&mirror_issue).await }),
            ),
            Err(err) => warn!(
                mirror = %link.issue(),
                error = %err,
                "cannot delete mirror issue during reassignment"
            ),
        }
        Ok(())
    }

    /// Unlists an issue and moves it to a terminal status.
    async fn close(
        &self,
        user: &UserId,
        issue_id: IssueId,
        reference: &IssueReference,
        list: ListKind,
        status: IssueStatus,
    ) -> ListSyncResult<Issue> {
        let mut saga = Saga::new("close_issue");
        saga.step(
            "remove reference",
            self.store.remove_reference(user, issue_id, list),
        )
        .await?;
        saga.on_rollback(
            "restore reference",
            self.store.add_reference(user, list, reference.clone()),
        );
        let mut issue = saga.step("load issue", self.store.issue(issue_id)).await?;
        issue.transition_to(status, &*self.clock);
        saga.step("save issue status", self.store.save_issue(&issue))
            .await?;
        saga.commit();
        Ok(issue)
    }

    /// Unlists the mirror and marks it completed. Failures are logged.
    async fn complete_mirror(&self, link: &ForeignLink) -> Option<ListKind> {
        let foreign_list = self.unlist_mirror(link).await;
        match self.store.issue(link.issue()).await {
            Ok(mut mirror) => {
                mirror.transition_to(IssueStatus::Completed, &*self.clock);
                if let Err(err) = self.store.save_issue(&mirror).await {
                    warn!(mirror = %link.issue(), error = %err, "cannot complete mirror issue");
                }
            }
            Err(err) => warn!(mirror = %link.issue(), error = %err, "cannot load mirror issue"),
        }
        foreign_list
    }

    /// Unlists the mirror and deletes it. Failures are logged.
    async fn delete_mirror(&self, link: &ForeignLink) -> Option<ListKind> {
        let foreign_list = self.unlist_mirror(link).await;
        if let Err(err) = self.store.take_issue(link.issue()).await {
            warn!(mirror = %link.issue(), error = %err, "cannot delete mirror issue");
        }
        foreign_list
    }

    /// Copies an edit onto the mirror. Failures are logged.
    async fn edit_mirror(&self, link: &ForeignLink, fields: &IssueFields) {
        match self.store.issue(link.issue()).await {
            Ok(mut mirror) => {
                mirror.apply_edit(fields, &*self.clock);
                if let Err(err) = self.store.save_issue(&mirror).await {
                    warn!(mirror = %link.issue(), error = %err, "cannot edit mirror issue");
                }
            }
            Err(err) => warn!(mirror = %link.issue(), error = %err, "cannot load mirror issue"),
        }
    }

    /// Removes the mirror's reference from whichever list holds it.
    async fn unlist_mirror(&self, link: &ForeignLink) -> Option<ListKind> {
        let listed = match self.store.locate_reference(link.user(), link.issue()).await {
            Ok(Some(listed)) => listed,
            Ok(None) => {
                debug!(mirror = %link.issue(), "mirror is not listed");
                return None;
            }
            Err(err) => {
                warn!(mirror = %link.issue(), error = %err, "cannot locate mirror reference");
                return None;
            }
        };
        match self
            .store
            .remove_reference(link.user(), link.issue(), listed.list)
            .await
        {
            Ok(()) => Some(listed.list),
            Err(err) => {
                warn!(mirror = %link.issue(), error = %err, "cannot unlist mirror reference");
                None
            }
        }
    }

    async fn audit(
        &self,
        issue: IssueId,
        user: &UserId,
        action: AuditAction,
        metadata: Option<String>,
    ) {
        audit::record(&*self.store, &*self.clock, issue, user, action, metadata).await;
    }
}
