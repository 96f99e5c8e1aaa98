//! `PostgreSQL` implementation of the todo storage ports.

use super::{
    models::{AuditLogRow, CommentRow, IssueRow, ReferenceRow},
    schema::{todo_audit_log, todo_comments, todo_references, todos},
};
use crate::todo::{
    domain::{
        AuditAction, AuditLog, AuditLogId, Comment, CommentId, ForeignLink, Issue, IssueFields,
        IssueId, IssueReference, IssueStatus, ListKind, ListedReference, PersistedIssueData,
        Priority, UserId,
    },
    ports::{
        AuditLedger, CommentLedger, IssueRegistry, ReferenceDirectory, StoreError, StoreResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::dsl::sql;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::BigInt;

/// `PostgreSQL` connection pool type used by the todo adapters.
pub type TodoPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed todo store.
///
/// Every port call is one statement or one transaction, so each call is
/// atomic on its own. List order is kept in a `rank` column; the front of a
/// list is its highest rank. Ranks come from `todo_reference_rank_seq`, so no
/// two entries share one even when writers race.
#[derive(Debug, Clone)]
pub struct PostgresTodoStore {
    pool: TodoPgPool,
}

impl PostgresTodoStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TodoPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(StoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(StoreError::persistence)?
    }
}

#[async_trait]
impl IssueRegistry for PostgresTodoStore {
    async fn save_issue(&self, issue: &Issue) -> StoreResult<()> {
        let row = to_issue_row(issue);
        self.run_blocking(move |connection| {
            diesel::insert_into(todos::table)
                .values(&row)
                .on_conflict(todos::id)
                .do_update()
                .set(&row)
                .execute(connection)?;
            Ok(())
        })
        .await
    }

    async fn issue(&self, id: IssueId) -> StoreResult<Issue> {
        self.run_blocking(move |connection| {
            let row = todos::table
                .filter(todos::id.eq(id.into_inner()))
                .select(IssueRow::as_select())
                .first::<IssueRow>(connection)
                .optional()?
                .ok_or(StoreError::IssueNotFound(id))?;
            row_to_issue(row)
        })
        .await
    }

    async fn remove_issue(&self, id: IssueId) -> StoreResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(todos::table.filter(todos::id.eq(id.into_inner())))
                .execute(connection)?;
            if deleted == 0 {
                return Err(StoreError::IssueNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn take_issue(&self, id: IssueId) -> StoreResult<Issue> {
        self.run_blocking(move |connection| {
            let row = diesel::delete(todos::table.filter(todos::id.eq(id.into_inner())))
                .returning(IssueRow::as_returning())
                .get_result::<IssueRow>(connection)
                .optional()?
                .ok_or(StoreError::IssueNotFound(id))?;
            row_to_issue(row)
        })
        .await
    }
}

#[async_trait]
impl ReferenceDirectory for PostgresTodoStore {
    async fn add_reference(
        &self,
        user: &UserId,
        list: ListKind,
        reference: IssueReference,
    ) -> StoreResult<()> {
        let owner = user.clone();
        self.run_blocking(move |connection| {
            connection.transaction::<_, StoreError, _>(|tx| {
                let issue = reference.issue();
                if load_reference(tx, &owner, list, issue)?.is_some() {
                    return Err(duplicate(&owner, issue, list));
                }
                let rank = front_rank(tx)?;
                let row = to_reference_row(&owner, list, &reference, rank);
                diesel::insert_into(todo_references::table)
                    .values(&row)
                    .execute(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            duplicate(&owner, issue, list)
                        }
                        other => StoreError::persistence(other),
                    })?;
                Ok(())
            })
        })
        .await
    }

    async fn remove_reference(
        &self,
        user: &UserId,
        issue: IssueId,
        list: ListKind,
    ) -> StoreResult<()> {
        let owner = user.clone();
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(
                todo_references::table
                    .filter(todo_references::user_id.eq(owner.as_str()))
                    .filter(todo_references::list.eq(list.as_str()))
                    .filter(todo_references::issue_id.eq(issue.into_inner())),
            )
            .execute(connection)?;
            if deleted == 0 {
                return Err(reference_not_found(&owner, issue, list));
            }
            Ok(())
        })
        .await
    }

    async fn pop_reference(&self, user: &UserId, list: ListKind) -> StoreResult<IssueReference> {
        let owner = user.clone();
        self.run_blocking(move |connection| {
            connection.transaction::<_, StoreError, _>(|tx| {
                let row = todo_references::table
                    .filter(todo_references::user_id.eq(owner.as_str()))
                    .filter(todo_references::list.eq(list.as_str()))
                    .order(todo_references::rank.desc())
                    .select(ReferenceRow::as_select())
                    .for_update()
                    .first::<ReferenceRow>(tx)
                    .optional()?
                    .ok_or_else(|| StoreError::EmptyList {
                        user: owner.clone(),
                        list,
                    })?;
                diesel::delete(
                    todo_references::table
                        .filter(todo_references::user_id.eq(&row.user_id))
                        .filter(todo_references::list.eq(&row.list))
                        .filter(todo_references::issue_id.eq(row.issue_id)),
                )
                .execute(tx)?;
                row_to_reference(row)
            })
        })
        .await
    }

    async fn bump_reference(
        &self,
        user: &UserId,
        issue: IssueId,
        list: ListKind,
    ) -> StoreResult<()> {
        let owner = user.clone();
        self.run_blocking(move |connection| {
            connection.transaction::<_, StoreError, _>(|tx| {
                if load_reference(tx, &owner, list, issue)?.is_none() {
                    return Err(reference_not_found(&owner, issue, list));
                }
                let rank = front_rank(tx)?;
                diesel::update(
                    todo_references::table
                        .filter(todo_references::user_id.eq(owner.as_str()))
                        .filter(todo_references::list.eq(list.as_str()))
                        .filter(todo_references::issue_id.eq(issue.into_inner())),
                )
                .set(todo_references::rank.eq(rank))
                .execute(tx)?;
                Ok(())
            })
        })
        .await
    }

    async fn find_reference(
        &self,
        user: &UserId,
        issue: IssueId,
        list: ListKind,
    ) -> StoreResult<Option<ListedReference>> {
        let owner = user.clone();
        self.run_blocking(move |connection| position_in(connection, &owner, list, issue))
            .await
    }

    async fn locate_reference(
        &self,
        user: &UserId,
        issue: IssueId,
    ) -> StoreResult<Option<ListedReference>> {
        let owner = user.clone();
        self.run_blocking(move |connection| {
            for list in ListKind::ALL {
                if let Some(listed) = position_in(connection, &owner, list, issue)? {
                    return Ok(Some(listed));
                }
            }
            Ok(None)
        })
        .await
    }

    async fn list(&self, user: &UserId, list: ListKind) -> StoreResult<Vec<IssueReference>> {
        let owner = user.clone();
        self.run_blocking(move |connection| {
            ordered_rows(connection, &owner, list)?
                .into_iter()
                .map(row_to_reference)
                .collect()
        })
        .await
    }
}

#[async_trait]
impl AuditLedger for PostgresTodoStore {
    async fn append_audit_log(&self, entry: &AuditLog) -> StoreResult<()> {
        let row = AuditLogRow {
            id: entry.id.into_inner(),
            issue_id: entry.issue.into_inner(),
            user_id: entry.user.as_str().to_owned(),
            action: entry.action.as_str().to_owned(),
            metadata: entry.metadata.clone(),
            created_at: entry.created_at,
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(todo_audit_log::table)
                .values(&row)
                .execute(connection)?;
            Ok(())
        })
        .await
    }

    async fn audit_logs(&self, issue: IssueId) -> StoreResult<Vec<AuditLog>> {
        self.run_blocking(move |connection| {
            todo_audit_log::table
                .filter(todo_audit_log::issue_id.eq(issue.into_inner()))
                .order(todo_audit_log::created_at.desc())
                .select(AuditLogRow::as_select())
                .load::<AuditLogRow>(connection)?
                .into_iter()
                .map(row_to_audit_log)
                .collect()
        })
        .await
    }
}

#[async_trait]
impl CommentLedger for PostgresTodoStore {
    async fn save_comment(&self, comment: &Comment) -> StoreResult<()> {
        let row = CommentRow {
            id: comment.id().into_inner(),
            issue_id: comment.issue().into_inner(),
            author_id: comment.author().as_str().to_owned(),
            message: comment.message().to_owned(),
            created_at: comment.created_at(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(todo_comments::table)
                .values(&row)
                .execute(connection)?;
            Ok(())
        })
        .await
    }

    async fn comments(&self, issue: IssueId) -> StoreResult<Vec<Comment>> {
        self.run_blocking(move |connection| {
            todo_comments::table
                .filter(todo_comments::issue_id.eq(issue.into_inner()))
                .order(todo_comments::created_at.asc())
                .select(CommentRow::as_select())
                .load::<CommentRow>(connection)?
                .into_iter()
                .map(row_to_comment)
                .collect()
        })
        .await
    }

    async fn comment(&self, id: CommentId) -> StoreResult<Comment> {
        self.run_blocking(move |connection| {
            let row = todo_comments::table
                .filter(todo_comments::id.eq(id.into_inner()))
                .select(CommentRow::as_select())
                .first::<CommentRow>(connection)
                .optional()?
                .ok_or(StoreError::CommentNotFound(id))?;
            row_to_comment(row)
        })
        .await
    }

    async fn delete_comment(&self, id: CommentId) -> StoreResult<()> {
        self.run_blocking(move |connection| {
            let deleted =
                diesel::delete(todo_comments::table.filter(todo_comments::id.eq(id.into_inner())))
                    .execute(connection)?;
            if deleted == 0 {
                return Err(StoreError::CommentNotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn duplicate(user: &UserId, issue: IssueId, list: ListKind) -> StoreError {
    StoreError::DuplicateReference {
        user: user.clone(),
        issue,
        list,
    }
}

fn reference_not_found(user: &UserId, issue: IssueId, list: ListKind) -> StoreError {
    StoreError::ReferenceNotFound {
        user: user.clone(),
        issue,
        list,
    }
}

fn load_reference(
    connection: &mut PgConnection,
    user: &UserId,
    list: ListKind,
    issue: IssueId,
) -> StoreResult<Option<ReferenceRow>> {
    Ok(todo_references::table
        .filter(todo_references::user_id.eq(user.as_str()))
        .filter(todo_references::list.eq(list.as_str()))
        .filter(todo_references::issue_id.eq(issue.into_inner()))
        .select(ReferenceRow::as_select())
        .first::<ReferenceRow>(connection)
        .optional()?)
}

/// Rank that places an entry ahead of everything already listed.
fn front_rank(connection: &mut PgConnection) -> StoreResult<i64> {
    Ok(
        diesel::select(sql::<BigInt>("nextval('todo_reference_rank_seq')"))
            .get_result::<i64>(connection)?,
    )
}

fn ordered_rows(
    connection: &mut PgConnection,
    user: &UserId,
    list: ListKind,
) -> StoreResult<Vec<ReferenceRow>> {
    Ok(todo_references::table
        .filter(todo_references::user_id.eq(user.as_str()))
        .filter(todo_references::list.eq(list.as_str()))
        .order(todo_references::rank.desc())
        .select(ReferenceRow::as_select())
        .load::<ReferenceRow>(connection)?)
}

fn position_in(
    connection: &mut PgConnection,
    user: &UserId,
    list: ListKind,
    issue: IssueId,
) -> StoreResult<Option<ListedReference>> {
    let rows = ordered_rows(connection, user, list)?;
    let Some((position, row)) = rows
        .into_iter()
        .enumerate()
        .find(|(_, candidate)| candidate.issue_id == issue.into_inner())
    else {
        return Ok(None);
    };
    Ok(Some(ListedReference {
        list,
        reference: row_to_reference(row)?,
        position,
    }))
}

fn to_issue_row(issue: &Issue) -> IssueRow {
    let fields = issue.fields();
    IssueRow {
        id: issue.id().into_inner(),
        message: fields.message().to_owned(),
        description: fields.description().map(str::to_owned),
        permalink: fields.permalink().map(str::to_owned),
        due_at: fields.due_at(),
        priority: i16::from(fields.priority().value()),
        creator_id: issue.creator().as_str().to_owned(),
        assignee_id: issue.assignee().as_str().to_owned(),
        foreign_user_id: issue.foreign().map(|link| link.user().as_str().to_owned()),
        foreign_issue_id: issue.foreign().map(|link| link.issue().into_inner()),
        status: issue.status().as_str().to_owned(),
        created_at: issue.created_at(),
        updated_at: issue.updated_at(),
    }
}

fn to_reference_row(
    user: &UserId,
    list: ListKind,
    reference: &IssueReference,
    rank: i64,
) -> ReferenceRow {
    ReferenceRow {
        user_id: user.as_str().to_owned(),
        list: list.as_str().to_owned(),
        issue_id: reference.issue().into_inner(),
        foreign_user_id: reference
            .foreign()
            .map(|link| link.user().as_str().to_owned()),
        foreign_issue_id: reference.foreign().map(|link| link.issue().into_inner()),
        rank,
    }
}

fn foreign_link(
    foreign_user: Option<String>,
    foreign_issue: Option<uuid::Uuid>,
) -> StoreResult<Option<ForeignLink>> {
    match (foreign_user, foreign_issue) {
        (Some(name), Some(id)) => Ok(Some(ForeignLink::new(
            UserId::new(name).map_err(StoreError::persistence)?,
            IssueId::from_uuid(id),
        ))),
        _ => Ok(None),
    }
}

fn row_to_issue(row: IssueRow) -> StoreResult<Issue> {
    let priority = u8::try_from(row.priority).map_err(StoreError::persistence)?;
    let mut fields = IssueFields::new(row.message)
        .map_err(StoreError::persistence)?
        .with_priority(Priority::new(priority));
    if let Some(text) = row.description {
        fields = fields.with_description(text);
    }
    if let Some(link) = row.permalink {
        fields = fields.with_permalink(link);
    }
    if let Some(due) = row.due_at {
        fields = fields.with_due_at(due);
    }

    Ok(Issue::from_persisted(PersistedIssueData {
        id: IssueId::from_uuid(row.id),
        fields,
        creator: UserId::new(row.creator_id).map_err(StoreError::persistence)?,
        assignee: UserId::new(row.assignee_id).map_err(StoreError::persistence)?,
        foreign: foreign_link(row.foreign_user_id, row.foreign_issue_id)?,
        status: IssueStatus::try_from(row.status.as_str()).map_err(StoreError::persistence)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn row_to_reference(row: ReferenceRow) -> StoreResult<IssueReference> {
    Ok(IssueReference::new(
        IssueId::from_uuid(row.issue_id),
        foreign_link(row.foreign_user_id, row.foreign_issue_id)?,
    ))
}

fn row_to_comment(row: CommentRow) -> StoreResult<Comment> {
    Ok(Comment::from_persisted(
        CommentId::from_uuid(row.id),
        IssueId::from_uuid(row.issue_id),
        UserId::new(row.author_id).map_err(StoreError::persistence)?,
        row.message,
        row.created_at,
    ))
}

fn row_to_audit_log(row: AuditLogRow) -> StoreResult<AuditLog> {
    Ok(AuditLog {
        id: AuditLogId::from_uuid(row.id),
        issue: IssueId::from_uuid(row.issue_id),
        user: UserId::new(row.user_id).map_err(StoreError::persistence)?,
        action: AuditAction::try_from(row.action.as_str()).map_err(StoreError::persistence)?,
        metadata: row.metadata,
        created_at: row.created_at,
    })
}
