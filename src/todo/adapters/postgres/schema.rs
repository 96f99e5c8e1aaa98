//! Diesel schema for shared todo list persistence.

diesel::table! {
    /// Issue records, one per side of a shared item.
    todos (id) {
        /// Issue identifier.
        id -> Uuid,
        /// Short message.
        message -> Text,
        /// Optional longer description.
        description -> Nullable<Text>,
        /// Optional link to the source post.
        permalink -> Nullable<Text>,
        /// Optional due time.
        due_at -> Nullable<Timestamptz>,
        /// Priority, higher is more urgent.
        priority -> Int2,
        /// Creator user identifier.
        #[max_length = 255]
        creator_id -> Varchar,
        /// Assignee user identifier.
        #[max_length = 255]
        assignee_id -> Varchar,
        /// User holding the mirror record.
        #[max_length = 255]
        foreign_user_id -> Nullable<Varchar>,
        /// Mirror record identifier.
        foreign_issue_id -> Nullable<Uuid>,
        /// Issue status.
        #[max_length = 50]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ordered list membership.
    todo_references (user_id, list, issue_id) {
        /// List owner.
        #[max_length = 255]
        user_id -> Varchar,
        /// List kind.
        #[max_length = 20]
        list -> Varchar,
        /// Listed issue.
        issue_id -> Uuid,
        /// User holding the mirror record.
        #[max_length = 255]
        foreign_user_id -> Nullable<Varchar>,
        /// Mirror record identifier.
        foreign_issue_id -> Nullable<Uuid>,
        /// Ordering key, highest first.
        rank -> Int8,
    }
}

diesel::table! {
    /// Comments on issues.
    todo_comments (id) {
        /// Comment identifier.
        id -> Uuid,
        /// Commented issue.
        issue_id -> Uuid,
        /// Author user identifier.
        #[max_length = 255]
        author_id -> Varchar,
        /// Comment text.
        message -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only audit trail.
    todo_audit_log (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Issue the entry belongs to.
        issue_id -> Uuid,
        /// Acting user identifier.
        #[max_length = 255]
        user_id -> Varchar,
        /// Recorded action.
        #[max_length = 50]
        action -> Varchar,
        /// Free-form context.
        metadata -> Nullable<Text>,
        /// Recording timestamp.
        created_at -> Timestamptz,
    }
}
