//! Diesel schema for preference persistence.

diesel::table! {
    /// One row per user with stored preferences.
    todo_preferences (user_id) {
        /// User identifier.
        #[max_length = 255]
        user_id -> Varchar,
        /// Whether the daily reminder is wanted.
        reminder_enabled -> Bool,
        /// When the last reminder went out.
        last_reminder_at -> Nullable<Timestamptz>,
        /// Whether other users may send issues.
        accepts_incoming -> Bool,
    }
}
