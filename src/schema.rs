//! Embedded SQL schema.
//!
//! The `migrations/` directory keeps Diesel's layout, and its `up.sql`
//! scripts are compiled in so the schema tool and the database tests apply
//! exactly the same statements. Every statement is idempotent.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::result::QueryResult;
use tracing::info;

/// Named `up.sql` scripts in application order.
pub const MIGRATIONS: [(&str, &str); 3] = [
    (
        "2026-10-18-000000_create_todo_tables",
        include_str!("../migrations/2026-10-18-000000_create_todo_tables/up.sql"),
    ),
    (
        "2026-10-18-000001_create_todo_preferences",
        include_str!("../migrations/2026-10-18-000001_create_todo_preferences/up.sql"),
    ),
    (
        "2026-10-18-000002_create_reference_rank_sequence",
        include_str!("../migrations/2026-10-18-000002_create_reference_rank_sequence/up.sql"),
    ),
];

/// Applies every migration to `connection`, in order.
///
/// # Errors
///
/// Returns the first database error encountered.
pub fn apply(connection: &mut PgConnection) -> QueryResult<()> {
    for (name, sql) in MIGRATIONS {
        connection.batch_execute(sql)?;
        info!(migration = name, "schema migration applied");
    }
    Ok(())
}
