//! Shared test helpers for `PostgreSQL` integration tests.

use crosslist::config::StoreConfig;
use crosslist::preferences::adapters::postgres::PostgresPreferenceStore;
use crosslist::schema;
use crosslist::todo::{
    adapters::postgres::{PostgresTodoStore, TodoPgPool},
    domain::UserId,
};
use rstest::fixture;
use std::sync::OnceLock;
use uuid::Uuid;

/// Environment variable naming the test database.
pub const TEST_DATABASE_URL_VAR: &str = "CROSSLIST_TEST_DATABASE_URL";

static SCHEMA_APPLIED: OnceLock<()> = OnceLock::new();

/// Stores sharing one migrated test database.
pub struct Backend {
    /// Pool the stores share, for direct SQL checks.
    pub pool: TodoPgPool,
    /// Todo store under test.
    pub todos: PostgresTodoStore,
    /// Preference store under test.
    pub preferences: PostgresPreferenceStore,
}

/// Connects to the test database and applies the schema.
///
/// # Panics
///
/// Panics when `CROSSLIST_TEST_DATABASE_URL` is unset or blank, or when the
/// database cannot be prepared. The tests using this fixture are ignored by
/// default; run them with `cargo test -- --ignored` against a database.
#[fixture]
pub fn backend() -> Backend {
    let url = match std::env::var(TEST_DATABASE_URL_VAR) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => panic!(
            "{TEST_DATABASE_URL_VAR} must name a PostgreSQL database the tests may write to"
        ),
    };
    let pool = StoreConfig::for_tests(url)
        .build_pool()
        .expect("test database pool should build");
    SCHEMA_APPLIED.get_or_init(|| migrate(&pool));
    Backend {
        todos: PostgresTodoStore::new(pool.clone()),
        preferences: PostgresPreferenceStore::new(pool.clone()),
        pool,
    }
}

fn migrate(pool: &TodoPgPool) {
    let mut connection = pool.get().expect("test database connection");
    schema::apply(&mut connection).expect("schema should apply");
}

/// Returns a user identifier unique to one test run.
///
/// # Panics
///
/// Never in practice; the generated name is not blank.
pub fn fresh_user(prefix: &str) -> UserId {
    UserId::new(format!("{prefix}-{}", Uuid::new_v4())).expect("valid user id")
}
