use sqlx::SqlitePool;

/// Shared application state, injected into every handler via axum `State`.
/// The pool is built once in `main` and cloned cheaply per request.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}
