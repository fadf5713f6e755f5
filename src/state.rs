use crate::db::{DbPool, OrmConn};

/// Shared per-process store handles, constructed once in `main` and cloned
/// into every handler. No other state is shared across requests.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
}
