use crate::db::{DbPool, OrmConn};

/// Shared handles for request handlers: the sqlx pool serves joined read views
/// and the audit trail, the SeaORM connection serves entity writes.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
}

impl AppState {
    pub fn new(pool: DbPool, orm: OrmConn) -> Self {
        Self { pool, orm }
    }
}
