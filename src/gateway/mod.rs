//! Data access for appointments, payments and user accounts.
//!
//! Every operation comes in two shapes. The plain one (`create_appointment`,
//! `list_payments`, ...) never fails: errors are logged and flattened to
//! `false` or an empty list. The `try_*` / `fetch_*` one returns the
//! classified [`GatewayError`] for callers that need to tell causes apart.
//!
//! Each write runs exactly one statement; there are no multi-statement
//! transactions.

mod appointments;
mod payments;
mod users;

use sqlx::SqlitePool;

use crate::error::{ErrorKind, GatewayError};

#[derive(Clone)]
pub struct PersistenceGateway {
    pool: SqlitePool,
}

impl PersistenceGateway {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes the held connection. Later calls fail with `Connectivity`.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Logs a failed operation and drops the error.
fn report<T>(operation: &str, result: Result<T, GatewayError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            match err.kind() {
                ErrorKind::Connectivity | ErrorKind::Internal => {
                    log::error!("{operation} failed: {err}");
                }
                _ => log::warn!("{operation} failed: {err}"),
            }
            None
        }
    }
}
