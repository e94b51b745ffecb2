//! Shared handler state.

use crate::error::{ApiError, ApiResult};
use log::error;
use raffle_core::RaffleResult;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// Cloneable handle to the single raffle connection.
#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs `op` with exclusive access to the connection on the blocking pool.
    ///
    /// Concurrent requests queue on the lock, so each raffle operation sees
    /// the committed result of the one before it.
    pub async fn run<T, F>(&self, op: F) -> ApiResult<T>
    where
        F: FnOnce(&mut Connection) -> RaffleResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let joined = tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock().map_err(|_| {
                error!("event=store_lock module=server status=error error_code=lock_poisoned");
                ApiError::internal()
            })?;
            op(&mut *guard).map_err(ApiError::from)
        })
        .await;

        match joined {
            Ok(result) => result,
            Err(err) => {
                error!(
                    "event=store_task module=server status=error error_code=task_join_failed error={}",
                    err
                );
                Err(ApiError::internal())
            }
        }
    }
}
