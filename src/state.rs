use crate::errors::AppError;
use crate::storage::open_connection;
use rusqlite::Connection;
use std::path::PathBuf;

#[derive(Clone)]
pub struct AppState {
    pub db_path: PathBuf,
}

impl AppState {
    pub fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Runs `op` on a fresh connection off the async runtime. The connection
    /// is closed as soon as `op` returns.
    pub async fn with_conn<T, F>(&self, op: F) -> Result<T, AppError>
    where
        F: FnOnce(&Connection) -> Result<T, AppError> + Send + 'static,
        T: Send + 'static,
    {
        let path = self.db_path.clone();
        tokio::task::spawn_blocking(move || {
            let conn = open_connection(&path)?;
            op(&conn)
        })
        .await?
    }
}
