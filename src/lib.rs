pub mod app;
pub mod controller;
pub mod errors;
pub mod habits;
pub mod handlers;
pub mod logs;
pub mod models;
pub mod session;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;

pub use app::router;
pub use state::AppState;
pub use storage::{init_db, resolve_db_path};
