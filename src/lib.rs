pub mod app;
pub mod celebration;
pub mod config;
pub mod errors;
pub mod format;
pub mod handlers;
pub mod models;
pub mod progress;
pub mod settings;
pub mod state;
pub mod storage;
pub mod tracker;
pub mod ui;

pub use app::router;
pub use config::AppConfig;
pub use state::AppState;
pub use storage::Storage;
pub use tracker::Tracker;
