mod config;
pub mod task_store;

pub use config::{Config, DisplayConfig, LoggingConfig, StorageConfig};
pub use task_store::TaskStore;

use std::path::PathBuf;

/// Returns `~/.config/taskmaster[-dev]/` based on TASKMASTER_ENV.
///
/// Set TASKMASTER_ENV=dev to use the development config directory. The
/// directory is not created; nothing is ever written there implicitly.
pub fn config_dir() -> PathBuf {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TASKMASTER_ENV").unwrap_or_else(|_| "production".to_string());

    if env == "dev" {
        base_dir.join("taskmaster-dev")
    } else {
        base_dir.join("taskmaster")
    }
}
