// procwatch library - public API

// Re-export error types
pub mod error;
pub use error::{MonitorError, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod ui;

// Re-export commonly used types
pub use crate::core::config::MonitorConfig;
pub use crate::core::system_monitor::MonitorRuntime;

/// Initialize logging. `RUST_LOG` overrides the default `warn` level.
pub fn init_logging() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();
}
