// Core monitoring engine

pub mod config;
pub mod system_info;
pub mod system_monitor;
pub mod termination;

// Re-export commonly used items
pub use config::MonitorConfig;
pub use system_info::SystemInfo;
pub use system_monitor::{MonitorRuntime, MonitorSnapshot, ProcessSnapshot, RankedProcessList};
pub use termination::{TerminationOutcome, TerminationReport};
