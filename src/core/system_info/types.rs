use serde::{Deserialize, Serialize};

/// Placeholder for string fields the host would not report
pub const UNKNOWN: &str = "Unknown";

/// Static host description, collected once per process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os_name: String,
    pub os_version: String,
    pub processor: String,
    /// Physical cores
    pub core_count: Option<usize>,
    /// Logical processors
    pub thread_count: Option<usize>,
    pub total_memory_bytes: Option<u64>,
}

impl Default for SystemInfo {
    fn default() -> Self {
        Self {
            os_name: UNKNOWN.to_string(),
            os_version: UNKNOWN.to_string(),
            processor: UNKNOWN.to_string(),
            core_count: None,
            thread_count: None,
            total_memory_bytes: None,
        }
    }
}
