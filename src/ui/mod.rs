// UI and formatting module

pub mod formatters;
pub mod prompts;
pub mod system_formatters;
pub mod tables;

// Re-export commonly used items for cleaner imports
pub use formatters::{format_bytes, format_percent, format_timestamp};
pub use prompts::{dimmed, error, info, success, warn, DialoguerPrompt, FixedAnswers};
pub use tables::{print_process_table, print_summary};
