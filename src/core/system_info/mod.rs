pub mod collector;
pub mod types;

pub use collector::{cached, collect, is_collected};
pub use types::*;
