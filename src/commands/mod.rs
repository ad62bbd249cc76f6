// Command handlers module
pub mod info;
pub mod kill;
pub mod top;
pub mod watch;

// Re-exports for cleaner imports
pub use info::execute as info;
pub use kill::execute as kill;
pub use top::execute as top;
pub use watch::execute as watch;
