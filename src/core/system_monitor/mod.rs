//! Sampling, ranking and filtering of host and process metrics.

mod collector;
mod history;
mod metrics;
pub mod registry;
pub mod runtime;
pub mod scheduler;
pub mod search;

pub use collector::{HostSampler, SysinfoHostSampler, SysinfoProcessSource};
pub use history::{MetricsHistory, TimeSeriesBuffer};
pub use metrics::{HostReading, MonitorSnapshot, ProcessSnapshot, RankedProcessList};
pub use registry::{
    rank_processes, ProcessProbe, ProcessRegistry, ProcessSource, SkipReason, SkippedProcess,
};
pub use runtime::{sampling_task, MonitorCommand, MonitorRuntime};
pub use scheduler::{SampleGate, SamplingScheduler};
pub use search::{matches, visibility};
