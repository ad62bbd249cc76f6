//! Rate-limited sampling.
//!
//! The scheduler is driven by an external tick. Each tick is checked against a
//! [`SampleGate`]; only ticks that arrive at least `min_sample_interval` after
//! the last accepted sample read the host and re-enumerate processes.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::config::MonitorConfig;
use crate::error::Result;

use super::collector::HostSampler;
use super::history::MetricsHistory;
use super::metrics::MonitorSnapshot;
use super::registry::{ProcessRegistry, ProcessSource};

/// Monotonic minimum-interval gate.
///
/// `tolerance` absorbs tick delivery jitter: a tick that lands slightly less
/// than `min_interval` after the last accepted sample still counts as due.
#[derive(Debug, Clone)]
pub struct SampleGate {
    min_interval: Duration,
    tolerance: Duration,
    last_accepted: Option<Instant>,
}

impl SampleGate {
    pub fn new(min_interval: Duration) -> Self {
        Self::with_tolerance(min_interval, Duration::ZERO)
    }

    pub fn with_tolerance(min_interval: Duration, tolerance: Duration) -> Self {
        Self {
            min_interval,
            tolerance: tolerance.min(min_interval),
            last_accepted: None,
        }
    }

    /// Whether a sample taken at `now` is due. The first check always is.
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_accepted {
            None => true,
            Some(last) => {
                now.saturating_duration_since(last) + self.tolerance >= self.min_interval
            }
        }
    }

    pub fn accept(&mut self, now: Instant) {
        self.last_accepted = Some(now);
    }

    pub fn last_accepted(&self) -> Option<Instant> {
        self.last_accepted
    }
}

/// Owns the history buffers and the process registry.
///
/// All mutation happens through [`on_tick`](Self::on_tick) and
/// [`sample_now`](Self::sample_now); observers only ever see the published
/// `Arc<MonitorSnapshot>`.
pub struct SamplingScheduler<H, S> {
    gate: SampleGate,
    host: H,
    registry: ProcessRegistry<S>,
    history: MetricsHistory,
    sequence: u64,
    latest: Option<Arc<MonitorSnapshot>>,
}

impl<H: HostSampler, S: ProcessSource> SamplingScheduler<H, S> {
    pub fn new(config: &MonitorConfig, host: H, source: S) -> Self {
        Self {
            // Half a tick of slack keeps late ticks on the configured cadence
            gate: SampleGate::with_tolerance(
                config.min_sample_interval(),
                config.tick_period() / 2,
            ),
            host,
            registry: ProcessRegistry::new(source, config.top_k),
            history: MetricsHistory::with_capacity(config.history_capacity),
            sequence: 0,
            latest: None,
        }
    }

    /// Handle one tick. Returns the published snapshot when the tick was accepted.
    ///
    /// A tick that fails to read the host still counts as accepted, so the
    /// next attempt waits a full interval.
    pub fn on_tick(&mut self, now: Instant) -> Result<Option<Arc<MonitorSnapshot>>> {
        if !self.gate.is_due(now) {
            return Ok(None);
        }
        self.sample_now(now).map(Some)
    }

    /// Sample immediately, ignoring the gate. Resets the gate to `now`.
    pub fn sample_now(&mut self, now: Instant) -> Result<Arc<MonitorSnapshot>> {
        self.gate.accept(now);

        let reading = self.host.sample()?;
        self.history
            .push(reading.cpu_percent, reading.memory_percent);
        let ranked_processes = self.registry.refresh();

        self.sequence += 1;
        let snapshot = Arc::new(MonitorSnapshot {
            sequence: self.sequence,
            timestamp: chrono::Utc::now().timestamp(),
            cpu_percent: reading.cpu_percent,
            cpu_freq_mhz: reading.cpu_freq_mhz,
            memory_used_bytes: reading.memory_used_bytes,
            memory_total_bytes: reading.memory_total_bytes,
            memory_percent: reading.memory_percent,
            cpu_history: self.history.cpu().values(),
            memory_history: self.history.memory().values(),
            ranked_processes,
        });

        log::trace!(
            "Sample {} accepted: cpu {:.1}%, mem {:.1}%, {} processes",
            snapshot.sequence,
            snapshot.cpu_percent,
            snapshot.memory_percent,
            snapshot.ranked_processes.len()
        );

        self.latest = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    pub fn latest(&self) -> Option<Arc<MonitorSnapshot>> {
        self.latest.clone()
    }

    pub fn history(&self) -> &MetricsHistory {
        &self.history
    }

    pub fn gate(&self) -> &SampleGate {
        &self.gate
    }
}
