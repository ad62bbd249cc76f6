//! Tokio runtime that drives sampling and termination.
//!
//! A single task owns the [`SamplingScheduler`]; every accepted sample is
//! published as an `Arc<MonitorSnapshot>` through a watch channel. The
//! termination workflow runs on the caller's thread and talks to the sampling
//! task only through [`MonitorCommand::RefreshNow`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::time::{interval, Instant, MissedTickBehavior};

use crate::core::config::MonitorConfig;
use crate::core::system_info::{self, SystemInfo};
use crate::core::termination::{
    ProcessControl, RefreshTrigger, SystemProcessControl, TerminationController,
    TerminationOutcome, TerminationPrompt, TerminationReport, TerminationRequest,
};
use crate::error::{MonitorError, Result};

use super::collector::{HostSampler, SysinfoHostSampler, SysinfoProcessSource};
use super::metrics::MonitorSnapshot;
use super::registry::ProcessSource;
use super::scheduler::SamplingScheduler;
use super::search;

/// Messages to the sampling task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorCommand {
    /// Sample immediately, bypassing the minimum interval
    RefreshNow,
}

impl RefreshTrigger for mpsc::Sender<MonitorCommand> {
    fn request_refresh(&self) -> Result<()> {
        match self.try_send(MonitorCommand::RefreshNow) {
            // A queued refresh already covers this one
            Ok(()) | Err(TrySendError::Full(_)) => Ok(()),
            Err(TrySendError::Closed(_)) => Err(MonitorError::runtime("sampling task has stopped")),
        }
    }
}

/// Wrapper around the Tokio runtime for background sampling.
pub struct MonitorRuntime {
    snapshot_rx: watch::Receiver<Arc<MonitorSnapshot>>,
    command_tx: mpsc::Sender<MonitorCommand>,
    shutdown_tx: broadcast::Sender<()>,
    terminator: TerminationController<Box<dyn ProcessControl>>,
    runtime: tokio::runtime::Runtime,
}

impl MonitorRuntime {
    /// Start sampling the local host.
    pub fn start(config: MonitorConfig) -> Result<Self> {
        Self::start_with(
            config,
            SysinfoHostSampler::new(),
            SysinfoProcessSource::new(),
            Box::new(SystemProcessControl::new()),
        )
    }

    /// Start with explicit host, process and control backends.
    pub fn start_with<H, S>(
        config: MonitorConfig,
        host: H,
        source: S,
        control: Box<dyn ProcessControl>,
    ) -> Result<Self>
    where
        H: HostSampler + 'static,
        S: ProcessSource + 'static,
    {
        config.validate()?;
        let info = system_info::cached();
        log::debug!("Host: {} {} ({})", info.os_name, info.os_version, info.processor);
        log::info!(
            "Starting monitor: tick {:?}, min interval {:?}, top {}",
            config.tick_period(),
            config.min_sample_interval(),
            config.top_k
        );

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_time()
            .thread_name("procwatch-worker")
            .build()?;

        let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(MonitorSnapshot::default()));
        let (command_tx, command_rx) = mpsc::channel::<MonitorCommand>(8);
        let (shutdown_tx, _) = broadcast::channel::<()>(1);

        let scheduler = SamplingScheduler::new(&config, host, source);
        runtime.spawn(sampling_task(
            scheduler,
            config.tick_period(),
            snapshot_tx,
            command_rx,
            shutdown_tx.subscribe(),
        ));

        let terminator = TerminationController::new(control, &config)
            .with_refresh(Box::new(command_tx.clone()));

        Ok(Self {
            snapshot_rx,
            command_tx,
            shutdown_tx,
            terminator,
            runtime,
        })
    }

    /// Most recent published sample, if any has been taken yet
    pub fn latest(&self) -> Option<Arc<MonitorSnapshot>> {
        let snapshot = self.snapshot_rx.borrow().clone();
        (snapshot.sequence > 0).then_some(snapshot)
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<MonitorSnapshot>> {
        self.snapshot_rx.clone()
    }

    /// Block until `receiver` sees a new sample or `timeout` passes.
    pub fn wait_for_update(
        &self,
        receiver: &mut watch::Receiver<Arc<MonitorSnapshot>>,
        timeout: Duration,
    ) -> Option<Arc<MonitorSnapshot>> {
        self.runtime.block_on(async {
            match tokio::time::timeout(timeout, receiver.changed()).await {
                Ok(Ok(())) => Some(receiver.borrow_and_update().clone()),
                _ => None,
            }
        })
    }

    pub fn refresh_now(&self) -> Result<()> {
        self.command_tx.request_refresh()
    }

    /// Visibility of each row of the latest ranked list
    pub fn search(&self, query: &str) -> Vec<bool> {
        let snapshot = self.snapshot_rx.borrow().clone();
        search::visibility(snapshot.ranked_processes.as_slice(), query)
    }

    pub fn system_info(&self) -> &'static SystemInfo {
        system_info::cached()
    }

    /// Run the termination workflow for `pid`, blocking the calling thread.
    ///
    /// Called from inside an async context this does not block; it reports
    /// an `Error` outcome and sends nothing. Use
    /// [`terminate`](Self::terminate) there instead.
    pub fn request_termination(
        &self,
        pid: u32,
        prompt: &mut dyn TerminationPrompt,
    ) -> TerminationReport {
        if tokio::runtime::Handle::try_current().is_ok() {
            log::warn!("request_termination called from an async context");
            return TerminationReport {
                request: TerminationRequest::new(pid),
                name: None,
                outcome: TerminationOutcome::Error(
                    "cannot block inside an async runtime; use terminate()".to_string(),
                ),
                finished_at: chrono::Utc::now(),
            };
        }
        self.runtime.block_on(self.terminator.request(pid, prompt))
    }

    /// Async form of [`request_termination`](Self::request_termination).
    ///
    /// The graceful wait runs on the caller's runtime, which needs the time
    /// driver enabled.
    pub async fn terminate(
        &self,
        pid: u32,
        prompt: &mut dyn TerminationPrompt,
    ) -> TerminationReport {
        self.terminator.request(pid, prompt).await
    }

    /// Stop the sampling task and the runtime.
    pub fn shutdown(self) {
        log::info!("Shutting down monitor runtime");
        let _ = self.shutdown_tx.send(());
        self.runtime.shutdown_timeout(Duration::from_secs(1));
    }
}

/// Sampling loop: one scheduler tick per period, plus on-demand refreshes.
pub async fn sampling_task<H, S>(
    mut scheduler: SamplingScheduler<H, S>,
    tick_period: Duration,
    snapshot_tx: watch::Sender<Arc<MonitorSnapshot>>,
    mut commands: mpsc::Receiver<MonitorCommand>,
    mut shutdown: broadcast::Receiver<()>,
) where
    H: HostSampler,
    S: ProcessSource,
{
    let mut ticker = interval(tick_period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            tick = ticker.tick() => {
                // Scheduled tick time, so wake-up delay does not count against the gate
                match scheduler.on_tick(tick.into_std()) {
                    Ok(Some(snapshot)) => {
                        // watch::send() only fails without receivers
                        let _ = snapshot_tx.send(snapshot);
                    }
                    Ok(None) => {}
                    Err(e) => log::error!("Sampling tick failed: {}", e),
                }
            }
            Some(command) = commands.recv() => match command {
                MonitorCommand::RefreshNow => {
                    match scheduler.sample_now(Instant::now().into_std()) {
                        Ok(snapshot) => {
                            let _ = snapshot_tx.send(snapshot);
                        }
                        Err(e) => log::error!("Refresh failed: {}", e),
                    }
                }
            },
            _ = shutdown.recv() => {
                log::debug!("Sampling task shutting down");
                break;
            }
        }
    }
}
