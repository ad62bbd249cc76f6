//! Guarded, multi-stage process termination.
//!
//! ```text
//! Requested -> Guarded | Confirmed -> GracefulWait -> Terminated
//!                                                  \-> TimedOut -> ForceConfirm -> ForceKilled | Abandoned
//! ```
//!
//! Nothing is signalled before the caller confirms through a
//! [`TerminationPrompt`], and the force kill needs a second, separate
//! confirmation. Every terminal state triggers one registry refresh.

use std::time::Duration;

use chrono::Utc;
use log::{info, warn};

use crate::core::config::MonitorConfig;
use crate::error::Result;

use super::control::{ProcessControl, TerminationSignal};
use super::guard;
use super::outcome::{TerminationOutcome, TerminationReport, TerminationRequest};

/// Confirmation the workflow needs from its caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    NeedConfirmation { pid: u32, name: String },
    /// The process ignored the graceful signal
    NeedForceConfirmation { pid: u32, name: String },
}

/// Answers confirmation prompts synchronously.
pub trait TerminationPrompt {
    fn confirm(&mut self, prompt: &Prompt) -> bool;
}

/// Asks the sampler for an out-of-band refresh
pub trait RefreshTrigger: Send + Sync {
    fn request_refresh(&self) -> Result<()>;
}

pub struct TerminationController<C> {
    control: C,
    graceful_timeout: Duration,
    poll_interval: Duration,
    refresh: Option<Box<dyn RefreshTrigger>>,
}

impl<C: ProcessControl> TerminationController<C> {
    pub fn new(control: C, config: &MonitorConfig) -> Self {
        Self {
            control,
            graceful_timeout: config.graceful_timeout(),
            poll_interval: config.exit_poll_interval(),
            refresh: None,
        }
    }

    pub fn with_refresh(mut self, trigger: Box<dyn RefreshTrigger>) -> Self {
        self.refresh = Some(trigger);
        self
    }

    pub fn control(&self) -> &C {
        &self.control
    }

    /// Run the whole workflow for `pid`.
    pub async fn request(
        &self,
        pid: u32,
        prompt: &mut dyn TerminationPrompt,
    ) -> TerminationReport {
        let request = TerminationRequest::new(pid);
        let mut name = None;
        let outcome = self.run(pid, prompt, &mut name).await;

        info!("Termination of pid {}: {}", pid, outcome);

        if let Some(trigger) = &self.refresh {
            if let Err(e) = trigger.request_refresh() {
                warn!("Post-termination refresh failed: {}", e);
            }
        }

        TerminationReport {
            request,
            name,
            outcome,
            finished_at: Utc::now(),
        }
    }

    async fn run(
        &self,
        pid: u32,
        prompt: &mut dyn TerminationPrompt,
        name: &mut Option<String>,
    ) -> TerminationOutcome {
        if guard::is_reserved_pid(pid) {
            info!("Refusing to terminate reserved pid {}", pid);
            return TerminationOutcome::Guarded;
        }

        let target = match self.control.inspect(pid) {
            Ok(target) => target,
            Err(e) => return TerminationOutcome::from_error(e),
        };
        *name = Some(target.name.clone());

        let Some(user) = target.user.as_deref() else {
            info!(
                "Refusing to terminate {} (pid {}): owner could not be read",
                target.name, pid
            );
            return TerminationOutcome::AccessDenied;
        };
        if guard::is_guarded_account(user) {
            info!(
                "Refusing to terminate {} (pid {}) owned by {}",
                target.name, pid, user
            );
            return TerminationOutcome::Guarded;
        }

        let confirmed = prompt.confirm(&Prompt::NeedConfirmation {
            pid,
            name: target.name.clone(),
        });
        if !confirmed {
            return TerminationOutcome::Declined;
        }

        if let Err(e) = self.control.signal(pid, TerminationSignal::Graceful) {
            warn!("Graceful signal to pid {} failed: {}", pid, e);
            return TerminationOutcome::from_error(e);
        }

        if self.wait_for_exit(pid).await {
            return TerminationOutcome::Terminated;
        }

        info!(
            "{} (pid {}) still running after {:?}",
            target.name, pid, self.graceful_timeout
        );

        let force = prompt.confirm(&Prompt::NeedForceConfirmation {
            pid,
            name: target.name.clone(),
        });
        if !force {
            return TerminationOutcome::Abandoned;
        }

        match self.control.signal(pid, TerminationSignal::Force) {
            Ok(()) => TerminationOutcome::ForceKilled,
            Err(e) => {
                warn!("Force kill of pid {} failed: {}", pid, e);
                TerminationOutcome::from_error(e)
            }
        }
    }

    /// Poll liveness until the process exits or the graceful timeout passes.
    async fn wait_for_exit(&self, pid: u32) -> bool {
        let deadline = tokio::time::Instant::now() + self.graceful_timeout;
        loop {
            if !self.control.is_alive(pid) {
                return true;
            }
            let now = tokio::time::Instant::now();
            if now >= deadline {
                return false;
            }
            tokio::time::sleep(self.poll_interval.min(deadline - now)).await;
        }
    }
}
