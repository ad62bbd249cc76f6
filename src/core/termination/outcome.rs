use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MonitorError;

/// One termination attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminationRequest {
    pub pid: u32,
    pub requested_at: DateTime<Utc>,
}

impl TerminationRequest {
    pub fn new(pid: u32) -> Self {
        Self {
            pid,
            requested_at: Utc::now(),
        }
    }
}

/// Final state of a termination attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "message", rename_all = "snake_case")]
pub enum TerminationOutcome {
    /// Exited within the graceful window
    Terminated,
    /// Killed after ignoring the graceful signal
    ForceKilled,
    /// Force kill declined; the process was left running
    Abandoned,
    /// Protected process, nothing was sent
    Guarded,
    /// First confirmation declined, nothing was sent
    Declined,
    NotFound,
    AccessDenied,
    Error(String),
}

impl TerminationOutcome {
    /// Map an error raised at any stage of the workflow.
    pub fn from_error(error: MonitorError) -> Self {
        match error {
            MonitorError::ProcessNotFound(_) => TerminationOutcome::NotFound,
            MonitorError::PermissionDenied(_) => TerminationOutcome::AccessDenied,
            other => TerminationOutcome::Error(other.to_string()),
        }
    }

    /// Whether the target process is known to be gone
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            TerminationOutcome::Terminated | TerminationOutcome::ForceKilled
        )
    }
}

impl fmt::Display for TerminationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationOutcome::Terminated => write!(f, "terminated"),
            TerminationOutcome::ForceKilled => write!(f, "force killed (was not responding)"),
            TerminationOutcome::Abandoned => write!(f, "abandoned"),
            TerminationOutcome::Guarded => write!(f, "guarded"),
            TerminationOutcome::Declined => write!(f, "declined"),
            TerminationOutcome::NotFound => write!(f, "not found"),
            TerminationOutcome::AccessDenied => write!(f, "access denied"),
            TerminationOutcome::Error(message) => write!(f, "error: {}", message),
        }
    }
}

/// What happened to a [`TerminationRequest`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminationReport {
    pub request: TerminationRequest,
    /// Process name, when it was resolved before the workflow ended
    pub name: Option<String>,
    pub outcome: TerminationOutcome,
    pub finished_at: DateTime<Utc>,
}

impl TerminationReport {
    /// Human readable summary of the outcome
    pub fn message(&self) -> String {
        let pid = self.request.pid;
        let target = match &self.name {
            Some(name) => format!("Process {} (PID: {})", name, pid),
            None => format!("Process {}", pid),
        };

        match &self.outcome {
            TerminationOutcome::Terminated => format!("{} was terminated successfully.", target),
            TerminationOutcome::ForceKilled => {
                format!("{} was not responding and was force killed.", target)
            }
            TerminationOutcome::Abandoned => {
                format!("{} is still running; force kill was declined.", target)
            }
            TerminationOutcome::Guarded => {
                format!("Cannot terminate system process: {}.", target)
            }
            TerminationOutcome::Declined => format!("Termination of {} was cancelled.", target),
            TerminationOutcome::NotFound => format!(
                "{} not found. The process may have already been terminated.",
                target
            ),
            TerminationOutcome::AccessDenied => format!(
                "Access denied for {}. Administrator rights are required to terminate it.",
                target
            ),
            TerminationOutcome::Error(message) => {
                format!("Failed to terminate {}: {}", target, message)
            }
        }
    }
}
