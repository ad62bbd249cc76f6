use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use procwatch::core::config::MonitorConfig;
use procwatch::core::termination::{
    ProcessControl, ProcessTarget, TerminationController, TerminationOutcome, TerminationSignal,
};
use procwatch::error::{MonitorError, Result};
use procwatch::ui::FixedAnswers;

use super::common::{FakeProcess, SharedProcess};

fn yes_to_all() -> FixedAnswers {
    FixedAnswers {
        confirm: true,
        force: true,
    }
}

#[tokio::test]
async fn test_pid_four_is_guarded_without_signal() {
    let process = SharedProcess::new("alice", true);
    let controller = TerminationController::new(process.clone(), &MonitorConfig::default());

    let report = controller.request(4, &mut yes_to_all()).await;

    assert_eq!(report.outcome, TerminationOutcome::Guarded);
    assert_eq!(process.0.signals_sent(), 0);
    assert!(process.0.alive.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_guard_set_user_is_guarded_without_signal() {
    for user in ["SYSTEM", "LOCAL SERVICE", "NETWORK SERVICE"] {
        let process = SharedProcess::new(user, true);
        let controller = TerminationController::new(process.clone(), &MonitorConfig::default());

        let report = controller.request(5000, &mut yes_to_all()).await;

        assert_eq!(report.outcome, TerminationOutcome::Guarded, "user {}", user);
        assert_eq!(process.0.signals_sent(), 0);
    }
}

#[tokio::test]
async fn test_exit_within_window_is_terminated() {
    let process = SharedProcess::new("alice", true);
    let controller = TerminationController::new(process.clone(), &MonitorConfig::default());

    let report = controller.request(5000, &mut yes_to_all()).await;

    assert_eq!(report.outcome, TerminationOutcome::Terminated);
    assert_eq!(process.0.force_signals.load(Ordering::SeqCst), 0);
    assert!(report.message().contains("terminated successfully"));
}

#[tokio::test(start_paused = true)]
async fn test_unresponsive_process_is_force_killed() {
    let process = SharedProcess::new("alice", false);
    let controller = TerminationController::new(process.clone(), &MonitorConfig::default());

    let started = tokio::time::Instant::now();
    let report = controller.request(5000, &mut yes_to_all()).await;

    assert_eq!(report.outcome, TerminationOutcome::ForceKilled);
    assert!(started.elapsed() >= Duration::from_millis(3000));
    assert_eq!(process.0.graceful_signals.load(Ordering::SeqCst), 1);
    assert_eq!(process.0.force_signals.load(Ordering::SeqCst), 1);
    assert!(!process.0.alive.load(Ordering::SeqCst));
}

#[tokio::test(start_paused = true)]
async fn test_declined_force_leaves_process_running() {
    let process = SharedProcess::new("alice", false);
    let controller = TerminationController::new(process.clone(), &MonitorConfig::default());
    let mut answers = FixedAnswers {
        confirm: true,
        force: false,
    };

    let report = controller.request(5000, &mut answers).await;

    assert_eq!(report.outcome, TerminationOutcome::Abandoned);
    assert!(process.0.alive.load(Ordering::SeqCst));
    assert_eq!(process.0.signals_sent(), 1);
}

#[tokio::test]
async fn test_vanished_process_is_not_found() {
    let process = SharedProcess::new("alice", true);
    process.0.alive.store(false, Ordering::SeqCst);
    let controller = TerminationController::new(process.clone(), &MonitorConfig::default());

    let report = controller.request(5000, &mut yes_to_all()).await;

    assert_eq!(report.outcome, TerminationOutcome::NotFound);
    assert_eq!(report.name, None);
}

#[tokio::test]
async fn test_unknown_owner_fails_closed() {
    let process = SharedProcess(Arc::new(FakeProcess::owned_by(None, true)));
    let controller = TerminationController::new(process.clone(), &MonitorConfig::default());

    let report = controller.request(5000, &mut yes_to_all()).await;

    assert_eq!(report.outcome, TerminationOutcome::AccessDenied);
    assert_eq!(process.0.signals_sent(), 0);
    assert!(process.0.alive.load(Ordering::SeqCst));
}

struct DeniedControl;

impl ProcessControl for DeniedControl {
    fn inspect(&self, pid: u32) -> Result<ProcessTarget> {
        Ok(ProcessTarget {
            pid,
            name: "daemon".to_string(),
            user: Some("root".to_string()),
        })
    }

    fn signal(&self, pid: u32, _signal: TerminationSignal) -> Result<()> {
        Err(MonitorError::permission_denied(format!(
            "cannot signal pid {}",
            pid
        )))
    }

    fn is_alive(&self, _pid: u32) -> bool {
        true
    }
}

#[tokio::test]
async fn test_permission_error_is_access_denied() {
    let controller = TerminationController::new(DeniedControl, &MonitorConfig::default());

    let report = controller.request(5000, &mut yes_to_all()).await;

    assert_eq!(report.outcome, TerminationOutcome::AccessDenied);
    assert_eq!(report.name.as_deref(), Some("daemon"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_real_child_process_is_terminated() {
    use procwatch::core::termination::SystemProcessControl;

    let mut child = std::process::Command::new("sleep")
        .arg("30")
        .spawn()
        .unwrap();
    let controller =
        TerminationController::new(SystemProcessControl::new(), &MonitorConfig::default());
    let mut answers = FixedAnswers {
        confirm: true,
        force: false,
    };

    let report = controller.request(child.id(), &mut answers).await;

    assert_eq!(report.outcome, TerminationOutcome::Terminated);
    assert!(!child.wait().unwrap().success());
}
