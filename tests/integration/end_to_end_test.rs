use std::time::Duration;

use procwatch::core::config::MonitorConfig;
use procwatch::core::system_info;
use procwatch::core::system_monitor::MonitorRuntime;
use procwatch::core::termination::TerminationOutcome;
use procwatch::ui::FixedAnswers;

use super::common::{process, vanished, RampHost, SharedProcess, StaticProcesses};

fn fast_config() -> MonitorConfig {
    MonitorConfig {
        tick_period_ms: 20,
        min_sample_interval_ms: 40,
        graceful_timeout_ms: 200,
        exit_poll_interval_ms: 10,
        ..Default::default()
    }
}

fn start(process_control: SharedProcess) -> MonitorRuntime {
    let source = StaticProcesses::new(vec![
        Ok(process(10, "alpha", 50.0)),
        vanished(15),
        Ok(process(20, "beta", 75.0)),
        Ok(process(30, "gamma", 75.0)),
    ]);
    MonitorRuntime::start_with(
        fast_config(),
        RampHost::default(),
        source,
        Box::new(process_control),
    )
    .unwrap()
}

#[test]
fn test_runtime_publishes_ranked_snapshot() {
    let runtime = start(SharedProcess::new("alice", true));
    let mut updates = runtime.subscribe();

    let snapshot = runtime
        .wait_for_update(&mut updates, Duration::from_secs(5))
        .unwrap();

    let names: Vec<&str> = snapshot
        .ranked_processes
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["beta", "gamma", "alpha"]);
    assert_eq!(snapshot.memory_total_bytes, 8 * 1024);
    assert!(runtime.latest().is_some());

    runtime.shutdown();
}

#[test]
fn test_search_is_aligned_with_latest_list() {
    let runtime = start(SharedProcess::new("alice", true));
    let mut updates = runtime.subscribe();
    runtime
        .wait_for_update(&mut updates, Duration::from_secs(5))
        .unwrap();

    assert_eq!(runtime.search("GAM"), vec![false, true, false]);
    assert_eq!(runtime.search(""), vec![true, true, true]);

    runtime.shutdown();
}

#[test]
fn test_termination_triggers_refresh() {
    let control = SharedProcess::new("alice", true);
    let config = MonitorConfig {
        // Long gate so only the forced refresh can publish a second sample
        min_sample_interval_ms: 60_000,
        ..fast_config()
    };
    let runtime = MonitorRuntime::start_with(
        config,
        RampHost::default(),
        StaticProcesses::new(vec![Ok(process(500, "target", 1.0))]),
        Box::new(control.clone()),
    )
    .unwrap();
    let mut updates = runtime.subscribe();
    let first = runtime
        .wait_for_update(&mut updates, Duration::from_secs(5))
        .unwrap();
    assert_eq!(first.sequence, 1);

    let mut answers = FixedAnswers {
        confirm: true,
        force: false,
    };
    let report = runtime.request_termination(500, &mut answers);
    assert_eq!(report.outcome, TerminationOutcome::Terminated);

    let refreshed = runtime
        .wait_for_update(&mut updates, Duration::from_secs(5))
        .unwrap();
    assert_eq!(refreshed.sequence, 2);

    runtime.shutdown();
}

#[test]
fn test_refresh_now_publishes_immediately() {
    let config = MonitorConfig {
        min_sample_interval_ms: 60_000,
        ..fast_config()
    };
    let runtime = MonitorRuntime::start_with(
        config,
        RampHost::default(),
        StaticProcesses::new(Vec::new()),
        Box::new(SharedProcess::new("alice", true)),
    )
    .unwrap();
    let mut updates = runtime.subscribe();
    runtime
        .wait_for_update(&mut updates, Duration::from_secs(5))
        .unwrap();

    runtime.refresh_now().unwrap();

    let snapshot = runtime
        .wait_for_update(&mut updates, Duration::from_secs(5))
        .unwrap();
    assert_eq!(snapshot.sequence, 2);
    assert_eq!(snapshot.cpu_history, vec![1.0, 2.0]);

    runtime.shutdown();
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = MonitorConfig {
        top_k: 0,
        ..Default::default()
    };
    let result = MonitorRuntime::start_with(
        config,
        RampHost::default(),
        StaticProcesses::new(Vec::new()),
        Box::new(SharedProcess::new("alice", true)),
    );
    assert!(result.is_err());
}

#[test]
fn test_system_info_is_collected_at_start() {
    let runtime = start(SharedProcess::new("alice", true));
    assert!(system_info::is_collected());
    assert!(!runtime.system_info().os_name.is_empty());
    runtime.shutdown();
}

#[test]
fn test_blocking_termination_inside_async_context_is_refused() {
    let control = SharedProcess::new("alice", true);
    let runtime = start(control.clone());
    let caller = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();

    let report = caller.block_on(async {
        let mut answers = FixedAnswers {
            confirm: true,
            force: true,
        };
        runtime.request_termination(500, &mut answers)
    });

    assert!(matches!(report.outcome, TerminationOutcome::Error(_)));
    assert_eq!(control.0.signals_sent(), 0);

    let report = caller.block_on(async {
        let mut answers = FixedAnswers {
            confirm: true,
            force: true,
        };
        runtime.terminate(500, &mut answers).await
    });
    assert_eq!(report.outcome, TerminationOutcome::Terminated);

    drop(caller);
    runtime.shutdown();
}
