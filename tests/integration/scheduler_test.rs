use std::time::{Duration, Instant};

use procwatch::core::config::MonitorConfig;
use procwatch::core::system_monitor::{SampleGate, SamplingScheduler};

use super::common::{process, RampHost, StaticProcesses};

#[test]
fn test_two_second_gate_over_five_ticks() {
    let config = MonitorConfig::default();
    let source = StaticProcesses::new(vec![Ok(process(1, "init", 0.0))]);
    let probes = source.probes.clone();
    let mut scheduler = SamplingScheduler::new(&config, RampHost::default(), source);

    let start = Instant::now();
    let mut accepted = Vec::new();
    for secs in 0..=4 {
        if scheduler
            .on_tick(start + Duration::from_secs(secs))
            .unwrap()
            .is_some()
        {
            accepted.push(secs);
        }
    }

    assert_eq!(accepted, vec![0, 2, 4]);
    // Gated ticks do not touch the process table
    assert_eq!(probes.load(std::sync::atomic::Ordering::SeqCst), 3);
}

#[test]
fn test_jittered_ticks_are_not_pushed_to_the_next_slot() {
    let config = MonitorConfig::default();
    let mut scheduler = SamplingScheduler::new(
        &config,
        RampHost::default(),
        StaticProcesses::new(Vec::new()),
    );

    // Ticks delivered a few ms late, first one later than the rest
    let start = Instant::now();
    let ticks = [
        Duration::from_millis(5),
        Duration::from_millis(1_000),
        Duration::from_micros(2_000_100),
        Duration::from_micros(3_000_100),
        Duration::from_micros(4_000_100),
    ];
    let accepted: Vec<Duration> = ticks
        .into_iter()
        .filter(|offset| scheduler.on_tick(start + *offset).unwrap().is_some())
        .collect();

    assert_eq!(accepted, vec![ticks[0], ticks[2], ticks[4]]);
}

#[test]
fn test_history_is_bounded_by_capacity() {
    let config = MonitorConfig {
        history_capacity: 3,
        min_sample_interval_ms: 0,
        ..Default::default()
    };
    let mut scheduler = SamplingScheduler::new(
        &config,
        RampHost::default(),
        StaticProcesses::new(Vec::new()),
    );

    let start = Instant::now();
    let mut last = None;
    for secs in 0..7 {
        last = scheduler.on_tick(start + Duration::from_secs(secs)).unwrap();
    }

    let snapshot = last.unwrap();
    assert_eq!(snapshot.sequence, 7);
    assert_eq!(snapshot.cpu_history, vec![5.0, 6.0, 7.0]);
    assert_eq!(snapshot.memory_history.len(), 3);
}

#[test]
fn test_gate_uses_configured_interval() {
    let mut gate = SampleGate::new(Duration::from_millis(500));
    let start = Instant::now();

    assert!(gate.is_due(start));
    gate.accept(start);
    assert!(!gate.is_due(start + Duration::from_millis(499)));
    assert!(gate.is_due(start + Duration::from_millis(500)));
}
