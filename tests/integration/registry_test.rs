use procwatch::core::system_monitor::{rank_processes, ProcessRegistry};

use super::common::{process, vanished, StaticProcesses};

#[test]
fn test_equal_cpu_keeps_enumeration_order() {
    let source = StaticProcesses::new(vec![
        Ok(process(10, "alpha", 50.0)),
        Ok(process(20, "beta", 75.0)),
        Ok(process(30, "gamma", 75.0)),
    ]);
    let mut registry = ProcessRegistry::new(source, 50);

    let names: Vec<String> = registry
        .refresh()
        .iter()
        .map(|p| p.name.clone())
        .collect();

    assert_eq!(names, vec!["beta", "gamma", "alpha"]);
}

#[test]
fn test_list_is_sorted_and_bounded() {
    let entries = (1..=200)
        .map(|pid| Ok(process(pid, "worker", ((pid * 37) % 101) as f32)))
        .collect();
    let mut registry = ProcessRegistry::new(StaticProcesses::new(entries), 50);

    let ranked = registry.refresh();

    assert_eq!(ranked.len(), 50);
    assert!(ranked
        .as_slice()
        .windows(2)
        .all(|pair| pair[0].cpu_percent >= pair[1].cpu_percent));
}

#[test]
fn test_failed_entry_is_absent_others_remain() {
    let source = StaticProcesses::new(vec![
        Ok(process(100, "editor", 3.0)),
        vanished(101),
        Ok(process(102, "shell", 1.0)),
    ]);
    let mut registry = ProcessRegistry::new(source, 50);

    assert_eq!(registry.refresh().pids(), vec![100, 102]);
}

#[test]
fn test_each_refresh_reenumerates() {
    let source = StaticProcesses::new(vec![Ok(process(1, "init", 0.0))]);
    let probes = source.probes.clone();
    let mut registry = ProcessRegistry::new(source, 50);

    registry.refresh();
    registry.refresh();

    assert_eq!(probes.load(std::sync::atomic::Ordering::SeqCst), 2);
}

#[test]
fn test_fewer_processes_than_top_k() {
    let ranked = rank_processes(vec![process(5, "only", 0.0)], 50);
    assert_eq!(ranked.len(), 1);
}
