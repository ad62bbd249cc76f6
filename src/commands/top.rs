//! One-shot ranked process listing.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::core::config::MonitorConfig;
use crate::core::system_monitor::{
    search, ProcessSnapshot, SamplingScheduler, SysinfoHostSampler, SysinfoProcessSource,
};
use crate::ui::{print_process_table, print_summary};

pub fn execute(matches: &ArgMatches, config: &MonitorConfig) -> Result<()> {
    let mut config = config.clone();
    if let Some(count) = matches.get_one::<usize>("count") {
        config.top_k = *count;
    }
    config.validate()?;

    let query = matches
        .get_one::<String>("filter")
        .map(String::as_str)
        .unwrap_or("");

    let mut scheduler =
        SamplingScheduler::new(&config, SysinfoHostSampler::new(), SysinfoProcessSource::new());

    // CPU usage is relative to the previous refresh
    scheduler
        .sample_now(Instant::now())
        .context("Failed to take the warm-up sample")?;
    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    let snapshot = scheduler
        .sample_now(Instant::now())
        .context("Failed to sample processes")?;

    let processes = snapshot.ranked_processes.as_slice();
    let visible = search::visibility(processes, query);

    if matches.get_flag("json") {
        let rows: Vec<&ProcessSnapshot> = processes
            .iter()
            .zip(&visible)
            .filter(|(_, shown)| **shown)
            .map(|(process, _)| process)
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    print_summary(&snapshot);
    println!();
    print_process_table(processes, &visible);
    Ok(())
}
