//! Continuous monitoring until Ctrl+C.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::*;

use crate::core::config::MonitorConfig;
use crate::core::system_monitor::{search, MonitorRuntime};
use crate::ui::{print_process_table, print_summary};

pub fn execute(matches: &ArgMatches, config: &MonitorConfig) -> Result<()> {
    let mut config = config.clone();
    if let Some(interval) = matches.get_one::<u64>("interval") {
        config.tick_period_ms = *interval;
    }
    if let Some(min_interval) = matches.get_one::<u64>("min-interval") {
        config.min_sample_interval_ms = *min_interval;
    }
    if let Some(count) = matches.get_one::<usize>("count") {
        config.top_k = *count;
    }

    let query = matches
        .get_one::<String>("filter")
        .cloned()
        .unwrap_or_default();
    let json_output = matches.get_flag("json");

    let stop = Arc::new(AtomicBool::new(false));
    let stop_clone = stop.clone();
    ctrlc::set_handler(move || {
        stop_clone.store(true, Ordering::Relaxed);
    })
    .map_err(|e| anyhow::anyhow!("Failed to set Ctrl+C handler: {}", e))?;

    let runtime = MonitorRuntime::start(config.clone()).context("Failed to start monitor")?;
    let mut updates = runtime.subscribe();

    if !json_output {
        println!("{}", "Monitoring processes. Press Ctrl+C to stop.".dimmed());
    }

    while !stop.load(Ordering::Relaxed) {
        let Some(snapshot) = runtime.wait_for_update(&mut updates, config.tick_period()) else {
            continue;
        };

        if json_output {
            println!("{}", serde_json::to_string(&*snapshot)?);
            continue;
        }

        let processes = snapshot.ranked_processes.as_slice();
        println!();
        print_summary(&snapshot);
        print_process_table(processes, &search::visibility(processes, &query));
    }

    runtime.shutdown();
    Ok(())
}
