//! Plain-text rendering of monitor snapshots.

use colored::*;

use crate::core::system_monitor::{MonitorSnapshot, ProcessSnapshot};
use crate::ui::formatters::{format_bytes, format_percent, format_timestamp, truncate};

const NAME_WIDTH: usize = 28;
const USER_WIDTH: usize = 16;

/// Colour a usage percentage by load
fn colorize_percent(value: f32) -> ColoredString {
    let text = format!("{:>6}", format_percent(value));
    if value >= 80.0 {
        text.red().bold()
    } else if value >= 50.0 {
        text.yellow()
    } else {
        text.normal()
    }
}

pub fn print_summary(snapshot: &MonitorSnapshot) {
    println!(
        "{} #{}  CPU {} @ {:.0} MHz  MEM {} ({} / {})",
        format_timestamp(snapshot.timestamp).dimmed(),
        snapshot.sequence,
        colorize_percent(snapshot.cpu_percent),
        snapshot.cpu_freq_mhz,
        colorize_percent(snapshot.memory_percent),
        format_bytes(snapshot.memory_used_bytes),
        format_bytes(snapshot.memory_total_bytes),
    );
}

/// Print the rows of `processes` whose flag in `visible` is set.
pub fn print_process_table(processes: &[ProcessSnapshot], visible: &[bool]) {
    println!(
        "{}",
        format!(
            "{:>8}  {:<name$}  {:<user$}  {:>6}  {:>6}",
            "PID",
            "NAME",
            "USER",
            "CPU",
            "MEM",
            name = NAME_WIDTH,
            user = USER_WIDTH
        )
        .bold()
    );

    let mut shown = 0;
    for (process, _) in processes
        .iter()
        .zip(visible.iter())
        .filter(|(_, visible)| **visible)
    {
        println!(
            "{:>8}  {:<name$}  {:<user$}  {}  {}",
            process.pid,
            truncate(&process.name, NAME_WIDTH),
            truncate(&process.user, USER_WIDTH),
            colorize_percent(process.cpu_percent),
            colorize_percent(process.memory_percent),
            name = NAME_WIDTH,
            user = USER_WIDTH
        );
        shown += 1;
    }

    if shown == 0 {
        println!("{}", "  (no matching processes)".dimmed());
    }
}
