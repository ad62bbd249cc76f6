use colored::*;

use crate::core::system_info::SystemInfo;
use crate::ui::formatters::format_optional_bytes;

fn print_section_header(title: &str) {
    println!("\n{}", title.bold().green());
    println!("{}", "-".repeat(title.len()));
}

fn count_or_unknown(count: Option<usize>) -> String {
    count
        .map(|n| n.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

pub fn format_system_info(info: &SystemInfo) {
    println!("\n{}", "SYSTEM INFORMATION".bold().bright_cyan());
    println!("{}", "=".repeat(60));

    print_section_header("OS");
    println!("  Name: {}", info.os_name);
    println!("  Version: {}", info.os_version);

    print_section_header("CPU");
    println!("  Processor: {}", info.processor);
    println!(
        "  Cores: {} | Threads: {}",
        count_or_unknown(info.core_count),
        count_or_unknown(info.thread_count)
    );

    print_section_header("Memory");
    println!("  Total: {}", format_optional_bytes(info.total_memory_bytes));

    println!();
}
