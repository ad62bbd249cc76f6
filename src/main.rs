use std::path::Path;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};

use procwatch::commands;
use procwatch::core::config::MonitorConfig;

fn cli() -> Command {
    Command::new("procwatch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Process monitoring engine")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Load settings from a JSON config file")
                .global(true),
        )
        .subcommand(
            Command::new("info")
                .about("Show static host information")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("top")
                .about("Print the processes using the most CPU")
                .arg(
                    Arg::new("count")
                        .short('n')
                        .long("count")
                        .value_name("N")
                        .help("Number of processes to list")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("filter")
                        .short('f')
                        .long("filter")
                        .value_name("QUERY")
                        .help("Only show rows containing QUERY (case-insensitive)"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("watch")
                .about("Monitor CPU, memory and processes until Ctrl+C")
                .arg(
                    Arg::new("interval")
                        .short('i')
                        .long("interval")
                        .value_name("MS")
                        .help("Tick period in milliseconds")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("min-interval")
                        .long("min-interval")
                        .value_name("MS")
                        .help("Minimum time between two samples in milliseconds")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("count")
                        .short('n')
                        .long("count")
                        .value_name("N")
                        .help("Number of processes to list")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("filter")
                        .short('f')
                        .long("filter")
                        .value_name("QUERY")
                        .help("Only show rows containing QUERY (case-insensitive)"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print one JSON snapshot per line")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("kill")
                .about("Terminate a process, asking before each step")
                .arg(
                    Arg::new("pid")
                        .help("Process ID")
                        .required(true)
                        .index(1)
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    Arg::new("yes")
                        .short('y')
                        .long("yes")
                        .help("Skip the first confirmation")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help("Force kill without asking if the process does not exit")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the report as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn load_config(matches: &clap::ArgMatches) -> Result<MonitorConfig> {
    match matches.get_one::<String>("config") {
        Some(path) => MonitorConfig::load_from(Path::new(path))
            .with_context(|| format!("Failed to load config from {}", path)),
        None => MonitorConfig::load().context("Failed to load config"),
    }
}

fn main() -> Result<()> {
    procwatch::init_logging();

    let matches = cli().get_matches();
    let config = load_config(&matches)?;

    match matches.subcommand() {
        Some(("info", sub_matches)) => commands::info(sub_matches),
        Some(("top", sub_matches)) => commands::top(sub_matches, &config),
        Some(("watch", sub_matches)) => commands::watch(sub_matches, &config),
        Some(("kill", sub_matches)) => commands::kill(sub_matches, &config),
        _ => Ok(()),
    }
}
