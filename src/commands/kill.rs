use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::core::config::MonitorConfig;
use crate::core::system_monitor::MonitorRuntime;
use crate::core::termination::TerminationOutcome;
use crate::ui::{self, DialoguerPrompt};

pub fn execute(matches: &ArgMatches, config: &MonitorConfig) -> Result<()> {
    let pid = *matches
        .get_one::<u32>("pid")
        .context("PID argument is required")?;
    let mut prompt = DialoguerPrompt::new(matches.get_flag("yes"), matches.get_flag("force"));

    let runtime = MonitorRuntime::start(config.clone()).context("Failed to start monitor")?;
    let report = runtime.request_termination(pid, &mut prompt);
    runtime.shutdown();

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let message = report.message();
    match report.outcome {
        TerminationOutcome::Terminated | TerminationOutcome::ForceKilled => ui::success(&message),
        TerminationOutcome::Declined | TerminationOutcome::Abandoned => ui::dimmed(&message),
        TerminationOutcome::Guarded | TerminationOutcome::NotFound => ui::warn(&message),
        TerminationOutcome::AccessDenied | TerminationOutcome::Error(_) => ui::error(&message),
    }

    Ok(())
}
