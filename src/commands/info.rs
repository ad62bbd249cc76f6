use anyhow::Result;
use clap::ArgMatches;

use crate::core::system_info;
use crate::ui::system_formatters;

pub fn execute(matches: &ArgMatches) -> Result<()> {
    let info = system_info::cached();

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(info)?);
        return Ok(());
    }

    system_formatters::format_system_info(info);
    Ok(())
}
