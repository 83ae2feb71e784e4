//! `pilotctl describe`: print the description of one chart slot.

use anyhow::Result;
use pilot_analytics::analyze_with;

use crate::commands::{DescribeArgs, prepare_input};
use crate::config::CliConfig;
use crate::error::CliError;
use crate::output;

pub fn execute(args: &DescribeArgs, json: bool, config: &CliConfig) -> Result<()> {
    let input = prepare_input(&args.input, &args.metrics)?;
    let analytics = analyze_with(&input, &config.analytics);

    let description = analytics
        .describe(
            &input.timeline,
            args.slot,
            config,
            &config.analytics.timestamp_format,
        )
        .ok_or(CliError::SlotNotFound(args.slot, analytics.structure.len()))?;

    output::print_description(&description, json);
    Ok(())
}
