//! `pilotctl analyze`: run the pipeline and print the chart layout.

use anyhow::Result;
use pilot_analytics::analyze_with;

use crate::commands::{AnalyzeArgs, overlay_selection, prepare_input};
use crate::config::CliConfig;
use crate::output;

pub fn execute(args: &AnalyzeArgs, json: bool, config: &CliConfig) -> Result<()> {
    let input = prepare_input(&args.input, &args.metrics)?;
    let analytics = analyze_with(&input, &config.analytics);
    let selection = overlay_selection(&args.overlays);
    let domain = analytics.value_domain(selection, config.analytics.padding_fraction);

    output::print_analysis(&analytics, &domain, selection, json);
    Ok(())
}
