//! Output formatting for CLI responses

use anyhow::Error;
use colored::*;
use pilot_analytics::describe::format_seconds;
use pilot_analytics::{
    BestKind, ChartSlot, LapSlot, OverlaySelection, PilotAnalytics, SlotDescription, ValueDomain,
};
use serde_json::json;

use crate::error::CliError;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": error_type_name(error)
        }
    });
    print_json(&error_json);
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

fn error_type_name(error: &Error) -> &'static str {
    match error.downcast_ref::<CliError>() {
        Some(CliError::InputNotFound(_)) => "input_not_found",
        Some(CliError::SlotNotFound(..)) => "slot_not_found",
        Some(CliError::ValidationError(_)) => "validation_error",
        Some(CliError::InvalidConfiguration(_)) => "invalid_configuration",
        Some(CliError::IoError(_)) => "io_error",
        Some(CliError::JsonError(_)) => "json_error",
        Some(CliError::YamlError(_)) => "yaml_error",
        Some(CliError::Analytics(_)) => "analytics_error",
        None => "error",
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format output as JSON: {e}"),
    }
}

/// Print the full pipeline result
pub fn print_analysis(
    analytics: &PilotAnalytics,
    domain: &ValueDomain,
    selection: OverlaySelection,
    json: bool,
) {
    if json {
        print_json(&json!({
            "success": true,
            "analytics": analytics,
            "domain": domain,
            "selection": selection,
        }));
        return;
    }

    if analytics.is_empty() {
        println!("{}", "No laps recorded".yellow());
        return;
    }

    println!(
        "{} {} laps across {} races ({} slots)",
        "Lap chart:".bold(),
        analytics.lap_points.len(),
        analytics.structure.race_index_ranges.len(),
        analytics.structure.len()
    );

    for (index, slot) in analytics.structure.slots.iter().enumerate() {
        match slot {
            ChartSlot::Gap(gap) => {
                println!(
                    "  {:>4}  {}",
                    index,
                    format!("── {} → {} ──", gap.previous_race_id, gap.next_race_id).dimmed()
                );
            }
            ChartSlot::Lap(lap) => print_lap_slot(analytics, index, lap, selection),
        }
        if let Some(label) = analytics.structure.axis_label(index) {
            println!("        {}", label.italic());
        }
    }

    println!();
    println!("{}", "Races:".bold());
    for range in &analytics.structure.race_index_ranges {
        let color = analytics.race_colors.color_or_fallback(&range.race_id);
        println!(
            "  {} {} slots {}..={}",
            swatch(color),
            range.race_id,
            range.start,
            range.end
        );
    }

    println!();
    println!(
        "{} {:.3}s .. {:.3}s",
        "Value domain:".bold(),
        domain.min,
        domain.max
    );
    if analytics.consecutive_window <= 1 {
        println!("  {}", "Consecutive overlay disabled".dimmed());
    }
}

fn print_lap_slot(analytics: &PilotAnalytics, index: usize, lap: &LapSlot, selection: OverlaySelection) {
    let color = analytics.race_colors.color_or_fallback(&lap.point.race_id);
    let time = lap
        .bar_value
        .map_or_else(|| "n/a".to_string(), format_seconds);

    let mut overlays = Vec::new();
    if selection.best_lap {
        overlays.push(format!("best {}", optional_seconds(lap.overlays.best_lap)));
    }
    if selection.consecutive && analytics.consecutive_window > 1 {
        overlays.push(format!(
            "{}-lap {}",
            analytics.consecutive_window,
            optional_seconds(lap.overlays.consecutive)
        ));
    }
    if selection.race_total {
        overlays.push(format!("total {}", optional_seconds(lap.overlays.race_total)));
    }

    let marker = analytics
        .new_best
        .highlight(index)
        .map(|kind| format!(" {}", badge(kind)))
        .unwrap_or_default();

    println!(
        "  {:>4}  {} Lap {:<3} {:>9}  {}{}",
        index,
        swatch(color),
        lap.point.lap_number,
        time,
        overlays.join("  ").dimmed(),
        marker
    );
}

/// Print a slot description
pub fn print_description(description: &SlotDescription, json: bool) {
    if json {
        print_json(&json!({
            "success": true,
            "slot": description,
        }));
        return;
    }

    let mut lines = description.lines().into_iter();
    if let Some(title) = lines.next() {
        println!("{}", title.bold());
    }
    for line in lines {
        println!("  {line}");
    }
}

fn optional_seconds(value: Option<f64>) -> String {
    value.map_or_else(|| "—".to_string(), format_seconds)
}

fn badge(kind: BestKind) -> ColoredString {
    match kind {
        BestKind::Lap => "★ best lap".green().bold(),
        BestKind::Consecutive => "★ best consecutive".yellow().bold(),
        BestKind::RaceTotal => "★ best race total".cyan().bold(),
    }
}

fn swatch(color: &str) -> ColoredString {
    match parse_hex(color) {
        Some((r, g, b)) => "■".truecolor(r, g, b),
        None => "■".normal(),
    }
}

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|part| u8::from_str_radix(part, 16).ok())
    };
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_reads_channels() {
        assert_eq!(parse_hex("#9ba3ff"), Some((0x9b, 0xa3, 0xff)));
        assert_eq!(parse_hex("#ffffff"), Some((255, 255, 255)));
        assert_eq!(parse_hex("9ba3ff"), None);
        assert_eq!(parse_hex("#9ba3f"), None);
        assert_eq!(parse_hex("#zzzzzz"), None);
    }

    #[test]
    fn optional_seconds_formats_missing_values() {
        assert_eq!(optional_seconds(Some(27.0)), "27.000s");
        assert_eq!(optional_seconds(None), "—");
    }

    #[test]
    fn error_type_names_follow_cli_errors() {
        let err = Error::new(CliError::SlotNotFound(4, 3));
        assert_eq!(error_type_name(&err), "slot_not_found");
        let plain = anyhow::anyhow!("boom");
        assert_eq!(error_type_name(&plain), "error");
    }
}
