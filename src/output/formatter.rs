use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;

use crate::config::EventConfig;
use crate::league::{LeagueTable, Standing};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Position column text: the ordinal, or `=` for a row tied with the one above.
pub fn position_label(standing: &Standing) -> String {
    if standing.tied {
        "=".to_string()
    } else {
        standing.position.to_string()
    }
}

/// Per-event cell text: points earned or `-` for no run.
fn points_cell(standing: &Standing, event_index: usize) -> String {
    standing
        .runner
        .points_for(event_index)
        .map(|p| p.to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Format the league as an aligned terminal table.
///
/// Columns: position, name, total, runs, then one column per event.
pub fn format_table(table: &LeagueTable, event_count: usize, use_colors: bool) -> String {
    if table.is_empty() {
        return "No results found.".to_string();
    }

    let name_width = table
        .entries
        .iter()
        .map(|s| s.runner.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut header = format!("{:>3}  {:<name_width$}  {:>5}  {:>4}", "#", "Name", "Total", "Runs");
    for i in 0..event_count {
        header.push_str(&format!("  {:>3}", i + 1));
    }

    let mut lines = Vec::with_capacity(table.len() + 1);
    lines.push(if use_colors {
        header.bold().to_string()
    } else {
        header
    });

    for standing in &table.entries {
        let pos = format!("{:>3}", position_label(standing));
        let name = format!("{:<name_width$}", standing.runner.name);
        let total = format!("{:>5}", standing.score);
        let runs = format!("{:>4}", standing.runs());

        let mut line = if use_colors {
            let runs = if standing.runs() < table.max_events_to_count {
                runs.yellow().to_string()
            } else {
                runs
            };
            format!("{}  {}  {}  {}", pos.dimmed(), name, total.bold(), runs)
        } else {
            format!("{}  {}  {}  {}", pos, name, total, runs)
        };

        for i in 0..event_count {
            line.push_str(&format!("  {:>3}", points_cell(standing, i)));
        }
        lines.push(line);
    }

    lines.join("\n")
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    index: usize,
    name: &'a str,
    closing_date: String,
}

#[derive(Serialize)]
struct JsonStanding<'a> {
    position: usize,
    tied: bool,
    name: &'a str,
    score: u32,
    runs: usize,
    /// One entry per configured event, `null` where the runner did not run.
    points: Vec<Option<u32>>,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    max_events_to_count: usize,
    events: Vec<JsonEvent<'a>>,
    standings: Vec<JsonStanding<'a>>,
}

/// Format the league as pretty-printed JSON.
pub fn format_json(table: &LeagueTable, events: &[EventConfig]) -> serde_json::Result<String> {
    let output = JsonOutput {
        max_events_to_count: table.max_events_to_count,
        events: events
            .iter()
            .enumerate()
            .map(|(index, e)| JsonEvent {
                index,
                name: &e.name,
                closing_date: e.closing_date.to_string(),
            })
            .collect(),
        standings: table
            .entries
            .iter()
            .map(|s| JsonStanding {
                position: s.position,
                tied: s.tied,
                name: &s.runner.name,
                score: s.score,
                runs: s.runs(),
                points: (0..events.len()).map(|i| s.runner.points_for(i)).collect(),
            })
            .collect(),
    };

    serde_json::to_string_pretty(&output)
}
