use chrono::{DateTime, TimeZone};
use std::fmt::{Display, Write};

use super::formatter::position_label;
use crate::config::EventConfig;
use crate::league::{LeagueTable, ScoringConfig};
use crate::maprun::event_results_url;

const TIMESTAMP_FORMAT: &str = "%A, %B %-d %Y, %-I:%M %P";

/// Escape text for safe inclusion in HTML element content and attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Cell text for one event: medals for the three top point values.
pub fn format_points(points: Option<u32>, max_points: u32) -> String {
    match points {
        None => "-".to_string(),
        Some(p) if p == max_points => format!("{}🥇", p),
        Some(p) if max_points >= 2 && p == max_points - 1 => format!("{}🥈", p),
        Some(p) if max_points >= 3 && p == max_points - 2 => format!("{}🥉", p),
        Some(p) => p.to_string(),
    }
}

/// Render the league table as an HTML fragment suitable for a CMS page body.
pub fn render_html<Tz>(
    table: &LeagueTable,
    events: &[EventConfig],
    scoring: &ScoringConfig,
    updated_at: &DateTime<Tz>,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let n = scoring.max_events_to_count;
    let mut html = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(
        html,
        "<p>MapRun League results are based on an individual's best {} positions. \
         Individuals with only {} runs are ranked below those with {} and so on.</p>",
        n,
        n.saturating_sub(1),
        n
    );
    html.push_str("<table>\n  <tr>\n    <th></th>\n    <th>Name</th>\n    <th>Total</th>\n");
    for (i, event) in events.iter().enumerate() {
        let _ = writeln!(
            html,
            "    <th><a href=\"{}\" title=\"{}\">{}</a></th>",
            escape_html(&event_results_url(&event.name)),
            escape_html(&event.name),
            i + 1
        );
    }
    html.push_str("  </tr>\n");

    for standing in &table.entries {
        html.push_str("  <tr>\n");
        let _ = writeln!(html, "    <td>{}</td>", position_label(standing));
        let _ = writeln!(html, "    <td>{}</td>", escape_html(&standing.runner.name));
        let _ = writeln!(html, "    <td>{}</td>", standing.score);
        for i in 0..events.len() {
            let _ = writeln!(
                html,
                "    <td>{}</td>",
                format_points(standing.runner.points_for(i), scoring.max_points)
            );
        }
        html.push_str("  </tr>\n");
    }

    html.push_str("</table>\n");
    let _ = write!(
        html,
        "<p>Last updated {}</p>",
        updated_at.format(TIMESTAMP_FORMAT)
    );
    html
}
