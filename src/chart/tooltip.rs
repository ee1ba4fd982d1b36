use anyhow::Result;
use chrono::{Duration, NaiveDateTime};

use crate::{tracker::task::Task, utils::time::parse_timestamp};

const SPARK_BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Text shown for a hovered task: a header, a sparkline of totals from oldest to newest and a line
/// per increment, newest first.
pub fn hover_tooltip(task: &Task, now: NaiveDateTime) -> Result<String> {
    let totals = task
        .history()
        .iter()
        .rev()
        .map(|v| v.total_currency)
        .collect::<Vec<_>>();

    let mut lines = vec![
        format!("{} ({})", task.name(), task.currency_name()),
        String::new(),
        sparkline(&totals),
        String::new(),
        "History:".to_string(),
    ];
    for snapshot in task.history() {
        lines.push(format!(
            "({}) {}",
            snapshot.total_currency,
            relative_age(&snapshot.timestamp, now)?
        ));
    }
    Ok(lines.join("\n"))
}

/// Glyph heights are proportional to the largest value, measured from 0 rather than from the
/// smallest value, so `[1, 3, 5]` keeps its lowest bar above the floor.
pub fn sparkline(values: &[u64]) -> String {
    let max = values.iter().copied().max().unwrap_or(0);
    values
        .iter()
        .map(|&v| {
            if max == 0 {
                return SPARK_BLOCKS[0];
            }
            let top = (SPARK_BLOCKS.len() - 1) as f64;
            SPARK_BLOCKS[(v as f64 / max as f64 * top).round() as usize]
        })
        .collect()
}

pub fn relative_age(timestamp: &str, now: NaiveDateTime) -> Result<String> {
    Ok(describe_age(now - parse_timestamp(timestamp)?))
}

/// Reports only the most significant unit. A month is 30 days.
pub fn describe_age(delta: Duration) -> String {
    if delta < Duration::zero() {
        return "just now".to_string();
    }
    let total_days = delta.num_days();
    let months = total_days / 30;
    let days = total_days % 30;
    let remainder = (delta - Duration::days(total_days)).num_seconds();
    let hours = remainder / 3600;
    let minutes = remainder % 3600 / 60;

    match (months, days, hours, minutes) {
        (1, ..) => "1 month ago".to_string(),
        (m, ..) if m > 1 => format!("{m} months ago"),
        (_, 1, ..) => "1 day ago".to_string(),
        (_, d, ..) if d > 1 => format!("{d} days ago"),
        (_, _, 1, _) => "1 hour ago".to_string(),
        (_, _, h, _) if h > 1 => format!("{h} hours ago"),
        (_, _, _, 1) => "a minute ago".to_string(),
        (_, _, _, m) if m > 1 => format!("{m} minutes ago"),
        _ => "just now".to_string(),
    }
}
