use std::{fmt::Display, io::Write};

use anyhow::{anyhow, bail, Result};
use chrono::{Local, NaiveDateTime};
use chrono_english::parse_date_string;
use clap::{CommandFactory, Subcommand, ValueEnum};
use tracing::debug;

use crate::{
    chart::{
        color::{Rgb, DEFAULT_BACKGROUND, DEFAULT_BAR_COLOR},
        hover::Point,
        terminal::{draw_chart, TerminalStyle},
        tooltip::hover_tooltip,
        Chart,
    },
    tracker::storage::TrackerStorage,
    utils::clock::Clock,
};

use super::Args;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

/// Moment the chart is drawn for. Ages of increments are measured from it.
#[derive(Debug, Clone, clap::Args)]
pub struct ReferenceTime {
    #[arg(
        long,
        help = "Show the tracker as of this moment. Examples are \"yesterday\", \"2 weeks ago\", \"15/03/2025\", \"12:00 16/03/2025\""
    )]
    at: Option<String>,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

#[derive(Debug, Clone, clap::Args)]
pub struct DrawOptions {
    #[arg(long, short, default_value_t = 60, help = "Columns used by the longest bar")]
    width: usize,
    #[arg(long, default_value_t = DEFAULT_BAR_COLOR, help = "Color of the oldest bucket, later buckets are lighter. Either #rrggbb or r,g,b with channels between 0 and 1")]
    color: Rgb,
    #[arg(long, help = "Draw without terminal colors")]
    no_color: bool,
}

impl DrawOptions {
    fn style(&self) -> TerminalStyle {
        TerminalStyle {
            width: self.width,
            background: DEFAULT_BACKGROUND,
            colored: !self.no_color,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ChartCommand {
    #[command(about = "Draw progress of every task, split by age of the progress")]
    Chart {
        #[command(flatten)]
        time: ReferenceTime,
        #[command(flatten)]
        draw: DrawOptions,
    },
    #[command(
        about = "Point at a position of the chart. Rows are tasks starting at 0, columns are currency"
    )]
    Hover {
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
        #[command(flatten)]
        time: ReferenceTime,
        #[command(flatten)]
        draw: DrawOptions,
    },
    #[command(about = "Print history of a task")]
    Show {
        name: String,
        #[command(flatten)]
        time: ReferenceTime,
    },
}

pub async fn process_chart_command(
    command: ChartCommand,
    storage: &impl TrackerStorage,
    clock: &dyn Clock,
    out: &mut impl Write,
) -> Result<()> {
    let tracker = storage.load().await?;

    match command {
        ChartCommand::Chart { time, draw } => {
            let now = time.resolve(clock)?;
            let mut chart = Chart::new(draw.color);
            chart.render(tracker.tasks(), now)?;
            write!(out, "{}", draw_chart(&chart, draw.style()))?;
        }
        ChartCommand::Hover { x, y, time, draw } => {
            let now = time.resolve(clock)?;
            let mut chart = Chart::new(draw.color);
            chart.render(tracker.tasks(), now)?;
            let hovered = chart.on_pointer_move(Point::new(x, y));
            write!(out, "{}", draw_chart(&chart, draw.style()))?;
            writeln!(out)?;

            let task = hovered
                .and_then(|v| chart.task_index(v))
                .and_then(|v| tracker.tasks().get(v));
            match task {
                Some(task) => writeln!(out, "{}", hover_tooltip(task, now)?)?,
                None => writeln!(out, "Nothing under the pointer")?,
            }
        }
        ChartCommand::Show { name, time } => {
            let now = time.resolve(clock)?;
            let Some(task) = tracker.get(&name) else {
                bail!("No such task \"{name}\"!");
            };
            writeln!(out, "{}", hover_tooltip(task, now)?)?;
        }
    }
    Ok(())
}

impl ReferenceTime {
    fn resolve(&self, clock: &dyn Clock) -> Result<NaiveDateTime> {
        let now = clock.now();
        let Some(at) = &self.at else {
            return Ok(now);
        };
        let base = now
            .and_local_timezone(Local)
            .earliest()
            .ok_or_else(|| anyhow!("Current time {now} doesn't exist in local timezone"))?;
        match parse_date_string(at, base, self.date_style.into()) {
            Ok(v) => {
                debug!("Resolved {at:?} into {v}");
                Ok(v.naive_local())
            }
            Err(e) => Err(Args::command()
                .error(
                    clap::error::ErrorKind::ValueValidation,
                    format!("Failed to validate date {e}"),
                )
                .into()),
        }
    }
}
