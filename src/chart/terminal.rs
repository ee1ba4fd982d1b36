use super::{color::Rgb, Chart};

const BLOCK: char = '█';

/// How a [Chart] is drawn into a terminal.
#[derive(Debug, Clone, Copy)]
pub struct TerminalStyle {
    /// Columns available to the longest bar.
    pub width: usize,
    /// Color that dimmed segments fade into.
    pub background: Rgb,
    /// Plain glyphs are used when disabled, for example when output is piped.
    pub colored: bool,
}

/// Draws one row per task, an axis with the largest value and a legend.
pub fn draw_chart(chart: &Chart, style: TerminalStyle) -> String {
    let mut lines = Vec::new();
    let label_width = chart.labels().iter().map(|v| v.chars().count()).max().unwrap_or(0);
    let extent = chart.extent();
    let scale = if extent > 0. {
        style.width as f64 / extent
    } else {
        0.
    };

    for (row, label) in chart.labels().iter().enumerate() {
        let mut bar = String::new();
        for segment in chart.segments().iter().filter(|v| v.task_index == row) {
            let start = (segment.rect.left * scale).round() as usize;
            let end = (segment.rect.right() * scale).round() as usize;
            let cells = BLOCK.to_string().repeat(end.saturating_sub(start));
            if cells.is_empty() {
                continue;
            }
            let color = segment.color.blend(style.background, segment.alpha);
            bar.push_str(&paint(&cells, color, style.colored));
        }
        lines.push(format!("{label:>label_width$} │{bar}"));
    }

    if !chart.labels().is_empty() {
        lines.push(format!("{:>label_width$} └{}", "", "─".repeat(style.width)));
        let max_label = format!("{extent}");
        lines.push(format!(
            "{:>label_width$}  0{max_label:>width$}",
            "",
            width = style.width.saturating_sub(1)
        ));
    }

    let legend = chart
        .legend()
        .iter()
        .map(|v| format!("{} {}", paint(&BLOCK.to_string(), v.color, style.colored), v.label))
        .collect::<Vec<_>>();
    if !legend.is_empty() {
        lines.push(legend.join("  "));
    }
    lines.into_iter().map(|v| v + "\n").collect()
}

fn paint(text: &str, color: Rgb, colored: bool) -> String {
    if colored {
        color.to_ansi().paint(text).to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

    use super::{draw_chart, TerminalStyle};
    use crate::{
        chart::{
            color::{Rgb, DEFAULT_BACKGROUND},
            hover::Point,
            Chart,
        },
        tracker::task::{Snapshot, Task},
    };

    const NOW: NaiveDateTime = NaiveDateTime::new(
        NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
        NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
    );

    const PLAIN: TerminalStyle = TerminalStyle {
        width: 10,
        background: DEFAULT_BACKGROUND,
        colored: false,
    };

    fn test_chart() -> Chart {
        let tasks = vec![
            Task::new("Run", "km").with_history(vec![
                Snapshot::new(5, NOW - Duration::days(1)),
                Snapshot::new(5, NOW - Duration::days(200)),
            ]),
            Task::new("Reading", "pages")
                .with_history(vec![Snapshot::new(2, NOW - Duration::days(2))]),
        ];
        let mut chart = Chart::new(Rgb(0., 0., 1.));
        chart.render(&tasks, NOW).unwrap();
        chart
    }

    #[test]
    fn draws_rows_scaled_to_width() {
        let output = draw_chart(&test_chart(), PLAIN);
        let lines = output.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], "    Run │██████████");
        assert_eq!(lines[1], "Reading │██");
        assert_eq!(lines[2], "        └──────────");
        assert_eq!(lines[3], "         0       10");
        assert_eq!(
            lines[4],
            "█ 9+ months  █ 6-9 months  █ 3-6 months  █ 0-3 months"
        );
    }

    #[test]
    fn every_line_is_terminated() {
        let output = draw_chart(&test_chart(), PLAIN);
        assert!(output.ends_with("0-3 months\n"));
        assert_eq!(output.matches('\n').count(), 5);
    }

    #[test]
    fn draws_empty_chart() {
        let mut chart = Chart::default();
        chart.render(&[], NOW).unwrap();
        let output = draw_chart(&chart, PLAIN);
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn dimmed_segments_fade_into_background() {
        let mut chart = test_chart();
        chart.on_pointer_move(Point::new(1., 1.));

        let colored = TerminalStyle {
            colored: true,
            ..PLAIN
        };
        let output = draw_chart(&chart, colored);
        let rows = output.lines().take(2).collect::<Vec<_>>();

        assert!(rows[0].contains("\x1b[38;2;8;8;77m"));
        assert!(rows[1].contains("\x1b[38;2;77;77;255m"));
    }
}
