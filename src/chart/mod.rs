//! Chart model of tracked tasks. Every task becomes one horizontal bar made of four stacked
//! segments, one per [AgeBucket](buckets::AgeBucket). The model knows nothing about how it is
//! drawn; [terminal] is one way of drawing it.
//!
//!  - [Chart::render] rebuilds everything from a list of tasks.
//!  - [Chart::on_pointer_move] updates segment opacity from a pointer position.
//!  - [tooltip::hover_tooltip] describes the task under the pointer.

pub mod buckets;
pub mod color;
pub mod hover;
pub mod terminal;
pub mod tooltip;

use anyhow::Result;
use chrono::NaiveDateTime;
use tracing::{debug, instrument, trace};

use crate::tracker::task::Task;

use buckets::{bucket_history, AgeBucket};
use color::{shades, Rgb, DEFAULT_BAR_COLOR};
use hover::{apply_opacity, hit_test, Point, Rect, SegmentId, HIGHLIGHTED_ALPHA};

/// Vertical size of a bar, rows are 1 apart.
pub const BAR_HEIGHT: f64 = 0.8;

/// One drawn portion of a task's bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Index of the owning task in the rendered list.
    pub task_index: usize,
    pub bucket: AgeBucket,
    pub rect: Rect,
    pub color: Rgb,
    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub color: Rgb,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    base_color: Rgb,
    segments: Vec<Segment>,
    labels: Vec<String>,
    legend: Vec<LegendEntry>,
}

impl Default for Chart {
    fn default() -> Self {
        Self::new(DEFAULT_BAR_COLOR)
    }
}

impl Chart {
    pub fn new(base_color: Rgb) -> Self {
        Self {
            base_color,
            segments: vec![],
            labels: vec![],
            legend: vec![],
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Task names in row order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    /// Index of the task that owns a segment, as passed to [Chart::render].
    pub fn task_index(&self, id: SegmentId) -> Option<usize> {
        self.segments.get(id.0).map(|v| v.task_index)
    }

    /// Largest stacked length among all bars.
    pub fn extent(&self) -> f64 {
        self.segments
            .iter()
            .map(|v| v.rect.right())
            .fold(0., f64::max)
    }

    /// Clears the chart and draws every task again. On a malformed timestamp the chart is left
    /// empty and the error is returned.
    #[instrument(skip_all, fields(tasks = tasks.len()))]
    pub fn render(&mut self, tasks: &[Task], now: NaiveDateTime) -> Result<()> {
        self.segments.clear();
        self.labels.clear();
        self.legend.clear();

        let shades = shades(self.base_color, AgeBucket::STACK_ORDER.len());

        let mut segments = Vec::with_capacity(tasks.len() * AgeBucket::STACK_ORDER.len());
        for (task_index, task) in tasks.iter().enumerate() {
            let buckets = bucket_history(task.history(), now)?;
            trace!("Buckets of {:?}: {buckets:?}", task.name());

            let mut left = 0.;
            for ((bucket, value), color) in buckets.stacked().zip(&shades) {
                let width = value as f64;
                segments.push(Segment {
                    task_index,
                    bucket,
                    rect: Rect {
                        left,
                        bottom: task_index as f64 - BAR_HEIGHT / 2.,
                        width,
                        height: BAR_HEIGHT,
                    },
                    color: *color,
                    alpha: HIGHLIGHTED_ALPHA,
                });
                left += width;
            }
        }

        self.segments = segments;
        self.labels = tasks.iter().map(|v| v.name().to_string()).collect();
        self.legend = AgeBucket::STACK_ORDER
            .iter()
            .zip(shades)
            .map(|(bucket, color)| LegendEntry {
                color,
                label: bucket.to_string(),
            })
            .collect();
        debug!("Rendered {} segments", self.segments.len());
        Ok(())
    }

    /// Highlights the segment under the pointer and returns it.
    pub fn on_pointer_move(&mut self, position: Point) -> Option<SegmentId> {
        let hovered = hit_test(position, &self.segments);
        trace!("Pointer at {position:?} is over {hovered:?}");
        apply_opacity(&mut self.segments, hovered);
        hovered
    }
}
