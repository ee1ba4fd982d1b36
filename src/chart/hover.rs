//! Pointer interaction with rendered segments, kept apart from drawing so it can be exercised
//! without a terminal.

use super::Segment;

pub const HIGHLIGHTED_ALPHA: f64 = 1.0;
pub const DIMMED_ALPHA: f64 = 0.3;

/// Position in chart space: `x` is measured in currency, `y` in task rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn top(&self) -> f64 {
        self.bottom + self.height
    }

    /// Half open horizontally, so neighbouring segments never share a point and empty segments
    /// contain nothing.
    pub fn contains(&self, point: Point) -> bool {
        self.left <= point.x
            && point.x < self.right()
            && self.bottom <= point.y
            && point.y <= self.top()
    }
}

/// Index of a segment inside a rendered chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentId(pub usize);

pub fn hit_test(position: Point, segments: &[Segment]) -> Option<SegmentId> {
    segments
        .iter()
        .position(|v| v.rect.contains(position))
        .map(SegmentId)
}

/// Highlights the given segment and dims the rest. Without a highlighted segment everything goes
/// back to full opacity.
pub fn apply_opacity(segments: &mut [Segment], highlighted: Option<SegmentId>) {
    for (index, segment) in segments.iter_mut().enumerate() {
        segment.alpha = match highlighted {
            Some(SegmentId(id)) if id != index => DIMMED_ALPHA,
            _ => HIGHLIGHTED_ALPHA,
        };
    }
}
