/// Line and polygon clipping against the window rectangle
///
/// Segments are clipped with the Liang-Barsky parametric tests; the
/// polygon walk then reconnects exits and re-entries along the window
/// boundary by splicing in the window's own corners, so a clipped
/// polygon closes along the window edge instead of leaving a gap.
use nalgebra::Point2;

/// Axis-aligned clip rectangle, bottom-left to top-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowRect {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl WindowRect {
    pub fn new(min: Point2<f64>, max: Point2<f64>) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, point: &Point2<f64>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    pub fn center(&self) -> Point2<f64> {
        Point2::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }
}

/// One of the four window boundaries.
///
/// The declaration order is also the corner-walk cycle used when a
/// clipped polygon is reconnected along the window edge. The cycle
/// direction matches a clockwise subject winding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Bottom,
    Right,
    Top,
}

impl Edge {
    fn next(self) -> Edge {
        match self {
            Edge::Left => Edge::Bottom,
            Edge::Bottom => Edge::Right,
            Edge::Right => Edge::Top,
            Edge::Top => Edge::Left,
        }
    }

    /// The window corner between this boundary and the next one in the
    /// cycle.
    fn corner_after(self, rect: &WindowRect) -> Point2<f64> {
        match self {
            Edge::Left => Point2::new(rect.min.x, rect.min.y),
            Edge::Bottom => Point2::new(rect.max.x, rect.min.y),
            Edge::Right => Point2::new(rect.max.x, rect.max.y),
            Edge::Top => Point2::new(rect.min.x, rect.max.y),
        }
    }
}

/// Result of clipping one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineClip {
    /// The visible sub-segment, or `None` if nothing of the segment
    /// lies inside the rectangle.
    pub visible: Option<(Point2<f64>, Point2<f64>)>,
    /// Boundary the segment entered through, `None` if it started
    /// inside.
    pub entered: Option<Edge>,
    /// Boundary the segment exited through, `None` if it ended inside.
    pub exited: Option<Edge>,
}

impl LineClip {
    fn outside() -> Self {
        Self {
            visible: None,
            entered: None,
            exited: None,
        }
    }
}

/// Liang-Barsky clip of the segment `a -> b`.
///
/// Equality with a boundary counts as inside; there is no epsilon
/// handling beyond native floating-point comparison.
///
/// Boundary flags are kept even when the visible interval is discarded
/// by a parallel-and-outside boundary: the polygon walk needs them to
/// reconstruct a subject that wraps around the window without any of
/// its edges crossing it. A contradictory interval (`u1 > u2`) clears
/// everything.
pub fn clip_line(a: Point2<f64>, b: Point2<f64>, rect: &WindowRect) -> LineClip {
    let dx = b.x - a.x;
    let dy = b.y - a.y;

    let tests = [
        (Edge::Left, -dx, a.x - rect.min.x),
        (Edge::Right, dx, rect.max.x - a.x),
        (Edge::Bottom, -dy, a.y - rect.min.y),
        (Edge::Top, dy, rect.max.y - a.y),
    ];

    let mut u1 = 0.0f64;
    let mut u2 = 1.0f64;
    let mut entered = None;
    let mut exited = None;
    let mut rejected = false;

    for (edge, p, q) in tests {
        if p == 0.0 {
            // Parallel to this boundary; excluded when starting outside.
            if q < 0.0 {
                rejected = true;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > u1 {
                u1 = r;
                entered = Some(edge);
            }
        } else if r < u2 {
            u2 = r;
            exited = Some(edge);
        }
    }

    if u1 > u2 {
        return LineClip::outside();
    }

    let visible = if rejected {
        None
    } else {
        Some((
            Point2::new(a.x + u1 * dx, a.y + u1 * dy),
            Point2::new(a.x + u2 * dx, a.y + u2 * dy),
        ))
    };

    LineClip {
        visible,
        entered,
        exited,
    }
}

/// Clip a polyline, closed (first point equals last) or open, against
/// the rectangle.
///
/// Closed subjects are reconnected along the window boundary: whenever
/// an entry follows an earlier exit, the window corners between the
/// two boundaries are spliced in, and a trailing exit is routed back
/// to the first entry before the polygon is re-closed. A subject with
/// no visible sub-segment keeps its spliced corners only when it
/// actually wraps around the rectangle; a disjoint subject clips to
/// nothing.
pub fn clip_polyline(points: &[Point2<f64>], rect: &WindowRect) -> Vec<Point2<f64>> {
    if points.len() < 2 {
        return points.iter().filter(|p| rect.contains(p)).cloned().collect();
    }

    let closed = points.first() == points.last();
    let mut out: Vec<Point2<f64>> = Vec::new();
    let mut first_entry: Option<Edge> = None;
    let mut pending_exit: Option<Edge> = None;
    let mut any_visible = false;

    for pair in points.windows(2) {
        let clip = clip_line(pair[0], pair[1], rect);

        if let Some(entry) = clip.entered {
            if first_entry.is_none() {
                first_entry = Some(entry);
            }
            if let Some(exit) = pending_exit.take() {
                splice_corners(exit, entry, rect, &mut out);
            }
        }
        if let Some((start, end)) = clip.visible {
            any_visible = true;
            // Consecutive edges share their joint; keep everything else,
            // duplicates included.
            if out.last() != Some(&start) {
                out.push(start);
            }
            out.push(end);
        }
        if let Some(exit) = clip.exited {
            pending_exit = Some(exit);
        }
    }

    // Boundary flags alone cannot tell a subject that wraps around the
    // rectangle from one that misses it entirely; only the former keeps
    // its spliced corners.
    if !any_visible && !(closed && polygon_contains(points, &rect.center())) {
        return Vec::new();
    }

    if closed {
        if let (Some(entry), Some(exit)) = (first_entry, pending_exit) {
            splice_corners(exit, entry, rect, &mut out);
            if let Some(first) = out.first().copied() {
                out.push(first);
            }
        }
    }

    out
}

/// Even-odd ray cast toward +x over a closed point run.
fn polygon_contains(polygon: &[Point2<f64>], point: &Point2<f64>) -> bool {
    let mut inside = false;
    for pair in polygon.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if (a.y > point.y) != (b.y > point.y) {
            let crossing = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if point.x < crossing {
                inside = !inside;
            }
        }
    }
    inside
}

fn splice_corners(from_exit: Edge, to_entry: Edge, rect: &WindowRect, out: &mut Vec<Point2<f64>>) {
    let mut edge = from_exit;
    while edge != to_entry {
        out.push(edge.corner_after(rect));
        edge = edge.next();
    }
}
