mod scenarios;

use std::time::{Duration, Instant};

use super::PathTracker;
use super::geometry::GridPos;
use super::types::{Outcome, Point, TrackerConfig};
use crate::progress::Progress;

/// Helper to create a Point.
fn pt(x: u32, y: u32, number: u32) -> Point {
    Point::new(x, y, number)
}

/// Helper to create a grid position.
fn at(x: f64, y: f64) -> GridPos {
    GridPos::new(x, y)
}

/// Tracker over a fixed layout with default tuning.
fn tracker(level: u32, best: u32, points: Vec<Point>) -> PathTracker {
    PathTracker::with_layout(TrackerConfig::default(), Progress::new(level, best), points)
}

/// Drag along the straight line from `from` to `to` in small steps, stopping at
/// the first outcome that ends or advances the drag.
fn drag_line(tracker: &mut PathTracker, from: GridPos, to: GridPos, now: Instant) -> Outcome {
    const STEPS: usize = 100;
    let mut last = Outcome::NoOp;
    for i in 1..=STEPS {
        let t = i as f64 / STEPS as f64;
        let pos = at(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
        last = tracker.pointer_move(pos, now);
        match last {
            Outcome::NoOp | Outcome::NearMiss { .. } => {}
            _ => return last,
        }
    }
    last
}

/// Press on the first point and drag through every point in order, stopping
/// early if the attempt ends.
fn solve(tracker: &mut PathTracker, now: Instant) -> Outcome {
    let centers: Vec<GridPos> = tracker.points().iter().map(Point::center).collect();
    let mut last = tracker.pointer_down(centers[0], now);
    for pair in centers.windows(2) {
        last = drag_line(tracker, pair[0], pair[1], now);
        if !matches!(last, Outcome::Advanced { .. }) {
            break;
        }
    }
    last
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}
