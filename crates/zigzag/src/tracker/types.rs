use std::fmt;
use std::time::{Duration, Instant};

use super::geometry::GridPos;

/// Side length of the logical board, in cells.
pub const GRID_SIZE: u32 = 8;

/// Cells kept free along every border.
pub const GRID_PADDING: u32 = 1;

/// A numbered target on the board.
///
/// Coordinates are integer cell indices in `[0, GRID_SIZE)`; the dot is drawn at the
/// cell's grid position, so `(x, y)` is also its center in grid space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: u32,
    pub y: u32,
    /// 1-based position in the connection order.
    pub number: u32,
    /// Set when this point was the cause of a failed attempt.
    pub is_error: bool,
}

impl Point {
    pub fn new(x: u32, y: u32, number: u32) -> Self {
        Self {
            x,
            y,
            number,
            is_error: false,
        }
    }

    pub fn center(&self) -> GridPos {
        GridPos::new(self.x as f64, self.y as f64)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} ({},{})", self.number, self.x, self.y)
    }
}

/// Tuning for the geometric tests and the delayed transitions.
///
/// All distances are in grid units.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// A foreign point closer than this to the drag segment fails the attempt.
    pub intersection_threshold: f64,
    /// A foreign point closer than this is flagged as "near". Never below
    /// `intersection_threshold`.
    pub warning_threshold: f64,
    /// How close the pointer must be to a point's center to be "on" it.
    pub detection_radius: f64,
    /// Width of the lane around the ideal segment inside which crossings are
    /// not tested. `None` disables the lane.
    pub path_corridor_width: Option<f64>,
    /// Delay before a new layout after a wrong connection.
    pub wrong_connection_delay: Duration,
    /// Delay before a new layout after releasing mid-path.
    pub abandon_delay: Duration,
    /// Delay before the next level's layout.
    pub advance_delay: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            intersection_threshold: 0.2,
            warning_threshold: 0.3,
            detection_radius: 0.15,
            path_corridor_width: None,
            wrong_connection_delay: Duration::from_millis(1000),
            abandon_delay: Duration::from_millis(500),
            advance_delay: Duration::from_millis(500),
        }
    }
}

impl TrackerConfig {
    /// Default lane width used when the corridor is switched on without a width.
    pub const DEFAULT_CORRIDOR_WIDTH: f64 = 0.4;

    /// Clamp values into a consistent set: non-negative distances and
    /// `warning_threshold >= intersection_threshold`.
    pub fn normalized(mut self) -> Self {
        self.intersection_threshold = self.intersection_threshold.max(0.0);
        self.detection_radius = self.detection_radius.max(0.0);
        self.warning_threshold = self.warning_threshold.max(self.intersection_threshold);
        self.path_corridor_width = self.path_corridor_width.map(|w| w.max(0.0));
        self
    }
}

/// Where the current attempt stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the player to press point #1 (or the next point).
    Idle,
    /// Pointer is held and the path is being extended.
    Dragging,
    /// Every point was connected; the next layout is pending.
    Completed,
    /// The attempt failed; a fresh level-1 layout is pending.
    Failed,
}

/// Why an attempt failed mid-drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// The drag segment passed over a point other than the target.
    Crossed,
    /// The pointer landed on a point out of order.
    WrongPoint,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Crossed => write!(f, "crossed"),
            Violation::WrongPoint => write!(f, "wrong point"),
        }
    }
}

/// Classification of a single pointer event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed.
    NoOp,
    /// A drag began from the given point.
    DragStarted { from: u32 },
    /// The given point was appended to the path.
    Advanced { number: u32 },
    /// The drag segment runs close to these points, none close enough to fail.
    NearMiss { near: Vec<u32> },
    /// The drag touched the wrong point; level is back to 1.
    WrongConnection { number: u32, violation: Violation },
    /// The pointer was released before the final point; level is back to 1.
    Abandoned,
    /// The final point was connected; `level` is the new level.
    LevelComplete { level: u32 },
}

impl Outcome {
    /// Whether this outcome moved the level and so needs persisting.
    pub fn changes_level(&self) -> bool {
        matches!(
            self,
            Outcome::WrongConnection { .. } | Outcome::Abandoned | Outcome::LevelComplete { .. }
        )
    }
}

/// Identifies one generated layout. Bumped on every regeneration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttemptId(pub u64);

impl AttemptId {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// What a pending transition does once it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Lay out the next level after a completion.
    NextLevel,
    /// Lay out a fresh level after a failure.
    Restart,
}

/// A layout regeneration scheduled for later, bound to the attempt that
/// scheduled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTransition {
    pub attempt: AttemptId,
    pub kind: TransitionKind,
    pub due: Instant,
}
