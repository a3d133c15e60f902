pub mod geometry;
pub mod layout;
pub mod types;

#[cfg(test)]
mod tests;

use std::cmp::Ordering;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::progress::Progress;
use geometry::{GridPos, in_path_corridor, point_to_segment_distance};
use layout::generate_points;
use types::{
    AttemptId, Outcome, PendingTransition, Phase, Point, TrackerConfig, TransitionKind, Violation,
};

/// Owns one level's layout and the path the player is drawing through it.
///
/// The host feeds pointer events in grid space and gets back an [`Outcome`] for each.
/// Level bookkeeping happens immediately; regenerating the layout after a
/// completion or failure is deferred and fires from [`PathTracker::tick`].
///
/// The path is always `points[..connected]`: points are kept sorted by number, so
/// the path can only ever be a prefix of the connection order.
#[derive(Debug)]
pub struct PathTracker {
    config: TrackerConfig,
    progress: Progress,
    points: Vec<Point>,
    connected: usize,
    phase: Phase,
    near: Vec<u32>,
    pointer: Option<GridPos>,
    attempt: AttemptId,
    pending: Option<PendingTransition>,
    rng: StdRng,
}

impl PathTracker {
    /// A tracker with a fresh random layout for `progress.current_level`.
    pub fn new(config: TrackerConfig, progress: Progress) -> Self {
        Self::with_rng(config, progress, StdRng::from_os_rng())
    }

    /// Like [`PathTracker::new`] but with reproducible layouts.
    pub fn with_seed(config: TrackerConfig, progress: Progress, seed: u64) -> Self {
        Self::with_rng(config, progress, StdRng::seed_from_u64(seed))
    }

    /// A tracker over a fixed layout. Points are ordered by number and renumbered
    /// `1..=n`; later layouts are random.
    pub fn with_layout(config: TrackerConfig, progress: Progress, mut points: Vec<Point>) -> Self {
        points.sort_by_key(|p| p.number);
        for (i, p) in points.iter_mut().enumerate() {
            p.number = i as u32 + 1;
            p.is_error = false;
        }
        Self {
            config: config.normalized(),
            progress: progress.sanitized(),
            points,
            connected: 0,
            phase: Phase::Idle,
            near: Vec::new(),
            pointer: None,
            attempt: AttemptId(1),
            pending: None,
            rng: StdRng::from_os_rng(),
        }
    }

    fn with_rng(config: TrackerConfig, progress: Progress, rng: StdRng) -> Self {
        let mut tracker = Self {
            config: config.normalized(),
            progress: progress.sanitized(),
            points: Vec::new(),
            connected: 0,
            phase: Phase::Idle,
            near: Vec::new(),
            pointer: None,
            attempt: AttemptId(0),
            pending: None,
            rng,
        };
        tracker.start_level();
        tracker
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn level(&self) -> u32 {
        self.progress.current_level
    }

    pub fn best_level(&self) -> u32 {
        self.progress.best_level
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Points connected so far, in order.
    pub fn path(&self) -> &[Point] {
        &self.points[..self.connected]
    }

    /// Number of the point the path must reach next.
    pub fn current_point(&self) -> u32 {
        self.connected as u32 + 1
    }

    /// The point the live segment starts from.
    pub fn last_accepted(&self) -> Option<&Point> {
        self.connected.checked_sub(1).map(|i| &self.points[i])
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == Phase::Dragging
    }

    /// Points flagged as close to the live segment.
    pub fn near_points(&self) -> &[u32] {
        &self.near
    }

    pub fn is_near(&self, number: u32) -> bool {
        self.near.contains(&number)
    }

    /// Last pointer position seen during the drag.
    pub fn pointer(&self) -> Option<GridPos> {
        self.pointer
    }

    pub fn attempt(&self) -> AttemptId {
        self.attempt
    }

    pub fn pending(&self) -> Option<&PendingTransition> {
        self.pending.as_ref()
    }

    /// Lay out a fresh board for the current level.
    ///
    /// Starts a new attempt, which drops any transition still pending for the
    /// previous one.
    pub fn start_level(&mut self) {
        self.attempt = self.attempt.next();
        self.pending = None;
        self.points = generate_points(self.progress.current_level, &mut self.rng);
        self.connected = 0;
        self.phase = Phase::Idle;
        self.near.clear();
        self.pointer = None;
        tracing::info!(
            level = self.progress.current_level,
            attempt = self.attempt.0,
            points = self.points.len(),
            "level ready"
        );
    }

    /// Fire the pending transition if it is due. Returns what fired.
    ///
    /// A transition left over from an older attempt is discarded instead.
    pub fn tick(&mut self, now: Instant) -> Option<TransitionKind> {
        let pending = self.pending?;
        if pending.attempt != self.attempt {
            tracing::debug!(attempt = pending.attempt.0, "discarding stale transition");
            self.pending = None;
            return None;
        }
        if now < pending.due {
            return None;
        }
        self.pending = None;
        self.start_level();
        Some(pending.kind)
    }

    /// Pointer pressed at `pos`.
    ///
    /// Starts a drag on point #1 when nothing is connected yet, or on the next
    /// required point otherwise. Anything else is ignored.
    pub fn pointer_down(&mut self, pos: GridPos, now: Instant) -> Outcome {
        if self.phase != Phase::Idle {
            return Outcome::NoOp;
        }
        let Some(idx) = self.hit_test(pos) else {
            return Outcome::NoOp;
        };
        if idx != self.connected {
            return Outcome::NoOp;
        }

        self.phase = Phase::Dragging;
        self.pointer = Some(pos);
        let number = self.points[idx].number;
        tracing::debug!(point = %self.points[idx], "drag started");

        match self.advance(now) {
            Outcome::Advanced { .. } => Outcome::DragStarted { from: number },
            other => other,
        }
    }

    /// Pointer moved to `pos` while held.
    pub fn pointer_move(&mut self, pos: GridPos, now: Instant) -> Outcome {
        if self.phase != Phase::Dragging {
            return Outcome::NoOp;
        }
        self.pointer = Some(pos);

        let Some(origin) = self.last_accepted().map(Point::center) else {
            return Outcome::NoOp;
        };

        if let Some(idx) = self.scan_crossings(origin, pos) {
            return self.wrong_connection(idx, Violation::Crossed, now);
        }

        if let Some(idx) = self.hit_test(pos) {
            match idx.cmp(&self.connected) {
                // Revisiting the path is harmless.
                Ordering::Less => {}
                Ordering::Equal => {
                    self.near.clear();
                    return self.advance(now);
                }
                Ordering::Greater => return self.wrong_connection(idx, Violation::WrongPoint, now),
            }
        }

        if self.near.is_empty() {
            Outcome::NoOp
        } else {
            Outcome::NearMiss {
                near: self.near.clone(),
            }
        }
    }

    /// Pointer released. Letting go before the last point fails the attempt.
    pub fn pointer_up(&mut self, now: Instant) -> Outcome {
        if self.phase != Phase::Dragging {
            return Outcome::NoOp;
        }
        self.pointer = None;
        self.near.clear();

        if self.connected >= self.points.len() {
            self.phase = Phase::Idle;
            return Outcome::NoOp;
        }

        tracing::info!(
            level = self.progress.current_level,
            connected = self.connected,
            total = self.points.len(),
            "drag abandoned"
        );
        self.phase = Phase::Failed;
        self.progress.reset_level();
        self.schedule(TransitionKind::Restart, self.config.abandon_delay, now);
        Outcome::Abandoned
    }

    /// Index of the point under `pos`, nearest first.
    fn hit_test(&self, pos: GridPos) -> Option<usize> {
        let radius = self.config.detection_radius;
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i, p.center().distance_to(pos)))
            .filter(|&(_, d)| d < radius)
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
            .map(|(i, _)| i)
    }

    /// Test every point beyond the target against the segment `origin`–`pos`.
    ///
    /// Refreshes the near list and returns the first point close enough to count
    /// as a crossing.
    fn scan_crossings(&mut self, origin: GridPos, pos: GridPos) -> Option<usize> {
        self.near.clear();

        if let (Some(width), Some(target)) = (
            self.config.path_corridor_width,
            self.points.get(self.connected),
        ) {
            if in_path_corridor(pos, origin, target.center(), width) {
                return None;
            }
        }

        let mut crossed = None;
        for (idx, p) in self.points.iter().enumerate().skip(self.connected + 1) {
            let distance = point_to_segment_distance(p.center(), origin, pos);
            if distance < self.config.warning_threshold {
                self.near.push(p.number);
            }
            if distance < self.config.intersection_threshold && crossed.is_none() {
                crossed = Some(idx);
            }
        }
        crossed
    }

    /// Append the next point to the path.
    fn advance(&mut self, now: Instant) -> Outcome {
        let number = self.points[self.connected].number;
        self.connected += 1;

        if self.connected < self.points.len() {
            tracing::debug!(number, "connected");
            return Outcome::Advanced { number };
        }

        self.phase = Phase::Completed;
        self.pointer = None;
        let level = self.progress.advance();
        tracing::info!(level, best_level = self.progress.best_level, "level complete");
        self.schedule(TransitionKind::NextLevel, self.config.advance_delay, now);
        Outcome::LevelComplete { level }
    }

    fn wrong_connection(&mut self, idx: usize, violation: Violation, now: Instant) -> Outcome {
        let point = &mut self.points[idx];
        point.is_error = true;
        let number = point.number;
        tracing::info!(
            point = %point,
            %violation,
            level = self.progress.current_level,
            "wrong connection"
        );

        self.phase = Phase::Failed;
        self.progress.reset_level();
        self.schedule(TransitionKind::Restart, self.config.wrong_connection_delay, now);
        Outcome::WrongConnection { number, violation }
    }

    fn schedule(&mut self, kind: TransitionKind, delay: Duration, now: Instant) {
        self.pending = Some(PendingTransition {
            attempt: self.attempt,
            kind,
            due: now + delay,
        });
    }
}
