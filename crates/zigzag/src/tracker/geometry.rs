use super::types::GRID_SIZE;

/// A position in continuous grid space. `(0, 0)` is the board's top-left corner and
/// `(GRID_SIZE, GRID_SIZE)` its bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridPos {
    pub x: f64,
    pub y: f64,
}

impl GridPos {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: GridPos) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Distance from `p` to the segment `a`–`b` (not the infinite line through them).
///
/// The projection parameter is clamped to `[0, 1]`, so points beyond either end
/// measure to that endpoint. A zero-length segment measures to `a`.
pub fn point_to_segment_distance(p: GridPos, a: GridPos, b: GridPos) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;

    if len_sq == 0.0 {
        return p.distance_to(a);
    }

    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    let closest = GridPos::new(a.x + t * dx, a.y + t * dy);
    p.distance_to(closest)
}

/// Whether `pos` lies inside the lane of half-width `width` around the segment
/// `start`–`end`.
///
/// Segments shorter than one grid unit always accept, which also covers the
/// degenerate zero-length case.
pub fn in_path_corridor(pos: GridPos, start: GridPos, end: GridPos, width: f64) -> bool {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let length = dx.hypot(dy);

    if length < 1.0 {
        return true;
    }

    let rel_x = pos.x - start.x;
    let rel_y = pos.y - start.y;

    let along = (rel_x * dx + rel_y * dy) / length;
    if along < 0.0 || along > length {
        return false;
    }

    // Perpendicular offset from the center line.
    let across = (rel_x * -dy + rel_y * dx) / length;
    across.abs() <= width
}

/// The on-screen rectangle the board is drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoardRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Map an absolute screen position into grid space.
    ///
    /// Returns `None` for a collapsed board (zero or negative size).
    pub fn to_grid(&self, screen_x: f64, screen_y: f64) -> Option<GridPos> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let scale = GRID_SIZE as f64;
        Some(GridPos::new(
            (screen_x - self.left) / self.width * scale,
            (screen_y - self.top) / self.height * scale,
        ))
    }

    /// Map a grid position back onto the screen.
    pub fn to_screen(&self, pos: GridPos) -> (f64, f64) {
        let scale = GRID_SIZE as f64;
        (
            self.left + pos.x / scale * self.width,
            self.top + pos.y / scale * self.height,
        )
    }

    /// Screen pixels per grid unit along x.
    pub fn cell_width(&self) -> f64 {
        self.width / GRID_SIZE as f64
    }
}
