use std::collections::HashSet;

use rand::Rng;

use super::types::{GRID_PADDING, GRID_SIZE, Point};

/// Number of cells available to points once the border padding is removed.
pub const fn grid_capacity() -> u32 {
    let usable = GRID_SIZE - 2 * GRID_PADDING;
    usable * usable
}

/// How many points a level lays out: `level + 2`, never more than the grid holds.
pub fn points_for_level(level: u32) -> u32 {
    level.max(1).saturating_add(2).min(grid_capacity())
}

/// Scatter the points for `level` over the padded interior of the grid.
///
/// Each cell is used at most once; a colliding draw is simply retried. The count
/// is capped by [`grid_capacity`], so the retry loop always has a free cell to find.
pub fn generate_points<R: Rng>(level: u32, rng: &mut R) -> Vec<Point> {
    let count = points_for_level(level);
    let span = GRID_SIZE - 2 * GRID_PADDING;

    let mut used: HashSet<(u32, u32)> = HashSet::with_capacity(count as usize);
    let mut points = Vec::with_capacity(count as usize);

    for number in 1..=count {
        let (x, y) = loop {
            let x = GRID_PADDING + rng.random_range(0..span);
            let y = GRID_PADDING + rng.random_range(0..span);
            if used.insert((x, y)) {
                break (x, y);
            }
        };
        points.push(Point::new(x, y, number));
    }

    tracing::debug!(level, count, "generated layout");
    points
}
