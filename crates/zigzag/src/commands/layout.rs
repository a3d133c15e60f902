use anyhow::Result;
use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::progress::Progress;
use crate::tracker::layout::generate_points;
use crate::tracker::types::{GRID_SIZE, Point};

pub fn run(level: Option<u32>, seed: Option<u64>) -> Result<()> {
    let level = match level {
        Some(0) => anyhow::bail!("Invalid level: 0. Levels start at 1."),
        Some(level) => level,
        None => Progress::load()?.current_level,
    };

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let points = generate_points(level, &mut rng);

    let header = format!("Level {level}: {} points", points.len());
    match seed {
        Some(seed) => println!("{} {}", header.bold(), format!("(seed {seed})").dimmed()),
        None => println!("{}", header.bold()),
    }
    println!();
    print!("{}", render(&points, true));
    Ok(())
}

/// Draw the board as a text grid, one row per line. Empty cells are dots.
pub fn render(points: &[Point], color: bool) -> String {
    let mut out = String::new();
    for y in 0..GRID_SIZE {
        out.push(' ');
        for x in 0..GRID_SIZE {
            let cell = match points.iter().find(|p| p.x == x && p.y == y) {
                Some(p) => {
                    let label = format!("{:>3}", p.number);
                    match (color, p.number) {
                        (false, _) => label,
                        (true, 1) => label.green().bold().to_string(),
                        (true, _) => label.cyan().to_string(),
                    }
                }
                None if color => format!("{:>3}", ".").dimmed().to_string(),
                None => format!("{:>3}", "."),
            };
            out.push_str(&cell);
        }
        out.push('\n');
    }
    out
}
