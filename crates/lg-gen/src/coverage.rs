//! Phase A: random-walk coverage of the coarse grid.
//!
//! # Walk rules
//!
//! ```text
//! paint the centre cell
//! while coverage < goal:
//!   leg: turn left / keep / turn right (uniform), length in leg_min..=leg_max
//!     step into empty cell  → paint, unless a perpendicular neighbour is
//!                             already painted (leg stops: no thick roads)
//!     step into painted cell → join it, leg stops
//!     step off the grid      → leg stops
//!   restart when u · walked ≥ restart_threshold, or the leg went nowhere,
//!   from a uniformly chosen painted cell
//! ```
//!
//! Every leg counts against `max_iterations`, so the walk always terminates.

use lg_core::SimRng;

use crate::direction::Direction;
use crate::grid::{Cell, CoarseGrid};
use crate::{GenConfig, GenError, GenResult};

/// Counters from one coverage walk.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub legs:     u32,
    pub restarts: u32,
    /// Cells painted by the walk itself.
    pub painted:  usize,
}

/// Paint `grid` until `config.coverage_goal` is reached.
///
/// # Errors
///
/// [`GenError::CoverageNotReached`] when `config.max_iterations` legs pass
/// first.
pub fn cover(grid: &mut CoarseGrid, config: &GenConfig, rng: &mut SimRng) -> GenResult<WalkStats> {
    let goal = config.coverage_goal;
    let mut stats = WalkStats::default();

    let (mut x, mut y) = grid.center();
    if !grid.is_painted(x, y) {
        grid.paint(x, y, Cell::Path);
        stats.painted += 1;
    }

    let mut dir = random_direction(rng);
    let mut walked = 0u32;

    while grid.coverage() < goal {
        if stats.legs >= config.max_iterations {
            return Err(GenError::CoverageNotReached { reached: grid.coverage(), goal, legs: stats.legs });
        }
        stats.legs += 1;

        dir = match rng.gen_range(0..3) {
            0 => dir.turn_left(),
            1 => dir,
            _ => dir.turn_right(),
        };
        let length = rng.gen_range(config.leg_min..=config.leg_max);
        let leg = walk_leg(grid, (x, y), dir, length);
        (x, y) = leg.end;
        stats.painted += leg.painted;
        walked += leg.steps;

        let done = leg.steps == 0
            || rng.random::<f64>() * f64::from(walked) >= f64::from(config.restart_threshold);
        if done {
            let painted: Vec<(i32, i32)> = grid.painted().map(|(px, py, _)| (px, py)).collect();
            if let Some(&start) = rng.choose(&painted) {
                (x, y) = start;
            }
            dir = random_direction(rng);
            walked = 0;
            stats.restarts += 1;
        }
    }

    Ok(stats)
}

/// Result of one leg.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Leg {
    pub end:     (i32, i32),
    pub steps:   u32,
    pub painted: usize,
}

/// Walk up to `length` cells from `start` in `dir`.
pub(crate) fn walk_leg(grid: &mut CoarseGrid, start: (i32, i32), dir: Direction, length: u32) -> Leg {
    let mut leg = Leg { end: start, steps: 0, painted: 0 };

    for _ in 0..length {
        let (nx, ny) = dir.step(leg.end.0, leg.end.1);
        match grid.get(nx, ny) {
            None => break,
            Some(Cell::Empty) => {
                let (lx, ly) = dir.turn_left().step(nx, ny);
                let (rx, ry) = dir.turn_right().step(nx, ny);
                if grid.is_painted(lx, ly) || grid.is_painted(rx, ry) {
                    break;
                }
                grid.paint(nx, ny, Cell::Path);
                leg.end = (nx, ny);
                leg.steps += 1;
                leg.painted += 1;
            }
            Some(_) => {
                leg.end = (nx, ny);
                leg.steps += 1;
                break;
            }
        }
    }
    leg
}

fn random_direction(rng: &mut SimRng) -> Direction {
    Direction::from_index(rng.gen_range(0..4))
}
