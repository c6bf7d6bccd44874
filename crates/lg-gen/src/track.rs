//! Transit track line laid before the coverage walk.

use lg_core::SimRng;
use tracing::debug;

use crate::grid::{Cell, CoarseGrid};

/// Endpoint draws before giving up on a track line.
const ENDPOINT_ATTEMPTS: u32 = 64;

/// Lay one straight-ish track line between two random cells at least
/// `(width + height) / 3` apart.  Returns the number of cells painted, or 0
/// when no endpoint pair qualified.
pub fn lay_track(grid: &mut CoarseGrid, rng: &mut SimRng) -> usize {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    let min_dist = f64::from((w + h) / 3);

    for _ in 0..ENDPOINT_ATTEMPTS {
        let a = (rng.gen_range(0..w), rng.gen_range(0..h));
        let b = (rng.gen_range(0..w), rng.gen_range(0..h));
        let (dx, dy) = (f64::from(b.0 - a.0), f64::from(b.1 - a.1));
        if dx.hypot(dy) < min_dist {
            continue;
        }
        let cells = staircase(a, b);
        for &(x, y) in &cells {
            grid.paint(x, y, Cell::Track);
        }
        debug!(from = ?a, to = ?b, cells = cells.len(), "track line");
        return cells.len();
    }
    0
}

/// 4-connected cell line from `from` to `to`, both included.
///
/// Steps horizontally while the horizontal fraction done lags the vertical
/// one, so the line hugs the straight segment between the endpoints.
pub fn staircase(from: (i32, i32), to: (i32, i32)) -> Vec<(i32, i32)> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let (nx, ny) = (dx.abs(), dy.abs());
    let (sx, sy) = (dx.signum(), dy.signum());

    let mut cells = Vec::with_capacity((nx + ny + 1) as usize);
    let (mut x, mut y) = from;
    cells.push((x, y));

    let (mut ix, mut iy) = (0, 0);
    while ix < nx || iy < ny {
        let horizontal = if ny == 0 {
            true
        } else if nx == 0 {
            false
        } else {
            (0.5 + f64::from(ix)) / f64::from(nx) < (0.5 + f64::from(iy)) / f64::from(ny)
        };
        if horizontal {
            x += sx;
            ix += 1;
        } else {
            y += sy;
            iy += 1;
        }
        cells.push((x, y));
    }
    cells
}
