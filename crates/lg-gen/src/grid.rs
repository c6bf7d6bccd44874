//! The coarse grid painted by the coverage walk.

use crate::direction::{Direction, Openings};

/// State of one coarse cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    /// Ordinary road.
    Path,
    /// Transit track line; carries traffic like a path.
    Track,
}

impl Cell {
    #[inline]
    pub fn is_painted(self) -> bool {
        self != Cell::Empty
    }
}

/// Local connectivity of a painted cell, from its open sides.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Three or four open sides.
    Junction,
    /// Two adjacent open sides.
    Corner,
    /// Two opposite open sides.
    Straight,
    /// One open side.
    DeadEnd,
    /// No open sides.
    Isolated,
}

impl Pattern {
    pub fn classify(open: Openings) -> Pattern {
        match open.len() {
            0 => Pattern::Isolated,
            1 => Pattern::DeadEnd,
            2 => {
                let straight = (open.contains(Direction::North) && open.contains(Direction::South))
                    || (open.contains(Direction::East) && open.contains(Direction::West));
                if straight { Pattern::Straight } else { Pattern::Corner }
            }
            _ => Pattern::Junction,
        }
    }
}

/// Row-major `width × height` grid of [`Cell`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoarseGrid {
    width:  u32,
    height: u32,
    cells:  Vec<Cell>,
}

impl CoarseGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, cells: vec![Cell::Empty; width as usize * height as usize] }
    }

    /// Build from rows of text: `#` path, `T` track, anything else empty.
    /// Rows shorter than the first are padded with empty cells.
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.first().map_or(0, |r| r.chars().count()) as u32;
        let mut grid = Self::new(width, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().take(width as usize).enumerate() {
                let cell = match ch {
                    '#' => Cell::Path,
                    'T' => Cell::Track,
                    _ => Cell::Empty,
                };
                grid.paint(x as i32, y as i32, cell);
            }
        }
        grid
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn center(&self) -> (i32, i32) {
        ((self.width / 2) as i32, (self.height / 2) as i32)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = u32::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = u32::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(y as usize * self.width as usize + x as usize)
    }

    /// `None` outside the grid.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// `false` outside the grid.
    #[inline]
    pub fn is_painted(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(Cell::is_painted)
    }

    /// Set a cell; ignored outside the grid.
    pub fn paint(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn painted_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_painted()).count()
    }

    /// Painted fraction of all cells.
    pub fn coverage(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        self.painted_count() as f64 / self.cells.len() as f64
    }

    /// Painted cells in row-major order.
    pub fn painted(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        let width = self.width.max(1) as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_painted())
            .map(move |(i, &c)| ((i % width) as i32, (i / width) as i32, c))
    }

    /// Sides of `(x, y)` whose neighbour is painted.
    pub fn openings(&self, x: i32, y: i32) -> Openings {
        Direction::ALL
            .into_iter()
            .filter(|d| {
                let (nx, ny) = d.step(x, y);
                self.is_painted(nx, ny)
            })
            .collect()
    }

    /// Pattern of a painted cell; `None` for empty or out-of-grid cells.
    pub fn pattern(&self, x: i32, y: i32) -> Option<Pattern> {
        self.is_painted(x, y).then(|| Pattern::classify(self.openings(x, y)))
    }

    pub fn junction_count(&self) -> usize {
        self.painted()
            .filter(|&(x, y, _)| self.pattern(x, y) == Some(Pattern::Junction))
            .count()
    }

    /// `#` path, `T` track, `.` empty; rows separated by `'\n'`.
    pub fn render(&self) -> String {
        self.cells
            .chunks(self.width.max(1) as usize)
            .map(|row| {
                row.iter()
                    .map(|c| match c {
                        Cell::Empty => '.',
                        Cell::Path => '#',
                        Cell::Track => 'T',
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
