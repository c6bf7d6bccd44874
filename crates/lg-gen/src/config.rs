//! Generator configuration.

use crate::{GenError, GenResult};

/// Shape and randomness parameters for one generated map.
///
/// `width × height` is the coarse grid; the lane graph is twice as large in
/// each dimension.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GenConfig {
    pub width:  u32,
    pub height: u32,

    /// Fraction of coarse cells that must be painted, in (0, 1).
    pub coverage_goal: f64,

    /// Chance that an empty lane slot next to a road becomes a house.
    pub house_probability: f64,

    /// Inclusive range of walk leg lengths, in coarse cells.
    pub leg_min: u32,
    pub leg_max: u32,

    /// A walk ends after a leg when `u * walked >= restart_threshold`.
    pub restart_threshold: u32,

    /// Walk legs allowed before the coverage goal is declared unreachable.
    pub max_iterations: u32,

    /// Attempts made by `generate_with_retry`.
    pub max_attempts: u32,

    /// Lay a transit track line across the grid before the walk.
    pub track_line: bool,

    /// Edge weights in ticks.
    pub straight_weight: u32,
    pub uturn_weight:    u32,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            width:             20,
            height:            20,
            coverage_goal:     0.4,
            house_probability: 0.3,
            leg_min:           2,
            leg_max:           6,
            restart_threshold: 15,
            max_iterations:    4_096,
            max_attempts:      20,
            track_line:        true,
            straight_weight:   15,
            uturn_weight:      25,
        }
    }
}

impl GenConfig {
    /// Defaults with the four headline parameters replaced.
    pub fn new(width: u32, height: u32, coverage_goal: f64, house_probability: f64) -> Self {
        Self { width, height, coverage_goal, house_probability, ..Self::default() }
    }

    /// Lane-graph width.
    #[inline]
    pub fn fine_width(&self) -> u32 {
        self.width * 2
    }

    /// Lane-graph height.
    #[inline]
    pub fn fine_height(&self) -> u32 {
        self.height * 2
    }

    pub fn validate(&self) -> GenResult<()> {
        let fail = |msg: String| Err(GenError::InvalidConfig(msg));

        if self.width < 2 || self.height < 2 {
            return fail(format!("grid must be at least 2x2, got {}x{}", self.width, self.height));
        }
        // Node ids are row-major over the fine grid and coordinates are i32.
        let fine_cells = u64::from(self.width) * u64::from(self.height) * 4;
        if fine_cells > u64::from(u32::MAX) || self.width > (i32::MAX as u32) / 2 || self.height > (i32::MAX as u32) / 2 {
            return fail(format!("grid {}x{} is too large", self.width, self.height));
        }
        if !(self.coverage_goal > 0.0 && self.coverage_goal < 1.0) {
            return fail(format!("coverage_goal must be in (0, 1), got {}", self.coverage_goal));
        }
        if !(0.0..=1.0).contains(&self.house_probability) {
            return fail(format!("house_probability must be in [0, 1], got {}", self.house_probability));
        }
        if self.leg_min == 0 || self.leg_min > self.leg_max {
            return fail(format!("leg range {}..={} is empty or starts at zero", self.leg_min, self.leg_max));
        }
        if self.max_iterations == 0 || self.max_attempts == 0 {
            return fail("max_iterations and max_attempts must be at least 1".into());
        }
        if self.straight_weight == 0 || self.uturn_weight == 0 {
            return fail("edge weights must be positive".into());
        }
        Ok(())
    }
}
