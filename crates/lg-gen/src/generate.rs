//! Generation entry points.

use lg_core::{SimConfig, SimRng, TileType};
use lg_network::{Network, NetworkError};
use tracing::{debug, info, warn};

use crate::coverage::cover;
use crate::grid::CoarseGrid;
use crate::houses::attach_houses;
use crate::topology::expand;
use crate::track::lay_track;
use crate::{GenConfig, GenError, GenResult};

/// Summary of one successful generation.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GenStats {
    pub coverage:    f64,
    pub track_cells: usize,
    pub junctions:   usize,
    pub legs:        u32,
    pub restarts:    u32,
    pub nodes:       usize,
    pub edges:       usize,
    pub houses:      usize,
}

/// A generated map: the painted coarse grid and the network built from it.
pub struct Generated {
    pub grid:    CoarseGrid,
    pub network: Network,
    pub stats:   GenStats,
}

/// One generation attempt drawing from `rng`.
///
/// # Errors
///
/// [`GenError::InvalidConfig`] for a bad `config`, [`GenError::Network`] for
/// a bad `sim` or a broken topology, [`GenError::CoverageNotReached`] when
/// the walk runs out of legs.
pub fn generate(config: &GenConfig, sim: &SimConfig, rng: &mut SimRng) -> GenResult<Generated> {
    config.validate()?;
    sim.validate().map_err(NetworkError::from)?;

    let mut grid = CoarseGrid::new(config.width, config.height);
    let track_cells = if config.track_line { lay_track(&mut grid, rng) } else { 0 };
    let walk = cover(&mut grid, config, rng)?;

    let mut graph = expand(&grid, config, sim)?;
    let houses = attach_houses(&mut graph, config, sim, rng)?;

    let stats = GenStats {
        coverage: grid.coverage(),
        track_cells,
        junctions: grid.junction_count(),
        legs: walk.legs,
        restarts: walk.restarts,
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        houses,
    };
    debug!(?stats, "generated map");
    debug_assert_eq!(graph.nodes_of(TileType::House).count(), houses);

    let network = Network::new(graph, sim.clone())?;
    Ok(Generated { grid, network, stats })
}

/// Retry [`generate`] up to `config.max_attempts` times.
///
/// Each attempt gets its own child stream of a root RNG seeded from
/// `sim.seed`, so the whole sequence is reproducible.  Configuration errors
/// are returned at once.
///
/// # Errors
///
/// [`GenError::AttemptsExhausted`] carrying the last failure.
pub fn generate_with_retry(config: &GenConfig, sim: &SimConfig) -> GenResult<Generated> {
    config.validate()?;
    let mut root = SimRng::new(sim.seed);
    let mut last = None;

    for attempt in 1..=config.max_attempts {
        let mut rng = root.child(u64::from(attempt));
        match generate(config, sim, &mut rng) {
            Ok(generated) => {
                info!(attempt, nodes = generated.stats.nodes, houses = generated.stats.houses, "map generated");
                return Ok(generated);
            }
            Err(err) if err.is_retryable() => {
                warn!(attempt, error = %err, "generation attempt failed");
                last = Some(err);
            }
            Err(err) => return Err(err),
        }
    }

    Err(GenError::AttemptsExhausted {
        attempts: config.max_attempts,
        last: Box::new(last.unwrap_or_else(|| GenError::InvalidConfig("max_attempts is zero".into()))),
    })
}
