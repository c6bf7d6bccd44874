//! House attachment on empty lane slots.

use lg_core::{SimConfig, SimRng, TileType};
use lg_network::{Graph, Node};

use crate::direction::Direction;
use crate::topology::fine_id;
use crate::{GenConfig, GenResult};

/// Neighbour search order for a house's road.
const ROAD_SEARCH: [Direction; 4] = [Direction::West, Direction::East, Direction::North, Direction::South];

/// Turn empty fine slots next to a road into houses.
///
/// Slots are scanned row-major.  A slot with a `Road` neighbour (first of
/// west, east, north, south) becomes a house with probability
/// `house_probability`, linked to that road by a two-way straight edge.
/// Returns the number of houses added.
pub fn attach_houses(
    graph:  &mut Graph,
    config: &GenConfig,
    sim:    &SimConfig,
    rng:    &mut SimRng,
) -> GenResult<usize> {
    let (width, height) = (graph.width() as i32, graph.height() as i32);
    let mut added = 0;

    for y in 0..height {
        for x in 0..width {
            if graph.node_at(x, y).is_some() {
                continue;
            }
            let road = ROAD_SEARCH.iter().find_map(|dir| {
                let (nx, ny) = dir.step(x, y);
                graph
                    .node_at(nx, ny)
                    .filter(|n| n.tile() == TileType::Road)
                    .map(Node::id)
            });
            let Some(road) = road else { continue };
            if !rng.gen_bool(config.house_probability) {
                continue;
            }

            let id = fine_id(x, y, graph.width())?;
            graph.add_node(Node::new(id, x, y, TileType::House).with_capacity(sim.node_capacity))?;
            graph.add_two_way(id, road, config.straight_weight)?;
            added += 1;
        }
    }

    Ok(added)
}
