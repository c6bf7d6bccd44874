//! Unit and property tests for lg-gen.

#[cfg(test)]
mod helpers {
    use lg_core::{NodeId, TileType};
    use lg_network::Graph;

    use crate::direction::{Direction, Openings};
    use crate::grid::{CoarseGrid, Pattern};
    use crate::topology::Corner;
    use crate::GenConfig;

    pub fn id(corner: Corner, cx: i32, cy: i32, fine_width: u32) -> NodeId {
        let (x, y) = corner.fine(cx, cy);
        NodeId::from_grid(x, y, fine_width).unwrap()
    }

    /// Check every painted block against its connectivity pattern.
    ///
    /// Per block: one loop edge per corner, at most one external edge per
    /// corner, external edges exactly on the open sides and leaving from the
    /// side's exit corner, loop weights matching the pattern.  Edges into
    /// houses are ignored.
    pub fn assert_legal(grid: &CoarseGrid, graph: &Graph, config: &GenConfig) {
        let fw = grid.width() * 2;
        for (cx, cy, _) in grid.painted() {
            let open = grid.openings(cx, cy);
            let pattern = Pattern::classify(open);
            let block: Vec<NodeId> = Corner::LOOP.iter().map(|&c| id(c, cx, cy, fw)).collect();
            let mut exits = Openings::NONE;

            for corner in Corner::LOOP {
                let node = graph.node(id(corner, cx, cy, fw)).expect("block node missing");
                let lane_edges: Vec<_> = node
                    .edges()
                    .iter()
                    .filter(|e| graph.node(e.to).unwrap().tile() != TileType::House)
                    .collect();

                let loop_edges: Vec<_> = lane_edges
                    .iter()
                    .filter(|e| e.to == id(corner.next(), cx, cy, fw))
                    .collect();
                assert_eq!(loop_edges.len(), 1, "cell ({cx},{cy}) {corner:?} loop edge");
                match pattern {
                    Pattern::Junction => assert_eq!(loop_edges[0].weight, config.straight_weight),
                    Pattern::DeadEnd | Pattern::Isolated => {
                        assert_eq!(loop_edges[0].weight, config.uturn_weight)
                    }
                    Pattern::Corner | Pattern::Straight => {}
                }

                let external: Vec<_> = lane_edges.iter().filter(|e| !block.contains(&e.to)).collect();
                assert!(external.len() <= 1, "cell ({cx},{cy}) {corner:?} has {} exits", external.len());
                for edge in &external {
                    let target = graph.node(edge.to).unwrap();
                    let delta = (target.x().div_euclid(2) - cx, target.y().div_euclid(2) - cy);
                    let side = Direction::ALL
                        .into_iter()
                        .find(|d| d.delta() == delta)
                        .expect("exit edge skips a cell");
                    assert_eq!(side.exit_corner(), corner);
                    assert_eq!(edge.weight, config.straight_weight);
                    assert_eq!(edge.to, id(side.opposite().entry_corner(), cx + delta.0, cy + delta.1, fw));
                    exits.insert(side);
                }
                assert_eq!(lane_edges.len(), 1 + external.len());
            }
            assert_eq!(exits, open, "cell ({cx},{cy}) exits differ from its openings");
            if pattern == Pattern::DeadEnd {
                assert_eq!(exits.len(), 1);
            }
        }
    }
}

// ── Directions ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod direction {
    use crate::direction::{Direction, Openings};

    #[test]
    fn turns_and_opposites() {
        assert_eq!(Direction::North.turn_right(), Direction::East);
        assert_eq!(Direction::North.turn_left(), Direction::West);
        assert_eq!(Direction::West.turn_right(), Direction::North);
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            assert_eq!(d.turn_left().turn_right(), d);
            let (dx, dy) = d.delta();
            assert_eq!(d.opposite().delta(), (-dx, -dy));
        }
    }

    #[test]
    fn openings_set() {
        let open: Openings = [Direction::South, Direction::North, Direction::South].into_iter().collect();
        assert_eq!(open.len(), 2);
        assert!(open.contains(Direction::North));
        assert!(!open.contains(Direction::East));
        assert_eq!(open.iter().collect::<Vec<_>>(), vec![Direction::North, Direction::South]);
        assert!(Openings::NONE.is_empty());
    }
}

// ── Coarse grid ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod grid {
    use crate::direction::Direction;
    use crate::grid::{Cell, CoarseGrid, Pattern};

    #[test]
    fn patterns_of_a_plus_sign() {
        let g = CoarseGrid::from_rows(&[
            ".#..",
            "###.",
            ".#.#",
            "....",
        ]);
        assert_eq!(g.pattern(1, 1), Some(Pattern::Junction));
        assert_eq!(g.pattern(1, 0), Some(Pattern::DeadEnd));
        assert_eq!(g.pattern(0, 1), Some(Pattern::DeadEnd));
        assert_eq!(g.pattern(2, 1), Some(Pattern::DeadEnd));
        assert_eq!(g.pattern(3, 2), Some(Pattern::Isolated));
        assert_eq!(g.pattern(0, 0), None);
        assert_eq!(g.pattern(9, 9), None);
        assert_eq!(g.junction_count(), 1);
    }

    #[test]
    fn corner_and_straight() {
        let g = CoarseGrid::from_rows(&[
            "##",
            "#.",
        ]);
        assert_eq!(g.pattern(0, 0), Some(Pattern::Corner));
        let open = g.openings(0, 0);
        assert!(open.contains(Direction::East) && open.contains(Direction::South));

        let g = CoarseGrid::from_rows(&["###"]);
        assert_eq!(g.pattern(1, 0), Some(Pattern::Straight));
    }

    #[test]
    fn coverage_and_render() {
        let mut g = CoarseGrid::new(4, 2);
        assert_eq!(g.coverage(), 0.0);
        g.paint(0, 0, Cell::Path);
        g.paint(3, 1, Cell::Track);
        g.paint(7, 7, Cell::Path);
        assert_eq!(g.painted_count(), 2);
        assert_eq!(g.coverage(), 0.25);
        assert_eq!(g.render(), "#...\n...T");
        assert_eq!(g.get(-1, 0), None);
        assert_eq!(g.center(), (2, 1));
    }

    #[test]
    fn painted_is_row_major() {
        let g = CoarseGrid::from_rows(&[".#", "#T"]);
        let cells: Vec<_> = g.painted().collect();
        assert_eq!(cells, vec![(1, 0, Cell::Path), (0, 1, Cell::Path), (1, 1, Cell::Track)]);
    }
}

// ── Track line ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod track {
    use lg_core::SimRng;

    use crate::grid::{Cell, CoarseGrid};
    use crate::track::{lay_track, staircase};

    fn assert_four_connected(cells: &[(i32, i32)]) {
        for pair in cells.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert_eq!((a.0 - b.0).abs() + (a.1 - b.1).abs(), 1, "{a:?} -> {b:?}");
        }
    }

    #[test]
    fn staircase_includes_both_endpoints() {
        let cells = staircase((1, 1), (6, 3));
        assert_eq!(cells.first(), Some(&(1, 1)));
        assert_eq!(cells.last(), Some(&(6, 3)));
        assert_eq!(cells.len(), 5 + 2 + 1);
        assert_four_connected(&cells);
    }

    #[test]
    fn staircase_axis_aligned_and_reversed() {
        assert_eq!(staircase((3, 2), (0, 2)), vec![(3, 2), (2, 2), (1, 2), (0, 2)]);
        assert_eq!(staircase((0, 0), (0, 2)), vec![(0, 0), (0, 1), (0, 2)]);
        assert_eq!(staircase((4, 4), (4, 4)), vec![(4, 4)]);
        let cells = staircase((7, 0), (0, 7));
        assert_eq!(cells.len(), 15);
        assert_four_connected(&cells);
    }

    #[test]
    fn track_is_painted() {
        let mut grid = CoarseGrid::new(12, 12);
        let mut rng = SimRng::new(3);
        let n = lay_track(&mut grid, &mut rng);
        assert!(n >= 8, "track too short: {n}");
        let track = grid.painted().filter(|&(_, _, c)| c == Cell::Track).count();
        assert_eq!(track, n);
    }
}

// ── Coverage walk ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod coverage {
    use lg_core::SimRng;

    use crate::coverage::{cover, walk_leg};
    use crate::direction::Direction;
    use crate::grid::{CoarseGrid, Pattern};
    use crate::{GenConfig, GenError};

    #[test]
    fn leg_stops_beside_a_parallel_road() {
        // Walking east along row 1 next to the road on row 0.
        let mut g = CoarseGrid::from_rows(&[
            "..####",
            "#.....",
        ]);
        let leg = walk_leg(&mut g, (0, 1), Direction::East, 5);
        assert_eq!(leg.steps, 1);
        assert_eq!(leg.end, (1, 1));
        assert!(!g.is_painted(2, 1));
    }

    #[test]
    fn leg_joins_painted_cell_and_stops() {
        let mut g = CoarseGrid::from_rows(&[
            "......",
            "#..#..",
            "......",
        ]);
        let leg = walk_leg(&mut g, (0, 1), Direction::East, 6);
        assert_eq!(leg.end, (3, 1));
        assert_eq!((leg.steps, leg.painted), (3, 2));
        assert_eq!(g.pattern(3, 1), Some(Pattern::DeadEnd));
    }

    #[test]
    fn leg_stops_at_grid_edge() {
        let mut g = CoarseGrid::from_rows(&["#..", "...", "..."]);
        let leg = walk_leg(&mut g, (0, 0), Direction::North, 4);
        assert_eq!(leg.steps, 0);
        assert_eq!(leg.end, (0, 0));
    }

    #[test]
    fn reaches_goal_or_reports_shortfall() {
        let config = GenConfig { track_line: false, ..GenConfig::default() };
        for seed in 0..10 {
            let mut grid = CoarseGrid::new(config.width, config.height);
            match cover(&mut grid, &config, &mut SimRng::new(seed)) {
                Ok(stats) => {
                    assert!(grid.coverage() >= config.coverage_goal);
                    assert!(stats.legs <= config.max_iterations);
                    assert_eq!(stats.painted, grid.painted_count());
                }
                Err(GenError::CoverageNotReached { legs, .. }) => assert_eq!(legs, config.max_iterations),
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn leg_cap_is_enforced() {
        let config = GenConfig { coverage_goal: 0.95, max_iterations: 3, ..GenConfig::default() };
        let mut grid = CoarseGrid::new(config.width, config.height);
        let err = cover(&mut grid, &config, &mut SimRng::new(1)).unwrap_err();
        assert!(matches!(err, GenError::CoverageNotReached { legs: 3, .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn same_seed_same_grid() {
        let config = GenConfig::default();
        let paint = |seed| {
            let mut grid = CoarseGrid::new(config.width, config.height);
            let _ = cover(&mut grid, &config, &mut SimRng::new(seed));
            grid
        };
        assert_eq!(paint(11), paint(11));
    }
}

// ── Topology expansion ────────────────────────────────────────────────────────

#[cfg(test)]
mod topology {
    use lg_core::{NodeId, SimConfig, TileType};

    use super::helpers::{assert_legal, id};
    use crate::direction::{Direction, Openings};
    use crate::grid::CoarseGrid;
    use crate::topology::{expand, straight_loop_edges, Corner};
    use crate::GenConfig;

    fn open(dirs: &[Direction]) -> Openings {
        dirs.iter().copied().collect()
    }

    #[test]
    fn loop_weights_by_pattern() {
        use Direction::*;
        // Index order: NE→NW, NW→SW, SW→SE, SE→NE.
        assert_eq!(straight_loop_edges(open(&[North, South])), [false, true, false, true]);
        assert_eq!(straight_loop_edges(open(&[East, West])), [true, false, true, false]);
        assert_eq!(straight_loop_edges(open(&[North, East])), [false, true, true, false]);
        assert_eq!(straight_loop_edges(open(&[South, West])), [true, false, false, true]);
        assert_eq!(straight_loop_edges(open(&[North])), [false; 4]);
        assert_eq!(straight_loop_edges(Openings::NONE), [false; 4]);
        assert_eq!(straight_loop_edges(open(&[North, East, South])), [true; 4]);
    }

    #[test]
    fn two_cell_corridor() {
        let grid = CoarseGrid::from_rows(&["##"]);
        let config = GenConfig::default();
        let graph = expand(&grid, &config, &SimConfig::default()).unwrap();
        assert_eq!((graph.width(), graph.height()), (4, 2));
        assert_eq!(graph.node_count(), 8);
        assert_eq!(graph.edge_count(), 10);

        // East exit of the left block: SE (1,1) → SW of the right block (2,1).
        let se = graph.node(id(Corner::SouthEast, 0, 0, 4)).unwrap();
        let exit = se.edge_to(id(Corner::SouthWest, 1, 0, 4)).unwrap();
        assert_eq!(exit.weight, config.straight_weight);
        // West exit of the right block: NW (2,0) → NE of the left block (1,0).
        let nw = graph.node(NodeId(2)).unwrap();
        assert!(nw.edge_to(NodeId(1)).is_some());

        assert_legal(&grid, &graph, &config);
    }

    #[test]
    fn isolated_block_is_a_closed_uturn_loop() {
        let grid = CoarseGrid::from_rows(&["...", ".#.", "..."]);
        let config = GenConfig::default();
        let graph = expand(&grid, &config, &SimConfig::default()).unwrap();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);
        assert!(graph.nodes().all(|n| n.edges().len() == 1 && n.edges()[0].weight == config.uturn_weight));
        assert_legal(&grid, &graph, &config);
    }

    #[test]
    fn node_ids_are_row_major_fine_coordinates() {
        let grid = CoarseGrid::from_rows(&[".#.", "###", ".#."]);
        let graph = expand(&grid, &GenConfig::default(), &SimConfig::default()).unwrap();
        for node in graph.nodes() {
            assert_eq!(node.id(), NodeId((node.y() * 6 + node.x()) as u32));
        }
        assert_legal(&grid, &graph, &GenConfig::default());
    }

    #[test]
    fn track_cells_become_track_tiles() {
        let grid = CoarseGrid::from_rows(&["#T"]);
        let graph = expand(&grid, &GenConfig::default(), &SimConfig::default()).unwrap();
        assert_eq!(graph.nodes_of(TileType::Track).count(), 4);
        assert_eq!(graph.nodes_of(TileType::Road).count(), 4);
    }

    #[test]
    fn node_capacity_comes_from_sim_config() {
        let grid = CoarseGrid::from_rows(&["##"]);
        let sim = SimConfig { node_capacity: 3, ..SimConfig::default() };
        let graph = expand(&grid, &GenConfig::default(), &sim).unwrap();
        assert!(graph.nodes().all(|n| n.capacity() == 3));
    }
}

// ── Houses ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod houses {
    use lg_core::{NodeId, SimConfig, SimRng, TileType};

    use super::helpers::assert_legal;
    use crate::grid::CoarseGrid;
    use crate::houses::attach_houses;
    use crate::topology::expand;
    use crate::GenConfig;

    #[test]
    fn every_slot_beside_a_road_with_probability_one() {
        let grid = CoarseGrid::from_rows(&["...", ".#.", "..."]);
        let config = GenConfig { house_probability: 1.0, ..GenConfig::default() };
        let sim = SimConfig::default();
        let mut graph = expand(&grid, &config, &sim).unwrap();
        let added = attach_houses(&mut graph, &config, &sim, &mut SimRng::new(0)).unwrap();
        assert_eq!(added, 8);
        assert_eq!(graph.nodes_of(TileType::House).count(), 8);
        // Diagonal slots touch no road.
        assert!(graph.node_at(1, 1).is_none());
        for house in graph.nodes_of(TileType::House) {
            assert_eq!(house.edges().len(), 1);
            let road = graph.node(house.edges()[0].to).unwrap();
            assert_eq!(road.tile(), TileType::Road);
            assert!(road.edge_to(house.id()).is_some());
            assert_eq!(house.edges()[0].weight, config.straight_weight);
        }
        assert_legal(&grid, &graph, &config);
    }

    #[test]
    fn zero_probability_adds_none() {
        let grid = CoarseGrid::from_rows(&["##", "#."]);
        let config = GenConfig { house_probability: 0.0, ..GenConfig::default() };
        let sim = SimConfig::default();
        let mut graph = expand(&grid, &config, &sim).unwrap();
        let before = graph.node_count();
        assert_eq!(attach_houses(&mut graph, &config, &sim, &mut SimRng::new(0)).unwrap(), 0);
        assert_eq!(graph.node_count(), before);
    }

    #[test]
    fn west_road_wins_then_east() {
        // Fine columns 2 and 3 of row 0 are empty between two blocks.
        let grid = CoarseGrid::from_rows(&["#.#"]);
        let config = GenConfig { house_probability: 1.0, ..GenConfig::default() };
        let sim = SimConfig::default();
        let mut graph = expand(&grid, &config, &sim).unwrap();
        attach_houses(&mut graph, &config, &sim, &mut SimRng::new(0)).unwrap();

        let left = graph.node_at(2, 0).unwrap();
        assert_eq!(left.tile(), TileType::House);
        assert_eq!(left.edges()[0].to, NodeId(1));
        let right = graph.node_at(3, 0).unwrap();
        assert_eq!(right.edges()[0].to, NodeId(4));
    }

    #[test]
    fn track_is_not_a_house_road() {
        let grid = CoarseGrid::from_rows(&["...", ".T.", "..."]);
        let config = GenConfig { house_probability: 1.0, ..GenConfig::default() };
        let sim = SimConfig::default();
        let mut graph = expand(&grid, &config, &sim).unwrap();
        assert_eq!(attach_houses(&mut graph, &config, &sim, &mut SimRng::new(0)).unwrap(), 0);
    }
}

// ── Entry points ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod generate {
    use lg_core::{SimConfig, SimRng, TileType};
    use lg_network::NoopObserver;

    use super::helpers::assert_legal;
    use crate::{generate, generate_with_retry, GenConfig, GenError};

    #[test]
    fn default_map_is_legal_and_consistent() {
        let config = GenConfig::default();
        let sim = SimConfig { seed: 5, ..SimConfig::default() };
        let generated = generate_with_retry(&config, &sim).unwrap();
        let graph = generated.network.graph();
        let stats = generated.stats;

        assert!(stats.coverage >= config.coverage_goal);
        assert_eq!(stats.nodes, graph.node_count());
        assert_eq!(stats.edges, graph.edge_count());
        assert_eq!(stats.houses, graph.nodes_of(TileType::House).count());
        assert_eq!(stats.junctions, generated.grid.junction_count());
        assert_eq!((graph.width(), graph.height()), (40, 40));
        assert_eq!(generated.network.agent_count(), 0);
        assert_legal(&generated.grid, graph, &config);
    }

    #[test]
    fn invalid_config_is_not_retried() {
        let config = GenConfig { width: 1, ..GenConfig::default() };
        let err = generate_with_retry(&config, &SimConfig::default()).err().unwrap();
        assert!(matches!(err, GenError::InvalidConfig(_)));

        let sim = SimConfig { spawn_probability: -1.0, ..SimConfig::default() };
        let err = generate(&GenConfig::default(), &sim, &mut SimRng::new(0)).err().unwrap();
        assert!(!err.is_retryable());
    }

    #[test]
    fn exhausted_attempts_carry_last_error() {
        let config = GenConfig {
            coverage_goal: 0.95,
            max_iterations: 2,
            max_attempts: 3,
            ..GenConfig::default()
        };
        match generate_with_retry(&config, &SimConfig::default()) {
            Err(GenError::AttemptsExhausted { attempts, last }) => {
                assert_eq!(attempts, 3);
                assert!(matches!(*last, GenError::CoverageNotReached { .. }));
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("goal should be unreachable in two legs"),
        }
    }

    #[test]
    fn retry_is_reproducible() {
        let config = GenConfig::default();
        let sim = SimConfig { seed: 77, ..SimConfig::default() };
        let a = generate_with_retry(&config, &sim).unwrap();
        let b = generate_with_retry(&config, &sim).unwrap();
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.network.graph().render_ascii(), b.network.graph().render_ascii());
    }

    #[test]
    fn generated_network_runs() {
        let config = GenConfig::new(12, 12, 0.35, 0.5);
        let sim = SimConfig { spawn_probability: 0.2, total_ticks: 300, seed: 9, ..SimConfig::default() };
        let mut network = generate_with_retry(&config, &sim).unwrap().network;
        network.run(&mut NoopObserver);
        for node in network.graph().nodes() {
            assert!(node.occupants().len() <= node.capacity());
        }
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use lg_core::{SimConfig, SimRng};
    use proptest::prelude::*;

    use super::helpers::assert_legal;
    use crate::grid::CoarseGrid;
    use crate::{cover, generate, GenConfig, GenError};

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn coverage_walk_terminates(
            width in 2u32..16,
            height in 2u32..16,
            goal in 0.05f64..0.95,
            seed in any::<u64>(),
        ) {
            let config = GenConfig { width, height, coverage_goal: goal, ..GenConfig::default() };
            let mut grid = CoarseGrid::new(width, height);
            match cover(&mut grid, &config, &mut SimRng::new(seed)) {
                Ok(_) => prop_assert!(grid.coverage() >= goal),
                Err(GenError::CoverageNotReached { legs, .. }) => prop_assert_eq!(legs, config.max_iterations),
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
        }

        #[test]
        fn generated_topology_is_legal(
            width in 2u32..12,
            height in 2u32..12,
            goal in 0.1f64..0.5,
            houses in 0.0f64..=1.0,
            track in any::<bool>(),
            seed in any::<u64>(),
        ) {
            let config = GenConfig {
                width,
                height,
                coverage_goal: goal,
                house_probability: houses,
                track_line: track,
                ..GenConfig::default()
            };
            if let Ok(generated) = generate(&config, &SimConfig::default(), &mut SimRng::new(seed)) {
                assert_legal(&generated.grid, generated.network.graph(), &config);
            }
        }
    }
}
