//! Unit tests for sc-grid.

#[cfg(test)]
mod helpers {
    use sc_core::ScenarioRng;

    use crate::{GridConfig, RoadNetwork, generate_grid};

    /// The 3×3, unjittered, 15 km/h reference grid.
    pub fn example_config() -> GridConfig {
        GridConfig {
            num_streets:      3,
            num_avenues:      3,
            link_length_m:    100.0,
            jitter_ratio:     0.0,
            capacity_veh_h:   1_800.0,
            street_speed_kmh: 15.0,
            avenue_speed_kmh: 15.0,
        }
    }

    pub fn example_grid() -> RoadNetwork {
        generate_grid(&example_config(), &mut ScenarioRng::new(1)).unwrap()
    }

    pub fn jittered(seed: u64) -> RoadNetwork {
        let cfg = GridConfig { num_streets: 6, num_avenues: 4, ..GridConfig::default() };
        generate_grid(&cfg, &mut ScenarioRng::new(seed)).unwrap()
    }
}

// ── Builder & network structure ────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use sc_core::{EdgeId, LatticeCoord, Point2};

    use crate::{GridError, RoadNetworkBuilder};

    #[test]
    fn empty_build() {
        let net = RoadNetworkBuilder::new().build();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(net.is_empty());
        assert_eq!(net.extent_m(), 0.0);
    }

    #[test]
    fn directed_only_edge() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(LatticeCoord::new(0, 0), Point2::new(0.0, 0.0));
        let c = b.add_node(LatticeCoord::new(0, 1), Point2::new(0.0, 100.0));
        b.add_directed_edge(a, c, 100.0, 1_800.0, 5.0);
        let net = b.build();
        assert_eq!(net.edge_count(), 1);
        assert_eq!(net.out_degree(a), 1);
        assert_eq!(net.out_degree(c), 0);
        assert_eq!(net.in_edges(c), &[EdgeId(0)]);
        assert!(matches!(net.first_in_edge(a), Err(GridError::NoInEdge(n)) if n == a));
    }

    #[test]
    fn edges_sorted_by_source_keep_insertion_order() {
        let mut b = RoadNetworkBuilder::new();
        let n0 = b.add_node(LatticeCoord::new(0, 0), Point2::new(0.0, 0.0));
        let n1 = b.add_node(LatticeCoord::new(0, 1), Point2::new(0.0, 1.0));
        let n2 = b.add_node(LatticeCoord::new(0, 2), Point2::new(0.0, 2.0));
        b.add_directed_edge(n1, n2, 1.0, 1.0, 1.0);
        b.add_directed_edge(n0, n2, 2.0, 1.0, 1.0);
        b.add_directed_edge(n1, n0, 3.0, 1.0, 1.0);
        let net = b.build();
        assert_eq!(net.edge_length_m, vec![2.0, 1.0, 3.0]);
        assert_eq!(net.edge_label(EdgeId(1)), "(0,1)->(0,2)");
        // Both edges entering n2, ascending.
        assert_eq!(net.in_edges(n2), &[EdgeId(0), EdgeId(1)]);
    }

    #[test]
    fn unknown_node_is_reported() {
        let net = RoadNetworkBuilder::new().build();
        assert!(matches!(
            net.first_in_edge(sc_core::NodeId(3)),
            Err(GridError::NodeNotFound(_))
        ));
    }
}

// ── Grid generation ───────────────────────────────────────────────────────────

#[cfg(test)]
mod grid {
    use sc_core::{LatticeCoord, ScenarioRng};

    use crate::{GridConfig, GridError, generate_grid};

    #[test]
    fn example_scenario_counts() {
        let net = super::helpers::example_grid();
        assert_eq!(net.node_count(), 9);
        assert_eq!(net.edge_count(), 24);
    }

    #[test]
    fn example_scenario_physics() {
        let net = super::helpers::example_grid();
        let expected_fs = 100.0 / (100.0 / 15.0 * 3.6 - 0.1);
        for i in 0..net.edge_count() {
            assert!((net.edge_length_m[i] - 100.0).abs() < 1e-9);
            assert!((net.edge_freespeed_mps[i] - expected_fs).abs() < 1e-9);
            assert_eq!(net.edge_capacity[i], 1_800.0);
        }
    }

    #[test]
    fn counts_match_formula_for_rectangles() {
        for (s, a) in [(1, 1), (1, 5), (4, 1), (2, 3), (7, 5)] {
            let cfg = GridConfig { num_streets: s, num_avenues: a, ..GridConfig::default() };
            let net = generate_grid(&cfg, &mut ScenarioRng::new(11)).unwrap();
            assert_eq!(net.node_count(), cfg.expected_nodes());
            assert_eq!(net.edge_count(), cfg.expected_edges());
            assert_eq!(
                net.edge_count(),
                2 * (s as usize * (a as usize - 1) + (s as usize - 1) * a as usize)
            );
        }
    }

    #[test]
    fn degrees_follow_lattice_position() {
        let net = super::helpers::example_grid();
        let corner = net.node_at(LatticeCoord::new(0, 0)).unwrap();
        let border = net.node_at(LatticeCoord::new(1, 0)).unwrap();
        let centre = net.node_at(LatticeCoord::new(1, 1)).unwrap();
        assert_eq!(net.out_degree(corner), 2);
        assert_eq!(net.out_degree(border), 3);
        assert_eq!(net.out_degree(centre), 4);
        assert_eq!(net.in_edges(centre).len(), 4);
    }

    #[test]
    fn both_directions_exist_with_shared_length() {
        let net = super::helpers::jittered(5);
        for e in 0..net.edge_count() {
            let fwd = net.edge_label(sc_core::EdgeId(e as u32));
            let from = net.node_coord[net.edge_from[e].index()];
            let to   = net.node_coord[net.edge_to[e].index()];
            let rev  = net.edge_by_label(&to.link_label(from)).expect("reverse edge");
            assert_ne!(net.edge_label(rev), fwd);
            assert_eq!(net.edge_length_m[rev.index()], net.edge_length_m[e]);
            assert_eq!(net.edge_freespeed_mps[rev.index()], net.edge_freespeed_mps[e]);
        }
    }

    #[test]
    fn jittered_length_is_actual_distance() {
        let net = super::helpers::jittered(8);
        let mut differs_from_nominal = false;
        for e in 0..net.edge_count() {
            let d = net.distance_m(net.edge_from[e], net.edge_to[e]);
            assert_eq!(net.edge_length_m[e], d);
            differs_from_nominal |= (d - 100.0).abs() > 1e-6;
        }
        assert!(differs_from_nominal);
    }

    #[test]
    fn jitter_stays_in_symmetric_window() {
        let net = super::helpers::jittered(21);
        let (mut below, mut above) = (false, false);
        for (coord, pos) in net.node_coord.iter().zip(&net.node_pos) {
            let dx = pos.x - f64::from(coord.street) * 100.0;
            let dy = pos.y - f64::from(coord.avenue) * 100.0;
            assert!(dx.abs() <= 40.0 + 1e-9 && dy.abs() <= 40.0 + 1e-9);
            below |= dx < 0.0;
            above |= dx > 0.0;
        }
        assert!(below && above, "jitter should fall on both sides of the lattice point");
    }

    #[test]
    fn freespeed_positive_everywhere() {
        let net = super::helpers::jittered(3);
        assert!(net.edge_freespeed_mps.iter().all(|&v| v > 0.0));
    }

    #[test]
    fn deterministic_for_same_seed() {
        let a = super::helpers::jittered(99);
        let b = super::helpers::jittered(99);
        assert_eq!(a.node_pos, b.node_pos);
        assert_eq!(a.edge_length_m, b.edge_length_m);
        for e in 0..a.edge_count() {
            let id = sc_core::EdgeId(e as u32);
            assert_eq!(a.edge_label(id), b.edge_label(id));
        }
        let c = super::helpers::jittered(100);
        assert_ne!(a.node_pos, c.node_pos);
    }

    #[test]
    fn short_links_fail_fast() {
        // 0.3 m at 15 km/h → 0.072 s ≤ 0.1 s.
        let cfg = GridConfig {
            num_streets:   2,
            num_avenues:   2,
            link_length_m: 0.3,
            jitter_ratio:  0.0,
            ..GridConfig::default()
        };
        let err = generate_grid(&cfg, &mut ScenarioRng::new(1)).unwrap_err();
        assert!(matches!(err, GridError::TravelTimeTooShort { travel_time_s, .. } if travel_time_s <= 0.1));
    }

    #[test]
    fn invalid_configs_rejected() {
        let base = GridConfig::default();
        let bad = [
            GridConfig { num_streets: 0, ..base.clone() },
            GridConfig { link_length_m: 0.0, ..base.clone() },
            GridConfig { jitter_ratio: -0.1, ..base.clone() },
            GridConfig { jitter_ratio: f64::NAN, ..base.clone() },
            GridConfig { jitter_ratio: f64::INFINITY, ..base.clone() },
            GridConfig { capacity_veh_h: 0.0, ..base.clone() },
            GridConfig { avenue_speed_kmh: 0.0, ..base.clone() },
        ];
        for cfg in bad {
            let r = generate_grid(&cfg, &mut ScenarioRng::new(1));
            assert!(matches!(r, Err(GridError::Config(_))), "{cfg:?}");
        }
    }

    #[test]
    fn large_jitter_still_generates() {
        for ratio in [0.5, 0.8] {
            let cfg = GridConfig {
                num_streets:  3,
                num_avenues:  3,
                jitter_ratio: ratio,
                ..GridConfig::default()
            };
            let net = generate_grid(&cfg, &mut ScenarioRng::new(7)).unwrap();
            assert_eq!(net.node_count(), 9);
            assert_eq!(net.edge_count(), 24);
            assert!(net.edge_length_m.iter().all(|&l| l > 0.0));
        }
    }

    #[test]
    fn titles() {
        let cfg = GridConfig { num_streets: 3, num_avenues: 7, ..GridConfig::default() };
        assert_eq!(cfg.title(), "GridNetwork-3_7");
    }
}

// ── Lookups & statistics ──────────────────────────────────────────────────────

#[cfg(test)]
mod lookups {
    use sc_core::LatticeCoord;

    #[test]
    fn coord_and_label_lookup() {
        let net = super::helpers::example_grid();
        let n = net.node_at(LatticeCoord::new(2, 1)).unwrap();
        assert_eq!(net.node_label(n), "(2,1)");
        assert!(net.node_at(LatticeCoord::new(3, 0)).is_none());

        let e = net.edge_by_label("(2,1)->(2,0)").unwrap();
        assert_eq!(net.node_coord[net.edge_from[e.index()].index()], LatticeCoord::new(2, 1));
        assert_eq!(net.edge_label(e), "(2,1)->(2,0)");
        assert!(net.edge_by_label("(0,0)->(2,2)").is_none());
    }

    #[test]
    fn first_in_edge_enters_node() {
        let net = super::helpers::example_grid();
        for n in 0..net.node_count() {
            let node = sc_core::NodeId(n as u32);
            let e = net.first_in_edge(node).unwrap();
            assert_eq!(net.edge_to[e.index()], node);
        }
    }

    #[test]
    fn debug_output_names_fields() {
        let net = super::helpers::example_grid();
        let dbg = format!("{net:?}");
        assert!(dbg.starts_with("RoadNetwork"));
        assert!(dbg.contains("edge_length_m"));
    }

    #[test]
    fn extent_of_example_grid() {
        let net = super::helpers::example_grid();
        assert!((net.extent_m() - 200.0 * 2f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn link_length_histogram() {
        let net = super::helpers::example_grid();
        let hist = net.link_length_distribution();
        assert_eq!(hist.len(), 1);
        assert_eq!(hist[&100], 24);

        let jittered = super::helpers::jittered(4);
        let total: u64 = jittered.link_length_distribution().values().sum();
        assert_eq!(total as usize, jittered.edge_count());
    }
}
