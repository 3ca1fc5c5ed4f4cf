//! Pipeline-level scenarios and properties over randomly packed districts.

use std::collections::BTreeSet;

use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::lattice::{reduced_slope, strictly_inside};
use crate::prelude::*;
use crate::rand::draw_rects;

fn p(x: i64, y: i64) -> Point {
    Point::new(x, y)
}

fn edges_of(g: &Graph) -> Vec<(Point, Point)> {
    graph_edges(g).into_iter().map(|e| e.endpoints()).collect()
}

fn districts(n: usize, seed: u64) -> Vec<Vec<Point>> {
    let cfg = DistrictCfg {
        num_districts: n,
        ..DistrictCfg::default()
    };
    draw_districts(&cfg, seed).unwrap()
}

fn has_t_junction(g: &Graph) -> bool {
    let nodes: Vec<Point> = g.nodes().collect();
    graph_edges(g).iter().any(|e| {
        let (a, b) = e.endpoints();
        nodes.iter().any(|&q| strictly_inside(a, b, q))
    })
}

fn has_pass_through(g: &Graph) -> bool {
    g.nodes().any(|node| {
        let slopes: Vec<_> = g
            .neighbors(&node)
            .map(|n| reduced_slope(node, n).unwrap())
            .collect();
        slopes
            .iter()
            .enumerate()
            .any(|(i, s)| slopes[i + 1..].contains(&-*s))
    })
}

#[test]
fn stacked_pair_beside_tall_block() {
    //   01234567
    // 0 +---+--+
    // 1 | A |  |
    // 2 +---+ C|
    // 3 | B |  |
    // 4 +---+--+
    let polygons = vec![
        vec![p(0, 0), p(4, 0), p(4, 2), p(0, 2)],
        vec![p(0, 2), p(4, 2), p(4, 4), p(0, 4)],
        vec![p(4, 0), p(7, 0), p(7, 4), p(4, 4)],
    ];
    let mut g = build_graph(&polygons).unwrap();
    assert_eq!(g.edge_count(), 11);
    assert!(has_t_junction(&g));

    let stats = merge_corners(&mut g).unwrap();
    assert_eq!(stats.splits, 1);
    assert_eq!(g.edge_count(), 10);
    assert!(!g.contains_edge(p(4, 0), p(4, 4)));
    assert!(!has_t_junction(&g));

    continue_straight_lines(&mut g).unwrap();
    assert_eq!(
        edges_of(&g),
        vec![
            (p(0, 0), p(0, 4)),
            (p(0, 0), p(7, 0)),
            (p(0, 2), p(4, 2)),
            (p(0, 4), p(7, 4)),
            (p(4, 0), p(4, 4)),
            (p(7, 0), p(7, 4)),
        ]
    );
    assert_eq!(g.node_count(), 8);
}

#[test]
fn normalize_reports_every_stage() {
    let polygons = districts(30, 5);
    let out = normalize(&polygons, &PipelineCfg::default()).unwrap();
    let r = out.report;
    assert_eq!(r.polygons, 30);
    let merged = r.merged.unwrap();
    let straightened = r.straightened.unwrap();
    assert_eq!(r.built.nodes, merged.nodes);
    assert_eq!(merged.nodes, straightened.nodes);
    assert!(straightened.edges <= merged.edges);
    assert_eq!(straightened.edges, out.graph.edge_count());
    assert!(r.straighten.unwrap().bypasses > 0);
}

#[test]
fn normalize_can_skip_stages() {
    let polygons = districts(10, 9);
    let cfg = PipelineCfg {
        check_invariants: true,
        merge_corners: false,
        continue_lines: false,
    };
    let out = normalize(&polygons, &cfg).unwrap();
    assert_eq!(out.graph, build_graph(&polygons).unwrap());
    assert!(out.report.merge.is_none() && out.report.straightened.is_none());
}

#[test]
fn normalize_rejects_bad_polygons() {
    let polygons = vec![vec![p(0, 0), p(1, 0)]];
    assert!(matches!(
        normalize(&polygons, &PipelineCfg::default()),
        Err(BorderError::InvalidPolygon { index: 0, .. })
    ));
}

#[test]
fn randomized_translation_commutes_with_pipeline() {
    let mut rng = StdRng::seed_from_u64(42);
    let polygons = districts(25, 3);
    let base = normalize(&polygons, &PipelineCfg::default()).unwrap().graph;
    for _ in 0..4 {
        let (dx, dy) = (rng.gen_range(-1000..1000), rng.gen_range(-1000..1000));
        let moved: Vec<Vec<Point>> = polygons
            .iter()
            .map(|poly| poly.iter().map(|q| p(q.x + dx, q.y + dy)).collect())
            .collect();
        let shifted = normalize(&moved, &PipelineCfg::default()).unwrap().graph;
        let back: BTreeSet<(Point, Point)> = edges_of(&shifted)
            .into_iter()
            .map(|(a, b)| (p(a.x - dx, a.y - dy), p(b.x - dx, b.y - dy)))
            .collect();
        assert_eq!(back, edges_of(&base).into_iter().collect());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn merge_resolves_all_t_junctions(seed in any::<u64>(), n in 2usize..25) {
        let polygons = districts(n, seed);
        let mut g = build_graph(&polygons).unwrap();
        let nodes: Vec<Point> = g.nodes().collect();
        merge_corners(&mut g).unwrap();
        prop_assert!(g.check_symmetry().is_ok());
        prop_assert!(!has_t_junction(&g));
        prop_assert_eq!(g.nodes().collect::<Vec<_>>(), nodes);

        let once = g.clone();
        let again = merge_corners(&mut g).unwrap();
        prop_assert_eq!(again.splits, 0);
        prop_assert_eq!(&g, &once);
    }

    #[test]
    fn continuation_leaves_no_pass_through(seed in any::<u64>(), n in 2usize..25) {
        let polygons = districts(n, seed);
        let mut g = build_graph(&polygons).unwrap();
        let nodes: Vec<Point> = g.nodes().collect();
        merge_corners(&mut g).unwrap();
        let merged_edges = g.edge_count();
        continue_straight_lines(&mut g).unwrap();
        prop_assert!(g.check_symmetry().is_ok());
        prop_assert!(!has_pass_through(&g));
        prop_assert!(g.edge_count() <= merged_edges);
        prop_assert_eq!(g.nodes().collect::<Vec<_>>(), nodes);
    }

    #[test]
    fn every_rect_corner_is_a_node(seed in any::<u64>(), n in 1usize..15) {
        let cfg = DistrictCfg { num_districts: n, ..DistrictCfg::default() };
        let rects = draw_rects(&cfg, seed).unwrap();
        let out = normalize(&districts(n, seed), &PipelineCfg::default()).unwrap();
        for r in rects {
            for c in r.corners() {
                prop_assert!(out.graph.contains_node(&c));
            }
        }
    }
}
