use std::collections::{BTreeMap, BTreeSet};

use super::*;
use crate::error::BorderError;

fn p(x: i64, y: i64) -> Point {
    Point::new(x, y)
}

fn adjacency(rows: &[(Point, &[Point])]) -> BTreeMap<Point, BTreeSet<Point>> {
    rows.iter()
        .map(|(k, ns)| (*k, ns.iter().copied().collect()))
        .collect()
}

#[test]
fn three_rectangles_weld_at_shared_corners() {
    //   012345
    // 0 A--B-C
    // 1 |  | |
    // 2 D--E-F
    // 3 |    |
    // 4 |    |
    // 5 G----H
    let (a, b, c) = (p(0, 0), p(3, 0), p(5, 0));
    let (d, e, f) = (p(0, 2), p(3, 2), p(5, 2));
    let (g, h) = (p(0, 5), p(5, 5));
    let polygons = vec![vec![a, b, e, d], vec![b, c, f, e], vec![d, f, h, g]];
    let graph = build_graph(&polygons).unwrap();
    let expected = adjacency(&[
        (a, &[b, d]),
        (b, &[a, c, e]),
        (c, &[b, f]),
        (d, &[a, e, f, g]),
        (e, &[b, d, f]),
        (f, &[c, e, d, h]),
        (g, &[d, h]),
        (h, &[g, f]),
    ]);
    assert_eq!(graph.adjacency(), &expected);
    assert_eq!(graph.node_count(), 8);
    assert!(graph.check_symmetry().is_ok());
}

#[test]
fn wraparound_edge_is_included() {
    let tri = [p(0, 0), p(4, 0), p(0, 3)];
    let graph = build_graph(&[tri]).unwrap();
    assert!(graph.contains_edge(p(0, 3), p(0, 0)));
    assert_eq!(graph.edge_count(), 3);
}

#[test]
fn graph_edges_are_canonical_and_unique() {
    let (a, b, c, d) = (p(0, 0), p(1, 0), p(2, 0), p(3, 0));
    let cases: Vec<(Vec<(Point, Point)>, Vec<(Point, Point)>)> = vec![
        (vec![(b, a)], vec![(a, b)]),
        (vec![(a, b), (d, c)], vec![(a, b), (c, d)]),
        (
            vec![(a, b), (c, a), (b, c), (b, a)],
            vec![(a, b), (a, c), (b, c)],
        ),
    ];
    for (input, target) in cases {
        let graph = Graph::from_edges(input).unwrap();
        let got: Vec<_> = graph_edges(&graph)
            .into_iter()
            .map(|e| e.endpoints())
            .collect();
        assert_eq!(got, target);
    }
}

#[test]
fn edge_new_sorts_and_rejects_zero_length() {
    let e = Edge::new(p(3, 1), p(-2, 7)).unwrap();
    assert_eq!(e.endpoints(), (p(-2, 7), p(3, 1)));
    assert_eq!(Edge::new(p(1, 5), p(1, 2)).unwrap().a(), p(1, 2));
    assert!(matches!(
        Edge::new(p(2, 2), p(2, 2)),
        Err(BorderError::DegenerateSegment { .. })
    ));
}

#[test]
fn malformed_polygons_fail_fast() {
    let short = vec![vec![p(0, 0), p(1, 0)]];
    assert!(matches!(
        build_graph(&short),
        Err(BorderError::InvalidPolygon { index: 0, .. })
    ));
    let ok = vec![p(0, 0), p(2, 0), p(2, 2)];
    let stutter = vec![p(0, 0), p(2, 0), p(2, 0), p(2, 2)];
    assert!(matches!(
        build_graph(&[ok.clone(), stutter]),
        Err(BorderError::InvalidPolygon { index: 1, .. })
    ));
    // Closing edge collapses onto the first vertex.
    let closed_twice = vec![p(0, 0), p(2, 0), p(2, 2), p(0, 0)];
    assert!(build_graph(&[closed_twice]).is_err());
    assert!(build_graph(&[ok]).is_ok());
}

#[test]
fn remove_edge_keeps_nodes() {
    let mut g = Graph::from_edges([(p(0, 0), p(1, 1))]).unwrap();
    assert!(g.remove_edge(p(1, 1), p(0, 0)));
    assert!(!g.remove_edge(p(1, 1), p(0, 0)));
    assert_eq!(g.node_count(), 2);
    assert_eq!(g.edge_count(), 0);
    assert_eq!(g.degree(&p(0, 0)), 0);
}

#[test]
fn asymmetric_adjacency_is_reported() {
    let (a, b, c) = (p(0, 0), p(1, 0), p(2, 0));
    let raw = adjacency(&[(a, &[b]), (b, &[a, c]), (c, &[])]);
    let g = Graph::from_adjacency(raw);
    assert_eq!(
        g.check_symmetry(),
        Err(BorderError::InvariantViolation { a: b, b: c })
    );
    let looped = Graph::from_adjacency(adjacency(&[(a, &[a])]));
    assert!(matches!(
        looped.check_symmetry(),
        Err(BorderError::DegenerateSegment { .. })
    ));
}
