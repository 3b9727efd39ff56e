//! Shared fixture helpers for the integration tests.

use std::path::PathBuf;

use geosearch_lib::{load_dataset, DatasetPaths, GreatCircle, HeuristicTable, LocationGraph};

/// Path to the fixtures directory shared by the library and CLI tests.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Paths to the Kansas fixture dataset.
pub fn fixture_paths() -> DatasetPaths {
    let dir = fixtures_dir();
    DatasetPaths::new(dir.join("coordinates.csv"), dir.join("adjacencies.txt"))
}

/// Fixture graph weighted by great-circle distance.
#[allow(dead_code)]
pub fn fixture_graph() -> LocationGraph {
    let (graph, _) = load_dataset(&fixture_paths(), &GreatCircle).expect("fixture dataset loads");
    graph
}

/// Fixture graph together with its computed heuristic table.
#[allow(dead_code)]
pub fn fixture_with_heuristics() -> (LocationGraph, HeuristicTable) {
    let graph = fixture_graph();
    let heuristics = HeuristicTable::from_graph(&graph, &GreatCircle);
    (graph, heuristics)
}

/// Build a small graph from `(source, destination, weight)` triples.
///
/// Every location sits at the origin, so great-circle heuristics are zero.
#[allow(dead_code)]
pub fn graph_from_edges(locations: &[&str], edges: &[(&str, &str, f64)]) -> LocationGraph {
    let mut graph = LocationGraph::new();
    for name in locations {
        graph.add_location(*name, (0.0, 0.0));
    }
    for (source, destination, weight) in edges {
        graph
            .add_connection(source, destination, *weight, false)
            .expect("edge endpoints exist");
    }
    graph
}
