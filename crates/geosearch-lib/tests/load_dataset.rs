mod common;

use std::fs;
use std::io::Cursor;

use geosearch_lib::{
    build_graph, load_adjacency, load_dataset, load_locations, parse_adjacency, DatasetPaths,
    Error, GraphBuildSummary, GreatCircle,
};
use tempfile::tempdir;

use common::{fixture_graph, fixture_paths};

#[test]
fn fixture_dataset_loads_with_summary() {
    let (graph, summary) = load_dataset(&fixture_paths(), &GreatCircle).expect("fixture loads");

    assert_eq!(
        summary,
        GraphBuildSummary {
            locations: 39,
            connections_added: 46,
            connections_skipped: 1,
        }
    );
    assert_eq!(graph.len(), 39);
    assert_eq!(graph.edge_count(), 92);
}

#[test]
fn connections_are_bidirectional_and_weighted_by_distance() {
    let graph = fixture_graph();
    let there = graph.edge_weight("Wichita", "Newton").expect("edge exists");
    let back = graph.edge_weight("Newton", "Wichita").expect("edge exists");
    assert_eq!(there, back);
    // Wichita to Newton is roughly 25 miles.
    assert!((there - 24.8).abs() < 1.0, "got {there}");
}

#[test]
fn neighbours_are_sorted_by_name() {
    let graph = fixture_graph();
    assert_eq!(
        graph.neighbours("Wichita"),
        ["Andover", "Cheney", "Clearwater", "Derby", "Newton"]
    );
    assert!(graph.neighbours("Liberal").is_empty());
}

#[test]
fn later_duplicate_rows_overwrite_coordinates() {
    let dir = tempdir().expect("temp dir");
    let coordinates = dir.path().join("coordinates.csv");
    fs::write(
        &coordinates,
        "Wichita,0.0,0.0\nNewton,38.0467,-97.3450\nWichita,37.6872,-97.3301\n",
    )
    .expect("write coordinates");

    let records = load_locations(&coordinates).expect("loads");
    let connections = parse_adjacency(Cursor::new("Wichita Newton")).expect("parses");
    let (graph, summary) = build_graph(&records, &connections, &GreatCircle).expect("builds");

    assert_eq!(summary.locations, 2);
    let wichita = graph.location("Wichita").expect("present");
    assert_eq!(wichita.coordinates.latitude, 37.6872);
}

#[test]
fn missing_files_surface_io_errors() {
    let dir = tempdir().expect("temp dir");
    let paths = DatasetPaths::new(
        dir.path().join("missing.csv"),
        dir.path().join("missing.txt"),
    );
    let err = load_dataset(&paths, &GreatCircle).expect_err("no such file");
    assert!(matches!(err, Error::Io(_)));

    let err = load_adjacency(&paths.adjacency).expect_err("no such file");
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn malformed_longitude_is_rejected() {
    let dir = tempdir().expect("temp dir");
    let coordinates = dir.path().join("coordinates.csv");
    fs::write(&coordinates, "Wichita,37.6872,-97.3301\nNewton,38.0467,west\n")
        .expect("write coordinates");

    let err = load_locations(&coordinates).expect_err("malformed");
    match err {
        Error::InvalidLocationRecord { line, message } => {
            assert_eq!(line, 2);
            assert!(message.contains("longitude"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}
