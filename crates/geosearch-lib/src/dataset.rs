//! Loading the location table and adjacency list into a [`LocationGraph`].
//!
//! Two plain-text inputs make up a dataset:
//!
//! - a headerless CSV of `name, latitude, longitude` rows
//! - an adjacency list where consecutive names on a line are connected
//!
//! Connection weights are not stored on disk; they come from the
//! [`DistanceOracle`] when the graph is built.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::geo::{Coordinates, DistanceOracle};
use crate::graph::LocationGraph;

/// One row of the location table.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRecord {
    pub name: String,
    pub coordinates: Coordinates,
}

/// Undirected connection named in the adjacency list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub source: String,
    pub destination: String,
}

/// Counters describing a [`build_graph`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphBuildSummary {
    pub locations: usize,
    pub connections_added: usize,
    pub connections_skipped: usize,
}

/// Locations of the two dataset files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub coordinates: PathBuf,
    pub adjacency: PathBuf,
}

impl DatasetPaths {
    pub fn new(coordinates: impl Into<PathBuf>, adjacency: impl Into<PathBuf>) -> Self {
        Self {
            coordinates: coordinates.into(),
            adjacency: adjacency.into(),
        }
    }
}

/// Read the location table from a file.
pub fn load_locations(path: &Path) -> Result<Vec<LocationRecord>> {
    let file = File::open(path)?;
    load_locations_from_reader(file)
}

/// Read the location table from any reader.
///
/// Rows are `name, latitude, longitude` with no header line. Blank lines are
/// ignored and surrounding whitespace is trimmed from every field.
pub fn load_locations_from_reader<R: Read>(reader: R) -> Result<Vec<LocationRecord>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();

        if record.len() != 3 {
            return Err(Error::InvalidLocationRecord {
                line,
                message: format!("expected 3 fields, found {}", record.len()),
            });
        }

        let name = record[0].to_string();
        if name.is_empty() {
            return Err(Error::InvalidLocationRecord {
                line,
                message: "location name is empty".to_string(),
            });
        }
        let latitude = parse_degrees(&record[1], "latitude", &name, line)?;
        let longitude = parse_degrees(&record[2], "longitude", &name, line)?;

        records.push(LocationRecord {
            name,
            coordinates: Coordinates::new(latitude, longitude),
        });
    }

    debug!(rows = records.len(), "read location table");
    Ok(records)
}

fn parse_degrees(field: &str, column: &str, name: &str, line: u64) -> Result<f64> {
    field
        .parse::<f64>()
        .map_err(|err| Error::InvalidLocationRecord {
            line,
            message: format!("invalid {column} '{field}' for '{name}': {err}"),
        })
}

/// Read the adjacency list from a file.
pub fn load_adjacency(path: &Path) -> Result<Vec<Connection>> {
    let file = File::open(path)?;
    parse_adjacency(BufReader::new(file))
}

/// Parse an adjacency list: each pair of consecutive names on a line is one
/// connection. Lines with fewer than two names contribute nothing.
pub fn parse_adjacency<R: BufRead>(reader: R) -> Result<Vec<Connection>> {
    let mut connections = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let names: Vec<&str> = line.split_whitespace().collect();
        connections.extend(names.windows(2).map(|pair| Connection {
            source: pair[0].to_string(),
            destination: pair[1].to_string(),
        }));
    }
    Ok(connections)
}

/// Build a graph from loaded records.
///
/// Every location is added first, then one bidirectional connection per
/// adjacency pair weighted by `oracle`. Pairs naming a location without
/// coordinates, or whose distance cannot be computed, are logged and skipped.
pub fn build_graph(
    locations: &[LocationRecord],
    connections: &[Connection],
    oracle: &dyn DistanceOracle,
) -> Result<(LocationGraph, GraphBuildSummary)> {
    let mut graph = LocationGraph::new();
    for record in locations {
        graph.add_location(record.name.as_str(), record.coordinates);
    }

    let mut summary = GraphBuildSummary {
        locations: graph.len(),
        ..GraphBuildSummary::default()
    };

    for connection in connections {
        let (Some(from), Some(to)) = (
            graph.location(&connection.source),
            graph.location(&connection.destination),
        ) else {
            warn!(
                source = %connection.source,
                destination = %connection.destination,
                "coordinates not found; skipping connection"
            );
            summary.connections_skipped += 1;
            continue;
        };

        let miles = match oracle.distance_miles(&from.coordinates, &to.coordinates) {
            Ok(miles) => miles,
            Err(err) => {
                warn!(
                    source = %connection.source,
                    destination = %connection.destination,
                    error = %err,
                    "distance unavailable; skipping connection"
                );
                summary.connections_skipped += 1;
                continue;
            }
        };

        graph.add_connection(&connection.source, &connection.destination, miles, false)?;
        summary.connections_added += 1;
    }

    Ok((graph, summary))
}

/// Load both dataset files and build the graph with `oracle`.
pub fn load_dataset(
    paths: &DatasetPaths,
    oracle: &dyn DistanceOracle,
) -> Result<(LocationGraph, GraphBuildSummary)> {
    let locations = load_locations(&paths.coordinates)?;
    let connections = load_adjacency(&paths.adjacency)?;
    let (graph, summary) = build_graph(&locations, &connections, oracle)?;

    info!(
        coordinates = %paths.coordinates.display(),
        adjacency = %paths.adjacency.display(),
        locations = summary.locations,
        connections = summary.connections_added,
        skipped = summary.connections_skipped,
        edges = graph.edge_count(),
        "loaded dataset"
    );
    Ok((graph, summary))
}
