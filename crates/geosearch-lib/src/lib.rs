//! geosearch library entry points.
//!
//! This crate loads a location table and adjacency list into a weighted
//! [`LocationGraph`], precomputes straight-line [`HeuristicTable`] estimates,
//! and runs five route searches over it: breadth-first, depth-first,
//! iterative-deepening, greedy best-first, and A*. Consumers (the CLI,
//! benchmarks) should go through the functions exported here instead of
//! reimplementing behavior.
//!
//! ```
//! use geosearch_lib::{
//!     GreatCircle, HeuristicTable, LocationGraph, SearchAlgorithm, SearchEngine,
//! };
//!
//! let mut graph = LocationGraph::new();
//! graph.add_location("Salina", (38.8403, -97.6114));
//! graph.add_location("Abilene", (38.9172, -97.2139));
//! graph.add_location("Topeka", (39.0473, -95.6752));
//! graph.add_connection("Salina", "Abilene", 22.0, false)?;
//! graph.add_connection("Abilene", "Topeka", 83.0, false)?;
//!
//! let heuristics = HeuristicTable::from_graph(&graph, &GreatCircle);
//! let result = SearchEngine::default().search(
//!     &graph,
//!     Some(&heuristics),
//!     SearchAlgorithm::Bfs,
//!     "Salina",
//!     "Topeka",
//! )?;
//! assert_eq!(result.hop_count(), Some(2));
//! # Ok::<(), geosearch_lib::Error>(())
//! ```

pub mod dataset;
pub mod error;
pub mod frontier;
pub mod geo;
pub mod graph;
pub mod heuristic;
pub mod metrics;
pub mod path;
pub mod report;
pub mod routing;

pub use dataset::{
    build_graph, load_adjacency, load_dataset, load_locations, load_locations_from_reader,
    parse_adjacency, Connection, DatasetPaths, GraphBuildSummary, LocationRecord,
};
pub use error::{Error, Result};
pub use frontier::{IndexedMinHeap, PushOutcome};
pub use geo::{geodesic_miles, haversine_miles, Coordinates, DistanceOracle, GreatCircle};
pub use graph::{Edge, Location, LocationGraph, LocationId};
pub use heuristic::HeuristicTable;
pub use metrics::{MetricsProvider, MetricsSample, NullMetrics, SteppingMetrics, SystemMetrics};
pub use path::{
    find_route_a_star, find_route_bfs, find_route_dfs, find_route_greedy, find_route_iddfs,
    path_cost, AStarMode, SearchOutcome, DEFAULT_MAX_DEPTH,
};
pub use report::{compare_algorithms, RunReport};
pub use routing::{
    select_planner, SearchAlgorithm, SearchEngine, SearchLimit, SearchOptions, SearchPlanner,
    SearchResult, UnknownAlgorithm,
};
