//! Per-run summaries and side-by-side comparison of the algorithms.

use serde::Serialize;
use tracing::warn;

use crate::error::Result;
use crate::geo::DistanceOracle;
use crate::graph::LocationGraph;
use crate::heuristic::HeuristicTable;
use crate::routing::{SearchAlgorithm, SearchEngine, SearchResult};

/// Serializable summary of one search run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub algorithm: SearchAlgorithm,
    pub start: String,
    pub goal: String,
    pub path: Option<Vec<String>>,
    pub hops: Option<usize>,
    pub visited: usize,
    /// Great-circle length of the route in miles.
    pub total_distance_miles: Option<f64>,
    pub elapsed_seconds: f64,
    pub memory_delta_mb: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunReport {
    /// Summarise a finished search.
    ///
    /// The distance is the sum of oracle distances between consecutive route
    /// locations, so it does not depend on how edges were weighted.
    pub fn from_result(
        graph: &LocationGraph,
        oracle: &dyn DistanceOracle,
        result: &SearchResult,
    ) -> Result<Self> {
        let total_distance_miles = result
            .path
            .as_deref()
            .map(|path| route_distance(graph, oracle, path))
            .transpose()?;

        Ok(Self {
            algorithm: result.algorithm,
            start: result.start.clone(),
            goal: result.goal.clone(),
            path: result.path.clone(),
            hops: result.hop_count(),
            visited: result.explored.len(),
            total_distance_miles,
            elapsed_seconds: result.elapsed_seconds(),
            memory_delta_mb: result.memory_delta_mb,
            error: None,
        })
    }

    /// Report for a run that failed before producing a result.
    pub fn failed(algorithm: SearchAlgorithm, start: &str, goal: &str, error: String) -> Self {
        Self {
            algorithm,
            start: start.to_string(),
            goal: goal.to_string(),
            path: None,
            hops: None,
            visited: 0,
            total_distance_miles: None,
            elapsed_seconds: 0.0,
            memory_delta_mb: 0.0,
            error: Some(error),
        }
    }

    pub fn found(&self) -> bool {
        self.path.is_some()
    }
}

fn route_distance(
    graph: &LocationGraph,
    oracle: &dyn DistanceOracle,
    path: &[String],
) -> Result<f64> {
    let mut total = 0.0;
    for pair in path.windows(2) {
        let (Some(from), Some(to)) = (graph.location(&pair[0]), graph.location(&pair[1])) else {
            continue;
        };
        total += oracle.distance_miles(&from.coordinates, &to.coordinates)?;
    }
    Ok(total)
}

/// Run every algorithm in `algorithms` between the same endpoints.
///
/// An unknown start or goal aborts the comparison; any other failure is
/// recorded in the `error` field of that algorithm's report.
pub fn compare_algorithms(
    engine: &SearchEngine,
    graph: &LocationGraph,
    heuristics: Option<&HeuristicTable>,
    algorithms: &[SearchAlgorithm],
    start: &str,
    goal: &str,
    oracle: &dyn DistanceOracle,
) -> Result<Vec<RunReport>> {
    let mut reports = Vec::with_capacity(algorithms.len());
    for &algorithm in algorithms {
        let outcome = engine
            .search(graph, heuristics, algorithm, start, goal)
            .and_then(|result| RunReport::from_result(graph, oracle, &result));
        match outcome {
            Ok(report) => reports.push(report),
            Err(err) if err.is_unknown_location() => return Err(err),
            Err(err) => {
                warn!(%algorithm, start, goal, error = %err, "search failed during comparison");
                reports.push(RunReport::failed(algorithm, start, goal, err.to_string()));
            }
        }
    }
    Ok(reports)
}
