//! Search orchestration for the location graph.
//!
//! This module provides:
//! - [`SearchAlgorithm`] - The five supported strategies
//! - [`SearchOptions`] - Depth cap, wall-clock budget, and A* mode
//! - [`SearchEngine`] - Resolves names, runs a planner, samples metrics
//! - [`SearchResult`] - Path, explored set, elapsed time, memory delta
//!
//! # Strategy Pattern
//!
//! Each algorithm is wrapped in a [`SearchPlanner`] implementation so new
//! strategies can be added without touching the engine.
//!
//! # Example
//!
//! ```
//! use geosearch_lib::{GreatCircle, HeuristicTable, LocationGraph, SearchAlgorithm, SearchEngine};
//!
//! let mut graph = LocationGraph::new();
//! graph.add_location("Wichita", (37.6872, -97.3301));
//! graph.add_location("Newton", (38.0467, -97.3450));
//! graph.add_connection("Wichita", "Newton", 24.8, false)?;
//!
//! let heuristics = HeuristicTable::from_graph(&graph, &GreatCircle);
//! let engine = SearchEngine::default();
//! let result = engine.search(&graph, Some(&heuristics), SearchAlgorithm::AStar, "Wichita", "Newton")?;
//! assert_eq!(result.hop_count(), Some(1));
//! # Ok::<(), geosearch_lib::Error>(())
//! ```

mod planner;

pub use planner::{
    select_planner, AStarPlanner, BfsPlanner, DfsPlanner, GreedyPlanner, IddfsPlanner,
    SearchPlanner,
};

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::LocationGraph;
use crate::heuristic::HeuristicTable;
use crate::metrics::{MetricsProvider, SystemMetrics};
use crate::path::{AStarMode, SearchOutcome, DEFAULT_MAX_DEPTH};

/// Supported search algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchAlgorithm {
    /// Breadth-first search (fewest hops).
    Bfs,
    /// Depth-first search.
    Dfs,
    /// Iterative-deepening depth-first search.
    Iddfs,
    /// Greedy best-first search (heuristic only).
    Greedy,
    /// A* search (cost plus heuristic).
    #[serde(rename = "a-star")]
    AStar,
}

impl SearchAlgorithm {
    /// Every algorithm, in presentation order.
    pub const ALL: [SearchAlgorithm; 5] = [
        SearchAlgorithm::Bfs,
        SearchAlgorithm::Dfs,
        SearchAlgorithm::Iddfs,
        SearchAlgorithm::Greedy,
        SearchAlgorithm::AStar,
    ];

    /// Whether the algorithm consults the heuristic table.
    pub fn is_informed(self) -> bool {
        matches!(self, SearchAlgorithm::Greedy | SearchAlgorithm::AStar)
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            SearchAlgorithm::Bfs => "Breadth-First Search",
            SearchAlgorithm::Dfs => "Depth-First Search",
            SearchAlgorithm::Iddfs => "Iterative-Deepening DFS",
            SearchAlgorithm::Greedy => "Greedy Best-First Search",
            SearchAlgorithm::AStar => "A* Search",
        }
    }
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SearchAlgorithm::Bfs => "bfs",
            SearchAlgorithm::Dfs => "dfs",
            SearchAlgorithm::Iddfs => "iddfs",
            SearchAlgorithm::Greedy => "greedy",
            SearchAlgorithm::AStar => "a-star",
        };
        f.write_str(value)
    }
}

/// Error returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm '{}'; expected one of bfs, dfs, iddfs, greedy, a-star",
            self.0
        )
    }
}

impl std::error::Error for UnknownAlgorithm {}

impl FromStr for SearchAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(SearchAlgorithm::Bfs),
            "dfs" | "depth-first" => Ok(SearchAlgorithm::Dfs),
            "iddfs" | "iterative-deepening" => Ok(SearchAlgorithm::Iddfs),
            "greedy" | "best-first" => Ok(SearchAlgorithm::Greedy),
            "a-star" | "a_star" | "astar" | "a*" => Ok(SearchAlgorithm::AStar),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Bound that stopped a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchLimit {
    /// Iterative deepening reached its maximum depth.
    Depth(usize),
    /// The run took longer than the caller's budget.
    WallClock(Duration),
}

impl fmt::Display for SearchLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchLimit::Depth(depth) => write!(f, "depth limit of {depth}"),
            SearchLimit::WallClock(budget) => {
                write!(f, "time budget of {}ms", budget.as_millis())
            }
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Deepest limit tried by iterative deepening.
    pub max_depth: usize,
    /// Runs slower than this fail with [`Error::SearchTimedOut`].
    ///
    /// Checked once the run has finished; a search is never interrupted, so
    /// only `max_depth` bounds a long iterative-deepening run.
    pub time_budget: Option<Duration>,
    pub a_star_mode: AStarMode,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            time_budget: None,
            a_star_mode: AStarMode::Observed,
        }
    }
}

/// Outcome of a single search invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub algorithm: SearchAlgorithm,
    pub start: String,
    pub goal: String,
    /// Route from start to goal, or `None` when the goal is unreachable.
    pub path: Option<Vec<String>>,
    /// Locations expanded during the run.
    pub explored: BTreeSet<String>,
    pub elapsed: Duration,
    pub memory_delta_mb: f64,
}

impl SearchResult {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }

    /// Number of edges in the route.
    pub fn hop_count(&self) -> Option<usize> {
        self.path
            .as_ref()
            .map(|path| path.len().saturating_sub(1))
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Runs the search algorithms against a shared, read-only graph.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    options: SearchOptions,
    metrics: Arc<dyn MetricsProvider>,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(SearchOptions::default())
    }
}

impl SearchEngine {
    /// Engine sampling the real clock and process memory.
    pub fn new(options: SearchOptions) -> Self {
        Self {
            options,
            metrics: Arc::new(SystemMetrics::new()),
        }
    }

    /// Replace the metrics provider.
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsProvider>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Find a route from `start` to `goal` with the requested algorithm.
    ///
    /// An unreachable goal is reported through `path: None`, not an error.
    pub fn search(
        &self,
        graph: &LocationGraph,
        heuristics: Option<&HeuristicTable>,
        algorithm: SearchAlgorithm,
        start: &str,
        goal: &str,
    ) -> Result<SearchResult> {
        let start_id = graph.resolve(start)?;
        let goal_id = graph.resolve(goal)?;
        let planner = select_planner(algorithm, &self.options);

        let before = self.metrics.sample();
        let outcome = if start_id == goal_id {
            SearchOutcome {
                path: Some(vec![start_id]),
                explored: vec![start_id],
            }
        } else {
            planner.find_path(graph, heuristics, start_id, goal_id)?
        };
        let after = self.metrics.sample();

        let elapsed = after.duration_since(&before);
        if let Some(budget) = self.options.time_budget {
            if elapsed > budget {
                return Err(Error::SearchTimedOut {
                    algorithm,
                    limit: SearchLimit::WallClock(budget),
                });
            }
        }

        debug!(
            %algorithm,
            start,
            goal,
            explored = outcome.explored.len(),
            found = outcome.path.is_some(),
            elapsed_us = elapsed.as_micros() as u64,
            "search finished"
        );

        let to_name = |id| graph.display_name(id).to_string();
        Ok(SearchResult {
            algorithm,
            start: start.to_string(),
            goal: goal.to_string(),
            path: outcome
                .path
                .map(|path| path.into_iter().map(to_name).collect()),
            explored: outcome.explored.into_iter().map(to_name).collect(),
            elapsed,
            memory_delta_mb: after.memory_delta_mb(&before),
        })
    }
}
