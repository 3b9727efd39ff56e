//! Search strategies implementing the Strategy pattern.
//!
//! Each algorithm is wrapped in a planner struct implementing
//! [`SearchPlanner`], so the engine can dispatch on [`SearchAlgorithm`]
//! without knowing the algorithm-specific configuration.

use crate::error::{Error, Result};
use crate::graph::{LocationGraph, LocationId};
use crate::heuristic::HeuristicTable;
use crate::path::{
    find_route_a_star, find_route_bfs, find_route_dfs, find_route_greedy, find_route_iddfs,
    AStarMode, SearchOutcome,
};

use super::{SearchAlgorithm, SearchOptions};

/// Trait for search strategies.
pub trait SearchPlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> SearchAlgorithm;

    /// Run the algorithm between two distinct, resolved locations.
    fn find_path(
        &self,
        graph: &LocationGraph,
        heuristics: Option<&HeuristicTable>,
        start: LocationId,
        goal: LocationId,
    ) -> Result<SearchOutcome>;

    /// Whether the planner needs a computed [`HeuristicTable`].
    fn requires_heuristics(&self) -> bool {
        false
    }
}

/// Breadth-first search planner; fewest hops, weights ignored.
#[derive(Debug, Clone, Default)]
pub struct BfsPlanner;

impl SearchPlanner for BfsPlanner {
    fn algorithm(&self) -> SearchAlgorithm {
        SearchAlgorithm::Bfs
    }

    fn find_path(
        &self,
        graph: &LocationGraph,
        _heuristics: Option<&HeuristicTable>,
        start: LocationId,
        goal: LocationId,
    ) -> Result<SearchOutcome> {
        Ok(find_route_bfs(graph, start, goal))
    }
}

/// Depth-first search planner.
#[derive(Debug, Clone, Default)]
pub struct DfsPlanner;

impl SearchPlanner for DfsPlanner {
    fn algorithm(&self) -> SearchAlgorithm {
        SearchAlgorithm::Dfs
    }

    fn find_path(
        &self,
        graph: &LocationGraph,
        _heuristics: Option<&HeuristicTable>,
        start: LocationId,
        goal: LocationId,
    ) -> Result<SearchOutcome> {
        Ok(find_route_dfs(graph, start, goal))
    }
}

/// Iterative-deepening planner capped at `max_depth`.
#[derive(Debug, Clone)]
pub struct IddfsPlanner {
    max_depth: usize,
}

impl IddfsPlanner {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

impl SearchPlanner for IddfsPlanner {
    fn algorithm(&self) -> SearchAlgorithm {
        SearchAlgorithm::Iddfs
    }

    fn find_path(
        &self,
        graph: &LocationGraph,
        _heuristics: Option<&HeuristicTable>,
        start: LocationId,
        goal: LocationId,
    ) -> Result<SearchOutcome> {
        find_route_iddfs(graph, start, goal, self.max_depth)
    }
}

/// Greedy best-first planner guided only by the heuristic.
#[derive(Debug, Clone, Default)]
pub struct GreedyPlanner;

impl SearchPlanner for GreedyPlanner {
    fn algorithm(&self) -> SearchAlgorithm {
        SearchAlgorithm::Greedy
    }

    fn find_path(
        &self,
        graph: &LocationGraph,
        heuristics: Option<&HeuristicTable>,
        start: LocationId,
        goal: LocationId,
    ) -> Result<SearchOutcome> {
        let table = require_table(graph, heuristics, start, goal)?;
        find_route_greedy(graph, table, start, goal)
    }

    fn requires_heuristics(&self) -> bool {
        true
    }
}

/// A* planner.
#[derive(Debug, Clone, Default)]
pub struct AStarPlanner {
    mode: AStarMode,
}

impl AStarPlanner {
    pub fn new(mode: AStarMode) -> Self {
        Self { mode }
    }
}

impl SearchPlanner for AStarPlanner {
    fn algorithm(&self) -> SearchAlgorithm {
        SearchAlgorithm::AStar
    }

    fn find_path(
        &self,
        graph: &LocationGraph,
        heuristics: Option<&HeuristicTable>,
        start: LocationId,
        goal: LocationId,
    ) -> Result<SearchOutcome> {
        let table = require_table(graph, heuristics, start, goal)?;
        find_route_a_star(graph, table, start, goal, self.mode)
    }

    fn requires_heuristics(&self) -> bool {
        true
    }
}

fn require_table<'a>(
    graph: &LocationGraph,
    heuristics: Option<&'a HeuristicTable>,
    start: LocationId,
    goal: LocationId,
) -> Result<&'a HeuristicTable> {
    heuristics
        .filter(|table| table.is_computed())
        .ok_or_else(|| Error::HeuristicMissing {
            from: graph.display_name(start).to_string(),
            to: graph.display_name(goal).to_string(),
        })
}

/// Select the planner for an algorithm, configured from `options`.
pub fn select_planner(
    algorithm: SearchAlgorithm,
    options: &SearchOptions,
) -> Box<dyn SearchPlanner> {
    match algorithm {
        SearchAlgorithm::Bfs => Box::new(BfsPlanner),
        SearchAlgorithm::Dfs => Box::new(DfsPlanner),
        SearchAlgorithm::Iddfs => Box::new(IddfsPlanner::new(options.max_depth)),
        SearchAlgorithm::Greedy => Box::new(GreedyPlanner),
        SearchAlgorithm::AStar => Box::new(AStarPlanner::new(options.a_star_mode)),
    }
}
