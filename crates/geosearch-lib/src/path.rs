//! The five search algorithms over a [`LocationGraph`].
//!
//! Every algorithm follows the same closed-set discipline: a location that has
//! been expanded is never expanded again, and neighbours that were already
//! expanded are not queued again. This means a cheaper route to an expanded
//! location is never revisited. [`AStarMode::Strict`] lifts that restriction
//! for A* only.
//!
//! Algorithms work on [`LocationId`]s and report the expanded locations in
//! expansion order. [`crate::routing::SearchEngine`] resolves names, samples
//! metrics, and converts outcomes to [`crate::routing::SearchResult`]s.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::frontier::{IndexedMinHeap, PushOutcome};
use crate::graph::{LocationGraph, LocationId};
use crate::heuristic::HeuristicTable;
use crate::routing::{SearchAlgorithm, SearchLimit};

/// Default deepest limit tried by iterative deepening.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Goal-test and re-opening policy for A*.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AStarMode {
    /// Goal tested on pop and on discovery; expanded locations are final.
    #[default]
    Observed,
    /// Goal tested on pop only; expanded locations are re-opened when a
    /// cheaper route to them is found.
    Strict,
}

/// Raw result of one algorithm run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Route from start to goal, both inclusive.
    pub path: Option<Vec<LocationId>>,
    /// Expanded locations, in first-expansion order.
    pub explored: Vec<LocationId>,
}

impl SearchOutcome {
    fn trivial(start: LocationId) -> Self {
        Self {
            path: Some(vec![start]),
            explored: vec![start],
        }
    }

    fn finish(path: Option<Vec<LocationId>>, explored: ExploredSet) -> Self {
        Self {
            path,
            explored: explored.order,
        }
    }
}

#[derive(Debug, Default)]
struct ExploredSet {
    order: Vec<LocationId>,
    seen: HashSet<LocationId>,
}

impl ExploredSet {
    fn insert(&mut self, id: LocationId) -> bool {
        let inserted = self.seen.insert(id);
        if inserted {
            self.order.push(id);
        }
        inserted
    }

    fn contains(&self, id: LocationId) -> bool {
        self.seen.contains(&id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Discipline {
    Fifo,
    Lifo,
}

/// Breadth-first search. Returns a route with the fewest hops.
pub fn find_route_bfs(graph: &LocationGraph, start: LocationId, goal: LocationId) -> SearchOutcome {
    blind_search(graph, start, goal, Discipline::Fifo)
}

/// Depth-first search.
///
/// Neighbours are queued so that the lexicographically first one is expanded
/// first.
pub fn find_route_dfs(graph: &LocationGraph, start: LocationId, goal: LocationId) -> SearchOutcome {
    blind_search(graph, start, goal, Discipline::Lifo)
}

fn blind_search(
    graph: &LocationGraph,
    start: LocationId,
    goal: LocationId,
    discipline: Discipline,
) -> SearchOutcome {
    if start == goal {
        return SearchOutcome::trivial(start);
    }

    let mut parents: HashMap<LocationId, Option<LocationId>> = HashMap::new();
    let mut explored = ExploredSet::default();
    let mut frontier: VecDeque<(LocationId, Option<LocationId>)> = VecDeque::new();
    frontier.push_back((start, None));

    loop {
        let next = match discipline {
            Discipline::Fifo => frontier.pop_front(),
            Discipline::Lifo => frontier.pop_back(),
        };
        let Some((current, parent)) = next else {
            break;
        };
        if explored.contains(current) {
            continue;
        }

        parents.insert(current, parent);
        if current == goal {
            let path = reconstruct_path(&parents, start, goal);
            return SearchOutcome::finish(Some(path), explored);
        }
        explored.insert(current);

        let unexplored = graph
            .edges(current)
            .iter()
            .map(|edge| edge.target)
            .filter(|target| !explored.contains(*target));
        match discipline {
            Discipline::Fifo => frontier.extend(unexplored.map(|target| (target, Some(current)))),
            Discipline::Lifo => {
                let mut pending: Vec<LocationId> = unexplored.collect();
                pending.reverse();
                frontier.extend(pending.into_iter().map(|target| (target, Some(current))));
            }
        }
    }

    SearchOutcome::finish(None, explored)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DepthOutcome {
    Found,
    CutOff,
    Exhausted,
}

/// Iterative-deepening depth-first search.
///
/// Each depth iteration starts with a fresh explored set, and within an
/// iteration a location is only excluded while it is on the current branch.
/// An iteration in which no branch hit the depth limit means every reachable
/// location has been tried, so the search reports no route. Running past
/// `max_depth` fails with [`Error::SearchTimedOut`].
pub fn find_route_iddfs(
    graph: &LocationGraph,
    start: LocationId,
    goal: LocationId,
    max_depth: usize,
) -> Result<SearchOutcome> {
    if start == goal {
        return Ok(SearchOutcome::trivial(start));
    }

    for limit in 0..=max_depth {
        let mut explored = ExploredSet::default();
        let mut branch = vec![start];
        let mut on_branch = HashSet::from([start]);

        match depth_limited(
            graph,
            goal,
            limit,
            &mut branch,
            &mut on_branch,
            &mut explored,
        ) {
            DepthOutcome::Found => return Ok(SearchOutcome::finish(Some(branch), explored)),
            DepthOutcome::Exhausted => return Ok(SearchOutcome::finish(None, explored)),
            DepthOutcome::CutOff => {
                tracing::trace!(limit, "iddfs iteration cut off; deepening");
            }
        }
    }

    Err(Error::SearchTimedOut {
        algorithm: SearchAlgorithm::Iddfs,
        limit: SearchLimit::Depth(max_depth),
    })
}

fn depth_limited(
    graph: &LocationGraph,
    goal: LocationId,
    remaining: usize,
    branch: &mut Vec<LocationId>,
    on_branch: &mut HashSet<LocationId>,
    explored: &mut ExploredSet,
) -> DepthOutcome {
    let Some(&current) = branch.last() else {
        return DepthOutcome::Exhausted;
    };
    if current == goal {
        return DepthOutcome::Found;
    }
    explored.insert(current);

    if remaining == 0 {
        let has_more = graph
            .edges(current)
            .iter()
            .any(|edge| !on_branch.contains(&edge.target));
        return if has_more {
            DepthOutcome::CutOff
        } else {
            DepthOutcome::Exhausted
        };
    }

    let mut cut_off = false;
    for edge in graph.edges(current) {
        let next = edge.target;
        if on_branch.contains(&next) {
            continue;
        }

        branch.push(next);
        on_branch.insert(next);
        match depth_limited(graph, goal, remaining - 1, branch, on_branch, explored) {
            DepthOutcome::Found => return DepthOutcome::Found,
            DepthOutcome::CutOff => cut_off = true,
            DepthOutcome::Exhausted => {}
        }
        branch.pop();
        on_branch.remove(&next);
    }

    if cut_off {
        DepthOutcome::CutOff
    } else {
        DepthOutcome::Exhausted
    }
}

/// Greedy best-first search ordered purely by the heuristic estimate to the goal.
pub fn find_route_greedy(
    graph: &LocationGraph,
    heuristics: &HeuristicTable,
    start: LocationId,
    goal: LocationId,
) -> Result<SearchOutcome> {
    if start == goal {
        return Ok(SearchOutcome::trivial(start));
    }

    let mut parents: HashMap<LocationId, Option<LocationId>> = HashMap::new();
    let mut explored = ExploredSet::default();
    let mut frontier = IndexedMinHeap::new();

    parents.insert(start, None);
    frontier.push(start, heuristics.estimate_or_missing(graph, start, goal)?);

    while let Some((current, _)) = frontier.pop() {
        if current == goal {
            let path = reconstruct_path(&parents, start, goal);
            return Ok(SearchOutcome::finish(Some(path), explored));
        }
        explored.insert(current);

        for edge in graph.edges(current) {
            let next = edge.target;
            if explored.contains(next) || frontier.contains(next) {
                continue;
            }

            parents.insert(next, Some(current));
            if next == goal {
                let path = reconstruct_path(&parents, start, goal);
                return Ok(SearchOutcome::finish(Some(path), explored));
            }
            let estimate = heuristics.estimate_or_missing(graph, next, goal)?;
            frontier.push(next, estimate);
        }
    }

    Ok(SearchOutcome::finish(None, explored))
}

/// A* search ordered by accumulated cost plus heuristic estimate.
pub fn find_route_a_star(
    graph: &LocationGraph,
    heuristics: &HeuristicTable,
    start: LocationId,
    goal: LocationId,
    mode: AStarMode,
) -> Result<SearchOutcome> {
    if start == goal {
        return Ok(SearchOutcome::trivial(start));
    }

    let mut g_score: HashMap<LocationId, f64> = HashMap::new();
    let mut parents: HashMap<LocationId, Option<LocationId>> = HashMap::new();
    let mut explored = ExploredSet::default();
    let mut frontier = IndexedMinHeap::new();

    g_score.insert(start, 0.0);
    parents.insert(start, None);
    frontier.push(start, heuristics.estimate_or_missing(graph, start, goal)?);

    while let Some((current, _)) = frontier.pop() {
        if current == goal {
            let path = reconstruct_path(&parents, start, goal);
            return Ok(SearchOutcome::finish(Some(path), explored));
        }
        explored.insert(current);
        let current_score = g_score.get(&current).copied().unwrap_or(f64::INFINITY);

        for edge in graph.edges(current) {
            let next = edge.target;
            let tentative_g = current_score + edge.weight;

            match mode {
                AStarMode::Observed => {
                    if explored.contains(next) {
                        continue;
                    }
                    if next == goal {
                        parents.insert(next, Some(current));
                        let path = reconstruct_path(&parents, start, goal);
                        return Ok(SearchOutcome::finish(Some(path), explored));
                    }
                    let estimate = heuristics.estimate_or_missing(graph, next, goal)?;
                    match frontier.push_or_decrease(next, tentative_g + estimate) {
                        PushOutcome::Inserted | PushOutcome::Decreased => {
                            g_score.insert(next, tentative_g);
                            parents.insert(next, Some(current));
                        }
                        PushOutcome::Unchanged => {}
                    }
                }
                AStarMode::Strict => {
                    if tentative_g >= *g_score.get(&next).unwrap_or(&f64::INFINITY) {
                        continue;
                    }
                    let estimate = heuristics.estimate_or_missing(graph, next, goal)?;
                    g_score.insert(next, tentative_g);
                    parents.insert(next, Some(current));
                    frontier.push_or_decrease(next, tentative_g + estimate);
                }
            }
        }
    }

    Ok(SearchOutcome::finish(None, explored))
}

/// Sum of edge weights along `path`.
pub fn path_cost(graph: &LocationGraph, path: &[LocationId]) -> Result<f64> {
    path.windows(2)
        .map(|pair| graph.edge_weight_between(pair[0], pair[1]))
        .sum()
}

fn reconstruct_path(
    parents: &HashMap<LocationId, Option<LocationId>>,
    start: LocationId,
    goal: LocationId,
) -> Vec<LocationId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents.get(&node).copied().flatten();
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Chain `a - b - c - d` plus a shortcut `a - d` with a heavy weight.
    fn chain() -> LocationGraph {
        let mut graph = LocationGraph::new();
        for name in ["a", "b", "c", "d"] {
            graph.add_location(name, (0.0, 0.0));
        }
        graph.add_connection("a", "b", 1.0, false).unwrap();
        graph.add_connection("b", "c", 1.0, false).unwrap();
        graph.add_connection("c", "d", 1.0, false).unwrap();
        graph.add_connection("a", "d", 50.0, false).unwrap();
        graph
    }

    fn id(graph: &LocationGraph, name: &str) -> LocationId {
        graph.id_of(name).unwrap()
    }

    fn names(graph: &LocationGraph, ids: &[LocationId]) -> Vec<String> {
        ids.iter()
            .map(|id| graph.name(*id).unwrap().to_string())
            .collect()
    }

    #[test]
    fn bfs_goal_is_not_marked_explored() {
        let graph = chain();
        let outcome = find_route_bfs(&graph, id(&graph, "a"), id(&graph, "d"));
        assert_eq!(names(&graph, outcome.path.as_deref().unwrap()), ["a", "d"]);
        assert!(!outcome.explored.contains(&id(&graph, "d")));
        assert_eq!(outcome.explored[0], id(&graph, "a"));
    }

    #[test]
    fn dfs_expands_lexicographically_first_neighbour_first() {
        let graph = chain();
        let outcome = find_route_dfs(&graph, id(&graph, "a"), id(&graph, "d"));
        assert_eq!(
            names(&graph, outcome.path.as_deref().unwrap()),
            ["a", "b", "c", "d"]
        );
        assert_eq!(names(&graph, &outcome.explored), ["a", "b", "c"]);
    }

    #[test]
    fn iddfs_returns_shallowest_route() {
        let graph = chain();
        let outcome = find_route_iddfs(&graph, id(&graph, "b"), id(&graph, "d"), 8).unwrap();
        assert_eq!(
            names(&graph, outcome.path.as_deref().unwrap()),
            ["b", "a", "d"]
        );
    }

    #[test]
    fn iddfs_depth_cap_times_out() {
        let graph = chain();
        let err = find_route_iddfs(&graph, id(&graph, "b"), id(&graph, "d"), 1).unwrap_err();
        assert!(matches!(
            err,
            Error::SearchTimedOut {
                algorithm: SearchAlgorithm::Iddfs,
                limit: SearchLimit::Depth(1)
            }
        ));
    }

    #[test]
    fn informed_searches_need_a_table() {
        let graph = chain();
        let empty = HeuristicTable::new();
        let (a, d) = (id(&graph, "a"), id(&graph, "d"));
        assert!(matches!(
            find_route_greedy(&graph, &empty, a, d),
            Err(Error::HeuristicMissing { .. })
        ));
        assert!(matches!(
            find_route_a_star(&graph, &empty, a, d, AStarMode::Observed),
            Err(Error::HeuristicMissing { .. })
        ));
    }

    #[test]
    fn greedy_returns_on_goal_discovery() {
        // Every estimate is zero, so only the eager check keeps `a` unexpanded.
        let mut graph = LocationGraph::new();
        for name in ["s", "a", "g", "z"] {
            graph.add_location(name, (0.0, 0.0));
        }
        graph.add_connection("s", "a", 1.0, false).unwrap();
        graph.add_connection("s", "g", 1.0, false).unwrap();
        graph.add_connection("a", "z", 1.0, false).unwrap();
        let table = HeuristicTable::from_graph(&graph, &crate::geo::GreatCircle);

        let outcome = find_route_greedy(&graph, &table, id(&graph, "s"), id(&graph, "g")).unwrap();
        assert_eq!(names(&graph, &outcome.path.unwrap()), ["s", "g"]);
        assert_eq!(names(&graph, &outcome.explored), ["s"]);
    }

    #[test]
    fn strict_a_star_prefers_cheaper_chain() {
        let graph = chain();
        let table = HeuristicTable::from_graph(&graph, &crate::geo::GreatCircle);
        let (a, d) = (id(&graph, "a"), id(&graph, "d"));

        let strict = find_route_a_star(&graph, &table, a, d, AStarMode::Strict).unwrap();
        let strict_path = strict.path.unwrap();
        assert_eq!(names(&graph, &strict_path), ["a", "b", "c", "d"]);
        assert_eq!(path_cost(&graph, &strict_path).unwrap(), 3.0);

        let observed = find_route_a_star(&graph, &table, a, d, AStarMode::Observed).unwrap();
        assert_eq!(names(&graph, &observed.path.unwrap()), ["a", "d"]);
    }

    #[test]
    fn a_star_decrease_key_updates_parent() {
        // s -> x is expensive, s -> y -> x is cheap; x is found first via s.
        let mut graph = LocationGraph::new();
        for name in ["s", "x", "y", "z", "goal"] {
            graph.add_location(name, (0.0, 0.0));
        }
        graph.add_connection("s", "x", 10.0, true).unwrap();
        graph.add_connection("s", "y", 1.0, true).unwrap();
        graph.add_connection("y", "x", 1.0, true).unwrap();
        graph.add_connection("x", "z", 1.0, true).unwrap();
        graph.add_connection("z", "goal", 1.0, true).unwrap();
        let table = HeuristicTable::from_graph(&graph, &crate::geo::GreatCircle);

        let outcome = find_route_a_star(
            &graph,
            &table,
            id(&graph, "s"),
            id(&graph, "goal"),
            AStarMode::Observed,
        )
        .unwrap();
        assert_eq!(
            names(&graph, outcome.path.as_deref().unwrap()),
            ["s", "y", "x", "z", "goal"]
        );
    }

    #[test]
    fn path_cost_of_missing_edge_fails() {
        let graph = chain();
        let err = path_cost(&graph, &[id(&graph, "a"), id(&graph, "c")]).unwrap_err();
        assert!(matches!(err, Error::EdgeNotFound { .. }));
    }
}
