//! Straight-line distance estimates between every pair of locations.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::geo::DistanceOracle;
use crate::graph::{LocationGraph, LocationId};

/// Symmetric table of heuristic estimates consumed by the informed searches.
///
/// Entries are keyed by location identifiers of the graph the table was
/// computed from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeuristicTable {
    estimates: HashMap<(LocationId, LocationId), f64>,
    computed: bool,
}

impl HeuristicTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table for `graph` in one pass.
    pub fn from_graph(graph: &LocationGraph, oracle: &impl DistanceOracle) -> Self {
        let mut table = Self::new();
        table.compute(graph, oracle);
        table
    }

    /// Recompute every estimate for `graph`, discarding previous entries.
    ///
    /// Oracle failures are logged and recorded as a zero estimate, which
    /// still under-estimates and keeps the table usable.
    pub fn compute(&mut self, graph: &LocationGraph, oracle: &impl DistanceOracle) {
        self.estimates.clear();
        let locations = graph.locations();
        let mut failures = 0usize;

        for (i, a) in locations.iter().enumerate() {
            for b in &locations[i + 1..] {
                let estimate = match oracle.distance_miles(&a.coordinates, &b.coordinates) {
                    Ok(miles) if miles.is_finite() && miles >= 0.0 => miles,
                    Ok(miles) => {
                        failures += 1;
                        warn!(
                            from = %a.name,
                            to = %b.name,
                            miles,
                            "distance oracle returned an unusable estimate; using 0"
                        );
                        0.0
                    }
                    Err(err) => {
                        failures += 1;
                        warn!(
                            from = %a.name,
                            to = %b.name,
                            error = %err,
                            "error calculating heuristic; using 0"
                        );
                        0.0
                    }
                };
                self.estimates.insert((a.id, b.id), estimate);
                self.estimates.insert((b.id, a.id), estimate);
            }
        }

        self.computed = true;
        debug!(
            locations = locations.len(),
            entries = self.estimates.len(),
            failures,
            "computed heuristic table"
        );
    }

    /// Whether [`compute`](Self::compute) has run.
    pub fn is_computed(&self) -> bool {
        self.computed
    }

    /// Number of stored (ordered) pairs.
    pub fn len(&self) -> usize {
        self.estimates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.estimates.is_empty()
    }

    /// Estimate between two location names of `graph`.
    pub fn lookup(&self, graph: &LocationGraph, from: &str, to: &str) -> Result<f64> {
        if from == to {
            return Ok(0.0);
        }
        let missing = || Error::HeuristicMissing {
            from: from.to_string(),
            to: to.to_string(),
        };
        let a = graph.id_of(from).ok_or_else(missing)?;
        let b = graph.id_of(to).ok_or_else(missing)?;
        self.estimate(a, b).ok_or_else(missing)
    }

    /// Estimate between two identifiers; `None` when never populated.
    ///
    /// Identical identifiers always estimate to zero.
    pub fn estimate(&self, from: LocationId, to: LocationId) -> Option<f64> {
        if from == to {
            return Some(0.0);
        }
        self.estimates.get(&(from, to)).copied()
    }

    pub(crate) fn estimate_or_missing(
        &self,
        graph: &LocationGraph,
        from: LocationId,
        to: LocationId,
    ) -> Result<f64> {
        self.estimate(from, to).ok_or_else(|| Error::HeuristicMissing {
            from: graph.display_name(from).to_string(),
            to: graph.display_name(to).to_string(),
        })
    }
}
