//! Directed, weighted location graph keyed by location name.
//!
//! Locations are stored densely and addressed by [`LocationId`] inside the
//! search engine; the public API accepts names. Outgoing edges of every
//! location are kept sorted by destination name so neighbour enumeration is
//! deterministic (lexicographic) regardless of insertion order.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::geo::Coordinates;

/// Minimum Jaro-Winkler similarity for a name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Dense index of a location inside a [`LocationGraph`].
pub type LocationId = usize;

/// Named location with its coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub coordinates: Coordinates,
}

/// Directed edge within the location graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: LocationId,
    pub weight: f64,
}

/// Graph structure consumed by the search algorithms.
#[derive(Debug, Clone, Default)]
pub struct LocationGraph {
    locations: Vec<Location>,
    name_to_id: HashMap<String, LocationId>,
    adjacency: Vec<Vec<Edge>>,
}

impl LocationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a location, or overwrite the coordinates of an existing one.
    ///
    /// Existing edges of an overwritten location are kept.
    pub fn add_location(
        &mut self,
        name: impl Into<String>,
        coordinates: impl Into<Coordinates>,
    ) -> LocationId {
        let name = name.into();
        let coordinates = coordinates.into();
        if let Some(&id) = self.name_to_id.get(&name) {
            self.locations[id].coordinates = coordinates;
            return id;
        }

        let id = self.locations.len();
        self.name_to_id.insert(name.clone(), id);
        self.locations.push(Location {
            id,
            name,
            coordinates,
        });
        self.adjacency.push(Vec::new());
        id
    }

    /// Connect `source` to `destination`, and back again unless `one_way`.
    ///
    /// Re-adding an existing connection overwrites its weight.
    pub fn add_connection(
        &mut self,
        source: &str,
        destination: &str,
        weight: f64,
        one_way: bool,
    ) -> Result<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidWeight {
                from: source.to_string(),
                to: destination.to_string(),
                weight,
            });
        }

        let from = self.resolve(source)?;
        let to = self.resolve(destination)?;

        self.insert_edge(from, to, weight);
        if !one_way {
            self.insert_edge(to, from, weight);
        }
        Ok(())
    }

    fn insert_edge(&mut self, from: LocationId, to: LocationId, weight: f64) {
        let locations = &self.locations;
        let edges = &mut self.adjacency[from];
        let target_name = locations[to].name.as_str();
        match edges.binary_search_by(|edge| locations[edge.target].name.as_str().cmp(target_name)) {
            Ok(position) => edges[position].weight = weight,
            Err(position) => edges.insert(position, Edge { target: to, weight }),
        }
    }

    /// Names of the outgoing-edge targets of `name`, in lexicographic order.
    ///
    /// Unknown names and locations without outgoing edges yield an empty list.
    pub fn neighbours(&self, name: &str) -> Vec<&str> {
        self.id_of(name)
            .map(|id| {
                self.edges(id)
                    .iter()
                    .map(|edge| self.locations[edge.target].name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Outgoing edges of a location identifier, sorted by target name.
    pub fn edges(&self, id: LocationId) -> &[Edge] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Weight of the directed edge `source -> destination`.
    pub fn edge_weight(&self, source: &str, destination: &str) -> Result<f64> {
        let missing = || Error::EdgeNotFound {
            from: source.to_string(),
            to: destination.to_string(),
        };
        let from = self.id_of(source).ok_or_else(missing)?;
        let to = self.id_of(destination).ok_or_else(missing)?;
        self.edge_weight_between(from, to)
    }

    /// Weight of the directed edge between two location identifiers.
    pub fn edge_weight_between(&self, from: LocationId, to: LocationId) -> Result<f64> {
        self.edges(from)
            .iter()
            .find(|edge| edge.target == to)
            .map(|edge| edge.weight)
            .ok_or_else(|| Error::EdgeNotFound {
                from: self.display_name(from).to_string(),
                to: self.display_name(to).to_string(),
            })
    }

    /// Lookup a location identifier by its case-sensitive name.
    pub fn id_of(&self, name: &str) -> Option<LocationId> {
        self.name_to_id.get(name).copied()
    }

    /// Lookup a location name by identifier.
    pub fn name(&self, id: LocationId) -> Option<&str> {
        self.locations.get(id).map(|location| location.name.as_str())
    }

    pub(crate) fn display_name(&self, id: LocationId) -> &str {
        self.name(id).unwrap_or("<unknown>")
    }

    pub fn location(&self, name: &str) -> Option<&Location> {
        self.id_of(name).map(|id| &self.locations[id])
    }

    pub fn location_by_id(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(id)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.name_to_id.contains_key(name)
    }

    /// All locations in insertion order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Location names sorted lexicographically.
    pub fn location_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.locations.iter().map(|l| l.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Number of locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Resolve a name to its identifier, suggesting close matches when unknown.
    pub fn resolve(&self, name: &str) -> Result<LocationId> {
        self.id_of(name).ok_or_else(|| Error::UnknownLocation {
            name: name.to_string(),
            suggestions: self.fuzzy_location_matches(name, 3),
        })
    }

    /// Up to `limit` location names similar to `name`, best match first.
    pub fn fuzzy_location_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .locations
            .iter()
            .map(|location| {
                let score = strsim::jaro_winkler(&needle, &location.name.to_lowercase());
                (score, location.name.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }
}
