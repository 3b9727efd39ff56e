use thiserror::Error;

use crate::routing::{SearchAlgorithm, SearchLimit};

/// Convenient result alias for the geosearch library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a location name could not be found in the graph.
    #[error("unknown location: {name}{}", format_suggestions(.suggestions))]
    UnknownLocation {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a weight is requested for a directed edge that does not exist.
    #[error("no edge from {from} to {to}")]
    EdgeNotFound { from: String, to: String },

    /// Raised when an informed search needs an estimate that was never computed.
    #[error("heuristic estimate missing for {from} -> {to}; compute the heuristic table first")]
    HeuristicMissing { from: String, to: String },

    /// Raised when a connection is added with a negative or non-finite weight.
    #[error("invalid weight {weight} for connection {from} -> {to}")]
    InvalidWeight { from: String, to: String, weight: f64 },

    /// Raised when the distance oracle cannot produce a value.
    #[error("distance oracle failure: {message}")]
    DistanceOracle { message: String },

    /// Raised when a search exceeds a depth cap or wall-clock budget.
    #[error("{algorithm} search exceeded its {limit}")]
    SearchTimedOut {
        algorithm: SearchAlgorithm,
        limit: SearchLimit,
    },

    /// Raised when a row of the location table cannot be interpreted.
    #[error("invalid location record on line {line}: {message}")]
    InvalidLocationRecord { line: u64, message: String },

    /// Wrapper for CSV reader errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` when the error reflects caller misuse that can be
    /// corrected by re-prompting (an unknown start or goal name).
    pub fn is_unknown_location(&self) -> bool {
        matches!(self, Error::UnknownLocation { .. })
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
