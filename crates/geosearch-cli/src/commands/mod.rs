//! Subcommand handlers.
//!
//! Each module handles one CLI subcommand; `main.rs` parses arguments and
//! dispatches here.

pub mod compare;
pub mod locations;
pub mod route;

use anyhow::{Context, Result};
use geosearch_lib::{load_dataset, DatasetPaths, GreatCircle, LocationGraph};

/// Load the dataset named by the global `--coordinates` and `--adjacency` flags.
pub fn load_graph(paths: &DatasetPaths) -> Result<LocationGraph> {
    let (graph, _summary) = load_dataset(paths, &GreatCircle).with_context(|| {
        format!(
            "failed to load dataset from {} and {}",
            paths.coordinates.display(),
            paths.adjacency.display()
        )
    })?;
    Ok(graph)
}

/// Turn an unknown location into a message suitable for the terminal.
pub(crate) fn friendly_error(err: geosearch_lib::Error) -> anyhow::Error {
    match err {
        geosearch_lib::Error::UnknownLocation { name, suggestions } => {
            anyhow::anyhow!(format_unknown_location_message(&name, &suggestions))
        }
        other => anyhow::Error::new(other),
    }
}

fn format_unknown_location_message(name: &str, suggestions: &[String]) -> String {
    let mut message = format!("Unknown location '{}'.", name);
    match suggestions {
        [] => {}
        [only] => message.push_str(&format!(" Did you mean '{only}'?")),
        many => {
            let joined = many
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ");
            message.push_str(&format!(" Did you mean one of: {}?", joined));
        }
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_location_message_lists_suggestions() {
        assert_eq!(
            format_unknown_location_message("Wichta", &["Wichita".to_string()]),
            "Unknown location 'Wichta'. Did you mean 'Wichita'?"
        );
        assert_eq!(
            format_unknown_location_message("Nowhere", &[]),
            "Unknown location 'Nowhere'."
        );
        assert_eq!(
            format_unknown_location_message(
                "Newt",
                &["Newton".to_string(), "Newt".to_string()]
            ),
            "Unknown location 'Newt'. Did you mean one of: 'Newton', 'Newt'?"
        );
    }
}
