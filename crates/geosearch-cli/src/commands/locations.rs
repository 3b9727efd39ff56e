//! Locations command handler.

use anyhow::{Context, Result};
use geosearch_lib::DatasetPaths;

use super::load_graph;
use crate::output::OutputFormat;

/// Print every location name in lexicographic order.
pub fn handle_locations_command(paths: &DatasetPaths, format: OutputFormat) -> Result<()> {
    let graph = load_graph(paths)?;
    format
        .render_locations(&graph.location_names())
        .context("failed to write location list")
}
