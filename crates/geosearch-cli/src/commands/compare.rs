//! Compare command handler: every algorithm between the same two locations.

use anyhow::{Context, Result};
use geosearch_lib::{
    compare_algorithms, DatasetPaths, GreatCircle, HeuristicTable, SearchAlgorithm, SearchEngine,
};

use super::{friendly_error, load_graph};
use crate::output::OutputFormat;

pub fn handle_compare_command(
    paths: &DatasetPaths,
    engine: &SearchEngine,
    format: OutputFormat,
    from: &str,
    to: &str,
) -> Result<()> {
    let graph = load_graph(paths)?;
    let heuristics = HeuristicTable::from_graph(&graph, &GreatCircle);

    let reports = compare_algorithms(
        engine,
        &graph,
        Some(&heuristics),
        &SearchAlgorithm::ALL,
        from,
        to,
        &GreatCircle,
    )
    .map_err(friendly_error)?;

    format
        .render_comparison(&reports)
        .context("failed to write comparison output")
}
