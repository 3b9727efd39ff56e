//! Route command handler for a single search between two locations.

use anyhow::{Context, Result};
use geosearch_lib::{
    DatasetPaths, GreatCircle, HeuristicTable, RunReport, SearchAlgorithm, SearchEngine,
};
use tracing::debug;

use super::{friendly_error, load_graph};
use crate::output::OutputFormat;

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting location name.
    pub from: String,
    /// Destination location name.
    pub to: String,
    pub algorithm: SearchAlgorithm,
}

/// Handle the route subcommand.
///
/// "No route" is printed as a normal result; only unknown names, dataset
/// problems, and exceeded limits fail the command.
pub fn handle_route_command(
    paths: &DatasetPaths,
    engine: &SearchEngine,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let graph = load_graph(paths)?;
    let heuristics = args
        .algorithm
        .is_informed()
        .then(|| HeuristicTable::from_graph(&graph, &GreatCircle));
    debug!(algorithm = %args.algorithm, informed = heuristics.is_some(), "running route search");

    let result = engine
        .search(&graph, heuristics.as_ref(), args.algorithm, &args.from, &args.to)
        .map_err(friendly_error)?;
    let report = RunReport::from_result(&graph, &GreatCircle, &result)
        .context("failed to summarise the route")?;

    format
        .render_report(&report)
        .context("failed to write route output")
}
