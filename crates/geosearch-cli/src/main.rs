use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use geosearch_cli::commands::compare::handle_compare_command;
use geosearch_cli::commands::locations::handle_locations_command;
use geosearch_cli::commands::route::{handle_route_command, RouteCommandArgs};
use geosearch_cli::output::OutputFormat;
use geosearch_lib::{
    AStarMode, DatasetPaths, SearchAlgorithm, SearchEngine, SearchOptions, DEFAULT_MAX_DEPTH,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Run and compare route searches over a location graph")]
struct Cli {
    /// Location table: headerless CSV of name, latitude, longitude.
    #[arg(
        long,
        global = true,
        env = "GEOSEARCH_COORDINATES",
        default_value = "data/coordinates.csv"
    )]
    coordinates: PathBuf,

    /// Adjacency list: consecutive names on a line are connected.
    #[arg(
        long,
        global = true,
        env = "GEOSEARCH_ADJACENCY",
        default_value = "data/adjacencies.txt"
    )]
    adjacency: PathBuf,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Deepest limit tried by iterative deepening.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Fail searches that take longer than this many milliseconds.
    #[arg(long, global = true)]
    time_budget_ms: Option<u64>,

    /// Use textbook A* (goal tested on pop, expanded locations re-opened).
    #[arg(long, global = true)]
    strict_a_star: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find a route between two locations with one algorithm.
    Route {
        /// Starting location name.
        #[arg(long = "from")]
        from: String,
        /// Destination location name.
        #[arg(long = "to")]
        to: String,
        /// Search algorithm.
        #[arg(long, value_enum, default_value_t = AlgorithmArg::AStar)]
        algorithm: AlgorithmArg,
    },
    /// Run every algorithm between two locations and compare the results.
    Compare {
        #[arg(long = "from")]
        from: String,
        #[arg(long = "to")]
        to: String,
    },
    /// List every known location name.
    Locations,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AlgorithmArg {
    Bfs,
    Dfs,
    Iddfs,
    Greedy,
    AStar,
}

impl From<AlgorithmArg> for SearchAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Bfs => SearchAlgorithm::Bfs,
            AlgorithmArg::Dfs => SearchAlgorithm::Dfs,
            AlgorithmArg::Iddfs => SearchAlgorithm::Iddfs,
            AlgorithmArg::Greedy => SearchAlgorithm::Greedy,
            AlgorithmArg::AStar => SearchAlgorithm::AStar,
        }
    }
}

impl Cli {
    fn dataset_paths(&self) -> DatasetPaths {
        DatasetPaths::new(&self.coordinates, &self.adjacency)
    }

    fn search_options(&self) -> SearchOptions {
        SearchOptions {
            max_depth: self.max_depth,
            time_budget: self.time_budget_ms.map(Duration::from_millis),
            a_star_mode: if self.strict_a_star {
                AStarMode::Strict
            } else {
                AStarMode::Observed
            },
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let paths = cli.dataset_paths();
    let engine = SearchEngine::new(cli.search_options());

    match cli.command {
        Command::Route {
            from,
            to,
            algorithm,
        } => {
            let args = RouteCommandArgs {
                from,
                to,
                algorithm: algorithm.into(),
            };
            handle_route_command(&paths, &engine, cli.format, &args)
        }
        Command::Compare { from, to } => {
            handle_compare_command(&paths, &engine, cli.format, &from, &to)
        }
        Command::Locations => handle_locations_command(&paths, cli.format),
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
