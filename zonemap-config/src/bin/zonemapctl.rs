use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zonemap_config::{ConfigLoader, ConfigLoaderOptions};
use zonemap_core::{
    graph::ZoneGraph,
    navigation::Location,
    query::{
        QueryDefaults, QueryState, build_navigation_query,
        parse_navigation_query_with,
    },
    ranking::rank_zones,
    selection::{build_selection_query, reconcile_targets},
    sorting::{from_column_key, to_sort_descriptor},
};
use zonemap_model::{
    ColumnKey, Direction, PeriodHours, PeriodParam, SortDescriptor, SortOrder,
    ZoneId,
};

#[derive(Parser)]
#[command(
    name = "zonemapctl",
    about = "Inspect zone details URL state and leaderboard sorting"
)]
struct Cli {
    /// Configuration file (defaults to zonemap.toml or ZONEMAP_CONFIG_PATH)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Env file loaded before reading ZONEMAP_* variables
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the table sort descriptor for a period and direction
    SortKey {
        #[arg(long)]
        period: u32,
        #[arg(long, value_enum)]
        order_by: Option<OrderByArg>,
        #[arg(long, value_enum)]
        sort_order: Option<SortOrderArg>,
    },
    /// Decode a leaderboard column id into period and direction
    Column { key: String },
    /// Build the navigation query pushed after a sort change
    Build {
        #[arg(long)]
        period: u32,
        #[arg(long)]
        source: Option<String>,
        #[arg(long, value_enum)]
        order_by: Option<OrderByArg>,
        #[arg(long, value_enum)]
        sort_order: Option<SortOrderArg>,
    },
    /// Parse a query string or href into navigation state
    Parse { query: String },
    /// Resolve a counterparty selection into the next zone details href
    Select {
        /// Zone statistics graph as JSON
        #[arg(long)]
        graph: PathBuf,
        #[arg(long)]
        source: String,
        #[arg(long)]
        period: Option<u32>,
        /// Comma-separated zone ids
        #[arg(long, value_delimiter = ',')]
        targets: Vec<String>,
    },
    /// Rank the counterparties of a graph by a column
    Rank {
        #[arg(long)]
        graph: PathBuf,
        #[arg(long)]
        key: String,
        #[arg(long)]
        asc: bool,
    },
    /// Show the effective configuration and its warnings
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderByArg {
    Success,
    Failed,
}

impl From<OrderByArg> for Direction {
    fn from(arg: OrderByArg) -> Self {
        match arg {
            OrderByArg::Success => Direction::Success,
            OrderByArg::Failed => Direction::Failed,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SortOrderArg {
    Asc,
    Desc,
}

impl From<SortOrderArg> for SortOrder {
    fn from(arg: SortOrderArg) -> Self {
        match arg {
            SortOrderArg::Asc => SortOrder::Ascending,
            SortOrderArg::Desc => SortOrder::Descending,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let loader = ConfigLoader::with_options(ConfigLoaderOptions {
        config_path: cli.config,
        env_file: cli.env_file,
    });

    match cli.command {
        Command::SortKey {
            period,
            order_by,
            sort_order,
        } => {
            let defaults = load_defaults(&loader)?;
            let descriptor = to_sort_descriptor(
                PeriodHours(period),
                order_by.map(Into::into).unwrap_or(defaults.order_by),
                sort_order.map(Into::into).unwrap_or(defaults.sort_order),
            )?;
            print_json(&descriptor)?;
        }
        Command::Column { key } => {
            let (period, order_by) =
                from_column_key(&ColumnKey::from_raw(key))?;
            print_json(&json!({
                "period": period.hours(),
                "label": period.label(),
                "orderBy": order_by,
            }))?;
        }
        Command::Build {
            period,
            source,
            order_by,
            sort_order,
        } => {
            let defaults = load_defaults(&loader)?;
            let period = PeriodHours(period).resolve()?;
            let source = source.map(ZoneId::new).transpose()?;
            let query = build_navigation_query(
                period,
                source.as_ref(),
                order_by.map(Into::into).unwrap_or(defaults.order_by),
                sort_order.map(Into::into).unwrap_or(defaults.sort_order),
            );
            println!("{query}");
        }
        Command::Parse { query } => {
            let defaults = load_defaults(&loader)?;
            let state = if query.starts_with('/') || query.contains("://") {
                QueryState::from_href(&query, &defaults)?
            } else {
                parse_navigation_query_with(&query, &defaults)?
            };
            print_json(&state)?;
        }
        Command::Select {
            graph,
            source,
            period,
            targets,
        } => {
            let load = loader.load().context("failed to load configuration")?;
            let graph = read_graph(&graph)?;
            let source = ZoneId::new(source)?;
            let targets = targets
                .into_iter()
                .filter(|target| !target.trim().is_empty())
                .map(ZoneId::new)
                .collect::<Result<Vec<_>, _>>()?;
            let period: PeriodParam = period
                .map(|hours| PeriodHours(hours).into())
                .unwrap_or_else(|| load.config.defaults.period.into());

            let selection = reconcile_targets(&targets, &graph.nodes);
            let location = Location::new(
                load.config.routes.zone,
                build_selection_query(&period, &source, &selection),
            );
            println!("{location}");
        }
        Command::Rank { graph, key, asc } => {
            let graph = read_graph(&graph)?;
            let nodes: Vec<_> =
                graph.distinct_counterparties().into_iter().cloned().collect();
            let descriptor =
                SortDescriptor::new(ColumnKey::from_raw(key), !asc);
            let ranked = rank_zones(&nodes, &descriptor)?;
            print_json(&ranked)?;
        }
        Command::Config => {
            let load = loader.load().context("failed to load configuration")?;
            print_json(&json!({
                "config": load.config,
                "warnings": load.warnings.items,
            }))?;
        }
    }

    Ok(())
}

fn load_defaults(loader: &ConfigLoader) -> Result<QueryDefaults> {
    let load = loader.load().context("failed to load configuration")?;
    Ok(load.config.query_defaults())
}

fn read_graph(path: &Path) -> Result<ZoneGraph> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read graph {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse graph {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
