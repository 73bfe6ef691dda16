//! CLI binary for depscope: rank packages by direct dependency counts.

use anyhow::{Context, Result};
use clap::Parser;
use depscope_core::config::DepscopeConfig;
use depscope_core::graph::{self, DepGraph};
use depscope_core::{loader, report};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "depscope",
    about = "Rank packages by distinct incoming and raw outgoing direct dependency counts"
)]
struct Cli {
    /// Package metadata stream, e.g. the output of `go list -json -e all`
    input: PathBuf,

    /// Aggregate counts per module instead of per package
    #[arg(long)]
    modules: bool,

    /// Persist the delimited report for diffing across runs
    #[arg(long)]
    save: bool,

    /// Report file path (overrides config and DEPSCOPE_REPORT_PATH)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (defaults to ./.depscope.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = DepscopeConfig::load(cli.config.as_deref())?;
    let rules = config.ignore_rules();

    let file = File::open(&cli.input)
        .with_context(|| format!("failed to open {}", cli.input.display()))?;
    let mut packages = loader::load_packages(BufReader::new(file), &rules)
        .with_context(|| format!("failed to load records from {}", cli.input.display()))?;

    let dep_graph = DepGraph::build(&mut packages);
    tracing::debug!(
        packages = packages.len(),
        ignored = dep_graph.ignored_count(),
        targets = dep_graph.tracked_targets(),
        "dependency graph built"
    );

    let report_path = cli.output.unwrap_or_else(|| config.report.path.clone());

    if cli.modules {
        let mut rows = graph::module_rollup(&packages, &dep_graph);
        report::sort_rows(&mut rows);
        report::print_report(&rows);
        if cli.save {
            report::save_report(&rows, &report_path)
                .with_context(|| format!("failed to save report to {}", report_path.display()))?;
        }
    } else {
        report::sort_rows(&mut packages);
        report::print_report(&packages);
        if cli.save {
            report::save_report(&packages, &report_path)
                .with_context(|| format!("failed to save report to {}", report_path.display()))?;
        }
    }

    Ok(())
}
