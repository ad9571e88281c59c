//! File Router inspection CLI
//!
//! Prints the route table a set of options would mount, without loading any
//! route module.
//!
//! # Architecture Overview
//!
//! ```text
//!     routes dir            ┌──────────────────────────────────────────────────┐
//!     ──────────────────────┼─▶ discovery ──▶ routing::plan ──▶ RouteTable ────┼──▶ stdout
//!     (glob + walk)         │   glob/walk      url path, level      text/json  │
//!                           │                                                  │
//!                           │   --watch: notify ──▶ re-plan ──▶ print again    │
//!                           └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use file_router::config::{load_options, FileRouterOptions};
use file_router::observability::logging;
use file_router::routing::{plan_routes, RouteTable, RouteTableWatcher};

#[derive(Parser)]
#[command(name = "file-router")]
#[command(about = "Inspect filesystem-driven route tables", long_about = None)]
struct Cli {
    /// Log level when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the planned route table (never loads route modules)
    Routes(RoutesArgs),
}

#[derive(Args)]
struct RoutesArgs {
    /// TOML options file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base directory holding the route files
    #[arg(long)]
    cwd: Option<PathBuf>,

    /// Glob pattern selecting route files (repeatable)
    #[arg(short, long = "pattern")]
    patterns: Vec<String>,

    /// Recognised source extension without the dot (repeatable)
    #[arg(short, long = "ext")]
    extensions: Vec<String>,

    /// Glob pattern to exclude (repeatable)
    #[arg(long = "ignore")]
    ignore: Vec<String>,

    /// Let wildcards match dot files
    #[arg(long)]
    dot: bool,

    /// Print the table as JSON
    #[arg(long)]
    json: bool,

    /// Keep running and print the table whenever route files change
    #[arg(long)]
    watch: bool,
}

impl RoutesArgs {
    fn options(&self) -> Result<FileRouterOptions, Box<dyn std::error::Error>> {
        let mut options = match &self.config {
            Some(path) => load_options(path)?,
            None => FileRouterOptions::new(["**/*.rs"]),
        };

        if let Some(cwd) = &self.cwd {
            options.cwd = Some(cwd.clone());
        }
        if !self.patterns.is_empty() {
            options.pattern = self.patterns.clone();
        }
        if !self.extensions.is_empty() {
            options.extensions = self.extensions.clone();
        }
        if !self.ignore.is_empty() {
            options.ignore = self.ignore.clone();
        }
        if self.dot {
            options.dot = true;
        }
        options.dry_run = true;

        Ok(options)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    match cli.command {
        Commands::Routes(args) => routes(args).await,
    }
}

async fn routes(args: RoutesArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = args.options()?;
    tracing::info!(
        base = %options.base_dir().display(),
        patterns = ?options.pattern,
        "Planning routes"
    );

    let table = plan_routes(&options)?;
    print_table(&table, args.json)?;

    if args.watch {
        let (watcher, mut updates) = RouteTableWatcher::new(options);
        let _watcher = watcher.run()?;

        loop {
            tokio::select! {
                update = updates.recv() => match update {
                    Some(table) => print_table(&table, args.json)?,
                    None => break,
                },
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutdown signal received");
                    break;
                }
            }
        }
    }

    Ok(())
}

fn print_table(table: &RouteTable, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(table)?);
    } else {
        print!("{}", table.render());
    }
    Ok(())
}
