//! sbt CLI - run and inspect behaviour trees.
//!
//! - `sbt run` - tick the demo guard tree and print it after every tick
//! - `sbt dump` - print the demo tree structure
//! - `sbt init` - write a default simulation config

mod config;
mod demo;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use sbt_tools::dump;

use crate::config::SimConfig;

#[derive(Parser)]
#[command(name = "sbt")]
#[command(about = "Reactive behaviour tree runner", version)]
struct Cli {
    /// Simulation config (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tick the demo tree
    Run {
        /// Number of ticks
        #[arg(long)]
        ticks: Option<u64>,

        /// Seconds per tick
        #[arg(long)]
        dt: Option<f64>,

        /// Seed for random selectors
        #[arg(long)]
        seed: Option<u64>,

        /// Highlight recently changed nodes
        #[arg(long)]
        rich_text: bool,
    },

    /// Print the demo tree without ticking it
    Dump,

    /// Write the default config
    Init {
        #[arg(default_value = "sbt.yaml")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    if cli.log_json {
        fmt().json().with_env_filter(filter).init();
    } else {
        fmt().with_env_filter(filter).with_target(false).init();
    }

    let mut config = SimConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            ticks,
            dt,
            seed,
            rich_text,
        } => {
            if let Some(ticks) = ticks {
                config.run.ticks = ticks;
            }
            if let Some(dt) = dt {
                config.run.dt = dt;
            }
            if seed.is_some() {
                config.tree.seed = seed;
            }
            config.dump.rich_text |= rich_text;
            run(&config)
        }
        Commands::Dump => {
            let tree = demo::guard_tree(config.tree.clone());
            print!("{}", dump(&tree, &config.dump));
            Ok(())
        }
        Commands::Init { path } => init(&path),
    }
}

fn run(config: &SimConfig) -> Result<()> {
    tracing::info!(
        ticks = config.run.ticks,
        dt = config.run.dt,
        seed = ?config.tree.seed,
        "Starting simulation"
    );

    let mut tree = demo::guard_tree(config.tree.clone());
    let dt = config.run.dt;
    for _ in 0..config.run.ticks {
        tree.context_mut().advance(dt);
        let status = tree.tick_root(dt, config.dump.root_index);

        let post = tree.context();
        println!(
            "tick {} [{:?}] t={:.2} pos={:.2}",
            tree.tick_count(),
            status,
            post.clock,
            post.position
        );
        print!("{}", dump(&tree, &config.dump));
        println!();

        if !status.is_running() {
            tracing::info!(?status, tick = tree.tick_count(), "Tree concluded");
            break;
        }
    }

    let post = tree.context();
    tracing::info!(
        alerts = post.alerts,
        glances = post.glances,
        position = post.position,
        "Simulation finished"
    );

    let errors = tree.build_errors();
    if !errors.is_empty() {
        bail!("{} malformed-tree report(s), first: {}", errors.len(), errors[0]);
    }
    Ok(())
}

fn init(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    let yaml = SimConfig::default().to_yaml()?;
    std::fs::write(path, format!("# sbt simulation config\n\n{yaml}"))?;

    println!("Wrote default config to {}", path.display());
    println!();
    println!("Next: sbt --config {} run", path.display());
    Ok(())
}
