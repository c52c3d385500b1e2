//! Wagerbook CLI - Bonus-wagering wallet tooling
//!
//! # Usage
//!
//! ```bash
//! # Guided walkthrough over a seeded player wallet
//! wagerbook demo
//!
//! # Seeded random play with a conservation check
//! wagerbook simulate --rounds 1000 --seed 42 --max-bet 250
//!
//! # List campaigns and grant one into a fresh wallet
//! wagerbook campaigns --grant EVT002
//!
//! # Real-time play with the expiry sweeper running
//! WAGERBOOK__SWEEPER__INTERVAL_MS=250 wagerbook live --seconds 20
//! ```

use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use wagerbook_types::Amount;

mod commands;
mod config;
mod display;

use commands::{campaigns, demo, live, simulate};
use config::{LoggingConfig, WagerbookConfig};

/// Wagerbook - multi-source wallet with bonus wagering
#[derive(Parser)]
#[command(name = "wagerbook")]
#[command(author, version)]
#[command(about = "Bonus-wagering wallet ledger: FIFO bets, proportional settlement, expiry", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (TOML, JSON, or YAML)
    #[arg(short, long, global = true, env = "WAGERBOOK_CONFIG")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log format (json, pretty)
    #[arg(long, global = true)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk through bets, settlement, wagering and expiry on a seeded wallet
    Demo,

    /// Play seeded random rounds and verify conservation of funds
    Simulate {
        /// Number of rounds to play
        #[arg(short, long, default_value = "500")]
        rounds: u32,

        /// RNG seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Largest single stake
        #[arg(long, default_value = "500")]
        max_bet: Amount,
    },

    /// List bonus campaigns
    Campaigns {
        /// Grant this campaign (e.g. EVT001) into a fresh wallet
        #[arg(long)]
        grant: Option<String>,
    },

    /// Play in real time with the background expiry sweeper
    Live {
        /// Session length
        #[arg(long, default_value = "15")]
        seconds: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = WagerbookConfig::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    config.validate()?;
    init_logging(&config.logging)?;

    print_banner();

    match cli.command {
        Commands::Demo => demo::run(&config)?,
        Commands::Simulate {
            rounds,
            seed,
            max_bet,
        } => simulate::run(&config, rounds, seed, max_bet)?,
        Commands::Campaigns { grant } => campaigns::run(&config, grant)?,
        Commands::Live { seconds } => live::run(&config, seconds).await?,
    }

    Ok(())
}

/// Initialize logging; output goes to stderr so it never interleaves with reports
fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            subscriber
                .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
                .try_init()?;
        }
        _ => {
            subscriber
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .try_init()?;
        }
    }

    Ok(())
}

fn print_banner() {
    println!();
    println!("{}", "╔══════════════════════════════════════════════════════╗".bright_cyan());
    println!(
        "{}{}{}",
        "║  ".bright_cyan(),
        "Wagerbook".bright_white().bold(),
        " - bonus-wagering wallet ledger               ║".bright_cyan()
    );
    println!("{}", "╚══════════════════════════════════════════════════════╝".bright_cyan());
    println!();
}
