//! Regvar CLI - regulatory quantile conversion and historical FX VaR
//!
//! # Commands
//!
//! - `regvar convert --n <N> --quantile <Q>` - Convert a regulatory quantile
//! - `regvar var --input <CSV> --positions <A,B,...>` - VaR of an FX history
//! - `regvar simulate --output <CSV>` - Write a simulated FX history
//! - `regvar validate` - Check that both VaR routes agree on simulated markets
//! - `regvar price ...` - Price a European option

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use regvar_cli::commands::{self, var::MethodSelection, OutputFormat};
use regvar_cli::config::{build_config, CliArgs, LogLevel};
use regvar_cli::Result;
use regvar_core::types::Date;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Regulatory quantile conversion and historical FX VaR
#[derive(Parser)]
#[command(name = "regvar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML format); regvar.toml is used if present
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a regulatory quantile to a linear-interpolation quantile
    Convert {
        /// Sample length
        #[arg(short, long)]
        n: usize,

        /// Regulatory quantile
        #[arg(short, long)]
        quantile: f64,

        /// Shortest accepted sample
        #[arg(long)]
        min_sample_size: Option<usize>,
    },

    /// Compute VaR of an FX rate history
    Var {
        /// CSV file with header date,<CCY1>,<CCY2>,... and rows newest first
        #[arg(short, long)]
        input: PathBuf,

        /// Domestic-currency positions, one per currency column
        #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true, required = true)]
        positions: Vec<f64>,

        /// Regulatory quantile
        #[arg(short, long)]
        quantile: Option<f64>,

        /// Holding period in days
        #[arg(long)]
        horizon: Option<u32>,

        /// VaR route
        #[arg(short, long, value_enum, default_value_t = MethodSelection::Converted)]
        method: MethodSelection,

        /// Nominal sample length for the conversion
        #[arg(long)]
        conversion_length: Option<usize>,

        /// Shortest accepted sample
        #[arg(long)]
        min_sample_size: Option<usize>,
    },

    /// Write a simulated FX rate history
    Simulate {
        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,

        /// Number of daily returns (rows minus one)
        #[arg(short, long, default_value = "259")]
        days: usize,

        /// Random seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Most recent date (YYYY-MM-DD), today if omitted
        #[arg(long)]
        end_date: Option<String>,
    },

    /// Check that both VaR routes agree on simulated markets
    Validate {
        /// Number of trials
        #[arg(short, long)]
        trials: Option<usize>,

        /// Seed of the first trial
        #[arg(short, long)]
        seed: Option<u64>,

        /// Largest accepted absolute difference
        #[arg(long)]
        tolerance: Option<f64>,

        /// Regulatory quantile
        #[arg(short, long)]
        quantile: Option<f64>,

        /// Nominal sample length for the conversion
        #[arg(long)]
        conversion_length: Option<usize>,
    },

    /// Price a European option
    Price {
        /// Spot price
        #[arg(long)]
        spot: f64,

        /// Strike price
        #[arg(long)]
        strike: f64,

        /// Nominal annual rate
        #[arg(long, allow_negative_numbers = true)]
        rate: f64,

        /// Trade date (YYYY-MM-DD)
        #[arg(long)]
        trade_date: String,

        /// Expiry date (YYYY-MM-DD)
        #[arg(long)]
        expiry_date: String,

        /// Volatility
        #[arg(long, allow_negative_numbers = true)]
        volatility: f64,

        /// Call or Put (case sensitive)
        #[arg(long)]
        option_type: String,

        /// Day count convention
        #[arg(long, default_value = "ACT/365")]
        day_count: String,
    },
}

impl Cli {
    /// Collects configuration overrides from global and subcommand flags.
    fn config_args(&self) -> CliArgs {
        let mut args = CliArgs {
            config_file: self.config.clone(),
            verbose: self.verbose,
            log_level: self.log_level.clone(),
            ..CliArgs::default()
        };
        match &self.command {
            Commands::Convert {
                min_sample_size, ..
            } => {
                args.min_sample_size = *min_sample_size;
            }
            Commands::Var {
                quantile,
                horizon,
                conversion_length,
                min_sample_size,
                ..
            } => {
                args.quantile = *quantile;
                args.horizon_days = *horizon;
                args.conversion_length = *conversion_length;
                args.min_sample_size = *min_sample_size;
            }
            Commands::Simulate { seed, .. } => {
                args.seed = *seed;
            }
            Commands::Validate {
                trials,
                seed,
                tolerance,
                quantile,
                conversion_length,
            } => {
                args.trials = *trials;
                args.seed = *seed;
                args.tolerance = *tolerance;
                args.quantile = *quantile;
                args.conversion_length = *conversion_length;
            }
            Commands::Price { .. } => {}
        }
        args
    }
}

fn init_tracing(log_level: LogLevel) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level.as_filter_str())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn today() -> Date {
    Date::from(chrono::Local::now().date_naive())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = build_config(&cli.config_args())?;
    init_tracing(config.log_level);
    debug!(?config, "configuration loaded");
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let format = cli.format;
    let result = match cli.command {
        Commands::Convert { n, quantile, .. } => {
            commands::convert::run(n, quantile, &config, format)
        }
        Commands::Var {
            input,
            positions,
            method,
            ..
        } => commands::var::run(&input, &positions, method, &config, format),
        Commands::Simulate {
            output,
            days,
            end_date,
            ..
        } => {
            let end_date = match end_date {
                Some(s) => Date::parse(&s)?,
                None => today(),
            };
            commands::simulate::run(&output, days, end_date, &config, format)
        }
        Commands::Validate { .. } => commands::validate::run(&config, format),
        Commands::Price {
            spot,
            strike,
            rate,
            trade_date,
            expiry_date,
            volatility,
            option_type,
            day_count,
        } => {
            let args = commands::price::PriceArgs {
                spot,
                strike,
                rate,
                trade_date,
                expiry_date,
                volatility,
                option_type,
                day_count,
            };
            commands::price::run(&args, format)
        }
    };

    if let Err(err) = &result {
        error!("{}", err);
    }
    result
}
