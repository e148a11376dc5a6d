//! Airfare Predictor Command Line Interface
//!
//! Loads a trained model bundle and answers fare queries, either one-shot
//! or through an interactive prompt.

mod display;
mod session;

use airfare_core::FarePredictor;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::display::{carrier_display, quarter_label};
use crate::session::{build_query, format_fare, run_session};

#[derive(Parser)]
#[command(name = "fare-cli")]
#[command(about = "Airfare Predictor Command Line Interface", long_about = None)]
#[command(version)]
struct Cli {
    /// Model bundle written by fare-train
    #[arg(long, default_value = "models/fare_bundle.json")]
    bundle: PathBuf,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the cities, quarters and carriers the model knows
    Options,
    /// Predict a single fare
    Predict {
        /// Origin city, exactly as listed by `options`
        #[arg(long)]
        origin: String,
        /// Destination city, exactly as listed by `options`
        #[arg(long)]
        destination: String,
        /// Quarter as 1-4 or a range such as "April - June"
        #[arg(long)]
        quarter: String,
        /// Carrier code or airline name
        #[arg(long)]
        carrier: String,
    },
    /// Prompt for routes until end of input
    Interactive,
    /// Show bundle metadata and fitted parameters
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let predictor = FarePredictor::load(&cli.bundle)
        .with_context(|| format!("Failed to load model bundle {}", cli.bundle.display()))?;

    match cli.command {
        Commands::Options => print_options(&predictor),
        Commands::Predict {
            origin,
            destination,
            quarter,
            carrier,
        } => {
            let query = build_query(&predictor, &origin, &destination, &quarter, &carrier)?;
            let fare = predictor.predict(&query).context("Prediction failed")?;
            println!("Estimated Fare: {}", format_fare(fare));
        }
        Commands::Interactive => {
            let stdin = io::stdin();
            run_session(&predictor, stdin.lock(), io::stdout())?;
        }
        Commands::Info => print_info(&predictor)?,
    }

    Ok(())
}

fn print_options(predictor: &FarePredictor) {
    let options = predictor.options();

    println!("Origin cities ({}):", options.origins.len());
    for city in options.origins {
        println!("  {city}");
    }
    println!("Destination cities ({}):", options.destinations.len());
    for city in options.destinations {
        println!("  {city}");
    }
    println!("Quarters:");
    for quarter in options.quarters {
        println!("  {quarter}  {}", quarter_label(*quarter).unwrap_or("-"));
    }
    println!("Carriers:");
    for carrier in options.carriers {
        println!("  {carrier:<3} {}", carrier_display(carrier));
    }
}

fn print_info(predictor: &FarePredictor) -> Result<()> {
    let model = predictor.model();
    let info = json!({
        "metadata": predictor.metadata(),
        "intercept": model.intercept(),
        "weights": airfare_core::FEATURE_NAMES
            .iter()
            .zip(model.weights())
            .map(|(name, weight)| json!({ "feature": name, "weight": weight }))
            .collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}
