use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use titanic_nn::data::load_titanic_csv;
use titanic_nn::{accuracy, normalize, predict, train_loop, Dataset, Topology, TrainConfig};

#[derive(Parser, Debug)]
#[command(name = "titanic-nn")]
#[command(version, about = "Trains a deep ReLU classifier on the Titanic passenger list")]
struct Args {
    /// Passenger CSV to train on.
    #[arg(long)]
    data: PathBuf,

    /// JSON training config; command-line flags override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of full-batch epochs.
    #[arg(long)]
    epochs: Option<usize>,

    /// Gradient-descent step size.
    #[arg(long)]
    learning_rate: Option<f64>,

    /// Seed for parameter initialization.
    #[arg(long)]
    seed: Option<u64>,

    /// Log the cost every this many epochs (0 logs only the last).
    #[arg(long)]
    report_every: Option<usize>,

    /// Comma-separated layer widths N0..NL, e.g. 6,5,4,3,2,1.
    #[arg(long, value_delimiter = ',')]
    layers: Option<Vec<usize>>,

    /// Write the effective config to this JSON file before training.
    #[arg(long)]
    save_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = build_config(&args)?;
    if let Some(path) = &args.save_config {
        config.save_json(&path.to_string_lossy())
            .with_context(|| format!("failed to write config to {}", path.display()))?;
    }

    let raw = load_titanic_csv(&args.data)
        .with_context(|| format!("failed to load {}", args.data.display()))?;
    info!("X.shape {:?}, Y.shape {:?}", raw.features.shape(), raw.labels.shape());

    let dataset = Dataset::new(normalize(&raw.features), raw.labels)?;
    let outcome = train_loop(&dataset, &config)?;
    info!("final cost after {} epochs: {}", outcome.epochs_run, outcome.final_cost);

    let predictions = predict(&dataset.features, &outcome.parameters)?;
    let acc = accuracy(&predictions, &dataset.labels)?;
    println!("Acc: {}", acc);

    Ok(())
}

fn build_config(args: &Args) -> Result<TrainConfig> {
    let mut config = match &args.config {
        Some(path) => TrainConfig::load_json(&path.to_string_lossy())
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => TrainConfig::titanic(),
    };

    if let Some(epochs) = args.epochs {
        config.epochs = epochs;
    }
    if let Some(lr) = args.learning_rate {
        config.learning_rate = lr;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(every) = args.report_every {
        config.report_every = every;
    }
    if let Some(widths) = &args.layers {
        config.topology = Topology::new(widths.clone())?;
    }

    config.validate()?;
    Ok(config)
}
