use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use gesture_recognition::dataset::Dataset;
use gesture_recognition::{run_training, GestureRecognizer, TrainConfig};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "gesture", version, about = "Train and run hand-gesture classifiers")]
struct Cli {
    /// Log verbosity.
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    log_level: LogLevel,

    /// Emit logs as JSON through `tracing`.
    #[cfg(feature = "tracing")]
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Train a classifier on a dataset CSV.
    Train {
        /// JSON training config. Other flags override its fields.
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        dataset: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        labels: Option<String>,
        #[arg(long)]
        report: Option<String>,
        #[arg(long)]
        epochs: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Classify one feature vector.
    Predict {
        #[arg(long)]
        model: PathBuf,
        #[arg(long)]
        labels: PathBuf,
        /// Comma-separated feature values in training order.
        #[arg(long)]
        features: String,
        /// Print the full recognition as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Summarize a dataset CSV.
    Inspect {
        #[arg(long)]
        dataset: PathBuf,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logs(&cli)?;

    match cli.command {
        Command::Train {
            config,
            dataset,
            model,
            labels,
            report,
            epochs,
            seed,
        } => {
            let mut cfg = match config {
                Some(path) => TrainConfig::load_json(path)?,
                None => TrainConfig::new(
                    dataset.clone().ok_or("--dataset is required without --config")?,
                    model.clone().ok_or("--model is required without --config")?,
                    labels.clone().ok_or("--labels is required without --config")?,
                ),
            };
            if let Some(v) = dataset {
                cfg.dataset_path = v;
            }
            if let Some(v) = model {
                cfg.model_path = v;
            }
            if let Some(v) = labels {
                cfg.labels_path = v;
            }
            if let Some(v) = report {
                cfg.report_path = Some(v);
            }
            if let Some(v) = epochs {
                cfg.train.epochs = v;
            }
            if let Some(v) = seed {
                cfg.train.seed = v;
                cfg.split.seed = v;
            }

            let report = run_training(&cfg)?;
            println!(
                "trained on {} samples, tested on {}",
                report.train_samples, report.test_samples
            );
            println!("test loss {:.4}", report.test.loss);
            print!("{}", report.metrics.to_table(&report.classes));
        }
        Command::Predict {
            model,
            labels,
            features,
            json,
        } => {
            let features = parse_features(&features)?;
            let recognizer = GestureRecognizer::load(model, labels)?;
            let rec = recognizer.recognize(&features)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rec)?);
            } else {
                println!("{}\t{:.4}", rec.label, rec.confidence);
            }
        }
        Command::Inspect { dataset, json } => {
            let ds = Dataset::load(&dataset)?;
            let summary = ds.summary();
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "{}: {} samples, {:?} layout",
                    dataset.display(),
                    summary.total,
                    ds.layout()
                );
                for (label, count) in &summary.counts {
                    println!("{label}\t{count}");
                }
            }
        }
    }
    Ok(())
}

#[cfg(feature = "tracing")]
fn init_logs(cli: &Cli) -> Result<(), Box<dyn Error>> {
    if cli.log_json {
        gesture_recognition::init_tracing_logging(cli.log_level.into(), true)?;
    } else {
        gesture_recognition::init_logging(cli.log_level.into())?;
    }
    Ok(())
}

#[cfg(not(feature = "tracing"))]
fn init_logs(cli: &Cli) -> Result<(), Box<dyn Error>> {
    gesture_recognition::init_logging(cli.log_level.into())?;
    Ok(())
}

fn parse_features(raw: &str) -> Result<Vec<f32>, Box<dyn Error>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f32>()
                .map_err(|e| Box::<dyn Error>::from(format!("invalid feature value {s:?}: {e}")))
        })
        .collect()
}
