//! `ferrite-idx` CLI - turn folders of labeled images into IDX tensors.
//!
//! Run with:
//!   cargo run --release -- convert --input data/png/train --output data/idx --name train
//!   cargo run --release -- convert --plan plan.json
//!   cargo run --release -- inspect data/idx/train_images.idx3-long data/idx/train_labels.idx3-long

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ferrite_idx::{convert, convert_plan, inspect_pair, ConversionPlan, ConversionSummary, ConvertConfig};

/// Convert per-class image folders into IDX image/label files.
#[derive(Parser, Debug)]
#[command(name = "ferrite-idx")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert one folder, or every split listed in a JSON plan.
    Convert(ConvertArgs),
    /// Validate an images/labels pair and print its shape and label counts.
    Inspect {
        /// Image tensor file.
        #[arg(value_name = "IMAGES")]
        images: PathBuf,
        /// Label tensor file.
        #[arg(value_name = "LABELS")]
        labels: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// JSON plan describing several conversions.
    #[arg(long, value_name = "FILE", conflicts_with_all = ["input", "output", "name", "wide"])]
    plan: Option<PathBuf>,

    /// Folder whose subfolders are the classes.
    #[arg(short, long, value_name = "DIR", required_unless_present = "plan")]
    input: Option<PathBuf>,

    /// Folder that receives the IDX files.
    #[arg(short, long, value_name = "DIR", required_unless_present = "plan")]
    output: Option<PathBuf>,

    /// Base name of the output files.
    #[arg(short, long, value_name = "NAME", required_unless_present = "plan")]
    name: Option<String>,

    /// Write full 32-bit packed pixels instead of one grayscale byte.
    #[arg(long)]
    wide: bool,

    /// Print the conversion summary as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("ferrite_idx={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = run(cli.command) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Convert(args) => run_convert(args),
        Command::Inspect { images, labels } => {
            let report = inspect_pair(&images, &labels).with_context(|| {
                format!("Failed to inspect {} / {}", images.display(), labels.display())
            })?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}

fn run_convert(args: ConvertArgs) -> Result<()> {
    let summaries = match &args.plan {
        Some(path) => {
            let plan = ConversionPlan::load_json(path)
                .with_context(|| format!("Failed to load plan {}", path.display()))?;
            convert_plan(&plan).context("Failed to run conversion plan")?
        }
        None => {
            let config = ConvertConfig::new(
                args.input.clone().context("--input is required")?,
                args.output.clone().context("--output is required")?,
                args.name.clone().context("--name is required")?,
                !args.wide,
            );
            vec![convert(&config).with_context(|| {
                format!("Failed to convert {}", config.input_root.display())
            })?]
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        for summary in &summaries {
            print_summary(summary);
        }
    }
    Ok(())
}

fn print_summary(summary: &ConversionSummary) {
    println!(
        "Wrote {} samples of {}x{} -> {}, {}",
        summary.sample_count,
        summary.width,
        summary.height,
        summary.images_path.display(),
        summary.labels_path.display()
    );
    for class in &summary.classes {
        println!("  {:>3}  {:<24} {} images", class.code, class.label, class.count);
    }
}
