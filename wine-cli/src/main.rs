//! wine - Wine Quality Prediction
//! Command-line interface for scoring wine samples with a trained model

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use tracing_subscriber::EnvFilter;
use wine_core::catalog;
use wine_core::prelude::*;

#[derive(Parser)]
#[command(name = "wine")]
#[command(author = "Wine Quality Contributors")]
#[command(version = "2026.10.18")]
#[command(about = "Wine Quality Prediction", long_about = None)]
struct Cli {
    /// Trained model artifact (defaults to WINE_MODEL_PATH or assets/wine_quality.json)
    #[arg(short, long, global = true, value_name = "PATH")]
    model: Option<PathBuf>,

    /// Log model loading and inference details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the quality of one wine sample
    Predict {
        #[command(flatten)]
        sample: SampleArgs,

        /// Read the sample from a JSON file ('-' for stdin) instead of flags
        #[arg(short, long, value_name = "FILE", conflicts_with = "sample_fields")]
        input: Option<PathBuf>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the quality categories
    Catalog,

    /// List input fields and their accepted ranges
    Fields,

    /// Inspect a model artifact
    Model,

    /// Show information about the tool
    Info,
}

/// One flag per field; values are validated by the core ruleset
#[derive(Args, Default)]
#[group(id = "sample_fields", multiple = true)]
struct SampleArgs {
    /// Wine type: red or white
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    wine_type: Option<String>,

    #[arg(long, value_name = "G/DM3")]
    fixed_acidity: Option<String>,

    #[arg(long, value_name = "G/DM3")]
    volatile_acidity: Option<String>,

    #[arg(long, value_name = "G/DM3")]
    citric_acid: Option<String>,

    #[arg(long, value_name = "G/DM3")]
    residual_sugar: Option<String>,

    #[arg(long, value_name = "G/DM3")]
    chlorides: Option<String>,

    #[arg(long, value_name = "MG/DM3")]
    free_sulfur_dioxide: Option<String>,

    #[arg(long, value_name = "MG/DM3")]
    total_sulfur_dioxide: Option<String>,

    #[arg(long, value_name = "G/CM3")]
    density: Option<String>,

    #[arg(long = "ph", value_name = "PH")]
    ph: Option<String>,

    #[arg(long, value_name = "G/DM3")]
    sulphates: Option<String>,

    #[arg(long, value_name = "% VOL")]
    alcohol: Option<String>,
}

impl SampleArgs {
    /// Pairs for the flags that were given, keyed by field name
    fn pairs(&self) -> Vec<(&'static str, &str)> {
        let values = [
            &self.fixed_acidity,
            &self.volatile_acidity,
            &self.citric_acid,
            &self.residual_sugar,
            &self.chlorides,
            &self.free_sulfur_dioxide,
            &self.total_sulfur_dioxide,
            &self.density,
            &self.ph,
            &self.sulphates,
            &self.alcohol,
        ];

        let mut pairs = Vec::with_capacity(FIELDS.len() + 1);
        if let Some(wine_type) = &self.wine_type {
            pairs.push(("wine_type", wine_type.as_str()));
        }
        for (spec, value) in FIELDS.iter().zip(values) {
            if let Some(value) = value {
                pairs.push((spec.name, value.as_str()));
            }
        }
        pairs
    }

    fn to_sample(&self) -> Result<WineSample, ValidationError> {
        WineSample::from_pairs(self.pairs())
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let model_path = cli.model.clone().unwrap_or_else(config::model_path);

    let result = match cli.command {
        Commands::Predict {
            sample,
            input,
            json,
        } => predict_command(&model_path, &sample, input.as_deref(), json),
        Commands::Catalog => {
            print_catalog();
            Ok(())
        }
        Commands::Fields => {
            print_fields();
            Ok(())
        }
        Commands::Model => model_command(&model_path),
        Commands::Info => {
            print_info();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(exit_code(&e));
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "wine_core=debug,wine=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(io::stderr)
        .init();
}

/// 2 = invalid input, 3 = no model, 4 = model failure, 1 = anything else
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<WineError>() {
        Some(WineError::Validation(_)) => 2,
        Some(WineError::ModelUnavailable(_)) => 3,
        Some(WineError::Inference(_)) => 4,
        None => 1,
    }
}

// ============================================================================
// Prediction
// ============================================================================

fn read_sample(input: Option<&Path>, args: &SampleArgs) -> Result<WineSample> {
    let Some(path) = input else {
        return args.to_sample().map_err(|e| WineError::Validation(e).into());
    };

    let text = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("Failed to read sample from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read sample from {}", path.display()))?
    };

    let value: serde_json::Value =
        serde_json::from_str(&text).context("Sample input is not valid JSON")?;
    WineSample::from_json(&value).map_err(|e| WineError::Validation(e).into())
}

fn predict_command(
    model_path: &Path,
    args: &SampleArgs,
    input: Option<&Path>,
    json: bool,
) -> Result<()> {
    // Validate before touching the model so bad input is reported first
    let sample = read_sample(input, args)?;

    tracing::debug!(path = %model_path.display(), "loading model");
    let adapter = Arc::new(ModelAdapter::load(model_path));
    let pipeline = InferencePipeline::new(adapter);
    let outcome = pipeline.infer(&sample)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!(
        "{} {} wine",
        "Scoring".green().bold(),
        sample.wine_type.to_string().cyan()
    );
    println!();
    println!(
        "{} {}",
        "Predicted Quality:".bold(),
        outcome.predicted_quality.to_string().bold()
    );
    let heading = if outcome.is_known() {
        outcome.heading.green().bold()
    } else {
        outcome.heading.yellow().bold()
    };
    println!("{}", heading);
    println!("{}", outcome.description);

    Ok(())
}

// ============================================================================
// Model inspection
// ============================================================================

fn model_command(model_path: &Path) -> Result<()> {
    let adapter = ModelAdapter::try_load(model_path)
        .with_context(|| format!("Cannot load model {}", model_path.display()))?;
    let info = adapter
        .describe()
        .context("Model loaded but reports no details")?;

    println!("{} {}", "Model".green().bold(), model_path.display().to_string().cyan());
    println!("  kind:       {}", info.kind);
    println!("  features:   {}", info.n_features);
    if let Some(trees) = info.tree_count {
        println!("  trees:      {}", trees);
    }
    Ok(())
}

// ============================================================================
// Reference output
// ============================================================================

fn print_catalog() {
    println!("{}", "Quality Categories".bold());
    println!();
    for category in catalog::entries() {
        if let Some(score) = category.score {
            println!("  {} {}", score.to_string().cyan().bold(), category.heading.bold());
            println!("    {}", category.description);
        }
    }
    println!();
    println!(
        "  {} {} ({})",
        "*".yellow(),
        catalog::UNKNOWN.heading,
        "any other score".italic()
    );
}

fn print_fields() {
    println!("{}", "Input Fields".bold());
    println!();
    println!("  {:<22} {}", "wine_type".cyan(), "red | white");
    for spec in FIELDS.iter() {
        let unit = if spec.unit.is_empty() {
            String::new()
        } else {
            format!(" {}", spec.unit)
        };
        println!(
            "  {:<22} {} - {}{}",
            spec.name.cyan(),
            spec.min,
            spec.max,
            unit
        );
        println!("  {:<22} {}", "", spec.description.dimmed());
    }
}

fn print_info() {
    println!("{}", "wine - Wine Quality Prediction".bold());
    println!();
    println!("Scores a wine from eleven chemical measurements and its type using a trained model.");
    println!();
    println!("{}", "Pipeline:".bold());
    println!("  Sample (type + 11 measurements)");
    println!("       ↓  range validation");
    println!("  Feature vector (12 values)");
    println!("       ↓  model");
    println!("  Quality score");
    println!("       ↓  catalog");
    println!("  Category heading + description");
    println!();
    println!("{}", "Commands:".bold());
    println!("  wine predict -t red --fixed-acidity 7.4 ... --alcohol 9.4");
    println!("  wine predict --input sample.json --json");
    println!("  wine catalog                     # Quality categories");
    println!("  wine fields                      # Accepted input ranges");
    println!("  wine model -m model.json         # Inspect a model artifact");
    println!();
    println!("{}", "Environment:".bold());
    println!("  WINE_MODEL_PATH   model artifact (default {})", config::DEFAULT_MODEL_PATH);
}
