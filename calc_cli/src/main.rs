//! # Quickfigure CLI
//!
//! Command-line shell over `calc_core`. Fields are typed as `key=value`
//! pairs, exactly as a form would hand them over, so everything a user can
//! get wrong is caught by the engine's validator.
//!
//! ```text
//! quickfigure list
//! quickfigure run bowling-handicap basis_score=220 percentage=90 average=156
//! quickfigure run rug-size room_length=15 room_width=12 --json
//! quickfigure request payment.json
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use calc_core::calculations::Summary;
use calc_core::{CalcError, CalculationOutcome, CalculationRequest, CalculatorKind, EngineSettings, FieldMap};
use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "quickfigure")]
#[command(about = "Everyday calculators: handicaps, payments, materials and more", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file with default units and per-calculator presets
    #[arg(long, global = true, env = "QUICKFIGURE_CONFIG")]
    config: Option<PathBuf>,

    /// Log engine activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the available calculators and their required fields
    List,

    /// Run a calculator on field=value pairs
    Run {
        /// Calculator id (see `list`)
        calculator: String,

        /// Input fields
        #[arg(value_name = "FIELD=VALUE")]
        fields: Vec<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a JSON calculation request from a file, or `-` for stdin
    Request {
        #[arg(value_name = "FILE")]
        path: String,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Calc(#[from] CalcError),

    #[error("Could not read {path}: {source}")]
    Io { path: String, source: io::Error },

    #[error("Invalid request JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    fn to_json(&self) -> serde_json::Value {
        match self {
            CliError::Calc(err) => serde_json::to_value(err).unwrap_or_else(|_| message_json(&err.to_string())),
            other => message_json(&other.to_string()),
        }
    }
}

fn message_json(message: &str) -> serde_json::Value {
    serde_json::json!({ "type": "CliError", "details": { "message": message } })
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_source(path: &str) -> Result<String, CliError> {
    let mut text = String::new();
    let result = if path == "-" {
        io::stdin().read_to_string(&mut text).map(|_| ())
    } else {
        fs::read_to_string(path).map(|t| text = t)
    };
    result.map_err(|source| CliError::Io {
        path: path.to_string(),
        source,
    })?;
    Ok(text)
}

fn load_settings(path: Option<&Path>) -> Result<EngineSettings, CliError> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading settings");
            let text = read_source(&path.to_string_lossy())?;
            Ok(EngineSettings::from_toml_str(&text)?)
        }
        None => Ok(EngineSettings::default()),
    }
}

/// Parse the id and fields, apply settings, and run.
fn run_calculator(
    calculator: &str,
    pairs: &[String],
    settings: &EngineSettings,
) -> Result<CalculationOutcome, CliError> {
    let kind: CalculatorKind = calculator.parse()?;
    let mut fields = FieldMap::from_pairs(pairs)?;
    settings.apply_to(kind, &mut fields);
    debug!(calculator = kind.id(), fields = fields.len(), "running");
    Ok(kind.run_fields(&fields)?)
}

fn run_request_text(text: &str) -> Result<CalculationOutcome, CliError> {
    let request: CalculationRequest = serde_json::from_str(text)?;
    Ok(request.run()?)
}

fn render_list() -> String {
    let mut out = String::new();
    for kind in CalculatorKind::ALL {
        out.push_str(&format!(
            "{:<18} {:<26} {}\n",
            kind.id(),
            kind.display_name(),
            kind.required_fields().join(", ")
        ));
    }
    out
}

fn render_text(outcome: &CalculationOutcome) -> String {
    let title = outcome.kind().display_name();
    let rule = "═".repeat(title.chars().count() + 4);
    let mut out = format!("{rule}\n  {title}\n{rule}\n");
    match outcome.headline() {
        Some((label, value)) => out.push_str(&format!("{}: {}\n", label, value)),
        None => out.push_str("No recommendation for these inputs\n"),
    }
    for line in outcome.details() {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn execute(cli: &Cli) -> Result<String, CliError> {
    match &cli.command {
        Commands::List => Ok(render_list()),
        Commands::Run { calculator, fields, json } => {
            let settings = load_settings(cli.config.as_deref())?;
            let outcome = run_calculator(calculator, fields, &settings)?;
            if *json {
                to_pretty_json(&outcome)
            } else {
                Ok(render_text(&outcome))
            }
        }
        Commands::Request { path } => {
            let text = read_source(path)?;
            to_pretty_json(&run_request_text(&text)?)
        }
    }
}

fn wants_json(command: &Commands) -> bool {
    matches!(command, Commands::Run { json: true, .. } | Commands::Request { .. })
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute(&cli) {
        Ok(output) => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            if wants_json(&cli.command) {
                let json = serde_json::to_string_pretty(&err.to_json()).unwrap_or_else(|_| err.to_string());
                println!("{}", json);
            } else {
                eprintln!("Error: {}", err);
            }
            ExitCode::FAILURE
        }
    }
}
