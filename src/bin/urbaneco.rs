//! UrbanEco command-line front end
//!
//! Usage:
//!   urbaneco analyze <form.json>
//!   urbaneco forecast <params.json>
//!   urbaneco water-batch <points.csv>
//!   urbaneco export-solar <form.json> <out.csv>
//!   urbaneco export-forecast <params.json> <out.csv>

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use urbaneco_engine::forecast::{simulate, ForecastParameters, SimulationProgress};
use urbaneco_engine::water::{load_monitoring_points, process_water_quality_data};
use urbaneco_engine::{
    submit, write_production_csv, AnalysisForm, AnalysisOutcome, JsonFormatter, MarkdownFormatter,
    OutputFormat, RunConfig, SubmitError,
};

const USAGE: &str = "usage: urbaneco <analyze|forecast|water-batch|export-solar|export-forecast> <input> [output.csv]";

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "urbaneco_engine=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = RunConfig::from_env();
    tracing::debug!(
        "Configuration: format={}, base_year={}, loading_delay={:?}",
        config.format,
        config.base_year,
        config.loading_delay
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (command, input) = match args.as_slice() {
        [command, input, ..] => (command.as_str(), PathBuf::from(input)),
        _ => bail!(USAGE),
    };
    let output = args.get(2).map(PathBuf::from);

    match (command, output) {
        ("analyze", _) => {
            let outcome = analyze(&input, &config)?;
            match config.format {
                OutputFormat::Json => print_json(&outcome)?,
                OutputFormat::Markdown => print!("{}", MarkdownFormatter::format(&outcome)),
            }
        }
        ("forecast", _) => {
            let params = forecast_parameters(&input, &config)?;
            show_progress(&config);
            let result = simulate(&params);
            match config.format {
                OutputFormat::Json => print_json(&result)?,
                OutputFormat::Markdown => print!("{}", MarkdownFormatter::format_forecast(&result)),
            }
        }
        ("water-batch", _) => {
            let points = load_monitoring_points(&input)?;
            let report = process_water_quality_data(&points, chrono::Local::now().date_naive());
            match config.format {
                OutputFormat::Json => print_json(&report)?,
                OutputFormat::Markdown => print!("{}", MarkdownFormatter::format_batch(&report)),
            }
        }
        ("export-solar", Some(out)) => match analyze(&input, &config)? {
            AnalysisOutcome::Solar { result, .. } => {
                write_production_csv(&result.yearly_data, Some(config.base_year), &out)?
            }
            other => bail!("export-solar needs a solar form, got '{}'", other.objective()),
        },
        ("export-forecast", Some(out)) => {
            let params = forecast_parameters(&input, &config)?;
            let result = simulate(&params);
            write_production_csv(&result.yearly_production, None, &out)?;
        }
        _ => bail!(USAGE),
    }

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input: {:?}", path))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse JSON input: {:?}", path))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", JsonFormatter::format(value)?);
    Ok(())
}

fn analyze(path: &Path, config: &RunConfig) -> Result<AnalysisOutcome> {
    let form: AnalysisForm = read_json(path)?;

    match submit(&form) {
        Ok(outcome) => {
            show_progress(config);
            Ok(outcome)
        }
        Err(SubmitError::Validation(errors)) => {
            eprintln!("{}", errors.notice);
            for error in &errors.fields {
                eprintln!("  {}: {}", error.field, error.message);
            }
            bail!("form has {} invalid field(s)", errors.len())
        }
        Err(err @ SubmitError::Engine(_)) => Err(err.into()),
    }
}

/// Read forecast parameters; the configured base year applies unless the file sets one
fn forecast_parameters(path: &Path, config: &RunConfig) -> Result<ForecastParameters> {
    let raw: serde_json::Value = read_json(path)?;
    let has_base_year = raw.get("baseYear").is_some();

    let mut params: ForecastParameters = serde_json::from_value(raw)
        .with_context(|| format!("Invalid forecast parameters: {:?}", path))?;
    if !has_base_year {
        params.base_year = config.base_year;
    }
    Ok(params)
}

/// Walk the simulated loading stages, pausing between steps
fn show_progress(config: &RunConfig) {
    if config.loading_delay.is_zero() {
        return;
    }
    let mut last_stage = "";
    for (percent, stage) in SimulationProgress::new() {
        if stage != last_stage {
            tracing::info!("{} ({}%)", stage, percent);
            last_stage = stage;
        }
        std::thread::sleep(config.loading_delay);
    }
}
