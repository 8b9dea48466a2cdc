//! # baseline
//!
//! Command-line interface for the baseline forecaster. Works on local CSV or
//! JSON files; no history store or server is involved.

use clap::{Parser, Subcommand, ValueEnum};
use forecast_facade::{
    compute_variance, run_model, Direction, ForecastVector, Horizon, LagModelConfig,
    MissingDataPolicy, VarianceConfig, VarianceReport, DEFAULT_MAX_HORIZON,
};
use history_facade::{History, Observation};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

type CliResult<T> = std::result::Result<T, String>;

#[derive(Parser)]
#[command(name = "baseline")]
#[command(about = "Auto-baseline forecasting CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast the periods following a series
    Forecast {
        /// Input file (CSV or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Number of periods to forecast
        #[arg(long, allow_negative_numbers = true)]
        horizon: i64,

        /// Number of lags for the equal-weight moving average
        #[arg(short = 'k', long, default_value_t = 4)]
        order: usize,

        /// Explicit lag weights, oldest first (overrides --order)
        #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
        weights: Option<Vec<f64>>,

        /// Clamp predictions to the observed range
        #[arg(long)]
        clamp: bool,

        /// Largest accepted horizon
        #[arg(long, default_value_t = DEFAULT_MAX_HORIZON)]
        max_horizon: usize,

        /// Column name or index for values (default: "value" or first non-period column)
        #[arg(short, long)]
        column: Option<String>,

        /// Output file (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Period-aligned variance of one series against another
    Variance {
        /// Base series (CSV or JSON)
        #[arg(short, long)]
        base: PathBuf,

        /// Compare series (CSV or JSON)
        #[arg(short = 'x', long)]
        compare: PathBuf,

        /// Treat increases as unfavorable
        #[arg(long)]
        adverse: bool,

        /// Suppress points whose absolute delta is below this
        #[arg(long, default_value_t = 0.0)]
        noise: f64,

        /// How to treat periods present in only one series
        #[arg(long, value_enum, default_value_t = MissingArg::Skip)]
        missing: MissingArg,

        /// Column name or index for values
        #[arg(short, long)]
        column: Option<String>,

        /// Output file (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MissingArg {
    Skip,
    Zero,
}

impl From<MissingArg> for MissingDataPolicy {
    fn from(arg: MissingArg) -> Self {
        match arg {
            MissingArg::Skip => MissingDataPolicy::Skip,
            MissingArg::Zero => MissingDataPolicy::Zero,
        }
    }
}

/// Load observations from a CSV file.
///
/// A `period` column is used when present; otherwise rows are numbered from 1.
fn load_csv_data(path: &Path, column: Option<&str>) -> CliResult<Vec<Observation>> {
    let file = File::open(path).map_err(|e| format!("Failed to open file: {}", e))?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let headers = reader
        .headers()
        .map_err(|e| format!("Failed to read headers: {}", e))?
        .clone();

    let period_idx = headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case("period"));

    let value_idx = match column {
        Some(col) => match col.parse::<usize>() {
            Ok(idx) => idx,
            Err(_) => headers
                .iter()
                .position(|h| h.trim() == col)
                .ok_or_else(|| format!("Column '{}' not found", col))?,
        },
        None => headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case("value"))
            .or_else(|| (0..headers.len()).find(|&i| Some(i) != period_idx))
            .ok_or_else(|| "No value column found".to_string())?,
    };

    let mut data = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|e| format!("Failed to read record: {}", e))?;
        let raw = match record.get(value_idx).map(str::trim) {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Err(format!("Row {}: missing value", row + 1)),
        };
        let value = raw
            .parse::<f64>()
            .map_err(|_| format!("Row {}: '{}' is not a number", row + 1, raw))?;
        let period = match period_idx.and_then(|i| record.get(i)) {
            Some(p) => p
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("Row {}: period '{}' is not an integer", row + 1, p))?,
            None => row as i64 + 1,
        };
        data.push(Observation::new(period, value));
    }

    if data.is_empty() {
        return Err("No numeric data found in the specified column".to_string());
    }

    Ok(data)
}

/// Load observations from a JSON file.
///
/// Accepts an array of numbers, an array of `{"period", "value"}` objects, or
/// an object holding either under `observations`, `values` or `data`.
fn load_json_data(path: &Path, column: Option<&str>) -> CliResult<Vec<Observation>> {
    let file = File::open(path).map_err(|e| format!("Failed to open file: {}", e))?;
    let reader = BufReader::new(file);
    let json: serde_json::Value =
        serde_json::from_reader(reader).map_err(|e| format!("Failed to parse JSON: {}", e))?;

    let array = match &json {
        serde_json::Value::Array(arr) => arr,
        serde_json::Value::Object(obj) => ["observations", "values", "data"]
            .iter()
            .find_map(|key| obj.get(*key).and_then(|v| v.as_array()))
            .ok_or_else(|| "Could not find an observation array in JSON".to_string())?,
        _ => return Err("Could not extract numeric data from JSON".to_string()),
    };

    let value_key = column.unwrap_or("value");
    let mut data = Vec::with_capacity(array.len());
    for (i, item) in array.iter().enumerate() {
        let observation = match item {
            serde_json::Value::Number(n) => n.as_f64().map(|v| Observation::new(i as i64 + 1, v)),
            serde_json::Value::Object(obj) => {
                let value = obj.get(value_key).and_then(|v| v.as_f64());
                let period = match obj.get("period") {
                    Some(p) => Some(
                        p.as_i64()
                            .ok_or_else(|| format!("Entry {}: period is not an integer", i + 1))?,
                    ),
                    None => Some(i as i64 + 1),
                };
                value.zip(period).map(|(v, p)| Observation::new(p, v))
            }
            _ => None,
        };
        data.push(observation.ok_or_else(|| format!("Entry {}: no numeric value", i + 1))?);
    }

    if data.is_empty() {
        return Err("Could not extract numeric data from JSON".to_string());
    }

    Ok(data)
}

/// Load data from file (auto-detect format)
fn load_data(path: &Path, column: Option<&str>) -> CliResult<Vec<Observation>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => load_csv_data(path, column),
        "json" => load_json_data(path, column),
        _ => {
            // Try CSV first, then JSON
            load_csv_data(path, column).or_else(|_| load_json_data(path, column))
        }
    }
}

/// Write results to file or stdout as JSON
fn write_results<T: Serialize>(results: &T, output: Option<&PathBuf>) -> CliResult<()> {
    if let Some(path) = output {
        let mut file = File::create(path).map_err(|e| format!("Failed to create output: {}", e))?;
        serde_json::to_writer_pretty(&mut file, results)
            .map_err(|e| format!("Failed to write JSON: {}", e))?;
        println!("Results written to {:?}", path);
    } else {
        let json = serde_json::to_string_pretty(results)
            .map_err(|e| format!("Failed to serialize JSON: {}", e))?;
        println!("{}", json);
    }

    Ok(())
}

/// Forecast `horizon` periods after the observations in `input`.
fn forecast_file(
    input: &Path,
    horizon: i64,
    model: &LagModelConfig,
    max_horizon: usize,
    column: Option<&str>,
) -> CliResult<ForecastVector> {
    let horizon = Horizon::bounded(horizon, max_horizon).map_err(|e| e.to_string())?;
    let data = load_data(input, column)?;
    let history = History::new(data).map_err(|e| format!("Invalid history: {}", e))?;
    let model = model.build().map_err(|e| e.to_string())?;
    run_model(&model, &history, horizon).map_err(|e| e.to_string())
}

/// Run forecast command
#[allow(clippy::too_many_arguments)]
fn run_forecast(
    input: PathBuf,
    horizon: i64,
    order: usize,
    weights: Option<Vec<f64>>,
    clamp: bool,
    max_horizon: usize,
    column: Option<String>,
    output: Option<PathBuf>,
) -> CliResult<()> {
    let model = LagModelConfig {
        order,
        weights,
        clamp_to_history: clamp,
    };
    let forecast = forecast_file(&input, horizon, &model, max_horizon, column.as_deref())?;

    eprintln!(
        "Loaded {} observations from {:?}",
        forecast.metadata.history_len,
        input.file_name().unwrap_or_default()
    );
    eprintln!(
        "Model: {} (order {}, window {})",
        forecast.metadata.model, forecast.metadata.order, forecast.metadata.window
    );
    if forecast.metadata.insufficient_history() {
        eprintln!("Warning: fewer observations than the model order; partial window used");
    }
    for (period, value) in forecast.periods() {
        eprintln!("  Period {}: {:.4}", period, value);
    }

    write_results(&forecast, output.as_ref())
}

/// Variance of the series in `compare` against the one in `base`.
fn variance_files(
    base: &Path,
    compare: &Path,
    config: &VarianceConfig,
    column: Option<&str>,
) -> CliResult<VarianceReport> {
    let base_data = load_data(base, column)?;
    let compare_data = load_data(compare, column)?;
    compute_variance(&base_data, &compare_data, config).map_err(|e| e.to_string())
}

/// Run variance command
fn run_variance(
    base: PathBuf,
    compare: PathBuf,
    config: VarianceConfig,
    column: Option<String>,
    output: Option<PathBuf>,
) -> CliResult<()> {
    let report = variance_files(&base, &compare, &config, column.as_deref())?;

    eprintln!(
        "{} points, {} skipped, {} suppressed, total delta {:.4}",
        report.points.len(),
        report.skipped,
        report.suppressed,
        report.total_delta()
    );

    write_results(&report, output.as_ref())
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Forecast {
            input,
            horizon,
            order,
            weights,
            clamp,
            max_horizon,
            column,
            output,
        } => run_forecast(
            input,
            horizon,
            order,
            weights,
            clamp,
            max_horizon,
            column,
            output,
        ),

        Commands::Variance {
            base,
            compare,
            adverse,
            noise,
            missing,
            column,
            output,
        } => {
            let config = VarianceConfig {
                direction: if adverse {
                    Direction::Adverse
                } else {
                    Direction::Favorable
                },
                noise_threshold: noise,
                missing: missing.into(),
                ..Default::default()
            };
            run_variance(base, compare, config, column, output)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
