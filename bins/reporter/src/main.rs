//! c4reports command-line host.
//!
//! Loads configuration, sets up tracing on stderr, runs one report over a
//! JSON input file and prints `{ "columns": [...], "rows": [...] }` to
//! stdout.

mod cli;

use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use c4reports_core::attendance::{AttendanceBasis, InMemoryAttendanceStore};
use c4reports_core::statement::InMemoryLedgerStore;
use c4reports_core::{AttendanceFilters, AttendanceService, LedgerFilters, StatementService};
use c4reports_shared::{AppConfig, AppError, LoggingConfig, ReportsConfig};

use cli::{Cli, Commands};

/// Report input: filters next to the source rows.
#[derive(Debug, Deserialize)]
struct ReportInput<F, S> {
    #[serde(default)]
    filters: F,
    #[serde(flatten)]
    data: S,
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            let err = AppError::from(err);
            eprintln!("{err}");
            return to_exit_code(err.exit_code());
        }
    };

    init_tracing(&config.logging);

    match run(&cli, &config.reports) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "Report failed");
            eprintln!("{err:#}");
            to_exit_code(exit_status(&err))
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn run(cli: &Cli, settings: &ReportsConfig) -> anyhow::Result<String> {
    let output = match &cli.command {
        Commands::Attendance { input } => {
            attendance(AttendanceBasis::CheckIn, input, settings)?
        }
        Commands::AttendanceRecords { input } => {
            attendance(AttendanceBasis::AttendanceRecord, input, settings)?
        }
        Commands::GlParty { input } => {
            let input: ReportInput<LedgerFilters, InMemoryLedgerStore> = read_input(input)?;
            let statement = StatementService::generate(&input.filters, &input.data, settings);
            info!(rows = statement.rows.len(), "GL party statement ready");
            json!({ "columns": statement.columns, "rows": statement.to_records() })
        }
    };

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    };
    rendered.context("rendering report output")
}

fn attendance(
    basis: AttendanceBasis,
    input: &Path,
    settings: &ReportsConfig,
) -> anyhow::Result<serde_json::Value> {
    let input: ReportInput<AttendanceFilters, InMemoryAttendanceStore> = read_input(input)?;
    let report = AttendanceService::generate(basis, &input.filters, &input.data, settings)
        .map_err(AppError::from)?;
    info!(?basis, rows = report.rows.len(), "Attendance grid ready");
    Ok(json!({ "columns": report.columns, "rows": report.to_records() }))
}

fn read_input<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading input from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading input file {}", path.display()))?
    };

    serde_json::from_str(&text).with_context(|| format!("parsing input {}", path.display()))
}

/// Process exit status for a failed run.
fn exit_status(err: &anyhow::Error) -> i32 {
    if let Some(app) = err.downcast_ref::<AppError>() {
        app.exit_code()
    } else if let Some(io) = err.downcast_ref::<std::io::Error>() {
        AppError::Io(io.to_string()).exit_code()
    } else if let Some(json) = err.downcast_ref::<serde_json::Error>() {
        AppError::Validation(json.to_string()).exit_code()
    } else {
        AppError::Internal(err.to_string()).exit_code()
    }
}

fn to_exit_code(status: i32) -> ExitCode {
    u8::try_from(status).map_or(ExitCode::FAILURE, ExitCode::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_input_flattens_store_fields() {
        let input: ReportInput<LedgerFilters, InMemoryLedgerStore> = serde_json::from_value(json!({
            "filters": { "from_date": "2024-03-01" },
            "entries": [{
                "name": "GLE-1",
                "posting_date": "2024-03-02",
                "company": "Acme",
                "account": "Debtors",
                "voucher_type": "Journal Entry",
                "voucher_no": "JV-1",
                "debit": "10"
            }],
            "customers": { "CUST-1": "Customer One" }
        }))
        .unwrap();
        assert_eq!(input.data.entries.len(), 1);
        assert_eq!(input.data.customers["CUST-1"], "Customer One");
        assert!(input.filters.from_date.is_some());
    }

    #[test]
    fn test_missing_filters_default() {
        let input: ReportInput<AttendanceFilters, InMemoryAttendanceStore> =
            serde_json::from_value(json!({ "employees": [] })).unwrap();
        assert!(input.filters.company.is_none());
        let err = AttendanceService::generate(
            AttendanceBasis::CheckIn,
            &input.filters,
            &input.data,
            &ReportsConfig::default(),
        )
        .unwrap_err();
        let err = anyhow::Error::from(AppError::from(err));
        assert_eq!(exit_status(&err), 2);
        assert_eq!(err.to_string(), "Validation error: Company is required");
    }

    #[test]
    fn test_malformed_input_is_validation_failure() {
        let err = serde_json::from_str::<ReportInput<LedgerFilters, InMemoryLedgerStore>>("{ nope")
            .context("parsing input")
            .unwrap_err();
        assert_eq!(exit_status(&err), 2);
    }

    #[test]
    fn test_run_reports_missing_file() {
        let cli = Cli::try_parse_from(["c4reports", "gl-party", "--input", "/nonexistent/gl.json"])
            .unwrap();
        let err = run(&cli, &ReportsConfig::default()).unwrap_err();
        assert!(err.downcast_ref::<std::io::Error>().is_some());
        assert_eq!(exit_status(&err), 74);
    }

    #[test]
    fn test_records_rendered_for_gl_party() {
        let dir = std::env::temp_dir().join(format!("c4reports-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("gl.json");
        std::fs::write(&path, r#"{ "entries": [] }"#).unwrap();

        let cli = Cli::try_parse_from(["c4reports", "gl-party", "--input", path.to_str().unwrap()])
            .unwrap();
        let output: Value = serde_json::from_str(&run(&cli, &ReportsConfig::default()).unwrap()).unwrap();
        assert_eq!(output["columns"].as_array().unwrap().len(), 12);
        // Totals and closing rows only.
        assert_eq!(output["rows"].as_array().unwrap().len(), 2);
        assert_eq!(output["rows"][0]["voucher_type"], "Totals");
    }
}
