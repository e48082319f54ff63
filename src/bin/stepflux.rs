//! stepflux CLI - Command-line interface for stepflux
//!
//! Commands:
//! - daily: Summarize a single step-only entry
//! - training: Summarize a single training entry
//! - run: Summarize entries streamed on stdin, one per line
//! - doctor: Diagnose configuration and environment

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use stepflux::{
    BiometricProfile, ConfigError, DailyError, MetricsConfig, SummaryProcessor, TrainingError,
    PRODUCER_NAME, STEPFLUX_VERSION,
};

/// stepflux - Step, distance, speed and calorie summaries
#[derive(Parser)]
#[command(name = "stepflux")]
#[command(version = STEPFLUX_VERSION)]
#[command(about = "Summarize activity-log entries", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a "<steps>,<duration>" entry
    Daily {
        /// Raw entry, e.g. "6000,1h30m"
        #[arg(short, long)]
        entry: String,

        #[command(flatten)]
        body: BodyArgs,

        /// Print metrics as JSON instead of the text report
        #[arg(long)]
        json: bool,
    },

    /// Summarize a "<steps>,<label>,<duration>" entry
    Training {
        /// Raw entry, e.g. "1000,Бег,30m"
        #[arg(short, long)]
        entry: String,

        #[command(flatten)]
        body: BodyArgs,

        /// Print metrics as JSON instead of the text report
        #[arg(long)]
        json: bool,
    },

    /// Summarize entries read from stdin, one per line
    Run {
        /// Entry format of every line
        #[arg(long, default_value = "daily")]
        mode: Mode,

        #[command(flatten)]
        body: BodyArgs,

        /// Output format
        #[arg(long, default_value = "text")]
        output_format: OutputFormat,

        /// Only flush output at end of input instead of after each record
        #[arg(long)]
        no_flush: bool,
    },

    /// Diagnose configuration and environment
    Doctor {
        /// Check a config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args)]
struct BodyArgs {
    /// Body weight (kg)
    #[arg(long)]
    weight: f64,

    /// Body height (cm)
    #[arg(long)]
    height: f64,

    /// Load calculator coefficients from a JSON file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// "<steps>,<duration>"
    Daily,
    /// "<steps>,<label>,<duration>"
    Training,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Text reports, as returned by the library
    Text,
    /// Newline-delimited JSON metrics (rejected lines carry an error object)
    Ndjson,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(verbose >= 2)
        .init();

    debug!("stepflux started with verbosity level: {}", verbose);
}

fn run(cli: Cli) -> Result<(), StepfluxCliError> {
    match cli.command {
        Commands::Daily { entry, body, json } => cmd_single(Mode::Daily, &entry, &body, json),
        Commands::Training { entry, body, json } => {
            cmd_single(Mode::Training, &entry, &body, json)
        }
        Commands::Run {
            mode,
            body,
            output_format,
            no_flush,
        } => cmd_run(mode, &body, output_format, !no_flush),
        Commands::Doctor { config, json } => cmd_doctor(config.as_deref(), json),
    }
}

fn load_processor(config: Option<&Path>) -> Result<SummaryProcessor, StepfluxCliError> {
    match config {
        Some(path) => {
            let json = fs::read_to_string(path)?;
            let config = MetricsConfig::from_json(&json)?;
            info!(path = %path.display(), "loaded calculator config");
            Ok(SummaryProcessor::with_config(config))
        }
        None => Ok(SummaryProcessor::new()),
    }
}

fn cmd_single(
    mode: Mode,
    entry: &str,
    body: &BodyArgs,
    json: bool,
) -> Result<(), StepfluxCliError> {
    let processor = load_processor(body.config.as_deref())?;
    let profile = BiometricProfile::new(body.weight, body.height);

    if json {
        let json = match mode {
            Mode::Daily => serde_json::to_string_pretty(&processor.daily(entry, &profile)?)?,
            Mode::Training => serde_json::to_string_pretty(&processor.training(entry, &profile)?)?,
        };
        println!("{}", json);
        return Ok(());
    }

    let report = render_text(&processor, mode, entry, &profile);
    if report.is_empty() {
        return Err(StepfluxCliError::Rejected);
    }
    print!("{}", report);
    Ok(())
}

fn cmd_run(
    mode: Mode,
    body: &BodyArgs,
    output_format: OutputFormat,
    flush: bool,
) -> Result<(), StepfluxCliError> {
    let processor = load_processor(body.config.as_deref())?;
    let profile = BiometricProfile::new(body.weight, body.height);

    if atty::is(atty::Stream::Stdin) {
        eprintln!("Reading entries from stdin, one per line (Ctrl-D to finish)");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut processed = 0usize;

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        let output = match output_format {
            OutputFormat::Text => render_text(&processor, mode, trimmed, &profile),
            OutputFormat::Ndjson => {
                let json_line = match mode {
                    Mode::Daily => match processor.daily(trimmed, &profile) {
                        Ok(metrics) => serde_json::to_string(&metrics)?,
                        Err(e) => rejected_line(trimmed, &e)?,
                    },
                    Mode::Training => match processor.training(trimmed, &profile) {
                        Ok(metrics) => serde_json::to_string(&metrics)?,
                        Err(e) => rejected_line(trimmed, &e)?,
                    },
                };
                json_line + "\n"
            }
        };

        write!(stdout, "{}", output)?;
        if flush {
            stdout.flush()?;
        }
        processed += 1;
    }

    stdout.flush()?;
    info!(processed, "finished reading entries");
    Ok(())
}

fn rejected_line(entry: &str, error: &dyn std::error::Error) -> serde_json::Result<String> {
    serde_json::to_string(&RejectedEntry {
        entry,
        error: error.to_string(),
    })
}

fn render_text(
    processor: &SummaryProcessor,
    mode: Mode,
    entry: &str,
    profile: &BiometricProfile,
) -> String {
    match mode {
        Mode::Daily => processor.daily_report(entry, profile),
        Mode::Training => processor.training_report(entry, profile),
    }
}

fn cmd_doctor(config: Option<&Path>, json: bool) -> Result<(), StepfluxCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "version".to_string(),
        status: CheckStatus::Ok,
        message: format!("stepflux version {}", STEPFLUX_VERSION),
    });

    if let Some(config_path) = config {
        if config_path.exists() {
            match fs::read_to_string(config_path) {
                Ok(content) => match MetricsConfig::from_json(&content) {
                    Ok(config) => checks.push(DoctorCheck {
                        name: "config".to_string(),
                        status: CheckStatus::Ok,
                        message: format!(
                            "Config file valid (step length {} m)",
                            config.step_length_m
                        ),
                    }),
                    Err(e) => checks.push(DoctorCheck {
                        name: "config".to_string(),
                        status: CheckStatus::Error,
                        message: format!("Invalid config: {}", e),
                    }),
                },
                Err(e) => checks.push(DoctorCheck {
                    name: "config".to_string(),
                    status: CheckStatus::Error,
                    message: format!("Cannot read config file: {}", e),
                }),
            }
        } else {
            checks.push(DoctorCheck {
                name: "config".to_string(),
                status: CheckStatus::Warning,
                message: "Config file does not exist".to_string(),
            });
        }
    } else {
        checks.push(DoctorCheck {
            name: "config".to_string(),
            status: CheckStatus::Ok,
            message: format!(
                "Using default coefficients (step length {} m)",
                stepflux::STEP_LENGTH_M
            ),
        });
    }

    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive mode)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (streaming mode ready)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: STEPFLUX_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("stepflux Doctor Report");
        println!("======================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(StepfluxCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

// Error types

#[derive(Debug)]
enum StepfluxCliError {
    Io(io::Error),
    Config(ConfigError),
    Entry(String),
    Json(serde_json::Error),
    Rejected,
    DoctorFailed,
}

impl From<io::Error> for StepfluxCliError {
    fn from(e: io::Error) -> Self {
        StepfluxCliError::Io(e)
    }
}

impl From<ConfigError> for StepfluxCliError {
    fn from(e: ConfigError) -> Self {
        StepfluxCliError::Config(e)
    }
}

impl From<DailyError> for StepfluxCliError {
    fn from(e: DailyError) -> Self {
        StepfluxCliError::Entry(e.to_string())
    }
}

impl From<TrainingError> for StepfluxCliError {
    fn from(e: TrainingError) -> Self {
        StepfluxCliError::Entry(e.to_string())
    }
}

impl From<serde_json::Error> for StepfluxCliError {
    fn from(e: serde_json::Error) -> Self {
        StepfluxCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<StepfluxCliError> for CliError {
    fn from(e: StepfluxCliError) -> Self {
        match e {
            StepfluxCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            StepfluxCliError::Config(e) => CliError {
                code: "CONFIG_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'stepflux doctor --config <file>' for details".to_string()),
            },
            StepfluxCliError::Entry(message) => CliError {
                code: "ENTRY_ERROR".to_string(),
                message,
                hint: Some("Entries look like \"6000,1h30m\" or \"1000,Бег,30m\"".to_string()),
            },
            StepfluxCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            StepfluxCliError::Rejected => CliError {
                code: "ENTRY_REJECTED".to_string(),
                message: "Entry was rejected".to_string(),
                hint: Some("Re-run with --json or -v to see why".to_string()),
            },
            StepfluxCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct RejectedEntry<'a> {
    entry: &'a str,
    error: String,
}

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
