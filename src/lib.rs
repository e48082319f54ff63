//! stepflux - Step, distance, speed and calorie summaries from activity logs
//!
//! Raw comma-delimited log entries flow through a small deterministic pipeline:
//! record parsing → metric formulas → report rendering.
//!
//! ## Entry formats
//!
//! - **Daily**: `"<steps>,<duration>"`, e.g. `"6000,1h30m"`
//! - **Training**: `"<steps>,<label>,<duration>"`, e.g. `"3456,Ходьба,3h00m"`
//!
//! Durations are compound literals such as `"90m"`, `"1h20m"` or `"1.5h"`.

pub mod calculator;
pub mod config;
pub mod duration;
pub mod error;
pub mod parser;
pub mod report;
pub mod summary;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use calculator::MetricsCalculator;
pub use config::{MetricsConfig, STEP_LENGTH_M};
pub use error::{ConfigError, DailyError, DurationError, ParseError, TrainingError};
pub use summary::{daily_summary, training_summary, SummaryProcessor};
pub use types::{Activity, BiometricProfile, DailyMetrics, TrainingMetrics};

/// Library version
pub const STEPFLUX_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name reported by the CLI
pub const PRODUCER_NAME: &str = "stepflux";
