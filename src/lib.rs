// Library interface for pacezones modules
// Integration tests and the binary both go through this crate root

pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod estimator;
pub mod fields;
pub mod logging;
pub mod submitter;
pub mod zones;

// Re-export commonly used types for convenience
pub use app::{ActiveUnit, ActiveView, App, InputOutcome};
pub use config::AppConfig;
pub use error::{EstimatorError, PaceZonesError, Result, SEND_FAILED_NOTICE};
pub use estimator::{EstimateResponse, HttpEstimator, PaceEstimator};
pub use fields::{reconcile, DisplayField, ResolvedField, ResultView, DISPLAY_FIELDS};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use submitter::{SubmitOutcome, SubmitState, TrialSubmitter};
pub use zones::{LthrZones, ZoneBand, ZoneCalculator, ZoneRange};
