pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod processing;
pub mod scheduler;
pub mod sensor;
pub mod signal_processing;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use config::StationConfig;
pub use error::{Result, WindError};
pub use processing::WindProcessor;
pub use scheduler::Scheduler;
pub use sensor::convert;
