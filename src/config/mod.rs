//! Configuration loading and management for the HR KPI engine.
//!
//! This module loads the computation constants (working days per month,
//! employer charge multiplier, default age, turnover window...) from YAML
//! files. [`EngineConfig::default`] reproduces the stock constants for
//! callers that ship no configuration directory.
//!
//! # Example
//!
//! ```no_run
//! use hr_kpi_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded configuration: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{Assumptions, EmployerCostMode, EngineConfig, EngineMetadata};
