//! Configuration loading and management for the HRMS payroll engine.
//!
//! This module loads the payroll policy and the seed roster from YAML files,
//! and reads process settings from the environment.
//!
//! # Example
//!
//! ```no_run
//! use hrms_payroll::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/hrms").unwrap();
//! println!("Tax rate: {}", config.policy().tax_rate);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DuplicateBatchPolicy, PayrollPolicy, RosterConfig, ServerSettings};
