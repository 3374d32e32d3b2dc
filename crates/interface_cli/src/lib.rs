//! Command-Line Interface Layer
//!
//! Configuration loading for the `finance-db` binary, which connects to the
//! store and creates the finance schema.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_cli::config::CliConfig;
//!
//! let config = CliConfig::from_env()?;
//! let pool = infra_db::create_pool(config.database_config()?).await?;
//! ```

pub mod config;

pub use config::{CliConfig, LogFormat};
