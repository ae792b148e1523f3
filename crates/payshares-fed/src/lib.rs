//! Library half of the `payshares-fed` command-line tool.
//!
//! The binary is a thin shell over [`payshares_address`] and
//! [`payshares_protocols`]: it splits and combines federated addresses,
//! converts memo values between their wire forms, and checks compliance auth
//! requests for well-formedness. It performs no network lookups.

pub mod command;
pub mod config;

pub use command::{check_auth, Cli, Command, CommandError, DEFAULT_CONFIG_PATH};
pub use config::{apply_overrides, load_config, Config, ConfigError};
