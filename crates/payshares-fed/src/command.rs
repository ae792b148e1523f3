//! Command-line definition and subcommands of the `payshares-fed` tool.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use payshares_address::{combine, split, AddressError};
use payshares_protocols::{AuthRequest, FlexValue, ProtocolError};
use serde_json::{json, Value};
use thiserror::Error;

/// Config file used when neither `--config` nor `PAYSHARES_CONFIG_PATH` is set.
pub const DEFAULT_CONFIG_PATH: &str = "payshares.toml";

/// Federated address and memo utilities.
#[derive(Debug, Parser)]
#[command(name = "payshares-fed")]
#[command(version)]
#[command(
    about = "Split federated addresses, convert memo values, check compliance requests",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the TOML config file
    #[arg(long, global = true, env = "PAYSHARES_CONFIG_PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// The config file to load, falling back to [`DEFAULT_CONFIG_PATH`].
    pub fn config_path(&self) -> &Path {
        self.config
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH))
    }
}

/// Available subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Split name*domain and validate both parts
    Split {
        /// Combined federated address
        address: String,
    },

    /// Join a name and domain without validation
    Combine { name: String, domain: String },

    /// Print the wire form of a memo or route value
    MemoEncode { value: String },

    /// Normalize a numeric or quoted memo to a string
    MemoDecode {
        /// Raw JSON, e.g. `123` or `"123"`
        wire: String,
    },

    /// Validate a compliance auth request
    CheckAuth {
        /// JSON file holding the request, `-` for stdin
        input: PathBuf,
    },
}

/// Errors surfaced by the tool once arguments have been parsed.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Address validation failed.
    #[error("{0}")]
    Address(#[from] AddressError),

    /// Protocol record decoding or validation failed.
    #[error("{0}")]
    Protocol(#[from] ProtocolError),

    /// Reading the input failed.
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

impl CommandError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 2,
            Self::Address(_) | Self::Protocol(_) => 1,
        }
    }
}

impl Command {
    /// Runs the command, returning the value to print.
    pub fn run(&self) -> Result<Value, CommandError> {
        match self {
            Self::Split { address } => {
                let (name, domain) = split(address)?;
                Ok(json!({ "name": name, "domain": domain }))
            }
            Self::Combine { name, domain } => Ok(Value::String(combine(name, domain))),
            Self::MemoEncode { value } => {
                let wire = FlexValue::new(value.as_str()).encode();
                Ok(Value::String(String::from_utf8_lossy(&wire).into_owned()))
            }
            Self::MemoDecode { wire } => {
                let value = FlexValue::decode(wire.as_bytes())?;
                Ok(Value::String(value.into_inner()))
            }
            Self::CheckAuth { input } => {
                let raw = if input.as_os_str() == "-" {
                    std::io::read_to_string(std::io::stdin())?
                } else {
                    std::fs::read_to_string(input)?
                };
                check_auth(&raw)
            }
        }
    }
}

/// Validates a serialized [`AuthRequest`] down to its attachment.
pub fn check_auth(raw: &str) -> Result<Value, CommandError> {
    let request: AuthRequest = serde_json::from_str(raw).map_err(ProtocolError::from)?;
    request.validate()?;

    let data = request.data()?;
    let sender = data.validate()?;
    let attachment = data.attachment()?;
    let hash = attachment.hash_hex()?;

    tracing::info!(
        sender = %sender,
        operations = attachment.operations.len(),
        "auth request is well-formed"
    );

    Ok(json!({
        "sender": sender,
        "need_info": data.need_info,
        "route": attachment.transaction.route,
        "attachment_hash": hash,
    }))
}
