//! `payshares-fed` binary: federated address and memo utilities.

use clap::Parser;
use payshares_fed::{load_config, Cli, CommandError};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    let config_path = cli.config_path();

    let config = match load_config(Some(config_path)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("warn"));

    if config.logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    tracing::debug!(path = %config_path.display(), "resolved configuration path");

    match cli.command.run() {
        Ok(value) => {
            let rendered = match (&value, config.output.pretty) {
                (serde_json::Value::String(text), _) => Ok(text.clone()),
                (_, true) => serde_json::to_string_pretty(&value),
                (_, false) => serde_json::to_string(&value),
            };
            match rendered {
                Ok(text) => println!("{text}"),
                Err(err) => {
                    eprintln!("failed to render output: {err}");
                    std::process::exit(1);
                }
            }
        }
        Err(err) => {
            report(&err);
            std::process::exit(err.exit_code());
        }
    }
}

fn report(err: &CommandError) {
    tracing::debug!(error = ?err, "command failed");
    eprintln!("error: {err}");
}
