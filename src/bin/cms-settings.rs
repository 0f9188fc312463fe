// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prints the resolved settings of one environment as YAML.
//!
//! ```bash
//! CMS_EMAIL_BACKEND=smtp cms-settings --environment staging \
//!   --base common.yaml --layer local.yaml --env-prefix CMS_ --key EMAIL_BACKEND
//! ```

use clap::Parser;
use cms_settings::prelude::*;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

/// Resolve layered CMS settings
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Environment to resolve (build, production, development, staging)
    #[arg(short, long, default_value = "production")]
    environment: Environment,

    /// Base settings file, applied before the environment profile
    #[arg(short, long)]
    base: Vec<PathBuf>,

    /// Overlay file, applied after the environment profile (repeatable)
    #[arg(short, long)]
    layer: Vec<PathBuf>,

    /// YAML file answering per-deployment lookups
    #[arg(long)]
    settings_file: Option<PathBuf>,

    /// Only read environment variables with this prefix (stripped before lookup)
    #[arg(long)]
    env_prefix: Option<String>,

    /// Lookup override, highest precedence (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    overrides: Vec<String>,

    /// Print a single key instead of the whole configuration
    #[arg(short, long)]
    key: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> std::result::Result<String, Box<dyn std::error::Error>> {
    let mut lookup = EnvironmentResolver::builder();
    if let Some(path) = &args.settings_file {
        lookup = lookup.with_yaml_file(path)?;
    }
    lookup = match args.env_prefix {
        Some(prefix) => lookup.with_env_prefix(prefix),
        None => lookup.with_env_vars(),
    };
    let lookup = lookup.with_cli_overrides(args.overrides).build();

    let mut settings = SettingsBuilder::new(args.environment);
    for path in args.base {
        settings = settings.with_base_file(path);
    }
    for path in args.layer {
        settings = settings.with_overlay_file(path);
    }
    let resolved = settings.build(&lookup)?;

    match args.key {
        Some(key) => {
            let key = ConfigKey::from(key);
            let value = resolved.require(&key)?;
            Ok(serde_yaml::to_string(&value)?)
        }
        None => Ok(serde_yaml::to_string(&resolved)?),
    }
}
