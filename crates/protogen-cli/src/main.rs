//! protogen CLI - Render protobuf definitions from service manifests
//!
//! Commands:
//! - `protogen generate` - Print the generated `.proto` file
//! - `protogen check` - Validate a manifest and its plugin chains

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod generate;
mod manifest;

#[derive(Parser)]
#[command(name = "protogen")]
#[command(author, version, about = "Plugin-driven protobuf message generation", long_about = None)]
struct Cli {
    /// Log level when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the .proto file of a service manifest
    Generate {
        /// Path to the service manifest (TOML, or JSON by extension)
        #[arg(short, long)]
        manifest: String,

        /// Path to generation settings (TOML, or JSON by extension)
        #[arg(short, long)]
        settings: Option<String>,
    },

    /// Validate a service manifest
    Check {
        /// Path to the service manifest (TOML, or JSON by extension)
        #[arg(short, long)]
        manifest: String,

        /// Path to generation settings (TOML, or JSON by extension)
        #[arg(short, long)]
        settings: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Generate { manifest, settings } => {
            generate::run(&manifest, settings.as_deref())?;
        }
        Commands::Check { manifest, settings } => {
            manifest::check(&manifest, settings.as_deref())?;
        }
    }

    Ok(())
}

/// Install the stderr subscriber; `RUST_LOG` wins over `--log-level`
fn init_logging(level: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log level: {level}"))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
