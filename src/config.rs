//! CLI configuration

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::{
    commands::Command,
    design_lab::{DEFAULT_BASE_URL, DEFAULT_MODEL},
};

/// Kicks storefront configuration
#[derive(Debug, Parser)]
#[command(name = "kicks", about = "Kicks sneaker storefront", long_about = None)]
pub struct KicksConfig {
    /// Directory holding the saved cart
    #[arg(long, env = "KICKS_DATA_DIR", default_value = ".kicks")]
    pub data_dir: PathBuf,

    /// Catalog fixture to load instead of the built-in seed catalog
    #[arg(long, env = "KICKS_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Image editing service settings.
    #[command(flatten)]
    pub gemini: GeminiArgs,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

impl KicksConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Gemini settings for the design lab.
#[derive(Debug, Args)]
pub struct GeminiArgs {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    /// Image editing model
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub gemini_model: String,

    /// Gemini API root
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub gemini_base_url: String,
}
