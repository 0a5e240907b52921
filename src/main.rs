//! Kicks storefront CLI

use std::{io, process::ExitCode};

use tracing::error;

use kicks::{commands, config::KicksConfig, observability};

/// Kicks CLI entry point
#[tokio::main]
async fn main() -> ExitCode {
    let config = match KicksConfig::load() {
        Ok(config) => config,
        Err(error) => {
            // Help and version requests also arrive here.
            _ = error.print();

            return if error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(error) = observability::init(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for setup errors"
        )]
        {
            eprintln!("Logging error: {error}");
        }

        return ExitCode::FAILURE;
    }

    let stdout = io::stdout();

    match commands::run(config, stdout.lock()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(source) => {
            error!(%source, "command failed");

            #[expect(clippy::print_stderr, reason = "user-facing error message")]
            {
                eprintln!("error: {source}");
            }

            ExitCode::FAILURE
        }
    }
}
