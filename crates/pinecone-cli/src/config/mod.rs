//! CLI configuration.
//!
//! ```text
//! Cli
//! ├── api_key: Option<String>     # --api-key / PINECONE_API_KEY
//! ├── client: ClientOptions       # controller host, timeout, headers
//! └── command: Command            # what to run
//! ```
//!
//! Every option can be given as an argument or an environment variable.

mod command;

use clap::Parser;
pub use command::{Command, IndexCommand};
use pinecone_client::ClientOptions;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::TRACING_TARGET_STARTUP;

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "pinecone")]
#[command(about = "Manage Pinecone indexes and vectors from the command line")]
#[command(version)]
pub struct Cli {
    /// API key; falls back to PINECONE_API_KEY
    #[arg(long, env = "PINECONE_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Client options (controller host, timeout, headers).
    #[clap(flatten)]
    pub client: ClientOptions,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Loads `.env` (if enabled) and parses the arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Installs the fmt subscriber with `RUST_LOG` filtering, defaulting to
    /// `info`. Logs go to stderr so stdout only carries command output.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();

        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            dotenv = cfg!(feature = "dotenv"),
            "Tracing initialized"
        );
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_client_options() {
        let cli = Cli::try_parse_from([
            "pinecone",
            "--api-key",
            "k",
            "--controller-host",
            "http://localhost:5080",
            "--timeout",
            "5",
            "--header",
            "X-Env=dev",
            "indexes",
            "list",
        ])
        .unwrap();

        assert_eq!(cli.api_key.as_deref(), Some("k"));
        assert_eq!(
            cli.client.controller_host.as_deref(),
            Some("http://localhost:5080")
        );
        assert_eq!(cli.client.timeout, Some(5));
        assert_eq!(
            cli.client.additional_headers,
            vec![("X-Env".to_owned(), "dev".to_owned())]
        );
        assert!(matches!(
            cli.command,
            Command::Indexes {
                command: IndexCommand::List
            }
        ));
    }
}
