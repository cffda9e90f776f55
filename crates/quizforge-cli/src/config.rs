//! CLI configuration management.
//!
//! All options can be provided via CLI arguments or environment variables;
//! use `--help` to see the full list.
//!
//! ```bash
//! quizforge --api-url "https://quizforge.dev/api" sessions
//! QUIZFORGE_API_URL="https://quizforge.dev/api" quizforge sessions
//! ```

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use quizforge_client::{ApiClient, ApiClientConfig, DEFAULT_BASE_URL};
use quizforge_core::TokenStore;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Parser)]
#[command(name = "quizforge")]
#[command(about = "Turn PDFs into quizzes and take them from the terminal")]
#[command(version)]
pub struct Cli {
    /// API endpoint and credential storage configuration.
    #[clap(flatten)]
    pub client: ClientConfig,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Loads environment variables from .env (if enabled) and parses CLI
    /// arguments. The .env pass runs first so clap's `env` defaults see it.
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

    /// No-op when the dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    /// Logs configuration at debug level (no sensitive information).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            "Build information"
        );
        self.client.log();
    }
}

/// API endpoint and credential storage configuration.
#[derive(Debug, Clone, Args)]
#[must_use = "config does nothing unless you use it"]
pub struct ClientConfig {
    /// Base URL of the quizforge API.
    #[arg(long, env = "QUIZFORGE_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Request timeout in seconds.
    #[arg(long, env = "QUIZFORGE_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,

    /// Path of the credential file. Defaults to
    /// `$HOME/.quizforge/credentials.json`.
    #[arg(long, env = "QUIZFORGE_CREDENTIALS")]
    pub credentials: Option<PathBuf>,
}

impl ClientConfig {
    /// Opens the on-disk token store backing every command.
    pub fn token_store(&self) -> anyhow::Result<TokenStore> {
        Ok(TokenStore::on_disk(self.credentials_path()?))
    }

    /// Builds the API client over the given token store.
    pub fn api_client(&self, tokens: TokenStore) -> anyhow::Result<ApiClient> {
        let config = ApiClientConfig::from_base_url(&self.api_url)
            .context("invalid API base URL")?
            .with_timeout(Duration::from_secs(self.timeout))
            .with_user_agent(concat!("quizforge-cli/", env!("CARGO_PKG_VERSION")));

        ApiClient::new(config, tokens).context("failed to create API client")
    }

    fn credentials_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = &self.credentials {
            return Ok(path.clone());
        }
        let home = std::env::var_os("HOME")
            .map(PathBuf::from)
            .context("HOME is not set; pass --credentials explicitly")?;
        Ok(home.join(".quizforge").join("credentials.json"))
    }

    /// Logs configuration at debug level.
    fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            api_url = %self.api_url,
            timeout_secs = self.timeout,
            credentials = ?self.credentials,
            "Client configuration"
        );
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new account and sign in.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in with an existing account.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Discard the stored credential.
    Logout,
    /// Show the signed-in user's profile.
    Profile,
    /// Upload a PDF and start quiz generation.
    Upload {
        /// Path of the PDF file to upload.
        file: PathBuf,
    },
    /// Follow a generation job until it finishes.
    Watch {
        /// Id of the quiz being generated.
        quiz_id: String,
    },
    /// Wait for a quiz and take it interactively.
    Take {
        /// Id of the quiz to take.
        quiz_id: String,
    },
    /// List past quiz attempts.
    Sessions,
    /// Show one past attempt with its answer breakdown.
    Session {
        /// Id of the attempt to show.
        session_id: String,
    },
}
