//! Runtime configuration, from command-line flags or the environment.

use clap::Parser;

/// Car-wash queue server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "carwash-queue", author, version, about, long_about = None)]
pub struct Config {
    /// Document store connection string (`memory://` or `file://<path>`).
    #[arg(long, env = "STORE_URL", default_value = "memory://")]
    pub store_url: String,

    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Default log level; `RUST_LOG` takes precedence when set.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
