use anyhow::{Context, Result};
use clap::Parser;
use std::env;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Music catalog with per-user favorites")]
pub struct Args {
    /// Host to bind to (overrides TUNR_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides TUNR_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Database URL (overrides TUNR_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Size of the SQLite connection pool (overrides TUNR_MAX_CONNECTIONS)
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Run migrations and exit
    #[arg(long)]
    pub migrate: bool,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and migrate flag.
    pub fn from_env_and_args() -> Result<(Self, bool)> {
        let args = Args::parse();
        let cfg = Self::merge(args.host, args.port, args.database_url, args.max_connections)?;
        Ok((cfg, args.migrate))
    }

    /// Overlay explicit values on top of the environment defaults.
    pub fn merge(
        host: Option<String>,
        port: Option<u16>,
        database_url: Option<String>,
        max_connections: Option<u32>,
    ) -> Result<Self> {
        let env_host = env::var("TUNR_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = env_number("TUNR_PORT", 3000u16)?;
        let env_db =
            env::var("TUNR_DATABASE_URL").unwrap_or_else(|_| "sqlite://./data/tunr.db".into());
        let env_max = env_number("TUNR_MAX_CONNECTIONS", 5u32)?;

        Ok(Self {
            host: host.unwrap_or(env_host),
            port: port.unwrap_or(env_port),
            database_url: database_url.unwrap_or(env_db),
            max_connections: max_connections.unwrap_or(env_max).max(1),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_number<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .parse::<T>()
            .with_context(|| format!("parsing {} value `{}`", name, value)),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(err) => Err(err).with_context(|| format!("reading {}", name)),
    }
}
