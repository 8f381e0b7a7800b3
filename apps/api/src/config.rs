use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub openai_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Upload size cap in bytes. Oversized files are rejected before decode.
    pub max_upload_bytes: usize,
}

const DEFAULT_MAX_UPLOAD_MB: usize = 10;

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            openai_api_key: require_env("OPENAI_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: parse_max_upload_bytes(std::env::var("MAX_UPLOAD_MB").ok())?,
        })
    }
}

/// Parses the optional MAX_UPLOAD_MB override into a byte cap.
/// Zero is rejected — it would silently turn away every upload.
fn parse_max_upload_bytes(raw: Option<String>) -> Result<usize> {
    let mb = match raw {
        Some(v) => {
            let mb = v
                .parse::<usize>()
                .context("MAX_UPLOAD_MB must be a positive integer")?;
            anyhow::ensure!(mb > 0, "MAX_UPLOAD_MB must be greater than zero");
            mb
        }
        None => DEFAULT_MAX_UPLOAD_MB,
    };
    Ok(mb * 1024 * 1024)
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
