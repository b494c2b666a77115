use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Model API token. Absent means generation runs degraded: the
    /// read-only endpoints keep working and /generate returns 503.
    pub hf_api_token: Option<String>,
    pub max_input_chars: usize,
    pub max_chunk_size: usize,
    pub cache_ttl_seconds: u64,
    pub cache_max_size: u64,
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            hf_api_token: env::var("HF_API_TOKEN").ok().filter(|t| !t.is_empty()),
            max_input_chars: env::var("MAX_INPUT_CHARS")
                .unwrap_or_else(|_| "50000".to_string())
                .parse()
                .context("MAX_INPUT_CHARS must be a valid number")?,
            max_chunk_size: env::var("MAX_CHUNK_SIZE")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .context("MAX_CHUNK_SIZE must be a valid number")?,
            cache_ttl_seconds: env::var("CACHE_TTL_SECONDS")
                .unwrap_or_else(|_| "86400".to_string())
                .parse()
                .context("CACHE_TTL_SECONDS must be a valid number")?,
            cache_max_size: env::var("CACHE_MAX_SIZE")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .context("CACHE_MAX_SIZE must be a valid number")?,
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "*".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        })
    }
}
