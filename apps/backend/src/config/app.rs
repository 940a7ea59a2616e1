//! Process configuration, read once from the environment at startup.

use std::env;
use std::path::PathBuf;

use crate::domain::table::ResumePolicy;
use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DECKS_DIR: &str = "./decks";

/// Origins allowed when `CORS_ALLOWED_ORIGINS` yields nothing usable.
pub const FALLBACK_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:5173",
    "http://127.0.0.1:5173",
];

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub decks_dir: PathBuf,
    pub resume_policy: ResumePolicy,
    /// Fixed seed for shuffles and dice; OS entropy when absent.
    pub rng_seed: Option<u64>,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = var("BACKEND_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match var("BACKEND_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got '{raw}'"))
            })?,
            None => DEFAULT_PORT,
        };

        let decks_dir = PathBuf::from(var("DECKS_DIR").unwrap_or_else(|| DEFAULT_DECKS_DIR.into()));

        let resume_policy = match var("TABLE_RESUME_POLICY") {
            Some(raw) => raw
                .parse::<ResumePolicy>()
                .map_err(|e| AppError::config(format!("TABLE_RESUME_POLICY: {e}")))?,
            None => ResumePolicy::default(),
        };

        let rng_seed = var("TABLE_RNG_SEED")
            .map(|raw| {
                raw.trim().parse::<u64>().map_err(|_| {
                    AppError::config(format!("TABLE_RNG_SEED must be an unsigned integer, got '{raw}'"))
                })
            })
            .transpose()?;

        let cors_origins = parse_origins(var("CORS_ALLOWED_ORIGINS").as_deref().unwrap_or(""));

        Ok(Self {
            host,
            port,
            decks_dir,
            resume_policy,
            rng_seed,
            cors_origins,
        })
    }
}

/// Comma-separated http(s) origins; blanks and `null` are dropped.
fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect();

    if origins.is_empty() {
        FALLBACK_ORIGINS.iter().map(|s| s.to_string()).collect()
    } else {
        origins
    }
}
