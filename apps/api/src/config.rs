use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::composer::Temperatures;

pub const DEFAULT_LLM_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_LLM_MODEL: &str = "llama-3.3-70b-versatile";
/// Templates shipped with the crate, independent of the working directory.
pub const DEFAULT_PROMPTS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/prompts");

/// Generation service settings. The credential is optional here: its absence is
/// reported per call as `MissingCredential`, before any network activity.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
}

/// Application configuration loaded once from environment variables (and `.env`).
/// Built before any component and passed into their constructors.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmSettings,
    pub temperatures: Temperatures,
    pub prompts_dir: PathBuf,
    /// Extracted résumés shorter than this (trimmed chars) trigger a soft warning.
    pub min_extracted_chars: usize,
    pub session_ttl: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let temperatures = Temperatures {
            letter: parse_env("LETTER_TEMPERATURE", 0.4)?,
            recommendations: parse_env("RECOMMENDATIONS_TEMPERATURE", 0.3)?,
        };
        validate_temperatures(&temperatures)?;

        Ok(Config {
            llm: LlmSettings {
                api_key: optional_env("GROQ_API_KEY"),
                endpoint: optional_env("LLM_API_URL")
                    .unwrap_or_else(|| DEFAULT_LLM_ENDPOINT.to_string()),
                model: optional_env("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
                timeout: Duration::from_secs(parse_env("LLM_TIMEOUT_SECS", 60u64)?),
            },
            temperatures,
            prompts_dir: PathBuf::from(
                optional_env("PROMPTS_DIR").unwrap_or_else(|| DEFAULT_PROMPTS_DIR.to_string()),
            ),
            min_extracted_chars: parse_env("MIN_EXTRACTED_CHARS", 50usize)?,
            session_ttl: Duration::from_secs(parse_env("SESSION_TTL_SECS", 3600u64)?),
            port: parse_env("PORT", 8080u16)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

fn validate_temperatures(temperatures: &Temperatures) -> Result<()> {
    for (name, value) in [
        ("LETTER_TEMPERATURE", temperatures.letter),
        ("RECOMMENDATIONS_TEMPERATURE", temperatures.recommendations),
    ] {
        if !(0.0..=2.0).contains(&value) {
            bail!("{name} must be between 0 and 2, got {value}");
        }
    }
    Ok(())
}
