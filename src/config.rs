use std::time::Duration;

use crate::error::AgentError;

/// Default per-request timeout for the generative backend.
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;

/// Runtime settings, resolved once at startup.
///
/// Priority per key: compile-time env (set during CI build) → runtime env var.
/// `.env` files are honored via dotenvy before the runtime lookup.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the generative-text backend. None disables the backend
    /// entirely; the orchestrator then always answers from the canned table.
    pub provider_url: Option<String>,
    /// API key for the generative-text backend.
    pub provider_api_key: Option<String>,
    /// Model identifier sent with each completion request.
    pub provider_model: String,
    /// Per-request timeout for the generative backend.
    pub provider_timeout: Duration,
    /// BCP-47-ish language tag used before the user picks one ("en", "hi", "te").
    pub default_language: String,
}

impl Settings {
    /// Load settings from the environment. Never fails on missing provider
    /// config — the crate degrades to canned responses — but rejects a
    /// malformed timeout so a typo does not silently become 30 seconds.
    pub fn from_env() -> Result<Self, AgentError> {
        // Best effort; absence of a .env file is normal in production.
        let _ = dotenvy::dotenv();

        let provider_timeout = match std::env::var("AGRIVOICE_PROVIDER_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    AgentError::Config(format!(
                        "AGRIVOICE_PROVIDER_TIMEOUT_SECS must be an integer, got {:?}",
                        raw
                    ))
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
        };

        Ok(Settings {
            provider_url: env_opt("AGRIVOICE_PROVIDER_URL"),
            provider_api_key: env_opt("AGRIVOICE_PROVIDER_API_KEY"),
            provider_model: env_opt("AGRIVOICE_PROVIDER_MODEL")
                .unwrap_or_else(|| "gemini-1.5-flash".to_string()),
            provider_timeout,
            default_language: env_opt("AGRIVOICE_DEFAULT_LANGUAGE")
                .unwrap_or_else(|| "en".to_string()),
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            provider_url: None,
            provider_api_key: None,
            provider_model: "gemini-1.5-flash".to_string(),
            provider_timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
            default_language: "en".to_string(),
        }
    }
}

/// Read an env var, treating empty values as unset.
fn env_opt(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = Settings::default();
        assert!(s.provider_url.is_none());
        assert_eq!(s.default_language, "en");
        assert_eq!(s.provider_timeout, Duration::from_secs(30));
    }
}
