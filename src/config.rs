//! Runtime configuration loaded once from the environment.

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::error::ConfigError;

pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
pub const MODEL_ENV_VAR: &str = "OPENAI_MODEL";
pub const BASE_URL_ENV_VAR: &str = "OPENAI_BASE_URL";
pub const MAX_TOKENS_ENV_VAR: &str = "AICOMMIT_MAX_TOKENS";
pub const TIMEOUT_ENV_VAR: &str = "AICOMMIT_TIMEOUT";
pub const SCOPE_DIRS_ENV_VAR: &str = "AICOMMIT_SCOPE_DIRS";

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MAX_TOKENS: u32 = 300;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_SCOPE_DIRS: [&str; 2] = ["apps", "libs"];

#[cfg(windows)]
pub const DEFAULT_EDITOR: &str = "notepad";
#[cfg(not(windows))]
pub const DEFAULT_EDITOR: &str = "vi";

/// Everything the collaborators need, resolved up front.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub max_tokens: u32,
    pub timeout: Duration,
    /// Top-level directories whose immediate children are scopes.
    pub scope_dirs: Vec<String>,
    /// Raw editor command line, split when the editor is launched.
    pub editor: String,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Only `OPENAI_API_KEY` is required. Malformed numeric overrides are
    /// logged and replaced by their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = non_empty_var(API_KEY_ENV_VAR).ok_or(ConfigError::MissingApiKey)?;

        let model = non_empty_var(MODEL_ENV_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = non_empty_var(BASE_URL_ENV_VAR)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let max_tokens = parse_var(MAX_TOKENS_ENV_VAR, DEFAULT_MAX_TOKENS);
        let timeout = Duration::from_secs(parse_var(TIMEOUT_ENV_VAR, DEFAULT_TIMEOUT_SECS));

        let scope_dirs = non_empty_var(SCOPE_DIRS_ENV_VAR)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .filter(|dirs| !dirs.is_empty())
            .unwrap_or_else(|| DEFAULT_SCOPE_DIRS.iter().map(|s| s.to_string()).collect());

        Ok(Self {
            api_key,
            model,
            base_url,
            max_tokens,
            timeout,
            scope_dirs,
            editor: resolve_editor(),
        })
    }

    /// Replace the model, e.g. from a command-line flag.
    pub fn with_model(mut self, model: Option<String>) -> Self {
        if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
            self.model = model;
        }
        self
    }
}

/// Pick the editor the same way git does for commit messages:
/// `GIT_EDITOR`, then `EDITOR`, then the platform default.
pub fn resolve_editor() -> String {
    non_empty_var("GIT_EDITOR")
        .or_else(|| non_empty_var("EDITOR"))
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    match non_empty_var(name) {
        Some(v) => match v.trim().parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!("Invalid {} value '{}', using default {}", name, v, default);
                default
            }
        },
        None => default,
    }
}
