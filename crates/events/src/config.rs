//! Dispatcher configuration.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Environment variable selecting the [`PanicPolicy`].
pub const PANIC_POLICY_ENV: &str = "EDA_HANDLER_PANIC_POLICY";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown panic policy `{0}` (expected `propagate` or `isolate`)")]
    UnknownPanicPolicy(String),
}

/// What dispatch does when a handler panics.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanicPolicy {
    /// The panic unwinds out of `dispatch`; remaining handlers are skipped.
    #[default]
    Propagate,
    /// The panic is caught and logged, and dispatch moves on to the next handler.
    Isolate,
}

impl FromStr for PanicPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "propagate" => Ok(Self::Propagate),
            "isolate" => Ok(Self::Isolate),
            other => Err(ConfigError::UnknownPanicPolicy(other.to_string())),
        }
    }
}

/// Dispatcher configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    pub panic_policy: PanicPolicy,
}

impl DispatcherConfig {
    /// Read configuration from the process environment.
    ///
    /// Invalid values are logged and replaced by defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let panic_policy = match lookup(PANIC_POLICY_ENV) {
            None => PanicPolicy::default(),
            Some(raw) => raw.parse().unwrap_or_else(|e: ConfigError| {
                warn!(var = PANIC_POLICY_ENV, error = %e, "falling back to default panic policy");
                PanicPolicy::default()
            }),
        };

        Self { panic_policy }
    }

    pub fn with_panic_policy(mut self, policy: PanicPolicy) -> Self {
        self.panic_policy = policy;
        self
    }
}
