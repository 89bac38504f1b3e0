//! Session settings and their YAML loader.

use serde::Deserialize;

/// Errors raised while loading session settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// YAML deserialization failed (malformed YAML or unknown keys).
    #[error("YAML deserialization failed: {0}")]
    Deserialize(String),
}

/// Behaviour switches for a [`crate::ProofAssistant`] session.
///
///     use estimates::config::load_session_config;
///
///     let config = load_session_config("auto_finish: false\n").unwrap();
///     assert!(!config.auto_finish);
///     assert!(!config.verbose);
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SessionConfig {
    /// Leave tactic mode automatically once no goals remain.
    pub auto_finish: bool,
    /// Ask the term algebra to trace its entailment checks.
    pub verbose: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auto_finish: true,
            verbose: false,
        }
    }
}

impl SessionConfig {
    /// Sets [`SessionConfig::auto_finish`].
    #[must_use]
    pub const fn with_auto_finish(mut self, enabled: bool) -> Self {
        self.auto_finish = enabled;
        self
    }

    /// Sets [`SessionConfig::verbose`].
    #[must_use]
    pub const fn with_verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }
}

/// Loads session settings from a YAML mapping; absent keys take defaults.
///
/// # Errors
///
/// Returns [`ConfigError::Deserialize`] if the YAML is malformed or contains
/// unknown keys.
pub fn load_session_config(input: &str) -> Result<SessionConfig, ConfigError> {
    serde_saphyr::from_str(input).map_err(|error| ConfigError::Deserialize(error.to_string()))
}
