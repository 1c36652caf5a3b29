//! Session configuration and logging setup.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Application-level constants
pub const APP_NAME: &str = "HealthGuard";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Purpose labels written into audit entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AuditPurposes {
    pub record_added: String,
    pub consent_granted: String,
    pub consent_revoked: String,
}

impl Default for AuditPurposes {
    fn default() -> Self {
        Self {
            record_added: "Self Management".to_string(),
            consent_granted: "Care Continuity".to_string(),
            consent_revoked: "Privacy".to_string(),
        }
    }
}

/// Per-session settings supplied by the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    /// Actor name for audit entries. Defaults to the patient's name.
    pub actor: Option<String>,
    /// System identifier stamped on audit exports
    pub system_id: Option<String>,
    pub purposes: AuditPurposes,
}

impl SessionConfig {
    /// Parse host-supplied JSON. Missing fields take their defaults and an
    /// empty or blank string yields the default config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }
}

/// Default log filter when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "healthguard_core=info"
}

/// Install a fmt subscriber honoring `RUST_LOG`.
///
/// Safe to call more than once; only the first call installs anything.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter()));
    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_ok() {
        tracing::info!("{} core v{} logging initialized", APP_NAME, APP_VERSION);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert!(config.actor.is_none());
        assert_eq!(config.purposes.record_added, "Self Management");
        assert_eq!(config.purposes.consent_granted, "Care Continuity");
        assert_eq!(config.purposes.consent_revoked, "Privacy");
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            SessionConfig::from_json(r#"{"actor":"Guardian","systemId":"kiosk-1","purposes":{"consentRevoked":"Opt-out"}}"#)
                .unwrap();
        assert_eq!(config.actor.as_deref(), Some("Guardian"));
        assert_eq!(config.system_id.as_deref(), Some("kiosk-1"));
        assert_eq!(config.purposes.consent_revoked, "Opt-out");
        assert_eq!(config.purposes.record_added, "Self Management");
    }

    #[test]
    fn test_from_json_blank() {
        assert_eq!(SessionConfig::from_json("  ").unwrap(), SessionConfig::default());
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            SessionConfig::from_json("{not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging();
        init_logging();
    }

    #[test]
    fn app_name_is_healthguard() {
        assert_eq!(APP_NAME, "HealthGuard");
    }
}
