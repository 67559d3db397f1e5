//! Form core configuration

use std::path::{Path, PathBuf};

use forms_gate::RoleClassifier;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

pub const ENV_LOG_LEVEL: &str = "EQUIPDESK_LOG_LEVEL";
pub const ENV_EMAIL_DOMAIN: &str = "EQUIPDESK_EMAIL_DOMAIN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormsConfig {
    /// Domain appended to the lowercased CIN to form login emails.
    #[serde(default = "default_email_domain")]
    pub email_domain: String,

    /// Shown when a remote call fails without a server message.
    #[serde(default = "default_failure_message")]
    pub generic_failure_message: String,

    /// Roles that may modify records. Matching ignores case.
    #[serde(default = "default_full_access_roles")]
    pub full_access_roles: Vec<String>,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub json_logs: bool,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            email_domain: default_email_domain(),
            generic_failure_message: default_failure_message(),
            full_access_roles: default_full_access_roles(),
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

impl FormsConfig {
    /// Load from `path`, or from the user config directory when `None`.
    ///
    /// A missing file yields the defaults. Environment overrides are applied
    /// last, then the result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            toml::from_str(&contents)?
        } else {
            debug!(path = %config_path.display(), "No config file, using defaults");
            FormsConfig::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Invalid("cannot find config directory".into()))?;
        Ok(config_dir.join("equipdesk").join("forms.toml"))
    }

    /// Apply `EQUIPDESK_*` overrides read through `lookup`. Blank values are
    /// ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v: &String| !v.trim().is_empty());
        if let Some(level) = read(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        if let Some(domain) = read(ENV_EMAIL_DOMAIN) {
            self.email_domain = domain.trim().to_string();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let domain = self.email_domain.trim();
        if domain.is_empty() {
            return Err(ConfigError::Invalid("email_domain must not be empty".into()));
        }
        if domain.contains('@') {
            return Err(ConfigError::Invalid(format!(
                "email_domain must not contain '@': {}",
                domain
            )));
        }
        Ok(())
    }

    pub fn classifier(&self) -> RoleClassifier {
        RoleClassifier::new(&self.full_access_roles)
    }
}

fn default_email_domain() -> String {
    "testindustrielle.com".to_string()
}

fn default_failure_message() -> String {
    forms_submission::DEFAULT_FAILURE_MESSAGE.to_string()
}

fn default_full_access_roles() -> Vec<String> {
    vec!["admin".to_string(), "responsable".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use forms_types::Capability;

    #[test]
    fn defaults() {
        let config = FormsConfig::default();
        assert_eq!(config.email_domain, "testindustrielle.com");
        assert!(config.validate().is_ok());
        assert_eq!(config.classifier().classify("Admin"), Capability::FullAccess);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = FormsConfig::load(Some(Path::new("/nonexistent/equipdesk/forms.toml"))).unwrap();
        assert_eq!(config.full_access_roles, vec!["admin", "responsable"]);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: FormsConfig = toml::from_str(
            r#"
            email_domain = "example.tn"
            full_access_roles = ["admin"]
            "#,
        )
        .unwrap();
        assert_eq!(config.email_domain, "example.tn");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.classifier().classify("responsable"), Capability::ReadOnly);
    }

    #[test]
    fn overrides_ignore_blank_values() {
        let mut config = FormsConfig::default();
        config.apply_overrides(|key| match key {
            ENV_LOG_LEVEL => Some("debug".into()),
            ENV_EMAIL_DOMAIN => Some("  ".into()),
            _ => None,
        });
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.email_domain, "testindustrielle.com");
    }

    #[test]
    fn domain_validation() {
        let mut config = FormsConfig::default();
        config.email_domain = "@testindustrielle.com".into();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        config.email_domain = " ".into();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
