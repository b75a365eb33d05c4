//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.name is required")]
    MissingServerName,
    #[error("limits.{0} must be greater than zero")]
    ZeroLimit(&'static str),
    #[error("audit.path parent directory does not exist: {0}")]
    AuditPathInvalid(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.name.trim().is_empty() {
        errors.push(ValidationError::MissingServerName);
    }

    let limits = &config.limits;
    for (name, value) in [
        ("max_line_len", limits.max_line_len),
        ("max_nick_len", limits.max_nick_len),
        ("send_queue", limits.send_queue),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroLimit(name));
        }
    }

    if let Some(ref audit) = config.audit
        && let Some(parent) = audit.path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        errors.push(ValidationError::AuditPathInvalid(
            audit.path.display().to_string(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuditConfig;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn reports_every_problem() {
        let mut config = Config::default();
        config.server.name = "  ".to_string();
        config.limits.send_queue = 0;
        config.limits.max_nick_len = 0;
        config.audit = Some(AuditConfig {
            path: "/definitely/not/here/audit.jsonl".into(),
        });

        let errors = validate(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(matches!(errors[0], ValidationError::MissingServerName));
        assert!(
            errors
                .iter()
                .any(|e| matches!(e, ValidationError::ZeroLimit("send_queue")))
        );
        assert!(
            errors
                .iter()
                .any(|e| matches!(e, ValidationError::AuditPathInvalid(_)))
        );
    }

    #[test]
    fn bare_file_name_is_accepted() {
        let mut config = Config::default();
        config.audit = Some(AuditConfig {
            path: "session.jsonl".into(),
        });
        assert!(validate(&config).is_ok());
    }
}
