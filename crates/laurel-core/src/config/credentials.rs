//! Portal credentials.
//!
//! Read once, before any page is visited. A missing file, malformed JSON or
//! a missing/empty field is a fatal startup error.

use super::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// Login and password for the portal session.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl Credentials {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }

    /// Load credentials from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::Credentials(format!("cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Parse credentials from JSON content.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let credentials: Self = serde_json::from_str(content)
            .map_err(|e| ConfigError::Credentials(e.to_string()))?;
        credentials.validate()?;
        Ok(credentials)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.login.trim().is_empty() {
            return Err(ConfigError::Credentials("'login' is empty".to_string()));
        }
        if self.password.is_empty() {
            return Err(ConfigError::Credentials("'password' is empty".to_string()));
        }
        Ok(())
    }
}

// Keep the password out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_credentials() {
        let creds = Credentials::from_json(r#"{"login": "admin", "password": "s3cret"}"#).unwrap();
        assert_eq!(creds.login, "admin");
        assert_eq!(creds.password, "s3cret");
    }

    #[test]
    fn missing_password_is_fatal() {
        let err = Credentials::from_json(r#"{"login": "admin"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Credentials(_)));
        assert!(err.to_string().contains("password"));
    }

    #[test]
    fn malformed_json_is_fatal() {
        let err = Credentials::from_json("login=admin").unwrap_err();
        assert!(matches!(err, ConfigError::Credentials(_)));
    }

    #[test]
    fn empty_login_is_fatal() {
        let err = Credentials::from_json(r#"{"login": " ", "password": "x"}"#).unwrap_err();
        assert!(err.to_string().contains("login"));
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = Credentials::from_file(dir.path().join("credentials")).unwrap_err();
        assert!(matches!(err, ConfigError::Credentials(_)));
    }

    #[test]
    fn debug_hides_password() {
        let creds = Credentials::new("admin", "s3cret");
        let rendered = format!("{:?}", creds);
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("s3cret"));
    }
}
