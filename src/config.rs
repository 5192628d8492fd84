//! `key = value` configuration files.

use std::collections::HashMap;
use std::path::Path;

use log::debug;

use crate::error::{CertmailError, Result};

/// Key holding the greeting used when a recipient has no name.
pub const GREETING_KEY: &str = "FIRST_LASTNAME";
pub const DEFAULT_GREETING: &str = "Sir or Madam";

/// Connection parameters for the mail server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub login: String,
}

/// Parsed configuration values.
///
/// Nothing is validated at load time; accessors report missing keys when
/// the value is actually needed.
#[derive(Debug, Clone, Default)]
pub struct Config {
    values: HashMap<String, String>,
}

impl Config {
    /// Loads a configuration file. The path must end in `.ini`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.extension().and_then(|e| e.to_str()) != Some("ini") {
            return Err(CertmailError::InvalidConfigFile(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content);
        debug!("Loaded {} configuration keys from {}", config.values.len(), path.display());
        Ok(config)
    }

    /// Parses configuration text.
    ///
    /// Lines starting with `#` are comments. Only lines with exactly one `=`
    /// are kept; a later duplicate key replaces an earlier one.
    pub fn parse(content: &str) -> Self {
        let mut values = HashMap::new();

        for line in content.lines() {
            if line.starts_with('#') {
                continue;
            }

            let mut parts = line.split('=');
            if let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) {
                values.insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        values
            .entry(GREETING_KEY.to_string())
            .or_insert_with(|| DEFAULT_GREETING.to_string());

        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| CertmailError::MissingConfigKey(key.to_string()))
    }

    pub fn greeting_fallback(&self) -> &str {
        self.get(GREETING_KEY).unwrap_or(DEFAULT_GREETING)
    }

    pub fn smtp_settings(&self) -> Result<SmtpSettings> {
        let port = self.require("PORT")?;
        let port = port
            .parse()
            .map_err(|_| CertmailError::InvalidPort(port.to_string()))?;

        Ok(SmtpSettings {
            host: self.require("HOST")?.to_string(),
            port,
            login: self.require("LOGIN")?.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_values() {
        let config = Config::parse("HOST = smtp.example.com\nPORT=587\n");
        assert_eq!(config.get("HOST"), Some("smtp.example.com"));
        assert_eq!(config.get("PORT"), Some("587"));
    }

    #[test]
    fn test_non_conforming_lines_are_ignored() {
        let config = Config::parse(
            "# HOST = commented.example.com\n\
             no separator here\n\
             URL = a=b\n\
             #SUBJECT=hidden\n\
             SUBJECT = Hi\n",
        );
        assert_eq!(config.get("SUBJECT"), Some("Hi"));
        assert!(config.get("HOST").is_none());
        assert!(config.get("# HOST").is_none());
        assert!(config.get("URL").is_none());
        assert!(config.get("no separator here").is_none());
        // SUBJECT + greeting default
        assert_eq!(config.values.len(), 2);
    }

    #[test]
    fn test_last_duplicate_wins() {
        let config = Config::parse("EVENT = First\nEVENT = Second\n");
        assert_eq!(config.get("EVENT"), Some("Second"));
    }

    #[test]
    fn test_greeting_default() {
        let config = Config::parse("");
        assert_eq!(config.greeting_fallback(), DEFAULT_GREETING);

        let config = Config::parse("FIRST_LASTNAME = colleague");
        assert_eq!(config.greeting_fallback(), "colleague");
    }

    #[test]
    fn test_smtp_settings() {
        let config = Config::parse("HOST = smtp.example.com\nPORT = 465\nLOGIN = a@example.com\n");
        let settings = config.smtp_settings().unwrap();
        assert_eq!(settings.host, "smtp.example.com");
        assert_eq!(settings.port, 465);
        assert_eq!(settings.login, "a@example.com");
    }

    #[test]
    fn test_invalid_port() {
        let config = Config::parse("HOST = h\nPORT = smtp\nLOGIN = l\n");
        assert!(matches!(
            config.smtp_settings(),
            Err(CertmailError::InvalidPort(p)) if p == "smtp"
        ));
    }

    #[test]
    fn test_missing_key() {
        let config = Config::parse("PORT = 587\n");
        assert!(matches!(
            config.require("HOST"),
            Err(CertmailError::MissingConfigKey(k)) if k == "HOST"
        ));
    }

    #[test]
    fn test_load_requires_ini_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.conf");
        std::fs::write(&path, "HOST = h\n").unwrap();
        assert!(matches!(
            Config::load(&path),
            Err(CertmailError::InvalidConfigFile(_))
        ));

        let path = dir.path().join("settings.ini");
        std::fs::write(&path, "HOST = h\n").unwrap();
        assert_eq!(Config::load(&path).unwrap().get("HOST"), Some("h"));
    }
}
