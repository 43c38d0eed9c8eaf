//! Naming transform tables.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Abbreviations kept together when converting identifiers to file stems.
///
/// Matching walks the list in order and takes the first hit, so a prefix
/// (`HTTP`) listed before a longer word (`HTTPS`) wins when both fit.
const DEFAULT_ABBREVIATIONS: &[&str] = &[
    "ID", "UUID", "URL", "URI", "API", "HTTP", "HTTPS", "JSON", "XML", "CSV", "SQL", "DB", "TCP",
    "UDP", "IP", "DNS", "SSH", "TLS", "SSL", "JWT", "AWS", "GCP", "CPU", "GPU", "RAM", "ROM", "IO",
    "EOF", "TTL", "CDN", "HTML", "CSS", "JS", "MD5", "SHA", "RSA", "AES", "UTF", "ASCII", "CRUD",
    "REST", "RPC", "GRPC", "MQTT", "AMQP", "SMTP", "IMAP", "POP", "SDK", "CLI", "GUI", "UI", "UX",
    "OS", "VM", "PDF", "PNG", "JPG", "GIF",
];

fn default_abbreviations() -> Vec<String> {
    DEFAULT_ABBREVIATIONS.iter().map(ToString::to_string).collect()
}

fn default_test_prefix() -> String {
    "Test".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NamingConfig {
    /// Upper-case abbreviations, in match priority order.
    #[serde(default = "default_abbreviations")]
    pub abbreviations: Vec<String>,

    /// Prefix of test functions.
    #[serde(default = "default_test_prefix")]
    pub test_prefix: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            abbreviations: default_abbreviations(),
            test_prefix: default_test_prefix(),
        }
    }
}

impl NamingConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if let Some(bad) = self
            .abbreviations
            .iter()
            .find(|abbr| abbr.is_empty() || abbr.chars().any(char::is_lowercase))
        {
            return Err(ConfigError::invalid(
                "naming.abbreviations",
                format!("'{bad}' must be non-empty and upper-case"),
            ));
        }
        if self.test_prefix.is_empty() {
            return Err(ConfigError::invalid("naming.test_prefix", "must not be empty"));
        }
        Ok(())
    }
}
