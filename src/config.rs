//! Configuration module for the contact mailer.
//!
//! Configuration is read from an optional TOML file and then overridden from
//! environment variables. The resulting [`Config`] is built once at startup
//! and passed by reference to the components that need it.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::{MailerError, Result};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Deployment environment (development, staging, production).
    #[serde(default = "default_environment")]
    pub environment: String,
    /// Upper bound for handling one contact submission, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// SMTP relay configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    /// SMTP server hostname.
    #[serde(default = "default_smtp_host")]
    pub host: String,
    /// SMTP server port.
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    /// Username for authentication (usually the sending mailbox).
    #[serde(default)]
    pub username: String,
    /// Password for authentication.
    #[serde(default)]
    pub password: String,
    /// Sender address. Falls back to `username` when unset.
    #[serde(default)]
    pub sender: Option<String>,
    /// TLS mode: "starttls", "tls" or "none".
    #[serde(default = "default_smtp_tls")]
    pub tls: String,
    /// Connection timeout in seconds.
    #[serde(default = "default_smtp_timeout")]
    pub timeout_secs: u64,
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_smtp_tls() -> String {
    "starttls".to_string()
}

fn default_smtp_timeout() -> u64 {
    10
}

const SMTP_TLS_MODES: &[&str] = &["starttls", "tls", "none"];

impl SmtpConfig {
    /// Address used in the `From` header.
    pub fn sender_address(&self) -> &str {
        match &self.sender {
            Some(sender) if !sender.is_empty() => sender,
            _ => &self.username,
        }
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            sender: None,
            tls: default_smtp_tls(),
            timeout_secs: default_smtp_timeout(),
        }
    }
}

/// Contact delivery configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactConfig {
    /// Address that receives contact form emails.
    #[serde(default)]
    pub receiver: String,
    /// Prefix prepended to the submitted subject.
    #[serde(default = "default_subject_prefix")]
    pub subject_prefix: String,
}

fn default_subject_prefix() -> String {
    "[Portfolio Contact] ".to_string()
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            receiver: String::new(),
            subject_prefix: default_subject_prefix(),
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins. `*` allows any origin.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

/// Rate limit for the contact endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Requests allowed per client within one window.
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    /// Window length in seconds.
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

fn default_max_requests() -> u32 {
    2
}

fn default_window_secs() -> u64 {
    24 * 60 * 60
}

impl RateLimitConfig {
    /// Create a new rate limit configuration.
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs,
        }
    }

    /// Window as a duration.
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional log file. Console only when unset.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// SMTP configuration.
    #[serde(default)]
    pub smtp: SmtpConfig,
    /// Contact delivery configuration.
    #[serde(default)]
    pub contact: ContactConfig,
    /// CORS configuration.
    #[serde(default)]
    pub cors: CorsConfig,
    /// Rate limit configuration.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(MailerError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file (if it exists), apply environment
    /// variable overrides and validate the result.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = if path.as_ref().exists() {
            Self::load(path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| MailerError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `APP_HOST`, `APP_PORT`, `APP_ENV`
    /// - `SMTP_HOST`, `SMTP_PORT`, `SMTP_EMAIL` (or `SMTP_USERNAME`),
    ///   `SMTP_PASSWORD`, `SMTP_FROM`, `SMTP_TLS`, `SMTP_TIMEOUT`
    /// - `RECEIVER_EMAIL`
    /// - `ALLOWED_ORIGINS` (comma separated)
    /// - `RATE_LIMIT`, `RATE_LIMIT_WINDOW_SECS`, `RATE_LIMIT_EXPIRATION_HOURS`
    /// - `LOG_LEVEL`, `LOG_FILE`
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Empty values are ignored. Numeric values that fail to parse leave the
    /// current setting untouched.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("APP_HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("APP_PORT").and_then(|v| v.trim().parse().ok()) {
            self.server.port = port;
        }
        if let Some(env) = get("APP_ENV") {
            self.server.environment = env;
        }

        if let Some(host) = get("SMTP_HOST") {
            self.smtp.host = host;
        }
        if let Some(port) = get("SMTP_PORT").and_then(|v| v.trim().parse().ok()) {
            self.smtp.port = port;
        }
        if let Some(username) = get("SMTP_EMAIL").or_else(|| get("SMTP_USERNAME")) {
            self.smtp.username = username;
        }
        if let Some(password) = get("SMTP_PASSWORD") {
            self.smtp.password = password;
        }
        if let Some(sender) = get("SMTP_FROM") {
            self.smtp.sender = Some(sender);
        }
        if let Some(tls) = get("SMTP_TLS") {
            self.smtp.tls = tls.to_lowercase();
        }
        if let Some(timeout) = get("SMTP_TIMEOUT").and_then(|v| v.trim().parse().ok()) {
            self.smtp.timeout_secs = timeout;
        }

        if let Some(receiver) = get("RECEIVER_EMAIL") {
            self.contact.receiver = receiver;
        }

        if let Some(origins) = get("ALLOWED_ORIGINS") {
            self.cors.allowed_origins = parse_origins(&origins);
        }

        if let Some(max) = get("RATE_LIMIT").and_then(|v| v.trim().parse().ok()) {
            self.rate_limit.max_requests = max;
        }
        if let Some(secs) = get("RATE_LIMIT_EXPIRATION_HOURS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .and_then(|hours| hours.checked_mul(60 * 60))
        {
            self.rate_limit.window_secs = secs;
        }
        if let Some(secs) = get("RATE_LIMIT_WINDOW_SECS").and_then(|v| v.trim().parse().ok()) {
            self.rate_limit.window_secs = secs;
        }

        if let Some(level) = get("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(file) = get("LOG_FILE") {
            self.logging.file = Some(file);
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - SMTP username, password or the receiver address is missing
    /// - The SMTP TLS mode is unknown
    /// - The rate limit allows zero requests or has a zero-length window
    pub fn validate(&self) -> Result<()> {
        if self.smtp.username.is_empty() {
            return Err(MailerError::Config("SMTP_EMAIL is required".to_string()));
        }
        if self.smtp.password.is_empty() {
            return Err(MailerError::Config("SMTP_PASSWORD is required".to_string()));
        }
        if self.contact.receiver.is_empty() {
            return Err(MailerError::Config("RECEIVER_EMAIL is required".to_string()));
        }
        if !SMTP_TLS_MODES.contains(&self.smtp.tls.as_str()) {
            return Err(MailerError::Config(format!(
                "unknown SMTP TLS mode '{}' (expected starttls, tls or none)",
                self.smtp.tls
            )));
        }
        if self.rate_limit.max_requests == 0 {
            return Err(MailerError::Config(
                "rate limit must allow at least one request".to_string(),
            ));
        }
        if self.rate_limit.window_secs == 0 {
            return Err(MailerError::Config(
                "rate limit window must be at least one second".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether the service runs in production.
    pub fn is_production(&self) -> bool {
        self.server.environment == "production"
    }

    /// Whether the service runs in development.
    pub fn is_development(&self) -> bool {
        self.server.environment == "development"
    }

    /// Timeout for a single contact submission.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }
}

/// Split a comma separated origin list, trimming entries and dropping blanks.
fn parse_origins(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.smtp.username = "bot@example.com".to_string();
        config.smtp.password = "app-password".to_string();
        config.contact.receiver = "owner@example.com".to_string();
        config
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.environment, "development");
        assert_eq!(config.server.request_timeout_secs, 30);

        assert_eq!(config.smtp.host, "smtp.gmail.com");
        assert_eq!(config.smtp.port, 587);
        assert!(config.smtp.username.is_empty());
        assert!(config.smtp.password.is_empty());
        assert!(config.smtp.sender.is_none());
        assert_eq!(config.smtp.tls, "starttls");
        assert_eq!(config.smtp.timeout_secs, 10);

        assert!(config.contact.receiver.is_empty());
        assert_eq!(config.contact.subject_prefix, "[Portfolio Contact] ");

        assert_eq!(config.cors.allowed_origins, vec!["*".to_string()]);

        assert_eq!(config.rate_limit.max_requests, 2);
        assert_eq!(config.rate_limit.window_secs, 86400);

        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file.is_none());

        assert!(config.is_development());
        assert!(!config.is_production());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 8080
environment = "production"
request_timeout_secs = 15

[smtp]
host = "smtp.example.com"
port = 465
username = "bot@example.com"
password = "secret"
sender = "noreply@example.com"
tls = "tls"
timeout_secs = 5

[contact]
receiver = "owner@example.com"
subject_prefix = "[Site] "

[cors]
allowed_origins = ["https://example.com", "https://www.example.com"]

[rate_limit]
max_requests = 10
window_secs = 60

[logging]
level = "debug"
file = "logs/contact.log"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert!(config.is_production());
        assert_eq!(config.request_timeout(), Duration::from_secs(15));

        assert_eq!(config.smtp.host, "smtp.example.com");
        assert_eq!(config.smtp.port, 465);
        assert_eq!(config.smtp.sender_address(), "noreply@example.com");
        assert_eq!(config.smtp.tls, "tls");
        assert_eq!(config.smtp.timeout_secs, 5);

        assert_eq!(config.contact.receiver, "owner@example.com");
        assert_eq!(config.contact.subject_prefix, "[Site] ");

        assert_eq!(config.cors.allowed_origins.len(), 2);
        assert_eq!(config.cors.allowed_origins[0], "https://example.com");

        assert_eq!(config.rate_limit.max_requests, 10);
        assert_eq!(config.rate_limit.window(), Duration::from_secs(60));

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file.as_deref(), Some("logs/contact.log"));

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[smtp]
username = "bot@example.com"

[rate_limit]
max_requests = 5
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.smtp.username, "bot@example.com");
        assert_eq!(config.rate_limit.max_requests, 5);

        // Defaults
        assert_eq!(config.smtp.port, 587);
        assert_eq!(config.rate_limit.window_secs, 86400);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.smtp.host, "smtp.gmail.com");
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not valid toml [[[");

        assert!(result.is_err());
        if let Err(MailerError::Config(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");
        assert!(matches!(result, Err(MailerError::Io(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 4000\n\n[contact]\nreceiver = \"me@example.com\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.contact.receiver, "me@example.com");
    }

    #[test]
    fn test_sender_falls_back_to_username() {
        let mut config = valid_config();
        assert_eq!(config.smtp.sender_address(), "bot@example.com");

        config.smtp.sender = Some(String::new());
        assert_eq!(config.smtp.sender_address(), "bot@example.com");

        config.smtp.sender = Some("noreply@example.com".to_string());
        assert_eq!(config.smtp.sender_address(), "noreply@example.com");
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = Config::default();
        config.apply_overrides(lookup(&[
            ("APP_PORT", "9000"),
            ("APP_ENV", "production"),
            ("SMTP_HOST", "mail.example.com"),
            ("SMTP_PORT", "2525"),
            ("SMTP_EMAIL", "bot@example.com"),
            ("SMTP_PASSWORD", "secret"),
            ("SMTP_TLS", "NONE"),
            ("RECEIVER_EMAIL", "owner@example.com"),
            ("ALLOWED_ORIGINS", " https://a.example , https://b.example ,"),
            ("RATE_LIMIT", "10"),
            ("RATE_LIMIT_EXPIRATION_HOURS", "1"),
            ("LOG_LEVEL", "debug"),
        ]));

        assert_eq!(config.server.port, 9000);
        assert!(config.is_production());
        assert_eq!(config.smtp.host, "mail.example.com");
        assert_eq!(config.smtp.port, 2525);
        assert_eq!(config.smtp.username, "bot@example.com");
        assert_eq!(config.smtp.password, "secret");
        assert_eq!(config.smtp.tls, "none");
        assert_eq!(config.contact.receiver, "owner@example.com");
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert_eq!(config.rate_limit.max_requests, 10);
        assert_eq!(config.rate_limit.window_secs, 3600);
        assert_eq!(config.logging.level, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_apply_overrides_username_fallback() {
        let mut config = Config::default();
        config.apply_overrides(lookup(&[("SMTP_USERNAME", "legacy@example.com")]));
        assert_eq!(config.smtp.username, "legacy@example.com");

        config.apply_overrides(lookup(&[
            ("SMTP_EMAIL", "primary@example.com"),
            ("SMTP_USERNAME", "legacy@example.com"),
        ]));
        assert_eq!(config.smtp.username, "primary@example.com");
    }

    #[test]
    fn test_apply_overrides_window_secs_wins_over_hours() {
        let mut config = Config::default();
        config.apply_overrides(lookup(&[
            ("RATE_LIMIT_EXPIRATION_HOURS", "2"),
            ("RATE_LIMIT_WINDOW_SECS", "60"),
        ]));
        assert_eq!(config.rate_limit.window_secs, 60);
    }

    #[test]
    fn test_apply_overrides_overflowing_hours_keeps_window() {
        let mut config = Config::default();
        let hours = u64::MAX.to_string();
        config.apply_overrides(lookup(&[("RATE_LIMIT_EXPIRATION_HOURS", hours.as_str())]));
        assert_eq!(config.rate_limit.window_secs, 86400);
    }

    #[test]
    fn test_apply_overrides_ignores_empty_and_invalid() {
        let mut config = valid_config();
        config.apply_overrides(lookup(&[
            ("SMTP_PASSWORD", ""),
            ("SMTP_PORT", "not-a-port"),
            ("RATE_LIMIT", "-3"),
        ]));

        assert_eq!(config.smtp.password, "app-password");
        assert_eq!(config.smtp.port, 587);
        assert_eq!(config.rate_limit.max_requests, 2);
    }

    #[test]
    fn test_validate_missing_credentials() {
        let mut config = valid_config();
        config.smtp.username.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("SMTP_EMAIL"));

        let mut config = valid_config();
        config.smtp.password.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("SMTP_PASSWORD"));

        let mut config = valid_config();
        config.contact.receiver.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("RECEIVER_EMAIL"));
    }

    #[test]
    fn test_validate_rate_limit() {
        let mut config = valid_config();
        config.rate_limit.max_requests = 0;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.rate_limit.window_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_tls_mode() {
        let mut config = valid_config();
        config.smtp.tls = "ssl".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("ssl"));
    }

    #[test]
    fn test_validate_ok() {
        assert!(valid_config().validate().is_ok());
    }
}
