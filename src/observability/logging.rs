//! Logging configuration and utilities.

use std::collections::HashMap;

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Trace level.
    Trace = 0,
    /// Debug level.
    Debug = 1,
    /// Info level.
    Info = 2,
    /// Warning level.
    Warn = 3,
    /// Error level.
    Error = 4,
    /// Off (no logging).
    Off = 5,
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Info
    }
}

impl LogLevel {
    fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level.
    pub level: LogLevel,
    /// Emit JSON-formatted log lines.
    pub json_format: bool,
    /// Redact credentials from log output.
    pub redact_sensitive: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            json_format: false,
            redact_sensitive: true,
        }
    }
}

impl LogConfig {
    /// Creates a new log configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the log level.
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Enables JSON output.
    pub fn json(mut self) -> Self {
        self.json_format = true;
        self
    }

    /// Disables sensitive data redaction.
    pub fn no_redact(mut self) -> Self {
        self.redact_sensitive = false;
        self
    }
}

/// Installs a global `tracing` subscriber honoring the configuration and the
/// `RUST_LOG` environment variable. Call once at process startup; a second
/// call is a no-op.
pub fn init_tracing(config: &LogConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.level.as_filter()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if config.json_format {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}

/// Logger interface.
pub trait Logger: Send + Sync {
    /// Logs a message at the specified level.
    fn log(&self, level: LogLevel, message: &str, context: Option<&HashMap<String, String>>);

    /// Logs at debug level.
    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message, None);
    }

    /// Logs at info level.
    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, None);
    }

    /// Logs at warning level.
    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message, None);
    }

    /// Logs at error level.
    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message, None);
    }
}

/// Logger that forwards to the `tracing` subsystem.
pub struct ConsoleLogger {
    config: LogConfig,
}

impl ConsoleLogger {
    /// Creates a new console logger.
    pub fn new(config: LogConfig) -> Self {
        Self { config }
    }

    /// Creates with default configuration.
    pub fn default_config() -> Self {
        Self::new(LogConfig::default())
    }

    /// Redacts credential values from text.
    fn redact(&self, text: &str) -> String {
        if !self.config.redact_sensitive {
            return text.to_string();
        }
        redact_api_key(text)
    }
}

/// Masks the value of any `api_key=` pair in `text`.
fn redact_api_key(text: &str) -> String {
    let marker = "api_key=";
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(marker) {
        let value_start = pos + marker.len();
        result.push_str(&rest[..value_start]);
        result.push_str("***");

        let tail = &rest[value_start..];
        let value_end = tail
            .find(|c: char| c == '&' || c == ' ' || c == ',' || c == '"')
            .unwrap_or(tail.len());
        rest = &tail[value_end..];
    }
    result.push_str(rest);
    result
}

impl Logger for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str, context: Option<&HashMap<String, String>>) {
        if level < self.config.level {
            return;
        }

        let message = self.redact(message);
        let context = context
            .and_then(|ctx| serde_json::to_string(ctx).ok())
            .unwrap_or_default();

        match level {
            LogLevel::Trace => tracing::trace!(%context, "{}", message),
            LogLevel::Debug => tracing::debug!(%context, "{}", message),
            LogLevel::Info => tracing::info!(%context, "{}", message),
            LogLevel::Warn => tracing::warn!(%context, "{}", message),
            LogLevel::Error => tracing::error!(%context, "{}", message),
            LogLevel::Off => {}
        }
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::default_config()
    }
}

impl std::fmt::Debug for ConsoleLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleLogger")
            .field("config", &self.config)
            .finish()
    }
}

/// No-op logger that discards all messages.
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _level: LogLevel, _message: &str, _context: Option<&HashMap<String, String>>) {
        // Do nothing
    }
}

impl std::fmt::Debug for NoopLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoopLogger").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Off);
    }

    #[test]
    fn test_redact_api_key() {
        let text = "GET v1/search?api_key=lvs_secret_123&engine=google";
        let redacted = redact_api_key(text);
        assert_eq!(redacted, "GET v1/search?api_key=***&engine=google");
        assert!(!redacted.contains("lvs_secret_123"));
    }

    #[test]
    fn test_redact_preserves_plain_text() {
        let text = "cache hit for query";
        assert_eq!(redact_api_key(text), text);
    }

    #[test]
    fn test_no_redact_config() {
        let logger = ConsoleLogger::new(LogConfig::new().no_redact());
        let text = "api_key=lvs_visible";
        assert_eq!(logger.redact(text), text);
    }
}
