//! Client configuration.

use std::{env, fmt, str::FromStr, time::Duration};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use url::Url;

use transmission_rpc_types::TransmissionError;

/// Default number of retries after a 409 before giving up.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default pause between a 409 and its retry.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);

/// Scheme used to reach the daemon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Protocol {
    /// Plain HTTP.
    #[default]
    Http,
    /// HTTP over TLS.
    Https,
}

impl Protocol {
    /// The URL scheme.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = TransmissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            other => Err(TransmissionError::Config(format!(
                "unsupported protocol: {other}"
            ))),
        }
    }
}

/// How often, and how far apart, a request is retried after the session token is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Retries allowed after the first attempt. `0` fails on the first 409.
    pub max_retries: u32,
    /// Pause between a 409 and the next attempt.
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

/// Connection settings for a Transmission daemon.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Daemon host name.
    pub hostname: String,
    /// Daemon RPC port.
    pub port: u16,
    /// URL scheme.
    pub protocol: Protocol,
    /// Path of the RPC endpoint.
    pub pathname: String,
    /// Basic auth user name.
    pub username: String,
    /// Basic auth password.
    pub password: String,
    /// Session retry policy.
    pub retry: RetryConfig,
    /// Bound on each HTTP exchange, enforced by the transport.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            hostname: "localhost".to_string(),
            port: 9091,
            protocol: Protocol::Http,
            pathname: "/transmission/rpc".to_string(),
            username: "transmission".to_string(),
            password: "transmission".to_string(),
            retry: RetryConfig::default(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Reads the configuration from `TRANSMISSION_*` environment variables, falling back to the
    /// defaults for unset ones.
    pub fn from_env() -> Result<Self, TransmissionError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`], with a custom variable lookup.
    ///
    /// Recognized keys: `TRANSMISSION_HOSTNAME`, `TRANSMISSION_PORT`, `TRANSMISSION_PROTOCOL`,
    /// `TRANSMISSION_PATHNAME`, `TRANSMISSION_USERNAME`, `TRANSMISSION_PASSWORD`,
    /// `TRANSMISSION_MAX_RETRIES`, `TRANSMISSION_RETRY_DELAY_MS` and
    /// `TRANSMISSION_TIMEOUT_SECS`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, TransmissionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(hostname) = lookup("TRANSMISSION_HOSTNAME") {
            config.hostname = hostname;
        }
        if let Some(port) = lookup("TRANSMISSION_PORT") {
            config.port = parse_var("TRANSMISSION_PORT", &port)?;
        }
        if let Some(protocol) = lookup("TRANSMISSION_PROTOCOL") {
            config.protocol = protocol.parse()?;
        }
        if let Some(pathname) = lookup("TRANSMISSION_PATHNAME") {
            config.pathname = pathname;
        }
        if let Some(username) = lookup("TRANSMISSION_USERNAME") {
            config.username = username;
        }
        if let Some(password) = lookup("TRANSMISSION_PASSWORD") {
            config.password = password;
        }
        if let Some(max_retries) = lookup("TRANSMISSION_MAX_RETRIES") {
            config.retry.max_retries = parse_var("TRANSMISSION_MAX_RETRIES", &max_retries)?;
        }
        if let Some(delay) = lookup("TRANSMISSION_RETRY_DELAY_MS") {
            config.retry.delay =
                Duration::from_millis(parse_var("TRANSMISSION_RETRY_DELAY_MS", &delay)?);
        }
        if let Some(timeout) = lookup("TRANSMISSION_TIMEOUT_SECS") {
            config.timeout = Some(Duration::from_secs(parse_var(
                "TRANSMISSION_TIMEOUT_SECS",
                &timeout,
            )?));
        }

        Ok(config)
    }

    /// The full URL of the RPC endpoint.
    pub fn endpoint(&self) -> Result<Url, TransmissionError> {
        let origin = format!("{}://{}:{}", self.protocol, self.hostname, self.port);
        let mut url = Url::parse(&origin)
            .map_err(|e| TransmissionError::Config(format!("Invalid RPC URL {origin}: {e}")))?;
        url.set_path(&self.pathname);
        Ok(url)
    }

    /// The `Authorization` header value for the configured credentials.
    pub fn authorization(&self) -> String {
        basic_auth(&self.username, &self.password)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("hostname", &self.hostname)
            .field("port", &self.port)
            .field("protocol", &self.protocol)
            .field("pathname", &self.pathname)
            .field("username", &self.username)
            .field("password", &"***")
            .field("retry", &self.retry)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Builds a `Basic` authorization header value.
pub fn basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

fn parse_var<T>(key: &str, value: &str) -> Result<T, TransmissionError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| TransmissionError::Config(format!("invalid {key} {value:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = ClientConfig::default();

        assert_eq!(
            config.endpoint().unwrap().as_str(),
            "http://localhost:9091/transmission/rpc"
        );
        assert_eq!(config.retry.max_retries, 3);
        assert_eq!(config.retry.delay, Duration::from_secs(1));
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn default_authorization() {
        assert_eq!(
            ClientConfig::default().authorization(),
            "Basic dHJhbnNtaXNzaW9uOnRyYW5zbWlzc2lvbg=="
        );
        assert_eq!(basic_auth("user", "pass"), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn reads_variables() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("TRANSMISSION_HOSTNAME", "seedbox.lan"),
            ("TRANSMISSION_PORT", "443"),
            ("TRANSMISSION_PROTOCOL", "HTTPS"),
            ("TRANSMISSION_PATHNAME", "/rpc"),
            ("TRANSMISSION_USERNAME", "user"),
            ("TRANSMISSION_PASSWORD", "pass"),
            ("TRANSMISSION_MAX_RETRIES", "0"),
            ("TRANSMISSION_RETRY_DELAY_MS", "250"),
            ("TRANSMISSION_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();

        assert_eq!(config.endpoint().unwrap().as_str(), "https://seedbox.lan/rpc");
        assert_eq!(config.authorization(), "Basic dXNlcjpwYXNz");
        assert_eq!(
            config.retry,
            RetryConfig {
                max_retries: 0,
                delay: Duration::from_millis(250),
            }
        );
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn rejects_bad_values() {
        let err = ClientConfig::from_lookup(lookup(&[("TRANSMISSION_PORT", "ninety")]))
            .unwrap_err();
        assert!(err.to_string().contains("TRANSMISSION_PORT"));

        let err = ClientConfig::from_lookup(lookup(&[("TRANSMISSION_PROTOCOL", "ftp")]))
            .unwrap_err();
        assert!(err.to_string().contains("unsupported protocol: ftp"));
    }

    #[test]
    fn invalid_hostname_is_a_config_error() {
        let config = ClientConfig {
            hostname: "not a host".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.endpoint(),
            Err(TransmissionError::Config(msg)) if msg.contains("Invalid RPC URL")
        ));
    }

    #[test]
    fn debug_redacts_password() {
        let config = ClientConfig {
            password: "hunter2".to_string(),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("***"));
    }
}
