//! Configuration handling for the scrape service.
//!
//! All environment access happens here, once, at startup. The rest of
//! the pipeline receives an explicit [`FetchPolicy`] built from this
//! config and never reads the environment ad hoc.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

use crate::fetcher::{DEFAULT_USER_AGENT, FetchPolicy};

/// Environment variable names. Public so tests and deployment tooling
/// can refer to them.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_USER_AGENT: &str = "SCRAPE_USER_AGENT";
pub const ENV_TIMEOUT_MS: &str = "SCRAPE_TIMEOUT_MS";
pub const ENV_MAX_RETRIES: &str = "SCRAPE_MAX_RETRIES";
pub const ENV_BACKOFF_BASE_MS: &str = "SCRAPE_BACKOFF_BASE_MS";

/// Default development values used when environment variables are absent.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_BACKOFF_BASE_MS: u64 = 1_000;

/// The HTTP endpoint serves browser clients that already waited a
/// round-trip; give slower sites a longer single-attempt budget there.
const SERVER_TIMEOUT_MS: u64 = 15_000;

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    user_agent: String,
    timeout_ms: u64,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl Config {
    /// Create a new config explicitly.
    pub fn new(
        bind_addr: impl Into<String>,
        user_agent: impl Into<String>,
        timeout_ms: u64,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            user_agent: user_agent.into(),
            timeout_ms,
            max_retries,
            backoff_base_ms,
        }
    }

    /// Load from environment variables, falling back to development
    /// defaults. Fails only when a numeric variable is present but
    /// unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let user_agent =
            env::var(ENV_USER_AGENT).unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());
        let timeout_ms = env_parse(ENV_TIMEOUT_MS, DEFAULT_TIMEOUT_MS)?;
        let max_retries = env_parse(ENV_MAX_RETRIES, DEFAULT_MAX_RETRIES)?;
        let backoff_base_ms = env_parse(ENV_BACKOFF_BASE_MS, DEFAULT_BACKOFF_BASE_MS)?;
        Ok(Self {
            bind_addr,
            user_agent,
            timeout_ms,
            max_retries,
            backoff_base_ms,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
    pub fn backoff_base_ms(&self) -> u64 {
        self.backoff_base_ms
    }

    /// Policy for library-style callers.
    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy::default()
            .with_timeout(Duration::from_millis(self.timeout_ms))
            .with_max_retries(self.max_retries)
            .with_user_agent(self.user_agent.clone())
            .with_backoff_base(Duration::from_millis(self.backoff_base_ms))
    }

    /// Policy handed to the HTTP transport at startup.
    pub fn server_fetch_policy(&self) -> FetchPolicy {
        self.fetch_policy()
            .with_timeout(Duration::from_millis(SERVER_TIMEOUT_MS))
    }

    /// Development defaults (mirrors `from_env` with no env overrides).
    pub fn default() -> Self {
        Self::new(
            DEFAULT_BIND_ADDR,
            DEFAULT_USER_AGENT,
            DEFAULT_TIMEOUT_MS,
            DEFAULT_MAX_RETRIES,
            DEFAULT_BACKOFF_BASE_MS,
        )
    }
}

fn env_parse<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.parse().map_err(|err| ConfigError::InvalidValue {
            field: key,
            reason: format!("{err}"),
        }),
        Err(_) => Ok(default),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Ensure environment-variable manipulating tests run serially.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in [
            ENV_BIND_ADDR,
            ENV_USER_AGENT,
            ENV_TIMEOUT_MS,
            ENV_MAX_RETRIES,
            ENV_BACKOFF_BASE_MS,
        ] {
            unsafe {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn defaults_when_env_missing() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.bind_addr(), DEFAULT_BIND_ADDR);
        assert_eq!(cfg.user_agent(), DEFAULT_USER_AGENT);
        assert_eq!(cfg.timeout_ms(), DEFAULT_TIMEOUT_MS);
        assert_eq!(cfg.max_retries(), DEFAULT_MAX_RETRIES);
        assert_eq!(cfg.backoff_base_ms(), DEFAULT_BACKOFF_BASE_MS);
    }

    #[test]
    fn overrides_when_env_present() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_BIND_ADDR, "0.0.0.0:9000");
            env::set_var(ENV_USER_AGENT, "TestAgent/2.0");
            env::set_var(ENV_TIMEOUT_MS, "5000");
            env::set_var(ENV_MAX_RETRIES, "5");
            env::set_var(ENV_BACKOFF_BASE_MS, "250");
        }
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:9000");
        assert_eq!(cfg.user_agent(), "TestAgent/2.0");
        assert_eq!(cfg.timeout_ms(), 5000);
        assert_eq!(cfg.max_retries(), 5);
        assert_eq!(cfg.backoff_base_ms(), 250);
        clear_env();
    }

    #[test]
    fn unparseable_number_is_rejected() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_TIMEOUT_MS, "ten seconds");
        }
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains(ENV_TIMEOUT_MS));
        clear_env();
    }

    #[test]
    fn policies_reflect_config() {
        let cfg = Config::new("127.0.0.1:0", "Agent/1.0", 2_000, 4, 500);
        let policy = cfg.fetch_policy();
        assert_eq!(policy.timeout, Duration::from_millis(2_000));
        assert_eq!(policy.max_retries, 4);
        assert_eq!(policy.user_agent, "Agent/1.0");
        assert_eq!(policy.retry_backoff_base, Duration::from_millis(500));

        // The server transport raises only the timeout.
        let server_policy = cfg.server_fetch_policy();
        assert_eq!(server_policy.timeout, Duration::from_millis(15_000));
        assert_eq!(server_policy.max_retries, 4);
    }
}
