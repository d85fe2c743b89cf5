//! Client configuration for the task dashboard backend.
//!
//! Values default to the dashboard's development setup and can be
//! overridden from `TASKDESK_*` environment variables.

use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Default backend location used by the dashboard in development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Storage key under which the in-progress task form is persisted locally.
pub const DEFAULT_DRAFT_STORAGE_KEY: &str = "taskDraft";

const BASE_URL_VAR: &str = "TASKDESK_BASE_URL";
const AUTOSAVE_VAR: &str = "TASKDESK_AUTOSAVE_SECS";
const UNREAD_POLL_VAR: &str = "TASKDESK_UNREAD_POLL_SECS";
const OUTBOX_REFRESH_VAR: &str = "TASKDESK_OUTBOX_REFRESH_SECS";
const TIMEOUT_VAR: &str = "TASKDESK_TIMEOUT_SECS";
const SESSION_COOKIE_VAR: &str = "TASKDESK_SESSION_COOKIE";

/// Errors raised while building a [`ClientConfig`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The backend base URL could not be parsed.
    #[error("invalid base URL '{value}': {reason}")]
    InvalidBaseUrl {
        /// Raw value supplied.
        value: String,
        /// Parser failure description.
        reason: String,
    },

    /// A duration variable was not a whole number of seconds.
    #[error("invalid value '{value}' for {variable}, expected whole seconds")]
    InvalidSeconds {
        /// Variable name.
        variable: &'static str,
        /// Raw value supplied.
        value: String,
    },

    /// A polling or autosave interval was zero.
    #[error("{0} must be greater than zero")]
    ZeroInterval(&'static str),
}

/// Runtime settings shared by the HTTP adapters and background timers.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use taskdesk::config::ClientConfig;
///
/// let config = ClientConfig::default();
/// assert_eq!(config.autosave_interval, Duration::from_secs(30));
/// assert_eq!(config.draft_storage_key, "taskDraft");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL; endpoint paths are resolved below its path.
    pub base_url: Url,
    /// Period of the silent draft autosave.
    pub autosave_interval: Duration,
    /// Period of the inbox unread-count poll.
    pub unread_poll_interval: Duration,
    /// Period of the outbox auto-refresh.
    pub outbox_refresh_interval: Duration,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Key used by local draft stores.
    pub draft_storage_key: String,
    /// Session cookie sent with every request, when the caller already holds one.
    pub session_cookie: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            autosave_interval: Duration::from_secs(30),
            unread_poll_interval: Duration::from_secs(30),
            outbox_refresh_interval: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
            draft_storage_key: DEFAULT_DRAFT_STORAGE_KEY.to_owned(),
            session_cookie: None,
        }
    }
}

#[expect(
    clippy::expect_used,
    reason = "the default URL is a compile-time constant known to parse"
)]
fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid")
}

impl ClientConfig {
    /// Creates a configuration pointing at `base_url` with default timings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] when the URL does not parse.
    pub fn for_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            ..Self::default()
        })
    }

    /// Builds a configuration from `TASKDESK_*` environment variables,
    /// falling back to defaults for unset variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is malformed or an interval
    /// is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is malformed or an interval
    /// is zero.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let base_url = match lookup(BASE_URL_VAR) {
            Some(raw) => parse_base_url(&raw)?,
            None => defaults.base_url,
        };
        let config = Self {
            base_url,
            autosave_interval: seconds_or(&lookup, AUTOSAVE_VAR, defaults.autosave_interval)?,
            unread_poll_interval: seconds_or(
                &lookup,
                UNREAD_POLL_VAR,
                defaults.unread_poll_interval,
            )?,
            outbox_refresh_interval: seconds_or(
                &lookup,
                OUTBOX_REFRESH_VAR,
                defaults.outbox_refresh_interval,
            )?,
            request_timeout: seconds_or(&lookup, TIMEOUT_VAR, defaults.request_timeout)?,
            draft_storage_key: defaults.draft_storage_key,
            session_cookie: lookup(SESSION_COOKIE_VAR).filter(|value| !value.trim().is_empty()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the autosave interval.
    #[must_use]
    pub const fn with_autosave_interval(mut self, interval: Duration) -> Self {
        self.autosave_interval = interval;
        self
    }

    /// Sets the session cookie forwarded on every request.
    #[must_use]
    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    /// Checks that every interval is non-zero.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroInterval`] naming the offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let intervals = [
            ("autosave interval", self.autosave_interval),
            ("unread poll interval", self.unread_poll_interval),
            ("outbox refresh interval", self.outbox_refresh_interval),
            ("request timeout", self.request_timeout),
        ];
        for (name, interval) in intervals {
            if interval.is_zero() {
                return Err(ConfigError::ZeroInterval(name));
            }
        }
        Ok(())
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|err| ConfigError::InvalidBaseUrl {
        value: raw.to_owned(),
        reason: err.to_string(),
    })
}

fn seconds_or(
    lookup: &impl Fn(&str) -> Option<String>,
    variable: &'static str,
    fallback: Duration,
) -> Result<Duration, ConfigError> {
    let Some(raw) = lookup(variable) else {
        return Ok(fallback);
    };
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::InvalidSeconds {
            variable,
            value: raw,
        })
}
