//! Resolved, invariant-safe configuration.
//!
//! Converts the optional, file-level configuration into concrete settings so
//! downstream code never handles `Option` defaults.
use std::time::Duration;

use probe_types::Thresholds;
use probe_webfetch::{FetchSettings, parse_base_url};

use crate::{ConfigError, HttpSection, ProbeConfig};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplaySettings {
    pub ascii_only: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    pub thresholds: Thresholds,
    pub fetch: FetchSettings,
    pub display: DisplaySettings,
}

impl ResolvedConfig {
    /// Resolve an optional config, filling gaps with the built-in defaults.
    pub fn from_config(config: Option<&ProbeConfig>) -> Result<Self, ConfigError> {
        let Some(config) = config else {
            return Ok(Self::default());
        };

        let thresholds = resolve_thresholds(config)?;
        let fetch = resolve_fetch(config)?;
        let display = DisplaySettings {
            ascii_only: config.display.as_ref().is_some_and(|d| d.ascii_only),
        };

        Ok(Self {
            thresholds,
            fetch,
            display,
        })
    }
}

fn resolve_thresholds(config: &ProbeConfig) -> Result<Thresholds, ConfigError> {
    let probe = config.probe.as_ref();
    let deadline = probe
        .and_then(|p| p.deadline_secs)
        .map_or(Thresholds::DEFAULT_DEADLINE, secs);

    match probe.and_then(|p| p.slow_threshold_secs) {
        Some(soft) => Ok(Thresholds::new(secs(soft), deadline)?),
        // Only the deadline was lowered: keep the warning reachable.
        None => Ok(Thresholds::with_deadline(deadline)?),
    }
}

fn resolve_fetch(config: &ProbeConfig) -> Result<FetchSettings, ConfigError> {
    let mut fetch = FetchSettings::default();

    if let Some(raw) = config.probe.as_ref().and_then(|p| p.base_url.as_deref()) {
        fetch.base_url = parse_base_url(raw.trim()).map_err(|e| ConfigError::Invalid {
            field: "probe.base_url",
            message: e.to_string(),
        })?;
    }

    if let Some(http) = config.http.as_ref() {
        apply_http(&mut fetch, http)?;
    }

    if fetch.base_url.scheme() == "http" && !fetch.allow_plain_http {
        return Err(ConfigError::Invalid {
            field: "probe.base_url",
            message: "plain http requires http.allow_plain_http = true".to_string(),
        });
    }

    Ok(fetch)
}

fn apply_http(fetch: &mut FetchSettings, http: &HttpSection) -> Result<(), ConfigError> {
    if let Some(timeout) = nonzero("http.timeout_secs", http.timeout_secs.map(u64::from))? {
        fetch.timeout = Duration::from_secs(timeout);
    }
    if let Some(connect) = nonzero(
        "http.connect_timeout_secs",
        http.connect_timeout_secs.map(u64::from),
    )? {
        fetch.connect_timeout = Duration::from_secs(connect);
    }
    if let Some(agent) = http
        .user_agent
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        fetch.user_agent = agent.to_string();
    }
    if let Some(max) = nonzero("http.max_download_bytes", http.max_download_bytes)? {
        fetch.max_download_bytes = max;
    }
    fetch.allow_plain_http = http.allow_plain_http;
    Ok(())
}

/// Unset passes through; an explicit zero is invalid.
fn nonzero(field: &'static str, value: Option<u64>) -> Result<Option<u64>, ConfigError> {
    match value {
        Some(0) => Err(ConfigError::Invalid {
            field,
            message: "must be greater than zero".to_string(),
        }),
        other => Ok(other),
    }
}

fn secs(value: u32) -> Duration {
    Duration::from_secs(u64::from(value))
}
