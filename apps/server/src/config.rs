use std::{net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use anyhow::Context;
use chrono::NaiveDate;
use nbp_fx_core::constants::{DEFAULT_LOAD_TIMEOUT, DEFAULT_WALK_BACK_DAYS};
use nbp_fx_market_data::provider::nbp::DEFAULT_BASE_URL;
use nbp_fx_market_data::DEFAULT_REFRESH_PERIOD;

/// Where the historical backfill starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoricSince {
    /// First day of the NBP table A archive.
    Beginning,
    Date(NaiveDate),
}

impl FromStr for HistoricSince {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("beginning") {
            return Ok(Self::Beginning);
        }
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map(Self::Date)
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub api_url: String,
    pub historic_since: Option<HistoricSince>,
    pub backup_dir: Option<PathBuf>,
    pub fallback_days: u32,
    pub load_timeout: Duration,
    pub refresh_period: Duration,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            api_url: DEFAULT_BASE_URL.to_string(),
            historic_since: None,
            backup_dir: None,
            fallback_days: DEFAULT_WALK_BACK_DAYS,
            load_timeout: DEFAULT_LOAD_TIMEOUT,
            refresh_period: DEFAULT_REFRESH_PERIOD,
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(30000),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr = parse_var("NBP_LISTEN_ADDR")?.unwrap_or(defaults.listen_addr);
        let api_url = std::env::var("NBP_API_URL").unwrap_or(defaults.api_url);
        let historic_since = parse_var("NBP_HISTORIC_SINCE")?;
        let backup_dir = std::env::var("NBP_BACKUP_DIR").ok().map(PathBuf::from);
        let fallback_days = parse_var("NBP_FALLBACK_DAYS")?.unwrap_or(defaults.fallback_days);
        let load_timeout = parse_var("NBP_LOAD_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.load_timeout);
        let refresh_period = parse_var::<u64>("NBP_REFRESH_PERIOD_MINS")?
            .map(|mins| Duration::from_secs(mins * 60))
            .unwrap_or(defaults.refresh_period);
        let cors_allow = std::env::var("NBP_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let request_timeout = parse_var("NBP_REQUEST_TIMEOUT_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.request_timeout);

        Ok(Self {
            listen_addr,
            api_url,
            historic_since,
            backup_dir,
            fallback_days,
            load_timeout,
            refresh_period,
            cors_allow,
            request_timeout,
        })
    }
}

/// Reads and parses `key`, treating an unset or blank variable as absent.
fn parse_var<T>(key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("Invalid {}: {}", key, value)),
        _ => Ok(None),
    }
}
