use crate::model::{ConfigError, HotelQuery};
use crate::utils::parse_date;
use chrono::{Days, Local};
use serde::Deserialize;
use std::env;
use std::fs;
use std::time::Duration;
use tracing::{info, warn};

const API_KEY_VAR: &str = "HOTEL_API_KEY";
const API_HOST_VAR: &str = "HOTEL_API_HOST";

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_host")]
    pub api_host: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_min_interval")]
    pub min_request_interval_ms: u64,
    #[serde(default = "default_retry_delay")]
    pub rate_limit_retry_ms: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_host: default_api_host(),
            api_key: String::new(),
            min_request_interval_ms: default_min_interval(),
            rate_limit_retry_ms: default_retry_delay(),
            max_retries: default_max_retries(),
            request_timeout_secs: default_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn min_request_interval(&self) -> Duration {
        Duration::from_millis(self.min_request_interval_ms)
    }

    pub fn rate_limit_retry(&self) -> Duration {
        Duration::from_millis(self.rate_limit_retry_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_base_url() -> String {
    "https://booking-com15.p.rapidapi.com/api/v1/hotels".to_string()
}

fn default_api_host() -> String {
    "booking-com15.p.rapidapi.com".to_string()
}

fn default_min_interval() -> u64 {
    1000
}

fn default_retry_delay() -> u64 {
    2000
}

fn default_max_retries() -> u32 {
    3
}

fn default_timeout() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    pub destination: String,
    #[serde(default = "default_requested_count")]
    pub requested_count: usize,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    #[serde(default = "default_adults")]
    pub adults: u32,
    #[serde(default = "default_rooms")]
    pub rooms: u32,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub hotel_id: Option<String>,
}

fn default_requested_count() -> usize {
    3
}

fn default_adults() -> u32 {
    2
}

fn default_rooms() -> u32 {
    1
}

fn default_currency() -> String {
    "USD".to_string()
}

impl QueryConfig {
    /// Resolves dates: missing check-in is today, missing check-out is the day after check-in.
    pub fn to_query(&self) -> Result<HotelQuery, ConfigError> {
        let check_in = match &self.check_in {
            Some(s) => parse_date(s).ok_or_else(|| ConfigError::Invalid(format!("bad check_in date: {s}")))?,
            None => Local::now().date_naive(),
        };
        let check_out = match &self.check_out {
            Some(s) => parse_date(s).ok_or_else(|| ConfigError::Invalid(format!("bad check_out date: {s}")))?,
            None => check_in
                .checked_add_days(Days::new(1))
                .ok_or_else(|| ConfigError::Invalid("check_in out of range".into()))?,
        };
        if check_out <= check_in {
            return Err(ConfigError::Invalid(format!(
                "check_out {check_out} is not after check_in {check_in} for {}",
                self.destination
            )));
        }

        Ok(HotelQuery {
            destination: self.destination.clone(),
            requested_count: self.requested_count,
            check_in,
            check_out,
            adults: self.adults,
            rooms: self.rooms,
            currency: self.currency.clone(),
            detail_hotel_id: self.hotel_id.clone(),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    pub queries: Vec<QueryConfig>,
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config = parse_config(&content)?;
    apply_env_overrides(&mut config.api);
    Ok(config)
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    if config.queries.is_empty() {
        return Err(ConfigError::Invalid("no queries configured".into()));
    }
    Ok(config)
}

fn apply_env_overrides(api: &mut ApiConfig) {
    if let Some(key) = var(API_KEY_VAR) {
        info!("Using API key from {API_KEY_VAR}");
        api.api_key = key;
    } else if api.api_key.is_empty() {
        warn!("{API_KEY_VAR} not set and no api_key in config; upstream calls will likely fail");
    }
    if let Some(host) = var(API_HOST_VAR) {
        info!("Using API host from {API_HOST_VAR}: {host}");
        api.api_host = host;
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn defaults_fill_missing_fields() {
        let config = parse_config(r#"{ "queries": [{ "destination": "Paris" }] }"#).unwrap();
        assert_eq!(config.api.min_request_interval_ms, 1000);
        assert_eq!(config.api.rate_limit_retry_ms, 2000);
        assert_eq!(config.api.max_retries, 3);
        assert_eq!(config.api.api_host, "booking-com15.p.rapidapi.com");

        let q = &config.queries[0];
        assert_eq!(q.requested_count, 3);
        assert_eq!(q.adults, 2);
        assert_eq!(q.rooms, 1);
        assert_eq!(q.currency, "USD");
    }

    #[test]
    fn missing_dates_default_to_one_night() {
        let config = parse_config(r#"{ "queries": [{ "destination": "Paris" }] }"#).unwrap();
        let query = config.queries[0].to_query().unwrap();
        assert_eq!(query.check_out, query.check_in.checked_add_days(Days::new(1)).unwrap());
    }

    #[test]
    fn explicit_dates_are_parsed() {
        let config = parse_config(
            r#"{
                "api": { "api_key": "k", "max_retries": 1 },
                "queries": [{ "destination": "Rome", "check_in": "2024-09-27", "check_out": "2024-09-29", "requested_count": 5 }]
            }"#,
        )
        .unwrap();
        assert_eq!(config.api.max_retries, 1);
        let query = config.queries[0].to_query().unwrap();
        assert_eq!(query.check_in, NaiveDate::from_ymd_opt(2024, 9, 27).unwrap());
        assert_eq!(query.check_out, NaiveDate::from_ymd_opt(2024, 9, 29).unwrap());
        assert_eq!(query.requested_count, 5);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        assert!(matches!(parse_config(r#"{ "queries": [] }"#), Err(ConfigError::Invalid(_))));
        assert!(matches!(parse_config("not json"), Err(ConfigError::Parse(_))));

        let config = parse_config(
            r#"{ "queries": [{ "destination": "Rome", "check_in": "2024-09-27", "check_out": "2024-09-27" }] }"#,
        )
        .unwrap();
        assert!(matches!(config.queries[0].to_query(), Err(ConfigError::Invalid(_))));

        let config = parse_config(r#"{ "queries": [{ "destination": "Rome", "check_in": "soon" }] }"#).unwrap();
        assert!(config.queries[0].to_query().is_err());
    }
}
