use crate::stats::{DEFAULT_LAG_DAYS, StatsConfig};
use crate::storage::resolve_data_path;
use chrono::Duration;
use std::{env, path::PathBuf, str::FromStr};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_YEAR_FROM: i32 = 2024;
pub const DEFAULT_CACHE_TTL_DAYS: i64 = 3;
pub const MAX_LAG_DAYS: u32 = 365;
pub const MAX_CACHE_TTL_DAYS: i64 = 3_650;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub api_base_url: String,
    pub year_from: i32,
    pub cache_ttl: Duration,
    pub stats: StatsConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, std::io::Error> {
        Ok(Self {
            port: env_or("PORT", DEFAULT_PORT),
            data_path: resolve_data_path()?,
            api_base_url: env::var("READING_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            year_from: env_or("READING_YEAR_FROM", DEFAULT_YEAR_FROM),
            cache_ttl: cache_ttl(env::var("READING_CACHE_TTL_DAYS").ok()),
            stats: StatsConfig {
                lag_days: lag_days(env::var("READING_LAG_DAYS").ok()),
                apply_lag_cutoff: env_or("READING_LAG_CUTOFF", true),
            },
        })
    }
}

fn lag_days(raw: Option<String>) -> u32 {
    parse_or("READING_LAG_DAYS", raw, DEFAULT_LAG_DAYS).min(MAX_LAG_DAYS)
}

fn cache_ttl(raw: Option<String>) -> Duration {
    let days = parse_or("READING_CACHE_TTL_DAYS", raw, DEFAULT_CACHE_TTL_DAYS);
    Duration::days(days.clamp(0, MAX_CACHE_TTL_DAYS))
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    parse_or(key, env::var(key).ok(), default)
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring invalid {key}={value:?}");
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lag_days_are_capped() {
        assert_eq!(lag_days(None), DEFAULT_LAG_DAYS);
        assert_eq!(lag_days(Some(" 5 ".to_string())), 5);
        assert_eq!(lag_days(Some("4000000000".to_string())), MAX_LAG_DAYS);
        assert_eq!(lag_days(Some("-1".to_string())), DEFAULT_LAG_DAYS);
    }

    #[test]
    fn cache_ttl_is_clamped() {
        assert_eq!(cache_ttl(None), Duration::days(DEFAULT_CACHE_TTL_DAYS));
        assert_eq!(cache_ttl(Some("0".to_string())), Duration::zero());
        assert_eq!(cache_ttl(Some("-7".to_string())), Duration::zero());
        assert_eq!(
            cache_ttl(Some(i64::MAX.to_string())),
            Duration::days(MAX_CACHE_TTL_DAYS)
        );
        assert_eq!(cache_ttl(Some("soon".to_string())), Duration::days(DEFAULT_CACHE_TTL_DAYS));
    }
}
