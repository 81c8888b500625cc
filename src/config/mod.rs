//! Configuration module for the screen catalog.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::cache::DEFAULT_CACHE_CAPACITY;
use crate::models::PlatformRule;

/// Apps per browse page.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key guarding the reload endpoint (unset = open)
    pub api_psk: Option<String>,
    /// Path to the CMS snapshot JSON file
    pub snapshot_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Apps per browse page
    pub page_size: usize,
    /// Maximum number of memoized views per view kind
    pub cache_capacity: usize,
    /// How screens are assigned to mobile/desktop
    pub platform_rule: PlatformRule,
}

fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_psk = env::var("CATALOG_API_PSK").ok().filter(|k| !k.is_empty());

        let snapshot_path = env::var("CATALOG_SNAPSHOT_PATH")
            .unwrap_or_else(|_| "./data/snapshot.json".to_string())
            .into();

        let bind_addr = env::var("CATALOG_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid CATALOG_BIND_ADDR format");

        let log_level = env::var("CATALOG_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_json = parse_or("CATALOG_LOG_JSON", false);

        let page_size = parse_or("CATALOG_PAGE_SIZE", DEFAULT_PAGE_SIZE).max(1);
        let cache_capacity = parse_or("CATALOG_CACHE_CAPACITY", DEFAULT_CACHE_CAPACITY).max(1);

        let platform_rule = env::var("CATALOG_PLATFORM_RULE")
            .ok()
            .and_then(|v| PlatformRule::parse(&v))
            .unwrap_or_default();

        Self {
            api_psk,
            snapshot_path,
            bind_addr,
            log_level,
            log_json,
            page_size,
            cache_capacity,
            platform_rule,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 8] = [
        "CATALOG_API_PSK",
        "CATALOG_SNAPSHOT_PATH",
        "CATALOG_BIND_ADDR",
        "CATALOG_LOG_LEVEL",
        "CATALOG_LOG_JSON",
        "CATALOG_PAGE_SIZE",
        "CATALOG_CACHE_CAPACITY",
        "CATALOG_PLATFORM_RULE",
    ];

    // Both cases share process env, so they run in one test.
    #[test]
    fn test_config_from_env() {
        for var in VARS {
            env::remove_var(var);
        }

        let config = Config::from_env();
        assert!(config.api_psk.is_none());
        assert_eq!(config.snapshot_path, PathBuf::from("./data/snapshot.json"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
        assert_eq!(config.platform_rule, PlatformRule::Flag);

        env::set_var("CATALOG_PAGE_SIZE", "24");
        env::set_var("CATALOG_CACHE_CAPACITY", "not-a-number");
        env::set_var("CATALOG_PLATFORM_RULE", "flag-with-tag-fallback");
        env::set_var("CATALOG_API_PSK", "");
        env::set_var("CATALOG_LOG_JSON", "true");

        let config = Config::from_env();
        assert_eq!(config.page_size, 24);
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
        assert_eq!(config.platform_rule, PlatformRule::FlagWithTagFallback);
        assert!(config.api_psk.is_none());
        assert!(config.log_json);

        for var in VARS {
            env::remove_var(var);
        }
    }
}
