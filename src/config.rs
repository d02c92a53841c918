// src/config.rs

use std::env;
use dotenvy::dotenv;

use crate::services::{THEME_STATS_TTL, TOPIC_DATA_TTL};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub theme_cache_ttl_secs: u64,
    pub topic_cache_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set");

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let theme_cache_ttl_secs = env::var("THEME_CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(THEME_STATS_TTL.as_secs());

        let topic_cache_ttl_secs = env::var("TOPIC_CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(TOPIC_DATA_TTL.as_secs());

        Self {
            database_url,
            rust_log,
            theme_cache_ttl_secs,
            topic_cache_ttl_secs,
        }
    }
}
