use std::{net::SocketAddr, str::FromStr, time::Duration};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub api_base_url: String,
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub request_timeout: Duration,
    pub default_page_size: u32,
    pub cache_stale_time: Duration,
    pub cache_gc_time: Duration,
    pub cors_allow: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("PD_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid PD_LISTEN_ADDR");
        let api_base_url = std::env::var("PD_API_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| "https://dummyjson.com".into());
        let cors_allow = std::env::var("PD_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Self {
            listen_addr,
            api_base_url,
            max_retries: env_or("PD_MAX_RETRIES", 3),
            retry_delay: Duration::from_millis(env_or("PD_RETRY_DELAY_MS", 1000)),
            request_timeout: Duration::from_millis(env_or("PD_REQUEST_TIMEOUT_MS", 30000)),
            default_page_size: env_or("PD_DEFAULT_PAGE_SIZE", 10),
            cache_stale_time: Duration::from_secs(env_or("PD_CACHE_STALE_SECS", 300)),
            cache_gc_time: Duration::from_secs(env_or("PD_CACHE_GC_SECS", 600)),
            cors_allow,
        }
    }
}

/// Parse a numeric variable, falling back to `default` when unset or invalid.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
