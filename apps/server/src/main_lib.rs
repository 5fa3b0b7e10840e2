use std::sync::Arc;

use crate::config::Config;
use profiledeck_profiles::{
    CacheConfig, HttpTransport, ProfileClient, ProfileFeed, ProfileLookup, ProfileTransport,
    QueryCache, RetryConfig,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub feed: ProfileFeed,
    pub lookup: ProfileLookup,
    pub cache: Arc<QueryCache>,
    pub default_page_size: u32,
}

pub fn init_tracing() {
    let log_format = std::env::var("PD_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let transport = HttpTransport::new(&config.api_base_url, config.request_timeout);
    tracing::info!("Upstream profile API: {}", transport.base_url());
    build_state_with_transport(config, Arc::new(transport))
}

/// Build the shared state around an arbitrary transport.
pub fn build_state_with_transport(
    config: &Config,
    transport: Arc<dyn ProfileTransport>,
) -> anyhow::Result<Arc<AppState>> {
    if config.default_page_size == 0 {
        anyhow::bail!("PD_DEFAULT_PAGE_SIZE must be at least 1");
    }

    let client = ProfileClient::new(transport)
        .with_retry(RetryConfig::new(config.max_retries, config.retry_delay));
    let feed = ProfileFeed::new(client);

    let cache = Arc::new(QueryCache::new(CacheConfig {
        stale_time: config.cache_stale_time,
        gc_time: config.cache_gc_time,
    }));
    let lookup = ProfileLookup::new(feed.clone(), cache.clone());

    Ok(Arc::new(AppState {
        feed,
        lookup,
        cache,
        default_page_size: config.default_page_size,
    }))
}

/// Resolve on Ctrl-C, then tear down the query cache.
pub async fn shutdown_signal(state: Arc<AppState>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down, clearing query cache");
    state.cache.teardown();
}
