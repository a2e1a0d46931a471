//! Shared application state injected into all routes.

use crate::config::Config;
use commute_core::StaticCatalog;
use commute_providers::{ElevationCache, ElevationSampler, Geocoder, OrsClient, RetryPolicy, Router};
use std::sync::Arc;

pub struct AppState {
    pub config: Config,
    pub geocoder: Arc<dyn Geocoder>,
    pub router: Arc<dyn Router>,
    pub sampler: ElevationSampler,
    pub catalog: StaticCatalog,
}

impl AppState {
    /// Wire up production providers from config. The elevation cache lives
    /// as long as the process and is shared across all requests.
    pub fn from_config(config: Config) -> Self {
        let ors = Arc::new(OrsClient::new(&config.ors_base_url, &config.ors_api_key));
        let cache = Arc::new(ElevationCache::new());
        let sampler = ElevationSampler::new(
            Arc::new(commute_providers::OpenElevationClient::new(
                &config.elevation_primary_url,
            )),
            cache,
        )
        .with_fallback(Arc::new(commute_providers::ElevationApiClient::new(
            &config.elevation_fallback_url,
        )))
        .with_chunking(config.elevation_chunk_size, config.elevation_chunk_delay)
        .with_retry_policy(RetryPolicy {
            max_attempts: config.elevation_retry_attempts,
            base_delay: config.elevation_retry_base_delay,
        });

        Self {
            config,
            geocoder: ors.clone(),
            router: ors,
            sampler,
            catalog: StaticCatalog::default(),
        }
    }

    /// Assemble state from explicit collaborators (used by tests).
    pub fn new(
        config: Config,
        geocoder: Arc<dyn Geocoder>,
        router: Arc<dyn Router>,
        sampler: ElevationSampler,
        catalog: StaticCatalog,
    ) -> Self {
        Self {
            config,
            geocoder,
            router,
            sampler,
            catalog,
        }
    }
}
