//! External-service plumbing for the commute pipeline: geocoding and
//! routing against OpenRouteService, elevation lookup against a primary
//! and a fallback provider, plus the retry policy and process-wide
//! elevation cache shared by all of them.

pub mod cache;
pub mod elevation;
pub mod error;
pub mod geocode;
pub mod retry;
pub mod sampler;

pub use cache::ElevationCache;
pub use elevation::{ElevationApiClient, ElevationProvider, OpenElevationClient};
pub use error::ProviderError;
pub use geocode::{Geocoder, OrsClient, Router};
pub use retry::{with_retry, RetryPolicy};
pub use sampler::ElevationSampler;
