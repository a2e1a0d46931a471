//! The elevation sampler: maps a densified path to an elevation profile of
//! identical length while minimizing upstream calls.
//!
//! Lookup is cache-first on quantized keys; cache misses are fetched in
//! fixed-size chunks with pacing between chunks, per-chunk retry with
//! exponential backoff, and a secondary provider as a last resort. If a
//! point cannot be resolved by either provider the whole call fails.
//! Returning a profile shorter than the path would silently misalign the
//! grade computation downstream.

use crate::cache::{CacheKey, ElevationCache};
use crate::elevation::ElevationProvider;
use crate::error::ProviderError;
use crate::retry::{with_retry, RetryPolicy};
use commute_core::Coordinate;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

pub const DEFAULT_CHUNK_SIZE: usize = 50;
pub const DEFAULT_CHUNK_DELAY: Duration = Duration::from_secs(2);

pub struct ElevationSampler {
    primary: Arc<dyn ElevationProvider>,
    fallback: Option<Arc<dyn ElevationProvider>>,
    cache: Arc<ElevationCache>,
    chunk_size: usize,
    chunk_delay: Duration,
    retry: RetryPolicy,
}

impl ElevationSampler {
    pub fn new(primary: Arc<dyn ElevationProvider>, cache: Arc<ElevationCache>) -> Self {
        Self {
            primary,
            fallback: None,
            cache,
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_delay: DEFAULT_CHUNK_DELAY,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_fallback(mut self, fallback: Arc<dyn ElevationProvider>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn with_chunking(mut self, chunk_size: usize, chunk_delay: Duration) -> Self {
        self.chunk_size = chunk_size.max(1);
        self.chunk_delay = chunk_delay;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Resolve one elevation per path point, in path order.
    ///
    /// The result is always exactly as long as `path`; cached and freshly
    /// fetched values are interleaved back into original positions even
    /// though fetches happen chunked in cache-miss order.
    pub async fn sample(&self, path: &[Coordinate]) -> Result<Vec<f64>, ProviderError> {
        let mut resolved: Vec<Option<f64>> = path.iter().map(|p| self.cache.get(*p)).collect();

        // Deduplicate misses on the quantized key so a coordinate is
        // fetched at most once per call no matter how often it appears.
        let mut pending: Vec<Coordinate> = Vec::new();
        let mut indices_by_key: HashMap<CacheKey, Vec<usize>> = HashMap::new();
        for (idx, point) in path.iter().enumerate() {
            if resolved[idx].is_some() {
                continue;
            }
            let slots = indices_by_key.entry(CacheKey::quantize(*point)).or_default();
            if slots.is_empty() {
                pending.push(*point);
            }
            slots.push(idx);
        }

        if pending.is_empty() {
            tracing::debug!("all {} elevation points served from cache", path.len());
            return finalize(resolved);
        }

        tracing::debug!(
            "{} of {} elevation points cached, fetching {}",
            path.len() - indices_by_key.values().map(Vec::len).sum::<usize>(),
            path.len(),
            pending.len()
        );

        let total_chunks = pending.len().div_ceil(self.chunk_size);
        for (chunk_no, chunk) in pending.chunks(self.chunk_size).enumerate() {
            let values = self.fetch_chunk(chunk).await?;

            for (point, value) in chunk.iter().zip(values) {
                self.cache.insert(*point, value);
                if let Some(slots) = indices_by_key.get(&CacheKey::quantize(*point)) {
                    for &idx in slots {
                        resolved[idx] = Some(value);
                    }
                }
            }

            // Pacing toward the provider, not after the last chunk.
            if chunk_no + 1 < total_chunks {
                tracing::debug!("chunk {}/{} done, pacing", chunk_no + 1, total_chunks);
                sleep(self.chunk_delay).await;
            }
        }

        finalize(resolved)
    }

    async fn fetch_chunk(&self, points: &[Coordinate]) -> Result<Vec<f64>, ProviderError> {
        let primary_err = match with_retry(&self.retry, || self.primary.elevations(points)).await {
            Ok(values) => return Ok(values),
            Err(err) => err,
        };

        let Some(fallback) = &self.fallback else {
            return Err(primary_err);
        };

        tracing::warn!(
            "{} failed for {} points, trying {}: {}",
            self.primary.name(),
            points.len(),
            fallback.name(),
            primary_err
        );

        with_retry(&self.retry, || fallback.elevations(points))
            .await
            .map_err(|fallback_err| {
                tracing::error!(
                    "both elevation providers failed: {} / {}",
                    primary_err,
                    fallback_err
                );
                fallback_err
            })
    }
}

fn finalize(resolved: Vec<Option<f64>>) -> Result<Vec<f64>, ProviderError> {
    resolved
        .into_iter()
        .map(|value| {
            value.ok_or_else(|| {
                ProviderError::Malformed("elevation point left unresolved".to_string())
            })
        })
        .collect()
}
