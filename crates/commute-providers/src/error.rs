use thiserror::Error;

/// Failures from external providers. Only rate limiting and transport
/// failures are worth retrying; a malformed payload or a non-429 status
/// will not get better on the next attempt.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider rate limited the request (HTTP 429)")]
    RateLimited,

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("provider returned HTTP {0}")]
    Status(u16),

    #[error("malformed provider response: {0}")]
    Malformed(String),

    #[error("retries exhausted after {attempts} attempts")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<ProviderError>,
    },
}

impl ProviderError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited | Self::Transport(_))
    }

    /// Map an HTTP status to the matching error variant.
    pub fn from_status(status: u16) -> Self {
        if status == 429 {
            Self::RateLimited
        } else {
            Self::Status(status)
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryability_classification() {
        assert!(ProviderError::RateLimited.is_retryable());
        assert!(ProviderError::Transport("connection reset".to_string()).is_retryable());
        assert!(!ProviderError::Status(500).is_retryable());
        assert!(!ProviderError::Malformed("missing results".to_string()).is_retryable());
    }

    #[test]
    fn status_429_maps_to_rate_limited() {
        assert!(matches!(
            ProviderError::from_status(429),
            ProviderError::RateLimited
        ));
        assert!(matches!(
            ProviderError::from_status(503),
            ProviderError::Status(503)
        ));
    }
}
