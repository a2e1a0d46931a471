use thiserror::Error;

/// Errors from the pure domain model.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The elevation profile is not index-aligned with its path. A shorter
    /// profile would silently misalign grade segments, so the energy model
    /// rejects it outright.
    #[error("elevation profile length {profile} does not match path length {path}")]
    ProfileLengthMismatch { path: usize, profile: usize },
}
