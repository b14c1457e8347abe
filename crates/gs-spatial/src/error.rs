//! Spatial-subsystem error type.

use thiserror::Error;

/// Errors produced by `gs-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// The Drive network has no nodes, so candidates cannot be snapped.
    #[error("road network is empty; cannot snap candidate sites")]
    EmptyNetwork,
}

pub type SpatialResult<T> = Result<T, SpatialError>;
