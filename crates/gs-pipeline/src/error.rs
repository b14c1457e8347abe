//! Pipeline error types.

use thiserror::Error;

/// Failure reported by a data provider.  Providers own their transport
/// concerns (HTTP, files, retries); by the time an error reaches the
/// pipeline it is just a message attached to the provider kind.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ProviderError(pub String);

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors produced by the analysis pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Request parameters failed validation (propagated from `gs-core`).
    #[error(transparent)]
    InvalidParameter(#[from] gs_core::CoreError),

    /// A collaborator fetch failed.  The run aborts with no partial
    /// result; retries, if any, belong to the provider.
    #[error("upstream {provider} data unavailable: {source}")]
    Upstream {
        provider: &'static str,
        source: ProviderError,
    },

    /// The siting stage could not run (e.g. an empty Drive network).
    #[error(transparent)]
    Spatial(#[from] gs_spatial::SpatialError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
