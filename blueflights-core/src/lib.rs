pub mod offer;
pub mod place;
pub mod repository;
pub mod search;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Failure of an outbound call to the travel-data provider.
///
/// `Provider` carries whatever diagnostic JSON the upstream returned so it can
/// be surfaced to the caller instead of being swallowed.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream transport error: {0}")]
    Transport(String),
    #[error("upstream returned status {status}")]
    Provider {
        status: u16,
        details: serde_json::Value,
    },
    #[error("unexpected upstream payload: {0}")]
    Decode(String),
}
