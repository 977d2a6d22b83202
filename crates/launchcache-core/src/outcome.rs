//! Values delivered to the consumer of an `Orchestrator`.

use thiserror::Error;

use crate::api::ApiError;
use crate::cache::StoreError;
use crate::connectivity::NoConnectivity;
use crate::models::Dataset;

/// Why a fetch or search ended without data.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("No network connectivity")]
    NoConnectivity,

    #[error("Remote fetch failed: {0}")]
    Remote(#[from] ApiError),

    #[error("Cached record unreadable: {0}")]
    PersistentTier(#[from] StoreError),

    /// `search` ran before anything was loaded into memory.
    #[error("Nothing cached yet - fetch before searching")]
    NotCached,
}

impl From<NoConnectivity> for FetchError {
    fn from(_: NoConnectivity) -> Self {
        FetchError::NoConnectivity
    }
}

#[derive(Debug)]
pub enum FetchOutcome {
    /// A slow path (remote fetch) has started.
    Progress,
    Success(Dataset),
    Failure(FetchError),
}

impl FetchOutcome {
    /// True for `Success` and `Failure`, the one final value of a call.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, FetchOutcome::Progress)
    }
}

impl From<Result<Dataset, FetchError>> for FetchOutcome {
    fn from(result: Result<Dataset, FetchError>) -> Self {
        match result {
            Ok(data) => FetchOutcome::Success(data),
            Err(e) => FetchOutcome::Failure(e),
        }
    }
}
