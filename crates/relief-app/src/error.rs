use relief_core::error::DomainError;
use relief_core::ids::OverrideId;
use relief_core::schedule::TrackedOverride;
use relief_ports::error::PortError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Port(#[from] PortError),
    #[error("could not find override: {0}")]
    NotFound(OverrideId),
    #[error("override is not tracked")]
    NotTracked,
    /// The override was created but reading it back failed. Carries the
    /// state to keep tracking so the override is not orphaned.
    #[error("{source}")]
    ReadBack {
        tracked: Box<TrackedOverride>,
        source: Box<AppError>,
    },
}

impl AppError {
    /// True when the override should be dropped from tracked state rather
    /// than reported as a failure.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::ReadBack { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    /// State created before the failure, if any.
    pub fn tracked(&self) -> Option<&TrackedOverride> {
        match self {
            Self::ReadBack { tracked, .. } => Some(tracked.as_ref()),
            _ => None,
        }
    }
}
