use thiserror::Error;
use trendscore_core::StoreError;

#[derive(Debug, Error)]
pub enum ScoringError {
    /// The signal was malformed and never entered scoring.
    #[error("invalid signal '{name}': {reason}")]
    InvalidInput { name: String, reason: InvalidReason },

    /// A pricing invariant would have been violated. Treated as a contract
    /// breach by the caller, fatal to that one record.
    #[error("computation guard failed: {0}")]
    ComputationGuard(String),

    #[error(transparent)]
    Persistence(#[from] StoreError),
}

impl ScoringError {
    pub(crate) fn invalid(name: &str, reason: InvalidReason) -> Self {
        Self::InvalidInput {
            name: name.to_string(),
            reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidReason {
    #[error("name must be non-empty")]
    EmptyName,

    #[error("name already appears earlier in this batch")]
    DuplicateName,

    #[error("velocity must be a finite, non-negative number")]
    InvalidVelocity,

    #[error("{component} must not be negative")]
    NegativeCost { component: &'static str },

    #[error("{component} exceeds the maximum supported amount")]
    CostTooLarge { component: &'static str },

    #[error("break-even floor is zero; no positive price can be derived")]
    ZeroBreakEven,

    #[error("break-even floor is too small for a cent-resolution price ladder")]
    LadderCollapsed,
}
