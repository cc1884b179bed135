use std::collections::TryReserveError;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictError {
    #[error("[Dict]Allocation Failed")]
    AllocationFailed,
    #[error("[Dict]Capacity Exhausted At {capacity} Buckets")]
    CapacityExhausted { capacity: usize },
    #[error("[Dict]Key Not Found")]
    NotFound,
}

impl DictError {
    /// True for the failures that leave an insertion undone: allocation
    /// failure and refusal to grow past the last schedule stage.
    pub fn is_allocation(&self) -> bool {
        matches!(
            self,
            DictError::AllocationFailed | DictError::CapacityExhausted { .. }
        )
    }
}

impl From<TryReserveError> for DictError {
    fn from(_: TryReserveError) -> Self {
        DictError::AllocationFailed
    }
}
