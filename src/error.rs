use std::collections::TryReserveError;

/// Ways a merge can fail. None of them leave a usable partial result behind.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("failed to allocate the output buffer: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("total length of the input runs overflows usize")]
    LengthOverflow,

    #[error("failed to build the merge thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T, E = MergeError> = std::result::Result<T, E>;
