use thiserror::Error;

/// Errors returned while building a [`Scheduler`](crate::Scheduler).
///
/// Misuse of a running scheduler is not reported here: it panics.
#[derive(Debug, Error)]
pub enum Error {
    #[error("shared stack size {size} is below the minimum of {min} bytes")]
    StackTooSmall { size: usize, min: usize },

    #[error("initial slot capacity must be greater than zero")]
    ZeroCapacity,

    #[error("failed to map shared stack: {0}")]
    StackMap(#[from] nix::errno::Errno),
}
