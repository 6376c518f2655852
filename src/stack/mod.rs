//! Memory the coroutines run on.
//!
//! [`SharedStack`] is the one region coroutines execute on. [`SavedStack`] holds the bytes of a
//! suspended coroutine. These are the only places that copy raw stack memory.

mod saved;
mod shared;

pub(crate) use saved::SavedStack;
pub(crate) use shared::SharedStack;
