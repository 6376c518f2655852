//! # [`coroutine`]
//!
//! This module contains a description of the coroutine object stored by the scheduler.
//! It is not exposed: coroutines are created with [`Scheduler::register`](crate::Scheduler::register)
//! or [`Scheduler::spawn`](crate::Scheduler::spawn) and addressed by [`CoroutineId`].
//!
//! # [`status`]
//!
//! This module contains [`Status`] and [`CoroutineId`].

pub(crate) mod coroutine;
pub mod status;

pub(crate) use coroutine::*;
pub use status::*;
