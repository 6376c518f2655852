//! Cooperative single-threaded coroutines on one shared stack.
//!
//! Every coroutine of a [`Scheduler`] runs on the same bounded stack region. When a coroutine
//! yields, the live part of that region is copied into a private buffer owned by the coroutine,
//! and copied back just before it is resumed.
//!
//! # Example
//!
//! ```
//! use costack::{Scheduler, Status};
//!
//! let scheduler = Scheduler::new();
//! let id = scheduler.spawn(|co| {
//!     println!("first half");
//!     co.yield_now();
//!     println!("second half");
//! });
//!
//! scheduler.resume(id);
//! assert_eq!(scheduler.status(id), Status::Suspended);
//! scheduler.resume(id);
//! assert_eq!(scheduler.status(id), Status::Dead);
//! ```

pub mod cfg;
pub mod coroutine;
pub mod error;
pub mod macros;
pub mod scheduler;
pub(crate) mod stack;
pub(crate) mod sys;
pub(crate) mod utils;

pub use cfg::SchedulerCfg;
pub use coroutine::{CoroutineId, Status};
pub use error::Error;
pub use scheduler::{Handle, Scheduler};
pub use utils::set_panic_hook;
