pub(crate) mod hide_unsafe;
pub(crate) mod panic;
pub(crate) mod ptr;

pub(crate) use hide_unsafe::*;
pub use panic::*;
pub(crate) use ptr::*;
