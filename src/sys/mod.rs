//! Execution-context primitive.
//!
//! A [`Context`] captures a flow of control (registers, stack pointer, signal mask) and can be
//! bound to a fresh stack and entry function. The scheduler only uses three operations:
//!
//! - [`Context::capture`] records the caller's state without transferring control;
//! - [`Context::bind`] makes the next switch to the context start `entry` on a given stack, and
//!   continue at another context when `entry` returns;
//! - [`Context::swap`] saves the caller into one context and continues another.
//!
//! [`swapcontext`] is the same switch without a wrapper frame, for the yield path.

cfg_if::cfg_if! {
    if #[cfg(all(
        target_os = "linux",
        target_env = "gnu",
        any(target_arch = "x86_64", target_arch = "aarch64"),
    ))] {
        mod unix;
        pub(crate) use unix::{swapcontext, Context};
    } else {
        compile_error!("costack supports only Linux with glibc on x86_64 and aarch64");
    }
}
