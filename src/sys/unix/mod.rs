mod ucontext;

pub(crate) use ucontext::{swapcontext, Context};
