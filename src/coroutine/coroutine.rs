//! This module contains a description of [`Coroutine`], the unit the scheduler stores in its slots.
use crate::coroutine::Status;
use crate::scheduler::Handle;
use crate::stack::SavedStack;
use crate::sys::Context;

/// The entry function of a coroutine. It receives the [`Handle`] of its scheduler.
pub(crate) type Entry = Box<dyn FnOnce(&Handle)>;

/// One suspendable unit of work.
///
/// The scheduler exclusively owns every coroutine; a coroutine exclusively owns its saved stack.
pub(crate) struct Coroutine {
    /// Taken by the trampoline on the first resume.
    entry: Option<Entry>,
    /// Meaningful only after the first resume.
    pub(crate) context: Context,
    pub(crate) saved: SavedStack,
    pub(crate) status: Status,
}

impl Coroutine {
    /// Creates a coroutine in [`Status::Ready`].
    pub(crate) fn new(entry: Entry) -> Self {
        Self {
            entry: Some(entry),
            context: Context::new(),
            saved: SavedStack::new(),
            status: Status::Ready,
        }
    }

    pub(crate) fn take_entry(&mut self) -> Option<Entry> {
        self.entry.take()
    }
}
