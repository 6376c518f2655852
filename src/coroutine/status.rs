use std::fmt;

/// Identifier of a coroutine inside its [`Scheduler`](crate::Scheduler).
///
/// Ids are small indexes into the slot table. An id is reused after its coroutine has died.
pub type CoroutineId = usize;

/// The lifecycle state of a coroutine slot.
///
/// A coroutine is registered `Ready`, becomes `Running` on every resume, `Suspended` when it
/// yields, and `Dead` once its entry function returns.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Status {
    /// The slot is empty: the coroutine has finished, or the id was never registered.
    Dead = 0,
    /// Registered, never resumed.
    Ready = 1,
    /// Executing on the shared stack right now.
    Running = 2,
    /// Yielded. Its stack bytes live in its private buffer.
    Suspended = 3,
}

impl Status {
    /// The numeric code of the state: `0` for dead up to `3` for suspended.
    pub fn as_raw(self) -> u8 {
        self as u8
    }

    pub fn is_dead(self) -> bool {
        self == Status::Dead
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Dead => "dead",
            Status::Ready => "ready",
            Status::Running => "running",
            Status::Suspended => "suspended",
        };
        f.write_str(name)
    }
}
