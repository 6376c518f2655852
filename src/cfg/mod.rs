use crate::error::Error;

/// Default size of the shared stack: 1 MiB.
pub const DEFAULT_STACK_SIZE: usize = 1024 * 1024;
/// Smallest shared stack accepted by [`SchedulerCfg::validate`].
pub const MIN_STACK_SIZE: usize = 16 * 1024;
/// Number of coroutine slots a new scheduler starts with.
pub const DEFAULT_CAPACITY: usize = 16;

/// Construction options of a [`Scheduler`](crate::Scheduler).
///
/// # Example
///
/// ```
/// use costack::{Scheduler, SchedulerCfg};
///
/// let cfg = SchedulerCfg::new()
///     .with_stack_size(256 * 1024)
///     .with_initial_capacity(4);
/// let scheduler = Scheduler::with_config(cfg).unwrap();
/// assert_eq!(scheduler.capacity(), 4);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SchedulerCfg {
    stack_size: usize,
    initial_capacity: usize,
}

impl SchedulerCfg {
    pub const fn new() -> Self {
        Self {
            stack_size: DEFAULT_STACK_SIZE,
            initial_capacity: DEFAULT_CAPACITY,
        }
    }

    /// Sets the size of the shared stack. It bounds the deepest call stack a coroutine may reach.
    /// The size is rounded up to a whole number of pages when the stack is mapped.
    pub const fn with_stack_size(mut self, stack_size: usize) -> Self {
        self.stack_size = stack_size;
        self
    }

    /// Sets the number of slots the slot table starts with. The table doubles when full.
    pub const fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn stack_size(&self) -> usize {
        self.stack_size
    }

    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.stack_size < MIN_STACK_SIZE {
            return Err(Error::StackTooSmall { size: self.stack_size, min: MIN_STACK_SIZE });
        }

        if self.initial_capacity == 0 {
            return Err(Error::ZeroCapacity);
        }

        Ok(())
    }
}

impl Default for SchedulerCfg {
    fn default() -> Self {
        Self::new()
    }
}
