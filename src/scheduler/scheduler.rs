use std::fmt;
use crate::cfg::SchedulerCfg;
use crate::coroutine::{CoroutineId, Status};
use crate::error::Error;
use crate::scheduler::state::Core;
use crate::scheduler::Handle;
use crate::utils::Ptr;

/// The scheduler works with coroutines. Specifically, it:
///
/// - owns the shared stack every coroutine runs on;
///
/// - stores the coroutines in a slot table, addressed by [`CoroutineId`];
///
/// - switches into a coroutine on [`resume`](Scheduler::resume) and back out when it yields or returns.
///
/// It is driven by one thread and is neither `Send` nor `Sync`. All methods take `&self`: a
/// running coroutine reaches the same scheduler through its [`Handle`] while the caller of
/// `resume` is still inside that call.
pub struct Scheduler {
    core: Ptr<Core>,
}

impl Scheduler {
    /// Creates a scheduler with a 1 MiB shared stack and 16 slots.
    ///
    /// # Panics
    ///
    /// If the shared stack can not be mapped.
    pub fn new() -> Self {
        Self::with_config(SchedulerCfg::new()).expect("failed to create scheduler")
    }

    /// Creates a scheduler with the given configuration.
    pub fn with_config(cfg: SchedulerCfg) -> Result<Self, Error> {
        Ok(Self {
            core: Ptr::new(Core::new(&cfg)?),
        })
    }

    #[inline(always)]
    fn core(&self) -> &Core {
        unsafe { self.core.as_ref() }
    }

    /// Registers `entry` as a new coroutine in [`Status::Ready`] and returns its id.
    /// `arg` is handed to `entry` on the first resume.
    ///
    /// # Example
    ///
    /// ```
    /// use costack::{Handle, Scheduler};
    ///
    /// fn count_to(co: &Handle, limit: u32) {
    ///     for i in 0..limit {
    ///         println!("coroutine {}: {}", co.id(), i);
    ///         co.yield_now();
    ///     }
    /// }
    ///
    /// let scheduler = Scheduler::new();
    /// let id = scheduler.register(count_to, 3);
    /// while !scheduler.status(id).is_dead() {
    ///     scheduler.resume(id);
    /// }
    /// ```
    pub fn register<A, F>(&self, entry: F, arg: A) -> CoroutineId
    where
        F: FnOnce(&Handle, A) + 'static,
        A: 'static,
    {
        self.spawn(move |co| entry(co, arg))
    }

    /// Registers a closure as a new coroutine and returns its id.
    pub fn spawn<F>(&self, entry: F) -> CoroutineId
    where
        F: FnOnce(&Handle) + 'static,
    {
        self.core().insert(Box::new(entry))
    }

    /// Runs coroutine `id` until it yields or returns.
    ///
    /// A ready coroutine starts its entry function, a suspended one continues after its last
    /// [`yield_now`](Handle::yield_now). Resuming an id whose slot is empty does nothing.
    ///
    /// A panic inside the coroutine finishes it and is raised again from here.
    ///
    /// # Panics
    ///
    /// - if a coroutine of this scheduler is running, e.g. when called from inside one;
    ///
    /// - if `id` is not below [`capacity`](Scheduler::capacity).
    pub fn resume(&self, id: CoroutineId) {
        self.core().resume(id);
    }

    /// The state of coroutine `id`. Ids that were never registered are [`Status::Dead`].
    pub fn status(&self, id: CoroutineId) -> Status {
        self.core().status(id)
    }

    /// The id of the running coroutine, or `None` when control is outside of every coroutine.
    pub fn running(&self) -> Option<CoroutineId> {
        self.core().running()
    }

    /// Number of live coroutines.
    pub fn len(&self) -> usize {
        self.core().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots. It starts at [`SchedulerCfg::initial_capacity`] and doubles when full.
    pub fn capacity(&self) -> usize {
        self.core().capacity()
    }

    /// Usable size of the shared stack in bytes.
    pub fn stack_size(&self) -> usize {
        self.core().stack_size()
    }

    /// Bytes of stack saved by coroutine `id` when it last yielded, if it is suspended.
    pub fn stack_usage(&self, id: CoroutineId) -> Option<usize> {
        self.core().stack_usage(id)
    }

    /// Destroys the scheduler and every live coroutine. Same as dropping it.
    ///
    /// Ready coroutines drop their entry function. Values owned by the stack of a suspended
    /// coroutine are leaked: their destructors never run.
    pub fn close(self) {
        drop(self);
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        if let Some(id) = self.running() {
            panic!("scheduler dropped while coroutine {id} is running");
        }

        unsafe { self.core.drop_in_place() };
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("running", &self.running())
            .field("stack_size", &self.stack_size())
            .finish()
    }
}
