use crate::coroutine::{CoroutineId, Status};
use crate::scheduler::state::Core;
use crate::utils::Ptr;

/// The view of its [`Scheduler`](crate::Scheduler) a coroutine gets.
///
/// Every entry function receives a `&Handle`. It lets the coroutine yield, inspect the
/// scheduler and register more coroutines. A handle is only reachable inside the entry call,
/// so it can not outlive the scheduler.
pub struct Handle {
    core: Ptr<Core>,
}

impl Handle {
    pub(crate) fn new(core: &Core) -> Self {
        Self { core: Ptr::from(core) }
    }

    #[inline(always)]
    fn core(&self) -> &Core {
        unsafe { self.core.as_ref() }
    }

    /// Suspends this coroutine. It continues from here on its next
    /// [`resume`](crate::Scheduler::resume); everything on its stack is kept.
    ///
    /// # Example
    ///
    /// ```
    /// use costack::{Scheduler, Status};
    ///
    /// let scheduler = Scheduler::new();
    /// let id = scheduler.spawn(|co| {
    ///     for _ in 0..3 {
    ///         co.yield_now();
    ///     }
    /// });
    ///
    /// let mut resumes = 0;
    /// while scheduler.status(id) != Status::Dead {
    ///     scheduler.resume(id);
    ///     resumes += 1;
    /// }
    /// assert_eq!(resumes, 4);
    /// ```
    pub fn yield_now(&self) {
        self.core().yield_now();
    }

    /// The id of the calling coroutine.
    pub fn id(&self) -> CoroutineId {
        match self.core().running() {
            Some(id) => id,
            None => panic!("coroutine handle used while no coroutine is running"),
        }
    }

    /// See [`Scheduler::running`](crate::Scheduler::running).
    pub fn running(&self) -> Option<CoroutineId> {
        self.core().running()
    }

    /// See [`Scheduler::status`](crate::Scheduler::status).
    pub fn status(&self, id: CoroutineId) -> Status {
        self.core().status(id)
    }

    /// Registers a new coroutine from inside a running one. It starts on its first resume.
    pub fn register<A, F>(&self, entry: F, arg: A) -> CoroutineId
    where
        F: FnOnce(&Handle, A) + 'static,
        A: 'static,
    {
        self.spawn(move |co| entry(co, arg))
    }

    /// Like [`register`](Handle::register), with the argument captured by the closure.
    pub fn spawn<F>(&self, entry: F) -> CoroutineId
    where
        F: FnOnce(&Handle) + 'static,
    {
        self.core().insert(Box::new(entry))
    }

    /// Number of live coroutines, this one included.
    pub fn len(&self) -> usize {
        self.core().len()
    }

    /// Whether the scheduler has no live coroutines.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.core().capacity()
    }
}
