use std::any::Any;
use std::cell::{Cell, UnsafeCell};
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::ptr;
use log::{debug, trace};
use crate::cfg::SchedulerCfg;
use crate::coroutine::{Coroutine, CoroutineId, Entry, Status};
use crate::error::Error;
use crate::scheduler::Handle;
use crate::stack::SharedStack;
use crate::sys::{self, Context};
use crate::utils::{hide_mut_unsafe, hide_unsafe, Ptr};

thread_local! {
    /// The core whose fresh coroutine is about to start on this thread.
    /// Set by [`Core::resume`] right before the first switch, taken by [`trampoline`].
    static STARTING: Cell<*const Core> = const { Cell::new(ptr::null()) };
}

/// Entry point of every coroutine context. It runs on the shared stack.
///
/// When it returns, the context continues at the scheduler's main context.
extern "C" fn trampoline() {
    let core = STARTING.with(|starting| starting.replace(ptr::null()));
    if core.is_null() {
        panic!("[BUG] coroutine started without a scheduler. Please report this issue.");
    }

    let core = unsafe { &*core };
    match core.running.get() {
        Some(id) => core.run(id),
        None => panic!("[BUG] coroutine started while the scheduler is idle. Please report this issue."),
    }
}

/// State of a scheduler, shared by the [`Scheduler`](crate::Scheduler) that owns it and the
/// [`Handle`]s of its coroutines.
///
/// It is heap allocated and never moves, because coroutine contexts link back to `main`.
/// Only one flow of control touches it at a time, so plain cells are enough.
pub(crate) struct Core {
    stack: SharedStack,
    /// Where a suspended or finished coroutine continues: inside [`Core::resume`].
    main: Context,
    slots: UnsafeCell<Vec<Option<Ptr<Coroutine>>>>,
    count: Cell<usize>,
    running: Cell<Option<CoroutineId>>,
    /// Panic of the last coroutine, re-raised by the `resume` that drove it.
    panic: Cell<Option<Box<dyn Any + Send>>>,
}

impl Core {
    pub(crate) fn new(cfg: &SchedulerCfg) -> Result<Self, Error> {
        cfg.validate()?;

        let stack = SharedStack::new(cfg.stack_size())?;
        let mut slots = Vec::with_capacity(cfg.initial_capacity());
        slots.resize_with(cfg.initial_capacity(), || None);
        debug!(
            "scheduler opened: {} bytes of shared stack, {} slots",
            stack.size(),
            slots.len()
        );

        Ok(Self {
            stack,
            main: Context::new(),
            slots: UnsafeCell::new(slots),
            count: Cell::new(0),
            running: Cell::new(None),
            panic: Cell::new(None),
        })
    }

    #[inline(always)]
    fn slot(&self, id: CoroutineId) -> Option<Ptr<Coroutine>> {
        hide_unsafe(&self.slots).get(id).copied().flatten()
    }

    pub(crate) fn capacity(&self) -> usize {
        hide_unsafe(&self.slots).len()
    }

    pub(crate) fn len(&self) -> usize {
        self.count.get()
    }

    pub(crate) fn running(&self) -> Option<CoroutineId> {
        self.running.get()
    }

    pub(crate) fn stack_size(&self) -> usize {
        self.stack.size()
    }

    pub(crate) fn status(&self, id: CoroutineId) -> Status {
        match self.slot(id) {
            Some(co) => unsafe { co.as_ref() }.status,
            None => Status::Dead,
        }
    }

    pub(crate) fn stack_usage(&self, id: CoroutineId) -> Option<usize> {
        let co = unsafe { self.slot(id)?.as_ref() };
        if co.status == Status::Suspended {
            Some(co.saved.len())
        } else {
            None
        }
    }

    /// Stores a new coroutine and returns its id.
    ///
    /// A full table doubles and the coroutine takes the first new slot. Otherwise the search for
    /// an empty slot starts at `count` and wraps, so recently freed low ids are not the first
    /// ones reused.
    pub(crate) fn insert(&self, entry: Entry) -> CoroutineId {
        let slots = hide_mut_unsafe(&self.slots);
        let count = self.count.get();
        let capacity = slots.len();

        let id = if count >= capacity {
            slots.resize_with(capacity * 2, || None);
            debug!("slot table grown from {} to {} slots", capacity, slots.len());
            capacity
        } else {
            let free = (0..capacity)
                .map(|offset| (offset + count) % capacity)
                .find(|&id| slots[id].is_none());
            match free {
                Some(id) => id,
                None => unreachable!("[BUG] {count} coroutines in {capacity} slots, but no slot is free"),
            }
        };

        slots[id] = Some(Ptr::new(Coroutine::new(entry)));
        self.count.set(count + 1);
        trace!("coroutine {id} registered");
        id
    }

    /// Switches to coroutine `id` and returns once it yields or finishes.
    pub(crate) fn resume(&self, id: CoroutineId) {
        if let Some(running) = self.running.get() {
            panic!("cannot resume coroutine {id} while coroutine {running} is running");
        }

        let capacity = self.capacity();
        assert!(id < capacity, "coroutine id {id} is out of range, the slot table holds {capacity}");

        let co = match self.slot(id) {
            Some(co) => co,
            None => {
                trace!("resume of dead coroutine {id} ignored");
                return;
            }
        };

        let target = {
            let co = unsafe { co.as_mut() };
            match co.status {
                Status::Ready => {
                    let bound = unsafe {
                        co.context.bind(self.stack.bottom(), self.stack.size(), trampoline, &self.main)
                    };
                    if let Err(err) = bound {
                        panic!("failed to create the context of coroutine {id}: {err}");
                    }
                    STARTING.with(|starting| starting.set(self));
                }
                Status::Suspended => unsafe { co.saved.restore(self.stack.top()) },
                status => panic!("cannot resume coroutine {id}: it is {status}"),
            }

            co.status = Status::Running;
            co.context.raw()
        };

        trace!("coroutine {id} resumed");
        self.running.set(Some(id));
        unsafe { Context::swap(self.main.raw(), target) };

        if let Some(payload) = self.panic.take() {
            panic::resume_unwind(payload);
        }
    }

    /// Suspends the running coroutine and continues the `resume` that started it.
    pub(crate) fn yield_now(&self) {
        let id = match self.running.get() {
            Some(id) => id,
            None => panic!("yield_now called while no coroutine is running"),
        };

        let co = match self.slot(id) {
            Some(co) => co,
            None => panic!("[BUG] running coroutine {id} has no slot. Please report this issue."),
        };

        trace!("coroutine {id} yields");
        unsafe { self.suspend(co) };
    }

    /// Saves the live part of the shared stack and switches to `main`.
    ///
    /// The switch is made from this frame, with no wrapper in between, and the copy starts
    /// below it (inside [`SavedStack::save`](crate::stack::SavedStack::save)), so the frame control returns into is restored
    /// whole. Values written to this frame after the save are lost; only the result of the
    /// switch is read once it returns.
    #[inline(never)]
    unsafe fn suspend(&self, co: Ptr<Coroutine>) {
        let co = unsafe { co.as_mut() };
        let save_into = co.context.raw().as_ptr();
        let switch_to = self.main.raw().as_ptr();

        unsafe { co.saved.save(self.stack.top(), self.stack.size()) };
        co.status = Status::Suspended;
        self.running.set(None);

        if unsafe { sys::swapcontext(save_into, switch_to) } == -1 {
            panic!("swapcontext failed: {}", io::Error::last_os_error());
        }
    }

    /// Body of a coroutine: runs its entry function to the end, then retires it.
    fn run(&self, id: CoroutineId) {
        let entry = self.slot(id).and_then(|co| unsafe { co.as_mut() }.take_entry());

        if let Some(entry) = entry {
            let handle = Handle::new(self);
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| entry(&handle))) {
                trace!("coroutine {id} panicked");
                self.panic.set(Some(payload));
            }
        }

        self.retire(id);
    }

    fn retire(&self, id: CoroutineId) {
        if let Some(co) = hide_mut_unsafe(&self.slots)[id].take() {
            unsafe { co.drop_in_place() };
            self.count.set(self.count.get() - 1);
        }

        self.running.set(None);
        trace!("coroutine {id} finished");
    }
}

impl Drop for Core {
    fn drop(&mut self) {
        let live = self.count.get();
        for co in self.slots.get_mut().drain(..).flatten() {
            unsafe { co.drop_in_place() };
        }

        debug!("scheduler closed with {live} live coroutines");
    }
}
