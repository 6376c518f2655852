use std::cell::UnsafeCell;
use std::io;
use std::mem;
use libc::{c_void, ucontext_t};

/// Address of the saved state of a [`Context`].
///
/// Switching goes through this handle so that no reference to the owning [`Context`] is held
/// while the other side runs; a coroutine may free its own context before control comes back.
#[derive(Copy, Clone)]
pub(crate) struct RawContext(*mut ucontext_t);

impl RawContext {
    #[inline(always)]
    pub(crate) fn as_ptr(self) -> *mut ucontext_t {
        self.0
    }
}

/// The switch itself, without a Rust frame around it.
///
/// A caller that saves its own stack before switching must call this directly: the saved
/// state returns into the frame that made the call, so that frame has to be part of the copy.
pub(crate) use libc::swapcontext;

/// A saved `ucontext_t`.
///
/// glibc keeps pointers into the structure itself (the floating point area on x86_64), so the
/// raw context lives in its own allocation and never moves after it has been captured.
pub(crate) struct Context {
    raw: Box<UnsafeCell<ucontext_t>>,
}

impl Context {
    /// Creates an empty context. It is meaningless until captured, bound or swapped into.
    pub(crate) fn new() -> Self {
        Self {
            raw: Box::new(UnsafeCell::new(unsafe { mem::zeroed() })),
        }
    }

    #[inline(always)]
    fn as_ptr(&self) -> *mut ucontext_t {
        self.raw.get()
    }

    #[inline(always)]
    pub(crate) fn raw(&self) -> RawContext {
        RawContext(self.as_ptr())
    }

    /// Records the state of the caller without transferring control.
    pub(crate) fn capture(&self) -> io::Result<()> {
        if unsafe { libc::getcontext(self.as_ptr()) } == -1 {
            return Err(io::Error::last_os_error());
        }

        Ok(())
    }

    /// Rewrites this context so that the next switch to it runs `entry` on the stack
    /// `[stack, stack + stack_size)`, and continues at `on_exit` once `entry` returns.
    ///
    /// # Safety
    ///
    /// The stack must stay mapped and unused by anything else while the context runs, and
    /// `on_exit` must outlive every switch into this context.
    pub(crate) unsafe fn bind(
        &self,
        stack: *mut u8,
        stack_size: usize,
        entry: extern "C" fn(),
        on_exit: &Context,
    ) -> io::Result<()> {
        self.capture()?;

        let raw = unsafe { &mut *self.as_ptr() };
        raw.uc_stack.ss_sp = stack as *mut c_void;
        raw.uc_stack.ss_size = stack_size;
        raw.uc_stack.ss_flags = 0;
        raw.uc_link = on_exit.as_ptr();
        unsafe { libc::makecontext(raw, entry, 0) };

        Ok(())
    }

    /// Saves the caller into `save_into` and continues `switch_to`. Returns when some later
    /// switch targets `save_into`.
    ///
    /// This adds a frame of its own below the caller. Code that copies its stack away before
    /// switching uses [`swapcontext`] instead.
    ///
    /// # Panics
    ///
    /// If the switch itself fails. The flow of control is lost at that point.
    ///
    /// # Safety
    ///
    /// `switch_to` must hold a captured, bound or previously saved context whose stack contents
    /// are in place.
    pub(crate) unsafe fn swap(save_into: RawContext, switch_to: RawContext) {
        if unsafe { libc::swapcontext(save_into.0, switch_to.0) } == -1 {
            panic!("swapcontext failed: {}", io::Error::last_os_error());
        }
    }
}
