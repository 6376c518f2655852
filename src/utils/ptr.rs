use std::alloc::{alloc, dealloc, handle_alloc_error, Layout};
use std::ptr;

/// An owning raw pointer to a heap value with a stable address.
///
/// The value is never moved by the pointer itself, which matters for values that hold saved
/// execution contexts. `Ptr` is `Copy`; exactly one copy must call [`drop_in_place`](Ptr::drop_in_place).
pub(crate) struct Ptr<T> {
    ptr: *mut T,
}

impl<T> Ptr<T> {
    /// Moves the value into a new allocation.
    #[inline(always)]
    pub(crate) fn new(value: T) -> Self {
        let layout = Layout::new::<T>();
        debug_assert!(layout.size() > 0, "Ptr does not support zero sized types");
        let ptr = unsafe { alloc(layout) } as *mut T;
        if ptr.is_null() {
            handle_alloc_error(layout);
        }
        unsafe { ptr.write(value) };
        Self { ptr }
    }

    /// Get a reference to the value.
    ///
    /// # Safety
    ///
    /// The value must be alive for `'a`.
    #[inline(always)]
    pub(crate) unsafe fn as_ref<'a>(self) -> &'a T {
        unsafe { &*self.ptr }
    }

    /// Get a mutable reference to the value.
    ///
    /// # Safety
    ///
    /// The value must be alive for `'a` and not otherwise borrowed.
    #[inline(always)]
    pub(crate) unsafe fn as_mut<'a>(self) -> &'a mut T {
        unsafe { &mut *self.ptr }
    }

    /// Drops the value and frees its allocation.
    ///
    /// # Safety
    ///
    /// The pointer must come from [`Ptr::new`], and no other copy of it may be used afterwards.
    #[inline(always)]
    pub(crate) unsafe fn drop_in_place(self) {
        unsafe {
            ptr::drop_in_place(self.ptr);
            dealloc(self.ptr as *mut u8, Layout::new::<T>());
        }
    }
}

impl<T> Clone for Ptr<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Ptr<T> {}

impl<T> From<&T> for Ptr<T> {
    /// Borrows without taking ownership. Such a pointer must never be passed to
    /// [`drop_in_place`](Ptr::drop_in_place).
    fn from(value: &T) -> Self {
        Self { ptr: value as *const T as *mut T }
    }
}
