use std::cell::UnsafeCell;

/// Hides the unsafe part of a cell. It looks like this:
///
/// ```ignore
/// unsafe { &*cell.get() }
/// ```
///
/// The caller must keep the returned reference short-lived: the scheduler only reads its slot
/// table this way between context switches, never across one.
pub(crate) fn hide_unsafe<'a, T>(cell: &UnsafeCell<T>) -> &'a T {
    unsafe { &*cell.get() }
}

/// Hides the unsafe part of a cell. It looks like this:
///
/// ```ignore
/// unsafe { &mut *cell.get() }
/// ```
pub(crate) fn hide_mut_unsafe<'a, T>(cell: &UnsafeCell<T>) -> &'a mut T {
    unsafe { &mut *cell.get() }
}
