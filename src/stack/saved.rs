use std::hint::black_box;
use std::ptr;

/// Private copy of a suspended coroutine's part of the shared stack.
///
/// The buffer only grows. Its capacity is the deepest stack the coroutine has been suspended with.
pub(crate) struct SavedStack {
    buf: Vec<u8>,
}

impl SavedStack {
    pub(crate) const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Bytes saved by the last [`save`](SavedStack::save).
    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.buf.len()
    }

    /// High-water mark of saved bytes.
    #[cfg(test)]
    fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Copies everything between the current stack position and `top` into the buffer.
    ///
    /// The current stack position is taken from a local of this frame, so every frame of the
    /// caller is inside the copied range. Nothing the caller writes to its own frame after this
    /// call survives a later [`restore`](SavedStack::restore).
    ///
    /// # Panics
    ///
    /// If the caller is not running below `top`, or uses more than `limit` bytes of stack.
    ///
    /// # Safety
    ///
    /// `[current position, top)` must be readable.
    #[inline(never)]
    pub(crate) unsafe fn save(&mut self, top: *const u8, limit: usize) {
        let probe = 0u8;
        let probe = black_box(&probe) as *const u8;

        let used = match (top as usize).checked_sub(probe as usize) {
            Some(used) => used,
            None => panic!("stack save requested from outside of the shared stack"),
        };
        assert!(
            used <= limit,
            "shared stack overflow: {used} bytes in use, the stack holds {limit}"
        );

        if self.buf.capacity() < used {
            self.buf = Vec::with_capacity(used);
        }

        unsafe {
            ptr::copy_nonoverlapping(probe, self.buf.as_mut_ptr(), used);
            self.buf.set_len(used);
        }
    }

    /// Writes the saved bytes back so that they end right below `top`.
    ///
    /// # Safety
    ///
    /// `[top - len, top)` must be writable and not in use by the caller.
    pub(crate) unsafe fn restore(&self, top: *mut u8) {
        let len = self.buf.len();
        unsafe { ptr::copy_nonoverlapping(self.buf.as_ptr(), top.sub(len), len) };
    }

    #[cfg(test)]
    fn as_slice(&self) -> &[u8] {
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline(never)]
    fn save_with_padding(saved: &mut SavedStack, top: *const u8) {
        let padding = black_box([0x5Au8; 4096]);
        unsafe { saved.save(top, 1 << 20) };
        black_box(&padding);
    }

    #[test]
    fn test_save_copies_up_to_top() {
        let marker = black_box([0xABu8; 64]);
        let top = unsafe { marker.as_ptr().add(marker.len()) };
        let mut saved = SavedStack::new();

        unsafe { saved.save(top, 1 << 20) };

        assert!(saved.len() >= marker.len());
        assert!(saved.capacity() >= saved.len());
        assert_eq!(&saved.as_slice()[saved.len() - marker.len()..], &marker[..]);
    }

    #[test]
    fn test_capacity_never_shrinks() {
        let marker = black_box([0u8; 16]);
        let top = unsafe { marker.as_ptr().add(marker.len()) };
        let mut saved = SavedStack::new();

        save_with_padding(&mut saved, top);
        let deep_len = saved.len();
        let deep_capacity = saved.capacity();
        assert!(deep_len > 4096);

        unsafe { saved.save(top, 1 << 20) };
        assert!(saved.len() < deep_len);
        assert_eq!(saved.capacity(), deep_capacity);
    }

    #[test]
    #[should_panic(expected = "shared stack overflow")]
    fn test_save_over_limit_panics() {
        let marker = black_box([0u8; 256]);
        let top = unsafe { marker.as_ptr().add(marker.len()) };
        let mut saved = SavedStack::new();
        unsafe { saved.save(top, 8) };
    }

    #[test]
    #[should_panic(expected = "outside of the shared stack")]
    fn test_save_above_top_panics() {
        let mut saved = SavedStack::new();
        let top = ptr::null::<u8>().wrapping_add(1);
        unsafe { saved.save(top, usize::MAX) };
    }

    #[test]
    fn test_restore_ends_at_top() {
        let mut saved = SavedStack::new();
        saved.buf = vec![1, 2, 3, 4];
        let mut region = vec![0u8; 128];

        unsafe { saved.restore(region.as_mut_ptr().add(region.len())) };

        assert_eq!(&region[124..], &[1, 2, 3, 4]);
        assert!(region[..124].iter().all(|byte| *byte == 0));
    }

    #[test]
    fn test_restore_empty() {
        let saved = SavedStack::new();
        let mut region = vec![7u8; 8];
        unsafe { saved.restore(region.as_mut_ptr().add(region.len())) };
        assert_eq!(region, vec![7u8; 8]);
    }
}
