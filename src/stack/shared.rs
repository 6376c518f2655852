use std::ffi::c_void;
use std::num::NonZeroUsize;
use std::ptr::NonNull;
use nix::errno::Errno;
use nix::sys::mman::{mmap_anonymous, mprotect, munmap, MapFlags, ProtFlags};
use crate::error::Error;

const FALLBACK_PAGE_SIZE: usize = 4096;

pub(crate) fn page_size() -> usize {
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if size <= 0 {
        FALLBACK_PAGE_SIZE
    } else {
        size as usize
    }
}

/// The single region every coroutine of a scheduler runs on.
///
/// The usable region is `[bottom, top)`, zero-initialized, with one inaccessible guard page right
/// below `bottom`. A coroutine that grows past the region faults on the guard page instead of
/// writing into whatever memory follows.
pub(crate) struct SharedStack {
    mapping: NonNull<c_void>,
    mapped_len: usize,
    guard_len: usize,
    size: usize,
}

impl SharedStack {
    /// Maps a stack of at least `size` bytes. The size is rounded up to whole pages.
    pub(crate) fn new(size: usize) -> Result<Self, Error> {
        let page = page_size();
        let size = size.div_ceil(page) * page;
        let mapped_len = size + page;
        let len = NonZeroUsize::new(mapped_len).ok_or(Error::StackMap(Errno::EINVAL))?;

        let mapping = unsafe {
            mmap_anonymous(
                None,
                len,
                ProtFlags::PROT_READ | ProtFlags::PROT_WRITE,
                MapFlags::MAP_PRIVATE | MapFlags::MAP_NORESERVE,
            )?
        };

        if let Err(errno) = unsafe { mprotect(mapping, page, ProtFlags::PROT_NONE) } {
            let _ = unsafe { munmap(mapping, mapped_len) };
            return Err(errno.into());
        }

        Ok(Self {
            mapping,
            mapped_len,
            guard_len: page,
            size,
        })
    }

    /// The lowest usable address.
    #[inline(always)]
    pub(crate) fn bottom(&self) -> *mut u8 {
        unsafe { (self.mapping.as_ptr() as *mut u8).add(self.guard_len) }
    }

    /// One past the highest usable address. Stacks grow down from here.
    #[inline(always)]
    pub(crate) fn top(&self) -> *mut u8 {
        unsafe { self.bottom().add(self.size) }
    }

    #[inline(always)]
    pub(crate) fn size(&self) -> usize {
        self.size
    }
}

impl Drop for SharedStack {
    fn drop(&mut self) {
        if let Err(errno) = unsafe { munmap(self.mapping, self.mapped_len) } {
            log::warn!("failed to unmap shared stack: {errno}");
        }
    }
}
