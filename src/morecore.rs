use std::ptr::NonNull;

use crate::utils::{WORD_SIZE, align};

/// The heap's growth collaborator, named after the hook classic `malloc`
/// implementations use for the same job.
///
/// This trait abstracts the low level memory requests away from the block
/// management logic, which only needs semantic access to "give me `len` more
/// bytes right after the arena's current end".
pub trait Morecore {
    /// Extends the arena by exactly `len` bytes and returns the start of the
    /// fresh range, or `None` when no more memory is available.
    ///
    /// Grants must form one gapless run: every successful call returns
    /// memory starting word aligned exactly where the previous grant ended,
    /// readable, writable, zero initialized, and never reclaimed afterwards.
    /// Callers keep `len` a word multiple no larger than `isize::MAX`.
    fn grow(&mut self, len: usize) -> Option<NonNull<u8>>;
}

#[cfg(unix)]
mod unix {
    use std::ptr::NonNull;

    use libc::{c_void, intptr_t, sbrk};

    use super::Morecore;
    use crate::utils::WORD_SIZE;

    /// Grows the arena by moving the process program break, the way the
    /// classic `malloc` backends do. Fresh break pages are zero filled by
    /// the kernel.
    ///
    /// The break is not guaranteed to start word aligned, so the first grant
    /// pads up to the next boundary; every grant is a word multiple, so the
    /// break stays aligned from then on.
    pub struct SystemBreak;

    impl SystemBreak {
        pub const fn new() -> Self {
            Self
        }
    }

    impl Default for SystemBreak {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Morecore for SystemBreak {
        fn grow(&mut self, len: usize) -> Option<NonNull<u8>> {
            unsafe {
                let brk = sbrk(0);
                if brk == usize::MAX as *mut c_void {
                    return None;
                }

                let pad = brk.cast::<u8>().align_offset(WORD_SIZE);
                if sbrk((pad + len) as intptr_t) == usize::MAX as *mut c_void {
                    return None;
                }

                NonNull::new(brk.cast::<u8>().add(pad))
            }
        }
    }
}

#[cfg(unix)]
pub use unix::SystemBreak;

#[cfg(windows)]
mod windows {
    use std::ptr::{self, NonNull};

    use windows::Win32::System::Memory;

    use super::Morecore;

    /// Address space reserved up front. Windows has no program break to
    /// move, so contiguity comes from committing ranges inside one
    /// reservation; running past it reads as arena exhaustion.
    const RESERVATION: usize = 1 << 30;

    /// Grows the arena by committing pages inside a single reserved range,
    /// emulating a program break. Committed pages are zero filled.
    pub struct SystemBreak {
        base: *mut u8,
        committed: usize,
    }

    impl SystemBreak {
        pub const fn new() -> Self {
            Self {
                base: ptr::null_mut(),
                committed: 0,
            }
        }
    }

    impl Default for SystemBreak {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Morecore for SystemBreak {
        fn grow(&mut self, len: usize) -> Option<NonNull<u8>> {
            unsafe {
                if self.base.is_null() {
                    let base = Memory::VirtualAlloc(
                        None,
                        RESERVATION,
                        Memory::MEM_RESERVE,
                        Memory::PAGE_NOACCESS,
                    );
                    if base.is_null() {
                        return None;
                    }
                    self.base = base.cast();
                }

                if len > RESERVATION - self.committed {
                    return None;
                }

                let at = self.base.add(self.committed);
                // Committing rounds to page boundaries and is idempotent on
                // pages already committed by an earlier grant.
                let committed = Memory::VirtualAlloc(
                    Some(at as *const _),
                    len,
                    Memory::MEM_COMMIT,
                    Memory::PAGE_READWRITE,
                );
                if committed.is_null() {
                    return None;
                }

                self.committed += len;
                NonNull::new(at)
            }
        }
    }
}

#[cfg(windows)]
pub use windows::SystemBreak;

/// Fixed-capacity arena backed by one owned buffer. Grants bump a cursor
/// through the buffer and fail once it is spent, which makes exhaustion
/// deterministic. The tests and demos run on this.
pub struct FixedArena {
    base: NonNull<u8>,
    capacity: usize,
    used: usize,
}

impl FixedArena {
    /// Creates an arena able to grant `capacity` bytes in total, rounded up
    /// to the word boundary.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or overflows a [`std::alloc::Layout`].
    pub fn new(capacity: usize) -> Self {
        use std::alloc::{Layout, alloc_zeroed, handle_alloc_error};

        assert!(capacity > 0, "arena capacity must be non-zero");

        let capacity = align(capacity);
        let layout = Layout::from_size_align(capacity, WORD_SIZE)
            .expect("arena capacity overflows a memory layout");

        // Zeroed so that header reads during pointer recovery never touch
        // uninitialized bytes.
        let base = unsafe { alloc_zeroed(layout) };
        let Some(base) = NonNull::new(base) else {
            handle_alloc_error(layout);
        };

        Self {
            base,
            capacity,
            used: 0,
        }
    }
}

impl Morecore for FixedArena {
    fn grow(&mut self, len: usize) -> Option<NonNull<u8>> {
        if len > self.capacity - self.used {
            return None;
        }

        let grant = unsafe { NonNull::new_unchecked(self.base.as_ptr().add(self.used)) };
        self.used += len;

        Some(grant)
    }
}

impl Drop for FixedArena {
    fn drop(&mut self) {
        use std::alloc::{Layout, dealloc};

        unsafe {
            let layout = Layout::from_size_align_unchecked(self.capacity, WORD_SIZE);
            dealloc(self.base.as_ptr(), layout);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_arena_grants_are_contiguous_and_aligned() {
        let mut arena = FixedArena::new(128);

        let a = arena.grow(32).unwrap();
        let b = arena.grow(64).unwrap();

        assert_eq!(0, a.as_ptr() as usize % WORD_SIZE);
        assert_eq!(unsafe { a.as_ptr().add(32) }, b.as_ptr());
    }

    #[test]
    fn fixed_arena_exhausts_without_side_effects() {
        let mut arena = FixedArena::new(64);

        assert!(arena.grow(128).is_none());

        let a = arena.grow(64).unwrap();
        assert!(arena.grow(WORD_SIZE).is_none());

        // earlier grants stay usable after a failed one
        unsafe { a.as_ptr().write_bytes(0xAB, 64) };
    }

    #[test]
    fn fixed_arena_rounds_capacity_up() {
        let mut arena = FixedArena::new(WORD_SIZE + 1);

        assert!(arena.grow(2 * WORD_SIZE).is_some());
    }
}
