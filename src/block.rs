use std::mem;

use crate::utils::WORD_SIZE;

/// Size in bytes of the header that precedes every payload in the arena.
pub(crate) const HEADER_SIZE: usize = mem::size_of::<Stamp>();

// Payloads follow their header directly, so the header size has to be a word
// multiple for the payload to land word aligned.
const _: () = assert!(HEADER_SIZE % WORD_SIZE == 0);

/// Metadata of one contiguous region of the arena, free or in-use.
///
/// The block's fields live in the heap's block table, but the arena still
/// reserves [`HEADER_SIZE`] bytes in front of every payload:
///
/// ```text
/// +---------------------+ <------+
/// |        index        |        |
/// +---------------------+        | -> Header ([`Stamp`], HEADER_SIZE bytes)
/// |        seal         |        |
/// +---------------------+ <------+
/// |       Payload       |        |
/// |         ...         |        | -> size bytes, word aligned
/// |         ...         |        |
/// +---------------------+ <------+
/// ```
///
/// The pointer handed to the caller is the first payload byte, and the
/// header in front of it carries the block's index in the table, which is
/// how `release` finds its way back from a bare pointer. Block boundaries
/// always satisfy `next.offset == offset + HEADER_SIZE + size`.
pub(crate) struct Block {
    /// Usable payload size in bytes, aligned to the word boundary. Excludes
    /// the header.
    pub size: usize,
    /// Flag to tell whether the block is free or not.
    pub is_free: bool,
    /// Byte offset of the block's header from the arena base.
    pub offset: usize,
}

impl Block {
    /// Offset of the first payload byte.
    #[inline]
    pub fn payload_offset(&self) -> usize {
        self.offset + HEADER_SIZE
    }

    /// Offset one past the last payload byte. The successor's header starts
    /// exactly here.
    #[inline]
    pub fn end_offset(&self) -> usize {
        self.offset + HEADER_SIZE + self.size
    }
}

/// Contents of the on-arena header: the block's index in the table plus a
/// seal marking the bytes as a header this heap wrote. A pointer whose
/// preceding bytes don't carry the seal was never returned by `allocate`.
#[repr(C)]
pub(crate) struct Stamp {
    index: usize,
    seal: usize,
}

const SEAL: usize = 0xB10C_5EA1;

impl Stamp {
    /// Writes the header for block `index` at `at`.
    ///
    /// **SAFETY**: `at` must be word aligned and point at [`HEADER_SIZE`]
    /// writable bytes.
    pub unsafe fn write(at: *mut u8, index: usize) {
        unsafe { at.cast::<Stamp>().write(Stamp { index, seal: SEAL }) }
    }

    /// Reads the header at `at` and returns the stamped block index, or
    /// `None` if the bytes don't carry the seal.
    ///
    /// **SAFETY**: `at` must be word aligned and point at [`HEADER_SIZE`]
    /// readable, initialized bytes.
    pub unsafe fn read(at: *const u8) -> Option<usize> {
        let stamp = unsafe { at.cast::<Stamp>().read() };
        (stamp.seal == SEAL).then_some(stamp.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamp_round_trips_through_memory() {
        let mut backing = [0usize; 4];
        let at = backing.as_mut_ptr().cast::<u8>();

        unsafe {
            Stamp::write(at, 7);
            assert_eq!(Some(7), Stamp::read(at));
        }
    }

    #[test]
    fn unsealed_memory_is_not_a_header() {
        let backing = [0usize; 4];

        unsafe {
            assert_eq!(None, Stamp::read(backing.as_ptr().cast()));
        }
    }
}
