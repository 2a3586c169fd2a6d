//! Helpers shared by the rest of the allocator.

use std::mem;

/// The computer's native word size in bytes. Every size the allocator
/// records and every pointer it hands out is a multiple of this.
pub(crate) const WORD_SIZE: usize = mem::size_of::<usize>();

/// Rounds `size` up to the next multiple of [`WORD_SIZE`].
///
/// Processors fetch data in word-sized chunks rather than byte by byte, so
/// memory addresses need to be word aligned. Aligning every payload size
/// keeps all block-boundary arithmetic on word multiples as well.
pub(crate) fn align(size: usize) -> usize {
    (size + WORD_SIZE - 1) & !(WORD_SIZE - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_word_size() {
        let mut alignments = Vec::new();

        for i in 0..8 {
            let sizes = (WORD_SIZE * i + 1)..=(WORD_SIZE * (i + 1));
            alignments.push((sizes, WORD_SIZE * (i + 1)));
        }

        for (sizes, expected) in alignments {
            for size in sizes {
                assert_eq!(expected, align(size));
            }
        }
    }

    #[test]
    fn align_keeps_zero() {
        assert_eq!(0, align(0));
    }
}
