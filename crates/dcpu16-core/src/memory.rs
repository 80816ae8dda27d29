//! Word-addressed memory primitives for the machine address space.

/// Number of 16-bit words in the full architectural address space (64 Ki).
pub const ADDRESS_SPACE_WORDS: usize = u16::MAX as usize + 1;

/// Allocates a zeroed word-addressed backing store of `words` cells.
#[must_use]
pub fn new_address_space(words: usize) -> Box<[u16]> {
    vec![0; words].into_boxed_slice()
}
