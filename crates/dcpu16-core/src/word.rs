//! 16-bit word normalization primitives.

/// Mask that truncates a non-negative intermediate into the word range.
pub const WORD_MASK: i32 = 0xFFFF;

/// Folds a signed intermediate result into the architectural word range.
///
/// Non-negative inputs are truncated with [`WORD_MASK`]. Negative inputs use
/// the machine's asymmetric fold `(abs(value) + 0x8000) & 0xFFFF`, which is
/// how out-of-range results produced by the arithmetic opcodes wrap before
/// they re-enter the register file or memory. Idempotent over values already
/// in `0..=0xFFFF`.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // both arms mask into u16 range first
pub const fn fold_word(value: i32) -> u16 {
    if value < 0 {
        ((value.unsigned_abs() + 0x8000) & 0xFFFF) as u16
    } else {
        (value & WORD_MASK) as u16
    }
}
