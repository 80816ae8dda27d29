//! Deterministic classification tables for the 6-bit operand field.
//!
//! An instruction word carries up to two operand fields; each value below
//! names one addressing mode. The ranges are mutually exclusive and cover
//! the whole `0x00..=0x3F` space.

/// Mask for the 6-bit operand-encoding field.
pub const OPERAND_ENCODING_MASK: u8 = 0x3F;

/// First encoding of the register-direct range (`A`).
pub const REGISTER_DIRECT_FIRST: u8 = 0x00;
/// Last encoding of the register-direct range (`J`).
pub const REGISTER_DIRECT_LAST: u8 = 0x07;
/// First encoding of the register-indirect range (`[A]`).
pub const REGISTER_INDIRECT_FIRST: u8 = 0x08;
/// Last encoding of the register-indirect range (`[J]`).
pub const REGISTER_INDIRECT_LAST: u8 = 0x0F;
/// First encoding of the register-indirect-plus-offset range (`[A + word]`).
pub const REGISTER_OFFSET_FIRST: u8 = 0x10;
/// Last encoding of the register-indirect-plus-offset range (`[J + word]`).
pub const REGISTER_OFFSET_LAST: u8 = 0x17;
/// Stack operand: pop when read, push when written.
pub const STACK: u8 = 0x18;
/// Top-of-stack operand (`[SP]`), `SP` untouched.
pub const PEEK: u8 = 0x19;
/// Stack-relative operand (`[SP + word]`).
pub const PICK: u8 = 0x1A;
/// The stack pointer itself.
pub const SP_DIRECT: u8 = 0x1B;
/// The program counter itself.
pub const PC_DIRECT: u8 = 0x1C;
/// The `EX` overflow register itself.
pub const EX_DIRECT: u8 = 0x1D;
/// Absolute memory operand (`[word]`).
pub const ABSOLUTE: u8 = 0x1E;
/// Immediate next-word operand; writes are discarded.
pub const IMMEDIATE: u8 = 0x1F;
/// First encoding of the small-literal range (value `0x00`).
pub const LITERAL_FIRST: u8 = 0x20;
/// Last encoding of the small-literal range (value `0x1F`).
pub const LITERAL_LAST: u8 = 0x3F;

/// Returns `true` for encodings whose addressing mode consumes the next
/// instruction word at load time, advancing `PC` by one.
#[must_use]
pub const fn takes_extra_word(encoding: u8) -> bool {
    matches!(
        encoding,
        REGISTER_OFFSET_FIRST..=REGISTER_OFFSET_LAST | PICK | ABSOLUTE | IMMEDIATE
    )
}
