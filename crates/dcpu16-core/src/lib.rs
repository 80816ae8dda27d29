//! Machine-state and operand-resolution core for a DCPU-16 style CPU.
//!
//! The crate owns the architectural state of a single virtual CPU (general
//! registers, word-addressed memory, `PC`/`SP`/`EX`/`IA` and the cycle
//! ledger) and resolves 6-bit operand encodings into readable/writable
//! locations with their decode-time side effects. The fetch-decode-execute
//! dispatcher, assembler tooling and peripherals live outside this crate and
//! drive it through [`Machine`] and [`Operand`].

/// 16-bit word normalization primitives.
pub mod word;
pub use word::{fold_word, WORD_MASK};

/// Word-addressed memory allocation and sizing.
pub mod memory;
pub use memory::{new_address_space, ADDRESS_SPACE_WORDS};

/// Architectural register model primitives.
pub mod state;
pub use state::{Register, REGISTER_COUNT};

/// Machine state: registers, memory, stack and the cycle ledger.
pub mod machine;
pub use machine::{ConfigError, Machine, MachineConfig, DEFAULT_INITIAL_SP};

/// Deterministic operand-encoding classification tables.
pub mod encoding;
pub use encoding::{
    takes_extra_word, ABSOLUTE, EX_DIRECT, IMMEDIATE, LITERAL_FIRST, LITERAL_LAST,
    OPERAND_ENCODING_MASK, PC_DIRECT, PEEK, PICK, REGISTER_DIRECT_FIRST, REGISTER_DIRECT_LAST,
    REGISTER_INDIRECT_FIRST, REGISTER_INDIRECT_LAST, REGISTER_OFFSET_FIRST, REGISTER_OFFSET_LAST,
    SP_DIRECT, STACK,
};

/// Operand resolution against a live machine.
pub mod operand;
pub use operand::{AddressingMode, Operand};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
