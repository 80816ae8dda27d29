//! Operand resolution: addressing-mode classification and value access.
//!
//! The dispatcher decodes an opcode word, then loads one [`Operand`] per
//! operand field against the shared [`Machine`], in stream order: the `b`
//! (destination) slot before the `a` (source) slot. Loading is the only
//! point where an operand may consume an extra instruction word, so this
//! ordering decides which word belongs to which operand.

use crate::encoding::{
    ABSOLUTE, EX_DIRECT, IMMEDIATE, LITERAL_FIRST, OPERAND_ENCODING_MASK, PC_DIRECT, PEEK, PICK,
    REGISTER_DIRECT_FIRST, REGISTER_DIRECT_LAST, REGISTER_INDIRECT_FIRST, REGISTER_INDIRECT_LAST,
    REGISTER_OFFSET_FIRST, REGISTER_OFFSET_LAST, SP_DIRECT, STACK,
};
use crate::machine::Machine;
use crate::state::Register;

/// Addressing mode decoded from a 6-bit operand field.
///
/// Classification happens exactly once, at load time; [`Operand::get`] and
/// [`Operand::set`] dispatch on the variant, so no encoding can ever match
/// two modes. Modes that consume an extra instruction word carry it in the
/// variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum AddressingMode {
    /// Register contents (`A`..`J`).
    Register(Register),
    /// Memory at the address held in a register.
    RegisterIndirect(Register),
    /// Memory at register contents plus the carried offset word.
    RegisterIndirectOffset(Register, u16),
    /// Stack operand: pop on read, push on write.
    Stack,
    /// Memory at the current top of stack, `SP` untouched.
    Peek,
    /// Memory at `SP` plus the carried offset word.
    Pick(u16),
    /// The stack pointer itself.
    StackPointer,
    /// The program counter itself.
    ProgramCounter,
    /// The `EX` overflow register itself.
    Overflow,
    /// Memory at the carried absolute address word.
    Absolute(u16),
    /// The carried word as an immediate value; writes are discarded.
    Immediate(u16),
    /// A small literal in `0x00..=0x1F`; writes are discarded.
    Literal(u16),
}

/// One resolved operand slot, valid for a single instruction.
///
/// Instances are transient: the dispatcher loads one per decoded operand
/// field, calls [`Operand::get`] and/or [`Operand::set`] at most once each,
/// and discards it before the next instruction begins. No state beyond the
/// decoded mode (and its extra word) is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Operand {
    mode: AddressingMode,
}

impl Operand {
    /// Classifies `encoding` and performs the load-time side effect: modes
    /// listed by [`crate::takes_extra_word`] consume the next instruction
    /// word here via [`Machine::next_word`], advancing `PC` by one and
    /// costing one cycle.
    ///
    /// `encoding` is a pre-validated 6-bit field (caller contract); higher
    /// bits are ignored.
    #[must_use]
    pub fn load(machine: &mut Machine, encoding: u8) -> Self {
        debug_assert!(
            encoding <= OPERAND_ENCODING_MASK,
            "operand encodings are 6-bit fields"
        );
        let encoding = encoding & OPERAND_ENCODING_MASK;
        let mode = match encoding {
            REGISTER_DIRECT_FIRST..=REGISTER_DIRECT_LAST => {
                AddressingMode::Register(register_field(encoding))
            }
            REGISTER_INDIRECT_FIRST..=REGISTER_INDIRECT_LAST => {
                AddressingMode::RegisterIndirect(register_field(encoding - REGISTER_INDIRECT_FIRST))
            }
            REGISTER_OFFSET_FIRST..=REGISTER_OFFSET_LAST => AddressingMode::RegisterIndirectOffset(
                register_field(encoding - REGISTER_OFFSET_FIRST),
                machine.next_word(),
            ),
            STACK => AddressingMode::Stack,
            PEEK => AddressingMode::Peek,
            PICK => AddressingMode::Pick(machine.next_word()),
            SP_DIRECT => AddressingMode::StackPointer,
            PC_DIRECT => AddressingMode::ProgramCounter,
            EX_DIRECT => AddressingMode::Overflow,
            ABSOLUTE => AddressingMode::Absolute(machine.next_word()),
            IMMEDIATE => AddressingMode::Immediate(machine.next_word()),
            _ => AddressingMode::Literal(u16::from(encoding - LITERAL_FIRST)),
        };
        Self { mode }
    }

    /// The addressing mode decided at load time.
    #[must_use]
    pub const fn mode(&self) -> AddressingMode {
        self.mode
    }

    /// Reads the addressed value.
    ///
    /// For [`AddressingMode::Stack`] this is a pop: the value comes from the
    /// pre-increment `SP` and `SP` moves up by one. Register-class and
    /// literal modes are cycle-free; every memory-touching mode pays the
    /// gateway's one cycle per access.
    pub fn get(&self, machine: &mut Machine) -> u16 {
        match self.mode {
            AddressingMode::Register(register) => machine.read_register(register),
            AddressingMode::RegisterIndirect(register) => {
                let address = machine.read_register(register);
                machine.read_memory(address)
            }
            AddressingMode::RegisterIndirectOffset(register, offset) => {
                let address = machine.read_register(register).wrapping_add(offset);
                machine.read_memory(address)
            }
            AddressingMode::Stack => {
                let slot = machine.pop_slot();
                machine.read_memory(slot)
            }
            AddressingMode::Peek => {
                let top = machine.peek_address();
                machine.read_memory(top)
            }
            AddressingMode::Pick(offset) => {
                let address = machine.peek_address().wrapping_add(offset);
                machine.read_memory(address)
            }
            AddressingMode::StackPointer => machine.sp(),
            AddressingMode::ProgramCounter => machine.pc(),
            AddressingMode::Overflow => machine.ex(),
            AddressingMode::Absolute(address) => machine.read_memory(address),
            AddressingMode::Immediate(word) => word,
            AddressingMode::Literal(value) => value,
        }
    }

    /// Writes `value` to the addressed location.
    ///
    /// For [`AddressingMode::Stack`] this is a push, the asymmetric
    /// counterpart of the pop in [`Operand::get`]: `SP` moves down by one
    /// first and the value lands in the newly claimed slot. Writes through
    /// [`AddressingMode::Immediate`] and [`AddressingMode::Literal`] are
    /// silently discarded without touching any machine state.
    pub fn set(&self, machine: &mut Machine, value: u16) {
        match self.mode {
            AddressingMode::Register(register) => machine.write_register(register, value),
            AddressingMode::RegisterIndirect(register) => {
                let address = machine.read_register(register);
                machine.write_memory(address, value);
            }
            AddressingMode::RegisterIndirectOffset(register, offset) => {
                let address = machine.read_register(register).wrapping_add(offset);
                machine.write_memory(address, value);
            }
            AddressingMode::Stack => {
                let slot = machine.push_slot();
                machine.write_memory(slot, value);
            }
            AddressingMode::Peek => {
                let top = machine.peek_address();
                machine.write_memory(top, value);
            }
            AddressingMode::Pick(offset) => {
                let address = machine.peek_address().wrapping_add(offset);
                machine.write_memory(address, value);
            }
            AddressingMode::StackPointer => machine.set_sp(value),
            AddressingMode::ProgramCounter => machine.set_pc(value),
            AddressingMode::Overflow => machine.set_ex(value),
            AddressingMode::Absolute(address) => machine.write_memory(address, value),
            AddressingMode::Immediate(_) | AddressingMode::Literal(_) => {}
        }
    }
}

const fn register_field(bits: u8) -> Register {
    Register::ALL[(bits & 0x07) as usize]
}
