//! Machine state: registers, memory, stack and the cycle ledger.
//!
//! [`Machine`] is the single gateway for every architectural access. Memory
//! reads and writes each cost one cycle; register-class accesses (general
//! registers, `PC`, `SP`, `EX`, `IA`) are free. All stored and returned
//! values are `u16`, so the 16-bit normalization invariant holds by
//! construction; signed intermediates from the arithmetic layer go through
//! [`crate::fold_word`] before they come back in.

use thiserror::Error;

use crate::memory::{new_address_space, ADDRESS_SPACE_WORDS};
use crate::state::{Register, REGISTER_COUNT};

/// Default initial stack pointer: the top of the address space.
pub const DEFAULT_INITIAL_SP: u16 = 0xFFFF;

/// Construction-time configuration for a machine instance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MachineConfig {
    /// Number of addressable 16-bit words of memory. Addresses wrap modulo
    /// this size rather than fault.
    pub memory_words: usize,
    /// Stack pointer value installed at construction and on reset.
    pub initial_sp: u16,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            memory_words: ADDRESS_SPACE_WORDS,
            initial_sp: DEFAULT_INITIAL_SP,
        }
    }
}

/// Rejected machine configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ConfigError {
    /// Memory must hold at least one word.
    #[error("memory size must be at least one word")]
    EmptyMemory,
    /// The 16-bit register width cannot address more than 64 Ki words.
    #[error("memory size exceeds the 16-bit address space")]
    OversizedMemory,
}

/// Full architectural state of one virtual CPU core.
///
/// Exclusively owned and mutated by a single execution thread; hosts running
/// several virtual machines give each its own `Machine`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Machine {
    registers: [u16; REGISTER_COUNT],
    memory: Box<[u16]>,
    pc: u16,
    sp: u16,
    ex: u16,
    ia: u16,
    initial_sp: u16,
    cycles: u64,
}

impl Default for Machine {
    fn default() -> Self {
        Self::from_parts(ADDRESS_SPACE_WORDS, DEFAULT_INITIAL_SP)
    }
}

impl Machine {
    /// Creates a machine from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyMemory`] for a zero-word memory and
    /// [`ConfigError::OversizedMemory`] when the requested size exceeds what
    /// 16-bit addressing can reach.
    pub fn with_config(config: &MachineConfig) -> Result<Self, ConfigError> {
        if config.memory_words == 0 {
            return Err(ConfigError::EmptyMemory);
        }
        if config.memory_words > ADDRESS_SPACE_WORDS {
            return Err(ConfigError::OversizedMemory);
        }
        Ok(Self::from_parts(config.memory_words, config.initial_sp))
    }

    fn from_parts(memory_words: usize, initial_sp: u16) -> Self {
        Self {
            registers: [0; REGISTER_COUNT],
            memory: new_address_space(memory_words),
            pc: 0,
            sp: initial_sp,
            ex: 0,
            ia: 0,
            initial_sp,
            cycles: 0,
        }
    }

    /// Restores the configured boot state: zeroed registers and memory,
    /// `PC`/`EX`/`IA` cleared, `SP` back at its configured initial value,
    /// and the cycle ledger reset.
    pub fn reset(&mut self) {
        self.registers = [0; REGISTER_COUNT];
        self.memory.fill(0);
        self.pc = 0;
        self.sp = self.initial_sp;
        self.ex = 0;
        self.ia = 0;
        self.cycles = 0;
    }

    /// Number of addressable words in this machine's memory.
    #[must_use]
    pub const fn memory_words(&self) -> usize {
        self.memory.len()
    }

    /// Reads the word at `address`, wrapping modulo the memory size.
    /// Costs one cycle.
    pub fn read_memory(&mut self, address: u16) -> u16 {
        self.cycles += 1;
        self.memory[usize::from(address) % self.memory.len()]
    }

    /// Stores `value` at `address`, wrapping modulo the memory size.
    /// Costs one cycle.
    pub fn write_memory(&mut self, address: u16, value: u16) {
        self.cycles += 1;
        let cell = usize::from(address) % self.memory.len();
        self.memory[cell] = value;
    }

    /// Reads a general-purpose register. No cycle cost.
    #[must_use]
    pub const fn read_register(&self, register: Register) -> u16 {
        self.registers[register.index()]
    }

    /// Writes a general-purpose register. No cycle cost.
    pub const fn write_register(&mut self, register: Register, value: u16) {
        self.registers[register.index()] = value;
    }

    /// Streams the next instruction word: reads memory at `PC`, then
    /// advances `PC` by one. The word consumed is the one `PC` pointed to
    /// before the call. Costs one cycle (the memory read).
    ///
    /// This is the only mechanism by which instruction and operand words
    /// leave the instruction stream; callers never read `PC`-addressed
    /// memory directly.
    pub fn next_word(&mut self) -> u16 {
        let word = self.read_memory(self.pc);
        self.pc = self.pc.wrapping_add(1);
        word
    }

    /// Claims a stack slot for a push: decrements `SP` and returns the new
    /// `SP` as the address the pushed value belongs at.
    pub const fn push_slot(&mut self) -> u16 {
        self.sp = self.sp.wrapping_sub(1);
        self.sp
    }

    /// Releases the top stack slot for a pop: returns the current `SP`,
    /// then increments it. The popped value lives at the returned address.
    pub const fn pop_slot(&mut self) -> u16 {
        let slot = self.sp;
        self.sp = self.sp.wrapping_add(1);
        slot
    }

    /// Returns `SP` unchanged (non-mutating top-of-stack probe).
    #[must_use]
    pub const fn peek_address(&self) -> u16 {
        self.sp
    }

    /// Reads the `PC` register.
    #[must_use]
    pub const fn pc(&self) -> u16 {
        self.pc
    }

    /// Writes the `PC` register.
    pub const fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Reads the `SP` register.
    #[must_use]
    pub const fn sp(&self) -> u16 {
        self.sp
    }

    /// Writes the `SP` register.
    pub const fn set_sp(&mut self, value: u16) {
        self.sp = value;
    }

    /// Reads the `EX` overflow register.
    #[must_use]
    pub const fn ex(&self) -> u16 {
        self.ex
    }

    /// Writes the `EX` overflow register.
    pub const fn set_ex(&mut self, value: u16) {
        self.ex = value;
    }

    /// Reads the `IA` interrupt-address register.
    #[must_use]
    pub const fn ia(&self) -> u16 {
        self.ia
    }

    /// Writes the `IA` interrupt-address register. The core only stores the
    /// value; the interrupt subsystem that consumes it lives outside this
    /// crate.
    pub const fn set_ia(&mut self, value: u16) {
        self.ia = value;
    }

    /// Total elementary memory-word accesses since construction or reset.
    #[must_use]
    pub const fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Seeds memory with `words` starting at `origin`, wrapping modulo the
    /// memory size. Host bootstrap path: bypasses the cycle ledger, since
    /// loading a program image is not an architectural access.
    pub fn load_words(&mut self, origin: u16, words: &[u16]) {
        let mut address = origin;
        for word in words {
            let cell = usize::from(address) % self.memory.len();
            self.memory[cell] = *word;
            address = address.wrapping_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, Machine, MachineConfig, DEFAULT_INITIAL_SP};
    use crate::memory::ADDRESS_SPACE_WORDS;
    use crate::state::Register;

    #[test]
    fn default_machine_boots_with_canonical_state() {
        let machine = Machine::default();
        assert_eq!(machine.memory_words(), ADDRESS_SPACE_WORDS);
        assert_eq!(machine.pc(), 0);
        assert_eq!(machine.sp(), DEFAULT_INITIAL_SP);
        assert_eq!(machine.ex(), 0);
        assert_eq!(machine.ia(), 0);
        assert_eq!(machine.cycles(), 0);
    }

    #[test]
    fn config_rejects_empty_and_oversized_memory() {
        let empty = MachineConfig {
            memory_words: 0,
            ..MachineConfig::default()
        };
        assert_eq!(Machine::with_config(&empty), Err(ConfigError::EmptyMemory));

        let oversized = MachineConfig {
            memory_words: ADDRESS_SPACE_WORDS + 1,
            ..MachineConfig::default()
        };
        assert_eq!(
            Machine::with_config(&oversized),
            Err(ConfigError::OversizedMemory)
        );
    }

    #[test]
    fn memory_round_trips_and_wraps_modulo_configured_size() {
        let config = MachineConfig {
            memory_words: 0x1000,
            ..MachineConfig::default()
        };
        let mut machine = Machine::with_config(&config).expect("valid config");

        machine.write_memory(0x0123, 0xBEEF);
        assert_eq!(machine.read_memory(0x0123), 0xBEEF);

        // 0x1123 aliases 0x0123 in a 0x1000-word space.
        assert_eq!(machine.read_memory(0x1123), 0xBEEF);
        machine.write_memory(0x2123, 0xCAFE);
        assert_eq!(machine.read_memory(0x0123), 0xCAFE);
    }

    #[test]
    fn cycle_ledger_counts_only_memory_accesses() {
        let mut machine = Machine::default();
        assert_eq!(machine.cycles(), 0);

        machine.write_memory(0x0010, 0x0001);
        assert_eq!(machine.cycles(), 1);
        let _ = machine.read_memory(0x0010);
        assert_eq!(machine.cycles(), 2);

        machine.write_register(Register::A, 0x1234);
        let _ = machine.read_register(Register::A);
        machine.set_pc(0x0100);
        machine.set_sp(0x0200);
        machine.set_ex(0x0300);
        machine.set_ia(0x0400);
        let _ = machine.push_slot();
        let _ = machine.pop_slot();
        let _ = machine.peek_address();
        assert_eq!(machine.cycles(), 2);
    }

    #[test]
    fn next_word_post_increments_pc_and_costs_one_cycle() {
        let mut machine = Machine::default();
        machine.load_words(0x0000, &[0xAAAA, 0xBBBB]);

        assert_eq!(machine.next_word(), 0xAAAA);
        assert_eq!(machine.pc(), 1);
        assert_eq!(machine.next_word(), 0xBBBB);
        assert_eq!(machine.pc(), 2);
        assert_eq!(machine.cycles(), 2);
    }

    #[test]
    fn next_word_wraps_pc_at_the_top_of_the_address_space() {
        let mut machine = Machine::default();
        machine.load_words(0xFFFF, &[0x1D1D]);
        machine.set_pc(0xFFFF);

        assert_eq!(machine.next_word(), 0x1D1D);
        assert_eq!(machine.pc(), 0x0000);
    }

    #[test]
    fn stack_slots_grow_downward_and_invert_each_other() {
        let mut machine = Machine::default();
        assert_eq!(machine.sp(), 0xFFFF);

        let pushed = machine.push_slot();
        assert_eq!(pushed, 0xFFFE);
        assert_eq!(machine.sp(), 0xFFFE);
        assert_eq!(machine.peek_address(), 0xFFFE);

        let popped = machine.pop_slot();
        assert_eq!(popped, 0xFFFE);
        assert_eq!(machine.sp(), 0xFFFF);
    }

    #[test]
    fn pop_then_push_restores_the_stack_pointer() {
        let mut machine = Machine::default();
        machine.set_sp(0x8000);

        let _ = machine.pop_slot();
        let _ = machine.push_slot();
        assert_eq!(machine.sp(), 0x8000);
    }

    #[test]
    fn stack_pointer_wraps_at_both_ends() {
        let mut machine = Machine::default();
        machine.set_sp(0x0000);
        assert_eq!(machine.push_slot(), 0xFFFF);

        machine.set_sp(0xFFFF);
        assert_eq!(machine.pop_slot(), 0xFFFF);
        assert_eq!(machine.sp(), 0x0000);
    }

    #[test]
    fn high_bit_register_values_round_trip_unchanged() {
        let mut machine = Machine::default();
        machine.write_register(Register::A, 0x8000);
        assert_eq!(machine.read_register(Register::A), 0x8000);
    }

    #[test]
    fn load_words_seeds_memory_without_spending_cycles() {
        let mut machine = Machine::default();
        machine.load_words(0xFFFE, &[0x0001, 0x0002, 0x0003]);
        assert_eq!(machine.cycles(), 0);

        assert_eq!(machine.read_memory(0xFFFE), 0x0001);
        assert_eq!(machine.read_memory(0xFFFF), 0x0002);
        assert_eq!(machine.read_memory(0x0000), 0x0003);
    }

    #[test]
    fn reset_restores_boot_state_including_configured_sp() {
        let config = MachineConfig {
            memory_words: 0x1000,
            initial_sp: 0x0FFF,
        };
        let mut machine = Machine::with_config(&config).expect("valid config");

        machine.write_register(Register::J, 0x00FF);
        machine.write_memory(0x0042, 0x4242);
        machine.set_pc(0x0100);
        machine.set_sp(0x0800);
        machine.set_ex(0x0001);
        machine.set_ia(0x0002);

        machine.reset();

        assert_eq!(machine.read_register(Register::J), 0);
        assert_eq!(machine.pc(), 0);
        assert_eq!(machine.sp(), 0x0FFF);
        assert_eq!(machine.ex(), 0);
        assert_eq!(machine.ia(), 0);
        assert_eq!(machine.cycles(), 0);
        assert_eq!(machine.read_memory(0x0042), 0);
    }
}
