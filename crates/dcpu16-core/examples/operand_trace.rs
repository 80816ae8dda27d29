//! Prints an operand-resolution trace with its cycle ledger for one
//! hand-assembled instruction's worth of operand fields.

use dcpu16_core::{Machine, Operand};
use proptest as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;

fn main() {
    let mut machine = Machine::default();

    // Word stream as it would follow an opcode word: the destination (`b`)
    // operand's absolute address first, then the source (`a`) operand's
    // immediate word.
    machine.load_words(0x0000, &[0x0040, 0x0007]);

    println!("pc={:#06x} cycles={}", machine.pc(), machine.cycles());

    let b = Operand::load(&mut machine, 0x1E);
    println!(
        "loaded b {:?} -> pc={:#06x} cycles={}",
        b.mode(),
        machine.pc(),
        machine.cycles()
    );

    let a = Operand::load(&mut machine, 0x1F);
    println!(
        "loaded a {:?} -> pc={:#06x} cycles={}",
        a.mode(),
        machine.pc(),
        machine.cycles()
    );

    let value = a.get(&mut machine);
    b.set(&mut machine, value);
    println!(
        "committed {value:#06x} to [0x0040] -> mem={:#06x} cycles={}",
        machine.read_memory(0x0040),
        machine.cycles()
    );
}
