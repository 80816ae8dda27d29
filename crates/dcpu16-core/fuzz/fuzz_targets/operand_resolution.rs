#![no_main]

use dcpu16_core::{fold_word, takes_extra_word, Machine, Operand, OPERAND_ENCODING_MASK};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 6 {
        return;
    }

    let encoding = data[0] & OPERAND_ENCODING_MASK;
    let value = u16::from_be_bytes([data[1], data[2]]);
    let pc = u16::from_be_bytes([data[3], data[4]]);
    let sp = u16::from_be_bytes([data[5], data[0]]);

    let mut machine = Machine::default();
    machine.set_pc(pc);
    machine.set_sp(sp);

    let cycles_before = machine.cycles();
    let pc_before = machine.pc();

    let operand = Operand::load(&mut machine, encoding);

    let expected_delta = u16::from(takes_extra_word(encoding));
    assert_eq!(machine.pc(), pc_before.wrapping_add(expected_delta));

    let _ = operand.get(&mut machine);
    operand.set(&mut machine, value);

    assert!(machine.cycles() >= cycles_before);
    assert!(machine.cycles() - cycles_before <= 3);

    let _ = fold_word(i32::from(value));
});
