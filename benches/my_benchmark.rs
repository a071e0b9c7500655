use chip::{chip8::ChipSet, opcode::Opcodes, resources::Rom};
use criterion::{criterion_group, criterion_main, Criterion};
use std::convert::TryFrom;

const ROM_NAME: &str = "COUNTER";

/// Counts V0 up, copies it through the arithmetic unit, stores it as decimal and loops.
const PROGRAM: [u8; 16] = [
    0xA3, 0x00, // LD I, 0x300
    0x70, 0x01, // ADD V0, 0x01
    0x81, 0x04, // ADD V1, V0
    0x82, 0x16, // SHR V2, V1
    0xF0, 0x33, // LD B, V0
    0xF2, 0x65, // LD V2, [I]
    0x3F, 0x02, // SE VF, 0x02 (never true)
    0x12, 0x02, // JP 0x202
];

static BASE_ROM: once_cell::sync::Lazy<Rom> =
    once_cell::sync::Lazy::new(|| Rom::new(ROM_NAME, PROGRAM.to_vec()));

/// will setup the default configured chip
fn get_default_chip() -> ChipSet {
    let mut chip = ChipSet::default();
    chip.load(&BASE_ROM)
        .expect("The benchmark rom has to fit into memory.");
    chip
}

pub fn print_bench(c: &mut Criterion) {
    let chip = get_default_chip();
    c.bench_function("print_bench", |b| {
        b.iter(|| {
            let _ = format!("{}", chip);
        });
    });
}

pub fn disassemble_bench(c: &mut Criterion) {
    c.bench_function("disassemble_bench", |b| {
        b.iter(|| {
            PROGRAM
                .chunks(2)
                .filter_map(|raw| Opcodes::try_from(u16::from_be_bytes([raw[0], raw[1]])).ok())
                .map(|opcode| opcode.to_string())
                .collect::<Vec<_>>()
        });
    });
}

pub fn execution_bench(c: &mut Criterion) {
    let mut chip = get_default_chip();
    c.bench_function("execution_bench", |b| {
        b.iter(|| {
            let _ = chip.next();
        });
    });
}

criterion_group!(benches, print_bench, disassemble_bench, execution_bench);
criterion_main!(benches);
