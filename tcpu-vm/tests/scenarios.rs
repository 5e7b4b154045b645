//! End-to-end scenarios: assemble real program text, run it to completion,
//! and check the machine's observable state. These exercise the assembler
//! and the machine together, unlike the unit tests embedded in each module.

use tcpu_vm::consts::{RAM_BASE, ROM_BASE};
use tcpu_vm::{assemble, CoreError, Machine};

fn run(src: &str) -> Machine {
    let image = assemble(src).expect("program should assemble");
    let mut m = Machine::new();
    m.install_rom(&image).expect("image should fit in rom");
    m.run().expect("program should halt without error");
    m
}

#[test]
fn hello_world_writes_console_bytes() {
    let mut src = String::new();
    for byte in b"Hello world!" {
        src.push_str(&format!("set r1 {byte}\nstore.1 r0 r1\n"));
    }
    src.push_str("halt\n");
    let m = run(&src);
    assert_eq!(m.console(), b"Hello world!");
}

#[test]
fn add_from_rom_literal_words_to_ram() {
    let prog = format!(
        "set r1 {a}\nset r2 {b}\nload.4 r1 r3\nload.4 r2 r4\nadd r5 r3 r4\nset r6 {ram}\nstore.4 r6 r5\nhalt\n",
        a = ROM_BASE + 256,
        b = ROM_BASE + 260,
        ram = RAM_BASE,
    );
    let program = assemble(&prog).unwrap();
    assert!(program.len() <= 256, "program must not overlap the data words at offset 256");

    let mut image = program;
    image.resize(256, 0);
    image.extend_from_slice(&42u32.to_le_bytes());
    image.extend_from_slice(&43u32.to_le_bytes());

    let mut m = Machine::new();
    m.install_rom(&image).unwrap();
    m.run().unwrap();
    assert_eq!(u32::from_le_bytes(m.ram()[0..4].try_into().unwrap()), 85);
}

#[test]
fn backward_branch_loop_counts_to_five() {
    let src = "set r1 5\nset r2 1\nset r0 0\nadd r0 r0 r2\ncompare r0 r1\njump.ne -8\nhalt\n";
    let m = run(src);
    assert_eq!(m.registers()[0], 5);
}

#[test]
fn call_and_return_via_r15() {
    let src = "set r1 5\nset r2 7\ncall my_func\nhalt\nmy_func:\nadd r0 r1 r2\nijump r15\n";
    let m = run(src);
    assert_eq!(m.registers()[0], 12);
}

#[test]
fn jump_flag_truth_table_matches_standard_relations() {
    let cases: &[((u32, u32), &str, bool)] = &[
        ((1, 1), "eq", true),
        ((1, 0), "eq", false),
        ((1, 1), "ne", false),
        ((1, 0), "ne", true),
        ((1, 0), "gt", true),
        ((1, 2), "gt", false),
        ((1, 1), "ge", true),
        ((1, 0), "ge", true),
        ((1, 2), "ge", false),
        ((1, 2), "lt", true),
        ((1, 0), "lt", false),
        ((1, 1), "le", true),
        ((1, 2), "le", true),
        ((1, 0), "le", false),
    ];

    for &((a, b), flag, expected_taken) in cases {
        let src = format!(
            "set r1 {a}\nset r2 {b}\ncompare r1 r2\njump.{flag} taken\nset r3 0\nhalt\ntaken:\nset r3 1\nhalt\n"
        );
        let m = run(&src);
        let took = m.registers()[3] == 1;
        assert_eq!(took, expected_taken, "flag {flag} with ({a}, {b})");
    }
}

#[test]
fn fibonacci_via_recursive_calls_using_a_ram_stack() {
    // Frame layout at [sp+0..12): saved r15, saved n, saved fib(n-1).
    // r6=8, r8=4, r9=12 are frame-offset/size constants; r11=1, r12=2 are
    // the comparison/decrement constants for the two base cases.
    let body = "\
        compare r10 r11\n\
        jump.eq fib_base1\n\
        compare r10 r12\n\
        jump.eq fib_base2\n\
        store.4 r14 r15\n\
        add r7 r14 r8\n\
        store.4 r7 r10\n\
        add r14 r14 r9\n\
        sub r10 r10 r11\n\
        call fib\n\
        sub r14 r14 r9\n\
        add r7 r14 r6\n\
        store.4 r7 r13\n\
        add r7 r14 r8\n\
        load.4 r7 r10\n\
        sub r10 r10 r12\n\
        add r14 r14 r9\n\
        call fib\n\
        sub r14 r14 r9\n\
        add r7 r14 r6\n\
        load.4 r7 r0\n\
        add r13 r13 r0\n\
        load.4 r14 r15\n\
        ijump r15\n\
    fib_base1:\n\
        set r13 1\n\
        ijump r15\n\
    fib_base2:\n\
        set r13 2\n\
        ijump r15\n\
    ";

    let expected = [(1u32, 1u32), (2, 2), (3, 3), (4, 5), (5, 8)];
    for (n, want) in expected {
        let src = format!(
            "set r14 {ram}\nset r8 4\nset r6 8\nset r9 12\nset r11 1\nset r12 2\nset r10 {n}\ncall fib\nhalt\nfib:\n{body}",
            ram = RAM_BASE,
        );
        let m = run(&src);
        assert_eq!(m.registers()[13], want, "fib({n})");
    }
}

#[test]
fn fetching_past_installed_program_without_a_halt_is_fatal() {
    let program = assemble("set r0 1\n").unwrap();
    let mut m = Machine::new();
    m.install_rom(&program).unwrap();
    let err = m.run().unwrap_err();
    assert!(matches!(err, CoreError::BadAddress { .. }));
}
