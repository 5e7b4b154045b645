//! Raw opcode byte values and the legal operand ranges every constructor enforces.
//!
//! Keeping these as named constants (rather than burying the numbers in
//! `match` arms) gives the assembler and the codec's own tests one shared
//! source of truth for opcode byte values, the way fuel-asm's
//! `opcode::consts` module names every opcode byte as one `OpcodeRepr` enum
//! rather than scattering the values across call sites.

/// `set`'s raw opcode byte.
pub const OP_SET: u8 = 0x00;
/// `load`'s raw opcode byte.
pub const OP_LOAD: u8 = 0x01;
/// `store`'s raw opcode byte.
pub const OP_STORE: u8 = 0x02;
/// `add`'s raw opcode byte.
pub const OP_ADD: u8 = 0x03;
/// `sub`'s raw opcode byte.
pub const OP_SUB: u8 = 0x04;
/// `halt`'s raw opcode byte.
pub const OP_HALT: u8 = 0x05;
/// `compare`'s raw opcode byte.
pub const OP_COMPARE: u8 = 0x06;
/// `jump`'s raw opcode byte.
pub const OP_JUMP: u8 = 0x07;
/// `ijump`'s raw opcode byte.
pub const OP_IJUMP: u8 = 0x08;
/// `call`'s raw opcode byte.
pub const OP_CALL: u8 = 0x09;

/// Largest immediate `set` can load (20 bits, zero-extended): `2^20 - 1`.
pub const SET_IMM_MAX: u32 = (1 << 20) - 1;

/// Width selector for a 1-byte memory access.
pub const WIDTH_SEL_1: u8 = 0;
/// Width selector for a 2-byte memory access.
pub const WIDTH_SEL_2: u8 = 1;
/// Width selector for a 4-byte memory access.
pub const WIDTH_SEL_4: u8 = 2;

/// Number of bits in `jump`'s encoded word-offset field.
pub const JUMP_OFFSET_BITS: u32 = 20;
/// Number of bits in `call`'s encoded word-offset field.
pub const CALL_OFFSET_BITS: u32 = 24;

/// Smallest legal `jump` byte offset (a multiple of [`crate::WORD_SIZE`]).
pub const JUMP_OFFSET_MIN: i32 = -(((1i32 << (JUMP_OFFSET_BITS - 1)) - 1) * crate::WORD_SIZE as i32);
/// Largest legal `jump` byte offset (a multiple of [`crate::WORD_SIZE`]).
pub const JUMP_OFFSET_MAX: i32 = ((1i32 << (JUMP_OFFSET_BITS - 1)) - 1) * crate::WORD_SIZE as i32;

/// Smallest legal `call` byte offset (a multiple of [`crate::WORD_SIZE`]).
pub const CALL_OFFSET_MIN: i32 = -(((1i32 << (CALL_OFFSET_BITS - 1)) - 1) * crate::WORD_SIZE as i32);
/// Largest legal `call` byte offset (a multiple of [`crate::WORD_SIZE`]).
pub const CALL_OFFSET_MAX: i32 = ((1i32 << (CALL_OFFSET_BITS - 1)) - 1) * crate::WORD_SIZE as i32;

static_assertions::const_assert!(JUMP_OFFSET_MIN == -JUMP_OFFSET_MAX);
static_assertions::const_assert!(CALL_OFFSET_MIN == -CALL_OFFSET_MAX);
static_assertions::const_assert!(JUMP_OFFSET_BITS < CALL_OFFSET_BITS);
