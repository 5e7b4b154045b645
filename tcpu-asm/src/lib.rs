//! Instruction word vocabulary and codec for the tcpu virtual machine.
//!
//! This crate owns the bit-exact 32-bit instruction encoding: the register and
//! comparison-flag vocabulary, the [`Instruction`] enum (one variant per opcode,
//! operands embedded inline), and the pack/unpack routines that convert between
//! [`Instruction`] values and raw [`u32`] words. It has no notion of programs,
//! labels, or memory — that belongs to `tcpu-vm`.

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod consts;
mod pack;

mod flag;
mod instruction;
mod register;

pub use consts::*;
pub use flag::Flag;
pub use instruction::{BadOpcode, DecodeError, EncodeError, Instruction};
pub use register::{RegisterParseError, RegisterId};

/// Size of a word, in bytes. Every instruction is exactly one word.
pub const WORD_SIZE: usize = core::mem::size_of::<Word>();

/// The machine's native 32-bit unsigned word type.
pub type Word = u32;

/// The signed two's-complement counterpart of [`Word`].
pub type SignedWord = i32;
