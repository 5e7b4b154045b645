//! Assembler, disassembler, and fetch-decode-execute machine for the tcpu
//! virtual processor.
//!
//! This crate builds on the instruction vocabulary and codec in `tcpu-asm`
//! to provide the rest of the system: [`assemble`]/[`disassemble`] convert
//! between program text and a ROM byte image; [`Machine`] owns the
//! registers, memory, and comparison flags and runs that image to
//! completion. [`error::CoreError`] is the one error type every fallible
//! function here returns. [`logger`] and [`test_harness`] are the ambient
//! diagnostics and in-process test registry the rest of the crate is built
//! on.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod consts;
pub mod error;
pub mod logger;
pub mod test_harness;

mod assembler;
mod machine;

pub use assembler::{assemble, disassemble};
pub use error::CoreError;
pub use machine::{ComparisonFlags, Machine};
