//! Two-pass text assembler and its inverse, the disassembler.

mod disasm;
mod emit;
mod lexer;
mod parse;

use crate::error::CoreError;

/// Assemble program text into a little-endian byte image.
pub fn assemble(text: &str) -> Result<Vec<u8>, CoreError> {
    emit::assemble(text)
}

/// Disassemble a byte image into canonical mnemonic text, one instruction
/// per line.
pub fn disassemble(rom: &[u8]) -> Result<String, CoreError> {
    disasm::disassemble(rom)
}
