//! Renders a byte image back into canonical mnemonic text.
//!
//! Labels and comments aren't reconstructed — they don't survive encoding —
//! so every jump/call operand is rendered as a literal signed byte offset.
//! Feeding the result back through [`super::assemble`] reproduces the exact
//! same byte image (see the round-trip test in `mod.rs`).

use tcpu_asm::{Instruction, Word};

use crate::error::CoreError;

/// Disassemble a byte image into one instruction-per-line text listing.
pub(super) fn disassemble(rom: &[u8]) -> Result<String, CoreError> {
    if rom.len() % tcpu_asm::WORD_SIZE != 0 {
        return Err(CoreError::BadDisasmInput { image_len: rom.len() }.logged());
    }

    let mut out = String::new();
    for chunk in rom.chunks_exact(tcpu_asm::WORD_SIZE) {
        let word = Word::from_le_bytes(chunk.try_into().expect("chunk is word-sized"));
        let instr = Instruction::decode(word)?;
        out.push_str(&instr.to_string());
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_images_not_a_multiple_of_word_size() {
        assert!(matches!(
            disassemble(&[0, 0, 0]),
            Err(CoreError::BadDisasmInput { image_len: 3 })
        ));
    }

    #[test]
    fn renders_one_line_per_instruction() {
        let image: Vec<u8> = Instruction::halt().encode().to_le_bytes().to_vec();
        assert_eq!(disassemble(&image).unwrap(), "halt\n");
    }
}
