//! Operand parsing: registers, integers, and label names/targets.

use std::collections::HashMap;
use std::str::FromStr;

use tcpu_asm::RegisterId;

use crate::error::CoreError;

/// Every opcode's base mnemonic (without a `.width`/`.flag` qualifier). A
/// label may not collide with one of these, same as it may not collide with
/// a register name.
const MNEMONICS: &[&str] =
    &["set", "store", "load", "add", "sub", "halt", "compare", "jump", "ijump", "call"];

fn malformed(line: usize, reason: impl Into<String>) -> CoreError {
    CoreError::MalformedProgram { line, reason: reason.into() }.logged()
}

pub(super) fn parse_register(tok: &str, line: usize) -> Result<RegisterId, CoreError> {
    RegisterId::from_str(tok).map_err(|_| malformed(line, format!("'{tok}' is not a register")))
}

pub(super) fn parse_unsigned(tok: &str, line: usize, max: u32) -> Result<u32, CoreError> {
    let value: u32 =
        tok.parse().map_err(|_| malformed(line, format!("'{tok}' is not an unsigned integer")))?;
    if value > max {
        return Err(malformed(line, format!("{value} exceeds the field's maximum of {max}")));
    }
    Ok(value)
}

/// A `jump`/`call` operand: either a literal signed byte offset, or a label
/// name to resolve against `labels` (word offsets, resolved relative to
/// `current_word_offset`).
pub(super) fn resolve_target(
    tok: &str,
    line: usize,
    current_word_offset: usize,
    labels: &HashMap<String, usize>,
) -> Result<i32, CoreError> {
    if let Ok(literal) = tok.parse::<i32>() {
        return Ok(literal);
    }
    let target = labels
        .get(tok)
        .ok_or_else(|| malformed(line, format!("undefined label '{tok}'")))?;
    let delta = *target as i64 - current_word_offset as i64;
    let byte_offset = delta * tcpu_asm::WORD_SIZE as i64;
    i32::try_from(byte_offset)
        .map_err(|_| malformed(line, format!("branch to '{tok}' is out of encodable range")))
}

/// Validate a candidate label name: non-empty, starts with a letter, the
/// rest alphanumeric/underscore, and doesn't collide with a register or
/// opcode mnemonic.
pub(super) fn validate_label_name(name: &str, line: usize) -> Result<(), CoreError> {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return Err(malformed(line, format!("label '{name}' must start with a letter"))),
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(malformed(
            line,
            format!("label '{name}' may only contain letters, digits, and underscores"),
        ));
    }
    if RegisterId::from_str(name).is_ok() {
        return Err(malformed(line, format!("label '{name}' collides with a register name")));
    }
    if MNEMONICS.contains(&name) {
        return Err(malformed(line, format!("label '{name}' collides with an opcode mnemonic")));
    }
    Ok(())
}
