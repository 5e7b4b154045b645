//! Two-pass assembly: label collection, then per-mnemonic instruction emission.

use std::collections::HashMap;
use std::str::FromStr;

use tcpu_asm::{Flag, Instruction, SET_IMM_MAX};

use crate::error::CoreError;

use super::lexer::{self, Line};
use super::parse::{parse_register, parse_unsigned, resolve_target, validate_label_name};

fn malformed(line: usize, reason: impl Into<String>) -> CoreError {
    CoreError::MalformedProgram { line, reason: reason.into() }.logged()
}

fn expect_operands<'a>(
    mnemonic_token: &str,
    tokens: &[&'a str],
    count: usize,
    line: usize,
) -> Result<&'a [&'a str], CoreError> {
    let operands = &tokens[1..];
    if operands.len() != count {
        return Err(malformed(
            line,
            format!("'{mnemonic_token}' takes {count} operand(s), got {}", operands.len()),
        ));
    }
    Ok(operands)
}

fn parse_width(qualifier: Option<&str>, line: usize) -> Result<u8, CoreError> {
    match qualifier {
        None => Ok(4),
        Some("1") => Ok(1),
        Some("2") => Ok(2),
        Some("4") => Ok(4),
        Some(other) => Err(malformed(line, format!("'{other}' is not a valid width qualifier"))),
    }
}

/// Map a codec-level encode error into a [`CoreError`], filling in the
/// source line the blanket `From<EncodeError>` conversion can't know about.
fn encode_err(e: tcpu_asm::EncodeError, line: usize) -> CoreError {
    match e {
        tcpu_asm::EncodeError::Misaligned { mnemonic, offset } => CoreError::MalformedProgram {
            line,
            reason: format!(
                "{mnemonic}: offset {offset} is not a multiple of {}",
                tcpu_asm::WORD_SIZE
            ),
        }
        .logged(),
        other => other.into(),
    }
}

fn parse_flag(qualifier: Option<&str>, line: usize) -> Result<Flag, CoreError> {
    match qualifier {
        None => Ok(Flag::Unc),
        Some(s) => {
            Flag::from_str(s).map_err(|_| malformed(line, format!("'{s}' is not a comparison flag")))
        }
    }
}

/// Walk the whole program once, recording each label's word offset and
/// buffering the tokenized body lines that will emit one instruction each.
fn collect_labels<'a>(
    lines: &'a [Line<'a>],
) -> Result<(HashMap<String, usize>, Vec<&'a Line<'a>>), CoreError> {
    let mut labels = HashMap::new();
    let mut body = Vec::new();
    let mut word_offset = 0usize;

    for line in lines {
        if let Some(name) = lexer::label_name(line) {
            validate_label_name(name, line.number)?;
            if labels.insert(name.to_string(), word_offset).is_some() {
                return Err(malformed(line.number, format!("duplicate label '{name}'")));
            }
        } else {
            body.push(line);
            word_offset += 1;
        }
    }

    Ok((labels, body))
}

fn emit_one(
    line: &Line<'_>,
    word_offset: usize,
    labels: &HashMap<String, usize>,
) -> Result<Instruction, CoreError> {
    let tokens = &line.tokens;
    let ln = line.number;
    let mut parts = tokens[0].splitn(2, '.');
    let base = parts.next().unwrap();
    let qualifier = parts.next();

    let instr = match base {
        "set" => {
            let ops = expect_operands("set", tokens, 2, ln)?;
            let dst = parse_register(ops[0], ln)?;
            let imm = parse_unsigned(ops[1], ln, SET_IMM_MAX)?;
            Instruction::set(dst, imm).map_err(|e| encode_err(e, ln))?
        }
        "load" | "store" => {
            let width = parse_width(qualifier, ln)?;
            let ops = expect_operands(tokens[0], tokens, 2, ln)?;
            let addr = parse_register(ops[0], ln)?;
            let other = parse_register(ops[1], ln)?;
            if base == "load" {
                Instruction::load(addr, other, width).map_err(|e| encode_err(e, ln))?
            } else {
                Instruction::store(addr, other, width).map_err(|e| encode_err(e, ln))?
            }
        }
        "add" | "sub" => {
            let ops = expect_operands(base, tokens, 3, ln)?;
            let dst = parse_register(ops[0], ln)?;
            let op1 = parse_register(ops[1], ln)?;
            let op2 = parse_register(ops[2], ln)?;
            if base == "add" {
                Instruction::add(dst, op1, op2)
            } else {
                Instruction::sub(dst, op1, op2)
            }
        }
        "halt" => {
            expect_operands("halt", tokens, 0, ln)?;
            Instruction::halt()
        }
        "compare" => {
            let ops = expect_operands("compare", tokens, 2, ln)?;
            let op1 = parse_register(ops[0], ln)?;
            let op2 = parse_register(ops[1], ln)?;
            Instruction::compare(op1, op2)
        }
        "jump" => {
            let flag = parse_flag(qualifier, ln)?;
            let ops = expect_operands(tokens[0], tokens, 1, ln)?;
            let offset = resolve_target(ops[0], ln, word_offset, labels)?;
            Instruction::jump(flag, offset).map_err(|e| encode_err(e, ln))?
        }
        "ijump" => {
            let flag = parse_flag(qualifier, ln)?;
            let ops = expect_operands(tokens[0], tokens, 1, ln)?;
            let target = parse_register(ops[0], ln)?;
            Instruction::ijump(flag, target)
        }
        "call" => {
            let ops = expect_operands("call", tokens, 1, ln)?;
            let offset = resolve_target(ops[0], ln, word_offset, labels)?;
            Instruction::call(offset).map_err(|e| encode_err(e, ln))?
        }
        other => return Err(malformed(ln, format!("unknown mnemonic '{other}'"))),
    };
    Ok(instr)
}

/// Assemble program text into a little-endian byte image.
pub(super) fn assemble(text: &str) -> Result<Vec<u8>, CoreError> {
    let lines = lexer::tokenize(text);
    let (labels, body) = collect_labels(&lines)?;

    let mut image = Vec::with_capacity(body.len() * tcpu_asm::WORD_SIZE);
    for (word_offset, line) in body.into_iter().enumerate() {
        let instr = emit_one(line, word_offset, &labels)?;
        image.extend_from_slice(&instr.encode().to_le_bytes());
    }
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hello_world_assembles_to_expected_word_count() {
        let src = "set r1 72\nstore.1 r0 r1\nhalt\n";
        let image = assemble(src).unwrap();
        assert_eq!(image.len(), 3 * tcpu_asm::WORD_SIZE);
    }

    #[test]
    fn backward_branch_loop_resolves_without_a_label() {
        let src = "set r1 5\nset r2 1\nset r0 0\nadd r0 r0 r2\ncompare r0 r1\njump.ne -8\nhalt\n";
        assert!(assemble(src).is_ok());
    }

    #[test]
    fn labels_resolve_to_relative_offsets() {
        let src = "set r1 5\nset r2 7\ncall my_func\nhalt\nmy_func:\nadd r0 r1 r2\nijump r15\n";
        let image = assemble(src).unwrap();
        // call's operand resolves to the same bytes as the literal-offset form.
        let literal = "set r1 5\nset r2 7\ncall 8\nhalt\nadd r0 r1 r2\nijump r15\n";
        assert_eq!(image, assemble(literal).unwrap());
    }

    #[test]
    fn unknown_mnemonic_is_rejected_with_line_number() {
        let err = assemble("bogus r0\n").unwrap_err();
        assert!(matches!(err, CoreError::MalformedProgram { line: 1, .. }));
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        let src = "loop:\nhalt\nloop:\nhalt\n";
        assert!(matches!(assemble(src), Err(CoreError::MalformedProgram { .. })));
    }

    #[test]
    fn wrong_operand_count_is_rejected() {
        assert!(assemble("add r0 r1\n").is_err());
    }
}
