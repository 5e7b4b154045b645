//! Control transfer: `is_taken` plus the `jump`/`ijump`/`call` step logic.

use tcpu_asm::{Flag, Word};

use crate::error::CoreError;

use super::ComparisonFlags;

/// Decide whether a conditional transfer with the given instruction-level
/// flag should be taken, given the CPU's current comparison state.
///
/// `unc` is always taken regardless of validity. Every other flag requires
/// the state to be valid — including `ne`, despite the unconditional-looking
/// shape of "not equal"; an un-`compare`d program that tries `jump.ne` is
/// just as much a programming error as `jump.eq`.
pub(super) fn is_taken(flag: Flag, flags: ComparisonFlags) -> Result<bool, CoreError> {
    if flag == Flag::Unc {
        return Ok(true);
    }
    if !flags.contains(ComparisonFlags::VALID) {
        return Err(CoreError::FlagsInvalid { flag }.logged());
    }
    let eq = flags.contains(ComparisonFlags::EQ);
    let lt = flags.contains(ComparisonFlags::LT);
    let gt = flags.contains(ComparisonFlags::GT);
    Ok(match flag {
        Flag::Unc => true,
        Flag::Eq => eq,
        Flag::Ne => !eq,
        Flag::Gt => gt,
        Flag::Ge => gt || eq,
        Flag::Lt => lt,
        Flag::Le => lt || eq,
    })
}

/// `ip`'s value after a jump/call step's mid-step adjustment, before the
/// execute loop's own end-of-step `+= word_size` lands it on the target.
pub(super) fn step_toward_offset(ip: Word, offset: i32) -> Word {
    ip.wrapping_add((offset - tcpu_asm::WORD_SIZE as i32) as u32)
}

/// Same adjustment for `ijump`, whose operand is an absolute target rather
/// than a relative offset.
pub(super) fn step_toward_target(target: Word) -> Word {
    target.wrapping_sub(tcpu_asm::WORD_SIZE as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unc_is_always_taken() {
        assert_eq!(is_taken(Flag::Unc, ComparisonFlags::empty()), Ok(true));
    }

    #[test]
    fn non_unc_requires_valid_flags() {
        assert_eq!(
            is_taken(Flag::Ne, ComparisonFlags::empty()),
            Err(CoreError::FlagsInvalid { flag: Flag::Ne })
        );
    }

    #[test]
    fn truth_table_matches_standard_relations() {
        let eq = ComparisonFlags::VALID | ComparisonFlags::EQ;
        let lt = ComparisonFlags::VALID | ComparisonFlags::LT;
        let gt = ComparisonFlags::VALID | ComparisonFlags::GT;

        assert_eq!(is_taken(Flag::Eq, eq), Ok(true));
        assert_eq!(is_taken(Flag::Ne, eq), Ok(false));
        assert_eq!(is_taken(Flag::Ne, lt), Ok(true));
        assert_eq!(is_taken(Flag::Gt, gt), Ok(true));
        assert_eq!(is_taken(Flag::Ge, gt), Ok(true));
        assert_eq!(is_taken(Flag::Ge, eq), Ok(true));
        assert_eq!(is_taken(Flag::Ge, lt), Ok(false));
        assert_eq!(is_taken(Flag::Lt, lt), Ok(true));
        assert_eq!(is_taken(Flag::Le, lt), Ok(true));
        assert_eq!(is_taken(Flag::Le, eq), Ok(true));
        assert_eq!(is_taken(Flag::Le, gt), Ok(false));
    }

    #[test]
    fn step_toward_offset_then_loop_increment_lands_on_target() {
        let ip = 100u32;
        let offset = 40i32;
        let mid = step_toward_offset(ip, offset);
        assert_eq!(mid.wrapping_add(tcpu_asm::WORD_SIZE as u32), ip.wrapping_add(offset as u32));
    }
}
