use core::fmt;
use strum::{Display, EnumIter, EnumString};

/// One of the 16 general-purpose registers, `r0` through `r15`.
///
/// By convention `r15` holds the return address written by `call`, and `r14`
/// is used by assembly programs as a stack pointer; neither is enforced by
/// the machine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum RegisterId {
    /// `r0`
    R0 = 0,
    /// `r1`
    R1 = 1,
    /// `r2`
    R2 = 2,
    /// `r3`
    R3 = 3,
    /// `r4`
    R4 = 4,
    /// `r5`
    R5 = 5,
    /// `r6`
    R6 = 6,
    /// `r7`
    R7 = 7,
    /// `r8`
    R8 = 8,
    /// `r9`
    R9 = 9,
    /// `r10`
    R10 = 10,
    /// `r11`
    R11 = 11,
    /// `r12`
    R12 = 12,
    /// `r13`
    R13 = 13,
    /// `r14`
    R14 = 14,
    /// `r15`, the call return-address register
    R15 = 15,
}

/// Error returned when a 4-bit field does not name one of the 16 registers.
///
/// In practice this can't happen for values decoded from a well-formed
/// instruction word (the field is always 4 bits), but it does happen when
/// the assembler fails to recognize a register mnemonic in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterParseError(pub(crate) u8);

impl fmt::Display for RegisterParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is not a valid register id (expected 0..=15)", self.0)
    }
}

impl std::error::Error for RegisterParseError {}

impl RegisterId {
    /// All 16 register ids in ascending order.
    pub const ALL: [RegisterId; 16] = [
        RegisterId::R0,
        RegisterId::R1,
        RegisterId::R2,
        RegisterId::R3,
        RegisterId::R4,
        RegisterId::R5,
        RegisterId::R6,
        RegisterId::R7,
        RegisterId::R8,
        RegisterId::R9,
        RegisterId::R10,
        RegisterId::R11,
        RegisterId::R12,
        RegisterId::R13,
        RegisterId::R14,
        RegisterId::R15,
    ];

    /// Construct a register id from its 4-bit encoding.
    pub const fn from_u8(v: u8) -> Result<Self, RegisterParseError> {
        use RegisterId::*;
        Ok(match v {
            0 => R0,
            1 => R1,
            2 => R2,
            3 => R3,
            4 => R4,
            5 => R5,
            6 => R6,
            7 => R7,
            8 => R8,
            9 => R9,
            10 => R10,
            11 => R11,
            12 => R12,
            13 => R13,
            14 => R14,
            15 => R15,
            _ => return Err(RegisterParseError(v)),
        })
    }

    /// The 4-bit encoding of this register.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl From<RegisterId> for u8 {
    fn from(r: RegisterId) -> Self {
        r.as_u8()
    }
}

impl TryFrom<u8> for RegisterId {
    type Error = RegisterParseError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Self::from_u8(v)
    }
}
