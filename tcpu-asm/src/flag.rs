use strum::{Display, EnumIter, EnumString};

/// Comparison-flag qualifier carried as an immediate field inside `jump`/`ijump`.
///
/// This is the *instruction-level* flag — a static choice baked into the
/// encoded word. It is distinct from the CPU's *runtime* comparison state
/// (`eq`/`lt`/`gt` bits plus an invalid sentinel), which lives in `tcpu-vm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Flag {
    /// Branch unconditionally.
    Unc = 0,
    /// Branch if the last `compare` found its operands equal.
    Eq = 1,
    /// Branch if the last `compare` found its operands unequal.
    Ne = 2,
    /// Branch if the last `compare` found the first operand greater.
    Gt = 3,
    /// Branch if the last `compare` found the first operand greater or equal.
    Ge = 4,
    /// Branch if the last `compare` found the first operand less.
    Lt = 5,
    /// Branch if the last `compare` found the first operand less or equal.
    Le = 6,
}

impl Flag {
    /// All seven flags, in their 4-bit encoded order.
    pub const ALL: [Flag; 7] = [
        Flag::Unc,
        Flag::Eq,
        Flag::Ne,
        Flag::Gt,
        Flag::Ge,
        Flag::Lt,
        Flag::Le,
    ];

    /// Decode a flag from its 4-bit encoding. Values above 6 are reserved.
    pub const fn from_u8(v: u8) -> Option<Self> {
        use Flag::*;
        Some(match v {
            0 => Unc,
            1 => Eq,
            2 => Ne,
            3 => Gt,
            4 => Ge,
            5 => Lt,
            6 => Le,
            _ => return None,
        })
    }

    /// The 4-bit encoding of this flag.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}
