//! The crate-wide fatal-condition vocabulary.
//!
//! Every fallible boundary in this crate — the assembler, the disassembler,
//! and the machine's execute loop — returns `Result<T, CoreError>`. There is
//! one shared enum rather than a per-module error type, so a caller never has
//! to match on three different error hierarchies to report a failure.

/// Everything that can make assembling, disassembling, or running a program
/// fail. Carries enough context (line number, address, offending value) to
/// produce an actionable message without a debugger.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum CoreError {
    /// The assembler rejected the source text: unknown mnemonic, wrong
    /// operand count, an operand out of range, or a label problem.
    #[display(fmt = "line {line}: {reason}")]
    MalformedProgram {
        /// 1-based source line number.
        line: usize,
        /// Human-readable description of what was wrong with the line.
        reason: String,
    },
    /// A codec constructor rejected an operand that doesn't fit the
    /// instruction's field width.
    #[display(fmt = "{mnemonic}: value {value} out of range [{min}, {max}]")]
    EncodingOverflow {
        /// The mnemonic being assembled.
        mnemonic: &'static str,
        /// The rejected value.
        value: i64,
        /// Smallest legal value, inclusive.
        min: i64,
        /// Largest legal value, inclusive.
        max: i64,
    },
    /// A memory access named an address outside every defined region.
    #[display(fmt = "bad address 0x{address:08x} (width {width})")]
    BadAddress {
        /// The offending byte address.
        address: u32,
        /// The access width in bytes.
        width: u8,
    },
    /// A memory access wasn't naturally aligned to its width.
    #[display(fmt = "address 0x{address:08x} is not aligned to width {width}")]
    BadAlignment {
        /// The offending byte address.
        address: u32,
        /// The access width in bytes.
        width: u8,
    },
    /// A `load`/`store` named a width other than 1, 2, or 4 bytes.
    #[display(fmt = "width {width} is not one of 1, 2, 4")]
    BadWidth {
        /// The rejected width.
        width: u8,
    },
    /// A store targeted a read-only region (ROM, or any console address
    /// other than `console_write`).
    #[display(fmt = "address 0x{address:08x} is read-only")]
    ReadOnlyWrite {
        /// The offending byte address.
        address: u32,
    },
    /// The fetch step decoded a word whose low byte names no opcode.
    #[display(fmt = "unknown opcode in word 0x{word:08x} fetched from ip=0x{ip:08x}")]
    BadOpcode {
        /// The raw instruction word.
        word: u32,
        /// The instruction pointer it was fetched from.
        ip: u32,
    },
    /// A conditional jump/ijump with flag != unc executed while the CPU's
    /// comparison state was still invalid (no `compare` has run yet).
    #[display(fmt = "flag {flag} tested before any compare executed")]
    FlagsInvalid {
        /// The instruction-level flag that was tested.
        flag: tcpu_asm::Flag,
    },
    /// The program image installed into ROM exceeded the ROM region's size.
    #[display(fmt = "program image is {image_len} bytes, rom holds only {rom_size}")]
    RomOverflow {
        /// Length of the rejected image, in bytes.
        image_len: usize,
        /// Capacity of the ROM region, in bytes.
        rom_size: usize,
    },
    /// A disassembler input's length wasn't a multiple of the word size.
    #[display(fmt = "image length {image_len} is not a multiple of the word size")]
    BadDisasmInput {
        /// Length of the rejected image, in bytes.
        image_len: usize,
    },
}

impl std::error::Error for CoreError {}

impl CoreError {
    /// Log this error at `err` severity and return it unchanged.
    ///
    /// Every fatal-condition constructor in the crate routes its result
    /// through this, so a failure is visible in the log stream the moment it
    /// is raised rather than only if a caller happens to print the `Result`
    /// it eventually propagates to.
    pub(crate) fn logged(self) -> Self {
        crate::logger::err(&self);
        self
    }
}

impl From<tcpu_asm::EncodeError> for CoreError {
    fn from(e: tcpu_asm::EncodeError) -> Self {
        match e {
            tcpu_asm::EncodeError::OutOfRange { mnemonic, value, min, max } => {
                CoreError::EncodingOverflow { mnemonic, value, min, max }
            }
            tcpu_asm::EncodeError::Misaligned { mnemonic, offset } => CoreError::MalformedProgram {
                line: 0,
                reason: format!("{mnemonic}: offset {offset} is not instruction-aligned"),
            },
            tcpu_asm::EncodeError::BadWidth { width } => CoreError::BadWidth { width },
        }
        .logged()
    }
}

impl From<tcpu_asm::DecodeError> for CoreError {
    fn from(e: tcpu_asm::DecodeError) -> Self {
        match e {
            tcpu_asm::DecodeError::BadOpcode(tcpu_asm::BadOpcode(byte)) => {
                CoreError::BadOpcode { word: byte as u32, ip: 0 }
            }
            tcpu_asm::DecodeError::BadWidth(tcpu_asm::EncodeError::BadWidth { width }) => {
                CoreError::BadWidth { width }
            }
            tcpu_asm::DecodeError::BadWidth(_) => CoreError::BadWidth { width: 0 },
            // A flag field that doesn't decode is, like an unknown opcode byte,
            // a corrupt instruction word rather than an assembler-level
            // problem — classified the same way `machine::decode_error_at`
            // classifies it for the execute path.
            tcpu_asm::DecodeError::BadFlag(bits) => CoreError::BadOpcode { word: bits as u32, ip: 0 },
        }
        .logged()
    }
}
