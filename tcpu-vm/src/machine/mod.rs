//! The CPU: registers, comparison flags, memory, and the fetch-decode-execute loop.

mod alu;
mod flow;
mod memory;

use tcpu_asm::{Instruction, RegisterId, Word};

use crate::consts::{RAM_BASE, RAM_SIZE, ROM_BASE, ROM_SIZE};
use crate::error::CoreError;
use crate::logger;

bitflags::bitflags! {
    /// The CPU's runtime comparison state: which of the three mutually
    /// exclusive relations the last `compare` found, plus a validity bit
    /// distinguishing "never compared" from "compared and found equal" (the
    /// all-false all-invalid state would otherwise be ambiguous with `eq`
    /// happening to be false).
    pub struct ComparisonFlags: u8 {
        /// Set by every `compare`; cleared only at machine reset.
        const VALID = 0b0001;
        /// The last `compare` found its operands equal.
        const EQ    = 0b0010;
        /// The last `compare` found the first operand less than the second.
        const LT    = 0b0100;
        /// The last `compare` found the first operand greater than the second.
        const GT    = 0b1000;
    }
}

/// The virtual machine: 16 general-purpose registers, the instruction
/// pointer, comparison flags, owned ROM/RAM buffers, and an append-only
/// console byte stream.
pub struct Machine {
    registers: [Word; 16],
    ip: Word,
    flags: ComparisonFlags,
    rom: Vec<u8>,
    ram: Vec<u8>,
    console: Vec<u8>,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    /// Construct a machine with zeroed registers, invalid comparison flags,
    /// empty RAM and console, and `ip` at `rom_base`.
    pub fn new() -> Self {
        Machine {
            registers: [0; 16],
            ip: ROM_BASE,
            flags: ComparisonFlags::empty(),
            rom: vec![0u8; ROM_SIZE as usize],
            ram: vec![0u8; RAM_SIZE as usize],
            console: Vec::new(),
        }
    }

    /// Copy a program image into the ROM buffer, starting at offset 0.
    ///
    /// The image may occupy at most `rom_size - 1` bytes; a longer image is
    /// rejected rather than truncated.
    pub fn install_rom(&mut self, rom: &[u8]) -> Result<(), CoreError> {
        let max = self.rom.len() - 1;
        if rom.len() > max {
            return Err(
                CoreError::RomOverflow { image_len: rom.len(), rom_size: self.rom.len() }.logged()
            );
        }
        self.rom[..rom.len()].copy_from_slice(rom);
        Ok(())
    }

    /// The current value of every register, `r0` through `r15`.
    pub fn registers(&self) -> &[Word; 16] {
        &self.registers
    }

    /// The RAM region's current contents.
    pub fn ram(&self) -> &[u8] {
        &self.ram
    }

    /// Every byte written to the console so far.
    pub fn console(&self) -> &[u8] {
        &self.console
    }

    /// The instruction pointer's current value.
    pub fn ip(&self) -> Word {
        self.ip
    }

    fn reg(&self, id: RegisterId) -> Word {
        self.registers[id.as_u8() as usize]
    }

    fn set_reg(&mut self, id: RegisterId, value: Word) {
        self.registers[id.as_u8() as usize] = value;
    }

    fn access(&mut self, is_load: bool, addr: Word, width: u8, value: &mut Word) -> Result<(), CoreError> {
        memory::access(&self.rom, &mut self.ram, &mut self.console, is_load, addr, width, value)
    }

    fn fetch_and_decode(&mut self) -> Result<Instruction, CoreError> {
        let ip = self.ip;
        let mut word = 0u32;
        self.access(true, ip, tcpu_asm::WORD_SIZE as u8, &mut word)?;
        Instruction::decode(word).map_err(|e| decode_error_at(e, word, ip))
    }

    /// Run the fetch-decode-execute loop until `halt` or a fatal error.
    ///
    /// Once this returns `Err`, the machine's state is considered poisoned
    /// and should not be reused.
    pub fn run(&mut self) -> Result<(), CoreError> {
        loop {
            let instr = self.fetch_and_decode()?;
            logger::debug(format!("ip=0x{:08x} {instr}", self.ip));

            let mut halted = false;
            match instr {
                Instruction::Set { dst, imm } => self.set_reg(dst, imm),
                Instruction::Load { addr, dst, width } => {
                    let a = self.reg(addr);
                    let mut v = 0u32;
                    self.access(true, a, width, &mut v)?;
                    self.set_reg(dst, v);
                }
                Instruction::Store { addr, src, width } => {
                    let a = self.reg(addr);
                    let mut v = self.reg(src);
                    self.access(false, a, width, &mut v)?;
                }
                Instruction::Add { dst, op1, op2 } => {
                    let v = self.alu_add(self.reg(op1), self.reg(op2));
                    self.set_reg(dst, v);
                }
                Instruction::Sub { dst, op1, op2 } => {
                    let v = self.alu_sub(self.reg(op1), self.reg(op2));
                    self.set_reg(dst, v);
                }
                Instruction::Halt => halted = true,
                Instruction::Compare { op1, op2 } => {
                    self.do_compare(self.reg(op1), self.reg(op2));
                }
                Instruction::Jump { flag, offset } => {
                    if flow::is_taken(flag, self.flags)? {
                        self.ip = flow::step_toward_offset(self.ip, offset);
                    }
                }
                Instruction::IJump { flag, target } => {
                    if flow::is_taken(flag, self.flags)? {
                        self.ip = flow::step_toward_target(self.reg(target));
                    }
                }
                Instruction::Call { offset } => {
                    self.set_reg(RegisterId::R15, self.ip.wrapping_add(tcpu_asm::WORD_SIZE as Word));
                    self.ip = flow::step_toward_offset(self.ip, offset);
                }
            }

            if halted {
                return Ok(());
            }
            self.ip = self.ip.wrapping_add(tcpu_asm::WORD_SIZE as Word);
        }
    }
}

fn decode_error_at(e: tcpu_asm::DecodeError, word: Word, ip: Word) -> CoreError {
    match e {
        tcpu_asm::DecodeError::BadOpcode(_) => CoreError::BadOpcode { word, ip },
        tcpu_asm::DecodeError::BadFlag(_) => CoreError::BadOpcode { word, ip },
        tcpu_asm::DecodeError::BadWidth(tcpu_asm::EncodeError::BadWidth { width }) => {
            CoreError::BadWidth { width }
        }
        tcpu_asm::DecodeError::BadWidth(_) => CoreError::BadOpcode { word, ip },
    }
    .logged()
}
