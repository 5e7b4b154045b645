//! The machine's address space: page size and the base/size of every region.
//!
//! Kept as a dedicated module, separate from the codec's own `consts`, since
//! these numbers describe the machine's memory map rather than the
//! instruction word's bit layout — the two crates have no reason to share a
//! source of truth here.

/// Size of one page, and the unit every region's base address is a multiple
/// of.
pub const PAGE_SIZE: u32 = 16384;

/// Byte address of the console's single writable location.
pub const CONSOLE_WRITE: u32 = PAGE_SIZE * 4;

/// First byte address of the ROM region.
pub const ROM_BASE: u32 = PAGE_SIZE * 5;
/// Size, in bytes, of the ROM region.
pub const ROM_SIZE: u32 = PAGE_SIZE;

/// First byte address of the RAM region.
pub const RAM_BASE: u32 = PAGE_SIZE * 6;
/// Size, in bytes, of the RAM region.
pub const RAM_SIZE: u32 = PAGE_SIZE;

const fn regions_disjoint(a_base: u32, a_size: u32, b_base: u32, b_size: u32) -> bool {
    a_base + a_size <= b_base || b_base + b_size <= a_base
}

static_assertions::const_assert!(PAGE_SIZE.is_power_of_two());
static_assertions::const_assert!(PAGE_SIZE as usize % tcpu_asm::WORD_SIZE == 0);
static_assertions::const_assert!(regions_disjoint(CONSOLE_WRITE, 1, ROM_BASE, ROM_SIZE));
static_assertions::const_assert!(regions_disjoint(CONSOLE_WRITE, 1, RAM_BASE, RAM_SIZE));
static_assertions::const_assert!(regions_disjoint(ROM_BASE, ROM_SIZE, RAM_BASE, RAM_SIZE));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_match_the_documented_addresses() {
        assert_eq!(CONSOLE_WRITE, 65536);
        assert_eq!(ROM_BASE, 81920);
        assert_eq!(RAM_BASE, 98304);
        assert_eq!(ROM_SIZE, 16384);
        assert_eq!(RAM_SIZE, 16384);
    }
}
