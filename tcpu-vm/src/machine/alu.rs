//! Arithmetic and comparison: `add`, `sub`, `compare`.

use std::cmp::Ordering;

use super::{ComparisonFlags, Machine};

impl Machine {
    pub(super) fn alu_add(&self, a: u32, b: u32) -> u32 {
        a.wrapping_add(b)
    }

    pub(super) fn alu_sub(&self, a: u32, b: u32) -> u32 {
        a.wrapping_sub(b)
    }

    /// Compare two register values by unsigned ordering and record the
    /// result, marking the flag set valid.
    pub(super) fn do_compare(&mut self, a: u32, b: u32) {
        let result = match a.cmp(&b) {
            Ordering::Equal => ComparisonFlags::EQ,
            Ordering::Less => ComparisonFlags::LT,
            Ordering::Greater => ComparisonFlags::GT,
        };
        self.flags = ComparisonFlags::VALID | result;
    }
}
