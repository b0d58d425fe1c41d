//! Classical bit register for side-by-side comparison with qubits.

use qlab_hal::Counts;

use crate::error::{AppError, AppResult};

/// Why a classical register never shows more than one outcome.
pub const COMPARISON_NOTE: &str = "Classical bits are deterministic and hold exactly one value (0 or 1) at a time.\n\
Qubits can sit in superposition, so repeated measurements of the same circuit\n\
can return different outcomes until the state is collapsed.";

/// A register of deterministic bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassicalBits {
    bits: Vec<u8>,
}

impl ClassicalBits {
    /// Create a register of `num_bits` zeros.
    pub fn new(num_bits: usize) -> Self {
        Self {
            bits: vec![0; num_bits],
        }
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if the register is empty.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Set bit `index` to `value`, which must be 0 or 1.
    pub fn set_bit(&mut self, index: usize, value: u8) -> AppResult<()> {
        if value > 1 {
            return Err(AppError::Validation(
                "Classical bits must be 0 or 1.".into(),
            ));
        }
        *self.slot(index)? = value;
        Ok(())
    }

    /// Invert bit `index`.
    pub fn flip_bit(&mut self, index: usize) -> AppResult<()> {
        let slot = self.slot(index)?;
        *slot = 1 - *slot;
        Ok(())
    }

    /// The register as a bitstring, bit 0 rightmost.
    pub fn bitstring(&self) -> String {
        self.bits.iter().rev().map(|b| char::from(b'0' + b)).collect()
    }

    /// Read the register `shots` times. Every read agrees.
    pub fn simulate(&self, shots: u32) -> Counts {
        let mut counts = Counts::new();
        counts.insert(self.bitstring(), u64::from(shots));
        counts
    }

    fn slot(&mut self, index: usize) -> AppResult<&mut u8> {
        let len = self.bits.len();
        self.bits.get_mut(index).ok_or_else(|| {
            AppError::Validation(format!("Bit index {index} is out of range for {len} bits"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_flip() {
        let mut bits = ClassicalBits::new(3);
        bits.set_bit(0, 1).unwrap();
        assert_eq!(bits.bitstring(), "001");
        bits.flip_bit(2).unwrap();
        assert_eq!(bits.bitstring(), "101");
        bits.flip_bit(0).unwrap();
        assert_eq!(bits.bitstring(), "100");
    }

    #[test]
    fn test_invalid_value() {
        let mut bits = ClassicalBits::new(1);
        assert!(matches!(bits.set_bit(0, 2), Err(AppError::Validation(_))));
        assert!(matches!(bits.set_bit(1, 0), Err(AppError::Validation(_))));
        assert!(matches!(bits.flip_bit(4), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_simulate_is_deterministic() {
        let mut bits = ClassicalBits::new(2);
        bits.set_bit(1, 1).unwrap();
        let counts = bits.simulate(500);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get("10"), 500);
    }
}
