//! Computational basis states addressed by multi-index

use std::fmt;

/// A computational basis state: one bit per tensor axis
///
/// Bit `i` is the coordinate along axis `i` of the state tensor. Axis 0 is
/// the most significant position of the flat amplitude index, so
/// `|011⟩` on three qubits is flat index 3.
///
/// # Example
///
/// ```
/// use qtensor_state::BasisState;
///
/// let basis = BasisState::from_index(3, 3);
/// assert_eq!(basis.bits(), &[0, 1, 1]);
/// assert_eq!(basis.to_index(), 3);
/// assert_eq!(basis.to_string(), "|011⟩");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BasisState(Vec<u8>);

impl BasisState {
    /// Create a basis state from per-axis bits
    ///
    /// Any non-zero entry is read as 1.
    pub fn new(bits: impl Into<Vec<u8>>) -> Self {
        let mut bits = bits.into();
        for bit in bits.iter_mut() {
            *bit = u8::from(*bit != 0);
        }
        Self(bits)
    }

    /// Unravel a flat amplitude index into `num_qubits` bits
    pub fn from_index(index: usize, num_qubits: usize) -> Self {
        let bits = (0..num_qubits)
            .map(|axis| ((index >> (num_qubits - 1 - axis)) & 1) as u8)
            .collect();
        Self(bits)
    }

    /// Flat amplitude index of this basis state
    pub fn to_index(&self) -> usize {
        self.0
            .iter()
            .fold(0usize, |index, &bit| (index << 1) | bit as usize)
    }

    /// Per-axis bits
    #[inline]
    pub fn bits(&self) -> &[u8] {
        &self.0
    }

    /// Bit along a single axis
    #[inline]
    pub fn bit(&self, axis: usize) -> u8 {
        self.0[axis]
    }

    /// Number of qubits addressed
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.0.len()
    }

    /// Bits as a plain `0`/`1` string, e.g. `"011"`
    pub fn as_bitstring(&self) -> String {
        self.0.iter().map(|&bit| if bit == 0 { '0' } else { '1' }).collect()
    }
}

impl From<Vec<u8>> for BasisState {
    fn from(bits: Vec<u8>) -> Self {
        Self::new(bits)
    }
}

impl From<&[u8]> for BasisState {
    fn from(bits: &[u8]) -> Self {
        Self::new(bits.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for BasisState {
    fn from(bits: [u8; N]) -> Self {
        Self::new(bits.to_vec())
    }
}

impl fmt::Display for BasisState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|{}⟩", self.as_bitstring())
    }
}
