//! Gate tensors

use crate::matrices;
use ndarray::{Array2, ArrayD, ArrayViewD, Dimension, IxDyn};
use num_complex::Complex64;
use qtensor_state::{Result, StateError};
use std::borrow::Cow;
use std::fmt;

/// An immutable k-qubit gate stored as a rank-2k tensor
///
/// Every axis has extent 2. The first k axes index the output basis state
/// and the last k axes the input basis state, so the row-major flattening of
/// the tensor is the usual `2^k × 2^k` operator matrix.
///
/// Unitarity is not checked on construction; see [`Gate::is_unitary`].
///
/// # Example
/// ```
/// use qtensor_gates::Gate;
///
/// let h = Gate::hadamard();
/// assert_eq!(h.name(), "H");
/// assert_eq!(h.num_qubits(), 1);
/// assert_eq!(h.tensor().shape(), &[2, 2]);
/// assert!(h.is_unitary(1e-12));
/// ```
#[derive(Clone, PartialEq)]
pub struct Gate {
    name: Cow<'static, str>,
    tensor: ArrayD<Complex64>,
}

impl Gate {
    fn from_rows<const N: usize>(
        name: impl Into<Cow<'static, str>>,
        matrix: &[[Complex64; N]; N],
    ) -> Self {
        let k = N.trailing_zeros() as usize;
        let tensor = ArrayD::from_shape_fn(IxDyn(&vec![2; 2 * k]), |index| {
            let bits = index.slice();
            let fold = |acc: usize, &bit: &usize| (acc << 1) | bit;
            let row = bits[..k].iter().fold(0, fold);
            let col = bits[k..].iter().fold(0, fold);
            matrix[row][col]
        });
        Self {
            name: name.into(),
            tensor,
        }
    }

    /// Single-qubit gate from a 2×2 matrix
    pub fn from_matrix2(name: impl Into<Cow<'static, str>>, matrix: &[[Complex64; 2]; 2]) -> Self {
        Self::from_rows(name, matrix)
    }

    /// Two-qubit gate from a 4×4 matrix
    pub fn from_matrix4(name: impl Into<Cow<'static, str>>, matrix: &[[Complex64; 4]; 4]) -> Self {
        Self::from_rows(name, matrix)
    }

    /// Three-qubit gate from an 8×8 matrix
    pub fn from_matrix8(name: impl Into<Cow<'static, str>>, matrix: &[[Complex64; 8]; 8]) -> Self {
        Self::from_rows(name, matrix)
    }

    /// Gate from an arbitrary tensor in `[out.., in..]` axis order
    ///
    /// # Errors
    /// Returns `ShapeMismatch` if the rank is zero or odd, or any axis has
    /// extent other than 2.
    pub fn from_tensor(
        name: impl Into<Cow<'static, str>>,
        tensor: ArrayD<Complex64>,
    ) -> Result<Self> {
        let rank = tensor.ndim();
        if rank == 0 || rank % 2 != 0 {
            return Err(StateError::ShapeMismatch {
                expected: (rank + rank % 2).max(2),
                actual: rank,
            });
        }
        if let Some(&extent) = tensor.shape().iter().find(|&&extent| extent != 2) {
            return Err(StateError::ShapeMismatch {
                expected: 2,
                actual: extent,
            });
        }
        Ok(Self {
            name: name.into(),
            tensor,
        })
    }

    pub fn pauli_x() -> Self {
        Self::from_matrix2("X", &matrices::PAULI_X)
    }

    pub fn pauli_y() -> Self {
        Self::from_matrix2("Y", &matrices::PAULI_Y)
    }

    pub fn pauli_z() -> Self {
        Self::from_matrix2("Z", &matrices::PAULI_Z)
    }

    /// Phase rotation `diag(1, e^{iθ})`
    pub fn phase(theta: f64) -> Self {
        Self::from_matrix2(format!("R({})", theta), &matrices::phase(theta))
    }

    /// S = R(π/2)
    pub fn s() -> Self {
        Self::from_matrix2("S", &matrices::phase(std::f64::consts::FRAC_PI_2))
    }

    /// T = R(π/4)
    pub fn t() -> Self {
        Self::from_matrix2("T", &matrices::phase(std::f64::consts::FRAC_PI_4))
    }

    pub fn hadamard() -> Self {
        Self::from_matrix2("H", &matrices::HADAMARD)
    }

    /// Square root of NOT
    pub fn snot() -> Self {
        Self::from_matrix2("SNOT", &matrices::SNOT)
    }

    pub fn swap() -> Self {
        Self::from_matrix4("SWAP", &matrices::SWAP)
    }

    pub fn cnot() -> Self {
        Self::from_matrix4("CNOT", &matrices::CNOT)
    }

    pub fn cy() -> Self {
        Self::from_matrix4("CY", &matrices::CY)
    }

    pub fn cz() -> Self {
        Self::from_matrix4("CZ", &matrices::CZ)
    }

    /// Apply `u` to the second qubit iff the first is |1⟩
    pub fn controlled(u: &[[Complex64; 2]; 2]) -> Self {
        Self::from_matrix4("C(U)", &matrices::controlled(u))
    }

    /// Toffoli
    pub fn ccnot() -> Self {
        Self::from_matrix8("CCNOT", &matrices::TOFFOLI)
    }

    /// Fredkin
    pub fn cswap() -> Self {
        Self::from_matrix8("CSWAP", &matrices::FREDKIN)
    }

    /// Display name
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of qubits the gate acts on (half the tensor rank)
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.tensor.ndim() / 2
    }

    /// Rank-2k tensor
    #[inline]
    pub fn tensor(&self) -> &ArrayD<Complex64> {
        &self.tensor
    }

    #[inline]
    pub fn view(&self) -> ArrayViewD<'_, Complex64> {
        self.tensor.view()
    }

    /// The `2^k × 2^k` operator matrix
    pub fn matrix(&self) -> Array2<Complex64> {
        let dim = 1usize << self.num_qubits();
        let flat: Vec<Complex64> = self.tensor.iter().copied().collect();
        Array2::from_shape_fn((dim, dim), |(row, col)| flat[row * dim + col])
    }

    /// Whether `U†U = I` element-wise within `tolerance`
    pub fn is_unitary(&self, tolerance: f64) -> bool {
        let m = self.matrix();
        let product = m.t().mapv(|a| a.conj()).dot(&m);
        product.indexed_iter().all(|((row, col), &value)| {
            let expected = if row == col { 1.0 } else { 0.0 };
            (value - Complex64::new(expected, 0.0)).norm() <= tolerance
        })
    }
}

impl fmt::Debug for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gate")
            .field("name", &self.name)
            .field("num_qubits", &self.num_qubits())
            .finish()
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tensor_layout_is_out_then_in() {
        let cnot = Gate::cnot();
        let t = cnot.tensor();
        assert_eq!(t.shape(), &[2, 2, 2, 2]);
        // ⟨11|CNOT|10⟩ = 1
        assert_eq!(t[[1, 1, 1, 0]], Complex64::new(1.0, 0.0));
        assert_eq!(t[[1, 0, 1, 0]], Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_non_symmetric_layout() {
        let y = Gate::pauli_y();
        // Y[0][1] = -i (row = output)
        assert_eq!(y.tensor()[[0, 1]], Complex64::new(0.0, -1.0));
        assert_eq!(y.tensor()[[1, 0]], Complex64::new(0.0, 1.0));
    }

    #[test]
    fn test_matrix_round_trip() {
        let toffoli = Gate::ccnot();
        let m = toffoli.matrix();
        assert_eq!(m.dim(), (8, 8));
        assert_eq!(m[[6, 7]], Complex64::new(1.0, 0.0));
        assert_eq!(m[[7, 6]], Complex64::new(1.0, 0.0));
    }

    #[test]
    fn test_catalog_is_unitary() {
        let catalog = [
            Gate::pauli_x(),
            Gate::pauli_y(),
            Gate::pauli_z(),
            Gate::phase(0.3),
            Gate::s(),
            Gate::t(),
            Gate::hadamard(),
            Gate::snot(),
            Gate::swap(),
            Gate::cnot(),
            Gate::cy(),
            Gate::cz(),
            Gate::controlled(&matrices::HADAMARD),
            Gate::ccnot(),
            Gate::cswap(),
        ];
        for gate in &catalog {
            assert!(gate.is_unitary(1e-12), "{} is not unitary", gate);
        }
    }

    #[test]
    fn test_non_unitary_detected() {
        let one = Complex64::new(1.0, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        let projector = Gate::from_matrix2("P0", &[[one, zero], [zero, zero]]);
        assert!(!projector.is_unitary(1e-9));
    }

    #[test]
    fn test_from_tensor_validation() {
        let odd = ArrayD::zeros(IxDyn(&[2, 2, 2]));
        assert_eq!(
            Gate::from_tensor("bad", odd).unwrap_err(),
            StateError::ShapeMismatch {
                expected: 4,
                actual: 3
            }
        );

        let wide = ArrayD::zeros(IxDyn(&[3, 3]));
        assert_eq!(
            Gate::from_tensor("bad", wide).unwrap_err(),
            StateError::ShapeMismatch {
                expected: 2,
                actual: 3
            }
        );

        let ok = Gate::from_tensor("X", Gate::pauli_x().tensor().clone()).unwrap();
        assert_eq!(ok, Gate::pauli_x());
    }

    #[test]
    fn test_phase_name_and_value() {
        let r = Gate::phase(std::f64::consts::PI);
        assert!(r.name().starts_with("R("));
        assert_relative_eq!(r.tensor()[[1, 1]].re, -1.0, epsilon = 1e-12);
    }
}
