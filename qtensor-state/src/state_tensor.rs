//! Rank-n complex state tensor for an n-qubit register

use crate::basis::BasisState;
use crate::error::{Result, StateError};
use ndarray::{ArrayViewD, ArrayViewMutD, IxDyn};
use num_complex::Complex64;
use rand::Rng;
use rand_distr::StandardNormal;
use std::fmt;

/// Largest register accepted by the constructors
///
/// A 30-qubit register already holds 2^30 amplitudes (16 GiB).
pub const MAX_QUBITS: usize = 30;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Amplitude tensor of an n-qubit pure state
///
/// The tensor has rank `n` and every axis has extent 2. Amplitudes are kept
/// in a flat row-major buffer (axis 0 most significant); rank-n
/// [`ndarray`] views are handed out for axis-wise work such as gate
/// contraction and marginal probabilities.
///
/// The register is owned exclusively by its holder. Gate application and
/// collapsing measurements take `&mut self`; sampling without collapse
/// takes `&self` and never mutates.
///
/// # Example
///
/// ```
/// use qtensor_state::StateTensor;
///
/// let state = StateTensor::zero(3).unwrap();
/// assert_eq!(state.num_qubits(), 3);
/// assert_eq!(state.dimension(), 8);
/// assert!(state.is_normalized(1e-12));
/// ```
#[derive(Clone, PartialEq)]
pub struct StateTensor {
    num_qubits: usize,
    amplitudes: Vec<Complex64>,
}

fn check_num_qubits(num_qubits: usize) -> Result<()> {
    if num_qubits == 0 || num_qubits > MAX_QUBITS {
        return Err(StateError::InvalidDimension {
            num_qubits,
            max: MAX_QUBITS,
        });
    }
    Ok(())
}

impl StateTensor {
    /// Create a register initialized to |0...0⟩
    ///
    /// # Errors
    /// Returns `InvalidDimension` unless `1 <= num_qubits <= MAX_QUBITS`
    pub fn zero(num_qubits: usize) -> Result<Self> {
        check_num_qubits(num_qubits)?;
        let mut amplitudes = vec![ZERO; 1 << num_qubits];
        amplitudes[0] = ONE;
        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    /// Create a register in the given computational basis state
    ///
    /// # Example
    /// ```
    /// use qtensor_state::{BasisState, StateTensor};
    ///
    /// let state = StateTensor::basis(&BasisState::from([1, 0])).unwrap();
    /// assert_eq!(state.amplitudes()[2].re, 1.0);
    /// ```
    pub fn basis(basis: &BasisState) -> Result<Self> {
        check_num_qubits(basis.num_qubits())?;
        let mut amplitudes = vec![ZERO; 1 << basis.num_qubits()];
        amplitudes[basis.to_index()] = ONE;
        Ok(Self {
            num_qubits: basis.num_qubits(),
            amplitudes,
        })
    }

    /// Create a register with amplitudes drawn from a standard complex
    /// Gaussian, then L2-normalized
    pub fn random<R: Rng + ?Sized>(num_qubits: usize, rng: &mut R) -> Result<Self> {
        check_num_qubits(num_qubits)?;
        let amplitudes = (0..1usize << num_qubits)
            .map(|_| {
                Complex64::new(
                    rng.sample::<f64, _>(StandardNormal),
                    rng.sample::<f64, _>(StandardNormal),
                )
            })
            .collect();
        let mut state = Self {
            num_qubits,
            amplitudes,
        };
        state.normalize()?;
        Ok(state)
    }

    /// Create a register from raw amplitudes in flat row-major order
    ///
    /// The amplitudes are taken verbatim and are **not** normalized, so a
    /// fixed unnormalized vector can be sampled as-is.
    ///
    /// # Errors
    /// Returns `DimensionMismatch` if `amplitudes.len() != 2^num_qubits`
    pub fn from_amplitudes(num_qubits: usize, amplitudes: &[Complex64]) -> Result<Self> {
        check_num_qubits(num_qubits)?;
        let dimension = 1 << num_qubits;
        if amplitudes.len() != dimension {
            return Err(StateError::DimensionMismatch {
                expected: dimension,
                actual: amplitudes.len(),
            });
        }
        Ok(Self {
            num_qubits,
            amplitudes: amplitudes.to_vec(),
        })
    }

    /// Number of qubits (tensor rank)
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of amplitudes (2^num_qubits)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    /// Tensor shape, `[2; num_qubits]`
    pub fn shape(&self) -> Vec<usize> {
        vec![2; self.num_qubits]
    }

    /// Amplitudes in flat row-major order
    #[inline]
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Mutable amplitudes in flat row-major order
    ///
    /// Writes through this slice bypass every invariant; call
    /// [`normalize`](Self::normalize) afterwards if needed.
    #[inline]
    pub fn amplitudes_mut(&mut self) -> &mut [Complex64] {
        &mut self.amplitudes
    }

    /// Amplitude of a single basis state
    pub fn amplitude(&self, basis: &BasisState) -> Result<Complex64> {
        if basis.num_qubits() != self.num_qubits {
            return Err(StateError::DimensionMismatch {
                expected: self.num_qubits,
                actual: basis.num_qubits(),
            });
        }
        Ok(self.amplitudes[basis.to_index()])
    }

    /// Rank-n read-only view over the amplitudes
    pub fn view(&self) -> Result<ArrayViewD<'_, Complex64>> {
        Ok(ArrayViewD::from_shape(
            IxDyn(&self.shape()),
            &self.amplitudes,
        )?)
    }

    /// Rank-n mutable view over the amplitudes
    pub fn view_mut(&mut self) -> Result<ArrayViewMutD<'_, Complex64>> {
        let shape = self.shape();
        Ok(ArrayViewMutD::from_shape(
            IxDyn(&shape),
            &mut self.amplitudes,
        )?)
    }

    /// Sum of squared magnitudes
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// L2 norm of the tensor
    pub fn norm(&self) -> f64 {
        self.norm_sqr().sqrt()
    }

    /// Scale all amplitudes so the norm equals 1
    ///
    /// # Errors
    /// Returns `InvalidState` for a zero (or non-finite) tensor instead of
    /// producing NaN amplitudes.
    pub fn normalize(&mut self) -> Result<()> {
        let norm = self.norm();
        if norm == 0.0 || !norm.is_finite() {
            return Err(StateError::InvalidState { norm });
        }
        let inv_norm = 1.0 / norm;
        for amplitude in self.amplitudes.iter_mut() {
            *amplitude *= inv_norm;
        }
        Ok(())
    }

    /// Check if |norm - 1| < epsilon
    pub fn is_normalized(&self, epsilon: f64) -> bool {
        (self.norm() - 1.0).abs() < epsilon
    }

    /// Probability |amplitude|^2 of every basis state, in flat order
    ///
    /// These are raw squared magnitudes; they sum to 1 only for a
    /// normalized tensor.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Element-wise comparison within an absolute tolerance
    ///
    /// Registers of different size never compare equal.
    pub fn approx_eq(&self, other: &StateTensor, epsilon: f64) -> bool {
        self.num_qubits == other.num_qubits
            && self
                .amplitudes
                .iter()
                .zip(other.amplitudes.iter())
                .all(|(a, b)| (a - b).norm() <= epsilon)
    }

    /// Inner product ⟨self|other⟩
    pub fn inner_product(&self, other: &StateTensor) -> Result<Complex64> {
        if self.dimension() != other.dimension() {
            return Err(StateError::DimensionMismatch {
                expected: self.dimension(),
                actual: other.dimension(),
            });
        }
        Ok(self
            .amplitudes
            .iter()
            .zip(other.amplitudes.iter())
            .map(|(a, b)| a.conj() * b)
            .sum())
    }
}

impl fmt::Debug for StateTensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateTensor")
            .field("num_qubits", &self.num_qubits)
            .field("dimension", &self.dimension())
            .field("norm", &self.norm())
            .finish()
    }
}

/// Create a register initialized to |0...0⟩
pub fn zero_state(num_qubits: usize) -> Result<StateTensor> {
    StateTensor::zero(num_qubits)
}

/// Create a normalized register with standard complex Gaussian amplitudes
pub fn random_state<R: Rng + ?Sized>(num_qubits: usize, rng: &mut R) -> Result<StateTensor> {
    StateTensor::random(num_qubits, rng)
}

/// Create a register in the given computational basis state
pub fn basis_state(basis: &BasisState) -> Result<StateTensor> {
    StateTensor::basis(basis)
}
