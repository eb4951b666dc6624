//! Error types for state tensor operations

use thiserror::Error;

/// Errors that can occur during state tensor operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// Target axis out of range, or repeated within one gate application
    #[error("Invalid target index {index} for {num_qubits}-qubit state")]
    InvalidTargetIndex { index: usize, num_qubits: usize },

    /// State cannot be normalized (zero tensor)
    #[error("Invalid state: cannot normalize tensor with norm {norm}")]
    InvalidState { norm: f64 },

    /// Gate tensor rank or axis extent does not match the bound targets
    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Unsupported number of qubits
    #[error("Invalid register size of {num_qubits} qubits (supported: 1..={max})")]
    InvalidDimension { num_qubits: usize, max: usize },

    /// Amplitude count does not match the register size
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Tensor view could not be built over the amplitude buffer
    #[error("Tensor layout error: {0}")]
    Layout(#[from] ndarray::ShapeError),
}

impl StateError {
    /// Create an invalid target index error
    pub fn invalid_target(index: usize, num_qubits: usize) -> Self {
        Self::InvalidTargetIndex { index, num_qubits }
    }
}

/// Result type for state tensor operations
pub type Result<T> = std::result::Result<T, StateError>;
