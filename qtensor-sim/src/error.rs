//! Error types for the simulator

use qtensor_state::StateError;
use thiserror::Error;

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, SimulatorError>;

/// Errors that can occur during simulation
#[derive(Error, Debug)]
pub enum SimulatorError {
    /// Error raised by a state, gate or measurement operation
    #[error(transparent)]
    State(#[from] StateError),

    /// Register larger than the configured limit
    #[error("Too many qubits: {num_qubits} requested, maximum is {max_qubits}")]
    TooManyQubits { num_qubits: usize, max_qubits: usize },

    /// Norm left the tolerance band after a circuit run
    #[error("Normalization drift: norm {norm} exceeds tolerance {tolerance}")]
    NormalizationDrift { norm: f64, tolerance: f64 },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
