//! Rank-n state tensors for classical simulation of qubit registers
//!
//! An n-qubit register is stored as a rank-n tensor of complex amplitudes
//! with extent 2 along every axis. This crate provides:
//!
//! - [`StateTensor`]: construction (zero, basis, random, raw amplitudes),
//!   normalization and tensor views
//! - [`contraction`]: the gate application engine, contracting a rank-2k
//!   gate tensor against any ordered set of k target axes
//! - [`measurement`]: partial and full measurement with collapse, plus
//!   non-destructive multi-shot sampling
//! - [`diagnostics`]: ket listings and the dominant basis state
//!
//! # Example
//!
//! ```
//! use qtensor_state::{measurement, StateTensor};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut state = StateTensor::random(3, &mut rng).unwrap();
//! let bit = measurement::measure(&mut state, 1, &mut rng).unwrap();
//! assert!(bit <= 1);
//! assert!(state.is_normalized(1e-9));
//! ```

pub mod basis;
pub mod contraction;
pub mod diagnostics;
pub mod error;
pub mod measurement;
pub mod state_tensor;

pub use basis::BasisState;
pub use contraction::{apply_gate_tensor, transposition, PARALLEL_THRESHOLD};
pub use diagnostics::{dominant_state, KetTable};
pub use error::{Result, StateError};
pub use measurement::{Measurement, MeasurementOutcome, SamplingResult};
pub use state_tensor::{basis_state, random_state, zero_state, StateTensor, MAX_QUBITS};
