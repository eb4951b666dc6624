//! Quantum gate library for qtensor
//!
//! Gates are immutable rank-2k tensors ([`Gate`]) built from the constant
//! matrices in [`matrices`]. A gate bound to concrete target axes is a
//! [`GateOp`], which applies itself to a register through the [`Operator`]
//! trait. The [`standard`] module offers one factory per catalog entry:
//!
//! | Factory | Gate |
//! |---|---|
//! | `x`, `y`, `z` | Pauli gates |
//! | `r(i, θ)`, `s`, `t` | phase rotations |
//! | `h`, `snot` | Hadamard, square root of NOT |
//! | `swap`, `cnot`/`cx`, `cy`, `cz`, `c(i, j, u)` | two-qubit gates |
//! | `ccnot`, `cswap` | Toffoli, Fredkin |
//!
//! # Example
//!
//! ```
//! use qtensor_gates::standard::{h, x};
//! use qtensor_gates::Operator;
//! use qtensor_state::StateTensor;
//!
//! let state = StateTensor::zero(1).unwrap();
//! let hxh = [h(0), x(0), h(0)]
//!     .iter()
//!     .try_fold(state, |s, op| op.apply(&s))
//!     .unwrap();
//! // HXH = Z, and Z|0⟩ = |0⟩
//! assert!((hxh.amplitudes()[0].re - 1.0).abs() < 1e-12);
//! ```

pub mod gate;
pub mod matrices;
pub mod op;
pub mod standard;

pub use gate::Gate;
pub use op::{GateOp, Operator};
