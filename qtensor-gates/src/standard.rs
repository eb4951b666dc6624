//! Standard gate catalog bound to target axes
//!
//! Each factory returns a [`GateOp`] ready to be applied or collected into a
//! circuit. For multi-qubit gates the first argument is the control (or the
//! first swapped axis), matching the first axis of the gate tensor.
//!
//! ```
//! use qtensor_gates::standard::{cnot, h};
//! use qtensor_gates::Operator;
//! use qtensor_state::StateTensor;
//!
//! let mut state = StateTensor::zero(2).unwrap();
//! h(0).apply_to(&mut state).unwrap();
//! cnot(0, 1).apply_to(&mut state).unwrap();
//! assert!((state.amplitudes()[3].re - 0.5f64.sqrt()).abs() < 1e-12);
//! ```

use crate::gate::Gate;
use crate::op::GateOp;
use num_complex::Complex64;
use std::sync::{Arc, OnceLock};

/// Define an accessor for a parameterless gate built once per process
macro_rules! shared_gate {
    ($accessor:ident, $ctor:expr) => {
        fn $accessor() -> Arc<Gate> {
            static GATE: OnceLock<Arc<Gate>> = OnceLock::new();
            Arc::clone(GATE.get_or_init(|| Arc::new($ctor)))
        }
    };
}

shared_gate!(shared_x, Gate::pauli_x());
shared_gate!(shared_y, Gate::pauli_y());
shared_gate!(shared_z, Gate::pauli_z());
shared_gate!(shared_s, Gate::s());
shared_gate!(shared_t, Gate::t());
shared_gate!(shared_h, Gate::hadamard());
shared_gate!(shared_snot, Gate::snot());
shared_gate!(shared_swap, Gate::swap());
shared_gate!(shared_cnot, Gate::cnot());
shared_gate!(shared_cy, Gate::cy());
shared_gate!(shared_cz, Gate::cz());
shared_gate!(shared_ccnot, Gate::ccnot());
shared_gate!(shared_cswap, Gate::cswap());

/// Pauli-X (NOT) on axis `i`
pub fn x(i: usize) -> GateOp {
    GateOp::new(shared_x(), &[i])
}

/// Pauli-Y on axis `i`
pub fn y(i: usize) -> GateOp {
    GateOp::new(shared_y(), &[i])
}

/// Pauli-Z on axis `i`
pub fn z(i: usize) -> GateOp {
    GateOp::new(shared_z(), &[i])
}

/// Phase rotation `diag(1, e^{iθ})` on axis `i`
pub fn r(i: usize, theta: f64) -> GateOp {
    GateOp::new(Arc::new(Gate::phase(theta)), &[i])
}

pub fn s(i: usize) -> GateOp {
    GateOp::new(shared_s(), &[i])
}

pub fn t(i: usize) -> GateOp {
    GateOp::new(shared_t(), &[i])
}

/// Hadamard on axis `i`
pub fn h(i: usize) -> GateOp {
    GateOp::new(shared_h(), &[i])
}

/// Square root of NOT on axis `i`
pub fn snot(i: usize) -> GateOp {
    GateOp::new(shared_snot(), &[i])
}

pub fn swap(i: usize, j: usize) -> GateOp {
    GateOp::new(shared_swap(), &[i, j])
}

/// Controlled-NOT with control `i` and target `j`
pub fn cnot(i: usize, j: usize) -> GateOp {
    GateOp::new(shared_cnot(), &[i, j])
}

/// Alias for [`cnot`]
pub fn cx(i: usize, j: usize) -> GateOp {
    cnot(i, j)
}

pub fn cy(i: usize, j: usize) -> GateOp {
    GateOp::new(shared_cy(), &[i, j])
}

pub fn cz(i: usize, j: usize) -> GateOp {
    GateOp::new(shared_cz(), &[i, j])
}

/// Arbitrary single-qubit matrix `u` on axis `j`, controlled by axis `i`
pub fn c(i: usize, j: usize, u: &[[Complex64; 2]; 2]) -> GateOp {
    GateOp::new(Arc::new(Gate::controlled(u)), &[i, j])
}

/// Toffoli: flip `k` iff `i` and `j` are both 1
pub fn ccnot(i: usize, j: usize, k: usize) -> GateOp {
    GateOp::new(shared_ccnot(), &[i, j, k])
}

/// Fredkin: swap `j` and `k` iff `i` is 1
pub fn cswap(i: usize, j: usize, k: usize) -> GateOp {
    GateOp::new(shared_cswap(), &[i, j, k])
}
