//! Gate application by tensor contraction
//!
//! A k-qubit gate is a rank-2k tensor whose first k axes are outputs and
//! last k axes are inputs. Applying it to targets `(t0, .., tk-1)` of a
//! rank-n state:
//!
//! 1. gathers the state so its non-target axes come first (original order)
//!    and the targets last (listed order), viewed as a `2^(n-k) × 2^k`
//!    matrix;
//! 2. contracts every row against the gate's input axes, which leaves the
//!    gate's output axes at the tail of the intermediate tensor;
//! 3. transposes the intermediate back to canonical axis order using
//!    [`transposition`].
//!
//! Large registers split step 2 across rayon workers by row. Each output
//! amplitude is still accumulated by a single worker in a fixed order, so the
//! parallel and sequential paths produce identical bits.

use crate::error::{Result, StateError};
use crate::state_tensor::StateTensor;
use ndarray::{ArrayD, ArrayViewD, IxDyn};
use num_complex::Complex64;
use rayon::prelude::*;

/// Minimum number of qubits before row contraction runs on rayon workers
pub const PARALLEL_THRESHOLD: usize = 14;

/// Axis permutation restoring canonical order after contraction
///
/// After contraction the intermediate tensor holds the `n - k` non-target
/// axes first, in their original relative order, followed by the `k` gate
/// output axes in the order the targets were listed. Entry `i` of the result
/// is the intermediate axis that becomes axis `i`:
///
/// - the `r`-th listed target maps to `n - k + r`;
/// - every other axis takes the next unused index counting up from 0.
///
/// The result is suitable for [`ndarray::ArrayBase::permuted_axes`].
///
/// # Example
/// ```
/// use qtensor_state::contraction::transposition;
///
/// assert_eq!(transposition(3, &[1]), vec![0, 2, 1]);
/// assert_eq!(transposition(4, &[3, 0]), vec![3, 0, 1, 2]);
/// ```
pub fn transposition(num_qubits: usize, targets: &[usize]) -> Vec<usize> {
    let k = targets.len();
    let mut next_free = 0;
    (0..num_qubits)
        .map(|axis| match targets.iter().position(|&t| t == axis) {
            Some(rank) => num_qubits - k + rank,
            None => {
                let source = next_free;
                next_free += 1;
                source
            }
        })
        .collect()
}

/// Check a gate tensor and its targets against a register of `num_qubits`
///
/// # Errors
/// - `ShapeMismatch` if the gate rank is not `2 * targets.len()` or any
///   gate axis has extent other than 2
/// - `InvalidTargetIndex` if a target is out of range or repeated
pub fn validate_targets(
    gate: &ArrayViewD<'_, Complex64>,
    targets: &[usize],
    num_qubits: usize,
) -> Result<()> {
    let expected_rank = 2 * targets.len();
    if targets.is_empty() || gate.ndim() != expected_rank {
        return Err(StateError::ShapeMismatch {
            expected: expected_rank,
            actual: gate.ndim(),
        });
    }
    if let Some(&extent) = gate.shape().iter().find(|&&extent| extent != 2) {
        return Err(StateError::ShapeMismatch {
            expected: 2,
            actual: extent,
        });
    }

    for (i, &target) in targets.iter().enumerate() {
        if target >= num_qubits || targets[..i].contains(&target) {
            return Err(StateError::invalid_target(target, num_qubits));
        }
    }
    Ok(())
}

/// Contract a gate tensor against the target axes of a state, in place
///
/// Norm is not re-applied; unitary gates preserve it by construction.
///
/// # Errors
/// See [`validate_targets`]. The state is left untouched on error.
pub fn apply_gate_tensor(
    state: &mut StateTensor,
    gate: ArrayViewD<'_, Complex64>,
    targets: &[usize],
) -> Result<()> {
    let num_qubits = state.num_qubits();
    validate_targets(&gate, targets, num_qubits)?;

    let block = 1usize << targets.len();
    tracing::trace!(num_qubits, ?targets, "contracting gate tensor");

    // Non-target axes first, targets last in listed order
    let gather: Vec<usize> = (0..num_qubits)
        .filter(|axis| !targets.contains(axis))
        .chain(targets.iter().copied())
        .collect();
    let mut rows: Vec<Complex64> = state.view()?.permuted_axes(gather).iter().copied().collect();

    // Row-major [out.., in..] is the 2^k × 2^k operator matrix
    let matrix: Vec<Complex64> = gate.iter().copied().collect();

    let parallel = num_qubits >= PARALLEL_THRESHOLD && rayon::current_num_threads() > 1;
    contract_rows(&mut rows, &matrix, block, parallel);

    // Written back into the existing amplitude buffer
    let intermediate = ArrayD::from_shape_vec(IxDyn(&state.shape()), rows)?;
    state
        .view_mut()?
        .assign(&intermediate.permuted_axes(transposition(num_qubits, targets)));
    Ok(())
}

/// `row[o] ← Σ_i matrix[o, i] · row[i]` for every `block`-sized row
///
/// Each worker holds a single row-sized scratch buffer.
fn contract_rows(rows: &mut [Complex64], matrix: &[Complex64], block: usize, parallel: bool) {
    let contract = |scratch: &mut Vec<Complex64>, row: &mut [Complex64]| {
        scratch.copy_from_slice(row);
        for (out, gate_row) in row.iter_mut().zip(matrix.chunks_exact(block)) {
            *out = gate_row.iter().zip(scratch.iter()).map(|(g, a)| g * a).sum();
        }
    };
    let zero = Complex64::new(0.0, 0.0);

    if parallel {
        rows.par_chunks_mut(block)
            .for_each_init(|| vec![zero; block], |scratch, row| contract(scratch, row));
    } else {
        let mut scratch = vec![zero; block];
        rows.chunks_mut(block).for_each(|row| contract(&mut scratch, row));
    }
}
