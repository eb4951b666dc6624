//! Circuit composition against hand-composed gate sequences

use qtensor_gates::standard::{ccnot, cnot, cswap, h, r, snot, swap, x};
use qtensor_gates::{GateOp, Operator};
use qtensor_sim::{bell_state, Circuit};
use qtensor_state::{BasisState, Measurement, MeasurementOutcome, Result, StateTensor};
use rand::rngs::StdRng;
use rand::SeedableRng;

const EPSILON: f64 = 1e-10;

/// Bell preparation written directly against the operator API
fn hand_bell(state: &StateTensor) -> Result<StateTensor> {
    let after_h = h(0).apply(state)?;
    cnot(0, 1).apply(&after_h)
}

#[test]
fn test_bell_function_matches_circuit() {
    let circuit = Circuit::from_gates([h(0), cnot(0, 1)]);
    let mut rng = StdRng::seed_from_u64(1);

    let zero = StateTensor::zero(3).unwrap();
    assert!(hand_bell(&zero)
        .unwrap()
        .approx_eq(&circuit.apply(&zero).unwrap(), EPSILON));

    for _ in 0..10 {
        let state = StateTensor::random(3, &mut rng).unwrap();
        let by_hand = hand_bell(&state).unwrap();
        assert!(by_hand.approx_eq(&circuit.apply(&state).unwrap(), EPSILON));
        assert!(by_hand.approx_eq(&bell_state(0, 1).apply(&state).unwrap(), EPSILON));
    }
}

#[test]
fn test_bell_amplitudes() {
    let state = bell_state(0, 1)
        .apply(&StateTensor::zero(2).unwrap())
        .unwrap();
    let amp = std::f64::consts::FRAC_1_SQRT_2;
    assert!((state.amplitudes()[0].re - amp).abs() < EPSILON);
    assert!(state.amplitudes()[1].norm() < EPSILON);
    assert!(state.amplitudes()[2].norm() < EPSILON);
    assert!((state.amplitudes()[3].re - amp).abs() < EPSILON);
}

#[test]
fn test_circuit_followed_by_inverse_is_identity() {
    let forward = vec![h(0), cnot(0, 2), r(1, 0.4), ccnot(2, 1, 3), swap(3, 0)];
    let inverse: Vec<GateOp> = vec![swap(3, 0), ccnot(2, 1, 3), r(1, -0.4), cnot(0, 2), h(0)];
    let round_trip = Circuit::from_gates(forward).then(Circuit::from_gates(inverse));

    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..10 {
        let state = StateTensor::random(4, &mut rng).unwrap();
        assert!(round_trip.apply(&state).unwrap().approx_eq(&state, EPSILON));
    }
}

#[test]
fn test_apply_to_matches_apply() {
    let circuit = Circuit::from_gates([snot(0), cswap(0, 1, 2), x(2)]);
    let mut rng = StdRng::seed_from_u64(3);
    let state = StateTensor::random(3, &mut rng).unwrap();

    let pure = circuit.apply(&state).unwrap();
    let mut in_place = state.clone();
    circuit.apply_to(&mut in_place).unwrap();
    assert_eq!(pure, in_place);
}

#[test]
fn test_ghz_measurement_is_all_or_nothing() {
    let ghz = Circuit::from_gates([h(0), cnot(0, 1), cnot(1, 2)])
        .measure(Measurement::All { collapse: true });
    let mut rng = StdRng::seed_from_u64(4);

    for _ in 0..100 {
        let mut state = StateTensor::zero(3).unwrap();
        let outcome = ghz.run(&mut state, &mut rng).unwrap();
        let basis = outcome.basis().unwrap().clone();
        assert!(basis == BasisState::from([0, 0, 0]) || basis == BasisState::from([1, 1, 1]));
        assert_eq!(state, StateTensor::basis(&basis).unwrap());
    }
}

#[test]
fn test_non_collapsing_terminal_measurement_keeps_state() {
    let circuit = bell_state(0, 1).measure(Measurement::All { collapse: false });
    let mut rng = StdRng::seed_from_u64(5);
    let mut state = StateTensor::zero(2).unwrap();
    let outcome = circuit.run(&mut state, &mut rng).unwrap();

    assert!(matches!(outcome, MeasurementOutcome::Basis(_)));
    assert!(state.approx_eq(&bell_state(0, 1).apply(&StateTensor::zero(2).unwrap()).unwrap(), EPSILON));
}
