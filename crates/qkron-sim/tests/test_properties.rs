//! Property-based tests over random gates, indexes and control sets.

use proptest::prelude::*;
use qkron_ir::matrix::is_unitary;
use qkron_ir::{Operation, QubitId};
use qkron_sim::{Circuit, OperationUnitary};

const SINGLE_QUBIT: [&str; 7] = ["X", "Y", "Z", "H", "RX", "RY", "RZ"];

/// A gate request that may or may not be valid for the register.
#[derive(Debug, Clone)]
struct GateRequest {
    name: &'static str,
    target: u32,
    controls: Vec<u32>,
    angle: Option<f64>,
}

impl GateRequest {
    fn apply(&self, circuit: &mut Circuit) {
        let controls: Vec<QubitId> = self.controls.iter().map(|&c| QubitId(c)).collect();
        let _ = circuit.set_gate(self.name, QubitId(self.target), &controls, self.angle);
    }
}

fn arb_request(num_qubits: u32) -> impl Strategy<Value = GateRequest> {
    let single = (
        prop::sample::select(SINGLE_QUBIT.to_vec()),
        0..num_qubits,
        prop::collection::vec(0..num_qubits, 0..3),
        -6.3_f64..6.3,
    )
        .prop_map(|(name, target, controls, theta)| GateRequest {
            name,
            target,
            controls,
            angle: name.starts_with('R').then_some(theta),
        });
    let swap = (0..num_qubits, 0..num_qubits).prop_map(|(a, b)| GateRequest {
        name: "SWAP",
        target: a,
        controls: vec![b],
        angle: None,
    });
    prop_oneof![4 => single, 1 => swap]
}

fn arb_circuit() -> impl Strategy<Value = Circuit> {
    (1_u32..=4).prop_flat_map(|n| {
        prop::collection::vec(arb_request(n), 0..8).prop_map(move |requests| {
            let mut circuit = Circuit::new(n as usize).unwrap();
            for request in &requests {
                request.apply(&mut circuit);
            }
            circuit
        })
    })
}

/// Valid single operation: distinct controls, none equal to the target,
/// or a SWAP with a partner anywhere in the register.
fn arb_valid_operation() -> impl Strategy<Value = (usize, Operation)> {
    (2_u32..=4).prop_flat_map(|n| {
        let controlled = (
            prop::sample::select(SINGLE_QUBIT.to_vec()),
            Just((0..n).collect::<Vec<_>>()).prop_shuffle(),
            0..n as usize,
            -3.2_f64..3.2,
        )
            .prop_map(|(name, qubits, control_count, theta)| {
                let angle = name.starts_with('R').then_some(theta);
                Operation::from_parts(
                    name,
                    QubitId(qubits[0]),
                    qubits[1..=control_count].iter().map(|&q| QubitId(q)),
                    angle,
                )
                .unwrap()
            });
        let swap = Just((0..n).collect::<Vec<_>>())
            .prop_shuffle()
            .prop_map(|qubits| {
                Operation::from_parts("SWAP", QubitId(qubits[0]), [QubitId(qubits[1])], None)
                    .unwrap()
            });
        (Just(n as usize), prop_oneof![3 => controlled, 1 => swap])
    })
}

proptest! {
    #[test]
    fn serialize_is_idempotent(circuit in arb_circuit()) {
        let first = circuit.serialize();
        let restored = Circuit::deserialize(&first).unwrap();
        prop_assert_eq!(restored.serialize(), first.clone());

        let json = circuit.to_json().unwrap();
        let again = Circuit::from_json(&json).unwrap();
        prop_assert_eq!(again.to_json().unwrap(), json);
    }

    #[test]
    fn operation_unitaries_are_unitary((n, op) in arb_valid_operation()) {
        let u = OperationUnitary::for_operation(&op, n).unwrap();
        prop_assert!(is_unitary(&u.matrix(), 1e-9));
    }

    #[test]
    fn launch_preserves_norm(circuit in arb_circuit()) {
        let mut circuit = circuit;
        circuit.launch().unwrap();
        prop_assert!((circuit.state_vector().norm() - 1.0).abs() < 1e-9);
    }
}
