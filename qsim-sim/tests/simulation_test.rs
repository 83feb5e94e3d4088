//! End-to-end simulation tests

use approx::assert_relative_eq;
use proptest::prelude::*;
use qsim_core::{Circuit, Operation};
use qsim_sim::{
    CancellationToken, ExecutionPath, MeasurementCounts, SimulationRequest, SimulationResponse,
    Simulator, SimulatorConfig, SimulatorError,
};

fn simulator(config: SimulatorConfig) -> Simulator {
    Simulator::new(config).unwrap()
}

fn counts(sim: &Simulator, circuit: &Circuit) -> MeasurementCounts {
    sim.run(circuit).unwrap().counts().unwrap().clone()
}

fn bell() -> Circuit {
    let mut circuit = Circuit::new(2);
    circuit.h(0).cx(0, 1).measure(0, 0).measure(1, 1);
    circuit
}

#[test]
fn test_bell_statistics() {
    let sim = simulator(SimulatorConfig::default().with_shots(4096).with_seed(2024));
    let counts = counts(&sim, &bell());

    assert_eq!(counts.total_shots(), 4096);
    assert_eq!(counts.get("00") + counts.get("11"), 4096);
    assert!((counts.probability("00") - 0.5).abs() < 0.05);
    assert!((counts.probability("11") - 0.5).abs() < 0.05);
}

#[test]
fn test_auto_measure_bell() {
    let sim = simulator(SimulatorConfig::default().with_shots(2000).with_seed(9));
    let mut circuit = Circuit::new(2);
    circuit.h(0).cx(0, 1);

    let result = sim.run(&circuit).unwrap();
    assert_eq!(result.path, ExecutionPath::DeferredSampling);
    let counts = result.counts().unwrap();
    assert_eq!(counts.get("00") + counts.get("11"), 2000);
}

#[test]
fn test_collapse_matches_deferred_sampling() {
    let mut circuit = Circuit::new(3);
    circuit
        .ry(0, 1.1)
        .h(1)
        .cx(1, 2)
        .rx(2, 0.4)
        .measure(0, 0)
        .measure(1, 1)
        .measure(2, 2);

    let shots = 8192;
    let deferred = simulator(SimulatorConfig::default().with_shots(shots).with_seed(1));
    let collapsed = simulator(SimulatorConfig::trajectories().with_shots(shots).with_seed(2));

    let deferred_result = deferred.run(&circuit).unwrap();
    let collapsed_result = collapsed.run(&circuit).unwrap();
    assert_eq!(deferred_result.path, ExecutionPath::DeferredSampling);
    assert_eq!(collapsed_result.path, ExecutionPath::Trajectories);

    let a = deferred_result.counts().unwrap();
    let b = collapsed_result.counts().unwrap();
    for index in 0..8usize {
        let bits = format!("{:03b}", index);
        assert!(
            (a.probability(&bits) - b.probability(&bits)).abs() < 0.03,
            "outcome {} differs: {} vs {}",
            bits,
            a.probability(&bits),
            b.probability(&bits)
        );
    }
}

#[test]
fn test_parallel_and_sequential_agree() {
    let mut mid = Circuit::new(2);
    mid.h(0).measure(0, 0).h(0).cx(0, 1).measure(1, 1);

    for circuit in [bell(), mid] {
        let base = SimulatorConfig::default().with_shots(700).with_seed(77);
        let parallel = counts(&simulator(base.clone().with_parallel(true)), &circuit);
        let sequential = counts(&simulator(base.with_parallel(false)), &circuit);
        assert_eq!(parallel, sequential);
    }
}

#[test]
fn test_same_seed_same_counts() {
    let config = SimulatorConfig::trajectories().with_shots(300).with_seed(5);
    let first = counts(&simulator(config.clone()), &bell());
    let second = counts(&simulator(config), &bell());
    assert_eq!(first, second);
}

#[test]
fn test_mid_circuit_measurement_correlates() {
    let sim = simulator(SimulatorConfig::default().with_shots(1000).with_seed(31));
    let mut circuit = Circuit::new(2);
    circuit.h(0).measure(0, 0).cx(0, 1).measure(1, 1);

    let result = sim.run(&circuit).unwrap();
    assert_eq!(result.path, ExecutionPath::Trajectories);
    let counts = result.counts().unwrap();
    assert_eq!(counts.get("00") + counts.get("11"), 1000);
    assert!(counts.get("00") > 350 && counts.get("11") > 350);
}

#[test]
fn test_measurement_collapses_superposition() {
    let sim = simulator(SimulatorConfig::default().with_shots(1000).with_seed(17));
    let mut circuit = Circuit::new(1);
    circuit.h(0).measure(0, 0).h(0).measure(0, 0);

    let result = sim.run(&circuit).unwrap();
    assert_eq!(result.path, ExecutionPath::Trajectories);
    let counts = result.counts().unwrap();
    // The second H acts on a collapsed basis state, so both outcomes stay likely
    assert!(counts.get("0") > 400 && counts.get("0") < 600);
    assert!(counts.get("1") > 400 && counts.get("1") < 600);
}

#[test]
fn test_widest_default_register_runs() {
    let sim = simulator(SimulatorConfig::default().with_shots(16).with_seed(4));
    let mut circuit = Circuit::new(10);
    circuit.x(9);

    let counts = counts(&sim, &circuit);
    assert_eq!(counts.get("1000000000"), 16);
}

#[test]
fn test_measurement_then_flip() {
    let sim = simulator(SimulatorConfig::default().with_shots(64).with_seed(0));
    let mut circuit = Circuit::new(1);
    circuit.x(0).measure(0, 0).x(0).measure(0, 1);

    let counts = counts(&sim, &circuit);
    // c0 = 1 from the first measurement, c1 = 0 after the flip back
    assert_eq!(counts.get("01"), 64);
}

#[test]
fn test_unsupported_gate_is_noop() {
    let sim = simulator(SimulatorConfig::default().with_auto_measure(false));

    let mut plain = Circuit::new(2);
    plain.h(0).cx(0, 1).rz(1, 0.3);

    let mut with_unknown = Circuit::new(2);
    with_unknown.h(0);
    with_unknown.push(Operation::Unsupported {
        name: "toffoli".to_string(),
    });
    with_unknown.cx(0, 1).rz(1, 0.3);

    let a = sim.run(&plain).unwrap();
    let b = sim.run(&with_unknown).unwrap();
    assert!(a
        .state_vector()
        .unwrap()
        .approx_eq(b.state_vector().unwrap(), 1e-12));
}

#[test]
fn test_cancelled_run() {
    let token = CancellationToken::new();
    token.cancel();

    for config in [SimulatorConfig::default(), SimulatorConfig::trajectories()] {
        let sim = simulator(config);
        let err = sim.run_with_cancellation(&bell(), &token).unwrap_err();
        assert_eq!(err, SimulatorError::Cancelled);
    }
}

#[test]
fn test_qubit_limit_checked_before_compilation() {
    let sim = simulator(SimulatorConfig::default());
    let mut circuit = Circuit::new(12);
    // Invalid operation would fail compilation; the size check comes first
    circuit.push(Operation::X { qubit: 40 });

    assert!(matches!(
        sim.run(&circuit),
        Err(SimulatorError::TooManyQubits {
            num_qubits: 12,
            max_qubits: 10,
        })
    ));
}

#[test]
fn test_invalid_qubit_reports_operation_index() {
    let sim = simulator(SimulatorConfig::default());
    let mut circuit = Circuit::new(2);
    circuit.h(0).h(1);
    circuit.push(Operation::Cx {
        control: 1,
        target: 1,
    });

    assert!(matches!(
        sim.run(&circuit),
        Err(SimulatorError::OperationFailed { index: 2, .. })
    ));
}

#[test]
fn test_execute_request_json() {
    let sim = simulator(SimulatorConfig::default().with_seed(12));
    let request: SimulationRequest = serde_json::from_str(
        r#"{
            "num_qubits": 2,
            "shots": 256,
            "operations": [
                {"type": "X", "qubit": 1},
                {"type": "custom", "qubit": 0, "matrix": [[0, 1], [1, 0]]},
                {"type": "measure", "qubit": 0},
                {"type": "measure", "qubit": 1}
            ]
        }"#,
    )
    .unwrap();

    let response = sim.execute_request(&request).unwrap();
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["shots"], 256);
    assert_eq!(json["num_qubits"], 2);
    assert_eq!(json["counts"]["11"], 256);
}

#[test]
fn test_execute_request_statevector() {
    let sim = simulator(SimulatorConfig::default().with_auto_measure(false));
    let request = SimulationRequest::new(1, vec![qsim_core::GateDescriptor::new("h")]);
    // "h" without a qubit is rejected before the engine runs
    assert!(sim.execute_request(&request).is_err());

    let request: SimulationRequest =
        serde_json::from_str(r#"{"num_qubits": 1, "operations": [{"type": "h", "qubit": 0}]}"#)
            .unwrap();
    match sim.execute_request(&request).unwrap() {
        SimulationResponse::StateVector {
            statevector,
            shots,
            num_qubits,
        } => {
            assert_eq!(shots, 1024);
            assert_eq!(num_qubits, 1);
            assert_relative_eq!(statevector[0][0], std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-12);
            assert_relative_eq!(statevector[1][0], std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-12);
        },
        other => panic!("expected a state vector, got {:?}", other),
    }
}

#[derive(Debug, Clone)]
enum GateChoice {
    Single(u8, usize),
    Rotation(u8, usize, f64),
    Pair(u8, usize, usize),
    ControlledPhase(usize, usize, f64),
}

fn gate_strategy(num_qubits: usize) -> impl Strategy<Value = GateChoice> {
    let q = 0..num_qubits;
    prop_oneof![
        (0u8..6, q.clone()).prop_map(|(k, q)| GateChoice::Single(k, q)),
        (0u8..4, q.clone(), -6.3f64..6.3).prop_map(|(k, q, t)| GateChoice::Rotation(k, q, t)),
        (0u8..3, q.clone(), q.clone())
            .prop_filter("distinct qubits", |(_, a, b)| a != b)
            .prop_map(|(k, a, b)| GateChoice::Pair(k, a, b)),
        (q.clone(), q, -6.3f64..6.3)
            .prop_filter("distinct qubits", |(a, b, _)| a != b)
            .prop_map(|(a, b, t)| GateChoice::ControlledPhase(a, b, t)),
    ]
}

fn build(num_qubits: usize, gates: &[GateChoice]) -> Circuit {
    let mut circuit = Circuit::new(num_qubits);
    for gate in gates {
        match *gate {
            GateChoice::Single(k, q) => match k {
                0 => circuit.h(q),
                1 => circuit.x(q),
                2 => circuit.y(q),
                3 => circuit.z(q),
                4 => circuit.t(q),
                _ => circuit.s(q),
            },
            GateChoice::Rotation(k, q, t) => match k {
                0 => circuit.rx(q, t),
                1 => circuit.ry(q, t),
                2 => circuit.rz(q, t),
                _ => circuit.phase(q, t),
            },
            GateChoice::Pair(k, a, b) => match k {
                0 => circuit.cx(a, b),
                1 => circuit.cz(a, b),
                _ => circuit.swap(a, b),
            },
            GateChoice::ControlledPhase(a, b, t) => circuit.cp(a, b, t),
        };
    }
    circuit
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_statevector_stays_normalized(gates in prop::collection::vec(gate_strategy(3), 0..24)) {
        let sim = simulator(SimulatorConfig::default().with_auto_measure(false));
        let result = sim.run(&build(3, &gates)).unwrap();
        let state = result.state_vector().unwrap();
        prop_assert!((state.norm_sqr() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn prop_counts_sum_to_shots(gates in prop::collection::vec(gate_strategy(2), 0..12), seed in any::<u64>()) {
        let sim = simulator(SimulatorConfig::default().with_shots(200).with_seed(seed));
        let result = sim.run(&build(2, &gates)).unwrap();
        prop_assert_eq!(result.counts().unwrap().total_shots(), 200);
    }
}
