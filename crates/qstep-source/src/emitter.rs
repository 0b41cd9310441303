//! Canonical source emitters.

use qstep_ir::{Circuit, Gate, GateKind};

use crate::dialect::Dialect;

/// Render a circuit as source text in the given dialect.
///
/// Output is deterministic and keeps gate order. Rendering never fails.
pub fn render(circuit: &Circuit, dialect: Dialect) -> String {
    let mut emitter = Emitter::new();
    match dialect {
        Dialect::Qiskit => emitter.emit_qiskit(circuit),
        Dialect::QSharp => emitter.emit_qsharp(circuit),
    }
    emitter.output
}

/// Line-oriented text builder.
struct Emitter {
    output: String,
    indent: usize,
}

impl Emitter {
    fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    // =========================================================================
    // Qiskit
    // =========================================================================

    fn emit_qiskit(&mut self, circuit: &Circuit) {
        let n = circuit.qubit_count();

        self.writeln("from qiskit import QuantumCircuit, QuantumRegister, ClassicalRegister");
        self.writeln("");
        self.writeln("# Create quantum registers");
        self.writeln(&format!("qr = QuantumRegister({n})"));
        self.writeln(&format!("cr = ClassicalRegister({n})"));
        self.writeln("circuit = QuantumCircuit(qr, cr)");
        self.writeln("");

        for gate in circuit.gates() {
            let line = qiskit_gate(gate);
            self.writeln(&line);
        }
    }

    // =========================================================================
    // Q#
    // =========================================================================

    fn emit_qsharp(&mut self, circuit: &Circuit) {
        let n = circuit.qubit_count();

        self.writeln("namespace QuantumProgram {");
        self.indent += 1;
        self.writeln("open Microsoft.Quantum.Canon;");
        self.writeln("open Microsoft.Quantum.Intrinsic;");
        self.writeln("");
        self.writeln("operation RunCircuit() : Result[] {");
        self.indent += 1;
        self.writeln(&format!("use qubits = Qubit[{n}];"));
        self.writeln(&format!("mutable results = new Result[{n}];"));
        self.writeln("");

        for gate in circuit.gates() {
            let line = qsharp_gate(gate);
            self.writeln(&line);
        }

        self.writeln("");
        self.writeln("return results;");
        self.indent -= 1;
        self.writeln("}");
        self.indent -= 1;
        self.writeln("}");
    }

    fn writeln(&mut self, line: &str) {
        if !line.is_empty() {
            self.output.push_str(&"    ".repeat(self.indent));
            self.output.push_str(line);
        }
        self.output.push('\n');
    }
}

fn qiskit_gate(gate: &Gate) -> String {
    let q = gate.qubit();
    match (gate.kind(), gate.control()) {
        (GateKind::Hadamard, _) => format!("circuit.h({q})"),
        (GateKind::PauliX, _) => format!("circuit.x({q})"),
        (GateKind::ControlledNot, Some(c)) => format!("circuit.cx({c}, {q})"),
        (GateKind::Measure, _) => format!("circuit.measure({q}, {q})"),
        // Unreachable for checked gates; keep the line slot.
        (GateKind::ControlledNot, None) => String::new(),
    }
}

fn qsharp_gate(gate: &Gate) -> String {
    let q = gate.qubit();
    match (gate.kind(), gate.control()) {
        (GateKind::Hadamard, _) => format!("H(qubits[{q}]);"),
        (GateKind::PauliX, _) => format!("X(qubits[{q}]);"),
        (GateKind::ControlledNot, Some(c)) => format!("CNOT(qubits[{c}], qubits[{q}]);"),
        (GateKind::Measure, _) => format!("set results w/= {q} <- M(qubits[{q}]);"),
        (GateKind::ControlledNot, None) => String::new(),
    }
}
