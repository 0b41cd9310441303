//! End-to-end tests for the `qstep` binary.
//!
//! Each test runs the compiled binary against files in a temporary
//! directory. `HOME` points at the same directory so no user config file is
//! picked up, and the local evaluator keeps everything offline.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use qstep_source::{Dialect, parse, render};

const BELL: &str = "\
from qiskit import QuantumCircuit, QuantumRegister
qr = QuantumRegister(2)
circuit = QuantumCircuit(qr)
circuit.h(0)
circuit.cx(0, 1)
circuit.measure(1, 1)
";

fn qstep(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_qstep"));
    cmd.env("HOME", home)
        .env_remove("QSTEP_EVALUATOR")
        .env_remove("QSTEP_ENDPOINT")
        .env_remove("QSTEP_TOKEN")
        .env_remove("QSTEP_PROVIDER")
        .env_remove("QSTEP_SHOTS")
        .env_remove("QSTEP_TIMEOUT");
    cmd
}

fn run(home: &Path, args: &[&str]) -> Output {
    qstep(home).args(args).output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write_file(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

// ============================================================================
// Translation commands
// ============================================================================

#[test]
fn test_version() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(dir.path(), &["version"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("qstep"));
}

#[test]
fn test_parse_summary() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "bell.py", BELL);

    let out = run(dir.path(), &["parse", "-i", &input]);
    assert!(out.status.success(), "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("Parsed Circuit"));
    assert!(text.contains("2 qubits, 3 steps, 3 gates"));
}

#[test]
fn test_parse_json_is_loadable() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "bell.py", BELL);

    let out = run(dir.path(), &["parse", "-i", &input, "-f", "json"]);
    assert!(out.status.success(), "{}", stderr(&out));

    let circuit = qstep_ir::Circuit::from_json(&stdout(&out)).unwrap();
    assert_eq!(circuit.qubit_count(), 2);
    assert_eq!(circuit.step_count(), 3);
}

#[test]
fn test_parse_rejects_unknown_format() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "bell.py", BELL);

    let out = run(dir.path(), &["parse", "-i", &input, "-f", "yaml"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Unknown format"));
}

#[test]
fn test_render_qsharp_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "bell.py", BELL);

    let out = run(dir.path(), &["render", "-i", &input, "-d", "qsharp"]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(
        stdout(&out),
        render(&parse(BELL, Dialect::Qiskit), Dialect::QSharp)
    );
}

#[test]
fn test_render_json_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let circuit = parse(BELL, Dialect::Qiskit);
    let input = write_file(
        dir.path(),
        "bell.json",
        &serde_json::to_string(&circuit).unwrap(),
    );
    let output = dir.path().join("bell_out.py");

    let out = run(
        dir.path(),
        &["render", "-i", &input, "-o", &output.to_string_lossy()],
    );
    assert!(out.status.success(), "{}", stderr(&out));

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(parse(&written, Dialect::Qiskit).gates(), circuit.gates());
}

#[test]
fn test_render_rejects_unknown_dialect() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "bell.py", BELL);

    let out = run(dir.path(), &["render", "-i", &input, "-d", "cirq"]);
    assert!(!out.status.success());
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_validate_accepts_script() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "bell.py", BELL);

    let out = run(dir.path(), &["validate", "-i", &input]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stdout(&out).contains("is valid"));
}

#[test]
fn test_validate_reports_bad_qubit() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(
        dir.path(),
        "bad.json",
        r#"{"gates":[{"type":"H","position":{"qubit":5,"step":0}}],"qubits":2,"steps":1,"name":"bad"}"#,
    );

    let out = run(dir.path(), &["validate", "-i", &input]);
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("Invalid qubit index 5 at gate 0"), "{err}");
    assert!(err.contains("(gate 0)"), "{err}");
}

#[test]
fn test_validate_script_outside_register() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(
        dir.path(),
        "wide.py",
        "qr = QuantumRegister(1)\ncircuit.h(0)\ncircuit.x(3)\n",
    );

    let out = run(dir.path(), &["validate", "-i", &input]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Invalid qubit index 3 at gate 1"));
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.py");

    let out = run(dir.path(), &["render", "-i", &missing.to_string_lossy()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("File not found"));
}

// ============================================================================
// Evaluation
// ============================================================================

#[test]
fn test_simulate_locally() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "bell.py", BELL);

    let out = run(dir.path(), &["simulate", "-i", &input, "-e", "local"]);
    assert!(out.status.success(), "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("Evaluation complete"));
    assert!(text.contains("q1"));
    assert!(text.contains("Measurements (1024 shots)"));
}

#[test]
fn test_simulate_uses_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "bell.py", BELL);
    let config = write_file(dir.path(), "config.yaml", "evaluator: local\nshots: 10\n");

    let out = run(dir.path(), &["--config", &config, "simulate", "-i", &input]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stdout(&out).contains("Measurements (10 shots)"));
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "bell.py", BELL);
    let config = write_file(dir.path(), "config.yaml", "shots: 0\n");

    let out = run(dir.path(), &["--config", &config, "simulate", "-i", &input]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Failed to load configuration"));
}

#[test]
fn test_debug_session_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "bell.py", BELL);

    let mut child = qstep(dir.path())
        .args(["debug", "-i", &input, "-e", "local", "-b", "2"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"c\ns\nb 3\nstate\nc\nq\n")
        .unwrap();
    let out = child.wait_with_output().unwrap();

    assert!(out.status.success(), "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("Paused before step 2 after 1 step(s)"), "{text}");
    assert!(text.contains("Step 2/3"), "{text}");
    assert!(text.contains("Breakpoint set before step 3"), "{text}");
    assert!(text.contains("Paused before step 3 after 0 step(s)"), "{text}");
}

#[test]
fn test_debug_stops_at_end_of_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "bell.py", BELL);

    let mut child = qstep(dir.path())
        .args(["debug", "-i", &input, "-e", "local"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"continue\nstep\nstop\nstep\n")
        .unwrap();
    let out = child.wait_with_output().unwrap();

    assert!(out.status.success(), "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("Reached end of circuit after 3 step(s)"), "{text}");
    assert!(text.contains("End of circuit"), "{text}");
    assert!(text.contains("Session stopped"), "{text}");
    assert!(text.contains("No debug session is running"), "{text}");
}

#[test]
fn test_debug_restart_after_stop_keeps_breakpoints() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "bell.py", BELL);

    let mut child = qstep(dir.path())
        .args(["debug", "-i", &input, "-e", "local"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"b 2\nstop\nrestart\nc\nq\n")
        .unwrap();
    let out = child.wait_with_output().unwrap();

    assert!(out.status.success(), "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("Session stopped"), "{text}");
    assert!(text.contains("Restarted"), "{text}");
    assert!(text.contains("Paused before step 2 after 1 step(s)"), "{text}");
}
