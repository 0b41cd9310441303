//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - quantum circuit translator and step debugger",
        style("qstep").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qstep-ir                 Circuit model and validator");
    println!("  qstep-source             Qiskit and Q# translation");
    println!("  qstep-hal                Evaluator and generator traits");
    println!("  qstep-debug              Breakpoint-aware step controller");
    println!("  qstep-adapter-http       Remote simulation service client");
    println!("  qstep-adapter-sim        Local statevector evaluator");
    println!();
    println!("License:    {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
