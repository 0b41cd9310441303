//! Interactive step debugger.
//!
//! Reads commands from stdin until `quit` or end of input, so a session can
//! also be scripted through a pipe.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};

use qstep_debug::{ContinueOutcome, Snapshot, StepController, StepOutcome, StopReason};
use qstep_hal::EvaluatorKind;
use qstep_ir::Circuit;

use super::common::{
    build_evaluator, describe, load_circuit, load_config, print_measurements, print_states,
};

const HELP: &str = "\
  step, s        execute the next step
  continue, c    run until the next breakpoint or the end
  break N, b N   toggle a breakpoint before step N (1-based)
  state          show the current qubit states
  stop           end the session
  restart        start over, keeping current breakpoints
  help, h        show this help
  quit, q        leave the debugger";

/// A line typed at the debugger prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplCommand {
    Step,
    Continue,
    Break(u32),
    State,
    Stop,
    Restart,
    Help,
    Quit,
}

/// Parse one prompt line. Blank lines yield `Ok(None)`.
fn parse_command(line: &str) -> Result<Option<ReplCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };

    let command = match head.to_lowercase().as_str() {
        "step" | "s" => ReplCommand::Step,
        "continue" | "c" => ReplCommand::Continue,
        "break" | "b" => {
            let arg = words
                .next()
                .ok_or_else(|| "break needs a step number".to_string())?;
            let step = arg
                .parse()
                .map_err(|_| format!("'{arg}' is not a step number"))?;
            ReplCommand::Break(step)
        }
        "state" => ReplCommand::State,
        "stop" => ReplCommand::Stop,
        "restart" => ReplCommand::Restart,
        "help" | "h" | "?" => ReplCommand::Help,
        "quit" | "q" | "exit" => ReplCommand::Quit,
        other => return Err(format!("Unknown command '{other}' (try 'help')")),
    };

    if words.next().is_some() {
        return Err(format!("Too many arguments for '{head}'"));
    }
    Ok(Some(command))
}

/// Execute the debug command.
pub async fn execute(
    input: &str,
    config: Option<&Path>,
    evaluator: Option<EvaluatorKind>,
    breakpoints: &[u32],
) -> Result<()> {
    let config = load_config(config, evaluator)?;
    let circuit = load_circuit(input)?;
    let controller = StepController::new(build_evaluator(&config)?);

    // Breakpoints outlive `stop`, so the loop keeps its own copy for restart.
    let mut kept = BTreeSet::new();
    controller.start(circuit.clone())?;
    for &step in breakpoints {
        if controller.toggle_breakpoint(step)? {
            kept.insert(step);
        } else {
            kept.remove(&step);
        }
    }

    println!(
        "{} Debugging {} on {} ({})",
        style("→").cyan().bold(),
        style(input).green(),
        style(controller.evaluator_name()).yellow(),
        describe(&circuit)
    );
    println!("{HELP}");
    print_position(&controller.snapshot(), &circuit);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", style("qstep>").bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{} {}", style("?").yellow().bold(), message);
                continue;
            }
        };
        tracing::debug!(?command, "Debugger command");

        match command {
            ReplCommand::Step => match controller.step().await {
                Ok(outcome) => report_step(&outcome, &controller.snapshot(), &circuit),
                Err(e) => println!("{} {}", style("✗").red().bold(), e),
            },
            ReplCommand::Continue => match controller.continue_to_breakpoint().await {
                Ok(outcome) => report_continue(&outcome, &controller.snapshot(), &circuit),
                Err(e) => println!("{} {}", style("✗").red().bold(), e),
            },
            ReplCommand::Break(step) => match controller.toggle_breakpoint(step) {
                Ok(true) => {
                    kept.insert(step);
                    println!("  Breakpoint set before step {step}");
                }
                Ok(false) => {
                    kept.remove(&step);
                    println!("  Breakpoint cleared at step {step}");
                }
                Err(e) => println!("{} {}", style("✗").red().bold(), e),
            },
            ReplCommand::State => print_snapshot(&controller.snapshot()),
            ReplCommand::Stop => {
                if controller.stop() {
                    println!("  Session stopped");
                } else {
                    println!("  No session is running");
                }
            }
            ReplCommand::Restart => {
                controller.start(circuit.clone())?;
                for &step in &kept {
                    controller.toggle_breakpoint(step)?;
                }
                println!("  Restarted");
                print_position(&controller.snapshot(), &circuit);
            }
            ReplCommand::Help => println!("{HELP}"),
            ReplCommand::Quit => break,
        }
    }

    controller.stop();
    Ok(())
}

fn report_step(outcome: &StepOutcome, snapshot: &Snapshot, circuit: &Circuit) {
    match outcome {
        StepOutcome::Advanced { cursor } => {
            println!(
                "{} Step {}/{}",
                style("✓").green().bold(),
                cursor,
                snapshot.step_count
            );
            print_snapshot(snapshot);
            print_position(snapshot, circuit);
        }
        StepOutcome::Failed(e) => {
            println!("{} {}", style("✗").red().bold(), e);
            println!("  Still at step {}", snapshot.cursor);
        }
        StepOutcome::EndOfCircuit => println!("  End of circuit"),
        StepOutcome::Discarded => println!("  Result discarded"),
    }
}

fn report_continue(outcome: &ContinueOutcome, snapshot: &Snapshot, circuit: &Circuit) {
    let taken = outcome.steps_taken;
    match &outcome.reason {
        StopReason::Breakpoint(step) => {
            println!(
                "{} Paused before step {} after {} step(s)",
                style("●").red().bold(),
                step,
                taken
            );
            print_snapshot(snapshot);
            print_position(snapshot, circuit);
        }
        StopReason::EndOfCircuit => {
            println!(
                "{} Reached end of circuit after {} step(s)",
                style("✓").green().bold(),
                taken
            );
            print_snapshot(snapshot);
        }
        StopReason::EvaluationFailed(e) => {
            println!("{} {}", style("✗").red().bold(), e);
            println!("  Stopped at step {} after {} step(s)", snapshot.cursor, taken);
        }
        StopReason::Discarded => println!("  Result discarded"),
    }
}

fn print_snapshot(snapshot: &Snapshot) {
    if snapshot.running {
        println!(
            "  Step {}/{}, breakpoints: {:?}",
            snapshot.cursor, snapshot.step_count, snapshot.breakpoints
        );
    } else {
        println!("  No session is running");
    }
    if let Some(e) = &snapshot.last_error {
        println!("  Last error: {}", style(e).red());
    }
    print_states(&snapshot.last_states);
    print_measurements(&snapshot.last_measurements);
}

fn print_position(snapshot: &Snapshot, circuit: &Circuit) {
    if snapshot.cursor >= snapshot.step_count {
        return;
    }
    let next: Vec<String> = circuit
        .gates_at(snapshot.cursor)
        .map(ToString::to_string)
        .collect();
    println!(
        "  Next: step {} [{}]",
        snapshot.cursor + 1,
        if next.is_empty() {
            "no gates".to_string()
        } else {
            next.join(", ")
        }
    );
}
