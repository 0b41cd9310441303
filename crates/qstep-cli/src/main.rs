//! qstep Command-Line Interface
//!
//! Parse, render and validate circuit scripts, run them against an
//! evaluator, and step through them interactively with breakpoints.
//!
//! ```text
//! qstep parse -i bell.py
//! qstep render -i bell.py -d qsharp -o bell.qs
//! qstep debug -i bell.py -b 2 --evaluator local
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use qstep_hal::EvaluatorKind;
use qstep_source::Dialect;

mod commands;

use commands::{debug, generate, parse, render, simulate, validate, version};

#[derive(Parser)]
#[command(name = "qstep")]
#[command(author, version, about = "Quantum circuit translator and step debugger", long_about = None)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Evaluator configuration file (defaults to ~/.qstep/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a Qiskit script and print the circuit
    Parse {
        /// Input script (.py)
        #[arg(short, long)]
        input: String,

        /// Output format (summary, json)
        #[arg(short, long, default_value = "summary")]
        format: String,
    },

    /// Render a circuit as source text
    Render {
        /// Input circuit (.py or .json)
        #[arg(short, long)]
        input: String,

        /// Target dialect (qiskit, qsharp)
        #[arg(short, long, default_value = "qiskit")]
        dialect: Dialect,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Check a circuit against the model invariants
    Validate {
        /// Input circuit (.py or .json)
        #[arg(short, long)]
        input: String,
    },

    /// Evaluate a whole circuit once
    Simulate {
        /// Input circuit (.py or .json)
        #[arg(short, long)]
        input: String,

        /// Evaluator override (http, local)
        #[arg(short, long)]
        evaluator: Option<EvaluatorKind>,
    },

    /// Step through a circuit interactively
    Debug {
        /// Input circuit (.py or .json)
        #[arg(short, long)]
        input: String,

        /// Evaluator override (http, local)
        #[arg(short, long)]
        evaluator: Option<EvaluatorKind>,

        /// Initial breakpoints (1-based steps, comma separated)
        #[arg(short, long = "break", value_delimiter = ',')]
        breakpoints: Vec<u32>,
    },

    /// Ask the generation service for a circuit
    Generate {
        /// Description of the circuit to generate
        #[arg(short, long)]
        prompt: String,

        /// Dialect to print the circuit in (qiskit, qsharp)
        #[arg(short, long, default_value = "qiskit")]
        dialect: Dialect,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Parse { input, format } => parse::execute(&input, &format),

        Commands::Render {
            input,
            dialect,
            output,
        } => render::execute(&input, dialect, output.as_deref()),

        Commands::Validate { input } => validate::execute(&input),

        Commands::Simulate { input, evaluator } => {
            simulate::execute(&input, config, evaluator).await
        }

        Commands::Debug {
            input,
            evaluator,
            breakpoints,
        } => debug::execute(&input, config, evaluator, &breakpoints).await,

        Commands::Generate {
            prompt,
            dialect,
            output,
        } => generate::execute(&prompt, dialect, output.as_deref(), config).await,

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
