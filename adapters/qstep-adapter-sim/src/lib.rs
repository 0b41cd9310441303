//! qstep local statevector evaluator
//!
//! An [`Evaluator`](qstep_hal::Evaluator) that needs no service: circuits
//! are simulated in-process. Useful offline and in tests.
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 15 | ~512 KB |
//! | 20 | ~16 MB |
//!
//! # Example
//!
//! ```ignore
//! use qstep_adapter_sim::LocalEvaluator;
//! use qstep_hal::Evaluator;
//!
//! let evaluator = LocalEvaluator::new().with_shots(1000);
//! let evaluation = evaluator.evaluate(&circuit).await?;
//! println!("{:?}", evaluation.measurements);
//! ```

mod evaluator;
mod statevector;

pub use evaluator::LocalEvaluator;
