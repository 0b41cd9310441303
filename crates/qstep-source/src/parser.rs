//! Best-effort parser for circuit scripts.
//!
//! The Qiskit dialect is read line by line. Each line is tokenized on its
//! own and matched against four call shapes on the `circuit` object. A
//! matched line becomes one gate at the next free step; every other line is
//! skipped without consuming a step, so steps are dense over recognized
//! gates rather than over source lines.

use qstep_ir::{Circuit, Gate};

use crate::dialect::Dialect;
use crate::lexer::{Token, tokenize, tokenize_line};

/// Name given to every parsed circuit.
pub const PARSED_CIRCUIT_NAME: &str = "Parsed Circuit";

/// Receiver the gate calls must be made on.
const RECEIVER: &str = "circuit";

/// Register constructor whose size sets the qubit count.
const REGISTER_CTOR: &str = "QuantumRegister";

/// Result of matching one source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineShape {
    /// The line is a gate call.
    Recognized(Gate),
    /// Anything else: imports, declarations, comments, unsupported gates.
    Unrecognized,
}

/// Parse source text into a circuit.
///
/// Never fails. Unrecognized input degrades to a partial or empty circuit
/// and the validator is the enforcement point. The Q# dialect is
/// render-only, so parsing it yields an empty circuit.
pub fn parse(source: &str, dialect: Dialect) -> Circuit {
    match dialect {
        Dialect::Qiskit => parse_qiskit(source),
        Dialect::QSharp => Circuit::unchecked(PARSED_CIRCUIT_NAME, 0, 0, Vec::new()),
    }
}

fn parse_qiskit(source: &str) -> Circuit {
    let qubit_count = register_size(source).unwrap_or(0);

    let mut gates = Vec::new();
    let mut step = 0_u32;
    for line in source.lines() {
        if let LineShape::Recognized(gate) = match_line(line, step) {
            gates.push(gate);
            step += 1;
        }
    }

    Circuit::unchecked(PARSED_CIRCUIT_NAME, qubit_count, step, gates)
}

/// Size of the first `QuantumRegister(N)` in the source.
fn register_size(source: &str) -> Option<u32> {
    source.lines().find_map(|line| {
        let tokens: Vec<Token> = tokenize(line)
            .into_iter()
            .filter_map(Result::ok)
            .map(|t| t.token)
            .collect();
        tokens.windows(4).find_map(|w| match w {
            [ctor, Token::LParen, Token::IntLiteral(n), Token::RParen]
                if ctor.is_ident(REGISTER_CTOR) =>
            {
                u32::try_from(*n).ok()
            }
            _ => None,
        })
    })
}

/// Match a single line, placing a recognized gate at `step`.
pub fn match_line(line: &str, step: u32) -> LineShape {
    let Ok(tokens) = tokenize_line(line) else {
        return LineShape::Unrecognized;
    };
    let Some((method, args)) = read_call(&tokens) else {
        return LineShape::Unrecognized;
    };

    let gate = match (method, args.as_slice()) {
        ("h", [q]) => int_arg(q).map(|q| Gate::hadamard(q, step)),
        ("x", [q]) => int_arg(q).map(|q| Gate::pauli_x(q, step)),
        ("cx", [c, t]) => match (int_arg(c), int_arg(t)) {
            (Some(c), Some(t)) => Gate::cnot(c, t, step).ok(),
            _ => None,
        },
        ("measure", [q, ..]) => int_arg(q).map(|q| Gate::measure(q, step)),
        _ => None,
    };

    gate.map_or(LineShape::Unrecognized, LineShape::Recognized)
}

/// Split `circuit.<method>(<args>)` into the method name and its arguments.
fn read_call(tokens: &[Token]) -> Option<(&str, Vec<&[Token]>)> {
    let [receiver, Token::Dot, Token::Identifier(method), Token::LParen, rest @ ..] = tokens
    else {
        return None;
    };
    if !receiver.is_ident(RECEIVER) {
        return None;
    }

    let rest = match rest.split_last() {
        Some((Token::Semicolon, body)) => body,
        _ => rest,
    };
    let (Token::RParen, inner) = rest.split_last()? else {
        return None;
    };

    Some((method.as_str(), split_args(inner)?))
}

/// Split call arguments on top-level commas.
fn split_args(tokens: &[Token]) -> Option<Vec<&[Token]>> {
    let mut args = Vec::new();
    let mut depth = 0_usize;
    let mut start = 0;

    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::LParen | Token::LBracket => depth += 1,
            Token::RParen | Token::RBracket => depth = depth.checked_sub(1)?,
            Token::Comma if depth == 0 => {
                args.push(&tokens[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    if start < tokens.len() || !args.is_empty() {
        args.push(&tokens[start..]);
    }
    if args.iter().any(|a| a.is_empty()) {
        return None;
    }
    Some(args)
}

fn int_arg(arg: &[Token]) -> Option<u32> {
    match arg {
        [Token::IntLiteral(n)] => u32::try_from(*n).ok(),
        _ => None,
    }
}
