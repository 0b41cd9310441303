//! Lexer for the Qiskit dialect.
//!
//! Only the Python subset that circuit scripts are made of is tokenized.
//! Anything else produces an error entry, which the line matcher treats as
//! an unrecognized line.

use logos::Logos;

/// Tokens of a Qiskit circuit script.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"#[^\n]*")]
pub enum Token {
    // Literals
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    FloatLiteral(f64),

    #[regex(r"[0-9]+", |lex| lex.slice().parse::<u64>().ok())]
    IntLiteral(u64),

    #[regex(r#""[^"\n]*""#, |lex| {
        let s = lex.slice();
        Some(s[1..s.len()-1].to_string())
    })]
    #[regex(r"'[^'\n]*'", |lex| {
        let s = lex.slice();
        Some(s[1..s.len()-1].to_string())
    })]
    StringLiteral(String),

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Punctuation
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token("=")]
    Eq,

    #[token(":")]
    Colon,

    #[token(";")]
    Semicolon,

    // Arithmetic, tolerated so parameterized lines still lex
    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,
}

impl Token {
    /// Whether this is the identifier `name`.
    pub fn is_ident(&self, name: &str) -> bool {
        matches!(self, Token::Identifier(s) if s == name)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::FloatLiteral(v) => write!(f, "{v}"),
            Token::IntLiteral(v) => write!(f, "{v}"),
            Token::StringLiteral(s) => write!(f, "'{s}'"),
            Token::Identifier(s) => write!(f, "{s}"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Comma => write!(f, ","),
            Token::Dot => write!(f, "."),
            Token::Eq => write!(f, "="),
            Token::Colon => write!(f, ":"),
            Token::Semicolon => write!(f, ";"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
        }
    }
}

/// A token with its byte span.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: std::ops::Range<usize>,
}

/// Tokenize a source string.
pub fn tokenize(source: &str) -> Vec<Result<SpannedToken, (std::ops::Range<usize>, String)>> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        if let Ok(token) = result {
            tokens.push(Ok(SpannedToken { token, span }));
        } else {
            let slice = &source[span.clone()];
            tokens.push(Err((span, format!("Invalid token: '{slice}'"))));
        }
    }

    tokens
}

/// Tokenize a single line, failing on the first invalid token.
pub fn tokenize_line(line: &str) -> Result<Vec<Token>, (std::ops::Range<usize>, String)> {
    tokenize(line)
        .into_iter()
        .map(|r| r.map(|t| t.token))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_tokens(source: &str) -> Vec<Token> {
        tokenize(source)
            .into_iter()
            .filter_map(Result::ok)
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn test_gate_call() {
        let tokens = ok_tokens("circuit.cx(0, 1)");
        assert!(tokens[0].is_ident("circuit"));
        assert_eq!(tokens[1], Token::Dot);
        assert!(tokens[2].is_ident("cx"));
        assert_eq!(tokens[3], Token::LParen);
        assert_eq!(tokens[4], Token::IntLiteral(0));
        assert_eq!(tokens[5], Token::Comma);
        assert_eq!(tokens[6], Token::IntLiteral(1));
        assert_eq!(tokens[7], Token::RParen);
        assert_eq!(tokens.len(), 8);
    }

    #[test]
    fn test_register_declaration() {
        let tokens = ok_tokens("qr = QuantumRegister(3)");
        assert!(tokens[0].is_ident("qr"));
        assert_eq!(tokens[1], Token::Eq);
        assert!(tokens[2].is_ident("QuantumRegister"));
        assert_eq!(tokens[4], Token::IntLiteral(3));
    }

    #[test]
    fn test_comments_skipped() {
        let tokens = ok_tokens("# Create quantum registers\ncircuit.h(0)  # superpose");
        assert_eq!(tokens.len(), 6);
    }

    #[test]
    fn test_strings_and_floats() {
        let tokens = ok_tokens("qr = QuantumRegister(2, 'q'); circuit.rx(0.5, 0)");
        assert!(tokens.contains(&Token::StringLiteral("q".into())));
        assert!(tokens.iter().any(|t| matches!(t, Token::FloatLiteral(v) if (*v - 0.5).abs() < 1e-12)));
    }

    #[test]
    fn test_invalid_token() {
        let results = tokenize("circuit.h(0) @");
        assert!(results.iter().any(Result::is_err));
        assert!(tokenize_line("circuit.h(0) $").is_err());
        assert!(tokenize_line("circuit.h(0)").is_ok());
    }
}
