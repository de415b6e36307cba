//! Error types for the QASM2 parser.

use thiserror::Error;

/// Errors that can occur during parsing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Lexer error (invalid token).
    #[error("Lexer error at position {position}: {message}")]
    LexerError { position: usize, message: String },

    /// Unexpected token.
    #[error("Unexpected token at line {line}: expected {expected}, found {found}")]
    UnexpectedToken {
        line: usize,
        expected: String,
        found: String,
    },

    /// Unexpected end of input.
    #[error("Unexpected end of input: {0}")]
    UnexpectedEof(String),

    /// Invalid version.
    #[error("Invalid OPENQASM version: {0}")]
    InvalidVersion(String),

    /// Unknown gate name.
    #[error("Unknown gate: {0}")]
    UnknownGate(String),

    /// Register was never declared.
    #[error("Undefined register: {0}")]
    UndefinedRegister(String),

    /// Register declared twice.
    #[error("Duplicate declaration: {0}")]
    DuplicateDeclaration(String),

    /// Wrong number of qubit operands.
    #[error("Gate '{gate}' expects {expected} qubits, got {got}")]
    WrongQubitCount {
        gate: String,
        expected: usize,
        got: usize,
    },

    /// Wrong number of parameters.
    #[error("Gate '{gate}' expects {expected} parameters, got {got}")]
    WrongParameterCount {
        gate: String,
        expected: usize,
        got: usize,
    },

    /// Same qubit used twice in one gate application.
    #[error("Duplicate qubit operand on gate '{0}'")]
    DuplicateQubit(String),

    /// Index out of bounds.
    #[error("Index {index} out of bounds for register '{register}' of size {size}")]
    IndexOutOfBounds {
        register: String,
        index: usize,
        size: usize,
    },

    /// Broadcast over registers of different sizes.
    #[error("Register size mismatch: '{left}' has {left_size} bits, '{right}' has {right_size}")]
    RegisterSizeMismatch {
        left: String,
        left_size: usize,
        right: String,
        right_size: usize,
    },

    /// Syntactically valid QASM2 the executor does not support.
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
