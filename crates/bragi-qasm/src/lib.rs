//! `OpenQASM` 2 front end for Bragi
//!
//! This crate provides everything Bragi needs to read the `OpenQASM` 2.0
//! quantum assembly dialect: a lexer, a display-category highlighter for
//! the workbench, and a parser that produces an executable [`Circuit`].
//!
//! # Supported Features
//!
//! | Feature | Status | Example |
//! |---------|--------|---------|
//! | Version declaration | ✅ | `OPENQASM 2.0;` |
//! | Includes | ✅ (accepted, ignored) | `include "qelib1.inc";` |
//! | Register declarations | ✅ | `qreg q[2];`, `creg c[2];` |
//! | Standard gates | ✅ | `h q[0];`, `cx q[0], q[1];` |
//! | Parameterized gates | ✅ | `rx(pi/4) q[0];` |
//! | Built-in gates | ✅ | `U(pi/2, 0, pi) q[0];`, `CX q[0], q[1];` |
//! | Measurements | ✅ | `measure q[0] -> c[0];`, `measure q -> c;` |
//! | Reset | ✅ | `reset q[0];` |
//! | Barriers | ✅ | `barrier q;` |
//! | Conditionals | ✅ | `if (c == 1) x q[0];` |
//! | Comments | ✅ | `// comment` |
//! | Gate definitions | ❌ | `gate foo a, b { ... }` |
//!
//! # Example: Parsing QASM
//!
//! ```rust
//! use bragi_qasm::parse;
//!
//! let qasm = r#"
//!     OPENQASM 2.0;
//!     include "qelib1.inc";
//!     qreg q[2];
//!     creg c[2];
//!     h q[0];
//!     cx q[0], q[1];
//!     measure q -> c;
//! "#;
//!
//! let circuit = parse(qasm).unwrap();
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.num_clbits(), 2);
//! ```
//!
//! # Example: Highlighting
//!
//! The highlighter is a stateless ordered rule set: the first matching
//! rule at each position decides the display category, whitespace gets no
//! category, and anything unmatched advances one character uncategorized.
//!
//! ```rust
//! use bragi_qasm::{Category, highlight};
//!
//! let spans = highlight("qreg q[2];");
//! assert_eq!(spans[0].category, Some(Category::Keyword)); // qreg
//! assert_eq!(spans[1].category, None);                    // q
//! ```

mod circuit;
mod error;
mod highlight;
mod lexer;
mod parser;

pub use circuit::{Circuit, Gate, Op};
pub use error::{ParseError, ParseResult};
pub use highlight::{Category, HighlightSpan, highlight};
pub use lexer::{SpannedToken, Token, tokenize};
pub use parser::parse;
