//! Parser for `OpenQASM` 2.
//!
//! Produces a flattened [`Circuit`] ready for execution. Gate definitions
//! are rejected: the executor's gate set is the built-in qelib1 standard
//! library, so `include "qelib1.inc"` is accepted and ignored.

use std::f64::consts::PI;

use rustc_hash::FxHashMap;

use crate::circuit::{Circuit, Gate, Op};
use crate::error::{ParseError, ParseResult};
use crate::lexer::{SpannedToken, Token, tokenize};

/// Parse a QASM2 source string into a [`Circuit`].
pub fn parse(source: &str) -> ParseResult<Circuit> {
    let mut parser = Parser::new(source)?;
    parser.parse_program()
}

/// A declared register, flattened to a global bit range.
struct Reg {
    start: usize,
    size: usize,
}

/// A resolved operand: a global bit slice of a register.
struct Operand {
    name: String,
    start: usize,
    size: usize,
}

impl Operand {
    fn bits(&self) -> impl Iterator<Item = usize> + '_ {
        self.start..self.start + self.size
    }
}

/// Parser state.
struct Parser<'a> {
    source: &'a str,
    tokens: Vec<SpannedToken>,
    pos: usize,
    qregs: FxHashMap<String, Reg>,
    cregs: FxHashMap<String, Reg>,
    num_qubits: usize,
    num_clbits: usize,
    ops: Vec<Op>,
}

impl<'a> Parser<'a> {
    /// Create a new parser from source.
    fn new(source: &'a str) -> ParseResult<Self> {
        let token_results = tokenize(source);
        let mut tokens = Vec::new();

        for result in token_results {
            match result {
                // Comments only matter to the highlighter.
                Ok(t) if t.token == Token::Comment => {}
                Ok(t) => tokens.push(t),
                Err((span, msg)) => {
                    return Err(ParseError::LexerError {
                        position: span.start,
                        message: msg,
                    });
                }
            }
        }

        Ok(Self {
            source,
            tokens,
            pos: 0,
            qregs: FxHashMap::default(),
            cregs: FxHashMap::default(),
            num_qubits: 0,
            num_clbits: 0,
            ops: Vec::new(),
        })
    }

    /// Line number of the current token, for error reporting.
    fn line(&self) -> usize {
        let offset = self
            .tokens
            .get(self.pos.min(self.tokens.len().saturating_sub(1)))
            .map_or(self.source.len(), |t| t.span.start);
        1 + self.source[..offset].matches('\n').count()
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    fn advance(&mut self) -> Option<Token> {
        if self.is_eof() {
            return None;
        }
        let token = self.tokens[self.pos].token.clone();
        self.pos += 1;
        Some(token)
    }

    /// Expect a specific token (compared by variant, not payload).
    fn expect(&mut self, expected: &Token) -> ParseResult<()> {
        let line = self.line();
        let found = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof(format!("expected {expected}")))?;

        if std::mem::discriminant(&found) != std::mem::discriminant(expected) {
            return Err(ParseError::UnexpectedToken {
                line,
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
        Ok(())
    }

    fn check(&self, token: &Token) -> bool {
        self.peek()
            .is_some_and(|t| std::mem::discriminant(t) == std::mem::discriminant(token))
    }

    fn consume(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_identifier(&mut self, what: &str) -> ParseResult<String> {
        let line = self.line();
        match self.advance() {
            Some(Token::Identifier(name)) => Ok(name),
            Some(found) => Err(ParseError::UnexpectedToken {
                line,
                expected: what.to_string(),
                found: found.to_string(),
            }),
            None => Err(ParseError::UnexpectedEof(what.to_string())),
        }
    }

    fn expect_int(&mut self, what: &str) -> ParseResult<u64> {
        let line = self.line();
        match self.advance() {
            Some(Token::IntLiteral(v)) => Ok(v),
            Some(found) => Err(ParseError::UnexpectedToken {
                line,
                expected: what.to_string(),
                found: found.to_string(),
            }),
            None => Err(ParseError::UnexpectedEof(what.to_string())),
        }
    }

    // ========================================================================
    // Program structure
    // ========================================================================

    fn parse_program(&mut self) -> ParseResult<Circuit> {
        self.parse_version()?;

        while !self.is_eof() {
            self.parse_statement()?;
        }

        Ok(Circuit::new(
            self.num_qubits,
            self.num_clbits,
            std::mem::take(&mut self.ops),
        ))
    }

    fn parse_version(&mut self) -> ParseResult<()> {
        self.expect(&Token::OpenQasm)?;

        let line = self.line();
        let version = match self.advance() {
            Some(Token::FloatLiteral(v)) => v,
            Some(Token::IntLiteral(v)) => v as f64,
            Some(found) => {
                return Err(ParseError::UnexpectedToken {
                    line,
                    expected: "version number".to_string(),
                    found: found.to_string(),
                });
            }
            None => return Err(ParseError::UnexpectedEof("version number".to_string())),
        };

        if !(2.0..3.0).contains(&version) {
            return Err(ParseError::InvalidVersion(version.to_string()));
        }

        self.expect(&Token::Semicolon)
    }

    fn parse_statement(&mut self) -> ParseResult<()> {
        match self.peek() {
            Some(Token::Include) => self.parse_include(),
            Some(Token::QReg) => self.parse_register(true),
            Some(Token::CReg) => self.parse_register(false),
            Some(Token::Gate) => Err(ParseError::Unsupported(
                "gate definitions; the qelib1 standard gates are built in".to_string(),
            )),
            Some(Token::Barrier) => self.parse_barrier(),
            Some(Token::If) => self.parse_conditional(),
            Some(
                Token::Measure | Token::Reset | Token::GateU | Token::GateCX | Token::Identifier(_),
            ) => {
                let ops = self.parse_quantum_op()?;
                self.ops.extend(ops);
                Ok(())
            }
            Some(found) => Err(ParseError::UnexpectedToken {
                line: self.line(),
                expected: "statement".to_string(),
                found: found.to_string(),
            }),
            None => Err(ParseError::UnexpectedEof("statement".to_string())),
        }
    }

    fn parse_include(&mut self) -> ParseResult<()> {
        self.expect(&Token::Include)?;
        self.expect(&Token::StringLiteral(String::new()))?;
        self.expect(&Token::Semicolon)
    }

    fn parse_register(&mut self, quantum: bool) -> ParseResult<()> {
        self.advance(); // qreg / creg
        let name = self.expect_identifier("register name")?;
        self.expect(&Token::LBracket)?;
        let size = self.expect_int("register size")? as usize;
        self.expect(&Token::RBracket)?;
        self.expect(&Token::Semicolon)?;

        if self.qregs.contains_key(&name) || self.cregs.contains_key(&name) {
            return Err(ParseError::DuplicateDeclaration(name));
        }

        if quantum {
            let start = self.num_qubits;
            self.num_qubits += size;
            self.qregs.insert(name, Reg { start, size });
        } else {
            let start = self.num_clbits;
            self.num_clbits += size;
            self.cregs.insert(name, Reg { start, size });
        }
        Ok(())
    }

    fn parse_barrier(&mut self) -> ParseResult<()> {
        self.expect(&Token::Barrier)?;
        // Operands are validated but the barrier itself is a no-op.
        self.parse_operand(true)?;
        while self.consume(&Token::Comma) {
            self.parse_operand(true)?;
        }
        self.expect(&Token::Semicolon)?;
        self.ops.push(Op::Barrier);
        Ok(())
    }

    fn parse_conditional(&mut self) -> ParseResult<()> {
        self.expect(&Token::If)?;
        self.expect(&Token::LParen)?;
        let name = self.expect_identifier("classical register")?;
        let (creg_start, creg_size) = {
            let reg = self
                .cregs
                .get(&name)
                .ok_or_else(|| ParseError::UndefinedRegister(name.clone()))?;
            (reg.start, reg.size)
        };
        self.expect(&Token::EqEq)?;
        let value = self.expect_int("comparison value")?;
        self.expect(&Token::RParen)?;

        let ops = self.parse_quantum_op()?;
        self.ops.extend(ops.into_iter().map(|op| Op::Conditional {
            creg_start,
            creg_size,
            value,
            op: Box::new(op),
        }));
        Ok(())
    }

    // ========================================================================
    // Quantum operations
    // ========================================================================

    /// Parse one quantum op (gate application, measure or reset),
    /// including the trailing semicolon. Broadcast over whole registers
    /// may expand to several flattened ops.
    fn parse_quantum_op(&mut self) -> ParseResult<Vec<Op>> {
        match self.peek() {
            Some(Token::Measure) => self.parse_measure(),
            Some(Token::Reset) => self.parse_reset(),
            Some(Token::GateU | Token::GateCX | Token::Identifier(_)) => self.parse_gate_call(),
            Some(found) => Err(ParseError::UnexpectedToken {
                line: self.line(),
                expected: "quantum operation".to_string(),
                found: found.to_string(),
            }),
            None => Err(ParseError::UnexpectedEof("quantum operation".to_string())),
        }
    }

    fn parse_measure(&mut self) -> ParseResult<Vec<Op>> {
        self.expect(&Token::Measure)?;
        let src = self.parse_operand(true)?;
        self.expect(&Token::Arrow)?;
        let dst = self.parse_operand(false)?;
        self.expect(&Token::Semicolon)?;

        if src.size != dst.size {
            return Err(ParseError::RegisterSizeMismatch {
                left: src.name,
                left_size: src.size,
                right: dst.name,
                right_size: dst.size,
            });
        }

        Ok(src
            .bits()
            .zip(dst.bits())
            .map(|(qubit, clbit)| Op::Measure { qubit, clbit })
            .collect())
    }

    fn parse_reset(&mut self) -> ParseResult<Vec<Op>> {
        self.expect(&Token::Reset)?;
        let target = self.parse_operand(true)?;
        self.expect(&Token::Semicolon)?;
        Ok(target.bits().map(|qubit| Op::Reset { qubit }).collect())
    }

    fn parse_gate_call(&mut self) -> ParseResult<Vec<Op>> {
        let name = match self.advance() {
            Some(Token::GateU) => "U".to_string(),
            Some(Token::GateCX) => "CX".to_string(),
            Some(Token::Identifier(name)) => name,
            _ => unreachable!("checked by caller"),
        };

        let mut params = Vec::new();
        if self.consume(&Token::LParen) {
            if !self.check(&Token::RParen) {
                params.push(self.parse_param_expr()?);
                while self.consume(&Token::Comma) {
                    params.push(self.parse_param_expr()?);
                }
            }
            self.expect(&Token::RParen)?;
        }

        let mut operands = vec![self.parse_operand(true)?];
        while self.consume(&Token::Comma) {
            operands.push(self.parse_operand(true)?);
        }
        self.expect(&Token::Semicolon)?;

        let gate = resolve_gate(&name, &params)?;
        let arity = gate.num_qubits();

        if operands.len() != arity {
            return Err(ParseError::WrongQubitCount {
                gate: name,
                expected: arity,
                got: operands.len(),
            });
        }

        if arity == 1 {
            // Single-qubit gates broadcast over a whole register.
            return Ok(operands[0]
                .bits()
                .map(|qubit| Op::Gate {
                    gate: gate.clone(),
                    qubits: vec![qubit],
                })
                .collect());
        }

        if operands.iter().any(|o| o.size != 1) {
            return Err(ParseError::Unsupported(format!(
                "whole-register operands on the {arity}-qubit gate '{name}'"
            )));
        }

        let qubits: Vec<usize> = operands.iter().map(|o| o.start).collect();
        for (i, qubit) in qubits.iter().enumerate() {
            if qubits[..i].contains(qubit) {
                return Err(ParseError::DuplicateQubit(name));
            }
        }

        Ok(vec![Op::Gate { gate, qubits }])
    }

    /// Parse `name` or `name[index]` and resolve against the declared
    /// registers (`quantum` selects qregs vs cregs).
    fn parse_operand(&mut self, quantum: bool) -> ParseResult<Operand> {
        let name = self.expect_identifier(if quantum {
            "quantum register"
        } else {
            "classical register"
        })?;

        let regs = if quantum { &self.qregs } else { &self.cregs };
        let reg = regs
            .get(&name)
            .ok_or_else(|| ParseError::UndefinedRegister(name.clone()))?;
        let (start, size) = (reg.start, reg.size);

        if self.consume(&Token::LBracket) {
            let index = self.expect_int("register index")? as usize;
            self.expect(&Token::RBracket)?;
            if index >= size {
                return Err(ParseError::IndexOutOfBounds {
                    register: name,
                    index,
                    size,
                });
            }
            Ok(Operand {
                name,
                start: start + index,
                size: 1,
            })
        } else {
            Ok(Operand { name, start, size })
        }
    }

    // ========================================================================
    // Parameter expressions
    // ========================================================================

    /// Parse a constant parameter expression and evaluate it.
    ///
    /// QASM2 gate parameters outside gate bodies are constant, so the
    /// value is folded directly instead of building an expression tree.
    fn parse_param_expr(&mut self) -> ParseResult<f64> {
        self.parse_additive()
    }

    fn parse_additive(&mut self) -> ParseResult<f64> {
        let mut value = self.parse_multiplicative()?;
        loop {
            if self.consume(&Token::Plus) {
                value += self.parse_multiplicative()?;
            } else if self.consume(&Token::Minus) {
                value -= self.parse_multiplicative()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn parse_multiplicative(&mut self) -> ParseResult<f64> {
        let mut value = self.parse_unary()?;
        loop {
            if self.consume(&Token::Star) {
                value *= self.parse_unary()?;
            } else if self.consume(&Token::Slash) {
                value /= self.parse_unary()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn parse_unary(&mut self) -> ParseResult<f64> {
        if self.consume(&Token::Minus) {
            return Ok(-self.parse_unary()?);
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> ParseResult<f64> {
        let line = self.line();
        match self.advance() {
            Some(Token::IntLiteral(v)) => Ok(v as f64),
            Some(Token::FloatLiteral(v)) => Ok(v),
            Some(Token::Pi) => Ok(PI),
            Some(Token::LParen) => {
                let value = self.parse_additive()?;
                self.expect(&Token::RParen)?;
                Ok(value)
            }
            Some(found) => Err(ParseError::UnexpectedToken {
                line,
                expected: "parameter expression".to_string(),
                found: found.to_string(),
            }),
            None => Err(ParseError::UnexpectedEof("parameter expression".to_string())),
        }
    }
}

/// Map a gate name and parameter list onto the built-in gate set.
fn resolve_gate(name: &str, params: &[f64]) -> ParseResult<Gate> {
    let expect_params = |expected: usize| -> ParseResult<()> {
        if params.len() == expected {
            Ok(())
        } else {
            Err(ParseError::WrongParameterCount {
                gate: name.to_string(),
                expected,
                got: params.len(),
            })
        }
    };

    let gate = match name {
        "id" => Gate::I,
        "x" => Gate::X,
        "y" => Gate::Y,
        "z" => Gate::Z,
        "h" => Gate::H,
        "s" => Gate::S,
        "sdg" => Gate::Sdg,
        "t" => Gate::T,
        "tdg" => Gate::Tdg,
        "sx" => Gate::Sx,
        "sxdg" => Gate::Sxdg,
        "cx" | "CX" => Gate::Cx,
        "cy" => Gate::Cy,
        "cz" => Gate::Cz,
        "ch" => Gate::Ch,
        "swap" => Gate::Swap,
        "ccx" => Gate::Ccx,
        "rx" => {
            expect_params(1)?;
            return Ok(Gate::Rx(params[0]));
        }
        "ry" => {
            expect_params(1)?;
            return Ok(Gate::Ry(params[0]));
        }
        "rz" => {
            expect_params(1)?;
            return Ok(Gate::Rz(params[0]));
        }
        "p" | "u1" => {
            expect_params(1)?;
            return Ok(Gate::Phase(params[0]));
        }
        "u2" => {
            expect_params(2)?;
            return Ok(Gate::U(PI / 2.0, params[0], params[1]));
        }
        "u" | "u3" | "U" => {
            expect_params(3)?;
            return Ok(Gate::U(params[0], params[1], params[2]));
        }
        _ => return Err(ParseError::UnknownGate(name.to_string())),
    };

    expect_params(0)?;
    Ok(gate)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BELL: &str = r#"
        OPENQASM 2.0;
        include "qelib1.inc";

        qreg q[2];
        creg c[2];

        reset q[0];
        h q[0];
        reset q[1];
        cx q[0],q[1];
        h q[0];
        h q[1];
        measure q[0] -> c[0];
        measure q[1] -> c[1];
    "#;

    #[test]
    fn test_parse_bell() {
        let circuit = parse(BELL).unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_clbits(), 2);

        let measures = circuit
            .ops()
            .iter()
            .filter(|op| matches!(op, Op::Measure { .. }))
            .count();
        assert_eq!(measures, 2);
    }

    #[test]
    fn test_rejects_qasm3_version() {
        let err = parse("OPENQASM 3.0;\nqreg q[1];").unwrap_err();
        assert!(matches!(err, ParseError::InvalidVersion(_)));
    }

    #[test]
    fn test_missing_header() {
        let err = parse("qreg q[1];").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_unknown_gate() {
        let err = parse("OPENQASM 2.0; qreg q[1]; zz q[0];").unwrap_err();
        assert!(matches!(err, ParseError::UnknownGate(ref g) if g == "zz"));
    }

    #[test]
    fn test_undefined_register() {
        let err = parse("OPENQASM 2.0; qreg q[1]; h r[0];").unwrap_err();
        assert!(matches!(err, ParseError::UndefinedRegister(ref r) if r == "r"));
    }

    #[test]
    fn test_index_out_of_bounds() {
        let err = parse("OPENQASM 2.0; qreg q[2]; h q[2];").unwrap_err();
        assert!(matches!(
            err,
            ParseError::IndexOutOfBounds { index: 2, size: 2, .. }
        ));
    }

    #[test]
    fn test_parameterized_gate() {
        let circuit = parse("OPENQASM 2.0; qreg q[1]; rx(pi/2) q[0];").unwrap();
        match &circuit.ops()[0] {
            Op::Gate {
                gate: Gate::Rx(theta),
                ..
            } => assert!((theta - PI / 2.0).abs() < 1e-12),
            other => panic!("unexpected op: {other:?}"),
        }
    }

    #[test]
    fn test_negative_parameter() {
        let circuit = parse("OPENQASM 2.0; qreg q[1]; rz(-pi/4) q[0];").unwrap();
        match &circuit.ops()[0] {
            Op::Gate {
                gate: Gate::Rz(theta),
                ..
            } => assert!((theta + PI / 4.0).abs() < 1e-12),
            other => panic!("unexpected op: {other:?}"),
        }
    }

    #[test]
    fn test_u2_lowering() {
        let circuit = parse("OPENQASM 2.0; qreg q[1]; u2(0, pi) q[0];").unwrap();
        match &circuit.ops()[0] {
            Op::Gate {
                gate: Gate::U(theta, phi, lambda),
                ..
            } => {
                assert!((theta - PI / 2.0).abs() < 1e-12);
                assert!(phi.abs() < 1e-12);
                assert!((lambda - PI).abs() < 1e-12);
            }
            other => panic!("unexpected op: {other:?}"),
        }
    }

    #[test]
    fn test_single_qubit_broadcast() {
        let circuit = parse("OPENQASM 2.0; qreg q[3]; h q;").unwrap();
        assert_eq!(circuit.num_ops(), 3);
    }

    #[test]
    fn test_measure_broadcast() {
        let circuit = parse("OPENQASM 2.0; qreg q[2]; creg c[2]; measure q -> c;").unwrap();
        assert_eq!(
            circuit.ops(),
            &[
                Op::Measure { qubit: 0, clbit: 0 },
                Op::Measure { qubit: 1, clbit: 1 },
            ]
        );
    }

    #[test]
    fn test_measure_size_mismatch() {
        let err =
            parse("OPENQASM 2.0; qreg q[2]; creg c[3]; measure q -> c;").unwrap_err();
        assert!(matches!(err, ParseError::RegisterSizeMismatch { .. }));
    }

    #[test]
    fn test_conditional() {
        let circuit =
            parse("OPENQASM 2.0; qreg q[1]; creg c[1]; measure q[0] -> c[0]; if (c == 1) x q[0];")
                .unwrap();
        match circuit.ops().last().unwrap() {
            Op::Conditional {
                creg_start,
                creg_size,
                value,
                op,
            } => {
                assert_eq!(*creg_start, 0);
                assert_eq!(*creg_size, 1);
                assert_eq!(*value, 1);
                assert!(matches!(**op, Op::Gate { gate: Gate::X, .. }));
            }
            other => panic!("unexpected op: {other:?}"),
        }
    }

    #[test]
    fn test_gate_definition_rejected() {
        let err = parse("OPENQASM 2.0; gate foo a { }").unwrap_err();
        assert!(matches!(err, ParseError::Unsupported(_)));
    }

    #[test]
    fn test_builtin_u_and_cx() {
        let circuit =
            parse("OPENQASM 2.0; qreg q[2]; U(pi/2, 0, pi) q[0]; CX q[0], q[1];").unwrap();
        assert_eq!(circuit.num_ops(), 2);
        assert!(matches!(
            &circuit.ops()[1],
            Op::Gate { gate: Gate::Cx, qubits } if qubits == &[0, 1]
        ));
    }

    #[test]
    fn test_second_register_offsets() {
        let circuit =
            parse("OPENQASM 2.0; qreg a[2]; qreg b[2]; cx a[1], b[0];").unwrap();
        assert!(matches!(
            &circuit.ops()[0],
            Op::Gate { gate: Gate::Cx, qubits } if qubits == &[1, 2]
        ));
    }

    #[test]
    fn test_duplicate_qubit_operand() {
        let err = parse("OPENQASM 2.0; qreg q[2]; cx q[0], q[0];").unwrap_err();
        assert!(matches!(err, ParseError::DuplicateQubit(ref g) if g == "cx"));
    }

    #[test]
    fn test_duplicate_register() {
        let err = parse("OPENQASM 2.0; qreg q[1]; creg q[1];").unwrap_err();
        assert!(matches!(err, ParseError::DuplicateDeclaration(ref n) if n == "q"));
    }
}
