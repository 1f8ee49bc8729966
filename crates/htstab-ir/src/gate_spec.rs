//! Gate specification text format.
//!
//! A gate specification is a whitespace-separated list of instructions.
//! Each instruction is a gate identifier immediately followed by its
//! zero-based qubit operands, separated by commas:
//!
//! ```text
//! h0 s1 sdg2 cx0,1 cz1,2 swap0,2
//! ```
//!
//! For `cx` the first operand is the control qubit.

use logos::Logos;

use crate::error::{IrError, IrResult};
use crate::gate::CliffordGate;
use crate::instruction::Instruction;
use crate::qubit::QubitId;

/// Tokens of a gate specification.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum Token<'s> {
    #[regex(r"[a-z]+", |lex| lex.slice())]
    Name(&'s str),

    #[regex(r"[0-9]+", |lex| lex.slice().parse::<u32>().ok())]
    Index(u32),

    #[token(",")]
    Comma,
}

/// Parse a gate specification into instructions.
///
/// Operand counts and operand distinctness are checked; qubit bounds are
/// not, since a gate specification does not carry the circuit width.
pub fn parse(spec: &str) -> IrResult<Vec<Instruction>> {
    let mut lexer = Token::lexer(spec).spanned().peekable();
    let mut instructions = vec![];

    while let Some((token, span)) = lexer.next() {
        let name = match token {
            Ok(Token::Name(name)) => name,
            Ok(_) => {
                return Err(malformed(span.start, "expected a gate identifier"));
            }
            Err(()) => {
                return Err(malformed(span.start, "unexpected character"));
            }
        };
        let gate = CliffordGate::from_name(name).ok_or_else(|| IrError::UnknownGate {
            name: name.to_string(),
            offset: span.start,
        })?;

        let mut qubits = Vec::with_capacity(2);
        let mut end = span.end;
        loop {
            match lexer.next() {
                Some((Ok(Token::Index(index)), s)) if s.start == end => {
                    qubits.push(QubitId(index));
                    end = s.end;
                }
                _ => {
                    return Err(malformed(end, format!("expected a qubit index after '{name}'")));
                }
            }
            let comma_follows = matches!(lexer.peek(), Some((Ok(Token::Comma), s)) if s.start == end);
            if !comma_follows {
                break;
            }
            if let Some((_, s)) = lexer.next() {
                end = s.end;
            }
        }

        if let Some((_, s)) = lexer.peek() {
            if s.start == end {
                return Err(malformed(end, "instructions must be separated by whitespace"));
            }
        }

        instructions.push(Instruction::new(gate, qubits)?);
    }

    Ok(instructions)
}

/// Render instructions as a gate specification.
pub fn emit(instructions: &[Instruction]) -> String {
    instructions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn malformed(offset: usize, reason: impl Into<String>) -> IrError {
    IrError::MalformedSpec {
        offset,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_gates() {
        let insts = parse("h0 s1 sdg2 x0 y1 z2 cx0,1 cz1,2 swap0,2").unwrap();
        let gates: Vec<_> = insts.iter().map(|i| i.gate).collect();
        assert_eq!(
            gates,
            vec![
                CliffordGate::H,
                CliffordGate::S,
                CliffordGate::Sdg,
                CliffordGate::X,
                CliffordGate::Y,
                CliffordGate::Z,
                CliffordGate::CX,
                CliffordGate::CZ,
                CliffordGate::Swap,
            ]
        );
        assert_eq!(insts[6].qubits, vec![QubitId(0), QubitId(1)]);
    }

    #[test]
    fn test_parse_ignores_extra_whitespace() {
        let insts = parse("  h0   cz0,1 \n").unwrap();
        assert_eq!(insts.len(), 2);
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_multi_digit_operands() {
        let insts = parse("cz10,12").unwrap();
        assert_eq!(insts[0].qubits, vec![QubitId(10), QubitId(12)]);
    }

    #[test]
    fn test_unknown_gate() {
        assert!(matches!(
            parse("h0 hs1"),
            Err(IrError::UnknownGate { ref name, offset: 3 }) if name == "hs"
        ));
        assert!(matches!(parse("t0"), Err(IrError::UnknownGate { .. })));
    }

    #[test]
    fn test_malformed_specs() {
        assert!(matches!(parse("h"), Err(IrError::MalformedSpec { .. })));
        assert!(matches!(parse("h 0"), Err(IrError::MalformedSpec { .. })));
        assert!(matches!(parse("h0h1"), Err(IrError::MalformedSpec { .. })));
        assert!(matches!(parse("cz0,"), Err(IrError::MalformedSpec { .. })));
        assert!(matches!(parse("H0"), Err(IrError::MalformedSpec { .. })));
        assert!(matches!(parse("0"), Err(IrError::MalformedSpec { .. })));
    }

    #[test]
    fn test_operand_count_checked() {
        assert!(matches!(
            parse("cx0"),
            Err(IrError::QubitCountMismatch { expected: 2, got: 1, .. })
        ));
        assert!(matches!(
            parse("h0,1"),
            Err(IrError::QubitCountMismatch { expected: 1, got: 2, .. })
        ));
        assert!(matches!(parse("swap2,2"), Err(IrError::DuplicateQubit { .. })));
    }

    #[test]
    fn test_emit() {
        let spec = "h0 s1 cx1,0 swap0,2 sdg2";
        assert_eq!(emit(&parse(spec).unwrap()), spec);
    }
}
