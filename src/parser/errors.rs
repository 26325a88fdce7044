//! Error types for the syntax analyzer
//!
//! Every failure a parse can end in is one variant of [`ParseError`]. None of
//! them escape as a panic or an `Err` from [`Parser::parse`]; they are carried
//! inside the returned outcome.
//!
//! [`Parser::parse`]: crate::parser::parser::Parser::parse

use crate::grammar::NonTerminal;
use crate::parser::lexer::{SourceLocation, TokenKind};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A character that matches no token pattern
    #[error("lexical error at {location}: unrecognized character '{character}'")]
    Lexical {
        character: char,
        location: SourceLocation,
    },

    /// The terminal on top of the stack differs from the lookahead
    #[error("syntax error at {location}: expected '{expected}', found '{found}' ('{lexeme}')")]
    UnexpectedTerminal {
        expected: TokenKind,
        found: TokenKind,
        lexeme: String,
        location: SourceLocation,
    },

    /// The table has no entry for the non-terminal and lookahead
    #[error("syntax error at {location}: no production for [{non_terminal}, {found}]")]
    NoProduction {
        non_terminal: NonTerminal,
        found: TokenKind,
        location: SourceLocation,
    },

    /// The derivation finished before the input did.
    ///
    /// `remaining` holds the unconsumed lexemes in order, without the
    /// trailing `$` end-marker.
    #[error("syntax error: input not fully consumed, remaining: [{}]", .remaining.join(", "))]
    TrailingInput { remaining: Vec<String> },

    /// An identifier touches an operator with no whitespace between them
    #[error("spacing error at {location}: '{lexeme}' must be separated from '{neighbor}' by whitespace")]
    OperatorSpacing {
        lexeme: String,
        neighbor: String,
        location: SourceLocation,
    },
}

impl ParseError {
    /// Position of the offending token, when the error has one.
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            ParseError::Lexical { location, .. }
            | ParseError::UnexpectedTerminal { location, .. }
            | ParseError::NoProduction { location, .. }
            | ParseError::OperatorSpacing { location, .. } => Some(*location),
            ParseError::TrailingInput { .. } => None,
        }
    }

    /// Whether the parse loop was never entered.
    pub fn is_pre_parse(&self) -> bool {
        matches!(
            self,
            ParseError::Lexical { .. } | ParseError::OperatorSpacing { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_position() {
        let lexical = ParseError::Lexical {
            character: '@',
            location: SourceLocation::new(2, 7),
        };
        assert_eq!(
            lexical.to_string(),
            "lexical error at line 2, column 7: unrecognized character '@'"
        );

        let mismatch = ParseError::UnexpectedTerminal {
            expected: TokenKind::Semicolon,
            found: TokenKind::End,
            lexeme: "$".to_string(),
            location: SourceLocation::new(1, 14),
        };
        assert_eq!(
            mismatch.to_string(),
            "syntax error at line 1, column 14: expected ';', found '$' ('$')"
        );

        let missing = ParseError::NoProduction {
            non_terminal: NonTerminal::Statement,
            found: TokenKind::Colon,
            location: SourceLocation::new(3, 1),
        };
        assert_eq!(
            missing.to_string(),
            "syntax error at line 3, column 1: no production for [statement, :]"
        );
    }

    #[test]
    fn test_trailing_input_lists_lexemes() {
        let error = ParseError::TrailingInput {
            remaining: vec!["}".to_string(), "x".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "syntax error: input not fully consumed, remaining: [}, x]"
        );
        assert_eq!(error.location(), None);
    }
}
