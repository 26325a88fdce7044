//! Operator-spacing check
//!
//! A stylistic pre-pass over an already tokenized program: an identifier may
//! not touch an arithmetic, comparison or assignment operator (`x>5`, `a=b`).
//! The grammar itself does not care; the check is only run when enabled
//! through [`ParserOptions::strict_spacing`].
//!
//! [`ParserOptions::strict_spacing`]: crate::parser::parser::ParserOptions::strict_spacing

use super::errors::ParseError;
use super::lexer::{Token, TokenKind};

/// Whether `right` starts exactly where `left` ends.
fn adjacent(left: &Token, right: &Token) -> bool {
    left.line == right.line
        && !left.lexeme.contains('\n')
        && left.column + left.width() == right.column
}

/// Every identifier/operator pair written without whitespace between them,
/// in source order.
pub fn spacing_violations(tokens: &[Token]) -> Vec<ParseError> {
    tokens
        .windows(2)
        .filter_map(|pair| {
            let (left, right) = (&pair[0], &pair[1]);
            let offending = (left.kind == TokenKind::Identifier && right.kind.is_operator())
                || (left.kind.is_operator() && right.kind == TokenKind::Identifier);

            (offending && adjacent(left, right)).then(|| ParseError::OperatorSpacing {
                lexeme: left.lexeme.clone(),
                neighbor: right.lexeme.clone(),
                location: left.location(),
            })
        })
        .collect()
}
