//! Grammar symbols and productions

use crate::parser::lexer::TokenKind;
use std::fmt;

/// Syntactic categories of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NonTerminal {
    Program,
    StatementList,
    Statement,
    Declaration,
    Type,
    Assignment,
    IfStatement,
    ElsePart,
    WhileStatement,
    InputStatement,
    PrintStatement,
    Condition,
    ComparisonOp,
    Expression,
    ExpressionPrime,
    Term,
    TermPrime,
    Factor,
}

impl NonTerminal {
    pub const ALL: [NonTerminal; 18] = [
        NonTerminal::Program,
        NonTerminal::StatementList,
        NonTerminal::Statement,
        NonTerminal::Declaration,
        NonTerminal::Type,
        NonTerminal::Assignment,
        NonTerminal::IfStatement,
        NonTerminal::ElsePart,
        NonTerminal::WhileStatement,
        NonTerminal::InputStatement,
        NonTerminal::PrintStatement,
        NonTerminal::Condition,
        NonTerminal::ComparisonOp,
        NonTerminal::Expression,
        NonTerminal::ExpressionPrime,
        NonTerminal::Term,
        NonTerminal::TermPrime,
        NonTerminal::Factor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NonTerminal::Program => "program",
            NonTerminal::StatementList => "statement_list",
            NonTerminal::Statement => "statement",
            NonTerminal::Declaration => "declaration",
            NonTerminal::Type => "type",
            NonTerminal::Assignment => "assignment",
            NonTerminal::IfStatement => "if_statement",
            NonTerminal::ElsePart => "else_part",
            NonTerminal::WhileStatement => "while_statement",
            NonTerminal::InputStatement => "input_statement",
            NonTerminal::PrintStatement => "print_statement",
            NonTerminal::Condition => "condition",
            NonTerminal::ComparisonOp => "comparison_op",
            NonTerminal::Expression => "expression",
            NonTerminal::ExpressionPrime => "expression_prime",
            NonTerminal::Term => "term",
            NonTerminal::TermPrime => "term_prime",
            NonTerminal::Factor => "factor",
        }
    }
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A symbol on the right-hand side of a production or on the parse stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(TokenKind),
    NonTerminal(NonTerminal),
    /// The empty-production marker (ε)
    Epsilon,
}

impl Symbol {
    pub const END: Symbol = Symbol::Terminal(TokenKind::End);
}

impl From<TokenKind> for Symbol {
    fn from(kind: TokenKind) -> Self {
        Symbol::Terminal(kind)
    }
}

impl From<NonTerminal> for Symbol {
    fn from(nt: NonTerminal) -> Self {
        Symbol::NonTerminal(nt)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(kind) => write!(f, "{}", kind),
            Symbol::NonTerminal(nt) => write!(f, "{}", nt),
            Symbol::Epsilon => f.write_str("ε"),
        }
    }
}

/// One right-hand-side alternative
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    pub symbols: Vec<Symbol>,
}

impl Production {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }

    pub fn epsilon() -> Self {
        Self {
            symbols: vec![Symbol::Epsilon],
        }
    }

    pub fn is_epsilon(&self) -> bool {
        self.symbols == [Symbol::Epsilon]
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, symbol) in self.symbols.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_display() {
        let production = Production::new(vec![
            Symbol::Terminal(TokenKind::Identifier),
            Symbol::Terminal(TokenKind::Assign),
            Symbol::NonTerminal(NonTerminal::Expression),
            Symbol::Terminal(TokenKind::Semicolon),
        ]);

        assert_eq!(production.to_string(), "identifier = expression ;");
        assert_eq!(Production::epsilon().to_string(), "ε");
        assert!(Production::epsilon().is_epsilon());
    }
}
