//! Productions and the LL(1) parsing table
//!
//! The table is authored directly for this one grammar rather than derived
//! from FIRST/FOLLOW sets. It is built once into a process-wide [`Grammar`]
//! and only ever read afterwards.

use super::symbols::{NonTerminal, Production, Symbol};
use crate::parser::lexer::TokenKind;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use NonTerminal as N;
use TokenKind as T;

/// Kinds that can begin a statement
const STATEMENT_START: [TokenKind; 8] = [
    T::Int,
    T::Float,
    T::String,
    T::Identifier,
    T::If,
    T::While,
    T::Input,
    T::Print,
];

/// Kinds that can begin an expression
const EXPRESSION_START: [TokenKind; 5] = [T::Identifier, T::Integer, T::Real, T::StrLiteral, T::LParen];

const COMPARISON_OPS: [TokenKind; 6] = [T::EqEq, T::NotEq, T::Lt, T::Gt, T::Le, T::Ge];

static GRAMMAR: Lazy<Grammar> = Lazy::new(Grammar::build);

/// The shared, immutable grammar instance.
pub fn grammar() -> &'static Grammar {
    &GRAMMAR
}

/// Terminals, non-terminals, productions and the parsing table
#[derive(Debug)]
pub struct Grammar {
    productions: FxHashMap<NonTerminal, Vec<Production>>,
    table: FxHashMap<(NonTerminal, TokenKind), usize>,
}

impl Grammar {
    fn build() -> Self {
        let mut grammar = Grammar {
            productions: FxHashMap::default(),
            table: FxHashMap::default(),
        };
        grammar.add_productions();
        grammar.fill_table();
        grammar
    }

    fn add_productions(&mut self) {
        let nt = |n: NonTerminal| Symbol::from(n);
        let t = |k: TokenKind| Symbol::from(k);
        let p = Production::new;

        self.productions.insert(N::Program, vec![p(vec![nt(N::StatementList)])]);
        self.productions.insert(
            N::StatementList,
            vec![p(vec![nt(N::Statement), nt(N::StatementList)]), Production::epsilon()],
        );
        self.productions.insert(
            N::Statement,
            vec![
                p(vec![nt(N::Declaration)]),
                p(vec![nt(N::Assignment)]),
                p(vec![nt(N::IfStatement)]),
                p(vec![nt(N::WhileStatement)]),
                p(vec![nt(N::InputStatement)]),
                p(vec![nt(N::PrintStatement)]),
            ],
        );
        self.productions.insert(
            N::Declaration,
            vec![p(vec![nt(N::Type), t(T::Identifier), t(T::Semicolon)])],
        );
        self.productions.insert(
            N::Type,
            vec![p(vec![t(T::Int)]), p(vec![t(T::Float)]), p(vec![t(T::String)])],
        );
        self.productions.insert(
            N::Assignment,
            vec![p(vec![t(T::Identifier), t(T::Assign), nt(N::Expression), t(T::Semicolon)])],
        );
        self.productions.insert(
            N::IfStatement,
            vec![p(vec![
                t(T::If),
                t(T::LParen),
                nt(N::Condition),
                t(T::RParen),
                t(T::LBrace),
                nt(N::StatementList),
                t(T::RBrace),
                nt(N::ElsePart),
            ])],
        );
        self.productions.insert(
            N::ElsePart,
            vec![
                p(vec![t(T::Else), t(T::LBrace), nt(N::StatementList), t(T::RBrace)]),
                Production::epsilon(),
            ],
        );
        self.productions.insert(
            N::WhileStatement,
            vec![p(vec![
                t(T::While),
                t(T::LParen),
                nt(N::Condition),
                t(T::RParen),
                t(T::LBrace),
                nt(N::StatementList),
                t(T::RBrace),
            ])],
        );
        self.productions.insert(
            N::InputStatement,
            vec![p(vec![t(T::Input), t(T::LParen), t(T::Identifier), t(T::RParen), t(T::Semicolon)])],
        );
        self.productions.insert(
            N::PrintStatement,
            vec![p(vec![t(T::Print), t(T::LParen), nt(N::Expression), t(T::RParen), t(T::Semicolon)])],
        );
        self.productions.insert(
            N::Condition,
            vec![p(vec![nt(N::Expression), nt(N::ComparisonOp), nt(N::Expression)])],
        );
        self.productions.insert(
            N::ComparisonOp,
            COMPARISON_OPS.iter().map(|&op| p(vec![t(op)])).collect(),
        );
        self.productions.insert(
            N::Expression,
            vec![p(vec![nt(N::Term), nt(N::ExpressionPrime)])],
        );
        self.productions.insert(
            N::ExpressionPrime,
            vec![
                p(vec![t(T::Plus), nt(N::Term), nt(N::ExpressionPrime)]),
                p(vec![t(T::Minus), nt(N::Term), nt(N::ExpressionPrime)]),
                Production::epsilon(),
            ],
        );
        self.productions.insert(N::Term, vec![p(vec![nt(N::Factor), nt(N::TermPrime)])]);
        self.productions.insert(
            N::TermPrime,
            vec![
                p(vec![t(T::Star), nt(N::Factor), nt(N::TermPrime)]),
                p(vec![t(T::Slash), nt(N::Factor), nt(N::TermPrime)]),
                p(vec![t(T::Percent), nt(N::Factor), nt(N::TermPrime)]),
                Production::epsilon(),
            ],
        );
        self.productions.insert(
            N::Factor,
            vec![
                p(vec![t(T::Identifier)]),
                p(vec![t(T::Integer)]),
                p(vec![t(T::Real)]),
                p(vec![t(T::StrLiteral)]),
                p(vec![t(T::LParen), nt(N::Expression), t(T::RParen)]),
            ],
        );
    }

    fn fill_table(&mut self) {
        for &kind in STATEMENT_START.iter().chain([T::End].iter()) {
            self.set(N::Program, kind, 0);
        }

        // statement_list is empty only where a block or the program ends
        for &kind in &STATEMENT_START {
            self.set(N::StatementList, kind, 0);
        }
        self.set(N::StatementList, T::End, 1);
        self.set(N::StatementList, T::RBrace, 1);

        for kind in [T::Int, T::Float, T::String] {
            self.set(N::Statement, kind, 0);
            self.set(N::Declaration, kind, 0);
        }
        self.set(N::Statement, T::Identifier, 1);
        self.set(N::Statement, T::If, 2);
        self.set(N::Statement, T::While, 3);
        self.set(N::Statement, T::Input, 4);
        self.set(N::Statement, T::Print, 5);

        self.set(N::Type, T::Int, 0);
        self.set(N::Type, T::Float, 1);
        self.set(N::Type, T::String, 2);

        self.set(N::Assignment, T::Identifier, 0);
        self.set(N::IfStatement, T::If, 0);
        self.set(N::WhileStatement, T::While, 0);
        self.set(N::InputStatement, T::Input, 0);
        self.set(N::PrintStatement, T::Print, 0);

        // else_part is empty on every lookahead except `else`
        for kind in TokenKind::TERMINALS {
            self.set(N::ElsePart, kind, if kind == T::Else { 0 } else { 1 });
        }

        for &kind in &EXPRESSION_START {
            self.set(N::Condition, kind, 0);
            self.set(N::Expression, kind, 0);
            self.set(N::Term, kind, 0);
        }

        for (index, &op) in COMPARISON_OPS.iter().enumerate() {
            self.set(N::ComparisonOp, op, index);
        }

        self.set(N::ExpressionPrime, T::Plus, 0);
        self.set(N::ExpressionPrime, T::Minus, 1);
        for &kind in [T::RParen, T::Semicolon].iter().chain(COMPARISON_OPS.iter()) {
            self.set(N::ExpressionPrime, kind, 2);
        }

        self.set(N::TermPrime, T::Star, 0);
        self.set(N::TermPrime, T::Slash, 1);
        self.set(N::TermPrime, T::Percent, 2);
        for &kind in [T::Plus, T::Minus, T::RParen, T::Semicolon]
            .iter()
            .chain(COMPARISON_OPS.iter())
        {
            self.set(N::TermPrime, kind, 3);
        }

        self.set(N::Factor, T::Identifier, 0);
        self.set(N::Factor, T::Integer, 1);
        self.set(N::Factor, T::Real, 2);
        self.set(N::Factor, T::StrLiteral, 3);
        self.set(N::Factor, T::LParen, 4);
    }

    fn set(&mut self, nt: NonTerminal, kind: TokenKind, index: usize) {
        debug_assert!(kind.is_terminal(), "{} is not a grammar terminal", kind);
        self.table.insert((nt, kind), index);
    }

    pub fn start_symbol(&self) -> NonTerminal {
        NonTerminal::Program
    }

    pub fn terminals(&self) -> &'static [TokenKind] {
        &TokenKind::TERMINALS
    }

    pub fn non_terminals(&self) -> &'static [NonTerminal] {
        &NonTerminal::ALL
    }

    /// Ordered alternatives for `nt`.
    pub fn productions(&self, nt: NonTerminal) -> &[Production] {
        self.productions.get(&nt).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Table entry for `(nt, lookahead)`: the index of the alternative to
    /// apply, or `None` when no production exists.
    pub fn lookup(&self, nt: NonTerminal, lookahead: TokenKind) -> Option<usize> {
        self.table.get(&(nt, lookahead)).copied()
    }

    pub fn production_for(&self, nt: NonTerminal, lookahead: TokenKind) -> Option<&Production> {
        self.lookup(nt, lookahead)
            .and_then(|index| self.productions(nt).get(index))
    }

    /// The grammar as `lhs → alt | alt` lines, for display.
    pub fn reference_lines(&self) -> Vec<String> {
        self.non_terminals()
            .iter()
            .map(|&nt| {
                let alternatives: Vec<String> =
                    self.productions(nt).iter().map(ToString::to_string).collect();
                format!("{} → {}", nt, alternatives.join(" | "))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_entry_in_range() {
        let g = grammar();
        for &nt in g.non_terminals() {
            for &kind in g.terminals() {
                if let Some(index) = g.lookup(nt, kind) {
                    assert!(
                        index < g.productions(nt).len(),
                        "[{}, {}] -> {} out of range",
                        nt,
                        kind,
                        index
                    );
                }
            }
        }
    }

    #[test]
    fn test_statement_list_empty_entries() {
        let g = grammar();
        assert_eq!(g.lookup(N::StatementList, T::End), Some(1));
        assert_eq!(g.lookup(N::StatementList, T::RBrace), Some(1));
        assert_eq!(g.lookup(N::StatementList, T::Identifier), Some(0));
        assert_eq!(g.lookup(N::StatementList, T::Semicolon), None);
        assert_eq!(g.lookup(N::StatementList, T::Else), None);
    }

    #[test]
    fn test_else_part_entries() {
        let g = grammar();
        assert_eq!(g.lookup(N::ElsePart, T::Else), Some(0));
        for &kind in g.terminals().iter().filter(|&&k| k != T::Else) {
            let production = g.production_for(N::ElsePart, kind).expect("else_part entry");
            assert!(production.is_epsilon());
        }
    }

    #[test]
    fn test_no_entries_for_non_grammar_kinds() {
        let g = grammar();
        for &nt in g.non_terminals() {
            assert_eq!(g.lookup(nt, T::Colon), None);
            assert_eq!(g.lookup(nt, T::Error), None);
        }
    }

    #[test]
    fn test_reference_lines() {
        let lines = grammar().reference_lines();
        assert_eq!(lines.len(), NonTerminal::ALL.len());
        assert_eq!(lines[0], "program → statement_list");
        assert!(lines.contains(&"else_part → else { statement_list } | ε".to_string()));
    }
}
