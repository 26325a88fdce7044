// Derivation trace recorded by the parser, step by step

use crate::grammar::{NonTerminal, Production, Symbol};
use crate::parser::lexer::{SourceLocation, Token, TokenKind};
use std::fmt;

/// The closed set of event categories a front-end may style differently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceCategory {
    Snapshot,
    Match,
    Apply,
    Error,
    Success,
}

/// One parser step
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    /// Full stack, bottom first
    StackSnapshot(Vec<Symbol>),
    /// Remaining input, lookahead first
    InputSnapshot(Vec<Token>),
    Match {
        terminal: TokenKind,
        lexeme: String,
    },
    Apply {
        non_terminal: NonTerminal,
        production: Production,
    },
    /// The ε marker was popped
    ApplyEpsilon,
    Error(String),
    Accept,
}

impl TraceEvent {
    pub fn category(&self) -> TraceCategory {
        match self {
            TraceEvent::StackSnapshot(_) | TraceEvent::InputSnapshot(_) => TraceCategory::Snapshot,
            TraceEvent::Match { .. } => TraceCategory::Match,
            TraceEvent::Apply { .. } | TraceEvent::ApplyEpsilon => TraceCategory::Apply,
            TraceEvent::Error(_) => TraceCategory::Error,
            TraceEvent::Accept => TraceCategory::Success,
        }
    }
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::StackSnapshot(stack) => {
                let symbols: Vec<String> = stack.iter().map(ToString::to_string).collect();
                write!(f, "Stack: [{}]", symbols.join(", "))
            }
            TraceEvent::InputSnapshot(input) => {
                let lexemes: Vec<&str> = input.iter().map(|t| t.lexeme.as_str()).collect();
                write!(f, "Input: [{}]", lexemes.join(" "))
            }
            TraceEvent::Match { terminal, lexeme } => write!(f, "Match: {} '{}'", terminal, lexeme),
            TraceEvent::Apply {
                non_terminal,
                production,
            } => write!(f, "Apply: {} -> {}", non_terminal, production),
            TraceEvent::ApplyEpsilon => f.write_str("Apply: ε"),
            TraceEvent::Error(message) => write!(f, "Error: {}", message),
            TraceEvent::Accept => f.write_str("Accept: parse completed successfully"),
        }
    }
}

/// A trace event together with the lookahead position when it was recorded
#[derive(Debug, Clone, PartialEq)]
pub struct TraceEntry {
    pub event: TraceEvent,
    pub location: Option<SourceLocation>,
}

/// Append-only log of one parse
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

impl Trace {
    pub fn new() -> Self {
        Trace {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, event: TraceEvent, location: Option<SourceLocation>) {
        self.entries.push(TraceEntry { event, location });
    }

    pub fn get(&self, index: usize) -> Option<&TraceEntry> {
        self.entries.get(index)
    }

    pub fn last(&self) -> Option<&TraceEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TraceEntry> {
        self.entries.iter()
    }

    /// Every event rendered as one line.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.event.to_string()).collect()
    }

    /// Latest stack snapshot recorded at or before `index`.
    pub fn stack_at(&self, index: usize) -> Option<&[Symbol]> {
        self.entries[..(index + 1).min(self.entries.len())]
            .iter()
            .rev()
            .find_map(|e| match &e.event {
                TraceEvent::StackSnapshot(stack) => Some(stack.as_slice()),
                _ => None,
            })
    }

    /// Latest input snapshot recorded at or before `index`.
    pub fn input_at(&self, index: usize) -> Option<&[Token]> {
        self.entries[..(index + 1).min(self.entries.len())]
            .iter()
            .rev()
            .find_map(|e| match &e.event {
                TraceEvent::InputSnapshot(input) => Some(input.as_slice()),
                _ => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_lines() {
        let mut trace = Trace::new();
        trace.push(
            TraceEvent::StackSnapshot(vec![Symbol::END, Symbol::NonTerminal(NonTerminal::Program)]),
            None,
        );
        trace.push(
            TraceEvent::Match {
                terminal: TokenKind::Identifier,
                lexeme: "x".to_string(),
            },
            Some(SourceLocation::new(1, 1)),
        );
        trace.push(TraceEvent::ApplyEpsilon, None);
        trace.push(TraceEvent::Accept, None);

        assert_eq!(
            trace.lines(),
            vec![
                "Stack: [$, program]",
                "Match: identifier 'x'",
                "Apply: ε",
                "Accept: parse completed successfully",
            ]
        );
        assert_eq!(trace.last().map(|e| e.event.category()), Some(TraceCategory::Success));
    }

    #[test]
    fn test_snapshot_lookup() {
        let mut trace = Trace::new();
        trace.push(TraceEvent::StackSnapshot(vec![Symbol::END]), None);
        trace.push(TraceEvent::ApplyEpsilon, None);

        assert_eq!(trace.stack_at(1), Some(&[Symbol::END][..]));
        assert_eq!(trace.stack_at(50), Some(&[Symbol::END][..]));
        assert_eq!(trace.input_at(1), None);
    }
}
