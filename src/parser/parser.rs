use crate::grammar::{grammar, Grammar, Symbol};
use crate::parser::errors::ParseError;
use crate::parser::lexer::{Lexer, LexerOptions, SourceLocation, Token, TokenKind};
use crate::parser::lint::spacing_violations;
use crate::trace::{Trace, TraceEvent};

/// Parser configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    pub lexer: LexerOptions,
    /// Reject identifiers written directly against an operator
    pub strict_spacing: bool,
}

/// Verdict and derivation trace of one parse
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    pub accepted: bool,
    pub trace: Trace,
    pub error: Option<ParseError>,
}

impl ParseOutcome {
    fn accept(trace: Trace) -> Self {
        ParseOutcome {
            accepted: true,
            trace,
            error: None,
        }
    }

    fn reject(trace: Trace, error: ParseError) -> Self {
        ParseOutcome {
            accepted: false,
            trace,
            error: Some(error),
        }
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub fn trace_lines(&self) -> Vec<String> {
        self.trace.lines()
    }
}

/// Table-driven LL(1) parser
///
/// Holds no per-parse state: stack, cursor and trace live inside each call,
/// so one parser can be reused (or shared between threads) freely.
#[derive(Debug, Clone, Copy)]
pub struct Parser {
    grammar: &'static Grammar,
    options: ParserOptions,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self::with_options(ParserOptions::default())
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Parser {
            grammar: grammar(),
            options,
        }
    }

    /// Tokenize and parse `source`.
    pub fn parse(&self, source: &str) -> ParseOutcome {
        let tokens = Lexer::new(source)
            .with_options(self.options.lexer)
            .tokenize();
        self.parse_tokens(&tokens)
    }

    /// Parse an already tokenized program.
    ///
    /// `tokens` must end with the end-marker, as [`Lexer::tokenize`] guarantees.
    pub fn parse_tokens(&self, tokens: &[Token]) -> ParseOutcome {
        let mut trace = Trace::new();

        if let Some(bad) = tokens.iter().find(|t| t.is_error()) {
            let error = ParseError::Lexical {
                character: bad.lexeme.chars().next().unwrap_or('\0'),
                location: bad.location(),
            };
            return fail(trace, error, Some(bad.location()));
        }

        if self.options.strict_spacing {
            if let Some(error) = spacing_violations(tokens).into_iter().next() {
                let location = error.location();
                return fail(trace, error, location);
            }
        }

        // stands in for the lookahead if the cursor ever runs past the stream
        let end_marker = Token::new(
            TokenKind::End,
            "$",
            tokens
                .last()
                .map_or(SourceLocation::new(1, 1), Token::location),
        );

        let mut stack = vec![Symbol::END, self.grammar.start_symbol().into()];
        let mut cursor = 0;

        while let Some(&top) = stack.last() {
            if top == Symbol::END {
                break;
            }

            let current = tokens.get(cursor).unwrap_or(&end_marker);
            let location = Some(current.location());

            trace.push(TraceEvent::StackSnapshot(stack.clone()), location);
            trace.push(
                TraceEvent::InputSnapshot(tokens.get(cursor..).unwrap_or_default().to_vec()),
                location,
            );

            match top {
                Symbol::Terminal(expected) => {
                    if expected != current.kind {
                        let error = ParseError::UnexpectedTerminal {
                            expected,
                            found: current.kind,
                            lexeme: current.lexeme.clone(),
                            location: current.location(),
                        };
                        return fail(trace, error, location);
                    }

                    log::debug!("match {} '{}' at {}", expected, current.lexeme, current.location());
                    trace.push(
                        TraceEvent::Match {
                            terminal: expected,
                            lexeme: current.lexeme.clone(),
                        },
                        location,
                    );
                    stack.pop();
                    cursor += 1;
                }
                Symbol::Epsilon => {
                    trace.push(TraceEvent::ApplyEpsilon, location);
                    stack.pop();
                }
                Symbol::NonTerminal(nt) => {
                    let Some(production) = self.grammar.production_for(nt, current.kind) else {
                        let error = ParseError::NoProduction {
                            non_terminal: nt,
                            found: current.kind,
                            location: current.location(),
                        };
                        return fail(trace, error, location);
                    };

                    log::debug!("apply {} -> {}", nt, production);
                    trace.push(
                        TraceEvent::Apply {
                            non_terminal: nt,
                            production: production.clone(),
                        },
                        location,
                    );
                    stack.pop();
                    stack.extend(production.symbols.iter().rev().copied());
                }
            }
        }

        // The stack is down to the end-marker; the input must be too.
        let remaining: Vec<String> = tokens
            .get(cursor..)
            .unwrap_or_default()
            .iter()
            .filter(|t| t.kind != TokenKind::End)
            .map(|t| t.lexeme.clone())
            .collect();

        if !remaining.is_empty() {
            let location = tokens.get(cursor).map(Token::location);
            return fail(trace, ParseError::TrailingInput { remaining }, location);
        }

        log::info!("accepted: {} tokens", tokens.len());
        trace.push(TraceEvent::Accept, Some(end_marker.location()));
        ParseOutcome::accept(trace)
    }
}

/// Record `error` as the final trace event and reject.
fn fail(mut trace: Trace, error: ParseError, location: Option<SourceLocation>) -> ParseOutcome {
    log::info!("rejected: {}", error);
    trace.push(TraceEvent::Error(error.to_string()), location);
    ParseOutcome::reject(trace, error)
}

/// Parse `source` with default options.
pub fn parse(source: &str) -> ParseOutcome {
    Parser::new().parse(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::NonTerminal;
    use crate::trace::TraceCategory;

    #[test]
    fn test_accepts_declaration_and_assignment() {
        let outcome = parse("int x; x = 10; print(x);");

        assert!(outcome.accepted, "{:?}", outcome.error);
        assert_eq!(outcome.error, None);
        assert_eq!(
            outcome.trace.last().map(|e| e.event.category()),
            Some(TraceCategory::Success)
        );
    }

    #[test]
    fn test_first_steps() {
        let outcome = parse("int x;");
        let lines = outcome.trace_lines();

        assert_eq!(lines[0], "Stack: [$, program]");
        assert_eq!(lines[1], "Input: [int x ; $]");
        assert_eq!(lines[2], "Apply: program -> statement_list");
        assert_eq!(lines[3], "Stack: [$, statement_list]");
        assert_eq!(lines[5], "Apply: statement_list -> statement statement_list");
    }

    #[test]
    fn test_epsilon_is_pushed_then_popped() {
        let lines = parse("").trace_lines();

        assert_eq!(
            lines,
            vec![
                "Stack: [$, program]",
                "Input: [$]",
                "Apply: program -> statement_list",
                "Stack: [$, statement_list]",
                "Input: [$]",
                "Apply: statement_list -> ε",
                "Stack: [$, ε]",
                "Input: [$]",
                "Apply: ε",
                "Accept: parse completed successfully",
            ]
        );
    }

    #[test]
    fn test_missing_semicolon() {
        let outcome = parse("int x; x = 10");

        assert!(!outcome.accepted);
        assert_eq!(
            outcome.error,
            Some(ParseError::UnexpectedTerminal {
                expected: TokenKind::Semicolon,
                found: TokenKind::End,
                lexeme: "$".to_string(),
                location: SourceLocation::new(1, 14),
            })
        );
        assert_eq!(
            outcome.trace.last().map(|e| e.event.category()),
            Some(TraceCategory::Error)
        );
    }

    #[test]
    fn test_missing_assign() {
        let outcome = parse("x 10;");

        assert_eq!(
            outcome.error,
            Some(ParseError::UnexpectedTerminal {
                expected: TokenKind::Assign,
                found: TokenKind::Integer,
                lexeme: "10".to_string(),
                location: SourceLocation::new(1, 3),
            })
        );
    }

    #[test]
    fn test_no_production() {
        let outcome = parse("int x; ; ");

        assert_eq!(
            outcome.error,
            Some(ParseError::NoProduction {
                non_terminal: NonTerminal::StatementList,
                found: TokenKind::Semicolon,
                location: SourceLocation::new(1, 8),
            })
        );
    }

    #[test]
    fn test_trailing_input() {
        let outcome = parse("int x; } y = 1;");

        assert_eq!(
            outcome.error,
            Some(ParseError::TrailingInput {
                remaining: vec!["}", "y", "=", "1", ";"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            })
        );
    }

    #[test]
    fn test_lexical_error_skips_parse_loop() {
        let outcome = parse("int x;\nx = @;");

        assert_eq!(
            outcome.error,
            Some(ParseError::Lexical {
                character: '@',
                location: SourceLocation::new(2, 5),
            })
        );
        assert_eq!(outcome.trace.len(), 1);
    }

    #[test]
    fn test_strict_spacing() {
        let parser = Parser::with_options(ParserOptions {
            strict_spacing: true,
            ..ParserOptions::default()
        });

        let outcome = parser.parse("int x; x=1;");
        assert!(!outcome.accepted);
        assert!(matches!(outcome.error, Some(ParseError::OperatorSpacing { .. })));
        assert_eq!(outcome.trace.len(), 1);

        assert!(parser.parse("int x; x = 1;").accepted);
        assert!(Parser::new().parse("int x; x=1;").accepted);
    }

    #[test]
    fn test_division_needs_option() {
        let source = "int x; x = 8 / 2;";
        assert!(!parse(source).accepted);

        let parser = Parser::with_options(ParserOptions {
            lexer: LexerOptions {
                division_operator: true,
            },
            ..ParserOptions::default()
        });
        assert!(parser.parse(source).accepted);
    }
}
