// Integration tests for the LL(1) analyzer

use llstep::demos::{demo, DEMOS};
use llstep::grammar::{grammar, Symbol};
use llstep::parser::errors::ParseError;
use llstep::parser::lexer::{SourceLocation, TokenKind};
use llstep::parser::parser::{parse, Parser, ParserOptions};
use llstep::trace::{TraceCategory, TraceEvent};

#[test]
fn test_declare_assign_print() {
    let outcome = parse("int x; x = 10; print(x);");

    assert!(outcome.accepted, "Parse failed: {:?}", outcome.error);
    assert_eq!(outcome.error_message(), None);
    assert_eq!(
        outcome.trace.last().map(|e| &e.event),
        Some(&TraceEvent::Accept)
    );
}

#[test]
fn test_missing_final_semicolon() {
    let outcome = parse("int x; x = 10");

    assert!(!outcome.accepted);
    match outcome.error {
        Some(ParseError::UnexpectedTerminal {
            expected,
            found,
            location,
            ..
        }) => {
            assert_eq!(expected, TokenKind::Semicolon);
            assert_eq!(found, TokenKind::End);
            assert_eq!(location, SourceLocation::new(1, 14));
        }
        other => panic!("Expected UnexpectedTerminal, got {:?}", other),
    }
}

#[test]
fn test_undeclared_identifier_is_accepted() {
    let outcome = parse("if (x > 5) { print(x); }");
    assert!(outcome.accepted, "Parse failed: {:?}", outcome.error);
}

#[test]
fn test_missing_assign_operator() {
    let outcome = parse("x 10;");

    match outcome.error {
        Some(ParseError::UnexpectedTerminal {
            expected,
            found,
            ref lexeme,
            location,
        }) => {
            assert_eq!(expected, TokenKind::Assign);
            assert_eq!(found, TokenKind::Integer);
            assert_eq!(lexeme, "10");
            assert_eq!(location, SourceLocation::new(1, 3));
        }
        ref other => panic!("Expected UnexpectedTerminal, got {:?}", other),
    }
    assert!(outcome
        .error_message()
        .is_some_and(|m| m.contains("expected '='") && m.contains("line 1, column 3")));
}

#[test]
fn test_empty_program() {
    let outcome = parse("");

    assert!(outcome.accepted);
    let applied: Vec<String> = outcome
        .trace
        .iter()
        .filter(|e| e.event.category() == TraceCategory::Apply)
        .map(|e| e.event.to_string())
        .collect();
    assert_eq!(
        applied,
        vec![
            "Apply: program -> statement_list",
            "Apply: statement_list -> ε",
            "Apply: ε",
        ]
    );
}

#[test]
fn test_stray_character_stops_before_parse_loop() {
    let outcome = parse("int x;\nx = 1 @ 2;");

    assert!(!outcome.accepted);
    assert_eq!(
        outcome.error,
        Some(ParseError::Lexical {
            character: '@',
            location: SourceLocation::new(2, 7),
        })
    );
    assert_eq!(outcome.trace.len(), 1);
    assert_eq!(
        outcome.trace.get(0).map(|e| e.event.category()),
        Some(TraceCategory::Error)
    );
}

#[test]
fn test_reports_first_lexical_error() {
    let outcome = parse("x = @ 1 # 2;");

    assert_eq!(
        outcome.error,
        Some(ParseError::Lexical {
            character: '@',
            location: SourceLocation::new(1, 5),
        })
    );
    assert!(outcome.error.as_ref().is_some_and(ParseError::is_pre_parse));
    assert_eq!(outcome.trace.len(), 1);
}

#[test]
fn test_unterminated_string() {
    let outcome = parse("string s; s = \"abc;");

    assert!(!outcome.accepted);
    assert!(matches!(
        outcome.error,
        Some(ParseError::Lexical { character: '"', .. })
    ));
    assert_eq!(outcome.trace.len(), 1);
}

#[test]
fn test_trailing_input() {
    let outcome = parse("int x; } print(x);");

    assert!(!outcome.accepted);
    assert_eq!(
        outcome.error,
        Some(ParseError::TrailingInput {
            remaining: vec![
                "}".to_string(),
                "print".to_string(),
                "(".to_string(),
                "x".to_string(),
                ")".to_string(),
                ";".to_string(),
            ],
        })
    );
}

#[test]
fn test_no_production() {
    let outcome = parse("x = ;");

    assert_eq!(
        outcome.error,
        Some(ParseError::NoProduction {
            non_terminal: llstep::grammar::NonTerminal::Expression,
            found: TokenKind::Semicolon,
            location: SourceLocation::new(1, 5),
        })
    );
}

#[test]
fn test_nested_blocks_and_else() {
    let source = r#"
        int i;
        i = 0;
        while (i < 10) {
            if (i % 2 == 0) {
                print("even");
            } else {
                print(i * (i + 1.5));
            }
            i = i + 1;
        }
    "#;
    let outcome = parse(source);
    assert!(outcome.accepted, "Parse failed: {:?}", outcome.error);
}

#[test]
fn test_empty_else_part_before_stray_semicolon() {
    // else_part is empty on `;`, so the failure surfaces in statement_list
    let outcome = parse("if (x > 1) { } ;");

    assert_eq!(
        outcome.error,
        Some(ParseError::NoProduction {
            non_terminal: llstep::grammar::NonTerminal::StatementList,
            found: TokenKind::Semicolon,
            location: SourceLocation::new(1, 16),
        })
    );
    assert!(outcome
        .trace
        .iter()
        .any(|e| e.event.to_string() == "Apply: else_part -> ε"));
}

#[test]
fn test_chained_comparison_rejected() {
    let outcome = parse("if (a < b < c) { }");
    assert!(!outcome.accepted);
}

#[test]
fn test_deterministic() {
    for d in &DEMOS {
        let first = parse(d.source);
        let second = parse(d.source);
        assert_eq!(first, second, "Differing outcomes for '{}'", d.title);
    }
}

#[test]
fn test_parser_reuse_is_stateless() {
    let parser = Parser::new();

    let bad = parser.parse("x = ;");
    let good = parser.parse("int y;");
    let fresh = Parser::new().parse("int y;");

    assert!(!bad.accepted);
    assert!(good.accepted);
    assert_eq!(good, fresh);
}

#[test]
fn test_parser_shared_across_threads() {
    let parser = Parser::new();
    let handles: Vec<_> = (1..=DEMOS.len())
        .filter_map(demo)
        .map(|d| std::thread::spawn(move || (d.source, parser.parse(d.source))))
        .collect();

    for handle in handles {
        let (source, outcome) = handle.join().expect("parser thread panicked");
        assert_eq!(outcome, parse(source));
    }
}

#[test]
fn test_table_totality() {
    let grammar = grammar();
    assert!(grammar.terminals().iter().all(|k| k.is_terminal()));
    assert!(!TokenKind::Colon.is_terminal() && !TokenKind::Error.is_terminal());

    let mut kinds = grammar.terminals().to_vec();
    kinds.extend([TokenKind::Colon, TokenKind::Error]);

    for &nt in grammar.non_terminals() {
        let alternatives = grammar.productions(nt).len();
        assert!(alternatives > 0, "{} has no productions", nt);
        for &kind in &kinds {
            if let Some(index) = grammar.lookup(nt, kind) {
                assert!(index < alternatives, "[{}, {}] -> {} out of range", nt, kind, index);
            }
        }
    }
}

#[test]
fn test_terminates_on_arbitrary_token_soup() {
    let fragments = [
        "int", "x", ";", "=", "(", ")", "{", "}", "if", "else", "while", "1", "2.5", "\"s\"",
        "+", "*", "<", "==", "print", "input", "%", "-",
    ];

    // Every step either consumes input or shrinks toward it, so the trace
    // stays linear in the input length.
    for seed in 0..200usize {
        let source: Vec<&str> = (0..12)
            .map(|i| fragments[(seed * 31 + i * 17 + seed * i) % fragments.len()])
            .collect();
        let source = source.join(" ");
        let outcome = parse(&source);
        assert!(
            outcome.trace.len() < 2000,
            "Suspiciously long trace for '{}'",
            source
        );
        assert_eq!(outcome.accepted, outcome.error.is_none());
    }
}

#[test]
fn test_stack_snapshots_start_from_program() {
    let outcome = parse("print(1);");
    assert_eq!(
        outcome.trace.stack_at(0),
        Some(
            &[
                Symbol::END,
                Symbol::NonTerminal(grammar().start_symbol())
            ][..]
        )
    );
}

#[test]
fn test_division_option() {
    let source = "x = 10 / 2;";

    // By default a bare slash starts a comment and the statement is cut short
    assert!(!parse(source).accepted);

    let mut options = ParserOptions::default();
    options.lexer.division_operator = true;
    assert!(Parser::with_options(options).parse(source).accepted);
}

#[test]
fn test_strict_spacing_option() {
    let source = "if (x>5) { print(x); }";
    assert!(parse(source).accepted);

    let options = ParserOptions {
        strict_spacing: true,
        ..ParserOptions::default()
    };
    let outcome = Parser::with_options(options).parse(source);
    assert!(matches!(
        outcome.error,
        Some(ParseError::OperatorSpacing { .. })
    ));
    assert_eq!(outcome.trace.len(), 1);
}
