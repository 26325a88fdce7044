//! # Introduction
//!
//! llstep decides whether a program in a small imperative teaching language
//! is syntactically valid, using a predictive LL(1) parser driven by a fixed
//! parsing table. Every step of the derivation is recorded so it can be
//! replayed forward and backward in a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Analysis pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser (+ Grammar Table) → Verdict + Trace → TUI
//! ```
//!
//! 1. [`grammar`]: symbols, productions and the LL(1) table, built once and
//!    shared read-only.
//! 2. [`parser`]: the priority-ordered regex lexer, the optional spacing
//!    check, and the stack-based parse loop.
//! 3. [`trace`]: the append-only step log a parse produces.
//! 4. [`demos`]: canned example programs.
//! 5. [`ui`]: ratatui-based step-through viewer; not part of the stable
//!    library API.
//!
//! ## Language
//!
//! Declarations (`int`, `float`, `string`), assignment, `if`/`else`, `while`,
//! `input(x);`, `print(expr);`, arithmetic with `+ - * / %` and a single
//! comparison in conditions. `//` and `/* */` comments.
//!
//! ```
//! use llstep::parser::parser::parse;
//!
//! let outcome = parse("int x; x = 10; print(x);");
//! assert!(outcome.accepted);
//! ```

pub mod demos;
pub mod grammar;
pub mod parser;
pub mod trace;
pub mod ui;
