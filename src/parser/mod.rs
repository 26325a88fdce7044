//! Predictive syntax analyzer
//!
//! This module decides whether a program is derivable from the grammar:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`lint`]: Optional operator-spacing check over the token stream
//! - [`parser`]: Table-driven LL(1) parse loop (tokens → verdict + trace)
//! - [`errors`]: The error taxonomy shared by all stages
//!
//! # Parser Implementation
//!
//! Non-recursive: an explicit symbol stack is expanded through the fixed
//! table in [`crate::grammar`]. No semantic analysis is performed, so
//! undeclared identifiers are accepted as long as the program is well formed.

pub mod errors;
pub mod lexer;
pub mod lint;
pub mod parser;
