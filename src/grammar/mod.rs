//! Grammar Table
//!
//! - [`symbols`]: terminals are [`TokenKind`]s; non-terminals, stack symbols
//!   and productions live here
//! - [`table`]: the productions and the LL(1) table, built once
//!
//! [`TokenKind`]: crate::parser::lexer::TokenKind

pub mod symbols;
pub mod table;

pub use symbols::{NonTerminal, Production, Symbol};
pub use table::{grammar, Grammar};
