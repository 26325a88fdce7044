//! TUI pane rendering modules
//!
//! Stateless render functions for each visible pane of the viewer.
//!
//! # Pane Modules
//!
//! - [`source`]: Source code with syntax highlighting and the lookahead line marked
//! - [`trace`]: The derivation trace, current step highlighted
//! - [`stack`]: Parse stack and remaining input at the current step
//! - [`grammar`]: Grammar reference
//! - [`status`]: Status bar with keybindings and the verdict
//!
//! Each pane module exports a primary `render_*` function plus the scroll
//! state type it needs. Scroll clamping shared by the list panes is in
//! `utils`.

mod utils;

pub mod grammar;
pub mod source;
pub mod stack;
pub mod status;
pub mod trace;

// Re-export render functions for convenience
pub use grammar::render_grammar_pane;
pub use source::{render_source_pane, SourceRenderData, SourceScrollState};
pub use stack::{render_stack_pane, StackScrollState};
pub use status::{render_status_bar, StatusRenderData};
pub use trace::{render_trace_pane, TraceScrollState};
