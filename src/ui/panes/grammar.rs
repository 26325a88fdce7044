//! Grammar reference pane

use super::utils::{border_style, clamp_offset, visible_height};
use crate::grammar::{grammar, NonTerminal};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the productions, one line per non-terminal.
///
/// `highlight` marks the non-terminal expanded at the current step.
pub fn render_grammar_pane(
    frame: &mut Frame,
    area: Rect,
    highlight: Option<NonTerminal>,
    is_focused: bool,
    offset: &mut usize,
) {
    let block = Block::default()
        .title(" Grammar ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let grammar = grammar();
    let reference = grammar.reference_lines();
    let visible_height = visible_height(area);
    *offset = clamp_offset(*offset, reference.len(), visible_height);

    let lines: Vec<Line> = grammar
        .non_terminals()
        .iter()
        .zip(reference)
        .skip(*offset)
        .take(visible_height)
        .map(|(&nt, text)| {
            let head = nt.name();
            let body = text[head.len()..].to_string();
            let head_style = if Some(nt) == highlight {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .bg(DEFAULT_THEME.current_line_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.non_terminal)
            };
            Line::from(vec![
                Span::styled(head.to_string(), head_style),
                Span::styled(body, Style::default().fg(DEFAULT_THEME.fg)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
