//! Parse stack pane rendering
//!
//! Shows the parser's stack at the current trace step, top of stack first,
//! followed by the remaining input with the lookahead highlighted.

use super::utils::{border_style, clamp_offset, visible_height};
use crate::grammar::Symbol;
use crate::parser::lexer::Token;
use crate::trace::Trace;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Scroll state for the stack pane
#[derive(Debug, Default)]
pub struct StackScrollState {
    pub offset: usize,
    pub prev_item_count: usize,
}

fn symbol_item(symbol: &Symbol, is_top: bool) -> ListItem<'static> {
    let color = match symbol {
        Symbol::NonTerminal(_) => DEFAULT_THEME.non_terminal,
        Symbol::Terminal(_) => DEFAULT_THEME.primary,
        Symbol::Epsilon => DEFAULT_THEME.comment,
    };
    let mut style = Style::default().fg(color);
    if is_top {
        style = style.add_modifier(Modifier::BOLD);
    }
    let marker = if is_top { "top ▸ " } else { "      " };
    ListItem::new(Line::from(vec![
        Span::styled(marker, Style::default().fg(DEFAULT_THEME.secondary)),
        Span::styled(symbol.to_string(), style),
    ]))
}

fn input_line(input: &[Token]) -> Line<'static> {
    let mut spans = vec![Span::styled(
        "Input: ",
        Style::default().fg(DEFAULT_THEME.comment),
    )];
    for (i, token) in input.iter().enumerate() {
        let style = if i == 0 {
            Style::default()
                .fg(DEFAULT_THEME.secondary)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(DEFAULT_THEME.fg)
        };
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(token.lexeme.clone(), style));
    }
    Line::from(spans)
}

/// Render the stack pane for trace step `position`
pub fn render_stack_pane(
    frame: &mut Frame,
    area: Rect,
    trace: &Trace,
    position: usize,
    is_focused: bool,
    scroll_state: &mut StackScrollState,
) {
    let stack = trace.stack_at(position).unwrap_or(&[]);
    let input = trace.input_at(position).unwrap_or(&[]);

    let block = Block::default()
        .title(format!(" Stack (depth {}) ", stack.len()))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let mut all_items = vec![
        ListItem::new(input_line(input)),
        ListItem::new(Line::from("")),
    ];

    if stack.is_empty() {
        all_items.push(ListItem::new(Line::from(Span::styled(
            "(empty)",
            Style::default().fg(DEFAULT_THEME.comment),
        ))));
    } else {
        all_items.extend(
            stack
                .iter()
                .rev()
                .enumerate()
                .map(|(i, symbol)| symbol_item(symbol, i == 0)),
        );
    }

    // Snap back to the top when the stack changes size
    let total_items = all_items.len();
    if total_items != scroll_state.prev_item_count {
        scroll_state.offset = 0;
        scroll_state.prev_item_count = total_items;
    }

    let visible_height = visible_height(area);
    scroll_state.offset = clamp_offset(scroll_state.offset, total_items, visible_height);

    let items: Vec<ListItem> = all_items
        .into_iter()
        .skip(scroll_state.offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::{SourceLocation, TokenKind};

    #[test]
    fn test_input_line_marks_lookahead() {
        let input = vec![
            Token::new(TokenKind::Identifier, "x", SourceLocation::new(1, 1)),
            Token::new(TokenKind::End, "$", SourceLocation::new(1, 2)),
        ];
        let line = input_line(&input);
        let texts: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(texts, vec!["Input: ", "x", " ", "$"]);
        assert!(line.spans[1].style.add_modifier.contains(Modifier::UNDERLINED));
    }
}
