//! Derivation trace pane rendering

use super::utils::{border_style, clamp_offset, follow, visible_height};
use crate::trace::{Trace, TraceCategory};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Scroll state for the trace pane
#[derive(Debug, Default)]
pub struct TraceScrollState {
    pub offset: usize,
    /// Step the view last followed; the view only jumps when this changes
    pub followed_step: Option<usize>,
}

/// Render the trace pane, up to and including `position`.
///
/// Steps after `position` are dimmed rather than hidden so the length of the
/// derivation stays visible.
pub fn render_trace_pane(
    frame: &mut Frame,
    area: Rect,
    trace: &Trace,
    position: usize,
    is_focused: bool,
    scroll_state: &mut TraceScrollState,
) {
    let block = Block::default()
        .title(format!(" Trace ({} steps) ", trace.len()))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if trace.is_empty() {
        let paragraph = Paragraph::new("(no steps)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = visible_height(area);

    if scroll_state.followed_step != Some(position) {
        scroll_state.offset = follow(scroll_state.offset, position, visible_height);
        scroll_state.followed_step = Some(position);
    }
    scroll_state.offset = clamp_offset(scroll_state.offset, trace.len(), visible_height);

    let items: Vec<ListItem> = trace
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(index, entry)| {
            let category = entry.event.category();
            let mut text_style = Style::default().fg(DEFAULT_THEME.category(category));

            if index > position {
                text_style = Style::default().fg(DEFAULT_THEME.border_normal);
            } else if matches!(category, TraceCategory::Error | TraceCategory::Success) {
                text_style = text_style.add_modifier(Modifier::BOLD);
            }

            let marker = if index == position { "▸ " } else { "  " };
            let mut line = Line::from(vec![
                Span::styled(marker, Style::default().fg(DEFAULT_THEME.secondary)),
                Span::styled(format!("{:4} ", index + 1), Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(entry.event.to_string(), text_style),
            ]);

            if index == position {
                line = line.style(Style::default().bg(DEFAULT_THEME.current_line_bg));
            }
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
