//! Helpers shared by the list panes

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
};

/// Border style for a pane, highlighted when focused
pub(super) fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}

/// Rows available inside a bordered block, min 1
pub(super) fn visible_height(area: Rect) -> usize {
    area.height.saturating_sub(2).max(1) as usize
}

/// Clamp `offset` so the last page is full when content overflows.
pub(super) fn clamp_offset(offset: usize, total_items: usize, visible_height: usize) -> usize {
    if total_items > visible_height {
        offset.min(total_items - visible_height)
    } else {
        0
    }
}

/// Smallest change to `offset` that keeps `index` on screen.
pub(super) fn follow(offset: usize, index: usize, visible_height: usize) -> usize {
    if index < offset {
        index
    } else if index >= offset + visible_height {
        index + 1 - visible_height
    } else {
        offset
    }
}
