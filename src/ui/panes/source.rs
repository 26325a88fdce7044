//! Source code pane rendering with syntax highlighting
//!
//! Displays the program being analyzed with basic syntax highlighting. The
//! line holding the lookahead token at the current trace step is marked;
//! once the trace reaches an error, that line turns red.
//!
//! # Rendering
//!
//! The pane uses a simple character-by-character highlighter rather than
//! the real lexer, so it keeps working on text the lexer rejects.

use super::utils::{border_style, visible_height};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Simple syntax highlighting for the teaching language
fn highlight_source_code(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut i = 0;

    while i < chars.len() {
        let (byte, c) = chars[i];

        // Comments run to the end of the line
        if c == '/' && matches!(chars.get(i + 1), Some((_, '/' | '*'))) {
            if !current_word.is_empty() {
                spans.push(styled_word(std::mem::take(&mut current_word)));
            }
            spans.push(Span::styled(
                &line[byte..],
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            break;
        }

        // Handle strings
        if c == '"' {
            if !current_word.is_empty() {
                spans.push(styled_word(std::mem::take(&mut current_word)));
            }
            let mut end = i + 1;
            while end < chars.len() && chars[end].1 != '"' {
                end += 1;
            }
            if end < chars.len() {
                end += 1;
            }
            let end_byte = chars.get(end).map_or(line.len(), |&(b, _)| b);
            spans.push(Span::styled(
                &line[byte..end_byte],
                Style::default().fg(DEFAULT_THEME.string),
            ));
            i = end;
            continue;
        }

        // Handle non-alphanumeric (delimiters)
        if !c.is_alphanumeric() && c != '_' && c != '.' {
            if !current_word.is_empty() {
                spans.push(styled_word(std::mem::take(&mut current_word)));
            }

            let style = match c {
                '{' | '}' | '(' | ')' => Style::default().fg(DEFAULT_THEME.primary),
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };

            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    if !current_word.is_empty() {
        spans.push(styled_word(current_word));
    }

    Line::from(spans)
}

fn styled_word(word: String) -> Span<'static> {
    let style = match word.as_str() {
        "int" | "float" | "string" => Style::default().fg(DEFAULT_THEME.type_name),
        "if" | "else" | "while" | "input" | "print" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        w if w.starts_with(|c: char| c.is_ascii_digit()) => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        _ => Style::default().fg(DEFAULT_THEME.fg),
    };
    Span::styled(word, style)
}

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

/// Data needed to render the source pane
pub struct SourceRenderData<'a> {
    pub source_code: &'a str,
    pub title: &'a str,
    /// 1-based line of the lookahead token, 0 when unknown
    pub current_line: usize,
    pub is_error: bool,
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    data: SourceRenderData,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let block = Block::default()
        .title(format!(" Source: {} ", data.title))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let lines: Vec<&str> = data.source_code.lines().collect();
    let total_lines = lines.len();
    let visible_height = visible_height(area);

    // Initialize target_line_row to center if not set
    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    // Keep the current line at the target visual row
    if data.current_line > 0 && data.current_line <= total_lines {
        let target_line_idx = data.current_line - 1;
        scroll_state.offset = target_line_idx.saturating_sub(target_row);

        if total_lines > visible_height {
            scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
        } else {
            scroll_state.offset = 0;
        }
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = line_num == data.current_line;
            let line_num_str = format!("{:4} ", line_num);

            let mut content_line = highlight_source_code(line);

            let num_style = if is_current && data.is_error {
                // ERROR LINE: white on red
                for span in &mut content_line.spans {
                    span.style = Style::default()
                        .bg(DEFAULT_THEME.error)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD);
                }
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else if is_current {
                for span in &mut content_line.spans {
                    span.style = span.style.bg(DEFAULT_THEME.current_line_bg);
                }
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut final_spans = vec![Span::styled(line_num_str, num_style)];
            final_spans.extend(content_line.spans);

            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
