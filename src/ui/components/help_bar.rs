//! Key hint bar drawn under the grid.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// What the keyboard is currently driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintContext {
    /// The grid itself.
    Grid,
    /// The search bar.
    Search,
    /// The column picker popup.
    ColumnPicker,
}

/// Hint text for `context`; keys are in brackets.
pub fn hints_for(context: HintContext) -> &'static str {
    match context {
        HintContext::Grid => {
            "[←/→] column  [Enter] sort  [/] search  [j/k] row  [x] select  [a/A] page/clear  \
             [n/p] page  [+] size  [</>] width  [v] toggle  [c] columns  [r] reset  [q] quit"
        }
        HintContext::Search => "[Enter] apply  [Esc] clear  [Backspace] delete",
        HintContext::ColumnPicker => "[j/k] move  [Space] toggle  [s/h] show/hide all  [Esc] close",
    }
}

/// Render the hint bar for `context`.
pub fn render_help_bar(frame: &mut Frame, area: Rect, context: HintContext) {
    let line = Line::from(parse_hints_to_spans(hints_for(context)));
    frame.render_widget(Paragraph::new(line), area);
}

/// Split hint text into spans, styling bracketed keys.
fn parse_hints_to_spans(hints: &str) -> Vec<Span<'static>> {
    let key_style = Style::default().fg(Color::Cyan);
    let text_style = Style::default().fg(Color::DarkGray);
    let mut spans = Vec::new();
    let mut rest = hints;

    while let Some(open) = rest.find('[') {
        let Some(close) = rest[open..].find(']').map(|i| open + i) else {
            break;
        };
        if open > 0 {
            spans.push(Span::styled(rest[..open].to_string(), text_style));
        }
        spans.push(Span::styled(rest[open..=close].to_string(), key_style));
        rest = &rest[close + 1..];
    }
    if !rest.is_empty() {
        spans.push(Span::styled(rest.to_string(), text_style));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_and_description_spans() {
        let spans = parse_hints_to_spans("[Esc] clear  [Enter] apply");
        let parts: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(parts, vec!["[Esc]", " clear  ", "[Enter]", " apply"]);
    }

    #[test]
    fn test_plain_text_is_one_span() {
        assert_eq!(parse_hints_to_spans("no keys").len(), 1);
        assert!(parse_hints_to_spans("").is_empty());
    }

    #[test]
    fn test_every_context_has_hints() {
        for context in [HintContext::Grid, HintContext::Search, HintContext::ColumnPicker] {
            assert!(hints_for(context).starts_with('['));
        }
    }
}
