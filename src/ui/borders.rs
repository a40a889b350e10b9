use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::border;
use ratatui::widgets::{Block, Borders};

use crate::theme::Theme;

pub fn themed_block<'a>(title: &'a str, focused: bool, theme: &Theme) -> Block<'a> {
    let border_color = if focused {
        theme.border_focused
    } else {
        theme.border
    };

    let title_style = Style::default().fg(if focused { theme.primary } else { theme.muted });

    Block::default()
        .title(title)
        .title_style(title_style)
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(border_color).bg(theme.background))
        .style(Style::default().bg(theme.background))
}

/// Block whose border and title take a provider's colour.
pub fn provider_block<'a>(title: &'a str, color: Color, highlighted: bool, theme: &Theme) -> Block<'a> {
    let mut title_style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    if highlighted {
        title_style = title_style.add_modifier(Modifier::UNDERLINED);
    }

    Block::default()
        .title(title)
        .title_style(title_style)
        .borders(Borders::ALL)
        .border_set(if highlighted { border::THICK } else { border::ROUNDED })
        .border_style(Style::default().fg(color).bg(theme.surface))
        .style(Style::default().bg(theme.surface))
}
