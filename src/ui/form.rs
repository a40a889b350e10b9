use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Paragraph, Widget, Wrap};

use crate::calculator::Throughput;
use crate::error::ParseError;
use crate::theme::Theme;
use crate::ui::borders;
use crate::ui::input::{InputEditor, InputWidget};

/// Focusable form fields, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Tokens,
    Project,
    Throughput,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Self::Tokens => Self::Project,
            Self::Project => Self::Throughput,
            Self::Throughput => Self::Tokens,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Tokens => Self::Throughput,
            Self::Project => Self::Tokens,
            Self::Throughput => Self::Project,
        }
    }
}

/// Sidebar with the token, project and throughput inputs.
pub struct Form<'a> {
    pub tokens: &'a InputEditor,
    pub project: &'a InputEditor,
    pub throughput: Throughput,
    pub focus: Field,
    pub warning: Option<&'a ParseError>,
    pub theme: &'a Theme,
}

/// Text slider such as `━━━━●─────`, `width` cells wide.
pub fn slider_track(throughput: Throughput, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let knob = (throughput.fraction() * (width - 1) as f64).round() as usize;
    (0..width)
        .map(|i| match i.cmp(&knob) {
            std::cmp::Ordering::Less => '━',
            std::cmp::Ordering::Equal => '●',
            std::cmp::Ordering::Greater => '─',
        })
        .collect()
}

impl Form<'_> {
    fn label_style(&self, field: Field) -> Style {
        if self.focus == field {
            Style::default()
                .fg(self.theme.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.foreground)
        }
    }

    fn put(&self, buf: &mut Buffer, inner: Rect, row: u16, text: &str, style: Style) {
        if row < inner.height {
            buf.set_stringn(inner.x, inner.y + row, text, inner.width as usize, style);
        }
    }
}

impl Widget for Form<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = borders::themed_block(" Settings ", true, self.theme);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width < 4 || inner.height == 0 {
            return;
        }

        let row_rect = |row: u16, height: u16| {
            let height = height.min(inner.height.saturating_sub(row));
            Rect::new(inner.x, inner.y + row.min(inner.height), inner.width, height)
        };
        let muted = Style::default().fg(self.theme.muted);

        // Token count
        self.put(buf, inner, 0, "Token count", self.label_style(Field::Tokens));
        InputWidget::new(self.tokens, self.theme, self.focus == Field::Tokens)
            .placeholder("e.g. 200M, 1.5B, 250,000")
            .render(row_rect(1, 1), buf);
        match self.warning {
            Some(err) => {
                let text = format!("⚠ {} (using 200,000,000)", err.friendly_message());
                Paragraph::new(text)
                    .style(Style::default().fg(self.theme.error))
                    .wrap(Wrap { trim: true })
                    .render(row_rect(2, 3), buf);
            }
            None => self.put(buf, inner, 2, "Suffixes K, M and B accepted", muted),
        }

        // Project name
        self.put(buf, inner, 6, "Project name", self.label_style(Field::Project));
        InputWidget::new(self.project, self.theme, self.focus == Field::Project)
            .placeholder("Untitled")
            .render(row_rect(7, 1), buf);

        // Throughput slider
        self.put(buf, inner, 9, "Tokens per second", self.label_style(Field::Throughput));
        let value = format!(" {:>3}", self.throughput.get());
        let track_width = (inner.width as usize).saturating_sub(value.len());
        let track_style = if self.focus == Field::Throughput {
            Style::default().fg(self.theme.accent)
        } else {
            Style::default().fg(self.theme.secondary)
        };
        self.put(buf, inner, 10, &slider_track(self.throughput, track_width), track_style);
        if 10 < inner.height {
            buf.set_stringn(
                inner.x + track_width as u16,
                inner.y + 10,
                &value,
                value.len(),
                Style::default().fg(self.theme.foreground),
            );
        }
        self.put(
            buf,
            inner,
            11,
            &format!("{}-{}, step {} (←/→)", Throughput::MIN, Throughput::MAX, Throughput::STEP),
            muted,
        );
    }
}
