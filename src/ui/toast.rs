use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols::border;
use ratatui::widgets::{Block, Borders, Clear, Widget};
use std::time::Instant;

use crate::theme::Theme;
use crate::ui::header::lerp_color;

/// Duration the toast is visible (total).
const TOAST_DURATION_MS: u128 = 3000;
/// Duration of the fade-out at the end.
const FADE_DURATION_MS: u128 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A brief, auto-dismissing notification.
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created_at: Instant,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastKind::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastKind::Error)
    }

    fn new(message: String, kind: ToastKind) -> Self {
        Self {
            message,
            kind,
            created_at: Instant::now(),
        }
    }

    /// Returns true if the toast has expired and should be removed.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed().as_millis() >= TOAST_DURATION_MS
    }

    /// Returns 0.0 (fully faded) to 1.0 (fully visible).
    fn opacity(&self) -> f64 {
        let age = self.created_at.elapsed().as_millis();
        if age >= TOAST_DURATION_MS {
            return 0.0;
        }
        let fade_start = TOAST_DURATION_MS - FADE_DURATION_MS;
        if age <= fade_start {
            1.0
        } else {
            1.0 - (age - fade_start) as f64 / FADE_DURATION_MS as f64
        }
    }
}

/// Floating notification in the bottom-right corner, above the status bar.
pub struct ToastWidget<'a> {
    toast: &'a Toast,
    theme: &'a Theme,
}

impl<'a> ToastWidget<'a> {
    pub fn new(toast: &'a Toast, theme: &'a Theme) -> Self {
        Self { toast, theme }
    }
}

impl Widget for ToastWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let opacity = self.toast.opacity();
        if opacity <= 0.0 {
            return;
        }

        let icon = match self.toast.kind {
            ToastKind::Success => '✓',
            ToastKind::Error => '✗',
        };
        let display = format!(" {icon} {} ", self.toast.message);
        let popup_width = (display.chars().count() as u16 + 2).min(area.width);
        let popup_height: u16 = 3;

        let popup_x = area.right().saturating_sub(popup_width + 1).max(area.x);
        let popup_y = area.bottom().saturating_sub(popup_height + 1).max(area.y);
        let popup = Rect::new(popup_x, popup_y, popup_width, popup_height).intersection(area);
        if popup.width < 3 || popup.height < 3 {
            return;
        }

        let fade = 1.0 - opacity;
        let accent = match self.toast.kind {
            ToastKind::Success => self.theme.success,
            ToastKind::Error => self.theme.error,
        };
        let bg = self.theme.surface;
        let fg = lerp_color(self.theme.foreground, bg, fade);
        let border_color = lerp_color(accent, bg, fade);

        Clear.render(popup, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(border_color).bg(bg))
            .style(Style::default().bg(bg));
        let inner = block.inner(popup);
        block.render(popup, buf);

        buf.set_stringn(
            inner.x,
            inner.y,
            &display,
            inner.width as usize,
            Style::default().fg(fg).bg(bg),
        );
    }
}
