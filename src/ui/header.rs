use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Widget;

use crate::theme::Theme;

/// Height of the header area in terminal rows.
pub const HEADER_HEIGHT: u16 = 3;

const TITLE: &str = "Cloud Token Cost Calculator";
const SUBTITLE: &str = "compute + storage + network, per provider";

/// Title banner with a slowly shifting gradient.
pub struct Header<'a> {
    theme: &'a Theme,
    frame_count: u64,
}

impl<'a> Header<'a> {
    pub fn new(theme: &'a Theme, frame_count: u64) -> Self {
        Self { theme, frame_count }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.theme.background));
        if area.height == 0 {
            return;
        }

        let text = format!("{TITLE}  v{}", env!("CARGO_PKG_VERSION"));
        let text_len = text.chars().count() as u16;

        // Title, subtitle, then one spacer row
        let title_y = area.top();
        let start_x = area.left() + area.width.saturating_sub(text_len) / 2;
        let phase = self.frame_count as f64 * 0.02;

        for (i, ch) in text.chars().enumerate() {
            let x = start_x + i as u16;
            if x >= area.right() {
                break;
            }
            let position = (i as f64 / text_len.max(1) as f64) + phase;
            let style = Style::default()
                .fg(gradient_color(self.theme, position))
                .bg(self.theme.background)
                .add_modifier(Modifier::BOLD);
            if let Some(cell) = buf.cell_mut((x, title_y)) {
                cell.set_char(ch);
                cell.set_style(style);
            }
        }

        let sub_y = title_y + 1;
        if sub_y < area.bottom() {
            let sub_len = SUBTITLE.chars().count() as u16;
            let sub_x = area.left() + area.width.saturating_sub(sub_len) / 2;
            buf.set_stringn(
                sub_x,
                sub_y,
                SUBTITLE,
                area.right().saturating_sub(sub_x) as usize,
                Style::default().fg(self.theme.muted).bg(self.theme.background),
            );
        }
    }
}

/// Linearly interpolate between two RGB colors.
pub fn lerp_color(a: Color, b: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (a, b) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let r = (r1 as f64 + (r2 as f64 - r1 as f64) * t).round() as u8;
            let g = (g1 as f64 + (g2 as f64 - g1 as f64) * t).round() as u8;
            let b = (b1 as f64 + (b2 as f64 - b1 as f64) * t).round() as u8;
            Color::Rgb(r, g, b)
        }
        _ => a,
    }
}

/// Sample the 3-color gradient loop: primary -> secondary -> accent -> primary.
/// `position` is an unbounded f64; the fractional part determines the color.
pub fn gradient_color(theme: &Theme, position: f64) -> Color {
    let t = position.rem_euclid(1.0) * 3.0;
    let segment = t as usize;
    let frac = t - segment as f64;

    match segment {
        0 => lerp_color(theme.primary, theme.secondary, frac),
        1 => lerp_color(theme.secondary, theme.accent, frac),
        _ => lerp_color(theme.accent, theme.primary, frac),
    }
}
