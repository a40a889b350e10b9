use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::calculator::CalculationResult;
use crate::theme::Theme;

const HINTS: &str = "Tab field | ←→ throughput | ^E export | ^D details | ^R reset | ^Q quit ";
const SHORT_HINTS: &str = "^R reset | ^Q quit ";

pub struct StatusBar<'a> {
    theme: &'a Theme,
    result: &'a CalculationResult,
}

impl<'a> StatusBar<'a> {
    pub fn new(theme: &'a Theme, result: &'a CalculationResult) -> Self {
        Self { theme, result }
    }
}

/// Format a token count as a compact string (e.g. "1.2k", "200.0M").
pub fn format_tokens(count: f64) -> String {
    if count >= 1_000_000_000.0 {
        format!("{:.1}B", count / 1_000_000_000.0)
    } else if count >= 1_000_000.0 {
        format!("{:.1}M", count / 1_000_000.0)
    } else if count >= 1_000.0 {
        format!("{:.1}k", count / 1_000.0)
    } else {
        format!("{count:.0}")
    }
}

/// Write a string into the buffer at (start_x, y) with the given style.
/// Returns the x position after the last written character.
fn write_str(buf: &mut Buffer, text: &str, x_start: u16, y: u16, x_limit: u16, style: Style) -> u16 {
    let mut x = x_start;
    for ch in text.chars() {
        if x >= x_limit {
            break;
        }
        buf[(x, y)].set_char(ch);
        buf[(x, y)].set_style(style);
        x += 1;
    }
    x
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let style = Style::default()
            .fg(self.theme.status_fg)
            .bg(self.theme.status_bg);

        for x in area.x..area.right() {
            buf[(x, area.y)].set_style(style);
            buf[(x, area.y)].set_symbol(" ");
        }

        // Left: app name + theme
        let left_style = Style::default()
            .fg(self.theme.primary)
            .bg(self.theme.status_bg);
        let mut left_end = write_str(buf, " cloud-cost", area.x, area.y, area.right(), left_style);
        left_end = write_str(
            buf,
            &format!(" | {} ", self.theme.name),
            left_end,
            area.y,
            area.right(),
            style,
        );

        // Center: workload summary + cheapest provider
        let mut center = format!(
            " {} tokens @ {} tok/s ",
            format_tokens(self.result.tokens),
            self.result.throughput.get()
        );
        if let Some(best) = self.result.cheapest() {
            center.push_str(&format!("| cheapest: {} ", best.provider_name));
        }
        let center_len = center.chars().count() as u16;
        let center_start = (area.x + area.width.saturating_sub(center_len) / 2).max(left_end);
        let success_style = Style::default().fg(self.theme.success).bg(self.theme.status_bg);
        let center_end = write_str(buf, &center, center_start, area.y, area.right(), success_style);

        // Right: key hints, shortened or dropped when they don't fit
        for hints in [HINTS, SHORT_HINTS] {
            let right_start = area.right().saturating_sub(hints.chars().count() as u16);
            if right_start >= center_end {
                write_str(buf, hints, right_start, area.y, area.right(), style);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{calculate, CalcInput, Throughput};
    use crate::rates::RateTable;

    #[test]
    fn test_format_tokens() {
        assert_eq!(format_tokens(0.0), "0");
        assert_eq!(format_tokens(999.0), "999");
        assert_eq!(format_tokens(1234.0), "1.2k");
        assert_eq!(format_tokens(2_500_000.0), "2.5M");
        assert_eq!(format_tokens(200_000_000.0), "200.0M");
        assert_eq!(format_tokens(1_000_000_000.0), "1.0B");
    }

    #[test]
    fn test_status_bar_shows_cheapest() {
        let theme = Theme::default_theme();
        let input = CalcInput {
            tokens: 200_000_000.0,
            throughput: Throughput::DEFAULT,
        };
        let result = calculate(&input, &RateTable::builtin());
        let area = Rect::new(0, 0, 200, 1);
        let mut buf = Buffer::empty(area);
        StatusBar::new(&theme, &result).render(area, &mut buf);

        let row: String = (0..area.width)
            .map(|x| buf.cell((x, 0)).map(|c| c.symbol()).unwrap_or(" "))
            .collect();
        assert!(row.contains("200.0M tokens @ 50 tok/s"));
        assert!(row.contains("cheapest: Google Cloud"));
        assert!(row.contains("^R reset"));
        assert!(row.contains("←→ throughput"));
        assert!(row.contains("^Q quit"));
    }

    #[test]
    fn test_narrow_status_bar_keeps_reset_hint() {
        let theme = Theme::default_theme();
        let input = CalcInput {
            tokens: 200_000_000.0,
            throughput: Throughput::DEFAULT,
        };
        let result = calculate(&input, &RateTable::builtin());
        let area = Rect::new(0, 0, 140, 1);
        let mut buf = Buffer::empty(area);
        StatusBar::new(&theme, &result).render(area, &mut buf);

        let row: String = (0..area.width)
            .map(|x| buf.cell((x, 0)).map(|c| c.symbol()).unwrap_or(" "))
            .collect();
        assert!(row.contains("^R reset | ^Q quit"));
        assert!(!row.contains("^E export"));
    }
}
