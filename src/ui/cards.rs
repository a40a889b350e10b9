use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Widget;

use crate::calculator::CalculationResult;
use crate::report::format_eur;
use crate::theme::Theme;
use crate::ui::borders;

/// Rows needed by [`CostCards`].
pub const CARDS_HEIGHT: u16 = 4;

/// One summary card per provider with its total cost. The cheapest card is highlighted.
pub struct CostCards<'a> {
    result: &'a CalculationResult,
    theme: &'a Theme,
}

impl<'a> CostCards<'a> {
    pub fn new(result: &'a CalculationResult, theme: &'a Theme) -> Self {
        Self { result, theme }
    }
}

impl Widget for CostCards<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let count = self.result.breakdowns.len();
        if count == 0 || area.height == 0 {
            return;
        }

        let cheapest = self.result.cheapest().map(|b| b.provider_name.as_str());
        let columns = Layout::horizontal(vec![Constraint::Ratio(1, count as u32); count]).split(area);

        for (b, &column) in self.result.iter().zip(columns.iter()) {
            let color = Color::from(b.display_color);
            let highlighted = cheapest == Some(b.provider_name.as_str());
            let title = format!(" {} ", b.provider_name);
            let block = borders::provider_block(&title, color, highlighted, self.theme);
            let inner = block.inner(column);
            block.render(column, buf);
            if inner.height == 0 || inner.width == 0 {
                continue;
            }

            let amount = format_eur(b.total_cost);
            let amount_len = amount.chars().count() as u16;
            let x = inner.x + inner.width.saturating_sub(amount_len) / 2;
            buf.set_stringn(
                x,
                inner.y,
                &amount,
                inner.right().saturating_sub(x) as usize,
                Style::default()
                    .fg(self.theme.foreground)
                    .bg(self.theme.surface)
                    .add_modifier(Modifier::BOLD),
            );

            if highlighted && inner.height > 1 {
                let tag = "lowest cost";
                let tag_x = inner.x + inner.width.saturating_sub(tag.len() as u16) / 2;
                buf.set_stringn(
                    tag_x,
                    inner.y + 1,
                    tag,
                    inner.right().saturating_sub(tag_x) as usize,
                    Style::default().fg(self.theme.success).bg(self.theme.surface),
                );
            }
        }
    }
}
