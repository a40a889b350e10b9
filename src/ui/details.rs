use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::calculator::CalculationResult;
use crate::report::format_eur;
use crate::theme::Theme;
use crate::ui::borders;

/// Rows a details panel for `providers` entries wants, borders included.
pub fn details_height(providers: usize) -> u16 {
    // name + four figures per provider, one blank line between providers
    let body = providers * 5 + providers.saturating_sub(1);
    body as u16 + 2
}

/// Expanded per-provider breakdown listing all four cost figures.
pub struct DetailsPanel<'a> {
    result: &'a CalculationResult,
    theme: &'a Theme,
}

impl<'a> DetailsPanel<'a> {
    pub fn new(result: &'a CalculationResult, theme: &'a Theme) -> Self {
        Self { result, theme }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let label = Style::default().fg(self.theme.muted);
        let value = Style::default().fg(self.theme.foreground);
        let mut lines = Vec::new();

        for (i, b) in self.result.iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            lines.push(Line::from(Span::styled(
                b.provider_name.clone(),
                Style::default()
                    .fg(Color::from(b.display_color))
                    .add_modifier(Modifier::BOLD),
            )));
            for (name, amount) in [
                ("Compute cost", b.compute_cost),
                ("Storage cost", b.storage_cost),
                ("Network cost", b.network_cost),
            ] {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {name:<14}"), label),
                    Span::styled(format_eur(amount), value),
                ]));
            }
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<14}", "Total cost"), label),
                Span::styled(format_eur(b.total_cost), value.add_modifier(Modifier::BOLD)),
            ]));
        }
        lines
    }
}

impl Widget for DetailsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = borders::themed_block(" Detailed breakdown (Ctrl+D to hide) ", false, self.theme);
        Paragraph::new(self.lines()).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{calculate, CalcInput, Throughput};
    use crate::rates::RateTable;

    #[test]
    fn test_details_height() {
        assert_eq!(details_height(1), 7);
        assert_eq!(details_height(3), 19);
    }

    #[test]
    fn test_lines_cover_every_figure() {
        let theme = Theme::default_theme();
        let input = CalcInput {
            tokens: 200_000_000.0,
            throughput: Throughput::DEFAULT,
        };
        let result = calculate(&input, &RateTable::builtin());
        let panel = DetailsPanel::new(&result, &theme);
        let text: Vec<String> = panel.lines().iter().map(|l| l.to_string()).collect();

        assert_eq!(text.len() as u16, details_height(3) - 2);
        assert_eq!(text[0], "AWS");
        assert_eq!(text[1], "  Compute cost  531.84 €");
        assert_eq!(text[4], "  Total cost    538.19 €");
        assert!(text.contains(&"Azure".to_string()));
    }
}
