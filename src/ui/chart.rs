use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

use crate::chart::{ChartData, CostCategory};
use crate::rates::Rgb;
use crate::theme::Theme;
use crate::ui::borders;

/// Partial-cell blocks, indexed by eighths filled (1..=7).
const EIGHTHS: [&str; 8] = [" ", "▁", "▂", "▃", "▄", "▅", "▆", "▇"];
const FULL: &str = "█";
const MAX_BAR_WIDTH: u16 = 14;

/// Vertical stacked bar chart: compute at the bottom, then storage, then network.
pub struct StackedBarChart<'a> {
    data: &'a ChartData,
    theme: &'a Theme,
}

impl<'a> StackedBarChart<'a> {
    pub fn new(data: &'a ChartData, theme: &'a Theme) -> Self {
        Self { data, theme }
    }

    fn legend(&self, buf: &mut Buffer, x: u16, y: u16, width: u16) {
        let base = match self.theme.foreground {
            Color::Rgb(r, g, b) => Rgb(r, g, b),
            _ => Rgb(255, 255, 255),
        };
        let bg = self.theme.background_rgb();
        let mut cursor = x;
        let limit = x + width;
        for category in CostCategory::ALL {
            let swatch = Style::default().fg(base.shade(category.intensity(), bg).into());
            let label = format!(" {}  ", category.label());
            if cursor + 1 + label.len() as u16 > limit {
                break;
            }
            buf.set_string(cursor, y, "■", swatch);
            buf.set_string(cursor + 1, y, &label, Style::default().fg(self.theme.foreground));
            cursor += 1 + label.len() as u16;
        }
    }
}

/// Cumulative segment tops for one bar, in eighths of a cell.
fn segment_tops(data: &ChartData, index: usize, scale: f64) -> [u32; 3] {
    let mut tops = [0u32; 3];
    let mut cumulative = 0.0;
    for (slot, category) in CostCategory::ALL.iter().enumerate() {
        cumulative += data.series(*category).get(index).copied().unwrap_or(0.0);
        tops[slot] = (cumulative * scale).round().max(0.0) as u32;
    }
    tops
}

impl Widget for StackedBarChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = borders::themed_block(" Cost breakdown by provider (EUR) ", false, self.theme);
        let inner = block.inner(area);
        block.render(area, buf);

        // legend, at least two bar rows, label row above bars, provider row
        if inner.height < 5 || inner.width < 6 {
            return;
        }
        self.legend(buf, inner.x, inner.y, inner.width);

        let count = self.data.len();
        let max_total = self.data.max_total();
        if count == 0 || max_total <= 0.0 {
            buf.set_stringn(
                inner.x,
                inner.y + 2,
                "No costs to display",
                inner.width as usize,
                Style::default().fg(self.theme.muted),
            );
            return;
        }

        let names_y = inner.bottom() - 1;
        let base_y = names_y - 1;
        // One row between legend and bars is kept for the tallest total label
        let bar_rows = inner.height - 3;
        let scale = f64::from((bar_rows - 1) * 8) / max_total;

        let slot_width = (inner.width / count as u16).max(1);
        let bar_width = slot_width.saturating_sub(2).clamp(1, MAX_BAR_WIDTH);
        let background = self.theme.background_rgb();

        for index in 0..count {
            let slot_x = inner.x + slot_width * index as u16;
            if slot_x >= inner.right() {
                break;
            }
            let bar_x = slot_x + (slot_width - bar_width) / 2;
            let tops = segment_tops(self.data, index, scale);
            let colors: Vec<Color> = CostCategory::ALL
                .iter()
                .map(|&c| self.data.segment_color(index, c, background).into())
                .collect();

            for row in 0..bar_rows {
                let bottom = u32::from(row) * 8;
                let Some(seg) = tops.iter().position(|&top| top > bottom) else {
                    break;
                };
                let filled = (tops[seg] - bottom).min(8) as usize;
                let (symbol, fg, bg) = if filled == 8 {
                    (FULL, colors[seg], self.theme.background)
                } else {
                    // The next segment with height fills the rest of the cell
                    let above = tops
                        .iter()
                        .enumerate()
                        .skip(seg + 1)
                        .find(|(_, &top)| top > tops[seg])
                        .map(|(i, _)| colors[i])
                        .unwrap_or(self.theme.background);
                    (EIGHTHS[filled], colors[seg], above)
                };

                let y = base_y - row;
                for x in bar_x..(bar_x + bar_width).min(inner.right()) {
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_symbol(symbol);
                        cell.set_fg(fg);
                        cell.set_bg(bg);
                    }
                }
            }

            // Total above the bar
            let top_row = tops[2].div_ceil(8) as u16;
            let label_y = base_y.saturating_sub(top_row);
            let total = format!("{:.2}", self.data.stack_total(index));
            let label_x = slot_x + slot_width.saturating_sub(total.len() as u16) / 2;
            if label_y > inner.y {
                buf.set_stringn(
                    label_x,
                    label_y,
                    &total,
                    slot_width as usize,
                    Style::default().fg(self.theme.foreground),
                );
            }

            // Provider name under the bar
            let name = &self.data.providers[index];
            let name_len = (name.chars().count() as u16).min(slot_width);
            let name_x = slot_x + (slot_width - name_len) / 2;
            let color: Color = self.data.colors[index].into();
            buf.set_stringn(name_x, names_y, name, slot_width as usize, Style::default().fg(color));
        }
    }
}
