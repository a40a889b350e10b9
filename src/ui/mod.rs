pub mod borders;
pub mod cards;
pub mod chart;
pub mod details;
pub mod form;
pub mod header;
pub mod input;
pub mod status_bar;
pub mod toast;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::calculator::CalculationResult;
use crate::chart::ChartData;
use crate::theme::Theme;
use cards::{CostCards, CARDS_HEIGHT};
use chart::StackedBarChart;
use details::{details_height, DetailsPanel};
use form::Form;
use header::{Header, HEADER_HEIGHT};
use status_bar::StatusBar;
use toast::{Toast, ToastWidget};

const SIDEBAR_WIDTH: u16 = 34;

/// Everything the renderer needs for one frame.
pub struct View<'a> {
    pub theme: &'a Theme,
    pub frame_count: u64,
    pub form: Form<'a>,
    pub result: &'a CalculationResult,
    pub chart: &'a ChartData,
    pub show_details: bool,
    pub toast: Option<&'a Toast>,
}

/// Render the full UI layout.
pub fn render(frame: &mut Frame, view: View<'_>) {
    let size = frame.area();
    let theme = view.theme;
    frame.render_widget(Block::default().style(Style::default().bg(theme.background)), size);

    // [header] [body] [status bar]
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(size);

    frame.render_widget(Header::new(theme, view.frame_count), rows[0]);

    // [settings sidebar] [results]
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(30)])
        .split(rows[1]);

    render_results(frame, body[1], &view);
    frame.render_widget(view.form, body[0]);

    frame.render_widget(StatusBar::new(theme, view.result), rows[2]);
    if let Some(toast) = view.toast {
        frame.render_widget(ToastWidget::new(toast, theme), size);
    }
}

fn render_results(frame: &mut Frame, area: Rect, view: &View<'_>) {
    let details = if view.show_details {
        details_height(view.result.breakdowns.len())
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(CARDS_HEIGHT),
            Constraint::Length(1),
            Constraint::Min(7),
            Constraint::Length(details),
        ])
        .split(area);

    frame.render_widget(CostCards::new(view.result, view.theme), chunks[0]);
    frame.render_widget(processing_time_line(view.result, view.theme), chunks[1]);
    frame.render_widget(StackedBarChart::new(view.chart, view.theme), chunks[2]);
    if view.show_details {
        frame.render_widget(DetailsPanel::new(view.result, view.theme), chunks[3]);
    }
}

fn processing_time_line<'a>(result: &CalculationResult, theme: &Theme) -> Paragraph<'a> {
    Paragraph::new(Line::from(vec![
        Span::styled(" Estimated processing time: ", Style::default().fg(theme.muted)),
        Span::styled(
            result.processing_time().to_string(),
            Style::default()
                .fg(theme.warning)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{calculate, CalcInput, Throughput};
    use crate::rates::RateTable;
    use crate::ui::form::Field;
    use crate::ui::input::InputEditor;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_full_layout_renders() {
        let theme = Theme::default_theme();
        let input = CalcInput {
            tokens: 200_000_000.0,
            throughput: Throughput::DEFAULT,
        };
        let result = calculate(&input, &RateTable::builtin());
        let chart = ChartData::from_result(&result);
        let tokens = InputEditor::new("200M");
        let project = InputEditor::new("Demo");

        let backend = TestBackend::new(140, 50);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let view = View {
                    theme: &theme,
                    frame_count: 0,
                    form: Form {
                        tokens: &tokens,
                        project: &project,
                        throughput: Throughput::DEFAULT,
                        focus: Field::Tokens,
                        warning: None,
                        theme: &theme,
                    },
                    result: &result,
                    chart: &chart,
                    show_details: true,
                    toast: None,
                };
                render(frame, view);
            })
            .unwrap();

        let buf = terminal.backend().buffer();
        let text: String = (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");
        assert!(text.contains("46.3 days (1111.1 hours)"));
        assert!(text.contains("Detailed breakdown"));
        assert!(text.contains("Settings"));
    }
}
