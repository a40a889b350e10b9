use anyhow::Result;
use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use std::time::Duration;

use crate::calculator::{calculate, CalcInput, CalculationResult, Throughput};
use crate::chart::ChartData;
use crate::error::ParseError;
use crate::keybindings;
use crate::parser;
use crate::rates::RateTable;
use crate::report;
use crate::theme::Theme;
use crate::ui;
use crate::ui::form::{Field, Form};
use crate::ui::input::InputEditor;
use crate::ui::toast::Toast;

enum Msg {
    Key(KeyEvent),
    Paste(String),
    Resize(u16, u16),
    Tick,
}

/// Field values the form starts with, and returns to on reset.
#[derive(Debug, Clone)]
pub struct StartValues {
    pub tokens: String,
    pub project_name: String,
    pub throughput: Throughput,
}

pub struct App {
    theme: Theme,
    rates: RateTable,
    fps: u32,
    export_dir: PathBuf,
    start: StartValues,
    tokens: InputEditor,
    project: InputEditor,
    throughput: Throughput,
    focus: Field,
    show_details: bool,
    /// Set while the token field holds input that could not be parsed.
    warning: Option<ParseError>,
    result: CalculationResult,
    chart: ChartData,
    toast: Option<Toast>,
    should_quit: bool,
    frame_count: u64,
}

impl App {
    pub fn new(theme: Theme, rates: RateTable, fps: u32, export_dir: PathBuf, start: StartValues) -> Self {
        let (tokens, warning) = parser::parse_tokens_or_fallback(&start.tokens);
        let input = CalcInput {
            tokens,
            throughput: start.throughput,
        };
        let result = calculate(&input, &rates);
        let chart = ChartData::from_result(&result);

        Self {
            theme,
            rates,
            fps,
            export_dir,
            tokens: InputEditor::new(&start.tokens),
            project: InputEditor::new(&start.project_name),
            throughput: start.throughput,
            start,
            focus: Field::Tokens,
            show_details: false,
            warning,
            result,
            chart,
            toast: None,
            should_quit: false,
            frame_count: 0,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let tick = Duration::from_millis(1000 / u64::from(self.fps.max(1)));
        tracing::info!(providers = self.rates.provider_count(), "calculator started");

        self.view(terminal)?;
        while !self.should_quit {
            if let Some(msg) = next_msg(tick)? {
                self.update(msg);
            }
            if self.should_quit {
                break;
            }
            self.view(terminal)?;
        }

        tracing::info!("calculator closed");
        Ok(())
    }

    /// Recompute everything from the current field values.
    fn recalculate(&mut self) {
        let (tokens, warning) = parser::parse_tokens_or_fallback(self.tokens.content());
        self.warning = warning;
        let input = CalcInput {
            tokens,
            throughput: self.throughput,
        };
        self.result = calculate(&input, &self.rates);
        self.chart = ChartData::from_result(&self.result);
    }

    fn update(&mut self, msg: Msg) {
        match msg {
            Msg::Key(key) => {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
            Msg::Paste(text) => {
                match self.focus {
                    Field::Tokens => self.tokens.insert_str(&text),
                    Field::Project => self.project.insert_str(&text),
                    Field::Throughput => return,
                }
                self.recalculate();
            }
            Msg::Resize(width, height) => {
                tracing::debug!(width, height, "terminal resized");
            }
            Msg::Tick => {
                self.frame_count = self.frame_count.wrapping_add(1);
                if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
                    self.toast = None;
                }
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let (code, modifiers) = (key.code, key.modifiers);

        if keybindings::quit_binding().matches(code, modifiers) || code == KeyCode::Esc {
            self.should_quit = true;
            return;
        }
        if keybindings::export_binding().matches(code, modifiers) {
            self.export();
            return;
        }
        if keybindings::details_binding().matches(code, modifiers) {
            self.show_details = !self.show_details;
            return;
        }
        if keybindings::reset_binding().matches(code, modifiers) {
            self.reset();
            return;
        }

        match code {
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            _ => match self.focus {
                Field::Tokens => {
                    if edit_field(&mut self.tokens, code, modifiers) {
                        self.recalculate();
                    }
                }
                Field::Project => {
                    edit_field(&mut self.project, code, modifiers);
                }
                Field::Throughput => self.handle_slider_key(code),
            },
        }
    }

    fn handle_slider_key(&mut self, code: KeyCode) {
        let next = match code {
            KeyCode::Left | KeyCode::Char('-') => self.throughput.decrease(),
            KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => self.throughput.increase(),
            KeyCode::Home => Throughput::clamped(Throughput::MIN),
            KeyCode::End => Throughput::clamped(Throughput::MAX),
            _ => return,
        };
        if next != self.throughput {
            self.throughput = next;
            self.recalculate();
        }
    }

    fn reset(&mut self) {
        self.tokens.set_content(&self.start.tokens);
        self.project.set_content(&self.start.project_name);
        self.throughput = self.start.throughput;
        self.focus = Field::Tokens;
        self.recalculate();
    }

    fn export(&mut self) {
        let project = self.project.content();
        match report::export_report(&self.result, project, &Local::now(), &self.export_dir) {
            Ok(path) => {
                self.toast = Some(Toast::success(format!("Report saved to {}", path.display())));
            }
            Err(e) => {
                tracing::error!(error = %format!("{e:#}"), "export failed");
                self.toast = Some(Toast::error(format!("Export failed: {e}")));
            }
        }
    }

    fn view(&self, terminal: &mut DefaultTerminal) -> Result<()> {
        terminal.draw(|frame| {
            let view = ui::View {
                theme: &self.theme,
                frame_count: self.frame_count,
                form: Form {
                    tokens: &self.tokens,
                    project: &self.project,
                    throughput: self.throughput,
                    focus: self.focus,
                    warning: self.warning.as_ref(),
                    theme: &self.theme,
                },
                result: &self.result,
                chart: &self.chart,
                show_details: self.show_details,
                toast: self.toast.as_ref(),
            };
            ui::render(frame, view);
        })?;
        Ok(())
    }
}

/// Apply an editing key to a text field. Returns true if the content changed.
fn edit_field(editor: &mut InputEditor, code: KeyCode, modifiers: KeyModifiers) -> bool {
    let before_len = editor.content().len();
    match code {
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
            editor.insert_char(c);
        }
        KeyCode::Backspace => editor.backspace(),
        KeyCode::Delete => editor.delete(),
        KeyCode::Left => editor.move_left(),
        KeyCode::Right => editor.move_right(),
        KeyCode::Home => editor.move_home(),
        KeyCode::End => editor.move_end(),
        _ => {}
    }
    editor.content().len() != before_len
}

/// Wait up to `timeout` for a terminal event; a timeout becomes a tick.
fn next_msg(timeout: Duration) -> Result<Option<Msg>> {
    if !event::poll(timeout)? {
        return Ok(Some(Msg::Tick));
    }
    Ok(match event::read()? {
        Event::Key(key) => Some(Msg::Key(key)),
        Event::Paste(text) => Some(Msg::Paste(text)),
        Event::Resize(w, h) => Some(Msg::Resize(w, h)),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::FALLBACK_TOKENS;

    fn app_in(dir: PathBuf) -> App {
        App::new(
            Theme::default_theme(),
            RateTable::builtin(),
            30,
            dir,
            StartValues {
                tokens: "200000000".to_string(),
                project_name: "Demo".to_string(),
                throughput: Throughput::DEFAULT,
            },
        )
    }

    fn app() -> App {
        app_in(std::env::temp_dir())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.update(Msg::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn ctrl(app: &mut App, c: char) {
        app.update(Msg::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn clear_tokens(app: &mut App) {
        for _ in 0..app.tokens.content().len() {
            press(app, KeyCode::Backspace);
        }
    }

    #[test]
    fn test_initial_calculation() {
        let app = app();
        assert!(app.warning.is_none());
        assert!((app.result.tokens - 200_000_000.0).abs() < f64::EPSILON);
        assert_eq!(app.chart.providers.len(), 3);
    }

    #[test]
    fn test_typing_recalculates() {
        let mut app = app();
        clear_tokens(&mut app);
        type_text(&mut app, "1k");
        assert!((app.result.tokens - 1000.0).abs() < f64::EPSILON);
        assert!(app.warning.is_none());
    }

    #[test]
    fn test_invalid_input_uses_fallback() {
        let mut app = app();
        clear_tokens(&mut app);
        type_text(&mut app, "abc");
        assert!(app.warning.is_some());
        assert!((app.result.tokens - FALLBACK_TOKENS).abs() < f64::EPSILON);

        clear_tokens(&mut app);
        assert_eq!(app.warning, Some(ParseError::Empty));
    }

    #[test]
    fn test_slider_changes_hours() {
        let mut app = app();
        let before = app.result.total_hours;
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Field::Throughput);

        press(&mut app, KeyCode::Right);
        assert_eq!(app.throughput.get(), 55);
        assert!(app.result.total_hours < before);

        press(&mut app, KeyCode::Home);
        assert_eq!(app.throughput.get(), 10);
        assert!(app.result.total_hours > before);
    }

    #[test]
    fn test_project_edit_does_not_touch_tokens() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "X");
        assert_eq!(app.project.content(), "DemoX");
        assert_eq!(app.tokens.content(), "200000000");
    }

    #[test]
    fn test_paste_into_tokens() {
        let mut app = app();
        clear_tokens(&mut app);
        app.update(Msg::Paste("2.5M".to_string()));
        assert!((app.result.tokens - 2_500_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_toggle_details_and_quit() {
        let mut app = app();
        ctrl(&mut app, 'd');
        assert!(app.show_details);
        ctrl(&mut app, 'd');
        assert!(!app.show_details);
        ctrl(&mut app, 'q');
        assert!(app.should_quit);
    }

    #[test]
    fn test_reset_restores_start_values() {
        let mut app = app();
        clear_tokens(&mut app);
        type_text(&mut app, "zzz");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Left);
        ctrl(&mut app, 'r');

        assert_eq!(app.tokens.content(), "200000000");
        assert_eq!(app.throughput, Throughput::DEFAULT);
        assert_eq!(app.focus, Field::Tokens);
        assert!(app.warning.is_none());
    }

    #[test]
    fn test_export_writes_report_and_toasts() {
        crate::logging::init_test_logging();
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path().to_path_buf());
        ctrl(&mut app, 'e');

        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.kind, crate::ui::toast::ToastKind::Success);

        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().flatten().collect();
        assert_eq!(files.len(), 1);
        let name = files[0].file_name().to_string_lossy().into_owned();
        assert!(name.starts_with("reporte_costos_") && name.ends_with(".txt"));
        let content = std::fs::read_to_string(files[0].path()).unwrap();
        assert!(content.starts_with("Cost Report - Demo"));
    }

    #[test]
    fn test_export_with_blank_project_is_untitled() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path().to_path_buf());
        press(&mut app, KeyCode::Tab);
        for _ in 0..app.project.content().len() {
            press(&mut app, KeyCode::Backspace);
        }
        ctrl(&mut app, 'e');

        let file = std::fs::read_dir(dir.path()).unwrap().flatten().next().unwrap();
        let content = std::fs::read_to_string(file.path()).unwrap();
        assert!(content.starts_with("Cost Report - Untitled\n"));
    }

    #[test]
    fn test_tick_advances_frame() {
        let mut app = app();
        app.update(Msg::Tick);
        app.update(Msg::Tick);
        assert_eq!(app.frame_count, 2);
    }
}
