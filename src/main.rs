use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use cloud_cost::app::{App, StartValues};
use cloud_cost::calculator::{calculate, CalcInput, Throughput};
use cloud_cost::config::Config;
use cloud_cost::rates::RateTable;
use cloud_cost::theme::Theme;
use cloud_cost::{logging, parser, report};

#[derive(Parser)]
#[command(name = "cloud-cost", about = "Compare what a token workload costs across cloud providers")]
#[command(version)]
struct Cli {
    /// Token count, e.g. 200M, 1.5B, 250,000 (overrides config)
    #[arg(long)]
    tokens: Option<String>,

    /// Processing speed in tokens per second
    #[arg(long, value_parser = clap::value_parser!(u32).range(10..=100))]
    throughput: Option<u32>,

    /// Project name used in exported reports
    #[arg(short, long)]
    project: Option<String>,

    /// Path to a rate table TOML file
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Theme name (e.g., catppuccin-mocha, nord)
    #[arg(short, long)]
    theme: Option<String>,

    /// Directory exported reports are written to
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Verbose logging
    #[arg(long)]
    debug: bool,

    /// Print the text report to stdout and exit
    #[arg(long, conflicts_with = "json")]
    print: bool,

    /// Print the calculation result as JSON and exit
    #[arg(long)]
    json: bool,

    /// List available themes and exit
    #[arg(long)]
    list_themes: bool,
}

impl Cli {
    fn headless(&self) -> bool {
        self.print || self.json || self.list_themes
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init_logging(None, cli.debug, cli.headless())?;

    if cli.list_themes {
        for name in Theme::list_available() {
            println!("{name}");
        }
        return Ok(());
    }

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Apply CLI overrides to config
    if let Some(tokens) = cli.tokens.clone() {
        config.tokens = tokens;
    }
    if let Some(project) = cli.project.clone() {
        config.project_name = project;
    }
    if let Some(throughput) = cli.throughput {
        config.throughput = throughput;
    }
    if cli.rates.is_some() {
        config.rates_file = cli.rates.clone();
    }
    if cli.export_dir.is_some() {
        config.export_dir = cli.export_dir.clone();
    }
    let throughput = config.throughput();
    if throughput.get() != config.throughput {
        tracing::warn!(requested = config.throughput, used = throughput.get(), "throughput snapped to slider range");
    }

    let rates = match &config.rates_file {
        Some(path) => RateTable::load(path)
            .with_context(|| format!("Failed to load rate table from {}", path.display()))?,
        None => RateTable::builtin(),
    };

    if cli.print || cli.json {
        return print_headless(&cli, &config, &rates, throughput);
    }

    let theme_name = cli.theme.as_deref().unwrap_or(&config.theme);
    let theme = Theme::load(theme_name).unwrap_or_else(|e| {
        tracing::warn!(theme = theme_name, error = %e, "failed to load theme, using default");
        Theme::default_theme()
    });

    let (cols, rows) = crossterm::terminal::size().context("Failed to get terminal size")?;
    if cols < 60 || rows < 20 {
        anyhow::bail!("Terminal too small ({}x{}). Need at least 60x20.", cols, rows);
    }

    let export_dir = match config.export_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };
    let start = StartValues {
        tokens: config.tokens.clone(),
        project_name: config.project_name.clone(),
        throughput,
    };

    // Initialize terminal
    let mut terminal = ratatui::init();
    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::SetTitle("cloud-cost"),
        crossterm::event::EnableBracketedPaste
    )?;

    let mut app = App::new(theme, rates, config.fps, export_dir, start);
    let result = app.run(&mut terminal);

    let _ = crossterm::execute!(std::io::stdout(), crossterm::event::DisableBracketedPaste);
    ratatui::restore();

    result
}

fn print_headless(cli: &Cli, config: &Config, rates: &RateTable, throughput: Throughput) -> Result<()> {
    let (tokens, warning) = parser::parse_tokens_or_fallback(&config.tokens);
    if let Some(err) = warning {
        eprintln!(
            "Warning: {}. Using {} tokens.",
            err.friendly_message(),
            report::format_thousands(tokens)
        );
    }

    let result = calculate(&CalcInput { tokens, throughput }, rates);
    if cli.json {
        let json = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
        println!("{json}");
    } else {
        print!("{}", report::format_report(&result, &config.project_name, &chrono::Local::now()));
    }
    Ok(())
}
