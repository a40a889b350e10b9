//! Colour themes: TOML files with a `[colors]` table of `#rrggbb` or
//! `rgb(r, g, b)` values.

use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::rates::Rgb;

pub const DEFAULT_THEME_NAME: &str = "catppuccin-mocha";

/// Themes compiled into the binary, keyed by file stem. The default comes first.
const EMBEDDED: [(&str, &str); 2] = [
    (DEFAULT_THEME_NAME, include_str!("../themes/catppuccin-mocha.toml")),
    ("nord", include_str!("../themes/nord.toml")),
];

#[derive(Deserialize)]
struct ThemeFile {
    name: String,
    colors: Palette,
}

#[derive(Deserialize)]
struct Palette {
    background: Rgb,
    foreground: Rgb,
    surface: Rgb,
    muted: Rgb,
    primary: Rgb,
    secondary: Rgb,
    accent: Rgb,
    success: Rgb,
    warning: Rgb,
    error: Rgb,
    border: Rgb,
    border_focused: Rgb,
    status_bg: Rgb,
    status_fg: Rgb,
    input_bg: Rgb,
    input_fg: Rgb,
    input_placeholder: Rgb,
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color,
    pub foreground: Color,
    pub surface: Color,
    pub muted: Color,

    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,

    pub success: Color,
    pub warning: Color,
    pub error: Color,

    pub border: Color,
    pub border_focused: Color,

    pub status_bg: Color,
    pub status_fg: Color,

    pub input_bg: Color,
    pub input_fg: Color,
    pub input_placeholder: Color,
}

impl From<ThemeFile> for Theme {
    fn from(file: ThemeFile) -> Self {
        let c = file.colors;
        Self {
            name: file.name,
            background: c.background.into(),
            foreground: c.foreground.into(),
            surface: c.surface.into(),
            muted: c.muted.into(),
            primary: c.primary.into(),
            secondary: c.secondary.into(),
            accent: c.accent.into(),
            success: c.success.into(),
            warning: c.warning.into(),
            error: c.error.into(),
            border: c.border.into(),
            border_focused: c.border_focused.into(),
            status_bg: c.status_bg.into(),
            status_fg: c.status_fg.into(),
            input_bg: c.input_bg.into(),
            input_fg: c.input_fg.into(),
            input_placeholder: c.input_placeholder.into(),
        }
    }
}

impl Theme {
    /// Look `name` up in the user and bundled theme directories, then among
    /// the embedded themes.
    pub fn load(name: &str) -> Result<Self> {
        Self::load_from(&theme_dirs(), name)
    }

    fn load_from(dirs: &[PathBuf], name: &str) -> Result<Self> {
        let file_name = format!("{name}.toml");
        if let Some(path) = dirs.iter().map(|d| d.join(&file_name)).find(|p| p.is_file()) {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read theme {}", path.display()))?;
            let theme = Self::from_toml(&content)
                .with_context(|| format!("Invalid theme file {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded theme");
            return Ok(theme);
        }

        match EMBEDDED.iter().find(|(stem, _)| *stem == name) {
            Some((_, content)) => Self::from_toml(content),
            None => anyhow::bail!("Theme '{}' not found", name),
        }
    }

    pub fn default_theme() -> Self {
        Self::from_toml(EMBEDDED[0].1).expect("embedded default theme must be valid")
    }

    /// Names of every theme that `load` can find, sorted.
    pub fn list_available() -> Vec<String> {
        Self::list_in(&theme_dirs())
    }

    fn list_in(dirs: &[PathBuf]) -> Vec<String> {
        let mut names: BTreeSet<String> = EMBEDDED.iter().map(|(stem, _)| stem.to_string()).collect();
        for dir in dirs {
            scan_theme_dir(dir, &mut names);
        }
        names.into_iter().collect()
    }

    /// Background as a plain RGB triple, for blending chart colours.
    /// Non-RGB backgrounds blend toward black.
    pub fn background_rgb(&self) -> Rgb {
        match self.background {
            Color::Rgb(r, g, b) => Rgb(r, g, b),
            _ => Rgb(0, 0, 0),
        }
    }

    fn from_toml(content: &str) -> Result<Self> {
        let file: ThemeFile = toml::from_str(content).context("Failed to parse theme TOML")?;
        Ok(file.into())
    }
}

/// User themes first so they shadow bundled ones of the same name.
fn theme_dirs() -> Vec<PathBuf> {
    let user = dirs::config_dir().map(|dir| dir.join("cloud-cost").join("themes"));
    let bundled = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("..").join("themes")));
    user.into_iter().chain(bundled).collect()
}

fn scan_theme_dir(dir: &Path, names: &mut BTreeSet<String>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|e| e.path()) {
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            names.insert(stem.to_string());
        }
    }
}
