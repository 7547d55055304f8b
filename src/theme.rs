use std::path::{Path, PathBuf};

use eframe::egui;
use egui::Color32;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid theme file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid color for '{field}': {value}")]
    InvalidColor { field: &'static str, value: String },
}

/// Colors used by the picker window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// "Selected:" prefix and the loading text.
    pub label: Color32,
    pub country: Color32,
    pub error: Color32,
    pub background: Color32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            label: Color32::from_rgb(0x77, 0x77, 0x77),
            country: Color32::from_rgb(0x1e, 0x3a, 0x8a),
            error: Color32::from_rgb(0xcc, 0x00, 0x00),
            background: Color32::from_rgb(0xf5, 0xf6, 0xf8),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ThemeFile {
    label: Option<String>,
    country: Option<String>,
    error: Option<String>,
    background: Option<String>,
}

impl Palette {
    /// Defaults overridden by whatever hex colors the JSON sets.
    pub fn from_json(text: &str) -> Result<Self, ThemeError> {
        let file: ThemeFile = serde_json::from_str(text)?;
        let mut palette = Self::default();

        let overrides = [
            ("label", file.label, &mut palette.label),
            ("country", file.country, &mut palette.country),
            ("error", file.error, &mut palette.error),
            ("background", file.background, &mut palette.background),
        ];
        for (field, value, slot) in overrides {
            if let Some(value) = value {
                *slot = parse_color(field, &value)?;
            }
        }

        Ok(palette)
    }

    pub fn load(path: &Path) -> Result<Self, ThemeError> {
        let text = std::fs::read_to_string(path).map_err(|source| ThemeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Missing or broken theme files fall back to the default palette.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            warn!(
                "Stylesheet not found at {}, using default styling",
                path.display()
            );
            return Self::default();
        }

        match Self::load(path) {
            Ok(palette) => {
                info!("Loaded theme from {}", path.display());
                palette
            }
            Err(err) => {
                warn!("Error loading stylesheet: {}", err);
                Self::default()
            }
        }
    }
}

fn parse_color(field: &'static str, value: &str) -> Result<Color32, ThemeError> {
    Color32::from_hex(value.trim()).map_err(|_| ThemeError::InvalidColor {
        field,
        value: value.to_string(),
    })
}

pub fn apply_theme(ctx: &egui::Context, palette: &Palette) {
    let mut style = (*ctx.style()).clone();
    style.visuals = egui::Visuals::light();
    style.visuals.panel_fill = palette.background;
    style.visuals.window_fill = palette.background;
    style.visuals.error_fg_color = palette.error;
    ctx.set_style(style);
}

const DEFAULT_ICON: &[u8] = include_bytes!("../assets/icons/globe-icon.png");

/// Window icon from `path` if present, otherwise the built-in globe.
pub fn load_icon(path: &Path) -> Option<egui::IconData> {
    if path.exists() {
        match image::open(path) {
            Ok(img) => return Some(icon_data(img)),
            Err(err) => warn!("Window icon unreadable ({}): {}", path.display(), err),
        }
    }
    default_icon()
}

fn default_icon() -> Option<egui::IconData> {
    image::load_from_memory(DEFAULT_ICON).ok().map(icon_data)
}

fn icon_data(img: image::DynamicImage) -> egui::IconData {
    let img = img.into_rgba8();
    let (w, h) = img.dimensions();
    egui::IconData {
        rgba: img.into_raw(),
        width: w,
        height: h,
    }
}
