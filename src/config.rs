use crate::theme::Theme;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Geometry of the generation-based default placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Horizontal distance between neighbours in one generation.
    pub node_pitch: f64,
    /// Vertical distance between generations.
    pub row_pitch: f64,
    pub node_offset_x: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_pitch: 200.0,
            row_pitch: 150.0,
            node_offset_x: 100.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

impl NumberOrString {
    fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrString::Number(val) => Some(*val),
            NumberOrString::String(val) => val.trim().parse::<f64>().ok(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    node_pitch: Option<NumberOrString>,
    row_pitch: Option<NumberOrString>,
    node_offset_x: Option<NumberOrString>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeFile {
    parent_stroke: Option<String>,
    married_stroke: Option<String>,
    stroke_width: Option<NumberOrString>,
    married_dasharray: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    layout: Option<LayoutConfigFile>,
    theme: Option<ThemeFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("parsing config {}", path.display()))
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = serde_json::from_str(contents)?;
    let mut config = Config::default();

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.node_pitch.as_ref().and_then(NumberOrString::as_f64) {
            config.layout.node_pitch = v;
        }
        if let Some(v) = layout.row_pitch.as_ref().and_then(NumberOrString::as_f64) {
            config.layout.row_pitch = v;
        }
        if let Some(v) = layout.node_offset_x.as_ref().and_then(NumberOrString::as_f64) {
            config.layout.node_offset_x = v;
        }
    }

    if let Some(theme) = parsed.theme {
        if let Some(v) = theme.parent_stroke {
            config.theme.parent_stroke = v;
        }
        if let Some(v) = theme.married_stroke {
            config.theme.married_stroke = v;
        }
        if let Some(v) = theme.stroke_width.as_ref().and_then(NumberOrString::as_f64) {
            config.theme.stroke_width = v as f32;
        }
        if let Some(v) = theme.married_dasharray {
            config.theme.married_dasharray = v;
        }
    }

    Ok(config)
}
