//! Launch options.
//!
//! Inkfield keeps no configuration files - a session is deliberately
//! ephemeral - so everything adjustable at startup lives on the command
//! line.

use clap::{Parser, ValueEnum};
use egui::Color32;

use crate::input::InteractionMode;
use crate::stroke::Tool;

#[derive(Parser, Debug)]
#[command(
    name = "inkfield",
    version,
    about = "Infinite pannable freehand drawing surface"
)]
pub struct LaunchOptions {
    /// Initial window width in logical pixels.
    #[arg(long, default_value_t = 1280.0)]
    pub width: f32,

    /// Initial window height in logical pixels.
    #[arg(long, default_value_t = 720.0)]
    pub height: f32,

    /// Start maximized.
    #[arg(long)]
    pub maximized: bool,

    /// Tool selected at startup.
    #[arg(long, value_enum, default_value_t = ToolArg::Pencil)]
    pub tool: ToolArg,

    /// Input mode selected at startup.
    #[arg(long, value_enum, default_value_t = ModeArg::Draw)]
    pub mode: ModeArg,

    /// Starting stroke color as a hex string, e.g. "#1a6b3f".
    #[arg(long, value_parser = parse_hex_color, default_value = "#000000")]
    pub color: Color32,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolArg {
    Pencil,
    Eraser,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    Draw,
    Pan,
}

impl LaunchOptions {
    pub fn start_tool(&self) -> Tool {
        match self.tool {
            ToolArg::Pencil => Tool::Pencil,
            ToolArg::Eraser => Tool::Eraser,
        }
    }

    pub fn start_mode(&self) -> InteractionMode {
        match self.mode {
            ModeArg::Draw => InteractionMode::Draw,
            ModeArg::Pan => InteractionMode::Pan,
        }
    }
}

/// Parse `#rrggbb` (the leading `#` is optional).
pub fn parse_hex_color(s: &str) -> Result<Color32, String> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return Err(format!("expected 6 hex digits, got \"{s}\""));
    }
    let value =
        u32::from_str_radix(hex, 16).map_err(|e| format!("invalid hex color \"{s}\": {e}"))?;
    Ok(Color32::from_rgb(
        (value >> 16) as u8,
        (value >> 8) as u8,
        value as u8,
    ))
}
