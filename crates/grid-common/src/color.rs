//! RGBA colors and color specification parsing.
//!
//! Colors arrive from configuration as either numeric tuples or strings and
//! are normalized once, when a colorizer is built, into plain `[r, g, b, a]`
//! byte arrays that the per-pixel code copies straight into tile buffers.

use crate::error::{VizError, VizResult};
use serde::{Deserialize, Serialize};

/// A normalized color, one byte per channel in RGBA order.
pub type Rgba = [u8; 4];

pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

/// Hot pink, returned when a value cannot be matched to any class.
pub const WARNING_COLOR: Rgba = [255, 0, 255, 255];

/// A color as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// `[r, g, b]` or `[r, g, b, a]`; an alpha in [0, 1] is a fraction of
    /// 255, anything above is a byte
    Tuple(Vec<f64>),

    /// Anything the configured [`ColorParser`] understands
    Text(String),
}

impl ColorSpec {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        ColorSpec::Tuple(vec![r as f64, g as f64, b as f64])
    }

    /// Normalize to RGBA bytes.
    pub fn normalize(&self, parser: &dyn ColorParser) -> VizResult<Rgba> {
        match self {
            ColorSpec::Tuple(channels) => match channels.as_slice() {
                [r, g, b] => Ok([channel(*r), channel(*g), channel(*b), 255]),
                [r, g, b, a] => {
                    let alpha = if *a <= 1.0 { (a * 255.0).floor() } else { *a };
                    Ok([channel(*r), channel(*g), channel(*b), channel(alpha)])
                }
                other => Err(VizError::invalid_color(format!(
                    "expected 3 or 4 channels, got {}",
                    other.len()
                ))),
            },
            ColorSpec::Text(text) => parser
                .parse(text)
                .ok_or_else(|| VizError::invalid_color(text.clone())),
        }
    }
}

impl From<Rgba> for ColorSpec {
    fn from(c: Rgba) -> Self {
        ColorSpec::Tuple(c.iter().map(|v| *v as f64).collect())
    }
}

impl From<&str> for ColorSpec {
    fn from(s: &str) -> Self {
        ColorSpec::Text(s.to_string())
    }
}

fn channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Normalize a whole color sequence.
pub fn normalize_colors(specs: &[ColorSpec], parser: &dyn ColorParser) -> VizResult<Vec<Rgba>> {
    specs.iter().map(|spec| spec.normalize(parser)).collect()
}

/// Channel-wise linear interpolation, `t` clamped to [0, 1].
pub fn lerp(from: Rgba, to: Rgba, t: f64) -> Rgba {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| ((a as f64) * (1.0 - t) + (b as f64) * t).round() as u8;
    [
        mix(from[0], to[0]),
        mix(from[1], to[1]),
        mix(from[2], to[2]),
        mix(from[3], to[3]),
    ]
}

/// Converts color strings into RGBA.
pub trait ColorParser {
    fn parse(&self, text: &str) -> Option<Rgba>;
}

/// Parses `#rgb`, `#rrggbb`, `#rrggbbaa` and a few CSS color names.
#[derive(Debug, Clone, Copy, Default)]
pub struct HexColorParser;

impl ColorParser for HexColorParser {
    fn parse(&self, text: &str) -> Option<Rgba> {
        let text = text.trim();
        match text.strip_prefix('#') {
            Some(hex) => parse_hex(hex),
            None => named_color(text),
        }
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);

    match hex.len() {
        3 => Some([nibble(0)?, nibble(1)?, nibble(2)?, 255]),
        6 => Some([byte(0)?, byte(2)?, byte(4)?, 255]),
        8 => Some([byte(0)?, byte(2)?, byte(4)?, byte(6)?]),
        _ => None,
    }
}

fn named_color(name: &str) -> Option<Rgba> {
    let rgba = match name.to_lowercase().as_str() {
        "transparent" => [0, 0, 0, 0],
        "black" => [0, 0, 0, 255],
        "white" => [255, 255, 255, 255],
        "red" => [255, 0, 0, 255],
        "green" => [0, 128, 0, 255],
        "blue" => [0, 0, 255, 255],
        "yellow" => [255, 255, 0, 255],
        "orange" => [255, 165, 0, 255],
        "purple" => [128, 0, 128, 255],
        "gray" | "grey" => [128, 128, 128, 255],
        _ => return None,
    };
    Some(rgba)
}
