use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::{Result, bail};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use svg::node::element::{Rectangle, Text};

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgDrawOptions {
    ///The theme to use for the svg
    #[serde(default)]
    pub theme: SvgLayoutTheme,
    ///Longest side of the drawn stand, in pixels
    #[serde(default = "default_canvas_px")]
    pub canvas_px: f64,
    ///Upper bound on the scale, in pixels per meter
    #[serde(default = "default_max_scale")]
    pub max_scale: f64,
    ///Blank space around the stand, in pixels
    #[serde(default = "default_margin_px")]
    pub margin_px: f64,
    ///Zones smaller than this (in pixels) are drawn without a label
    #[serde(default = "default_min_label_size")]
    pub min_label_size: (f64, f64),
    ///Draw a color legend of the zone kinds below the stand
    #[serde(default = "default_true")]
    pub legend: bool,
    ///Annotate the stand frontage and depth
    #[serde(default = "default_true")]
    pub dimensions: bool,
}

impl SvgDrawOptions {
    /// Pixels per meter for a stand of the given size
    pub fn scale(&self, width: f64, depth: f64) -> f64 {
        f64::min(self.canvas_px / f64::max(width, depth), self.max_scale)
    }
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgLayoutTheme::default(),
            canvas_px: default_canvas_px(),
            max_scale: default_max_scale(),
            margin_px: default_margin_px(),
            min_label_size: default_min_label_size(),
            legend: true,
            dimensions: true,
        }
    }
}

fn default_canvas_px() -> f64 {
    600.0
}

fn default_max_scale() -> f64 {
    50.0
}

fn default_margin_px() -> f64 {
    50.0
}

fn default_min_label_size() -> (f64, f64) {
    (40.0, 25.0)
}

fn default_true() -> bool {
    true
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgLayoutTheme {
    pub stroke_width: f32,
    pub background_fill: Color,
    pub stand_fill: Color,
    pub stand_stroke: Color,
    pub zone_stroke: Color,
    pub zone_opacity: f32,
    pub circulation_opacity: f32,
    pub entrance_color: Color,
    pub text_color: Color,
}

impl Default for SvgLayoutTheme {
    fn default() -> Self {
        SvgLayoutTheme::BLUEPRINT
    }
}

impl SvgLayoutTheme {
    pub const BLUEPRINT: SvgLayoutTheme = SvgLayoutTheme {
        stroke_width: 1.5,
        background_fill: Color(0xF8, 0xF9, 0xFA),
        stand_fill: Color(0xFF, 0xFF, 0xFF),
        stand_stroke: Color(0x21, 0x21, 0x21),
        zone_stroke: Color(0x33, 0x33, 0x33),
        zone_opacity: 0.7,
        circulation_opacity: 0.3,
        entrance_color: Color(0xFF, 0x57, 0x22),
        text_color: Color(0x21, 0x21, 0x21),
    };
}

pub fn change_brightness(color: Color, fraction: f32) -> Color {
    let Color(r, g, b) = color;

    let r = (r as f32 * fraction).min(255.0) as u8;
    let g = (g as f32 * fraction).min(255.0) as u8;
    let b = (b as f32 * fraction).min(255.0) as u8;
    Color(r, g, b)
}

/// RGB color, written as `#RRGGBB`
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Color(pub u8, pub u8, pub u8);

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            bail!("invalid color: {s:?}, expected #RRGGBB");
        }
        let r = u8::from_str_radix(&hex[0..2], 16)?;
        let g = u8::from_str_radix(&hex[2..4], 16)?;
        let b = u8::from_str_radix(&hex[4..6], 16)?;
        Ok(Color(r, g, b))
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<<S as Serializer>::Ok, <S as Serializer>::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{self}"))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as Deserializer<'de>>::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::from_str(&s).map_err(serde::de::Error::custom)
    }
}

pub fn rect(x: f64, y: f64, width: f64, height: f64, params: &[(&str, &str)]) -> Rectangle {
    let mut rect = Rectangle::new()
        .set("x", x)
        .set("y", y)
        .set("width", width)
        .set("height", height);
    for param in params {
        rect = rect.set(param.0, param.1)
    }
    rect
}

pub fn text(content: impl Into<String>, x: f64, y: f64, params: &[(&str, &str)]) -> Text {
    let mut text = Text::new(content.into()).set("x", x).set("y", y);
    for param in params {
        text = text.set(param.0, param.1)
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_hex_round_trip() {
        let c = Color::from_str("#e3f2fd").unwrap();
        assert_eq!(c, Color(0xE3, 0xF2, 0xFD));
        assert_eq!(c.to_string(), "#E3F2FD");
        assert!(Color::from_str("#12345").is_err());
        assert!(Color::from_str("#GG0000").is_err());
    }

    #[test]
    fn scale_is_adaptive_and_capped() {
        let options = SvgDrawOptions::default();
        assert_eq!(options.scale(20.0, 10.0), 30.0);
        assert_eq!(options.scale(11.0, 8.0), 50.0);
        assert_eq!(options.scale(6.0, 4.0), 50.0);
    }

    #[test]
    fn darker_color() {
        assert_eq!(
            change_brightness(Color(0xEE, 0xEE, 0xEE), 0.5),
            Color(0x77, 0x77, 0x77)
        );
    }
}
