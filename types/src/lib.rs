//! Shared configuration types for HUDKIT
//!
//! This crate contains the serializable types that are shared between the
//! services layer (hudkit-core) and the widget engine (hudkit-overlay):
//! shapes, colors, screen anchors, visual effects, and the persisted
//! application configuration.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Geometry
// ─────────────────────────────────────────────────────────────────────────────

/// Silhouette of an overlay widget window.
///
/// The shape drives both the paint path and the pixel clip region, so the
/// rendered outline and the interactive area always match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Shape {
    /// Full window rectangle
    #[default]
    Rectangle,
    /// Rectangle with all four corners rounded by the widget's corner radius
    RoundedRect,
    /// Inscribed circle; forces the widget to equal width and height
    Circle,
    /// Full rectangle, but forces equal width and height
    Square,
}

impl Shape {
    /// Shapes that constrain the widget to equal width and height
    pub fn forces_square(&self) -> bool {
        matches!(self, Shape::Circle | Shape::Square)
    }
}

/// Preset screen placement for a widget, with a fixed 50 px edge margin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

// ─────────────────────────────────────────────────────────────────────────────
// Color
// ─────────────────────────────────────────────────────────────────────────────

/// RGBA color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: if hex.len() == 8 { channel(6)? } else { 255 },
        })
    }

    pub const fn with_alpha(mut self, a: u8) -> Self {
        self.a = a;
        self
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgba(0, 0, 0, 200)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Visual Effects
// ─────────────────────────────────────────────────────────────────────────────

/// Compositor-level visual effect applied to the whole widget window.
///
/// Declarative: the widget re-applies the current variant on every
/// appearance change instead of juggling an owned polymorphic effect object.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VisualEffect {
    #[default]
    None,
    /// Offset drop shadow for depth
    Shadow {
        blur: f32,
        color: Color,
        offset_x: f32,
        offset_y: f32,
    },
    /// Centered colored halo
    Glow { blur: f32, color: Color },
}

// ─────────────────────────────────────────────────────────────────────────────
// Widget Appearance
// ─────────────────────────────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}

fn default_opacity() -> f32 {
    1.0
}

fn default_border_color() -> Color {
    Color::rgba(255, 255, 255, 100)
}

/// Declarative appearance and behavior state for an overlay widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetAppearance {
    #[serde(default)]
    pub shape: Shape,
    #[serde(default)]
    pub corner_radius: f32,
    #[serde(default)]
    pub background: Color,
    #[serde(default = "default_border_color")]
    pub border_color: Color,
    #[serde(default)]
    pub border_width: f32,
    /// Window opacity in [0, 1]
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    #[serde(default = "default_true")]
    pub draggable: bool,
    #[serde(default)]
    pub click_through: bool,
    #[serde(default = "default_true")]
    pub always_on_top: bool,
    #[serde(default)]
    pub effect: VisualEffect,
}

impl Default for WidgetAppearance {
    fn default() -> Self {
        Self {
            shape: Shape::Rectangle,
            corner_radius: 0.0,
            background: Color::default(),
            border_color: default_border_color(),
            border_width: 0.0,
            opacity: 1.0,
            draggable: true,
            click_through: false,
            always_on_top: true,
            effect: VisualEffect::None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Service Settings
// ─────────────────────────────────────────────────────────────────────────────

fn default_sample_interval_secs() -> u64 {
    2
}

fn default_disk_mount() -> String {
    "/".to_string()
}

/// Settings for the system telemetry sampler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetrySettings {
    /// Seconds between refresh cycles
    #[serde(default = "default_sample_interval_secs")]
    pub interval_secs: u64,
    /// Mount point to report disk usage for
    #[serde(default = "default_disk_mount")]
    pub disk_mount: String,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            interval_secs: default_sample_interval_secs(),
            disk_mount: default_disk_mount(),
        }
    }
}

fn default_weather_interval_minutes() -> u64 {
    10
}

/// Settings for the remote weather client.
///
/// `api_key` and `city` must both be non-empty before a fetch is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeatherSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub city: String,
    /// Minutes between fetch ticks
    #[serde(default = "default_weather_interval_minutes")]
    pub update_interval_minutes: u64,
}

impl WeatherSettings {
    /// Both the credential and the location are required for a fetch
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.city.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Root persisted configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default appearance applied to newly created widgets
    #[serde(default)]
    pub appearance: WidgetAppearance,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
    #[serde(default)]
    pub weather: WeatherSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("#00AAFF"), Some(Color::rgb(0, 170, 255)));
        assert_eq!(Color::from_hex("00aaff"), Some(Color::rgb(0, 170, 255)));
        assert_eq!(
            Color::from_hex("#11223344"),
            Some(Color::rgba(17, 34, 51, 68))
        );
        assert_eq!(Color::from_hex("#123"), None);
        assert_eq!(Color::from_hex("#GGHHII"), None);
    }

    #[test]
    fn test_shape_constraints() {
        assert!(Shape::Circle.forces_square());
        assert!(Shape::Square.forces_square());
        assert!(!Shape::Rectangle.forces_square());
        assert!(!Shape::RoundedRect.forces_square());
    }

    #[test]
    fn test_weather_settings_configured() {
        let mut settings = WeatherSettings::default();
        assert!(!settings.is_configured());
        settings.api_key = "key".to_string();
        assert!(!settings.is_configured());
        settings.city = "Berlin".to_string();
        assert!(settings.is_configured());
    }
}
