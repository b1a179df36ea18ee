//! Progress bar widget for displaying metrics

use hudkit_types::Color;

use crate::renderer::Renderer;
use crate::utils::color_to_skia;

/// A horizontal rounded progress bar
#[derive(Debug, Clone)]
pub struct ProgressBar {
    value: f64,
    max_value: f64,
    bg_color: Color,
    fill_color: Color,
    radius: f32,
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressBar {
    pub fn new() -> Self {
        Self {
            value: 0.0,
            max_value: 100.0,
            bg_color: Color::rgba(100, 100, 100, 100),
            fill_color: Color::rgb(0, 150, 255),
            radius: 8.0,
        }
    }

    /// Set the current value, clamped to `[0, max_value]`
    pub fn set_value(&mut self, value: f64) {
        self.value = value.clamp(0.0, self.max_value);
    }

    pub fn set_max_value(&mut self, max: f64) {
        self.max_value = max.max(f64::EPSILON);
        self.value = self.value.min(self.max_value);
    }

    pub fn set_colors(&mut self, background: Color, fill: Color) {
        self.bg_color = background;
        self.fill_color = fill;
    }

    pub fn set_rounded(&mut self, radius: f32) {
        self.radius = radius;
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Fraction of the bar that is filled
    pub fn progress(&self) -> f64 {
        self.value / self.max_value
    }

    /// Render into a pixel buffer at the given rectangle
    pub fn render(
        &self,
        renderer: &Renderer,
        buffer: &mut [u8],
        buf_width: u32,
        buf_height: u32,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) {
        renderer.fill_rounded_rect(
            buffer,
            buf_width,
            buf_height,
            x,
            y,
            width,
            height,
            self.radius,
            color_to_skia(self.bg_color),
        );

        let fill_width = width * self.progress() as f32;
        if fill_width > 0.0 {
            renderer.fill_rounded_rect(
                buffer,
                buf_width,
                buf_height,
                x,
                y,
                fill_width,
                height,
                self.radius,
                color_to_skia(self.fill_color),
            );
        }
    }
}
