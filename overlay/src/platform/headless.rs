//! Headless window backend
//!
//! Implements `WindowHost` over an in-memory buffer. Used by the test
//! suite and the demo binary; also handy as a template when writing a
//! real compositor backend.

use hudkit_types::VisualEffect;

use super::WindowHost;
use crate::mask::ClipRegion;

/// In-memory window that records host interactions
pub struct HeadlessHost {
    attached: bool,
    visible: bool,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    always_on_top: bool,
    click_through: bool,
    opacity: f32,
    effect: VisualEffect,
    buffer: Vec<u8>,
    screen: (u32, u32),

    // interaction counters, observed by tests
    pub show_calls: usize,
    pub hide_calls: usize,
    pub commit_calls: usize,
    pub clip_applications: usize,
    pub raise_calls: usize,
    pub lower_calls: usize,
    /// Size of the most recently applied clip region
    pub last_clip_size: Option<(u32, u32)>,
}

impl HeadlessHost {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            attached: true,
            visible: false,
            x: 0,
            y: 0,
            width,
            height,
            always_on_top: false,
            click_through: false,
            opacity: 1.0,
            effect: VisualEffect::None,
            buffer: vec![0; (width * height * 4) as usize],
            screen: (1920, 1080),
            show_calls: 0,
            hide_calls: 0,
            commit_calls: 0,
            clip_applications: 0,
            raise_calls: 0,
            lower_calls: 0,
            last_clip_size: None,
        }
    }

    /// Simulate losing the drawing surface
    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn window_opacity(&self) -> f32 {
        self.opacity
    }

    pub fn always_on_top(&self) -> bool {
        self.always_on_top
    }

    pub fn click_through(&self) -> bool {
        self.click_through
    }

    pub fn effect(&self) -> VisualEffect {
        self.effect
    }
}

impl WindowHost for HeadlessHost {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn show(&mut self) {
        self.visible = true;
        self.show_calls += 1;
    }

    fn hide(&mut self) {
        self.visible = false;
        self.hide_calls += 1;
    }

    fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.buffer.resize((width * height * 4) as usize, 0);
    }

    fn set_always_on_top(&mut self, enabled: bool) {
        self.always_on_top = enabled;
    }

    fn set_click_through(&mut self, enabled: bool) {
        self.click_through = enabled;
    }

    fn set_window_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    fn apply_clip(&mut self, region: &ClipRegion) {
        self.clip_applications += 1;
        self.last_clip_size = Some(region.size());
    }

    fn set_effect(&mut self, effect: &VisualEffect) {
        self.effect = *effect;
    }

    fn raise(&mut self) {
        self.raise_calls += 1;
    }

    fn lower(&mut self) {
        self.lower_calls += 1;
    }

    fn screen_size(&self) -> (u32, u32) {
        self.screen
    }

    fn pixel_buffer(&mut self) -> Option<&mut [u8]> {
        Some(&mut self.buffer)
    }

    fn commit(&mut self) {
        self.commit_calls += 1;
    }
}
