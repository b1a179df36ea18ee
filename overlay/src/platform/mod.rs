//! Host toolkit boundary
//!
//! The widget engine does not create windows, composite, or deliver input
//! itself; it drives a `WindowHost` that the embedding environment
//! provides. The in-tree `HeadlessHost` backend records every call and
//! backs the tests and the demo binary; real compositor backends live
//! behind the same trait.

pub mod headless;

pub use headless::HeadlessHost;

use hudkit_types::VisualEffect;

use crate::mask::ClipRegion;

/// Size constraints for overlay widgets
pub const MIN_WIDGET_SIZE: u32 = 16;
pub const MAX_WIDGET_WIDTH: u32 = 1280;
pub const MAX_WIDGET_HEIGHT: u32 = 1024;

/// Pointer button identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Pointer input delivered by the host, with global screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press {
        button: PointerButton,
        x: i32,
        y: i32,
    },
    Move {
        /// Whether the primary button is held during this motion
        primary_held: bool,
        x: i32,
        y: i32,
    },
    Release {
        button: PointerButton,
    },
}

/// Window surface provided by the host toolkit.
///
/// One host per widget. All methods are cheap state mutations; `commit`
/// presents the pixel buffer to the compositor.
pub trait WindowHost {
    /// Whether the window has a live drawing surface. Animations are a
    /// silent no-op on a detached host.
    fn is_attached(&self) -> bool;

    fn is_visible(&self) -> bool;
    fn show(&mut self);
    fn hide(&mut self);

    fn position(&self) -> (i32, i32);
    fn set_position(&mut self, x: i32, y: i32);

    fn size(&self) -> (u32, u32);
    fn set_size(&mut self, width: u32, height: u32);

    fn set_always_on_top(&mut self, enabled: bool);
    fn set_click_through(&mut self, enabled: bool);

    /// Whole-window opacity in [0, 1]; the fade animation target
    fn set_window_opacity(&mut self, opacity: f32);

    /// Restrict visibility and input to the region
    fn apply_clip(&mut self, region: &ClipRegion);

    /// Apply the declarative shadow/glow effect (or clear it)
    fn set_effect(&mut self, effect: &VisualEffect);

    fn raise(&mut self);
    fn lower(&mut self);

    /// Total screen dimensions, for anchor placement
    fn screen_size(&self) -> (u32, u32);

    /// Mutable RGBA pixel buffer for the current frame, when ready
    fn pixel_buffer(&mut self) -> Option<&mut [u8]>;

    /// Present the pixel buffer
    fn commit(&mut self);
}
