//! HUDKIT Overlay Library
//!
//! Frameless, arbitrarily-shaped, always-on-top overlay widgets.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    widget                           │
//! │   OverlayWidget (shape + drag + show/hide + paint)  │
//! ├──────────────────────────┬──────────────────────────┤
//! │          mask            │        animation         │
//! │   ClipRegion geometry    │   named tween registry   │
//! ├──────────────────────────┴──────────────────────────┤
//! │                    renderer                         │
//! │           tiny-skia drawing primitives              │
//! ├─────────────────────────────────────────────────────┤
//! │                    platform/                        │
//! │      WindowHost boundary + headless backend         │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod animation;
pub mod mask;
pub mod platform;
pub mod renderer;
pub mod utils;
pub mod widget;
pub mod widgets;

// Re-export commonly used types
pub use animation::{AnimationManager, AnimationSpec, Easing, Finish, Property};
pub use mask::ClipRegion;
pub use platform::{HeadlessHost, PointerButton, PointerEvent, WindowHost};
pub use renderer::Renderer;
pub use widget::OverlayWidget;
pub use widgets::ProgressBar;

// Re-export the shared appearance types for external use
pub use hudkit_types::{Anchor, Color, Shape, VisualEffect, WidgetAppearance};
