//! Common utility functions for overlay rendering

use hudkit_types::{Anchor, Color};

/// Margin kept between an anchored widget and the screen edge
const ANCHOR_MARGIN: i32 = 50;

/// Convert a shared RGBA color to a tiny_skia Color
#[inline]
pub fn color_to_skia(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

/// Top-left position that places a widget at the given screen anchor
pub fn anchor_position(anchor: Anchor, widget: (u32, u32), screen: (u32, u32)) -> (i32, i32) {
    let (w, h) = (widget.0 as i32, widget.1 as i32);
    let (sw, sh) = (screen.0 as i32, screen.1 as i32);
    let center_x = sw / 2 - w / 2;
    let center_y = sh / 2 - h / 2;

    match anchor {
        Anchor::TopLeft => (ANCHOR_MARGIN, ANCHOR_MARGIN),
        Anchor::TopCenter => (center_x, ANCHOR_MARGIN),
        Anchor::TopRight => (sw - w - ANCHOR_MARGIN, ANCHOR_MARGIN),
        Anchor::CenterLeft => (ANCHOR_MARGIN, center_y),
        Anchor::Center => (center_x, center_y),
        Anchor::CenterRight => (sw - w - ANCHOR_MARGIN, center_y),
        Anchor::BottomLeft => (ANCHOR_MARGIN, sh - h - ANCHOR_MARGIN),
        Anchor::BottomCenter => (center_x, sh - h - ANCHOR_MARGIN),
        Anchor::BottomRight => (sw - w - ANCHOR_MARGIN, sh - h - ANCHOR_MARGIN),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_position() {
        let widget = (200, 100);
        let screen = (1920, 1080);

        assert_eq!(anchor_position(Anchor::TopLeft, widget, screen), (50, 50));
        assert_eq!(
            anchor_position(Anchor::BottomRight, widget, screen),
            (1670, 930)
        );
        assert_eq!(anchor_position(Anchor::Center, widget, screen), (860, 490));
        assert_eq!(
            anchor_position(Anchor::TopCenter, widget, screen),
            (860, 50)
        );
    }

    #[test]
    fn test_color_to_skia() {
        let skia = color_to_skia(Color::rgba(255, 128, 0, 255));
        assert_eq!(skia.to_color_u8().red(), 255);
        assert_eq!(skia.to_color_u8().green(), 128);
        assert_eq!(skia.to_color_u8().alpha(), 255);
    }
}
