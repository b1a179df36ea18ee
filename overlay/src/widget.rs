//! The overlay widget
//!
//! Composes the mask geometry, the animation registry, and a `WindowHost`
//! into a draggable, shaped, animated always-on-top panel. All state is
//! owned here and mutated only through these methods; timer and network
//! callbacks never touch a widget directly.

use std::time::{Duration, Instant};

use hudkit_types::{Anchor, Color, Shape, VisualEffect, WidgetAppearance};

use crate::animation::{AnimationManager, AnimationSpec, Finish, Property};
use crate::mask::ClipRegion;
use crate::platform::{
    MAX_WIDGET_HEIGHT, MAX_WIDGET_WIDTH, MIN_WIDGET_SIZE, PointerButton, PointerEvent, WindowHost,
};
use crate::renderer::Renderer;
use crate::utils::{anchor_position, color_to_skia};

/// Default entrance/exit fade length
const FADE_DURATION: Duration = Duration::from_millis(200);
const BOUNCE_DURATION: Duration = Duration::from_millis(500);

/// Animation slot names; fades share one slot so they supersede each other
const FADE_SLOT: &str = "fade";
const BOUNCE_SLOT: &str = "bounce";

/// A frameless, shaped, always-on-top overlay panel
pub struct OverlayWidget<H: WindowHost> {
    host: H,
    shape: Shape,
    corner_radius: f32,
    background: Color,
    border_color: Color,
    border_width: f32,
    opacity: f32,
    effect: VisualEffect,
    draggable: bool,
    click_through: bool,
    always_on_top: bool,
    /// Set by the first successful show; gates entrance/exit animations
    initialized: bool,
    clip: Option<ClipRegion>,
    animations: AnimationManager,
    renderer: Renderer,
    /// Pointer-to-origin offset while a drag is in progress
    drag_offset: Option<(i32, i32)>,
    /// Committed logical size; the scale pulse works around this
    base_size: (u32, u32),
    needs_repaint: bool,
}

impl<H: WindowHost> OverlayWidget<H> {
    pub fn new(host: H, appearance: &WidgetAppearance, width: u32, height: u32) -> Self {
        let mut widget = Self {
            host,
            shape: appearance.shape,
            corner_radius: appearance.corner_radius,
            background: appearance.background,
            border_color: appearance.border_color,
            border_width: appearance.border_width,
            opacity: appearance.opacity.clamp(0.0, 1.0),
            effect: appearance.effect,
            draggable: appearance.draggable,
            click_through: appearance.click_through,
            always_on_top: appearance.always_on_top,
            initialized: false,
            clip: None,
            animations: AnimationManager::new(),
            renderer: Renderer::new(),
            drag_offset: None,
            base_size: (0, 0),
            needs_repaint: true,
        };

        widget.apply_size(width, height);
        widget.host.set_click_through(widget.click_through);
        widget.host.set_always_on_top(widget.always_on_top);
        widget.host.set_window_opacity(widget.opacity);
        widget.host.set_effect(&widget.effect);
        widget
    }

    // ─── Geometry ────────────────────────────────────────────────────────────

    /// Clamp, honor square-shape constraints, resize the host, and rebuild
    /// the clip before anything can paint against the new size
    fn apply_size(&mut self, width: u32, height: u32) {
        let mut width = width.clamp(MIN_WIDGET_SIZE, MAX_WIDGET_WIDTH);
        let mut height = height.clamp(MIN_WIDGET_SIZE, MAX_WIDGET_HEIGHT);
        if self.shape.forces_square() {
            let side = width.min(height);
            width = side;
            height = side;
        }
        self.base_size = (width, height);
        self.host.set_size(width, height);
        self.refresh_clip();
    }

    /// Recompute the clip for the host's current size and re-apply it
    fn refresh_clip(&mut self) {
        let (width, height) = self.host.size();
        self.clip = ClipRegion::compute(self.shape, width, height, self.corner_radius);
        if let Some(clip) = &self.clip {
            self.host.apply_clip(clip);
        }
        self.needs_repaint = true;
    }

    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
        let (width, height) = self.base_size;
        self.apply_size(width, height);
    }

    /// Switch to a rounded rectangle with the given corner radius
    pub fn set_rounded(&mut self, radius: f32) {
        self.shape = Shape::RoundedRect;
        self.corner_radius = radius;
        self.refresh_clip();
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.apply_size(width, height);
    }

    // ─── Appearance ──────────────────────────────────────────────────────────

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
        self.needs_repaint = true;
    }

    pub fn set_background_rgba(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.set_background(Color::rgba(r, g, b, a));
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
        self.host.set_window_opacity(self.opacity);
    }

    pub fn set_border(&mut self, color: Color, width: f32) {
        self.border_color = color;
        self.border_width = width;
        self.needs_repaint = true;
    }

    pub fn remove_border(&mut self) {
        self.border_width = 0.0;
        self.needs_repaint = true;
    }

    /// Glass look: a highly translucent background plus a soft drop shadow
    pub fn set_glass(&mut self, enabled: bool) {
        if enabled {
            if self.background.a > 100 {
                self.background.a = 80;
            }
            self.effect = VisualEffect::Shadow {
                blur: 15.0,
                color: Color::rgba(0, 0, 0, 60),
                offset_x: 0.0,
                offset_y: 3.0,
            };
        } else {
            self.effect = VisualEffect::None;
        }
        self.host.set_effect(&self.effect);
        self.needs_repaint = true;
    }

    /// Centered colored halo around the silhouette
    pub fn set_glow(&mut self, color: Color, intensity: i32) {
        self.effect = VisualEffect::Glow {
            blur: (intensity * 2).clamp(5, 30) as f32,
            color,
        };
        self.host.set_effect(&self.effect);
    }

    pub fn set_effect(&mut self, effect: VisualEffect) {
        self.effect = effect;
        self.host.set_effect(&self.effect);
    }

    // ─── Placement ───────────────────────────────────────────────────────────

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.host.set_position(x, y);
    }

    pub fn set_anchor(&mut self, anchor: Anchor) {
        let (x, y) = anchor_position(anchor, self.host.size(), self.host.screen_size());
        self.host.set_position(x, y);
    }

    pub fn center(&mut self) {
        self.set_anchor(Anchor::Center);
    }

    pub fn to_front(&mut self) {
        self.host.raise();
    }

    pub fn to_back(&mut self) {
        self.host.lower();
    }

    // ─── Behavior ────────────────────────────────────────────────────────────

    pub fn set_draggable(&mut self, draggable: bool) {
        self.draggable = draggable;
    }

    pub fn set_click_through(&mut self, enabled: bool) {
        self.click_through = enabled;
        self.host.set_click_through(enabled);
    }

    pub fn set_always_on_top(&mut self, enabled: bool) {
        self.always_on_top = enabled;
        self.host.set_always_on_top(enabled);
        // a live window is not guaranteed to pick up the flag change;
        // re-present it to force the host to re-evaluate
        if self.host.is_visible() {
            self.host.show();
        }
    }

    // ─── Show / Hide ─────────────────────────────────────────────────────────

    pub fn show(&mut self) {
        self.host.show();
        if self.initialized {
            self.fade_in(FADE_DURATION);
        }
        // the first show completes initialization without an entrance
        // animation: there is no committed prior opacity to ramp from
        self.initialized = true;
    }

    pub fn hide(&mut self) {
        if self.initialized && self.can_animate() {
            self.fade_out(FADE_DURATION);
        } else {
            self.host.hide();
        }
    }

    // ─── Animations ──────────────────────────────────────────────────────────

    /// A widget must be initialized, attached, and visible to animate;
    /// anything else is a benign startup race and a silent no-op
    fn can_animate(&self) -> bool {
        self.initialized && self.host.is_attached() && self.host.is_visible()
    }

    pub fn fade_in(&mut self, duration: Duration) {
        if !self.can_animate() {
            return;
        }
        self.animations.start(
            Instant::now(),
            FADE_SLOT,
            AnimationSpec::fade(0.0, self.opacity, duration),
        );
    }

    /// Fade to transparent, then hide the window once the slot has retired
    pub fn fade_out(&mut self, duration: Duration) {
        if !self.can_animate() {
            return;
        }
        self.animations.start(
            Instant::now(),
            FADE_SLOT,
            AnimationSpec::fade(self.opacity, 0.0, duration).with_finish(Finish::Hide),
        );
    }

    /// Scale pulse: rest size → 105% at the midpoint → rest size
    pub fn bounce(&mut self) {
        if !self.can_animate() {
            return;
        }
        self.animations
            .start(Instant::now(), BOUNCE_SLOT, AnimationSpec::bounce(BOUNCE_DURATION));
    }

    /// Drive all running animations to `now`, applying property updates
    /// and any completion effects. Called from the host loop.
    pub fn advance_animations(&mut self, now: Instant) {
        for update in self.animations.advance(now) {
            match update.property {
                Property::Opacity => self.host.set_window_opacity(update.value),
                Property::Scale => self.apply_scale(update.value),
            }
            if update.completed && update.finish == Finish::Hide {
                self.host.hide();
            }
        }
    }

    /// Resize around the widget center while a scale pulse runs, keeping
    /// the clip in sync with every intermediate size
    fn apply_scale(&mut self, scale: f32) {
        let (base_w, base_h) = self.base_size;
        let width = ((base_w as f32 * scale).round() as u32).max(MIN_WIDGET_SIZE);
        let height = ((base_h as f32 * scale).round() as u32).max(MIN_WIDGET_SIZE);

        let (current_w, current_h) = self.host.size();
        let (x, y) = self.host.position();
        let dx = (current_w as i32 - width as i32) / 2;
        let dy = (current_h as i32 - height as i32) / 2;

        self.host.set_position(x + dx, y + dy);
        self.host.set_size(width, height);
        self.refresh_clip();
    }

    // ─── Input ───────────────────────────────────────────────────────────────

    /// Pointer handling: primary-press inside the silhouette starts a
    /// drag; motion with the button held repositions the window so the
    /// grab offset is preserved; release drops all drag state.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Press {
                button: PointerButton::Primary,
                x,
                y,
            } if self.draggable => {
                let (wx, wy) = self.host.position();
                let (local_x, local_y) = ((x - wx) as f32, (y - wy) as f32);
                if self
                    .clip
                    .as_ref()
                    .is_some_and(|clip| clip.contains(local_x, local_y))
                {
                    self.drag_offset = Some((x - wx, y - wy));
                }
            }
            PointerEvent::Move {
                primary_held: true,
                x,
                y,
            } => {
                if let Some((ox, oy)) = self.drag_offset {
                    self.host.set_position(x - ox, y - oy);
                }
            }
            PointerEvent::Release {
                button: PointerButton::Primary,
            } => {
                self.drag_offset = None;
            }
            _ => {}
        }
    }

    // ─── Painting ────────────────────────────────────────────────────────────

    /// Paint the silhouette: fill the mask path, then stroke the same
    /// path for the border, and commit the frame
    pub fn render(&mut self) {
        let (width, height) = self.host.size();
        let Some(clip) = &self.clip else { return };
        let path = clip.path().clone();

        let background = color_to_skia(self.background);
        let border = color_to_skia(self.border_color);
        let border_width = self.border_width;

        let Some(buffer) = self.host.pixel_buffer() else {
            return;
        };
        self.renderer
            .clear(buffer, width, height, tiny_skia::Color::TRANSPARENT);
        self.renderer.fill_path(buffer, width, height, &path, background);
        if border_width > 0.0 {
            self.renderer
                .stroke_path(buffer, width, height, &path, border_width, border);
        }

        self.host.commit();
        self.needs_repaint = false;
    }

    // ─── Accessors ───────────────────────────────────────────────────────────

    pub fn width(&self) -> u32 {
        self.host.size().0
    }

    pub fn height(&self) -> u32 {
        self.host.size().1
    }

    pub fn position(&self) -> (i32, i32) {
        self.host.position()
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_visible(&self) -> bool {
        self.host.is_visible()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    pub fn clip(&self) -> Option<&ClipRegion> {
        self.clip.as_ref()
    }

    pub fn animations(&self) -> &AnimationManager {
        &self.animations
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: WindowHost> Drop for OverlayWidget<H> {
    fn drop(&mut self) {
        // animations go first; nothing may fire during the rest of teardown
        self.animations.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessHost;

    fn widget(width: u32, height: u32) -> OverlayWidget<HeadlessHost> {
        OverlayWidget::new(
            HeadlessHost::new(width, height),
            &WidgetAppearance::default(),
            width,
            height,
        )
    }

    #[test]
    fn test_first_show_skips_entrance_animation() {
        let mut w = widget(200, 100);
        assert!(!w.is_initialized());

        w.show();
        assert!(w.is_visible());
        assert!(w.is_initialized());
        assert_eq!(w.animations().running_count(), 0);
    }

    #[test]
    fn test_subsequent_show_fades_in() {
        let mut w = widget(200, 100);
        w.show();
        w.show();
        assert!(w.animations().is_running("fade"));
        assert_eq!(w.animations().running_count(), 1);
    }

    #[test]
    fn test_hide_before_first_show_is_immediate() {
        let mut w = widget(200, 100);
        w.hide();
        assert!(!w.is_visible());
        assert_eq!(w.animations().running_count(), 0);
    }

    #[test]
    fn test_show_then_hide_ends_hidden_with_single_fade() {
        let mut w = widget(200, 100);
        w.show();
        w.hide();

        // only one pending animation under the fade name
        assert_eq!(w.animations().running_count(), 1);
        assert!(w.animations().is_running("fade"));

        w.advance_animations(Instant::now() + Duration::from_millis(300));
        assert!(!w.is_visible());
        assert_eq!(w.animations().running_count(), 0);
    }

    #[test]
    fn test_circle_forces_equal_sides() {
        let mut w = widget(200, 100);
        w.set_shape(Shape::Circle);
        assert_eq!((w.width(), w.height()), (100, 100));

        // resizing while the circle is active keeps the sides equal
        w.set_size(120, 80);
        assert_eq!((w.width(), w.height()), (80, 80));

        w.set_shape(Shape::Rectangle);
        w.set_size(120, 80);
        assert_eq!((w.width(), w.height()), (120, 80));
    }

    #[test]
    fn test_resize_recomputes_clip_before_paint() {
        let mut w = widget(200, 100);
        let applications = w.host().clip_applications;

        w.set_size(160, 90);
        assert!(w.host().clip_applications > applications);
        assert_eq!(w.host().last_clip_size, Some((160, 90)));
        assert_eq!(w.clip().unwrap().size(), (160, 90));
        assert!(w.needs_repaint());
    }

    #[test]
    fn test_drag_preserves_grab_offset() {
        let mut w = widget(200, 100);
        w.set_position(100, 50);

        w.handle_pointer(PointerEvent::Press {
            button: PointerButton::Primary,
            x: 110,
            y: 60,
        });
        w.handle_pointer(PointerEvent::Move {
            primary_held: true,
            x: 210,
            y: 160,
        });
        assert_eq!(w.position(), (200, 150));

        w.handle_pointer(PointerEvent::Release {
            button: PointerButton::Primary,
        });
        w.handle_pointer(PointerEvent::Move {
            primary_held: true,
            x: 400,
            y: 400,
        });
        // no drag state survives the release
        assert_eq!(w.position(), (200, 150));
    }

    #[test]
    fn test_press_outside_silhouette_does_not_drag() {
        let mut w = widget(100, 100);
        w.set_shape(Shape::Circle);
        w.set_position(0, 0);

        // the corner is outside the inscribed circle
        w.handle_pointer(PointerEvent::Press {
            button: PointerButton::Primary,
            x: 2,
            y: 2,
        });
        w.handle_pointer(PointerEvent::Move {
            primary_held: true,
            x: 50,
            y: 50,
        });
        assert_eq!(w.position(), (0, 0));
    }

    #[test]
    fn test_non_draggable_ignores_press() {
        let mut w = widget(200, 100);
        w.set_draggable(false);
        w.handle_pointer(PointerEvent::Press {
            button: PointerButton::Primary,
            x: 10,
            y: 10,
        });
        w.handle_pointer(PointerEvent::Move {
            primary_held: true,
            x: 60,
            y: 60,
        });
        assert_eq!(w.position(), (0, 0));
    }

    #[test]
    fn test_always_on_top_reshows_live_window() {
        let mut w = widget(200, 100);
        w.show();
        let shows = w.host().show_calls;

        w.set_always_on_top(false);
        assert!(!w.host().always_on_top());
        assert_eq!(w.host().show_calls, shows + 1);

        // a hidden window is not re-presented
        w.host_mut().hide();
        w.set_always_on_top(true);
        assert_eq!(w.host().show_calls, shows + 1);
    }

    #[test]
    fn test_animation_on_detached_host_is_noop() {
        let mut w = widget(200, 100);
        w.show();
        w.host_mut().detach();

        w.fade_in(Duration::from_millis(200));
        w.bounce();
        assert_eq!(w.animations().running_count(), 0);
    }

    #[test]
    fn test_bounce_scales_around_center_and_returns() {
        let mut w = widget(200, 100);
        w.set_position(100, 100);
        w.show();
        w.bounce();

        let start = Instant::now();
        w.advance_animations(start + Duration::from_millis(250));
        assert!(w.width() > 200);
        // the clip always matches the intermediate size
        assert_eq!(w.clip().unwrap().size(), (w.width(), w.height()));

        w.advance_animations(start + Duration::from_millis(700));
        assert_eq!((w.width(), w.height()), (200, 100));
        assert_eq!(w.position(), (100, 100));
        assert_eq!(w.animations().running_count(), 0);
    }

    #[test]
    fn test_fade_drives_host_opacity() {
        let mut w = widget(200, 100);
        w.show();
        w.show(); // second show starts the fade-in

        w.advance_animations(Instant::now() + Duration::from_millis(300));
        assert!((w.host().window_opacity() - 1.0).abs() < 1e-5);
        assert!(w.is_visible());
    }

    #[test]
    fn test_set_opacity_clamps() {
        let mut w = widget(200, 100);
        w.set_opacity(1.5);
        assert_eq!(w.opacity(), 1.0);
        w.set_opacity(-0.5);
        assert_eq!(w.opacity(), 0.0);
    }

    #[test]
    fn test_glass_thins_background_and_sets_shadow() {
        let mut w = widget(200, 100);
        w.set_background_rgba(0, 0, 0, 200);
        w.set_glass(true);

        assert!(matches!(w.host().effect(), VisualEffect::Shadow { .. }));
        w.render();
        assert_eq!(w.host().commit_calls, 1);
    }

    #[test]
    fn test_render_commits_frame() {
        let mut w = widget(200, 100);
        w.set_border(Color::rgb(255, 255, 255), 2.0);
        w.render();
        assert_eq!(w.host().commit_calls, 1);
        assert!(!w.needs_repaint());
    }

    #[test]
    fn test_anchor_placement() {
        let mut w = widget(200, 100);
        w.set_anchor(Anchor::TopRight);
        assert_eq!(w.position(), (1920 - 200 - 50, 50));
        w.center();
        assert_eq!(w.position(), (860, 490));
    }
}
