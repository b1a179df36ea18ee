//! Demo overlay application
//!
//! Wires a system-monitor HUD and a weather card against the headless
//! backend: the services poll real (or synthetic) telemetry while the
//! widgets animate, reposition, and repaint. In production the same
//! widgets run on a real compositor backend behind `WindowHost`.

use std::time::Instant;

use hudkit_core::{AppConfig, AppConfigExt, Services};
use hudkit_overlay::{
    Anchor, Color, HeadlessHost, OverlayWidget, ProgressBar, Renderer, Shape, WidgetAppearance,
    WindowHost,
};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

#[tokio::main]
async fn main() {
    init_logging();

    let config = AppConfig::load();
    let mut services = Services::start(&config);
    if !config.weather.is_configured() {
        tracing::info!("weather not configured; the card will show sentinel values");
    }

    // System monitor HUD, top-left
    let appearance = WidgetAppearance {
        corner_radius: 14.0,
        background: Color::rgba(10, 12, 20, 210),
        border_color: Color::rgba(255, 255, 255, 60),
        border_width: 1.0,
        ..config.appearance.clone()
    };
    let mut hud = OverlayWidget::new(HeadlessHost::new(280, 200), &appearance, 280, 200);
    hud.set_rounded(14.0);
    hud.set_anchor(Anchor::TopLeft);
    hud.show();

    // Weather card, top-right, circular for variety
    let mut card = OverlayWidget::new(HeadlessHost::new(160, 160), &appearance, 160, 160);
    card.set_shape(Shape::Circle);
    card.set_glass(true);
    card.set_anchor(Anchor::TopRight);
    card.show();
    card.show(); // re-show fades in now that the card is initialized

    let renderer = Renderer::new();
    let mut cpu_bar = ProgressBar::new();
    let mut updates = services.telemetry.subscribe();

    for _ in 0..5 {
        if updates.changed().await.is_err() {
            break;
        }
        let now = Instant::now();
        let snapshot = services.telemetry.snapshot();

        hud.advance_animations(now);
        card.advance_animations(now);

        hud.render();
        cpu_bar.set_value(snapshot.cpu_percent);
        let (width, height) = (hud.width(), hud.height());
        if let Some(buffer) = hud.host_mut().pixel_buffer() {
            cpu_bar.render(&renderer, buffer, width, height, 16.0, 150.0, 248.0, 18.0);
        }
        hud.host_mut().commit();
        card.render();

        let cpu = format!("{:.1}%", snapshot.cpu_percent);
        let memory = format!(
            "{} / {}",
            services.telemetry.memory_used_text(),
            services.telemetry.memory_total_text()
        );
        tracing::info!(
            cpu = %cpu,
            memory = %memory,
            uptime = %services.telemetry.uptime_text(),
            processes = snapshot.process_count,
            weather = %services.weather.temperature_text(),
            condition = %services.weather.condition(),
            "refresh"
        );
    }

    services.shutdown();
}
