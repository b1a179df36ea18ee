pub mod context;
pub mod services;
pub mod telemetry;
pub mod weather;

// Re-exports for convenience
pub use context::{AppConfigExt, BackgroundTasks, ConfigError, widget_config_path, widget_data_path};
pub use hudkit_types::{
    AppConfig, TelemetrySettings, WeatherSettings, WidgetAppearance,
};
pub use services::Services;
pub use telemetry::{SystemSampler, TelemetrySnapshot};
pub use weather::{WeatherClient, WeatherError, WeatherEvent, WeatherReport};
