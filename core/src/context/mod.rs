mod background_tasks;
mod config;
mod error;

pub use background_tasks::BackgroundTasks;
pub use config::{AppConfigExt, widget_config_path, widget_data_path};
pub use error::ConfigError;
