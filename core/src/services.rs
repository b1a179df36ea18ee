//! Process-scoped services
//!
//! The telemetry sampler and weather client live for the whole process but
//! are owned by an explicit `Services` context rather than static
//! singletons, so teardown is a normal method call and tests can run any
//! number of instances side by side.

use std::sync::Arc;

use hudkit_types::AppConfig;

use crate::context::BackgroundTasks;
use crate::telemetry::SystemSampler;
use crate::weather::WeatherClient;

/// Top-level owner of the long-lived data services.
///
/// Must be created from within a tokio runtime; both services spawn their
/// polling tasks immediately.
pub struct Services {
    pub telemetry: Arc<SystemSampler>,
    pub weather: WeatherClient,
    tasks: BackgroundTasks,
}

impl Services {
    pub fn start(config: &AppConfig) -> Self {
        let telemetry = Arc::new(SystemSampler::new(config.telemetry.clone()));
        let weather = WeatherClient::new(config.weather.clone());

        let tasks = BackgroundTasks {
            sampler: Some(SystemSampler::spawn(Arc::clone(&telemetry))),
            weather_poll: Some(weather.spawn_polling()),
        };
        tracing::info!("services started");

        Self {
            telemetry,
            weather,
            tasks,
        }
    }

    /// Stop the polling tasks, then abort every in-flight weather request.
    /// Synchronous; nothing fires against the services afterwards.
    pub fn shutdown(&mut self) {
        self.tasks.abort_all();
        self.weather.shutdown();
        tracing::info!("services stopped");
    }
}

impl Drop for Services {
    fn drop(&mut self) {
        self.shutdown();
    }
}
