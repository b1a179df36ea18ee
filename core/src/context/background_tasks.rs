use tokio::task::JoinHandle;

/// Handles to the long-running service tasks, aborted on shutdown
#[derive(Default)]
pub struct BackgroundTasks {
    pub sampler: Option<JoinHandle<()>>,
    pub weather_poll: Option<JoinHandle<()>>,
}

impl BackgroundTasks {
    pub fn abort_all(&mut self) {
        if let Some(handle) = self.weather_poll.take() {
            handle.abort();
        }
        if let Some(handle) = self.sampler.take() {
            handle.abort();
        }
    }
}
