//! The weather client service
//!
//! One `WeatherClient` per process, owned by `Services`. A polling task
//! issues one request per tick; every in-flight request is tracked in a
//! pending map so teardown can abort all of them before the HTTP client
//! drops. A completion that arrives after its entry left the pending map
//! is ignored, so nothing ever fires against a torn-down client.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use hashbrown::HashMap;
use hudkit_types::WeatherSettings;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use super::error::WeatherError;
use super::model::WeatherReport;

const WEATHER_ENDPOINT: &str = "http://api.openweathermap.org/data/2.5/weather";

/// Event channel capacity; listeners that lag simply miss old events
const EVENT_CAPACITY: usize = 16;

/// Outcome notifications, broadcast once per completed fetch
#[derive(Debug, Clone)]
pub enum WeatherEvent {
    /// The report was replaced with a fresh payload
    Updated,
    /// The fetch failed; the last good report is untouched
    Failed(WeatherError),
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct ClientShared {
    http: reqwest::Client,
    settings: Mutex<WeatherSettings>,
    report: Mutex<Option<WeatherReport>>,
    /// In-flight requests by id; the handle is attached right after spawn
    pending: Mutex<HashMap<u64, Option<JoinHandle<()>>>>,
    next_request: AtomicU64,
    events: broadcast::Sender<WeatherEvent>,
}

impl ClientShared {
    /// Track a request before its task is spawned, so a completion can
    /// never race the registration
    fn register(&self, id: u64) {
        lock(&self.pending).insert(id, None);
    }

    fn attach_handle(&self, id: u64, handle: JoinHandle<()>) {
        if let Some(slot) = lock(&self.pending).get_mut(&id) {
            *slot = Some(handle);
        }
    }

    /// Resolve a request. The pending entry is removed exactly once; a
    /// completion for an untracked id (already torn down) is dropped.
    fn complete(&self, id: u64, outcome: Result<Vec<u8>, String>) {
        if lock(&self.pending).remove(&id).is_none() {
            return;
        }

        match outcome {
            Err(message) => {
                tracing::warn!(request = id, %message, "weather fetch failed");
                let _ = self
                    .events
                    .send(WeatherEvent::Failed(WeatherError::Transport(message)));
            }
            Ok(body) => match serde_json::from_slice::<WeatherReport>(&body) {
                Ok(parsed) => {
                    *lock(&self.report) = Some(parsed);
                    let _ = self.events.send(WeatherEvent::Updated);
                }
                Err(error) => {
                    tracing::warn!(request = id, %error, "weather payload rejected");
                    let _ = self
                        .events
                        .send(WeatherEvent::Failed(WeatherError::Parse(error.to_string())));
                }
            },
        }
    }
}

/// Process-scoped weather poller. Cheap to clone; all clones share state.
#[derive(Clone)]
pub struct WeatherClient {
    shared: Arc<ClientShared>,
}

impl WeatherClient {
    pub fn new(settings: WeatherSettings) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            shared: Arc::new(ClientShared {
                http: reqwest::Client::new(),
                settings: Mutex::new(settings),
                report: Mutex::new(None),
                pending: Mutex::new(HashMap::new()),
                next_request: AtomicU64::new(0),
                events,
            }),
        }
    }

    pub fn set_api_key(&self, key: impl Into<String>) {
        lock(&self.shared.settings).api_key = key.into();
    }

    pub fn set_city(&self, city: impl Into<String>) {
        lock(&self.shared.settings).city = city.into();
    }

    pub fn set_update_interval(&self, minutes: u64) {
        lock(&self.shared.settings).update_interval_minutes = minutes;
    }

    /// Receiver for fetch outcomes; safe to drop without consequence
    pub fn subscribe(&self) -> broadcast::Receiver<WeatherEvent> {
        self.shared.events.subscribe()
    }

    /// Issue one fetch. Without a credential and location this reports
    /// `NotConfigured` immediately and never touches the network.
    ///
    /// Must be called from within a tokio runtime.
    pub fn fetch_now(&self) -> Result<(), WeatherError> {
        let settings = lock(&self.shared.settings).clone();
        if !settings.is_configured() {
            let error = WeatherError::NotConfigured;
            let _ = self
                .shared
                .events
                .send(WeatherEvent::Failed(error.clone()));
            return Err(error);
        }

        let id = self.shared.next_request.fetch_add(1, Ordering::Relaxed);
        let url = format!(
            "{WEATHER_ENDPOINT}?q={}&appid={}",
            settings.city, settings.api_key
        );

        self.shared.register(id);
        let shared = Arc::clone(&self.shared);
        let handle = tokio::spawn(async move {
            let outcome = match shared.http.get(&url).send().await {
                Ok(response) => match response.error_for_status() {
                    Ok(response) => match response.bytes().await {
                        Ok(bytes) => Ok(bytes.to_vec()),
                        Err(error) => Err(error.to_string()),
                    },
                    Err(error) => Err(error.to_string()),
                },
                Err(error) => Err(error.to_string()),
            };
            shared.complete(id, outcome);
        });
        self.shared.attach_handle(id, handle);
        Ok(())
    }

    /// Spawn the fixed-interval polling task
    pub fn spawn_polling(&self) -> JoinHandle<()> {
        let client = self.clone();
        let minutes = lock(&client.shared.settings).update_interval_minutes.max(1);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(minutes * 60));
            loop {
                ticker.tick().await;
                if let Err(error) = client.fetch_now() {
                    tracing::debug!(%error, "weather fetch skipped");
                }
            }
        })
    }

    /// Abort every in-flight request and drain the pending set. Called by
    /// `Services::shutdown` before the client (and its transport) drops.
    pub fn shutdown(&self) {
        let mut pending = lock(&self.shared.pending);
        for (_, handle) in pending.drain() {
            if let Some(handle) = handle {
                handle.abort();
            }
        }
    }

    pub fn pending_requests(&self) -> usize {
        lock(&self.shared.pending).len()
    }

    fn with_report<T>(&self, read: impl FnOnce(&WeatherReport) -> Option<T>) -> Option<T> {
        lock(&self.shared.report).as_ref().and_then(read)
    }

    // ─── Derived getters (sentinels when no report is available) ─────────────

    /// `"22°C"`, or `"N/A"` before the first successful fetch
    pub fn temperature_text(&self) -> String {
        self.with_report(|r| r.temperature_celsius())
            .map_or_else(|| "N/A".to_string(), |t| format!("{t}°C"))
    }

    pub fn temperature(&self) -> Option<i32> {
        self.with_report(|r| r.temperature_celsius())
    }

    /// `"light rain"`, or `"Unknown"`
    pub fn condition(&self) -> String {
        self.with_report(|r| r.condition().map(str::to_string))
            .unwrap_or_else(|| "Unknown".to_string())
    }

    /// `"65%"`, or `"N/A"`
    pub fn humidity_text(&self) -> String {
        self.with_report(|r| r.humidity_percent())
            .map_or_else(|| "N/A".to_string(), |h| format!("{h}%"))
    }

    /// `"18.0 km/h"`, or `"N/A"`
    pub fn wind_speed_text(&self) -> String {
        self.with_report(|r| r.wind_speed_kmh())
            .map_or_else(|| "N/A".to_string(), |speed| format!("{speed:.1} km/h"))
    }

    /// Emoji summary of the current condition
    pub fn icon(&self) -> &'static str {
        let condition = self.condition().to_lowercase();
        if condition.contains("rain") {
            "🌧️"
        } else if condition.contains("cloud") {
            "☁️"
        } else if condition.contains("sun") || condition.contains("clear") {
            "☀️"
        } else if condition.contains("snow") {
            "❄️"
        } else {
            "🌤️"
        }
    }

    pub fn is_raining(&self) -> bool {
        self.condition().to_lowercase().contains("rain")
    }

    pub fn is_sunny(&self) -> bool {
        let condition = self.condition().to_lowercase();
        condition.contains("sun") || condition.contains("clear")
    }

    pub fn is_cloudy(&self) -> bool {
        self.condition().to_lowercase().contains("cloud")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{"main":{"temp":295.15,"humidity":65},"weather":[{"description":"light rain"}],"wind":{"speed":5.0}}"#;

    fn configured_client() -> WeatherClient {
        WeatherClient::new(WeatherSettings {
            api_key: "test-key".to_string(),
            city: "Berlin".to_string(),
            update_interval_minutes: 10,
        })
    }

    fn deliver(client: &WeatherClient, id: u64, outcome: Result<Vec<u8>, String>) {
        client.shared.register(id);
        client.shared.complete(id, outcome);
    }

    #[test]
    fn test_unconfigured_fetch_reports_without_network() {
        let client = WeatherClient::new(WeatherSettings::default());
        let mut events = client.subscribe();

        assert_eq!(client.fetch_now(), Err(WeatherError::NotConfigured));
        assert!(matches!(
            events.try_recv(),
            Ok(WeatherEvent::Failed(WeatherError::NotConfigured))
        ));
        assert_eq!(client.pending_requests(), 0);
    }

    #[test]
    fn test_success_replaces_report() {
        let client = configured_client();
        let mut events = client.subscribe();

        deliver(&client, 0, Ok(SAMPLE.as_bytes().to_vec()));

        assert!(matches!(events.try_recv(), Ok(WeatherEvent::Updated)));
        assert_eq!(client.temperature_text(), "22°C");
        assert_eq!(client.temperature(), Some(22));
        assert_eq!(client.humidity_text(), "65%");
        assert_eq!(client.condition(), "light rain");
        assert_eq!(client.wind_speed_text(), "18.0 km/h");
        assert_eq!(client.icon(), "🌧️");
        assert!(client.is_raining());
        assert!(!client.is_sunny());
        assert!(!client.is_cloudy());
        assert_eq!(client.pending_requests(), 0);
    }

    #[test]
    fn test_failed_fetch_keeps_last_good_report() {
        let client = configured_client();
        deliver(&client, 0, Ok(SAMPLE.as_bytes().to_vec()));

        let mut events = client.subscribe();
        deliver(&client, 1, Ok(b"not json".to_vec()));
        assert!(matches!(
            events.try_recv(),
            Ok(WeatherEvent::Failed(WeatherError::Parse(_)))
        ));

        deliver(&client, 2, Err("connection reset".to_string()));
        assert!(matches!(
            events.try_recv(),
            Ok(WeatherEvent::Failed(WeatherError::Transport(_)))
        ));

        // values are exactly what the last good fetch produced
        assert_eq!(client.temperature_text(), "22°C");
        assert_eq!(client.humidity_text(), "65%");
        assert_eq!(client.condition(), "light rain");
        assert_eq!(client.wind_speed_text(), "18.0 km/h");
    }

    #[test]
    fn test_sentinels_before_first_fetch() {
        let client = configured_client();
        assert_eq!(client.temperature_text(), "N/A");
        assert_eq!(client.temperature(), None);
        assert_eq!(client.condition(), "Unknown");
        assert_eq!(client.humidity_text(), "N/A");
        assert_eq!(client.wind_speed_text(), "N/A");
        assert_eq!(client.icon(), "🌤️");
        assert!(!client.is_raining());
    }

    #[test]
    fn test_completion_after_teardown_is_dropped() {
        let client = configured_client();
        client.shared.register(7);
        assert_eq!(client.pending_requests(), 1);

        client.shutdown();
        assert_eq!(client.pending_requests(), 0);

        // a straggler completion must not resurrect state or emit events
        let mut events = client.subscribe();
        client.shared.complete(7, Ok(SAMPLE.as_bytes().to_vec()));
        assert!(events.try_recv().is_err());
        assert_eq!(client.temperature_text(), "N/A");
    }

    #[test]
    fn test_pending_entry_removed_exactly_once() {
        let client = configured_client();
        client.shared.register(3);
        client.shared.complete(3, Err("timeout".to_string()));
        assert_eq!(client.pending_requests(), 0);

        // double completion finds nothing to remove and stays silent
        let mut events = client.subscribe();
        client.shared.complete(3, Err("timeout".to_string()));
        assert!(events.try_recv().is_err());
    }
}
