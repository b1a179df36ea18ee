//! The telemetry sampler service
//!
//! One `SystemSampler` per process, owned by `Services`. A background task
//! refreshes the snapshot every couple of seconds; getters read the same
//! locked snapshot from any thread. Listeners get a single coalesced
//! notification per completed cycle via a watch channel.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use hudkit_types::TelemetrySettings;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::sources::{SourceReadings, format_gib, format_uptime};

/// Latest sampled system state.
///
/// Mutated only by the sampler's refresh under the lock; the tick counters
/// are the baseline for the next cycle's CPU delta.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetrySnapshot {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub disk_percent: f64,
    pub temperature_c: f64,
    pub uptime_secs: u64,
    pub process_count: usize,
    pub memory_used_kb: u64,
    pub memory_total_kb: u64,
    pub last_total_ticks: u64,
    pub last_idle_ticks: u64,
}

impl TelemetrySnapshot {
    /// Fold one cycle of readings into the snapshot.
    ///
    /// Every `None` reading leaves the corresponding metric at its last
    /// value. The very first CPU reading only establishes the baseline;
    /// no percentage is derived from it.
    pub fn apply(&mut self, readings: &SourceReadings) {
        if let Some(cpu) = readings.cpu {
            if self.last_total_ticks > 0 {
                let total_diff = cpu.total.saturating_sub(self.last_total_ticks);
                let idle_diff = cpu.idle.saturating_sub(self.last_idle_ticks);
                if total_diff > 0 {
                    let busy = total_diff.saturating_sub(idle_diff);
                    self.cpu_percent =
                        (100.0 * busy as f64 / total_diff as f64).clamp(0.0, 100.0);
                }
            }
            self.last_total_ticks = cpu.total;
            self.last_idle_ticks = cpu.idle;
        }

        if let Some(mem) = readings.memory
            && mem.total_kb > 0
        {
            let used_kb = mem.total_kb.saturating_sub(mem.available_kb);
            self.memory_percent = 100.0 * used_kb as f64 / mem.total_kb as f64;
            self.memory_used_kb = used_kb;
            self.memory_total_kb = mem.total_kb;
        }

        if let Some((used, total)) = readings.disk
            && total > 0
        {
            self.disk_percent = 100.0 * used as f64 / total as f64;
        }

        if let Some(temperature) = readings.temperature {
            self.temperature_c = temperature;
        }
        if let Some(uptime) = readings.uptime_secs {
            self.uptime_secs = uptime as u64;
        }
        if let Some(processes) = readings.processes {
            self.process_count = processes;
        }
    }
}

/// Process-scoped system stats poller
pub struct SystemSampler {
    snapshot: Mutex<TelemetrySnapshot>,
    updates: watch::Sender<u64>,
    settings: TelemetrySettings,
}

fn lock(snapshot: &Mutex<TelemetrySnapshot>) -> MutexGuard<'_, TelemetrySnapshot> {
    snapshot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl SystemSampler {
    pub fn new(settings: TelemetrySettings) -> Self {
        let (updates, _) = watch::channel(0);
        Self {
            snapshot: Mutex::new(TelemetrySnapshot::default()),
            updates,
            settings,
        }
    }

    /// Spawn the fixed-interval refresh task. Ticks never overlap: the next
    /// refresh needs the counters the previous one wrote.
    pub fn spawn(sampler: std::sync::Arc<Self>) -> JoinHandle<()> {
        let interval = Duration::from_secs(sampler.settings.interval_secs.max(1));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                sampler.refresh();
            }
        })
    }

    /// Run one refresh cycle and emit a single change notification
    pub fn refresh(&self) {
        let readings = SourceReadings::collect(&self.settings.disk_mount);
        {
            let mut snapshot = lock(&self.snapshot);
            snapshot.apply(&readings);
            tracing::debug!(
                cpu = snapshot.cpu_percent,
                memory = snapshot.memory_percent,
                "telemetry refreshed"
            );
        }
        self.updates.send_modify(|cycle| *cycle = cycle.wrapping_add(1));
    }

    /// Receiver that changes once per completed refresh cycle
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.updates.subscribe()
    }

    /// Copy of the current snapshot
    pub fn snapshot(&self) -> TelemetrySnapshot {
        lock(&self.snapshot).clone()
    }

    pub fn cpu(&self) -> f64 {
        lock(&self.snapshot).cpu_percent
    }

    pub fn memory(&self) -> f64 {
        lock(&self.snapshot).memory_percent
    }

    pub fn disk(&self) -> f64 {
        lock(&self.snapshot).disk_percent
    }

    pub fn temperature(&self) -> f64 {
        lock(&self.snapshot).temperature_c
    }

    pub fn processes(&self) -> usize {
        lock(&self.snapshot).process_count
    }

    /// Formatted used memory, e.g. `"4.2 GB"`; computed at call time
    pub fn memory_used_text(&self) -> String {
        format_gib(lock(&self.snapshot).memory_used_kb)
    }

    /// Formatted total memory, e.g. `"16.0 GB"`
    pub fn memory_total_text(&self) -> String {
        format_gib(lock(&self.snapshot).memory_total_kb)
    }

    /// Formatted uptime, e.g. `"2d 3h 4m"`
    pub fn uptime_text(&self) -> String {
        format_uptime(lock(&self.snapshot).uptime_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::sources::{CpuTicks, MemInfo};

    fn cpu_only(total: u64, idle: u64) -> SourceReadings {
        SourceReadings {
            cpu: Some(CpuTicks { total, idle }),
            ..Default::default()
        }
    }

    #[test]
    fn test_first_cpu_sample_only_sets_baseline() {
        let mut snapshot = TelemetrySnapshot::default();
        snapshot.apply(&cpu_only(1000, 800));

        assert_eq!(snapshot.cpu_percent, 0.0);
        assert_eq!(snapshot.last_total_ticks, 1000);
        assert_eq!(snapshot.last_idle_ticks, 800);
    }

    #[test]
    fn test_cpu_delta_within_bounds() {
        let mut snapshot = TelemetrySnapshot::default();
        snapshot.apply(&cpu_only(1000, 800));

        // 400 total ticks, 100 idle -> 75% busy
        snapshot.apply(&cpu_only(1400, 900));
        assert!((snapshot.cpu_percent - 75.0).abs() < f64::EPSILON);

        // monotonically increasing counters always land in [0, 100]
        let mut total = 1400;
        let mut idle = 900;
        for step in 0..100u64 {
            total += 100 + step;
            idle += 40 + step % 70;
            snapshot.apply(&cpu_only(total, idle));
            assert!((0.0..=100.0).contains(&snapshot.cpu_percent));
        }
    }

    #[test]
    fn test_unavailable_source_keeps_last_value() {
        let mut snapshot = TelemetrySnapshot::default();
        snapshot.apply(&SourceReadings {
            cpu: Some(CpuTicks { total: 400, idle: 300 }),
            memory: Some(MemInfo {
                total_kb: 1000,
                available_kb: 250,
            }),
            temperature: Some(52.0),
            ..Default::default()
        });
        assert_eq!(snapshot.memory_percent, 75.0);

        // everything unavailable this cycle
        snapshot.apply(&SourceReadings::default());
        assert_eq!(snapshot.memory_percent, 75.0);
        assert_eq!(snapshot.temperature_c, 52.0);
        assert_eq!(snapshot.last_total_ticks, 400);
    }

    #[test]
    fn test_zero_total_diff_is_skipped() {
        let mut snapshot = TelemetrySnapshot::default();
        snapshot.apply(&cpu_only(1000, 800));
        snapshot.apply(&cpu_only(1400, 900));
        let before = snapshot.cpu_percent;

        // counters did not move; percentage must not change (or divide by zero)
        snapshot.apply(&cpu_only(1400, 900));
        assert_eq!(snapshot.cpu_percent, before);
    }

    #[test]
    fn test_refresh_emits_one_notification_per_cycle() {
        let sampler = SystemSampler::new(TelemetrySettings::default());
        let receiver = sampler.subscribe();
        assert_eq!(*receiver.borrow(), 0);

        sampler.refresh();
        assert_eq!(*receiver.borrow(), 1);

        sampler.refresh();
        assert_eq!(*receiver.borrow(), 2);
    }

    #[test]
    fn test_formatted_getters() {
        let sampler = SystemSampler::new(TelemetrySettings::default());
        {
            let mut snapshot = lock(&sampler.snapshot);
            snapshot.memory_used_kb = 4_404_019;
            snapshot.memory_total_kb = 16 * 1024 * 1024;
            snapshot.uptime_secs = 2 * 86_400 + 3 * 3_600 + 240;
        }
        assert_eq!(sampler.memory_used_text(), "4.2 GB");
        assert_eq!(sampler.memory_total_text(), "16.0 GB");
        assert_eq!(sampler.uptime_text(), "2d 3h 4m");
    }
}
