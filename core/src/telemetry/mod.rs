//! System telemetry sampling
//!
//! This module provides:
//! - **Sources**: platform readers and pure parsers for the OS counters
//!   (CPU ticks, memory, disk, thermal zones, process table, uptime)
//! - **Sampler**: the process-scoped service that refreshes a locked
//!   snapshot on a fixed interval and notifies listeners once per cycle
//!
//! Individual sources are allowed to fail: a missing file or parse error
//! leaves that metric at its last known value and never aborts the cycle.
//! Hosts without the Linux proc/sysfs surface get plausible synthetic
//! values instead so dependent widgets never render a broken state.

mod sampler;
mod sources;

pub use sampler::{SystemSampler, TelemetrySnapshot};
pub use sources::{CpuTicks, MemInfo, SourceReadings, format_gib, format_uptime};
