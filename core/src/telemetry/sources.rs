//! Metric sources and parsers
//!
//! The readers return `Option` so the sampler can skip any source that is
//! unavailable this cycle. The parsers are pure functions over file
//! contents, kept separate from the I/O so they can be tested directly.

/// Cumulative CPU tick counters from the aggregate `cpu` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuTicks {
    pub total: u64,
    pub idle: u64,
}

/// Parsed MemTotal/MemAvailable pair, in kB
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemInfo {
    pub total_kb: u64,
    pub available_kb: u64,
}

/// One cycle's worth of raw readings; `None` means "source unavailable"
#[derive(Debug, Clone, Default)]
pub struct SourceReadings {
    pub cpu: Option<CpuTicks>,
    pub memory: Option<MemInfo>,
    /// (used, total) bytes for the target mount
    pub disk: Option<(u64, u64)>,
    pub temperature: Option<f64>,
    pub uptime_secs: Option<f64>,
    pub processes: Option<usize>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsers
// ─────────────────────────────────────────────────────────────────────────────

/// Parse the aggregate `cpu` line of `/proc/stat`:
/// `cpu  user nice system idle iowait irq softirq ...`
pub fn parse_cpu_line(line: &str) -> Option<CpuTicks> {
    let mut fields = line.split_whitespace();
    if fields.next() != Some("cpu") {
        return None;
    }
    let values: Vec<u64> = fields.take(7).map(str::parse).collect::<Result<_, _>>().ok()?;
    if values.len() < 7 {
        return None;
    }
    Some(CpuTicks {
        total: values.iter().sum(),
        idle: values[3],
    })
}

/// Extract MemTotal and MemAvailable from `/proc/meminfo` contents
pub fn parse_meminfo(content: &str) -> Option<MemInfo> {
    let mut total_kb = None;
    let mut available_kb = None;
    for line in content.lines() {
        let value = || {
            line.split_whitespace()
                .nth(1)
                .and_then(|v| v.parse::<u64>().ok())
        };
        if line.starts_with("MemTotal:") {
            total_kb = value();
        } else if line.starts_with("MemAvailable:") {
            available_kb = value();
        }
        if total_kb.is_some() && available_kb.is_some() {
            break;
        }
    }
    Some(MemInfo {
        total_kb: total_kb?,
        available_kb: available_kb?,
    })
}

/// Parse the first field of `/proc/uptime` (seconds since boot)
pub fn parse_uptime(content: &str) -> Option<f64> {
    content.split_whitespace().next()?.parse().ok()
}

// ─────────────────────────────────────────────────────────────────────────────
// Formatting
// ─────────────────────────────────────────────────────────────────────────────

/// Format an uptime as `"2d 3h 4m"`, `"3h 4m"`, or `"4m"`
pub fn format_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Format a kB amount as `"4.2 GB"`
pub fn format_gib(kb: u64) -> String {
    format!("{:.1} GB", kb as f64 / (1024.0 * 1024.0))
}

// ─────────────────────────────────────────────────────────────────────────────
// Platform Readers (Linux)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(target_os = "linux")]
mod linux {
    use super::*;

    pub fn read_cpu() -> Option<CpuTicks> {
        let content = std::fs::read_to_string("/proc/stat").ok()?;
        parse_cpu_line(content.lines().next()?)
    }

    pub fn read_meminfo() -> Option<MemInfo> {
        parse_meminfo(&std::fs::read_to_string("/proc/meminfo").ok()?)
    }

    pub fn read_uptime() -> Option<f64> {
        parse_uptime(&std::fs::read_to_string("/proc/uptime").ok()?)
    }

    /// First readable thermal zone wins
    pub fn read_temperature() -> Option<f64> {
        for zone in 0..10 {
            let path = format!("/sys/class/thermal/thermal_zone{zone}/temp");
            if let Ok(content) = std::fs::read_to_string(&path)
                && let Ok(millidegrees) = content.trim().parse::<i64>()
            {
                return Some(millidegrees as f64 / 1000.0);
            }
        }
        None
    }

    /// Numeric entries under /proc are live processes
    pub fn count_processes() -> Option<usize> {
        let entries = std::fs::read_dir("/proc").ok()?;
        Some(
            entries
                .flatten()
                .filter(|e| {
                    e.file_name()
                        .to_str()
                        .is_some_and(|name| !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()))
                })
                .count(),
        )
    }

    /// (used, total) bytes for the given mount
    pub fn disk_usage(mount: &str) -> Option<(u64, u64)> {
        let stat = rustix::fs::statvfs(mount).ok()?;
        let total = stat.f_blocks * stat.f_frsize;
        let free = stat.f_bavail * stat.f_frsize;
        if total == 0 {
            return None;
        }
        Some((total - free, total))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Synthetic Fallback (non-Linux hosts)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(not(target_os = "linux"))]
mod synthetic {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TICK: AtomicU64 = AtomicU64::new(0);

    /// Plausible readings that exercise the same delta/percent paths as the
    /// real sources, so dependent UI behaves identically on any host.
    pub fn readings() -> SourceReadings {
        let t = TICK.fetch_add(1, Ordering::Relaxed);
        // cheap hash for per-tick variation
        let noise = t.wrapping_mul(0x9E37_79B9_7F4A_7C15) >> 33;

        let total_kb = 16 * 1024 * 1024;
        let available_kb = total_kb / 2 + (noise % 1024) * 1024;
        let disk_total: u64 = 500_000_000_000;
        let disk_used = 320_000_000_000 + (noise % 1000) * 1_000_000;

        // Counters stay monotonic: ~400 total ticks per cycle, ~300 of them
        // idle plus a small jitter, so the delta math lands near 25% CPU.
        SourceReadings {
            cpu: Some(CpuTicks {
                total: (t + 1) * 400,
                idle: (t + 1) * 300 + noise % 50,
            }),
            memory: Some(MemInfo {
                total_kb,
                available_kb,
            }),
            disk: Some((disk_used, disk_total)),
            temperature: Some(45.0 + (noise % 20) as f64),
            uptime_secs: Some(9_000.0 + (t * 2) as f64),
            processes: Some((150 + noise % 100) as usize),
        }
    }
}

impl SourceReadings {
    /// Gather one cycle of readings for the given disk mount
    pub fn collect(disk_mount: &str) -> Self {
        #[cfg(target_os = "linux")]
        {
            Self {
                cpu: linux::read_cpu(),
                memory: linux::read_meminfo(),
                disk: linux::disk_usage(disk_mount),
                temperature: linux::read_temperature(),
                uptime_secs: linux::read_uptime(),
                processes: linux::count_processes(),
            }
        }
        #[cfg(not(target_os = "linux"))]
        {
            let _ = disk_mount;
            synthetic::readings()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cpu_line() {
        let ticks = parse_cpu_line("cpu  100 20 30 400 50 6 7 0 0 0").unwrap();
        assert_eq!(ticks.total, 613);
        assert_eq!(ticks.idle, 400);

        assert!(parse_cpu_line("cpu0 100 20 30 400 50 6 7").is_none());
        assert!(parse_cpu_line("cpu 1 2 3").is_none());
    }

    #[test]
    fn test_parse_meminfo() {
        let content = "MemTotal:       16384000 kB\n\
                       MemFree:         1024000 kB\n\
                       MemAvailable:    8192000 kB\n";
        let mem = parse_meminfo(content).unwrap();
        assert_eq!(mem.total_kb, 16_384_000);
        assert_eq!(mem.available_kb, 8_192_000);

        assert!(parse_meminfo("MemFree: 12 kB\n").is_none());
    }

    #[test]
    fn test_parse_uptime() {
        assert_eq!(parse_uptime("12345.67 98765.43\n"), Some(12345.67));
        assert!(parse_uptime("").is_none());
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(125), "2m");
        assert_eq!(format_uptime(3 * 3600 + 240), "3h 4m");
        assert_eq!(format_uptime(2 * 86_400 + 3 * 3600 + 240), "2d 3h 4m");
    }

    #[test]
    fn test_format_gib() {
        assert_eq!(format_gib(4_404_019), "4.2 GB");
        assert_eq!(format_gib(16 * 1024 * 1024), "16.0 GB");
    }
}
