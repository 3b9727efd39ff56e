//! Time and memory sampling taken at search call boundaries.
//!
//! The engine never reads the clock or the process memory directly; it asks a
//! [`MetricsProvider`] for a [`MetricsSample`] before and after each run.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Bytes per megabyte used for memory deltas.
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Point-in-time reading of the clock and resident memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSample {
    /// Monotonic time since an arbitrary provider-specific origin.
    pub elapsed: Duration,
    /// Resident set size in bytes, when the platform exposes it.
    pub resident_bytes: Option<u64>,
}

impl MetricsSample {
    /// Wall-clock time between two samples.
    pub fn duration_since(&self, earlier: &Self) -> Duration {
        self.elapsed.saturating_sub(earlier.elapsed)
    }

    /// Resident memory change in megabytes; `0.0` when either side is unknown.
    pub fn memory_delta_mb(&self, earlier: &Self) -> f64 {
        match (earlier.resident_bytes, self.resident_bytes) {
            (Some(before), Some(after)) => (after as f64 - before as f64) / BYTES_PER_MB,
            _ => 0.0,
        }
    }
}

/// Capability injected into the engine for timing and memory sampling.
pub trait MetricsProvider: Debug + Send + Sync {
    fn sample(&self) -> MetricsSample;
}

/// Real clock plus the process resident set size.
#[derive(Debug, Clone, Copy)]
pub struct SystemMetrics {
    origin: Instant,
}

impl SystemMetrics {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsProvider for SystemMetrics {
    fn sample(&self) -> MetricsSample {
        MetricsSample {
            elapsed: self.origin.elapsed(),
            resident_bytes: resident_set_bytes(),
        }
    }
}

#[cfg(target_os = "linux")]
fn resident_set_bytes() -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    parse_vm_rss(&status)
}

#[cfg(not(target_os = "linux"))]
fn resident_set_bytes() -> Option<u64> {
    None
}

/// Extract `VmRSS` (reported in kB) from `/proc/<pid>/status` content.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_vm_rss(status: &str) -> Option<u64> {
    status
        .lines()
        .find_map(|line| line.strip_prefix("VmRSS:"))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|kb| kb.parse::<u64>().ok())
        .map(|kb| kb * 1024)
}

/// Provider that reports nothing: zero time and unknown memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMetrics;

impl MetricsProvider for NullMetrics {
    fn sample(&self) -> MetricsSample {
        MetricsSample::default()
    }
}

/// Deterministic provider: every sample advances time by `step` and
/// resident memory by `bytes_per_sample`.
#[derive(Debug)]
pub struct SteppingMetrics {
    step: Duration,
    bytes_per_sample: u64,
    samples: AtomicU64,
}

impl SteppingMetrics {
    pub fn new(step: Duration, bytes_per_sample: u64) -> Self {
        Self {
            step,
            bytes_per_sample,
            samples: AtomicU64::new(0),
        }
    }
}

impl MetricsProvider for SteppingMetrics {
    fn sample(&self) -> MetricsSample {
        let n = self.samples.fetch_add(1, Ordering::SeqCst);
        let steps = u32::try_from(n).unwrap_or(u32::MAX);
        MetricsSample {
            elapsed: self.step.saturating_mul(steps),
            resident_bytes: Some(n.saturating_mul(self.bytes_per_sample)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vm_rss_in_kilobytes() {
        let status = "Name:\tgeosearch\nVmPeak:\t  9000 kB\nVmRSS:\t  2048 kB\nThreads:\t1\n";
        assert_eq!(parse_vm_rss(status), Some(2048 * 1024));
        assert_eq!(parse_vm_rss("Name:\tx\n"), None);
    }

    #[test]
    fn stepping_metrics_are_deterministic() {
        let metrics = SteppingMetrics::new(Duration::from_millis(5), 1024 * 1024);
        let before = metrics.sample();
        let after = metrics.sample();
        assert_eq!(after.duration_since(&before), Duration::from_millis(5));
        assert_eq!(after.memory_delta_mb(&before), 1.0);
    }

    #[test]
    fn unknown_memory_yields_zero_delta() {
        let before = NullMetrics.sample();
        let after = MetricsSample {
            elapsed: Duration::from_secs(1),
            resident_bytes: Some(10),
        };
        assert_eq!(after.memory_delta_mb(&before), 0.0);
    }

    #[test]
    fn system_metrics_clock_is_monotonic() {
        let metrics = SystemMetrics::new();
        let before = metrics.sample();
        let after = metrics.sample();
        assert!(after.elapsed >= before.elapsed);
    }
}
