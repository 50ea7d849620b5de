//! System metrics sampling using sysinfo.

use sysinfo::System;
use tracing::debug;

/// One reading of every charted metric.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Unix epoch milliseconds.
    pub time: i64,
    /// Overall CPU usage in percent.
    pub cpu_total: f64,
    /// Per-core CPU usage in percent.
    pub cpu_cores: Vec<f64>,
    /// One-minute load average.
    pub load_one: f64,
    /// Memory figures in bytes.
    pub memory_used: f64,
    pub memory_available: f64,
    pub memory_free: f64,
    pub swap_used: f64,
}

/// Reads CPU, memory and load from the local machine.
pub struct SystemSampler {
    system: System,
}

impl SystemSampler {
    pub fn new() -> Self {
        Self {
            system: System::new_all(),
        }
    }

    /// Refresh and take a snapshot.
    ///
    /// CPU usage is computed against the previous refresh, so the first
    /// snapshot after [`Self::new`] may read zero.
    pub fn sample(&mut self) -> Snapshot {
        self.system.refresh_cpu_usage();
        self.system.refresh_memory();

        let cpu_cores: Vec<f64> = self
            .system
            .cpus()
            .iter()
            .map(|cpu| cpu.cpu_usage() as f64)
            .collect();

        let snapshot = Snapshot {
            time: chrono::Utc::now().timestamp_millis(),
            cpu_total: self.system.global_cpu_usage() as f64,
            cpu_cores,
            load_one: System::load_average().one,
            memory_used: self.system.used_memory() as f64,
            memory_available: self.system.available_memory() as f64,
            memory_free: self.system.free_memory() as f64,
            swap_used: self.system.used_swap() as f64,
        };

        debug!(
            cpu = snapshot.cpu_total,
            cores = snapshot.cpu_cores.len(),
            memory_used = snapshot.memory_used,
            "Sampled system"
        );

        snapshot
    }
}

impl Default for SystemSampler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_is_plausible() {
        let mut sampler = SystemSampler::new();
        let snapshot = sampler.sample();

        assert!(snapshot.time > 0);
        assert!(snapshot.cpu_total >= 0.0);
        assert!(snapshot.cpu_cores.iter().all(|c| *c >= 0.0));
        assert!(snapshot.memory_used >= 0.0);
        assert!(snapshot.load_one >= 0.0);
    }
}
