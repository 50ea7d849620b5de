//! Demo mode simulation engine.
//!
//! Produces time-varying CPU and memory readings for running Sysgraph
//! without touching the real machine, with the occasional CPU spike and
//! slow memory leak to give the charts something to show.

use std::f64::consts::PI;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::collector::Snapshot;

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;
const TOTAL_MEMORY: f64 = 16.0 * GIB;
const TOTAL_SWAP: f64 = 4.0 * GIB;

/// A temporary deviation from the baseline.
#[derive(Debug, Clone)]
enum Anomaly {
    /// All cores pinned near `intensity` percent.
    CpuSpike { intensity: f64, until_tick: u64 },
    /// Used memory grows by `rate` percent of total per tick.
    MemoryLeak { rate: f64, until_tick: u64 },
}

impl Anomaly {
    fn until_tick(&self) -> u64 {
        match self {
            Anomaly::CpuSpike { until_tick, .. } | Anomaly::MemoryLeak { until_tick, .. } => {
                *until_tick
            }
        }
    }
}

/// Demo simulation state.
pub struct DemoSimulator {
    rng: SmallRng,
    tick: u64,
    /// Per-core oscillation phase.
    phases: Vec<f64>,
    /// Per-core baseline usage in percent.
    core_base: Vec<f64>,
    /// Used memory as a fraction of total.
    memory_ratio: f64,
    swap_ratio: f64,
    load: f64,
    anomalies: Vec<Anomaly>,
}

impl DemoSimulator {
    /// Create a simulator with `cores` CPUs, seeded from system entropy.
    pub fn new(cores: usize) -> Self {
        Self::with_rng(SmallRng::from_os_rng(), cores)
    }

    /// Create a reproducible simulator.
    pub fn with_seed(seed: u64, cores: usize) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed), cores)
    }

    fn with_rng(mut rng: SmallRng, cores: usize) -> Self {
        let cores = cores.max(1);
        let phases = (0..cores).map(|_| rng.random_range(0.0..PI)).collect();
        let core_base = (0..cores).map(|_| rng.random_range(5.0..40.0)).collect();
        Self {
            rng,
            tick: 0,
            phases,
            core_base,
            memory_ratio: 0.45,
            swap_ratio: 0.05,
            load: 1.0,
            anomalies: Vec::new(),
        }
    }

    pub fn core_count(&self) -> usize {
        self.core_base.len()
    }

    fn maybe_schedule_anomaly(&mut self) {
        self.anomalies.retain(|a| a.until_tick() > self.tick);
        if !self.anomalies.is_empty() || self.rng.random_range(0..40) != 0 {
            return;
        }

        let anomaly = if self.rng.random_bool(0.7) {
            Anomaly::CpuSpike {
                intensity: self.rng.random_range(75.0..98.0),
                until_tick: self.tick + self.rng.random_range(5..15),
            }
        } else {
            Anomaly::MemoryLeak {
                rate: self.rng.random_range(0.005..0.02),
                until_tick: self.tick + self.rng.random_range(20..50),
            }
        };
        tracing::debug!(?anomaly, tick = self.tick, "Demo anomaly started");
        self.anomalies.push(anomaly);
    }

    /// Advance one step and produce a snapshot stamped `timestamp`.
    pub fn tick(&mut self, timestamp: i64) -> Snapshot {
        self.tick += 1;
        self.maybe_schedule_anomaly();

        let spike = self.anomalies.iter().find_map(|a| match a {
            Anomaly::CpuSpike { intensity, .. } => Some(*intensity),
            _ => None,
        });
        let leak = self.anomalies.iter().find_map(|a| match a {
            Anomaly::MemoryLeak { rate, .. } => Some(*rate),
            _ => None,
        });

        let t = self.tick as f64 * 0.1;
        let mut cpu_cores = Vec::with_capacity(self.core_base.len());
        for (base, phase) in self.core_base.iter().zip(&self.phases) {
            let usage = match spike {
                Some(intensity) => intensity + self.rng.random_range(-5.0..5.0),
                None => base + 15.0 * (t + phase).sin() + self.rng.random_range(-3.0..3.0),
            };
            cpu_cores.push(usage.clamp(0.0, 100.0));
        }
        let cpu_total = cpu_cores.iter().sum::<f64>() / cpu_cores.len() as f64;

        // Load average trails the busy core count.
        let busy = cpu_total / 100.0 * cpu_cores.len() as f64;
        self.load += (busy - self.load) * 0.08;

        match leak {
            Some(rate) => self.memory_ratio += rate,
            None => {
                self.memory_ratio += (0.45 - self.memory_ratio) * 0.05;
                self.memory_ratio += self.rng.random_range(-0.005..0.005);
            }
        }
        self.memory_ratio = self.memory_ratio.clamp(0.05, 0.98);
        if self.memory_ratio > 0.9 {
            self.swap_ratio = (self.swap_ratio + 0.01).min(1.0);
        } else {
            self.swap_ratio = (self.swap_ratio - 0.002).max(0.02);
        }

        let memory_used = TOTAL_MEMORY * self.memory_ratio;
        let memory_available = TOTAL_MEMORY - memory_used;
        let memory_free = memory_available * 0.6;

        Snapshot {
            time: timestamp,
            cpu_total,
            cpu_cores,
            load_one: self.load.max(0.0),
            memory_used,
            memory_available,
            memory_free,
            swap_used: TOTAL_SWAP * self.swap_ratio,
        }
    }
}

impl Default for DemoSimulator {
    fn default() -> Self {
        Self::new(4)
    }
}
