//! Timing metrics for performance analysis.
//!
//! Records how long each phase of a run took, so slow inputs can be traced to
//! reading, range validation, the join or the export.

use std::time::{Duration, Instant};

use log::info;
use strum::IntoEnumIterator;
use strum_macros::EnumIter as EnumIterMacro;

/// Phases of a run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum Phase {
    ReadRecords,
    LoadRanges,
    Join,
    Export,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::ReadRecords => "Read records",
            Phase::LoadRanges => "Load ranges",
            Phase::Join => "Join",
            Phase::Export => "Export",
        }
    }
}

/// Per-phase durations of one run.
#[derive(Debug, Clone, Default)]
pub struct TimingStats {
    phases: Vec<(Phase, Duration)>,
}

impl TimingStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f`, charging its wall time to `phase`.
    pub fn time<R>(&mut self, phase: Phase, f: impl FnOnce() -> R) -> R {
        let start = Instant::now();
        let result = f();
        self.record(phase, start.elapsed());
        result
    }

    pub fn record(&mut self, phase: Phase, elapsed: Duration) {
        match self.phases.iter_mut().find(|(p, _)| *p == phase) {
            Some((_, total)) => *total += elapsed,
            None => self.phases.push((phase, elapsed)),
        }
    }

    /// Time charged to `phase`, zero if it never ran.
    pub fn get(&self, phase: Phase) -> Duration {
        self.phases
            .iter()
            .find(|(p, _)| *p == phase)
            .map_or(Duration::ZERO, |(_, d)| *d)
    }

    pub fn total(&self) -> Duration {
        self.phases.iter().map(|(_, d)| *d).sum()
    }

    /// Logs one line per phase plus the total, in milliseconds.
    pub fn log_summary(&self) {
        let total = self.total();
        info!("Timing ({:.1}ms total):", total.as_secs_f64() * 1000.0);
        for phase in Phase::iter() {
            let elapsed = self.get(phase);
            let pct = if total.is_zero() {
                0.0
            } else {
                elapsed.as_secs_f64() / total.as_secs_f64() * 100.0
            };
            info!(
                "   {}: {:.1}ms ({:.0}%)",
                phase.as_str(),
                elapsed.as_secs_f64() * 1000.0,
                pct
            );
        }
    }
}
