use serde::Serialize;

/// Metrics for one completed synchronous sweep.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SweepMetrics {
    /// 1-based sweep number.
    pub sweep: usize,
    /// Largest absolute value change of any state during this sweep.
    pub max_delta: f64,
}

/// Aggregate metrics for a complete solve.
#[derive(Debug, Clone, Serialize)]
pub struct SolveMetrics {
    pub sweeps_requested: usize,
    pub sweeps_completed: usize,
    pub final_max_delta: f64,
    /// True when tolerance stopping saw a finite sweep change below its tolerance.
    pub converged: bool,
}

impl SolveMetrics {
    pub(crate) fn new(sweeps_requested: usize) -> Self {
        SolveMetrics {
            sweeps_requested,
            sweeps_completed: 0,
            final_max_delta: 0.0,
            converged: false,
        }
    }

    pub(crate) fn record(&mut self, metrics: SweepMetrics) {
        self.sweeps_completed = metrics.sweep;
        self.final_max_delta = metrics.max_delta;
    }
}
