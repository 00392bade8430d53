//! Summary metrics for a batch of rays.
//!
//! [`BatchMetrics`] tallies how each ray terminated and how much work the
//! batch did, for logging and for callers that want to report on a run
//! without walking every trajectory.

use std::fmt;

use wavetrace_core::{Termination, Trajectory};

/// Counts and timing collected over one [`BatchDriver`](crate::BatchDriver)
/// run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchMetrics {
    /// Number of rays traced.
    pub rays: usize,
    /// Rays that ran for the full duration.
    pub completed: usize,
    /// Rays that left a field's bounds.
    pub out_of_domain: usize,
    /// Rays that reached land.
    pub grounded: usize,
    /// Rays whose state became unusable.
    pub diverged: usize,
    /// Rays stopped by a cancel token.
    pub cancelled: usize,
    /// RK4 steps taken across all rays.
    pub steps: usize,
    /// Wall-clock time for the whole batch, in microseconds.
    pub wall_time_us: u64,
    /// Worker threads the batch ran on.
    pub threads: usize,
}

impl BatchMetrics {
    /// Tally the terminations and step counts of `trajectories`.
    ///
    /// Timing and thread fields are left at zero for the caller to fill.
    pub fn from_trajectories(trajectories: &[Trajectory]) -> Self {
        let mut m = Self {
            rays: trajectories.len(),
            ..Self::default()
        };
        for t in trajectories {
            m.steps += t.len() - 1;
            match t.termination() {
                Termination::Completed => m.completed += 1,
                Termination::OutOfDomain { .. } => m.out_of_domain += 1,
                Termination::Grounded { .. } => m.grounded += 1,
                Termination::Diverged => m.diverged += 1,
                Termination::Cancelled => m.cancelled += 1,
            }
        }
        m
    }

    /// Rays that stopped early for any reason.
    pub fn truncated(&self) -> usize {
        self.rays - self.completed
    }
}

impl fmt::Display for BatchMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rays ({} completed, {} out of domain, {} grounded, {} diverged, {} cancelled), \
             {} steps in {:.3} ms on {} threads",
            self.rays,
            self.completed,
            self.out_of_domain,
            self.grounded,
            self.diverged,
            self.cancelled,
            self.steps,
            self.wall_time_us as f64 / 1000.0,
            self.threads,
        )
    }
}
