//! Data-parallel tracing of many independent rays.
//!
//! Every ray runs its own [`Integrator::run`] against the same borrowed
//! fields. Rays never interact, so the map is embarrassingly parallel and
//! the output is identical (bit for bit) whichever [`Parallelism`] is
//! chosen: each trajectory depends only on its own initial state.

use std::time::Instant;

use crossbeam_channel::Sender;
use log::{debug, info, warn};
use rayon::prelude::*;
use wavetrace_core::{RayBundle, RayState, Termination, Trajectory};
use wavetrace_field::{Bathymetry, Current};

use crate::cancel::CancelToken;
use crate::integrator::Integrator;
use crate::metrics::BatchMetrics;
use crate::rhs::RaySystem;

// ── Parallelism ────────────────────────────────────────────────────

/// How a batch spreads rays over threads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Parallelism {
    /// Trace on the calling thread, in input order.
    Sequential,
    /// Use rayon's global pool, sized to the hardware.
    #[default]
    Auto,
    /// Use a dedicated pool of this many threads, clamped to
    /// `[1, MAX_THREADS]`.
    Threads(usize),
}

impl Parallelism {
    /// Upper bound on an explicit thread count.
    pub const MAX_THREADS: usize = 256;

    /// Resolve the actual number of worker threads.
    pub fn resolved_threads(&self) -> usize {
        match self {
            Self::Sequential => 1,
            Self::Auto => rayon::current_num_threads(),
            Self::Threads(n) => (*n).clamp(1, Self::MAX_THREADS),
        }
    }
}

// ── Progress ───────────────────────────────────────────────────────

/// Notification sent when one ray of a batch finishes.
///
/// With more than one worker, notifications arrive in completion order,
/// not input order; `index` identifies the ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayProgress {
    /// Position of the ray in the batch input.
    pub index: usize,
    /// How the ray ended.
    pub termination: Termination,
    /// Number of recorded states.
    pub samples: usize,
}

// ── BatchResult ────────────────────────────────────────────────────

/// Trajectories of a batch in input order, with summary metrics.
#[derive(Clone, Debug)]
pub struct BatchResult {
    /// One trajectory per input state, in input order.
    pub trajectories: Vec<Trajectory>,
    /// Tallies and timing for the run.
    pub metrics: BatchMetrics,
}

impl BatchResult {
    /// Drop the metrics and keep the trajectories as a bundle.
    pub fn into_bundle(self) -> RayBundle {
        RayBundle::new(self.trajectories)
    }
}

// ── BatchDriver ────────────────────────────────────────────────────

/// Runs one [`Integrator`] per initial state, optionally in parallel.
///
/// # Examples
///
/// ```
/// use wavetrace_core::RayState;
/// use wavetrace_engine::{BatchDriver, Parallelism, RaySystem};
/// use wavetrace_field::ConstantDepth;
///
/// let depth = ConstantDepth::new(100.0);
/// let driver = BatchDriver::new(RaySystem::new(&depth)).with_parallelism(Parallelism::Sequential);
/// let rays = [RayState::initial(0.0, 0.0, 0.05, 0.0), RayState::initial(0.0, 50.0, 0.05, 0.01)];
/// let result = driver.run_many(&rays, 10.0, 1.0);
/// assert_eq!(result.trajectories.len(), 2);
/// assert_eq!(result.metrics.completed, 2);
/// ```
#[derive(Clone, Debug)]
pub struct BatchDriver<'a> {
    system: RaySystem<'a>,
    parallelism: Parallelism,
    progress: Option<Sender<RayProgress>>,
    cancel: Option<CancelToken>,
}

impl<'a> BatchDriver<'a> {
    /// Driver for `system` using [`Parallelism::Auto`].
    pub fn new(system: RaySystem<'a>) -> Self {
        Self {
            system,
            parallelism: Parallelism::default(),
            progress: None,
            cancel: None,
        }
    }

    /// Choose how rays are spread over threads.
    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Send a [`RayProgress`] for every finished ray.
    ///
    /// A disconnected receiver is ignored; tracing continues.
    pub fn with_progress(mut self, sender: Sender<RayProgress>) -> Self {
        self.progress = Some(sender);
        self
    }

    /// Stop every ray at its next step once `token` is cancelled.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The configured parallelism.
    pub fn parallelism(&self) -> Parallelism {
        self.parallelism
    }

    /// Trace every state in `initial_states` for `duration` seconds in
    /// steps of `step_size`.
    ///
    /// Never fails: a ray that cannot continue is truncated and tagged, and
    /// the others are unaffected.
    pub fn run_many(&self, initial_states: &[RayState], duration: f64, step_size: f64) -> BatchResult {
        let start = Instant::now();
        info!(
            "tracing {} rays for {duration} s with step {step_size} s ({:?})",
            initial_states.len(),
            self.parallelism
        );

        let mut integrator = Integrator::new(self.system);
        if let Some(token) = &self.cancel {
            integrator = integrator.with_cancel(token.clone());
        }
        let trace = |(index, initial): (usize, &RayState)| -> Trajectory {
            let traj = integrator.run(*initial, duration, step_size);
            self.report(index, &traj);
            traj
        };

        let (trajectories, threads): (Vec<Trajectory>, usize) = match self.parallelism {
            Parallelism::Sequential => (initial_states.iter().enumerate().map(trace).collect(), 1),
            Parallelism::Auto => (
                initial_states.par_iter().enumerate().map(&trace).collect(),
                rayon::current_num_threads(),
            ),
            Parallelism::Threads(_) => {
                let n = self.parallelism.resolved_threads();
                match rayon::ThreadPoolBuilder::new().num_threads(n).build() {
                    Ok(pool) => (
                        pool.install(|| initial_states.par_iter().enumerate().map(&trace).collect()),
                        n,
                    ),
                    Err(e) => {
                        warn!("could not build a {n}-thread pool ({e}); tracing sequentially");
                        (initial_states.iter().enumerate().map(trace).collect(), 1)
                    }
                }
            }
        };

        let mut metrics = BatchMetrics::from_trajectories(&trajectories);
        metrics.threads = threads;
        metrics.wall_time_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        info!("batch finished: {metrics}");

        BatchResult {
            trajectories,
            metrics,
        }
    }

    fn report(&self, index: usize, traj: &Trajectory) {
        if traj.is_truncated() {
            debug!(
                "ray {index} stopped after {} samples: {}",
                traj.len(),
                traj.termination()
            );
        }
        if let Some(tx) = &self.progress {
            let _ = tx.send(RayProgress {
                index,
                termination: traj.termination(),
                samples: traj.len(),
            });
        }
    }
}

/// Trace `initial_states` over `bathymetry` and an optional `current` with
/// [`Parallelism::Auto`], returning trajectories in input order.
pub fn run_many(
    initial_states: &[RayState],
    duration: f64,
    step_size: f64,
    bathymetry: &dyn Bathymetry,
    current: Option<&dyn Current>,
) -> Vec<Trajectory> {
    let system = RaySystem::new(bathymetry).with_optional_current(current);
    BatchDriver::new(system)
        .run_many(initial_states, duration, step_size)
        .trajectories
}
