//! Trace configuration, request validation, and execution.
//!
//! [`TraceConfig`] carries the time parameters of a run. [`TraceRequest`]
//! bundles a config with the initial rays and the fields they propagate
//! through; [`validate()`](TraceRequest::validate) checks every invariant up
//! front so that a malformed request fails before any ray is traced.

use crossbeam_channel::Sender;
use log::warn;
use wavetrace_core::{RayState, RequestError};
use wavetrace_field::{Bathymetry, Current, FieldGrid};

use crate::advisor;
use crate::batch::{BatchDriver, BatchResult, Parallelism, RayProgress};
use crate::cancel::CancelToken;
use crate::integrator::step_count;
use crate::rhs::RaySystem;

// ── TraceConfig ────────────────────────────────────────────────────

/// Time parameters and parallelism of a trace.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceConfig {
    /// Total integration time (s). Must be finite and positive.
    pub duration: f64,
    /// RK4 step (s). Must be finite, positive and no larger than
    /// `duration`.
    pub step_size: f64,
    /// How rays are spread over threads. Default: [`Parallelism::Auto`].
    pub parallelism: Parallelism,
}

impl TraceConfig {
    /// Config with the default parallelism.
    pub fn new(duration: f64, step_size: f64) -> Self {
        Self {
            duration,
            step_size,
            parallelism: Parallelism::default(),
        }
    }

    /// Replace the parallelism.
    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Config derived from a grid's resolution and extent for rays of
    /// wavenumber `k0`, using [`advisor::recommended_step`] and
    /// [`advisor::recommended_duration`].
    ///
    /// `None` if `k0` is not positive and finite. The duration is raised to
    /// one step if rounding would leave it shorter.
    pub fn advised(grid: &FieldGrid, k0: f64) -> Option<Self> {
        let step = advisor::recommended_step(grid.x().coords(), grid.y().coords(), k0)?;
        let duration = advisor::recommended_duration(grid.x().coords(), k0)?;
        Some(Self::new(duration.max(step), step))
    }

    /// Check the time parameters.
    ///
    /// # Errors
    ///
    /// [`RequestError::InvalidDuration`], [`RequestError::InvalidStepSize`]
    /// or [`RequestError::StepExceedsDuration`].
    pub fn validate(&self) -> Result<(), RequestError> {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(RequestError::InvalidDuration {
                value: self.duration,
            });
        }
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(RequestError::InvalidStepSize {
                value: self.step_size,
            });
        }
        if self.step_size > self.duration {
            return Err(RequestError::StepExceedsDuration {
                step_size: self.step_size,
                duration: self.duration,
            });
        }
        Ok(())
    }

    /// Number of RK4 steps each ray takes if it is not truncated.
    pub fn step_count(&self) -> usize {
        step_count(self.duration, self.step_size)
    }
}

/// Zip four parallel coordinate arrays into initial states at `t = 0`.
///
/// # Errors
///
/// [`RequestError::LengthMismatch`] if the arrays differ in length.
pub fn initial_states(
    x0: &[f64],
    y0: &[f64],
    kx0: &[f64],
    ky0: &[f64],
) -> Result<Vec<RayState>, RequestError> {
    let n = x0.len();
    for (name, len) in [("y0", y0.len()), ("kx0", kx0.len()), ("ky0", ky0.len())] {
        if len != n {
            return Err(RequestError::LengthMismatch {
                reason: format!("x0 has {n} values, {name} has {len}"),
            });
        }
    }
    Ok((0..n)
        .map(|i| RayState::initial(x0[i], y0[i], kx0[i], ky0[i]))
        .collect())
}

// ── TraceRequest ───────────────────────────────────────────────────

/// A complete, validatable trace: rays, time parameters, and fields.
///
/// # Examples
///
/// ```
/// use wavetrace_core::RayState;
/// use wavetrace_engine::{TraceConfig, TraceRequest};
/// use wavetrace_field::ConstantSlope;
///
/// let beach = ConstantSlope::default();
/// let rays = vec![RayState::initial(0.0, 0.0, 0.05, 0.0)];
/// let result = TraceRequest::new(rays, TraceConfig::new(60.0, 1.0), &beach)
///     .execute()
///     .unwrap();
/// assert_eq!(result.trajectories[0].len(), 61);
/// ```
#[derive(Clone)]
pub struct TraceRequest<'a> {
    initial_states: Vec<RayState>,
    config: TraceConfig,
    bathymetry: &'a dyn Bathymetry,
    current: Option<&'a dyn Current>,
    progress: Option<Sender<RayProgress>>,
    cancel: Option<CancelToken>,
}

impl<'a> TraceRequest<'a> {
    /// Request to trace `initial_states` over `bathymetry` in still water.
    pub fn new(initial_states: Vec<RayState>, config: TraceConfig, bathymetry: &'a dyn Bathymetry) -> Self {
        Self {
            initial_states,
            config,
            bathymetry,
            current: None,
            progress: None,
            cancel: None,
        }
    }

    /// Add an ambient current.
    pub fn with_current(mut self, current: &'a dyn Current) -> Self {
        self.current = Some(current);
        self
    }

    /// Add a current if one is given.
    pub fn with_optional_current(mut self, current: Option<&'a dyn Current>) -> Self {
        self.current = current;
        self
    }

    /// Forward per-ray progress to `sender`.
    pub fn with_progress(mut self, sender: Sender<RayProgress>) -> Self {
        self.progress = Some(sender);
        self
    }

    /// Allow the trace to be cancelled through `token`.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The initial states.
    pub fn initial_states(&self) -> &[RayState] {
        &self.initial_states
    }

    /// The time parameters.
    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    /// Check every request invariant without tracing.
    ///
    /// # Errors
    ///
    /// - [`RequestError::NoRays`] for an empty request.
    /// - Any error from [`TraceConfig::validate`].
    /// - [`RequestError::InvalidWavenumber`] for a zero or non-finite
    ///   initial wavenumber.
    /// - [`RequestError::InitialPositionOutside`] for a start position
    ///   outside the bathymetry or current bounds.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.initial_states.is_empty() {
            return Err(RequestError::NoRays);
        }
        self.config.validate()?;

        let field_bounds = [
            self.bathymetry.bounds(),
            self.current.and_then(|c| c.bounds()),
        ];
        for (index, s) in self.initial_states.iter().enumerate() {
            let k = s.wavenumber();
            if !(k.is_finite() && k > 0.0) {
                return Err(RequestError::InvalidWavenumber {
                    index,
                    kx: s.kx,
                    ky: s.ky,
                });
            }
            for bounds in field_bounds.iter().flatten() {
                if !bounds.contains(s.x, s.y) {
                    return Err(RequestError::InitialPositionOutside {
                        index,
                        x: s.x,
                        y: s.y,
                        bounds: *bounds,
                    });
                }
            }
        }
        Ok(())
    }

    /// Validate, then trace every ray.
    ///
    /// Logs a warning if the step is larger than the CFL step advised for
    /// the bathymetry's resolution.
    ///
    /// # Errors
    ///
    /// Any error from [`validate`](Self::validate). Once tracing starts the
    /// request cannot fail; per-ray problems end up as terminations.
    pub fn execute(&self) -> Result<BatchResult, RequestError> {
        self.validate()?;
        self.warn_if_coarse();

        let system = RaySystem::new(self.bathymetry).with_optional_current(self.current);
        let mut driver = BatchDriver::new(system).with_parallelism(self.config.parallelism);
        if let Some(tx) = &self.progress {
            driver = driver.with_progress(tx.clone());
        }
        if let Some(token) = &self.cancel {
            driver = driver.with_cancel(token.clone());
        }
        Ok(driver.run_many(&self.initial_states, self.config.duration, self.config.step_size))
    }

    fn warn_if_coarse(&self) {
        let Some((dx, dy)) = self.bathymetry.resolution() else {
            return;
        };
        // Longest waves travel fastest, so they set the limit.
        let k_min = self
            .initial_states
            .iter()
            .map(RayState::wavenumber)
            .fold(f64::INFINITY, f64::min);
        if let Some(advised) = advisor::cfl_step(dx, dy, k_min) {
            if self.config.step_size > advised {
                warn!(
                    "step size {} s exceeds the advised {advised:.3} s for {dx} x {dy} m cells; \
                     rays may skip over bathymetry features",
                    self.config.step_size
                );
            }
        }
    }
}

impl std::fmt::Debug for TraceRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceRequest")
            .field("rays", &self.initial_states.len())
            .field("config", &self.config)
            .field("bathymetry_bounds", &self.bathymetry.bounds())
            .field("has_current", &self.current.is_some())
            .finish()
    }
}
