//! Fixed-step classical Runge-Kutta integration of a single ray.

use wavetrace_core::{Derivative, RayError, RayState, Termination, Trajectory};

use crate::cancel::CancelToken;
use crate::rhs::RaySystem;

/// Upper bound on the states reserved up front; longer rays grow the
/// buffer as they go.
const MAX_PREALLOCATED_STEPS: usize = 4096;

/// Relative slack when dividing duration by step size, so that e.g.
/// `0.3 / 0.1 = 2.9999999999999996` still yields three steps.
const STEP_COUNT_GUARD: f64 = 1e-9;

/// Number of whole steps of `step_size` that fit in `duration`.
///
/// Zero if either argument is not positive and finite.
///
/// ```
/// use wavetrace_engine::step_count;
///
/// assert_eq!(step_count(0.3, 0.1), 3);
/// assert_eq!(step_count(10.0, 3.0), 3);
/// assert_eq!(step_count(1.0, 0.0), 0);
/// ```
pub fn step_count(duration: f64, step_size: f64) -> usize {
    if !(duration.is_finite() && step_size.is_finite() && duration > 0.0 && step_size > 0.0) {
        return 0;
    }
    let ratio = duration / step_size;
    (ratio * (1.0 + STEP_COUNT_GUARD)).floor() as usize
}

/// Classical fourth-order Runge-Kutta integrator over a [`RaySystem`].
///
/// The integrator holds no per-ray state; [`run`](Self::run) can be called
/// concurrently from many threads.
#[derive(Clone, Debug)]
pub struct Integrator<'a> {
    system: RaySystem<'a>,
    cancel: Option<CancelToken>,
}

impl<'a> Integrator<'a> {
    /// Integrator for `system`.
    pub fn new(system: RaySystem<'a>) -> Self {
        Self {
            system,
            cancel: None,
        }
    }

    /// Check `token` between steps and stop with
    /// [`Termination::Cancelled`] once it fires.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The ray equations being integrated.
    pub fn system(&self) -> &RaySystem<'a> {
        &self.system
    }

    /// Advance `state` by one RK4 step of length `dt`.
    ///
    /// Stages are evaluated at `t`, `t + dt/2`, `t + dt/2` and `t + dt`, and
    /// combined as `s + dt/6 (k1 + 2 k2 + 2 k3 + k4)`.
    ///
    /// # Errors
    ///
    /// The first [`RayError`] raised by any stage, or
    /// [`RayError::Diverged`] if the combined state is non-finite. The step
    /// is all-or-nothing: no partial state is returned.
    pub fn step(&self, state: &RayState, dt: f64) -> Result<RayState, RayError> {
        let k1 = self.system.derivative(state)?;
        self.finish_step(state, &k1, dt)
    }

    /// Remaining three stages and the combination, given `k1` at `state`.
    fn finish_step(&self, state: &RayState, k1: &Derivative, dt: f64) -> Result<RayState, RayError> {
        let half = 0.5 * dt;
        let k2 = self.system.derivative(&state.advanced(k1, half))?;
        let k3 = self.system.derivative(&state.advanced(&k2, half))?;
        let k4 = self.system.derivative(&state.advanced(&k3, dt))?;
        let next = state.advanced(&Derivative::rk4_average(k1, &k2, &k3, &k4), dt);
        if next.is_finite() {
            Ok(next)
        } else {
            Err(RayError::Diverged)
        }
    }

    /// Trace one ray for `duration` seconds in steps of `step_size`.
    ///
    /// Sample `n` sits at time `initial.time + n * step_size`; there are at
    /// most [`step_count`]` + 1` samples and the initial state is always
    /// the first. If a step cannot be completed the trajectory ends at the
    /// last good state and is tagged with the reason, so a ray launched
    /// outside the domain yields a single-state
    /// [`Termination::OutOfDomain`] trajectory.
    pub fn run(&self, initial: RayState, duration: f64, step_size: f64) -> Trajectory {
        let steps = step_count(duration, step_size);
        let t0 = initial.time;
        let mut states = Vec::with_capacity(steps.min(MAX_PREALLOCATED_STEPS) + 1);
        states.push(initial);

        if steps == 0 {
            let termination = match self.system.derivative(&initial) {
                Ok(_) => Termination::Completed,
                Err(e) => e.into(),
            };
            return Trajectory::new(states, termination);
        }

        let mut current = initial;
        let mut termination = Termination::Completed;
        for n in 1..=steps {
            if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                termination = Termination::Cancelled;
                break;
            }
            match self.step(&current, step_size) {
                Ok(mut next) => {
                    // Pin sample times to the grid instead of accumulating dt.
                    next.time = t0 + n as f64 * step_size;
                    states.push(next);
                    current = next;
                }
                Err(e) => {
                    termination = e.into();
                    break;
                }
            }
        }
        Trajectory::new(states, termination)
    }
}
