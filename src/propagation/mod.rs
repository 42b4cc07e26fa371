//! # Orbit propagation
//!
//! This module turns an [`OrbitalElements`] set and a [`SamplingSchedule`] into a time-ordered
//! sequence of heliocentric ecliptic positions, under pure two-body motion.
//!
//! ## Pipeline
//!
//! For every sample `j ∈ [0, steps)`:
//!
//! 1. elapsed time `t = j / (steps − 1) · timespan` (seconds),
//! 2. mean anomaly `M(t) = M₀ + n·t`, reduced into `[0, 2π)` with a floored modulo,
//! 3. eccentric anomaly `E` from [`solve_kepler_equation`],
//! 4. true anomaly `ν` and radius `r = a·(1 − e·cos E)`,
//! 5. orbital-plane position `(r·cos ν, r·sin ν, 0)` rotated into the ecliptic frame
//!    with [`orbital_plane_to_ecliptic`].
//!
//! Samples are independent of each other: the result of sample `j` depends only on `t`.
//!
//! ## Configuration
//!
//! Physical constants and solver tolerances are carried by [`PropagationParams`], passed
//! explicitly to every call. Nothing is read from global state.
//!
//! ## Example
//!
//! ```rust
//! use orbimpact::orbital_elements::OrbitalElements;
//! use orbimpact::propagation::{propagate, PropagationParams, SamplingSchedule};
//!
//! let elements = OrbitalElements::new(1.4579, 0.2226, 10.83, 304.3, 178.9, 110.8).unwrap();
//! let schedule = SamplingSchedule::new(200, 365.25).unwrap();
//!
//! let positions = propagate(&elements, &schedule, &PropagationParams::default()).unwrap();
//! assert_eq!(positions.len(), 200);
//! ```
use std::cmp::Ordering::Greater;
use std::fmt;

use hifitime::Epoch;
use nalgebra::Vector3;

use crate::{
    constants::{
        Day, DEFAULT_AU_KM, DEFAULT_GM_SUN, DEFAULT_KEPLER_MAX_ITERATIONS,
        DEFAULT_KEPLER_TOLERANCE, SECONDS_PER_DAY,
    },
    kepler::{eccentric_to_true_anomaly, principal_angle, solve_kepler_equation},
    orbimpact_errors::OrbImpactError,
    orbital_elements::OrbitalElements,
    ref_system::orbital_plane_to_ecliptic,
    time::epoch_after_days,
};

pub mod trajectory;

use trajectory::{Position, Trajectory, TrajectorySample};

/// Physical constants and numerical controls of the propagator.
///
/// Fields
/// -----------------
/// * `mu` – gravitational parameter of the central body (km³/s²).
/// * `au_km` – conversion factor from AU to km.
/// * `kepler_tolerance` – Newton step threshold (radians) of the Kepler solver.
/// * `kepler_max_iterations` – iteration budget of the Kepler solver.
///
/// Defaults
/// -----------------
/// * `mu`: 1.32712440018e11 km³/s² (GM☉)
/// * `au_km`: 1.496e8 km
/// * `kepler_tolerance`: 1e-10 rad
/// * `kepler_max_iterations`: 50
///
/// See also
/// -----------------
/// * [`PropagationParamsBuilder`] – validated construction.
/// * [`propagate`] – consumes these parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PropagationParams {
    pub mu: f64,
    pub au_km: f64,
    pub kepler_tolerance: f64,
    pub kepler_max_iterations: usize,
}

impl PropagationParams {
    /// Construct a new [`PropagationParams`] with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`PropagationParamsBuilder`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use orbimpact::propagation::PropagationParams;
    ///
    /// // Earth-centered propagation, km³/s²
    /// let params = PropagationParams::builder()
    ///     .mu(398_600.4418)
    ///     .kepler_tolerance(1e-12)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(params.kepler_max_iterations, 50);
    /// ```
    pub fn builder() -> PropagationParamsBuilder {
        PropagationParamsBuilder::new()
    }
}

impl Default for PropagationParams {
    fn default() -> Self {
        PropagationParams {
            mu: DEFAULT_GM_SUN,
            au_km: DEFAULT_AU_KM,
            kepler_tolerance: DEFAULT_KEPLER_TOLERANCE,
            kepler_max_iterations: DEFAULT_KEPLER_MAX_ITERATIONS,
        }
    }
}

/// Builder for [`PropagationParams`], with validation.
#[derive(Debug, Clone)]
pub struct PropagationParamsBuilder {
    params: PropagationParams,
}

impl Default for PropagationParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PropagationParamsBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            params: PropagationParams::default(),
        }
    }

    pub fn mu(mut self, v: f64) -> Self {
        self.params.mu = v;
        self
    }
    pub fn au_km(mut self, v: f64) -> Self {
        self.params.au_km = v;
        self
    }
    pub fn kepler_tolerance(mut self, v: f64) -> Self {
        self.params.kepler_tolerance = v;
        self
    }
    pub fn kepler_max_iterations(mut self, v: usize) -> Self {
        self.params.kepler_max_iterations = v;
        self
    }

    /// Return true iff x > 0.0, finite and comparable (i.e., not NaN).
    #[inline]
    fn gt0(x: f64) -> bool {
        x.partial_cmp(&0.0) == Some(Greater) && x.is_finite()
    }

    /// Finalize the builder.
    ///
    /// Validation rules
    /// -----------------
    /// * `mu > 0`, `au_km > 0`, `kepler_tolerance > 0` (finite, not NaN).
    /// * `kepler_max_iterations ≥ 1`.
    ///
    /// Returns
    /// -----------------
    /// * `Ok(PropagationParams)` if all values are valid.
    /// * `Err(OrbImpactError::InvalidPropagationParameter)` otherwise.
    pub fn build(self) -> Result<PropagationParams, OrbImpactError> {
        let p = &self.params;

        if !Self::gt0(p.mu) {
            return Err(OrbImpactError::InvalidPropagationParameter(
                "mu must be > 0".into(),
            ));
        }
        if !Self::gt0(p.au_km) {
            return Err(OrbImpactError::InvalidPropagationParameter(
                "au_km must be > 0".into(),
            ));
        }
        if !Self::gt0(p.kepler_tolerance) {
            return Err(OrbImpactError::InvalidPropagationParameter(
                "kepler_tolerance must be > 0".into(),
            ));
        }
        if p.kepler_max_iterations == 0 {
            return Err(OrbImpactError::InvalidPropagationParameter(
                "kepler_max_iterations must be >= 1".into(),
            ));
        }

        Ok(self.params)
    }
}

impl fmt::Display for PropagationParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            const PARAM_COL: usize = 44;
            writeln!(f, "Propagation Parameters")?;
            writeln!(f, "----------------------")?;

            macro_rules! line {
                ($fmt:expr, $val:expr, $comment:expr) => {{
                    let s = format!($fmt, $val);
                    let pad = if s.len() < PARAM_COL {
                        " ".repeat(PARAM_COL - s.len())
                    } else {
                        " ".to_string()
                    };
                    writeln!(f, "  {}{}# {}", s, pad, $comment)
                }};
            }

            line!(
                "mu                    = {:.6e} km3/s2",
                self.mu,
                "Gravitational parameter"
            )?;
            line!(
                "au_km                 = {:.6e} km",
                self.au_km,
                "AU to km conversion"
            )?;
            line!(
                "kepler_tolerance      = {:.1e}",
                self.kepler_tolerance,
                "Newton step threshold (rad)"
            )?;
            line!(
                "kepler_max_iterations = {}",
                self.kepler_max_iterations,
                "Kepler iteration budget"
            )?;
            Ok(())
        } else {
            write!(
                f,
                "PropagationParams(mu={:.6e}, au_km={:.4e}, kepler_tolerance={:.1e}, kepler_max_iterations={})",
                self.mu, self.au_km, self.kepler_tolerance, self.kepler_max_iterations
            )
        }
    }
}

/// Sampling schedule of a propagation.
///
/// `steps` equally spaced offsets from `0` to `timespan_days`, both endpoints included:
/// the offset of sample `j` is `j / (steps − 1) · timespan_days`.
///
/// An optional start epoch can be attached; samples then also report their absolute
/// epoch. The propagation itself only uses elapsed time since the element epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingSchedule {
    steps: usize,
    timespan_days: Day,
    start_epoch: Option<Epoch>,
}

impl SamplingSchedule {
    /// Build a validated schedule.
    ///
    /// Errors
    /// ------
    /// * [`OrbImpactError::InvalidInput`] when `steps < 2` or `timespan_days` is not a
    ///   finite positive number.
    pub fn new(steps: usize, timespan_days: Day) -> Result<Self, OrbImpactError> {
        if steps < 2 {
            return Err(OrbImpactError::InvalidInput(format!(
                "sampling schedule needs at least 2 steps, got {steps}"
            )));
        }
        if !(timespan_days > 0.0 && timespan_days.is_finite()) {
            return Err(OrbImpactError::InvalidInput(format!(
                "timespan must be > 0 days, got {timespan_days}"
            )));
        }
        Ok(Self {
            steps,
            timespan_days,
            start_epoch: None,
        })
    }

    /// Attach the absolute epoch of sample 0.
    pub fn with_start_epoch(mut self, epoch: Epoch) -> Self {
        self.start_epoch = Some(epoch);
        self
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn timespan_days(&self) -> Day {
        self.timespan_days
    }

    pub fn start_epoch(&self) -> Option<Epoch> {
        self.start_epoch
    }

    /// Elapsed days of sample `index`.
    ///
    /// The last sample lands exactly on `timespan_days`.
    pub fn elapsed_days(&self, index: usize) -> Day {
        (index as f64 / (self.steps - 1) as f64) * self.timespan_days
    }

    /// Elapsed days of every sample, in chronological order.
    pub fn offsets_days(&self) -> impl Iterator<Item = Day> + '_ {
        (0..self.steps).map(|j| self.elapsed_days(j))
    }
}

/// Propagate an element set and return the sampled positions (km, heliocentric ecliptic).
///
/// Arguments
/// ---------
/// * `elements` – validated Keplerian elements.
/// * `schedule` – sampling schedule (`steps ≥ 2`).
/// * `params` – physical constants and Kepler solver controls.
///
/// Return
/// ------
/// * exactly `schedule.steps()` positions; index 0 is the element epoch, the last index is
///   `timespan_days` later.
///
/// Errors
/// ------
/// * [`OrbImpactError::InvalidPropagationParameter`] if `params` holds an invalid constant.
///
/// See also
/// --------
/// * [`propagate_trajectory`] – same computation, keeping every intermediate quantity.
pub fn propagate(
    elements: &OrbitalElements,
    schedule: &SamplingSchedule,
    params: &PropagationParams,
) -> Result<Vec<Position>, OrbImpactError> {
    Ok(propagate_trajectory(elements, schedule, params)?.into_positions())
}

/// Propagate an element set and return the detailed [`Trajectory`].
///
/// Each [`TrajectorySample`] keeps the anomalies, the heliocentric distance, the vis-viva
/// speed and the convergence flag of its Kepler solve. A sample whose solve exhausted the
/// iteration budget is kept (best estimate) and reported through `log::warn!`.
pub fn propagate_trajectory(
    elements: &OrbitalElements,
    schedule: &SamplingSchedule,
    params: &PropagationParams,
) -> Result<Trajectory, OrbImpactError> {
    // params are public fields: re-run the builder checks
    let params = PropagationParamsBuilder {
        params: params.clone(),
    }
    .build()?;

    let ecc = elements.eccentricity();
    let a_km = elements.semi_major_axis_km(params.au_km);
    let mean_motion = elements.mean_motion(params.mu, params.au_km);
    let mean_anomaly_epoch = elements.mean_anomaly_rad();

    let rotation = orbital_plane_to_ecliptic(
        elements.argument_of_periapsis_rad(),
        elements.inclination_rad(),
        elements.ascending_node_longitude_rad(),
    );

    log::debug!(
        "propagating a={} AU, e={} over {} days ({} samples)",
        elements.semi_major_axis_au(),
        ecc,
        schedule.timespan_days(),
        schedule.steps()
    );

    let samples = schedule
        .offsets_days()
        .enumerate()
        .map(|(index, elapsed_days)| {
            let t = elapsed_days * SECONDS_PER_DAY;
            let mean_anomaly = principal_angle(mean_anomaly_epoch + mean_motion * t);

            let solution = solve_kepler_equation(
                ecc,
                mean_anomaly,
                params.kepler_tolerance,
                params.kepler_max_iterations,
            );
            if !solution.converged {
                log::warn!(
                    "Kepler solver did not converge for sample {index} (e={ecc}, M={mean_anomaly}) after {} iterations",
                    solution.iterations
                );
            }

            let eccentric_anomaly = solution.eccentric_anomaly;
            let true_anomaly = eccentric_to_true_anomaly(ecc, eccentric_anomaly);
            let radius_km = a_km * (1.0 - ecc * eccentric_anomaly.cos());

            let in_plane = Vector3::new(
                radius_km * true_anomaly.cos(),
                radius_km * true_anomaly.sin(),
                0.0,
            );
            let position = Position::from(rotation * in_plane);

            // vis-viva: v² = μ (2/r − 1/a)
            let speed_km_s = (params.mu * (2.0 / radius_km - 1.0 / a_km)).sqrt();

            TrajectorySample {
                index,
                elapsed_days,
                epoch: schedule
                    .start_epoch()
                    .map(|start| epoch_after_days(start, elapsed_days)),
                mean_anomaly,
                eccentric_anomaly,
                true_anomaly,
                radius_km,
                speed_km_s,
                kepler_converged: solution.converged,
                position,
            }
        })
        .collect::<Vec<_>>();

    let trajectory = Trajectory::new(samples);
    log::debug!(
        "propagation done: {} samples, all converged: {}",
        trajectory.len(),
        trajectory.all_converged()
    );
    Ok(trajectory)
}
