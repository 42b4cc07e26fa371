//! # Kepler's equation
//!
//! Solver for the elliptic Kepler equation `E − e·sin(E) = M` and the small angle
//! helpers used around it by the propagator.
//!
//! The solver is a plain Newton–Raphson iteration with a bounded iteration budget.
//! It never fails: on budget exhaustion the last iterate is returned and
//! [`KeplerSolution::converged`] is `false`, leaving the decision to the caller.
use std::f64::consts::PI;

use super::constants::{Radian, DPI};

/// Eccentricity above which the Newton iteration starts from `π` instead of `M`.
///
/// Starting from `M` oscillates or diverges for some mean anomalies when `e ≳ 0.97`;
/// starting from the apoapsis side converges for the whole elliptic range.
const HIGH_ECCENTRICITY: f64 = 0.8;

/// Outcome of a Kepler solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    /// Eccentric anomaly `E` (radians), best available estimate.
    pub eccentric_anomaly: Radian,
    /// Number of Newton steps performed.
    pub iterations: usize,
    /// `true` if the last step satisfied `|ΔE| < tolerance`.
    pub converged: bool,
}

/// Return the principal value of an angle in radians, in `[0, 2π)`.
///
/// Uses a floored modulo so negative angles map to positive values. For tiny negative
/// inputs the modulo rounds up to exactly `2π`, which is folded back to `0`.
pub fn principal_angle(a: f64) -> f64 {
    let r = a.rem_euclid(DPI);
    if r >= DPI {
        0.0
    } else {
        r
    }
}

/// Solve Kepler's equation `E − e·sin(E) = M` for the eccentric anomaly.
///
/// Arguments
/// ---------
/// * `eccentricity` – `e ∈ [0, 1)`. Not checked here: domain validation belongs to the callers.
/// * `mean_anomaly` – `M` in radians, any real value. Callers usually normalize it with
///   [`principal_angle`] first, which only reduces the iteration count.
/// * `tolerance` – stop when the Newton step satisfies `|ΔE| < tolerance`.
/// * `max_iterations` – iteration budget.
///
/// Return
/// ------
/// * A [`KeplerSolution`]. When the budget is exhausted, the last iterate is returned with
///   `converged == false`.
///
/// Notes
/// -----
/// * Initial guess `E₀ = M`. For `e ≥ 0.8` the guess is moved to `π` within the revolution
///   containing `M`.
/// * For `e = 0` the first step is exactly zero, so `E == M` bit for bit.
pub fn solve_kepler_equation(
    eccentricity: f64,
    mean_anomaly: Radian,
    tolerance: f64,
    max_iterations: usize,
) -> KeplerSolution {
    let mut ecc_anom = if eccentricity < HIGH_ECCENTRICITY {
        mean_anomaly
    } else {
        mean_anomaly - principal_angle(mean_anomaly) + PI
    };

    for iteration in 1..=max_iterations {
        let f = ecc_anom - eccentricity * ecc_anom.sin() - mean_anomaly;
        let f_prime = 1.0 - eccentricity * ecc_anom.cos();

        let delta = f / f_prime;
        ecc_anom -= delta;

        if delta.abs() < tolerance {
            return KeplerSolution {
                eccentric_anomaly: ecc_anom,
                iterations: iteration,
                converged: true,
            };
        }
    }

    KeplerSolution {
        eccentric_anomaly: ecc_anom,
        iterations: max_iterations,
        converged: false,
    }
}

/// Convert an eccentric anomaly into the true anomaly.
///
/// `ν = 2·atan2(√(1+e)·sin(E/2), √(1−e)·cos(E/2))`, which keeps the correct quadrant
/// for every `E`. The result lies in `(−π, π]`.
pub fn eccentric_to_true_anomaly(eccentricity: f64, eccentric_anomaly: Radian) -> Radian {
    let half = eccentric_anomaly / 2.0;
    let y = (1.0 + eccentricity).sqrt() * half.sin();
    let x = (1.0 - eccentricity).sqrt() * half.cos();
    2.0 * y.atan2(x)
}
