//! # Keplerian orbital elements
//!
//! This module defines [`OrbitalElements`], the classical element set consumed by the
//! propagator:
//!
//! 1. **a** – Semi-major axis (AU)
//! 2. **e** – Eccentricity (unitless), elliptic only: `0 ≤ e < 1`
//! 3. **i** – Inclination (degrees)
//! 4. **Ω** – Longitude of ascending node (degrees)
//! 5. **ω** – Argument of periapsis (degrees)
//! 6. **M** – Mean anomaly at epoch (degrees)
//!
//! Angles are stored in degrees, the unit used by catalogs and request payloads, and are
//! exposed in radians through the `*_rad` accessors. Angles are not normalized: every use
//! goes through periodic trigonometric functions.
//!
//! The element set is validated once, at construction, and is immutable afterwards.
//!
//! ## Example
//!
//! ```rust
//! use orbimpact::orbital_elements::OrbitalElements;
//!
//! let elements = OrbitalElements::new(1.4579, 0.2226, 10.83, 304.3, 178.9, 110.8).unwrap();
//! assert!(elements.semi_major_axis_au() > 1.0);
//!
//! // Hyperbolic orbits are rejected
//! assert!(OrbitalElements::new(1.0, 1.2, 0.0, 0.0, 0.0, 0.0).is_err());
//! ```
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    constants::{AstronomicalUnit, Degree, Kilometer, Radian, DPI, RADEG, SECONDS_PER_DAY},
    orbimpact_errors::OrbImpactError,
};

/// Keplerian orbital elements (osculating, two-body, elliptic).
///
/// Units
/// -----
/// * `semi_major_axis_au`: Astronomical Units (AU), `> 0`.
/// * `eccentricity`: unitless, `[0, 1)`.
/// * all angles: degrees, any finite value.
///
/// Serialized with the field names of the simulation payload
/// (`semi_major_axis_au`, `eccentricity`, `inclination_deg`, `ascending_node_longitude_deg`,
/// `argument_of_periapsis_deg`, `mean_anomaly_deg`). Deserialization runs the same
/// validation as [`OrbitalElements::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOrbitalElements")]
pub struct OrbitalElements {
    semi_major_axis_au: AstronomicalUnit,
    eccentricity: f64,
    inclination_deg: Degree,
    ascending_node_longitude_deg: Degree,
    argument_of_periapsis_deg: Degree,
    mean_anomaly_deg: Degree,
}

/// Unvalidated wire form of [`OrbitalElements`].
#[derive(Deserialize)]
struct RawOrbitalElements {
    semi_major_axis_au: f64,
    eccentricity: f64,
    inclination_deg: f64,
    ascending_node_longitude_deg: f64,
    argument_of_periapsis_deg: f64,
    mean_anomaly_deg: f64,
}

impl TryFrom<RawOrbitalElements> for OrbitalElements {
    type Error = OrbImpactError;

    fn try_from(raw: RawOrbitalElements) -> Result<Self, Self::Error> {
        OrbitalElements::new(
            raw.semi_major_axis_au,
            raw.eccentricity,
            raw.inclination_deg,
            raw.ascending_node_longitude_deg,
            raw.argument_of_periapsis_deg,
            raw.mean_anomaly_deg,
        )
    }
}

impl OrbitalElements {
    /// Build a validated element set.
    ///
    /// Arguments
    /// ---------
    /// * `semi_major_axis_au` – `a` (AU), must be finite and `> 0`.
    /// * `eccentricity` – `e`, must satisfy `0 ≤ e < 1`.
    /// * `inclination_deg` – `i` (degrees).
    /// * `ascending_node_longitude_deg` – `Ω` (degrees).
    /// * `argument_of_periapsis_deg` – `ω` (degrees).
    /// * `mean_anomaly_deg` – `M` at epoch (degrees).
    ///
    /// Errors
    /// ------
    /// * [`OrbImpactError::InvalidInput`] when a value is out of its domain or not finite.
    ///   Nothing is clamped.
    pub fn new(
        semi_major_axis_au: AstronomicalUnit,
        eccentricity: f64,
        inclination_deg: Degree,
        ascending_node_longitude_deg: Degree,
        argument_of_periapsis_deg: Degree,
        mean_anomaly_deg: Degree,
    ) -> Result<Self, OrbImpactError> {
        // written so that NaN fails every check
        if !(semi_major_axis_au > 0.0 && semi_major_axis_au.is_finite()) {
            return Err(OrbImpactError::InvalidInput(format!(
                "semi-major axis must be > 0 AU, got {semi_major_axis_au}"
            )));
        }
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(OrbImpactError::InvalidInput(format!(
                "eccentricity must be in [0, 1), got {eccentricity}"
            )));
        }
        for (name, angle) in [
            ("inclination", inclination_deg),
            ("ascending node longitude", ascending_node_longitude_deg),
            ("argument of periapsis", argument_of_periapsis_deg),
            ("mean anomaly", mean_anomaly_deg),
        ] {
            if !angle.is_finite() {
                return Err(OrbImpactError::InvalidInput(format!(
                    "{name} must be a finite angle, got {angle}"
                )));
            }
        }

        Ok(Self {
            semi_major_axis_au,
            eccentricity,
            inclination_deg,
            ascending_node_longitude_deg,
            argument_of_periapsis_deg,
            mean_anomaly_deg,
        })
    }

    pub fn semi_major_axis_au(&self) -> AstronomicalUnit {
        self.semi_major_axis_au
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn inclination_deg(&self) -> Degree {
        self.inclination_deg
    }

    pub fn ascending_node_longitude_deg(&self) -> Degree {
        self.ascending_node_longitude_deg
    }

    pub fn argument_of_periapsis_deg(&self) -> Degree {
        self.argument_of_periapsis_deg
    }

    pub fn mean_anomaly_deg(&self) -> Degree {
        self.mean_anomaly_deg
    }

    pub fn inclination_rad(&self) -> Radian {
        self.inclination_deg * RADEG
    }

    pub fn ascending_node_longitude_rad(&self) -> Radian {
        self.ascending_node_longitude_deg * RADEG
    }

    pub fn argument_of_periapsis_rad(&self) -> Radian {
        self.argument_of_periapsis_deg * RADEG
    }

    pub fn mean_anomaly_rad(&self) -> Radian {
        self.mean_anomaly_deg * RADEG
    }

    /// Semi-major axis in kilometers, for a given AU → km factor.
    pub fn semi_major_axis_km(&self, au_km: f64) -> Kilometer {
        self.semi_major_axis_au * au_km
    }

    /// Mean motion `n = √(μ / a³)` in rad/s.
    ///
    /// Arguments
    /// ---------
    /// * `mu` – gravitational parameter of the central body (km³/s²).
    /// * `au_km` – AU → km factor.
    pub fn mean_motion(&self, mu: f64, au_km: f64) -> f64 {
        let a_km = self.semi_major_axis_km(au_km);
        (mu / (a_km * a_km * a_km)).sqrt()
    }

    /// Orbital period `2π / n`, in days.
    pub fn period_days(&self, mu: f64, au_km: f64) -> f64 {
        DPI / self.mean_motion(mu, au_km) / SECONDS_PER_DAY
    }
}

impl fmt::Display for OrbitalElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Keplerian Elements")?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(
            f,
            "  a   (semi-major axis)       = {:.6} AU",
            self.semi_major_axis_au
        )?;
        writeln!(
            f,
            "  e   (eccentricity)          = {:.6}",
            self.eccentricity
        )?;
        writeln!(
            f,
            "  i   (inclination)           = {:.6}°",
            self.inclination_deg
        )?;
        writeln!(
            f,
            "  Ω   (longitude of node)     = {:.6}°",
            self.ascending_node_longitude_deg
        )?;
        writeln!(
            f,
            "  ω   (argument of periapsis) = {:.6}°",
            self.argument_of_periapsis_deg
        )?;
        writeln!(
            f,
            "  M   (mean anomaly)          = {:.6}°",
            self.mean_anomaly_deg
        )
    }
}
