//! # Constants and type definitions for orbimpact
//!
//! This module centralizes the **physical constants**, **conversion factors** and **common type
//! aliases** used by the orbit propagator and the impact-effects estimator.
//!
//! ## Overview
//!
//! - Default values of the configurable physical constants (solar `GM`, AU → km, crater
//!   coefficient)
//! - Unit conversions (degrees ↔ radians, days ↔ seconds, joules ↔ TNT)
//! - Core type aliases used across the crate
//!
//! The `DEFAULT_*` values are **defaults only**: the engine never reads them directly during a
//! computation. They seed [`PropagationParams`](crate::propagation::PropagationParams) and
//! [`ImpactParams`](crate::impact::ImpactParams), which are passed explicitly to every call.

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Energy released by one ton of TNT, in joules
pub const JOULES_PER_TON_TNT: f64 = 4.184e9;

/// Tons per megaton
pub const TONS_PER_MEGATON: f64 = 1.0e6;

/// Meters per kilometer
pub const METERS_PER_KM: f64 = 1_000.0;

// -------------------------------------------------------------------------------------------------
// Defaults for the configurable physical constants
// -------------------------------------------------------------------------------------------------

/// Standard gravitational parameter of the Sun (GM☉) in km³/s²
pub const DEFAULT_GM_SUN: f64 = 1.32712440018e11;

/// Astronomical Unit in kilometers, as used by the propagator by default
pub const DEFAULT_AU_KM: f64 = 1.496e8;

/// Empirical coefficient of the quarter-power crater scaling law
pub const DEFAULT_CRATER_COEFFICIENT: f64 = 1.0e-2;

/// Convergence tolerance of the Kepler solver (radians)
pub const DEFAULT_KEPLER_TOLERANCE: f64 = 1.0e-10;

/// Iteration budget of the Kepler solver
pub const DEFAULT_KEPLER_MAX_ITERATIONS: usize = 50;

// -------------------------------------------------------------------------------------------------
// Defaults of a simulation request
// -------------------------------------------------------------------------------------------------

/// Projectile diameter (m)
pub const DEFAULT_PROJECTILE_DIAMETER_M: f64 = 10.0;

/// Projectile bulk density (kg/m³), a stony body
pub const DEFAULT_PROJECTILE_DENSITY: f64 = 3000.0;

/// Impact velocity (km/s)
pub const DEFAULT_IMPACT_VELOCITY_KM_S: f64 = 20.0;

/// Impact angle from the horizontal (degrees)
pub const DEFAULT_IMPACT_ANGLE_DEG: f64 = 45.0;

/// Number of trajectory samples
pub const DEFAULT_SIMULATION_STEPS: usize = 200;

/// Sampled time span (days), one Julian year
pub const DEFAULT_TIMESPAN_DAYS: f64 = 365.25;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Distance in meters
pub type Meter = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Energy in joules
pub type Joule = f64;
/// Time span in days
pub type Day = f64;
