//! # Simulation
//!
//! One call that chains both engines: propagate an orbit over a sampling schedule, then
//! estimate the effects of an impact by a projectile described in the same request.
//!
//! The request deserializes from the payload a client would post, every physical field
//! falling back on a default when absent:
//!
//! | field                  | default  | unit   |
//! |------------------------|----------|--------|
//! | `projectile_diameter_m`| 10       | m      |
//! | `projectile_density`   | 3000     | kg/m³  |
//! | `impact_velocity_km_s` | 20       | km/s   |
//! | `impact_angle_deg`     | 45       | deg    |
//! | `simulation_steps`     | 200      |        |
//! | `timespan_days`        | 365.25   | days   |
//! | `crater_coefficient`   | 1e-2     |        |
//!
//! The orbit comes either from explicit elements (`orbit`) or from an already fetched catalog
//! record (`neo`); explicit elements win when both are present.
//!
//! ```rust
//! use orbimpact::simulation::{simulate, SimulationRequest};
//!
//! let request: SimulationRequest = serde_json::from_str(r#"{
//!     "orbit": {
//!         "semi_major_axis_au": 1.0, "eccentricity": 0.0167, "inclination_deg": 0.0,
//!         "ascending_node_longitude_deg": -11.26, "argument_of_periapsis_deg": 114.2,
//!         "mean_anomaly_deg": 358.6
//!     }
//! }"#).unwrap();
//!
//! let report = simulate(&request).unwrap();
//! assert_eq!(report.orbit_positions.len(), 200);
//! ```
use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        Day, Degree, Meter, DEFAULT_CRATER_COEFFICIENT, DEFAULT_IMPACT_ANGLE_DEG,
        DEFAULT_IMPACT_VELOCITY_KM_S, DEFAULT_PROJECTILE_DENSITY, DEFAULT_PROJECTILE_DIAMETER_M,
        DEFAULT_SIMULATION_STEPS, DEFAULT_TIMESPAN_DAYS, METERS_PER_KM,
    },
    impact::{estimate_impact, ImpactEffects, ImpactParams, ImpactorSpec},
    neo_record::NeoRecord,
    orbimpact_errors::OrbImpactError,
    orbital_elements::OrbitalElements,
    propagation::{propagate, trajectory::Position, PropagationParams, SamplingSchedule},
};

fn default_projectile_diameter_m() -> Meter {
    DEFAULT_PROJECTILE_DIAMETER_M
}

fn default_projectile_density() -> f64 {
    DEFAULT_PROJECTILE_DENSITY
}

fn default_impact_velocity_km_s() -> f64 {
    DEFAULT_IMPACT_VELOCITY_KM_S
}

fn default_impact_angle_deg() -> Degree {
    DEFAULT_IMPACT_ANGLE_DEG
}

fn default_simulation_steps() -> usize {
    DEFAULT_SIMULATION_STEPS
}

fn default_timespan_days() -> Day {
    DEFAULT_TIMESPAN_DAYS
}

fn default_crater_coefficient() -> f64 {
    DEFAULT_CRATER_COEFFICIENT
}

/// Inputs of one simulation run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationRequest {
    /// Explicit orbital elements.
    #[serde(default)]
    pub orbit: Option<OrbitalElements>,
    /// Catalog record to take the orbit from when no explicit elements are given.
    #[serde(default)]
    pub neo: Option<NeoRecord>,
    #[serde(default = "default_projectile_diameter_m")]
    pub projectile_diameter_m: Meter,
    /// kg/m³
    #[serde(default = "default_projectile_density")]
    pub projectile_density: f64,
    #[serde(default = "default_impact_velocity_km_s")]
    pub impact_velocity_km_s: f64,
    #[serde(default = "default_impact_angle_deg")]
    pub impact_angle_deg: Degree,
    #[serde(default = "default_simulation_steps")]
    pub simulation_steps: usize,
    #[serde(default = "default_timespan_days")]
    pub timespan_days: Day,
    #[serde(default = "default_crater_coefficient")]
    pub crater_coefficient: f64,
}

impl Default for SimulationRequest {
    fn default() -> Self {
        Self {
            orbit: None,
            neo: None,
            projectile_diameter_m: DEFAULT_PROJECTILE_DIAMETER_M,
            projectile_density: DEFAULT_PROJECTILE_DENSITY,
            impact_velocity_km_s: DEFAULT_IMPACT_VELOCITY_KM_S,
            impact_angle_deg: DEFAULT_IMPACT_ANGLE_DEG,
            simulation_steps: DEFAULT_SIMULATION_STEPS,
            timespan_days: DEFAULT_TIMESPAN_DAYS,
            crater_coefficient: DEFAULT_CRATER_COEFFICIENT,
        }
    }
}

impl SimulationRequest {
    /// Request with default physical parameters for the given elements.
    pub fn with_elements(elements: OrbitalElements) -> Self {
        Self {
            orbit: Some(elements),
            ..Self::default()
        }
    }

    /// Request with default physical parameters for the orbit of a catalog record.
    pub fn with_record(record: NeoRecord) -> Self {
        Self {
            neo: Some(record),
            ..Self::default()
        }
    }

    /// Where the orbit of this request comes from.
    ///
    /// Errors
    /// ------
    /// * [`OrbImpactError::MissingOrbitSource`] when neither `orbit` nor `neo` is set.
    pub fn orbit_source(&self) -> Result<OrbitSource<'_>, OrbImpactError> {
        match (&self.orbit, &self.neo) {
            (Some(elements), _) => Ok(OrbitSource::Elements(elements)),
            (None, Some(record)) => Ok(OrbitSource::Record(record)),
            (None, None) => Err(OrbImpactError::MissingOrbitSource),
        }
    }
}

/// Origin of the orbit of a simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrbitSource<'a> {
    Elements(&'a OrbitalElements),
    Record(&'a NeoRecord),
}

impl OrbitSource<'_> {
    pub fn elements(&self) -> Result<OrbitalElements, OrbImpactError> {
        match self {
            OrbitSource::Elements(elements) => Ok(**elements),
            OrbitSource::Record(record) => record.orbital_elements(),
        }
    }
}

/// Result of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub orbit_positions: Vec<Position>,
    pub impact_results: ImpactEffects,
}

/// Run a full simulation: orbit propagation followed by the impact estimate.
///
/// Every input is validated before anything is computed: the orbit source, the sampling
/// schedule, the impactor and the crater coefficient.
///
/// Errors
/// ------
/// * [`OrbImpactError::MissingOrbitSource`] when the request has no orbit.
/// * [`OrbImpactError::MissingRecordField`] when the catalog record lacks an element.
/// * [`OrbImpactError::InvalidInput`] for an out-of-domain orbit, schedule or impactor.
/// * [`OrbImpactError::InvalidImpactParameter`] for a negative crater coefficient.
pub fn simulate(request: &SimulationRequest) -> Result<SimulationReport, OrbImpactError> {
    let elements = request.orbit_source()?.elements()?;
    let schedule = SamplingSchedule::new(request.simulation_steps, request.timespan_days)?;
    let impactor = ImpactorSpec::new(
        request.projectile_diameter_m,
        request.projectile_density,
        request.impact_velocity_km_s * METERS_PER_KM,
        request.impact_angle_deg,
    )?;
    let impact_params = ImpactParams::builder()
        .crater_coefficient(request.crater_coefficient)
        .build()?;

    let orbit_positions = propagate(&elements, &schedule, &PropagationParams::default())?;
    let impact_results = estimate_impact(&impactor, &impact_params)?;

    log::debug!(
        "simulation done: {} positions, {:.3e} Mt TNT",
        orbit_positions.len(),
        impact_results.energy_megatons_tnt
    );

    Ok(SimulationReport {
        orbit_positions,
        impact_results,
    })
}
