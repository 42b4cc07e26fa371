//! Two-body orbit propagation and asteroid impact-effects estimation.
//!
//! - [`propagation`]: Keplerian elements → time-ordered heliocentric ecliptic positions.
//! - [`impact`]: impactor size, density, velocity and angle → energy, crater and magnitude.
//! - [`simulation`]: both engines behind one request/report pair.
//! - [`neo_record`]: orbital elements and sizes from near-Earth-object catalog records.
pub mod constants;
pub mod impact;
pub mod kepler;
pub mod neo_record;
pub mod orbimpact_errors;
pub mod orbital_elements;
pub mod propagation;
pub mod ref_system;
pub mod simulation;
pub mod time;

pub use impact::{estimate_impact, ImpactEffects, ImpactParams, ImpactorSpec};
pub use orbimpact_errors::OrbImpactError;
pub use orbital_elements::OrbitalElements;
pub use propagation::{
    propagate, propagate_trajectory,
    trajectory::{Position, Trajectory, TrajectorySample},
    PropagationParams, SamplingSchedule,
};
pub use simulation::{simulate, SimulationReport, SimulationRequest};
