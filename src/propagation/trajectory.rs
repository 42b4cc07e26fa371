use std::io::Write;

use hifitime::Epoch;
use itertools::{Itertools, MinMaxResult};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{Day, Kilometer, Radian},
    orbimpact_errors::OrbImpactError,
};

/// Heliocentric ecliptic position, in kilometers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: Kilometer,
    pub y: Kilometer,
    pub z: Kilometer,
}

impl Position {
    pub fn new(x: Kilometer, y: Kilometer, z: Kilometer) -> Self {
        Self { x, y, z }
    }

    pub fn as_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Distance from the origin (km).
    pub fn norm(&self) -> Kilometer {
        self.as_vector().norm()
    }
}

impl From<Vector3<f64>> for Position {
    fn from(v: Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// One propagated sample with its intermediate quantities.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectorySample {
    /// Index in the schedule, `0` is the element epoch.
    pub index: usize,
    /// Elapsed time since the element epoch (days).
    pub elapsed_days: Day,
    /// Absolute epoch, when the schedule carries a start epoch.
    pub epoch: Option<Epoch>,
    /// Mean anomaly, reduced to `[0, 2π)`.
    pub mean_anomaly: Radian,
    pub eccentric_anomaly: Radian,
    /// True anomaly, in `(−π, π]`.
    pub true_anomaly: Radian,
    /// Heliocentric distance (km).
    pub radius_km: Kilometer,
    /// Vis-viva orbital speed (km/s).
    pub speed_km_s: f64,
    /// Whether the Kepler solve met its tolerance within the iteration budget.
    pub kepler_converged: bool,
    pub position: Position,
}

/// Time-ordered samples of a propagated orbit.
///
/// The order of the samples is chronological and is never changed after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    samples: Vec<TrajectorySample>,
}

#[derive(Serialize)]
struct CsvRow {
    index: usize,
    elapsed_days: f64,
    x_km: f64,
    y_km: f64,
    z_km: f64,
    r_km: f64,
    speed_km_s: f64,
}

impl Trajectory {
    pub(crate) fn new(samples: Vec<TrajectorySample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Positions only, in chronological order.
    pub fn positions(&self) -> Vec<Position> {
        self.samples.iter().map(|s| s.position).collect()
    }

    pub fn into_positions(self) -> Vec<Position> {
        self.samples.into_iter().map(|s| s.position).collect()
    }

    /// `true` if every Kepler solve of the trajectory converged.
    pub fn all_converged(&self) -> bool {
        self.samples.iter().all(|s| s.kepler_converged)
    }

    /// Smallest and largest heliocentric distance over the samples (km).
    ///
    /// Returns `None` for an empty trajectory.
    pub fn radius_range(&self) -> Option<(Kilometer, Kilometer)> {
        match self
            .samples
            .iter()
            .map(|s| s.radius_km)
            .minmax_by(|a, b| a.total_cmp(b))
        {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(r) => Some((r, r)),
            MinMaxResult::MinMax(lo, hi) => Some((lo, hi)),
        }
    }

    /// Write the trajectory as CSV, one row per sample.
    ///
    /// Columns: `index,elapsed_days,x_km,y_km,z_km,r_km,speed_km_s`.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), OrbImpactError> {
        let mut wtr = csv::Writer::from_writer(writer);
        for s in &self.samples {
            wtr.serialize(CsvRow {
                index: s.index,
                elapsed_days: s.elapsed_days,
                x_km: s.position.x,
                y_km: s.position.y,
                z_km: s.position.z,
                r_km: s.radius_km,
                speed_km_s: s.speed_km_s,
            })?;
        }
        wtr.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}
