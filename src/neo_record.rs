//! Mapping of near-Earth-object catalog records (NASA NeoWs `neo` objects) onto the crate types.
//!
//! Only the parts of a record the simulation needs are kept: identity, hazard flag, the
//! estimated diameter range and the osculating orbital elements. The catalog sends the orbital
//! elements as decimal strings (`".2228359407071628"`); plain JSON numbers are accepted too.
//! Fetching records is left to the caller.
use hifitime::Epoch;
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use crate::{
    constants::{Meter, METERS_PER_KM},
    impact::mass_from_diameter_range,
    orbimpact_errors::OrbImpactError,
    orbital_elements::OrbitalElements,
    time::jd_tdb_to_epoch,
};

/// `orbital_data` block of a catalog record.
///
/// Every field is optional at deserialization time; the conversion into
/// [`OrbitalElements`] reports the first missing element.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NeoOrbitalData {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub semi_major_axis: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub eccentricity: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub inclination: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub ascending_node_longitude: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub perihelion_argument: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub mean_anomaly: Option<f64>,
    /// Osculation epoch, Julian Date (TDB).
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub epoch_osculation: Option<f64>,
    pub orbit_id: Option<String>,
}

impl NeoOrbitalData {
    /// Osculation epoch of the elements, if the record carries one.
    pub fn epoch_osculation(&self) -> Option<Epoch> {
        self.epoch_osculation.map(jd_tdb_to_epoch)
    }
}

fn required(value: Option<f64>, field: &'static str) -> Result<f64, OrbImpactError> {
    value.ok_or(OrbImpactError::MissingRecordField(field))
}

impl TryFrom<&NeoOrbitalData> for OrbitalElements {
    type Error = OrbImpactError;

    fn try_from(data: &NeoOrbitalData) -> Result<Self, Self::Error> {
        OrbitalElements::new(
            required(data.semi_major_axis, "semi_major_axis")?,
            required(data.eccentricity, "eccentricity")?,
            required(data.inclination, "inclination")?,
            required(data.ascending_node_longitude, "ascending_node_longitude")?,
            required(data.perihelion_argument, "perihelion_argument")?,
            required(data.mean_anomaly, "mean_anomaly")?,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DiameterRange {
    pub estimated_diameter_min: f64,
    pub estimated_diameter_max: f64,
}

/// Estimated diameter of a catalog object, per unit system. Only the metric ranges are kept.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EstimatedDiameter {
    pub meters: Option<DiameterRange>,
    pub kilometers: Option<DiameterRange>,
}

/// One near-Earth object as returned by the catalog lookup endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NeoRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_potentially_hazardous_asteroid: bool,
    pub estimated_diameter: Option<EstimatedDiameter>,
    pub orbital_data: NeoOrbitalData,
}

impl NeoRecord {
    pub fn orbital_elements(&self) -> Result<OrbitalElements, OrbImpactError> {
        OrbitalElements::try_from(&self.orbital_data)
    }

    /// Estimated diameter range in meters, falling back on the kilometer range.
    pub fn diameter_range_m(&self) -> Option<(Meter, Meter)> {
        let diameter = self.estimated_diameter.as_ref()?;
        diameter
            .meters
            .map(|r| (r.estimated_diameter_min, r.estimated_diameter_max))
            .or_else(|| {
                diameter.kilometers.map(|r| {
                    (
                        r.estimated_diameter_min * METERS_PER_KM,
                        r.estimated_diameter_max * METERS_PER_KM,
                    )
                })
            })
    }

    /// Mean of the estimated diameter range (m).
    pub fn mean_diameter_m(&self) -> Option<Meter> {
        self.diameter_range_m().map(|(lo, hi)| (lo + hi) / 2.0)
    }

    /// Mass of the object (kg) assuming a homogeneous sphere of the mean estimated diameter.
    ///
    /// Return
    /// ------
    /// * `Ok(None)` when the record has no diameter estimate.
    pub fn estimated_mass_kg(&self, density_kg_m3: f64) -> Result<Option<f64>, OrbImpactError> {
        self.diameter_range_m()
            .map(|(lo, hi)| {
                mass_from_diameter_range(lo / METERS_PER_KM, hi / METERS_PER_KM, density_kg_m3)
            })
            .transpose()
    }
}

#[cfg(test)]
pub(crate) mod neo_record_test {
    use super::*;
    use approx::assert_relative_eq;

    pub(crate) const EROS_JSON: &str = r#"{
        "id": "2000433",
        "neo_reference_id": "2000433",
        "name": "433 Eros (A898 PA)",
        "absolute_magnitude_h": 10.39,
        "estimated_diameter": {
            "kilometers": {"estimated_diameter_min": 22.1, "estimated_diameter_max": 49.4},
            "meters": {"estimated_diameter_min": 22100.0, "estimated_diameter_max": 49400.0}
        },
        "is_potentially_hazardous_asteroid": false,
        "orbital_data": {
            "orbit_id": "659",
            "epoch_osculation": "2461000.5",
            "eccentricity": ".2228359407071628",
            "semi_major_axis": "1.458120998474684",
            "inclination": "10.82846651399785",
            "ascending_node_longitude": "304.2701025753316",
            "perihelion_argument": "178.9297536744151",
            "mean_anomaly": "310.5543277370992",
            "orbit_class": {"orbit_class_type": "AMO"}
        }
    }"#;

    #[test]
    fn test_record_from_catalog_json() {
        let record: NeoRecord = serde_json::from_str(EROS_JSON).unwrap();
        assert_eq!(record.id, "2000433");
        assert_eq!(record.name, "433 Eros (A898 PA)");
        assert!(!record.is_potentially_hazardous_asteroid);
        assert_eq!(record.orbital_data.orbit_id.as_deref(), Some("659"));

        let elements = record.orbital_elements().unwrap();
        assert_eq!(elements.semi_major_axis_au(), 1.458120998474684);
        assert_eq!(elements.eccentricity(), 0.2228359407071628);
        assert_eq!(elements.inclination_deg(), 10.82846651399785);
        assert_eq!(elements.ascending_node_longitude_deg(), 304.2701025753316);
        assert_eq!(elements.argument_of_periapsis_deg(), 178.9297536744151);
        assert_eq!(elements.mean_anomaly_deg(), 310.5543277370992);

        let epoch = record.orbital_data.epoch_osculation().unwrap();
        assert_relative_eq!(epoch.to_jde_tdb_days(), 2_461_000.5, epsilon = 1e-6);
    }

    #[test]
    fn test_numeric_fields_accepted() {
        let json = r#"{
            "semi_major_axis": 1.0, "eccentricity": 0.1, "inclination": 5.0,
            "ascending_node_longitude": 10.0, "perihelion_argument": 20.0, "mean_anomaly": 30.0
        }"#;
        let data: NeoOrbitalData = serde_json::from_str(json).unwrap();
        let elements = OrbitalElements::try_from(&data).unwrap();
        assert_eq!(elements.eccentricity(), 0.1);
        assert_eq!(data.epoch_osculation(), None);
    }

    #[test]
    fn test_missing_field() {
        let json = r#"{
            "semi_major_axis": "1.0", "eccentricity": "0.1", "inclination": "5.0",
            "ascending_node_longitude": "10.0", "perihelion_argument": "20.0"
        }"#;
        let data: NeoOrbitalData = serde_json::from_str(json).unwrap();
        assert_eq!(
            OrbitalElements::try_from(&data),
            Err(OrbImpactError::MissingRecordField("mean_anomaly"))
        );
    }

    #[test]
    fn test_out_of_domain_and_garbage() {
        let hyperbolic = r#"{
            "semi_major_axis": "1.0", "eccentricity": "1.2", "inclination": "5.0",
            "ascending_node_longitude": "10.0", "perihelion_argument": "20.0", "mean_anomaly": "0"
        }"#;
        let data: NeoOrbitalData = serde_json::from_str(hyperbolic).unwrap();
        assert!(matches!(
            OrbitalElements::try_from(&data),
            Err(OrbImpactError::InvalidInput(_))
        ));

        let garbage = r#"{"semi_major_axis": "one AU"}"#;
        assert!(serde_json::from_str::<NeoOrbitalData>(garbage).is_err());
    }

    #[test]
    fn test_diameter_and_mass() {
        let record: NeoRecord = serde_json::from_str(EROS_JSON).unwrap();
        assert_eq!(record.diameter_range_m(), Some((22100.0, 49400.0)));
        assert_relative_eq!(record.mean_diameter_m().unwrap(), 35750.0);

        // 4/3·π·(17875 m)³·2000
        let mass = record.estimated_mass_kg(2000.0).unwrap().unwrap();
        assert_relative_eq!(mass, 4.78472251498742e16, max_relative = 1e-12);

        let km_only = NeoRecord {
            estimated_diameter: Some(EstimatedDiameter {
                meters: None,
                kilometers: Some(DiameterRange {
                    estimated_diameter_min: 0.02,
                    estimated_diameter_max: 0.04,
                }),
            }),
            ..record.clone()
        };
        assert_eq!(km_only.diameter_range_m(), Some((20.0, 40.0)));

        let unknown = NeoRecord {
            estimated_diameter: None,
            ..record
        };
        assert_eq!(unknown.mean_diameter_m(), None);
        assert_eq!(unknown.estimated_mass_kg(2000.0), Ok(None));
    }
}
