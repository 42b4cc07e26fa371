//! # Impact effects
//!
//! Point-source estimate of the energy released by an impactor and of a few coarse damage
//! proxies:
//!
//! - mass of a homogeneous sphere, `m = ⁴⁄₃·π·(d/2)³·ρ`,
//! - kinetic energy of the **vertical** velocity component, `K = ½·m·(v·sin θ)²`,
//! - TNT equivalent (1 ton TNT ≡ 4.184e9 J),
//! - crater diameter from the quarter-power scaling law `D = k·K^¼ / 1000` (km),
//! - seismic magnitude from the Gutenberg–Richter energy relation
//!   `log10 K = 1.5·Mw + 4.8`, defined as `0` when `K = 0`.
//!
//! The scaling law and the magnitude relation are empirical approximations, not physical
//! models. The impact velocity is supplied by the caller; it can optionally be taken from a
//! propagated orbit with [`ImpactorSpec::with_orbital_velocity`].
//!
//! ## Example
//!
//! ```rust
//! use orbimpact::impact::{estimate_impact, ImpactParams, ImpactorSpec};
//!
//! let spec = ImpactorSpec::new(10.0, 3000.0, 20_000.0, 90.0).unwrap();
//! let effects = estimate_impact(&spec, &ImpactParams::default()).unwrap();
//! assert!((effects.energy_megatons_tnt - 0.0751).abs() < 1e-4);
//! ```
use std::cmp::Ordering::{Equal, Greater};
use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        Degree, Joule, Meter, DEFAULT_CRATER_COEFFICIENT, JOULES_PER_TON_TNT, METERS_PER_KM,
        RADEG, TONS_PER_MEGATON,
    },
    orbimpact_errors::OrbImpactError,
    propagation::trajectory::TrajectorySample,
};

/// Tunable coefficients of the impact model.
///
/// Fields
/// -----------------
/// * `crater_coefficient` – empirical factor `k` of the crater scaling law
///   `D = k·K^¼ / 1000` (km). Default `1e-2`, which yields kilometre-sized craters for
///   typical asteroid energies.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactParams {
    pub crater_coefficient: f64,
}

impl ImpactParams {
    /// Construct a new [`ImpactParams`] with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`ImpactParamsBuilder`].
    pub fn builder() -> ImpactParamsBuilder {
        ImpactParamsBuilder::new()
    }
}

impl Default for ImpactParams {
    fn default() -> Self {
        ImpactParams {
            crater_coefficient: DEFAULT_CRATER_COEFFICIENT,
        }
    }
}

/// Builder for [`ImpactParams`], with validation.
#[derive(Debug, Clone)]
pub struct ImpactParamsBuilder {
    params: ImpactParams,
}

impl Default for ImpactParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ImpactParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: ImpactParams::default(),
        }
    }

    pub fn crater_coefficient(mut self, v: f64) -> Self {
        self.params.crater_coefficient = v;
        self
    }

    /// Return true iff x >= 0.0, finite and comparable (i.e., not NaN).
    #[inline]
    fn ge0(x: f64) -> bool {
        matches!(x.partial_cmp(&0.0), Some(Greater) | Some(Equal)) && x.is_finite()
    }

    /// Finalize the builder.
    ///
    /// Validation rules
    /// -----------------
    /// * `crater_coefficient >= 0.0` and finite.
    pub fn build(self) -> Result<ImpactParams, OrbImpactError> {
        if !Self::ge0(self.params.crater_coefficient) {
            return Err(OrbImpactError::InvalidImpactParameter(
                "crater_coefficient must be >= 0".into(),
            ));
        }
        Ok(self.params)
    }
}

impl fmt::Display for ImpactParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Impact Parameters")?;
            writeln!(f, "-----------------")?;
            writeln!(
                f,
                "  crater_coefficient = {:.3e}    # Crater scaling factor k in D = k·K^(1/4)",
                self.crater_coefficient
            )
        } else {
            write!(
                f,
                "ImpactParams(crater_coefficient={:.3e})",
                self.crater_coefficient
            )
        }
    }
}

/// Physical description of an impactor.
///
/// Units
/// -----
/// * `diameter_m`: meters, `> 0`.
/// * `density_kg_m3`: kg/m³, `> 0`.
/// * `velocity_m_s`: m/s, `≥ 0`.
/// * `impact_angle_deg`: degrees from the horizontal, in `[0, 90]`
///   (`90` = vertical incidence, `0` = grazing).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpactorSpec {
    diameter_m: Meter,
    density_kg_m3: f64,
    velocity_m_s: f64,
    impact_angle_deg: Degree,
}

impl ImpactorSpec {
    /// Build a validated impactor description.
    ///
    /// Errors
    /// ------
    /// * [`OrbImpactError::InvalidInput`] when the diameter or the density is not strictly
    ///   positive, the velocity is negative, the angle lies outside `[0, 90]`, or any value
    ///   is not finite.
    pub fn new(
        diameter_m: Meter,
        density_kg_m3: f64,
        velocity_m_s: f64,
        impact_angle_deg: Degree,
    ) -> Result<Self, OrbImpactError> {
        if !(diameter_m > 0.0 && diameter_m.is_finite()) {
            return Err(OrbImpactError::InvalidInput(format!(
                "impactor diameter must be > 0 m, got {diameter_m}"
            )));
        }
        if !(density_kg_m3 > 0.0 && density_kg_m3.is_finite()) {
            return Err(OrbImpactError::InvalidInput(format!(
                "impactor density must be > 0 kg/m3, got {density_kg_m3}"
            )));
        }
        if !(velocity_m_s >= 0.0 && velocity_m_s.is_finite()) {
            return Err(OrbImpactError::InvalidInput(format!(
                "impact velocity must be >= 0 m/s, got {velocity_m_s}"
            )));
        }
        if !(0.0..=90.0).contains(&impact_angle_deg) {
            return Err(OrbImpactError::InvalidInput(format!(
                "impact angle must be in [0, 90] degrees, got {impact_angle_deg}"
            )));
        }

        Ok(Self {
            diameter_m,
            density_kg_m3,
            velocity_m_s,
            impact_angle_deg,
        })
    }

    /// Same impactor, with the velocity replaced by the vis-viva speed of a propagated sample.
    ///
    /// The orbital speed is heliocentric: it ignores the target's own motion and gravity, so it
    /// is only a rough stand-in for the impact velocity.
    pub fn with_orbital_velocity(&self, sample: &TrajectorySample) -> Result<Self, OrbImpactError> {
        Self::new(
            self.diameter_m,
            self.density_kg_m3,
            sample.speed_km_s * METERS_PER_KM,
            self.impact_angle_deg,
        )
    }

    pub fn diameter_m(&self) -> Meter {
        self.diameter_m
    }

    pub fn density_kg_m3(&self) -> f64 {
        self.density_kg_m3
    }

    pub fn velocity_m_s(&self) -> f64 {
        self.velocity_m_s
    }

    pub fn impact_angle_deg(&self) -> Degree {
        self.impact_angle_deg
    }

    /// Mass of the impactor, modeled as a homogeneous sphere (kg).
    pub fn mass_kg(&self) -> f64 {
        sphere_mass(self.diameter_m, self.density_kg_m3)
    }

    /// Vertical component of the impact velocity (m/s).
    pub fn vertical_velocity_m_s(&self) -> f64 {
        self.velocity_m_s * (self.impact_angle_deg * RADEG).sin()
    }
}

/// Energy and damage proxies of one impact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactEffects {
    pub kinetic_energy_joules: Joule,
    pub energy_megatons_tnt: f64,
    pub crater_diameter_km: f64,
    pub seismic_magnitude: f64,
}

/// Estimate the effects of an impact.
///
/// Arguments
/// ---------
/// * `spec` – validated impactor (see [`ImpactorSpec::new`] for the input domain).
/// * `params` – model coefficients.
///
/// Return
/// ------
/// * the [`ImpactEffects`]; a grazing impact (`θ = 0`) or a zero velocity yields zero energy,
///   zero crater diameter and a magnitude of `0`.
///
/// Errors
/// ------
/// * [`OrbImpactError::InvalidImpactParameter`] if `params` holds an invalid coefficient.
pub fn estimate_impact(
    spec: &ImpactorSpec,
    params: &ImpactParams,
) -> Result<ImpactEffects, OrbImpactError> {
    let params = ImpactParamsBuilder {
        params: params.clone(),
    }
    .build()?;

    let v_vertical = spec.vertical_velocity_m_s();
    let kinetic_energy = 0.5 * spec.mass_kg() * v_vertical * v_vertical;

    let effects = ImpactEffects {
        kinetic_energy_joules: kinetic_energy,
        energy_megatons_tnt: joules_to_megatons_tnt(kinetic_energy),
        crater_diameter_km: params.crater_coefficient * kinetic_energy.powf(0.25) / METERS_PER_KM,
        seismic_magnitude: seismic_magnitude(kinetic_energy),
    };

    log::debug!(
        "impact of a {} m body at {} m/s ({}°): {:.3e} J, {:.3e} Mt TNT",
        spec.diameter_m,
        spec.velocity_m_s,
        spec.impact_angle_deg,
        effects.kinetic_energy_joules,
        effects.energy_megatons_tnt
    );

    Ok(effects)
}

/// Mass of a homogeneous sphere (kg) from its diameter (m) and density (kg/m³).
fn sphere_mass(diameter_m: Meter, density_kg_m3: f64) -> f64 {
    let radius = diameter_m / 2.0;
    (4.0 / 3.0) * PI * radius.powi(3) * density_kg_m3
}

/// Mass (kg) of a spherical body whose diameter is only known as a catalog range.
///
/// The mean of `d_min_km` and `d_max_km` is used as the diameter.
///
/// Errors
/// ------
/// * [`OrbImpactError::InvalidInput`] when a bound is not positive, the bounds are reversed,
///   or the density is not positive.
pub fn mass_from_diameter_range(
    d_min_km: f64,
    d_max_km: f64,
    density_kg_m3: f64,
) -> Result<f64, OrbImpactError> {
    if !(d_min_km > 0.0 && d_max_km.is_finite() && d_min_km <= d_max_km) {
        return Err(OrbImpactError::InvalidInput(format!(
            "diameter range must satisfy 0 < min <= max, got [{d_min_km}, {d_max_km}] km"
        )));
    }
    if !(density_kg_m3 > 0.0 && density_kg_m3.is_finite()) {
        return Err(OrbImpactError::InvalidInput(format!(
            "density must be > 0 kg/m3, got {density_kg_m3}"
        )));
    }
    let mean_diameter_m = (d_min_km + d_max_km) / 2.0 * METERS_PER_KM;
    Ok(sphere_mass(mean_diameter_m, density_kg_m3))
}

/// Convert an energy in joules to tons of TNT.
pub fn joules_to_tons_tnt(energy: Joule) -> f64 {
    energy / JOULES_PER_TON_TNT
}

/// Convert an energy in joules to megatons of TNT.
pub fn joules_to_megatons_tnt(energy: Joule) -> f64 {
    joules_to_tons_tnt(energy) / TONS_PER_MEGATON
}

/// Gutenberg–Richter magnitude proxy, `(log10 K − 4.8) / 1.5`, or `0` for `K ≤ 0`.
pub fn seismic_magnitude(energy: Joule) -> f64 {
    if energy > 0.0 {
        (energy.log10() - 4.8) / 1.5
    } else {
        0.0
    }
}

#[cfg(test)]
mod impact_test {
    use super::*;
    use approx::assert_relative_eq;

    fn reference_spec() -> ImpactorSpec {
        ImpactorSpec::new(10.0, 3000.0, 20_000.0, 90.0).unwrap()
    }

    #[test]
    fn test_reference_scenario() {
        let spec = reference_spec();
        assert_relative_eq!(spec.mass_kg(), 1.5707963267948966e6, max_relative = 1e-12);

        let effects = estimate_impact(&spec, &ImpactParams::default()).unwrap();
        assert_relative_eq!(
            effects.kinetic_energy_joules,
            3.141592653589793e14,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            effects.energy_megatons_tnt,
            0.07508586648159161,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            effects.crater_diameter_km,
            0.042100520791381144,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            effects.seismic_magnitude,
            6.464766581796089,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_oblique_impact() {
        let spec = ImpactorSpec::new(10.0, 3000.0, 20_000.0, 45.0).unwrap();
        let effects = estimate_impact(&spec, &ImpactParams::default()).unwrap();
        // sin²(45°) = 1/2
        assert_relative_eq!(
            effects.kinetic_energy_joules,
            1.5707963267948962e14,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            effects.seismic_magnitude,
            6.2640799180201014,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_energy_scales_with_velocity_squared() {
        let slow = ImpactorSpec::new(50.0, 2600.0, 12_000.0, 90.0).unwrap();
        let fast = ImpactorSpec::new(50.0, 2600.0, 24_000.0, 90.0).unwrap();
        let params = ImpactParams::default();

        let e_slow = estimate_impact(&slow, &params).unwrap().kinetic_energy_joules;
        let e_fast = estimate_impact(&fast, &params).unwrap().kinetic_energy_joules;
        assert_relative_eq!(e_fast, 4.0 * e_slow, max_relative = 1e-12);
    }

    #[test]
    fn test_grazing_impact() {
        let spec = ImpactorSpec::new(10.0, 3000.0, 20_000.0, 0.0).unwrap();
        let effects = estimate_impact(&spec, &ImpactParams::default()).unwrap();
        assert_eq!(effects.kinetic_energy_joules, 0.0);
        assert_eq!(effects.energy_megatons_tnt, 0.0);
        assert_eq!(effects.crater_diameter_km, 0.0);
        assert_eq!(effects.seismic_magnitude, 0.0);

        let resting = ImpactorSpec::new(10.0, 3000.0, 0.0, 60.0).unwrap();
        let effects = estimate_impact(&resting, &ImpactParams::default()).unwrap();
        assert_eq!(effects.kinetic_energy_joules, 0.0);
        assert_eq!(effects.seismic_magnitude, 0.0);
    }

    #[test]
    fn test_crater_coefficient_is_a_parameter() {
        let params = ImpactParams::builder()
            .crater_coefficient(2e-2)
            .build()
            .unwrap();
        let default = estimate_impact(&reference_spec(), &ImpactParams::default()).unwrap();
        let doubled = estimate_impact(&reference_spec(), &params).unwrap();
        assert_relative_eq!(
            doubled.crater_diameter_km,
            2.0 * default.crater_diameter_km,
            max_relative = 1e-12
        );
        assert_eq!(doubled.kinetic_energy_joules, default.kinetic_energy_joules);
    }

    #[test]
    fn test_params_validation() {
        assert!(ImpactParams::builder().crater_coefficient(0.0).build().is_ok());
        assert_eq!(
            ImpactParams::builder()
                .crater_coefficient(-1.0)
                .build()
                .unwrap_err(),
            OrbImpactError::InvalidImpactParameter("crater_coefficient must be >= 0".into())
        );
        let invalid = ImpactParams {
            crater_coefficient: f64::NAN,
        };
        assert!(estimate_impact(&reference_spec(), &invalid).is_err());
    }

    #[test]
    fn test_params_display() {
        let params = ImpactParams::default();
        assert_eq!(format!("{params}"), "ImpactParams(crater_coefficient=1.000e-2)");
        assert!(format!("{params:#}").contains("crater_coefficient = 1.000e-2"));
    }

    #[test]
    fn test_spec_validation() {
        assert_eq!(
            ImpactorSpec::new(0.0, 3000.0, 1.0, 45.0).unwrap_err(),
            OrbImpactError::InvalidInput("impactor diameter must be > 0 m, got 0".into())
        );
        assert!(ImpactorSpec::new(-3.0, 3000.0, 1.0, 45.0).is_err());
        assert!(ImpactorSpec::new(10.0, 0.0, 1.0, 45.0).is_err());
        assert!(ImpactorSpec::new(10.0, f64::NAN, 1.0, 45.0).is_err());
        assert!(ImpactorSpec::new(10.0, 3000.0, -1.0, 45.0).is_err());
        assert!(ImpactorSpec::new(10.0, 3000.0, 1.0, 90.5).is_err());
        assert!(ImpactorSpec::new(10.0, 3000.0, 1.0, -0.1).is_err());
        assert!(ImpactorSpec::new(10.0, 3000.0, 1.0, f64::NAN).is_err());
    }

    #[test]
    fn test_tnt_conversions() {
        assert_eq!(joules_to_tons_tnt(4.184e9), 1.0);
        assert_relative_eq!(joules_to_megatons_tnt(4.184e15), 1.0, max_relative = 1e-15);
    }

    #[test]
    fn test_seismic_magnitude() {
        assert_eq!(seismic_magnitude(0.0), 0.0);
        assert_eq!(seismic_magnitude(-5.0), 0.0);
        assert_relative_eq!(seismic_magnitude(10f64.powf(4.8)), 0.0, epsilon = 1e-12);
        assert_relative_eq!(seismic_magnitude(10f64.powf(7.8)), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mass_from_diameter_range() {
        // 25–35 m body at 2000 kg/m³: 30 m mean diameter
        let mass = mass_from_diameter_range(0.025, 0.035, 2000.0).unwrap();
        assert_relative_eq!(mass, 28274333.882308137, max_relative = 1e-9);

        assert!(mass_from_diameter_range(0.0, 0.035, 2000.0).is_err());
        assert!(mass_from_diameter_range(0.04, 0.035, 2000.0).is_err());
        assert!(mass_from_diameter_range(0.025, 0.035, 0.0).is_err());
    }

    #[test]
    fn test_serialize_effects() {
        let effects = estimate_impact(&reference_spec(), &ImpactParams::default()).unwrap();
        let value = serde_json::to_value(effects).unwrap();
        for key in [
            "kinetic_energy_joules",
            "energy_megatons_tnt",
            "crater_diameter_km",
            "seismic_magnitude",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_determinism() {
        let params = ImpactParams::default();
        let a = estimate_impact(&reference_spec(), &params).unwrap();
        let b = estimate_impact(&reference_spec(), &params).unwrap();
        assert_eq!(a, b);
    }
}
