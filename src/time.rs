use hifitime::{Epoch, TimeScale, Unit};

use crate::constants::Day;

/// Build an [`Epoch`] from a Modified Julian Date in the TT time scale.
///
/// Argument
/// --------
/// * `mjd`: Modified Julian Date (days, TT)
///
/// Return
/// ------
/// * the corresponding [`Epoch`]
pub fn mjd_tt_to_epoch(mjd: f64) -> Epoch {
    Epoch::from_mjd_in_time_scale(mjd, TimeScale::TT)
}

/// Build an [`Epoch`] from a Julian Date in the TDB time scale, the scale of catalog
/// osculation epochs.
pub fn jd_tdb_to_epoch(jd: f64) -> Epoch {
    Epoch::from_jde_tdb(jd)
}

/// Epoch reached after `elapsed` days from `start`.
///
/// Argument
/// --------
/// * `start`: reference epoch of a sampling schedule
/// * `elapsed`: elapsed time in days, may be fractional
///
/// Return
/// ------
/// * `start + elapsed`, in the time scale of `start`
pub fn epoch_after_days(start: Epoch, elapsed: Day) -> Epoch {
    start + elapsed * Unit::Day
}

#[cfg(test)]
mod time_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mjd_roundtrip_through_epoch() {
        let epoch = mjd_tt_to_epoch(60000.5);
        assert_relative_eq!(epoch.to_mjd_tt_days(), 60000.5, epsilon = 1e-9);
    }

    #[test]
    fn test_jd_to_epoch() {
        let epoch = jd_tdb_to_epoch(2_461_000.5);
        assert_relative_eq!(epoch.to_jde_tdb_days(), 2_461_000.5, epsilon = 1e-6);

        // TDB and TT differ by less than 2 ms
        assert_relative_eq!(epoch.to_mjd_tt_days(), 61000.0, epsilon = 1e-7);
    }

    #[test]
    fn test_epoch_after_days() {
        let start = mjd_tt_to_epoch(59215.0);
        let later = epoch_after_days(start, 365.25);
        assert_relative_eq!(later.to_mjd_tt_days(), 59580.25, epsilon = 1e-9);

        let same = epoch_after_days(start, 0.0);
        assert_eq!(same, start);
    }
}
