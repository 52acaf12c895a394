use hifitime::{Duration, Epoch, TimeScale};

use crate::constants::{Second, JD};
use crate::impactor_errors::ImpactorError;

/// Build an epoch from a Julian Date expressed in the TDB time scale.
///
/// Argument
/// --------
/// * `jd`: Julian Date (days, TDB), as found in `epoch_osculation` of a NeoWs record
///
/// Return
/// ------
/// * the corresponding [`Epoch`], or an input validation error if `jd` is not finite
pub fn epoch_from_jd_tdb(jd: JD) -> Result<Epoch, ImpactorError> {
    if !jd.is_finite() {
        return Err(ImpactorError::invalid(
            "epoch_osculation",
            format!("Julian Date must be finite, got {jd}"),
        ));
    }
    Ok(Epoch::from_jde_in_time_scale(jd, TimeScale::TDB))
}

/// Transformation from an epoch to a Julian Date in the TDB time scale
pub fn epoch_to_jd_tdb(epoch: &Epoch) -> JD {
    epoch.to_jde_tdb_days()
}

/// Shift an epoch by `dt` seconds (negative values go backward in time)
pub fn shift_epoch(epoch: &Epoch, dt: Second) -> Epoch {
    *epoch + Duration::from_seconds(dt)
}

/// Signed number of seconds elapsed from `from` to `to`
pub fn elapsed_seconds(from: &Epoch, to: &Epoch) -> Second {
    (*to - *from).to_seconds()
}
