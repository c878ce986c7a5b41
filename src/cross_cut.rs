use tracing::debug;

use crate::bucking::optimize;
use crate::error::BuckingError;
use crate::models::{GradeYield, PriceRow, SpeciesBucket};
use crate::taper::build_stem_profile;

/// Default profile increment in cm of stem length.
pub const DEFAULT_STEP: u32 = 10;

/// Default stump height in meters.
pub const DEFAULT_STUMP_HEIGHT: f64 = 0.1;

/// Grade id reported for a stem too thin to measure.
const ENERGY_WOOD_GRADE: i64 = 3;

/// Hard-coded volume (m³) credited to an unmeasurable stem.
const ENERGY_WOOD_VOLUME: f64 = 0.000045;

/// Unit price (currency per m³) for energy wood.
const ENERGY_WOOD_UNIT_PRICE: f64 = 20.0;

/// Signature shared by every cross-cutting back end. [`cross_cut`] is the
/// default one; alternates must be drop-in replacements.
pub type CrossCutFn =
    fn(SpeciesBucket, Option<f64>, f64, &[PriceRow], u32) -> Result<Vec<GradeYield>, BuckingError>;

/// Cross-cut one tree stem into value-optimal log segments.
///
/// `dbh` is the breast-height diameter in cm; `height` in m is rounded to
/// the nearest integer meter before the taper fit (the taper formulas
/// operate on integer-meter heights). `step` is the profile increment in
/// cm of stem length.
///
/// Returns one [`GradeYield`] per distinct grade id in `price_table`,
/// ascending by id. A missing or zero `dbh` short-circuits to the fixed
/// energy-wood triple without running the taper or the optimizer; a
/// negative `dbh` is an upstream data error and fails fast.
///
/// Pure function of its inputs, so concurrent calls need no coordination.
pub fn cross_cut(
    species: SpeciesBucket,
    dbh: Option<f64>,
    height: f64,
    price_table: &[PriceRow],
    step: u32,
) -> Result<Vec<GradeYield>, BuckingError> {
    if let Some(d) = dbh {
        if d < 0.0 {
            return Err(BuckingError::ValidationError(format!(
                "dbh must be non-negative, got {d}"
            )));
        }
        if !d.is_finite() {
            return Err(BuckingError::ValidationError(format!(
                "dbh must be finite, got {d}"
            )));
        }
    }

    let Some(dbh) = dbh.filter(|&d| d != 0.0) else {
        debug!(%species, "no measurable dbh, reporting energy wood defaults");
        return Ok(vec![GradeYield {
            grade: ENERGY_WOOD_GRADE,
            volume: ENERGY_WOOD_VOLUME,
            value: ENERGY_WOOD_VOLUME * ENERGY_WOOD_UNIT_PRICE,
        }]);
    };

    if !height.is_finite() {
        return Err(BuckingError::ValidationError(format!(
            "height must be finite, got {height}"
        )));
    }
    if step == 0 {
        return Err(BuckingError::ValidationError(
            "step must be positive".to_string(),
        ));
    }

    // Ties round to even so 24.5 m and 23.5 m both become 24 m.
    let height = height.round_ties_even();
    // Letting a height at or below breast height through would feed log()
    // and division NaNs into the correction formulas, which the DP's
    // comparisons would then silently skip. Fail fast instead.
    if height <= 1.3 {
        return Err(BuckingError::ValidationError(format!(
            "height must exceed 1.3 m after rounding, got {height} m"
        )));
    }

    let n = (height * 100.0 / f64::from(step)).floor() as i64 - 1;
    if n < 1 {
        return Err(BuckingError::ValidationError(format!(
            "step of {step} cm leaves no profile increments for a {height} m stem"
        )));
    }

    let profile = build_stem_profile(species, dbh, height, n as usize, DEFAULT_STUMP_HEIGHT);
    let result = optimize(&profile, price_table, step);
    debug!(
        %species,
        dbh,
        height,
        increments = profile.len(),
        grades = result.len(),
        "cross-cut stem"
    );
    Ok(result)
}
