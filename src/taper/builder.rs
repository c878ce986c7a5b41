use crate::models::{SpeciesBucket, StemProfile};

use super::correction;
use super::curves;

/// Integration step along the stem, in meters.
const INTEGRATION_STEP: f64 = 0.1;

/// Breast height, in meters.
const BREAST_HEIGHT: f64 = 1.3;

/// Build the stem profile for one tree.
///
/// Fits the species taper curve to the measured `dbh` (cm) and `height`
/// (m, integer-valued), integrates diameter and cumulative volume from
/// `stump_height` to the top, and resamples the result onto exactly `n`
/// profile points. Diameters are scaled ×10 into mm so they compare
/// directly against price-table top-diameter thresholds.
///
/// Preconditions (`dbh > 0`, `height > 1.3`, `height > stump_height`) are
/// enforced by the facade; this function is infallible on validated input.
pub fn build_stem_profile(
    species: SpeciesBucket,
    dbh: f64,
    height: f64,
    n: usize,
    stump_height: f64,
) -> StemProfile {
    debug_assert!(dbh > 0.0, "dbh must be positive");
    debug_assert!(height > BREAST_HEIGHT, "height must exceed breast height");
    debug_assert!(height > stump_height, "height must exceed stump height");

    let coef = fitted_coefficients(species, dbh, height);

    // Walk the stem at fixed resolution, integrating basal area by the
    // trapezoidal rule to get cumulative volume at each grid point.
    let grid = integration_grid(stump_height, height);
    let diameters: Vec<f64> = grid
        .iter()
        .map(|&h| curves::taper_polynomial(&coef, (height - h) / height))
        .collect();
    let mut cum_volumes = Vec::with_capacity(grid.len());
    cum_volumes.push(0.0);
    for j in 1..grid.len() {
        let g0 = basal_area(diameters[j - 1]);
        let g1 = basal_area(diameters[j]);
        let piece = 0.5 * (g0 + g1) * (grid[j] - grid[j - 1]);
        cum_volumes.push(cum_volumes[j - 1] + piece);
    }

    // Resample onto the n increments the optimizer expects, dropping the
    // stump point itself: the k-th profile point sits at the top of the
    // k-th increment.
    let span = height - stump_height;
    let mut out_diameters = Vec::with_capacity(n);
    let mut out_heights = Vec::with_capacity(n);
    let mut out_volumes = Vec::with_capacity(n);
    let mut cursor = 0usize;
    for k in 0..n {
        let target = stump_height + (k + 1) as f64 * span / n as f64;
        while cursor + 2 < grid.len() && grid[cursor + 1] < target {
            cursor += 1;
        }
        let (lo, hi) = (grid[cursor], grid[cursor + 1]);
        let w = ((target - lo) / (hi - lo)).clamp(0.0, 1.0);
        out_diameters.push(10.0 * lerp(diameters[cursor], diameters[cursor + 1], w));
        out_heights.push(target);
        out_volumes.push(lerp(cum_volumes[cursor], cum_volumes[cursor + 1], w));
    }

    StemProfile {
        diameters: out_diameters,
        heights: out_heights,
        cum_volumes: out_volumes,
    }
}

/// Base coefficients corrected for this tree and normalized so the curve
/// reproduces the measured dbh exactly at breast height.
fn fitted_coefficients(species: SpeciesBucket, dbh: f64, height: f64) -> [f64; curves::BASIS_TERMS] {
    let mut coef = curves::base_coefficients(species);
    let p = correction::correction_points(species, dbh, height);
    let b = correction::cubic_through(&p);
    for (c, delta) in coef.iter_mut().zip(b.iter()) {
        *c += delta;
    }

    let shape_at_bh = curves::taper_polynomial(&coef, (height - BREAST_HEIGHT) / height);
    let d20 = dbh / shape_at_bh;
    for c in coef.iter_mut() {
        *c *= d20;
    }
    coef
}

/// Grid points from the stump to the top: fixed steps plus one final
/// partial step landing exactly on `height`.
fn integration_grid(stump_height: f64, height: f64) -> Vec<f64> {
    let mut grid = Vec::new();
    let mut k = 0usize;
    loop {
        let h = stump_height + k as f64 * INTEGRATION_STEP;
        if h >= height - 1e-9 {
            break;
        }
        grid.push(h);
        k += 1;
    }
    grid.push(height);
    grid
}

/// Basal area in m² from a diameter in cm.
fn basal_area(diameter_cm: f64) -> f64 {
    let d = diameter_cm / 100.0;
    d * d * std::f64::consts::PI / 4.0
}

fn lerp(a: f64, b: f64, w: f64) -> f64 {
    a + (b - a) * w
}
