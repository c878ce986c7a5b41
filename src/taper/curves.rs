use crate::models::SpeciesBucket;

/// Number of terms in the taper basis.
pub(crate) const BASIS_TERMS: usize = 8;

// Base taper coefficients (Laasasenaho 1982) over the sparse basis
// x, x², x³, x⁵, x⁸, x¹³, x²¹, x³⁴ where x is relative distance from the
// tree top. A zero entry means the species' fit drops that basis term.
const PINE: [f64; BASIS_TERMS] = [
    2.1288, -0.63157, -1.6082, 2.4886, -2.4147, 2.3619, -1.7539, 1.0817,
];
const SPRUCE: [f64; BASIS_TERMS] = [
    2.3366, -3.2684, 3.6513, -2.2608, 0.0, 2.1501, -2.7412, 1.8876,
];
const BIRCH: [f64; BASIS_TERMS] = [
    0.93838, 4.1060, -7.8517, 7.8993, -7.5018, 6.3863, -4.3918, 2.1604,
];
const ALNUS: [f64; BASIS_TERMS] = [
    1.9046, 0.49028, -3.4720, 4.5721, -4.4098, 3.7186, -2.5256, 1.4112,
];

/// Base coefficients for a species bucket.
pub(crate) fn base_coefficients(species: SpeciesBucket) -> [f64; BASIS_TERMS] {
    match species {
        SpeciesBucket::Pine => PINE,
        SpeciesBucket::Spruce => SPRUCE,
        SpeciesBucket::Birch => BIRCH,
        SpeciesBucket::AlnusOther => ALNUS,
    }
}

/// Evaluate the taper polynomial at relative height `x = (height - h) / height`.
///
/// With unscaled coefficients this is the dimensionless stem shape; after
/// normalization against the measured dbh it yields diameter in cm.
pub(crate) fn taper_polynomial(coef: &[f64; BASIS_TERMS], x: f64) -> f64 {
    let x2 = x * x;
    let x3 = x * x2;
    let x5 = x2 * x3;
    let x8 = x5 * x3;
    let x13 = x8 * x5;
    let x21 = x13 * x8;
    let x34 = x21 * x13;

    coef[0] * x
        + coef[1] * x2
        + coef[2] * x3
        + coef[3] * x5
        + coef[4] * x8
        + coef[5] * x13
        + coef[6] * x21
        + coef[7] * x34
}
