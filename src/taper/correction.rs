use crate::models::SpeciesBucket;

// Species reference constants (t1, t4, t7) and correction regressions
// (y1, y4, y7) evaluated from dbh and height.
struct CorrectionTerms {
    t1: f64,
    t4: f64,
    t7: f64,
    y1: f64,
    y4: f64,
    y7: f64,
}

fn regression_terms(species: SpeciesBucket, d: f64, h: f64) -> CorrectionTerms {
    let dh = d / (h - 1.3);
    let dh2 = dh * dh;
    let dl = d.ln();
    let hl = h.ln();
    let d2 = d * d;

    match species {
        SpeciesBucket::Pine => CorrectionTerms {
            t1: 1.100553,
            t4: 0.8585458,
            t7: 0.5442665,
            y1: 0.26222 - 0.0016245 * d + 0.010074 * h + 0.06273 * dh
                - 0.011971 * dh2
                - 0.15496 * hl
                - 0.45333 / h,
            y4: -0.38383 - 0.0055445 * h - 0.014121 * dl + 0.17496 * hl + 0.62221 / h,
            y7: -0.179 + 0.037116 * dh - 0.12667 * dl + 0.18974 * hl,
        },
        SpeciesBucket::Spruce => CorrectionTerms {
            t1: 1.0814409,
            t4: 0.8409653,
            t7: 0.4999158,
            y1: -0.003133 * d + 0.01172 * h + 0.48952 * dh
                - 0.078688 * dh2
                - 0.31296 * dl
                + 0.13242 * hl
                - 1.2967 / h,
            y4: -0.0065534 * d + 0.011587 * h - 0.054213 * dh + 0.011557 * dh2 + 0.12598 / h,
            y7: 0.084893 - 0.0064871 * d + 0.012711 * h - 0.10287 * dh + 0.026841 * dh2
                - 0.01932 * dl,
        },
        SpeciesBucket::Birch => CorrectionTerms {
            t1: 1.084544,
            t4: 0.8417135,
            t7: 0.4577622,
            y1: 0.59848 + 0.011356 * d - 0.49612 * dl + 0.46137 * hl - 0.92116 / dh
                + 0.25182 / dh2
                - 0.00019947 * d2,
            y4: -0.96443 + 0.011401 * d + 0.13870 * dl + 1.5003 / h + 0.57278 / dh
                - 0.18735 / dh2
                - 0.00026 * d2,
            y7: -2.1147 + 0.79368 * dl - 0.51810 * hl + 2.9061 / h + 1.6811 / dh
                - 0.40778 / dh2
                - 0.00011148 * d2,
        },
        SpeciesBucket::AlnusOther => CorrectionTerms {
            t1: 1.108743,
            t4: 0.8186044,
            t7: 0.4682397,
            y1: -1.46153 + 0.0487415 * d + 0.663667 * dl
                - 0.827114 * hl
                - 0.00106612 * d2
                + 1.87966 / h
                + 1.85706 / dh
                - 0.467842 / dh2,
            y4: -1.24788 - 0.0218693 * dh2 + 0.496483 * dl - 0.291413 * hl + 1.92579 / h
                + 0.863274 / dh
                - 0.183220 / dh2,
            y7: -0.478730 - 0.104679 * dh + 0.151028 * dl + 0.882010 / h + 0.178386 / dh,
        },
    }
}

/// Clamp a correction to magnitude 0.1, preserving its sign.
fn clamp_correction(y: f64) -> f64 {
    y.abs().min(0.1).copysign(y)
}

/// Five interpolation points for the correction polynomial: fixed anchors
/// at relative heights 0.9 and 0.3 and two offsets computed from the
/// clamped corrections.
pub(crate) fn correction_points(species: SpeciesBucket, dbh: f64, height: f64) -> [f64; 5] {
    let terms = regression_terms(species, dbh, height);
    let y1 = clamp_correction(terms.y1);
    let y4 = clamp_correction(terms.y4);
    let y7 = clamp_correction(terms.y7);

    let scale = terms.t1 / (terms.t1 + y1);
    [
        0.9,
        0.6,
        scale * (terms.t4 + y4) - terms.t4,
        0.3,
        scale * (terms.t7 + y7) - terms.t7,
    ]
}

/// Closed-form cubic through the three non-trivial constraints:
/// y(p[0]) = 0, y(p[1]) = p[2], y(p[3]) = p[4], with y(0) = 0 implied by
/// the missing constant term. Returns the coefficients of x, x², x³.
pub(crate) fn cubic_through(p: &[f64; 5]) -> [f64; 3] {
    let con1 = p[2] / (p[1] * (p[1] - p[0]));
    let con2 = p[4] / (p[3] * (p[3] - p[0]));

    let b3 = (con1 - con2) / (p[1] - p[3]);
    let b2 = con1 - b3 * (p[0] + p[1]);
    let b1 = p[0] * (p[1] * b3 - con1);

    [b1, b2, b3]
}
