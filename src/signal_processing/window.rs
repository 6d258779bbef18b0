use std::f64::consts::PI;

use crate::constants::{BESSEL_ASYMPTOTIC_THRESHOLD, BESSEL_SERIES_EPSILON};

/// Zeroth-order modified Bessel function of the first kind.
///
/// Evaluated from the power series `I0(x) = sum(((x/2)^k / k!)^2)`, which converges
/// quickly for the shape parameters used in filter design. Overflows to infinity
/// for `|x|` above roughly 713.
pub fn bessel_i0(x: f64) -> f64 {
    let half_x_sq = (x / 2.0) * (x / 2.0);
    let mut sum = 1.0;
    let mut term = 1.0;
    let mut k = 1.0;

    loop {
        term *= half_x_sq / (k * k);
        sum += term;
        if !sum.is_finite() {
            return f64::INFINITY;
        }
        if term < BESSEL_SERIES_EPSILON * sum {
            break;
        }
        k += 1.0;
    }

    sum
}

/// Exponentially scaled Bessel I0, `exp(-|x|) * I0(x)`. Finite for every finite `x`.
///
/// Large arguments use the asymptotic expansion
/// `I0(x) ~ e^x / sqrt(2 pi x) * sum(((2k-1)!!)^2 / (k! (8x)^k))`.
pub fn bessel_i0_scaled(x: f64) -> f64 {
    let x = x.abs();
    if x <= BESSEL_ASYMPTOTIC_THRESHOLD {
        return bessel_i0(x) * (-x).exp();
    }

    let mut sum = 1.0;
    let mut term = 1.0;
    let mut k = 1.0;
    loop {
        let next = term * (2.0 * k - 1.0) * (2.0 * k - 1.0) / (8.0 * x * k);
        // The expansion diverges once terms start growing.
        if next < BESSEL_SERIES_EPSILON * sum || next >= term {
            break;
        }
        sum += next;
        term = next;
        k += 1.0;
    }

    sum / (2.0 * PI * x).sqrt()
}

/// Symmetric Kaiser window of length `len` with shape parameter `beta`.
///
/// `beta = 0` is rectangular; larger values taper harder towards the ends. When
/// `I0(beta)` is not representable the ratio is taken between scaled values, so
/// every finite `beta` gives a finite window.
pub fn kaiser(len: usize, beta: f64) -> Vec<f64> {
    match len {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => {
            let span = (len - 1) as f64;
            let arg = |n: usize| {
                let ratio = 2.0 * n as f64 / span - 1.0;
                (1.0 - ratio * ratio).max(0.0).sqrt()
            };

            let denom = bessel_i0(beta);
            if denom.is_finite() {
                (0..len).map(|n| bessel_i0(beta * arg(n)) / denom).collect()
            } else {
                let scaled_denom = bessel_i0_scaled(beta);
                (0..len)
                    .map(|n| {
                        let a = arg(n);
                        bessel_i0_scaled(beta * a) / scaled_denom * (beta * (a - 1.0)).exp()
                    })
                    .collect()
            }
        }
    }
}
