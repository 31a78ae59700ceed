//! Mathematical utilities shared by the astronomical modules.

#![allow(clippy::many_single_char_names)]

/// Mathematical constants
pub const PI: f64 = core::f64::consts::PI;

/// Converts degrees to radians.
#[inline]
pub const fn degrees_to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Converts radians to degrees.
#[inline]
pub const fn radians_to_degrees(radians: f64) -> f64 {
    radians.to_degrees()
}

/// Normalizes an angle in degrees to the range [0, 360).
pub fn normalize_degrees_0_to_360(degrees: f64) -> f64 {
    let normalized = degrees % 360.0;
    if normalized < 0.0 {
        // -1e-15 % 360 + 360 rounds to exactly 360.0
        let wrapped = normalized + 360.0;
        if wrapped >= 360.0 { 0.0 } else { wrapped }
    } else {
        normalized
    }
}

/// Euclidean remainder that is always in `[0, modulus)` for positive moduli.
pub fn positive_modulo(value: f64, modulus: f64) -> f64 {
    let r = value.rem_euclid(modulus);
    if r >= modulus { 0.0 } else { r }
}

/// Computes a polynomial using Horner's method for numerical stability.
///
/// Coefficients are ordered [a₀, a₁, a₂, ...] for a₀ + a₁x + a₂x² + ...
pub fn polynomial(coeffs: &[f64], x: f64) -> f64 {
    let Some(&last) = coeffs.last() else {
        return 0.0;
    };

    let mut result = last;
    for &coeff in coeffs.iter().rev().skip(1) {
        result = result.mul_add(x, coeff);
    }
    result
}

/// Converts degrees, arc minutes and arc seconds to decimal degrees.
///
/// The sign of `degrees` applies to the whole angle, so `dms_to_degrees(-7, 21, 40.0)`
/// is −7°21′40″.
pub fn dms_to_degrees(degrees: i32, minutes: u32, seconds: f64) -> f64 {
    let magnitude = f64::from(degrees.unsigned_abs()) + f64::from(minutes) / 60.0 + seconds / 3600.0;
    if degrees < 0 { -magnitude } else { magnitude }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_degree_radian_conversion() {
        assert!((degrees_to_radians(180.0) - PI).abs() < EPSILON);
        assert!((degrees_to_radians(90.0) - PI / 2.0).abs() < EPSILON);
        assert!((radians_to_degrees(PI) - 180.0).abs() < EPSILON);
    }

    #[test]
    fn test_normalize_degrees_0_to_360() {
        assert_eq!(normalize_degrees_0_to_360(0.0), 0.0);
        assert_eq!(normalize_degrees_0_to_360(90.0), 90.0);
        assert_eq!(normalize_degrees_0_to_360(360.0), 0.0);
        assert_eq!(normalize_degrees_0_to_360(450.0), 90.0);
        assert_eq!(normalize_degrees_0_to_360(-90.0), 270.0);
        assert_eq!(normalize_degrees_0_to_360(-360.0), 0.0);
        assert_eq!(normalize_degrees_0_to_360(-1e-15), 0.0);
        assert!(normalize_degrees_0_to_360(-1e-15) < 360.0);
    }

    #[test]
    fn test_positive_modulo() {
        assert!((positive_modulo(-1.0, 29.5) - 28.5).abs() < EPSILON);
        assert!((positive_modulo(30.0, 29.5) - 0.5).abs() < EPSILON);
        assert_eq!(positive_modulo(0.0, 29.5), 0.0);
    }

    #[test]
    fn test_polynomial() {
        assert_eq!(polynomial(&[], 5.0), 0.0);
        assert_eq!(polynomial(&[3.0], 5.0), 3.0);
        assert_eq!(polynomial(&[2.0, 3.0], 4.0), 14.0);
        assert!((polynomial(&[1.0, 2.0, 3.0], 2.0) - 17.0).abs() < EPSILON);
    }

    #[test]
    fn test_dms_to_degrees() {
        assert!((dms_to_degrees(-7, 21, 40.0) + 7.361_111_111).abs() < 1e-8);
        assert!((dms_to_degrees(35, 30, 0.0) - 35.5).abs() < EPSILON);
    }
}
