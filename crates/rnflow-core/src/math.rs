//! Geometry kernel.
//!
//! Trigonometry is evaluated with a Taylor series to a fixed absolute
//! tolerance instead of the platform `sin`/`cos`, so unrotation results are
//! identical on every target.

/// Absolute tolerance at which the series evaluation stops.
pub const SERIES_TOLERANCE: f64 = 1e-15;

/// Upper bound on the number of series terms. Inputs in the design tool's
/// rotation range converge in well under 40 terms.
const MAX_SERIES_TERMS: u32 = 200;

/// Sine of `x` radians.
pub fn sin(x: f64) -> f64 {
    let mut term = x;
    let mut sum = term;
    let mut prev = 0.0;

    let mut i = 1.0;
    for _ in 0..MAX_SERIES_TERMS {
        if (sum - prev).abs() <= SERIES_TOLERANCE {
            break;
        }
        term *= -x * x / (2.0 * i * (2.0 * i + 1.0));
        prev = sum;
        sum += term;
        i += 1.0;
    }

    sum
}

/// Cosine of `x` radians.
pub fn cos(x: f64) -> f64 {
    let mut term: f64 = 1.0;
    let mut sum = term;
    let mut prev = 0.0;

    let mut i = 1.0;
    for _ in 0..MAX_SERIES_TERMS {
        if (sum - prev).abs() <= SERIES_TOLERANCE {
            break;
        }
        term *= -x * x / ((2.0 * i - 1.0) * (2.0 * i));
        prev = sum;
        sum += term;
        i += 1.0;
    }

    sum
}

/// Convert degrees to radians.
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Round to `decimal_places`, halves away from zero.
///
/// `round(2.5, 0) == 3.0` and `round(-2.5, 0) == -3.0`.
pub fn round(value: f64, decimal_places: i32) -> f64 {
    let multiplier = 10f64.powi(decimal_places);
    let sign = if value >= 0.0 { 1.0 } else { -1.0 };
    let rounded = sign * (value.abs() * multiplier + 0.5).floor() / multiplier;
    // Normalize negative zero so it never prints as "-0".
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Recover the axis-aligned origin of a box the design tool reports rotated.
///
/// `origin` is the stored (rotated) top-left corner, `width`/`height` the
/// unrotated extents and `rotation` the angle in degrees. The rotation
/// center is derived from the origin plus the rotated half-extents, and the
/// inverse rotation is applied to the origin around that center.
pub fn unrotate_origin(origin: Point, width: f64, height: f64, rotation: f64) -> Point {
    let theta = degrees_to_radians(rotation);
    let sin_theta = sin(theta);
    let cos_theta = cos(theta);

    let half_width = width / 2.0;
    let half_height = height / 2.0;
    let center = Point::new(
        origin.x + half_width * cos_theta + half_height * sin_theta,
        origin.y - half_width * sin_theta + half_height * cos_theta,
    );

    Point::new(
        (origin.x - center.x) * cos_theta - (origin.y - center.y) * sin_theta + center.x,
        (origin.x - center.x) * sin_theta + (origin.y - center.y) * cos_theta + center.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_matches_platform_trig() {
        for step in -36..=36 {
            let x = degrees_to_radians(step as f64 * 10.0);
            assert!((sin(x) - x.sin()).abs() < 1e-9, "sin({x})");
            assert!((cos(x) - x.cos()).abs() < 1e-9, "cos({x})");
        }
    }

    #[test]
    fn test_trig_at_zero() {
        assert_eq!(sin(0.0), 0.0);
        assert_eq!(cos(0.0), 1.0);
    }

    #[test]
    fn test_cos_at_half_turns() {
        use std::f64::consts::PI;
        assert!((cos(PI) + 1.0).abs() < 1e-12);
        assert!(cos(PI / 2.0).abs() < 1e-12);
        assert!((cos(-PI) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round(2.5, 0), 3.0);
        assert_eq!(round(-2.5, 0), -3.0);
        assert_eq!(round(0.125, 2), 0.13);
        assert_eq!(round(1.2345, 0), 1.0);
        assert_eq!(round(-0.4, 0), 0.0);
        assert!(round(-0.4, 0).is_sign_positive());
    }

    #[test]
    fn test_unrotate_without_rotation_is_identity() {
        let p = unrotate_origin(Point::new(12.0, 34.0), 100.0, 50.0, 0.0);
        assert!((p.x - 12.0).abs() < 1e-12);
        assert!((p.y - 34.0).abs() < 1e-12);
    }

    #[test]
    fn test_unrotate_quarter_turn() {
        // A 100x50 box rotated 90 degrees counter-clockwise about its own
        // center: its stored origin sits at the rotated top-left corner.
        let origin = Point::new(25.0, 75.0);
        let p = unrotate_origin(origin, 100.0, 50.0, 90.0);
        assert!((round(p.x, 6) - 0.0).abs() < 1e-6, "x = {}", p.x);
        assert!((round(p.y, 6) - 0.0).abs() < 1e-6, "y = {}", p.y);
    }

    proptest::proptest! {
        #[test]
        fn test_round_is_idempotent(value in -1.0e6f64..1.0e6, places in 0i32..4) {
            let once = round(value, places);
            proptest::prop_assert_eq!(round(once, places), once);
        }

        #[test]
        fn test_unrotate_full_turn_is_identity(x in -500.0f64..500.0, y in -500.0f64..500.0) {
            let p = unrotate_origin(Point::new(x, y), 80.0, 40.0, 360.0);
            proptest::prop_assert!((p.x - x).abs() < 1e-6 && (p.y - y).abs() < 1e-6);
        }
    }
}
