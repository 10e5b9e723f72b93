//! Angle utilities.
//!
//! All angles are in radians, measured as `atan2(dy, dx)` in grid
//! coordinates (y grows downward).

use std::f32::consts::PI;

/// Two times PI (full circle in radians).
pub const TWO_PI: f32 = 2.0 * PI;

/// Normalize angle to (-π, π].
///
/// `-π` maps to `π` so every heading has exactly one representation.
///
/// # Example
/// ```
/// use marga_nav::core::math::normalize_angle;
/// use std::f32::consts::PI;
///
/// assert!((normalize_angle(-PI) - PI).abs() < 1e-6);
/// assert!((normalize_angle(PI / 2.0 + 2.0 * PI) - PI / 2.0).abs() < 1e-5);
/// ```
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let mut a = angle % TWO_PI;
    if a > PI {
        a -= TWO_PI;
    } else if a <= -PI {
        a += TWO_PI;
    }
    a
}

/// Signed shortest rotation from `from` to `to`, in (-π, π].
#[inline]
pub fn angle_diff(from: f32, to: f32) -> f32 {
    normalize_angle(to - from)
}
