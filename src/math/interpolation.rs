//! Linear interpolation for mapping distance ratios onto colors

use num_traits::Float;

/// Interpolate between `a` and `b`; `t` is clamped to `[0, 1]`
pub fn lerp<T: Float>(a: T, b: T, t: T) -> T {
    let t = clamp_unit(t);
    a + (b - a) * t
}

/// Clamp to `[0, 1]`, mapping NaN to 0
pub fn clamp_unit<T: Float>(t: T) -> T {
    if t.is_nan() {
        T::zero()
    } else {
        t.max(T::zero()).min(T::one())
    }
}

/// Channel-wise interpolation between two RGBA colors
pub fn lerp_rgba(from: [u8; 4], to: [u8; 4], t: f64) -> [u8; 4] {
    let mut out = [0u8; 4];
    for ((channel, &start), &end) in out.iter_mut().zip(from.iter()).zip(to.iter()) {
        let value = lerp(f64::from(start), f64::from(end), t).round();
        *channel = value.clamp(0.0, 255.0) as u8;
    }
    out
}
