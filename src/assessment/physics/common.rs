//! Physical constants and the monotone root finder shared by the zone models.

/// Gravitational acceleration, m/s²
pub const GRAVITY: f64 = 9.81;
/// Universal gas constant, J/(kmol·K)
pub const GAS_CONSTANT: f64 = 8_314.46;
/// Standard atmospheric pressure, kPa
pub const ATMOSPHERIC_PRESSURE: f64 = 101.325;
/// Ambient air density, kg/m³
pub const AIR_DENSITY: f64 = 1.2;
/// Speed of sound in air, m/s
pub const SOUND_SPEED: f64 = 340.0;

const ZERO_CELSIUS: f64 = 273.15;
const MAX_EXPANSIONS: usize = 80;
const MAX_BISECTIONS: usize = 200;

pub(crate) fn kelvin(celsius: f64) -> f64 {
    celsius + ZERO_CELSIUS
}

/// Farthest distance at which a non-increasing effect still reaches `target`.
///
/// `effect` must be non-increasing on `[lo, ∞)`. Returns 0 when the effect
/// at `lo` is already below the target, i.e. the zone does not exist.
pub(crate) fn reach_distance<F>(effect: F, target: f64, lo: f64, initial_hi: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    if !(effect(lo) >= target) {
        return 0.0;
    }

    let mut lo = lo;
    let mut hi = initial_hi.max(lo * 2.0).max(1.0);
    let mut expansions = 0;
    while effect(hi) >= target {
        lo = hi;
        hi *= 2.0;
        expansions += 1;
        if expansions >= MAX_EXPANSIONS {
            return hi;
        }
    }

    for _ in 0..MAX_BISECTIONS {
        let mid = 0.5 * (lo + hi);
        if effect(mid) >= target {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo <= 1e-9 * hi.max(1.0) {
            break;
        }
    }
    lo
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reach_distance_inverse_law() {
        // 100 / r reaches 4 at r = 25
        let r = reach_distance(|r| 100.0 / r, 4.0, 0.1, 1.0);
        assert!((r - 25.0).abs() < 1e-6, "got {r}");
    }

    #[test]
    fn test_reach_distance_absent_zone() {
        let r = reach_distance(|r| 1.0 / r, 50.0, 1.0, 10.0);
        assert_eq!(r, 0.0);
    }

    #[test]
    fn test_reach_distance_plateau_then_decay() {
        let f = |r: f64| if r < 5.0 { 10.0 } else { 50.0 / r };
        let r = reach_distance(f, 2.0, 0.0, 1.0);
        assert!((r - 25.0).abs() < 1e-6, "got {r}");
    }

    #[test]
    fn test_kelvin() {
        assert_eq!(kelvin(0.0), 273.15);
        assert_eq!(kelvin(-273.15), 0.0);
    }
}
