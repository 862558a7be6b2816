/// Shared constants for trajectory and torque/drag calculations

/// Default length over which dogleg severity is normalized (m or ft,
/// following the survey units)
pub const DEFAULT_DLS_RESOLUTION: f64 = 30.0;

/// Default steel density in specific gravity, used for pipe sections
/// when no density is given
pub const DEFAULT_STEEL_DENSITY_SG: f64 = 7.85;

/// Default depth step for hook-load sweeps
pub const DEFAULT_HOOKLOAD_STEP: f64 = 30.0;

/// Default friction-factor sweep as (start, stop, step), stop inclusive
pub const DEFAULT_FRICTION_RANGE: (f64, f64, f64) = (0.1, 0.4, 0.1);

/// Tolerance for treating two measured depths as the same node
pub(crate) const MD_EPSILON: f64 = 1e-9;

/// TVD queries match at two decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.236), 1.24);
        assert_eq!(round2(100.0), 100.0);
    }
}
