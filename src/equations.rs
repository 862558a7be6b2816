//! Minimum-curvature survey equations.
//!
//! Angles cross this module boundary in degrees, matching the survey records;
//! doglegs are converted to radians where the formulas need them.

use nalgebra::Vector3;

/// Dogleg between two stations via the spherical law of cosines, in radians.
/// The arccos argument is clamped to its valid domain against floating-point
/// drift.
pub fn dogleg(inc1: f64, inc2: f64, azi1: f64, azi2: f64) -> f64 {
    let inc1 = inc1.to_radians();
    let inc2 = inc2.to_radians();
    let inner = inc1.cos() * inc2.cos()
        + inc1.sin() * inc2.sin() * (azi2 - azi1).to_radians().cos();
    inner.clamp(-1.0, 1.0).acos()
}

/// Minimum-curvature ratio factor for a segment of dogleg `dl` (radians)
/// spanning `md1..md2`.
pub fn ratio_factor(dl: f64, md1: f64, md2: f64) -> f64 {
    if dl == 0.0 {
        (md2 - md1) / 2.0
    } else {
        (md2 - md1) / dl * (dl / 2.0).tan()
    }
}

/// North component of the unit direction vector at a station.
pub fn north_component(inc: f64, azi: f64) -> f64 {
    inc.to_radians().sin() * azi.to_radians().cos()
}

/// East component of the unit direction vector at a station.
pub fn east_component(inc: f64, azi: f64) -> f64 {
    inc.to_radians().sin() * azi.to_radians().sin()
}

/// Vertical component of the unit direction vector at a station.
pub fn vertical_component(inc: f64) -> f64 {
    inc.to_radians().cos()
}

/// Minimum-curvature position increment (north, east, tvd) over a segment
/// with dogleg `dl` in radians.
pub fn position_delta(
    md1: f64,
    md2: f64,
    inc1: f64,
    azi1: f64,
    inc2: f64,
    azi2: f64,
    dl: f64,
) -> Vector3<f64> {
    let rf = ratio_factor(dl, md1, md2);
    Vector3::new(
        rf * (north_component(inc1, azi1) + north_component(inc2, azi2)),
        rf * (east_component(inc1, azi1) + east_component(inc2, azi2)),
        rf * (vertical_component(inc1) + vertical_component(inc2)),
    )
}

/// Dogleg severity: dogleg (degrees) normalized to the resolution length.
pub fn dogleg_severity(dl: f64, delta_md: f64, resolution: f64) -> f64 {
    if delta_md == 0.0 {
        0.0
    } else {
        dl * resolution / delta_md
    }
}

/// Spherical linear blend of the direction components at the bracket ends,
/// parameterized by the sub-segment dogleg `dl_new` against the bracket's
/// total dogleg `dl_total` (both degrees).
fn blend_component(c1: f64, c2: f64, dl_new: f64, dl_total: f64) -> f64 {
    let total = dl_total.to_radians();
    let new = dl_new.to_radians();
    (total - new).sin() * c1 / total.sin() + new.sin() * c2 / total.sin()
}

/// Recover inclination and azimuth (degrees) of an interior point from the
/// bracketing stations, given the dogleg accumulated from the left bracket.
///
/// Degenerate brackets pass through: a zero total dogleg takes the left
/// point's angles, and an equal inclination (or azimuth) at both ends is kept
/// as-is.
pub fn blend_inc_azi(
    inc1: f64,
    azi1: f64,
    inc2: f64,
    azi2: f64,
    dl_total: f64,
    dl_new: f64,
) -> (f64, f64) {
    if dl_total == 0.0 {
        return (inc1, azi1);
    }

    let dn = blend_component(
        north_component(inc1, azi1),
        north_component(inc2, azi2),
        dl_new,
        dl_total,
    );
    let de = blend_component(
        east_component(inc1, azi1),
        east_component(inc2, azi2),
        dl_new,
        dl_total,
    );
    let dv = blend_component(
        vertical_component(inc1),
        vertical_component(inc2),
        dl_new,
        dl_total,
    );

    let inc = if inc1 == inc2 {
        inc1
    } else {
        (dn * dn + de * de).sqrt().atan2(dv).to_degrees()
    };
    let azi = if azi1 == azi2 {
        azi1
    } else {
        let raw = (de.atan2(dn) + 2.0 * std::f64::consts::PI)
            .rem_euclid(2.0 * std::f64::consts::PI)
            .to_degrees();
        adjust_azimuth(raw, azi1, azi2)
    };

    (inc, azi)
}

/// Wrap an atan2 azimuth into the bracketing range by quarter turns, at most
/// three corrections. Resolves the quadrant ambiguity of the component
/// decomposition.
pub fn adjust_azimuth(mut azi: f64, azi1: f64, azi2: f64) -> f64 {
    let (lo, hi) = if azi1 <= azi2 { (azi1, azi2) } else { (azi2, azi1) };
    let mut count = 1;
    while !(lo <= azi && azi <= hi) {
        if azi > hi {
            azi -= 90.0;
        } else {
            azi += 90.0;
        }
        count += 1;
        if count == 4 {
            break;
        }
    }
    azi
}
