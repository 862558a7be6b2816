//! Exact geometry queries at arbitrary depth.
//!
//! MD queries recover inclination/azimuth from a spherical blend of the
//! bracketing stations; TVD queries reduce to MD via a direct solve in
//! vertical sections or a bisection search elsewhere. Both exist as
//! read-only lookups and as mutating insertions into the trajectory.

use crate::constants::{round2, MD_EPSILON};
use crate::equations;
use crate::error::{Result, WellboreError};
use crate::survey::{SectionType, SurveyPoint, Trajectory};

const MAX_BISECTION_STEPS: usize = 200;

enum Bracket {
    Exact(usize),
    Between(usize, usize),
}

pub(crate) fn point_at_md(trajectory: &Trajectory, md: f64) -> Result<SurveyPoint> {
    check_md_range(trajectory, md)?;
    match md_bracket(trajectory, md)? {
        Bracket::Exact(idx) => Ok(trajectory.points[idx]),
        Bracket::Between(i1, i2) => Ok(interp_between(trajectory, i1, i2, md)),
    }
}

pub(crate) fn point_at_tvd(trajectory: &Trajectory, tvd: f64) -> Result<SurveyPoint> {
    check_tvd_range(trajectory, tvd)?;
    match tvd_bracket(trajectory, tvd)? {
        Bracket::Exact(idx) => Ok(trajectory.points[idx]),
        Bracket::Between(i1, i2) => {
            let md = solve_md_for_tvd(trajectory, tvd, i1, i2)?;
            point_at_md(trajectory, md)
        }
    }
}

pub(crate) fn insert_at_md(trajectory: &mut Trajectory, md: f64) -> Result<SurveyPoint> {
    check_md_range(trajectory, md)?;
    match md_bracket(trajectory, md)? {
        Bracket::Exact(idx) => Ok(trajectory.points[idx]),
        Bracket::Between(i1, i2) => {
            let point = interp_between(trajectory, i1, i2, md);
            // Split the bracketing segment's dogleg: the right neighbor keeps
            // only the residual part.
            trajectory.points[i2].dl -= point.dl;
            trajectory.points.insert(i2, point);
            trajectory.refresh_deltas();
            Ok(point)
        }
    }
}

pub(crate) fn insert_at_tvd(trajectory: &mut Trajectory, tvd: f64) -> Result<SurveyPoint> {
    check_tvd_range(trajectory, tvd)?;
    match tvd_bracket(trajectory, tvd)? {
        Bracket::Exact(idx) => Ok(trajectory.points[idx]),
        Bracket::Between(i1, i2) => {
            let md = solve_md_for_tvd(trajectory, tvd, i1, i2)?;
            insert_at_md(trajectory, md)
        }
    }
}

fn check_md_range(trajectory: &Trajectory, md: f64) -> Result<()> {
    if md < 0.0 {
        return Err(WellboreError::range("MD value must be positive"));
    }
    if md > trajectory.max_md() {
        return Err(WellboreError::range(
            "MD can't be deeper than the deepest trajectory MD",
        ));
    }
    Ok(())
}

fn check_tvd_range(trajectory: &Trajectory, tvd: f64) -> Result<()> {
    if tvd < 0.0 {
        return Err(WellboreError::range("TVD value must be positive"));
    }
    if tvd > trajectory.max_tvd() {
        return Err(WellboreError::range(
            "TVD can't be deeper than the deepest trajectory TVD",
        ));
    }
    Ok(())
}

fn md_bracket(trajectory: &Trajectory, md: f64) -> Result<Bracket> {
    for (idx, point) in trajectory.points.iter().enumerate() {
        if (point.md - md).abs() <= MD_EPSILON {
            return Ok(Bracket::Exact(idx));
        }
        if point.md > md {
            return Ok(Bracket::Between(idx - 1, idx));
        }
    }
    Err(WellboreError::range(
        "MD can't be deeper than the deepest trajectory MD",
    ))
}

fn tvd_bracket(trajectory: &Trajectory, tvd: f64) -> Result<Bracket> {
    let points = &trajectory.points;
    for (idx, point) in points.iter().enumerate() {
        if round2(point.tvd) == round2(tvd) {
            return Ok(Bracket::Exact(idx));
        }
        if point.tvd < tvd
            && idx + 1 < points.len()
            && round2(tvd) < round2(points[idx + 1].tvd)
        {
            return Ok(Bracket::Between(idx, idx + 1));
        }
    }
    Err(WellboreError::range("TVD is not bracketed by the trajectory"))
}

/// Compute the interpolated point strictly inside the bracket `i1..i2`. The
/// sub-segment receives the MD-proportional share of the bracket's dogleg.
fn interp_between(trajectory: &Trajectory, i1: usize, i2: usize, md: f64) -> SurveyPoint {
    let p1 = trajectory.points[i1];
    let p2 = trajectory.points[i2];

    let dl = (md - p1.md) * p2.dl / (p2.md - p1.md);
    let dls = equations::dogleg_severity(dl, md - p1.md, trajectory.info.dls_resolution);
    let (inc, azi) = equations::blend_inc_azi(p1.inc, p1.azi, p2.inc, p2.azi, p2.dl, dl);
    let dpos = equations::position_delta(p1.md, md, p1.inc, p1.azi, inc, azi, dl.to_radians());

    let mut point = SurveyPoint {
        md,
        inc,
        azi,
        north: p1.north + dpos.x,
        east: p1.east + dpos.y,
        tvd: p1.tvd + dpos.z,
        dl,
        dls,
        section_type: p2.section_type,
        point_type: crate::survey::PointType::Interpolated,
        delta: Default::default(),
    };
    point.delta = point.delta_from(&p1);
    point
}

/// Find the MD whose trajectory TVD matches the target at two decimals.
/// Vertical sections solve directly (a TVD delta is an MD delta); everything
/// else bisects the bracket, recomputing the trial point's TVD per step.
fn solve_md_for_tvd(trajectory: &Trajectory, tvd: f64, i1: usize, i2: usize) -> Result<f64> {
    let p1 = trajectory.points[i1];
    let p2 = trajectory.points[i2];

    if p2.section_type == SectionType::Vertical {
        return Ok(p1.md + tvd - p1.tvd);
    }

    let mut a = p1.md;
    let mut b = p2.md;
    let mut md = (a + b) / 2.0;
    let mut trial = point_at_md(trajectory, md)?;
    let mut steps = 0;
    while round2(trial.tvd) != round2(tvd) {
        md = (a + b) / 2.0;
        trial = point_at_md(trajectory, md)?;
        if trial.tvd < tvd {
            a = md;
        } else {
            b = md;
        }
        steps += 1;
        if steps > MAX_BISECTION_STEPS {
            return Err(WellboreError::validation(
                "TVD bisection did not converge inside the bracketing segment",
            ));
        }
    }
    Ok(md)
}
