//! Builds a [`Trajectory`] from normalized survey records.

use crate::constants::round2;
use crate::equations;
use crate::error::{Result, WellboreError};
use crate::survey::{
    PointDelta, PointType, SectionType, SurveyInfo, SurveyPoint, SurveyRecord, Trajectory,
};

/// Turns a sequence of `{md, inc, azi}` records plus a [`SurveyInfo`] into a
/// populated trajectory using the minimum-curvature method, optionally
/// densifying each measured interval with interior points.
#[derive(Debug, Clone)]
pub struct TrajectoryBuilder {
    info: SurveyInfo,
}

impl TrajectoryBuilder {
    pub fn new(info: SurveyInfo) -> Self {
        TrajectoryBuilder { info }
    }

    pub fn build(&self, records: &[SurveyRecord]) -> Result<Trajectory> {
        validate_records(records)?;

        let shift = self.info.azimuth_shift.unwrap_or(0.0);

        // The path always starts at an implicit vertical surface point. A
        // record at md 0 is absorbed by it.
        let mut points = vec![SurveyPoint {
            md: 0.0,
            inc: 0.0,
            azi: 0.0,
            north: self.info.start_north,
            east: self.info.start_east,
            tvd: 0.0,
            dl: 0.0,
            dls: 0.0,
            section_type: SectionType::Vertical,
            point_type: PointType::Survey,
            delta: PointDelta::default(),
        }];

        for record in records.iter().filter(|r| r.md > 0.0) {
            let azi = record.azi + shift;
            let p1 = *points.last().expect("surface point present");

            let dl = equations::dogleg(p1.inc, record.inc, p1.azi, azi);
            let dpos =
                equations::position_delta(p1.md, record.md, p1.inc, p1.azi, record.inc, azi, dl);

            let mut point = SurveyPoint {
                md: record.md,
                inc: record.inc,
                azi,
                north: p1.north + dpos.x,
                east: p1.east + dpos.y,
                tvd: p1.tvd + dpos.z,
                dl: dl.to_degrees(),
                dls: 0.0,
                section_type: SectionType::Vertical,
                point_type: PointType::Survey,
                delta: PointDelta::default(),
            };
            point.section_type = classify_section(&point, &p1);

            if self.info.interior_points > 0 {
                self.densify(&mut points, &p1, &mut point);
            }
            points.push(point);
        }

        let mut trajectory = Trajectory {
            info: self.info.clone(),
            points,
        };
        finalize(&mut trajectory);
        Ok(trajectory)
    }

    /// Subdivide the segment `p1..p2` into equal sub-doglegs, back-solving
    /// each interior point's inclination/azimuth from the cumulative dogleg
    /// fraction and chaining positions with the minimum-curvature step. The
    /// endpoint's dl is reduced to the residual sub-segment value.
    fn densify(&self, points: &mut Vec<SurveyPoint>, p1: &SurveyPoint, p2: &mut SurveyPoint) {
        let n = self.info.interior_points;
        let subdivisions = n as f64 + 1.0;
        let dl_unit = p2.dl / subdivisions;
        let md_step = (p2.md - p1.md) / subdivisions;

        let mut prev = *p1;
        for k in 1..=n {
            let md = p1.md + md_step * k as f64;
            let dl_cum = dl_unit * k as f64;
            let (inc, azi) =
                equations::blend_inc_azi(p1.inc, p1.azi, p2.inc, p2.azi, p2.dl, dl_cum);
            let dpos = equations::position_delta(
                prev.md,
                md,
                prev.inc,
                prev.azi,
                inc,
                azi,
                dl_unit.to_radians(),
            );
            let inner = SurveyPoint {
                md,
                inc,
                azi,
                north: prev.north + dpos.x,
                east: prev.east + dpos.y,
                tvd: prev.tvd + dpos.z,
                dl: dl_unit,
                dls: 0.0,
                section_type: p2.section_type,
                point_type: PointType::Interpolated,
                delta: PointDelta::default(),
            };
            points.push(inner);
            prev = inner;
        }
        p2.dl = dl_unit;
    }
}

/// Derive the section classification of `p2` against its predecessor.
pub(crate) fn classify_section(p2: &SurveyPoint, p1: &SurveyPoint) -> SectionType {
    if p2.inc == 0.0 && p1.inc == 0.0 {
        SectionType::Vertical
    } else if round2(p2.inc) == round2(p1.inc) {
        // Equal inclination: horizontal if the vertical depth stalls.
        if (p2.tvd - p1.tvd).trunc() == 0.0 {
            SectionType::Horizontal
        } else {
            SectionType::Hold
        }
    } else if p2.inc > p1.inc {
        SectionType::BuildUp
    } else {
        SectionType::DropOff
    }
}

/// Fill in dogleg severities and per-point deltas once all points exist.
pub(crate) fn finalize(trajectory: &mut Trajectory) {
    let resolution = trajectory.info.dls_resolution;
    for idx in 1..trajectory.points.len() {
        let delta_md = trajectory.points[idx].md - trajectory.points[idx - 1].md;
        let point = &mut trajectory.points[idx];
        point.dls = equations::dogleg_severity(point.dl, delta_md, resolution);
    }
    if let Some(first) = trajectory.points.first_mut() {
        first.dls = 0.0;
    }
    trajectory.refresh_deltas();
}

fn validate_records(records: &[SurveyRecord]) -> Result<()> {
    let mut prev_md: Option<f64> = None;
    for (idx, record) in records.iter().enumerate() {
        if !(record.md.is_finite() && record.inc.is_finite() && record.azi.is_finite()) {
            return Err(WellboreError::validation(format!(
                "survey record {} has a non-finite field",
                idx
            )));
        }
        if record.md < 0.0 {
            return Err(WellboreError::validation(format!(
                "survey record {} has negative md {}",
                idx, record.md
            )));
        }
        if let Some(prev) = prev_md {
            if record.md <= prev {
                return Err(WellboreError::validation(format!(
                    "survey record {}: md {} does not increase past {}",
                    idx, record.md, prev
                )));
            }
        }
        prev_md = Some(record.md);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(records: &[SurveyRecord]) -> Trajectory {
        Trajectory::build(records, SurveyInfo::default()).unwrap()
    }

    #[test]
    fn test_all_vertical_survey() {
        let records = [
            SurveyRecord::new(100.0, 0.0, 0.0),
            SurveyRecord::new(500.0, 0.0, 0.0),
            SurveyRecord::new(1200.0, 0.0, 0.0),
        ];
        let traj = build(&records);
        for p in traj.points() {
            assert_eq!(p.north, 0.0);
            assert_eq!(p.east, 0.0);
            assert!((p.tvd - p.md).abs() < 1e-9);
            assert_eq!(p.section_type, SectionType::Vertical);
        }
    }

    #[test]
    fn test_implicit_surface_point() {
        let traj = build(&[SurveyRecord::new(300.0, 0.0, 0.0)]);
        assert_eq!(traj.len(), 2);
        assert_eq!(traj.points()[0].md, 0.0);
        assert_eq!(traj.points()[0].inc, 0.0);
    }

    #[test]
    fn test_minimum_curvature_worked_example() {
        let traj = build(&[
            SurveyRecord::new(0.0, 0.0, 0.0),
            SurveyRecord::new(100.0, 10.0, 0.0),
        ]);
        assert_eq!(traj.len(), 2);
        let p = traj.points()[1];
        let dl = 10f64.to_radians();
        let rf = 100.0 / dl * (dl / 2.0).tan();
        // tvd = rf * (cos(0) + cos(10 deg)); rf carries the averaging.
        let expected = rf * (1.0 + dl.cos());
        assert!((p.tvd - expected).abs() < 1e-6);
        assert!((p.dl - 10.0).abs() < 1e-9);
        assert_eq!(p.section_type, SectionType::BuildUp);
    }

    #[test]
    fn test_section_classification() {
        let records = [
            SurveyRecord::new(500.0, 0.0, 0.0),    // vertical
            SurveyRecord::new(1000.0, 30.0, 90.0), // build-up
            SurveyRecord::new(1500.0, 30.0, 90.0), // hold
            SurveyRecord::new(2000.0, 10.0, 90.0), // drop-off
        ];
        let traj = build(&records);
        let kinds: Vec<SectionType> = traj.points().iter().map(|p| p.section_type).collect();
        assert_eq!(
            kinds,
            vec![
                SectionType::Vertical,
                SectionType::Vertical,
                SectionType::BuildUp,
                SectionType::Hold,
                SectionType::DropOff,
            ]
        );
    }

    #[test]
    fn test_horizontal_classification() {
        let records = [
            SurveyRecord::new(1000.0, 90.0, 0.0),
            SurveyRecord::new(1500.0, 90.0, 0.0),
        ];
        let traj = build(&records);
        assert_eq!(
            traj.points().last().unwrap().section_type,
            SectionType::Horizontal
        );
    }

    #[test]
    fn test_densification_counts_and_residual_dogleg() {
        let mut info = SurveyInfo::default();
        info.interior_points = 3;
        let traj = Trajectory::build(
            &[
                SurveyRecord::new(0.0, 0.0, 0.0),
                SurveyRecord::new(400.0, 20.0, 30.0),
            ],
            info,
        )
        .unwrap();
        // surface + 3 interior + endpoint
        assert_eq!(traj.len(), 5);
        let total_dl: f64 = traj.points().iter().map(|p| p.dl).sum();
        let full = equations::dogleg(0.0, 20.0, 0.0, 30.0).to_degrees();
        assert!((total_dl - full).abs() < 1e-9);
        // Every appended point carries an equal share of the segment dogleg.
        for p in &traj.points()[1..] {
            assert!((p.dl - full / 4.0).abs() < 1e-9);
        }
        assert_eq!(traj.points()[2].point_type, PointType::Interpolated);
    }

    #[test]
    fn test_azimuth_shift_and_start_offsets() {
        let mut info = SurveyInfo::default();
        info.azimuth_shift = Some(15.0);
        info.start_north = 100.0;
        info.start_east = -50.0;
        let traj = Trajectory::build(&[SurveyRecord::new(500.0, 10.0, 45.0)], info).unwrap();
        assert_eq!(traj.points()[0].north, 100.0);
        assert_eq!(traj.points()[0].east, -50.0);
        assert!((traj.points()[1].azi - 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_non_increasing_md() {
        let err = Trajectory::build(
            &[
                SurveyRecord::new(500.0, 0.0, 0.0),
                SurveyRecord::new(500.0, 5.0, 0.0),
            ],
            SurveyInfo::default(),
        )
        .unwrap_err();
        assert!(matches!(err, WellboreError::Validation(_)));
    }

    #[test]
    fn test_rejects_non_finite_fields() {
        let err = Trajectory::build(
            &[SurveyRecord::new(f64::NAN, 0.0, 0.0)],
            SurveyInfo::default(),
        )
        .unwrap_err();
        assert!(matches!(err, WellboreError::Validation(_)));
    }

    #[test]
    fn test_dls_uses_resolution() {
        let mut info = SurveyInfo::default();
        info.dls_resolution = 30.0;
        let traj = Trajectory::build(
            &[
                SurveyRecord::new(0.0, 0.0, 0.0),
                SurveyRecord::new(60.0, 3.0, 0.0),
            ],
            info,
        )
        .unwrap();
        let p = traj.points()[1];
        assert!((p.dls - 1.5).abs() < 1e-9);
    }
}
