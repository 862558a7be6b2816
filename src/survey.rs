//! Survey point and trajectory data structures.
//!
//! A [`Trajectory`] is an ordered sequence of [`SurveyPoint`]s with strictly
//! increasing measured depth, built from sparse survey records with the
//! minimum-curvature method and queryable at arbitrary depth.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::builder::TrajectoryBuilder;
use crate::constants::DEFAULT_DLS_RESOLUTION;
use crate::error::Result;
use crate::interpolate;

/// Borehole section classification, derived from the inclination and TVD
/// change relative to the previous point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionType {
    Vertical,
    Hold,
    BuildUp,
    DropOff,
    Horizontal,
}

/// Whether a point came from a survey record or was interpolated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointType {
    Survey,
    Interpolated,
}

/// Well placement, descriptive only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WellType {
    Onshore,
    Offshore,
}

/// Unit system the survey depths/lengths are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Metric,
    English,
}

/// Componentwise difference from the immediately preceding point.
/// All fields are zero for the first point of a trajectory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PointDelta {
    pub md: f64,
    pub tvd: f64,
    pub inc: f64,
    pub azi: f64,
    pub dl: f64,
    pub dls: f64,
    pub north: f64,
    pub east: f64,
}

/// A single point along the wellbore path.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SurveyPoint {
    /// Measured depth along the path
    pub md: f64,
    /// Inclination from vertical (degrees)
    pub inc: f64,
    /// Azimuth (degrees)
    pub azi: f64,
    /// Northing offset from the surface location
    pub north: f64,
    /// Easting offset from the surface location
    pub east: f64,
    /// True vertical depth
    pub tvd: f64,
    /// Dogleg of the segment ending at this point (degrees)
    pub dl: f64,
    /// Dogleg severity, normalized by the configured resolution length
    pub dls: f64,
    pub section_type: SectionType,
    pub point_type: PointType,
    pub delta: PointDelta,
}

impl SurveyPoint {
    /// Position as (north, east, tvd).
    pub fn position(&self) -> Vector3<f64> {
        Vector3::new(self.north, self.east, self.tvd)
    }

    pub(crate) fn delta_from(&self, prev: &SurveyPoint) -> PointDelta {
        PointDelta {
            md: self.md - prev.md,
            tvd: self.tvd - prev.tvd,
            inc: self.inc - prev.inc,
            azi: self.azi - prev.azi,
            dl: self.dl - prev.dl,
            dls: self.dls - prev.dls,
            north: self.north - prev.north,
            east: self.east - prev.east,
        }
    }
}

/// A normalized survey record: measured depth, inclination and azimuth in
/// degrees. Column-name normalization from spreadsheet sources happens
/// upstream of this crate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurveyRecord {
    pub md: f64,
    pub inc: f64,
    pub azi: f64,
}

impl SurveyRecord {
    pub fn new(md: f64, inc: f64, azi: f64) -> Self {
        SurveyRecord { md, inc, azi }
    }
}

/// Trajectory configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyInfo {
    /// Length over which dogleg severity is normalized
    pub dls_resolution: f64,
    pub well_type: WellType,
    pub units: Units,
    /// Northing of the surface location
    pub start_north: f64,
    /// Easting of the surface location
    pub start_east: f64,
    /// Constant shift added to every recorded azimuth
    pub azimuth_shift: Option<f64>,
    /// Number of interpolated points to add inside each measured interval
    pub interior_points: usize,
}

impl Default for SurveyInfo {
    fn default() -> Self {
        SurveyInfo {
            dls_resolution: DEFAULT_DLS_RESOLUTION,
            well_type: WellType::Offshore,
            units: Units::Metric,
            start_north: 0.0,
            start_east: 0.0,
            azimuth_shift: None,
            interior_points: 0,
        }
    }
}

/// Flattened per-point row for tabular export.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SurveyRow {
    pub md: f64,
    pub inc: f64,
    pub azi: f64,
    pub north: f64,
    pub east: f64,
    pub tvd: f64,
    pub dl: f64,
    pub dls: f64,
    pub section_type: SectionType,
    pub point_type: PointType,
}

/// A fully computed wellbore path.
///
/// Points are stored in measured-depth order. Apart from the explicit
/// insertion operations, points are immutable once computed.
#[derive(Debug, Clone)]
pub struct Trajectory {
    pub(crate) info: SurveyInfo,
    pub(crate) points: Vec<SurveyPoint>,
}

impl Trajectory {
    /// Build a trajectory from normalized survey records.
    pub fn build(records: &[SurveyRecord], info: SurveyInfo) -> Result<Trajectory> {
        TrajectoryBuilder::new(info).build(records)
    }

    pub fn info(&self) -> &SurveyInfo {
        &self.info
    }

    pub fn points(&self) -> &[SurveyPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Measured depth of the deepest point.
    pub fn max_md(&self) -> f64 {
        self.points.last().map(|p| p.md).unwrap_or(0.0)
    }

    /// Deepest true vertical depth reached anywhere along the path. Not
    /// necessarily at the last point: a path can turn horizontal or upward.
    pub fn max_tvd(&self) -> f64 {
        self.points.iter().map(|p| p.tvd).fold(0.0, f64::max)
    }

    /// Compute the point at a measured depth without touching the trajectory.
    /// Exact node depths return the stored point.
    pub fn point_at_md(&self, md: f64) -> Result<SurveyPoint> {
        interpolate::point_at_md(self, md)
    }

    /// Compute the point at a true vertical depth (matched at two decimals)
    /// without touching the trajectory.
    pub fn point_at_tvd(&self, tvd: f64) -> Result<SurveyPoint> {
        interpolate::point_at_tvd(self, tvd)
    }

    /// Insert an interpolated point at a measured depth, splitting the
    /// bracketing segment's dogleg. Returns the inserted point; inserting at
    /// an existing node depth is a no-op returning that point.
    pub fn insert_at_md(&mut self, md: f64) -> Result<SurveyPoint> {
        interpolate::insert_at_md(self, md)
    }

    /// Insert an interpolated point at a true vertical depth.
    pub fn insert_at_tvd(&mut self, tvd: f64) -> Result<SurveyPoint> {
        interpolate::insert_at_tvd(self, tvd)
    }

    /// Tabular form of the trajectory for external plotting or export.
    pub fn rows(&self) -> Vec<SurveyRow> {
        self.points
            .iter()
            .map(|p| SurveyRow {
                md: p.md,
                inc: p.inc,
                azi: p.azi,
                north: p.north,
                east: p.east,
                tvd: p.tvd,
                dl: p.dl,
                dls: p.dls,
                section_type: p.section_type,
                point_type: p.point_type,
            })
            .collect()
    }

    /// Recompute every point's delta from its predecessor. First point gets
    /// all-zero deltas.
    pub(crate) fn refresh_deltas(&mut self) {
        for idx in (1..self.points.len()).rev() {
            let prev = self.points[idx - 1];
            let point = &mut self.points[idx];
            point.delta = point.delta_from(&prev);
        }
        if let Some(first) = self.points.first_mut() {
            first.delta = PointDelta::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_point(md: f64, tvd: f64) -> SurveyPoint {
        SurveyPoint {
            md,
            inc: 0.0,
            azi: 0.0,
            north: 0.0,
            east: 0.0,
            tvd,
            dl: 0.0,
            dls: 0.0,
            section_type: SectionType::Vertical,
            point_type: PointType::Survey,
            delta: PointDelta::default(),
        }
    }

    #[test]
    fn test_delta_from() {
        let a = dummy_point(100.0, 100.0);
        let b = dummy_point(130.0, 129.5);
        let d = b.delta_from(&a);
        assert_eq!(d.md, 30.0);
        assert!((d.tvd - 29.5).abs() < 1e-12);
        assert_eq!(d.inc, 0.0);
    }

    #[test]
    fn test_refresh_deltas_first_point_zero() {
        let mut traj = Trajectory {
            info: SurveyInfo::default(),
            points: vec![dummy_point(0.0, 0.0), dummy_point(50.0, 50.0)],
        };
        traj.refresh_deltas();
        assert_eq!(traj.points[0].delta, PointDelta::default());
        assert_eq!(traj.points[1].delta.md, 50.0);
    }

    #[test]
    fn test_position_vector() {
        let mut p = dummy_point(10.0, 10.0);
        p.north = 3.0;
        p.east = 4.0;
        assert_eq!(p.position(), Vector3::new(3.0, 4.0, 10.0));
    }
}
