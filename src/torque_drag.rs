//! Soft-string torque-and-drag model.
//!
//! Tension and torque are integrated from the bottom of the pipe string up to
//! surface, segment by segment along the trajectory. The three drag regimes
//! are carried together as one [`Vector3`] per node (x = pickup, y =
//! slackoff, z = rotating); each closed form below applies componentwise, so
//! the regimes stay independent through the recurrence.

use std::collections::BTreeMap;

use nalgebra::Vector3;
use serde::Serialize;

use crate::constants::MD_EPSILON;
use crate::error::{Result, WellboreError};
use crate::string::{PipeString, WellBore};
use crate::survey::Trajectory;

/// Operating parameters for a torque-and-drag run.
#[derive(Debug, Clone, Copy)]
pub struct TorqueDragOptions {
    /// Axial tripping speed (m/s)
    pub trip_speed: f64,
    /// Rotary speed (rpm)
    pub rotary_speed: f64,
    /// Weight on bit (N); must be supplied together with `tob`
    pub wob: Option<f64>,
    /// Torque on bit (N·m); must be supplied together with `wob`
    pub tob: Option<f64>,
    /// Extra pull above the free-hanging pickup load (N)
    pub overpull: Option<f64>,
}

impl Default for TorqueDragOptions {
    fn default() -> Self {
        TorqueDragOptions {
            trip_speed: 1.0,
            rotary_speed: 0.0,
            wob: None,
            tob: None,
            overpull: None,
        }
    }
}

/// Axial load curve families produced by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TensionMode {
    Pickup,
    Slackoff,
    Rotating,
    Sliding,
    Drilling,
    Overpull,
}

/// Torque curve families produced by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TorqueMode {
    Rotating,
    Drilling,
}

/// Per-node outputs of a torque-and-drag run. Index 0 is surface, the last
/// index is the bottom of the pipe string.
#[derive(Debug, Clone, Serialize)]
pub struct TorqueDragResult {
    pub md: Vec<f64>,
    pub delta_md: Vec<f64>,
    /// Buoyed weight of the segment ending at each node (N)
    pub weight_buoyed: Vec<f64>,
    /// Buoyed weight per unit length at each node (N/m)
    pub weight_buoyed_line: Vec<f64>,
    /// Contact radius of the pipe at each node
    pub radius: Vec<f64>,
    pub friction: Vec<f64>,
    pub friction_axial: Vec<f64>,
    pub friction_tangential: Vec<f64>,
    /// Borehole curvature of the segment ending at each node (rad/m)
    pub curvature: Vec<f64>,
    /// Mean inclination of the segment ending at each node (rad)
    pub inc_average: Vec<f64>,
    pub inc_rate: Vec<f64>,
    pub azi_rate: Vec<f64>,
    pub delta_inc: Vec<f64>,
    pub delta_azi: Vec<f64>,
    pub tension: BTreeMap<TensionMode, Vec<f64>>,
    pub torque: BTreeMap<TorqueMode, Vec<f64>>,
}

/// Per-segment inputs to the recurrence, assembled once per solve.
struct SegmentData {
    index: usize,
    md: Vec<f64>,
    delta_md: Vec<f64>,
    weight_buoyed: Vec<f64>,
    weight_buoyed_line: Vec<f64>,
    radius: Vec<f64>,
    friction: Vec<f64>,
    friction_axial: Vec<f64>,
    friction_tangential: Vec<f64>,
    curvature: Vec<f64>,
    inc_average: Vec<f64>,
    inc_rate: Vec<f64>,
    azi_rate: Vec<f64>,
    delta_inc: Vec<f64>,
    delta_azi: Vec<f64>,
}

/// Soft-string solver over a trajectory, hole geometry and pipe string.
#[derive(Debug, Clone)]
pub struct TorqueDragSolver {
    trajectory: Trajectory,
    wellbore: WellBore,
    string: PipeString,
    fluid_density: f64,
    options: TorqueDragOptions,
}

impl TorqueDragSolver {
    pub fn new(
        trajectory: &Trajectory,
        wellbore: &WellBore,
        string: &PipeString,
        fluid_density: f64,
    ) -> Result<TorqueDragSolver> {
        if !wellbore.complete() {
            return Err(WellboreError::validation(
                "wellbore sections do not cover the full hole",
            ));
        }
        if !string.complete() {
            return Err(WellboreError::validation(
                "pipe string sections do not cover the full string",
            ));
        }
        if !(fluid_density >= 0.0) || !fluid_density.is_finite() {
            return Err(WellboreError::validation(
                "fluid density must be non-negative",
            ));
        }
        Ok(TorqueDragSolver {
            trajectory: trajectory.clone(),
            wellbore: wellbore.clone(),
            string: string.clone(),
            fluid_density,
            options: TorqueDragOptions::default(),
        })
    }

    pub fn set_options(&mut self, options: TorqueDragOptions) -> &mut Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &TorqueDragOptions {
        &self.options
    }

    /// Run the model. Always produces the free-hanging pickup/slackoff/
    /// rotating curves; a second pass with bit boundary loads runs when
    /// `wob`/`tob` or `overpull` are set.
    pub fn solve(&self) -> Result<TorqueDragResult> {
        let opts = &self.options;
        if opts.wob.is_some() != opts.tob.is_some() {
            return Err(WellboreError::validation(
                "WOB and TOB must be supplied together",
            ));
        }

        let data = self.assemble_segments()?;

        let mut tension = BTreeMap::new();
        let mut torque = BTreeMap::new();

        let (ft, tq) = self.recurrence(&data, Vector3::zeros(), 0.0);
        tension.insert(TensionMode::Pickup, ft.iter().map(|f| f.x).collect());
        tension.insert(TensionMode::Slackoff, ft.iter().map(|f| f.y).collect());
        tension.insert(TensionMode::Rotating, ft.iter().map(|f| f.z).collect());
        torque.insert(TorqueMode::Rotating, tq);

        if opts.wob.is_some() || opts.overpull.is_some() {
            let mut seed = Vector3::zeros();
            let mut seed_torque = 0.0;
            if let (Some(wob), Some(tob)) = (opts.wob, opts.tob) {
                seed.y = -wob;
                seed.z = -wob;
                seed_torque = tob;
            }
            if let Some(overpull) = opts.overpull {
                seed.x = overpull;
            }
            let (ft, tq) = self.recurrence(&data, seed, seed_torque);
            if opts.wob.is_some() {
                tension.insert(TensionMode::Sliding, ft.iter().map(|f| f.y).collect());
                tension.insert(TensionMode::Drilling, ft.iter().map(|f| f.z).collect());
                torque.insert(TorqueMode::Drilling, tq);
            }
            if opts.overpull.is_some() {
                tension.insert(TensionMode::Overpull, ft.iter().map(|f| f.x).collect());
            }
        }

        Ok(TorqueDragResult {
            md: data.md,
            delta_md: data.delta_md,
            weight_buoyed: data.weight_buoyed,
            weight_buoyed_line: data.weight_buoyed_line,
            radius: data.radius,
            friction: data.friction,
            friction_axial: data.friction_axial,
            friction_tangential: data.friction_tangential,
            curvature: data.curvature,
            inc_average: data.inc_average,
            inc_rate: data.inc_rate,
            azi_rate: data.azi_rate,
            delta_inc: data.delta_inc,
            delta_azi: data.delta_azi,
            tension,
            torque,
        })
    }

    /// Densify a working copy of the trajectory at every section boundary,
    /// then gather per-node geometry, weight and friction arrays down to the
    /// string bottom.
    fn assemble_segments(&self) -> Result<SegmentData> {
        let mut densified = self.trajectory.clone();
        for section in self.wellbore.sections() {
            densified.insert_at_md(section.bottom)?;
        }
        for section in self.string.sections() {
            densified.insert_at_md(section.bottom)?;
        }

        let string_bottom = self.string.bottom();
        let bottom_node = densified
            .points()
            .iter()
            .position(|p| (p.md - string_bottom).abs() <= MD_EPSILON)
            .ok_or_else(|| {
                WellboreError::validation(format!(
                    "string bottom {} is not on the trajectory",
                    string_bottom
                ))
            })?;
        let index = bottom_node + 1;
        if index < 2 {
            return Err(WellboreError::validation(
                "trajectory has no segment above the string bottom",
            ));
        }

        let points = &densified.points()[..index];
        let mut data = SegmentData {
            index,
            md: Vec::with_capacity(index),
            delta_md: Vec::with_capacity(index),
            weight_buoyed: Vec::with_capacity(index),
            weight_buoyed_line: Vec::with_capacity(index),
            radius: Vec::with_capacity(index),
            friction: Vec::with_capacity(index),
            friction_axial: Vec::with_capacity(index),
            friction_tangential: Vec::with_capacity(index),
            curvature: Vec::with_capacity(index),
            inc_average: Vec::with_capacity(index),
            inc_rate: Vec::with_capacity(index),
            azi_rate: Vec::with_capacity(index),
            delta_inc: Vec::with_capacity(index),
            delta_azi: Vec::with_capacity(index),
        };

        for (k, p) in points.iter().enumerate() {
            data.md.push(p.md);
            if k == 0 {
                // The surface node has no segment above it; its curvature
                // mirrors the first real segment and its radius and friction
                // come from the shallowest sections.
                let first = &points[1];
                data.delta_md.push(0.0);
                data.weight_buoyed.push(0.0);
                data.weight_buoyed_line.push(0.0);
                data.inc_average.push(0.0);
                data.inc_rate.push(0.0);
                data.azi_rate.push(0.0);
                data.delta_inc.push(0.0);
                data.delta_azi.push(0.0);
                data.curvature
                    .push(first.dl.to_radians() / (first.md - p.md));

                let pipe = self.string.sections()[0];
                let radius = pipe.characteristic_od() / 2.0;
                data.radius.push(radius);
                let friction = self.wellbore.sections()[0].friction_sliding;
                data.friction.push(friction);
                let (axial, tangential) = self.decompose_friction(friction, radius);
                data.friction_axial.push(axial);
                data.friction_tangential.push(tangential);
                continue;
            }

            let prev = &points[k - 1];
            let delta_md = p.md - prev.md;
            let inc = p.inc.to_radians();
            let prev_inc = prev.inc.to_radians();
            let delta_inc = inc - prev_inc;
            let delta_azi = p.azi.to_radians() - prev.azi.to_radians();
            data.delta_md.push(delta_md);
            data.inc_average.push((inc + prev_inc) / 2.0);
            data.delta_inc.push(delta_inc);
            data.delta_azi.push(delta_azi);
            data.inc_rate.push(delta_inc / delta_md);
            data.azi_rate.push(delta_azi / delta_md);
            data.curvature.push(p.dl.to_radians() / delta_md);

            let pipe = self.string.section_at(p.md).ok_or_else(|| {
                WellboreError::validation(format!(
                    "pipe string does not cover measured depth {}",
                    p.md
                ))
            })?;
            let buoyancy = pipe.buoyancy_factor(self.fluid_density);
            data.weight_buoyed
                .push(pipe.unit_weight * buoyancy * delta_md);
            data.weight_buoyed_line.push(pipe.unit_weight * buoyancy);
            let radius = pipe.characteristic_od() / 2.0;
            data.radius.push(radius);

            let hole = self.wellbore.section_at(p.md).ok_or_else(|| {
                WellboreError::validation(format!(
                    "wellbore does not cover measured depth {}",
                    p.md
                ))
            })?;
            data.friction.push(hole.friction_sliding);
            let (axial, tangential) = self.decompose_friction(hole.friction_sliding, radius);
            data.friction_axial.push(axial);
            data.friction_tangential.push(tangential);
        }

        Ok(data)
    }

    /// Split the sliding friction coefficient into axial and tangential parts
    /// from the ratio of trip speed to pipe surface speed.
    fn decompose_friction(&self, friction: f64, radius: f64) -> (f64, f64) {
        let omega = std::f64::consts::PI * self.options.rotary_speed / 30.0;
        let surface_speed = omega * radius;
        let speed = (self.options.trip_speed.powi(2) + surface_speed.powi(2)).sqrt();
        if speed == 0.0 {
            (friction, 0.0)
        } else {
            (
                self.options.trip_speed / speed * friction,
                surface_speed / speed * friction,
            )
        }
    }

    /// Backward recurrence from the string bottom to surface. Returns per-node
    /// tension triplets and torque, both indexed with 0 at surface; the seed
    /// values sit at the last index.
    fn recurrence(
        &self,
        data: &SegmentData,
        seed: Vector3<f64>,
        seed_torque: f64,
    ) -> (Vec<Vector3<f64>>, Vec<f64>) {
        let index = data.index;
        let mut tension = vec![Vector3::zeros(); index];
        let mut torque = vec![0.0; index];
        let mut ft = seed;
        let mut tq = seed_torque;
        tension[index - 1] = ft;
        torque[index - 1] = tq;

        for k in (1..index).rev() {
            if data.curvature[k] == 0.0 {
                let normal = normal_force_straight(
                    &ft,
                    data.inc_average[k],
                    data.delta_inc[k],
                    data.delta_azi[k],
                    data.weight_buoyed[k],
                );
                ft += tension_delta_straight(
                    data.weight_buoyed[k],
                    data.inc_average[k],
                    data.friction[k],
                    &normal,
                );
                tq += data.friction[k] * normal.z * data.radius[k];
            } else {
                let normal = normal_force_curved(
                    &ft,
                    data.curvature[k],
                    data.weight_buoyed_line[k],
                    data.inc_rate[k],
                    data.inc_average[k],
                    data.azi_rate[k],
                    data.friction_tangential[k],
                );
                let sin_contact = contact_sin(
                    data.weight_buoyed_line[k],
                    data.azi_rate[k],
                    data.curvature[k],
                    data.inc_average[k],
                    &normal,
                    data.friction_tangential[k],
                    data.radius[k],
                    &ft,
                    data.inc_rate[k],
                );
                let cos_contact = contact_cos(
                    &ft,
                    data.curvature[k],
                    data.weight_buoyed_line[k],
                    data.inc_rate[k],
                    data.inc_average[k],
                    data.friction_tangential[k],
                    &normal,
                    &sin_contact,
                );
                ft += tension_delta_curved(
                    data.delta_md[k],
                    data.weight_buoyed_line[k],
                    data.inc_average[k],
                    data.friction_axial[k],
                    data.curvature[k],
                    data.radius[k],
                    &cos_contact,
                    &normal,
                );
                tq += data.friction_tangential[k] * data.radius[k] * normal.z;
            }
            tension[k - 1] = ft;
            torque[k - 1] = tq;
        }

        (tension, torque)
    }
}

/// Contact force on a straight segment, per drag regime.
fn normal_force_straight(
    ft: &Vector3<f64>,
    inc_average: f64,
    delta_inc: f64,
    delta_azi: f64,
    weight: f64,
) -> Vector3<f64> {
    ft.map(|t| {
        let lateral = t * delta_azi * inc_average.sin();
        let axial = t * delta_inc + weight * inc_average.sin();
        (lateral * lateral + axial * axial).sqrt()
    })
}

/// Tension change across a straight segment: the buoyed weight component plus
/// friction acting up (pickup), down (slackoff) or not at all (rotating).
fn tension_delta_straight(
    weight: f64,
    inc_average: f64,
    friction: f64,
    normal: &Vector3<f64>,
) -> Vector3<f64> {
    let hang = weight * inc_average.cos();
    Vector3::new(
        hang + friction * normal.x,
        hang - friction * normal.y,
        hang,
    )
}

/// Contact force per unit length on a curved segment.
fn normal_force_curved(
    ft: &Vector3<f64>,
    curvature: f64,
    weight_line: f64,
    inc_rate: f64,
    inc_average: f64,
    azi_rate: f64,
    friction_t: f64,
) -> Vector3<f64> {
    let side = weight_line * azi_rate / curvature * inc_average.sin().powi(2);
    let norm = (1.0 + friction_t * friction_t).sqrt();
    ft.map(|t| {
        let plane = t * curvature - weight_line * inc_rate / curvature * inc_average.sin();
        (plane * plane + side * side).sqrt() / norm
    })
}

/// Sine of the pipe/wall contact angle on a curved segment. Zero contact
/// force means no defined angle; those components contribute nothing.
#[allow(clippy::too_many_arguments)]
fn contact_sin(
    weight_line: f64,
    azi_rate: f64,
    curvature: f64,
    inc_average: f64,
    normal: &Vector3<f64>,
    friction_t: f64,
    radius: f64,
    ft: &Vector3<f64>,
    inc_rate: f64,
) -> Vector3<f64> {
    let side = weight_line * azi_rate / curvature * inc_average.sin().powi(2);
    let lift = friction_t * weight_line * inc_rate / curvature * inc_average.sin();
    normal.zip_map(ft, |n, t| {
        if n == 0.0 {
            0.0
        } else {
            (side + n * friction_t * radius * curvature - friction_t * t * curvature + lift)
                / (n * (1.0 + friction_t * friction_t))
        }
    })
}

#[allow(clippy::too_many_arguments)]
fn contact_cos(
    ft: &Vector3<f64>,
    curvature: f64,
    weight_line: f64,
    inc_rate: f64,
    inc_average: f64,
    friction_t: f64,
    normal: &Vector3<f64>,
    sin_contact: &Vector3<f64>,
) -> Vector3<f64> {
    normal.zip_zip_map(ft, sin_contact, |n, t, s| {
        if n == 0.0 {
            0.0
        } else {
            (t * curvature - weight_line * inc_rate / curvature * inc_average.sin()
                + friction_t * n * s)
                / n
        }
    })
}

/// Tension change across a curved segment. The contact angle reduces the
/// effective normal force where the pipe lifts off the low side.
#[allow(clippy::too_many_arguments)]
fn tension_delta_curved(
    delta_md: f64,
    weight_line: f64,
    inc_average: f64,
    friction_a: f64,
    curvature: f64,
    radius: f64,
    cos_contact: &Vector3<f64>,
    normal: &Vector3<f64>,
) -> Vector3<f64> {
    let hang = delta_md * weight_line * inc_average.cos();
    let drag = normal.zip_map(cos_contact, |n, c| {
        delta_md * friction_a * (1.0 - curvature * radius * c) * n
    });
    Vector3::new(hang + drag.x, hang - drag.y, hang)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string::{BuildMethod, PipeSectionParams, WellboreSectionParams};
    use crate::survey::{SurveyInfo, SurveyRecord, Trajectory};

    fn vertical_trajectory() -> Trajectory {
        let records = vec![
            SurveyRecord::new(1000.0, 0.0, 0.0),
            SurveyRecord::new(2000.0, 0.0, 0.0),
        ];
        Trajectory::build(&records, SurveyInfo::default()).unwrap()
    }

    fn deviated_trajectory() -> Trajectory {
        let records = vec![
            SurveyRecord::new(500.0, 0.0, 0.0),
            SurveyRecord::new(1000.0, 30.0, 45.0),
            SurveyRecord::new(2000.0, 60.0, 45.0),
        ];
        Trajectory::build(&records, SurveyInfo::default()).unwrap()
    }

    fn single_wellbore(bottom: f64, friction: f64) -> WellBore {
        let mut wb = WellBore::new("hole", 0.0, bottom, BuildMethod::TopDown).unwrap();
        wb.add_section(WellboreSectionParams {
            bottom: Some(bottom),
            inner_diameter: 0.22,
            friction_sliding: friction,
            ..Default::default()
        })
        .unwrap();
        wb
    }

    fn single_string(bottom: f64, unit_weight: f64) -> PipeString {
        let mut string = PipeString::new("dp", 0.0, bottom, BuildMethod::BottomUp).unwrap();
        string
            .add_section(PipeSectionParams {
                od: 0.127,
                id: 0.108,
                unit_weight,
                ..Default::default()
            })
            .unwrap();
        string
    }

    #[test]
    fn test_vertical_zero_friction_modes_agree() {
        let traj = vertical_trajectory();
        let wellbore = single_wellbore(2000.0, 0.0);
        let string = single_string(2000.0, 300.0);
        let solver = TorqueDragSolver::new(&traj, &wellbore, &string, 1.2).unwrap();
        let result = solver.solve().unwrap();

        // No friction spread: all three families coincide at every node.
        let pickup = &result.tension[&TensionMode::Pickup];
        let slackoff = &result.tension[&TensionMode::Slackoff];
        let rotating = &result.tension[&TensionMode::Rotating];
        for k in 0..result.md.len() {
            assert_eq!(pickup[k], slackoff[k]);
            assert_eq!(slackoff[k], rotating[k]);
        }

        let buoyancy = (7.85 - 1.2) / 7.85;
        let expected = 300.0 * buoyancy * 2000.0;
        assert!((pickup[0] - expected).abs() < 1e-6);
        // No wall contact in a vertical hole, so no torque either.
        assert!(result.torque[&TorqueMode::Rotating]
            .iter()
            .all(|t| t.abs() < 1e-9));
    }

    #[test]
    fn test_vertical_normal_force_unaffected_by_friction() {
        let traj = vertical_trajectory();
        let string = single_string(2000.0, 300.0);
        let smooth = TorqueDragSolver::new(&traj, &single_wellbore(2000.0, 0.0), &string, 1.2)
            .unwrap()
            .solve()
            .unwrap();
        let rough = TorqueDragSolver::new(&traj, &single_wellbore(2000.0, 0.35), &string, 1.2)
            .unwrap()
            .solve()
            .unwrap();
        assert_eq!(
            smooth.tension[&TensionMode::Pickup][0],
            rough.tension[&TensionMode::Pickup][0]
        );
    }

    #[test]
    fn test_deviated_pickup_exceeds_slackoff() {
        let traj = deviated_trajectory();
        let wellbore = single_wellbore(2000.0, 0.3);
        let string = single_string(2000.0, 300.0);
        let solver = TorqueDragSolver::new(&traj, &wellbore, &string, 1.2).unwrap();
        let result = solver.solve().unwrap();

        let pickup = result.tension[&TensionMode::Pickup][0];
        let slackoff = result.tension[&TensionMode::Slackoff][0];
        let rotating = result.tension[&TensionMode::Rotating][0];
        assert!(pickup > rotating);
        assert!(rotating > slackoff);
    }

    #[test]
    fn test_result_spans_surface_to_string_bottom() {
        let traj = deviated_trajectory();
        let wellbore = single_wellbore(2000.0, 0.3);
        let string = single_string(1500.0, 300.0);
        let solver = TorqueDragSolver::new(&traj, &wellbore, &string, 1.2).unwrap();
        let result = solver.solve().unwrap();

        assert_eq!(result.md[0], 0.0);
        assert_eq!(*result.md.last().unwrap(), 1500.0);
        assert_eq!(
            result.tension[&TensionMode::Pickup].len(),
            result.md.len()
        );
    }

    #[test]
    fn test_wob_requires_tob() {
        let traj = vertical_trajectory();
        let wellbore = single_wellbore(2000.0, 0.3);
        let string = single_string(2000.0, 300.0);
        let mut solver = TorqueDragSolver::new(&traj, &wellbore, &string, 1.2).unwrap();
        solver.set_options(TorqueDragOptions {
            wob: Some(50_000.0),
            ..Default::default()
        });
        let err = solver.solve().unwrap_err();
        assert!(matches!(err, WellboreError::Validation(_)));
    }

    #[test]
    fn test_bit_loads_seed_the_bottom_node() {
        let traj = deviated_trajectory();
        let wellbore = single_wellbore(2000.0, 0.3);
        let string = single_string(2000.0, 300.0);
        let mut solver = TorqueDragSolver::new(&traj, &wellbore, &string, 1.2).unwrap();
        solver.set_options(TorqueDragOptions {
            wob: Some(50_000.0),
            tob: Some(5_000.0),
            overpull: Some(100_000.0),
            ..Default::default()
        });
        let result = solver.solve().unwrap();

        assert_eq!(*result.tension[&TensionMode::Drilling].last().unwrap(), -50_000.0);
        assert_eq!(*result.tension[&TensionMode::Sliding].last().unwrap(), -50_000.0);
        assert_eq!(*result.tension[&TensionMode::Overpull].last().unwrap(), 100_000.0);
        assert_eq!(*result.torque[&TorqueMode::Drilling].last().unwrap(), 5_000.0);
        // The free-hanging families are still produced alongside.
        assert!(result.tension.contains_key(&TensionMode::Pickup));
        assert!(result.torque.contains_key(&TorqueMode::Rotating));
    }

    #[test]
    fn test_incomplete_string_rejected() {
        let traj = vertical_trajectory();
        let wellbore = single_wellbore(2000.0, 0.3);
        let mut string = PipeString::new("dp", 0.0, 2000.0, BuildMethod::BottomUp).unwrap();
        string
            .add_section(PipeSectionParams {
                length: Some(200.0),
                od: 0.165,
                id: 0.071,
                unit_weight: 1000.0,
                ..Default::default()
            })
            .unwrap();
        let err = TorqueDragSolver::new(&traj, &wellbore, &string, 1.2).unwrap_err();
        assert!(matches!(err, WellboreError::Validation(_)));
    }

    #[test]
    fn test_rotation_shifts_friction_tangential() {
        let traj = deviated_trajectory();
        let wellbore = single_wellbore(2000.0, 0.3);
        let string = single_string(2000.0, 300.0);
        let mut solver = TorqueDragSolver::new(&traj, &wellbore, &string, 1.2).unwrap();
        solver.set_options(TorqueDragOptions {
            rotary_speed: 120.0,
            ..Default::default()
        });
        let result = solver.solve().unwrap();

        let k = result.md.len() - 1;
        assert!(result.friction_tangential[k] > 0.0);
        assert!(result.friction_axial[k] < result.friction[k]);
        let total = (result.friction_axial[k].powi(2) + result.friction_tangential[k].powi(2)).sqrt();
        assert!((total - result.friction[k]).abs() < 1e-12);
    }
}
