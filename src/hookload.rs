//! Hookload envelopes: surface load versus run-in depth over a friction
//! factor grid.
//!
//! Each grid point re-runs the torque-and-drag model with the pipe string
//! truncated at that depth and every wellbore section's friction overridden
//! by the grid value. Friction factors are independent, so they run in
//! parallel.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::Serialize;

use crate::constants::{DEFAULT_FRICTION_RANGE, DEFAULT_HOOKLOAD_STEP};
use crate::error::{Result, WellboreError};
use crate::string::{PipeString, WellBore};
use crate::survey::Trajectory;
use crate::torque_drag::{TensionMode, TorqueDragSolver};

/// Surface loads over the depth grid for one friction factor.
#[derive(Debug, Clone, Serialize)]
pub struct HookloadSeries {
    pub friction_factor: f64,
    /// One value per depth-grid entry, per tension family
    pub tension: BTreeMap<TensionMode, Vec<f64>>,
}

/// Full sweep output: the shared depth grid plus one series per friction
/// factor, in grid order.
#[derive(Debug, Clone, Serialize)]
pub struct HookloadEnvelope {
    pub md: Vec<f64>,
    pub series: Vec<HookloadSeries>,
}

/// Sweep driver over a fixed trajectory, hole geometry and pipe string.
#[derive(Debug, Clone)]
pub struct HookloadSweep {
    trajectory: Trajectory,
    wellbore: WellBore,
    string: PipeString,
    fluid_density: f64,
    depth_step: f64,
    friction_range: (f64, f64, f64),
}

impl HookloadSweep {
    pub fn new(
        trajectory: &Trajectory,
        wellbore: &WellBore,
        string: &PipeString,
        fluid_density: f64,
    ) -> Result<HookloadSweep> {
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
        Ok(HookloadSweep {
            trajectory: trajectory.clone(),
            wellbore: wellbore.clone(),
            string: string.clone(),
            fluid_density,
            depth_step: DEFAULT_HOOKLOAD_STEP,
            friction_range: DEFAULT_FRICTION_RANGE,
        })
    }

    /// Depth spacing between sweep points. The string bottom is always
    /// included regardless of the step.
    pub fn set_depth_step(&mut self, step: f64) -> Result<&mut Self> {
        if !(step > 0.0) || !step.is_finite() {
            return Err(WellboreError::validation(
                "hookload depth step must be positive",
            ));
        }
        self.depth_step = step;
        Ok(self)
    }

    /// Friction factor grid as (start, stop, step); the stop value is
    /// included.
    pub fn set_friction_range(&mut self, start: f64, stop: f64, step: f64) -> Result<&mut Self> {
        if !(start >= 0.0 && stop >= start && step > 0.0) {
            return Err(WellboreError::validation(
                "friction range must satisfy 0 <= start <= stop with a positive step",
            ));
        }
        self.friction_range = (start, stop, step);
        Ok(self)
    }

    pub fn run(&self) -> Result<HookloadEnvelope> {
        let md_grid = inclusive_grid(
            self.string.top() + self.depth_step,
            self.string.bottom(),
            self.depth_step,
        );
        let (start, stop, step) = self.friction_range;
        let ff_grid = inclusive_grid(start, stop, step);

        let series = ff_grid
            .par_iter()
            .map(|&ff| self.sweep_one(ff, &md_grid))
            .collect::<Result<Vec<_>>>()?;

        Ok(HookloadEnvelope {
            md: md_grid,
            series,
        })
    }

    fn sweep_one(&self, friction: f64, md_grid: &[f64]) -> Result<HookloadSeries> {
        let wellbore = self.wellbore.with_friction(friction);
        let mut tension: BTreeMap<TensionMode, Vec<f64>> = BTreeMap::new();
        for &md in md_grid {
            let run_in = self.string.depth(md)?;
            let solver = TorqueDragSolver::new(&self.trajectory, &wellbore, &run_in, self.fluid_density)?;
            let result = solver.solve()?;
            for (mode, values) in result.tension {
                tension.entry(mode).or_default().push(values[0]);
            }
        }
        Ok(HookloadSeries {
            friction_factor: friction,
            tension,
        })
    }
}

/// Ascending grid from `start` by `step`, with `stop` appended as the final
/// entry whether or not the step lands on it.
fn inclusive_grid(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let mut grid = Vec::new();
    let mut value = start;
    while value < stop - 1e-9 {
        grid.push(value);
        value += step;
    }
    grid.push(stop);
    grid
}
