//! # Wellbore Engine
//!
//! Wellbore trajectory construction from sparse survey records using the
//! minimum-curvature method, with depth interpolation, section tables for
//! hole geometry and pipe strings, and a soft-string torque-and-drag model.

// Re-export the main types and functions
pub use error::{Result, WellboreError};
pub use hookload::{HookloadEnvelope, HookloadSeries, HookloadSweep};
pub use string::{
    BuildMethod, PipeSection, PipeSectionParams, PipeString, SectionSpan, WellBore,
    WellboreSection, WellboreSectionParams,
};
pub use survey::{
    PointDelta, PointType, SectionType, SurveyInfo, SurveyPoint, SurveyRecord, SurveyRow,
    Trajectory, Units, WellType,
};
pub use torque_drag::{
    TensionMode, TorqueDragOptions, TorqueDragResult, TorqueDragSolver, TorqueMode,
};

// Module declarations
pub mod constants;
pub mod equations;
mod builder;
mod error;
mod hookload;
mod interpolate;
mod string;
mod survey;
mod torque_drag;
