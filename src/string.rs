//! Wellbore and pipe-string section tables.
//!
//! Both the hole geometry ([`WellBore`]) and the pipe run inside it
//! ([`PipeString`]) are ordered, gap-free lists of sections spanning
//! `top..bottom`. They share one table core and differ only in the data each
//! section carries; the roles are explicit types rather than a runtime tag.

use serde::Serialize;

use crate::constants::DEFAULT_STEEL_DENSITY_SG;
use crate::error::{Result, WellboreError};

const SPAN_EPSILON: f64 = 1e-9;

/// Direction a string is assembled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildMethod {
    /// Append from the shallowest point downward; each section needs an
    /// explicit bottom.
    TopDown,
    /// Append from the deepest point upward; each section resolves its top
    /// from a length, an explicit top, or by filling to the string top.
    BottomUp,
}

/// Depth span shared by every section kind.
pub trait SectionSpan: Clone {
    fn top(&self) -> f64;
    fn bottom(&self) -> f64;
    /// Copy of the section moved onto a new span.
    fn respan(&self, top: f64, bottom: f64) -> Self;

    fn length(&self) -> f64 {
        self.bottom() - self.top()
    }
}

/// One interval of the hole geometry.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WellboreSection {
    pub top: f64,
    pub bottom: f64,
    pub length: f64,
    /// Hole (or casing) inner diameter
    pub inner_diameter: f64,
    /// Coulomb sliding friction coefficient against the pipe
    pub friction_sliding: f64,
}

impl SectionSpan for WellboreSection {
    fn top(&self) -> f64 {
        self.top
    }

    fn bottom(&self) -> f64 {
        self.bottom
    }

    fn respan(&self, top: f64, bottom: f64) -> Self {
        WellboreSection {
            top,
            bottom,
            length: bottom - top,
            ..*self
        }
    }
}

/// One interval of the pipe string.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PipeSection {
    pub top: f64,
    pub bottom: f64,
    pub length: f64,
    /// Body outer diameter
    pub od: f64,
    /// Body inner diameter
    pub id: f64,
    /// Weight per unit length (N/m)
    pub unit_weight: f64,
    /// Pipe material density in specific gravity
    pub density: f64,
    /// Tool-joint outer diameter, when larger than the body
    pub tooljoint_od: Option<f64>,
}

impl PipeSection {
    /// OD that actually contacts the hole: tool joint when present.
    pub fn characteristic_od(&self) -> f64 {
        self.tooljoint_od.unwrap_or(self.od)
    }

    /// Fractional steel weight left when submerged in the fluid.
    pub fn buoyancy_factor(&self, fluid_density: f64) -> f64 {
        (self.density - fluid_density) / self.density
    }
}

impl SectionSpan for PipeSection {
    fn top(&self) -> f64 {
        self.top
    }

    fn bottom(&self) -> f64 {
        self.bottom
    }

    fn respan(&self, top: f64, bottom: f64) -> Self {
        PipeSection {
            top,
            bottom,
            length: bottom - top,
            ..*self
        }
    }
}

/// Options for one `WellBore::add_section` call. The span fields follow the
/// build method: top-down needs `bottom`; bottom-up takes `length`, `top`, or
/// neither (fill to the string top).
#[derive(Debug, Clone, Copy, Default)]
pub struct WellboreSectionParams {
    pub length: Option<f64>,
    pub top: Option<f64>,
    pub bottom: Option<f64>,
    pub inner_diameter: f64,
    pub friction_sliding: f64,
}

/// Options for one `PipeString::add_section` call.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipeSectionParams {
    pub length: Option<f64>,
    pub top: Option<f64>,
    pub bottom: Option<f64>,
    pub od: f64,
    pub id: f64,
    pub unit_weight: f64,
    /// Defaults to steel (7.85 SG) when absent
    pub density: Option<f64>,
    pub tooljoint_od: Option<f64>,
}

/// Shared section-table core: span resolution, depth ordering, contiguity
/// verification and truncation.
#[derive(Debug, Clone)]
struct SectionTable<S: SectionSpan> {
    name: String,
    top: f64,
    bottom: f64,
    method: BuildMethod,
    sections: Vec<S>,
    complete: bool,
}

impl<S: SectionSpan> SectionTable<S> {
    fn new(name: String, top: f64, bottom: f64, method: BuildMethod) -> Result<Self> {
        if !top.is_finite() || !bottom.is_finite() || top >= bottom {
            return Err(WellboreError::validation(format!(
                "string '{}': top {} must lie above bottom {}",
                name, top, bottom
            )));
        }
        Ok(SectionTable {
            name,
            top,
            bottom,
            method,
            sections: Vec::new(),
            complete: false,
        })
    }

    fn add(
        &mut self,
        length: Option<f64>,
        top: Option<f64>,
        bottom: Option<f64>,
        make: impl FnOnce(f64, f64) -> S,
    ) -> Result<()> {
        let (sec_top, sec_bottom) = match self.method {
            BuildMethod::BottomUp => {
                let anchor = match self.sections.first() {
                    None => self.bottom,
                    Some(shallowest) => shallowest.top(),
                };
                let sec_top = if let Some(len) = length {
                    // A length reaching past the string top is clamped.
                    (anchor - len).max(self.top)
                } else if let Some(t) = top {
                    t
                } else {
                    self.top
                };
                (sec_top, anchor)
            }
            BuildMethod::TopDown => {
                let anchor = match self.sections.last() {
                    None => self.top,
                    Some(deepest) => deepest.bottom(),
                };
                let sec_bottom = bottom.ok_or_else(|| {
                    WellboreError::validation(format!(
                        "string '{}': top-down sections require an explicit bottom",
                        self.name
                    ))
                })?;
                (anchor, sec_bottom)
            }
        };

        if sec_top >= sec_bottom {
            return Err(WellboreError::validation(format!(
                "string '{}': section span {}..{} has non-positive length",
                self.name, sec_top, sec_bottom
            )));
        }

        self.sections.push(make(sec_top, sec_bottom));
        self.verify()
    }

    /// Re-sort by depth, assert the layout is contiguous and inside the
    /// string bounds, and update the `complete` flag.
    fn verify(&mut self) -> Result<()> {
        self.sections
            .sort_by(|a, b| a.bottom().total_cmp(&b.bottom()));

        for pair in self.sections.windows(2) {
            if (pair[1].top() - pair[0].bottom()).abs() > SPAN_EPSILON {
                return Err(WellboreError::validation(format!(
                    "string '{}': sections are not contiguous at depth {}",
                    self.name,
                    pair[0].bottom()
                )));
            }
        }

        let (first_top, last_bottom) = match (self.sections.first(), self.sections.last()) {
            (Some(first), Some(last)) => (first.top(), last.bottom()),
            _ => return Ok(()),
        };

        match self.method {
            BuildMethod::TopDown => {
                if (first_top - self.top).abs() > SPAN_EPSILON {
                    return Err(WellboreError::validation(format!(
                        "string '{}': first section must start at the string top",
                        self.name
                    )));
                }
                if last_bottom > self.bottom + SPAN_EPSILON {
                    return Err(WellboreError::validation(format!(
                        "string '{}': section bottom {} exceeds the string bottom {}",
                        self.name, last_bottom, self.bottom
                    )));
                }
                self.complete = (last_bottom - self.bottom).abs() <= SPAN_EPSILON;
            }
            BuildMethod::BottomUp => {
                if (last_bottom - self.bottom).abs() > SPAN_EPSILON {
                    return Err(WellboreError::validation(format!(
                        "string '{}': deepest section must end at the string bottom",
                        self.name
                    )));
                }
                if first_top < self.top - SPAN_EPSILON {
                    return Err(WellboreError::validation(format!(
                        "string '{}': section top {} lies above the string top {}",
                        self.name, first_top, self.top
                    )));
                }
                self.complete = (first_top - self.top).abs() <= SPAN_EPSILON;
            }
        }
        Ok(())
    }

    /// Truncated copy covering `top..md`: the bottom-aligned overlap of the
    /// existing sections with re-derived lengths.
    fn depth(&self, md: f64) -> Result<Self> {
        if !(self.top < md && md <= self.bottom) {
            return Err(WellboreError::validation(format!(
                "string '{}': truncation depth {} outside ({}, {}]",
                self.name, md, self.top, self.bottom
            )));
        }
        let mut truncated = SectionTable::new(self.name.clone(), self.top, md, BuildMethod::BottomUp)?;
        for section in self.sections.iter().rev() {
            if truncated.complete {
                break;
            }
            let template = section.clone();
            truncated.add(Some(section.length()), None, None, |t, b| template.respan(t, b))?;
        }
        Ok(truncated)
    }

    /// Section covering `md` under the rule `top < md <= bottom`.
    fn section_at(&self, md: f64) -> Option<&S> {
        self.sections
            .iter()
            .find(|s| s.top() < md && md <= s.bottom())
    }
}

/// Hole geometry: cased/open-hole intervals with diameter and friction.
#[derive(Debug, Clone)]
pub struct WellBore {
    table: SectionTable<WellboreSection>,
}

impl WellBore {
    pub fn new(
        name: impl Into<String>,
        top: f64,
        bottom: f64,
        method: BuildMethod,
    ) -> Result<WellBore> {
        Ok(WellBore {
            table: SectionTable::new(name.into(), top, bottom, method)?,
        })
    }

    pub fn add_section(&mut self, params: WellboreSectionParams) -> Result<()> {
        if !(params.inner_diameter > 0.0) {
            return Err(WellboreError::validation(
                "wellbore section requires a positive inner diameter",
            ));
        }
        if !(params.friction_sliding >= 0.0) || !params.friction_sliding.is_finite() {
            return Err(WellboreError::validation(
                "wellbore section requires a sliding friction coefficient",
            ));
        }
        self.table
            .add(params.length, params.top, params.bottom, |top, bottom| {
                WellboreSection {
                    top,
                    bottom,
                    length: bottom - top,
                    inner_diameter: params.inner_diameter,
                    friction_sliding: params.friction_sliding,
                }
            })
    }

    pub fn name(&self) -> &str {
        &self.table.name
    }

    pub fn top(&self) -> f64 {
        self.table.top
    }

    pub fn bottom(&self) -> f64 {
        self.table.bottom
    }

    pub fn complete(&self) -> bool {
        self.table.complete
    }

    pub fn sections(&self) -> &[WellboreSection] {
        &self.table.sections
    }

    /// Truncated copy covering the shallow part down to `md`.
    pub fn depth(&self, md: f64) -> Result<WellBore> {
        Ok(WellBore {
            table: self.table.depth(md)?,
        })
    }

    /// Copy with every section's sliding friction replaced; used to sweep
    /// friction factors without rebuilding the geometry.
    pub fn with_friction(&self, friction: f64) -> WellBore {
        let mut copy = self.clone();
        for section in &mut copy.table.sections {
            section.friction_sliding = friction;
        }
        copy
    }

    pub(crate) fn section_at(&self, md: f64) -> Option<&WellboreSection> {
        self.table.section_at(md)
    }
}

/// Pipe string (drillstring, casing string, BHA) run inside a wellbore.
#[derive(Debug, Clone)]
pub struct PipeString {
    table: SectionTable<PipeSection>,
}

impl PipeString {
    pub fn new(
        name: impl Into<String>,
        top: f64,
        bottom: f64,
        method: BuildMethod,
    ) -> Result<PipeString> {
        Ok(PipeString {
            table: SectionTable::new(name.into(), top, bottom, method)?,
        })
    }

    pub fn add_section(&mut self, params: PipeSectionParams) -> Result<()> {
        if !(params.od > 0.0) {
            return Err(WellboreError::validation(
                "pipe section requires a positive outer diameter",
            ));
        }
        if !(params.unit_weight > 0.0) {
            return Err(WellboreError::validation(
                "pipe section requires a positive unit weight",
            ));
        }
        let density = params.density.unwrap_or(DEFAULT_STEEL_DENSITY_SG);
        if !(density > 0.0) {
            return Err(WellboreError::validation(
                "pipe section requires a positive density",
            ));
        }
        self.table
            .add(params.length, params.top, params.bottom, |top, bottom| {
                PipeSection {
                    top,
                    bottom,
                    length: bottom - top,
                    od: params.od,
                    id: params.id,
                    unit_weight: params.unit_weight,
                    density,
                    tooljoint_od: params.tooljoint_od,
                }
            })
    }

    pub fn name(&self) -> &str {
        &self.table.name
    }

    pub fn top(&self) -> f64 {
        self.table.top
    }

    pub fn bottom(&self) -> f64 {
        self.table.bottom
    }

    pub fn complete(&self) -> bool {
        self.table.complete
    }

    pub fn sections(&self) -> &[PipeSection] {
        &self.table.sections
    }

    /// Truncated copy simulating the string run in to `md`.
    pub fn depth(&self, md: f64) -> Result<PipeString> {
        Ok(PipeString {
            table: self.table.depth(md)?,
        })
    }

    pub(crate) fn section_at(&self, md: f64) -> Option<&PipeSection> {
        self.table.section_at(md)
    }
}
