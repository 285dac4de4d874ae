//! Data handed to the visualization collaborator.
//!
//! The core computes labels and values; drawing belongs to the surface
//! implementation. The surface owns the mapping from [`ChartId`] to
//! whatever live chart object it manages, and must dispose an existing
//! chart for the same id before replacing it.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChartId {
    MoodLine,
    MoodBar,
    Distribution,
    MoodWave,
}

impl ChartId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MoodLine => "line-chart",
            Self::MoodBar => "bar-chart",
            Self::Distribution => "pie-chart",
            Self::MoodWave => "wave-chart",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartStyle {
    pub stroke: Option<String>,
    /// One entry per dataset, or one per slice for pies.
    pub fills: Vec<String>,
    pub filled_area: bool,
    pub tension: f64,
    pub corner_radius: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub id: ChartId,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub style: ChartStyle,
}

/// Presentation-side renderer. `render` fully replaces the chart for
/// `spec.id`; implementations dispose the previous instance first.
pub trait ChartSurface {
    fn render(&mut self, spec: ChartSpec);
}
