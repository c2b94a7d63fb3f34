//! Aggregate analysis over fully assembled items.
//!
//! Sums are accumulated from the 2-decimal formatted per-item values, not the
//! raw intermediates, so the per-item figures and the totals the UI shows
//! always add up exactly.

use solidbuild_data::Blueprint;

use crate::shape;
use crate::state::BuilderState;

/// Message emitted when analysis runs with nothing fully assembled. A valid
/// empty outcome, not an error.
pub const NOTHING_BUILT_MESSAGE: &str =
    "Belum ada bangun ruang yang selesai dirakit. Pasang semua komponen terlebih dahulu.";

/// Per-item summary in an analysis breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownEntry {
    /// 1-based position in the breakdown.
    pub sequence: usize,
    /// Shape token ("cylinder", "cone", "sphere").
    pub shape: String,
    pub display_name: String,
    pub volume: String,
    pub surface_area: String,
    pub radius: f64,
    pub height: f64,
}

/// Aggregate result across all fully assembled items.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub total_volume: String,
    pub total_surface_area: String,
    pub breakdown: Vec<BreakdownEntry>,
}

/// Outcome of an analysis request.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Report(AnalysisResult),
    /// Zero items are fully assembled yet.
    NothingBuilt(String),
}

impl AnalysisOutcome {
    pub fn report(&self) -> Option<&AnalysisResult> {
        match self {
            AnalysisOutcome::Report(r) => Some(r),
            AnalysisOutcome::NothingBuilt(_) => None,
        }
    }
}

/// Analyze every fully assembled item at the current session scale.
///
/// Item params are scaled by `selected_size` before the geometry runs;
/// partially assembled items are skipped entirely.
pub fn analyze_building(state: &BuilderState, blueprint: &Blueprint) -> AnalysisOutcome {
    let scale = state.selected_size();
    let mut total_volume = 0.0;
    let mut total_surface_area = 0.0;
    let mut breakdown = Vec::new();

    for (index, item) in blueprint.items.iter().enumerate() {
        if !state.item_complete(index) {
            continue;
        }

        let radius = item.params.radius * scale;
        let height = item.params.height.unwrap_or(0.0) * scale;
        let metrics = shape::calculate(blueprint.shape_type, radius, height);

        total_volume += metrics.volume.parse::<f64>().unwrap_or(0.0);
        total_surface_area += metrics.surface_area.parse::<f64>().unwrap_or(0.0);

        breakdown.push(BreakdownEntry {
            sequence: breakdown.len() + 1,
            shape: blueprint.shape_type.token().to_string(),
            display_name: item.display_name.clone(),
            volume: metrics.volume,
            surface_area: metrics.surface_area,
            radius: metrics.radius,
            height: metrics.height,
        });
    }

    if breakdown.is_empty() {
        return AnalysisOutcome::NothingBuilt(NOTHING_BUILT_MESSAGE.to_string());
    }

    AnalysisOutcome::Report(AnalysisResult {
        total_volume: format!("{total_volume:.2}"),
        total_surface_area: format!("{total_surface_area:.2}"),
        breakdown,
    })
}
