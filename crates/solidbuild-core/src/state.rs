//! The authoritative mutable state of one building session.
//!
//! Exactly one `BuilderState` exists per active session; every mutation goes
//! through the methods here. Invalid input returns a tagged [`StateError`]
//! and leaves the state structurally unchanged, so callers can react
//! deliberately instead of relying on silent defensive returns.

use std::collections::BTreeMap;

use solidbuild_data::Blueprint;

use crate::analysis::AnalysisResult;

/// Status message shown when a fresh session starts.
pub const INITIAL_MESSAGE: &str = "Susun komponen 2D menjadi bangun ruang 3D!";

/// Status message shown after an explicit reset.
pub const RESET_MESSAGE: &str = "Progres direset. Susun ulang komponen dari awal.";

/// Fill status of one part slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartSlot {
    pub filled: bool,
    /// Component-type token that must match to fill this slot.
    pub accepts: String,
}

/// Errors from state mutations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StateError {
    #[error("item index {index} out of range ({item_count} items)")]
    InvalidItemIndex { index: usize, item_count: usize },

    #[error("part '{part_id}' not declared for item {item_index}")]
    UnknownPart { item_index: usize, part_id: String },

    #[error("scale must be a positive finite number, got {value}")]
    InvalidScale { value: f64 },
}

/// What a successful `mark_part_filled` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillReport {
    /// False when the slot was already filled (the call was a no-op).
    pub newly_filled: bool,
    /// True when every slot of the addressed item is now filled.
    pub item_complete: bool,
}

/// Mutable session state: fill flags, spawn bookkeeping, scale, and the
/// latest completion/analysis results.
#[derive(Debug, Clone, PartialEq)]
pub struct BuilderState {
    /// One map per blueprint item, keyed by part id.
    item_parts: Vec<BTreeMap<String, PartSlot>>,
    /// One flag per distinct component type declared in the blueprint.
    spawned_components: BTreeMap<String, bool>,
    selected_size: f64,
    completion_message: String,
    is_level_complete: bool,
    analysis: Option<AnalysisResult>,
}

impl BuilderState {
    /// Build the all-unfilled state for a blueprint, scale 1.0.
    pub fn new(blueprint: &Blueprint) -> Self {
        Self {
            item_parts: make_item_parts(blueprint),
            spawned_components: make_spawn_flags(blueprint),
            selected_size: 1.0,
            completion_message: INITIAL_MESSAGE.to_string(),
            is_level_complete: false,
            analysis: None,
        }
    }

    /// Restore the all-unfilled state. The selected scale survives a reset.
    pub fn reset(&mut self, blueprint: &Blueprint) {
        self.item_parts = make_item_parts(blueprint);
        self.spawned_components = make_spawn_flags(blueprint);
        self.completion_message = RESET_MESSAGE.to_string();
        self.is_level_complete = false;
        self.analysis = None;
    }

    // --- Mutations ---

    /// Record that the component for `component_type` has been spawned.
    /// Idempotent; unknown tokens are ignored. Returns whether the flag was
    /// newly set.
    pub fn mark_component_spawned(&mut self, component_type: &str) -> bool {
        match self.spawned_components.get_mut(component_type) {
            Some(flag) if !*flag => {
                *flag = true;
                true
            }
            _ => false,
        }
    }

    /// Mark one part slot as filled.
    ///
    /// Fails with `InvalidItemIndex` / `UnknownPart` without touching any
    /// state. Filling an already-filled slot is a valid no-op.
    pub fn mark_part_filled(
        &mut self,
        item_index: usize,
        part_id: &str,
    ) -> Result<FillReport, StateError> {
        let item_count = self.item_parts.len();
        let parts = self
            .item_parts
            .get_mut(item_index)
            .ok_or(StateError::InvalidItemIndex {
                index: item_index,
                item_count,
            })?;
        let slot = parts.get_mut(part_id).ok_or_else(|| StateError::UnknownPart {
            item_index,
            part_id: part_id.to_string(),
        })?;

        let newly_filled = !slot.filled;
        slot.filled = true;
        let item_complete = parts.values().all(|s| s.filled);

        Ok(FillReport {
            newly_filled,
            item_complete,
        })
    }

    /// Replace the session scale. Rescaling never alters fill progress.
    pub fn set_selected_size(&mut self, scale: f64) -> Result<(), StateError> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(StateError::InvalidScale { value: scale });
        }
        self.selected_size = scale;
        Ok(())
    }

    pub(crate) fn set_completion(&mut self, message: String, complete: bool) {
        self.completion_message = message;
        self.is_level_complete = complete;
    }

    /// Cache the latest analysis result (cleared on reset).
    pub fn set_analysis(&mut self, analysis: Option<AnalysisResult>) {
        self.analysis = analysis;
    }

    // --- Read access ---

    pub fn item_parts(&self) -> &[BTreeMap<String, PartSlot>] {
        &self.item_parts
    }

    pub fn is_component_spawned(&self, component_type: &str) -> bool {
        self.spawned_components
            .get(component_type)
            .copied()
            .unwrap_or(false)
    }

    pub fn selected_size(&self) -> f64 {
        self.selected_size
    }

    pub fn completion_message(&self) -> &str {
        &self.completion_message
    }

    pub fn is_level_complete(&self) -> bool {
        self.is_level_complete
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    /// Whether the addressed item exists and has all of its (at least one)
    /// slots filled.
    pub fn item_complete(&self, item_index: usize) -> bool {
        self.item_parts
            .get(item_index)
            .is_some_and(|parts| !parts.is_empty() && parts.values().all(|s| s.filled))
    }

    /// Fill status for one slot, if it exists.
    pub fn part_filled(&self, item_index: usize, part_id: &str) -> Option<bool> {
        self.item_parts
            .get(item_index)
            .and_then(|parts| parts.get(part_id))
            .map(|s| s.filled)
    }

    /// `(filled, total)` slot counts across all items.
    pub fn fill_counts(&self) -> (usize, usize) {
        let mut filled = 0;
        let mut total = 0;
        for parts in &self.item_parts {
            total += parts.len();
            filled += parts.values().filter(|s| s.filled).count();
        }
        (filled, total)
    }
}

fn make_item_parts(blueprint: &Blueprint) -> Vec<BTreeMap<String, PartSlot>> {
    blueprint
        .items
        .iter()
        .map(|item| {
            item.parts
                .iter()
                .map(|part| {
                    (
                        part.id.clone(),
                        PartSlot {
                            filled: false,
                            accepts: part.accepts.clone(),
                        },
                    )
                })
                .collect()
        })
        .collect()
}

fn make_spawn_flags(blueprint: &Blueprint) -> BTreeMap<String, bool> {
    blueprint
        .items
        .iter()
        .flat_map(|item| &item.parts)
        .map(|part| (part.component_type.clone(), false))
        .collect()
}
