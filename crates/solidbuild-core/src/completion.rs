//! Completion check: counts filled slots, updates the session message, and
//! fires the persistence side effect when the construction is done.
//!
//! Store failures never interrupt the user flow; they degrade to a warning on
//! the report while the in-memory completion state stays intact.

use solidbuild_data::Blueprint;
use solidbuild_store::{Clock, CompletionRecord, ProgressStore};

use crate::state::BuilderState;

/// Completion method tag written into persisted records.
pub const COMPLETION_METHOD: &str = "3d-assembly";

/// Message shown when every slot of every item is filled.
pub const COMPLETE_MESSAGE: &str =
    "Selamat! Semua komponen terpasang. Bangun ruang berhasil dibangun!";

/// Message shown for a blueprint that declares no parts at all.
pub const NO_PARTS_MESSAGE: &str = "Blueprint tidak memiliki komponen untuk dipasang.";

/// Outcome of one completion check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionReport {
    pub message: String,
    pub is_complete: bool,
    pub filled: usize,
    pub total: usize,
    /// Present when a persistence write failed (the session continues).
    pub persistence_warning: Option<String>,
}

/// Check whether the construction is complete, update the state's message and
/// completion flag, and on completion persist the record.
///
/// The completed-set write happens only when the challenge id is newly
/// completed; the last-result record is overwritten on every completion.
pub fn check_completion(
    state: &mut BuilderState,
    blueprint: &Blueprint,
    store: &mut dyn ProgressStore,
    clock: &dyn Clock,
) -> CompletionReport {
    let (filled, total) = state.fill_counts();

    if total == 0 {
        state.set_completion(NO_PARTS_MESSAGE.to_string(), false);
        return CompletionReport {
            message: NO_PARTS_MESSAGE.to_string(),
            is_complete: false,
            filled,
            total,
            persistence_warning: None,
        };
    }

    if filled < total {
        let remaining = total - filled;
        let message =
            format!("Progress: {filled}/{total} komponen terpasang. {remaining} komponen tersisa.");
        state.set_completion(message.clone(), false);
        return CompletionReport {
            message,
            is_complete: false,
            filled,
            total,
            persistence_warning: None,
        };
    }

    state.set_completion(COMPLETE_MESSAGE.to_string(), true);
    let persistence_warning = persist_completion(blueprint, total, store, clock).err();

    CompletionReport {
        message: COMPLETE_MESSAGE.to_string(),
        is_complete: true,
        filled,
        total,
        persistence_warning,
    }
}

/// Add the challenge to the completed set if absent and overwrite the
/// last-result record. Returns the warning text on the first failure.
fn persist_completion(
    blueprint: &Blueprint,
    part_count: usize,
    store: &mut dyn ProgressStore,
    clock: &dyn Clock,
) -> Result<(), String> {
    // A failed read starts from an empty set; the insert below still runs so
    // the completion is not lost when only the read path is broken.
    let mut completed = store
        .load_completed()
        .map_err(|e| format!("gagal membaca progres tersimpan: {e}"))
        .unwrap_or_default();

    if completed.insert(blueprint.challenge_id.clone()) {
        store
            .save_completed(&completed)
            .map_err(|e| format!("gagal menyimpan daftar tantangan selesai: {e}"))?;
    }

    let record = CompletionRecord {
        challenge_id: blueprint.challenge_id.clone(),
        challenge_name: blueprint.challenge_name.clone(),
        completed_at: clock.now_iso8601(),
        part_count,
        method: COMPLETION_METHOD.to_string(),
    };
    store
        .save_last_result(&record)
        .map_err(|e| format!("gagal menyimpan hasil terakhir: {e}"))
}
