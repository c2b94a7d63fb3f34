//! Headless end-to-end run of the assembly flow across all library crates:
//! blueprint fixtures in, zone lifecycle and completion checks through the
//! core, durable progress out through a real `JsonFileStore` on disk.

use std::fs;
use std::path::PathBuf;

use solidbuild_core::analysis::{AnalysisOutcome, analyze_building};
use solidbuild_core::completion::{COMPLETE_MESSAGE, check_completion};
use solidbuild_core::state::BuilderState;
use solidbuild_data::test_utils::twin_cylinder_blueprint;
use solidbuild_store::{
    COMPLETED_CHALLENGES_KEY, FixedClock, JsonFileStore, LAST_BUILD_RESULT_KEY, ProgressStore,
};
use solidbuild_zones::test_utils::RecordingScene;
use solidbuild_zones::{FILLED_OPACITY, HotspotZoneManager, UNFILLED_OPACITY};

fn make_test_dir(suffix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "solidbuild_e2e_{suffix}_{}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn full_assembly_run_persists_progress() {
    let dir = make_test_dir("full_run");
    let mut store = JsonFileStore::open(&dir).unwrap();
    let clock = FixedClock("2026-08-30T09:00:00Z".to_string());

    let blueprint = twin_cylinder_blueprint();
    let mut state = BuilderState::new(&blueprint);
    let mut zones = HotspotZoneManager::new();
    let mut scene = RecordingScene::new();
    zones.rebuild(&blueprint, &state, &mut scene);

    assert_eq!(zones.zone_count(), 6);
    for (_, zone) in zones.zones() {
        assert_eq!(zone.visual.opacity, UNFILLED_OPACITY);
    }

    // Assemble the first cylinder.
    for part in &blueprint.items[0].parts {
        let report = state.mark_part_filled(0, &part.id).unwrap();
        assert!(report.newly_filled);
        zones.refresh_visuals(&state);
    }
    let (_, zone) = zones.find_zone(0, "selimut").unwrap();
    assert_eq!(zone.visual.opacity, FILLED_OPACITY);

    let report = check_completion(&mut state, &blueprint, &mut store, &clock);
    assert!(!report.is_complete);
    assert_eq!(
        report.message,
        "Progress: 3/6 komponen terpasang. 3 komponen tersisa."
    );
    assert!(store.load_completed().unwrap().is_empty());

    // A scale change promotes the finished cylinder out of the zone layer.
    state.set_selected_size(2.0).unwrap();
    zones.rebuild(&blueprint, &state, &mut scene);
    assert_eq!(zones.zone_count(), 3);
    assert!(zones.replaced_items().contains(&0));

    // Finish the second cylinder.
    for part in &blueprint.items[1].parts {
        state.mark_part_filled(1, &part.id).unwrap();
    }
    let report = check_completion(&mut state, &blueprint, &mut store, &clock);
    assert!(report.is_complete);
    assert_eq!(report.message, COMPLETE_MESSAGE);
    assert!(report.persistence_warning.is_none());
    assert!(state.is_level_complete());

    // Progress survives a fresh store handle over the same directory.
    let reopened = JsonFileStore::open(&dir).unwrap();
    let completed = reopened.load_completed().unwrap();
    assert!(completed.contains("tabung_kembar"));

    let last = reopened.load_last_result().unwrap().unwrap();
    assert_eq!(last.challenge_id, "tabung_kembar");
    assert_eq!(last.completed_at, "2026-08-30T09:00:00Z");
    assert_eq!(last.part_count, 6);
    assert_eq!(last.method, "3d-assembly");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn completion_files_use_the_store_keys() {
    let dir = make_test_dir("store_keys");
    let mut store = JsonFileStore::open(&dir).unwrap();
    let clock = FixedClock("2026-08-30T09:00:00Z".to_string());

    let blueprint = twin_cylinder_blueprint();
    let mut state = BuilderState::new(&blueprint);
    for (index, item) in blueprint.items.iter().enumerate() {
        for part in &item.parts {
            state.mark_part_filled(index, &part.id).unwrap();
        }
    }
    check_completion(&mut state, &blueprint, &mut store, &clock);

    let completed_path = dir.join(format!("{COMPLETED_CHALLENGES_KEY}.json"));
    let last_path = dir.join(format!("{LAST_BUILD_RESULT_KEY}.json"));
    assert!(completed_path.is_file());
    assert!(last_path.is_file());

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&last_path).unwrap()).unwrap();
    assert_eq!(raw["challenge_id"], "tabung_kembar");
    assert_eq!(raw["method"], "3d-assembly");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn analysis_after_full_run_sums_both_cylinders() {
    let blueprint = twin_cylinder_blueprint();
    let mut state = BuilderState::new(&blueprint);
    for (index, item) in blueprint.items.iter().enumerate() {
        for part in &item.parts {
            state.mark_part_filled(index, &part.id).unwrap();
        }
    }

    let AnalysisOutcome::Report(result) = analyze_building(&state, &blueprint) else {
        panic!("expected a report for a fully assembled blueprint");
    };
    assert_eq!(result.breakdown.len(), 2);
    assert_eq!(result.breakdown[0].sequence, 1);
    assert_eq!(result.breakdown[0].volume, "452.39");
    assert_eq!(result.breakdown[1].volume, "62.83");
    assert_eq!(result.total_volume, "515.22");
    assert_eq!(result.total_surface_area, "414.69");
}

#[test]
fn reset_after_completion_allows_a_second_run() {
    let dir = make_test_dir("second_run");
    let mut store = JsonFileStore::open(&dir).unwrap();
    let clock = FixedClock("2026-08-30T09:00:00Z".to_string());

    let blueprint = twin_cylinder_blueprint();
    let mut state = BuilderState::new(&blueprint);
    let mut zones = HotspotZoneManager::new();
    let mut scene = RecordingScene::new();
    zones.rebuild(&blueprint, &state, &mut scene);

    for (index, item) in blueprint.items.iter().enumerate() {
        for part in &item.parts {
            state.mark_part_filled(index, &part.id).unwrap();
        }
    }
    check_completion(&mut state, &blueprint, &mut store, &clock);
    assert!(state.is_level_complete());

    state.reset(&blueprint);
    zones.clear(&mut scene);
    zones.rebuild(&blueprint, &state, &mut scene);

    assert!(!state.is_level_complete());
    assert_eq!(state.fill_counts(), (0, 6));
    assert_eq!(zones.zone_count(), 6);
    assert!(zones.replaced_items().is_empty());
    // The persisted record is untouched by an in-session reset.
    assert!(store.load_completed().unwrap().contains("tabung_kembar"));

    let _ = fs::remove_dir_all(&dir);
}
