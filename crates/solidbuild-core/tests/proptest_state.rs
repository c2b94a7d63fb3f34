//! Property-based tests for the builder state machine.
//!
//! Uses proptest to generate random blueprints and fill sequences, then
//! verify the structural invariants of initialization, mutation, completion
//! counting, and rescaling.

use proptest::prelude::*;

use solidbuild_core::state::BuilderState;
use solidbuild_core::{analyze_building, check_completion};
use solidbuild_data::{Blueprint, Item, Part, PartKind, ShapeParams, ShapeType};
use solidbuild_store::{FixedClock, MemoryStore};

// ===========================================================================
// Generators
// ===========================================================================

fn arb_part_kind() -> impl Strategy<Value = PartKind> {
    prop_oneof![
        Just(PartKind::Circle),
        Just(PartKind::Rectangle),
        Just(PartKind::Sphere),
    ]
}

fn arb_shape_type() -> impl Strategy<Value = ShapeType> {
    prop_oneof![
        Just(ShapeType::Cylinder),
        Just(ShapeType::Cone),
        Just(ShapeType::Sphere),
    ]
}

/// Generate a blueprint with 1..=4 items of 1..=4 parts each. Part ids are
/// unique per item and component types unique per blueprint by construction.
fn arb_blueprint() -> impl Strategy<Value = Blueprint> {
    (
        arb_shape_type(),
        proptest::collection::vec(
            (
                proptest::collection::vec(arb_part_kind(), 1..=4),
                0.5..10.0f64,
                proptest::option::of(0.5..12.0f64),
            ),
            1..=4,
        ),
    )
        .prop_map(|(shape_type, item_specs)| {
            let items = item_specs
                .into_iter()
                .enumerate()
                .map(|(item_idx, (kinds, radius, height))| Item {
                    id: format!("item_{item_idx}"),
                    display_name: format!("Item {item_idx}"),
                    color: None,
                    position: [item_idx as f64 * 5.0, 1.0, 0.0],
                    params: ShapeParams { radius, height },
                    parts: kinds
                        .into_iter()
                        .enumerate()
                        .map(|(part_idx, kind)| Part {
                            id: format!("part_{part_idx}"),
                            kind,
                            accepts: format!("accepts_{item_idx}_{part_idx}"),
                            component_type: format!("component_{item_idx}_{part_idx}"),
                            label: format!("Part {part_idx}"),
                        })
                        .collect(),
                })
                .collect();
            Blueprint {
                challenge_id: "prop_challenge".to_string(),
                challenge_name: "Property Challenge".to_string(),
                shape_type,
                items,
            }
        })
}

/// A blueprint plus a subset of its (item, part) addresses.
fn arb_blueprint_and_fills() -> impl Strategy<Value = (Blueprint, Vec<(usize, String)>)> {
    arb_blueprint().prop_flat_map(|blueprint| {
        let all_slots: Vec<(usize, String)> = blueprint
            .items
            .iter()
            .enumerate()
            .flat_map(|(idx, item)| item.parts.iter().map(move |p| (idx, p.id.clone())))
            .collect();
        let len = all_slots.len();
        proptest::sample::subsequence(all_slots, 0..=len)
            .prop_map(move |fills| (blueprint.clone(), fills))
    })
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    /// Initialization mirrors the blueprint exactly: one entry per item,
    /// exactly the declared part ids, everything unfilled.
    #[test]
    fn init_mirrors_blueprint(blueprint in arb_blueprint()) {
        let state = BuilderState::new(&blueprint);

        prop_assert_eq!(state.item_parts().len(), blueprint.items.len());
        for (parts, item) in state.item_parts().iter().zip(&blueprint.items) {
            prop_assert_eq!(parts.len(), item.parts.len());
            for part in &item.parts {
                let slot = &parts[&part.id];
                prop_assert!(!slot.filled);
                prop_assert_eq!(&slot.accepts, &part.accepts);
            }
        }
    }

    /// Double-filling any slot leaves the state identical to single-filling.
    #[test]
    fn mark_part_filled_idempotent((blueprint, fills) in arb_blueprint_and_fills()) {
        let mut once = BuilderState::new(&blueprint);
        let mut twice = BuilderState::new(&blueprint);

        for (idx, part_id) in &fills {
            once.mark_part_filled(*idx, part_id).unwrap();
            twice.mark_part_filled(*idx, part_id).unwrap();
            twice.mark_part_filled(*idx, part_id).unwrap();
        }
        prop_assert_eq!(once, twice);
    }

    /// Out-of-range indices and undeclared part ids fail without mutating.
    #[test]
    fn invalid_targets_leave_state_unchanged(
        (blueprint, fills) in arb_blueprint_and_fills(),
        bogus_offset in 0usize..4,
    ) {
        let mut state = BuilderState::new(&blueprint);
        for (idx, part_id) in &fills {
            state.mark_part_filled(*idx, part_id).unwrap();
        }
        let snapshot = state.clone();

        let bad_index = blueprint.items.len() + bogus_offset;
        prop_assert!(state.mark_part_filled(bad_index, "part_0").is_err());
        prop_assert!(state.mark_part_filled(0, "no_such_part").is_err());
        prop_assert_eq!(state, snapshot);
    }

    /// `check_completion` reports complete iff every slot is filled, and the
    /// progress counts match the fill subset exactly.
    #[test]
    fn completion_counts_match((blueprint, fills) in arb_blueprint_and_fills()) {
        let mut state = BuilderState::new(&blueprint);
        let mut distinct: std::collections::BTreeSet<(usize, &str)> =
            std::collections::BTreeSet::new();
        for (idx, part_id) in &fills {
            state.mark_part_filled(*idx, part_id).unwrap();
            distinct.insert((*idx, part_id.as_str()));
        }

        let mut store = MemoryStore::new();
        let clock = FixedClock("2026-08-30T00:00:00Z".to_string());
        let report = check_completion(&mut state, &blueprint, &mut store, &clock);

        let total = blueprint.total_parts();
        prop_assert_eq!(report.total, total);
        prop_assert_eq!(report.filled, distinct.len());
        prop_assert_eq!(report.is_complete, distinct.len() == total);
        if !report.is_complete {
            let expected = format!(
                "Progress: {}/{} komponen terpasang. {} komponen tersisa.",
                distinct.len(),
                total,
                total - distinct.len()
            );
            prop_assert_eq!(report.message, expected);
        }
    }

    /// Rescaling never alters any fill flag.
    #[test]
    fn rescale_preserves_progress(
        (blueprint, fills) in arb_blueprint_and_fills(),
        scale in 0.1..8.0f64,
    ) {
        let mut state = BuilderState::new(&blueprint);
        for (idx, part_id) in &fills {
            state.mark_part_filled(*idx, part_id).unwrap();
        }
        let before: Vec<_> = state.item_parts().to_vec();

        state.set_selected_size(scale).unwrap();
        prop_assert_eq!(state.item_parts(), before.as_slice());
        prop_assert_eq!(state.selected_size(), scale);
    }

    /// Analysis covers exactly the fully filled items, in item order.
    #[test]
    fn analysis_breakdown_matches_complete_items((blueprint, fills) in arb_blueprint_and_fills()) {
        let mut state = BuilderState::new(&blueprint);
        for (idx, part_id) in &fills {
            state.mark_part_filled(*idx, part_id).unwrap();
        }

        let complete: Vec<usize> = (0..blueprint.items.len())
            .filter(|&i| state.item_complete(i))
            .collect();

        match analyze_building(&state, &blueprint) {
            solidbuild_core::AnalysisOutcome::NothingBuilt(_) => {
                prop_assert!(complete.is_empty());
            }
            solidbuild_core::AnalysisOutcome::Report(report) => {
                prop_assert_eq!(report.breakdown.len(), complete.len());
                for (entry, &item_idx) in report.breakdown.iter().zip(&complete) {
                    prop_assert_eq!(&entry.display_name, &blueprint.items[item_idx].display_name);
                }
                for (pos, entry) in report.breakdown.iter().enumerate() {
                    prop_assert_eq!(entry.sequence, pos + 1);
                }
            }
        }
    }
}
