//! Hotspot zone derivation and lifecycle for the solidbuild assembly game.
//!
//! A [`HotspotZone`] is the ephemeral placement target shown for one
//! (item, part) pair still awaiting its 2D component. The
//! [`HotspotZoneManager`] derives zones from Blueprint x BuilderState, pushes
//! them to the rendering collaborator through [`SceneSink`], and keeps their
//! visual fill indicator in sync without structural rebuilds:
//!
//! - [`HotspotZoneManager::rebuild`] is structural: dispose everything, then
//!   recreate. It runs only when the blueprint, geometry contract, or session
//!   scale changes.
//! - [`HotspotZoneManager::refresh_visuals`] is cosmetic: it runs on every
//!   fill-state change and touches only zone opacity.
//!
//! Per item the manager walks a one-way state machine: Incomplete -> (all
//! parts filled) Complete -> (next rebuild) Replaced. A replaced item is
//! excluded from zone creation forever, even across scale changes.

use std::collections::BTreeSet;

use slotmap::{SlotMap, new_key_type};

use solidbuild_core::shape::{ZonePlacement, hotspot_placement};
use solidbuild_core::state::BuilderState;
use solidbuild_data::Blueprint;

new_key_type! {
    /// Handle to a zone held by the manager and echoed to the scene sink.
    pub struct ZoneId;
}

/// Opacity of the fill indicator while the slot is empty.
pub const UNFILLED_OPACITY: f64 = 0.7;

/// Opacity of the fill indicator once the slot is filled.
pub const FILLED_OPACITY: f64 = 0.3;

/// Visual state of a zone. Never consulted for logical fill decisions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneVisual {
    pub opacity: f64,
    pub visible: bool,
}

/// A placement target for one unfilled (item, part) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct HotspotZone {
    pub item_index: usize,
    pub part_id: String,
    /// Component-type token a drop must carry to be accepted here.
    pub accepted_component: String,
    pub placement: ZonePlacement,
    pub visual: ZoneVisual,
}

/// Rendering collaborator. The manager owns the descriptor lifecycle; the
/// scene owns everything visual behind it.
pub trait SceneSink {
    fn add_zone(&mut self, id: ZoneId, zone: &HotspotZone);
    fn remove_zone(&mut self, id: ZoneId);
}

/// Derives zones from Blueprint x BuilderState and keeps their visuals in
/// sync with fill state.
#[derive(Debug, Default)]
pub struct HotspotZoneManager {
    zones: SlotMap<ZoneId, HotspotZone>,
    /// Item indices whose zones were consumed; one-way, never cleared except
    /// by [`HotspotZoneManager::clear`].
    replaced_items: BTreeSet<usize>,
}

impl HotspotZoneManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Structural rebuild: dispose every zone, promote fully filled items to
    /// the replaced set, then create one zone per part of every remaining
    /// item at the current scale.
    ///
    /// Triggered only by blueprint / geometry / scale changes. Fill-state
    /// changes go through [`refresh_visuals`](Self::refresh_visuals) instead.
    pub fn rebuild(&mut self, blueprint: &Blueprint, state: &BuilderState, scene: &mut dyn SceneSink) {
        self.dispose_all(scene);

        // Complete -> Replaced transition happens here, not at fill time.
        for index in 0..blueprint.items.len() {
            if state.item_complete(index) {
                self.replaced_items.insert(index);
            }
        }

        let scale = state.selected_size();
        for (index, item) in blueprint.items.iter().enumerate() {
            if self.replaced_items.contains(&index) {
                continue;
            }
            let scaled_base = [
                item.position[0] * scale,
                item.position[1] * scale,
                item.position[2] * scale,
            ];
            let radius = item.params.radius;
            let height = item.params.height.unwrap_or(0.0);

            for part in &item.parts {
                let filled = state.part_filled(index, &part.id).unwrap_or(false);
                let zone = HotspotZone {
                    item_index: index,
                    part_id: part.id.clone(),
                    accepted_component: part.accepts.clone(),
                    placement: hotspot_placement(
                        part.kind, &part.id, scaled_base, radius, height, scale,
                    ),
                    visual: ZoneVisual {
                        opacity: if filled { FILLED_OPACITY } else { UNFILLED_OPACITY },
                        visible: true,
                    },
                };
                let id = self.zones.insert(zone);
                scene.add_zone(id, &self.zones[id]);
            }
        }
    }

    /// Dispose of every zone. Safe to call when already empty (double
    /// disposal is treated as already-clean).
    pub fn dispose_all(&mut self, scene: &mut dyn SceneSink) {
        let ids: Vec<ZoneId> = self.zones.keys().collect();
        for id in ids {
            self.zones.remove(id);
            scene.remove_zone(id);
        }
    }

    /// Cosmetic pass: update only the fill-indicator opacity of every zone
    /// from the owning slot's fill flag. Zones whose owning item/part no
    /// longer exists in the state are skipped without error.
    pub fn refresh_visuals(&mut self, state: &BuilderState) {
        for zone in self.zones.values_mut() {
            let Some(filled) = state.part_filled(zone.item_index, &zone.part_id) else {
                continue;
            };
            zone.visual.opacity = if filled { FILLED_OPACITY } else { UNFILLED_OPACITY };
        }
    }

    /// Mark every zone of one item invisible without destroying it. Used when
    /// an item transitions to fully filled; the zones stay inert until the
    /// next rebuild omits the item entirely.
    pub fn hide_zones_for_item(&mut self, item_index: usize) {
        for zone in self.zones.values_mut() {
            if zone.item_index == item_index {
                zone.visual.visible = false;
            }
        }
    }

    /// Forget all zones and replaced-item history (session teardown/reset).
    pub fn clear(&mut self, scene: &mut dyn SceneSink) {
        self.dispose_all(scene);
        self.replaced_items.clear();
    }

    // --- Read access ---

    pub fn zone(&self, id: ZoneId) -> Option<&HotspotZone> {
        self.zones.get(id)
    }

    pub fn zones(&self) -> impl Iterator<Item = (ZoneId, &HotspotZone)> {
        self.zones.iter()
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    pub fn replaced_items(&self) -> &BTreeSet<usize> {
        &self.replaced_items
    }

    /// The zone accepting drops for an (item, part) address, if one exists.
    pub fn find_zone(&self, item_index: usize, part_id: &str) -> Option<(ZoneId, &HotspotZone)> {
        self.zones
            .iter()
            .find(|(_, z)| z.item_index == item_index && z.part_id == part_id)
    }
}

// ===========================================================================
// Test scene sink
// ===========================================================================

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils {
    //! Recording scene sink for tests and benchmarks.

    use super::{HotspotZone, SceneSink, ZoneId};

    /// Records add/remove calls so tests can assert on the descriptor
    /// lifecycle the manager drives.
    #[derive(Debug, Default)]
    pub struct RecordingScene {
        pub added: Vec<(ZoneId, HotspotZone)>,
        pub removed: Vec<ZoneId>,
    }

    impl RecordingScene {
        pub fn new() -> Self {
            Self::default()
        }

        /// Zones currently attached (added minus removed).
        pub fn live_count(&self) -> usize {
            self.added.len() - self.removed.len()
        }
    }

    impl SceneSink for RecordingScene {
        fn add_zone(&mut self, id: ZoneId, zone: &HotspotZone) {
            self.added.push((id, zone.clone()));
        }

        fn remove_zone(&mut self, id: ZoneId) {
            self.removed.push(id);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
