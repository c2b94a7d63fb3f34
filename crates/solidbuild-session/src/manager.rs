use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use solidbuild_core::analysis::{AnalysisOutcome, analyze_building};
use solidbuild_core::completion::{CompletionReport, check_completion};
use solidbuild_core::state::{BuilderState, StateError};
use solidbuild_data::loader::{BlueprintLoadError, load_blueprint};
use solidbuild_data::manifest::{ChallengeEntry, ChallengeManifest, load_manifest};
use solidbuild_data::Blueprint;
use solidbuild_store::{Clock, ProgressStore, StoreError, SystemClock};
use solidbuild_zones::{HotspotZoneManager, SceneSink};

/// Errors from the session layer.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No challenge is currently loaded.
    #[error("no challenge is currently loaded")]
    NoActiveSession,

    /// The requested challenge was not found in the manifest.
    #[error("challenge '{id}' not found in manifest")]
    ChallengeNotFound { id: String },

    /// Loading or validating blueprint data failed.
    #[error(transparent)]
    Load(#[from] BlueprintLoadError),

    /// A state mutation was rejected.
    #[error(transparent)]
    State(#[from] StateError),

    /// The progress store failed outside the degraded completion path.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What a placement attempt did.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementOutcome {
    /// The dropped component's type does not match the slot.
    Mismatch { expected: String },
    /// The slot filled; completion was re-checked immediately.
    Placed {
        newly_filled: bool,
        item_complete: bool,
        completion: CompletionReport,
    },
}

/// One loaded challenge with its live state and zones.
pub struct ActiveSession {
    pub blueprint: Blueprint,
    pub state: BuilderState,
    pub zones: HotspotZoneManager,
}

/// Manages the assembly session: loads the manifest, loads/unloads
/// challenges, routes user actions into the core, and exposes read access
/// for the presentation layer.
pub struct SessionManager {
    challenges_dir: PathBuf,
    manifest: ChallengeManifest,
    store: Box<dyn ProgressStore>,
    clock: Box<dyn Clock>,
    active: Option<ActiveSession>,
}

impl SessionManager {
    /// Create a manager by loading the manifest from `challenges_dir`,
    /// stamping completions with the system clock.
    pub fn new(
        challenges_dir: &Path,
        store: Box<dyn ProgressStore>,
    ) -> Result<Self, SessionError> {
        Self::with_clock(challenges_dir, store, Box::new(SystemClock))
    }

    /// Like [`SessionManager::new`] with an explicit clock (used by tests).
    pub fn with_clock(
        challenges_dir: &Path,
        store: Box<dyn ProgressStore>,
        clock: Box<dyn Clock>,
    ) -> Result<Self, SessionError> {
        let manifest = load_manifest(challenges_dir)?;
        Ok(Self {
            challenges_dir: challenges_dir.to_path_buf(),
            manifest,
            store,
            clock,
            active: None,
        })
    }

    pub fn title(&self) -> &str {
        &self.manifest.title
    }

    pub fn description(&self) -> &str {
        &self.manifest.description
    }

    /// All challenge entries from the manifest.
    pub fn challenges(&self) -> &[ChallengeEntry] {
        &self.manifest.challenges
    }

    /// Load a challenge by its manifest id, tearing down any prior session.
    pub fn load_challenge(
        &mut self,
        challenge_id: &str,
        scene: &mut dyn SceneSink,
    ) -> Result<(), SessionError> {
        let entry = self
            .manifest
            .challenges
            .iter()
            .find(|c| c.id == challenge_id)
            .ok_or_else(|| SessionError::ChallengeNotFound {
                id: challenge_id.to_string(),
            })?;

        let blueprint = load_blueprint(&self.challenges_dir.join(&entry.path))?;
        self.unload(scene);

        let state = BuilderState::new(&blueprint);
        let mut zones = HotspotZoneManager::new();
        zones.rebuild(&blueprint, &state, scene);

        self.active = Some(ActiveSession {
            blueprint,
            state,
            zones,
        });
        Ok(())
    }

    /// Tear down the current session, releasing its zones.
    pub fn unload(&mut self, scene: &mut dyn SceneSink) {
        if let Some(mut session) = self.active.take() {
            session.zones.clear(scene);
        }
    }

    /// Record that a component was spawned. Returns false when the component
    /// was already spawned (the UI must not create a second one).
    pub fn spawn_component(&mut self, component_type: &str) -> Result<bool, SessionError> {
        let session = self.active.as_mut().ok_or(SessionError::NoActiveSession)?;
        Ok(session.state.mark_component_spawned(component_type))
    }

    /// Handle a drop of `component_type` onto the (item, part) slot.
    ///
    /// A type mismatch is a normal outcome, not an error; invalid addresses
    /// surface the core's tagged state errors. On a successful fill the zone
    /// visuals refresh, a completed item's zones hide, and the completion
    /// check (including its persistence side effect) runs immediately.
    pub fn place_component(
        &mut self,
        item_index: usize,
        part_id: &str,
        component_type: &str,
    ) -> Result<PlacementOutcome, SessionError> {
        let session = self.active.as_mut().ok_or(SessionError::NoActiveSession)?;
        let ActiveSession {
            blueprint,
            state,
            zones,
        } = session;

        if let Some(slot) = state
            .item_parts()
            .get(item_index)
            .and_then(|parts| parts.get(part_id))
        {
            if slot.accepts != component_type {
                return Ok(PlacementOutcome::Mismatch {
                    expected: slot.accepts.clone(),
                });
            }
        }

        let fill = state.mark_part_filled(item_index, part_id)?;
        zones.refresh_visuals(state);
        if fill.item_complete {
            zones.hide_zones_for_item(item_index);
        }
        let completion = check_completion(state, blueprint, self.store.as_mut(), self.clock.as_ref());

        Ok(PlacementOutcome::Placed {
            newly_filled: fill.newly_filled,
            item_complete: fill.item_complete,
            completion,
        })
    }

    /// Change the session scale and structurally rebuild the zones.
    pub fn set_scale(&mut self, scale: f64, scene: &mut dyn SceneSink) -> Result<(), SessionError> {
        let session = self.active.as_mut().ok_or(SessionError::NoActiveSession)?;
        session.state.set_selected_size(scale)?;
        session
            .zones
            .rebuild(&session.blueprint, &session.state, scene);
        Ok(())
    }

    /// Full reset: all-unfilled state, forgotten replaced-item history, fresh
    /// zones. The selected scale survives.
    pub fn reset(&mut self, scene: &mut dyn SceneSink) -> Result<(), SessionError> {
        let session = self.active.as_mut().ok_or(SessionError::NoActiveSession)?;
        session.state.reset(&session.blueprint);
        session.zones.clear(scene);
        session
            .zones
            .rebuild(&session.blueprint, &session.state, scene);
        Ok(())
    }

    /// Re-run the completion check on demand (the "periksa" button).
    pub fn check_completion(&mut self) -> Result<CompletionReport, SessionError> {
        let session = self.active.as_mut().ok_or(SessionError::NoActiveSession)?;
        Ok(check_completion(
            &mut session.state,
            &session.blueprint,
            self.store.as_mut(),
            self.clock.as_ref(),
        ))
    }

    /// Run the aggregate analysis and cache the result on the state.
    pub fn analyze(&mut self) -> Result<AnalysisOutcome, SessionError> {
        let session = self.active.as_mut().ok_or(SessionError::NoActiveSession)?;
        let outcome = analyze_building(&session.state, &session.blueprint);
        session
            .state
            .set_analysis(outcome.report().cloned());
        Ok(outcome)
    }

    /// The persisted set of completed challenge ids (for the select screen).
    pub fn completed_challenges(&self) -> Result<BTreeSet<String>, SessionError> {
        Ok(self.store.load_completed()?)
    }

    // --- Read access ---

    pub fn active(&self) -> Option<&ActiveSession> {
        self.active.as_ref()
    }

    pub fn state(&self) -> Result<&BuilderState, SessionError> {
        self.active
            .as_ref()
            .map(|s| &s.state)
            .ok_or(SessionError::NoActiveSession)
    }

    pub fn blueprint(&self) -> Result<&Blueprint, SessionError> {
        self.active
            .as_ref()
            .map(|s| &s.blueprint)
            .ok_or(SessionError::NoActiveSession)
    }

    pub fn zones(&self) -> Result<&HotspotZoneManager, SessionError> {
        self.active
            .as_ref()
            .map(|s| &s.zones)
            .ok_or(SessionError::NoActiveSession)
    }
}
