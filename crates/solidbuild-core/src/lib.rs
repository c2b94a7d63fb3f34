//! Assembly state machine for the solidbuild geometry game.
//!
//! Players drag 2D components (circles, rectangles, spheres) into hotspot
//! slots of a blueprint-defined 3D construction. This crate owns the
//! authoritative mutable state of one building session and the pure geometry
//! it is evaluated against:
//!
//! - [`state::BuilderState`] -- per-item per-part fill status, spawn
//!   bookkeeping, and the session scale. All mutation goes through its
//!   methods; invalid input returns a tagged [`state::StateError`] and leaves
//!   the state untouched.
//! - [`shape`] -- side-effect-free volume/surface-area formulas and hotspot
//!   placement, shared by zone creation and analysis.
//! - [`completion`] -- the completion check, including the fire-and-forget
//!   persistence of completion records through a
//!   [`solidbuild_store::ProgressStore`].
//! - [`analysis`] -- cross-item aggregate volume/surface-area breakdown over
//!   fully assembled items.
//!
//! Everything here is synchronous and single-threaded: state transitions
//! happen one user action at a time, so the model carries no locking.

pub mod analysis;
pub mod completion;
pub mod shape;
pub mod state;

pub use analysis::{AnalysisOutcome, AnalysisResult, BreakdownEntry, analyze_building};
pub use completion::{CompletionReport, check_completion};
pub use shape::{ShapeMetrics, ZonePlacement, calculate, hotspot_placement};
pub use state::{BuilderState, FillReport, PartSlot, StateError};
