//! Blueprint data definitions and loading for the solidbuild assembly game.
//!
//! A [`Blueprint`] is the static description of a target construction: the
//! shape family being taught, the logical 3D items to assemble, and the 2D
//! component slots (parts) each item requires. Blueprints and the challenge
//! manifest are authored as RON files (TOML and JSON are also accepted) and
//! loaded through the format-detecting helpers in [`loader`].
//!
//! This crate holds data and load-time validation only; the mutable assembly
//! state machine lives in `solidbuild-core`.

pub mod loader;
pub mod manifest;
pub mod schema;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use loader::{BlueprintLoadError, load_blueprint, validate_blueprint};
pub use manifest::{ChallengeEntry, ChallengeManifest, load_manifest};
pub use schema::{Blueprint, Item, Part, PartKind, ShapeParams, ShapeType};
