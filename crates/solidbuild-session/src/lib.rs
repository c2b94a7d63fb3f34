//! Session layer for the solidbuild assembly game.
//!
//! Ties a challenge manifest, one active [`solidbuild_core::BuilderState`],
//! the hotspot zone manager, and durable progress storage together behind the
//! surface a presentation layer consumes: load a challenge, spawn and place
//! components, change the scale, check completion, run analysis, reset.
//!
//! ```rust,ignore
//! use solidbuild_session::SessionManager;
//!
//! let mut mgr = SessionManager::new("challenges/", store)?;
//! mgr.load_challenge("tabung_tunggal", &mut scene)?;
//! mgr.place_component(0, "lingkaran_atas", "circle-top")?;
//! ```

pub mod manager;

pub use manager::{ActiveSession, PlacementOutcome, SessionError, SessionManager};
