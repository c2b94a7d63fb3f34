use serde::Deserialize;
use std::path::Path;

use crate::loader::BlueprintLoadError;
use crate::schema::ShapeType;

/// Top-level manifest listing all available challenges.
#[derive(Debug, Clone, Deserialize)]
pub struct ChallengeManifest {
    pub title: String,
    pub description: String,
    pub challenges: Vec<ChallengeEntry>,
}

/// An entry in the manifest pointing to a challenge directory.
#[derive(Debug, Clone, Deserialize)]
pub struct ChallengeEntry {
    pub id: String,
    pub title: String,
    pub shape_type: ShapeType,
    /// Relative path from the challenges directory to the challenge directory.
    pub path: String,
    #[serde(default)]
    pub summary: Option<String>,
}

/// Load the challenge manifest from a `manifest.ron` file.
pub fn load_manifest(challenges_dir: &Path) -> Result<ChallengeManifest, BlueprintLoadError> {
    let path = challenges_dir.join("manifest.ron");
    let content = std::fs::read_to_string(&path)?;
    ron::from_str(&content).map_err(|e| BlueprintLoadError::Parse {
        file: path,
        detail: e.to_string(),
    })
}
