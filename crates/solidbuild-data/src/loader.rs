//! Blueprint file loading: format detection, deserialization, and the
//! load-time validation the assembly core relies on (unique part ids per
//! item, unique component types per blueprint).

use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::schema::Blueprint;

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading or validating a blueprint.
#[derive(Debug, thiserror::Error)]
pub enum BlueprintLoadError {
    /// A required data file was not found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: String, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// Two parts of one item share an id.
    #[error("duplicate part id '{part_id}' in item '{item_id}'")]
    DuplicatePartId { item_id: String, part_id: String },

    /// Two parts of the blueprint share a spawn-tracking component type.
    #[error("duplicate component type '{component_type}' in blueprint '{challenge_id}'")]
    DuplicateComponentType {
        challenge_id: String,
        component_type: String,
    },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, BlueprintLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(BlueprintLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

/// Scan a directory for a data file with the given base name (without
/// extension). Returns `Ok(None)` if no file is found, or
/// `Err(ConflictingFormats)` if multiple formats exist for the same base name.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, BlueprintLoadError> {
    let extensions = ["ron", "toml", "json"];
    let mut found: Option<PathBuf> = None;

    for ext in &extensions {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(ref existing) = found {
                return Err(BlueprintLoadError::ConflictingFormats {
                    a: existing.clone(),
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

/// Like [`find_data_file`], but returns an error if no file is found.
pub fn require_data_file(dir: &Path, base_name: &str) -> Result<PathBuf, BlueprintLoadError> {
    find_data_file(dir, base_name)?.ok_or_else(|| BlueprintLoadError::MissingRequired {
        file: base_name.to_string(),
        dir: dir.to_path_buf(),
    })
}

/// Read a file and deserialize it according to its format (detected from
/// extension).
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, BlueprintLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| BlueprintLoadError::Parse {
            file: path.to_path_buf(),
            detail: e.to_string(),
        }),
        Format::Json => serde_json::from_str(&content).map_err(|e| BlueprintLoadError::Parse {
            file: path.to_path_buf(),
            detail: e.to_string(),
        }),
        Format::Toml => toml::from_str(&content).map_err(|e| BlueprintLoadError::Parse {
            file: path.to_path_buf(),
            detail: e.to_string(),
        }),
    }
}

// ===========================================================================
// Blueprint loading
// ===========================================================================

/// Load and validate the blueprint from a challenge directory.
///
/// The directory must contain `blueprint.ron` (or `.toml`/`.json`).
pub fn load_blueprint(challenge_dir: &Path) -> Result<Blueprint, BlueprintLoadError> {
    let path = require_data_file(challenge_dir, "blueprint")?;
    let blueprint: Blueprint = deserialize_file(&path)?;
    validate_blueprint(&blueprint)?;
    Ok(blueprint)
}

/// Check the structural invariants the assembly core relies on: part ids are
/// unique within each item, and component types are unique across the whole
/// blueprint.
pub fn validate_blueprint(blueprint: &Blueprint) -> Result<(), BlueprintLoadError> {
    let mut component_types: HashSet<&str> = HashSet::new();

    for item in &blueprint.items {
        let mut part_ids: HashSet<&str> = HashSet::new();
        for part in &item.parts {
            if !part_ids.insert(&part.id) {
                return Err(BlueprintLoadError::DuplicatePartId {
                    item_id: item.id.clone(),
                    part_id: part.id.clone(),
                });
            }
            if !component_types.insert(&part.component_type) {
                return Err(BlueprintLoadError::DuplicateComponentType {
                    challenge_id: blueprint.challenge_id.clone(),
                    component_type: part.component_type.clone(),
                });
            }
        }
    }

    Ok(())
}

// ===========================================================================
// Tests
// ===========================================================================
