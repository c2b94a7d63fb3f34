use serde::{Deserialize, Serialize};

/// The shape family a blueprint teaches. Alters presentation (which formula
/// card the UI shows) but not the assembly logic itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeType {
    Cylinder,
    Cone,
    Sphere,
}

impl ShapeType {
    /// Stable lowercase token, used in persistence records and breakdowns.
    pub fn token(&self) -> &'static str {
        match self {
            ShapeType::Cylinder => "cylinder",
            ShapeType::Cone => "cone",
            ShapeType::Sphere => "sphere",
        }
    }
}

impl std::fmt::Display for ShapeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// The geometric kind of 2D/point component a part slot accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartKind {
    Circle,
    Rectangle,
    Sphere,
}

/// Top-level blueprint definition loaded from `blueprint.ron`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blueprint {
    /// Stable identifier for the exercise; used as the persistence key.
    pub challenge_id: String,
    /// Human-facing challenge name (shown in completion records).
    pub challenge_name: String,
    pub shape_type: ShapeType,
    pub items: Vec<Item>,
}

impl Blueprint {
    /// Total number of part slots across all items.
    pub fn total_parts(&self) -> usize {
        self.items.iter().map(|i| i.parts.len()).sum()
    }
}

/// One logical 3D object within a blueprint (e.g. one cylinder instance).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub display_name: String,
    /// Presentation color token; never read by the core.
    #[serde(default)]
    pub color: Option<String>,
    /// Base position before the session scale is applied.
    pub position: [f64; 3],
    pub params: ShapeParams,
    pub parts: Vec<Part>,
}

/// Numeric dimensions of an item. `height` is absent for sphere-type items.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShapeParams {
    pub radius: f64,
    #[serde(default)]
    pub height: Option<f64>,
}

/// A single required component slot within an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    /// Unique within the owning item.
    pub id: String,
    pub kind: PartKind,
    /// Component-type token that must match for the slot to fill.
    pub accepts: String,
    /// Spawn-tracking key; unique across the whole blueprint.
    pub component_type: String,
    pub label: String,
}
