//! Canned blueprints for tests and benchmarks across the workspace.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use crate::schema::{Blueprint, Item, Part, PartKind, ShapeParams, ShapeType};

pub fn part(id: &str, kind: PartKind, accepts: &str, component_type: &str, label: &str) -> Part {
    Part {
        id: id.to_string(),
        kind,
        accepts: accepts.to_string(),
        component_type: component_type.to_string(),
        label: label.to_string(),
    }
}

/// One cylinder (r=4, h=9) built from two circles and one rectangle.
pub fn cylinder_blueprint() -> Blueprint {
    Blueprint {
        challenge_id: "tabung_tunggal".to_string(),
        challenge_name: "Menara Tabung".to_string(),
        shape_type: ShapeType::Cylinder,
        items: vec![Item {
            id: "tabung_1".to_string(),
            display_name: "Tabung".to_string(),
            color: Some("#4fc3f7".to_string()),
            position: [0.0, 1.0, 0.0],
            params: ShapeParams {
                radius: 4.0,
                height: Some(9.0),
            },
            parts: vec![
                part(
                    "lingkaran_atas",
                    PartKind::Circle,
                    "circle-top",
                    "tabung-circle-top",
                    "Lingkaran atas",
                ),
                part(
                    "lingkaran_bawah",
                    PartKind::Circle,
                    "circle-bottom",
                    "tabung-circle-bottom",
                    "Lingkaran bawah",
                ),
                part(
                    "selimut",
                    PartKind::Rectangle,
                    "rectangle-body",
                    "tabung-rectangle-body",
                    "Selimut tabung",
                ),
            ],
        }],
    }
}

/// One cone (r=4, h=9) built from a base circle and a lateral sheet.
pub fn cone_blueprint() -> Blueprint {
    Blueprint {
        challenge_id: "kerucut_tunggal".to_string(),
        challenge_name: "Kerucut".to_string(),
        shape_type: ShapeType::Cone,
        items: vec![Item {
            id: "kerucut_1".to_string(),
            display_name: "Kerucut".to_string(),
            color: Some("#ffb74d".to_string()),
            position: [0.0, 0.5, 0.0],
            params: ShapeParams {
                radius: 4.0,
                height: Some(9.0),
            },
            parts: vec![
                part(
                    "alas",
                    PartKind::Circle,
                    "circle-bottom",
                    "kerucut-circle-base",
                    "Lingkaran alas",
                ),
                part(
                    "selimut",
                    PartKind::Rectangle,
                    "sector-body",
                    "kerucut-sector-body",
                    "Selimut kerucut",
                ),
            ],
        }],
    }
}

/// One sphere (r=3) built from a single sphere component; no height param.
pub fn sphere_blueprint() -> Blueprint {
    Blueprint {
        challenge_id: "bola_tunggal".to_string(),
        challenge_name: "Bola".to_string(),
        shape_type: ShapeType::Sphere,
        items: vec![Item {
            id: "bola_1".to_string(),
            display_name: "Bola".to_string(),
            color: Some("#e57373".to_string()),
            position: [0.0, 3.0, 0.0],
            params: ShapeParams {
                radius: 3.0,
                height: None,
            },
            parts: vec![part(
                "permukaan",
                PartKind::Sphere,
                "sphere-surface",
                "bola-sphere-surface",
                "Permukaan bola",
            )],
        }],
    }
}

/// Two cylinders of different sizes, for aggregation and multi-item tests.
pub fn twin_cylinder_blueprint() -> Blueprint {
    let mut blueprint = cylinder_blueprint();
    blueprint.challenge_id = "tabung_kembar".to_string();
    blueprint.challenge_name = "Tabung Kembar".to_string();

    let mut second = blueprint.items[0].clone();
    second.id = "tabung_2".to_string();
    second.display_name = "Tabung Kecil".to_string();
    second.position = [10.0, 1.0, 0.0];
    second.params = ShapeParams {
        radius: 2.0,
        height: Some(5.0),
    };
    for p in &mut second.parts {
        p.component_type = format!("kecil-{}", p.component_type);
    }
    blueprint.items.push(second);
    blueprint
}
