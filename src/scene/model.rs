use std::path::Path;

use crate::assets::color::parse_hex_or;
use crate::foundation::core::{Mat4, Quat, Rect, Rgba8, Vec3};
use crate::foundation::error::{CardError, CardResult};
use crate::scene::resources::{MaterialDesc, MaterialSlot, ResourceTracker, Shading};

/// Visible height of the card in scene units after loading.
pub const CARD_VISUAL_HEIGHT: f32 = 2.5;

/// Named meshes of the card model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum MeshName {
    /// Front face carrying the background texture.
    CardBase,
    /// Back face.
    CardBack,
    /// Name text plane.
    CardName,
    /// Centered logo plane.
    LogoCenter,
    /// Top-right logo plane.
    LogoTopRight,
    /// Right-edge logo plane.
    LogoRight,
    /// Chip contacts.
    Chip,
    /// Chip carrier.
    ChipBase,
    /// Payment network logo.
    LogoMastercard,
}

impl MeshName {
    /// Every mesh the registry knows about.
    pub const ALL: [MeshName; 9] = [
        MeshName::CardBase,
        MeshName::CardBack,
        MeshName::CardName,
        MeshName::LogoCenter,
        MeshName::LogoTopRight,
        MeshName::LogoRight,
        MeshName::Chip,
        MeshName::ChipBase,
        MeshName::LogoMastercard,
    ];

    /// Name as it appears in model files.
    pub fn as_str(self) -> &'static str {
        match self {
            MeshName::CardBase => "CardBase",
            MeshName::CardBack => "CardBack",
            MeshName::CardName => "CardName",
            MeshName::LogoCenter => "LogoCenter",
            MeshName::LogoTopRight => "LogoTopRight",
            MeshName::LogoRight => "LogoRight",
            MeshName::Chip => "Chip",
            MeshName::ChipBase => "ChipBase",
            MeshName::LogoMastercard => "LogoMastercard",
        }
    }
}

impl std::fmt::Display for MeshName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side of the card a planar mesh faces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Facing {
    /// Normal along +Z.
    #[default]
    Front,
    /// Normal along -Z.
    Back,
}

/// One planar mesh in a model manifest, in model units.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MeshDef {
    /// Registry name.
    pub name: MeshName,
    /// Center `[x, y]`.
    pub center: [f32; 2],
    /// Extent `[width, height]`.
    pub size: [f32; 2],
    /// Depth of the plane.
    pub z: f32,
    /// Facing side.
    #[serde(default)]
    pub facing: Facing,
    /// Base color as hex, white when absent.
    #[serde(default)]
    pub color: Option<String>,
    /// Draw order among coplanar meshes.
    #[serde(default)]
    pub render_order: i32,
    /// Hidden meshes are kept in the registry but never drawn.
    #[serde(default = "default_true")]
    pub visible: bool,
}

fn default_true() -> bool {
    true
}

/// Mesh layout of a card model.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModelManifest {
    /// Meshes in file order.
    pub meshes: Vec<MeshDef>,
}

impl ModelManifest {
    /// Built-in ID-1 card (85.6 x 53.98 x 0.76 mm).
    pub fn builtin() -> Self {
        let front = 0.38;
        let def = |name, center: [f32; 2], size: [f32; 2], z: f32, order: i32| MeshDef {
            name,
            center,
            size,
            z,
            facing: Facing::Front,
            color: None,
            render_order: order,
            visible: true,
        };
        Self {
            meshes: vec![
                MeshDef {
                    color: Some("#FFFFFF".to_string()),
                    ..def(MeshName::CardBase, [0.0, 0.0], [85.6, 53.98], front, 0)
                },
                MeshDef {
                    facing: Facing::Back,
                    color: Some("#1A1A2E".to_string()),
                    ..def(MeshName::CardBack, [0.0, 0.0], [85.6, 53.98], -front, 0)
                },
                MeshDef {
                    color: Some("#1A1A1A".to_string()),
                    ..def(MeshName::ChipBase, [-28.0, 6.0], [12.0, 10.0], front + 0.001, 1)
                },
                MeshDef {
                    color: Some("#D4AF37".to_string()),
                    ..def(MeshName::Chip, [-28.0, 6.0], [11.0, 9.0], front + 0.002, 2)
                },
                def(MeshName::LogoCenter, [0.0, 0.0], [20.0, 20.0], front + 0.003, 3),
                def(MeshName::LogoTopRight, [32.0, 17.0], [12.0, 12.0], front + 0.003, 3),
                def(MeshName::LogoRight, [30.0, 0.0], [16.0, 16.0], front + 0.003, 3),
                MeshDef {
                    visible: false,
                    ..def(MeshName::LogoMastercard, [32.0, -18.0], [14.0, 9.0], front + 0.003, 3)
                },
                def(MeshName::CardName, [-22.0, -17.0], [30.0, 30.0], front + 0.004, 4),
            ],
        }
    }

    /// Parse a JSON manifest.
    pub fn from_json(text: &str) -> CardResult<Self> {
        let manifest: Self =
            serde_json::from_str(text).map_err(|e| CardError::serde(e.to_string()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Read and parse a JSON manifest file.
    pub fn from_path(path: &Path) -> CardResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CardError::asset(format!("failed to read model '{}': {e}", path.display()))
        })?;
        Self::from_json(&text)
    }

    /// Check that the manifest describes a usable card.
    pub fn validate(&self) -> CardResult<()> {
        let mut seen = std::collections::HashSet::new();
        for def in &self.meshes {
            if !seen.insert(def.name) {
                return Err(CardError::validation(format!(
                    "mesh '{}' is defined twice",
                    def.name
                )));
            }
            let [w, h] = def.size;
            if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
                return Err(CardError::validation(format!(
                    "mesh '{}' must have a positive size",
                    def.name
                )));
            }
            if !(def.center.iter().all(|v| v.is_finite()) && def.z.is_finite()) {
                return Err(CardError::validation(format!(
                    "mesh '{}' has a non-finite position",
                    def.name
                )));
            }
        }
        if !seen.contains(&MeshName::CardBase) {
            return Err(CardError::validation("model has no CardBase mesh"));
        }
        Ok(())
    }
}

/// Planar mesh with its owned material.
#[derive(Debug)]
pub struct Mesh {
    name: MeshName,
    rect: Rect,
    z: f32,
    facing: Facing,
    /// Whether the mesh is drawn at all.
    pub visible: bool,
    /// Draw order among coplanar meshes.
    pub render_order: i32,
    /// Local translation on top of the manifest placement.
    pub offset: Vec3,
    material: MaterialSlot,
}

impl Mesh {
    /// Registry name.
    pub fn name(&self) -> MeshName {
        self.name
    }

    /// Extent in model units (y up).
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Facing side.
    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Owned material slot.
    pub fn material(&self) -> &MaterialSlot {
        &self.material
    }

    /// Mutable material slot.
    pub fn material_mut(&mut self) -> &mut MaterialSlot {
        &mut self.material
    }

    /// Model-space corners in texture order: top-left, top-right, bottom-left, bottom-right.
    ///
    /// Back-facing planes are mirrored so their texture reads correctly from behind.
    pub fn corners(&self) -> [Vec3; 4] {
        let (x0, x1) = (self.rect.x0 as f32, self.rect.x1 as f32);
        let (y0, y1) = (self.rect.y0 as f32, self.rect.y1 as f32);
        let (left, right) = match self.facing {
            Facing::Front => (x0, x1),
            Facing::Back => (x1, x0),
        };
        let z = self.z;
        [
            Vec3::new(left, y1, z) + self.offset,
            Vec3::new(right, y1, z) + self.offset,
            Vec3::new(left, y0, z) + self.offset,
            Vec3::new(right, y0, z) + self.offset,
        ]
    }

    /// Model-space normal.
    pub fn normal(&self) -> Vec3 {
        match self.facing {
            Facing::Front => Vec3::Z,
            Facing::Back => Vec3::NEG_Z,
        }
    }
}

/// Loaded card model: mesh registry plus the model transform.
#[derive(Debug)]
pub struct CardModel {
    meshes: Vec<Mesh>,
    center: Vec3,
    scale: f32,
    scaled_size: Vec3,
    /// Translation in scene units.
    pub position: Vec3,
    /// Euler rotation (XYZ order) in radians.
    pub rotation: Vec3,
    /// Opacity multiplier applied to every material.
    pub opacity: f32,
    /// Whether the model is drawn.
    pub visible: bool,
}

impl CardModel {
    /// Build the mesh registry, centered at the origin and scaled to
    /// [`CARD_VISUAL_HEIGHT`].
    pub fn from_manifest(manifest: &ModelManifest, tracker: &ResourceTracker) -> CardResult<Self> {
        manifest.validate()?;

        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for def in &manifest.meshes {
            let half = [def.size[0] / 2.0, def.size[1] / 2.0];
            min = min.min(Vec3::new(
                def.center[0] - half[0],
                def.center[1] - half[1],
                def.z,
            ));
            max = max.max(Vec3::new(
                def.center[0] + half[0],
                def.center[1] + half[1],
                def.z,
            ));
        }
        let size = max - min;
        if size.y <= 0.0 {
            return Err(CardError::validation("model has zero height"));
        }
        let scale = CARD_VISUAL_HEIGHT / size.y;

        let meshes = manifest
            .meshes
            .iter()
            .map(|def| {
                let half = [f64::from(def.size[0]) / 2.0, f64::from(def.size[1]) / 2.0];
                let cx = f64::from(def.center[0]);
                let cy = f64::from(def.center[1]);
                Mesh {
                    name: def.name,
                    rect: Rect::new(cx - half[0], cy - half[1], cx + half[0], cy + half[1]),
                    z: def.z,
                    facing: def.facing,
                    visible: def.visible,
                    render_order: def.render_order,
                    offset: Vec3::ZERO,
                    material: MaterialSlot::new(tracker.material(initial_material(def))),
                }
            })
            .collect();

        Ok(Self {
            meshes,
            center: (min + max) / 2.0,
            scale,
            scaled_size: size * scale,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            opacity: 1.0,
            visible: true,
        })
    }

    /// Mesh by name.
    pub fn mesh(&self, name: MeshName) -> Option<&Mesh> {
        self.meshes.iter().find(|m| m.name == name)
    }

    /// Mutable mesh by name.
    pub fn mesh_mut(&mut self, name: MeshName) -> Option<&mut Mesh> {
        self.meshes.iter_mut().find(|m| m.name == name)
    }

    /// All meshes in manifest order.
    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    /// Uniform scale applied on load.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Bounding box size after scaling, in scene units.
    pub fn scaled_size(&self) -> Vec3 {
        self.scaled_size
    }

    /// Rotation as a quaternion.
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(
            glam::EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// Model-to-scene transform.
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            self.orientation(),
            self.position,
        ) * Mat4::from_translation(-self.center)
    }
}

fn initial_material(def: &MeshDef) -> MaterialDesc {
    let color = def
        .color
        .as_deref()
        .map(|hex| parse_hex_or(hex, Rgba8::WHITE))
        .unwrap_or(Rgba8::WHITE);
    match def.name {
        MeshName::CardName => MaterialDesc {
            alpha_test: 0.1,
            ..MaterialDesc::hidden()
        },
        MeshName::ChipBase => MaterialDesc {
            shading: Shading::Lit,
            color,
            roughness: 0.4,
            metalness: 1.0,
            transparent: false,
            ..MaterialDesc::default()
        },
        _ => MaterialDesc {
            color,
            ..MaterialDesc::default()
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
