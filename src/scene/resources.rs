use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crate::assets::decode::PreparedImage;
use crate::foundation::core::Rgba8;

#[derive(Debug, Default)]
struct Counters {
    next_id: AtomicU64,
    live_textures: AtomicUsize,
    live_materials: AtomicUsize,
    released_textures: AtomicUsize,
    released_materials: AtomicUsize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ResourceKind {
    Texture,
    Material,
}

/// Shared accounting for textures and materials.
///
/// Every resource created through the tracker holds a guard; dropping the last handle releases
/// the resource and bumps the matching release counter.
#[derive(Clone, Debug, Default)]
pub struct ResourceTracker {
    counters: Arc<Counters>,
}

impl ResourceTracker {
    /// Fresh tracker with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    fn acquire(&self, kind: ResourceKind) -> ReleaseGuard {
        let live = match kind {
            ResourceKind::Texture => &self.counters.live_textures,
            ResourceKind::Material => &self.counters.live_materials,
        };
        live.fetch_add(1, Ordering::Relaxed);
        ReleaseGuard {
            counters: Arc::clone(&self.counters),
            kind,
        }
    }

    /// Upload `image` as a texture.
    pub fn texture(&self, label: impl Into<String>, image: PreparedImage) -> Arc<Texture> {
        let id = self.counters.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        Arc::new(Texture {
            id,
            label: label.into(),
            image,
            _guard: self.acquire(ResourceKind::Texture),
        })
    }

    /// Create a material from its description.
    pub fn material(&self, desc: MaterialDesc) -> Material {
        Material {
            desc,
            _guard: self.acquire(ResourceKind::Material),
        }
    }

    /// Zero-opacity material used to hide a mesh.
    pub fn hidden_material(&self) -> Material {
        self.material(MaterialDesc::hidden())
    }

    /// Textures currently alive.
    pub fn live_textures(&self) -> usize {
        self.counters.live_textures.load(Ordering::Relaxed)
    }

    /// Materials currently alive.
    pub fn live_materials(&self) -> usize {
        self.counters.live_materials.load(Ordering::Relaxed)
    }

    /// Textures released so far.
    pub fn released_textures(&self) -> usize {
        self.counters.released_textures.load(Ordering::Relaxed)
    }

    /// Materials released so far.
    pub fn released_materials(&self) -> usize {
        self.counters.released_materials.load(Ordering::Relaxed)
    }
}

#[derive(Debug)]
struct ReleaseGuard {
    counters: Arc<Counters>,
    kind: ResourceKind,
}

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        let (live, released) = match self.kind {
            ResourceKind::Texture => (
                &self.counters.live_textures,
                &self.counters.released_textures,
            ),
            ResourceKind::Material => (
                &self.counters.live_materials,
                &self.counters.released_materials,
            ),
        };
        live.fetch_sub(1, Ordering::Relaxed);
        released.fetch_add(1, Ordering::Relaxed);
    }
}

/// Image uploaded for sampling by a material.
#[derive(Debug)]
pub struct Texture {
    id: u64,
    label: String,
    image: PreparedImage,
    _guard: ReleaseGuard,
}

impl Texture {
    /// Tracker-unique id, stable for the texture's lifetime.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Debug label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Pixel data.
    pub fn image(&self) -> &PreparedImage {
        &self.image
    }
}

/// Lighting model of a material.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Shading {
    /// Shaded by the scene lights.
    #[default]
    Lit,
    /// Flat color, ignores lights.
    Unlit,
}

/// Plain description of a material, without resource accounting.
#[derive(Clone, Debug)]
pub struct MaterialDesc {
    /// Lighting model.
    pub shading: Shading,
    /// Base color, multiplied with the map.
    pub color: Rgba8,
    /// Overall opacity in `[0, 1]`.
    pub opacity: f32,
    /// Whether alpha blending is enabled.
    pub transparent: bool,
    /// Color map.
    pub map: Option<Arc<Texture>>,
    /// Bump map.
    pub bump_map: Option<Arc<Texture>>,
    /// Bump strength; negative values press the relief inwards.
    pub bump_scale: f32,
    /// Texels with alpha below this threshold are discarded.
    pub alpha_test: f32,
    /// Surface roughness in `[0, 1]`.
    pub roughness: f32,
    /// Metalness in `[0, 1]`.
    pub metalness: f32,
}

impl Default for MaterialDesc {
    fn default() -> Self {
        Self {
            shading: Shading::Lit,
            color: Rgba8::WHITE,
            opacity: 1.0,
            transparent: true,
            map: None,
            bump_map: None,
            bump_scale: 0.0,
            alpha_test: 0.0,
            roughness: 0.5,
            metalness: 0.3,
        }
    }
}

impl MaterialDesc {
    /// Transparent, zero-opacity description.
    pub fn hidden() -> Self {
        Self {
            shading: Shading::Unlit,
            opacity: 0.0,
            transparent: true,
            ..Self::default()
        }
    }

    /// True when nothing of a mesh using it would be drawn.
    pub fn is_invisible(&self) -> bool {
        self.opacity <= 0.0
    }
}

/// Tracked material; dropping it releases it.
#[derive(Debug)]
pub struct Material {
    desc: MaterialDesc,
    _guard: ReleaseGuard,
}

impl Material {
    /// Material parameters.
    pub fn desc(&self) -> &MaterialDesc {
        &self.desc
    }

    /// Mutable material parameters.
    pub fn desc_mut(&mut self) -> &mut MaterialDesc {
        &mut self.desc
    }
}

/// The single material owned by a mesh.
#[derive(Debug)]
pub struct MaterialSlot {
    material: Material,
}

impl MaterialSlot {
    /// Slot holding `material`.
    pub fn new(material: Material) -> Self {
        Self { material }
    }

    /// Current material.
    pub fn get(&self) -> &Material {
        &self.material
    }

    /// Mutable access for in-place parameter edits.
    pub fn get_mut(&mut self) -> &mut Material {
        &mut self.material
    }

    /// Install `material`, releasing the previous one and any texture only it referenced.
    pub fn replace(&mut self, material: Material) {
        let old = std::mem::replace(&mut self.material, material);
        drop(old);
    }

    /// Swap only the color map, releasing the previous map.
    pub fn replace_map(&mut self, map: Option<Arc<Texture>>) {
        let desc = self.material.desc_mut();
        drop(desc.map.take());
        desc.map = map;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/resources.rs"]
mod tests;
