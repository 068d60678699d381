use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use glam::Vec3;

use crate::foundation::core::{Affine, Point, Rect, Rgba8};
use crate::foundation::error::CardResult;
use crate::render::backend::{FrameRGBA, RenderBackend, RenderSettings, SceneView};
use crate::render::raster::{Raster, pixmap_from_premul};
use crate::scene::model::{CardModel, Mesh};
use crate::scene::resources::{MaterialDesc, Shading, Texture};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct PaintKey {
    texture: u64,
    tint: [u8; 3],
    alpha_cut: u8,
}

#[derive(Clone)]
struct ImagePaint {
    paint: vello_cpu::Image,
    w: u32,
    h: u32,
}

/// One mesh face ready to draw, in screen space.
#[derive(Debug)]
struct Face<'a> {
    mesh: &'a Mesh,
    /// Top-left, top-right, bottom-left, bottom-right.
    screen: [Point; 4],
    depth: f32,
    light: [f32; 3],
}

/// CPU scene renderer powered by `vello_cpu`.
///
/// Planar meshes are projected through the camera and drawn back to front as affine-mapped
/// images or flat quads. Material color and lighting are folded into the texture pixels, so each
/// distinct (texture, tint) pair is cached until a frame no longer uses it.
pub struct CpuRenderer {
    settings: RenderSettings,
    paint_cache: HashMap<PaintKey, ImagePaint>,
}

impl std::fmt::Debug for CpuRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuRenderer")
            .field("settings", &self.settings)
            .field("cached_paints", &self.paint_cache.len())
            .finish()
    }
}

impl CpuRenderer {
    /// Renderer using `settings`.
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            paint_cache: HashMap::new(),
        }
    }

    /// Number of tinted texture paints kept between frames.
    pub fn cached_paints(&self) -> usize {
        self.paint_cache.len()
    }

    fn paint_for(&mut self, texture: &Texture, key: PaintKey) -> CardResult<ImagePaint> {
        if let Some(p) = self.paint_cache.get(&key) {
            return Ok(p.clone());
        }
        let image = texture.image();
        let pixels = tint_premul(&image.rgba8_premul, key.tint, key.alpha_cut);
        let pixmap = pixmap_from_premul(&pixels, image.width, image.height)?;
        let out = ImagePaint {
            paint: vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                sampler: vello_cpu::peniko::ImageSampler::default(),
            },
            w: image.width,
            h: image.height,
        };
        self.paint_cache.insert(key, out.clone());
        Ok(out)
    }

    fn draw_face(
        &mut self,
        raster: &mut Raster,
        face: &Face<'_>,
        model_opacity: f32,
        used: &mut HashSet<PaintKey>,
    ) -> CardResult<()> {
        let desc = face.mesh.material().get().desc();
        let opacity = (desc.opacity * model_opacity).clamp(0.0, 1.0);
        if opacity <= 0.0 {
            return Ok(());
        }
        let tint = tint_for(desc, face.light);

        let Some(map) = desc.map.as_ref() else {
            let [tl, tr, bl, br] = face.screen;
            let color = Rgba8 {
                r: tint[0],
                g: tint[1],
                b: tint[2],
                a: (opacity * 255.0).round() as u8,
            };
            raster.fill_polygon(&[tl, tr, br, bl], color);
            return Ok(());
        };

        let key = PaintKey {
            texture: map.id(),
            tint,
            alpha_cut: (desc.alpha_test.clamp(0.0, 1.0) * 255.0).round() as u8,
        };
        let paint = self.paint_for(map, key)?;
        used.insert(key);
        let Some(transform) = quad_affine(face.screen, paint.w, paint.h) else {
            return Ok(());
        };
        raster.draw_image_with_opacity(&paint.paint, (paint.w, paint.h), transform, opacity);
        Ok(())
    }
}

impl RenderBackend for CpuRenderer {
    fn render_scene(&mut self, view: &SceneView<'_>) -> CardResult<FrameRGBA> {
        let mut raster = Raster::new(view.canvas.width, view.canvas.height)?;
        if let Some(clear) = self.settings.clear {
            raster.fill_rect(
                Rect::new(
                    0.0,
                    0.0,
                    f64::from(view.canvas.width),
                    f64::from(view.canvas.height),
                ),
                clear,
            );
        }

        let mut used = HashSet::new();
        if let Some(model) = view.model.filter(|m| m.visible && m.opacity > 0.0) {
            for face in visible_faces(view, model) {
                self.draw_face(&mut raster, &face, model.opacity, &mut used)?;
            }
        }
        self.paint_cache.retain(|k, _| used.contains(k));

        let image = raster.finish()?;
        Ok(FrameRGBA::from_image(&image))
    }
}

/// Project, cull and order the drawable meshes of `model`.
fn visible_faces<'a>(view: &SceneView<'_>, model: &'a CardModel) -> Vec<Face<'a>> {
    let world = model.world_matrix();
    let orientation = model.orientation();
    let mut faces = Vec::new();

    'meshes: for mesh in model.meshes() {
        let desc = mesh.material().get().desc();
        if !mesh.visible || desc.is_invisible() {
            continue;
        }
        let corners = mesh.corners().map(|c| world.transform_point3(c));
        let center = corners.iter().copied().sum::<Vec3>() / 4.0;
        let normal = (orientation * mesh.normal()).normalize();
        if normal.dot(view.camera.position - center) <= 0.0 {
            continue;
        }

        let mut screen = [Point::ZERO; 4];
        let mut depth = 0.0;
        for (slot, corner) in screen.iter_mut().zip(corners) {
            let Some(p) = view.camera.project(corner, view.canvas) else {
                continue 'meshes;
            };
            *slot = p.point;
            depth += p.depth / 4.0;
        }

        let light = match desc.shading {
            Shading::Lit => view.lights.shade(normal, center),
            Shading::Unlit => [1.0; 3],
        };
        faces.push(Face {
            mesh,
            screen,
            depth,
            light,
        });
    }

    // painter's order: render order first, then far to near
    faces.sort_by(|a, b| {
        a.mesh
            .render_order
            .cmp(&b.mesh.render_order)
            .then(b.depth.total_cmp(&a.depth))
    });
    faces
}

fn tint_for(desc: &MaterialDesc, light: [f32; 3]) -> [u8; 3] {
    let c = [desc.color.r, desc.color.g, desc.color.b];
    [0, 1, 2].map(|i| (f32::from(c[i]) * light[i]).round().clamp(0.0, 255.0) as u8)
}

/// Multiply premultiplied pixels by `tint` and drop pixels whose alpha is below `alpha_cut`.
pub(crate) fn tint_premul(src: &[u8], tint: [u8; 3], alpha_cut: u8) -> Vec<u8> {
    let mut out = src.to_vec();
    let identity = tint == [255; 3];
    for px in out.chunks_exact_mut(4) {
        if px[3] < alpha_cut {
            px.fill(0);
            continue;
        }
        if identity {
            continue;
        }
        for (c, t) in px[..3].iter_mut().zip(tint) {
            *c = ((u16::from(*c) * u16::from(t) + 127) / 255) as u8;
        }
    }
    out
}

/// Affine map from a `w` x `h` image onto the screen quad, using its top-left, top-right and
/// bottom-left corners. `None` for degenerate quads.
pub(crate) fn quad_affine(screen: [Point; 4], w: u32, h: u32) -> Option<Affine> {
    if w == 0 || h == 0 {
        return None;
    }
    let [tl, tr, bl, _] = screen;
    let (w, h) = (f64::from(w), f64::from(h));
    let a = (tr.x - tl.x) / w;
    let b = (tr.y - tl.y) / w;
    let c = (bl.x - tl.x) / h;
    let d = (bl.y - tl.y) / h;
    if (a * d - b * c).abs() < 1e-12 {
        return None;
    }
    Some(Affine::new([a, b, c, d, tl.x, tl.y]))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
