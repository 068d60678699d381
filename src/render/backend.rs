use crate::assets::decode::PreparedImage;
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::CardResult;
use crate::scene::camera::PerspectiveCamera;
use crate::scene::lights::LightRig;
use crate::scene::model::CardModel;

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha** by default; the `premultiplied` flag makes this explicit
/// at API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Frame over the pixels of a premultiplied image.
    pub fn from_image(image: &PreparedImage) -> Self {
        Self {
            width: image.width,
            height: image.height,
            data: image.rgba8_premul.as_ref().clone(),
            premultiplied: true,
        }
    }

    /// True when the frame has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.data.is_empty()
    }

    /// True when every pixel has zero alpha.
    pub fn is_fully_transparent(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }
}

/// Everything a backend needs to draw one frame of the card scene.
#[derive(Clone, Copy, Debug)]
pub struct SceneView<'a> {
    /// Viewpoint.
    pub camera: &'a PerspectiveCamera,
    /// Card to draw; `None` renders only the clear color.
    pub model: Option<&'a CardModel>,
    /// Scene lighting.
    pub lights: &'a LightRig,
    /// Output size.
    pub canvas: Canvas,
}

/// A renderer that turns a [`SceneView`] into a [`FrameRGBA`].
pub trait RenderBackend {
    /// Draw the scene and read back the final frame.
    fn render_scene(&mut self, view: &SceneView<'_>) -> CardResult<FrameRGBA>;
}

/// Available backend kinds.
///
/// - `Cpu` is always available.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// CPU raster backend powered by `vello_cpu`.
    #[default]
    Cpu,
}

/// Backend-agnostic settings.
#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    /// If set, backends clear the frame to this color before drawing.
    pub clear: Option<Rgba8>,
}

/// Create a rendering backend implementation.
pub fn create_backend(kind: BackendKind, settings: &RenderSettings) -> Box<dyn RenderBackend> {
    match kind {
        BackendKind::Cpu => Box::new(crate::render::cpu::CpuRenderer::new(settings.clone())),
    }
}
