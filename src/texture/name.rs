use std::path::Path;

use crate::assets::decode::PreparedImage;
use crate::assets::text::{TextBrushRgba8, TextLayoutEngine, TextMeasure};
use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::CardResult;
use crate::render::raster::{Raster, font_data};

/// Side of the square name texture.
pub const NAME_TEXTURE_SIZE: u32 = 512;
/// Left padding of the name, also used as the fitting margin.
pub const NAME_PADDING: f32 = 32.0;
/// Bump scale of the printed name; negative presses it into the card.
pub const NAME_BUMP_SCALE: f32 = -0.009;

const START_SIZE: f32 = 48.0;
const SIZE_STEP: f32 = 1.5;
const MIN_SIZE: f32 = 10.0;
const LINE_HEIGHT: f32 = 1.2;

/// Font size at which `text` fits the name texture.
///
/// Shrinks from 48 px in 1.5 px steps while the line is wider than the padded box, then caps
/// the size so one line of height `1.2 * size` fits vertically.
pub fn fit_font_size(measure: &mut dyn TextMeasure, text: &str) -> CardResult<f32> {
    let max = NAME_TEXTURE_SIZE as f32 - 2.0 * NAME_PADDING;
    let mut size = START_SIZE;
    let mut width = measure.measure_width(text, size)?;
    while width > max && size > MIN_SIZE {
        size -= SIZE_STEP;
        width = measure.measure_width(text, size)?;
    }
    if size * LINE_HEIGHT > max {
        size = (max / LINE_HEIGHT).floor().max(MIN_SIZE);
    }
    Ok(size)
}

/// Material tint for the printed name: off-white for white text, near-black otherwise.
pub fn name_tint(text_color: Rgba8) -> Rgba8 {
    if text_color == Rgba8::WHITE {
        Rgba8::from_rgb_u32(0xf0f0f0)
    } else {
        Rgba8::from_rgb_u32(0x111111)
    }
}

/// Rasterizes cardholder names with one configured font.
pub struct NameRenderer {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for NameRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameRenderer")
            .field("engine", &self.engine)
            .finish()
    }
}

impl NameRenderer {
    /// Renderer drawing with `engine`'s font.
    pub fn new(engine: TextLayoutEngine) -> Self {
        let font = font_data(engine.font_bytes().as_slice());
        Self { engine, font }
    }

    /// Renderer using the bundled default font.
    pub fn with_default_font() -> CardResult<Self> {
        Ok(Self::new(TextLayoutEngine::default_font()?))
    }

    /// Load the font at `path`.
    pub fn from_path(path: &Path) -> CardResult<Self> {
        Ok(Self::new(TextLayoutEngine::from_path(path)?))
    }

    /// Draw `text` left-aligned and vertically centered on a transparent square, with a
    /// faint pressed-in edge.
    pub fn render(&mut self, text: &str, color: Rgba8) -> CardResult<PreparedImage> {
        let size = fit_font_size(&mut self.engine, text)?;
        let brush = TextBrushRgba8 {
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        };
        let layout = self.engine.layout_line(text, size, brush)?;

        let center = f64::from(NAME_TEXTURE_SIZE) / 2.0;
        let top = center - f64::from(layout.height()) / 2.0;
        let left = f64::from(NAME_PADDING);

        let mut raster = Raster::new(NAME_TEXTURE_SIZE, NAME_TEXTURE_SIZE)?;
        raster.draw_layout(
            &layout,
            &self.font,
            Point::new(left, top + 1.0),
            Some(Rgba8::WHITE.with_alpha(48)),
        );
        raster.draw_layout(
            &layout,
            &self.font,
            Point::new(left, top - 1.0),
            Some(Rgba8::BLACK.with_alpha(72)),
        );
        raster.draw_layout(&layout, &self.font, Point::new(left, top), None);
        raster.finish()
    }

    /// Draw one line of `text` horizontally centered on `center_x` with its baseline at
    /// `baseline_y`.
    pub fn draw_centered_line(
        &mut self,
        raster: &mut Raster,
        text: &str,
        size_px: f32,
        color: Rgba8,
        center_x: f64,
        baseline_y: f64,
    ) -> CardResult<()> {
        let layout = self
            .engine
            .layout_line(text, size_px, TextBrushRgba8::default())?;
        let baseline = layout
            .lines()
            .next()
            .map(|line| line.metrics().baseline)
            .unwrap_or(size_px);
        let origin = Point::new(
            center_x - f64::from(layout.width()) / 2.0,
            baseline_y - f64::from(baseline),
        );
        raster.draw_layout(&layout, &self.font, origin, Some(color));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/texture/name.rs"]
mod tests;
