use std::sync::Arc;

use crate::foundation::error::{CardError, CardResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// DejaVu Sans, used whenever no other font is configured.
pub const DEFAULT_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// Width measurement used when fitting text into a fixed box.
pub trait TextMeasure {
    /// Advance width of `text` laid out on one line at `size_px`.
    fn measure_width(&mut self, text: &str, size_px: f32) -> CardResult<f32>;
}

/// Stateful helper for building Parley text layouts from one registered font.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font_bytes: Arc<Vec<u8>>,
}

impl std::fmt::Debug for TextLayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextLayoutEngine")
            .field("family_name", &self.family_name)
            .field("font_bytes_len", &self.font_bytes.len())
            .finish()
    }
}

impl TextLayoutEngine {
    /// Register `font_bytes` (TTF/OTF) and resolve its family name.
    pub fn from_font_bytes(font_bytes: Vec<u8>) -> CardResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| CardError::asset("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CardError::asset("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font_bytes: Arc::new(font_bytes),
        })
    }

    /// Engine over the bundled [`DEFAULT_FONT`].
    pub fn default_font() -> CardResult<Self> {
        Self::from_font_bytes(DEFAULT_FONT.to_vec())
    }

    /// Load a font file from disk.
    pub fn from_path(path: &std::path::Path) -> CardResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            CardError::asset(format!("failed to read font '{}': {e}", path.display()))
        })?;
        Self::from_font_bytes(bytes)
    }

    /// Family name detected in the font data.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Raw font bytes, shared with the rasterizer.
    pub fn font_bytes(&self) -> Arc<Vec<u8>> {
        Arc::clone(&self.font_bytes)
    }

    /// Shape `text` on a single unbroken line.
    pub fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> CardResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CardError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(
            None,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        Ok(layout)
    }
}

impl TextMeasure for TextLayoutEngine {
    fn measure_width(&mut self, text: &str, size_px: f32) -> CardResult<f32> {
        let layout = self.layout_line(text, size_px, TextBrushRgba8::default())?;
        Ok(layout.width())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
