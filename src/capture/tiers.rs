use std::io::Cursor;

use anyhow::Context;

use crate::assets::decode::PreparedImage;
use crate::capture::filename::display_name;
use crate::foundation::core::{Canvas, Rect, Rgba8};
use crate::foundation::error::{CardError, CardResult};
use crate::foundation::math::{premul_over_in_place, unpremultiply_rgba8_in_place};
use crate::render::backend::FrameRGBA;
use crate::render::raster::Raster;
use crate::texture::name::NameRenderer;

/// Size used for the offscreen copy when the canvas reports no size.
pub const FALLBACK_CANVAS: Canvas = Canvas {
    width: 1200,
    height: 900,
};

const PLACEHOLDER_INSET: f64 = 50.0;
const PLACEHOLDER_PANEL: u32 = 0xf0f0f0;
const PLACEHOLDER_TEXT: u32 = 0x666666;

/// Which capture path produced the PNG.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaptureTier {
    /// The rendered frame, encoded as is.
    Direct,
    /// The frame composited over an opaque white canvas.
    WhiteCanvas,
    /// A neutral panel naming the card, used when the frame cannot be drawn.
    Placeholder,
}

/// Encoded export.
#[derive(Clone, Debug, PartialEq)]
pub struct Captured {
    /// Path that succeeded.
    pub tier: CaptureTier,
    /// PNG bytes.
    pub png: Vec<u8>,
}

/// Encode premultiplied pixels as a straight-alpha PNG.
pub fn encode_png(width: u32, height: u32, rgba8_premul: &[u8]) -> CardResult<Vec<u8>> {
    let mut straight = rgba8_premul.to_vec();
    unpremultiply_rgba8_in_place(&mut straight);
    let img = image::RgbaImage::from_raw(width, height, straight)
        .ok_or_else(|| CardError::capture("pixel buffer does not match the frame size"))?;
    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(out)
}

/// Encode the frame directly; refuses empty and fully transparent frames.
pub fn direct_capture(frame: &FrameRGBA) -> CardResult<Vec<u8>> {
    if frame.is_empty() {
        return Err(CardError::capture("frame is empty"));
    }
    if frame.is_fully_transparent() {
        return Err(CardError::capture("frame has no visible pixels"));
    }
    if !frame.premultiplied {
        return Err(CardError::capture("frame must be premultiplied"));
    }
    let png = encode_png(frame.width, frame.height, &frame.data)?;
    if png.is_empty() {
        return Err(CardError::capture("direct encoding is empty"));
    }
    Ok(png)
}

fn white_composite(frame: &FrameRGBA, canvas: Canvas) -> CardResult<PreparedImage> {
    if (frame.width, frame.height) != (canvas.width, canvas.height) || !frame.premultiplied {
        return Err(CardError::capture("frame does not match the offscreen canvas"));
    }
    let mut data = vec![255u8; frame.data.len()];
    premul_over_in_place(&mut data, &frame.data)?;
    PreparedImage::from_premul(canvas.width, canvas.height, data)
}

/// Light panel with "3D Card Preview" and the card name on a white canvas.
///
/// Without a font the panel is drawn with no text.
pub fn render_placeholder(
    canvas: Canvas,
    card_name: &str,
    text: Option<&mut NameRenderer>,
) -> CardResult<PreparedImage> {
    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    let mut raster = Raster::new(canvas.width, canvas.height)?;
    raster.fill_rect(Rect::new(0.0, 0.0, w, h), Rgba8::WHITE);
    raster.fill_rect(
        Rect::new(
            PLACEHOLDER_INSET,
            PLACEHOLDER_INSET,
            (w - PLACEHOLDER_INSET).max(PLACEHOLDER_INSET),
            (h - PLACEHOLDER_INSET).max(PLACEHOLDER_INSET),
        ),
        Rgba8::from_rgb_u32(PLACEHOLDER_PANEL),
    );

    match text {
        Some(renderer) => {
            let color = Rgba8::from_rgb_u32(PLACEHOLDER_TEXT);
            renderer.draw_centered_line(
                &mut raster,
                "3D Card Preview",
                32.0,
                color,
                w / 2.0,
                h / 2.0 - 20.0,
            )?;
            renderer.draw_centered_line(
                &mut raster,
                &format!("Card Name: {}", display_name(card_name)),
                18.0,
                color,
                w / 2.0,
                h / 2.0 + 20.0,
            )?;
        }
        None => tracing::warn!("no font configured; placeholder drawn without text"),
    }
    raster.finish()
}

/// Run the capture fallbacks in order: direct encode, white-canvas copy, placeholder.
///
/// `frame` is the render result; a render error skips straight to the offscreen copy.
#[tracing::instrument(skip_all, fields(width = canvas.width, height = canvas.height))]
pub fn capture_png(
    frame: &CardResult<FrameRGBA>,
    canvas: Canvas,
    card_name: &str,
    text: Option<&mut NameRenderer>,
) -> CardResult<Captured> {
    match frame {
        Ok(frame) => match direct_capture(frame) {
            Ok(png) => {
                return Ok(Captured {
                    tier: CaptureTier::Direct,
                    png,
                });
            }
            Err(err) => tracing::warn!(error = %err, "direct capture failed, trying fallback"),
        },
        Err(err) => tracing::warn!(error = %err, "render failed, trying fallback"),
    }

    let offscreen = if canvas.is_empty() {
        FALLBACK_CANVAS
    } else {
        canvas
    };
    let composite = match frame {
        Ok(frame) => white_composite(frame, offscreen),
        Err(_) => Err(CardError::capture("no frame to copy")),
    };
    let (tier, image) = match composite {
        Ok(image) => (CaptureTier::WhiteCanvas, image),
        Err(err) => {
            tracing::warn!(error = %err, "could not copy the frame, drawing placeholder");
            (
                CaptureTier::Placeholder,
                render_placeholder(offscreen, card_name, text)?,
            )
        }
    };

    let png = encode_png(image.width, image.height, &image.rgba8_premul)?;
    if png.is_empty() {
        return Err(CardError::capture("fallback canvas produced an empty encoding"));
    }
    Ok(Captured { tier, png })
}

#[cfg(test)]
#[path = "../../tests/unit/capture/tiers.rs"]
mod tests;
