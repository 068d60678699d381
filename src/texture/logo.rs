use crate::assets::decode::PreparedImage;
use crate::foundation::core::{Affine, Rect};
use crate::foundation::error::{CardError, CardResult};
use crate::render::raster::{Raster, image_paint};

/// Side of the square logo texture.
pub const LOGO_TEXTURE_SIZE: u32 = 512;
/// Horizontal nudge of the centered logo mesh, in model units.
pub const LOGO_CENTER_NUDGE_X: f32 = 0.035;

/// Largest rect with the source aspect ratio that fits a `size` x `size` square, centered.
pub fn letterbox(src_width: u32, src_height: u32, size: u32) -> Rect {
    let (sw, sh) = (f64::from(src_width), f64::from(src_height));
    let s = f64::from(size);
    let (w, h) = if sw / sh > 1.0 {
        (s, s / sw * sh)
    } else {
        (s / sh * sw, s)
    };
    let x = (s - w) / 2.0;
    let y = (s - h) / 2.0;
    Rect::new(x, y, x + w, y + h)
}

/// Letterbox `image` into a transparent square texture.
pub fn render_logo(image: &PreparedImage) -> CardResult<PreparedImage> {
    if image.width == 0 || image.height == 0 {
        return Err(CardError::asset("logo image has no pixels"));
    }
    let dst = letterbox(image.width, image.height, LOGO_TEXTURE_SIZE);
    let transform = Affine::translate((dst.x0, dst.y0))
        * Affine::scale_non_uniform(
            dst.width() / f64::from(image.width),
            dst.height() / f64::from(image.height),
        );

    let paint = image_paint(image)?;
    let mut raster = Raster::new(LOGO_TEXTURE_SIZE, LOGO_TEXTURE_SIZE)?;
    raster.draw_image(&paint, (image.width, image.height), transform);
    raster.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/texture/logo.rs"]
mod tests;
