use crate::assets::color::{average_color, contrast_text_color, parse_hex_or};
use crate::assets::decode::PreparedImage;
use crate::foundation::core::{Rect, Rgba8};
use crate::foundation::error::CardResult;
use crate::render::raster::Raster;
use crate::state::active::DesignColors;
use crate::state::card::GradientType;

/// Background texture width.
pub const BACKGROUND_WIDTH: u32 = 512;
/// Background texture height.
pub const BACKGROUND_HEIGHT: u32 = 288;

const CLASSIC_FALLBACK: Rgba8 = Rgba8::from_rgb_u32(0xCCCCCC);
const DUOTONE_RIGHT_FALLBACK: Rgba8 = Rgba8::from_rgb_u32(0xAAAAAA);
const GRADIENT_ONE_FALLBACK: Rgba8 = Rgba8::from_rgb_u32(0x667ED8);
const GRADIENT_TWO_FALLBACK: Rgba8 = Rgba8::from_rgb_u32(0x69F7DB);

const RADIAL_INNER: f64 = 40.0;
const RADIAL_OUTER: f64 = 800.0;
const RADIAL_SECOND_STOP: f64 = 0.2;

/// Parsed background paint with fallbacks applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackgroundFill {
    /// One color over the whole card.
    Solid(Rgba8),
    /// Left and right halves.
    Split {
        /// Left half.
        left: Rgba8,
        /// Right half.
        right: Rgba8,
    },
    /// Two-color gradient.
    Gradient {
        /// Geometry.
        kind: GradientType,
        /// Color one (end of the ramp).
        one: Rgba8,
        /// Color two (start of the ramp).
        two: Rgba8,
    },
}

impl BackgroundFill {
    /// Parse the design colors; malformed values fall back with a warning.
    pub fn from_colors(colors: &DesignColors) -> Self {
        match colors {
            DesignColors::Classic { color } => Self::Solid(parse_hex_or(color, CLASSIC_FALLBACK)),
            DesignColors::Duotone { one, two } => Self::Split {
                left: parse_hex_or(one, CLASSIC_FALLBACK),
                right: parse_hex_or(two, DUOTONE_RIGHT_FALLBACK),
            },
            DesignColors::Gradient { kind, one, two } => Self::Gradient {
                kind: *kind,
                one: parse_hex_or(one, GRADIENT_ONE_FALLBACK),
                two: parse_hex_or(two, GRADIENT_TWO_FALLBACK),
            },
        }
    }

    /// Name text color: contrast against color one, or the gradient average.
    pub fn text_color(self) -> Rgba8 {
        match self {
            Self::Solid(c) | Self::Split { left: c, .. } => contrast_text_color(c),
            Self::Gradient { one, two, .. } => contrast_text_color(average_color(one, two)),
        }
    }
}

/// Column widths of a duotone split; the two always sum to `width`.
pub fn duotone_split(width: u32) -> (u32, u32) {
    let left = (f64::from(width) * 0.5).round() as u32;
    (left, width - left)
}

/// Paint the background texture.
pub fn render_background(fill: BackgroundFill) -> CardResult<PreparedImage> {
    render_background_sized(fill, BACKGROUND_WIDTH, BACKGROUND_HEIGHT)
}

/// Paint a background of arbitrary size.
pub fn render_background_sized(
    fill: BackgroundFill,
    width: u32,
    height: u32,
) -> CardResult<PreparedImage> {
    match fill {
        BackgroundFill::Solid(c) => {
            let mut raster = Raster::new(width, height)?;
            raster.fill_rect(full(width, height), c);
            raster.finish()
        }
        BackgroundFill::Split { left, right } => {
            let mut raster = Raster::new(width, height)?;
            let (lw, _) = duotone_split(width);
            let h = f64::from(height);
            raster.fill_rect(Rect::new(0.0, 0.0, f64::from(lw), h), left);
            raster.fill_rect(Rect::new(f64::from(lw), 0.0, f64::from(width), h), right);
            raster.finish()
        }
        BackgroundFill::Gradient { kind, one, two } => gradient_pixels(kind, one, two, width, height),
    }
}

fn full(width: u32, height: u32) -> Rect {
    Rect::new(0.0, 0.0, f64::from(width), f64::from(height))
}

/// Ramp position of pixel center `(x, y)`, in `[0, 1]`.
pub fn gradient_t(kind: GradientType, x: f64, y: f64, width: u32, height: u32) -> f64 {
    let (w, h) = (f64::from(width), f64::from(height));
    match kind {
        GradientType::Linear => {
            let (dx, dy) = (0.75 * w, 0.4 * h);
            let len2 = dx * dx + dy * dy;
            if len2 <= 0.0 {
                return 0.0;
            }
            ((x * dx + y * dy) / len2).clamp(0.0, 1.0)
        }
        GradientType::Radial => {
            let (cx, cy) = (w / 2.0, h / 4.0);
            let d = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
            ((d - RADIAL_INNER) / (RADIAL_OUTER - RADIAL_INNER)).clamp(0.0, 1.0)
        }
    }
}

/// Color at ramp position `t`.
pub fn gradient_color(kind: GradientType, one: Rgba8, two: Rgba8, t: f64) -> Rgba8 {
    let f = match kind {
        GradientType::Linear => t,
        GradientType::Radial => (t / RADIAL_SECOND_STOP).min(1.0),
    };
    let lerp = |a: u8, b: u8| -> u8 {
        let (af, bf) = (f64::from(a), f64::from(b));
        (af + (bf - af) * f).round().clamp(0.0, 255.0) as u8
    };
    Rgba8 {
        r: lerp(two.r, one.r),
        g: lerp(two.g, one.g),
        b: lerp(two.b, one.b),
        a: lerp(two.a, one.a),
    }
}

fn gradient_pixels(
    kind: GradientType,
    one: Rgba8,
    two: Rgba8,
    width: u32,
    height: u32,
) -> CardResult<PreparedImage> {
    let mut bytes = vec![0u8; (width as usize) * (height as usize) * 4];
    for y in 0..height {
        for x in 0..width {
            let t = gradient_t(
                kind,
                f64::from(x) + 0.5,
                f64::from(y) + 0.5,
                width,
                height,
            );
            let c = gradient_color(kind, one, two, t).to_premul();
            let idx = ((y as usize) * (width as usize) + (x as usize)) * 4;
            bytes[idx..idx + 4].copy_from_slice(&c);
        }
    }
    PreparedImage::from_premul(width, height, bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/texture/background.rs"]
mod tests;
