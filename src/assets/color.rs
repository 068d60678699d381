use crate::foundation::core::Rgba8;
use crate::foundation::error::{CardError, CardResult};

/// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` (leading `#` optional, case-insensitive).
pub fn parse_hex(s: &str) -> CardResult<Rgba8> {
    let s = s.trim();
    let digits = s.strip_prefix('#').unwrap_or(s);
    if !digits.is_ascii() {
        return Err(CardError::validation(format!("invalid hex color \"{s}\"")));
    }

    fn hex_byte(pair: &str) -> CardResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| CardError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    match digits.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, c) in digits.chars().enumerate() {
                let nibble = c
                    .to_digit(16)
                    .ok_or_else(|| CardError::validation(format!("invalid hex digit '{c}'")))?
                    as u8;
                out[i] = nibble * 17;
            }
            Ok(Rgba8::opaque(out[0], out[1], out[2]))
        }
        6 => Ok(Rgba8::opaque(
            hex_byte(&digits[0..2])?,
            hex_byte(&digits[2..4])?,
            hex_byte(&digits[4..6])?,
        )),
        8 => Ok(Rgba8 {
            r: hex_byte(&digits[0..2])?,
            g: hex_byte(&digits[2..4])?,
            b: hex_byte(&digits[4..6])?,
            a: hex_byte(&digits[6..8])?,
        }),
        _ => Err(CardError::validation(
            "hex color must be #RGB, #RRGGBB or #RRGGBBAA",
        )),
    }
}

/// Parse a stored color, logging and substituting `fallback` when it is malformed.
pub fn parse_hex_or(s: &str, fallback: Rgba8) -> Rgba8 {
    match parse_hex(s) {
        Ok(c) => c,
        Err(err) => {
            tracing::warn!(value = s, %err, fallback = %fallback.to_hex(), "malformed color");
            fallback
        }
    }
}

/// WCAG relative luminance of the RGB channels.
pub fn relative_luminance(c: Rgba8) -> f64 {
    fn linear(channel: u8) -> f64 {
        let c = f64::from(channel) / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    0.2126 * linear(c.r) + 0.7152 * linear(c.g) + 0.0722 * linear(c.b)
}

/// Black on light backgrounds, white on dark ones.
pub fn contrast_text_color(background: Rgba8) -> Rgba8 {
    if relative_luminance(background) > 0.5 {
        Rgba8::BLACK
    } else {
        Rgba8::WHITE
    }
}

/// Per-channel rounded mean of two opaque colors.
pub fn average_color(a: Rgba8, b: Rgba8) -> Rgba8 {
    let avg = |x: u8, y: u8| ((f64::from(x) + f64::from(y)) / 2.0).round() as u8;
    Rgba8::opaque(avg(a.r, b.r), avg(a.g, b.g), avg(a.b, b.b))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
