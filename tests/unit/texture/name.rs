use super::*;

/// Monospace stand-in: every char advances `0.6 * size`.
struct FixedAdvance;

impl TextMeasure for FixedAdvance {
    fn measure_width(&mut self, text: &str, size_px: f32) -> CardResult<f32> {
        Ok(text.chars().count() as f32 * size_px * 0.6)
    }
}

#[test]
fn short_names_keep_the_start_size() {
    assert_eq!(fit_font_size(&mut FixedAdvance, "Ada").unwrap(), 48.0);
}

#[test]
fn long_names_shrink_in_steps_until_they_fit() {
    // 20 chars: fits once 20 * 0.6 * size <= 448, i.e. size <= 37.33
    let size = fit_font_size(&mut FixedAdvance, "ABCDEFGHIJKLMNOPQRST").unwrap();
    assert_eq!(size, 37.5 - 1.5);
    assert!(FixedAdvance.measure_width("ABCDEFGHIJKLMNOPQRST", size).unwrap() <= 448.0);
}

#[test]
fn shrinking_stops_below_the_minimum() {
    let text = "W".repeat(500);
    let size = fit_font_size(&mut FixedAdvance, &text).unwrap();
    assert!(size <= 10.0);
    assert!(size > 10.0 - 1.5);
}

#[test]
fn tint_depends_on_text_color() {
    assert_eq!(name_tint(Rgba8::WHITE), Rgba8::from_rgb_u32(0xf0f0f0));
    assert_eq!(name_tint(Rgba8::BLACK), Rgba8::from_rgb_u32(0x111111));
}

#[test]
fn rendered_name_is_left_aligned_and_centered() {
    let mut renderer = NameRenderer::with_default_font().unwrap();
    let img = renderer.render("Ada Lovelace", Rgba8::WHITE).unwrap();
    assert_eq!((img.width, img.height), (512, 512));
    assert!(!img.is_fully_transparent());

    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_y = 0;
    for y in 0..img.height {
        for x in 0..img.width {
            if img.pixel(x, y)[3] > 0 {
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_y = max_y.max(y);
            }
        }
    }
    assert!((28..=48).contains(&min_x), "{min_x}");
    assert!(min_y > 200 && max_y < 312, "{min_y}..{max_y}");
    // corners stay transparent
    assert_eq!(img.pixel(0, 0)[3], 0);
    assert_eq!(img.pixel(511, 511)[3], 0);
}
