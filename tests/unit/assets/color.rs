use super::*;

#[test]
fn parses_all_hex_forms() {
    assert_eq!(parse_hex("#04091B").unwrap(), Rgba8::opaque(4, 9, 27));
    assert_eq!(parse_hex("ffb900").unwrap(), Rgba8::opaque(255, 185, 0));
    assert_eq!(parse_hex("#CCC").unwrap(), Rgba8::opaque(204, 204, 204));
    assert_eq!(
        parse_hex("#11223380").unwrap(),
        Rgba8 {
            r: 0x11,
            g: 0x22,
            b: 0x33,
            a: 0x80
        }
    );
}

#[test]
fn rejects_malformed_hex() {
    for bad in ["", "#12", "#12345", "#GGGGGG", "#ééé", "#1234567"] {
        assert!(parse_hex(bad).is_err(), "{bad}");
    }
}

#[test]
fn malformed_value_falls_back() {
    let fallback = Rgba8::opaque(1, 2, 3);
    assert_eq!(parse_hex_or("not a color", fallback), fallback);
    assert_eq!(parse_hex_or("#FFFFFF", fallback), Rgba8::WHITE);
}

#[test]
fn dark_navy_gets_white_text() {
    let navy = parse_hex("#04091B").unwrap();
    assert!(relative_luminance(navy) < 0.5);
    assert_eq!(contrast_text_color(navy), Rgba8::WHITE);
}

#[test]
fn amber_gets_black_text() {
    let amber = parse_hex("#FFB900").unwrap();
    assert!(relative_luminance(amber) > 0.5);
    assert_eq!(contrast_text_color(amber), Rgba8::BLACK);
}

#[test]
fn luminance_extremes() {
    assert!(relative_luminance(Rgba8::BLACK).abs() < 1e-12);
    assert!((relative_luminance(Rgba8::WHITE) - 1.0).abs() < 1e-9);
}

#[test]
fn average_rounds_half_up() {
    let a = Rgba8::opaque(0x66, 0x7E, 0xD8);
    let b = Rgba8::opaque(0x69, 0xF7, 0xDB);
    assert_eq!(average_color(a, b), Rgba8::opaque(104, 187, 218));
}
