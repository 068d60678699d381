use super::*;

#[test]
fn garbage_font_bytes_are_rejected() {
    let err = TextLayoutEngine::from_font_bytes(b"not a font".to_vec()).unwrap_err();
    assert!(err.to_string().contains("asset error"));
}

#[test]
fn missing_font_file_is_an_asset_error() {
    let err = TextLayoutEngine::from_path(std::path::Path::new("/nonexistent/font.ttf"))
        .unwrap_err();
    assert!(err.to_string().contains("failed to read font"));
}

#[test]
fn width_grows_with_size_and_length() {
    let mut engine = TextLayoutEngine::default_font().unwrap();
    assert!(!engine.family_name().is_empty());

    let short = engine.measure_width("Ada", 48.0).unwrap();
    let long = engine.measure_width("Ada Lovelace", 48.0).unwrap();
    let small = engine.measure_width("Ada Lovelace", 24.0).unwrap();
    assert!(short > 0.0);
    assert!(long > short);
    assert!(small < long);
    assert!(engine.measure_width("x", 0.0).is_err());
}
