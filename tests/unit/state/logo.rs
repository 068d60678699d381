use super::*;

#[test]
fn from_path_guesses_mime_and_keeps_origin() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("Acme.PNG");
    std::fs::write(&png, [1u8, 2, 3]).unwrap();
    let file = LogoFile::from_path(&png).unwrap();
    assert_eq!(file.name, "Acme.PNG");
    assert_eq!(file.mime, "image/png");
    assert_eq!(file.bytes, vec![1, 2, 3]);
    assert_eq!(file.origin.as_deref(), Some(png.as_path()));

    let doc = dir.path().join("notes.txt");
    std::fs::write(&doc, "hi").unwrap();
    assert_eq!(
        LogoFile::from_path(&doc).unwrap().mime,
        "application/octet-stream"
    );
}

#[test]
fn missing_file_is_an_asset_error() {
    assert!(LogoFile::from_path(Path::new("/nope/logo.png")).is_err());
}

#[test]
fn persisted_ref_exposes_url() {
    let r = LogoRef::Persisted("file:///tmp/a.png".to_string());
    assert_eq!(r.url(), "file:///tmp/a.png");
}
