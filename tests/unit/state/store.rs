use std::cell::RefCell;
use std::rc::Rc;

use super::*;

fn png_file(name: &str) -> LogoFile {
    LogoFile {
        name: name.to_string(),
        mime: "image/png".to_string(),
        bytes: vec![0x89, b'P', b'N', b'G'],
        origin: None,
    }
}

#[test]
fn two_uploads_revoke_first_url_exactly_once() {
    let mut store = CardStore::default();
    store.upload_logo(png_file("a.png"));
    let first = store.state().logo.clone().unwrap();
    store.upload_logo(png_file("b.png"));

    assert_eq!(store.urls().revoked_count(), 1);
    assert_eq!(store.urls().live_count(), 1);
    assert!(store.urls().resolve(first.url()).is_none());
    assert_ne!(store.state().logo.as_ref(), Some(&first));
}

#[test]
fn invalid_upload_revokes_and_clears() {
    let mut store = CardStore::default();
    store.upload_logo(png_file("a.png"));
    let changes = store.upload_logo(LogoFile {
        mime: "application/pdf".to_string(),
        ..png_file("doc.pdf")
    });
    assert!(changes.contains(StateChange::Logo));
    assert_eq!(store.state().logo, None);
    assert_eq!(store.urls().live_count(), 0);
    assert_eq!(store.urls().revoked_count(), 1);
}

#[test]
fn clear_logo_revokes_and_is_idempotent() {
    let mut store = CardStore::default();
    store.upload_logo(png_file("a.png"));
    assert!(store.clear_logo().contains(StateChange::Logo));
    assert!(store.clear_logo().is_empty());
    assert_eq!(store.urls().revoked_count(), 1);
}

#[test]
fn design_selection_moves_logo() {
    let mut store = CardStore::default();
    let changes = store.select_design(Design::Duotone);
    assert!(changes.contains(StateChange::Design));
    assert!(changes.contains(StateChange::LogoPosition));
    assert_eq!(store.state().logo_position, LogoPosition::TopRight);

    store.select_design(Design::Gradient);
    assert_eq!(store.state().logo_position, LogoPosition::Center);
}

#[test]
fn template_selection_updates_active_design() {
    let mut store = CardStore::default();
    store.set_tab(Tab::Templates);
    let changes = store.select_template("02");
    assert!(changes.contains(StateChange::Template));
    assert_eq!(store.state().selected_template_id.as_deref(), Some("02"));
    assert_eq!(store.state().logo_position, LogoPosition::TopRight);
    assert_eq!(store.active_design().colors.color_one(), "#F65555");
    assert_eq!(store.active_design().colors.color_two(), Some("#FC8C8C"));
}

#[test]
fn unknown_template_is_a_no_op() {
    let mut store = CardStore::default();
    assert!(store.select_template("42").is_empty());
    assert_eq!(store.state().selected_template_id, None);
}

#[test]
fn unchanged_writes_produce_empty_sets() {
    let mut store = CardStore::default();
    assert!(store.set_tab(Tab::Customize).is_empty());
    assert!(store.set_color(ColorSlot::Classic, "#04091B").is_empty());
    assert!(store.set_name("").is_empty());
    assert!(!store.set_color(ColorSlot::Classic, "#123456").is_empty());
    assert_eq!(store.state().classic_color, "#123456");
}

#[test]
fn subscribers_see_every_non_empty_change() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut store = CardStore::default();
    store.subscribe(Box::new(move |changes: &ChangeSet, state: &CardState| {
        sink.borrow_mut()
            .push((changes.iter().collect::<Vec<_>>(), state.name.clone()));
    }));

    store.set_name("Ada");
    store.set_name("Ada");
    store.set_color(ColorSlot::GradientTwo, "#000000");

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], (vec![StateChange::Name], "Ada".to_string()));
    assert_eq!(seen[1].0, vec![StateChange::Color(ColorSlot::GradientTwo)]);
}

#[test]
fn uploads_from_disk_are_persisted_and_restored() {
    let dir = tempfile::tempdir().unwrap();
    let storage_path = dir.path().join("logo.json");
    let logo_path = dir.path().join("acme.png");
    std::fs::write(&logo_path, [1u8]).unwrap();

    let mut store = CardStore::new(Box::new(
        crate::assets::logo_storage::FileLogoStorage::new(&storage_path),
    ));
    store.upload_logo(LogoFile {
        origin: Some(logo_path.clone()),
        ..png_file("acme.png")
    });

    let mut next = CardStore::new(Box::new(
        crate::assets::logo_storage::FileLogoStorage::new(&storage_path),
    ));
    let changes = next.restore_logo_from_storage();
    assert!(changes.contains(StateChange::Logo));
    assert_eq!(
        next.state().logo_url(),
        Some(format!("file://{}", logo_path.display()).as_str())
    );

    next.clear_logo();
    let mut third = CardStore::new(Box::new(
        crate::assets::logo_storage::FileLogoStorage::new(&storage_path),
    ));
    assert!(third.restore_logo_from_storage().is_empty());
}
