use std::io::Cursor;

use super::*;
use crate::capture::download::MemorySink;
use crate::foundation::core::{Canvas, Rgba8};
use crate::state::card::{ColorSlot, Design, LogoPosition};
use crate::ui::color_binding::ColorMarkers;
use crate::ui::notify::{MODEL_LOAD_ALERT, RecordingNotifier, SCENE_NOT_LOADED_ALERT};

type TestSession = CardCustomizer<MemorySink, RecordingNotifier>;

fn config() -> AppConfig {
    AppConfig {
        canvas: Canvas::new(160, 100),
        min_loading_s: 0.0,
        ..AppConfig::default()
    }
}

fn june12() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 12).unwrap()
}

fn session_with(config: &AppConfig) -> TestSession {
    CardCustomizer::new(config, MemorySink::default(), RecordingNotifier::default())
        .with_date(june12())
}

fn write_png(path: &std::path::Path) {
    let img = image::RgbaImage::from_raw(4, 2, vec![200; 32]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(path, buf).unwrap();
}

#[test]
fn startup_opens_step_one_and_paints_the_card() {
    let s = session_with(&config());
    assert!(s.accordion(Tab::Customize).is_open(1));
    assert!(s.accordion(Tab::Templates).is_open(1));
    assert_eq!(s.tabs().tab, Tab::Customize);
    assert_eq!(
        s.accordion(Tab::Customize).steps()[0].header_label.as_deref(),
        Some("Classic")
    );

    let report = s.last_synth().unwrap();
    assert!(report.background_applied);
    assert!(!report.name_visible);
    assert_eq!(report.logo_mesh, None);
    assert_eq!(report.text_color, Rgba8::WHITE);
    assert_eq!(s.card_textures().len(), 1);
    assert!(s.notifier().alerts().is_empty());
}

#[test]
fn templates_tab_preselects_the_first_template() {
    let mut s = session_with(&config());
    s.dispatch(UiEvent::TabClicked {
        tab: Tab::Templates,
    });
    let first = first_template();
    assert_eq!(s.state().selected_template_id.as_deref(), Some(first.id));
    assert!(s.tabs().templates_pane_visible);
    assert_eq!(s.active_accordion().current(), 1);
    assert_eq!(
        s.accordion(Tab::Templates).steps()[0].header_label.as_deref(),
        Some(first.name)
    );

    s.dispatch(UiEvent::TemplateClicked {
        id: "02".to_string(),
    });
    assert_eq!(s.store().active_design().design(), Design::Duotone);
    assert_eq!(s.state().logo_position, LogoPosition::TopRight);
}

#[test]
fn color_changes_repaint_and_indicators_follow_the_colors_step() {
    let mut s = session_with(&config());
    s.dispatch(UiEvent::ColorChanged {
        slot: ColorSlot::Classic,
        value: "#FFB900".to_string(),
    });
    assert_eq!(s.last_synth().unwrap().text_color, Rgba8::BLACK);
    assert!(s.customize_view().indicators.visible);

    s.dispatch(UiEvent::StepHeaderClicked { step: 2 });
    assert!(!s.customize_view().indicators.visible);
    s.dispatch(UiEvent::StepHeaderClicked { step: 2 });
    assert!(s.customize_view().indicators.visible);
}

#[test]
fn next_on_the_last_step_exports_instead_of_advancing() {
    let mut s = session_with(&config());
    assert_eq!(s.last_export(), None);
    s.dispatch(UiEvent::NameInput {
        value: "Ada Lovelace".to_string(),
    });
    s.dispatch(UiEvent::NextClicked);
    s.dispatch(UiEvent::NextClicked);
    assert_eq!(s.buttons().next_label, "Download card");
    assert_eq!(s.export_phase(), ExportPhase::Idle);

    s.dispatch(UiEvent::NextClicked);
    assert_eq!(s.active_accordion().current(), 3);
    assert_eq!(s.export_phase(), ExportPhase::AnimatingToFront);

    let outcomes = s.settle(4.0, 1.0 / 30.0);
    assert_eq!(outcomes.len(), 1);
    assert!(matches!(
        &outcomes[0],
        ExportOutcome::Saved { filename, .. } if filename == "Ada_Lovelace-Jun12.png"
    ));
    assert_eq!(s.export_phase(), ExportPhase::Idle);
    assert_eq!(s.last_export(), Some(&outcomes[0]));
    assert_eq!(s.sink().files().len(), 1);
}

#[test]
fn missing_model_alerts_on_load_and_on_export() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        model: Some(dir.path().join("missing.json")),
        ..config()
    };
    let mut s = session_with(&config);
    assert_eq!(s.notifier().alerts(), [MODEL_LOAD_ALERT]);
    assert!(s.last_synth().is_none());

    assert_eq!(s.run_export(0.1), None);
    assert_eq!(
        s.notifier().alerts(),
        [MODEL_LOAD_ALERT, SCENE_NOT_LOADED_ALERT]
    );
}

#[test]
fn marked_color_inputs_resolve_their_field() {
    let mut s = session_with(&config());
    s.dispatch(UiEvent::ColorInput {
        markers: ColorMarkers {
            color_option: Some("color-two".to_string()),
            ..ColorMarkers::default()
        },
        value: "#00FF00".to_string(),
    });
    assert_eq!(s.state().color(ColorSlot::DuotoneTwo), "#00FF00");

    let before = s.state().clone();
    s.dispatch(UiEvent::ColorInput {
        markers: ColorMarkers::default(),
        value: "#111111".to_string(),
    });
    assert_eq!(s.state(), &before);
}

#[test]
fn default_config_draws_the_cardholder_name() {
    let mut s = session_with(&AppConfig::default());
    s.dispatch(UiEvent::NameInput {
        value: "Ada Lovelace".to_string(),
    });
    assert!(s.last_synth().unwrap().name_visible);
    let shown: Vec<_> = s.card_textures().into_iter().map(|(n, _)| n).collect();
    assert_eq!(shown, [MeshName::CardBase, MeshName::CardName]);
}

#[test]
fn unreadable_name_font_falls_back_to_the_bundled_one() {
    let s = session_with(&AppConfig {
        name_font: Some("/nonexistent/font.ttf".into()),
        ..config()
    });
    assert!(s.names.is_some());
}

#[test]
fn logo_uploads_replace_and_move_between_meshes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logo.png");
    write_png(&path);

    let mut s = session_with(&config());
    s.dispatch(UiEvent::LogoUploaded { path: path.clone() });
    s.dispatch(UiEvent::LogoUploaded { path });
    assert_eq!(s.store().urls().live_count(), 1);
    assert_eq!(s.store().urls().revoked_count(), 1);
    assert_eq!(
        s.last_synth().unwrap().logo_mesh,
        Some(MeshName::LogoCenter)
    );

    s.dispatch(UiEvent::LogoPositionChanged {
        position: LogoPosition::TopRight,
    });
    assert_eq!(
        s.last_synth().unwrap().logo_mesh,
        Some(MeshName::LogoTopRight)
    );
    let shown: Vec<_> = s.card_textures().into_iter().map(|(n, _)| n).collect();
    assert_eq!(shown, [MeshName::CardBase, MeshName::LogoTopRight]);

    s.dispatch(UiEvent::LogoRemoved);
    assert_eq!(s.store().urls().live_count(), 0);
    assert_eq!(s.last_synth().unwrap().logo_mesh, None);
}

#[test]
fn svg_logo_upload_is_shown() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logo.svg");
    std::fs::write(
        &path,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="10" height="10" fill="#f00"/></svg>"##,
    )
    .unwrap();

    let mut s = session_with(&config());
    s.dispatch(UiEvent::LogoUploaded { path });
    assert!(s.state().logo_url().is_some());
    assert_eq!(
        s.last_synth().unwrap().logo_mesh,
        Some(MeshName::LogoCenter)
    );
}

#[test]
fn persisted_logo_is_restored_on_startup() {
    let dir = tempfile::tempdir().unwrap();
    let logo = dir.path().join("saved.png");
    write_png(&logo);
    let storage = dir.path().join("logo.json");
    let url = format!("file://{}", logo.display());
    std::fs::write(&storage, serde_json::json!({ "logo_url": url }).to_string()).unwrap();

    let config = AppConfig {
        logo_storage: Some(storage),
        ..config()
    };
    let s = session_with(&config);
    assert_eq!(s.state().logo_url(), Some(url.as_str()));
    assert_eq!(
        s.last_synth().unwrap().logo_mesh,
        Some(MeshName::LogoCenter)
    );
}
