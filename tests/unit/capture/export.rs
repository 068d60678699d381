use super::*;
use crate::capture::download::MemorySink;
use crate::foundation::core::{Canvas, Viewport};
use crate::foundation::error::CardError;
use crate::render::backend::RenderSettings;
use crate::render::cpu::CpuRenderer;
use crate::scene::model::ModelManifest;
use crate::ui::notify::RecordingNotifier;

struct FailingSink;

impl DownloadSink for FailingSink {
    fn save(&mut self, _filename: &str, _bytes: &[u8]) -> CardResult<()> {
        Err(CardError::capture("disk full"))
    }
}

fn loaded_stage() -> Stage {
    let mut stage = Stage::new(Canvas::new(96, 64), Viewport::new(1440, 900), 0.0);
    let mut notifier = RecordingNotifier::default();
    assert!(stage.load_model(Ok(ModelManifest::builtin()), &mut notifier));
    stage
}

fn june12() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 12).unwrap()
}

#[test]
fn export_without_a_model_alerts() {
    let mut stage = Stage::new(Canvas::new(96, 64), Viewport::new(1440, 900), 0.0);
    let mut notifier = RecordingNotifier::default();
    let mut export = ExportController::new();
    assert!(!export.request(&mut stage, &mut notifier));
    assert_eq!(notifier.alerts(), [SCENE_NOT_LOADED_ALERT]);
    assert_eq!(export.phase(), ExportPhase::Idle);
}

#[test]
fn full_export_cycle_saves_and_restores_the_camera() {
    let mut stage = loaded_stage();
    stage.model_mut().unwrap().visible = true;
    stage.camera.position = Vec3::new(1.0, 0.5, 4.0);
    stage.camera.look_at(Vec3::ZERO);
    stage.controls.auto_rotate = true;
    stage.floating_mut().start();
    let before = stage.camera.position;

    let mut backend = CpuRenderer::new(RenderSettings::default());
    let mut sink = MemorySink::default();
    let mut notifier = RecordingNotifier::default();
    let mut export = ExportController::new();

    assert!(export.request(&mut stage, &mut notifier));
    assert_eq!(export.phase(), ExportPhase::AnimatingToFront);
    assert!(!stage.floating().is_active());
    assert!(!stage.controls.auto_rotate);

    let mut io = CaptureIo {
        backend: &mut backend,
        sink: &mut sink,
        notifier: &mut notifier,
        text: None,
        card_name: " Ada Lovelace ",
        date: june12(),
    };

    assert_eq!(export.advance(0.75, &mut stage, &mut io), None);
    assert_eq!(export.advance(0.75, &mut stage, &mut io), None);
    assert_eq!(export.phase(), ExportPhase::Capturing);
    assert!(stage.camera.position.x.abs() < 1e-5);
    assert!((stage.camera.position.z - before.length()).abs() < 1e-4);

    let outcome = export.advance(0.016, &mut stage, &mut io).unwrap();
    let ExportOutcome::Saved { filename, tier, .. } = outcome.clone() else {
        panic!("export failed: {outcome:?}");
    };
    assert_eq!(filename, "Ada_Lovelace-Jun12.png");
    assert_eq!(tier, CaptureTier::Direct);
    assert_eq!(export.phase(), ExportPhase::Restoring);

    export.advance(0.5, &mut stage, &mut io);
    assert_eq!(export.phase(), ExportPhase::AnimatingBack);
    export.advance(1.5, &mut stage, &mut io);
    assert_eq!(export.phase(), ExportPhase::Idle);
    drop(io);

    assert!((stage.camera.position - before).length() < 1e-4);
    assert!(stage.controls.auto_rotate);
    assert!(stage.floating().is_active());
    assert_eq!(sink.files().len(), 1);
    assert!(notifier.alerts().is_empty());
}

#[test]
fn hidden_model_falls_back_to_the_white_copy() {
    let mut stage = loaded_stage();
    let mut backend = CpuRenderer::new(RenderSettings::default());
    let mut sink = MemorySink::default();
    let mut notifier = RecordingNotifier::default();
    let mut export = ExportController::new();
    export.request(&mut stage, &mut notifier);

    let mut io = CaptureIo {
        backend: &mut backend,
        sink: &mut sink,
        notifier: &mut notifier,
        text: None,
        card_name: "",
        date: june12(),
    };
    export.advance(1.5, &mut stage, &mut io);
    let outcome = export.advance(0.0, &mut stage, &mut io).unwrap();
    assert!(matches!(
        outcome,
        ExportOutcome::Saved {
            tier: CaptureTier::WhiteCanvas,
            ref filename,
            ..
        } if filename == "card-Jun12.png"
    ));
}

#[test]
fn requests_while_busy_are_ignored() {
    let mut stage = loaded_stage();
    let mut notifier = RecordingNotifier::default();
    let mut export = ExportController::new();
    assert!(export.request(&mut stage, &mut notifier));
    assert!(!export.request(&mut stage, &mut notifier));
    assert!(notifier.alerts().is_empty());
}

#[test]
fn save_failure_alerts_and_still_restores() {
    let mut stage = loaded_stage();
    let before = stage.camera.position;
    let mut backend = CpuRenderer::new(RenderSettings::default());
    let mut sink = FailingSink;
    let mut notifier = RecordingNotifier::default();
    let mut export = ExportController::new();
    export.request(&mut stage, &mut notifier);

    let mut io = CaptureIo {
        backend: &mut backend,
        sink: &mut sink,
        notifier: &mut notifier,
        text: None,
        card_name: "Ada",
        date: june12(),
    };
    export.advance(1.5, &mut stage, &mut io);
    let outcome = export.advance(0.0, &mut stage, &mut io).unwrap();
    assert!(matches!(outcome, ExportOutcome::Failed { .. }));
    assert_eq!(export.last_outcome(), Some(&outcome));
    export.advance(0.5, &mut stage, &mut io);
    export.advance(1.5, &mut stage, &mut io);
    drop(io);

    assert_eq!(export.phase(), ExportPhase::Idle);
    assert!((stage.camera.position - before).length() < 1e-4);
    assert_eq!(notifier.alerts(), [DOWNLOAD_FAILED_ALERT]);
}
