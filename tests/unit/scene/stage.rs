use super::*;
use crate::ui::notify::RecordingNotifier;

fn loaded_stage() -> Stage {
    let mut stage = Stage::new(Canvas::new(800, 600), Viewport::new(1440, 900), 0.0);
    let mut notifier = RecordingNotifier::default();
    assert!(stage.load_model(Ok(ModelManifest::builtin()), &mut notifier));
    assert!(notifier.alerts().is_empty());
    stage
}

fn run(stage: &mut Stage, seconds: f64) {
    let steps = (seconds / 0.05).round() as usize;
    for _ in 0..steps {
        stage.advance(0.05);
    }
}

#[test]
fn model_failure_alerts_once_and_never_reveals() {
    let mut stage = Stage::new(Canvas::new(800, 600), Viewport::new(1440, 900), 0.0);
    let mut notifier = RecordingNotifier::default();
    let loaded = stage.load_model(
        Err(CardError::asset("model missing")),
        &mut notifier,
    );
    assert!(!loaded);
    assert_eq!(notifier.alerts(), [MODEL_LOAD_ALERT]);

    stage.finish_loading();
    run(&mut stage, 5.0);
    assert!(stage.model().is_none());
    assert!(!stage.intro_done());
    assert!(!stage.floating().is_started());
}

#[test]
fn loaded_model_waits_hidden_below_rest() {
    let stage = loaded_stage();
    let model = stage.model().unwrap();
    assert!(!model.visible);
    assert!((model.position.y + 1.75).abs() < 1e-5);
    assert!(stage.camera.position.z > 0.0);
}

#[test]
fn reveal_then_hint_then_floating() {
    let mut stage = loaded_stage();
    stage.finish_loading();
    stage.advance(0.1);
    assert!(stage.model().unwrap().visible);

    run(&mut stage, 2.0);
    assert!(stage.floating().is_active());
    assert!(stage.cue_visible());

    run(&mut stage, 4.0);
    assert!(stage.intro_done());
    assert!(!stage.cue_visible());
    assert_eq!(stage.model().unwrap().opacity, 1.0);
}

#[test]
fn orbit_pauses_floating_and_resumes_after_delay() {
    let mut stage = loaded_stage();
    stage.finish_loading();
    run(&mut stage, 6.0);
    assert!(stage.floating().is_active());

    stage.orbit_start();
    stage.orbit_drag(40.0, 0.0);
    assert!(!stage.floating().is_active());
    stage.orbit_end();
    run(&mut stage, 0.5);
    assert!(!stage.floating().is_active());
    run(&mut stage, 0.5);
    assert!(stage.floating().is_active());
    assert!(stage.camera.position.x.abs() > 0.01);
}

#[test]
fn new_interaction_cancels_pending_resume() {
    let mut stage = loaded_stage();
    stage.finish_loading();
    run(&mut stage, 6.0);
    stage.orbit_start();
    stage.orbit_end();
    run(&mut stage, 0.5);
    stage.orbit_start();
    run(&mut stage, 1.0);
    assert!(!stage.floating().is_active());
}

#[test]
fn resize_to_empty_canvas_keeps_camera() {
    let mut stage = loaded_stage();
    let before = stage.camera.position;
    assert!(!stage.resize(Canvas::new(0, 0), Viewport::new(400, 800)));
    assert_eq!(stage.camera.position, before);
    assert!(stage.resize(Canvas::new(400, 700), Viewport::new(400, 800)));
    assert!(stage.camera.position.z > before.z);
}

#[test]
fn static_texture_failures_degrade_per_mesh() {
    let mut stage = loaded_stage();
    let pixel = PreparedImage::from_premul(1, 1, vec![9, 9, 9, 255]).unwrap();
    stage.apply_static_texture(MeshName::CardBack, Ok(pixel.clone()));
    stage.apply_static_texture(MeshName::Chip, Err(CardError::asset("gone")));
    stage.apply_static_texture(MeshName::LogoMastercard, Err(CardError::asset("gone")));

    let model = stage.model().unwrap();
    let back = model.mesh(MeshName::CardBack).unwrap();
    assert!(back.material().get().desc().map.is_some());
    let chip = model.mesh(MeshName::Chip).unwrap();
    assert!(!chip.material().get().desc().is_invisible());
    let network = model.mesh(MeshName::LogoMastercard).unwrap();
    assert!(network.material().get().desc().is_invisible());
    assert!(!network.visible);
}

#[test]
fn static_textures_from_missing_files_are_logged_only() {
    let mut stage = loaded_stage();
    stage.load_static_textures(&StaticTexturePaths {
        card_back: Some(PathBuf::from("/definitely/not/here.png")),
        ..StaticTexturePaths::default()
    });
    let back = stage.model().unwrap().mesh(MeshName::CardBack).unwrap();
    assert!(back.material().get().desc().map.is_none());
}
