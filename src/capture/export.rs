use chrono::NaiveDate;

use crate::animation::ease::Ease;
use crate::animation::tween::Tween;
use crate::capture::download::DownloadSink;
use crate::capture::filename::export_filename;
use crate::capture::tiers::{CaptureTier, capture_png};
use crate::foundation::core::{Quat, Vec3};
use crate::foundation::error::CardResult;
use crate::render::backend::{RenderBackend, SceneView};
use crate::scene::stage::Stage;
use crate::texture::name::NameRenderer;
use crate::ui::notify::{DOWNLOAD_FAILED_ALERT, Notifier, SCENE_NOT_LOADED_ALERT};

/// Seconds of each camera move, to the front and back.
pub const CAMERA_MOVE_S: f64 = 1.5;
/// Seconds between saving and moving the camera back.
pub const RESTORE_DELAY_S: f64 = 0.5;

/// Observable export phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportPhase {
    /// No export running.
    Idle,
    /// Camera travelling to the front view.
    AnimatingToFront,
    /// Front view reached; the next tick renders and saves.
    Capturing,
    /// Export finished; waiting before the camera returns.
    Restoring,
    /// Camera travelling back to where the user left it.
    AnimatingBack,
}

/// Result of one export.
#[derive(Clone, Debug, PartialEq)]
pub enum ExportOutcome {
    /// A PNG was handed to the download sink.
    Saved {
        /// File name used.
        filename: String,
        /// Capture path that produced it.
        tier: CaptureTier,
        /// Encoded size.
        bytes: usize,
    },
    /// Every capture path failed; the user was alerted.
    Failed {
        /// Last error.
        reason: String,
    },
}

/// Collaborators used while capturing.
pub struct CaptureIo<'a> {
    /// Renderer for the export frame.
    pub backend: &'a mut dyn RenderBackend,
    /// Where the PNG goes.
    pub sink: &'a mut dyn DownloadSink,
    /// User-facing alerts.
    pub notifier: &'a mut dyn Notifier,
    /// Font for the placeholder text.
    pub text: Option<&'a mut NameRenderer>,
    /// Cardholder name, used for the file name and placeholder.
    pub card_name: &'a str,
    /// Date stamped into the file name.
    pub date: NaiveDate,
}

#[derive(Clone, Debug, PartialEq)]
struct CameraSnapshot {
    position: Vec3,
    orientation: Quat,
    target: Vec3,
    auto_rotate: bool,
    floating_was_active: bool,
}

#[derive(Clone, Debug, PartialEq)]
struct CameraMove {
    position: Tween<Vec3>,
    orientation: Tween<Quat>,
    target: Tween<Vec3>,
    elapsed: f64,
}

impl CameraMove {
    fn new(stage: &Stage, position: Vec3, orientation: Quat, target: Vec3) -> Self {
        Self {
            position: Tween::new(stage.camera.position, position, CAMERA_MOVE_S, Ease::InOutQuad),
            orientation: Tween::new(
                stage.camera.orientation,
                orientation,
                CAMERA_MOVE_S,
                Ease::InOutQuad,
            ),
            target: Tween::new(stage.controls.target, target, CAMERA_MOVE_S, Ease::InOutQuad),
            elapsed: 0.0,
        }
    }

    /// Step and apply; true once the move is complete.
    fn advance(&mut self, dt: f64, stage: &mut Stage) -> bool {
        self.elapsed += dt;
        stage.camera.position = self.position.sample(self.elapsed);
        stage.camera.orientation = self.orientation.sample(self.elapsed);
        stage.controls.target = self.target.sample(self.elapsed);
        self.position.is_finished(self.elapsed)
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Phase {
    Idle,
    ToFront { motion: CameraMove, distance: f32 },
    Capturing { distance: f32 },
    Restoring { left: f64 },
    Back(CameraMove),
}

/// Drives "download preview": move the camera to a straight front view, capture, save and
/// put the camera back.
#[derive(Debug)]
pub struct ExportController {
    phase: Phase,
    snapshot: Option<CameraSnapshot>,
    last: Option<ExportOutcome>,
}

impl Default for ExportController {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            snapshot: None,
            last: None,
        }
    }
}

impl ExportController {
    /// Idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> ExportPhase {
        match self.phase {
            Phase::Idle => ExportPhase::Idle,
            Phase::ToFront { .. } => ExportPhase::AnimatingToFront,
            Phase::Capturing { .. } => ExportPhase::Capturing,
            Phase::Restoring { .. } => ExportPhase::Restoring,
            Phase::Back(_) => ExportPhase::AnimatingBack,
        }
    }

    /// True while an export is in progress.
    pub fn is_busy(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Outcome of the most recent capture.
    pub fn last_outcome(&self) -> Option<&ExportOutcome> {
        self.last.as_ref()
    }

    /// Start an export. Ignored while one is running; alerts when no model is loaded.
    pub fn request(&mut self, stage: &mut Stage, notifier: &mut dyn Notifier) -> bool {
        if self.is_busy() {
            tracing::debug!(phase = ?self.phase(), "export already running; request ignored");
            return false;
        }
        if stage.model().is_none() {
            tracing::error!("export requested before the scene loaded");
            notifier.alert(SCENE_NOT_LOADED_ALERT);
            return false;
        }

        let floating_was_active = stage.floating().is_active();
        self.snapshot = Some(CameraSnapshot {
            position: stage.camera.position,
            orientation: stage.camera.orientation,
            target: stage.controls.target,
            auto_rotate: stage.controls.auto_rotate,
            floating_was_active,
        });
        if floating_was_active {
            stage.floating_mut().pause();
        }
        stage.controls.auto_rotate = false;
        stage.controls.stop();
        stage.set_camera_locked(true);

        let distance = stage.camera.position.length();
        let motion = CameraMove::new(
            stage,
            Vec3::new(0.0, 0.0, distance),
            Quat::IDENTITY,
            Vec3::ZERO,
        );
        tracing::debug!(distance, "export started");
        self.phase = Phase::ToFront { motion, distance };
        true
    }

    /// Advance by `dt` seconds. Returns the outcome on the tick that captures.
    pub fn advance(
        &mut self,
        dt: f64,
        stage: &mut Stage,
        io: &mut CaptureIo<'_>,
    ) -> Option<ExportOutcome> {
        match &mut self.phase {
            Phase::Idle => None,
            Phase::ToFront { motion, distance } => {
                let distance = *distance;
                if motion.advance(dt, stage) {
                    self.phase = Phase::Capturing { distance };
                }
                None
            }
            Phase::Capturing { distance } => {
                let distance = *distance;
                let outcome = capture(stage, distance, io);
                self.phase = Phase::Restoring {
                    left: RESTORE_DELAY_S,
                };
                self.last = Some(outcome.clone());
                Some(outcome)
            }
            Phase::Restoring { left } => {
                *left -= dt;
                if *left <= 0.0 {
                    let back = match &self.snapshot {
                        Some(s) => CameraMove::new(stage, s.position, s.orientation, s.target),
                        None => CameraMove::new(
                            stage,
                            stage.camera.position,
                            stage.camera.orientation,
                            stage.controls.target,
                        ),
                    };
                    self.phase = Phase::Back(back);
                }
                None
            }
            Phase::Back(motion) => {
                if motion.advance(dt, stage) {
                    self.finish(stage);
                }
                None
            }
        }
    }

    fn finish(&mut self, stage: &mut Stage) {
        if let Some(s) = self.snapshot.take() {
            stage.camera.position = s.position;
            stage.camera.orientation = s.orientation;
            stage.controls.target = s.target;
            stage.controls.auto_rotate = s.auto_rotate;
            if s.floating_was_active {
                stage.floating_mut().resume();
            }
        }
        stage.set_camera_locked(false);
        self.phase = Phase::Idle;
        tracing::debug!("export finished; camera restored");
    }
}

#[tracing::instrument(level = "debug", skip(stage, io))]
fn capture(stage: &mut Stage, distance: f32, io: &mut CaptureIo<'_>) -> ExportOutcome {
    stage.camera.position = Vec3::new(0.0, 0.0, distance);
    stage.camera.orientation = Quat::IDENTITY;
    stage.camera.look_at(Vec3::ZERO);
    stage.controls.target = Vec3::ZERO;

    match save(stage, io) {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::error!(error = %err, "all capture methods failed");
            io.notifier.alert(DOWNLOAD_FAILED_ALERT);
            ExportOutcome::Failed {
                reason: err.to_string(),
            }
        }
    }
}

fn save(stage: &Stage, io: &mut CaptureIo<'_>) -> CardResult<ExportOutcome> {
    let frame = io.backend.render_scene(&SceneView {
        camera: &stage.camera,
        model: stage.model(),
        lights: &stage.lights,
        canvas: stage.canvas(),
    });
    let captured = capture_png(&frame, stage.canvas(), io.card_name, io.text.as_deref_mut())?;
    let filename = export_filename(io.card_name, io.date);
    io.sink.save(&filename, &captured.png)?;
    Ok(ExportOutcome::Saved {
        filename,
        tier: captured.tier,
        bytes: captured.png.len(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/capture/export.rs"]
mod tests;
