use std::path::{Path, PathBuf};

use crate::animation::floating::FloatingAnimation;
use crate::assets::decode::{PreparedImage, decode_image};
use crate::foundation::core::{Canvas, Vec3, Viewport};
use crate::foundation::error::{CardError, CardResult};
use crate::scene::camera::PerspectiveCamera;
use crate::scene::controls::OrbitControls;
use crate::scene::lights::LightRig;
use crate::scene::loading::{LoaderSignal, LoadingProgress};
use crate::scene::model::{CardModel, MeshName, ModelManifest};
use crate::scene::resources::ResourceTracker;
use crate::scene::reveal::{Pose, RevealAnimation, RotationHint};
use crate::ui::notify::{MODEL_LOAD_ALERT, Notifier};

/// Seconds between the end of an orbit drag and the floating motion resuming.
pub const INTERACTION_RESUME_DELAY: f64 = 0.8;

#[derive(Clone, Debug, PartialEq)]
enum Intro {
    Waiting,
    Revealing(RevealAnimation),
    Hinting(RotationHint),
    Done,
    Aborted,
}

/// Paths of the textures applied once after the model loads.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StaticTexturePaths {
    /// Card back artwork.
    pub card_back: Option<PathBuf>,
    /// Chip surface.
    pub chip: Option<PathBuf>,
    /// Payment network logo.
    pub network_logo: Option<PathBuf>,
}

/// The 3D viewer: camera, controls, lights, the loaded model and its intro animations.
#[derive(Debug)]
pub struct Stage {
    canvas: Canvas,
    viewport: Viewport,
    /// Viewer camera.
    pub camera: PerspectiveCamera,
    /// Orbit controls driving the camera.
    pub controls: OrbitControls,
    /// Scene lights.
    pub lights: LightRig,
    model: Option<CardModel>,
    tracker: ResourceTracker,
    loader: LoadingProgress,
    intro: Intro,
    floating: FloatingAnimation,
    rest: Pose,
    base: Pose,
    camera_locked: bool,
}

impl Stage {
    /// Empty stage for a canvas; the loader starts right away.
    pub fn new(canvas: Canvas, viewport: Viewport, min_loading_s: f64) -> Self {
        Self {
            canvas,
            viewport,
            camera: PerspectiveCamera::for_canvas(canvas),
            controls: OrbitControls::default(),
            lights: LightRig::default(),
            model: None,
            tracker: ResourceTracker::new(),
            loader: LoadingProgress::new(min_loading_s),
            intro: Intro::Waiting,
            floating: FloatingAnimation::default(),
            rest: Pose::default(),
            base: Pose::default(),
            camera_locked: false,
        }
    }

    /// Load the card model, fit the camera and prepare the reveal.
    ///
    /// On failure the user is alerted once, the loader is dropped and the reveal never runs.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn load_model(
        &mut self,
        manifest: CardResult<ModelManifest>,
        notifier: &mut dyn Notifier,
    ) -> bool {
        let model = manifest.and_then(|m| CardModel::from_manifest(&m, &self.tracker));
        let mut model = match model {
            Ok(model) => model,
            Err(err) => {
                tracing::error!(error = %err, "card model failed to load");
                self.loader.fail();
                self.intro = Intro::Aborted;
                notifier.alert(MODEL_LOAD_ALERT);
                return false;
            }
        };

        self.camera.fit_to(model.scaled_size());
        self.controls.target = Vec3::ZERO;
        self.controls.tick(&mut self.camera);

        self.rest = Pose {
            position: model.position,
            rotation: model.rotation,
        };
        self.base = RevealAnimation::start_pose(self.rest);
        model.position = self.base.position;
        model.rotation = self.base.rotation;
        model.visible = false;

        tracing::debug!(
            scale = model.scale(),
            meshes = model.meshes().len(),
            "card model loaded"
        );
        self.model = Some(model);
        self.update_camera_zoom();
        true
    }

    /// Apply the static textures; failures are logged and degrade per mesh.
    pub fn load_static_textures(&mut self, paths: &StaticTexturePaths) {
        let entries = [
            (MeshName::CardBack, paths.card_back.as_deref()),
            (MeshName::Chip, paths.chip.as_deref()),
            (MeshName::LogoMastercard, paths.network_logo.as_deref()),
        ];
        for (mesh, path) in entries {
            if let Some(path) = path {
                let image = read_image(path);
                self.apply_static_texture(mesh, image);
            }
        }
    }

    /// Apply one static texture result to `mesh`.
    pub fn apply_static_texture(&mut self, mesh: MeshName, image: CardResult<PreparedImage>) {
        let tracker = self.tracker.clone();
        let Some(target) = self.model.as_mut().and_then(|m| m.mesh_mut(mesh)) else {
            return;
        };
        match image {
            Ok(image) => {
                let texture = tracker.texture(mesh.as_str(), image);
                target.material_mut().replace_map(Some(texture));
            }
            Err(err) => {
                tracing::warn!(%mesh, error = %err, "static texture failed to load");
                if mesh == MeshName::LogoMastercard {
                    target.material_mut().replace(tracker.hidden_material());
                }
            }
        }
        if mesh == MeshName::LogoMastercard {
            target.visible = false;
        }
    }

    /// Signal that every asset finished loading.
    pub fn finish_loading(&mut self) {
        let signals = self.loader.mark_loaded();
        self.handle_loader(signals);
    }

    fn handle_loader(&mut self, signals: Vec<LoaderSignal>) {
        for signal in signals {
            if signal == LoaderSignal::RevealDue {
                self.start_reveal();
            }
        }
    }

    fn start_reveal(&mut self) {
        if !matches!(self.intro, Intro::Waiting) {
            return;
        }
        let Some(model) = self.model.as_mut() else {
            return;
        };
        model.visible = true;
        model.opacity = 0.0;
        self.intro = Intro::Revealing(RevealAnimation::new(self.rest));
    }

    /// Loaded model, if any.
    pub fn model(&self) -> Option<&CardModel> {
        self.model.as_ref()
    }

    /// Mutable loaded model.
    pub fn model_mut(&mut self) -> Option<&mut CardModel> {
        self.model.as_mut()
    }

    /// Resource accounting shared by every texture and material of the stage.
    pub fn tracker(&self) -> &ResourceTracker {
        &self.tracker
    }

    /// Loader state.
    pub fn loader(&self) -> &LoadingProgress {
        &self.loader
    }

    /// Idle floating motion.
    pub fn floating(&self) -> &FloatingAnimation {
        &self.floating
    }

    /// Mutable idle floating motion.
    pub fn floating_mut(&mut self) -> &mut FloatingAnimation {
        &mut self.floating
    }

    /// Canvas size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Viewport size.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// True while the rotation cue is shown.
    pub fn cue_visible(&self) -> bool {
        matches!(&self.intro, Intro::Hinting(hint) if hint.cue_visible())
    }

    /// True once the reveal and the hint completed.
    pub fn intro_done(&self) -> bool {
        matches!(self.intro, Intro::Done)
    }

    /// Hand the camera to an external animation; orbit updates pause while locked.
    pub fn set_camera_locked(&mut self, locked: bool) {
        self.camera_locked = locked;
    }

    /// Resize the canvas and re-apply the zoom. Returns whether the camera changed.
    pub fn resize(&mut self, canvas: Canvas, viewport: Viewport) -> bool {
        self.canvas = canvas;
        self.viewport = viewport;
        self.update_camera_zoom()
    }

    fn update_camera_zoom(&mut self) -> bool {
        let Some(model) = self.model.as_ref() else {
            return false;
        };
        let changed = self
            .camera
            .update_zoom(model.scaled_size(), self.canvas, self.viewport);
        if changed {
            self.controls.tick(&mut self.camera);
        }
        changed
    }

    /// Orbit drag started: floating pauses and any pending resume is dropped.
    pub fn orbit_start(&mut self) {
        self.controls.begin();
        self.floating.pause();
    }

    /// Orbit drag moved by `(dx, dy)` pixels.
    pub fn orbit_drag(&mut self, dx: f32, dy: f32) {
        self.controls.drag(dx, dy, self.canvas.height);
    }

    /// Orbit drag ended: floating resumes after [`INTERACTION_RESUME_DELAY`].
    pub fn orbit_end(&mut self) {
        self.controls.end();
        self.floating.schedule_resume(INTERACTION_RESUME_DELAY);
    }

    /// Advance loader, intro, floating and controls by `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        let signals = self.loader.advance(dt);
        self.handle_loader(signals);

        match &mut self.intro {
            Intro::Revealing(reveal) => {
                let frame = reveal.advance(dt);
                self.base = frame.pose;
                if let Some(model) = self.model.as_mut() {
                    model.opacity = frame.opacity;
                }
                if frame.finished {
                    self.floating.start();
                    self.intro = Intro::Hinting(RotationHint::new(self.rest.rotation.y));
                }
            }
            Intro::Hinting(hint) => {
                self.base.rotation.y = hint.advance(dt);
                if hint.is_finished() {
                    self.base.rotation.y = self.rest.rotation.y;
                    self.intro = Intro::Done;
                }
            }
            Intro::Waiting | Intro::Done | Intro::Aborted => {}
        }

        self.floating.advance(dt);
        let offset = self.floating.offset();
        if let Some(model) = self.model.as_mut() {
            model.position = self.base.position + Vec3::new(0.0, offset.y, 0.0);
            model.rotation = self.base.rotation + Vec3::new(offset.rot_x, 0.0, offset.rot_z);
        }

        if !self.camera_locked {
            self.controls.tick(&mut self.camera);
        }
    }
}

fn read_image(path: &Path) -> CardResult<PreparedImage> {
    let bytes = std::fs::read(path).map_err(|e| {
        CardError::asset(format!("failed to read texture '{}': {e}", path.display()))
    })?;
    decode_image(&bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/stage.rs"]
mod tests;
