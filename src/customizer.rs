use chrono::NaiveDate;

use crate::assets::decode::PreparedImage;
use crate::assets::logo_storage::{FileLogoStorage, LogoStorage, MemoryLogoStorage};
use crate::capture::download::{DirectorySink, DownloadSink};
use crate::capture::export::{
    CAMERA_MOVE_S, CaptureIo, ExportController, ExportOutcome, ExportPhase, RESTORE_DELAY_S,
};
use crate::config::AppConfig;
use crate::events::UiEvent;
use crate::foundation::error::CardResult;
use crate::render::backend::{
    BackendKind, FrameRGBA, RenderBackend, RenderSettings, SceneView, create_backend,
};
use crate::scene::model::{MeshName, ModelManifest};
use crate::scene::stage::Stage;
use crate::state::card::{CardState, Tab};
use crate::state::logo::LogoFile;
use crate::state::store::{CardStore, ChangeSet};
use crate::state::templates::first_template;
use crate::texture::name::NameRenderer;
use crate::texture::synth::{SynthReport, update_card_model_from_state};
use crate::ui::accordion::{Accordion, ButtonState, Navigation};
use crate::ui::color_binding::ColorBinding;
use crate::ui::notify::{LogNotifier, Notifier};
use crate::ui::tabs::{TabController, TabSwitch};
use crate::ui::view::{CustomizeView, TemplatesView};

const DEFAULT_FRAME_S: f64 = 1.0 / 60.0;
const CUSTOMIZE_COLORS_STEP: usize = 2;

/// One customizer session: the store, both wizards, the 3D stage and the export pipeline.
///
/// Every interaction goes through [`CardCustomizer::dispatch`]; time only moves on
/// [`UiEvent::Tick`] (or [`CardCustomizer::tick`]).
pub struct CardCustomizer<S = DirectorySink, N = LogNotifier> {
    store: CardStore,
    customize: Accordion,
    templates: Accordion,
    tabs: TabController,
    stage: Stage,
    export: ExportController,
    backend: Box<dyn RenderBackend>,
    names: Option<NameRenderer>,
    sink: S,
    notifier: N,
    today: NaiveDate,
    last_synth: Option<SynthReport>,
}

impl<S: std::fmt::Debug, N: std::fmt::Debug> std::fmt::Debug for CardCustomizer<S, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardCustomizer")
            .field("store", &self.store)
            .field("tab", &self.tabs.active())
            .field("export", &self.export.phase())
            .field("sink", &self.sink)
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}

impl CardCustomizer {
    /// Session writing exports to the configured downloads directory and logging alerts.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config,
            DirectorySink::new(config.downloads_dir.clone()),
            LogNotifier,
        )
    }
}

impl<S: DownloadSink, N: Notifier> CardCustomizer<S, N> {
    /// Load the model and assets named by `config` and open step 1 of both wizards.
    ///
    /// Asset failures degrade: a missing model raises one alert through `notifier`, a missing
    /// font leaves the name mesh hidden.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn new(config: &AppConfig, sink: S, mut notifier: N) -> Self {
        let storage: Box<dyn LogoStorage> = match &config.logo_storage {
            Some(path) => Box::new(FileLogoStorage::new(path.clone())),
            None => Box::new(MemoryLogoStorage::default()),
        };
        let store = CardStore::new(storage);

        let mut stage = Stage::new(config.canvas, config.viewport, config.min_loading_s);
        let manifest = match &config.model {
            Some(path) => ModelManifest::from_path(path),
            None => Ok(ModelManifest::builtin()),
        };
        if stage.load_model(manifest, &mut notifier) {
            stage.load_static_textures(&config.textures);
            stage.finish_loading();
        }

        let names = load_name_renderer(config.name_font.as_deref());

        let mut customize = Accordion::new(config.customize_steps.clone());
        let mut templates = Accordion::new(config.template_steps.clone());
        customize.layout_ready();
        templates.layout_ready();
        let tabs = TabController::new(store.state().tab, config.step_elements.clone());

        let mut session = Self {
            store,
            customize,
            templates,
            tabs,
            stage,
            export: ExportController::new(),
            backend: create_backend(BackendKind::Cpu, &RenderSettings::default()),
            names,
            sink,
            notifier,
            today: chrono::Local::now().date_naive(),
            last_synth: None,
        };
        session.store.restore_logo_from_storage();
        session.refresh_labels();
        session.update_model();
        session
    }

    /// Stamp exports with `date` instead of today.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.today = date;
        self
    }

    /// Apply one event. Returns the export outcome on the tick that captured.
    pub fn dispatch(&mut self, event: UiEvent) -> Option<ExportOutcome> {
        tracing::trace!(?event, "dispatch");
        let changes = match event {
            UiEvent::TabClicked { tab } => self.switch_tab(tab),
            UiEvent::DesignClicked { design } => self.store.select_design(design),
            UiEvent::GradientTypeClicked { kind } => self.store.select_gradient_type(kind),
            UiEvent::TemplateClicked { id } => self.store.select_template(&id),
            UiEvent::ColorChanged { slot, value } => {
                ColorBinding::new(slot).apply(&mut self.store, &value)
            }
            UiEvent::ColorInput { markers, value } => match ColorBinding::from_markers(&markers) {
                Ok(binding) => binding.apply(&mut self.store, &value),
                Err(err) => {
                    tracing::warn!(error = %err, "color input not bound to a field");
                    ChangeSet::default()
                }
            },
            UiEvent::NameInput { value } => self.store.set_name(&value),
            UiEvent::LogoUploaded { path } => match LogoFile::from_path(&path) {
                Ok(file) => self.store.upload_logo(file),
                Err(err) => {
                    tracing::warn!(error = %err, "logo upload unreadable");
                    self.store.clear_logo()
                }
            },
            UiEvent::LogoRemoved => self.store.clear_logo(),
            UiEvent::LogoPositionChanged { position } => self.store.set_logo_position(position),
            UiEvent::StepHeaderClicked { step } => {
                self.active_accordion_mut().toggle(step);
                ChangeSet::default()
            }
            UiEvent::NextClicked => {
                if self.active_accordion_mut().next() == Navigation::Export {
                    self.request_export();
                }
                ChangeSet::default()
            }
            UiEvent::BackClicked => {
                self.active_accordion_mut().back();
                ChangeSet::default()
            }
            UiEvent::Resized {
                canvas,
                viewport,
                customize_tab,
                templates_tab,
            } => {
                self.stage.resize(canvas, viewport);
                if let (Some(c), Some(t)) = (customize_tab, templates_tab) {
                    self.tabs.relayout(c, t);
                }
                ChangeSet::default()
            }
            UiEvent::OrbitStart | UiEvent::OrbitDrag { .. } | UiEvent::OrbitEnd
                if self.export.is_busy() =>
            {
                tracing::debug!("orbit input ignored during export");
                ChangeSet::default()
            }
            UiEvent::OrbitStart => {
                self.stage.orbit_start();
                ChangeSet::default()
            }
            UiEvent::OrbitDrag { dx, dy } => {
                self.stage.orbit_drag(dx, dy);
                ChangeSet::default()
            }
            UiEvent::OrbitEnd => {
                self.stage.orbit_end();
                ChangeSet::default()
            }
            UiEvent::Tick { dt } => return self.tick(dt),
        };
        self.on_change(&changes);
        None
    }

    /// Advance every animation by `dt` seconds.
    pub fn tick(&mut self, dt: f64) -> Option<ExportOutcome> {
        self.stage.advance(dt);
        self.customize.advance(dt);
        self.templates.advance(dt);
        if !self.export.is_busy() {
            return None;
        }
        let mut io = CaptureIo {
            backend: self.backend.as_mut(),
            sink: &mut self.sink,
            notifier: &mut self.notifier,
            text: self.names.as_mut(),
            card_name: &self.store.state().name,
            date: self.today,
        };
        self.export.advance(dt, &mut self.stage, &mut io)
    }

    /// Tick for `seconds` in `frame_dt` steps, collecting export outcomes.
    pub fn settle(&mut self, seconds: f64, frame_dt: f64) -> Vec<ExportOutcome> {
        let dt = frame_step(frame_dt);
        let steps = (seconds.max(0.0) / dt).ceil() as usize;
        (0..steps).filter_map(|_| self.tick(dt)).collect()
    }

    /// Start an export, as "Download card" does. False when busy or no model is loaded.
    pub fn request_export(&mut self) -> bool {
        self.export.request(&mut self.stage, &mut self.notifier)
    }

    /// Request an export and tick until the camera is back. `None` when it could not start.
    pub fn run_export(&mut self, frame_dt: f64) -> Option<ExportOutcome> {
        if !self.request_export() {
            return None;
        }
        let dt = frame_step(frame_dt);
        let budget = ((2.0 * CAMERA_MOVE_S + RESTORE_DELAY_S) / dt).ceil() as usize + 4;
        let mut outcome = None;
        for _ in 0..budget {
            if let Some(o) = self.tick(dt) {
                outcome = Some(o);
            }
            if !self.export.is_busy() {
                break;
            }
        }
        outcome
    }

    /// Render the current pose without saving it.
    pub fn render_preview(&mut self) -> CardResult<FrameRGBA> {
        self.backend.render_scene(&SceneView {
            camera: &self.stage.camera,
            model: self.stage.model(),
            lights: &self.stage.lights,
            canvas: self.stage.canvas(),
        })
    }

    /// Synthesized textures currently shown on the card (background, name and logo).
    pub fn card_textures(&self) -> Vec<(MeshName, &PreparedImage)> {
        let Some(model) = self.stage.model() else {
            return Vec::new();
        };
        [
            MeshName::CardBase,
            MeshName::CardName,
            MeshName::LogoCenter,
            MeshName::LogoTopRight,
            MeshName::LogoRight,
        ]
        .into_iter()
        .filter_map(|name| {
            let mesh = model.mesh(name).filter(|m| m.visible)?;
            let map = mesh.material().get().desc().map.as_ref()?;
            Some((name, map.image()))
        })
        .collect()
    }

    /// Current card state.
    pub fn state(&self) -> &CardState {
        self.store.state()
    }

    /// The state store.
    pub fn store(&self) -> &CardStore {
        &self.store
    }

    /// The 3D stage.
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Mutable 3D stage.
    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    /// Wizard of `tab`.
    pub fn accordion(&self, tab: Tab) -> &Accordion {
        match tab {
            Tab::Customize => &self.customize,
            Tab::Templates => &self.templates,
        }
    }

    /// Wizard of the active tab.
    pub fn active_accordion(&self) -> &Accordion {
        self.accordion(self.tabs.active())
    }

    /// Next/Back state of the active wizard.
    pub fn buttons(&self) -> ButtonState {
        self.active_accordion().buttons()
    }

    /// Pane, form and step-counter state of the active tab.
    pub fn tabs(&self) -> TabSwitch {
        self.tabs.render()
    }

    /// Customize pane reflection.
    pub fn customize_view(&self) -> CustomizeView {
        CustomizeView::reflect(
            self.store.state(),
            self.customize.is_open(CUSTOMIZE_COLORS_STEP),
        )
    }

    /// Templates pane reflection.
    pub fn templates_view(&self) -> TemplatesView {
        TemplatesView::reflect(self.store.state())
    }

    /// Export phase.
    pub fn export_phase(&self) -> ExportPhase {
        self.export.phase()
    }

    /// Outcome of the most recent export, if any ran.
    pub fn last_export(&self) -> Option<&ExportOutcome> {
        self.export.last_outcome()
    }

    /// Report of the latest model update.
    pub fn last_synth(&self) -> Option<&SynthReport> {
        self.last_synth.as_ref()
    }

    /// Download sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Alert channel.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    fn active_accordion_mut(&mut self) -> &mut Accordion {
        match self.tabs.active() {
            Tab::Customize => &mut self.customize,
            Tab::Templates => &mut self.templates,
        }
    }

    fn switch_tab(&mut self, tab: Tab) -> ChangeSet {
        let mut changes = self.store.set_tab(tab);
        if tab == Tab::Templates && self.store.state().selected_template_id.is_none() {
            changes.merge(self.store.select_template(first_template().id));
        }
        self.tabs.switch(tab);
        self.active_accordion_mut().open_step(1);
        changes
    }

    fn on_change(&mut self, changes: &ChangeSet) {
        if changes.is_empty() {
            return;
        }
        self.refresh_labels();
        self.update_model();
    }

    fn refresh_labels(&mut self) {
        let design = self.store.state().custom_design.label();
        self.customize.set_header_label(1, Some(design.to_string()));
        let template = self.templates_view().template_label;
        self.templates
            .set_header_label(1, template.map(str::to_string));
    }

    fn update_model(&mut self) {
        let tracker = self.stage.tracker().clone();
        let active = self.store.active_design();
        let report = update_card_model_from_state(
            self.stage.model_mut(),
            &tracker,
            &active,
            self.store.urls(),
            self.names.as_mut(),
        );
        if report.is_some() {
            self.last_synth = report;
        }
    }
}

fn load_name_renderer(path: Option<&std::path::Path>) -> Option<NameRenderer> {
    if let Some(path) = path {
        match NameRenderer::from_path(path) {
            Ok(r) => return Some(r),
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "name font unavailable; using the bundled font"
                );
            }
        }
    }
    match NameRenderer::with_default_font() {
        Ok(r) => Some(r),
        Err(err) => {
            tracing::error!(error = %err, "bundled name font failed to load");
            None
        }
    }
}

fn frame_step(frame_dt: f64) -> f64 {
    if frame_dt.is_finite() && frame_dt > 0.0 {
        frame_dt
    } else {
        DEFAULT_FRAME_S
    }
}

#[cfg(test)]
#[path = "../tests/unit/customizer.rs"]
mod tests;
