//! cardsmith is a headless payment-card customizer.
//!
//! A session is a [`CardCustomizer`]: it owns the [`CardStore`] both wizards read and write,
//! the accordion and tab controllers, the 3D [`Stage`] holding the card model and the export
//! pipeline. The flow for every interaction is:
//!
//! - a [`UiEvent`] mutates the store, which reports a [`ChangeSet`]
//! - the card textures are regenerated by [`update_card_model_from_state`]
//! - [`UiEvent::Tick`] advances the camera, the wizard transitions and any running export
//!
//! Frames are rasterized on the CPU with `vello_cpu` and exported as PNG.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod assets;
pub(crate) mod capture;
pub(crate) mod config;
pub(crate) mod customizer;
pub(crate) mod events;
pub(crate) mod render;
pub(crate) mod scene;
pub(crate) mod state;
pub(crate) mod texture;
pub(crate) mod ui;

pub use crate::foundation::core::{
    Affine, Canvas, Mat4, Point, Quat, Rect, Rgba8, Vec2, Vec3, Viewport,
};
pub use crate::foundation::error::{CardError, CardResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::floating::{FloatOffset, FloatingAnimation};
pub use crate::animation::tween::{Lerp, Tween, TweenSequence};
pub use crate::assets::color::{
    average_color, contrast_text_color, parse_hex, parse_hex_or, relative_luminance,
};
pub use crate::assets::decode::{
    PreparedImage, SVG_MIN_RASTER, decode_image, decode_svg, is_image_mime,
};
pub use crate::assets::logo_storage::{FileLogoStorage, LogoStorage, MemoryLogoStorage};
pub use crate::assets::object_url::{LogoSource, ObjectUrl, ObjectUrlRegistry};
pub use crate::assets::text::{DEFAULT_FONT, TextBrushRgba8, TextLayoutEngine, TextMeasure};
pub use crate::capture::download::{DirectorySink, DownloadSink, MemorySink};
pub use crate::capture::export::{
    CAMERA_MOVE_S, CaptureIo, ExportController, ExportOutcome, ExportPhase, RESTORE_DELAY_S,
};
pub use crate::capture::filename::{DEFAULT_STEM, display_name, export_filename, sanitize_name};
pub use crate::capture::tiers::{
    CaptureTier, Captured, FALLBACK_CANVAS, capture_png, direct_capture, encode_png,
    render_placeholder,
};
pub use crate::config::AppConfig;
pub use crate::customizer::CardCustomizer;
pub use crate::events::{UiEvent, read_script};
pub use crate::render::backend::{
    BackendKind, FrameRGBA, RenderBackend, RenderSettings, SceneView, create_backend,
};
pub use crate::render::cpu::CpuRenderer;
pub use crate::render::raster::{Raster, font_data, image_paint};
pub use crate::scene::camera::{FIT_MARGIN, PerspectiveCamera, Projected, zoom_factor};
pub use crate::scene::controls::{OrbitControls, OrbitStep};
pub use crate::scene::lights::{Light, LightKind, LightRig};
pub use crate::scene::loading::{LoaderPhase, LoaderSignal, LoadingProgress};
pub use crate::scene::model::{
    CARD_VISUAL_HEIGHT, CardModel, Facing, Mesh, MeshDef, MeshName, ModelManifest,
};
pub use crate::scene::resources::{
    Material, MaterialDesc, MaterialSlot, ResourceTracker, Shading, Texture,
};
pub use crate::scene::reveal::{Pose, RevealAnimation, RevealFrame, RotationHint};
pub use crate::scene::stage::{INTERACTION_RESUME_DELAY, Stage, StaticTexturePaths};
pub use crate::state::active::{ActiveDesign, DesignColors};
pub use crate::state::card::{CardState, ColorSlot, Design, GradientType, LogoPosition, Tab};
pub use crate::state::logo::{LogoFile, LogoRef};
pub use crate::state::store::{CardStore, ChangeSet, StateChange, Subscriber};
pub use crate::state::templates::{Preset, Template, first_template, template, templates};
pub use crate::texture::background::{
    BACKGROUND_HEIGHT, BACKGROUND_WIDTH, BackgroundFill, duotone_split, gradient_color,
    gradient_t, render_background, render_background_sized,
};
pub use crate::texture::logo::{LOGO_CENTER_NUDGE_X, LOGO_TEXTURE_SIZE, letterbox, render_logo};
pub use crate::texture::name::{
    NAME_BUMP_SCALE, NAME_PADDING, NAME_TEXTURE_SIZE, NameRenderer, fit_font_size, name_tint,
};
pub use crate::texture::synth::{
    DECAL_RENDER_ORDER, SynthReport, logo_mesh, update_card_model_from_state,
};
pub use crate::ui::accordion::{Accordion, ButtonState, Navigation, StepDef, StepView};
pub use crate::ui::color_binding::{ColorBinding, ColorMarkers};
pub use crate::ui::notify::{
    DOWNLOAD_FAILED_ALERT, LogNotifier, MODEL_LOAD_ALERT, Notifier, RecordingNotifier,
    SCENE_NOT_LOADED_ALERT,
};
pub use crate::ui::tabs::{
    FormHost, MaskGeometry, StepElement, StepElementView, StepMode, TabBounds, TabController,
    TabSwitch,
};
pub use crate::ui::view::{
    ColorIndicators, CuePlacement, CustomizeView, LogoPreview, TemplatesView, WrapperVisibility,
    place_rotation_cue,
};
