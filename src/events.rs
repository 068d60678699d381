use std::io::Read;
use std::path::PathBuf;

use crate::foundation::core::{Canvas, Viewport};
use crate::foundation::error::{CardError, CardResult};
use crate::state::card::{ColorSlot, Design, GradientType, LogoPosition, Tab};
use crate::ui::color_binding::ColorMarkers;
use crate::ui::tabs::TabBounds;

/// One user interaction or frame tick, as a scripted run or a host shell reports it.
///
/// Serialized with a `"type"` tag, e.g. `{"type": "design-clicked", "design": "duotone"}`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UiEvent {
    /// A tab link was clicked.
    TabClicked {
        /// Tab to activate.
        tab: Tab,
    },
    /// A design option was clicked.
    DesignClicked {
        /// Chosen design.
        design: Design,
    },
    /// A gradient type option was clicked.
    GradientTypeClicked {
        /// Chosen geometry.
        kind: GradientType,
    },
    /// A template card was clicked.
    TemplateClicked {
        /// Template id, e.g. `"02"`.
        id: String,
    },
    /// A color control produced a value.
    ColorChanged {
        /// Bound field.
        slot: ColorSlot,
        /// Picked value, stored verbatim.
        value: String,
    },
    /// A color control identified by its markup markers produced a value.
    ColorInput {
        /// Marker attributes of the control's ancestors.
        markers: ColorMarkers,
        /// Picked value, stored verbatim.
        value: String,
    },
    /// The name input changed.
    NameInput {
        /// Full input value.
        value: String,
    },
    /// A logo file was chosen.
    LogoUploaded {
        /// File to read.
        path: PathBuf,
    },
    /// The logo remove control was clicked.
    LogoRemoved,
    /// A logo position option was clicked.
    LogoPositionChanged {
        /// Chosen position.
        position: LogoPosition,
    },
    /// A step header of the active wizard was clicked.
    StepHeaderClicked {
        /// 1-based step.
        step: usize,
    },
    /// Next (or "Download card") was clicked.
    NextClicked,
    /// Back was clicked.
    BackClicked,
    /// The window or canvas changed size.
    Resized {
        /// New canvas size.
        canvas: Canvas,
        /// New viewport size.
        viewport: Viewport,
        /// Re-measured customize tab link.
        #[serde(default)]
        customize_tab: Option<TabBounds>,
        /// Re-measured templates tab link.
        #[serde(default)]
        templates_tab: Option<TabBounds>,
    },
    /// Pointer pressed on the canvas.
    OrbitStart,
    /// Pointer dragged on the canvas.
    OrbitDrag {
        /// Horizontal movement in pixels.
        dx: f32,
        /// Vertical movement in pixels.
        dy: f32,
    },
    /// Pointer released.
    OrbitEnd,
    /// Frame clock.
    Tick {
        /// Seconds since the previous tick.
        dt: f64,
    },
}

/// Parse a JSON array of events.
pub fn read_script(reader: impl Read) -> CardResult<Vec<UiEvent>> {
    serde_json::from_reader(reader).map_err(|e| CardError::serde(format!("invalid event script: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/events.rs"]
mod tests;
