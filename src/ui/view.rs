use crate::foundation::core::Viewport;
use crate::state::active::DesignColors;
use crate::state::card::{CardState, ColorSlot, Design, GradientType, LogoPosition};
use crate::state::templates::template;

/// Which design wrapper is displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WrapperVisibility {
    /// Classic color wrapper.
    pub classic: bool,
    /// Duotone color wrapper.
    pub duotone: bool,
    /// Gradient color wrapper.
    pub gradient: bool,
}

impl WrapperVisibility {
    fn for_design(design: Design) -> Self {
        Self {
            classic: design == Design::Classic,
            duotone: design == Design::Duotone,
            gradient: design == Design::Gradient,
        }
    }

    /// Number of visible wrappers.
    pub fn visible_count(self) -> usize {
        [self.classic, self.duotone, self.gradient]
            .into_iter()
            .filter(|v| *v)
            .count()
    }
}

/// Logo area of the shared form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogoPreview {
    /// Empty upload box.
    Upload,
    /// Preview image with a remove control.
    Preview {
        /// Image source.
        url: String,
    },
}

/// Color swatches next to the "Adjust colors" header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorIndicators {
    /// Shown only while the colors step is collapsed.
    pub visible: bool,
    /// First swatch.
    pub one: String,
    /// Second swatch; hidden for classic.
    pub two: Option<String>,
}

/// Everything the customize pane reflects from the state.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomizeView {
    /// Highlighted design option.
    pub active_design: Design,
    /// Tag shown in the step 1 header.
    pub design_label: &'static str,
    /// Color wrapper visibility.
    pub wrappers: WrapperVisibility,
    /// Value displayed by each color control.
    pub color_inputs: Vec<(ColorSlot, String)>,
    /// Highlighted gradient option.
    pub gradient_type: GradientType,
    /// Name input value.
    pub name_value: String,
    /// Logo area.
    pub logo_preview: LogoPreview,
    /// Highlighted logo position option.
    pub logo_position: LogoPosition,
    /// Colors step swatches.
    pub indicators: ColorIndicators,
}

impl CustomizeView {
    /// Project `state` onto the pane; `colors_step_open` hides the swatches.
    pub fn reflect(state: &CardState, colors_step_open: bool) -> Self {
        let colors = DesignColors::custom(state);
        Self {
            active_design: state.custom_design,
            design_label: state.custom_design.label(),
            wrappers: WrapperVisibility::for_design(state.custom_design),
            color_inputs: ColorSlot::ALL
                .into_iter()
                .map(|slot| (slot, state.color(slot).to_string()))
                .collect(),
            gradient_type: state.custom_gradient_type,
            name_value: state.name.clone(),
            logo_preview: match state.logo_url() {
                Some(url) => LogoPreview::Preview {
                    url: url.to_string(),
                },
                None => LogoPreview::Upload,
            },
            logo_position: state.logo_position,
            indicators: ColorIndicators {
                visible: !colors_step_open,
                one: colors.color_one().to_string(),
                two: colors.color_two().map(str::to_string),
            },
        }
    }
}

/// What the templates pane reflects from the state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplatesView {
    /// Highlighted template.
    pub selected: Option<&'static str>,
    /// Tag shown in the templates step 1 header.
    pub template_label: Option<&'static str>,
}

impl TemplatesView {
    /// Project `state` onto the templates pane.
    pub fn reflect(state: &CardState) -> Self {
        let selected = state.selected_template_id.as_deref().and_then(template);
        Self {
            selected: selected.map(|t| t.id),
            template_label: selected.map(|t| t.name),
        }
    }
}

/// Horizontal placement of the "drag to rotate" cue.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CuePlacement {
    /// Centered by the stylesheet (`left: 50%`, translated back by half its width).
    Centered,
    /// Absolute left offset relative to the hero grid.
    Left(f32),
}

/// Place the rotation cue over the canvas center.
///
/// Small portrait viewports (narrower than 586 px) defer to stylesheet centering.
pub fn place_rotation_cue(
    viewport: Viewport,
    canvas_left: f32,
    canvas_width: f32,
    grid_left: f32,
    cue_width: f32,
) -> CuePlacement {
    if viewport.width < 586 && !viewport.is_landscape() {
        return CuePlacement::Centered;
    }
    let canvas_center = canvas_left - grid_left + canvas_width / 2.0;
    CuePlacement::Left(canvas_center - cue_width / 2.0)
}

#[cfg(test)]
#[path = "../../tests/unit/ui/view.rs"]
mod tests;
