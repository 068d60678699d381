use serde::{Deserialize, Serialize};

use crate::foundation::error::{CardError, CardResult};
use crate::state::logo::LogoRef;

/// Top-level wizard tab.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    /// Build a design from scratch.
    #[default]
    Customize,
    /// Start from a predefined template.
    Templates,
}

/// Card background family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Design {
    /// One solid color.
    #[default]
    Classic,
    /// Two vertical halves.
    Duotone,
    /// Linear or radial blend of two colors.
    Gradient,
}

impl Design {
    /// All designs in menu order.
    pub const ALL: [Design; 3] = [Design::Classic, Design::Duotone, Design::Gradient];

    /// Human-readable label shown in the step header.
    pub fn label(self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Duotone => "Duotone",
            Self::Gradient => "Gradient",
        }
    }

    /// Logo placement applied when this design is picked.
    pub fn default_logo_position(self) -> LogoPosition {
        match self {
            Self::Duotone => LogoPosition::TopRight,
            Self::Classic | Self::Gradient => LogoPosition::Center,
        }
    }
}

/// Gradient geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientType {
    /// Diagonal blend from the top-left corner.
    Linear,
    /// Blend out from a point near the top center.
    #[default]
    Radial,
}

/// Which logo mesh carries the uploaded logo.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogoPosition {
    /// Middle of the card face.
    #[default]
    #[serde(rename = "center")]
    Center,
    /// Small mark in the top-right corner.
    #[serde(rename = "topright")]
    TopRight,
    /// Right edge, vertically centered.
    #[serde(rename = "right")]
    Right,
}

impl LogoPosition {
    /// All positions.
    pub const ALL: [LogoPosition; 3] = [
        LogoPosition::Center,
        LogoPosition::TopRight,
        LogoPosition::Right,
    ];
}

/// One color field of [`CardState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorSlot {
    /// `classic_color`.
    Classic,
    /// `custom_color_one` (duotone left half).
    DuotoneOne,
    /// `custom_color_two` (duotone right half).
    DuotoneTwo,
    /// `custom_gradient_color_one`.
    GradientOne,
    /// `custom_gradient_color_two`.
    GradientTwo,
}

impl ColorSlot {
    /// All slots.
    pub const ALL: [ColorSlot; 5] = [
        ColorSlot::Classic,
        ColorSlot::DuotoneOne,
        ColorSlot::DuotoneTwo,
        ColorSlot::GradientOne,
        ColorSlot::GradientTwo,
    ];

    /// Design whose wrapper hosts this control.
    pub fn design(self) -> Design {
        match self {
            Self::Classic => Design::Classic,
            Self::DuotoneOne | Self::DuotoneTwo => Design::Duotone,
            Self::GradientOne | Self::GradientTwo => Design::Gradient,
        }
    }
}

/// The single mutable card configuration shared by both wizards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardState {
    /// Active wizard tab.
    pub tab: Tab,
    /// Design picked in the customize wizard.
    pub custom_design: Design,
    /// Classic solid color.
    pub classic_color: String,
    /// Duotone left color.
    pub custom_color_one: String,
    /// Duotone right color.
    pub custom_color_two: String,
    /// Gradient geometry.
    pub custom_gradient_type: GradientType,
    /// Gradient outer color.
    pub custom_gradient_color_one: String,
    /// Gradient inner color.
    pub custom_gradient_color_two: String,
    /// Selected template id, if any.
    pub selected_template_id: Option<String>,
    /// Cardholder name.
    pub name: String,
    /// Current logo.
    #[serde(rename = "logoUrl", with = "crate::state::logo::serde_logo_url")]
    pub logo: Option<LogoRef>,
    /// Logo mesh selector.
    pub logo_position: LogoPosition,
}

impl Default for CardState {
    fn default() -> Self {
        Self {
            tab: Tab::Customize,
            custom_design: Design::Classic,
            classic_color: "#04091B".to_string(),
            custom_color_one: "#FFB900".to_string(),
            custom_color_two: "#111427".to_string(),
            custom_gradient_type: GradientType::Radial,
            custom_gradient_color_one: "#667ED8".to_string(),
            custom_gradient_color_two: "#69F7DB".to_string(),
            selected_template_id: None,
            name: String::new(),
            logo: None,
            logo_position: LogoPosition::Center,
        }
    }
}

impl CardState {
    /// Load a state document (camelCase JSON, missing fields take defaults).
    pub fn from_json(text: &str) -> CardResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| CardError::serde(format!("card state json: {e}")))
    }

    /// Current value of one color field.
    pub fn color(&self, slot: ColorSlot) -> &str {
        match slot {
            ColorSlot::Classic => &self.classic_color,
            ColorSlot::DuotoneOne => &self.custom_color_one,
            ColorSlot::DuotoneTwo => &self.custom_color_two,
            ColorSlot::GradientOne => &self.custom_gradient_color_one,
            ColorSlot::GradientTwo => &self.custom_gradient_color_two,
        }
    }

    pub(crate) fn color_mut(&mut self, slot: ColorSlot) -> &mut String {
        match slot {
            ColorSlot::Classic => &mut self.classic_color,
            ColorSlot::DuotoneOne => &mut self.custom_color_one,
            ColorSlot::DuotoneTwo => &mut self.custom_color_two,
            ColorSlot::GradientOne => &mut self.custom_gradient_color_one,
            ColorSlot::GradientTwo => &mut self.custom_gradient_color_two,
        }
    }

    /// Logo URL, if any.
    pub fn logo_url(&self) -> Option<&str> {
        self.logo.as_ref().map(LogoRef::url)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/card.rs"]
mod tests;
