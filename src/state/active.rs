use crate::state::card::{CardState, Design, GradientType, LogoPosition, Tab};
use crate::state::templates::{Preset, template};

/// Background colors of the look being rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DesignColors {
    /// Solid fill.
    Classic {
        /// Fill color.
        color: String,
    },
    /// Left and right halves.
    Duotone {
        /// Left color.
        one: String,
        /// Right color.
        two: String,
    },
    /// Two-color blend.
    Gradient {
        /// Geometry.
        kind: GradientType,
        /// Outer color.
        one: String,
        /// Inner color.
        two: String,
    },
}

impl DesignColors {
    /// Colors of the customize wizard's current design.
    pub fn custom(state: &CardState) -> Self {
        match state.custom_design {
            Design::Classic => Self::Classic {
                color: state.classic_color.clone(),
            },
            Design::Duotone => Self::Duotone {
                one: state.custom_color_one.clone(),
                two: state.custom_color_two.clone(),
            },
            Design::Gradient => Self::Gradient {
                kind: state.custom_gradient_type,
                one: state.custom_gradient_color_one.clone(),
                two: state.custom_gradient_color_two.clone(),
            },
        }
    }

    /// Design family.
    pub fn design(&self) -> Design {
        match self {
            Self::Classic { .. } => Design::Classic,
            Self::Duotone { .. } => Design::Duotone,
            Self::Gradient { .. } => Design::Gradient,
        }
    }

    /// Primary color (indicator one).
    pub fn color_one(&self) -> &str {
        match self {
            Self::Classic { color } => color,
            Self::Duotone { one, .. } | Self::Gradient { one, .. } => one,
        }
    }

    /// Secondary color (indicator two); classic has none.
    pub fn color_two(&self) -> Option<&str> {
        match self {
            Self::Classic { .. } => None,
            Self::Duotone { two, .. } | Self::Gradient { two, .. } => Some(two),
        }
    }
}

impl From<Preset> for DesignColors {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Classic { color } => Self::Classic {
                color: color.to_string(),
            },
            Preset::Duotone { one, two } => Self::Duotone {
                one: one.to_string(),
                two: two.to_string(),
            },
            Preset::Gradient { kind, one, two } => Self::Gradient {
                kind,
                one: one.to_string(),
                two: two.to_string(),
            },
        }
    }
}

/// What the card should look like right now.
///
/// With the templates tab active and a known template selected, colors come from the
/// template; otherwise from the custom fields. Name and logo always come from the state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveDesign {
    /// Background colors.
    pub colors: DesignColors,
    /// Cardholder name.
    pub name: String,
    /// Logo URL.
    pub logo_url: Option<String>,
    /// Logo mesh selector.
    pub logo_position: LogoPosition,
    /// Template the colors came from.
    pub template_id: Option<&'static str>,
}

impl ActiveDesign {
    /// Merge `state` into the rendered look.
    pub fn resolve(state: &CardState) -> Self {
        let from_template = match (state.tab, state.selected_template_id.as_deref()) {
            (Tab::Templates, Some(id)) => template(id),
            _ => None,
        };

        let colors = match from_template {
            Some(t) => DesignColors::from(t.preset),
            None => DesignColors::custom(state),
        };

        Self {
            colors,
            name: state.name.clone(),
            logo_url: state.logo_url().map(str::to_string),
            logo_position: state.logo_position,
            template_id: from_template.map(|t| t.id),
        }
    }

    /// Design family.
    pub fn design(&self) -> Design {
        self.colors.design()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/active.rs"]
mod tests;
