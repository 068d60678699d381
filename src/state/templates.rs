use crate::state::card::{Design, GradientType};

/// Colors and geometry a template applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// Solid background.
    Classic {
        /// Fill color.
        color: &'static str,
    },
    /// Two halves.
    Duotone {
        /// Left half.
        one: &'static str,
        /// Right half.
        two: &'static str,
    },
    /// Two-color blend.
    Gradient {
        /// Geometry.
        kind: GradientType,
        /// Outer color.
        one: &'static str,
        /// Inner color.
        two: &'static str,
    },
}

impl Preset {
    /// Design family of the preset.
    pub fn design(self) -> Design {
        match self {
            Self::Classic { .. } => Design::Classic,
            Self::Duotone { .. } => Design::Duotone,
            Self::Gradient { .. } => Design::Gradient,
        }
    }
}

/// A predefined card look.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Template {
    /// Stable key stored in `selected_template_id`.
    pub id: &'static str,
    /// Label shown in the templates step header.
    pub name: &'static str,
    /// Applied colors.
    pub preset: Preset,
}

const TEMPLATES: [Template; 6] = [
    Template {
        id: "01",
        name: "Cobalt",
        preset: Preset::Classic { color: "#4769FD" },
    },
    Template {
        id: "02",
        name: "Coral",
        preset: Preset::Duotone {
            one: "#F65555",
            two: "#FC8C8C",
        },
    },
    Template {
        id: "03",
        name: "Lagoon",
        preset: Preset::Gradient {
            kind: GradientType::Radial,
            one: "#73C044",
            two: "#24C0D5",
        },
    },
    Template {
        id: "04",
        name: "Sunset",
        preset: Preset::Gradient {
            kind: GradientType::Linear,
            one: "#F4A41B",
            two: "#FA3D31",
        },
    },
    Template {
        id: "05",
        name: "Aurora",
        preset: Preset::Gradient {
            kind: GradientType::Radial,
            one: "#0037FF",
            two: "#B919BE",
        },
    },
    Template {
        id: "06",
        name: "Amber",
        preset: Preset::Classic { color: "#FFB900" },
    },
];

/// Every template in display order.
pub fn templates() -> &'static [Template] {
    &TEMPLATES
}

/// Lookup by id.
pub fn template(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// Template preselected when the templates tab opens without a choice.
pub fn first_template() -> &'static Template {
    &TEMPLATES[0]
}

#[cfg(test)]
#[path = "../../tests/unit/state/templates.rs"]
mod tests;
