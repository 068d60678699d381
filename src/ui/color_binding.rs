use crate::foundation::error::{CardError, CardResult};
use crate::state::card::ColorSlot;
use crate::state::store::{CardStore, ChangeSet};

/// Legacy marker attributes found on a color control's ancestors.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ColorMarkers {
    /// `data-classic-option`.
    #[serde(default)]
    pub classic_option: Option<String>,
    /// `data-color-option`.
    #[serde(default)]
    pub color_option: Option<String>,
    /// `data-gradient-color`.
    #[serde(default)]
    pub gradient_color: Option<String>,
}

/// A color control wired to exactly one state field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorBinding {
    slot: ColorSlot,
}

impl ColorBinding {
    /// Bind directly to `slot`.
    pub fn new(slot: ColorSlot) -> Self {
        Self { slot }
    }

    /// Resolve the marker vocabulary once, at construction.
    pub fn from_markers(markers: &ColorMarkers) -> CardResult<Self> {
        let slot = match (
            markers.classic_option.as_deref(),
            markers.color_option.as_deref(),
            markers.gradient_color.as_deref(),
        ) {
            (Some("solid-color"), _, _) => ColorSlot::Classic,
            (_, Some("color-one"), _) => ColorSlot::DuotoneOne,
            (_, Some("color-two"), _) => ColorSlot::DuotoneTwo,
            (_, _, Some("color-one")) => ColorSlot::GradientOne,
            (_, _, Some("color-two")) => ColorSlot::GradientTwo,
            _ => {
                return Err(CardError::validation(format!(
                    "color control has no recognized marker: {markers:?}"
                )));
            }
        };
        Ok(Self { slot })
    }

    /// Bound field.
    pub fn slot(self) -> ColorSlot {
        self.slot
    }

    /// Write a picked value into the bound field.
    pub fn apply(self, store: &mut CardStore, value: &str) -> ChangeSet {
        store.set_color(self.slot, value)
    }

    /// Value the control should display.
    pub fn current(self, store: &CardStore) -> String {
        store.state().color(self.slot).to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ui/color_binding.rs"]
mod tests;
