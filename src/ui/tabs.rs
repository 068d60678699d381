use crate::state::card::Tab;

/// A step element in the markup and the wizard(s) it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StepElement {
    /// Position in the customize wizard.
    #[serde(default)]
    pub customize_step: Option<usize>,
    /// Position in the templates wizard.
    #[serde(default)]
    pub template_step: Option<usize>,
}

impl StepElement {
    /// Step shown by both wizards.
    pub fn is_dual(self) -> bool {
        self.customize_step.is_some() && self.template_step.is_some()
    }
}

/// Styling mode of a dual step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepMode {
    /// Rendered as a customize step.
    Customize,
    /// Rendered as a template step.
    Template,
}

/// Rendered state of one [`StepElement`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepElementView {
    /// Shown in the current tab.
    pub visible: bool,
    /// Number printed in the step counter.
    pub counter: Option<usize>,
    /// Styling mode, for dual steps only.
    pub mode: Option<StepMode>,
}

/// Where the shared name/logo form is mounted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormHost {
    /// Inside customize step 3.
    CustomizeStep,
    /// Inside the templates pane placeholder.
    TemplatesPane,
}

/// Position of a tab link, as measured by layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TabBounds {
    /// Left offset within the tab bar.
    pub offset_left: f32,
    /// Link width.
    pub width: f32,
}

/// Geometry of the sliding active-tab indicator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaskGeometry {
    /// Left offset.
    pub left: f32,
    /// Width.
    pub width: f32,
}

impl From<TabBounds> for MaskGeometry {
    fn from(b: TabBounds) -> Self {
        Self {
            left: b.offset_left - 0.5,
            width: b.width + 2.0,
        }
    }
}

/// Everything a tab switch re-renders.
#[derive(Clone, Debug, PartialEq)]
pub struct TabSwitch {
    /// Newly active tab.
    pub tab: Tab,
    /// Customize pane shown.
    pub customize_pane_visible: bool,
    /// Templates pane shown.
    pub templates_pane_visible: bool,
    /// Mount point of the shared form.
    pub form_host: FormHost,
    /// Per-element visibility and counters.
    pub steps: Vec<StepElementView>,
    /// Active-tab indicator, when bounds are known.
    pub mask: Option<MaskGeometry>,
}

/// Owns the active tab and the markup concerns that follow it.
#[derive(Clone, Debug)]
pub struct TabController {
    active: Tab,
    elements: Vec<StepElement>,
    customize_bounds: Option<TabBounds>,
    templates_bounds: Option<TabBounds>,
}

impl TabController {
    /// Controller starting on `active`.
    pub fn new(active: Tab, elements: Vec<StepElement>) -> Self {
        Self {
            active,
            elements,
            customize_bounds: None,
            templates_bounds: None,
        }
    }

    /// Active tab.
    pub fn active(&self) -> Tab {
        self.active
    }

    /// Record measured tab link positions (resize/orientation change).
    pub fn relayout(&mut self, customize: TabBounds, templates: TabBounds) -> Option<MaskGeometry> {
        self.customize_bounds = Some(customize);
        self.templates_bounds = Some(templates);
        self.mask()
    }

    /// Indicator geometry for the active tab.
    pub fn mask(&self) -> Option<MaskGeometry> {
        let bounds = match self.active {
            Tab::Customize => self.customize_bounds,
            Tab::Templates => self.templates_bounds,
        };
        bounds.map(MaskGeometry::from)
    }

    /// Activate `tab` and compute the resulting markup state.
    pub fn switch(&mut self, tab: Tab) -> TabSwitch {
        self.active = tab;
        self.render()
    }

    /// Markup state for the active tab.
    pub fn render(&self) -> TabSwitch {
        let customize = self.active == Tab::Customize;
        TabSwitch {
            tab: self.active,
            customize_pane_visible: customize,
            templates_pane_visible: !customize,
            form_host: if customize {
                FormHost::CustomizeStep
            } else {
                FormHost::TemplatesPane
            },
            steps: self.elements.iter().map(|e| self.element_view(*e)).collect(),
            mask: self.mask(),
        }
    }

    fn element_view(&self, e: StepElement) -> StepElementView {
        let customize = self.active == Tab::Customize;
        let visible = match (e.customize_step, e.template_step) {
            (Some(_), Some(_)) => true,
            (Some(_), None) => customize,
            (None, Some(_)) => !customize,
            (None, None) => false,
        };
        let counter = if customize {
            e.customize_step.or(e.template_step)
        } else {
            e.template_step.or(e.customize_step)
        };
        let mode = e.is_dual().then_some(if customize {
            StepMode::Customize
        } else {
            StepMode::Template
        });
        StepElementView {
            visible,
            counter,
            mode,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ui/tabs.rs"]
mod tests;
