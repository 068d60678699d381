use crate::animation::ease::Ease;
use crate::animation::tween::Tween;

const OPEN_OPACITY: f32 = 1.0;
const CLOSED_OPACITY: f32 = 0.6;
const HEIGHT_TRANSITION_S: f64 = 0.6;

/// Static description of one wizard step.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StepDef {
    /// Header title.
    pub title: String,
    /// Natural height of the step's content, in CSS pixels.
    pub content_height: f32,
}

impl StepDef {
    /// Build a step definition.
    pub fn new(title: impl Into<String>, content_height: f32) -> Self {
        Self {
            title: title.into(),
            content_height,
        }
    }
}

/// Outcome of a Next/Back press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// The given 1-based step is now open.
    Moved(usize),
    /// Next was pressed on the final step.
    Export,
    /// Nothing to do (Back on step 1, or an empty wizard).
    Stayed,
}

/// Rendered state of the Next/Back buttons.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonState {
    /// Back accepts clicks.
    pub back_enabled: bool,
    /// Back opacity.
    pub back_opacity: f32,
    /// Next label.
    pub next_label: &'static str,
}

/// Rendered state of one step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepView {
    /// 1-based step number.
    pub number: usize,
    /// Header title.
    pub title: String,
    /// Optional tag shown next to the title.
    pub header_label: Option<String>,
    /// Expanded (or expanding).
    pub open: bool,
    /// Current, possibly mid-transition, content height.
    pub height: f32,
    /// Header opacity.
    pub opacity: f32,
}

#[derive(Clone, Debug)]
struct StepSlot {
    def: StepDef,
    header_label: Option<String>,
    open: bool,
    height: f32,
    transition: Option<(Tween<f32>, f64)>,
}

impl StepSlot {
    fn animate_to(&mut self, target: f32) {
        self.transition = Some((
            Tween::new(self.height, target, HEIGHT_TRANSITION_S, Ease::InOutQuad),
            0.0,
        ));
    }
}

/// Ordered steps of one wizard; at most one is expanded.
///
/// Heights animate over 0.6 s; call [`Accordion::advance`] every frame.
#[derive(Clone, Debug)]
pub struct Accordion {
    steps: Vec<StepSlot>,
    current: usize,
}

impl Accordion {
    /// Build a wizard with every step collapsed.
    pub fn new(defs: Vec<StepDef>) -> Self {
        let steps = defs
            .into_iter()
            .map(|def| StepSlot {
                def,
                header_label: None,
                open: false,
                height: 0.0,
                transition: None,
            })
            .collect();
        Self { steps, current: 1 }
    }

    /// Open step 1 once layout measurements are available.
    pub fn layout_ready(&mut self) {
        self.open_step(1);
    }

    /// Number of steps.
    pub fn total(&self) -> usize {
        self.steps.len()
    }

    /// Current 1-based step.
    pub fn current(&self) -> usize {
        self.current
    }

    /// True when step `n` is expanded.
    pub fn is_open(&self, n: usize) -> bool {
        self.slot(n).is_some_and(|s| s.open)
    }

    /// Update the measured content height of step `n`.
    pub fn measure(&mut self, n: usize, content_height: f32) {
        let Some(slot) = self.slot_mut(n) else {
            return;
        };
        slot.def.content_height = content_height.max(0.0);
        if slot.open {
            slot.animate_to(slot.def.content_height);
        }
    }

    /// Set or clear the tag shown in step `n`'s header.
    pub fn set_header_label(&mut self, n: usize, label: Option<String>) {
        if let Some(slot) = self.slot_mut(n) {
            slot.header_label = label;
        }
    }

    /// Expand step `n` and collapse all others. Out-of-range steps are ignored.
    pub fn open_step(&mut self, n: usize) -> bool {
        if n == 0 || n > self.steps.len() {
            tracing::debug!(step = n, total = self.steps.len(), "ignoring open of missing step");
            return false;
        }
        for (i, slot) in self.steps.iter_mut().enumerate() {
            if i + 1 == n {
                slot.open = true;
                slot.animate_to(slot.def.content_height);
            } else if slot.open || slot.height > 0.0 {
                slot.open = false;
                slot.animate_to(0.0);
            }
        }
        self.current = n;
        true
    }

    /// Header click: collapses the open current step, otherwise opens `n`.
    pub fn toggle(&mut self, n: usize) -> bool {
        if n == self.current && self.is_open(n) {
            if let Some(slot) = self.slot_mut(n) {
                slot.open = false;
                slot.animate_to(0.0);
            }
            return true;
        }
        self.open_step(n)
    }

    /// Advance to the next step, or request export on the last one.
    pub fn next(&mut self) -> Navigation {
        if self.steps.is_empty() {
            return Navigation::Stayed;
        }
        if self.current >= self.steps.len() {
            return Navigation::Export;
        }
        let n = self.current + 1;
        self.open_step(n);
        Navigation::Moved(n)
    }

    /// Go back one step; no-op on step 1.
    pub fn back(&mut self) -> Navigation {
        if self.current <= 1 || self.steps.is_empty() {
            return Navigation::Stayed;
        }
        let n = self.current - 1;
        self.open_step(n);
        Navigation::Moved(n)
    }

    /// Next/Back rendering for the current step.
    pub fn buttons(&self) -> ButtonState {
        let past_first = self.current > 1;
        ButtonState {
            back_enabled: past_first,
            back_opacity: if past_first { 1.0 } else { 0.5 },
            next_label: if self.current == self.steps.len() {
                "Download card"
            } else {
                "Next"
            },
        }
    }

    /// Step out height transitions by `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        for slot in &mut self.steps {
            let Some((tween, elapsed)) = slot.transition.as_mut() else {
                continue;
            };
            *elapsed += dt;
            slot.height = tween.sample(*elapsed);
            if tween.is_finished(*elapsed) {
                slot.transition = None;
            }
        }
    }

    /// True while any height is still moving.
    pub fn is_animating(&self) -> bool {
        self.steps.iter().any(|s| s.transition.is_some())
    }

    /// Snapshot of every step.
    pub fn steps(&self) -> Vec<StepView> {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, s)| StepView {
                number: i + 1,
                title: s.def.title.clone(),
                header_label: s.header_label.clone(),
                open: s.open,
                height: s.height,
                opacity: if s.open { OPEN_OPACITY } else { CLOSED_OPACITY },
            })
            .collect()
    }

    fn slot(&self, n: usize) -> Option<&StepSlot> {
        n.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    fn slot_mut(&mut self, n: usize) -> Option<&mut StepSlot> {
        n.checked_sub(1).and_then(|i| self.steps.get_mut(i))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ui/accordion.rs"]
mod tests;
