use crate::animation::ease::Ease;

/// Loader visibility phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LoaderPhase {
    /// Progress animation running and/or assets still loading.
    Loading,
    /// Fading out; `elapsed` seconds since the fade started.
    Fading {
        /// Seconds into the fade.
        elapsed: f64,
        /// Whether the reveal signal was already sent.
        reveal_sent: bool,
    },
    /// Removed from the page.
    Hidden,
    /// Asset loading failed; the loader is gone and no reveal follows.
    Failed,
}

/// Signals raised while advancing the loader.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoaderSignal {
    /// The fade-out began.
    FadeStarted,
    /// Time to start the model reveal.
    RevealDue,
    /// The fade-out finished.
    Removed,
}

/// Loading overlay with a minimum-duration progress animation.
///
/// The loader hides only when both the progress animation reached 100% and the assets
/// reported completion.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadingProgress {
    min_duration: f64,
    reveal_delay: f64,
    fade_duration: f64,
    elapsed: f64,
    assets_loaded: bool,
    phase: LoaderPhase,
}

impl Default for LoadingProgress {
    fn default() -> Self {
        Self::new(5.0)
    }
}

impl LoadingProgress {
    /// Loader whose progress animation lasts `min_duration` seconds.
    pub fn new(min_duration: f64) -> Self {
        Self {
            min_duration: min_duration.max(0.0),
            reveal_delay: 0.05,
            fade_duration: 0.5,
            elapsed: 0.0,
            assets_loaded: false,
            phase: LoaderPhase::Loading,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> LoaderPhase {
        self.phase
    }

    /// Displayed percentage, ease-out-quart over the minimum duration.
    pub fn percent(&self) -> u8 {
        let t = if self.min_duration <= 0.0 {
            1.0
        } else {
            self.elapsed / self.min_duration
        };
        (Ease::OutQuart.apply(t) * 100.0).round() as u8
    }

    /// True once the progress animation reached 100%.
    pub fn progress_complete(&self) -> bool {
        self.elapsed >= self.min_duration
    }

    /// Record that every asset finished loading.
    pub fn mark_loaded(&mut self) -> Vec<LoaderSignal> {
        self.assets_loaded = true;
        let mut signals = Vec::new();
        self.maybe_start_fade(&mut signals);
        signals
    }

    /// Record an asset failure: the loader disappears and no reveal follows.
    pub fn fail(&mut self) {
        self.phase = LoaderPhase::Failed;
    }

    fn maybe_start_fade(&mut self, signals: &mut Vec<LoaderSignal>) {
        if self.phase == LoaderPhase::Loading && self.assets_loaded && self.progress_complete() {
            self.phase = LoaderPhase::Fading {
                elapsed: 0.0,
                reveal_sent: false,
            };
            signals.push(LoaderSignal::FadeStarted);
        }
    }

    /// Advance by `dt` seconds.
    pub fn advance(&mut self, dt: f64) -> Vec<LoaderSignal> {
        let mut signals = Vec::new();
        match self.phase {
            LoaderPhase::Loading => {
                self.elapsed = (self.elapsed + dt).min(self.min_duration);
                self.maybe_start_fade(&mut signals);
            }
            LoaderPhase::Fading {
                elapsed,
                mut reveal_sent,
            } => {
                let elapsed = elapsed + dt;
                if !reveal_sent && elapsed >= self.reveal_delay {
                    reveal_sent = true;
                    signals.push(LoaderSignal::RevealDue);
                }
                if elapsed >= self.fade_duration {
                    self.phase = LoaderPhase::Hidden;
                    signals.push(LoaderSignal::Removed);
                } else {
                    self.phase = LoaderPhase::Fading {
                        elapsed,
                        reveal_sent,
                    };
                }
            }
            LoaderPhase::Hidden | LoaderPhase::Failed => {}
        }
        signals
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/loading.rs"]
mod tests;
