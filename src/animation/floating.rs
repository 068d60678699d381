use std::f64::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FloatState {
    Stopped,
    Running,
    Paused,
}

/// Offsets applied on top of the model's resting pose.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FloatOffset {
    /// Vertical bob in scene units.
    pub y: f32,
    /// Pitch sway in radians.
    pub rot_x: f32,
    /// Roll sway in radians.
    pub rot_z: f32,
}

/// Idle "floating" motion of the card: a slow bob plus a gentle sway.
///
/// Pausing freezes the phase, so resuming continues without a jump.
#[derive(Clone, Debug)]
pub struct FloatingAnimation {
    state: FloatState,
    elapsed: f64,
    pending_resume: Option<f64>,
    bob_amplitude: f32,
    bob_period: f64,
    sway_amplitude: f32,
    sway_period: f64,
}

impl Default for FloatingAnimation {
    fn default() -> Self {
        Self {
            state: FloatState::Stopped,
            elapsed: 0.0,
            pending_resume: None,
            bob_amplitude: 0.05,
            bob_period: 4.0,
            sway_amplitude: 0.02,
            sway_period: 6.0,
        }
    }
}

impl FloatingAnimation {
    /// Start from phase zero.
    pub fn start(&mut self) {
        self.state = FloatState::Running;
        self.elapsed = 0.0;
        self.pending_resume = None;
    }

    /// True while the motion advances.
    pub fn is_active(&self) -> bool {
        self.state == FloatState::Running
    }

    /// True once [`FloatingAnimation::start`] ran, paused or not.
    pub fn is_started(&self) -> bool {
        self.state != FloatState::Stopped
    }

    /// Freeze the motion and drop any pending resume.
    pub fn pause(&mut self) {
        self.pending_resume = None;
        if self.state == FloatState::Running {
            self.state = FloatState::Paused;
        }
    }

    /// Continue a paused motion.
    pub fn resume(&mut self) {
        self.pending_resume = None;
        if self.state == FloatState::Paused {
            self.state = FloatState::Running;
        }
    }

    /// Resume after `delay` seconds unless paused again first.
    pub fn schedule_resume(&mut self, delay: f64) {
        if self.state == FloatState::Paused {
            self.pending_resume = Some(delay.max(0.0));
        }
    }

    /// Seconds left before a scheduled resume.
    pub fn pending_resume(&self) -> Option<f64> {
        self.pending_resume
    }

    /// Advance the clock by `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        if let Some(left) = self.pending_resume {
            let left = left - dt;
            if left <= 0.0 {
                self.resume();
            } else {
                self.pending_resume = Some(left);
            }
        }
        if self.state == FloatState::Running {
            self.elapsed += dt;
        }
    }

    /// Current offsets; zero before the first start.
    pub fn offset(&self) -> FloatOffset {
        if self.state == FloatState::Stopped {
            return FloatOffset::default();
        }
        let bob = (self.elapsed / self.bob_period * TAU).sin();
        let sway = (self.elapsed / self.sway_period * TAU).sin();
        FloatOffset {
            y: self.bob_amplitude * bob as f32,
            rot_x: self.sway_amplitude * 0.5 * sway as f32,
            rot_z: self.sway_amplitude * sway as f32,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/floating.rs"]
mod tests;
