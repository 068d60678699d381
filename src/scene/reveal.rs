use std::f32::consts::PI;

use crate::animation::ease::Ease;
use crate::animation::tween::{Tween, TweenSequence};
use crate::foundation::core::Vec3;

/// Position and Euler rotation of the model.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    /// Translation.
    pub position: Vec3,
    /// Euler rotation (XYZ) in radians.
    pub rotation: Vec3,
}

/// Pose and opacity of the model at one instant of the reveal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealFrame {
    /// Model pose.
    pub pose: Pose,
    /// Opacity multiplier.
    pub opacity: f32,
    /// True once every tween completed.
    pub finished: bool,
}

/// Rise-and-settle entrance of the card after the loader fades.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealAnimation {
    elapsed: f64,
    position: Tween<Vec3>,
    rotation: Tween<Vec3>,
    opacity: Tween<f32>,
}

impl RevealAnimation {
    /// Reveal ending at `rest`.
    pub fn new(rest: Pose) -> Self {
        let start = Self::start_pose(rest);
        Self {
            elapsed: 0.0,
            position: Tween::new(start.position, rest.position, 1.5, Ease::OutQuad),
            rotation: Tween::new(start.rotation, rest.rotation, 1.8, Ease::OutQuad),
            opacity: Tween::new(0.0, 1.0, 1.5, Ease::OutQuad).with_delay(0.2),
        }
    }

    /// Pose the model holds before the reveal: lowered and tilted.
    pub fn start_pose(rest: Pose) -> Pose {
        Pose {
            position: rest.position - Vec3::new(0.0, 1.75, 0.0),
            rotation: rest.rotation + Vec3::new(-PI / 10.0, -PI / 15.0, PI / 90.0),
        }
    }

    /// Frame at the current time.
    pub fn frame(&self) -> RevealFrame {
        let t = self.elapsed;
        RevealFrame {
            pose: Pose {
                position: self.position.sample(t),
                rotation: self.rotation.sample(t),
            },
            opacity: self.opacity.sample(t),
            finished: self.is_finished(),
        }
    }

    /// Advance by `dt` seconds and return the new frame.
    pub fn advance(&mut self, dt: f64) -> RevealFrame {
        self.elapsed += dt.max(0.0);
        self.frame()
    }

    /// True once position, rotation and opacity reached their targets.
    pub fn is_finished(&self) -> bool {
        let end = self
            .position
            .end_time()
            .max(self.rotation.end_time())
            .max(self.opacity.end_time());
        self.elapsed >= end
    }
}

/// Left-right swing that hints the card can be rotated, with its text cue.
#[derive(Clone, Debug, PartialEq)]
pub struct RotationHint {
    elapsed: f64,
    swing: TweenSequence<f32>,
}

impl RotationHint {
    /// Hint swinging around `rest_y` by `PI / 10`.
    pub fn new(rest_y: f32) -> Self {
        let amplitude = PI / 10.0;
        Self {
            elapsed: 0.0,
            swing: TweenSequence::new(rest_y)
                .with_delay(0.2)
                .then(rest_y - amplitude, 0.6, Ease::InOutSine)
                .then(rest_y + amplitude, 1.2, Ease::InOutSine)
                .then(rest_y, 0.6, Ease::InOutSine),
        }
    }

    /// Advance by `dt` seconds; returns the y rotation.
    pub fn advance(&mut self, dt: f64) -> f32 {
        self.elapsed += dt.max(0.0);
        self.rotation_y()
    }

    /// Current y rotation.
    pub fn rotation_y(&self) -> f32 {
        self.swing.sample(self.elapsed)
    }

    /// Whether the text cue is showing; it lingers 0.5 s after the swing.
    pub fn cue_visible(&self) -> bool {
        self.elapsed < self.swing.end_time() + 0.5
    }

    /// True once the swing completed and the cue is gone.
    pub fn is_finished(&self) -> bool {
        self.swing.is_finished(self.elapsed) && !self.cue_visible()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/reveal.rs"]
mod tests;
