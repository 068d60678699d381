use crate::animation::ease::Ease;
use crate::foundation::core::{Quat, Vec3};

/// Linear interpolation contract for tweened values.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for f32 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (*a as f64 + ((*b as f64 - *a as f64) * t)) as f32
    }
}

impl Lerp for Vec3 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.lerp(*b, t as f32)
    }
}

impl Lerp for Quat {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.slerp(*b, t as f32)
    }
}

/// One eased transition between two values, optionally delayed.
///
/// Times are seconds measured from the start of the owning animation.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween<T> {
    from: T,
    to: T,
    delay: f64,
    duration: f64,
    ease: Ease,
}

impl<T: Lerp + Clone> Tween<T> {
    /// Build an undelayed tween.
    pub fn new(from: T, to: T, duration: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            delay: 0.0,
            duration: duration.max(0.0),
            ease,
        }
    }

    /// Start the tween `delay` seconds in.
    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    /// Value at `elapsed` seconds.
    pub fn sample(&self, elapsed: f64) -> T {
        if elapsed <= self.delay {
            return self.from.clone();
        }
        if self.duration <= 0.0 {
            return self.to.clone();
        }
        let t = (elapsed - self.delay) / self.duration;
        T::lerp(&self.from, &self.to, self.ease.apply(t))
    }

    /// Time at which the tween reaches its target.
    pub fn end_time(&self) -> f64 {
        self.delay + self.duration
    }

    /// True once `elapsed` passed [`Tween::end_time`].
    pub fn is_finished(&self, elapsed: f64) -> bool {
        elapsed >= self.end_time()
    }

    /// Target value.
    pub fn target(&self) -> &T {
        &self.to
    }
}

/// Back-to-back tweens, each starting where the previous one ended.
#[derive(Clone, Debug, PartialEq)]
pub struct TweenSequence<T> {
    start: T,
    delay: f64,
    steps: Vec<(T, f64, Ease)>,
}

impl<T: Lerp + Clone> TweenSequence<T> {
    /// Empty sequence resting at `start`.
    pub fn new(start: T) -> Self {
        Self {
            start,
            delay: 0.0,
            steps: Vec::new(),
        }
    }

    /// Delay the first step.
    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    /// Append a step towards `to`.
    pub fn then(mut self, to: T, duration: f64, ease: Ease) -> Self {
        self.steps.push((to, duration.max(0.0), ease));
        self
    }

    /// Value at `elapsed` seconds.
    pub fn sample(&self, elapsed: f64) -> T {
        let mut t0 = self.delay;
        let mut from = &self.start;
        for (to, duration, ease) in &self.steps {
            let t1 = t0 + duration;
            if elapsed < t1 {
                if elapsed <= t0 || *duration <= 0.0 {
                    return from.clone();
                }
                return T::lerp(from, to, ease.apply((elapsed - t0) / duration));
            }
            t0 = t1;
            from = to;
        }
        from.clone()
    }

    /// Total length including the delay.
    pub fn end_time(&self) -> f64 {
        self.delay + self.steps.iter().map(|(_, d, _)| d).sum::<f64>()
    }

    /// True once every step completed.
    pub fn is_finished(&self, elapsed: f64) -> bool {
        elapsed >= self.end_time()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
