use crate::foundation::core::{Rgba8, Vec3};

/// Light source variants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightKind {
    /// Uniform light from every direction.
    Ambient,
    /// Parallel rays shining from `position` towards the origin.
    Directional {
        /// Position the rays come from.
        position: Vec3,
    },
    /// Omni light with linear falloff to zero at `distance`.
    Point {
        /// Light position.
        position: Vec3,
        /// Range; zero means unlimited.
        distance: f32,
    },
}

/// One light of the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    /// Kind and placement.
    pub kind: LightKind,
    /// Light color.
    pub color: Rgba8,
    /// Scalar intensity.
    pub intensity: f32,
}

impl Light {
    fn contribution(&self, normal: Vec3, point: Vec3) -> f32 {
        match self.kind {
            LightKind::Ambient => self.intensity,
            LightKind::Directional { position } => {
                let dir = position.normalize_or_zero();
                self.intensity * normal.dot(dir).max(0.0)
            }
            LightKind::Point { position, distance } => {
                let to_light = position - point;
                let d = to_light.length();
                if d <= f32::EPSILON {
                    return self.intensity;
                }
                let falloff = if distance > 0.0 {
                    (1.0 - d / distance).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                self.intensity * falloff * normal.dot(to_light / d).max(0.0)
            }
        }
    }
}

/// Light setup of the viewer.
#[derive(Clone, Debug, PartialEq)]
pub struct LightRig {
    /// Lights in insertion order.
    pub lights: Vec<Light>,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            lights: vec![
                Light {
                    kind: LightKind::Ambient,
                    color: Rgba8::WHITE,
                    intensity: 0.8,
                },
                Light {
                    kind: LightKind::Directional {
                        position: Vec3::new(5.0, 10.0, 7.5),
                    },
                    color: Rgba8::WHITE,
                    intensity: 1.0,
                },
                Light {
                    kind: LightKind::Directional {
                        position: Vec3::new(-5.0, 5.0, -5.0),
                    },
                    color: Rgba8::from_rgb_u32(0x4a90e2),
                    intensity: 0.3,
                },
                Light {
                    kind: LightKind::Point {
                        position: Vec3::new(0.0, 2.0, 2.0),
                        distance: 5.0,
                    },
                    color: Rgba8::WHITE,
                    intensity: 0.2,
                },
            ],
        }
    }
}

impl LightRig {
    /// Per-channel light factor for a surface at `point` with unit `normal`, capped at 1.
    pub fn shade(&self, normal: Vec3, point: Vec3) -> [f32; 3] {
        let mut rgb = [0.0f32; 3];
        for light in &self.lights {
            let k = light.contribution(normal, point);
            let c = light.color;
            rgb[0] += k * f32::from(c.r) / 255.0;
            rgb[1] += k * f32::from(c.g) / 255.0;
            rgb[2] += k * f32::from(c.b) / 255.0;
        }
        rgb.map(|v| v.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/lights.rs"]
mod tests;
