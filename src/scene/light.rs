//! Scene lighting

use cgmath::{InnerSpace, Vector3};

/// Light shining uniformly from one direction (the evening sky)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: Vector3<f32>,
    /// Direction pointing toward the light, normalized on construction.
    pub direction: Vector3<f32>,
}

impl DirectionalLight {
    pub fn new(color: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            color,
            direction: direction.normalize(),
        }
    }
}

/// Omnidirectional light with distance attenuation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub color: Vector3<f32>,
    pub position: Vector3<f32>,
}

/// `1 / (constant + linear*d + quadratic*d²)` falloff coefficients
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightAttenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl LightAttenuation {
    /// Light intensity multiplier at `distance`
    pub fn factor(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }
}

impl Default for LightAttenuation {
    fn default() -> Self {
        Self {
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
        }
    }
}
