//! Per-frame uniform shared by every draw
//!
//! Must match `Globals` in `shader.wgsl` exactly. Every field is a full
//! vec4 so the layout needs no manual padding.

use bytemuck::{Pod, Zeroable};
use cgmath::Vector3;

use super::camera::FlyCamera;
use crate::scene::Scene;

/// Light that reaches surfaces facing away from every light source
pub const AMBIENT_STRENGTH: f32 = 0.15;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct GlobalUniform {
    pub view_proj: [[f32; 4]; 4],
    pub camera_position: [f32; 4],
    /// Direction toward the sun
    pub sun_direction: [f32; 4],
    pub sun_color: [f32; 4],
    pub lamp_position: [f32; 4],
    pub lamp_color: [f32; 4],
    /// Constant, linear and quadratic falloff; ambient strength in `w`
    pub attenuation: [f32; 4],
}

fn vec4(v: Vector3<f32>, w: f32) -> [f32; 4] {
    [v.x, v.y, v.z, w]
}

impl GlobalUniform {
    /// Camera plus the first directional and first point light of the scene.
    ///
    /// A missing light contributes black.
    pub fn from_scene(scene: &Scene, camera: &FlyCamera) -> Self {
        let zero = Vector3::new(0.0, 0.0, 0.0);
        let (sun_direction, sun_color) = scene
            .directional_lights()
            .first()
            .map_or((Vector3::unit_y(), zero), |sun| (sun.direction, sun.color));
        let (lamp_position, lamp_color) = scene
            .point_lights()
            .first()
            .map_or((zero, zero), |lamp| (lamp.position, lamp.color));
        let attenuation = scene.attenuation;

        Self {
            view_proj: camera.view_projection().into(),
            camera_position: vec4(camera.position, 1.0),
            sun_direction: vec4(sun_direction, 0.0),
            sun_color: vec4(sun_color, 1.0),
            lamp_position: vec4(lamp_position, 1.0),
            lamp_color: vec4(lamp_color, 1.0),
            attenuation: [
                attenuation.constant,
                attenuation.linear,
                attenuation.quadratic,
                AMBIENT_STRENGTH,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{DirectionalLight, PointLight};

    #[test]
    fn test_uniform_size_is_vec4_aligned() {
        assert_eq!(std::mem::size_of::<GlobalUniform>(), 64 + 6 * 16);
        assert_eq!(std::mem::size_of::<GlobalUniform>() % 16, 0);
    }

    #[test]
    fn test_lights_are_copied_from_scene() {
        let mut scene = Scene::new();
        scene.add_directional_light(DirectionalLight::new(
            Vector3::new(0.5, 0.5, 0.5),
            Vector3::new(0.0, 2.0, 0.0),
        ));
        scene.add_point_light(PointLight {
            color: Vector3::new(0.67, 0.55, 0.18),
            position: Vector3::new(1.5, 0.2, 1.5),
        });
        let camera = FlyCamera::new(Vector3::new(1.0, 2.0, 3.0), 1.5);

        let globals = GlobalUniform::from_scene(&scene, &camera);
        assert_eq!(globals.sun_direction, [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(globals.lamp_position, [1.5, 0.2, 1.5, 1.0]);
        assert_eq!(globals.camera_position, [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(globals.attenuation[3], AMBIENT_STRENGTH);
    }

    #[test]
    fn test_missing_lights_are_black() {
        let camera = FlyCamera::new(Vector3::new(0.0, 0.0, 0.0), 1.0);
        let globals = GlobalUniform::from_scene(&Scene::new(), &camera);
        assert_eq!(globals.sun_color, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(globals.lamp_color, [0.0, 0.0, 0.0, 1.0]);
    }
}
