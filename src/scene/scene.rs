use cgmath::Vector3;

use super::{
    light::{DirectionalLight, LightAttenuation, PointLight},
    model::{ModelKind, SceneModel, Transform},
};

/// Non-owning reference to a model stored in a [`Scene`].
///
/// Handles are only minted by [`Scene::add_model`] and models are never
/// removed, so a handle stays valid for the lifetime of the scene that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelHandle(usize);

impl ModelHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Non-owning reference to a point light stored in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightHandle(usize);

/// Main scene containing models and lights
#[derive(Debug, Default)]
pub struct Scene {
    models: Vec<SceneModel>,
    directional_lights: Vec<DirectionalLight>,
    point_lights: Vec<PointLight>,
    pub attenuation: LightAttenuation,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a model and returns the handle its transform can be reached through
    pub fn add_model(&mut self, model: SceneModel) -> ModelHandle {
        self.models.push(model);
        ModelHandle(self.models.len() - 1)
    }

    pub fn add_directional_light(&mut self, light: DirectionalLight) {
        self.directional_lights.push(light);
    }

    pub fn add_point_light(&mut self, light: PointLight) -> LightHandle {
        self.point_lights.push(light);
        LightHandle(self.point_lights.len() - 1)
    }

    pub fn model(&self, handle: ModelHandle) -> Option<&SceneModel> {
        self.models.get(handle.0)
    }

    pub fn transform(&self, handle: ModelHandle) -> Option<&Transform> {
        self.models.get(handle.0).map(|model| &model.transform)
    }

    pub fn transform_mut(&mut self, handle: ModelHandle) -> Option<&mut Transform> {
        self.models
            .get_mut(handle.0)
            .map(|model| &mut model.transform)
    }

    pub fn point_light_mut(&mut self, handle: LightHandle) -> Option<&mut PointLight> {
        self.point_lights.get_mut(handle.0)
    }

    pub fn models(&self) -> &[SceneModel] {
        &self.models
    }

    pub fn directional_lights(&self) -> &[DirectionalLight] {
        &self.directional_lights
    }

    pub fn point_lights(&self) -> &[PointLight] {
        &self.point_lights
    }

    /// Number of models of the given kind, ignoring the variant
    pub fn count_kind(&self, kind: ModelKind) -> usize {
        let kind = std::mem::discriminant(&kind);
        self.models
            .iter()
            .filter(|model| std::mem::discriminant(&model.kind) == kind)
            .count()
    }

    /// Moves a model by `offset`, carrying along a light attached to it
    pub fn translate_with_light(
        &mut self,
        model: ModelHandle,
        light: Option<LightHandle>,
        offset: Vector3<f32>,
    ) {
        let Some(transform) = self.transform_mut(model) else {
            return;
        };
        transform.position += offset;
        let position = transform.position;

        if let Some(light) = light.and_then(|handle| self.point_light_mut(handle)) {
            light.position = position;
        }
    }
}
