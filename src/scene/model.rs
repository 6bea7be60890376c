//! Scene models and their transforms

use cgmath::{Matrix4, SquareMatrix, Vector3};

/// Position, orientation and uniform scale of a model in world space.
///
/// The falling-leaf animation writes `position` and `rotation` directly; the
/// renderer reads the combined [`Transform::model_matrix`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Matrix4<f32>,
    pub scale: f32,
}

impl Transform {
    /// Creates a transform with identity rotation
    pub fn new(position: Vector3<f32>, scale: f32) -> Self {
        Self {
            position,
            rotation: Matrix4::identity(),
            scale,
        }
    }

    /// `T(position) * R(rotation) * S(scale)`
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position) * self.rotation * Matrix4::from_scale(self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Vector3::new(0.0, 0.0, 0.0), 1.0)
    }
}

/// What a model depicts. Variants carry the 1-based model variant index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    Ground,
    Tree(u8),
    Rock(u8),
    Leaf(u8),
    LeafPile(u8),
    LampPost,
    Tent,
    Lantern,
}

impl ModelKind {
    pub const TREE_VARIANTS: u8 = 9;
    pub const ROCK_VARIANTS: u8 = 5;
    pub const LEAF_VARIANTS: u8 = 3;
    pub const LEAF_PILE_VARIANTS: u8 = 2;

    /// Short name used in log output
    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::Ground => "ground",
            ModelKind::Tree(_) => "tree",
            ModelKind::Rock(_) => "rock",
            ModelKind::Leaf(_) => "leaf",
            ModelKind::LeafPile(_) => "leaf pile",
            ModelKind::LampPost => "lamp post",
            ModelKind::Tent => "tent",
            ModelKind::Lantern => "lantern",
        }
    }
}

/// A placed model in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneModel {
    pub kind: ModelKind,
    pub transform: Transform,
    /// Glow color for light-emitting props; `None` for lit surfaces.
    pub emissive: Option<Vector3<f32>>,
}

impl SceneModel {
    pub fn new(kind: ModelKind, position: Vector3<f32>, scale: f32) -> Self {
        Self {
            kind,
            transform: Transform::new(position, scale),
            emissive: None,
        }
    }

    pub fn with_emissive(mut self, color: Vector3<f32>) -> Self {
        self.emissive = Some(color);
        self
    }
}
