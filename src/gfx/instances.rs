//! Per-instance data for drawing scene models as stacks of boxes
//!
//! Every model kind is approximated by a few colored parts. Each part becomes
//! one instance of the unit cube: its matrix is the model matrix followed by
//! the part's own offset and size.

use bytemuck::{Pod, Zeroable};
use cgmath::{Matrix4, Vector3};

use crate::scene::{ModelKind, Scene, SceneModel};

/// Instance attributes: model matrix columns at locations 2-5, color at 6.
///
/// `color.a` is 1.0 for emissive parts, which the shader draws unlit.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    pub transform: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl InstanceData {
    const ATTRIBS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4
    ];

    pub fn new(transform: Matrix4<f32>, color: [f32; 3], emissive: bool) -> Self {
        let alpha = if emissive { 1.0 } else { 0.0 };
        Self {
            transform: transform.into(),
            color: [color[0], color[1], color[2], alpha],
        }
    }

    pub fn is_emissive(&self) -> bool {
        self.color[3] > 0.5
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceData>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// One box of a model, in the model's local units
#[derive(Debug, Clone, Copy)]
struct Part {
    offset: [f32; 3],
    size: [f32; 3],
    color: [f32; 3],
    /// Takes the model's emissive color when it has one
    glows: bool,
}

impl Part {
    const fn solid(offset: [f32; 3], size: [f32; 3], color: [f32; 3]) -> Self {
        Self {
            offset,
            size,
            color,
            glows: false,
        }
    }

    const fn glowing(offset: [f32; 3], size: [f32; 3]) -> Self {
        Self {
            offset,
            size,
            color: [1.0, 1.0, 1.0],
            glows: true,
        }
    }
}

const BARK: [f32; 3] = [0.32, 0.22, 0.14];
const CANOPY: [[f32; 3]; 4] = [
    [0.80, 0.38, 0.09],
    [0.65, 0.18, 0.08],
    [0.85, 0.65, 0.15],
    [0.45, 0.40, 0.12],
];
const LEAF: [[f32; 3]; 3] = [[0.85, 0.42, 0.10], [0.70, 0.15, 0.08], [0.90, 0.75, 0.20]];
const STONE: [f32; 3] = [0.45, 0.44, 0.42];
const GRASS: [f32; 3] = [0.24, 0.27, 0.13];
const CANVAS: [f32; 3] = [0.30, 0.38, 0.28];
const IRON: [f32; 3] = [0.12, 0.12, 0.13];

fn palette(colors: &[[f32; 3]], variant: u8) -> [f32; 3] {
    let index = usize::from(variant.saturating_sub(1));
    colors[index % colors.len()]
}

fn parts(kind: ModelKind) -> Vec<Part> {
    match kind {
        ModelKind::Ground => vec![Part::solid([0.0, 0.0, 0.0], [2.0, 0.002, 2.0], GRASS)],
        ModelKind::Tree(variant) => {
            let height = 1.2 + 0.1 * f32::from(variant);
            let crown = 0.7 + 0.05 * f32::from(variant % 4);
            let canopy = palette(&CANOPY, variant);
            vec![
                Part::solid([0.0, height * 0.5, 0.0], [0.12, height, 0.12], BARK),
                Part::solid([0.0, height + 0.2, 0.0], [crown, crown, crown], canopy),
            ]
        }
        ModelKind::Rock(variant) => {
            let v = f32::from(variant);
            let size = [0.25 + 0.04 * v, 0.16, 0.2 + 0.03 * v];
            vec![Part::solid([0.0, 0.08, 0.0], size, STONE)]
        }
        ModelKind::Leaf(variant) => {
            let color = palette(&LEAF, variant);
            vec![Part::solid([0.0, 0.0, 0.0], [1.0, 0.05, 0.7], color)]
        }
        ModelKind::LeafPile(variant) => {
            // The top layer uses the next leaf color; variants wrap at u8::MAX.
            let base = palette(&LEAF, variant);
            let top = palette(&LEAF, variant.wrapping_add(1));
            vec![
                Part::solid([0.0, 0.6, 0.0], [6.0, 1.2, 5.0], base),
                Part::solid([0.5, 1.4, -0.3], [3.5, 0.8, 3.0], top),
            ]
        }
        ModelKind::LampPost => vec![
            Part::solid([0.0, 10.0, 0.0], [0.6, 20.0, 0.6], IRON),
            Part::glowing([0.0, 20.6, 0.0], [2.0, 1.2, 2.0]),
        ],
        ModelKind::Tent => vec![
            Part::solid([0.0, 0.75, 0.0], [4.0, 1.5, 3.0], CANVAS),
            Part::solid([0.0, 1.75, 0.0], [3.0, 0.5, 2.0], CANVAS),
        ],
        ModelKind::Lantern => vec![
            Part::glowing([0.0, 0.5, 0.0], [0.6, 1.0, 0.6]),
            Part::solid([0.0, 1.1, 0.0], [0.3, 0.2, 0.3], IRON),
        ],
    }
}

/// Appends the instances of one model to `out`
pub fn push_model_instances(model: &SceneModel, out: &mut Vec<InstanceData>) {
    let model_matrix = model.transform.model_matrix();

    for part in parts(model.kind) {
        let matrix = model_matrix
            * Matrix4::from_translation(Vector3::from(part.offset))
            * Matrix4::from_nonuniform_scale(part.size[0], part.size[1], part.size[2]);

        let instance = match model.emissive {
            Some(glow) if part.glows => InstanceData::new(matrix, glow.into(), true),
            _ => InstanceData::new(matrix, part.color, false),
        };
        out.push(instance);
    }
}

/// Instances for every model in the scene, in model order
pub fn build_instances(scene: &Scene) -> Vec<InstanceData> {
    let mut instances = Vec::with_capacity(scene.models().len() * 2);
    for model in scene.models() {
        push_model_instances(model, &mut instances);
    }
    instances
}
