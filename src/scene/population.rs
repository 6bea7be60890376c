//! Random scene layout
//!
//! Places trees, rocks, leaf litter, leaf piles and falling leaves. Every
//! random draw comes from the generator passed in by the caller, so the whole
//! scene (including leaf phases) is reproducible from one seed.

use cgmath::{InnerSpace, Vector2, Vector3};
use rand::Rng;

use super::{
    light::{DirectionalLight, PointLight},
    model::{ModelKind, SceneModel},
    scene::{LightHandle, ModelHandle, Scene},
};
use crate::{
    animation::{AnimationScheduler, Clock},
    config::PopulationConfig,
};

const LEAF_SCALE: f32 = 0.1;
const LITTER_HEIGHT: f32 = 0.01;

fn lamp_glow() -> Vector3<f32> {
    Vector3::new(0.67, 0.55, 0.18)
}

/// Handles to the props the demo moves around after population
#[derive(Debug, Clone, Copy)]
pub struct Props {
    pub lantern: ModelHandle,
    pub lantern_light: LightHandle,
}

/// Uniform point in the ring `inner <= |p - center| <= outer`.
///
/// Samples the bounding square and rejects points outside the ring, so
/// `inner` must be smaller than `outer`.
pub fn random_point_in_ring<R: Rng + ?Sized>(
    rng: &mut R,
    center: Vector2<f32>,
    inner: f32,
    outer: f32,
) -> Vector2<f32> {
    loop {
        let point = Vector2::new(
            rng.random_range(center.x - outer..=center.x + outer),
            rng.random_range(center.y - outer..=center.y + outer),
        );
        let distance = (point - center).magnitude();
        if distance >= inner && distance <= outer {
            return point;
        }
    }
}

/// Builds the outdoor scene and releases waves of falling leaves
#[derive(Debug, Clone)]
pub struct ScenePopulator {
    config: PopulationConfig,
    trees: Vec<Vector3<f32>>,
}

impl ScenePopulator {
    pub fn new(config: PopulationConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
        }
    }

    pub fn config(&self) -> &PopulationConfig {
        &self.config
    }

    /// Positions of every tree placed so far
    pub fn trees(&self) -> &[Vector3<f32>] {
        &self.trees
    }

    /// Adds lights, fixed props, trees with their litter, rocks and leaf piles
    pub fn populate<R: Rng + ?Sized>(&mut self, scene: &mut Scene, rng: &mut R) -> Props {
        let props = Self::add_props(scene);

        self.generate_trees(scene, rng);
        self.generate_rocks(scene, rng);
        self.generate_leaf_piles(scene, rng);

        log::info!(
            "Scene populated: {} trees, {} rocks, {} leaf piles, {} models total",
            self.trees.len(),
            self.config.rock_count,
            self.config.leaf_pile_count,
            scene.models().len()
        );
        props
    }

    /// Drops a random number of leaves from around every tree and animates them.
    ///
    /// Returns how many leaves were released.
    pub fn spawn_falling_leaves<R: Rng + ?Sized, C: Clock>(
        &self,
        scene: &mut Scene,
        scheduler: &mut AnimationScheduler<C>,
        rng: &mut R,
    ) -> usize {
        let (inner, outer) = self.config.fall_ring;
        let (min_height, max_height) = self.config.fall_height;
        let mut released = 0;

        for tree in &self.trees {
            let count = rng.random_range(0..=self.config.max_falling_leaves_per_tree);
            for _ in 0..count {
                let xz = random_point_in_ring(rng, Vector2::new(tree.x, tree.z), inner, outer);
                let height = rng.random_range(min_height..=max_height);
                let leaf = SceneModel::new(
                    random_leaf(rng),
                    Vector3::new(xz.x, height, xz.y),
                    LEAF_SCALE,
                );

                let handle = scene.add_model(leaf);
                scheduler.register_leaf(scene, handle, rng);
                released += 1;
            }
        }

        log::debug!("Released {} falling leaves", released);
        released
    }

    fn add_props(scene: &mut Scene) -> Props {
        scene.add_directional_light(DirectionalLight::new(
            Vector3::new(0.5, 0.5, 0.5),
            Vector3::new(0.5, 1.0, 0.5),
        ));

        let ground = SceneModel::new(ModelKind::Ground, Vector3::new(0.0, -0.01, 0.0), 10.0);
        let lamp_post = SceneModel::new(ModelKind::LampPost, Vector3::new(3.0, 0.0, 3.0), 0.1);
        let tent = SceneModel::new(ModelKind::Tent, Vector3::new(2.0, 0.0, 2.0), 0.25);
        scene.add_model(ground);
        scene.add_model(lamp_post.with_emissive(lamp_glow()));
        scene.add_model(tent);

        let lantern_position = Vector3::new(1.5, 0.2, 1.5);
        let lantern_model = SceneModel::new(ModelKind::Lantern, lantern_position, 0.3);
        let lantern = scene.add_model(lantern_model.with_emissive(lamp_glow()));
        let lantern_light = scene.add_point_light(PointLight {
            color: lamp_glow(),
            position: lantern_position,
        });

        Props {
            lantern,
            lantern_light,
        }
    }

    fn generate_trees<R: Rng + ?Sized>(&mut self, scene: &mut Scene, rng: &mut R) {
        let (inner, outer) = self.config.litter_ring;

        for _ in 0..self.config.tree_count {
            let position = self.random_ground_position(rng, 0.0);
            let variant = rng.random_range(1..=ModelKind::TREE_VARIANTS);
            scene.add_model(SceneModel::new(ModelKind::Tree(variant), position, 1.0));
            self.trees.push(position);

            for _ in 0..self.config.litter_per_tree {
                let center = Vector2::new(position.x, position.z);
                let xz = random_point_in_ring(rng, center, inner, outer);
                scene.add_model(SceneModel::new(
                    random_leaf(rng),
                    Vector3::new(xz.x, LITTER_HEIGHT, xz.y),
                    LEAF_SCALE,
                ));
            }
        }
    }

    fn generate_rocks<R: Rng + ?Sized>(&self, scene: &mut Scene, rng: &mut R) {
        for _ in 0..self.config.rock_count {
            let position = self.random_ground_position(rng, 0.0);
            let variant = rng.random_range(1..=ModelKind::ROCK_VARIANTS);
            scene.add_model(SceneModel::new(ModelKind::Rock(variant), position, 1.0));
        }
    }

    fn generate_leaf_piles<R: Rng + ?Sized>(&self, scene: &mut Scene, rng: &mut R) {
        for _ in 0..self.config.leaf_pile_count {
            let position = self.random_ground_position(rng, LITTER_HEIGHT);
            let variant = rng.random_range(1..=ModelKind::LEAF_PILE_VARIANTS);
            let pile = SceneModel::new(ModelKind::LeafPile(variant), position, LEAF_SCALE);
            scene.add_model(pile);
        }
    }

    fn random_ground_position<R: Rng + ?Sized>(&self, rng: &mut R, height: f32) -> Vector3<f32> {
        let extent = self.config.object_extent;
        Vector3::new(
            rng.random_range(-extent..=extent),
            height,
            rng.random_range(-extent..=extent),
        )
    }
}

fn random_leaf<R: Rng + ?Sized>(rng: &mut R) -> ModelKind {
    ModelKind::Leaf(rng.random_range(1..=ModelKind::LEAF_VARIANTS))
}
