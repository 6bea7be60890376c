//! Per-frame driver for all falling leaves

use rand::Rng;

use super::{
    clock::{Clock, SystemClock},
    leaf::{LeafMotionModel, LeafParams},
};
use crate::scene::{ModelHandle, Scene};

/// Owns every leaf motion model and advances them once per frame.
///
/// Leaves are never removed; a settled leaf simply stops doing work.
pub struct AnimationScheduler<C: Clock = SystemClock> {
    clock: C,
    leaves: Vec<LeafMotionModel>,
    last_update: f64,
    settled: usize,
}

impl AnimationScheduler<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

impl Default for AnimationScheduler<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> AnimationScheduler<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            leaves: Vec::new(),
            last_update: 0.0,
            settled: 0,
        }
    }

    /// Records the current clock time as the baseline for the first update
    pub fn initialize(&mut self) {
        self.last_update = self.clock.now_seconds();
    }

    /// Advances every leaf by the wall time elapsed since the previous call
    pub fn update(&mut self, scene: &mut Scene) {
        let now = self.clock.now_seconds();
        let mut delta = now - self.last_update;
        if delta < 0.0 {
            log::warn!("Clock went backward by {:.4}s; holding leaves", -delta);
            delta = 0.0;
        }

        self.advance_all(delta as f32, scene);
        self.last_update = now;
    }

    /// Binds a new leaf with default parameters to the model behind `target`
    pub fn register_leaf<R: Rng + ?Sized>(
        &mut self,
        scene: &Scene,
        target: ModelHandle,
        rng: &mut R,
    ) {
        self.register_leaf_with(scene, target, LeafParams::default(), rng);
    }

    /// Binds a new leaf with explicit parameters to the model behind `target`
    pub fn register_leaf_with<R: Rng + ?Sized>(
        &mut self,
        scene: &Scene,
        target: ModelHandle,
        params: LeafParams,
        rng: &mut R,
    ) {
        let Some(transform) = scene.transform(target) else {
            log::error!("Leaf target {} is not in the scene", target.index());
            return;
        };

        let leaf = LeafMotionModel::new(target, transform.position, params, rng);
        self.leaves.push(leaf);
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Number of leaves that have come to rest
    pub fn settled_count(&self) -> usize {
        self.settled
    }

    fn advance_all(&mut self, delta_time: f32, scene: &mut Scene) {
        let mut settled = 0;
        for leaf in &mut self.leaves {
            if let Some(transform) = scene.transform_mut(leaf.target()) {
                leaf.advance(delta_time, transform);
            }
            if leaf.is_settled() {
                settled += 1;
            }
        }

        if settled != self.settled {
            log::debug!("{} of {} leaves at rest", settled, self.leaves.len());
            self.settled = settled;
        }
    }
}
