use leaffall::{
    animation::{AnimationScheduler, ManualClock},
    config::PopulationConfig,
    scene::{population::ScenePopulator, ModelKind, Scene, SceneModel},
};
use rand::{rngs::StdRng, SeedableRng};

struct Forest {
    scene: Scene,
    animation: AnimationScheduler<ManualClock>,
    clock: ManualClock,
}

fn forest(seed: u64) -> Forest {
    let config = PopulationConfig {
        tree_count: 5,
        litter_per_tree: 4,
        max_falling_leaves_per_tree: 3,
        ..PopulationConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scene = Scene::new();
    let clock = ManualClock::new();
    let mut animation = AnimationScheduler::with_clock(clock.clone());

    let mut populator = ScenePopulator::new(config);
    populator.populate(&mut scene, &mut rng);
    for _ in 0..3 {
        populator.spawn_falling_leaves(&mut scene, &mut animation, &mut rng);
    }
    animation.initialize();

    Forest {
        scene,
        animation,
        clock,
    }
}

impl Forest {
    fn run(&mut self, step: f64, seconds: f64) {
        let steps = (seconds / step).round() as usize;
        for _ in 0..steps {
            self.clock.advance(step);
            self.animation.update(&mut self.scene);
        }
    }

    fn leaves(&self) -> Vec<&SceneModel> {
        self.scene
            .models()
            .iter()
            .filter(|m| matches!(m.kind, ModelKind::Leaf(_)))
            .collect()
    }
}

#[test]
fn every_falling_leaf_lands_and_settles() {
    let mut forest = forest(42);
    assert!(!forest.animation.is_empty());

    for _ in 0..200 {
        forest.run(0.1, 0.1);
        for leaf in forest.leaves() {
            assert!(leaf.transform.position.y >= 0.0);
        }
    }

    assert_eq!(forest.animation.settled_count(), forest.animation.len());
    for leaf in forest.leaves() {
        let position = leaf.transform.position;
        assert!(position.y < 0.2, "leaf still airborne at {:?}", position);
    }
}

#[test]
fn settled_leaves_stay_put() {
    let mut forest = forest(3);
    forest.run(0.1, 20.0);
    let resting: Vec<SceneModel> = forest.scene.models().to_vec();

    forest.run(0.1, 5.0);
    assert_eq!(forest.scene.models(), resting.as_slice());
}

#[test]
fn same_seed_and_steps_give_same_scene() {
    let mut a = forest(11);
    let mut b = forest(11);
    a.run(1.0 / 60.0, 3.0);
    b.run(1.0 / 60.0, 3.0);
    assert_eq!(a.scene.models(), b.scene.models());
}

#[test]
fn airborne_pose_does_not_depend_on_frame_rate() {
    let mut coarse = forest(9);
    let mut fine = forest(9);
    coarse.run(0.5, 2.0);
    fine.run(0.05, 2.0);

    for (a, b) in coarse.leaves().iter().zip(fine.leaves()) {
        let (pa, pb) = (a.transform.position, b.transform.position);
        assert!((pa.x - pb.x).abs() < 1e-3);
        assert!((pa.y - pb.y).abs() < 1e-3);
        assert!((pa.z - pb.z).abs() < 1e-3);
    }
}
