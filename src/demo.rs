//! Per-frame application logic, independent of the window and GPU

use cgmath::Vector3;
use rand::{rngs::StdRng, Rng, SeedableRng};
use winit::keyboard::KeyCode;

use crate::{
    animation::{AnimationScheduler, Clock, SystemClock},
    config::{ConfigError, DemoConfig},
    gfx::{
        camera::{CameraMovement, FlyCamera},
        input::InputState,
    },
    scene::{
        population::{Props, ScenePopulator},
        Scene,
    },
};

/// Lantern speed in units per second
pub const LANTERN_SPEED: f32 = 1.0;

const CAMERA_KEYS: [(KeyCode, CameraMovement); 4] = [
    (KeyCode::KeyW, CameraMovement::Forward),
    (KeyCode::KeyS, CameraMovement::Backward),
    (KeyCode::KeyA, CameraMovement::Left),
    (KeyCode::KeyD, CameraMovement::Right),
];

fn lantern_direction(key: KeyCode) -> Option<Vector3<f32>> {
    match key {
        KeyCode::ArrowUp => Some(Vector3::new(0.0, 0.0, 1.0)),
        KeyCode::ArrowDown => Some(Vector3::new(0.0, 0.0, -1.0)),
        KeyCode::ArrowLeft => Some(Vector3::new(1.0, 0.0, 0.0)),
        KeyCode::ArrowRight => Some(Vector3::new(-1.0, 0.0, 0.0)),
        _ => None,
    }
}

const LANTERN_KEYS: [KeyCode; 4] = [
    KeyCode::ArrowUp,
    KeyCode::ArrowDown,
    KeyCode::ArrowLeft,
    KeyCode::ArrowRight,
];

/// The falling-leaf scene plus everything that changes it from frame to frame
pub struct LeafFallDemo<C: Clock = SystemClock> {
    scene: Scene,
    animation: AnimationScheduler<C>,
    populator: ScenePopulator,
    rng: StdRng,
    camera: FlyCamera,
    props: Props,
    started: bool,
}

impl LeafFallDemo<SystemClock> {
    pub fn new(config: &DemoConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> LeafFallDemo<C> {
    /// Builds the scene from `config.seed` and releases the first wave of leaves
    pub fn with_clock(config: &DemoConfig, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut scene = Scene::new();
        let mut animation = AnimationScheduler::with_clock(clock);
        let mut populator = ScenePopulator::new(config.population.clone());

        let props = populator.populate(&mut scene, &mut rng);
        populator.spawn_falling_leaves(&mut scene, &mut animation, &mut rng);

        let camera = FlyCamera::new(
            Vector3::new(1.67, 0.6, 4.0),
            config.window_width as f32 / config.window_height as f32,
        );

        Ok(Self {
            scene,
            animation,
            populator,
            rng,
            camera,
            props,
            started: false,
        })
    }

    /// Starts animation time; later calls do nothing
    pub fn start(&mut self) {
        if !self.started {
            self.animation.initialize();
            self.started = true;
        }
    }

    /// Runs one frame: leaves first, then camera, lantern and leaf spawning
    pub fn frame(&mut self, input: &InputState, delta_time: f32) {
        self.start();
        self.animation.update(&mut self.scene);

        for (key, movement) in CAMERA_KEYS {
            if input.is_held(key) {
                self.camera.move_camera(movement, delta_time);
            }
        }
        let (dx, dy) = input.mouse_delta();
        if dx != 0.0 || dy != 0.0 {
            self.camera.rotate(dx, dy);
        }
        if input.scroll() != 0.0 {
            self.camera.zoom(input.scroll());
        }

        let direction: Vector3<f32> = LANTERN_KEYS
            .into_iter()
            .filter(|key| input.is_held(*key))
            .filter_map(lantern_direction)
            .sum();
        if direction != Vector3::new(0.0, 0.0, 0.0) {
            self.scene.translate_with_light(
                self.props.lantern,
                Some(self.props.lantern_light),
                direction * (LANTERN_SPEED * delta_time),
            );
        }

        let probability = f64::from(self.populator.config().leaf_spawn_probability);
        if self.rng.random_bool(probability) {
            self.populator
                .spawn_falling_leaves(&mut self.scene, &mut self.animation, &mut self.rng);
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &FlyCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut FlyCamera {
        &mut self.camera
    }

    pub fn animation(&self) -> &AnimationScheduler<C> {
        &self.animation
    }

    pub fn props(&self) -> &Props {
        &self.props
    }
}
