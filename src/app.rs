use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowAttributes, WindowId},
};

use crate::{
    animation::{Clock, SystemClock},
    config::DemoConfig,
    demo::LeafFallDemo,
    error::{LeafFallError, Result},
    gfx::{input::InputState, render_engine::RenderEngine},
};

/// Owns the event loop and runs the demo in a window until it is closed
pub struct LeafFallApp {
    event_loop: EventLoop<()>,
    app_state: AppState,
}

struct AppState {
    config: DemoConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    demo: LeafFallDemo,
    input: InputState,
    frame_clock: SystemClock,
    last_frame: f64,
    /// First fatal error raised inside a callback, returned from `run`
    error: Option<LeafFallError>,
}

impl LeafFallApp {
    pub fn new(config: DemoConfig) -> Result<Self> {
        let event_loop = EventLoop::new()?;
        let demo = LeafFallDemo::new(&config)?;

        Ok(Self {
            event_loop,
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                demo,
                input: InputState::new(),
                frame_clock: SystemClock::new(),
                last_frame: 0.0,
                error: None,
            },
        })
    }

    /// Runs the event loop until the window closes or a fatal error occurs
    pub fn run(self) -> Result<()> {
        let LeafFallApp {
            event_loop,
            mut app_state,
        } = self;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut app_state)?;

        match app_state.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: LeafFallError) {
        log::error!("{}", error);
        self.error.get_or_insert(error);
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let size = LogicalSize::new(self.config.window_width, self.config.window_height);
        let attributes = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(size);
        let window = Arc::new(event_loop.create_window(attributes)?);

        if window
            .set_cursor_grab(CursorGrabMode::Confined)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))
            .is_err()
        {
            log::warn!("Cursor capture failed; mouse look may stop at edges");
        }
        window.set_cursor_visible(false);

        let (width, height) = window.inner_size().into();
        let renderer = pollster::block_on(RenderEngine::new(
            window.clone(),
            width,
            height,
            self.config.msaa_samples,
        ))?;

        self.demo.camera_mut().resize(width, height);
        self.demo.start();
        self.last_frame = self.frame_clock.now_seconds();

        self.window = Some(window);
        self.render_engine = Some(renderer);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = self.frame_clock.now_seconds();
        let delta_time = (now - self.last_frame) as f32;
        self.last_frame = now;

        self.demo.frame(&self.input, delta_time);
        self.input.end_frame();

        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };
        let result = render_engine.render(self.demo.scene(), self.demo.camera());
        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost; reconfiguring");
                render_engine.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, LeafFallError::OutOfMemory)
            }
            Err(error) => log::warn!("Skipping frame: {}", error),
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(error) = self.create_window(event_loop) {
            self.fail(event_loop, error);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state,
                        ..
                    },
                ..
            } => {
                if key_code == KeyCode::Escape && state == ElementState::Pressed {
                    event_loop.exit();
                }
                self.input.process_key(key_code, state);
            }
            WindowEvent::MouseWheel { delta, .. } => self.input.add_scroll(delta),
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                log::debug!("Window resized to {}x{}", width, height);
                self.demo.camera_mut().resize(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
            }
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.input.add_mouse_motion(dx, dy);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}
