//! First-person fly camera

use cgmath::{perspective, Deg, InnerSpace, Matrix4, Point3, Vector3};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

const WORLD_UP: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);

/// Largest mouse delta (in pixels) applied in a single frame
pub const MAX_MOUSE_DELTA: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
}

/// Free-flying camera steered with WASD and the mouse
#[derive(Debug, Clone, Copy)]
pub struct FlyCamera {
    pub position: Vector3<f32>,
    /// Heading in degrees; -90 looks down -Z
    pub yaw: f32,
    /// Elevation in degrees, clamped to ±89
    pub pitch: f32,
    /// Vertical field of view in degrees, clamped to [1, 45]
    pub fovy: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Movement speed in units per second
    pub speed: f32,
    /// Degrees of rotation per pixel of mouse motion
    pub sensitivity: f32,
}

impl FlyCamera {
    pub fn new(position: Vector3<f32>, aspect: f32) -> Self {
        Self {
            position,
            yaw: -90.0,
            pitch: 0.0,
            fovy: 45.0,
            aspect,
            znear: 0.1,
            zfar: 100.0,
            speed: 2.5,
            sensitivity: 0.1,
        }
    }

    pub fn front(&self) -> Vector3<f32> {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        let horizontal = pitch.cos();
        Vector3::new(yaw.cos() * horizontal, pitch.sin(), yaw.sin() * horizontal).normalize()
    }

    pub fn right(&self) -> Vector3<f32> {
        self.front().cross(WORLD_UP).normalize()
    }

    pub fn up(&self) -> Vector3<f32> {
        self.right().cross(self.front()).normalize()
    }

    pub fn move_camera(&mut self, movement: CameraMovement, delta_time: f32) {
        let velocity = self.speed * delta_time;
        match movement {
            CameraMovement::Forward => self.position += self.front() * velocity,
            CameraMovement::Backward => self.position -= self.front() * velocity,
            CameraMovement::Left => self.position -= self.right() * velocity,
            CameraMovement::Right => self.position += self.right() * velocity,
        }
    }

    /// Turns the camera by a mouse delta in pixels (y grows downward)
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        let dx = dx.clamp(-MAX_MOUSE_DELTA, MAX_MOUSE_DELTA);
        let dy = dy.clamp(-MAX_MOUSE_DELTA, MAX_MOUSE_DELTA);
        self.yaw += dx * self.sensitivity;
        self.pitch = (self.pitch - dy * self.sensitivity).clamp(-89.0, 89.0);
    }

    /// Narrows the field of view for positive scroll
    pub fn zoom(&mut self, scroll: f32) {
        self.fovy = (self.fovy - scroll).clamp(1.0, 45.0);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::new(self.position.x, self.position.y, self.position.z);
        Matrix4::look_at_rh(eye, eye + self.front(), self.up())
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        let projection = perspective(Deg(self.fovy), self.aspect, self.znear, self.zfar);
        OPENGL_TO_WGPU_MATRIX * projection * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    fn camera() -> FlyCamera {
        FlyCamera::new(Vector3::new(0.0, 0.0, 0.0), 1.5)
    }

    #[test]
    fn test_default_camera_looks_down_negative_z() {
        let front = camera().front();
        assert!(front.x.abs() < 1e-6);
        assert!(front.y.abs() < 1e-6);
        assert!((front.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_movement_follows_view_axes() {
        let mut cam = camera();
        cam.move_camera(CameraMovement::Forward, 1.0);
        assert!((cam.position.z + 2.5).abs() < 1e-5);

        let mut cam = camera();
        cam.move_camera(CameraMovement::Right, 1.0);
        assert!((cam.position.x - 2.5).abs() < 1e-5);

        let mut cam = camera();
        cam.move_camera(CameraMovement::Left, 0.5);
        cam.move_camera(CameraMovement::Backward, 0.5);
        assert!((cam.position.x + 1.25).abs() < 1e-5);
        assert!((cam.position.z - 1.25).abs() < 1e-5);
    }

    #[test]
    fn test_rotation_clamps_pitch_and_mouse_delta() {
        let mut cam = camera();
        cam.rotate(500.0, 0.0);
        assert!((cam.yaw - (-89.0)).abs() < 1e-5);

        for _ in 0..200 {
            cam.rotate(0.0, -10.0);
        }
        assert_eq!(cam.pitch, 89.0);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut cam = camera();
        cam.zoom(100.0);
        assert_eq!(cam.fovy, 1.0);
        cam.zoom(-100.0);
        assert_eq!(cam.fovy, 45.0);
    }

    #[test]
    fn test_point_ahead_projects_inside_clip_volume() {
        let cam = camera();
        let clip = cam.view_projection() * Vector4::new(0.0, 0.0, -5.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);

        let behind = cam.view_projection() * Vector4::new(0.0, 0.0, 5.0, 1.0);
        assert!(behind.w < 0.0);
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut cam = camera();
        cam.resize(800, 400);
        assert_eq!(cam.aspect, 2.0);
        cam.resize(0, 400);
        assert_eq!(cam.aspect, 2.0);
    }
}
