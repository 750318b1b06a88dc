//! Camera orientation, projection and the mouse/keyboard adapter driving them.
//!
//! The camera keeps a normalized `front`, `right` and `up` basis derived from
//! yaw/pitch and a fixed world-up vector. Yaw and pitch are stored in radians.

use cgmath::{Deg, InnerSpace, Matrix4, Point3, Rad, Vector3, perspective};
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

/// wgpu clip space uses a 0..1 depth range where cgmath produces OpenGL's -1..1.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

pub const DEFAULT_POSITION: Point3<f32> = Point3::new(0.0, 0.0, 25.0);
pub const DEFAULT_POSITION_2: Point3<f32> = Point3::new(25.0, 0.0, 0.0);
pub const DEFAULT_TARGET: Point3<f32> = Point3::new(0.0, 0.0, 0.0);
pub const DEFAULT_UP: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);

pub const KEYBOARD_SPEED: f32 = 0.2;
pub const MOUSE_SENSITIVITY: f32 = 0.001;
const PITCH_LIMIT: Deg<f32> = Deg(89.0);

/// Preset viewpoints along the world axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraType {
    X,
    Z,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Movement {
    NoMovement,
    Left,
    Right,
    Up,
    Down,
    Forward,
    Back,
}

#[derive(Clone, Debug)]
pub struct Camera {
    position: Point3<f32>,
    target: Point3<f32>,
    up: Vector3<f32>,
    world_up: Vector3<f32>,
    front: Vector3<f32>,
    right: Vector3<f32>,
    yaw: Rad<f32>,
    pitch: Rad<f32>,
}

impl Camera {
    pub fn new(position: Point3<f32>, target: Point3<f32>, up: Vector3<f32>) -> Self {
        let mut camera = Self {
            position,
            target,
            up: DEFAULT_UP,
            world_up: DEFAULT_UP,
            front: Vector3::new(0.0, 0.0, -1.0),
            right: Vector3::unit_x(),
            yaw: Rad(0.0),
            pitch: Rad(0.0),
        };
        camera.setup(position, target, up);
        camera
    }

    fn setup(&mut self, position: Point3<f32>, target: Point3<f32>, up: Vector3<f32>) {
        self.position = position;
        self.target = target;
        if up.magnitude2() > f32::EPSILON {
            self.world_up = up.normalize();
        }
        let direction = target - position;
        if direction.magnitude2() > f32::EPSILON {
            self.front = direction.normalize();
        } else {
            log::warn!("camera target coincides with its position; keeping the previous view direction");
        }
        self.calculate_yaw_pitch();
        self.update_camera_vectors();
    }

    fn calculate_yaw_pitch(&mut self) {
        self.yaw = Rad(self.front.z.atan2(self.front.x));
        self.pitch = Rad(self.front.y.clamp(-1.0, 1.0).asin());
    }

    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    pub fn set_position(&mut self, position: Point3<f32>) {
        self.setup(position, self.target, self.world_up);
    }

    /// The point one unit ahead of the camera.
    pub fn target(&self) -> Point3<f32> {
        self.position + self.front
    }

    pub fn set_target(&mut self, target: Point3<f32>) {
        self.setup(self.position, target, self.world_up);
    }

    pub fn set_camera(&mut self, camera_type: CameraType) {
        match camera_type {
            CameraType::X => self.setup(DEFAULT_POSITION, DEFAULT_TARGET, DEFAULT_UP),
            CameraType::Z => self.setup(DEFAULT_POSITION_2, DEFAULT_TARGET, DEFAULT_UP),
        }
    }

    pub fn front(&self) -> Vector3<f32> {
        self.front
    }

    pub fn right(&self) -> Vector3<f32> {
        self.right
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn yaw(&self) -> Rad<f32> {
        self.yaw
    }

    pub fn pitch(&self) -> Rad<f32> {
        self.pitch
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.target(), self.up)
    }

    pub fn keyboard_input(&mut self, movement: Movement) {
        let step = match movement {
            Movement::NoMovement => return,
            Movement::Left => self.right * -KEYBOARD_SPEED,
            Movement::Right => self.right * KEYBOARD_SPEED,
            Movement::Up => self.up * KEYBOARD_SPEED,
            Movement::Down => self.up * -KEYBOARD_SPEED,
            Movement::Forward => self.front * KEYBOARD_SPEED,
            Movement::Back => self.front * -KEYBOARD_SPEED,
        };
        self.position += step;
        self.target = self.target();
    }

    /// Add `yaw`/`pitch` (radians) and keep the pitch away from the poles.
    pub fn update_yaw_pitch(&mut self, yaw: f32, pitch: f32) {
        let limit: Rad<f32> = PITCH_LIMIT.into();
        self.yaw += Rad(yaw);
        self.pitch = Rad((self.pitch.0 + pitch).clamp(-limit.0, limit.0));
        self.update_front();
        self.update_camera_vectors();
    }

    fn update_front(&mut self) {
        let (sin_yaw, cos_yaw) = self.yaw.0.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.0.sin_cos();
        self.front = Vector3::new(cos_yaw * cos_pitch, sin_pitch, sin_yaw * cos_pitch).normalize();
        self.target = self.target();
    }

    fn update_camera_vectors(&mut self) {
        let right = self.front.cross(self.world_up);
        if right.magnitude2() > f32::EPSILON {
            self.right = right.normalize();
        } else {
            log::warn!("camera looks along its up axis; keeping the previous right vector");
        }
        self.up = self.right.cross(self.front).normalize();
    }
}

/// The perspective half of the camera. Kept apart so a resize never touches orientation.
#[derive(Clone, Debug)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// Translates winit input into camera movement.
///
/// Arrow keys strafe and lift, `A`/`Z` move forward/back, and dragging with the
/// left button turns the camera.
#[derive(Debug, Default)]
pub struct CameraController {
    last_point: Option<PhysicalPosition<f64>>,
    dragging: bool,
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the event changed the camera.
    pub fn handle_window_events(&mut self, camera: &mut Camera, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                let movement = movement_for_key(*key);
                camera.keyboard_input(movement);
                movement != Movement::NoMovement
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                self.dragging = state.is_pressed();
                false
            }
            WindowEvent::CursorMoved { position, .. } => self.cursor_moved(camera, *position),
            WindowEvent::CursorLeft { .. } => {
                self.last_point = None;
                false
            }
            _ => false,
        }
    }

    fn cursor_moved(&mut self, camera: &mut Camera, point: PhysicalPosition<f64>) -> bool {
        let last = self.last_point.replace(point);
        match last {
            Some(last) if self.dragging => {
                let dx = (point.x - last.x) as f32 * MOUSE_SENSITIVITY;
                let dy = (point.y - last.y) as f32 * MOUSE_SENSITIVITY;
                camera.update_yaw_pitch(dx, -dy);
                true
            }
            _ => false,
        }
    }
}

pub fn movement_for_key(key: KeyCode) -> Movement {
    match key {
        KeyCode::ArrowLeft => Movement::Left,
        KeyCode::ArrowRight => Movement::Right,
        KeyCode::ArrowUp => Movement::Up,
        KeyCode::ArrowDown => Movement::Down,
        KeyCode::KeyA => Movement::Forward,
        KeyCode::KeyZ => Movement::Back,
        _ => Movement::NoMovement,
    }
}
