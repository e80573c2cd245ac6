//! Interactive viewer state and the animation clock.
//!
//! The viewer owns a [`SceneState`] and passes it to
//! [`Transmission::render`](crate::transmission::Transmission::render) each frame;
//! gear meshes never look at it.

use crate::float_types::{Real, TAU};
use nalgebra::{Isometry3, Matrix4, Orthographic3, Perspective3, Point3, Rotation3, Vector3};
use std::time::Instant;

/// Degrees of rotation per pixel of mouse drag.
pub const ANGFACT: Real = 1.0;
/// Scale change per pixel of mouse drag.
pub const SCLFACT: Real = 0.005;
/// Smallest allowed scale factor.
pub const MIN_SCALE: Real = 0.05;
/// Equivalent drag distance of one scroll wheel click.
pub const SCROLL_WHEEL_CLICK_FACTOR: Real = 5.0;

/// Height of the orbit the light follows when it is switched on.
pub const ORBIT_HEIGHT: Real = 24.0;
/// Orbit period, in animation time units.
pub const ORBIT_SLOWDOWN: Real = 4.0;
/// Light position while the orbiting light is off.
pub const FIXED_LIGHT: [Real; 3] = [-60.0, 10.0, 10.0];

/// Distance of the eye from the origin, looking down −Z.
pub const EYE_DISTANCE: Real = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    Orthographic,
    #[default]
    Perspective,
}

impl Projection {
    /// Clip-space projection for a square viewport.
    pub fn matrix(&self) -> Matrix4<Real> {
        match self {
            Projection::Orthographic => {
                Orthographic3::new(-2.0, 2.0, -2.0, 2.0, 0.1, 1000.0).to_homogeneous()
            },
            Projection::Perspective => {
                Perspective3::new(1.0, (70.0 as Real).to_radians(), 0.1, 1000.0).to_homogeneous()
            },
        }
    }
}

/// Colours offered for the axes, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisColor {
    Red,
    Yellow,
    Green,
    Cyan,
    Blue,
    Magenta,
    #[default]
    White,
    Black,
}

impl AxisColor {
    pub const fn rgb(&self) -> [f32; 3] {
        match self {
            AxisColor::Red => [1.0, 0.0, 0.0],
            AxisColor::Yellow => [1.0, 1.0, 0.0],
            AxisColor::Green => [0.0, 1.0, 0.0],
            AxisColor::Cyan => [0.0, 1.0, 1.0],
            AxisColor::Blue => [0.0, 0.0, 1.0],
            AxisColor::Magenta => [1.0, 0.0, 1.0],
            AxisColor::White => [1.0, 1.0, 1.0],
            AxisColor::Black => [0.0, 0.0, 0.0],
        }
    }
}

/// Linear depth-cueing fog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: [f32; 4],
    pub density: Real,
    pub start: Real,
    pub end: Real,
}

pub const DEPTH_CUE_FOG: Fog = Fog {
    color: [0.0, 0.0, 0.0, 1.0],
    density: 0.30,
    start: 1.5,
    end: 4.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
}

/// What the caller should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Redraw,
    Quit,
    Ignored,
}

/// Everything the viewer can change at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    /// Rotation about X, degrees
    pub x_rot: Real,
    /// Rotation about Y, degrees
    pub y_rot: Real,
    pub scale: Real,
    pub projection: Projection,
    pub axes_on: bool,
    pub axis_color: AxisColor,
    pub depth_cue: bool,
    pub debug: bool,
    pub light_on: bool,
    pub corroded: bool,
    pub contact_lines: bool,
    pub frozen: bool,
    left_down: bool,
    middle_down: bool,
    mouse: (i32, i32),
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            x_rot: 0.0,
            y_rot: 0.0,
            scale: 1.0,
            projection: Projection::Perspective,
            axes_on: false,
            axis_color: AxisColor::White,
            depth_cue: false,
            debug: false,
            light_on: false,
            corroded: false,
            contact_lines: false,
            frozen: false,
            left_down: false,
            middle_down: false,
            mouse: (0, 0),
        }
    }
}

impl SceneState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset view transformations, colours and the menu toggles.
    ///
    /// Animation, lighting and overlay toggles are kept.
    pub fn reset(&mut self) {
        *self = Self {
            light_on: self.light_on,
            corroded: self.corroded,
            contact_lines: self.contact_lines,
            frozen: self.frozen,
            ..Self::default()
        };
    }

    /// Keyboard shortcuts: `o`/`p` projection, `f` freeze, `l` contact lines,
    /// `c` corrosion shading, `x` axes, `0` orbiting light, `q`/Esc quit.
    pub fn key(&mut self, key: char) -> KeyOutcome {
        if self.debug {
            tracing::debug!(?key, "keyboard");
        }
        match key.to_ascii_lowercase() {
            'o' => self.projection = Projection::Orthographic,
            'p' => self.projection = Projection::Perspective,
            'f' => self.frozen = !self.frozen,
            'l' => self.contact_lines = !self.contact_lines,
            'c' => self.corroded = !self.corroded,
            'x' => self.axes_on = !self.axes_on,
            '0' => self.light_on = !self.light_on,
            'q' | '\u{1b}' => return KeyOutcome::Quit,
            _ => {
                tracing::warn!(?key, "don't know what to do with keyboard hit");
                return KeyOutcome::Ignored;
            },
        }
        KeyOutcome::Redraw
    }

    pub fn mouse_button(&mut self, button: MouseButton, pressed: bool, x: i32, y: i32) {
        if self.debug {
            tracing::debug!(?button, pressed, x, y, "mouse button");
        }
        match button {
            MouseButton::Left => self.left_down = pressed,
            MouseButton::Middle => self.middle_down = pressed,
            MouseButton::Right => {},
            MouseButton::WheelUp => self.rescale(SCLFACT * SCROLL_WHEEL_CLICK_FACTOR),
            MouseButton::WheelDown => self.rescale(-SCLFACT * SCROLL_WHEEL_CLICK_FACTOR),
        }
        if pressed {
            self.mouse = (x, y);
        }
    }

    /// Drag with the left button rotates, with the middle button scales.
    pub fn mouse_motion(&mut self, x: i32, y: i32) {
        let dx = (x - self.mouse.0) as Real;
        let dy = (y - self.mouse.1) as Real;

        if self.left_down {
            self.x_rot += ANGFACT * dy;
            self.y_rot += ANGFACT * dx;
        }
        if self.middle_down {
            self.rescale(SCLFACT * (dx - dy));
        }
        self.mouse = (x, y);
    }

    fn rescale(&mut self, delta: Real) {
        self.scale = (self.scale + delta).max(MIN_SCALE);
    }

    /// World-to-eye transform: look from `(0, 0, 30)`, then rotate and scale the scene.
    pub fn view_matrix(&self) -> Matrix4<Real> {
        let eye = Point3::new(0.0, 0.0, EYE_DISTANCE);
        let look = Isometry3::look_at_rh(&eye, &Point3::origin(), &Vector3::y());
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), self.y_rot.to_radians());
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), self.x_rot.to_radians());
        look.to_homogeneous()
            * ry.to_homogeneous()
            * rx.to_homogeneous()
            * Matrix4::new_scaling(self.scale.max(MIN_SCALE))
    }

    pub fn fog(&self) -> Option<Fog> {
        self.depth_cue.then_some(DEPTH_CUE_FOG)
    }

    /// Light source position at animation `time`.
    pub fn light_position(&self, time: Real) -> Point3<Real> {
        if self.light_on {
            let phase = TAU * time / ORBIT_SLOWDOWN;
            Point3::new(-ORBIT_HEIGHT * phase.sin(), 0.0, ORBIT_HEIGHT * phase.cos())
        } else {
            Point3::from(FIXED_LIGHT)
        }
    }
}

/// Source of elapsed wall time.
pub trait Clock {
    fn elapsed_ms(&self) -> u64;
}

/// Monotonic clock started at construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Clock that reports whatever it was set to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManualClock(pub u64);

impl Clock for ManualClock {
    fn elapsed_ms(&self) -> u64 {
        self.0
    }
}

/// Maps wall time onto the repeating animation time axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClock {
    pub ms_per_cycle: u64,
    pub speed: Real,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self {
            ms_per_cycle: 500_000,
            speed: 400.0,
        }
    }
}

impl AnimationClock {
    /// Animation time after `ms` milliseconds, in `[0, speed)`.
    pub fn time_at(&self, ms: u64) -> Real {
        let ms = ms % self.ms_per_cycle.max(1);
        self.speed * ms as Real / self.ms_per_cycle.max(1) as Real
    }

    pub fn time(&self, clock: &impl Clock) -> Real {
        self.time_at(clock.elapsed_ms())
    }

    /// Drive gear rotation at animation `time`: `2π·time` degrees, returned in radians.
    pub fn drive_angle(time: Real) -> Real {
        (TAU * time).to_radians()
    }
}
