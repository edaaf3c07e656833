//! Input events fed to the controller by the host

use crate::error::Axis;
use crate::geometry::Point;
use crate::resize::GutterSide;

/// Wheel or trackpad motion, in content pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelEvent {
    pub delta: Point,
}

impl WheelEvent {
    pub fn new(delta_x: f64, delta_y: f64) -> Self {
        Self {
            delta: Point::new(delta_x, delta_y),
        }
    }

    pub fn vertical(delta_y: f64) -> Self {
        Self::new(0.0, delta_y)
    }

    pub fn horizontal(delta_x: f64) -> Self {
        Self::new(delta_x, 0.0)
    }
}

/// Pointer press, move or release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
    /// Gutter handle under the pointer, if any
    pub handle: Option<GutterSide>,
}

impl PointerEvent {
    pub fn at(client_x: f64, client_y: f64) -> Self {
        Self {
            client_x,
            client_y,
            handle: None,
        }
    }

    pub fn on_handle(side: GutterSide, client_x: f64, client_y: f64) -> Self {
        Self {
            client_x,
            client_y,
            handle: Some(side),
        }
    }
}

/// A scrollbar thumb moved to an absolute transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollbarEvent {
    pub axis: Axis,
    pub position: f64,
}

impl ScrollbarEvent {
    pub fn new(axis: Axis, position: f64) -> Self {
        Self { axis, position }
    }
}
