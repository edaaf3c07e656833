//! Gutter resize drag sessions
//!
//! `idle -> dragging -> idle`. A pointer down on a gutter handle begins a
//! session, every move yields a new width, pointer up ends it.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scroll::math::get_resize_width;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GutterSide {
    Left,
    Right,
}

impl fmt::Display for GutterSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GutterSide::Left => write!(f, "left"),
            GutterSide::Right => write!(f, "right"),
        }
    }
}

/// State of one drag, alive only between pointer down and pointer up.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    pub side: GutterSide,
    /// Gutter width when the drag began
    pub base_width: f64,
    /// Pointer x when the drag began
    pub starting_position: f64,
    pub min_width: f64,
    /// Width produced by the most recent update
    pub last_width: f64,
}

impl ResizeSession {
    fn width_at(&self, client_x: f64) -> f64 {
        get_resize_width(
            self.side,
            self.min_width,
            self.base_width,
            self.starting_position,
            client_x,
        )
    }

    /// Unclamped width the pointer asked for
    pub fn requested_width_at(&self, client_x: f64) -> f64 {
        let modifier = match self.side {
            GutterSide::Left => 1.0,
            GutterSide::Right => -1.0,
        };
        self.base_width + modifier * (self.starting_position - client_x)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GutterResizeController {
    session: Option<ResizeSession>,
}

impl GutterResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging `side`. Replaces any session left over from a lost pointer up.
    pub fn begin(&mut self, side: GutterSide, base_width: f64, min_width: f64, client_x: f64) {
        if let Some(stale) = &self.session {
            debug!(side = %stale.side, "discarding unfinished gutter resize");
        }
        debug!(%side, base_width, min_width, client_x, "gutter resize started");
        self.session = Some(ResizeSession {
            side,
            base_width,
            starting_position: client_x,
            min_width,
            last_width: base_width,
        });
    }

    /// Width for the pointer at `client_x`, or `None` when not dragging.
    pub fn update(&mut self, client_x: f64) -> Option<f64> {
        let session = self.session.as_mut()?;
        let width = session.width_at(client_x);
        session.last_width = width;
        Some(width)
    }

    /// Final width; the controller returns to idle.
    pub fn end(&mut self, client_x: f64) -> Option<f64> {
        let session = self.session.take()?;
        let width = session.width_at(client_x);
        debug!(side = %session.side, width, "gutter resize finished");
        Some(width)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&ResizeSession> {
        self.session.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_gutter_drag() {
        let mut resize = GutterResizeController::new();
        resize.begin(GutterSide::Left, 50.0, 10.0, 100.0);
        assert!(resize.is_active());

        assert_eq!(resize.update(80.0), Some(70.0));
        assert_eq!(resize.session().map(|s| s.last_width), Some(70.0));
        assert_eq!(resize.update(200.0), Some(10.0));
        assert_eq!(resize.end(90.0), Some(60.0));
        assert!(!resize.is_active());
    }

    #[test]
    fn test_right_gutter_drag() {
        let mut resize = GutterResizeController::new();
        resize.begin(GutterSide::Right, 40.0, 20.0, 300.0);

        assert_eq!(resize.update(330.0), Some(70.0));
        assert_eq!(resize.update(250.0), Some(20.0));
        assert_eq!(resize.end(310.0), Some(50.0));
    }

    #[test]
    fn test_no_maximum_width() {
        let mut resize = GutterResizeController::new();
        resize.begin(GutterSide::Left, 50.0, 10.0, 5_000.0);
        assert_eq!(resize.update(0.0), Some(5_050.0));
    }

    #[test]
    fn test_idle_controller_ignores_moves() {
        let mut resize = GutterResizeController::new();
        assert_eq!(resize.update(10.0), None);
        assert_eq!(resize.end(10.0), None);
    }

    #[test]
    fn test_begin_replaces_previous_session() {
        let mut resize = GutterResizeController::new();
        resize.begin(GutterSide::Left, 50.0, 10.0, 100.0);
        resize.update(60.0);

        resize.begin(GutterSide::Right, 30.0, 5.0, 400.0);
        let session = resize.session().cloned().unwrap();
        assert_eq!(session.side, GutterSide::Right);
        assert_eq!(session.last_width, 30.0);
        assert_eq!(resize.update(410.0), Some(40.0));
    }

    #[test]
    fn test_requested_width_is_unclamped() {
        let mut resize = GutterResizeController::new();
        resize.begin(GutterSide::Left, 50.0, 10.0, 100.0);
        let session = resize.session().unwrap();
        assert_eq!(session.requested_width_at(200.0), -50.0);
    }
}
