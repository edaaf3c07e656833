//! Viewport state machine
//!
//! - `controller` - the single stateful object hosts talk to
//! - `scrollbars` - scrollbar visibility and content extents
//! - `window` - rows to render for a scroll position
//! - `headers` - locking and stacking header overlays
//! - `events` - input events

pub mod controller;
pub mod events;
pub mod headers;
pub mod scrollbars;
pub mod window;

pub use controller::{ScrollState, ScrollTarget, ViewportController, ViewportSize};
pub use events::{PointerEvent, ScrollbarEvent, WheelEvent};
pub use headers::{compute_header_overlay, HeaderOverlay, PinnedHeader};
pub use scrollbars::{compute_scrollbar_state, ContentExtents, ScrollbarState};
pub use window::{display_buffer, VisibleRow, VisibleWindow};
