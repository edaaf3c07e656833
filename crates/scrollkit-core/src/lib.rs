pub mod config;
pub mod error;
pub mod geometry;
pub mod resize;
pub mod row;
pub mod row_config;
pub mod scroll;
pub mod viewport;

pub use config::{
    AppConfig, DemoConfig, EasingType, GeneralConfig, GutterConfig, GutterSideConfig, HeaderMode,
    ScrollConfig, ViewportConfig,
};
pub use error::{Axis, BoundsWarning, ConfigurationError, Error, Result};
pub use geometry::Point;
pub use resize::{GutterResizeController, GutterSide, ResizeSession};
pub use row::{GutterDescriptor, InputItem, Row, RowGutters, RowInput, Section, SectionHeader};
pub use row_config::{
    build_row_config, build_row_config_with_buffer, FlatRow, HeaderRecord, RowConfig,
    OFFSET_BUFFER,
};
pub use scroll::{Clock, ManualClock, ScrollAnimator, ScrollConfigExt, SystemClock};
pub use viewport::{
    ContentExtents, HeaderOverlay, PinnedHeader, PointerEvent, ScrollState, ScrollTarget,
    ScrollbarEvent, ScrollbarState, ViewportController, ViewportSize, VisibleRow, VisibleWindow,
    WheelEvent,
};
