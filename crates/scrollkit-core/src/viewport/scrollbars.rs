//! Scrollbar visibility and content extents

use super::ViewportSize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollbarState {
    #[default]
    NoScrollbars,
    VerticalOnly,
    HorizontalOnly,
    Both,
}

impl ScrollbarState {
    pub fn from_flags(vertical: bool, horizontal: bool) -> Self {
        match (vertical, horizontal) {
            (false, false) => ScrollbarState::NoScrollbars,
            (true, false) => ScrollbarState::VerticalOnly,
            (false, true) => ScrollbarState::HorizontalOnly,
            (true, true) => ScrollbarState::Both,
        }
    }

    #[inline]
    pub fn vertical(&self) -> bool {
        matches!(self, ScrollbarState::VerticalOnly | ScrollbarState::Both)
    }

    #[inline]
    pub fn horizontal(&self) -> bool {
        matches!(self, ScrollbarState::HorizontalOnly | ScrollbarState::Both)
    }
}

/// Decide which scrollbars to draw.
///
/// Each scrollbar takes space from the other axis, so a bar is also needed
/// when the content only overflows once the other bar is drawn. Without a
/// content width there is no horizontal scrolling.
pub fn compute_scrollbar_state(
    content_width: Option<f64>,
    content_height: f64,
    viewport: ViewportSize,
    vertical_scrollbar_width: f64,
    horizontal_scrollbar_height: f64,
) -> ScrollbarState {
    let (vw, vh, ch) = (viewport.width, viewport.height, content_height);

    match content_width {
        None => ScrollbarState::from_flags(vh < ch, false),
        Some(cw) => {
            let vertical = vh < ch || (vw < cw && vh < ch + horizontal_scrollbar_height);
            let horizontal = vw < cw || (vh < ch && vw < cw + vertical_scrollbar_width);
            ScrollbarState::from_flags(vertical, horizontal)
        }
    }
}

/// Scrollable sizes after scrollbars are accounted for.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContentExtents {
    /// Width of the scroll track: content plus gutters and handles.
    /// `None` when no content width is configured.
    pub width: Option<f64>,
    pub height: f64,
    /// Viewport area left for rows once scrollbars are drawn
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub max_horizontal_transform: f64,
    pub max_vertical_transform: f64,
}

impl ContentExtents {
    pub fn new(
        width: Option<f64>,
        height: f64,
        viewport: ViewportSize,
        scrollbars: ScrollbarState,
        vertical_scrollbar_width: f64,
        horizontal_scrollbar_height: f64,
    ) -> Self {
        let viewport_width = if scrollbars.vertical() {
            (viewport.width - vertical_scrollbar_width).max(0.0)
        } else {
            viewport.width
        };
        let viewport_height = if scrollbars.horizontal() {
            (viewport.height - horizontal_scrollbar_height).max(0.0)
        } else {
            viewport.height
        };

        Self {
            width,
            height,
            viewport_width,
            viewport_height,
            max_horizontal_transform: width.map_or(0.0, |w| (w - viewport_width).max(0.0)),
            max_vertical_transform: crate::scroll::math::get_max_height(height, viewport_height),
        }
    }
}
