//! The stateful viewport: scroll position, row model and gutter layout.
//!
//! Hosts feed measurements and input events in and read back the visible
//! window. Nothing here draws; everything is plain data.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace};

use super::events::{PointerEvent, ScrollbarEvent, WheelEvent};
use super::headers::{compute_header_overlay, HeaderOverlay};
use super::scrollbars::{compute_scrollbar_state, ContentExtents, ScrollbarState};
use super::window::{collect_rows, display_buffer, VisibleWindow, DEFAULT_DISPLAY_BUFFER};
use crate::config::{
    AppConfig, GutterConfig, GutterSideConfig, HeaderMode, ScrollConfig, ViewportConfig,
};
use crate::error::{Axis, BoundsWarning, ConfigurationError, Result};
use crate::geometry::Point;
use crate::resize::{GutterResizeController, GutterSide, ResizeSession};
use crate::row::{InputItem, RowInput};
use crate::row_config::{build_row_config_with_buffer, RowConfig};
use crate::scroll::math::{
    clamp_horizontal_transform, get_vertical_scroll_values, VerticalScrollValues,
};
use crate::scroll::{Clock, ScrollAnimator, ScrollConfigExt, SystemClock, WheelAccumulator};

/// Differences below this are float noise, not clamping.
const CLAMP_EPSILON: f64 = 1e-9;

/// Oldest warnings are dropped past this many undrained entries.
const MAX_PENDING_WARNINGS: usize = 256;

type ScrollCallback = Box<dyn FnMut(&ScrollState)>;
type ResizeCallback = Box<dyn FnMut(GutterSide, f64)>;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub horizontal_transform: f64,
    pub vertical_transform: f64,
    pub top_partition_index: usize,
    pub display_buffer: usize,
    pub should_render_horizontal_scrollbar: bool,
    pub should_render_vertical_scrollbar: bool,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            horizontal_transform: 0.0,
            vertical_transform: 0.0,
            top_partition_index: 0,
            display_buffer: DEFAULT_DISPLAY_BUFFER,
            should_render_horizontal_scrollbar: false,
            should_render_vertical_scrollbar: false,
        }
    }
}

impl ScrollState {
    pub fn position(&self) -> Point {
        Point::new(self.horizontal_transform, self.vertical_transform)
    }
}

/// Where a programmatic scroll should end up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollTarget {
    /// Absolute transforms; a missing axis keeps its current value
    Position { x: Option<f64>, y: Option<f64> },
    /// Bring a flattened row to the top of the content area
    Row { index: usize, x: Option<f64> },
    /// Scroll until a header locks
    Header { index: usize, x: Option<f64> },
}

impl ScrollTarget {
    pub fn vertical(y: f64) -> Self {
        ScrollTarget::Position {
            x: None,
            y: Some(y),
        }
    }

    pub fn row(index: usize) -> Self {
        ScrollTarget::Row { index, x: None }
    }

    pub fn header(index: usize) -> Self {
        ScrollTarget::Header { index, x: None }
    }
}

/// Single owner of the viewport state.
///
/// Generic over the row content `C` and the time source `K`, so tests can
/// drive it with a [`ManualClock`](crate::ManualClock).
pub struct ViewportController<C, K = SystemClock> {
    viewport_config: ViewportConfig,
    gutters: GutterConfig,
    clock: K,
    input: RowInput<C>,
    collapsed: Vec<bool>,
    row_config: Arc<RowConfig<C>>,
    size: Option<ViewportSize>,
    scrollbars: ScrollbarState,
    extents: ContentExtents,
    state: ScrollState,
    animator: ScrollAnimator,
    wheel: WheelAccumulator,
    resize: GutterResizeController,
    warnings: VecDeque<BoundsWarning>,
    last_scroll_at: Option<Duration>,
    fast_scrolling: bool,
    scroll_callback: Option<ScrollCallback>,
    resize_callback: Option<ResizeCallback>,
    resize_end_callback: Option<ResizeCallback>,
}

impl<C, K> fmt::Debug for ViewportController<C, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportController")
            .field("rows", &self.row_config.row_count())
            .field("size", &self.size)
            .field("state", &self.state)
            .field("scrollbars", &self.scrollbars)
            .field("animating", &self.animator.is_animating())
            .field("resizing", &self.resize.is_active())
            .finish()
    }
}

impl<C: Clone> ViewportController<C, SystemClock> {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clone, K: Clock> ViewportController<C, K> {
    pub fn with_clock(config: &AppConfig, clock: K) -> Result<Self> {
        if config.viewport.offset_buffer == 0 {
            return Err(ConfigurationError::InvalidOffsetBuffer.into());
        }

        let mut controller = Self {
            viewport_config: config.viewport.clone(),
            gutters: config.gutters.clone(),
            clock,
            input: RowInput::default(),
            collapsed: Vec::new(),
            row_config: Arc::new(RowConfig {
                offset_buffer: config.viewport.offset_buffer,
                ..RowConfig::default()
            }),
            size: None,
            scrollbars: ScrollbarState::NoScrollbars,
            extents: ContentExtents::default(),
            state: ScrollState::default(),
            animator: ScrollAnimator::new(config.scroll.clone()),
            wheel: WheelAccumulator::new(config.scroll.wheel_frame_budget()),
            resize: GutterResizeController::new(),
            warnings: VecDeque::new(),
            last_scroll_at: None,
            fast_scrolling: false,
            scroll_callback: None,
            resize_callback: None,
            resize_end_callback: None,
        };
        controller.relayout();
        Ok(controller)
    }

    // ---- inputs ----

    /// Record the viewport's outer size.
    pub fn measure(&mut self, size: ViewportSize) {
        if self.size == Some(size) {
            return;
        }
        debug!(width = size.width, height = size.height, "viewport measured");
        self.size = Some(size);
        self.relayout();
    }

    /// Replace the rows. Collapse state resets to each header's default.
    ///
    /// Invalid input is rejected and the previous rows stay in place.
    pub fn set_rows(&mut self, input: RowInput<C>) -> Result<()> {
        input.validate()?;
        self.input = input;
        self.collapsed.clear();
        self.rebuild();
        Ok(())
    }

    /// Replace the rows from a mixed item list (see [`RowInput::from_items`]).
    pub fn set_items(&mut self, items: Vec<InputItem<C>>) -> Result<()> {
        let input = RowInput::from_items(items)?;
        self.set_rows(input)
    }

    /// Collapse or expand a section. Returns whether anything changed.
    ///
    /// Flat input and sections without a header ignore this.
    pub fn set_collapsed(&mut self, section: usize, collapsed: bool) -> bool {
        if !self.input.is_sectioned() {
            debug!(section, "collapse ignored for flat rows");
            return false;
        }
        let sections = self.collapsed.len();
        if section >= sections {
            debug!(section, sections, "collapse of unknown section");
            return false;
        }
        if self.input.section_header(section).is_none() {
            debug!(section, "collapse ignored for section without header");
            return false;
        }
        match self.collapsed.get_mut(section) {
            Some(current) if *current != collapsed => *current = collapsed,
            _ => return false,
        }
        self.rebuild();
        true
    }

    pub fn toggle_section(&mut self, section: usize) -> bool {
        match self.collapsed.get(section).copied() {
            Some(collapsed) => self.set_collapsed(section, !collapsed),
            None => false,
        }
    }

    pub fn set_header_mode(&mut self, mode: HeaderMode) {
        if self.viewport_config.header_mode == mode {
            return;
        }
        self.viewport_config.header_mode = mode;
        self.rebuild();
    }

    /// Width of row content excluding gutters. `None` turns horizontal scrolling off.
    pub fn set_content_width(&mut self, content_width: Option<f64>) {
        self.viewport_config.content_width = content_width;
        self.relayout();
    }

    pub fn set_gutter_config(&mut self, gutters: GutterConfig) {
        self.gutters = gutters;
        self.relayout();
    }

    pub fn set_scroll_config(&mut self, scroll: ScrollConfig) {
        self.wheel = WheelAccumulator::new(scroll.wheel_frame_budget());
        self.animator.set_config(scroll);
    }

    /// Set a gutter's width directly. Widths below the gutter's minimum are raised to it.
    pub fn resize_gutter(&mut self, side: GutterSide, width: f64) -> f64 {
        let min_width = self.gutter(side).min_width;
        let applied = width.max(min_width);
        if width < applied - CLAMP_EPSILON || width.is_nan() {
            self.warn(BoundsWarning::ResizeClamped {
                side,
                requested: width,
                applied,
            });
        }
        self.gutter_mut(side).width = applied;
        self.relayout();
        applied
    }

    /// Scroll by wheel deltas. An axis only scrolls while its scrollbar is shown.
    ///
    /// Deltas are summed and applied at most once per wheel frame; the
    /// remainder is flushed by [`tick`](Self::tick). Returns whether the
    /// position changed now.
    pub fn on_wheel(&mut self, event: WheelEvent) -> bool {
        let delta = Point::new(
            if self.scrollbars.horizontal() {
                event.delta.x
            } else {
                0.0
            },
            if self.scrollbars.vertical() {
                event.delta.y
            } else {
                0.0
            },
        );
        if delta.is_zero() {
            return false;
        }

        self.animator.invalidate();
        let now = self.clock.now();
        match self.wheel.push(delta, now) {
            Some(total) => {
                let requested = self.state.position() + total;
                self.apply_position(requested, false)
            }
            None => false,
        }
    }

    /// A scrollbar thumb was dragged to an absolute transform.
    ///
    /// Hosts echo the position reported by [`on_scroll`](Self::on_scroll)
    /// back through here; an event at the current position is that echo and
    /// leaves animations and pending wheel input alone.
    pub fn on_scrollbar_scroll(&mut self, event: ScrollbarEvent) -> bool {
        let current = match event.axis {
            Axis::Horizontal => self.state.horizontal_transform,
            Axis::Vertical => self.state.vertical_transform,
        };
        if (event.position - current).abs() <= CLAMP_EPSILON {
            trace!(axis = %event.axis, position = event.position, "scrollbar echo ignored");
            return false;
        }

        self.animator.invalidate();
        self.wheel.clear();
        let mut requested = self.state.position();
        match event.axis {
            Axis::Horizontal => requested.x = event.position,
            Axis::Vertical => requested.y = event.position,
        }
        self.apply_position(requested, true)
    }

    /// Begins a gutter resize when the press lands on a handle.
    pub fn on_pointer_down(&mut self, event: PointerEvent) -> bool {
        let Some(side) = event.handle else {
            return false;
        };
        let gutter = self.gutter(side);
        let (width, min_width) = (gutter.width, gutter.min_width);
        self.resize.begin(side, width, min_width, event.client_x);
        true
    }

    /// New width of the gutter being dragged, if a drag is in progress.
    pub fn on_pointer_move(&mut self, event: PointerEvent) -> Option<f64> {
        let session = self.resize.session()?.clone();
        let width = self.resize.update(event.client_x)?;
        self.finish_resize_step(&session, event.client_x, width, false);
        Some(width)
    }

    /// Final width of the gutter being dragged; the drag ends.
    pub fn on_pointer_up(&mut self, event: PointerEvent) -> Option<f64> {
        let session = self.resize.session()?.clone();
        let width = self.resize.end(event.client_x)?;
        self.finish_resize_step(&session, event.client_x, width, true);
        Some(width)
    }

    /// Start an animated scroll. Returns `false` when the target is
    /// unknown or already reached.
    pub fn scroll_to(&mut self, target: ScrollTarget) -> bool {
        let current = self.state.position();
        let requested = match target {
            ScrollTarget::Position { x, y } => {
                Point::new(x.unwrap_or(current.x), y.unwrap_or(current.y))
            }
            ScrollTarget::Row { index, x } => {
                let Some(offset) = self.row_config.row_offset(index) else {
                    debug!(index, rows = self.row_config.row_count(), "scroll target row out of range");
                    return false;
                };
                let stacked = if self.viewport_config.header_mode.stacks_headers() {
                    self.row_config.headers_height_before(index)
                } else {
                    0.0
                };
                Point::new(x.unwrap_or(current.x), offset - stacked)
            }
            ScrollTarget::Header { index, x } => {
                let Some(header) = self.row_config.header_records().get(index) else {
                    debug!(index, "scroll target header out of range");
                    return false;
                };
                Point::new(x.unwrap_or(current.x), header.lock_position)
            }
        };

        let (x, values) = self.clamp_position(requested, true);
        let target = Point::new(x, values.vertical_transform);
        if target == current {
            self.animator.cancel();
            return false;
        }

        self.wheel.clear();
        self.animator.scroll_to(target, current, self.clock.now());
        true
    }

    /// Advance the animation and flush coalesced wheel input.
    ///
    /// Call once per frame. Returns whether the position changed.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        let mut moved = false;

        if let Some(total) = self.wheel.flush(now) {
            let requested = self.state.position() + total;
            moved |= self.apply_position(requested, false);
        }

        let target = self.animator.target();
        if let Some(delta) = self.animator.tick(now, self.state.position()) {
            let requested = match target {
                // Finished: land on the target itself
                Some(target) if !self.animator.is_animating() => target,
                _ => self.state.position() + delta,
            };
            moved |= self.apply_position(requested, false);
        }

        moved
    }

    // ---- outputs ----

    pub fn visible_window(&self) -> VisibleWindow<C> {
        let header_overlay = self.header_overlay();
        let (rows, row_offsets, partition_offset, range) = collect_rows(
            &self.row_config,
            self.state.top_partition_index,
            self.state.display_buffer,
            self.state.vertical_transform,
            &header_overlay,
        );

        VisibleWindow {
            rows,
            row_offsets,
            horizontal_transform: self.state.horizontal_transform,
            header_overlay,
            is_scrolling: self.is_scrolling(),
            is_fast_scrolling: self.is_fast_scrolling(),
            partition_offset,
            range,
        }
    }

    pub fn header_overlay(&self) -> HeaderOverlay {
        if self.size.is_none() {
            return HeaderOverlay::None;
        }
        compute_header_overlay(
            self.viewport_config.header_mode,
            self.row_config.header_records(),
            self.state.vertical_transform,
            self.extents.viewport_height,
        )
    }

    pub fn scrollbar_visibility(&self) -> ScrollbarState {
        self.scrollbars
    }

    pub fn content_extents(&self) -> ContentExtents {
        self.extents
    }

    pub fn scroll_state(&self) -> &ScrollState {
        &self.state
    }

    /// Current row model. Rebuilds swap in a new `Arc`, so a held clone stays consistent.
    pub fn row_config(&self) -> Arc<RowConfig<C>> {
        Arc::clone(&self.row_config)
    }

    pub fn drain_warnings(&mut self) -> Vec<BoundsWarning> {
        self.warnings.drain(..).collect()
    }

    /// Animating, holding coalesced wheel input, or within the idle window of the last scroll.
    pub fn is_scrolling(&self) -> bool {
        if self.animator.is_animating() || self.wheel.has_pending() {
            return true;
        }
        let idle = Duration::from_millis(self.viewport_config.scroll_idle_ms);
        self.last_scroll_at
            .is_some_and(|at| self.clock.now().saturating_sub(at) < idle)
    }

    pub fn is_fast_scrolling(&self) -> bool {
        self.fast_scrolling && self.is_scrolling()
    }

    /// Whether the host should keep ticking at frame rate.
    pub fn needs_tick(&self) -> bool {
        self.is_scrolling()
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_active()
    }

    pub fn resize_session(&self) -> Option<&ResizeSession> {
        self.resize.session()
    }

    pub fn viewport_config(&self) -> &ViewportConfig {
        &self.viewport_config
    }

    pub fn gutter_config(&self) -> &GutterConfig {
        &self.gutters
    }

    pub fn header_mode(&self) -> HeaderMode {
        self.viewport_config.header_mode
    }

    pub fn input(&self) -> &RowInput<C> {
        &self.input
    }

    pub fn collapsed_sections(&self) -> &[bool] {
        &self.collapsed
    }

    // ---- callbacks ----

    /// Called after every change of the scroll position.
    pub fn on_scroll(&mut self, callback: impl FnMut(&ScrollState) + 'static) {
        self.scroll_callback = Some(Box::new(callback));
    }

    /// Called with every new width while a gutter is dragged.
    pub fn on_gutter_resize(&mut self, callback: impl FnMut(GutterSide, f64) + 'static) {
        self.resize_callback = Some(Box::new(callback));
    }

    /// Called once with the final width when a gutter drag ends.
    pub fn on_gutter_resize_end(&mut self, callback: impl FnMut(GutterSide, f64) + 'static) {
        self.resize_end_callback = Some(Box::new(callback));
    }

    // ---- internals ----

    fn gutter(&self, side: GutterSide) -> &GutterSideConfig {
        match side {
            GutterSide::Left => &self.gutters.left,
            GutterSide::Right => &self.gutters.right,
        }
    }

    fn gutter_mut(&mut self, side: GutterSide) -> &mut GutterSideConfig {
        match side {
            GutterSide::Left => &mut self.gutters.left,
            GutterSide::Right => &mut self.gutters.right,
        }
    }

    fn finish_resize_step(&mut self, session: &ResizeSession, client_x: f64, width: f64, end: bool) {
        let requested = session.requested_width_at(client_x);
        if requested < width - CLAMP_EPSILON {
            self.warn(BoundsWarning::ResizeClamped {
                side: session.side,
                requested,
                applied: width,
            });
        }

        let callback = if end {
            self.resize_end_callback.as_mut()
        } else {
            self.resize_callback.as_mut()
        };
        if let Some(callback) = callback {
            callback(session.side, width);
        }

        if self.gutters.apply_resize_to_layout {
            self.gutter_mut(session.side).width = width;
            self.relayout();
        }
    }

    fn rebuild(&mut self) {
        let config = build_row_config_with_buffer(
            &self.input,
            self.viewport_config.header_mode.stacks_headers(),
            &self.collapsed,
            self.viewport_config.offset_buffer,
        );
        debug!(
            rows = config.row_count(),
            content_height = config.content_height,
            "row config rebuilt"
        );
        self.collapsed = config.collapsed_sections.clone();
        self.row_config = Arc::new(config);
        self.relayout();
    }

    /// Recompute scrollbars, extents and display buffer, then re-clamp the position.
    fn relayout(&mut self) {
        let content_width = self
            .viewport_config
            .content_width
            .map(|width| width + self.gutters.total_width());
        let content_height = self.row_config.content_height;
        let vbar = self.viewport_config.vertical_scrollbar_width;
        let hbar = self.viewport_config.horizontal_scrollbar_height;

        let scrollbars = match self.size {
            Some(size) => compute_scrollbar_state(content_width, content_height, size, vbar, hbar),
            None => ScrollbarState::NoScrollbars,
        };
        if scrollbars != self.scrollbars {
            debug!(from = ?self.scrollbars, to = ?scrollbars, "scrollbar visibility changed");
        }
        self.scrollbars = scrollbars;

        self.extents = ContentExtents::new(
            content_width,
            content_height,
            self.size.unwrap_or_default(),
            scrollbars,
            vbar,
            hbar,
        );

        self.state.display_buffer = display_buffer(
            self.size.map(|_| self.extents.viewport_height),
            self.row_config.avg_row_height,
            self.row_config.offset_buffer,
        );
        self.state.should_render_vertical_scrollbar = scrollbars.vertical();
        self.state.should_render_horizontal_scrollbar = scrollbars.horizontal();

        let position = self.state.position();
        self.apply_position(position, false);
    }

    fn clamp_position(&mut self, requested: Point, warn: bool) -> (f64, VerticalScrollValues) {
        let x = match self.extents.width {
            Some(track) => {
                clamp_horizontal_transform(requested.x, track, self.extents.viewport_width)
            }
            None => 0.0,
        };
        let values = get_vertical_scroll_values(
            requested.y,
            self.extents.max_vertical_transform,
            &self.row_config.partitions,
        );

        if warn {
            self.check_clamp(Axis::Horizontal, requested.x, x);
            self.check_clamp(Axis::Vertical, requested.y, values.vertical_transform);
        }
        (x, values)
    }

    /// Clamp and store a new position. Returns whether it moved.
    fn apply_position(&mut self, requested: Point, warn: bool) -> bool {
        let (x, values) = self.clamp_position(requested, warn);
        let previous = self.state.position();

        self.state.horizontal_transform = x;
        self.state.vertical_transform = values.vertical_transform;
        self.state.top_partition_index = values.top_partition_index;

        let moved = self.state.position() != previous;
        if moved {
            let dy = (values.vertical_transform - previous.y).abs();
            let page = self.extents.viewport_height.max(1.0);
            self.fast_scrolling = dy > self.viewport_config.fast_scroll_threshold * page;
            self.last_scroll_at = Some(self.clock.now());

            trace!(
                x,
                y = values.vertical_transform,
                top = values.top_partition_index,
                "scrolled"
            );
            if let Some(callback) = self.scroll_callback.as_mut() {
                callback(&self.state);
            }
        }
        moved
    }

    fn check_clamp(&mut self, axis: Axis, requested: f64, applied: f64) {
        if requested.is_nan() || (requested - applied).abs() > CLAMP_EPSILON {
            self.warn(BoundsWarning::ScrollClamped {
                axis,
                requested,
                applied,
            });
        }
    }

    fn warn(&mut self, warning: BoundsWarning) {
        debug!(%warning, "clamped");
        if self.warnings.len() >= MAX_PENDING_WARNINGS {
            self.warnings.pop_front();
        }
        self.warnings.push_back(warning);
    }
}
