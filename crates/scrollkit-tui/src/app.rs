use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::{debug, info};

use scrollkit_core::{
    AppConfig, Axis, BoundsWarning, Clock, GutterSide, HeaderMode, PointerEvent, RowInput,
    ScrollTarget, ScrollbarEvent, SystemClock, ViewportController, ViewportSize, WheelEvent,
};

use crate::input::Action;
use crate::theme::Theme;
use crate::widgets::{row_at, track_position, ListLayout};

/// Columns moved by one horizontal scroll step
const HORIZONTAL_STEP: f64 = 4.0;
/// Offsets closer than this count as the same header position
const SECTION_EPSILON: f64 = 0.5;

/// Application state
pub struct App<K: Clock = SystemClock> {
    pub config: Arc<AppConfig>,
    pub controller: ViewportController<String, K>,
    pub theme: Theme,
    pub should_quit: bool,
    /// First key of a two-key sequence (gg)
    pub pending_key: Option<char>,
    pub status_message: Option<String>,
    /// Area the list was last laid out in
    list_area: Rect,
    /// Scrollbar whose thumb is being dragged
    scrollbar_drag: Option<Axis>,
}

impl App<SystemClock> {
    pub fn new(config: AppConfig, rows: RowInput<String>) -> Result<Self> {
        Self::with_clock(config, rows, SystemClock::new())
    }
}

impl<K: Clock> App<K> {
    pub fn with_clock(config: AppConfig, rows: RowInput<String>, clock: K) -> Result<Self> {
        let mut controller = ViewportController::with_clock(&config, clock)?;
        controller.set_rows(rows)?;
        info!(
            rows = controller.row_config().row_count(),
            sections = controller.input().section_count(),
            "list loaded"
        );

        controller.on_gutter_resize_end(|side, width| {
            debug!(%side, width, "gutter resized");
        });

        Ok(Self {
            config: Arc::new(config),
            controller,
            theme: Theme::default(),
            should_quit: false,
            pending_key: None,
            status_message: None,
            list_area: Rect::default(),
            scrollbar_drag: None,
        })
    }

    /// Lay the list out in `area`.
    pub fn resize(&mut self, area: Rect) {
        self.list_area = area;
        self.controller
            .measure(ViewportSize::new(area.width as f64, area.height as f64));
    }

    /// Current cell layout of the list
    pub fn layout(&self) -> ListLayout {
        ListLayout::new(
            self.list_area,
            &self.controller.content_extents(),
            self.controller.gutter_config(),
        )
    }

    /// Advance animations and coalesced input. Returns whether a redraw is needed.
    pub fn tick(&mut self) -> bool {
        let moved = self.controller.tick();
        self.collect_warnings();
        moved
    }

    /// Whether to poll at animation rate instead of the idle tick rate
    pub fn needs_fast_update(&self) -> bool {
        self.controller.needs_tick() || self.controller.is_resizing()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn apply_action(&mut self, action: Action) {
        if action != Action::PendingG {
            self.pending_key = None;
        }
        if action != Action::None {
            self.status_message = None;
        }

        let lines = self.config.scroll.scroll_lines.max(1) as f64;
        let page = self.controller.content_extents().viewport_height.max(1.0);
        let y = self.controller.scroll_state().vertical_transform;

        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => {
                self.controller.on_wheel(WheelEvent::vertical(lines));
            }
            Action::ScrollUp => {
                self.controller.on_wheel(WheelEvent::vertical(-lines));
            }
            Action::ScrollLeft => {
                self.controller.on_wheel(WheelEvent::horizontal(-HORIZONTAL_STEP));
            }
            Action::ScrollRight => {
                self.controller.on_wheel(WheelEvent::horizontal(HORIZONTAL_STEP));
            }
            Action::ScrollHalfPageDown => self.scroll_to(ScrollTarget::vertical(y + page / 2.0)),
            Action::ScrollHalfPageUp => self.scroll_to(ScrollTarget::vertical(y - page / 2.0)),
            Action::ScrollPageDown => self.scroll_to(ScrollTarget::vertical(y + page)),
            Action::ScrollPageUp => self.scroll_to(ScrollTarget::vertical(y - page)),
            Action::JumpToTop => self.scroll_to(ScrollTarget::vertical(0.0)),
            Action::JumpToBottom => {
                let max = self.controller.content_extents().max_vertical_transform;
                self.scroll_to(ScrollTarget::vertical(max));
            }
            Action::PendingG => self.pending_key = Some('g'),
            Action::NextSection => self.jump_section(true),
            Action::PrevSection => self.jump_section(false),
            Action::ToggleSection => {
                if let Some(section) = self.current_section() {
                    self.controller.toggle_section(section);
                }
            }
            Action::CycleHeaderMode => {
                let next = match self.controller.header_mode() {
                    HeaderMode::Default => HeaderMode::Locking,
                    HeaderMode::Locking => HeaderMode::Stacking,
                    HeaderMode::Stacking => HeaderMode::Default,
                };
                self.controller.set_header_mode(next);
                self.set_status(format!("Header mode: {:?}", next));
            }
            Action::GrowGutter => self.nudge_gutter(1.0),
            Action::ShrinkGutter => self.nudge_gutter(-1.0),
            Action::None => {}
        }

        self.collect_warnings();
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (column, row) = (mouse.column, mouse.row);
        let lines = self.config.scroll.scroll_lines.max(1) as f64;
        let shift = mouse.modifiers.contains(KeyModifiers::SHIFT);

        match mouse.kind {
            MouseEventKind::ScrollDown if shift => {
                self.controller.on_wheel(WheelEvent::horizontal(lines));
            }
            MouseEventKind::ScrollUp if shift => {
                self.controller.on_wheel(WheelEvent::horizontal(-lines));
            }
            MouseEventKind::ScrollDown => {
                self.controller.on_wheel(WheelEvent::vertical(lines));
            }
            MouseEventKind::ScrollUp => {
                self.controller.on_wheel(WheelEvent::vertical(-lines));
            }
            MouseEventKind::ScrollRight => {
                self.controller.on_wheel(WheelEvent::horizontal(lines));
            }
            MouseEventKind::ScrollLeft => {
                self.controller.on_wheel(WheelEvent::horizontal(-lines));
            }
            MouseEventKind::Down(MouseButton::Left) => self.mouse_down(column, row),
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.controller.is_resizing() {
                    self.controller.on_pointer_move(pointer(column, row));
                } else if let Some(axis) = self.scrollbar_drag {
                    self.scrollbar_to(axis, column, row);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.controller.on_pointer_up(pointer(column, row));
                self.scrollbar_drag = None;
            }
            _ => {}
        }

        self.collect_warnings();
    }

    fn mouse_down(&mut self, column: u16, row: u16) {
        let layout = self.layout();

        if let Some(side) = layout.handle_at(column, row) {
            self.controller
                .on_pointer_down(PointerEvent::on_handle(side, column as f64, row as f64));
            return;
        }

        let axis = if layout.in_vertical_scrollbar(column, row) {
            Some(Axis::Vertical)
        } else if layout.in_horizontal_scrollbar(column, row) {
            Some(Axis::Horizontal)
        } else {
            None
        };
        if let Some(axis) = axis {
            self.scrollbar_drag = Some(axis);
            self.scrollbar_to(axis, column, row);
            return;
        }

        // Clicking a header folds its section
        if row >= layout.viewport.y && row < layout.viewport.bottom() {
            let window = self.controller.visible_window();
            let rows = self.controller.row_config();
            let hit = row_at(&window, row - layout.viewport.y).and_then(|i| rows.rows.get(i));
            if let Some(flat) = hit.filter(|flat| flat.is_header) {
                self.controller.toggle_section(flat.section);
            }
        }
    }

    fn scrollbar_to(&mut self, axis: Axis, column: u16, row: u16) {
        let layout = self.layout();
        let extents = self.controller.content_extents();
        let position = match (axis, layout.vertical_scrollbar, layout.horizontal_scrollbar) {
            (Axis::Vertical, Some(bar), _) => track_position(
                bar.height,
                row.saturating_sub(bar.y),
                extents.max_vertical_transform,
            ),
            (Axis::Horizontal, _, Some(bar)) => track_position(
                bar.width,
                column.saturating_sub(bar.x),
                extents.max_horizontal_transform,
            ),
            _ => return,
        };
        self.controller
            .on_scrollbar_scroll(ScrollbarEvent::new(axis, position));
    }

    fn scroll_to(&mut self, target: ScrollTarget) {
        self.controller.scroll_to(target);
    }

    /// Animate to the next or previous section header.
    fn jump_section(&mut self, forward: bool) {
        let y = self.controller.scroll_state().vertical_transform;
        let rows = self.controller.row_config();
        let headers = rows.header_records();

        let target = if forward {
            headers
                .iter()
                .position(|h| h.lock_position > y + SECTION_EPSILON)
        } else {
            headers
                .iter()
                .rposition(|h| h.lock_position < y - SECTION_EPSILON)
        };

        match target {
            Some(index) => self.scroll_to(ScrollTarget::header(index)),
            None if headers.is_empty() => self.set_status("No sections"),
            None => {}
        }
    }

    /// Section of the first row at the top of the viewport
    pub fn current_section(&self) -> Option<usize> {
        if !self.controller.input().is_sectioned() {
            return None;
        }
        let window = self.controller.visible_window();
        if let Some(pinned) = window.header_overlay.pinned().first() {
            return Some(pinned.section);
        }
        let section = window
            .iter()
            .find(|(row, offset)| offset + row.row.height() > 0.0)
            .map(|(row, _)| row.row.section);
        section
    }

    fn nudge_gutter(&mut self, by: f64) {
        let width = self.controller.gutter_config().left.width;
        let applied = self.controller.resize_gutter(GutterSide::Left, width + by);
        debug!(width = applied, "left gutter nudged");
    }

    fn collect_warnings(&mut self) {
        if let Some(warning) = self.controller.drain_warnings().pop() {
            debug!(%warning, "bounds warning");
            self.status_message = Some(describe_warning(&warning));
        }
    }
}

fn pointer(column: u16, row: u16) -> PointerEvent {
    PointerEvent::at(column as f64, row as f64)
}

fn describe_warning(warning: &BoundsWarning) -> String {
    match warning {
        BoundsWarning::ScrollClamped { axis, .. } => format!("Reached the {} edge", axis),
        BoundsWarning::ResizeClamped { side, applied, .. } => {
            format!("The {} gutter cannot be narrower than {:.0}", side, applied)
        }
    }
}
