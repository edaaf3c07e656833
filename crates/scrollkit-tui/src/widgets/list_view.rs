use std::sync::Arc;

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    widgets::Widget,
    Frame,
};
use unicode_width::UnicodeWidthChar;

use scrollkit_core::{
    Clock, ContentExtents, FlatRow, GutterConfig, GutterSide, RowConfig, ViewportController,
    VisibleWindow,
};

use crate::app::App;
use crate::theme::Theme;

const HANDLE_SYMBOL: &str = "│";
const THUMB_SYMBOL: &str = "█";
const EXPANDED_MARKER: &str = "▾ ";
const COLLAPSED_MARKER: &str = "▸ ";

/// Terminal cells occupied by each part of the list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListLayout {
    pub area: Rect,
    /// Rows including gutters, without scrollbars
    pub viewport: Rect,
    pub left_gutter: Rect,
    pub left_handle: Rect,
    pub content: Rect,
    pub right_handle: Rect,
    pub right_gutter: Rect,
    pub vertical_scrollbar: Option<Rect>,
    pub horizontal_scrollbar: Option<Rect>,
}

impl ListLayout {
    pub fn new(area: Rect, extents: &ContentExtents, gutters: &GutterConfig) -> Self {
        let viewport = Rect::new(
            area.x,
            area.y,
            cells(extents.viewport_width).min(area.width),
            cells(extents.viewport_height).min(area.height),
        );

        let vertical_scrollbar = (viewport.width < area.width).then(|| {
            Rect::new(
                viewport.right(),
                area.y,
                area.width - viewport.width,
                viewport.height,
            )
        });
        let horizontal_scrollbar = (viewport.height < area.height).then(|| {
            Rect::new(
                area.x,
                viewport.bottom(),
                viewport.width,
                area.height - viewport.height,
            )
        });

        let mut track = viewport;
        let left_gutter = take_left(&mut track, cells(gutters.left.width));
        let left_handle = take_left(&mut track, cells(gutters.left.handle_width));
        let right_gutter = take_right(&mut track, cells(gutters.right.width));
        let right_handle = take_right(&mut track, cells(gutters.right.handle_width));

        Self {
            area,
            viewport,
            left_gutter,
            left_handle,
            content: track,
            right_handle,
            right_gutter,
            vertical_scrollbar,
            horizontal_scrollbar,
        }
    }

    /// Gutter handle under a terminal cell
    pub fn handle_at(&self, column: u16, row: u16) -> Option<GutterSide> {
        let position = Position::new(column, row);
        if self.left_handle.contains(position) {
            Some(GutterSide::Left)
        } else if self.right_handle.contains(position) {
            Some(GutterSide::Right)
        } else {
            None
        }
    }

    pub fn in_vertical_scrollbar(&self, column: u16, row: u16) -> bool {
        self.vertical_scrollbar
            .is_some_and(|bar| bar.contains(Position::new(column, row)))
    }

    pub fn in_horizontal_scrollbar(&self, column: u16, row: u16) -> bool {
        self.horizontal_scrollbar
            .is_some_and(|bar| bar.contains(Position::new(column, row)))
    }
}

fn cells(size: f64) -> u16 {
    if size.is_finite() && size > 0.0 {
        size.round().min(u16::MAX as f64) as u16
    } else {
        0
    }
}

fn take_left(rect: &mut Rect, width: u16) -> Rect {
    let width = width.min(rect.width);
    let taken = Rect::new(rect.x, rect.y, width, rect.height);
    rect.x += width;
    rect.width -= width;
    taken
}

fn take_right(rect: &mut Rect, width: u16) -> Rect {
    let width = width.min(rect.width);
    rect.width -= width;
    Rect::new(rect.right(), rect.y, width, rect.height)
}

/// Flattened row drawn at a viewport-relative cell row, pinned headers first.
pub fn row_at<C>(window: &VisibleWindow<C>, y: u16) -> Option<usize> {
    let center = y as f64 + 0.5;
    let hit = |top: f64, height: f64| center >= top && center < top + height;

    if let Some(pinned) = window
        .header_overlay
        .pinned()
        .into_iter()
        .find(|p| hit(p.offset, p.height))
    {
        return Some(pinned.row_index);
    }

    window
        .iter()
        .find(|(row, offset)| !row.overlaid && hit(*offset, row.row.height()))
        .map(|(row, _)| row.index)
}

/// Start and length of a scrollbar thumb along a track of `track` cells.
pub fn thumb_span(track: u16, visible: f64, total: f64, transform: f64, max: f64) -> (u16, u16) {
    if track == 0 {
        return (0, 0);
    }
    let len = if total > 0.0 {
        ((track as f64 * visible / total).round() as u16).clamp(1, track)
    } else {
        track
    };
    let free = (track - len) as f64;
    let start = if max > 0.0 {
        (free * (transform / max).clamp(0.0, 1.0)).round() as u16
    } else {
        0
    };
    (start, len)
}

/// Transform for a click `cell` cells into a track.
pub fn track_position(track: u16, cell: u16, max: f64) -> f64 {
    if track <= 1 {
        return 0.0;
    }
    let ratio = cell.min(track - 1) as f64 / (track - 1) as f64;
    ratio * max
}

/// Columns `skip..skip + width` of `text`, by display width.
fn slice_columns(text: &str, skip: usize, width: usize) -> String {
    let mut out = String::new();
    let mut column = 0;
    let mut used = 0;

    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if column < skip {
            column += w;
            // Wide char cut by the left edge
            if column > skip {
                let pad = (column - skip).min(width.saturating_sub(used));
                out.extend(std::iter::repeat(' ').take(pad));
                used += pad;
            }
            continue;
        }
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
        column += w;
    }
    out
}

/// Right-aligned text clipped to `width` columns.
fn align_right(text: &str, width: usize) -> String {
    let text = slice_columns(text.trim_end(), 0, width);
    let used: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    format!("{}{}", " ".repeat(width.saturating_sub(used)), text)
}

/// Virtualized list: renders only the rows of a [`VisibleWindow`].
pub struct ListView<'a> {
    window: VisibleWindow<String>,
    rows: Arc<RowConfig<String>>,
    vertical_transform: f64,
    extents: ContentExtents,
    layout: ListLayout,
    theme: &'a Theme,
    active_handle: Option<GutterSide>,
}

impl<'a> ListView<'a> {
    /// Snapshot of the controller's current window.
    pub fn new<K: Clock>(
        controller: &ViewportController<String, K>,
        layout: ListLayout,
        theme: &'a Theme,
    ) -> Self {
        Self {
            window: controller.visible_window(),
            rows: controller.row_config(),
            vertical_transform: controller.scroll_state().vertical_transform,
            extents: controller.content_extents(),
            layout,
            theme,
            active_handle: controller.resize_session().map(|s| s.side),
        }
    }

    fn draw_row(&self, buf: &mut Buffer, flat: &FlatRow<String>, top: f64, pinned: bool) {
        let layout = &self.layout;
        let top = top.round() as i64;
        let lines = flat.height().round().max(0.0) as i64;
        let skip = if flat.row.passthrough_offsets {
            0
        } else {
            self.window.horizontal_transform.max(0.0).round() as usize
        };

        let content_style = if flat.is_header {
            self.theme.header(pinned)
        } else {
            self.theme.row()
        };

        for line in 0..lines {
            let y = top + line;
            if y < 0 || y >= layout.viewport.height as i64 {
                continue;
            }
            let y = layout.viewport.y + y as u16;

            let mut text = flat.row.content.lines().nth(line as usize).unwrap_or("").to_string();
            if flat.is_header && line == 0 {
                let marker = if self.rows.is_collapsed(flat.section) {
                    COLLAPSED_MARKER
                } else {
                    EXPANDED_MARKER
                };
                text.insert_str(0, marker);
            }

            let content = layout.content;
            buf.set_style(Rect::new(content.x, y, content.width, 1), content_style);
            let visible = slice_columns(&text, skip, content.width as usize);
            buf.set_string(content.x, y, visible, content_style);

            let gutters = [
                (layout.left_gutter, flat.row.gutters.left.as_ref()),
                (layout.right_gutter, flat.row.gutters.right.as_ref()),
            ];
            for (rect, descriptor) in gutters {
                if rect.width == 0 {
                    continue;
                }
                let style = if flat.is_header { content_style } else { self.theme.gutter() };
                buf.set_style(Rect::new(rect.x, y, rect.width, 1), style);
                if let Some(descriptor) = descriptor.filter(|_| line == 0) {
                    buf.set_string(rect.x, y, align_right(&descriptor.content, rect.width as usize), style);
                }
            }

            for (rect, side) in [
                (layout.left_handle, GutterSide::Left),
                (layout.right_handle, GutterSide::Right),
            ] {
                self.draw_handle(buf, rect, y, side);
            }
        }
    }

    fn draw_handle(&self, buf: &mut Buffer, rect: Rect, y: u16, side: GutterSide) {
        if rect.width == 0 {
            return;
        }
        let style = self.theme.handle(self.active_handle == Some(side));
        for x in rect.left()..rect.right() {
            buf.set_string(x, y, HANDLE_SYMBOL, style);
        }
    }

    fn draw_scrollbars(&self, buf: &mut Buffer) {
        let track_style = Style::default().bg(self.theme.scrollbar_track);
        let thumb_style = Style::default()
            .fg(self.theme.scrollbar_thumb)
            .bg(self.theme.scrollbar_track);
        let extents = &self.extents;

        if let Some(bar) = self.layout.vertical_scrollbar {
            buf.set_style(bar, track_style);
            let (start, len) = thumb_span(
                bar.height,
                extents.viewport_height,
                extents.height,
                self.vertical_transform,
                extents.max_vertical_transform,
            );
            for y in bar.y + start..bar.y + start + len {
                for x in bar.left()..bar.right() {
                    buf.set_string(x, y, THUMB_SYMBOL, thumb_style);
                }
            }
        }

        if let Some(bar) = self.layout.horizontal_scrollbar {
            buf.set_style(bar, track_style);
            let (start, len) = thumb_span(
                bar.width,
                extents.viewport_width,
                extents.width.unwrap_or(extents.viewport_width),
                self.window.horizontal_transform,
                extents.max_horizontal_transform,
            );
            for x in bar.x + start..bar.x + start + len {
                for y in bar.top()..bar.bottom() {
                    buf.set_string(x, y, THUMB_SYMBOL, thumb_style);
                }
            }
        }
    }
}

impl Widget for ListView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(self.layout.area);
        buf.set_style(area, self.theme.row());
        for rect in [self.layout.left_gutter, self.layout.right_gutter] {
            buf.set_style(rect, self.theme.gutter());
        }
        for y in self.layout.viewport.top()..self.layout.viewport.bottom() {
            self.draw_handle(buf, self.layout.left_handle, y, GutterSide::Left);
            self.draw_handle(buf, self.layout.right_handle, y, GutterSide::Right);
        }

        for (visible, offset) in self.window.iter() {
            if !visible.overlaid {
                self.draw_row(buf, &visible.row, offset, false);
            }
        }

        // Pinned headers go over the rows
        for pinned in self.window.header_overlay.pinned() {
            if let Some(flat) = self.rows.rows.get(pinned.row_index) {
                self.draw_row(buf, flat, pinned.offset, true);
            }
        }

        self.draw_scrollbars(buf);
    }
}

pub struct ListViewWidget;

impl ListViewWidget {
    pub fn render<K: Clock>(frame: &mut Frame, app: &App<K>) {
        let layout = app.layout();
        frame.render_widget(ListView::new(&app.controller, layout, &app.theme), layout.area);
    }
}
