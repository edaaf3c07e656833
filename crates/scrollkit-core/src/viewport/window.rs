//! The slice of rows to draw for the current scroll position

use std::ops::Range;

use super::headers::HeaderOverlay;
use crate::row_config::{FlatRow, RowConfig};

/// Rows rendered before the viewport has been measured.
pub const DEFAULT_DISPLAY_BUFFER: usize = 60;

/// Number of rows to render from the top partition.
///
/// Enough average-height rows to fill the viewport plus one partition of
/// slack on each side, rounded up to whole partitions.
pub fn display_buffer(
    viewport_height: Option<f64>,
    avg_row_height: f64,
    offset_buffer: usize,
) -> usize {
    let offset_buffer = offset_buffer.max(1);
    let Some(viewport_height) = viewport_height else {
        return DEFAULT_DISPLAY_BUFFER;
    };
    if !(avg_row_height > 0.0) || !viewport_height.is_finite() {
        return DEFAULT_DISPLAY_BUFFER;
    }

    let fill = (viewport_height.max(0.0) / avg_row_height).ceil() as usize;
    let raw = fill + 2 * offset_buffer;
    raw.div_ceil(offset_buffer) * offset_buffer
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisibleRow<C> {
    /// Index in the flattened rows
    pub index: usize,
    pub row: FlatRow<C>,
    /// Drawn by the header overlay; hosts skip it in flow
    pub overlaid: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisibleWindow<C> {
    pub rows: Vec<VisibleRow<C>>,
    /// Top edge of each row relative to the content viewport, parallel to `rows`
    pub row_offsets: Vec<f64>,
    pub horizontal_transform: f64,
    pub header_overlay: HeaderOverlay,
    pub is_scrolling: bool,
    pub is_fast_scrolling: bool,
    /// Offset of the first rendered row: `partitions[top] - vertical_transform`
    pub partition_offset: f64,
    /// Flattened row indices covered by `rows`
    pub range: Range<usize>,
}

impl<C> VisibleWindow<C> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows with their offsets
    pub fn iter(&self) -> impl Iterator<Item = (&VisibleRow<C>, f64)> {
        self.rows.iter().zip(self.row_offsets.iter().copied())
    }
}

/// Rows and offsets of the window starting at partition `top`.
pub(crate) fn collect_rows<C: Clone>(
    config: &RowConfig<C>,
    top_partition_index: usize,
    display_buffer: usize,
    vertical_transform: f64,
    overlay: &HeaderOverlay,
) -> (Vec<VisibleRow<C>>, Vec<f64>, f64, Range<usize>) {
    let count = config.row_count();
    let start = (top_partition_index * config.offset_buffer).min(count);
    let end = (start + display_buffer).min(count);

    let base = config
        .partitions
        .get(top_partition_index)
        .copied()
        .unwrap_or(0.0);
    let partition_offset = base - vertical_transform;

    let mut rows = Vec::with_capacity(end - start);
    let mut offsets = Vec::with_capacity(end - start);
    let mut offset = partition_offset;

    for (index, row) in config.rows[start..end].iter().enumerate() {
        let index = start + index;
        rows.push(VisibleRow {
            index,
            row: row.clone(),
            overlaid: row.is_header && overlay.pins_row(index),
        });
        offsets.push(offset);
        offset += row.height();
    }

    (rows, offsets, partition_offset, start..end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::{Row, RowInput};
    use crate::row_config::build_row_config;

    #[test]
    fn test_display_buffer_default() {
        assert_eq!(display_buffer(None, 20.0, 6), 60);
        assert_eq!(display_buffer(Some(400.0), 0.0, 6), 60);
    }

    #[test]
    fn test_display_buffer_rounds_to_partitions() {
        // 20 rows fill the viewport, plus 12 slack = 32, rounded to 36
        assert_eq!(display_buffer(Some(400.0), 20.0, 6), 36);
        // 21 + 12 = 33 -> 36
        assert_eq!(display_buffer(Some(410.0), 20.0, 6), 36);
        assert_eq!(display_buffer(Some(360.0), 20.0, 6), 30);
        assert_eq!(display_buffer(Some(0.0), 20.0, 6), 12);
    }

    #[test]
    fn test_collect_rows_offsets() {
        let input = RowInput::Flat((0..100).map(|i| Row::new(20.0, i)).collect());
        let config = build_row_config(&input, false, &[]);

        // Transform 250 is in partition 2 (240..360)
        let (rows, offsets, partition_offset, range) =
            collect_rows(&config, 2, 36, 250.0, &HeaderOverlay::None);
        assert_eq!(range, 12..48);
        assert_eq!(rows.len(), 36);
        assert_eq!(rows[0].index, 12);
        assert_eq!(partition_offset, -10.0);
        assert_eq!(offsets[0], -10.0);
        assert_eq!(offsets[1], 10.0);
        assert!(rows.iter().all(|r| !r.overlaid));
    }

    #[test]
    fn test_collect_rows_clamps_to_row_count() {
        let input = RowInput::Flat((0..10).map(|i| Row::new(20.0, i)).collect());
        let config = build_row_config(&input, false, &[]);
        let (rows, _, _, range) = collect_rows(&config, 1, 60, 120.0, &HeaderOverlay::None);
        assert_eq!(range, 6..10);
        assert_eq!(rows.len(), 4);

        let (rows, _, _, range) = collect_rows(&config, 5, 60, 0.0, &HeaderOverlay::None);
        assert_eq!(range, 10..10);
        assert!(rows.is_empty());
    }
}
