//! Flattening of row/section input into the model the viewport reads.
//!
//! One linear pass over sections then rows produces the flat row sequence,
//! the header table and the partition checkpoints. The result is immutable;
//! any change to rows or collapse state builds a new one.

use std::sync::Arc;

use tracing::trace;

use crate::row::{Row, RowInput};
use crate::scroll::math;

/// Rows per partition.
pub const OFFSET_BUFFER: usize = 6;

/// A row in the flattened sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRow<C> {
    pub row: Arc<Row<C>>,
    pub is_header: bool,
    /// Index of the section the row came from (0 for flat input)
    pub section: usize,
}

impl<C> FlatRow<C> {
    #[inline]
    pub fn height(&self) -> f64 {
        self.row.height
    }
}

/// Position bookkeeping for one section header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderRecord {
    /// Index of the header in `RowConfig::rows`
    pub row_index: usize,
    pub section: usize,
    pub height: f64,
    /// Vertical transform at which this header pins to the top
    pub lock_position: f64,
    /// Unadjusted offset of the header row in the content
    pub real_offset: f64,
    /// Total height of all headers before this one
    pub cumulative_header_offset: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowConfig<C> {
    pub rows: Vec<FlatRow<C>>,
    /// `None` when the input has no section headers
    pub headers: Option<Vec<HeaderRecord>>,
    /// Cumulative height before every `offset_buffer`-th row
    pub partitions: Vec<f64>,
    pub content_height: f64,
    pub avg_row_height: f64,
    pub collapsed_sections: Vec<bool>,
    pub offset_buffer: usize,
}

impl<C> Default for RowConfig<C> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            headers: None,
            partitions: Vec::new(),
            content_height: 0.0,
            avg_row_height: 0.0,
            collapsed_sections: Vec::new(),
            offset_buffer: OFFSET_BUFFER,
        }
    }
}

impl<C> RowConfig<C> {
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header table, empty when there are no headers.
    pub fn header_records(&self) -> &[HeaderRecord] {
        self.headers.as_deref().unwrap_or(&[])
    }

    /// Absolute top offset of a flattened row.
    ///
    /// Starts from the row's partition checkpoint, so at most
    /// `offset_buffer - 1` heights are summed.
    pub fn row_offset(&self, index: usize) -> Option<f64> {
        math::row_offset(&self.rows, &self.partitions, self.offset_buffer, index)
    }

    /// Total height of the headers that sit above `row_index` in the sequence.
    ///
    /// In stacking mode this is the height of the pinned stack when the row
    /// reaches the top of the content area.
    pub fn headers_height_before(&self, row_index: usize) -> f64 {
        self.header_records()
            .iter()
            .take_while(|h| h.row_index < row_index)
            .map(|h| h.height)
            .sum()
    }

    /// Total height of every header.
    pub fn total_header_height(&self) -> f64 {
        self.header_records().iter().map(|h| h.height).sum()
    }

    pub fn is_collapsed(&self, section: usize) -> bool {
        self.collapsed_sections.get(section).copied().unwrap_or(false)
    }
}

/// Build the row model with the default partition size.
///
/// `collapsed[i]` overrides the collapse state of section `i`; sections past
/// the end of the slice fall back to their header's `collapsed_by_default`.
/// A section without a header never collapses.
pub fn build_row_config<C: Clone>(
    input: &RowInput<C>,
    stack_headers: bool,
    collapsed: &[bool],
) -> RowConfig<C> {
    build_row_config_with_buffer(input, stack_headers, collapsed, OFFSET_BUFFER)
}

pub fn build_row_config_with_buffer<C: Clone>(
    input: &RowInput<C>,
    stack_headers: bool,
    collapsed: &[bool],
    offset_buffer: usize,
) -> RowConfig<C> {
    let offset_buffer = offset_buffer.max(1);
    let mut acc = Accumulator::new(offset_buffer, input.row_count() + input.section_count());
    let mut headers = Vec::new();
    let mut collapsed_sections = Vec::new();

    match input {
        RowInput::Flat(rows) => {
            for row in rows {
                acc.push(Arc::new(row.clone()), false, 0);
            }
        }
        RowInput::Sectioned(sections) => {
            let mut adjust_header_offset = 0.0;
            let mut cumulative_header_offset = 0.0;

            for (section_index, section) in sections.iter().enumerate() {
                let is_collapsed = section.header.as_ref().is_some_and(|header| {
                    collapsed
                        .get(section_index)
                        .copied()
                        .unwrap_or(header.collapsed_by_default)
                });
                collapsed_sections.push(is_collapsed);

                if let Some(header) = &section.header {
                    let real_offset = acc.content_height;
                    headers.push(HeaderRecord {
                        row_index: acc.rows.len(),
                        section: section_index,
                        height: header.height,
                        lock_position: real_offset - adjust_header_offset,
                        real_offset,
                        cumulative_header_offset,
                    });
                    if stack_headers {
                        adjust_header_offset += header.height;
                    }
                    cumulative_header_offset += header.height;
                    acc.push(Arc::new(header.to_row()), true, section_index);
                }

                if is_collapsed {
                    continue;
                }
                for row in &section.rows {
                    acc.push(Arc::new(row.clone()), false, section_index);
                }
            }
        }
    }

    let row_count = acc.rows.len();
    let avg_row_height = if row_count == 0 {
        0.0
    } else {
        acc.content_height / row_count as f64
    };

    trace!(
        rows = row_count,
        headers = headers.len(),
        partitions = acc.partitions.len(),
        content_height = acc.content_height,
        "built row config"
    );

    RowConfig {
        rows: acc.rows,
        headers: (!headers.is_empty()).then_some(headers),
        partitions: acc.partitions,
        content_height: acc.content_height,
        avg_row_height,
        collapsed_sections,
        offset_buffer,
    }
}

/// Running counters of the single build pass.
struct Accumulator<C> {
    rows: Vec<FlatRow<C>>,
    partitions: Vec<f64>,
    content_height: f64,
    offset_buffer: usize,
}

impl<C> Accumulator<C> {
    fn new(offset_buffer: usize, capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
            partitions: Vec::with_capacity(capacity / offset_buffer + 1),
            content_height: 0.0,
            offset_buffer,
        }
    }

    fn push(&mut self, row: Arc<Row<C>>, is_header: bool, section: usize) {
        if self.rows.len() % self.offset_buffer == 0 {
            self.partitions.push(self.content_height);
        }
        self.content_height += row.height;
        self.rows.push(FlatRow {
            row,
            is_header,
            section,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::{Section, SectionHeader};

    fn flat(count: usize, height: f64) -> RowInput<usize> {
        RowInput::Flat((0..count).map(|i| Row::new(height, i)).collect())
    }

    fn three_sections() -> RowInput<usize> {
        RowInput::Sectioned(
            (0..3)
                .map(|s| {
                    Section::with_header(
                        SectionHeader::new(30.0, s * 100).with_key(format!("section-{}", s)),
                        (0..5).map(|r| Row::new(20.0, s * 100 + r + 1)).collect(),
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn test_empty_input() {
        let config = build_row_config(&flat(0, 20.0), false, &[]);
        assert_eq!(config.content_height, 0.0);
        assert!(config.headers.is_none());
        assert!(config.partitions.is_empty());
        assert!(config.rows.is_empty());
        assert_eq!(config.avg_row_height, 0.0);

        let config = build_row_config(&RowInput::<usize>::Sectioned(vec![]), true, &[]);
        assert!(config.headers.is_none());
        assert!(config.rows.is_empty());
    }

    #[test]
    fn test_flat_rows() {
        let config = build_row_config(&flat(10_000, 20.0), false, &[]);
        assert_eq!(config.content_height, 200_000.0);
        assert_eq!(config.row_count(), 10_000);
        assert_eq!(config.avg_row_height, 20.0);
        assert_eq!(config.partitions.len(), 1667);
        assert_eq!(config.partitions[0], 0.0);
        assert_eq!(config.partitions[1], 120.0);
        assert!(config.headers.is_none());
    }

    #[test]
    fn test_stacking_lock_positions() {
        let config = build_row_config(&three_sections(), true, &[]);
        let headers = config.headers.as_ref().unwrap();
        assert_eq!(headers.len(), 3);

        assert_eq!(headers[0].real_offset, 0.0);
        assert_eq!(headers[0].lock_position, 0.0);
        assert_eq!(headers[1].real_offset, 130.0);
        assert_eq!(headers[1].lock_position, 100.0);
        assert_eq!(headers[2].real_offset, 260.0);
        assert_eq!(headers[2].lock_position, 200.0);

        assert_eq!(headers[1].cumulative_header_offset, 30.0);
        assert_eq!(headers[2].cumulative_header_offset, 60.0);
        assert_eq!(headers[1].row_index, 6);
        assert_eq!(config.content_height, 390.0);
    }

    #[test]
    fn test_locking_lock_positions_are_unadjusted() {
        let config = build_row_config(&three_sections(), false, &[]);
        for header in config.header_records() {
            assert_eq!(header.lock_position, header.real_offset);
        }
    }

    #[test]
    fn test_collapse_excludes_body_rows() {
        let expanded = build_row_config(&three_sections(), true, &[]);
        let collapsed = build_row_config(&three_sections(), true, &[false, true, false]);

        assert_eq!(collapsed.row_count(), expanded.row_count() - 5);
        assert_eq!(collapsed.content_height, expanded.content_height - 100.0);
        assert!(collapsed.rows[6].is_header);
        assert_eq!(collapsed.rows[7].section, 2);
        assert!(collapsed.rows[7].is_header);
        assert_eq!(collapsed.collapsed_sections, vec![false, true, false]);

        // partitions follow emitted rows only
        assert_eq!(collapsed.partitions, vec![0.0, 130.0, 270.0]);

        let headers = collapsed.header_records();
        assert_eq!(headers[2].real_offset, 160.0);
        assert_eq!(headers[2].lock_position, 100.0);
    }

    #[test]
    fn test_collapsed_by_default() {
        let input = RowInput::Sectioned(vec![
            Section::with_header(
                SectionHeader::new(30.0, 0).with_key("a").collapsed(true),
                vec![Row::new(20.0, 1)],
            ),
            Section::with_header(SectionHeader::new(30.0, 2).with_key("b"), vec![Row::new(20.0, 3)]),
        ]);
        let config = build_row_config(&input, false, &[]);
        assert_eq!(config.collapsed_sections, vec![true, false]);
        assert_eq!(config.row_count(), 3);

        // explicit state wins over the default
        let config = build_row_config(&input, false, &[false]);
        assert_eq!(config.row_count(), 4);
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let a = build_row_config(&three_sections(), true, &[true, false, true]);
        let b = build_row_config(&three_sections(), true, &[true, false, true]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_row_offset_lookup() {
        let config = build_row_config(&three_sections(), true, &[]);
        assert_eq!(config.row_offset(0), Some(0.0));
        assert_eq!(config.row_offset(1), Some(30.0));
        assert_eq!(config.row_offset(6), Some(130.0));
        assert_eq!(config.row_offset(7), Some(160.0));
        assert_eq!(config.row_offset(17), Some(370.0));
        assert_eq!(config.row_offset(18), None);
    }

    #[test]
    fn test_headers_height_before() {
        let config = build_row_config(&three_sections(), true, &[]);
        assert_eq!(config.headers_height_before(0), 0.0);
        assert_eq!(config.headers_height_before(1), 30.0);
        assert_eq!(config.headers_height_before(6), 30.0);
        assert_eq!(config.headers_height_before(7), 60.0);
        assert_eq!(config.total_header_height(), 90.0);
    }

    #[test]
    fn test_custom_offset_buffer() {
        let config = build_row_config_with_buffer(&flat(10, 10.0), false, &[], 4);
        assert_eq!(config.partitions, vec![0.0, 40.0, 80.0]);
        assert_eq!(config.offset_buffer, 4);

        let config = build_row_config_with_buffer(&flat(3, 10.0), false, &[], 0);
        assert_eq!(config.offset_buffer, 1);
        assert_eq!(config.partitions, vec![0.0, 10.0, 20.0]);
    }

    #[test]
    fn test_sections_without_headers() {
        let input = RowInput::Sectioned(vec![
            Section::new(None, vec![Row::new(10.0, 0), Row::new(10.0, 1)]),
            Section::new(None, vec![Row::new(10.0, 2)]),
        ]);
        let config = build_row_config(&input, true, &[]);
        assert!(config.headers.is_none());
        assert_eq!(config.content_height, 30.0);
        assert!(config.rows.iter().all(|r| !r.is_header));
    }

    #[test]
    fn test_headerless_section_ignores_collapse() {
        let input = RowInput::Sectioned(vec![
            Section::new(None, vec![Row::new(10.0, 0), Row::new(10.0, 1)]),
            Section::with_header(
                SectionHeader::new(5.0, 9).with_key("b"),
                vec![Row::new(10.0, 2)],
            ),
        ]);
        let config = build_row_config(&input, false, &[true, true]);
        assert_eq!(config.collapsed_sections, vec![false, true]);
        assert_eq!(config.row_count(), 3);
        assert_eq!(config.content_height, 25.0);
        assert_eq!(config.rows[0].section, 0);
        assert!(config.rows[2].is_header);
    }
}
