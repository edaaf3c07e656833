//! Section header overlays for locking and stacking modes

use crate::config::HeaderMode;
use crate::row_config::HeaderRecord;

/// A header drawn over the content instead of in flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinnedHeader {
    /// Index into the header table
    pub header_index: usize,
    /// Index of the header row in the flattened rows
    pub row_index: usize,
    pub section: usize,
    /// Top edge relative to the content viewport
    pub offset: f64,
    pub height: f64,
}

impl PinnedHeader {
    fn new(header_index: usize, record: &HeaderRecord, offset: f64) -> Self {
        Self {
            header_index,
            row_index: record.row_index,
            section: record.section,
            offset,
            height: record.height,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum HeaderOverlay {
    #[default]
    None,
    /// The current section's header, pushed up by the next one as it arrives
    Locking(PinnedHeader),
    Stacking {
        /// Headers already scrolled past, top to bottom
        top: Vec<PinnedHeader>,
        /// Headers waiting below the content, top to bottom
        bottom: Vec<PinnedHeader>,
    },
}

impl HeaderOverlay {
    pub fn is_none(&self) -> bool {
        matches!(self, HeaderOverlay::None)
    }

    /// Every pinned header, top stack first.
    pub fn pinned(&self) -> Vec<PinnedHeader> {
        match self {
            HeaderOverlay::None => Vec::new(),
            HeaderOverlay::Locking(header) => vec![*header],
            HeaderOverlay::Stacking { top, bottom } => top.iter().chain(bottom).copied().collect(),
        }
    }

    /// Whether the header row at `row_index` is drawn by the overlay.
    pub fn pins_row(&self, row_index: usize) -> bool {
        match self {
            HeaderOverlay::None => false,
            HeaderOverlay::Locking(header) => header.row_index == row_index,
            HeaderOverlay::Stacking { top, bottom } => top
                .iter()
                .chain(bottom)
                .any(|h| h.row_index == row_index),
        }
    }
}

pub fn compute_header_overlay(
    mode: HeaderMode,
    headers: &[HeaderRecord],
    vertical_transform: f64,
    content_viewport_height: f64,
) -> HeaderOverlay {
    if headers.is_empty() {
        return HeaderOverlay::None;
    }
    match mode {
        HeaderMode::Default => HeaderOverlay::None,
        HeaderMode::Locking => locking_overlay(headers, vertical_transform),
        HeaderMode::Stacking => {
            stacking_overlay(headers, vertical_transform, content_viewport_height)
        }
    }
}

fn locking_overlay(headers: &[HeaderRecord], vt: f64) -> HeaderOverlay {
    let passed = headers.partition_point(|h| h.lock_position <= vt);
    let Some(current_index) = passed.checked_sub(1) else {
        return HeaderOverlay::None;
    };
    let current = &headers[current_index];

    let translate = match headers.get(current_index + 1) {
        Some(next) if next.lock_position - vt < current.height => {
            -(current.height - (next.lock_position - vt))
        }
        _ => 0.0,
    };

    HeaderOverlay::Locking(PinnedHeader::new(current_index, current, translate))
}

fn stacking_overlay(
    headers: &[HeaderRecord],
    vt: f64,
    content_viewport_height: f64,
) -> HeaderOverlay {
    let total: f64 = headers.iter().map(|h| h.height).sum();
    let mut top = Vec::new();
    let mut bottom = Vec::new();

    for (index, header) in headers.iter().enumerate() {
        if header.lock_position <= vt {
            top.push(PinnedHeader::new(
                index,
                header,
                header.cumulative_header_offset,
            ));
            continue;
        }

        // This header and everything after it
        let remaining = total - header.cumulative_header_offset;
        let gutter_top = content_viewport_height - remaining;
        if header.real_offset - vt > gutter_top {
            bottom.push(PinnedHeader::new(index, header, gutter_top));
        }
    }

    if top.is_empty() && bottom.is_empty() {
        HeaderOverlay::None
    } else {
        HeaderOverlay::Stacking { top, bottom }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Three sections of one 20px header and `body` px of rows each.
    fn records(body: f64, stacking: bool) -> Vec<HeaderRecord> {
        let mut out = Vec::new();
        let mut offset = 0.0;
        let mut cumulative = 0.0;
        for section in 0..3 {
            out.push(HeaderRecord {
                row_index: section * 6,
                section,
                height: 20.0,
                lock_position: if stacking { offset - cumulative } else { offset },
                real_offset: offset,
                cumulative_header_offset: cumulative,
            });
            offset += 20.0 + body;
            cumulative += 20.0;
        }
        out
    }

    #[test]
    fn test_default_mode_has_no_overlay() {
        let headers = records(100.0, false);
        let overlay = compute_header_overlay(HeaderMode::Default, &headers, 50.0, 300.0);
        assert!(overlay.is_none());
        assert!(compute_header_overlay(HeaderMode::Locking, &[], 50.0, 300.0).is_none());
    }

    #[test]
    fn test_locking_pins_current_header() {
        let headers = records(100.0, false);
        // Section 0 spans 0..120, next header locks at 120
        let overlay = compute_header_overlay(HeaderMode::Locking, &headers, 50.0, 300.0);
        match &overlay {
            HeaderOverlay::Locking(header) => {
                assert_eq!(header.header_index, 0);
                assert_eq!(header.offset, 0.0);
            }
            other => panic!("unexpected overlay {:?}", other),
        }
        assert!(overlay.pins_row(0));
        assert!(!overlay.pins_row(6));
    }

    #[test]
    fn test_locking_next_header_pushes_current() {
        let headers = records(100.0, false);
        // Next header is 12px below the top, current is 20px tall
        let overlay = compute_header_overlay(HeaderMode::Locking, &headers, 108.0, 300.0);
        assert_eq!(
            overlay,
            HeaderOverlay::Locking(PinnedHeader {
                header_index: 0,
                row_index: 0,
                section: 0,
                offset: -8.0,
                height: 20.0,
            })
        );

        let overlay = compute_header_overlay(HeaderMode::Locking, &headers, 120.0, 300.0);
        assert!(matches!(overlay, HeaderOverlay::Locking(h) if h.header_index == 1 && h.offset == 0.0));
    }

    #[test]
    fn test_locking_last_header_stays_pinned() {
        let headers = records(100.0, false);
        let overlay = compute_header_overlay(HeaderMode::Locking, &headers, 10_000.0, 300.0);
        assert!(matches!(overlay, HeaderOverlay::Locking(h) if h.header_index == 2 && h.offset == 0.0));
    }

    #[test]
    fn test_stacking_top_and_bottom() {
        // Locks at 0, 100, 200 with 100px bodies
        let headers = records(100.0, true);
        assert_eq!(headers[1].lock_position, 100.0);
        assert_eq!(headers[2].lock_position, 200.0);

        let overlay = compute_header_overlay(HeaderMode::Stacking, &headers, 150.0, 200.0);
        let HeaderOverlay::Stacking { top, bottom } = overlay else {
            panic!("expected stacking overlay");
        };
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].offset, 0.0);
        assert_eq!(top[1].offset, 20.0);

        // Header 2 sits at 240 in flow, 90px below the top; gutter starts at 180
        assert!(bottom.is_empty());
    }

    #[test]
    fn test_stacking_bottom_gutter() {
        let headers = records(400.0, true);
        // Header 1 at 420 in flow, header 2 at 840
        let overlay = compute_header_overlay(HeaderMode::Stacking, &headers, 10.0, 300.0);
        let HeaderOverlay::Stacking { top, bottom } = overlay else {
            panic!("expected stacking overlay");
        };
        assert_eq!(top.len(), 1);
        assert_eq!(bottom.len(), 2);
        assert_eq!(bottom[0].header_index, 1);
        assert_eq!(bottom[0].offset, 260.0);
        assert_eq!(bottom[1].offset, 280.0);
    }

    #[test]
    fn test_stacking_header_flows_between_stacks() {
        let headers = records(400.0, true);
        // Header 1 is 200px below the top: above the gutter at 260, not yet locked
        let overlay = compute_header_overlay(HeaderMode::Stacking, &headers, 220.0, 300.0);
        assert!(!overlay.pins_row(6));
        assert!(overlay.pins_row(0));
        assert!(overlay.pins_row(12));
    }
}
