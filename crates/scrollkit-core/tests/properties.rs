use proptest::prelude::*;

use scrollkit_core::scroll::math::{get_resize_width, get_vertical_scroll_values};
use scrollkit_core::{
    build_row_config, build_row_config_with_buffer, GutterSide, Row, RowInput, Section,
    SectionHeader,
};

fn sectioned(shape: &[(f64, Vec<f64>)]) -> RowInput<usize> {
    RowInput::Sectioned(
        shape
            .iter()
            .enumerate()
            .map(|(s, (header, rows))| {
                Section::with_header(
                    SectionHeader::new(*header, s).with_key(format!("h{s}")),
                    rows.iter().map(|h| Row::new(*h, s)).collect(),
                )
            })
            .collect(),
    )
}

fn section_shape() -> impl Strategy<Value = Vec<(f64, Vec<f64>)>> {
    prop::collection::vec(
        (1.0f64..60.0, prop::collection::vec(1.0f64..120.0, 0..40)),
        1..8,
    )
}

proptest! {
    #[test]
    fn content_height_is_sum_of_visible_rows(shape in section_shape(), stack in any::<bool>()) {
        let input = sectioned(&shape);
        let config = build_row_config(&input, stack, &[]);
        let expected: f64 = shape
            .iter()
            .map(|(header, rows)| header + rows.iter().sum::<f64>())
            .sum();
        prop_assert!((config.content_height - expected).abs() < 1e-6);
        let summed: f64 = config.rows.iter().map(|r| r.height()).sum();
        prop_assert!((config.content_height - summed).abs() < 1e-6);
    }

    #[test]
    fn partitions_strictly_increase(
        heights in prop::collection::vec(0.5f64..200.0, 0..500),
        buffer in 1usize..12,
    ) {
        let input = RowInput::Flat(heights.iter().map(|h| Row::new(*h, 0usize)).collect());
        let config = build_row_config_with_buffer(&input, false, &[], buffer);
        prop_assert_eq!(config.partitions.len(), heights.len().div_ceil(buffer));
        prop_assert!(config.partitions.windows(2).all(|w| w[0] < w[1]));
        if let Some(first) = config.partitions.first() {
            prop_assert_eq!(*first, 0.0);
        }
    }

    #[test]
    fn collapse_then_expand_restores_config(shape in section_shape(), section in 0usize..8) {
        let input = sectioned(&shape);
        let section = section % shape.len();
        let open = vec![false; shape.len()];
        let mut collapsed = open.clone();
        collapsed[section] = true;

        let original = build_row_config(&input, true, &open);
        let folded = build_row_config(&input, true, &collapsed);
        prop_assert_eq!(folded.row_count(), original.row_count() - shape[section].1.len());

        let restored = build_row_config(&input, true, &open);
        prop_assert_eq!(restored, original);
    }

    #[test]
    fn lock_position_never_exceeds_real_offset(shape in section_shape(), stack in any::<bool>()) {
        let config = build_row_config(&sectioned(&shape), stack, &[]);
        for header in config.header_records() {
            prop_assert!(header.lock_position <= header.real_offset);
            if !stack {
                prop_assert_eq!(header.lock_position, header.real_offset);
            }
        }
    }

    #[test]
    fn vertical_transform_contained_in_partition(
        heights in prop::collection::vec(1.0f64..100.0, 1..400),
        viewport in 10.0f64..2_000.0,
        raw in -5_000.0f64..50_000.0,
    ) {
        let input = RowInput::Flat(heights.iter().map(|h| Row::new(*h, 0usize)).collect());
        let config = build_row_config(&input, false, &[]);
        let max_height = config.content_height - viewport;
        let values = get_vertical_scroll_values(raw, max_height, &config.partitions);

        let vt = values.vertical_transform;
        prop_assert!(vt >= 0.0);
        prop_assert!(vt <= max_height.max(0.0));

        let top = values.top_partition_index;
        prop_assert!(config.partitions[top] <= vt);
        if let Some(next) = config.partitions.get(top + 1) {
            prop_assert!(vt < *next);
        }
    }

    #[test]
    fn resize_width_floor_and_direction(
        min in 0.0f64..100.0,
        base in 0.0f64..400.0,
        start in 0.0f64..1_000.0,
        current in 0.0f64..1_000.0,
    ) {
        let left = get_resize_width(GutterSide::Left, min, base, start, current);
        let right = get_resize_width(GutterSide::Right, min, base, start, current);
        prop_assert!(left >= min);
        prop_assert!(right >= min);

        // Dragging left grows the left gutter, dragging right grows the right one
        if current < start {
            prop_assert!(left >= base.max(min));
        }
        if current > start {
            prop_assert!(right >= base.max(min));
        }

        // Above the floor the width tracks the pointer exactly
        let grown_left = base + (start - current);
        if grown_left > min {
            prop_assert!((left - grown_left).abs() < 1e-9);
        } else {
            prop_assert_eq!(left, min);
        }
        let grown_right = base + (current - start);
        if grown_right > min {
            prop_assert!((right - grown_right).abs() < 1e-9);
        } else {
            prop_assert_eq!(right, min);
        }
    }
}
