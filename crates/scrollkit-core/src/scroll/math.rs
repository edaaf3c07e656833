//! L4 Atomic Layer: pure scroll arithmetic
//!
//! Clamping and partition lookup live here and nowhere else. Every caller
//! (wheel, scrollbar, animation, scroll targets) goes through these.

use crate::resize::GutterSide;
use crate::row_config::FlatRow;

/// Result of mapping a raw vertical transform onto the partition table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalScrollValues {
    pub top_partition_index: usize,
    pub vertical_transform: f64,
}

/// Largest vertical transform. Negative when the content fits the viewport;
/// callers clamp.
#[inline]
pub fn get_max_height(content_height: f64, viewport_height: f64) -> f64 {
    content_height - viewport_height
}

/// Clamp `raw_transform` into `[0, max_height]` and find the partition that contains it.
///
/// The partition is the predecessor of the first checkpoint strictly greater
/// than the clamped transform, or the last one when none is greater.
pub fn get_vertical_scroll_values(
    raw_transform: f64,
    max_height: f64,
    partitions: &[f64],
) -> VerticalScrollValues {
    let upper = max_height.max(0.0);
    let vertical_transform = raw_transform.max(0.0).min(upper);
    let first_greater = partitions.partition_point(|&p| p <= vertical_transform);

    VerticalScrollValues {
        top_partition_index: first_greater.saturating_sub(1),
        vertical_transform,
    }
}

/// Clamp a horizontal transform into `[0, scroll_track_width - viewport_width]`.
#[inline]
pub fn clamp_horizontal_transform(raw: f64, scroll_track_width: f64, viewport_width: f64) -> f64 {
    let upper = (scroll_track_width - viewport_width).max(0.0);
    raw.max(0.0).min(upper)
}

/// New gutter width for a drag from `start_position` to `current_position`.
///
/// The left gutter grows as the pointer moves left, the right gutter as it
/// moves right. Never below `min_width`.
pub fn get_resize_width(
    side: GutterSide,
    min_width: f64,
    base_width: f64,
    start_position: f64,
    current_position: f64,
) -> f64 {
    let delta_width = start_position - current_position;
    let modifier = match side {
        GutterSide::Left => 1.0,
        GutterSide::Right => -1.0,
    };
    min_width.max(base_width + modifier * delta_width)
}

/// Absolute top offset of row `index`, from its partition checkpoint.
pub fn row_offset<C>(
    rows: &[FlatRow<C>],
    partitions: &[f64],
    offset_buffer: usize,
    index: usize,
) -> Option<f64> {
    if index >= rows.len() || offset_buffer == 0 {
        return None;
    }
    let partition = index / offset_buffer;
    let base = partitions.get(partition).copied()?;
    let chunk_start = partition * offset_buffer;
    let within: f64 = rows[chunk_start..index].iter().map(FlatRow::height).sum();
    Some(base + within)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partitions(count: usize, row_height: f64, buffer: usize) -> Vec<f64> {
        (0..count)
            .step_by(buffer)
            .map(|i| i as f64 * row_height)
            .collect()
    }

    #[test]
    fn test_max_height() {
        assert_eq!(get_max_height(200_000.0, 400.0), 199_600.0);
        assert_eq!(get_max_height(100.0, 400.0), -300.0);
    }

    #[test]
    fn test_vertical_clamps_low_and_high() {
        let parts = partitions(10_000, 20.0, 6);
        let max = get_max_height(200_000.0, 400.0);

        let values = get_vertical_scroll_values(-50.0, max, &parts);
        assert_eq!(values.vertical_transform, 0.0);
        assert_eq!(values.top_partition_index, 0);

        let values = get_vertical_scroll_values(199_700.0, max, &parts);
        assert_eq!(values.vertical_transform, 199_600.0);
        assert_eq!(values.top_partition_index, 1663);
        assert!(parts[1663] <= 199_600.0 && 199_600.0 < parts[1664]);
    }

    #[test]
    fn test_vertical_partition_boundaries() {
        let parts = vec![0.0, 120.0, 240.0];
        assert_eq!(get_vertical_scroll_values(119.9, 1000.0, &parts).top_partition_index, 0);
        assert_eq!(get_vertical_scroll_values(120.0, 1000.0, &parts).top_partition_index, 1);
        assert_eq!(get_vertical_scroll_values(500.0, 1000.0, &parts).top_partition_index, 2);
    }

    #[test]
    fn test_vertical_negative_max_pins_to_zero() {
        let values = get_vertical_scroll_values(80.0, -300.0, &[0.0]);
        assert_eq!(values.vertical_transform, 0.0);
        assert_eq!(values.top_partition_index, 0);
    }

    #[test]
    fn test_vertical_empty_partitions_and_nan() {
        let values = get_vertical_scroll_values(40.0, 100.0, &[]);
        assert_eq!(values.top_partition_index, 0);
        assert_eq!(values.vertical_transform, 40.0);

        let values = get_vertical_scroll_values(f64::NAN, 100.0, &[0.0]);
        assert_eq!(values.vertical_transform, 0.0);
    }

    #[test]
    fn test_horizontal_clamp() {
        assert_eq!(clamp_horizontal_transform(-5.0, 900.0, 300.0), 0.0);
        assert_eq!(clamp_horizontal_transform(250.0, 900.0, 300.0), 250.0);
        assert_eq!(clamp_horizontal_transform(700.0, 900.0, 300.0), 600.0);
        assert_eq!(clamp_horizontal_transform(10.0, 200.0, 300.0), 0.0);
    }

    #[test]
    fn test_resize_left_drag() {
        assert_eq!(get_resize_width(GutterSide::Left, 10.0, 50.0, 100.0, 80.0), 70.0);
        assert_eq!(get_resize_width(GutterSide::Left, 10.0, 50.0, 100.0, 130.0), 20.0);
        assert_eq!(get_resize_width(GutterSide::Left, 10.0, 50.0, 100.0, 200.0), 10.0);
    }

    #[test]
    fn test_resize_right_drag() {
        assert_eq!(get_resize_width(GutterSide::Right, 10.0, 50.0, 100.0, 125.0), 75.0);
        assert_eq!(get_resize_width(GutterSide::Right, 10.0, 50.0, 100.0, 90.0), 40.0);
        assert_eq!(get_resize_width(GutterSide::Right, 10.0, 50.0, 100.0, 0.0), 10.0);
    }
}
