//! Synthetic rows and terminal-sized settings for the demo

use scrollkit_core::{AppConfig, GutterDescriptor, GutterSideConfig, Row, RowInput, Section, SectionHeader};

const WORDS: [&str; 8] = [
    "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel",
];

/// Default content width, in columns, when the config leaves it unset.
pub const DEMO_CONTENT_WIDTH: f64 = 120.0;

/// `rows` rows split evenly over `sections` sections; flat when `sections` is 0.
pub fn generate_rows(rows: usize, sections: usize) -> RowInput<String> {
    if sections == 0 {
        return RowInput::Flat((0..rows).map(demo_row).collect());
    }

    RowInput::Sectioned(
        (0..sections)
            .map(|s| {
                let start = s * rows / sections;
                let end = (s + 1) * rows / sections;
                let header = SectionHeader::new(
                    1.0,
                    format!("Section {} ({} rows)", s + 1, end - start),
                )
                .with_key(format!("section-{s}"));
                Section::with_header(header, (start..end).map(demo_row).collect())
            })
            .collect(),
    )
}

fn demo_row(index: usize) -> Row<String> {
    let word = WORDS[index % WORDS.len()];
    let (height, content) = if index % 7 == 3 {
        (2.0, format!("Row {index}: {word}\n    second line of row {index}"))
    } else {
        (1.0, format!("Row {index}: {}", word.repeat(1 + index % 4)))
    };

    let marker = if index % 5 == 0 { "*" } else { "" };
    Row::new(height, content)
        .with_key(format!("row-{index}"))
        .with_left_gutter(GutterDescriptor::new(format!("{:>5}", index + 1)))
        .with_right_gutter(GutterDescriptor::new(marker.to_string()))
}

/// Engine settings measured in terminal cells.
///
/// Scrollbars take one cell. Gutters and content width get demo defaults
/// when the config leaves them at zero.
pub fn terminal_config(base: &AppConfig) -> AppConfig {
    let mut config = base.clone();
    config.viewport.vertical_scrollbar_width = 1.0;
    config.viewport.horizontal_scrollbar_height = 1.0;
    if config.viewport.content_width.is_none() {
        config.viewport.content_width = Some(DEMO_CONTENT_WIDTH);
    }
    if config.gutters.left == GutterSideConfig::default() {
        config.gutters.left = GutterSideConfig {
            width: 6.0,
            handle_width: 1.0,
            min_width: 2.0,
        };
    }
    if config.gutters.right == GutterSideConfig::default() {
        config.gutters.right = GutterSideConfig {
            width: 2.0,
            handle_width: 1.0,
            min_width: 1.0,
        };
    }
    config
}
