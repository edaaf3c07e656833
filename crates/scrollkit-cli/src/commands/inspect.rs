use std::fmt::Write;
use std::path::Path;

use anyhow::{Context, Result};

use scrollkit_core::{build_row_config_with_buffer, AppConfig, RowConfig, RowInput};

/// Partition offsets printed before eliding the rest
const MAX_PARTITIONS: usize = 12;

pub fn run(config: &AppConfig, path: &Path, stack_headers: bool) -> Result<()> {
    let input: RowInput<String> = RowInput::load(path)
        .with_context(|| format!("Failed to load rows from {}", path.display()))?;

    let rows = build_row_config_with_buffer(
        &input,
        stack_headers,
        &[],
        config.viewport.offset_buffer.max(1),
    );

    print!("{}", summary(&input, &rows)?);
    Ok(())
}

fn summary(input: &RowInput<String>, rows: &RowConfig<String>) -> Result<String> {
    let mut out = String::new();

    writeln!(
        out,
        "Rows: {} ({} sections, {} flattened)",
        input.row_count(),
        input.section_count(),
        rows.row_count()
    )?;
    writeln!(out, "Content height: {}", rows.content_height)?;
    writeln!(out, "Average row height: {:.2}", rows.avg_row_height)?;

    let shown: Vec<String> = rows
        .partitions
        .iter()
        .take(MAX_PARTITIONS)
        .map(|p| p.to_string())
        .collect();
    let more = rows.partitions.len().saturating_sub(MAX_PARTITIONS);
    write!(
        out,
        "Partitions ({} rows each, {}): {}",
        rows.offset_buffer,
        rows.partitions.len(),
        shown.join(", ")
    )?;
    if more > 0 {
        write!(out, ", ... {} more", more)?;
    }
    out.push('\n');

    let headers = rows.header_records();
    if headers.is_empty() {
        return Ok(out);
    }

    writeln!(out, "\nHeaders ({}):", headers.len())?;
    for (i, header) in headers.iter().enumerate() {
        let collapsed = if rows.is_collapsed(header.section) {
            " [collapsed]"
        } else {
            ""
        };
        writeln!(
            out,
            "  #{} section {} row {}: height {}, lock {}, offset {}, stacked above {}{}",
            i,
            header.section,
            header.row_index,
            header.height,
            header.lock_position,
            header.real_offset,
            header.cumulative_header_offset,
            collapsed
        )?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollkit_core::build_row_config;

    const ROWS: &str = r#"[
        {"header": {"height": 20, "content": "A", "key": "a"},
         "rows": [{"height": 10, "content": "a1"}, {"height": 10, "content": "a2"}]},
        {"header": {"height": 20, "content": "B", "key": "b", "collapsed_by_default": true},
         "rows": [{"height": 10, "content": "b1"}]}
    ]"#;

    #[test]
    fn test_summary_lists_headers() {
        let input: RowInput<String> = RowInput::from_json(ROWS).unwrap();
        let rows = build_row_config(&input, true, &[]);
        let text = summary(&input, &rows).unwrap();

        assert!(text.starts_with("Rows: 3 (2 sections, 4 flattened)"));
        assert!(text.contains("Content height: 60"));
        assert!(text.contains("#0 section 0 row 0: height 20, lock 0, offset 0, stacked above 0"));
        assert!(text.contains("#1 section 1 row 3: height 20, lock 20, offset 40, stacked above 20 [collapsed]"));
    }

    #[test]
    fn test_summary_flat_has_no_headers() {
        let input: RowInput<String> =
            RowInput::from_json(r#"[{"height": 5, "content": "x"}]"#).unwrap();
        let rows = build_row_config(&input, false, &[]);
        let text = summary(&input, &rows).unwrap();
        assert!(text.contains("Partitions (6 rows each, 1): 0"));
        assert!(!text.contains("Headers"));
    }
}
