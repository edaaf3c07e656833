//! Caller-owned row and section records.
//!
//! The engine is generic over the content type `C`: whatever the host needs
//! to paint a row (a widget handle, a string, a closure id). It never looks
//! inside `C`, it only reorders and slices rows.

use std::collections::HashSet;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Side decoration of a row, drawn in the left or right gutter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GutterDescriptor<C> {
    pub content: C,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub handle_class_name: Option<String>,
}

impl<C> GutterDescriptor<C> {
    pub fn new(content: C) -> Self {
        Self {
            content,
            class_name: None,
            handle_class_name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowGutters<C> {
    #[serde(default = "Option::default")]
    pub left: Option<GutterDescriptor<C>>,
    #[serde(default = "Option::default")]
    pub right: Option<GutterDescriptor<C>>,
}

impl<C> Default for RowGutters<C> {
    fn default() -> Self {
        Self {
            left: None,
            right: None,
        }
    }
}

/// One renderable unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row<C> {
    pub height: f64,
    pub content: C,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default = "RowGutters::default")]
    pub gutters: RowGutters<C>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub content_class_name: Option<String>,
    /// Host applies the horizontal transform itself
    #[serde(default)]
    pub passthrough_offsets: bool,
}

impl<C> Row<C> {
    pub fn new(height: f64, content: C) -> Self {
        Self {
            height,
            content,
            key: None,
            gutters: RowGutters::default(),
            class_name: None,
            content_class_name: None,
            passthrough_offsets: false,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_left_gutter(mut self, gutter: GutterDescriptor<C>) -> Self {
        self.gutters.left = Some(gutter);
        self
    }

    pub fn with_right_gutter(mut self, gutter: GutterDescriptor<C>) -> Self {
        self.gutters.right = Some(gutter);
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_passthrough_offsets(mut self, passthrough: bool) -> Self {
        self.passthrough_offsets = passthrough;
        self
    }
}

/// Header row of a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionHeader<C> {
    pub height: f64,
    pub content: C,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub collapsed_by_default: bool,
    #[serde(default)]
    pub class_name: Option<String>,
}

impl<C> SectionHeader<C> {
    pub fn new(height: f64, content: C) -> Self {
        Self {
            height,
            content,
            key: None,
            collapsed_by_default: false,
            class_name: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed_by_default = collapsed;
        self
    }
}

impl<C: Clone> SectionHeader<C> {
    /// The header as a plain row, the shape it takes in the flattened sequence.
    pub fn to_row(&self) -> Row<C> {
        Row {
            height: self.height,
            content: self.content.clone(),
            key: self.key.clone(),
            gutters: RowGutters::default(),
            class_name: self.class_name.clone(),
            content_class_name: None,
            passthrough_offsets: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section<C> {
    #[serde(default = "Option::default")]
    pub header: Option<SectionHeader<C>>,
    pub rows: Vec<Row<C>>,
}

impl<C> Section<C> {
    pub fn new(header: Option<SectionHeader<C>>, rows: Vec<Row<C>>) -> Self {
        Self { header, rows }
    }

    pub fn with_header(header: SectionHeader<C>, rows: Vec<Row<C>>) -> Self {
        Self::new(Some(header), rows)
    }
}

/// One element of an untyped input list, as read from a row file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputItem<C> {
    Section(Section<C>),
    Row(Row<C>),
}

/// The full row sequence handed to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum RowInput<C> {
    Flat(Vec<Row<C>>),
    Sectioned(Vec<Section<C>>),
}

impl<C> Default for RowInput<C> {
    fn default() -> Self {
        RowInput::Flat(Vec::new())
    }
}

impl<C> RowInput<C> {
    /// Build an input from a heterogeneous item list.
    ///
    /// The first item decides whether the input is flat or sectioned; any
    /// later item of the other kind is rejected.
    pub fn from_items(items: Vec<InputItem<C>>) -> Result<Self, ConfigurationError> {
        let sectioned = matches!(items.first(), Some(InputItem::Section(_)));

        if sectioned {
            let mut sections = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                match item {
                    InputItem::Section(section) => sections.push(section),
                    InputItem::Row(_) => return Err(ConfigurationError::MixedInput { index }),
                }
            }
            Ok(RowInput::Sectioned(sections))
        } else {
            let mut rows = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                match item {
                    InputItem::Row(row) => rows.push(row),
                    InputItem::Section(_) => return Err(ConfigurationError::MixedInput { index }),
                }
            }
            Ok(RowInput::Flat(rows))
        }
    }

    pub fn is_sectioned(&self) -> bool {
        matches!(self, RowInput::Sectioned(_))
    }

    pub fn section_count(&self) -> usize {
        match self {
            RowInput::Flat(rows) if rows.is_empty() => 0,
            RowInput::Flat(_) => 1,
            RowInput::Sectioned(sections) => sections.len(),
        }
    }

    /// Header of a section; flat input has none.
    pub fn section_header(&self, section: usize) -> Option<&SectionHeader<C>> {
        match self {
            RowInput::Flat(_) => None,
            RowInput::Sectioned(sections) => sections.get(section)?.header.as_ref(),
        }
    }

    /// Number of body rows, headers excluded.
    pub fn row_count(&self) -> usize {
        match self {
            RowInput::Flat(rows) => rows.len(),
            RowInput::Sectioned(sections) => sections.iter().map(|s| s.rows.len()).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RowInput::Flat(rows) => rows.is_empty(),
            RowInput::Sectioned(sections) => sections.is_empty(),
        }
    }

    /// Check heights and stable keys.
    ///
    /// Every height must be finite and positive. Sectioned input requires a
    /// key on every header. Keys, where present, must be unique across the
    /// whole input.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let mut keys = HashSet::new();
        let mut claim = |key: &Option<String>| -> Result<(), ConfigurationError> {
            if let Some(key) = key {
                if !keys.insert(key.clone()) {
                    return Err(ConfigurationError::DuplicateKey { key: key.clone() });
                }
            }
            Ok(())
        };

        match self {
            RowInput::Flat(rows) => {
                for (row_index, row) in rows.iter().enumerate() {
                    check_height(0, row_index, row.height)?;
                    claim(&row.key)?;
                }
            }
            RowInput::Sectioned(sections) => {
                for (section_index, section) in sections.iter().enumerate() {
                    if let Some(header) = &section.header {
                        if !is_valid_height(header.height) {
                            return Err(ConfigurationError::InvalidHeaderHeight {
                                section: section_index,
                                height: header.height,
                            });
                        }
                        if header.key.is_none() {
                            return Err(ConfigurationError::MissingHeaderKey {
                                section: section_index,
                            });
                        }
                        claim(&header.key)?;
                    }
                    for (row_index, row) in section.rows.iter().enumerate() {
                        check_height(section_index, row_index, row.height)?;
                        claim(&row.key)?;
                    }
                }
            }
        }

        Ok(())
    }
}

impl<C: DeserializeOwned> RowInput<C> {
    /// Parse a JSON array of rows or sections and validate it.
    pub fn from_json(text: &str) -> crate::Result<Self> {
        let items: Vec<InputItem<C>> = serde_json::from_str(text)?;
        let input = Self::from_items(items)?;
        input.validate()?;
        Ok(input)
    }

    pub fn load(path: &Path) -> crate::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

fn is_valid_height(height: f64) -> bool {
    height.is_finite() && height > 0.0
}

fn check_height(section: usize, row: usize, height: f64) -> Result<(), ConfigurationError> {
    if is_valid_height(height) {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidHeight {
            section,
            row,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(key: &str) -> SectionHeader<&'static str> {
        SectionHeader::new(30.0, "header").with_key(key)
    }

    #[test]
    fn test_from_items_flat() {
        let items = vec![
            InputItem::Row(Row::new(20.0, "a")),
            InputItem::Row(Row::new(20.0, "b")),
        ];
        let input = RowInput::from_items(items).unwrap();
        assert!(!input.is_sectioned());
        assert_eq!(input.row_count(), 2);
        assert_eq!(input.section_count(), 1);
    }

    #[test]
    fn test_from_items_sectioned() {
        let items = vec![
            InputItem::Section(Section::with_header(header("a"), vec![Row::new(20.0, "x")])),
            InputItem::Section(Section::new(None, vec![Row::new(20.0, "y")])),
        ];
        let input = RowInput::from_items(items).unwrap();
        assert!(input.is_sectioned());
        assert_eq!(input.section_count(), 2);
        assert_eq!(input.row_count(), 2);
    }

    #[test]
    fn test_from_items_rejects_mix() {
        let items = vec![
            InputItem::Row(Row::new(20.0, "a")),
            InputItem::Section(Section::with_header(header("s"), vec![])),
        ];
        assert_eq!(
            RowInput::from_items(items),
            Err(ConfigurationError::MixedInput { index: 1 })
        );
    }

    #[test]
    fn test_validate_rejects_bad_heights() {
        let input = RowInput::Flat(vec![Row::new(20.0, "a"), Row::new(f64::NAN, "b")]);
        assert!(matches!(
            input.validate(),
            Err(ConfigurationError::InvalidHeight { section: 0, row: 1, .. })
        ));

        let input = RowInput::Flat(vec![Row::new(0.0, "a")]);
        assert!(input.validate().is_err());

        let input = RowInput::Sectioned(vec![Section::with_header(
            SectionHeader::new(-1.0, "h").with_key("h"),
            vec![],
        )]);
        assert!(matches!(
            input.validate(),
            Err(ConfigurationError::InvalidHeaderHeight { section: 0, .. })
        ));
    }

    #[test]
    fn test_validate_keys() {
        let input = RowInput::Sectioned(vec![Section::with_header(
            SectionHeader::new(30.0, "h"),
            vec![Row::new(20.0, "a")],
        )]);
        assert_eq!(
            input.validate(),
            Err(ConfigurationError::MissingHeaderKey { section: 0 })
        );

        let input = RowInput::Sectioned(vec![
            Section::with_header(header("one"), vec![Row::new(20.0, "a").with_key("r1")]),
            Section::with_header(header("two"), vec![Row::new(20.0, "b").with_key("r1")]),
        ]);
        assert_eq!(
            input.validate(),
            Err(ConfigurationError::DuplicateKey {
                key: "r1".to_string()
            })
        );

        let input = RowInput::Sectioned(vec![
            Section::with_header(header("one"), vec![Row::new(20.0, "a")]),
            Section::with_header(header("two"), vec![Row::new(20.0, "b")]),
        ]);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_deserialize_items_from_json() {
        let json = r#"[
            {"header": {"height": 2, "content": "Fruit", "key": "fruit"},
             "rows": [{"height": 1, "content": "apple"}, {"height": 1, "content": "pear"}]},
            {"rows": [{"height": 1, "content": "loose", "passthrough_offsets": true}]}
        ]"#;
        let items: Vec<InputItem<String>> = serde_json::from_str(json).unwrap();
        let input = RowInput::from_items(items).unwrap();
        match input {
            RowInput::Sectioned(sections) => {
                assert_eq!(sections.len(), 2);
                assert_eq!(sections[0].header.as_ref().unwrap().key.as_deref(), Some("fruit"));
                assert!(sections[1].header.is_none());
                assert!(sections[1].rows[0].passthrough_offsets);
            }
            RowInput::Flat(_) => panic!("expected sectioned input"),
        }
    }

    #[test]
    fn test_from_json_validates() {
        let input = RowInput::<String>::from_json(r#"[{"height": 1, "content": "a"}]"#).unwrap();
        assert_eq!(input.row_count(), 1);

        let err = RowInput::<String>::from_json(r#"[{"height": -1, "content": "a"}]"#).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Configuration(ConfigurationError::InvalidHeight { .. })
        ));

        let err = RowInput::<String>::from_json("not json").unwrap_err();
        assert!(matches!(err, crate::Error::Json(_)));
    }
}
