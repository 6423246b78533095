//! Introspectable metadata attached to synthesized properties.
//!
//! Each property carries a [`PropertyMetadata`] record: an ordered list of
//! [`Annotation`]s that the hosting framework queries by [`MetadataKey`].
//! The record is derived from the property's spec and never changes after
//! the type is published.

use serde::Serialize;

/// Multi-line editing hint for text properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MultiLine {
    /// Number of visible lines.
    pub number_of_lines: u32,
    /// Field width in characters; 0 lets the framework choose.
    pub width: u32,
}

impl MultiLine {
    /// Line count the hosting framework assumes when only a width is given.
    pub const DEFAULT_NUMBER_OF_LINES: u32 = 6;
    /// Width the hosting framework assumes when only a line count is given.
    pub const DEFAULT_WIDTH: u32 = 0;

    /// Resolve the hint from the two independent spec values.
    ///
    /// Returns `None` when neither dimension is given; a missing dimension
    /// takes the framework default rather than an explicit zero.
    pub fn from_parts(lines: Option<u32>, width: Option<u32>) -> Option<Self> {
        match (lines, width) {
            (Some(number_of_lines), Some(width)) => Some(Self { number_of_lines, width }),
            (Some(number_of_lines), None) => {
                Some(Self { number_of_lines, width: Self::DEFAULT_WIDTH })
            }
            (None, Some(width)) => {
                Some(Self { number_of_lines: Self::DEFAULT_NUMBER_OF_LINES, width })
            }
            (None, None) => None,
        }
    }
}

/// Key under which an annotation is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MetadataKey {
    DisplayName,
    MemberOrder,
    DescribedAs,
    Optionally,
    TypicalLength,
    MaxLength,
    MultiLine,
}

impl MetadataKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DisplayName => "display_name",
            Self::MemberOrder => "member_order",
            Self::DescribedAs => "described_as",
            Self::Optionally => "optionally",
            Self::TypicalLength => "typical_length",
            Self::MaxLength => "max_length",
            Self::MultiLine => "multi_line",
        }
    }
}

impl std::fmt::Display for MetadataKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One piece of metadata on a property.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "key", content = "value", rename_all = "snake_case")]
pub enum Annotation {
    DisplayName(String),
    MemberOrder(f64),
    DescribedAs(String),
    /// Marks the property as optional; absence means mandatory.
    Optionally,
    TypicalLength(u32),
    MaxLength(u32),
    MultiLine(MultiLine),
}

impl Annotation {
    pub fn key(&self) -> MetadataKey {
        match self {
            Self::DisplayName(_) => MetadataKey::DisplayName,
            Self::MemberOrder(_) => MetadataKey::MemberOrder,
            Self::DescribedAs(_) => MetadataKey::DescribedAs,
            Self::Optionally => MetadataKey::Optionally,
            Self::TypicalLength(_) => MetadataKey::TypicalLength,
            Self::MaxLength(_) => MetadataKey::MaxLength,
            Self::MultiLine(_) => MetadataKey::MultiLine,
        }
    }
}

/// Metadata record for one synthesized property.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PropertyMetadata {
    annotations: Vec<Annotation>,
}

impl PropertyMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an annotation, replacing any existing one with the same key.
    pub fn attach(&mut self, annotation: Annotation) {
        let key = annotation.key();
        match self.annotations.iter_mut().find(|a| a.key() == key) {
            Some(existing) => *existing = annotation,
            None => self.annotations.push(annotation),
        }
    }

    pub fn get(&self, key: MetadataKey) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.key() == key)
    }

    pub fn contains(&self, key: MetadataKey) -> bool {
        self.get(key).is_some()
    }

    /// Annotations in attachment order.
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter()
    }

    pub fn keys(&self) -> Vec<MetadataKey> {
        self.annotations.iter().map(Annotation::key).collect()
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn display_name(&self) -> Option<&str> {
        match self.get(MetadataKey::DisplayName) {
            Some(Annotation::DisplayName(name)) => Some(name),
            _ => None,
        }
    }

    pub fn order(&self) -> Option<f64> {
        match self.get(MetadataKey::MemberOrder) {
            Some(Annotation::MemberOrder(order)) => Some(*order),
            _ => None,
        }
    }

    /// Member order as the framework's sequence string (`7.0` becomes `"7"`).
    pub fn sequence(&self) -> Option<String> {
        self.order().map(|order| order.to_string())
    }

    pub fn description(&self) -> Option<&str> {
        match self.get(MetadataKey::DescribedAs) {
            Some(Annotation::DescribedAs(text)) => Some(text),
            _ => None,
        }
    }

    pub fn is_optional(&self) -> bool {
        self.contains(MetadataKey::Optionally)
    }

    pub fn is_mandatory(&self) -> bool {
        !self.is_optional()
    }

    pub fn typical_length(&self) -> Option<u32> {
        match self.get(MetadataKey::TypicalLength) {
            Some(Annotation::TypicalLength(len)) => Some(*len),
            _ => None,
        }
    }

    pub fn max_length(&self) -> Option<u32> {
        match self.get(MetadataKey::MaxLength) {
            Some(Annotation::MaxLength(len)) => Some(*len),
            _ => None,
        }
    }

    pub fn multi_line(&self) -> Option<MultiLine> {
        match self.get(MetadataKey::MultiLine) {
            Some(Annotation::MultiLine(ml)) => Some(*ml),
            _ => None,
        }
    }
}
