//! Property specifications: the declarative input to type synthesis.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::errors::{SynthError, SynthResult};
use super::value::{Value, ValueType};

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex")
});

/// Description of one property to synthesize.
///
/// Specs are usually built in code:
///
/// ```
/// use dynview_core::{PropertySpec, ValueType};
///
/// let spec = PropertySpec::new("Comments", ValueType::Text)
///     .with_display_name("Comments here")
///     .with_order(7.0)
///     .with_multi_line(10, 20);
/// assert_eq!(spec.multi_line_lines, Some(10));
/// ```
///
/// They can also be deserialized, which allows spec lists to live in
/// JSON or TOML documents:
///
/// ```json
/// { "name": "PaymentMethod", "type": "text", "choices": ["Visa", "Amex"] }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PropertySpec {
    /// Property name; the generated accessor uses it verbatim.
    pub name: String,

    /// Declared value type of the storage slot.
    #[serde(rename = "type", default)]
    pub value_type: ValueType,

    /// Label shown by the hosting framework. Attached as "" when absent.
    #[serde(default)]
    pub display_name: Option<String>,

    /// Member order sequence.
    #[serde(default)]
    pub order: f64,

    #[serde(default)]
    pub description: Option<String>,

    /// Whether the property must be filled in. Optional unless set.
    #[serde(default)]
    pub mandatory: bool,

    // Text-only metadata
    #[serde(default)]
    pub typical_length: Option<u32>,

    #[serde(default)]
    pub max_length: Option<u32>,

    #[serde(default)]
    pub multi_line_lines: Option<u32>,

    #[serde(default)]
    pub multi_line_width: Option<u32>,

    /// Enumerated valid values, exposed through a generated `choices<Name>` method.
    #[serde(default)]
    pub choices: Option<Vec<String>>,

    /// Value applied to a fresh instance after construction.
    #[serde(default)]
    pub initial_value: Option<Value>,
}

impl PropertySpec {
    /// Create a spec with only a name and a type; everything else defaulted.
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            ..Default::default()
        }
    }

    /// Shorthand for a text property.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Text)
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_order(mut self, order: f64) -> Self {
        self.order = order;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    pub fn with_typical_length(mut self, length: u32) -> Self {
        self.typical_length = Some(length);
        self
    }

    pub fn with_max_length(mut self, length: u32) -> Self {
        self.max_length = Some(length);
        self
    }

    /// Set both multi-line dimensions.
    pub fn with_multi_line(mut self, lines: u32, width: u32) -> Self {
        self.multi_line_lines = Some(lines);
        self.multi_line_width = Some(width);
        self
    }

    pub fn with_multi_line_lines(mut self, lines: u32) -> Self {
        self.multi_line_lines = Some(lines);
        self
    }

    pub fn with_multi_line_width(mut self, width: u32) -> Self {
        self.multi_line_width = Some(width);
        self
    }

    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_initial_value(mut self, value: impl Into<Value>) -> Self {
        self.initial_value = Some(value.into());
        self
    }

    /// Name of the generated choices method, if this spec produces one.
    pub fn choices_method_name(&self) -> Option<String> {
        self.choices.as_ref().map(|_| choices_method_name(&self.name))
    }

    /// Names of text-only settings present on this spec.
    fn text_only_settings(&self) -> Vec<&'static str> {
        let mut set = Vec::new();
        if self.typical_length.is_some() {
            set.push("typical_length");
        }
        if self.max_length.is_some() {
            set.push("max_length");
        }
        if self.multi_line_lines.is_some() {
            set.push("multi_line_lines");
        }
        if self.multi_line_width.is_some() {
            set.push("multi_line_width");
        }
        if self.choices.is_some() {
            set.push("choices");
        }
        set
    }

    /// Validate this spec in isolation.
    pub fn validate(&self) -> SynthResult<()> {
        if self.name.is_empty() {
            return Err(SynthError::invalid_spec("", "property name must not be empty"));
        }

        if !IDENTIFIER.is_match(&self.name) {
            return Err(SynthError::invalid_spec(
                &self.name,
                "property name must be an identifier",
            ));
        }

        if !self.value_type.is_text() {
            let settings = self.text_only_settings();
            if !settings.is_empty() {
                return Err(SynthError::invalid_spec(
                    &self.name,
                    format!(
                        "{} only apply to text properties, not {}",
                        settings.join(", "),
                        self.value_type
                    ),
                ));
            }
        }

        if let Some(value) = &self.initial_value
            && !self.value_type.accepts(value)
        {
            return Err(SynthError::InitialValueTypeMismatch {
                property: self.name.clone(),
                expected: self.value_type.to_string(),
                actual: value.type_name().to_string(),
            });
        }

        Ok(())
    }
}

/// Name of the generated choices method for a property.
pub fn choices_method_name(property: &str) -> String {
    format!("choices{}", property)
}

/// Validate a whole spec list for one synthesis call.
///
/// Checks every spec and rejects duplicate names.
pub fn validate_specs(specs: &[PropertySpec]) -> SynthResult<()> {
    let mut seen = HashSet::with_capacity(specs.len());
    for spec in specs {
        spec.validate()?;
        if !seen.insert(spec.name.as_str()) {
            return Err(SynthError::invalid_spec(&spec.name, "duplicate property name"));
        }
    }
    Ok(())
}
