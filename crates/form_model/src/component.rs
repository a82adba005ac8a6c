//! Component types and their type-specific property payloads
//!
//! Every field carries a [`ComponentType`] and a [`FieldProperties`] payload.
//! The payload is a closed sum type: each property family has its own struct,
//! and [`FieldProperties::accepts`] decides which families are valid for which
//! component kinds. The layout engine never looks inside the payload.

use serde::{Deserialize, Serialize};

// =============================================================================
// Component Types
// =============================================================================

/// The fixed set of field kinds offered by the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    TextInput,
    Email,
    Password,
    Number,
    Textarea,
    Select,
    MultiSelect,
    Radio,
    Checkbox,
    Toggle,
    Date,
    Time,
    FileUpload,
    Heading,
    Paragraph,
    Divider,
    Button,
}

impl ComponentType {
    /// All component types in palette order
    pub const ALL: [ComponentType; 17] = [
        ComponentType::TextInput,
        ComponentType::Email,
        ComponentType::Password,
        ComponentType::Number,
        ComponentType::Textarea,
        ComponentType::Select,
        ComponentType::MultiSelect,
        ComponentType::Radio,
        ComponentType::Checkbox,
        ComponentType::Toggle,
        ComponentType::Date,
        ComponentType::Time,
        ComponentType::FileUpload,
        ComponentType::Heading,
        ComponentType::Paragraph,
        ComponentType::Divider,
        ComponentType::Button,
    ];

    /// Human-readable name, also used as the default label
    pub fn display_name(&self) -> &'static str {
        match self {
            ComponentType::TextInput => "Text Input",
            ComponentType::Email => "Email",
            ComponentType::Password => "Password",
            ComponentType::Number => "Number",
            ComponentType::Textarea => "Text Area",
            ComponentType::Select => "Dropdown",
            ComponentType::MultiSelect => "Multi Select",
            ComponentType::Radio => "Radio Group",
            ComponentType::Checkbox => "Checkbox",
            ComponentType::Toggle => "Toggle",
            ComponentType::Date => "Date Picker",
            ComponentType::Time => "Time Picker",
            ComponentType::FileUpload => "File Upload",
            ComponentType::Heading => "Heading",
            ComponentType::Paragraph => "Paragraph",
            ComponentType::Divider => "Divider",
            ComponentType::Button => "Button",
        }
    }
}

// =============================================================================
// Property Payloads
// =============================================================================

/// Properties shared by free-text inputs (text, email, password, textarea)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct TextProperties {
    pub placeholder: Option<String>,
    pub required: bool,
    pub min_length: Option<u32>,
    pub max_length: Option<u32>,
    pub default_value: Option<String>,
    /// Visible rows, only meaningful for textareas
    pub rows: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct NumberProperties {
    pub placeholder: Option<String>,
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub default_value: Option<f64>,
}

/// One entry of a select/radio option list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub label: String,
    pub value: String,
}

impl ChoiceOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct ChoiceProperties {
    pub required: bool,
    pub options: Vec<ChoiceOption>,
    pub default_values: Vec<String>,
}

impl ChoiceProperties {
    fn with_sample_options() -> Self {
        Self {
            required: false,
            options: vec![
                ChoiceOption::new("Option 1", "option_1"),
                ChoiceOption::new("Option 2", "option_2"),
                ChoiceOption::new("Option 3", "option_3"),
            ],
            default_values: Vec::new(),
        }
    }
}

/// Properties for checkboxes and toggles
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct BooleanProperties {
    pub required: bool,
    pub default_checked: bool,
}

/// Properties for date and time pickers (ISO 8601 strings)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct TemporalProperties {
    pub required: bool,
    pub min: Option<String>,
    pub max: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct FileProperties {
    pub required: bool,
    /// Accepted MIME types or extensions, empty means any
    pub accept: Vec<String>,
    pub multiple: bool,
    pub max_size_mb: u32,
}

impl Default for FileProperties {
    fn default() -> Self {
        Self {
            required: false,
            accept: Vec::new(),
            multiple: false,
            max_size_mb: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingProperties {
    /// Heading level 1-6
    pub level: u8,
}

impl Default for HeadingProperties {
    fn default() -> Self {
        Self { level: 2 }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticTextProperties {
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonAction {
    #[default]
    Submit,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonProperties {
    pub action: ButtonAction,
}

/// Type-specific payload of a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldProperties {
    Text(TextProperties),
    Number(NumberProperties),
    Choice(ChoiceProperties),
    Boolean(BooleanProperties),
    Temporal(TemporalProperties),
    File(FileProperties),
    Heading(HeadingProperties),
    StaticText(StaticTextProperties),
    Divider,
    Button(ButtonProperties),
}

impl FieldProperties {
    /// Default payload for a freshly created field of the given type
    pub fn defaults_for(component_type: ComponentType) -> Self {
        match component_type {
            ComponentType::TextInput | ComponentType::Email | ComponentType::Password => {
                FieldProperties::Text(TextProperties::default())
            }
            ComponentType::Textarea => FieldProperties::Text(TextProperties {
                rows: Some(4),
                ..TextProperties::default()
            }),
            ComponentType::Number => FieldProperties::Number(NumberProperties::default()),
            ComponentType::Select | ComponentType::MultiSelect | ComponentType::Radio => {
                FieldProperties::Choice(ChoiceProperties::with_sample_options())
            }
            ComponentType::Checkbox | ComponentType::Toggle => {
                FieldProperties::Boolean(BooleanProperties::default())
            }
            ComponentType::Date | ComponentType::Time => {
                FieldProperties::Temporal(TemporalProperties::default())
            }
            ComponentType::FileUpload => FieldProperties::File(FileProperties::default()),
            ComponentType::Heading => FieldProperties::Heading(HeadingProperties::default()),
            ComponentType::Paragraph => FieldProperties::StaticText(StaticTextProperties {
                content: "Paragraph text".to_string(),
            }),
            ComponentType::Divider => FieldProperties::Divider,
            ComponentType::Button => FieldProperties::Button(ButtonProperties::default()),
        }
    }

    /// Tag name of this payload, as written in the `kind` field
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldProperties::Text(_) => "text",
            FieldProperties::Number(_) => "number",
            FieldProperties::Choice(_) => "choice",
            FieldProperties::Boolean(_) => "boolean",
            FieldProperties::Temporal(_) => "temporal",
            FieldProperties::File(_) => "file",
            FieldProperties::Heading(_) => "heading",
            FieldProperties::StaticText(_) => "static_text",
            FieldProperties::Divider => "divider",
            FieldProperties::Button(_) => "button",
        }
    }

    /// Check whether this payload is valid for the given component type
    pub fn accepts(&self, component_type: ComponentType) -> bool {
        use ComponentType as C;
        match self {
            FieldProperties::Text(_) => matches!(
                component_type,
                C::TextInput | C::Email | C::Password | C::Textarea
            ),
            FieldProperties::Number(_) => component_type == C::Number,
            FieldProperties::Choice(_) => {
                matches!(component_type, C::Select | C::MultiSelect | C::Radio)
            }
            FieldProperties::Boolean(_) => matches!(component_type, C::Checkbox | C::Toggle),
            FieldProperties::Temporal(_) => matches!(component_type, C::Date | C::Time),
            FieldProperties::File(_) => component_type == C::FileUpload,
            FieldProperties::Heading(h) => component_type == C::Heading && (1..=6).contains(&h.level),
            FieldProperties::StaticText(_) => component_type == C::Paragraph,
            FieldProperties::Divider => component_type == C::Divider,
            FieldProperties::Button(_) => component_type == C::Button,
        }
    }
}
