//! Static form declarations.
//!
//! Every screen that hosts a voice-fillable form declares its fields once at
//! startup. Definitions are immutable after construction and looked up by
//! screen name through [`FormCatalog`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Input slot kinds a form field can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Email,
    Phone,
    Number,
    Date,
    Dropdown,
    Image,
}

/// Typed value a field can hold once parsed.
///
/// `Date` carries either a normalized `YYYY-MM-DD` string or, when the
/// transcript did not match any known pattern, the raw trimmed text; callers
/// that need the distinction get it from the parse outcome, not from here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum SlotValue {
    Text(String),
    Number(f64),
    Date(String),
    Choice(String),
    Flag(bool),
}

impl SlotValue {
    /// Human-readable rendering for prompts and logs.
    pub fn display(&self) -> String {
        match self {
            SlotValue::Text(s) | SlotValue::Date(s) | SlotValue::Choice(s) => s.clone(),
            SlotValue::Number(n) => {
                if n.fract() == 0.0 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            SlotValue::Flag(b) => if *b { "yes" } else { "no" }.to_string(),
        }
    }
}

/// One input slot of a form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    /// Unique within the form.
    pub name: String,
    pub field_type: FieldType,
    /// Only required fields count toward completion.
    pub required: bool,
    /// Ordered option labels; only meaningful for `Dropdown`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Template spoken/shown to request this field's value.
    pub voice_prompt: String,
}

impl FormField {
    /// Shorthand constructor for non-dropdown fields.
    pub fn new(name: &str, field_type: FieldType, required: bool, voice_prompt: &str) -> Self {
        FormField {
            name: name.to_string(),
            field_type,
            required,
            options: Vec::new(),
            voice_prompt: voice_prompt.to_string(),
        }
    }

    /// Human label for spoken acknowledgements: the camelCase machine name
    /// rendered as lowercase words ("pricePerUnit" becomes "price per unit").
    pub fn label(&self) -> String {
        let mut out = String::with_capacity(self.name.len() + 4);
        for c in self.name.chars() {
            if c.is_uppercase() {
                out.push(' ');
                out.extend(c.to_lowercase());
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Shorthand constructor for dropdown fields.
    pub fn dropdown(name: &str, required: bool, options: &[&str], voice_prompt: &str) -> Self {
        FormField {
            name: name.to_string(),
            field_type: FieldType::Dropdown,
            required,
            options: options.iter().map(|s| s.to_string()).collect(),
            voice_prompt: voice_prompt.to_string(),
        }
    }
}

/// A screen's ordered field list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDefinition {
    pub screen_name: String,
    pub fields: Vec<FormField>,
}

impl FormDefinition {
    pub fn new(screen_name: &str, fields: Vec<FormField>) -> Self {
        FormDefinition {
            screen_name: screen_name.to_string(),
            fields,
        }
    }

    /// Number of fields that count toward completion.
    pub fn required_count(&self) -> usize {
        self.fields.iter().filter(|f| f.required).count()
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Lookup of form definitions by screen name.
#[derive(Debug, Default)]
pub struct FormCatalog {
    forms: HashMap<String, FormDefinition>,
}

impl FormCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition, replacing any prior one for the same screen.
    pub fn insert(&mut self, form: FormDefinition) {
        self.forms.insert(form.screen_name.clone(), form);
    }

    pub fn get(&self, screen_name: &str) -> Option<&FormDefinition> {
        self.forms.get(screen_name)
    }

    /// Catalog preloaded with the marketplace screens.
    pub fn with_marketplace_forms() -> Self {
        let mut catalog = Self::new();
        catalog.insert(FormDefinition::new(
            "AddCrop",
            vec![
                FormField::new("cropName", FieldType::Text, true, "What crop are you selling?"),
                FormField::new("quantity", FieldType::Number, true, "How much do you have?"),
                FormField::dropdown(
                    "unit",
                    true,
                    &["kg", "quintal", "ton", "bag"],
                    "What unit is that in?",
                ),
                FormField::new("pricePerUnit", FieldType::Number, true, "What price per unit do you want?"),
                FormField::new("harvestDate", FieldType::Date, false, "When was it harvested?"),
                FormField::new("description", FieldType::Textarea, false, "Anything else buyers should know?"),
                FormField::new("photo", FieldType::Image, false, "Would you like to add a photo?"),
            ],
        ));
        catalog.insert(FormDefinition::new(
            "Register",
            vec![
                FormField::new("fullName", FieldType::Text, true, "What is your full name?"),
                FormField::new("phone", FieldType::Phone, true, "What is your phone number?"),
                FormField::new("email", FieldType::Email, false, "What is your email address?"),
                FormField::new("village", FieldType::Text, true, "Which village or town are you in?"),
            ],
        ));
        catalog
    }
}
