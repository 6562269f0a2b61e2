//! Conversation state machine.
//!
//! One [`ConversationState`] tracks a linear walk through a form's field
//! list: which fields hold values, where the cursor is, and the rolling
//! transcript. The cursor only moves forward; starting a new conversation
//! silently discards the old one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::form::{FormDefinition, FormField, SlotValue};
use std::collections::HashMap;

/// Lifecycle phase of a form conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationPhase {
    NotStarted,
    InProgress,
    Complete,
}

/// Who produced a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry in the conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    pub role: Role,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// A recorded value for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValue {
    pub field_name: String,
    pub value: SlotValue,
    pub confirmed: bool,
}

/// In-progress record of one voice-driven form session.
#[derive(Debug, Clone)]
pub struct ConversationState {
    pub screen_name: String,
    form: FormDefinition,
    filled: HashMap<String, FieldValue>,
    current_field_index: usize,
    history: Vec<Turn>,
}

impl ConversationState {
    /// Begin a fresh walk over `form`, cursor at the first field.
    pub fn new(form: FormDefinition) -> Self {
        ConversationState {
            screen_name: form.screen_name.clone(),
            form,
            filled: HashMap::new(),
            current_field_index: 0,
            history: Vec::new(),
        }
    }

    pub fn form(&self) -> &FormDefinition {
        &self.form
    }

    /// The field the conversation is currently asking for, or None once the
    /// cursor has walked past the end.
    pub fn next_field(&self) -> Option<&FormField> {
        self.form.fields.get(self.current_field_index)
    }

    /// Record (or overwrite) a value for `name`. A confirmed value advances
    /// the cursor by one; the cursor never exceeds the field count.
    pub fn set_field_value(&mut self, name: &str, value: SlotValue, confirmed: bool) {
        self.filled.insert(
            name.to_string(),
            FieldValue {
                field_name: name.to_string(),
                value,
                confirmed,
            },
        );
        if confirmed && self.current_field_index < self.form.fields.len() {
            self.current_field_index += 1;
        }
    }

    pub fn field_value(&self, name: &str) -> Option<&FieldValue> {
        self.filled.get(name)
    }

    pub fn filled_fields(&self) -> &HashMap<String, FieldValue> {
        &self.filled
    }

    pub fn current_field_index(&self) -> usize {
        self.current_field_index
    }

    /// True once every required field holds a confirmed value.
    pub fn is_complete(&self) -> bool {
        self.form
            .fields
            .iter()
            .filter(|f| f.required)
            .all(|f| self.filled.get(&f.name).map(|v| v.confirmed).unwrap_or(false))
    }

    pub fn phase(&self) -> ConversationPhase {
        if self.is_complete() {
            ConversationPhase::Complete
        } else {
            ConversationPhase::InProgress
        }
    }

    /// Percentage of required fields confirmed, 0..=100.
    ///
    /// A form with no required fields reports 0 rather than dividing by zero.
    pub fn progress(&self) -> f32 {
        let required = self.form.required_count();
        if required == 0 {
            return 0.0;
        }
        let confirmed = self
            .form
            .fields
            .iter()
            .filter(|f| f.required)
            .filter(|f| self.filled.get(&f.name).map(|v| v.confirmed).unwrap_or(false))
            .count();
        100.0 * confirmed as f32 / required as f32
    }

    pub fn push_turn(&mut self, role: Role, message: &str) {
        self.history.push(Turn {
            role,
            message: message.to_string(),
            timestamp: Utc::now(),
        });
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }
}
