//! Session ownership.
//!
//! A [`Session`] is the explicit owner of everything the original app kept
//! as process-wide singletons: the one active conversation, the one current
//! screen context, and the field registry. The host (navigation controller,
//! test harness, one per window) constructs and threads it; nothing in this
//! crate is a module-level global, so independent sessions never share state.

pub mod bridge;
pub mod conversation;
pub mod screen;

use chrono::NaiveDate;

use crate::form::{FormDefinition, FormField, SlotValue};
use self::bridge::FieldRegistry;
use self::conversation::{ConversationPhase, ConversationState, Role};
use self::screen::ScreenContextPublisher;

/// One user's voice-assistant session.
pub struct Session {
    pub id: String,
    conversation: Option<ConversationState>,
    pub screen: ScreenContextPublisher,
    pub registry: FieldRegistry,
}

impl Session {
    pub fn new() -> Self {
        Session {
            id: uuid::Uuid::new_v4().to_string(),
            conversation: None,
            screen: ScreenContextPublisher::new(),
            registry: FieldRegistry::new(),
        }
    }

    /// Begin a form conversation, silently discarding any in-progress one.
    pub fn start_conversation(&mut self, form: FormDefinition) {
        if let Some(ref old) = self.conversation {
            tracing::debug!(
                session = %self.id,
                discarded = %old.screen_name,
                started = %form.screen_name,
                "Replacing in-progress conversation"
            );
        }
        self.conversation = Some(ConversationState::new(form));
    }

    pub fn clear_conversation(&mut self) {
        self.conversation = None;
    }

    pub fn conversation(&self) -> Option<&ConversationState> {
        self.conversation.as_ref()
    }

    // Fail-soft accessors: every operation against an absent conversation
    // returns a default so speculative callers never crash a screen.

    pub fn next_field(&self) -> Option<&FormField> {
        self.conversation.as_ref().and_then(|c| c.next_field())
    }

    /// Record a value; no-op when no conversation is active.
    pub fn set_field_value(&mut self, name: &str, value: SlotValue, confirmed: bool) {
        if let Some(ref mut conv) = self.conversation {
            conv.set_field_value(name, value, confirmed);
        }
    }

    pub fn progress(&self) -> f32 {
        self.conversation.as_ref().map(|c| c.progress()).unwrap_or(0.0)
    }

    pub fn is_complete(&self) -> bool {
        self.conversation.as_ref().map(|c| c.is_complete()).unwrap_or(false)
    }

    pub fn phase(&self) -> ConversationPhase {
        self.conversation
            .as_ref()
            .map(|c| c.phase())
            .unwrap_or(ConversationPhase::NotStarted)
    }

    /// Append to the conversation history when one is active.
    pub fn push_turn(&mut self, role: Role, message: &str) {
        if let Some(ref mut conv) = self.conversation {
            conv.push_turn(role, message);
        }
    }

    /// Reference date for relative date words in transcripts.
    pub fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FieldType, FormField};

    fn make_form(name: &str) -> FormDefinition {
        FormDefinition::new(
            name,
            vec![
                FormField::new("cropName", FieldType::Text, true, "What crop?"),
                FormField::new("quantity", FieldType::Number, true, "How much?"),
            ],
        )
    }

    #[test]
    fn test_fail_soft_without_conversation() {
        let mut session = Session::new();
        assert!(session.next_field().is_none());
        assert_eq!(session.progress(), 0.0);
        assert!(!session.is_complete());
        assert_eq!(session.phase(), ConversationPhase::NotStarted);
        // No-ops, no panics.
        session.set_field_value("cropName", SlotValue::Text("x".into()), true);
        session.push_turn(Role::User, "hello");
    }

    #[test]
    fn test_second_start_discards_first() {
        let mut session = Session::new();
        session.start_conversation(make_form("AddCrop"));
        session.set_field_value("cropName", SlotValue::Text("Tomatoes".into()), true);
        assert_eq!(session.progress(), 50.0);

        session.start_conversation(make_form("Register"));
        let conv = session.conversation().unwrap();
        assert_eq!(conv.screen_name, "Register");
        assert!(conv.filled_fields().is_empty());
        assert_eq!(session.progress(), 0.0);
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut a = Session::new();
        let mut b = Session::new();
        a.start_conversation(make_form("AddCrop"));
        a.set_field_value("cropName", SlotValue::Text("Onions".into()), true);
        b.start_conversation(make_form("AddCrop"));
        assert_eq!(a.progress(), 50.0);
        assert_eq!(b.progress(), 0.0);
        assert_ne!(a.id, b.id);
    }
}
