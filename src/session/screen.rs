//! Screen context publisher.
//!
//! Holds the single current-screen descriptor for a session and notifies
//! subscribers synchronously on every replacement. Listeners are never
//! called with an absent context; clearing does not notify.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Descriptor of the currently active screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenContext {
    pub screen_name: String,
    pub screen_title: String,
    pub has_form: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub form_fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_role: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub params: HashMap<String, String>,
}

impl ScreenContext {
    pub fn new(screen_name: &str, screen_title: &str) -> Self {
        ScreenContext {
            screen_name: screen_name.to_string(),
            screen_title: screen_title.to_string(),
            has_form: false,
            form_fields: Vec::new(),
            user_role: None,
            params: HashMap::new(),
        }
    }

    /// Mark the screen as form-bearing with the given declared field names.
    pub fn with_form(mut self, field_names: &[&str]) -> Self {
        self.has_form = true;
        self.form_fields = field_names.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_role(mut self, role: &str) -> Self {
        self.user_role = Some(role.to_string());
        self
    }
}

/// Handle returned by `subscribe`, passed back to `unsubscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Listener = Box<dyn Fn(&ScreenContext) + Send>;

/// Single current context plus its listeners.
#[derive(Default)]
pub struct ScreenContextPublisher {
    current: Option<ScreenContext>,
    listeners: HashMap<SubscriberId, Listener>,
    next_id: u64,
}

impl ScreenContextPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current context wholesale and notify all subscribers.
    pub fn set_context(&mut self, context: ScreenContext) {
        tracing::debug!(screen = %context.screen_name, has_form = context.has_form, "Screen context updated");
        for listener in self.listeners.values() {
            listener(&context);
        }
        self.current = Some(context);
    }

    /// Drop the current context without notifying.
    pub fn clear_context(&mut self) {
        self.current = None;
    }

    pub fn subscribe(&mut self, listener: Listener) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, listener);
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.listeners.remove(&id);
    }

    pub fn context(&self) -> Option<&ScreenContext> {
        self.current.as_ref()
    }

    // Defensive accessors: UI code calls these speculatively on every render,
    // so an absent context must resolve to a safe default, never a panic.

    pub fn has_form(&self) -> bool {
        self.current.as_ref().map(|c| c.has_form).unwrap_or(false)
    }

    pub fn form_fields(&self) -> &[String] {
        self.current
            .as_ref()
            .map(|c| c.form_fields.as_slice())
            .unwrap_or(&[])
    }

    pub fn screen_title(&self) -> &str {
        self.current
            .as_ref()
            .map(|c| c.screen_title.as_str())
            .unwrap_or("AgriVoice")
    }

    pub fn user_role(&self) -> Option<&str> {
        self.current.as_ref().and_then(|c| c.user_role.as_deref())
    }
}
