//! Field registry / automation bridge.
//!
//! The only surface through which the conversation layer writes into the
//! live UI. Each mounted screen registers a [`FormFieldSink`] per field and
//! removes its entries on unmount; a sink left behind by an unmounted screen
//! must be unregistered or writes against it will fail soft.

use std::collections::HashMap;

use crate::form::SlotValue;

/// Error a sink may raise when the backing control rejects a write.
#[derive(Debug, thiserror::Error)]
#[error("sink error: {0}")]
pub struct SinkError(pub String);

/// Capability a mounted form control exposes per field.
///
/// Implementations wrap whatever UI state mechanism the host uses; the
/// conversation layer never learns the concrete type.
pub trait FormFieldSink: Send {
    fn set(&self, value: &SlotValue) -> Result<(), SinkError>;
    fn get(&self) -> Option<SlotValue>;
}

/// Runtime mapping from `"screen:field"` to the mounted control's sink.
#[derive(Default)]
pub struct FieldRegistry {
    sinks: HashMap<String, Box<dyn FormFieldSink>>,
}

fn key(screen: &str, field: &str) -> String {
    format!("{}:{}", screen, field)
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sink, overwriting any prior registration for the same key.
    pub fn register(&mut self, screen: &str, field: &str, sink: Box<dyn FormFieldSink>) {
        tracing::debug!(screen, field, "Registering form field sink");
        self.sinks.insert(key(screen, field), sink);
    }

    pub fn unregister(&mut self, screen: &str, field: &str) {
        self.sinks.remove(&key(screen, field));
    }

    /// Remove every sink registered by `screen`. Called on unmount.
    pub fn unregister_screen(&mut self, screen: &str) {
        let prefix = format!("{}:", screen);
        self.sinks.retain(|k, _| !k.starts_with(&prefix));
    }

    /// Push `value` into the mounted control for `screen:field`.
    ///
    /// Returns false (never panics, never propagates) when the key is
    /// unregistered or the sink rejects the write.
    pub fn set_field_value(&self, screen: &str, field: &str, value: &SlotValue) -> bool {
        match self.sinks.get(&key(screen, field)) {
            Some(sink) => match sink.set(value) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(screen, field, error = %e, "Field sink rejected value");
                    false
                }
            },
            None => {
                tracing::warn!(screen, field, "No sink registered for field");
                false
            }
        }
    }

    /// Read the mounted control's current value, None when unregistered.
    pub fn get_field_value(&self, screen: &str, field: &str) -> Option<SlotValue> {
        self.sinks.get(&key(screen, field)).and_then(|s| s.get())
    }

    pub fn is_registered(&self, screen: &str, field: &str) -> bool {
        self.sinks.contains_key(&key(screen, field))
    }
}
