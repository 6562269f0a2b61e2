//! End-to-end form conversation scenarios.

use std::sync::{Arc, Mutex};

use agrivoice::agent::{AgentAction, Orchestrator};
use agrivoice::form::{FieldType, FormDefinition, FormField, SlotValue};
use agrivoice::session::bridge::{FormFieldSink, SinkError};
use agrivoice::session::screen::ScreenContext;
use agrivoice::session::Session;

/// Sink that records writes, standing in for a mounted UI control.
struct RecordingSink {
    cell: Arc<Mutex<Option<SlotValue>>>,
}

impl FormFieldSink for RecordingSink {
    fn set(&self, value: &SlotValue) -> Result<(), SinkError> {
        *self.cell.lock().unwrap() = Some(value.clone());
        Ok(())
    }

    fn get(&self) -> Option<SlotValue> {
        self.cell.lock().unwrap().clone()
    }
}

fn register_sink(session: &mut Session, screen: &str, field: &str) -> Arc<Mutex<Option<SlotValue>>> {
    let cell = Arc::new(Mutex::new(None));
    session
        .registry
        .register(screen, field, Box::new(RecordingSink { cell: cell.clone() }));
    cell
}

fn add_crop_form() -> FormDefinition {
    FormDefinition::new(
        "AddCrop",
        vec![
            FormField::new("cropName", FieldType::Text, true, "What crop are you selling?"),
            FormField::new("quantity", FieldType::Number, true, "How much do you have?"),
        ],
    )
}

fn mount_form_screen(session: &mut Session, form: &FormDefinition) {
    let names: Vec<&str> = form.fields.iter().map(|f| f.name.as_str()).collect();
    session.screen.set_context(
        ScreenContext::new(&form.screen_name, &form.screen_name).with_form(&names),
    );
}

#[tokio::test]
async fn full_conversation_fills_form_and_ui() {
    let mut session = Session::new();
    let form = add_crop_form();
    mount_form_screen(&mut session, &form);
    let crop_cell = register_sink(&mut session, "AddCrop", "cropName");
    let qty_cell = register_sink(&mut session, "AddCrop", "quantity");

    let mut agent = Orchestrator::new(None, "en");
    let first = agent.begin_form(&mut session, form);
    assert_eq!(first.text, "What crop are you selling?");
    assert!(first.requires_input);

    let mid = agent.process_input(&mut session, "Tomatoes").await;
    assert_eq!(mid.progress, Some(50.0));
    assert_eq!(
        *crop_cell.lock().unwrap(),
        Some(SlotValue::Text("Tomatoes".into()))
    );

    let done = agent.process_input(&mut session, "25 quintals worth").await;
    assert_eq!(done.progress, Some(100.0));
    assert_eq!(
        done.action,
        Some(AgentAction::FormComplete { screen: "AddCrop".into() })
    );
    assert_eq!(*qty_cell.lock().unwrap(), Some(SlotValue::Number(25.0)));
    assert!(session.is_complete());
    assert!(session.next_field().is_none());
}

#[tokio::test]
async fn walk_visits_every_field_exactly_once() {
    let form = FormDefinition::new(
        "Register",
        vec![
            FormField::new("fullName", FieldType::Text, true, "Name?"),
            FormField::new("phone", FieldType::Phone, true, "Phone?"),
            FormField::new("village", FieldType::Text, true, "Village?"),
        ],
    );
    let mut session = Session::new();
    mount_form_screen(&mut session, &form);
    let mut agent = Orchestrator::new(None, "en");
    agent.begin_form(&mut session, form.clone());

    let inputs = ["Ravi Kumar", "98765 43210", "Rampur"];
    let mut visited = Vec::new();
    for input in inputs {
        visited.push(session.next_field().unwrap().name.clone());
        agent.process_input(&mut session, input).await;
    }

    assert_eq!(visited, vec!["fullName", "phone", "village"]);
    assert!(session.next_field().is_none());
    assert!(session.is_complete());
    // Phone was normalized to digits only.
    assert_eq!(
        session.conversation().unwrap().field_value("phone").unwrap().value,
        SlotValue::Text("9876543210".into())
    );
}

#[tokio::test]
async fn progress_is_monotonic_and_capped() {
    let form = add_crop_form();
    let mut session = Session::new();
    mount_form_screen(&mut session, &form);
    let mut agent = Orchestrator::new(None, "en");
    agent.begin_form(&mut session, form);

    let mut last = session.progress();
    for input in ["Onions", "not a number", "40"] {
        agent.process_input(&mut session, input).await;
        let now = session.progress();
        assert!(now >= last, "progress regressed: {} -> {}", last, now);
        assert!(now <= 100.0);
        last = now;
    }
    assert_eq!(last, 100.0);
}

#[tokio::test]
async fn second_conversation_discards_first() {
    let mut session = Session::new();
    let first_form = add_crop_form();
    mount_form_screen(&mut session, &first_form);
    let mut agent = Orchestrator::new(None, "en");
    agent.begin_form(&mut session, first_form);
    agent.process_input(&mut session, "Tomatoes").await;
    assert_eq!(session.progress(), 50.0);

    let second_form = FormDefinition::new(
        "Register",
        vec![FormField::new("fullName", FieldType::Text, true, "Name?")],
    );
    mount_form_screen(&mut session, &second_form);
    agent.begin_form(&mut session, second_form);

    let conv = session.conversation().unwrap();
    assert_eq!(conv.screen_name, "Register");
    assert!(conv.filled_fields().is_empty());
    assert_eq!(session.progress(), 0.0);
}

#[tokio::test]
async fn unregistered_field_still_advances_conversation() {
    let form = add_crop_form();
    let mut session = Session::new();
    mount_form_screen(&mut session, &form);
    // No sinks registered at all.
    let mut agent = Orchestrator::new(None, "en");
    agent.begin_form(&mut session, form);

    let reply = agent.process_input(&mut session, "Tomatoes").await;
    // The UI write failed soft but the walk moved on.
    assert_eq!(session.next_field().unwrap().name, "quantity");
    assert_eq!(reply.progress, Some(50.0));
    // The value is still recorded in conversation state for a later save.
    assert!(session.conversation().unwrap().field_value("cropName").is_some());
}

#[tokio::test]
async fn screen_unmount_invalidates_sinks() {
    let form = add_crop_form();
    let mut session = Session::new();
    mount_form_screen(&mut session, &form);
    let cell = register_sink(&mut session, "AddCrop", "cropName");

    session.registry.unregister_screen("AddCrop");
    let ok = session
        .registry
        .set_field_value("AddCrop", "cropName", &SlotValue::Text("x".into()));
    assert!(!ok);
    assert!(cell.lock().unwrap().is_none());
}
