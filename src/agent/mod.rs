//! Dialogue orchestrator.
//!
//! Turns one user utterance into either a form-field update (conversation
//! state + parser + automation bridge composition) or a free-form reply
//! (generative backend with canned fallback), optionally tagged with a
//! navigation or selection action for the host's router.

pub mod intent;
pub mod prompt;
pub mod provider;
pub mod responses;

use std::time::{Duration, Instant};

use crate::form::FormDefinition;
use crate::session::conversation::{Role, Turn};
use crate::session::Session;
use crate::voice::parser::{parse_voice_input, ParseOutcome};
use crate::error::AgentError;

pub use self::intent::AgentAction;
pub use self::provider::{HttpTextGenerator, TextGenerator};

/// Identical input arriving faster than this is treated as a double
/// submission and dropped.
const DEBOUNCE_WINDOW: Duration = Duration::from_millis(400);

/// One reply from the orchestrator.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentReply {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<AgentAction>,
    pub requires_input: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f32>,
}

impl AgentReply {
    fn prompt(text: String) -> Self {
        AgentReply {
            text,
            action: None,
            requires_input: true,
            progress: None,
        }
    }
}

/// Per-chat-session dialogue context.
#[derive(Debug, Clone, Default)]
pub struct ConversationContext {
    pub user_id: Option<String>,
    pub user_role: Option<String>,
    pub language: String,
}

/// Drives one chat session over a [`Session`].
pub struct Orchestrator {
    generator: Option<Box<dyn TextGenerator>>,
    context: ConversationContext,
    history: Vec<Turn>,
    last_input: Option<(String, Instant)>,
}

impl Orchestrator {
    /// `generator = None` runs canned-only, e.g. offline or in tests.
    pub fn new(generator: Option<Box<dyn TextGenerator>>, language: &str) -> Self {
        Orchestrator {
            generator,
            context: ConversationContext {
                user_id: None,
                user_role: None,
                language: language.to_string(),
            },
            history: Vec::new(),
            last_input: None,
        }
    }

    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    pub fn set_user(&mut self, user_id: &str, role: Option<&str>) {
        self.context.user_id = Some(user_id.to_string());
        self.context.user_role = role.map(String::from);
    }

    /// Start a form conversation and return the first field's prompt.
    pub fn begin_form(&mut self, session: &mut Session, form: FormDefinition) -> AgentReply {
        session.start_conversation(form);
        let reply = match session.next_field() {
            Some(field) => AgentReply::prompt(field.voice_prompt.clone()),
            // Degenerate empty form: nothing to ask.
            None => self.complete_reply(session),
        };
        // The transcript must open with the question the first answer replies to.
        self.push_turn(session, Role::Assistant, &reply.text);
        reply
    }

    /// Process one user utterance and produce the next reply.
    pub async fn process_input(&mut self, session: &mut Session, input: &str) -> AgentReply {
        let input = input.trim();

        // Double-submission guard: rapid repeats would race the cursor advance.
        let now = Instant::now();
        if let Some((ref last, at)) = self.last_input {
            if last.as_str() == input && now.duration_since(at) < DEBOUNCE_WINDOW {
                tracing::debug!(input, "Dropping duplicate submission");
                return AgentReply {
                    text: String::new(),
                    action: None,
                    requires_input: false,
                    progress: None,
                };
            }
        }
        self.last_input = Some((input.to_string(), now));

        self.push_turn(session, Role::User, input);

        let reply = if session.conversation().is_some() && session.screen.has_form() {
            self.handle_form_input(session, input)
        } else {
            self.handle_free_input(session, input).await
        };

        self.push_turn(session, Role::Assistant, &reply.text);
        reply
    }

    // -----------------------------------------------------------------------
    // Form path
    // -----------------------------------------------------------------------

    fn handle_form_input(&mut self, session: &mut Session, input: &str) -> AgentReply {
        let Some(field) = session.next_field().cloned() else {
            return self.complete_reply(session);
        };

        let outcome = parse_voice_input(input, field.field_type, &field.options, session.today());
        let lang = self.context.language.clone();

        let (value, guess_note) = match outcome {
            ParseOutcome::Parsed(v) => (v, None),
            ParseOutcome::Ambiguous { best, .. } => {
                let note = guessed_note(&lang, &best.display());
                (best, Some(note))
            }
            ParseOutcome::Unparsed(_) => {
                // Re-prompt the same field; the cursor has not moved.
                return AgentReply {
                    text: format!("{} {}", didnt_catch(&lang), field.voice_prompt),
                    action: None,
                    requires_input: true,
                    progress: Some(session.progress()),
                };
            }
        };

        // Original behavior: parsed values are recorded confirmed right away.
        session.set_field_value(&field.name, value.clone(), true);

        let screen = session
            .conversation()
            .map(|c| c.screen_name.clone())
            .unwrap_or_default();
        // A miss still advances the conversation; the value stays recorded
        // in state for a later save even when the UI write failed.
        let pushed = session.registry.set_field_value(&screen, &field.name, &value);
        if !pushed {
            tracing::warn!(screen = %screen, field = %field.name, "Parsed value not delivered to UI");
        }

        if session.is_complete() {
            let mut reply = self.complete_reply(session);
            if let Some(note) = guess_note {
                reply.text = format!("{} {}", note, reply.text);
            }
            return reply;
        }

        let next_prompt = session
            .next_field()
            .map(|f| f.voice_prompt.clone())
            .unwrap_or_else(|| ready_to_save(&lang).to_string());

        let mut text = format!("{} {}", recorded_ack(&lang, &field.label(), &value.display()), next_prompt);
        if let Some(note) = guess_note {
            text = format!("{} {}", note, text);
        }

        AgentReply {
            text,
            action: None,
            requires_input: true,
            progress: Some(session.progress()),
        }
    }

    fn complete_reply(&self, session: &Session) -> AgentReply {
        let screen = session
            .conversation()
            .map(|c| c.screen_name.clone())
            .unwrap_or_default();
        AgentReply {
            text: ready_to_save(&self.context.language).to_string(),
            action: Some(AgentAction::FormComplete { screen }),
            requires_input: false,
            progress: Some(100.0),
        }
    }

    // -----------------------------------------------------------------------
    // Free-form path
    // -----------------------------------------------------------------------

    async fn handle_free_input(&mut self, _session: &mut Session, input: &str) -> AgentReply {
        let action = intent::detect_action(input);

        // Selections update the dialogue context immediately.
        match action {
            Some(AgentAction::SelectRole { ref role }) => {
                self.context.user_role = Some(role.clone());
                return AgentReply {
                    text: role_confirmation(&self.context.language, role),
                    action,
                    requires_input: false,
                    progress: None,
                };
            }
            Some(AgentAction::SelectLanguage { ref language }) => {
                self.context.language = language.clone();
                return AgentReply {
                    text: responses::canned_response(language, responses::FallbackIntent::Greeting)
                        .to_string(),
                    action,
                    requires_input: false,
                    progress: None,
                };
            }
            _ => {}
        }

        let lang = self.context.language.clone();

        // Navigation intents answer from the canned table; the host router
        // interprets the attached action.
        if let Some(AgentAction::Navigate { .. }) = action {
            let intent = responses::classify(input);
            return AgentReply {
                text: responses::canned_response(&lang, intent).to_string(),
                action,
                requires_input: false,
                progress: None,
            };
        }

        let text = match self.generate(input).await {
            Ok(text) => text,
            Err(AgentError::Quota) => {
                tracing::warn!("Generative backend quota exceeded");
                responses::canned_response(&lang, responses::FallbackIntent::ServiceBusy).to_string()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Generative backend failed, using canned reply");
                responses::canned_response(&lang, responses::classify(input)).to_string()
            }
        };

        AgentReply {
            text,
            action: None,
            requires_input: false,
            progress: None,
        }
    }

    async fn generate(&self, input: &str) -> Result<String, AgentError> {
        let Some(ref generator) = self.generator else {
            return Err(AgentError::Provider("no generative backend configured".into()));
        };
        let prompt = prompt::assemble_prompt(
            self.context.user_role.as_deref(),
            &self.context.language,
            &self.history,
            input,
        );
        generator.complete(&prompt).await
    }

    fn push_turn(&mut self, session: &mut Session, role: Role, message: &str) {
        self.history.push(Turn {
            role,
            message: message.to_string(),
            timestamp: chrono::Utc::now(),
        });
        session.push_turn(role, message);
    }
}

// ---------------------------------------------------------------------------
// Form-path phrasing
// ---------------------------------------------------------------------------

fn recorded_ack(language: &str, field: &str, value: &str) -> String {
    match language {
        "hi" => format!("Theek hai, {} ke liye {} likh liya.", field, value),
        "te" => format!("Sare, {} kosam {} rasukunnanu.", field, value),
        _ => format!("Got it, {} for {}.", value, field),
    }
}

fn guessed_note(language: &str, guess: &str) -> String {
    match language {
        "hi" => format!("Main samjhi \"{}\". Galat ho to bata dijiye.", guess),
        "te" => format!("Nenu \"{}\" ani anukunnanu. Tappu aite cheppandi.", guess),
        _ => format!("I put down \"{}\". Say it again if that's wrong.", guess),
    }
}

fn didnt_catch(language: &str) -> &'static str {
    match language {
        "hi" => "Maaf kijiye, samajh nahi aaya.",
        "te" => "Kshaminchandi, ardham kaledu.",
        _ => "Sorry, I didn't catch that.",
    }
}

fn ready_to_save(language: &str) -> &'static str {
    match language {
        "hi" => "Sab jaankari mil gayi. Save karne ke liye taiyar hain!",
        "te" => "Anni vivaralu vachchayi. Save cheyadaniki siddham!",
        _ => "That's everything I need. Ready to save!",
    }
}

fn role_confirmation(language: &str, role: &str) -> String {
    match language {
        "hi" => format!("Theek hai, aap {} hain. Aage badhte hain.", role),
        "te" => format!("Sare, meeru {}. Mundhuku veldam.", role),
        _ => format!("Okay, you're set up as a {}. Let's continue.", role),
    }
}
