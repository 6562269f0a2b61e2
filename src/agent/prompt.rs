//! Free-form prompt assembly.
//!
//! Builds the system prompt plus rolling transcript sent to the generative
//! backend when no form conversation is driving the turn.

use crate::session::conversation::{Role, Turn};

/// How many trailing history turns ride along with each completion request.
const HISTORY_WINDOW: usize = 10;

/// Assemble the full prompt from role, language, and recent history.
pub fn assemble_prompt(
    user_role: Option<&str>,
    language: &str,
    history: &[Turn],
    user_input: &str,
) -> String {
    let mut prompt = String::new();

    prompt.push_str("# AgriVoice Assistant\n\n");
    prompt.push_str(
        "You are a voice assistant inside a produce-marketplace app that \
         connects farmers and buyers. Answer briefly in plain spoken language \
         suitable for text-to-speech. Never invent market prices.\n\n",
    );

    match user_role {
        Some("farmer") => prompt.push_str(
            "The user is a farmer. They list crops for sale, check market \
             prices, and look for buyers.\n",
        ),
        Some("buyer") => prompt.push_str(
            "The user is a buyer. They browse produce listings and contact \
             farmers.\n",
        ),
        Some(other) => {
            prompt.push_str(&format!("The user's role is: {}.\n", other));
        }
        None => prompt.push_str("The user has not chosen a role yet.\n"),
    }

    prompt.push_str(&format!(
        "Respond in the language with tag \"{}\".\n\n",
        language
    ));

    if !history.is_empty() {
        prompt.push_str("## Conversation so far\n");
        let start = history.len().saturating_sub(HISTORY_WINDOW);
        for turn in &history[start..] {
            let speaker = match turn.role {
                Role::User => "User",
                Role::Assistant => "Assistant",
            };
            prompt.push_str(&format!("{}: {}\n", speaker, turn.message));
        }
        prompt.push('\n');
    }

    prompt.push_str("## User\n");
    prompt.push_str(user_input);
    prompt.push_str("\n\nAssistant:");

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_turn(role: Role, message: &str) -> Turn {
        Turn {
            role,
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_prompt_carries_role_and_language() {
        let prompt = assemble_prompt(Some("farmer"), "hi", &[], "namaste");
        assert!(prompt.contains("The user is a farmer."));
        assert!(prompt.contains("\"hi\""));
        assert!(prompt.ends_with("Assistant:"));
    }

    #[test]
    fn test_history_window_truncates() {
        let history: Vec<Turn> = (0..20)
            .map(|i| make_turn(Role::User, &format!("turn {}", i)))
            .collect();
        let prompt = assemble_prompt(None, "en", &history, "latest");
        assert!(!prompt.contains("turn 9"));
        assert!(prompt.contains("turn 10"));
        assert!(prompt.contains("turn 19"));
    }
}
