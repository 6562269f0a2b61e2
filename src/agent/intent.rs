//! Keyword intent rules.
//!
//! An explicit ordered rule list, not a classifier: role and language
//! selection are checked before generic navigation so "I am a farmer, show
//! prices" selects the role first, matching the original precedence.

use serde::{Deserialize, Serialize};

/// Action descriptor handed to the external router / host app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AgentAction {
    SelectRole { role: String },
    SelectLanguage { language: String },
    Navigate { route: String },
    FormComplete { screen: String },
}

struct Rule {
    keywords: &'static [&'static str],
    action: fn() -> AgentAction,
}

fn role_farmer() -> AgentAction {
    AgentAction::SelectRole { role: "farmer".into() }
}
fn role_buyer() -> AgentAction {
    AgentAction::SelectRole { role: "buyer".into() }
}
fn lang_en() -> AgentAction {
    AgentAction::SelectLanguage { language: "en".into() }
}
fn lang_hi() -> AgentAction {
    AgentAction::SelectLanguage { language: "hi".into() }
}
fn lang_te() -> AgentAction {
    AgentAction::SelectLanguage { language: "te".into() }
}
fn nav_add_crop() -> AgentAction {
    AgentAction::Navigate { route: "AddCrop".into() }
}
fn nav_market() -> AgentAction {
    AgentAction::Navigate { route: "MarketPrices".into() }
}
fn nav_buyers() -> AgentAction {
    AgentAction::Navigate { route: "FindBuyers".into() }
}
fn nav_weather() -> AgentAction {
    AgentAction::Navigate { route: "Weather".into() }
}
fn nav_register() -> AgentAction {
    AgentAction::Navigate { route: "Register".into() }
}

/// Priority order: role, then language, then navigation.
const RULES: &[Rule] = &[
    Rule { keywords: &["i am a farmer", "i'm a farmer", "as a farmer", "kisan hoon", "raithu"], action: role_farmer },
    Rule { keywords: &["i am a buyer", "i'm a buyer", "as a buyer", "kharidar hoon", "vyapari hoon"], action: role_buyer },
    Rule { keywords: &["speak english", "in english", "english me"], action: lang_en },
    Rule { keywords: &["speak hindi", "in hindi", "hindi me", "hindi mein"], action: lang_hi },
    Rule { keywords: &["speak telugu", "in telugu", "telugu lo"], action: lang_te },
    Rule { keywords: &["sell", "add crop", "list my crop", "fasal bechna", "panta ammali"], action: nav_add_crop },
    Rule { keywords: &["price", "rate", "mandi", "bhav", "dharalu"], action: nav_market },
    Rule { keywords: &["buyer", "kharidar", "konugolu"], action: nav_buyers },
    Rule { keywords: &["weather", "mausam", "barish", "varsham"], action: nav_weather },
    Rule { keywords: &["register", "sign up", "signup", "panjikaran"], action: nav_register },
];

/// First rule whose keyword appears in the lowercased input wins.
pub fn detect_action(input: &str) -> Option<AgentAction> {
    let lower = input.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lower.contains(k)))
        .map(|rule| (rule.action)())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_beats_navigation() {
        // Contains both a role phrase and a navigation keyword; role wins.
        let action = detect_action("I am a farmer, show me the mandi price");
        assert_eq!(action, Some(AgentAction::SelectRole { role: "farmer".into() }));
    }

    #[test]
    fn test_language_beats_navigation() {
        let action = detect_action("speak hindi and show prices");
        assert_eq!(action, Some(AgentAction::SelectLanguage { language: "hi".into() }));
    }

    #[test]
    fn test_navigation_keywords() {
        assert_eq!(
            detect_action("I want to sell tomatoes"),
            Some(AgentAction::Navigate { route: "AddCrop".into() })
        );
        assert_eq!(
            detect_action("what's the mandi rate"),
            Some(AgentAction::Navigate { route: "MarketPrices".into() })
        );
        assert_eq!(
            detect_action("show me buyers"),
            Some(AgentAction::Navigate { route: "FindBuyers".into() })
        );
    }

    #[test]
    fn test_no_match_returns_none() {
        assert_eq!(detect_action("tell me a story"), None);
    }
}
