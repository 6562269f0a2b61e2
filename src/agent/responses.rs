//! Canned fallback responses.
//!
//! Guarantees the user always gets a reply even in total backend failure.
//! Data-driven: intent classification by keyword, then a language → intent →
//! template lookup, so parity is testable per language/intent pair.

/// Intents the fallback table can answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackIntent {
    Greeting,
    Registration,
    AddCrop,
    MarketPrice,
    FindBuyers,
    Weather,
    ServiceBusy,
    Default,
}

/// Keyword triggers per intent, evaluated in declaration order against the
/// lowercased input. Includes common Hindi and Telugu spoken forms alongside
/// English.
const INTENT_KEYWORDS: &[(FallbackIntent, &[&str])] = &[
    (
        FallbackIntent::Greeting,
        &["hello", "hi ", "hey", "namaste", "namaskar", "namaskaram", "vanakkam"],
    ),
    (
        FallbackIntent::Registration,
        &["register", "sign up", "signup", "account", "panjikaran", "khata"],
    ),
    (
        FallbackIntent::AddCrop,
        &["sell", "add crop", "list crop", "fasal", "bechna", "panta", "ammadam"],
    ),
    (
        FallbackIntent::MarketPrice,
        &["price", "rate", "mandi", "bhav", "market", "dhara", "dar"],
    ),
    (
        FallbackIntent::FindBuyers,
        &["buyer", "kharidar", "customer", "konugolu", "vyapari"],
    ),
    (
        FallbackIntent::Weather,
        &["weather", "rain", "mausam", "barish", "vatavaranam", "varsham"],
    ),
];

/// Classify input into a fallback intent. `Default` when nothing triggers.
pub fn classify(input: &str) -> FallbackIntent {
    let lower = format!("{} ", input.to_lowercase());
    for (intent, keywords) in INTENT_KEYWORDS {
        if keywords.iter().any(|k| lower.contains(k)) {
            return *intent;
        }
    }
    FallbackIntent::Default
}

/// Look up the canned reply for a language/intent pair.
///
/// Unknown language tags fall back to English so the reply contract
/// ("the user always receives a response") holds for any tag.
pub fn canned_response(language: &str, intent: FallbackIntent) -> &'static str {
    use FallbackIntent::*;
    match language {
        "hi" => match intent {
            Greeting => "Namaste! Main aapki kheti aur bikri mein madad kar sakti hoon. Kya karna chahenge?",
            Registration => "Register karne ke liye apna naam, phone number aur gaon batayein. Main form bharne mein madad karungi.",
            AddCrop => "Fasal bechne ke liye 'Add Crop' screen kholiye. Main bol kar form bharne mein madad karungi.",
            MarketPrice => "Mandi bhav dekhne ke liye Market Prices screen kholiye. Wahan aaj ke daam milenge.",
            FindBuyers => "Kharidar dhoondhne ke liye Find Buyers screen kholiye. Aapke ilaake ke buyer wahan dikhenge.",
            Weather => "Mausam ki jaankari Weather screen par milegi.",
            ServiceBusy => "Seva abhi vyast hai. Kripya thodi der baad phir koshish karein.",
            Default => "Maaf kijiye, main samajh nahi paayi. Aap fasal bechna, bhav dekhna ya kharidar dhoondhna bol sakte hain.",
        },
        "te" => match intent {
            Greeting => "Namaskaram! Mee vyavasayam mariyu ammakalalo sahayam cheyagalanu. Emi cheyalanukuntunnaru?",
            Registration => "Register avvadaniki mee peru, phone number mariyu gramam cheppandi. Form nimpadam lo sahayam chestanu.",
            AddCrop => "Panta ammadaniki 'Add Crop' screen teravandi. Matladi form nimpadam lo sahayam chestanu.",
            MarketPrice => "Market dharalu chudadaniki Market Prices screen teravandi.",
            FindBuyers => "Konugoludarulanu vetakadaniki Find Buyers screen teravandi.",
            Weather => "Vatavarana samacharam Weather screen lo dorukutundi.",
            ServiceBusy => "Seva ippudu busy ga undi. Konchem sepati tarvata malli prayatninchandi.",
            Default => "Kshaminchandi, naku ardham kaledu. Panta ammadam, dharalu chudadam leda konugoludarulanu vetakadam adagavachchu.",
        },
        _ => match intent {
            Greeting => "Hello! I can help you sell crops, check market prices, and find buyers. What would you like to do?",
            Registration => "To register, tell me your name, phone number, and village. I can fill the form as you speak.",
            AddCrop => "To sell a crop, open the Add Crop screen. I can fill the form for you as you speak.",
            MarketPrice => "Open the Market Prices screen to see today's mandi rates.",
            FindBuyers => "Open the Find Buyers screen to see buyers near you.",
            Weather => "You can check the forecast on the Weather screen.",
            ServiceBusy => "The assistant service is busy right now. Please try again in a little while.",
            Default => "Sorry, I didn't catch that. You can ask me to sell a crop, check prices, or find buyers.",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_keywords() {
        assert_eq!(classify("hello there"), FallbackIntent::Greeting);
        assert_eq!(classify("what is the mandi rate"), FallbackIntent::MarketPrice);
        assert_eq!(classify("I want to sell onions"), FallbackIntent::AddCrop);
        assert_eq!(classify("find me a buyer"), FallbackIntent::FindBuyers);
        assert_eq!(classify("will it rain"), FallbackIntent::Weather);
        assert_eq!(classify("xyzzy"), FallbackIntent::Default);
    }

    #[test]
    fn test_classify_hindi_keywords() {
        assert_eq!(classify("namaste"), FallbackIntent::Greeting);
        assert_eq!(classify("aaj ka bhav batao"), FallbackIntent::MarketPrice);
        assert_eq!(classify("mausam kaisa hai"), FallbackIntent::Weather);
    }

    #[test]
    fn test_every_language_intent_pair_has_a_reply() {
        use FallbackIntent::*;
        let intents = [
            Greeting, Registration, AddCrop, MarketPrice, FindBuyers, Weather, ServiceBusy, Default,
        ];
        for lang in ["en", "hi", "te", "unknown-tag"] {
            for intent in intents {
                assert!(
                    !canned_response(lang, intent).is_empty(),
                    "missing reply for {}/{:?}",
                    lang,
                    intent
                );
            }
        }
    }
}
