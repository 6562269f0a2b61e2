//! Property-based invariants for the voice parser and progress accounting.

use agrivoice::form::{FieldType, FormDefinition, FormField, SlotValue};
use agrivoice::session::Session;
use agrivoice::voice::parser::{parse_voice_input, ParseOutcome};
use chrono::NaiveDate;
use proptest::prelude::*;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 24).unwrap()
}

proptest! {
    /// The parser never panics, for any input and any field type.
    #[test]
    fn parser_total_on_arbitrary_input(text in ".{0,200}") {
        let options = vec!["kg".to_string(), "quintal".to_string(), "ton".to_string()];
        for field_type in [
            FieldType::Text,
            FieldType::Textarea,
            FieldType::Email,
            FieldType::Phone,
            FieldType::Number,
            FieldType::Date,
            FieldType::Dropdown,
            FieldType::Image,
        ] {
            let _ = parse_voice_input(&text, field_type, &options, today());
        }
    }

    /// Text parsing always yields the trimmed input.
    #[test]
    fn text_parse_is_trim(text in ".{0,200}") {
        let out = parse_voice_input(&text, FieldType::Text, &[], today());
        prop_assert_eq!(
            out,
            ParseOutcome::Parsed(SlotValue::Text(text.trim().to_string()))
        );
    }

    /// Phone parsing emits digits only, preserving their order.
    #[test]
    fn phone_parse_is_digit_filter(text in ".{0,100}") {
        let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
        let out = parse_voice_input(&text, FieldType::Phone, &[], today());
        match out {
            ParseOutcome::Parsed(SlotValue::Text(got)) => prop_assert_eq!(got, digits),
            ParseOutcome::Unparsed(_) => prop_assert!(digits.is_empty()),
            other => prop_assert!(false, "unexpected outcome {:?}", other),
        }
    }

    /// Dropdown parsing always lands on a declared option (or is tagged
    /// ambiguous with the first option as the guess). It never invents values.
    #[test]
    fn dropdown_result_is_always_a_declared_option(text in ".{0,100}") {
        let options = vec!["kg".to_string(), "quintal".to_string(), "ton".to_string()];
        let out = parse_voice_input(&text, FieldType::Dropdown, &options, today());
        let value = out.value().expect("dropdown with options always yields a value");
        match value {
            SlotValue::Choice(choice) => prop_assert!(options.contains(choice)),
            other => prop_assert!(false, "unexpected value {:?}", other),
        }
    }

    /// Progress is monotonically non-decreasing under any confirmation order
    /// and never exceeds 100.
    #[test]
    fn progress_monotonic_under_any_order(order in proptest::collection::vec(0usize..4, 0..12)) {
        let form = FormDefinition::new(
            "P",
            vec![
                FormField::new("a", FieldType::Text, true, "a?"),
                FormField::new("b", FieldType::Text, true, "b?"),
                FormField::new("c", FieldType::Text, false, "c?"),
                FormField::new("d", FieldType::Text, true, "d?"),
            ],
        );
        let names = ["a", "b", "c", "d"];
        let mut session = Session::new();
        session.start_conversation(form);

        let mut last = session.progress();
        prop_assert_eq!(last, 0.0);
        for idx in order {
            session.set_field_value(names[idx], SlotValue::Text("x".into()), true);
            let now = session.progress();
            prop_assert!(now >= last);
            prop_assert!(now <= 100.0);
            last = now;
        }
    }
}
