//! Intake field definitions — the static ordered list of profile fields the
//! intake phase walks through, fixed at startup and never mutated.

/// One profile field the candidate is asked about: a stable key the answer is
/// stored under, and the prompt text shown for it.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub key: &'static str,
    pub prompt: &'static str,
}

/// The ordered intake fields. Tech Stack MUST stay last: intake completion
/// hands its answer (plus experience) straight to question synthesis.
pub const INTAKE_FIELDS: &[FieldDef] = &[
    FieldDef {
        key: "Full Name",
        prompt: "To get started, what is your full name?",
    },
    FieldDef {
        key: "Email Address",
        prompt: "What email address can we reach you at?",
    },
    FieldDef {
        key: "Phone Number",
        prompt: "And a phone number, in case we need to follow up?",
    },
    FieldDef {
        key: "Years of Experience",
        prompt: "How many years of professional experience do you have?",
    },
    FieldDef {
        key: "Desired Position",
        prompt: "Which position are you applying for?",
    },
    FieldDef {
        key: "Current Location",
        prompt: "Where are you currently located?",
    },
    FieldDef {
        key: "Tech Stack",
        prompt: "Finally, list your tech stack — languages, frameworks, and tools, comma-separated.",
    },
];

/// Key of the field whose answer becomes the synthesis tech stack.
pub const TECH_STACK_KEY: &str = "Tech Stack";
/// Key of the field whose answer becomes the synthesis experience context.
pub const EXPERIENCE_KEY: &str = "Years of Experience";

/// Canned contextual acknowledgment for the field just answered.
/// Cosmetic text selection only — returns None for fields with no special copy.
pub fn acknowledgment(key: &str, answer: &str) -> Option<String> {
    match key {
        "Full Name" => Some(format!("Nice to meet you, {}!", answer.trim())),
        "Desired Position" => Some(format!(
            "Great — we'll screen you for the {} role.",
            answer.trim()
        )),
        "Tech Stack" => Some(
            "Thanks! Give me a moment to prepare a few technical questions for you.".to_string(),
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seven_fields_in_fixed_order() {
        assert_eq!(INTAKE_FIELDS.len(), 7);
        assert_eq!(INTAKE_FIELDS[0].key, "Full Name");
        assert_eq!(INTAKE_FIELDS.last().unwrap().key, TECH_STACK_KEY);
    }

    #[test]
    fn test_field_keys_are_unique() {
        let keys: HashSet<&str> = INTAKE_FIELDS.iter().map(|f| f.key).collect();
        assert_eq!(keys.len(), INTAKE_FIELDS.len());
    }

    #[test]
    fn test_experience_field_exists() {
        assert!(INTAKE_FIELDS.iter().any(|f| f.key == EXPERIENCE_KEY));
    }

    #[test]
    fn test_name_acknowledgment_references_answer() {
        let ack = acknowledgment("Full Name", "Jane Doe").unwrap();
        assert!(ack.contains("Jane Doe"));
    }

    #[test]
    fn test_email_has_no_special_acknowledgment() {
        assert!(acknowledgment("Email Address", "jane@example.com").is_none());
    }
}
