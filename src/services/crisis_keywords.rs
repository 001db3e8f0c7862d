//! Crisis-keyword detection for chat input.
//!
//! Fixed-list, case-insensitive substring matching. Deliberately blunt:
//! false positives surface crisis resources to someone who did not need
//! them, false negatives do not.

const CRISIS_KEYWORDS: &[&str] = &[
    "suicide",
    "suicidal",
    "kill myself",
    "end my life",
    "want to die",
    "self harm",
    "self-harm",
    "hurt myself",
    "no reason to live",
    "better off dead",
    "overdose",
];

pub const CRISIS_DISCLAIMER: &str = "It sounds like you might be going through something really \
difficult right now. I'm not able to provide crisis support, but you are not alone — please \
reach out to one of the crisis resources below, or call your local emergency number if you are \
in immediate danger.";

pub const SUPPORT_DISCLAIMER: &str = "I'm a supportive companion, not a therapist or medical \
professional. For clinical advice, please talk to a qualified provider.";

pub fn detect_crisis(message: &str) -> bool {
    let lowered = message.to_lowercase();
    CRISIS_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_keywords_case_insensitively() {
        assert!(detect_crisis("I want to KILL MYSELF"));
        assert!(detect_crisis("been thinking about suicide a lot"));
        assert!(detect_crisis("I keep wanting to hurt myself"));
    }

    #[test]
    fn detects_keyword_inside_longer_sentence() {
        assert!(detect_crisis(
            "honestly some days it feels like there's no reason to live anymore"
        ));
    }

    #[test]
    fn ordinary_messages_pass_through() {
        assert!(!detect_crisis("I had a rough day at work"));
        assert!(!detect_crisis("my mood has been low this week"));
        assert!(!detect_crisis(""));
    }
}
