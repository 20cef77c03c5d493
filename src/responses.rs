//! Canned tutor responses and keyword matching
//!
//! The tutor's "brain": a fixed, ordered table of response records, each
//! guarded by an explicit match rule. Matching is first-hit-wins over
//! lowercase substrings, deliberately a flat keyword lookup rather than a
//! classifier.

use std::fmt;

/// Opening line the tutor sends when a session starts.
pub const GREETING: &str = "I'm here to help you improve your speaking skills. \
Tell me about your language learning goals or ask me a question!";

/// Feedback shown when a message needed no correction.
pub const ENCOURAGEMENT: &str =
    "Great job! Your sentence was grammatically correct. Keep practicing!";

/// How a response template decides whether it applies to a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// Applies when ANY of the keywords occurs in the message.
    AnyOf(&'static [&'static str]),
    /// Applies only when EVERY keyword occurs in the message.
    AllOf(&'static [&'static str]),
    /// Always applies; reserved for the final fallback record.
    Always,
}

impl MatchRule {
    /// Test the rule against an already-lowercased message.
    fn applies_to(&self, lowercase: &str) -> bool {
        match self {
            MatchRule::AnyOf(keywords) => keywords.iter().any(|k| lowercase.contains(k)),
            MatchRule::AllOf(keywords) => keywords.iter().all(|k| lowercase.contains(k)),
            MatchRule::Always => true,
        }
    }
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchRule::AnyOf(keywords) => write!(f, "any of: {}", keywords.join(", ")),
            MatchRule::AllOf(keywords) => write!(f, "all of: {}", keywords.join(" + ")),
            MatchRule::Always => write!(f, "always"),
        }
    }
}

/// One canned response with optional correction metadata.
#[derive(Debug, Clone, Copy)]
pub struct ResponseTemplate {
    /// Rule deciding when this record is selected.
    pub rule: MatchRule,
    /// Text shown in the chat and spoken aloud.
    pub reply: &'static str,
    /// Why the input was judged imperfect; `None` means no correction.
    pub explanation: Option<&'static str>,
    /// The improved sentence (meaningful only with an explanation).
    pub corrected: Option<&'static str>,
    /// Extra language tip, attached to correction feedback occasionally.
    pub tip: Option<&'static str>,
}

impl ResponseTemplate {
    /// Whether this record carries a grammar correction.
    pub fn has_correction(&self) -> bool {
        self.explanation.is_some()
    }
}

/// The record returned when nothing else matched. Kept as a separate const
/// so the matcher stays total even over a custom table with no `Always`
/// record at the end.
pub const FALLBACK: ResponseTemplate = ResponseTemplate {
    rule: MatchRule::Always,
    reply: "Well done! Your sentence is grammatically correct. Let's continue our conversation.",
    explanation: None,
    corrected: None,
    // Table fidelity: the record keeps its tip, but tips only ever ride on
    // correction feedback, so this one is never shown.
    tip: Some("Vary your sentence structures to sound more natural in conversation."),
};

/// The built-in response table, in priority order. Ordering is load-bearing:
/// the first satisfied rule wins, and the fallback must stay last.
pub static RESPONSES: [ResponseTemplate; 5] = [
    ResponseTemplate {
        rule: MatchRule::AnyOf(&["paris", "france"]),
        reply: "That's a great start! I would suggest: 'I have been to Paris' \
                instead of 'I was in Paris'.",
        explanation: Some(
            "We use present perfect (have been) for experiences when we don't \
             specify exactly when they happened.",
        ),
        corrected: Some("I have been to Paris."),
        tip: Some("Use present perfect tense for life experiences when the time is not specified."),
    },
    ResponseTemplate {
        rule: MatchRule::AnyOf(&["study", "learning"]),
        reply: "Nice try! The correct phrase is: 'How long have you been studying English?'",
        explanation: Some(
            "We use present perfect continuous for actions that started in the \
             past and continue to the present.",
        ),
        corrected: Some("How long have you been studying English?"),
        tip: Some(
            "Present perfect continuous is ideal for actions that started in the \
             past and continue now.",
        ),
    },
    ResponseTemplate {
        rule: MatchRule::AnyOf(&["repeat", "say again"]),
        reply: "Good effort! A more natural way is: 'Could you please repeat that?'",
        explanation: Some(
            "'Could' is more polite than 'can' in requests, and 'repeat' is more \
             natural than 'say again'.",
        ),
        corrected: Some("Could you please repeat that?"),
        tip: Some("Use 'could' instead of 'can' to make requests sound more polite."),
    },
    ResponseTemplate {
        rule: MatchRule::AllOf(&["if i", "would"]),
        reply: "Interesting! The correct structure is: 'If I had more time, I would travel more'.",
        explanation: Some(
            "This is a second conditional sentence for hypothetical situations. \
             We use 'if + past simple, would + base verb'.",
        ),
        corrected: Some("If I had more time, I would travel more."),
        tip: Some("Second conditional sentences express unreal or unlikely present/future situations."),
    },
    FALLBACK,
];

/// First-match lookup over an ordered template table.
///
/// Pure: no state beyond the table reference, no side effects. The lookup is
/// total: when no rule fires (possible only with a custom table missing an
/// `Always` record) the shared [`FALLBACK`] is returned.
#[derive(Debug, Clone, Copy)]
pub struct ResponseMatcher {
    templates: &'static [ResponseTemplate],
}

impl ResponseMatcher {
    /// Matcher over the built-in table.
    pub fn new() -> Self {
        Self {
            templates: &RESPONSES,
        }
    }

    /// Matcher over a custom table (rule experiments, tests).
    pub fn with_table(templates: &'static [ResponseTemplate]) -> Self {
        Self { templates }
    }

    /// Select the first template whose rule matches the message.
    ///
    /// Case-insensitive: the input is lowercased for matching only; callers
    /// keep the original text for display.
    pub fn match_message(&self, text: &str) -> &'static ResponseTemplate {
        let lowercase = text.to_lowercase();
        self.templates
            .iter()
            .find(|t| t.rule.applies_to(&lowercase))
            .unwrap_or(&FALLBACK)
    }

    /// The table this matcher evaluates, in priority order.
    pub fn table(&self) -> &'static [ResponseTemplate] {
        self.templates
    }
}

impl Default for ResponseMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched_index(text: &str) -> usize {
        let matcher = ResponseMatcher::new();
        let hit = matcher.match_message(text);
        RESPONSES
            .iter()
            .position(|t| std::ptr::eq(t, hit))
            .expect("matched template should come from the built-in table")
    }

    #[test]
    fn test_paris_matches_any_case() {
        assert_eq!(matched_index("I was in paris last year"), 0);
        assert_eq!(matched_index("I was in Paris last year"), 0);
        assert_eq!(matched_index("PARIS IS LOVELY"), 0);
    }

    #[test]
    fn test_france_matches_first_record() {
        assert_eq!(matched_index("we drove through France"), 0);
    }

    #[test]
    fn test_study_or_learning() {
        assert_eq!(matched_index("I study every night"), 1);
        assert_eq!(matched_index("learning is hard"), 1);
    }

    #[test]
    fn test_repeat_or_say_again() {
        assert_eq!(matched_index("can you repeat that"), 2);
        assert_eq!(matched_index("please say again"), 2);
    }

    #[test]
    fn test_conditional_requires_both_keywords() {
        // Only one of the pair present: falls through to the fallback.
        assert_eq!(matched_index("if i had more money"), 4);
        assert_eq!(matched_index("i would like some tea"), 4);
        // Both present: the conditional record wins.
        assert_eq!(matched_index("if i had time i would travel"), 3);
    }

    #[test]
    fn test_conditional_keywords_in_any_order() {
        assert_eq!(matched_index("would you come if i asked"), 3);
        assert_eq!(matched_index("IF I could, I WOULD"), 3);
    }

    #[test]
    fn test_fallback_for_unmatched_text() {
        assert_eq!(matched_index("Hello there"), 4);
        assert_eq!(matched_index(""), 4);
        let fallback = ResponseMatcher::new().match_message("Hello there");
        assert!(!fallback.has_correction());
    }

    #[test]
    fn test_priority_order_first_rule_wins() {
        // Satisfies rules 1, 2, and 4 at once; rule 1 must win.
        assert_eq!(matched_index("If I moved to Paris I would study French"), 0);
    }

    #[test]
    fn test_last_record_is_always_rule() {
        let last = RESPONSES.last().expect("table is not empty");
        assert_eq!(last.rule, MatchRule::Always);
        assert!(!last.has_correction());
    }

    #[test]
    fn test_fallback_tip_exists_but_is_never_a_correction() {
        assert!(FALLBACK.tip.is_some());
        assert!(FALLBACK.explanation.is_none());
        assert!(FALLBACK.corrected.is_none());
    }

    #[test]
    fn test_corrected_paris_sentence_matches_original_table() {
        assert_eq!(RESPONSES[0].corrected, Some("I have been to Paris."));
    }

    #[test]
    fn test_custom_table_without_always_stays_total() {
        static TINY: [ResponseTemplate; 1] = [ResponseTemplate {
            rule: MatchRule::AnyOf(&["bonjour"]),
            reply: "Bonjour to you too!",
            explanation: None,
            corrected: None,
            tip: None,
        }];
        let matcher = ResponseMatcher::with_table(&TINY);
        let hit = matcher.match_message("good morning");
        assert_eq!(hit.reply, FALLBACK.reply, "unmatched text falls back");
        assert_eq!(matcher.match_message("bonjour!").reply, TINY[0].reply);
    }

    #[test]
    fn test_match_rule_display() {
        assert_eq!(
            MatchRule::AnyOf(&["paris", "france"]).to_string(),
            "any of: paris, france"
        );
        assert_eq!(
            MatchRule::AllOf(&["if i", "would"]).to_string(),
            "all of: if i + would"
        );
        assert_eq!(MatchRule::Always.to_string(), "always");
    }
}
