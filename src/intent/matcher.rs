//! Ordered pattern table that turns a normalized transcript into an [`Intent`].
//!
//! The table is declarative: each `RuleSpec` names an intent kind and one
//! or more regular expressions tried in order.  Rules are evaluated top to
//! bottom and the first rule that yields an intent wins, so the order of
//! `RULES` is the precedence:
//!
//! 1. wake, 2. shutdown (work in every state),
//! 3. help, 4. clear text (must beat the free-text rules below),
//! 5. show text, 6. show photo, then fallback.
//!
//! Wake and shutdown patterns embed the assistant name through the `{name}`
//! placeholder, which is why building a matcher can fail.  A comma after the
//! name is tolerated since some recognizers punctuate.

use regex::{Captures, Regex};
use thiserror::Error;

use super::Intent;
use crate::transcript::normalize;

/// Photo queries are cut to this many characters.
pub const MAX_QUERY_CHARS: usize = 80;

/// Words the photo patterns may leave behind when the subject is missing
/// ("laat mij een foto zien", "toon foto van").
const PHOTO_FILLER_WORDS: &[&str] = &["zien", "van", "over"];

// ---------------------------------------------------------------------------
// MatcherError
// ---------------------------------------------------------------------------

/// Errors raised while compiling the rule table.
#[derive(Debug, Error)]
pub enum MatcherError {
    /// The assistant name normalizes to an empty string.
    #[error("assistant name must contain at least one word")]
    EmptyName,

    /// A rule pattern did not compile.
    #[error("invalid intent pattern: {0}")]
    Pattern(#[from] regex::Error),
}

// ---------------------------------------------------------------------------
// Static rule definitions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleKind {
    Wake,
    Shutdown,
    Help,
    ClearText,
    ShowText,
    ShowPhoto,
}

struct RuleSpec {
    kind: RuleKind,
    patterns: &'static [&'static str],
}

static RULES: &[RuleSpec] = &[
    RuleSpec {
        kind: RuleKind::Wake,
        patterns: &[r"\b{name}[\s,]*(?:wake\s*up|start|word\s*wakker)\b"],
    },
    RuleSpec {
        kind: RuleKind::Shutdown,
        patterns: &[r"\b{name}[\s,]*(?:shut\s*down|stop|slaapstand|slaap|ga\s+slapen)\b"],
    },
    RuleSpec {
        kind: RuleKind::Help,
        patterns: &[r"\b(?:help|wat\s+kan\s+je|wat\s+kun\s+je)\b"],
    },
    RuleSpec {
        kind: RuleKind::ClearText,
        patterns: &[r"\b(?:verberg|wis|clear)\s+tekst"],
    },
    RuleSpec {
        kind: RuleKind::ShowText,
        patterns: &[
            r"^\s*(?:toon\s+tekst|schrijf\s+tekst|laat\s+tekst\s+zien|zeg|spreek)\s+(.+)",
        ],
    },
    RuleSpec {
        kind: RuleKind::ShowPhoto,
        patterns: &[
            // "toon (mij) (een) foto('s) (zien) (van|over) <subject>"
            r"\b(?:toon|laat|geef)\b.*?\b(?:foto|afbeelding)(?:'s|s|en)?\b(?:\s+zien)?\s+(?:(?:van|over)\s+)?(.+)",
            // "foto van <subject>"
            r"\b(?:foto|afbeelding)\s+van\s+(.+)",
            // "toon (mij) (een) foto <subject>"
            r"\b(?:toon|laat)\s+(?:mij\s+)?(?:een\s+)?(?:foto|afbeelding)\s+(.+)",
        ],
    },
];

struct Rule {
    kind: RuleKind,
    patterns: Vec<Regex>,
}

// ---------------------------------------------------------------------------
// IntentMatcher
// ---------------------------------------------------------------------------

/// Compiled intent rule table.
///
/// Build once per interpreter with [`IntentMatcher::new`]; [`classify`]
/// itself never fails.
///
/// [`classify`]: IntentMatcher::classify
pub struct IntentMatcher {
    rules: Vec<Rule>,
}

impl std::fmt::Debug for IntentMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentMatcher")
            .field("rules", &self.rules.len())
            .finish()
    }
}

impl IntentMatcher {
    /// Compile the rule table for an assistant called `assistant_name`.
    ///
    /// The name goes through [`normalize`] so it matches normalized
    /// transcripts; multi-word names accept any run of whitespace between
    /// the words.
    pub fn new(assistant_name: &str) -> Result<Self, MatcherError> {
        let name = normalize(assistant_name);
        let words: Vec<String> = name.split_whitespace().map(regex::escape).collect();
        if words.is_empty() {
            return Err(MatcherError::EmptyName);
        }
        let name_pattern = format!("(?:{})", words.join(r"\s+"));

        let rules = RULES
            .iter()
            .map(|spec| {
                let patterns = spec
                    .patterns
                    .iter()
                    .map(|p| Regex::new(&p.replace("{name}", &name_pattern)))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Rule {
                    kind: spec.kind,
                    patterns,
                })
            })
            .collect::<Result<Vec<_>, MatcherError>>()?;

        Ok(Self { rules })
    }

    /// Classify a normalized transcript.
    ///
    /// Total: returns [`Intent::Fallback`] when no rule applies.  A rule whose
    /// pattern matches but leaves an empty payload or query does not count as
    /// a match, and evaluation moves on.
    pub fn classify(&self, normalized: &str) -> Intent {
        for rule in &self.rules {
            for pattern in &rule.patterns {
                if let Some(caps) = pattern.captures(normalized) {
                    if let Some(intent) = build_intent(rule.kind, &caps) {
                        log::debug!("intent: {:?} matched {:?}", intent.label(), normalized);
                        return intent;
                    }
                }
            }
        }
        Intent::Fallback
    }
}

fn build_intent(kind: RuleKind, caps: &Captures<'_>) -> Option<Intent> {
    match kind {
        RuleKind::Wake => Some(Intent::Wake),
        RuleKind::Shutdown => Some(Intent::Shutdown),
        RuleKind::Help => Some(Intent::Help),
        RuleKind::ClearText => Some(Intent::ClearText),
        RuleKind::ShowText => {
            let payload = caps.get(1)?.as_str().trim();
            (!payload.is_empty()).then(|| Intent::ShowText(payload.to_string()))
        }
        RuleKind::ShowPhoto => {
            let query = sanitize_query(caps.get(1)?.as_str());
            let usable = !query.is_empty() && !PHOTO_FILLER_WORDS.contains(&query.as_str());
            usable.then_some(Intent::ShowPhoto(query))
        }
    }
}

/// Strip trailing `.`, `!`, `?` and whitespace from a photo subject and cap
/// it at [`MAX_QUERY_CHARS`] characters.
///
/// ```
/// use jarvis_voice::intent::sanitize_query;
///
/// assert_eq!(sanitize_query("katten!? "), "katten");
/// assert_eq!(sanitize_query(&"a".repeat(100)).chars().count(), 80);
/// ```
pub fn sanitize_query(raw: &str) -> String {
    raw.trim_end_matches(|c: char| matches!(c, '.' | '!' | '?') || c.is_whitespace())
        .chars()
        .take(MAX_QUERY_CHARS)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> IntentMatcher {
        IntentMatcher::new("jarvis").expect("built-in rules compile")
    }

    fn classify(text: &str) -> Intent {
        matcher().classify(&normalize(text))
    }

    // ---- wake / shutdown ---

    #[test]
    fn wake_phrases() {
        for text in [
            "jarvis wake up",
            "Jarvis, wakeup",
            "hey jarvis start",
            "jarvis word wakker",
            "jarvis wordwakker",
        ] {
            assert_eq!(classify(text), Intent::Wake, "{text:?}");
        }
    }

    #[test]
    fn shutdown_phrases() {
        for text in [
            "jarvis shut down",
            "jarvis shutdown",
            "jarvis stop",
            "jarvis slaap",
            "jarvis ga slapen",
            "jarvis slaapstand",
            "Jarvis, stop.",
        ] {
            assert_eq!(classify(text), Intent::Shutdown, "{text:?}");
        }
    }

    #[test]
    fn wake_word_requires_the_name() {
        assert_ne!(classify("wake up"), Intent::Wake);
        assert_ne!(classify("stop"), Intent::Shutdown);
    }

    #[test]
    fn wake_word_needs_a_word_boundary() {
        assert_ne!(classify("jarvis starten"), Intent::Wake);
        assert_ne!(classify("jarvis stoppen"), Intent::Shutdown);
    }

    #[test]
    fn wake_beats_every_other_keyword() {
        assert_eq!(classify("toon tekst jarvis wake up"), Intent::Wake);
        assert_eq!(classify("help jarvis start"), Intent::Wake);
        assert_eq!(classify("jarvis wake up en jarvis stop"), Intent::Wake);
    }

    #[test]
    fn shutdown_beats_help_and_commands() {
        assert_eq!(classify("help jarvis stop"), Intent::Shutdown);
        assert_eq!(classify("zeg jarvis ga slapen"), Intent::Shutdown);
    }

    #[test]
    fn accented_name_still_wakes() {
        assert_eq!(classify("Järvis wake up"), Intent::Wake);
    }

    #[test]
    fn custom_name_is_used() {
        let m = IntentMatcher::new("Friday").unwrap();
        assert_eq!(m.classify("friday wake up"), Intent::Wake);
        assert_eq!(m.classify("jarvis wake up"), Intent::Fallback);
    }

    #[test]
    fn multi_word_name_accepts_extra_whitespace() {
        let m = IntentMatcher::new("Hey  Computer").unwrap();
        assert_eq!(m.classify("hey   computer wake up"), Intent::Wake);
    }

    #[test]
    fn name_with_regex_metacharacters_is_escaped() {
        let m = IntentMatcher::new("r2.d2").unwrap();
        assert_eq!(m.classify("r2.d2 wake up"), Intent::Wake);
        assert_eq!(m.classify("r2xd2 wake up"), Intent::Fallback);
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(matches!(IntentMatcher::new("  "), Err(MatcherError::EmptyName)));
    }

    // ---- help / clear ---

    #[test]
    fn help_phrases() {
        assert_eq!(classify("help"), Intent::Help);
        assert_eq!(classify("wat kan je allemaal"), Intent::Help);
        assert_eq!(classify("wat kun je doen"), Intent::Help);
    }

    #[test]
    fn help_beats_show_text() {
        assert_eq!(classify("zeg help"), Intent::Help);
    }

    #[test]
    fn clear_text_phrases() {
        assert_eq!(classify("verberg tekst"), Intent::ClearText);
        assert_eq!(classify("wis tekst"), Intent::ClearText);
        assert_eq!(classify("clear tekst"), Intent::ClearText);
    }

    #[test]
    fn clear_text_beats_show_text() {
        assert_eq!(classify("zeg wis tekst"), Intent::ClearText);
    }

    // ---- show text ---

    #[test]
    fn show_text_extracts_payload() {
        assert_eq!(
            classify("toon tekst hallo wereld"),
            Intent::ShowText("hallo wereld".into())
        );
        assert_eq!(classify("zeg goedemorgen"), Intent::ShowText("goedemorgen".into()));
        assert_eq!(
            classify("schrijf tekst boodschappen lijst"),
            Intent::ShowText("boodschappen lijst".into())
        );
        assert_eq!(
            classify("laat tekst zien tot straks"),
            Intent::ShowText("tot straks".into())
        );
        assert_eq!(classify("spreek dank je wel"), Intent::ShowText("dank je wel".into()));
    }

    #[test]
    fn show_text_payload_is_trimmed() {
        assert_eq!(
            classify("toon tekst    hallo wereld   "),
            Intent::ShowText("hallo wereld".into())
        );
    }

    #[test]
    fn show_text_must_lead_the_utterance() {
        assert_eq!(classify("ik zeg niks"), Intent::Fallback);
    }

    #[test]
    fn show_text_without_payload_falls_back() {
        assert_eq!(classify("zeg"), Intent::Fallback);
        assert_eq!(classify("zeg    "), Intent::Fallback);
        assert_eq!(classify("toon tekst"), Intent::Fallback);
    }

    // ---- show photo ---

    #[test]
    fn photo_of_subject() {
        assert_eq!(classify("foto van katten"), Intent::ShowPhoto("katten".into()));
    }

    #[test]
    fn photo_with_verb_drops_the_preposition() {
        assert_eq!(classify("toon foto van katten"), Intent::ShowPhoto("katten".into()));
        assert_eq!(
            classify("geef een afbeelding over honden"),
            Intent::ShowPhoto("honden".into())
        );
        assert_eq!(
            classify("laat mij een foto zien van de zee"),
            Intent::ShowPhoto("de zee".into())
        );
    }

    #[test]
    fn photo_plural_forms() {
        assert_eq!(classify("toon foto's van bergen"), Intent::ShowPhoto("bergen".into()));
        assert_eq!(
            classify("toon afbeeldingen van treinen"),
            Intent::ShowPhoto("treinen".into())
        );
    }

    #[test]
    fn photo_without_preposition() {
        assert_eq!(classify("toon een foto zonsondergang"), Intent::ShowPhoto("zonsondergang".into()));
    }

    #[test]
    fn photo_query_is_sanitized() {
        assert_eq!(classify("foto van katten?!"), Intent::ShowPhoto("katten".into()));
        let long = format!("foto van {}", "x".repeat(200));
        match classify(&long) {
            Intent::ShowPhoto(q) => assert_eq!(q.chars().count(), MAX_QUERY_CHARS),
            other => panic!("expected photo, got {other:?}"),
        }
    }

    #[test]
    fn photo_with_only_punctuation_falls_back() {
        assert_eq!(classify("foto van ..."), Intent::Fallback);
    }

    #[test]
    fn photo_without_subject_falls_back() {
        assert_eq!(classify("laat mij een foto zien"), Intent::Fallback);
        assert_eq!(classify("toon foto van"), Intent::Fallback);
        assert_eq!(classify("geef een afbeelding over"), Intent::Fallback);
    }

    #[test]
    fn photo_subject_may_contain_filler_words() {
        assert_eq!(
            classify("toon foto van zien en doen"),
            Intent::ShowPhoto("zien en doen".into())
        );
    }

    // ---- fallback / totality ---

    #[test]
    fn unmatched_text_is_fallback() {
        assert_eq!(classify("willekeurige tekst"), Intent::Fallback);
        assert_eq!(classify(""), Intent::Fallback);
        assert_eq!(classify("   "), Intent::Fallback);
    }

    #[test]
    fn sanitize_query_keeps_inner_punctuation() {
        assert_eq!(sanitize_query("st. bernard."), "st. bernard");
        assert_eq!(sanitize_query("..."), "");
    }

    #[test]
    fn sanitize_query_counts_characters_not_bytes() {
        let q = sanitize_query(&"ü".repeat(100));
        assert_eq!(q.chars().count(), MAX_QUERY_CHARS);
    }
}
