//! Part-of-speech tagging used by name extraction.
//!
//! The parser only needs to know which tokens are proper nouns. `PosTagger` is the seam:
//! `ResumeParser` holds an `Arc<dyn PosTagger>` so a statistical backend can replace the
//! default heuristic without touching the pipeline.

use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

use crate::parsing::normalizer::is_line_break;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PosTag {
    ProperNoun,
    Noun,
    /// Articles, prepositions, conjunctions, pronouns.
    Function,
    Numeral,
    Punctuation,
    /// Line breaks. Plain spaces are not emitted as tokens.
    Space,
    Other,
}

/// A token with its tag and byte span in the tagged text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedToken {
    pub text: String,
    pub tag: PosTag,
    pub start: usize,
    pub end: usize,
}

pub trait PosTagger: Send + Sync {
    fn tag(&self, text: &str) -> Vec<TaggedToken>;
}

const FUNCTION_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "nor", "of", "in", "on", "at", "to", "for", "from",
    "with", "by", "as", "into", "about", "via", "per", "i", "me", "my", "we", "our", "you",
    "your", "he", "she", "they", "their", "it", "its", "this", "that", "these", "those",
    "is", "am", "are", "was", "were", "be",
];

/// Words that open résumé headings and boilerplate. Capitalized they still aren't names.
const COMMON_NOUNS: &[&str] = &[
    "resume",
    "curriculum",
    "vitae",
    "cv",
    "contact",
    "information",
    "email",
    "phone",
    "mobile",
    "address",
    "education",
    "experience",
    "work",
    "employment",
    "skills",
    "summary",
    "profile",
    "objective",
    "projects",
    "certifications",
    "achievements",
    "awards",
    "languages",
    "interests",
    "publications",
    "references",
    "activities",
    "professional",
    "technical",
    "personal",
    "career",
];

/// Rule-based tagger: Unicode word segmentation plus capitalization heuristics.
///
/// An alphabetic word that starts with an uppercase letter (or is all caps) is a proper
/// noun unless it is a function word or a common résumé heading noun. A single capital
/// followed by `.` is an initial and becomes one proper-noun token including the dot.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicTagger;

impl PosTagger for HeuristicTagger {
    fn tag(&self, text: &str) -> Vec<TaggedToken> {
        let mut tokens: Vec<TaggedToken> = Vec::new();
        // End of the last initial; its trailing `.` segment is already consumed.
        let mut consumed = 0;

        for (start, segment) in text.split_word_bound_indices() {
            if start < consumed {
                continue;
            }
            let end = start + segment.len();

            if segment.chars().all(char::is_whitespace) {
                if !segment.chars().any(is_line_break) {
                    continue;
                }
                // Consecutive line breaks collapse into one Space token.
                if let Some(last) = tokens.last_mut() {
                    if last.tag == PosTag::Space && last.end == start {
                        last.end = end;
                        last.text.push_str(segment);
                        continue;
                    }
                }
                tokens.push(TaggedToken {
                    text: segment.to_string(),
                    tag: PosTag::Space,
                    start,
                    end,
                });
                continue;
            }

            if is_initial(segment) && text[end..].starts_with('.') {
                consumed = end + 1;
                tokens.push(TaggedToken {
                    text: text[start..consumed].to_string(),
                    tag: PosTag::ProperNoun,
                    start,
                    end: consumed,
                });
                continue;
            }

            tokens.push(TaggedToken {
                text: segment.to_string(),
                tag: classify_word(segment),
                start,
                end,
            });
        }

        tokens
    }
}

fn is_initial(word: &str) -> bool {
    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_uppercase() => {
            !FUNCTION_WORDS.contains(&word.to_lowercase().as_str())
        }
        _ => false,
    }
}

fn classify_word(word: &str) -> PosTag {
    if word.chars().all(|c| !c.is_alphanumeric()) {
        return PosTag::Punctuation;
    }
    if word.chars().any(|c| c.is_ascii_digit()) {
        return if word.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
            PosTag::Numeral
        } else {
            PosTag::Other
        };
    }
    if !word.chars().all(|c| c.is_alphabetic() || c == '\'' || c == '-') {
        return PosTag::Other;
    }

    let lowered = word.to_lowercase();
    if FUNCTION_WORDS.contains(&lowered.as_str()) {
        return PosTag::Function;
    }
    if COMMON_NOUNS.contains(&lowered.as_str()) {
        return PosTag::Noun;
    }

    let starts_upper = word.chars().next().is_some_and(char::is_uppercase);
    if starts_upper && word.chars().count() > 1 {
        PosTag::ProperNoun
    } else {
        PosTag::Noun
    }
}
