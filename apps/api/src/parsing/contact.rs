//! Contact extraction — email, phone and a best-effort candidate name.
//!
//! Runs on the raw text. Normalization strips `@`, `.` and `+`, so it must never see
//! normalized input.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::parsing::normalizer::split_lines;
use crate::parsing::tagger::{PosTag, PosTagger};

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,7}\b")
        .expect("email pattern is valid")
});

// Optional 1-2 digit country code, then 3-3-4 digit groups. Parentheses may wrap the
// area code; groups may be separated by a space or hyphen.
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+?\d{1,2}\s?)?(\(?\d{3}\)?[\s\-]?\d{3}[\s\-]?\d{4})")
        .expect("phone pattern is valid")
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Extracts all three contact fields from raw text.
pub fn extract_contact(text: &str, tagger: &dyn PosTagger) -> ContactInfo {
    let (email, phone) = scan_email_and_phone(text);
    ContactInfo {
        name: extract_name(text, tagger),
        email,
        phone,
    }
}

/// Scans trimmed lines for the first email and the first phone number.
///
/// The line that yields the email is not searched for a phone, so digits inside an address
/// or next to it on that line are never taken as the number.
pub fn scan_email_and_phone(text: &str) -> (Option<String>, Option<String>) {
    let mut email: Option<String> = None;
    let mut phone: Option<String> = None;

    for line in split_lines(text).into_iter().map(str::trim) {
        if email.is_none() {
            if let Some(m) = EMAIL_PATTERN.find(line) {
                email = Some(m.as_str().to_string());
                continue;
            }
        }
        if phone.is_none() {
            phone = PHONE_PATTERN.find(line).map(|m| m.as_str().to_string());
        }
        if email.is_some() && phone.is_some() {
            break;
        }
    }

    (email, phone)
}

/// Returns the source text spanning the first two adjacent proper-noun tokens.
///
/// Heuristic: an organisation name appearing before the candidate's own name will be
/// returned instead. Callers should treat the result as best-effort.
pub fn extract_name(text: &str, tagger: &dyn PosTagger) -> Option<String> {
    let tokens = tagger.tag(text);
    tokens
        .windows(2)
        .find(|pair| pair[0].tag == PosTag::ProperNoun && pair[1].tag == PosTag::ProperNoun)
        .and_then(|pair| text.get(pair[0].start..pair[1].end))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::tagger::{HeuristicTagger, TaggedToken};

    const RESUME: &str = "Jane Smith\n\
        Software Engineer\n\
        jane.smith+jobs@mail.example.org\n\
        +1 555-123-4567\n\
        Education\n\
        MIT, 2015";

    #[test]
    fn test_email_is_extracted_verbatim() {
        let (email, _) = scan_email_and_phone("Contact: john.doe@example.com");
        assert_eq!(email.as_deref(), Some("john.doe@example.com"));
    }

    #[test]
    fn test_email_without_valid_tld_is_ignored() {
        let (email, _) = scan_email_and_phone("user@localhost\nuser@host.c");
        assert_eq!(email, None);
    }

    #[test]
    fn test_phone_with_country_code() {
        let (_, phone) = scan_email_and_phone("+1 555-123-4567");
        let phone = phone.unwrap();
        assert!(phone.contains("555-123-4567"), "phone was {phone}");
        assert!(phone.starts_with("+1"));
    }

    #[test]
    fn test_phone_with_parenthesized_area_code() {
        let (_, phone) = scan_email_and_phone("Tel: (555) 123 4567");
        assert_eq!(phone.as_deref(), Some("(555) 123 4567"));
    }

    #[test]
    fn test_first_match_per_field_across_lines() {
        let text = "555-000-1111\nfirst@example.com\nsecond@example.com\n555-999-8888";
        let (email, phone) = scan_email_and_phone(text);
        assert_eq!(email.as_deref(), Some("first@example.com"));
        assert_eq!(phone.as_deref(), Some("555-000-1111"));
    }

    #[test]
    fn test_phone_not_taken_from_email_line() {
        let (email, phone) = scan_email_and_phone("jane@x.io | 555-111-2222\nTel 555-999-8888");
        assert_eq!(email.as_deref(), Some("jane@x.io"));
        assert_eq!(phone.as_deref(), Some("555-999-8888"));

        let (email, phone) = scan_email_and_phone("jane5551234567@x.com");
        assert_eq!(email.as_deref(), Some("jane5551234567@x.com"));
        assert_eq!(phone, None);
    }

    #[test]
    fn test_phone_on_line_after_email_already_found() {
        let text = "first@example.com\nsecond@example.com 555 123 4567";
        let (email, phone) = scan_email_and_phone(text);
        assert_eq!(email.as_deref(), Some("first@example.com"));
        assert_eq!(phone.as_deref(), Some("555 123 4567"));
    }

    #[test]
    fn test_lines_split_on_carriage_return_and_form_feed() {
        let (email, phone) = scan_email_and_phone("a@b.io 555-111-2222\r555-999-8888\x0cc@d.io");
        assert_eq!(email.as_deref(), Some("a@b.io"));
        assert_eq!(phone.as_deref(), Some("555-999-8888"));
    }

    #[test]
    fn test_absent_fields_are_none() {
        assert_eq!(scan_email_and_phone(""), (None, None));
        assert_eq!(scan_email_and_phone("no contact here"), (None, None));
    }

    #[test]
    fn test_name_is_first_proper_noun_pair() {
        let contact = extract_contact(RESUME, &HeuristicTagger);
        assert_eq!(contact.name.as_deref(), Some("Jane Smith"));
        assert_eq!(
            contact.email.as_deref(),
            Some("jane.smith+jobs@mail.example.org")
        );
        assert!(contact.phone.unwrap().contains("555-123-4567"));
    }

    #[test]
    fn test_name_with_leading_initial() {
        let text = "J. Smith\nData Engineer";
        assert_eq!(extract_name(text, &HeuristicTagger).as_deref(), Some("J. Smith"));
    }

    #[test]
    fn test_name_absent_when_no_pair() {
        assert_eq!(extract_name("education\nskills", &HeuristicTagger), None);
        assert_eq!(extract_name("", &HeuristicTagger), None);
    }

    struct FixedTagger(Vec<TaggedToken>);

    impl PosTagger for FixedTagger {
        fn tag(&self, _text: &str) -> Vec<TaggedToken> {
            self.0.clone()
        }
    }

    #[test]
    fn test_name_uses_injected_tagger() {
        let text = "acme corp";
        let tagger = FixedTagger(vec![
            TaggedToken {
                text: "acme".to_string(),
                tag: PosTag::ProperNoun,
                start: 0,
                end: 4,
            },
            TaggedToken {
                text: "corp".to_string(),
                tag: PosTag::ProperNoun,
                start: 5,
                end: 9,
            },
        ]);
        assert_eq!(extract_name(text, &tagger).as_deref(), Some("acme corp"));
    }
}
