//! Assembles contact fields and classified sections into a `ParsedResume`.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::parsing::classifier::ClassifiedSections;
use crate::parsing::contact::ContactInfo;

/// Placeholder for any field or section without extracted content.
pub const NOT_AVAILABLE: &str = "Not Available";

pub const NAME_KEY: &str = "Name";
pub const EMAIL_KEY: &str = "Email";
pub const PHONE_KEY: &str = "Phone";

/// Contact keys, always emitted first and in this order.
pub const RESERVED_KEYS: [&str; 3] = [NAME_KEY, EMAIL_KEY, PHONE_KEY];

/// Ordered mapping from section name to its lines.
///
/// Every value is non-empty. Serializes as a JSON object in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResume {
    entries: Vec<(String, Vec<String>)>,
}

impl ParsedResume {
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for an assembled résumé, which carries the contact keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ParsedResume {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, lines) in &self.entries {
            map.serialize_entry(key, lines)?;
        }
        map.end()
    }
}

/// Name, Email, Phone first (value or sentinel), then sections in first-occurrence order.
/// Sections with no lines get the sentinel as their only line.
pub fn assemble(contact: ContactInfo, sections: ClassifiedSections) -> ParsedResume {
    let sentinel_or =
        |value: Option<String>| vec![value.unwrap_or_else(|| NOT_AVAILABLE.to_string())];

    let mut entries = vec![
        (NAME_KEY.to_string(), sentinel_or(contact.name)),
        (EMAIL_KEY.to_string(), sentinel_or(contact.email)),
        (PHONE_KEY.to_string(), sentinel_or(contact.phone)),
    ];

    for (name, mut lines) in sections.into_inner() {
        if lines.is_empty() {
            lines.push(NOT_AVAILABLE.to_string());
        }
        entries.push((name, lines));
    }

    ParsedResume { entries }
}
