//! Section catalog — the table of recognized section headings and their trigger keywords.
//!
//! Catalog order is significant: when a line could open several sections, the first
//! section in the table wins.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parsing::assembler::RESERVED_KEYS;

/// One catalog row: a canonical section name plus the keywords that open it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRule {
    pub name: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SectionCatalog {
    sections: Vec<SectionRule>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog must declare at least one section")]
    Empty,

    #[error("section name cannot be empty")]
    EmptyName,

    #[error("section '{0}' is declared more than once")]
    DuplicateSection(String),

    #[error("section name '{0}' is reserved for contact fields")]
    ReservedName(String),

    #[error("section '{0}' has no keywords")]
    NoKeywords(String),

    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog file: {0}")]
    Json(#[from] serde_json::Error),
}

const DEFAULT_SECTIONS: &[(&str, &[&str])] = &[
    (
        "Education",
        &[
            "education",
            "academic",
            "degree",
            "graduation",
            "qualification",
            "university",
            "college",
        ],
    ),
    (
        "Work Experience",
        &["experience", "work", "employment", "job", "internship"],
    ),
    (
        "Skills",
        &["skills", "technical", "tools", "expertise", "proficiencies"],
    ),
    (
        "Certifications",
        &["certifications", "courses", "training", "workshops"],
    ),
    (
        "Achievements",
        &["accomplishments", "awards", "honors", "achievements"],
    ),
    (
        "Projects",
        &["projects", "applications", "development", "personal projects"],
    ),
    ("Languages", &["languages", "language proficiency"]),
    ("Interests", &["interests", "hobbies", "passions", "leisure"]),
    (
        "Summary",
        &[
            "summary",
            "executive profile",
            "professional profile",
            "personal profile",
            "work background",
        ],
    ),
    ("Publications", &["publications", "publication"]),
    (
        "Other Activities",
        &["other activities", "volunteer", "community"],
    ),
    (
        "Objective",
        &["objective", "career goal", "career objective"],
    ),
];

impl Default for SectionCatalog {
    fn default() -> Self {
        let sections = DEFAULT_SECTIONS
            .iter()
            .map(|(name, keywords)| SectionRule {
                name: (*name).to_string(),
                keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            })
            .collect();
        Self { sections }
    }
}

impl SectionCatalog {
    /// Builds a catalog from caller-supplied rules.
    ///
    /// Keywords are trimmed and lower-cased; blank keywords are dropped. Rejects empty
    /// catalogs, blank/duplicate/reserved section names and sections left without keywords.
    pub fn new(rules: Vec<SectionRule>) -> Result<Self, CatalogError> {
        if rules.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        let mut sections = Vec::with_capacity(rules.len());

        for rule in rules {
            let name = rule.name.trim().to_string();
            if name.is_empty() {
                return Err(CatalogError::EmptyName);
            }
            if RESERVED_KEYS.iter().any(|r| r.eq_ignore_ascii_case(&name)) {
                return Err(CatalogError::ReservedName(name));
            }
            if !seen.insert(name.clone()) {
                return Err(CatalogError::DuplicateSection(name));
            }

            let keywords: Vec<String> = rule
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
            if keywords.is_empty() {
                return Err(CatalogError::NoKeywords(name));
            }

            sections.push(SectionRule { name, keywords });
        }

        Ok(Self { sections })
    }

    /// Parses a JSON array of `{ "name": ..., "keywords": [...] }` rows.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let rules: Vec<SectionRule> = serde_json::from_str(json)?;
        Self::new(rules)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn sections(&self) -> &[SectionRule] {
        &self.sections
    }

    /// Returns the first section (in catalog order) whose keyword the line starts with.
    /// Matching is case-insensitive and anchored at the start of the line.
    pub fn match_heading(&self, line: &str) -> Option<&str> {
        let lowered = line.to_lowercase();
        self.sections
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| lowered.starts_with(k.as_str())))
            .map(|rule| rule.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str, keywords: &[&str]) -> SectionRule {
        SectionRule {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    #[test]
    fn test_default_catalog_order() {
        let catalog = SectionCatalog::default();
        let names: Vec<_> = catalog.sections().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names.len(), 12);
        assert_eq!(names[0], "Education");
        assert_eq!(names[1], "Work Experience");
        assert_eq!(names[11], "Objective");
    }

    #[test]
    fn test_match_is_case_insensitive_prefix() {
        let catalog = SectionCatalog::default();
        assert_eq!(catalog.match_heading("EDUCATION"), Some("Education"));
        assert_eq!(
            catalog.match_heading("Education: BSc Computer Science"),
            Some("Education")
        );
        assert_eq!(catalog.match_heading("Technical Skills"), Some("Skills"));
        // "contains" is not enough
        assert_eq!(catalog.match_heading("My education"), None);
    }

    #[test]
    fn test_first_section_in_catalog_order_wins() {
        let catalog = SectionCatalog::default();
        // "work background" is a Summary keyword but "work" opens Work Experience first.
        assert_eq!(
            catalog.match_heading("Work background"),
            Some("Work Experience")
        );
    }

    #[test]
    fn test_new_normalizes_keywords() {
        let catalog = SectionCatalog::new(vec![rule(" Hobbies ", &["  Hobbies ", "", "FUN"])])
            .unwrap();
        assert_eq!(catalog.sections()[0].name, "Hobbies");
        assert_eq!(catalog.sections()[0].keywords, vec!["hobbies", "fun"]);
        assert_eq!(catalog.match_heading("Fun stuff"), Some("Hobbies"));
    }

    #[test]
    fn test_rejects_invalid_catalogs() {
        assert!(matches!(SectionCatalog::new(vec![]), Err(CatalogError::Empty)));
        assert!(matches!(
            SectionCatalog::new(vec![rule("  ", &["x"])]),
            Err(CatalogError::EmptyName)
        ));
        assert!(matches!(
            SectionCatalog::new(vec![rule("email", &["mail"])]),
            Err(CatalogError::ReservedName(_))
        ));
        assert!(matches!(
            SectionCatalog::new(vec![rule("Skills", &["a"]), rule("Skills", &["b"])]),
            Err(CatalogError::DuplicateSection(_))
        ));
        assert!(matches!(
            SectionCatalog::new(vec![rule("Skills", &[" "])]),
            Err(CatalogError::NoKeywords(_))
        ));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"name": "Education", "keywords": ["education"]},
            {"name": "Skills", "keywords": ["skills", "stack"]}
        ]"#;
        let catalog = SectionCatalog::from_json(json).unwrap();
        assert_eq!(catalog.sections().len(), 2);
        assert_eq!(catalog.match_heading("Stack: Rust"), Some("Skills"));

        assert!(matches!(
            SectionCatalog::from_json("{not json"),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn test_shipped_catalog_file_matches_default() {
        let shipped =
            SectionCatalog::from_json(include_str!("../../config/section_catalog.json")).unwrap();
        assert_eq!(shipped, SectionCatalog::default());
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = SectionCatalog::from_path(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }

    #[test]
    fn test_serializes_as_array() {
        let catalog = SectionCatalog::new(vec![rule("Skills", &["skills"])]).unwrap();
        let json = serde_json::to_value(&catalog).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"name": "Skills", "keywords": ["skills"]}])
        );
    }
}
