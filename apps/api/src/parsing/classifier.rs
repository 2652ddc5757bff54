//! Line-by-line section classification.
//!
//! A single-pass state machine: each line belongs to the most recently matched heading.
//! Lines before the first heading are dropped.

use crate::parsing::catalog::SectionCatalog;
use crate::parsing::normalizer::split_lines;

/// Section bodies in first-occurrence order. A heading line is kept as content of the
/// section it opens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedSections {
    sections: Vec<(String, Vec<String>)>,
}

impl ClassifiedSections {
    fn push(&mut self, section: &str, line: &str) {
        match self.sections.iter_mut().find(|(name, _)| name == section) {
            Some((_, lines)) => lines.push(line.to_string()),
            None => self
                .sections
                .push((section.to_string(), vec![line.to_string()])),
        }
    }

    pub fn into_inner(self) -> Vec<(String, Vec<String>)> {
        self.sections
    }
}

pub struct SectionClassifier<'a> {
    catalog: &'a SectionCatalog,
}

impl<'a> SectionClassifier<'a> {
    pub fn new(catalog: &'a SectionCatalog) -> Self {
        Self { catalog }
    }

    /// Classifies raw (non-normalized) text. Total over any input.
    pub fn classify(&self, text: &str) -> ClassifiedSections {
        let mut sections = ClassifiedSections::default();
        let mut current: Option<&str> = None;

        for line in split_lines(text).into_iter().map(str::trim).filter(|l| !l.is_empty()) {
            if let Some(heading) = self.catalog.match_heading(line) {
                current = Some(heading);
            }
            // No heading seen yet: preamble, dropped.
            if let Some(section) = current {
                sections.push(section, line);
            }
        }

        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Vec<(String, Vec<String>)> {
        let catalog = SectionCatalog::default();
        SectionClassifier::new(&catalog).classify(text).into_inner()
    }

    fn lines<'a>(sections: &'a [(String, Vec<String>)], name: &str) -> &'a [String] {
        &sections.iter().find(|(n, _)| n == name).unwrap().1
    }

    #[test]
    fn test_heading_and_following_line_share_section() {
        let sections = classify("Education: BSc Computer Science\n2019-2023");
        assert_eq!(sections.len(), 1);
        assert_eq!(
            lines(&sections, "Education"),
            ["Education: BSc Computer Science", "2019-2023"]
        );
    }

    #[test]
    fn test_switches_exactly_at_next_heading() {
        let sections = classify("Skills\nEducation");
        assert_eq!(sections.len(), 2);
        assert_eq!(lines(&sections, "Skills"), ["Skills"]);
        assert_eq!(lines(&sections, "Education"), ["Education"]);
    }

    #[test]
    fn test_preamble_and_blank_lines_are_dropped() {
        let text = "Jane Smith\njane@example.com\n\n   \nSkills\n\n  Rust, SQL  \n";
        let sections = classify(text);
        assert_eq!(sections.len(), 1);
        assert_eq!(lines(&sections, "Skills"), ["Skills", "Rust, SQL"]);
    }

    #[test]
    fn test_returning_to_a_section_appends_in_place() {
        let text = "Skills\nRust\nProjects\nparser\nSkills again\nGo";
        let sections = classify(text);
        let names: Vec<_> = sections.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["Skills", "Projects"]);
        assert_eq!(sections[0].1, ["Skills", "Rust", "Skills again", "Go"]);
    }

    #[test]
    fn test_no_lines_no_sections() {
        assert!(classify("").is_empty());
        assert!(classify("just a preamble\nwith no headings").is_empty());
    }

    #[test]
    fn test_lines_are_matched_raw_not_normalized() {
        // Leading punctuation defeats the prefix match on the raw line.
        assert!(classify("• Education\nBSc").is_empty());
    }

    #[test]
    fn test_carriage_return_and_form_feed_separate_lines() {
        let sections = classify("Skills\rRust\x0cEducation\rMIT");
        assert_eq!(sections.len(), 2);
        assert_eq!(lines(&sections, "Skills"), ["Skills", "Rust"]);
        assert_eq!(lines(&sections, "Education"), ["Education", "MIT"]);
    }
}
