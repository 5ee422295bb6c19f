//! Line-oriented heuristic that splits a free-text model reply into
//! summary, hypotheses, checks and fixes.

use crate::analysis::Sections;

/// Header phrases that open the hypotheses list.
pub const HYPOTHESES_HEADERS: &[&str] = &["possible root cause", "possible root causes", "root causes"];

/// Header phrases that open the checks list.
pub const CHECKS_HEADERS: &[&str] = &[
    "checks and suggested actions",
    "checks / actions",
    "what to check",
];

pub const BULLET_MARKERS: &[char] = &['-', '•', '*'];

/// Number of characters of the raw reply used when no summary was found.
pub const SUMMARY_FALLBACK_CHARS: usize = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Summary,
    Hypotheses,
    Checks,
    Fixes,
}

/// Line boundaries: `\n`, `\r\n`, a lone `\r` and the other vertical
/// separators (VT, FF, FS, GS, RS, NEL, LS, PS).
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Ordered header rules. The first rule whose phrase appears in a line wins.
///
/// The default rule set has no phrase that leads into [`Section::Fixes`], so
/// `fixes` stays empty unless a caller adds one with [`SectionRules::with_headers`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRules {
    rules: Vec<(Section, Vec<String>)>,
}

impl Default for SectionRules {
    fn default() -> Self {
        Self::empty()
            .with_headers(Section::Hypotheses, HYPOTHESES_HEADERS.iter().copied())
            .with_headers(Section::Checks, CHECKS_HEADERS.iter().copied())
    }
}

impl SectionRules {
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule. Phrases are matched case-insensitively as substrings;
    /// blank phrases are ignored.
    pub fn with_headers<I, S>(mut self, section: Section, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases: Vec<String> = phrases
            .into_iter()
            .map(|phrase| phrase.as_ref().trim().to_lowercase())
            .filter(|phrase| !phrase.is_empty())
            .collect();

        if !phrases.is_empty() {
            self.rules.push((section, phrases));
        }
        self
    }

    fn header_section(&self, lowered: &str) -> Option<Section> {
        self.rules
            .iter()
            .find(|(_, phrases)| phrases.iter().any(|phrase| lowered.contains(phrase.as_str())))
            .map(|(section, _)| *section)
    }
}

/// Finite-state scanner over the non-blank lines of a model reply.
#[derive(Debug, Clone)]
pub struct Sectionizer {
    rules: SectionRules,
    initial: Section,
}

impl Default for Sectionizer {
    fn default() -> Self {
        Self::new(SectionRules::default())
    }
}

impl Sectionizer {
    pub fn new(rules: SectionRules) -> Self {
        Self {
            rules,
            initial: Section::Summary,
        }
    }

    /// Start the scan in `section` instead of the summary.
    pub fn starting_in(mut self, section: Section) -> Self {
        self.initial = section;
        self
    }

    pub fn sectionize(&self, text: &str) -> Sections {
        let mut sections = Sections::default();
        let mut current = self.initial;

        for line in text.split(is_line_break).map(str::trim).filter(|line| !line.is_empty()) {
            let lowered = line.to_lowercase();

            if let Some(section) = self.rules.header_section(&lowered) {
                current = section;
                continue;
            }

            let bullet = line.starts_with(BULLET_MARKERS);
            match current {
                Section::Summary => {
                    if !sections.summary.is_empty() {
                        sections.summary.push(' ');
                    }
                    sections.summary.push_str(line);
                }
                Section::Hypotheses if bullet => sections.hypotheses.push(strip_bullet(line)),
                Section::Checks if bullet => sections.checks.push(strip_bullet(line)),
                Section::Fixes if bullet => sections.fixes.push(strip_bullet(line)),
                Section::Hypotheses | Section::Checks | Section::Fixes => {}
            }
        }

        if sections.summary.is_empty() {
            log::debug!("No summary lines found, using leading text as summary");
            sections.summary = text.chars().take(SUMMARY_FALLBACK_CHARS).collect();
        }

        sections
    }
}

/// Sectionize `text` with the default header rules.
pub fn sectionize(text: &str) -> Sections {
    Sectionizer::default().sectionize(text)
}

fn strip_bullet(line: &str) -> String {
    line.trim_start_matches(|c: char| c == ' ' || BULLET_MARKERS.contains(&c))
        .trim()
        .to_string()
}
