//! Parsing of labeled model replies into a structured answer.
//!
//! The reply is read line by line through a small state machine. A line that
//! starts with one of the [`LABELS`] (case-insensitive, after trimming) moves
//! the parser into that label's [`Section`]; every other line is handed to the
//! current section's accumulation rule. Text seen before the first label is
//! dropped.

use serde::{Deserialize, Serialize};

/// Text used for both answer fields when retrieval found nothing.
pub const NOT_AVAILABLE: &str = "Not available in sources";

/// Structured answer extracted from a model reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAnswer {
    /// Short answer.
    pub concise: String,
    /// Longer explanation.
    pub detailed: String,
    /// One entry per source line the model listed.
    pub sources: Vec<String>,
}

impl ParsedAnswer {
    /// Answer returned when no context was available to ground a reply.
    pub fn not_available() -> Self {
        Self {
            concise: NOT_AVAILABLE.to_string(),
            detailed: NOT_AVAILABLE.to_string(),
            sources: Vec::new(),
        }
    }

    /// True when no section produced any content.
    pub fn is_empty(&self) -> bool {
        self.concise.is_empty() && self.detailed.is_empty() && self.sources.is_empty()
    }
}

/// Parser state: the section currently receiving lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    None,
    Concise,
    Detailed,
    Sources,
}

/// Transition table: line prefix to the section it opens.
pub const LABELS: [(&str, Section); 3] = [
    ("Concise Answer:", Section::Concise),
    ("Detailed Explanation:", Section::Detailed),
    ("Sources:", Section::Sources),
];

/// Match a trimmed line against [`LABELS`], returning the target section and
/// whatever follows the label on the same line.
pub fn match_label(line: &str) -> Option<(Section, &str)> {
    LABELS.iter().find_map(|&(label, section)| {
        let prefix = line.get(..label.len())?;
        if prefix.eq_ignore_ascii_case(label) {
            Some((section, line[label.len()..].trim()))
        } else {
            None
        }
    })
}

impl Section {
    /// Start this section afresh; a repeated label replaces earlier content.
    fn open(self, answer: &mut ParsedAnswer, rest: &str) {
        match self {
            Section::None => {}
            Section::Concise => answer.concise.clear(),
            Section::Detailed => answer.detailed.clear(),
            Section::Sources => answer.sources.clear(),
        }
        self.accumulate(answer, rest);
    }

    /// Feed one trimmed, non-label line into this section.
    pub fn accumulate(self, answer: &mut ParsedAnswer, line: &str) {
        match self {
            Section::None => {}
            Section::Concise => append_words(&mut answer.concise, line),
            Section::Detailed => append_words(&mut answer.detailed, line),
            Section::Sources => {
                if !line.is_empty() {
                    answer.sources.push(line.to_string());
                }
            }
        }
    }
}

fn append_words(target: &mut String, line: &str) {
    if line.is_empty() {
        return;
    }
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(line);
}

/// Parse a free-text reply with `Concise Answer:`, `Detailed Explanation:` and
/// `Sources:` sections. Never fails; missing sections stay empty.
pub fn parse_structured_answer(raw: &str) -> ParsedAnswer {
    let mut answer = ParsedAnswer::default();
    let mut state = Section::None;

    for line in raw.trim_start_matches('\u{feff}').lines() {
        let line = line.trim();
        match match_label(line) {
            Some((next, rest)) => {
                state = next;
                state.open(&mut answer, rest);
            }
            None => state.accumulate(&mut answer, line),
        }
    }

    answer
}
