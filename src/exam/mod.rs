pub mod info;
pub mod sections;
pub mod vocabulary;
pub mod writing;

use std::fmt;
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CatalogError {
    #[error("unknown exam section: {0:?}")]
    NotFound(String),
    #[error("invalid timing: {0}")]
    InvalidTiming(String),
    #[error("invalid exam date: {0}")]
    InvalidDate(String),
}

/// The four parts of the B1 exam, in the order they are sat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionName {
    Reading,
    Writing,
    Listening,
    Speaking,
}

impl SectionName {
    pub const ALL: [SectionName; 4] = [
        SectionName::Reading,
        SectionName::Writing,
        SectionName::Listening,
        SectionName::Speaking,
    ];

    pub fn german(&self) -> &'static str {
        match self {
            SectionName::Reading => "Lesen",
            SectionName::Writing => "Schreiben",
            SectionName::Listening => "Hören",
            SectionName::Speaking => "Sprechen",
        }
    }

    pub fn english(&self) -> &'static str {
        match self {
            SectionName::Reading => "Reading",
            SectionName::Writing => "Writing",
            SectionName::Listening => "Listening",
            SectionName::Speaking => "Speaking",
        }
    }

    /// 1-based position of the part in the exam.
    pub fn number(&self) -> usize {
        *self as usize + 1
    }

    /// Label used on keyboards, e.g. "Teil 2: Schreiben".
    pub fn label(&self) -> String {
        format!("Teil {}: {}", self.number(), self.german())
    }

    pub fn section(&self) -> &'static ExamSection {
        &sections::SECTIONS[*self as usize]
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.german(), self.english())
    }
}

impl FromStr for SectionName {
    type Err = CatalogError;

    /// Accepts German or English names in any case, optionally behind a
    /// "Teil N:" prefix as shown on the keyboard.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let name = match lowered.split_once(':') {
            Some((prefix, rest)) if prefix.trim_start().starts_with("teil") => rest.trim(),
            _ => lowered.as_str(),
        };

        match name {
            "lesen" | "reading" => Ok(SectionName::Reading),
            "schreiben" | "writing" => Ok(SectionName::Writing),
            "hören" | "hoeren" | "horen" | "listening" => Ok(SectionName::Listening),
            "sprechen" | "speaking" => Ok(SectionName::Speaking),
            _ => Err(CatalogError::NotFound(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PracticeKind {
    ReadingPassage,
    WritingTask,
    ListeningTask,
    SpeakingPrompt,
}

impl PracticeKind {
    pub fn for_section(name: SectionName) -> Self {
        match name {
            SectionName::Reading => PracticeKind::ReadingPassage,
            SectionName::Writing => PracticeKind::WritingTask,
            SectionName::Listening => PracticeKind::ListeningTask,
            SectionName::Speaking => PracticeKind::SpeakingPrompt,
        }
    }

    /// Heading shown above the support text.
    pub fn support_heading(&self) -> &'static str {
        match self {
            PracticeKind::ReadingPassage => "Text",
            PracticeKind::WritingTask => "Hinweise",
            PracticeKind::ListeningTask => "Fragen",
            PracticeKind::SpeakingPrompt => "Themen",
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct PracticeItem {
    pub kind: PracticeKind,
    pub prompt_text: &'static str,
    pub support_text: Option<&'static str>,
}

#[derive(Debug)]
pub struct ExamSection {
    pub name: SectionName,
    pub duration_minutes: u32,
    pub parts_summary: &'static str,
    pub tasks: &'static [&'static str],
    /// "Strategien", "Tipps" or "Bewertungskriterien" depending on the part.
    pub notes_heading: &'static str,
    pub notes: &'static [&'static str],
    pub phrases: &'static [&'static str],
    pub practice_tip: Option<&'static str>,
    /// Recording to play alongside the practice items.
    pub sample_audio: Option<&'static str>,
    pub practice_items: &'static [PracticeItem],
}

impl ExamSection {
    /// Review minutes the time calculator starts with.
    pub fn default_review_minutes(&self) -> u32 {
        match self.name {
            SectionName::Writing => 5,
            _ => 0,
        }
    }
}

pub fn get_section(name: &str) -> Result<&'static ExamSection, CatalogError> {
    let name: SectionName = name.parse()?;
    Ok(name.section())
}

pub fn list_sections() -> &'static [ExamSection] {
    &sections::SECTIONS
}
