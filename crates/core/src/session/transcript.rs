use crate::content::ContactCard;
use crate::output::ProfileSummary;

/// One rendered row of the terminal history
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptEntry {
    /// Markup text; empty for a blank spacer line
    Line(String),
    Profile(Box<ProfileSummary>),
    Contact(ContactCard),
}

impl TranscriptEntry {
    pub fn blank() -> Self {
        Self::Line(String::new())
    }

    pub fn as_line(&self) -> Option<&str> {
        match self {
            Self::Line(line) => Some(line),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.as_line().is_some_and(str::is_empty)
    }
}

/// Append-only history; only the last line may grow in place
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.push(TranscriptEntry::Line(line.into()));
    }

    pub fn push_blank(&mut self) {
        self.push(TranscriptEntry::blank());
    }

    /// Extend the trailing line; payload entries are never touched
    pub(crate) fn append_to_last(&mut self, text: &str) {
        if let Some(TranscriptEntry::Line(line)) = self.entries.last_mut() {
            line.push_str(text);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TranscriptEntry> {
        self.entries.iter()
    }
}
