//! Treatment/action log for the current case.
//!
//! Entries carry a typed kind, and the case summary counts kinds rather
//! than scanning the display text.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// An intervention that helped.
    Effective,
    /// An intervention with no meaningful effect.
    Limited,
    /// An intervention that made things worse.
    Harmful,
    TestInformative,
    TestUnremarkable,
    /// Same test ordered twice for one patient.
    TestRepeated,
    DiagnosisCorrect,
    DiagnosisWrong,
    /// Arrivals, transfers and other narration.
    Note,
    /// Deterioration and death.
    Alert,
}

impl EntryKind {
    pub fn icon(self) -> &'static str {
        match self {
            EntryKind::Effective | EntryKind::TestInformative | EntryKind::DiagnosisCorrect => "✅",
            EntryKind::Limited | EntryKind::TestUnremarkable | EntryKind::TestRepeated => "⚠️",
            EntryKind::Harmful | EntryKind::DiagnosisWrong => "❌",
            EntryKind::Note => "🩺",
            EntryKind::Alert => "🚨",
        }
    }

    /// Counted as an effective action on the summary.
    pub fn is_effective(self) -> bool {
        matches!(
            self,
            EntryKind::Effective | EntryKind::TestInformative | EntryKind::DiagnosisCorrect
        )
    }

    /// Counted as a limited or ineffective action on the summary.
    pub fn is_ineffective(self) -> bool {
        matches!(
            self,
            EntryKind::Limited
                | EntryKind::Harmful
                | EntryKind::TestUnremarkable
                | EntryKind::TestRepeated
                | EntryKind::DiagnosisWrong
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub kind: EntryKind,
    pub text: String,
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind.icon(), self.text)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreatmentLog {
    entries: Vec<LogEntry>,
}

impl TreatmentLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: EntryKind, text: impl Into<String>) {
        self.entries.push(LogEntry {
            kind,
            text: text.into(),
        });
    }

    /// Up to `n` entries, most recent first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().rev().take(n)
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn count(&self, kind: EntryKind) -> u32 {
        self.entries.iter().filter(|e| e.kind == kind).count() as u32
    }

    pub fn count_where(&self, pred: impl Fn(EntryKind) -> bool) -> u32 {
        self.entries.iter().filter(|e| pred(e.kind)).count() as u32
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
