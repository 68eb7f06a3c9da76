//! Output-type labels and the per-label vectors built over them.
//!
//! The label set is fixed and ordered. Declared order ([`OutputLabel::ALL`]) drives
//! serialization and argmax tie-breaking; [`OutputLabel::PRIORITY`] drives the
//! legacy primary-type derivation.


use serde::ser::{Serialize, SerializeMap, Serializer};

/// Number of output labels.
pub const LABEL_COUNT: usize = 6;

/// One of the fixed output-type labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputLabel {
    Text,
    Picture,
    Command,
    Presentation,
    SpecificFile,
    Other,
}

impl OutputLabel {
    /// Declared label order.
    pub const ALL: [OutputLabel; LABEL_COUNT] = [
        OutputLabel::Text,
        OutputLabel::Picture,
        OutputLabel::Command,
        OutputLabel::Presentation,
        OutputLabel::SpecificFile,
        OutputLabel::Other,
    ];

    /// Priority order used to pick the legacy primary type.
    pub const PRIORITY: [OutputLabel; LABEL_COUNT] = [
        OutputLabel::Command,
        OutputLabel::Picture,
        OutputLabel::Presentation,
        OutputLabel::SpecificFile,
        OutputLabel::Text,
        OutputLabel::Other,
    ];

    /// Wire name of the label.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputLabel::Text => "text",
            OutputLabel::Picture => "picture",
            OutputLabel::Command => "command",
            OutputLabel::Presentation => "presentation",
            OutputLabel::SpecificFile => "specificFile",
            OutputLabel::Other => "other",
        }
    }

    /// Position in declared order.
    pub fn index(&self) -> usize {
        match self {
            OutputLabel::Text => 0,
            OutputLabel::Picture => 1,
            OutputLabel::Command => 2,
            OutputLabel::Presentation => 3,
            OutputLabel::SpecificFile => 4,
            OutputLabel::Other => 5,
        }
    }
}

impl std::fmt::Display for OutputLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OutputLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| format!("Unknown output label: {}", s))
    }
}

/// Per-label probabilities (the score vector of one classification).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LabelScores([f32; LABEL_COUNT]);

impl LabelScores {
    pub fn new(scores: [f32; LABEL_COUNT]) -> Self {
        Self(scores)
    }

    /// Builds a vector from `(label, score)` pairs; unnamed labels score `0.0`.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (OutputLabel, f32)>,
    {
        let mut scores = [0.0f32; LABEL_COUNT];
        for (label, score) in pairs {
            scores[label.index()] = score;
        }
        Self(scores)
    }

    pub fn get(&self, label: OutputLabel) -> f32 {
        self.0[label.index()]
    }

    /// Iterates `(label, score)` in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (OutputLabel, f32)> + '_ {
        OutputLabel::ALL
            .into_iter()
            .map(move |label| (label, self.0[label.index()]))
    }

    /// Highest-scoring label; ties go to the label declared first.
    pub fn argmax(&self) -> OutputLabel {
        let mut best = OutputLabel::ALL[0];
        let mut best_score = f32::NEG_INFINITY;
        for (label, score) in self.iter() {
            if score > best_score {
                best = label;
                best_score = score;
            }
        }
        best
    }
}

/// Per-label active flags (the activation set of one classification).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LabelFlags([bool; LABEL_COUNT]);

impl LabelFlags {
    /// Flags with only `label` active.
    pub fn only(label: OutputLabel) -> Self {
        let mut flags = [false; LABEL_COUNT];
        flags[label.index()] = true;
        Self(flags)
    }

    pub fn is_active(&self, label: OutputLabel) -> bool {
        self.0[label.index()]
    }

    pub fn set(&mut self, label: OutputLabel, active: bool) {
        self.0[label.index()] = active;
    }

    pub fn any_active(&self) -> bool {
        self.0.iter().any(|&active| active)
    }

    pub fn active_count(&self) -> usize {
        self.0.iter().filter(|&&active| active).count()
    }

    /// Active labels in declared order.
    pub fn active(&self) -> impl Iterator<Item = OutputLabel> + '_ {
        OutputLabel::ALL
            .into_iter()
            .filter(move |label| self.is_active(*label))
    }
}

impl Serialize for LabelFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(LABEL_COUNT))?;
        for label in OutputLabel::ALL {
            map.serialize_entry(label.as_str(), &self.is_active(label))?;
        }
        map.end()
    }
}
