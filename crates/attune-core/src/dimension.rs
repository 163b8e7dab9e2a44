use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the audio features a record is matched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// Beats per minute, informally 0-300.
    Tempo,
    Danceability,
    Energy,
    Valence,
    Acousticness,
    Instrumentalness,
}

impl Dimension {
    /// Every dimension, in the order the filter evaluates them.
    pub const ALL: [Self; 6] = [
        Self::Tempo,
        Self::Danceability,
        Self::Energy,
        Self::Valence,
        Self::Acousticness,
        Self::Instrumentalness,
    ];

    /// The five dimensions conventionally valued in `[0, 1]`.
    pub const UNIT: [Self; 5] = [
        Self::Danceability,
        Self::Energy,
        Self::Valence,
        Self::Acousticness,
        Self::Instrumentalness,
    ];

    /// Column name used by the tabular record source.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Tempo => "tempo",
            Self::Danceability => "danceability",
            Self::Energy => "energy",
            Self::Valence => "valence",
            Self::Acousticness => "acousticness",
            Self::Instrumentalness => "instrumentalness",
        }
    }

    /// Look up a dimension by its column name.
    #[must_use]
    pub fn from_column(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.column() == name)
    }

    /// Whether this dimension shares the common tolerance.
    #[must_use]
    pub const fn is_unit(self) -> bool {
        !matches!(self, Self::Tempo)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}
