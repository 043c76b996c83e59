use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Board size presets for the memory game.
///
/// Serialized in lowercase to match the score API's `difficulty` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Number of grid columns for rendering the board.
    #[must_use]
    pub fn columns(self) -> u32 {
        match self {
            Difficulty::Easy | Difficulty::Medium => 4,
            Difficulty::Hard => 6,
        }
    }

    /// Number of label pairs dealt onto the board.
    #[must_use]
    pub fn pairs(self) -> u32 {
        match self {
            Difficulty::Easy => 6,
            Difficulty::Medium => 8,
            Difficulty::Hard => 12,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for parsing a difficulty from string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDifficultyError {
    raw: String,
}

impl fmt::Display for ParseDifficultyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown difficulty: {}", self.raw)
    }
}

impl std::error::Error for ParseDifficultyError {}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ParseDifficultyError { raw: other.into() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_presets() {
        assert_eq!(Difficulty::Easy.columns(), 4);
        assert_eq!(Difficulty::Easy.pairs(), 6);
        assert_eq!(Difficulty::Medium.columns(), 4);
        assert_eq!(Difficulty::Medium.pairs(), 8);
        assert_eq!(Difficulty::Hard.columns(), 6);
        assert_eq!(Difficulty::Hard.pairs(), 12);
    }

    #[test]
    fn roundtrips_through_str() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(d.as_str().parse::<Difficulty>().unwrap(), d);
        }
    }

    #[test]
    fn rejects_unknown() {
        assert!("extreme".parse::<Difficulty>().is_err());
    }
}
