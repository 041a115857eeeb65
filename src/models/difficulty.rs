use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FoodChiefError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Facile,
    Moyen,
    Difficile,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Facile, Difficulty::Moyen, Difficulty::Difficile];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Facile => "Facile",
            Difficulty::Moyen => "Moyen",
            Difficulty::Difficile => "Difficile",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = FoodChiefError;

    /// Case-insensitive, so `facile` on the command line works too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| FoodChiefError::InvalidDifficulty(s.to_string()))
    }
}
