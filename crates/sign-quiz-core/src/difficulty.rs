use std::fmt;

pub const HINT_ELLIPSIS: &str = "...";

/// Difficulty tier derived from the current streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// `streak > 5` is hard, `2 < streak <= 5` is medium, anything lower is easy.
    pub fn from_streak(streak: u32) -> Self {
        if streak > 5 {
            Difficulty::Hard
        } else if streak > 2 {
            Difficulty::Medium
        } else {
            Difficulty::Easy
        }
    }

    pub fn score_increment(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    /// Number of answer characters a hint reveals.
    pub fn hint_len(self) -> usize {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 2,
            Difficulty::Hard => 1,
        }
    }

    pub fn hint(self, answer: &str) -> String {
        let prefix: String = answer.chars().take(self.hint_len()).collect();
        format!("{}{}", prefix, HINT_ELLIPSIS)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(label)
    }
}
