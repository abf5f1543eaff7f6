use crate::catalog::CategoryInfo;
use crate::difficulty::Difficulty;
use crate::multiplayer::{Standing, TurnOutcome, PLAYER_COUNT};
use crate::quiz::{QuizSession, QuizState};
use crate::profile::PlayerProfile;
use std::path::PathBuf;

/// Everything the UI shell needs to draw one screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Welcome {
        highlights: Vec<PathBuf>,
    },
    PlayerSelect {
        players: Vec<String>,
    },
    CategorySelect {
        player: String,
        categories: Vec<CategoryInfo>,
    },
    Quiz(QuizView),
    MultiplayerMenu {
        categories: Vec<String>,
    },
    Multiplayer(MultiplayerView),
    End(EndView),
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Welcome { .. } => "welcome",
            Screen::PlayerSelect { .. } => "player select",
            Screen::CategorySelect { .. } => "category select",
            Screen::Quiz(_) => "quiz",
            Screen::MultiplayerMenu { .. } => "two-player menu",
            Screen::Multiplayer(_) => "two-player quiz",
            Screen::End(_) => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizView {
    pub scope: String,
    pub image: PathBuf,
    pub image_category: String,
    pub state: QuizState,
    pub score: u32,
    pub streak: u32,
    pub high_score: u32,
    pub difficulty: Difficulty,
    pub attempts: u32,
    pub hint_suggested: bool,
    pub answered: usize,
    pub total: usize,
    pub progress_percent: f64,
}

impl QuizView {
    pub fn new(session: &QuizSession, profile: &PlayerProfile, image: PathBuf) -> Self {
        let image_category = session
            .current()
            .map(|item| item.category.clone())
            .unwrap_or_default();
        Self {
            scope: session.scope().to_string(),
            image,
            image_category,
            state: session.state().clone(),
            score: profile.score,
            streak: profile.streak,
            high_score: profile.high_score,
            difficulty: session.difficulty(),
            attempts: session.attempts(),
            hint_suggested: session.hint_suggested(),
            answered: session.answered_questions(),
            total: session.total_questions(),
            progress_percent: session.progress_percent(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiplayerView {
    pub scope: String,
    pub image: PathBuf,
    pub current_player: usize,
    pub scores: [u32; PLAYER_COUNT],
    pub last_turn: Option<TurnOutcome>,
    pub turns: usize,
    pub total_turns: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EndView {
    Solo {
        scope: String,
        score: u32,
        high_score: u32,
    },
    Multiplayer {
        scores: [u32; PLAYER_COUNT],
        standing: Standing,
    },
}
