use crate::difficulty::Difficulty;
use crate::error::Error;
use crate::pool::{ImagePool, PoolScope, QuestionItem};
use crate::profile::PlayerProfile;
use rand::Rng;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizState {
    AwaitingAnswer,
    /// The previous answer was right and the next image is already showing.
    CorrectFeedback,
    /// The last answer was wrong. Hint, retry and skip are on offer.
    IncorrectFeedback { attempts: u32 },
    HintOffered { hint: String },
    Complete,
}

impl QuizState {
    pub fn accepts_answers(&self) -> bool {
        !matches!(self, QuizState::Complete)
    }

    fn offers_choices(&self) -> bool {
        matches!(
            self,
            QuizState::IncorrectFeedback { .. } | QuizState::HintOffered { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Correct {
        gained: u32,
        completed: bool,
    },
    Incorrect {
        attempts: u32,
        /// Attempts reached the configured threshold. Only a suggestion.
        hint_suggested: bool,
    },
}

impl SubmitOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, SubmitOutcome::Correct { .. })
    }
}

/// A single-player run over one pool.
///
/// Score, streak and category counts live on the [`PlayerProfile`] the caller
/// owns; the session only borrows it per call.
#[derive(Debug)]
pub struct QuizSession {
    pool: ImagePool,
    total_questions: usize,
    answered_questions: usize,
    current: Option<QuestionItem>,
    difficulty: Difficulty,
    attempts: u32,
    hint_used: bool,
    max_attempts: u32,
    state: QuizState,
}

impl QuizSession {
    /// A fresh quiz always starts at streak 0 and easy difficulty.
    pub fn start<R: Rng + ?Sized>(
        pool: ImagePool,
        max_attempts: u32,
        profile: &mut PlayerProfile,
        rng: &mut R,
    ) -> Result<Self, Error> {
        profile.streak = 0;
        let total_questions = pool.len();
        let mut session = Self {
            pool,
            total_questions,
            answered_questions: 0,
            current: None,
            difficulty: Difficulty::Easy,
            attempts: 0,
            hint_used: false,
            max_attempts,
            state: QuizState::AwaitingAnswer,
        };
        session.load_next(rng)?;
        info!(
            "Quiz started for {} on {} ({} images)",
            profile.name,
            session.pool.scope(),
            total_questions
        );
        Ok(session)
    }

    pub fn submit<R: Rng + ?Sized>(
        &mut self,
        profile: &mut PlayerProfile,
        text: &str,
        rng: &mut R,
    ) -> Result<SubmitOutcome, Error> {
        if !self.state.accepts_answers() {
            return Err(Error::QuizComplete);
        }
        let current = self.current.as_ref().ok_or(Error::NoActiveQuiz)?;

        if current.accepts(text) {
            let gained = self.difficulty.score_increment();
            profile.record_correct(&current.category, gained);
            self.answered_questions += 1;
            self.difficulty = Difficulty::from_streak(profile.streak);

            let completed = self.answered_questions >= self.total_questions;
            if completed {
                self.current = None;
                self.reset_question_state();
                self.state = QuizState::Complete;
                info!("Quiz on {} complete for {}", self.pool.scope(), profile.name);
            } else {
                self.load_next(rng)?;
                self.state = QuizState::CorrectFeedback;
            }
            Ok(SubmitOutcome::Correct { gained, completed })
        } else {
            profile.record_miss();
            self.attempts += 1;
            self.state = QuizState::IncorrectFeedback {
                attempts: self.attempts,
            };
            debug!("Wrong answer, attempt {}", self.attempts);
            Ok(SubmitOutcome::Incorrect {
                attempts: self.attempts,
                hint_suggested: self.attempts >= self.max_attempts,
            })
        }
    }

    /// Reveal the start of the answer. Score, streak and attempts are untouched.
    pub fn hint(&mut self) -> Result<String, Error> {
        if !self.state.offers_choices() {
            return Err(Error::ChoiceUnavailable("hint"));
        }
        let current = self.current.as_ref().ok_or(Error::NoActiveQuiz)?;
        let hint = self.difficulty.hint(&current.answer);
        self.hint_used = true;
        self.state = QuizState::HintOffered { hint: hint.clone() };
        Ok(hint)
    }

    pub fn retry(&mut self) -> Result<(), Error> {
        if !self.state.offers_choices() {
            return Err(Error::ChoiceUnavailable("retry"));
        }
        self.state = QuizState::AwaitingAnswer;
        Ok(())
    }

    /// Move on without scoring.
    pub fn skip<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), Error> {
        if !self.state.offers_choices() {
            return Err(Error::ChoiceUnavailable("skip"));
        }
        self.load_next(rng)?;
        self.state = QuizState::AwaitingAnswer;
        Ok(())
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == QuizState::Complete
    }

    pub fn scope(&self) -> &PoolScope {
        self.pool.scope()
    }

    pub fn current(&self) -> Option<&QuestionItem> {
        self.current.as_ref()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn hint_used(&self) -> bool {
        self.hint_used
    }

    pub fn hint_suggested(&self) -> bool {
        self.attempts >= self.max_attempts
    }

    pub fn total_questions(&self) -> usize {
        self.total_questions
    }

    pub fn answered_questions(&self) -> usize {
        self.answered_questions
    }

    pub fn progress_percent(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        self.answered_questions as f64 / self.total_questions as f64 * 100.0
    }

    fn load_next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), Error> {
        let item = self.pool.next(rng)?.clone();
        debug!("Next image {}/{}", item.category, item.file_name);
        self.current = Some(item);
        self.reset_question_state();
        Ok(())
    }

    fn reset_question_state(&mut self) {
        self.attempts = 0;
        self.hint_used = false;
    }
}
