pub mod catalog;
pub mod config;
pub mod difficulty;
pub mod engine;
pub mod error;
pub mod image_cache;
pub mod multiplayer;
pub mod pool;
pub mod profile;
pub mod quiz;
pub mod screen;
pub mod shell;

pub use catalog::{CategoryCatalog, CategoryInfo};
pub use config::AppConfig;
pub use difficulty::Difficulty;
pub use engine::{NavAction, QuizEngine};
pub use error::Error;
pub use multiplayer::{MultiplayerSession, Standing, TurnOutcome};
pub use pool::{ImagePool, PoolScope, QuestionItem};
pub use profile::{LoadedProfile, PlayerProfile, ProfileStore};
pub use quiz::{QuizSession, QuizState, SubmitOutcome};
pub use screen::{EndView, MultiplayerView, QuizView, Screen};
pub use shell::{Notice, NoticeLevel, Shell, SilentShell};
