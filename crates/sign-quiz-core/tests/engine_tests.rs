use std::fs;
use std::path::{Path, PathBuf};

use sign_quiz_core::screen::EndView;
use sign_quiz_core::{
    AppConfig, Error, NavAction, Notice, NoticeLevel, PoolScope, QuizEngine, QuizState, Screen,
    Shell, SilentShell, Standing,
};
use tempfile::{tempdir, TempDir};

/// Records everything the engine asks the UI to do.
#[derive(Default)]
struct RecordingShell {
    screens: Vec<Screen>,
    notices: Vec<Notice>,
    loads: Vec<PathBuf>,
    rendered_with_image: usize,
}

impl RecordingShell {
    fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }
}

impl Shell for RecordingShell {
    type Image = PathBuf;

    fn load_image(&mut self, path: &Path) -> Result<PathBuf, Error> {
        self.loads.push(path.to_path_buf());
        if path.is_file() {
            Ok(path.to_path_buf())
        } else {
            Err(Error::ImageNotFound(path.to_path_buf()))
        }
    }

    fn render(&mut self, screen: &Screen, image: Option<&PathBuf>) {
        if image.is_some() {
            self.rendered_with_image += 1;
        }
        self.screens.push(screen.clone());
    }

    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}

struct Fixture {
    _tmp: TempDir,
    players: PathBuf,
    engine: QuizEngine<RecordingShell>,
}

/// Layout:
///   Kategorier/
///     Blomster/   blomst.png
///     Farger/     rod.png bla.png
///     Tomt/
///     manedens_tegn/ hei.png
fn write_layout(tmp: &TempDir) -> AppConfig {
    let base = tmp.path().join("Kategorier");
    for dir in ["Blomster", "Farger", "Tomt", "manedens_tegn"] {
        fs::create_dir_all(base.join(dir)).unwrap();
    }
    for file in [
        "Blomster/blomst.png",
        "Farger/rod.png",
        "Farger/bla.png",
        "manedens_tegn/hei.png",
    ] {
        fs::write(base.join(file), b"img").unwrap();
    }

    AppConfig::default()
        .with_base_folder(&base)
        .with_players_dir(tmp.path().join("players"))
}

fn fixture() -> Fixture {
    let tmp = tempdir().unwrap();
    let config = write_layout(&tmp);
    let players = config.players_dir.clone();
    let mut engine = QuizEngine::new(config, RecordingShell::default())
        .unwrap()
        .with_seed(17);
    engine.start();

    Fixture {
        _tmp: tmp,
        players,
        engine,
    }
}

fn enter_as(engine: &mut QuizEngine<RecordingShell>, name: &str) {
    engine.navigate(NavAction::Start);
    engine.navigate(NavAction::CreatePlayer(name.to_string()));
}

fn current_answer(engine: &QuizEngine<RecordingShell>) -> String {
    if let Some(quiz) = engine.quiz() {
        return quiz.current().unwrap().answer.clone();
    }
    engine.multiplayer().unwrap().current().unwrap().answer.clone()
}

#[test]
fn test_welcome_lists_highlights() {
    let fx = fixture();
    assert_eq!(fx.engine.shell().screens.len(), 1);
    match fx.engine.screen() {
        Screen::Welcome { highlights } => {
            assert_eq!(highlights.len(), 1);
            assert!(highlights[0].ends_with("hei.png"));
        }
        other => panic!("unexpected screen {:?}", other),
    }
}

#[test]
fn test_correct_answer_scores_and_persists() {
    let mut fx = fixture();
    enter_as(&mut fx.engine, "Ola");
    match fx.engine.screen() {
        Screen::CategorySelect { player, categories } => {
            assert_eq!(player, "Ola");
            let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
            assert_eq!(names, vec!["Blomster", "Farger", "Tomt"]);
        }
        other => panic!("unexpected screen {:?}", other),
    }

    fx.engine
        .navigate(NavAction::ChooseCategory("Farger".to_string()));
    assert!(matches!(fx.engine.screen(), Screen::Quiz(_)));

    let typed = current_answer(&fx.engine).to_uppercase();
    fx.engine.submit(&typed);

    let profile = fx.engine.profile().unwrap();
    assert_eq!(profile.score, 1);
    assert_eq!(profile.streak, 1);
    assert_eq!(profile.correct_count("Farger"), 1);

    match fx.engine.screen() {
        Screen::Quiz(view) => {
            assert_eq!(view.state, QuizState::CorrectFeedback);
            assert_eq!(view.answered, 1);
            assert_eq!(view.total, 2);
            assert_eq!(view.progress_percent, 50.0);
        }
        other => panic!("unexpected screen {:?}", other),
    }

    let raw = fs::read_to_string(fx.players.join("Ola.json")).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(saved["score"], 1);
    assert_eq!(saved["category_stats"]["Farger"], 1);
}

#[test]
fn test_three_misses_then_hint() {
    let mut fx = fixture();
    enter_as(&mut fx.engine, "Ola");
    fx.engine
        .navigate(NavAction::ChooseCategory("Blomster".to_string()));

    for _ in 0..3 {
        fx.engine.submit("tre");
    }
    let quiz = fx.engine.quiz().unwrap();
    assert_eq!(quiz.attempts(), 3);
    match fx.engine.screen() {
        Screen::Quiz(view) => {
            assert_eq!(view.state, QuizState::IncorrectFeedback { attempts: 3 });
            assert!(view.hint_suggested);
            assert_eq!(view.score, 0);
            assert_eq!(view.streak, 0);
        }
        other => panic!("unexpected screen {:?}", other),
    }

    fx.engine.navigate(NavAction::Hint);
    match fx.engine.screen() {
        Screen::Quiz(view) => assert_eq!(
            view.state,
            QuizState::HintOffered {
                hint: "blo...".to_string()
            }
        ),
        other => panic!("unexpected screen {:?}", other),
    }
    assert_eq!(fx.engine.quiz().unwrap().attempts(), 3);
}

#[test]
fn test_image_handles_are_cached_by_path() {
    let mut fx = fixture();
    enter_as(&mut fx.engine, "Ola");
    fx.engine
        .navigate(NavAction::ChooseCategory("Blomster".to_string()));
    fx.engine.submit("feil");
    fx.engine.navigate(NavAction::Retry);

    assert_eq!(fx.engine.shell().loads.len(), 1);
    assert_eq!(fx.engine.cached_images(), 1);
    assert_eq!(fx.engine.shell().rendered_with_image, 3);
}

#[test]
fn test_creating_existing_player_is_reported() {
    let mut fx = fixture();
    enter_as(&mut fx.engine, "Ola");
    fx.engine
        .navigate(NavAction::ChooseCategory("Blomster".to_string()));
    fx.engine.submit("blomst");
    assert!(matches!(fx.engine.screen(), Screen::End(_)));

    fx.engine.navigate(NavAction::PlayerMenu);
    fx.engine.navigate(NavAction::CreatePlayer("Ola".to_string()));

    let notice = fx.engine.shell().last_notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert!(notice.message.contains("already exists"));
    assert!(matches!(fx.engine.screen(), Screen::PlayerSelect { .. }));

    let raw = fs::read_to_string(fx.players.join("Ola.json")).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(saved["category_stats"]["Blomster"], 1);
}

#[test]
fn test_completing_category_shows_end_screen() {
    let mut fx = fixture();
    enter_as(&mut fx.engine, "Ola");
    fx.engine
        .navigate(NavAction::ChooseCategory("Farger".to_string()));

    for _ in 0..2 {
        let typed = current_answer(&fx.engine);
        fx.engine.submit(&typed);
    }
    match fx.engine.screen() {
        Screen::End(EndView::Solo {
            scope,
            score,
            high_score,
        }) => {
            assert_eq!(scope, "Farger");
            assert_eq!(*score, 2);
            assert_eq!(*high_score, 2);
        }
        other => panic!("unexpected screen {:?}", other),
    }
    assert!(fx.engine.quiz().is_none());

    fx.engine.navigate(NavAction::MainMenu);
    match fx.engine.screen() {
        Screen::CategorySelect { categories, .. } => {
            let farger = categories.iter().find(|c| c.name == "Farger").unwrap();
            assert_eq!(farger.mastery_percent, 100.0);
        }
        other => panic!("unexpected screen {:?}", other),
    }
    assert_eq!(fx.engine.profile().unwrap().streak, 0);
}

#[test]
fn test_empty_category_stays_on_menu() {
    let mut fx = fixture();
    enter_as(&mut fx.engine, "Ola");
    fx.engine
        .navigate(NavAction::ChooseCategory("Tomt".to_string()));

    assert!(matches!(fx.engine.screen(), Screen::CategorySelect { .. }));
    assert!(fx.engine.quiz().is_none());
    let notice = fx.engine.shell().last_notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Warning);
}

#[test]
fn test_all_categories_pool_spans_every_category() {
    let mut fx = fixture();
    enter_as(&mut fx.engine, "Ola");
    fx.engine.navigate(NavAction::AllCategories);

    let quiz = fx.engine.quiz().unwrap();
    assert_eq!(quiz.scope(), &PoolScope::All);
    assert_eq!(quiz.total_questions(), 3);
}

#[test]
fn test_corrupt_player_is_not_selected() {
    let mut fx = fixture();
    fs::create_dir_all(&fx.players).unwrap();
    fs::write(fx.players.join("Rot.json"), "{{{").unwrap();

    fx.engine.navigate(NavAction::Start);
    fx.engine.navigate(NavAction::SelectPlayer("Rot".to_string()));

    assert!(fx.engine.profile().is_none());
    assert!(matches!(fx.engine.screen(), Screen::PlayerSelect { .. }));
    assert_eq!(
        fx.engine.shell().last_notice().unwrap().level,
        NoticeLevel::Error
    );
}

#[test]
fn test_select_player_with_missing_fields_warns() {
    let mut fx = fixture();
    fs::create_dir_all(&fx.players).unwrap();
    fs::write(fx.players.join("Gammel.json"), r#"{"score": 3, "high_score": 3}"#).unwrap();

    fx.engine.navigate(NavAction::Start);
    fx.engine
        .navigate(NavAction::SelectPlayer("Gammel".to_string()));

    assert!(matches!(fx.engine.screen(), Screen::CategorySelect { .. }));
    let notice = fx.engine.shell().last_notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert!(notice.message.contains("category_stats"));
    let profile = fx.engine.profile().unwrap();
    assert_eq!(profile.high_score, 3);
    assert_eq!(profile.category_stats.len(), 3);
}

#[test]
fn test_reset_progress_backs_up_first() {
    let mut fx = fixture();
    enter_as(&mut fx.engine, "Ola");
    fx.engine
        .navigate(NavAction::ChooseCategory("Blomster".to_string()));
    fx.engine.submit("blomst");
    fx.engine.navigate(NavAction::MainMenu);

    fx.engine.navigate(NavAction::ResetProgress);

    let profile = fx.engine.profile().unwrap();
    assert_eq!(profile.score, 0);
    assert_eq!(profile.high_score, 0);
    assert!(profile.category_stats.values().all(|&v| v == 0));

    let backup = fs::read_to_string(fx.players.join("Ola_backup.json")).unwrap();
    let backup: serde_json::Value = serde_json::from_str(&backup).unwrap();
    assert_eq!(backup["high_score"], 1);

    let saved = fs::read_to_string(fx.players.join("Ola.json")).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(saved["high_score"], 0);
}

#[test]
fn test_delete_selected_player() {
    let mut fx = fixture();
    enter_as(&mut fx.engine, "Ola");
    fx.engine.navigate(NavAction::PlayerMenu);
    fx.engine.navigate(NavAction::DeletePlayer("Ola".to_string()));

    assert!(fx.engine.profile().is_none());
    match fx.engine.screen() {
        Screen::PlayerSelect { players } => assert!(players.is_empty()),
        other => panic!("unexpected screen {:?}", other),
    }

    fx.engine.navigate(NavAction::DeletePlayer("Ola".to_string()));
    assert_eq!(
        fx.engine.shell().last_notice().unwrap().level,
        NoticeLevel::Warning
    );
}

#[test]
fn test_two_player_turns() {
    let mut fx = fixture();
    enter_as(&mut fx.engine, "Ola");
    fx.engine.navigate(NavAction::MultiplayerMenu);
    fx.engine.navigate(NavAction::StartMultiplayer(PoolScope::All));
    assert_eq!(fx.engine.multiplayer().unwrap().current_player(), 0);

    let typed = current_answer(&fx.engine);
    fx.engine.submit(&typed);
    let duel = fx.engine.multiplayer().unwrap();
    assert_eq!(duel.scores(), [1, 0]);
    assert_eq!(duel.current_player(), 1);

    fx.engine.submit("helt feil");
    let duel = fx.engine.multiplayer().unwrap();
    assert_eq!(duel.scores(), [1, 0]);
    assert_eq!(duel.current_player(), 0);

    fx.engine.submit("helt feil");
    match fx.engine.screen() {
        Screen::End(EndView::Multiplayer { scores, standing }) => {
            assert_eq!(*scores, [1, 0]);
            assert_eq!(*standing, Standing::Winner(0));
        }
        other => panic!("unexpected screen {:?}", other),
    }
    // Two-player rounds never touch the selected player's record.
    assert_eq!(fx.engine.profile().unwrap().score, 0);
}

#[test]
fn test_action_on_wrong_screen_is_ignored() {
    let mut fx = fixture();
    fx.engine.navigate(NavAction::Hint);
    fx.engine.navigate(NavAction::AllCategories);
    fx.engine.submit("rod");

    assert!(matches!(fx.engine.screen(), Screen::Welcome { .. }));
    assert_eq!(fx.engine.shell().notices.len(), 3);
    assert!(fx
        .engine
        .shell()
        .notices
        .iter()
        .all(|n| n.level == NoticeLevel::Warning));
}

#[test]
fn test_missing_image_is_reported_but_quiz_continues() {
    let mut fx = fixture();
    enter_as(&mut fx.engine, "Ola");
    fx.engine
        .navigate(NavAction::ChooseCategory("Blomster".to_string()));
    fx.engine.submit("feil");

    let image = fx.engine.catalog().unwrap().image_path("Blomster", "blomst.png");
    fs::remove_file(&image).unwrap();
    // Already cached, so no reload and no error.
    fx.engine.navigate(NavAction::Retry);
    assert!(matches!(fx.engine.screen(), Screen::Quiz(_)));
    assert!(fx
        .engine
        .shell()
        .notices
        .iter()
        .all(|n| n.level != NoticeLevel::Error));
}

#[test]
fn test_failed_save_keeps_playing() {
    let mut fx = fixture();
    enter_as(&mut fx.engine, "Ola");
    let record = fx.players.join("Ola.json");
    fs::remove_file(&record).unwrap();
    fs::create_dir(&record).unwrap();

    fx.engine
        .navigate(NavAction::ChooseCategory("Farger".to_string()));
    fx.engine.shell_mut().notices.clear();
    let typed = current_answer(&fx.engine);
    fx.engine.submit(&typed);

    let notice = fx.engine.shell().last_notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.message.starts_with("Could not save progress"));
    assert_eq!(fx.engine.profile().unwrap().score, 1);
    assert_eq!(fx.engine.profile().unwrap().category_stats["Farger"], 1);
    assert!(matches!(fx.engine.screen(), Screen::Quiz(_)));
    assert!(record.is_dir());
}

#[test]
fn test_failed_backup_is_reported_and_reset_continues() {
    let mut fx = fixture();
    enter_as(&mut fx.engine, "Ola");
    fx.engine
        .navigate(NavAction::ChooseCategory("Blomster".to_string()));
    fx.engine.submit("blomst");
    fx.engine.navigate(NavAction::MainMenu);
    fs::create_dir(fx.players.join("Ola_backup.json")).unwrap();
    fx.engine.shell_mut().notices.clear();

    fx.engine.navigate(NavAction::ResetProgress);

    let notices = &fx.engine.shell().notices;
    assert_eq!(notices.len(), 2);
    assert_eq!(notices[0].level, NoticeLevel::Warning);
    assert!(notices[0].message.starts_with("Backup before reset failed"));
    assert_eq!(notices[1].level, NoticeLevel::Info);

    let profile = fx.engine.profile().unwrap();
    assert_eq!(profile.high_score, 0);
    assert!(profile.category_stats.values().all(|&v| v == 0));
    assert!(matches!(fx.engine.screen(), Screen::CategorySelect { .. }));

    let saved = fs::read_to_string(fx.players.join("Ola.json")).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(saved["high_score"], 0);
}

#[test]
fn test_headless_session_persists_progress() {
    let tmp = tempdir().unwrap();
    let config = write_layout(&tmp);
    let mut engine = QuizEngine::new(config, SilentShell).unwrap().with_seed(3);
    engine.start();
    assert_eq!(engine.config().max_attempts, 3);

    engine.navigate(NavAction::Start);
    engine.navigate(NavAction::CreatePlayer("Kari".to_string()));
    engine.navigate(NavAction::ChooseCategory("Blomster".to_string()));
    engine.submit("Blomst ");

    assert!(matches!(engine.screen(), Screen::End(_)));
    assert!(engine.store().exists("Kari"));
    let loaded = engine.store().load("Kari").unwrap();
    assert_eq!(loaded.profile.score, 1);
    assert_eq!(loaded.profile.category_stats["Blomster"], 1);
}
