use crate::catalog::CategoryCatalog;
use crate::config::AppConfig;
use crate::error::Error;
use crate::image_cache::ImageCache;
use crate::multiplayer::{MultiplayerSession, TurnOutcome};
use crate::pool::{ImagePool, PoolScope, QuestionItem};
use crate::profile::{PlayerProfile, ProfileStore};
use crate::quiz::QuizSession;
use crate::screen::{EndView, MultiplayerView, QuizView, Screen};
use crate::shell::{Notice, Shell};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Navigation requests coming from the UI shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    Start,
    SelectPlayer(String),
    CreatePlayer(String),
    DeletePlayer(String),
    ChooseCategory(String),
    AllCategories,
    ResetProgress,
    PlayerMenu,
    MultiplayerMenu,
    StartMultiplayer(PoolScope),
    Hint,
    Retry,
    Skip,
    Back,
    MainMenu,
    Exit,
}

impl NavAction {
    pub fn name(&self) -> &'static str {
        match self {
            NavAction::Start => "start",
            NavAction::SelectPlayer(_) => "select player",
            NavAction::CreatePlayer(_) => "create player",
            NavAction::DeletePlayer(_) => "delete player",
            NavAction::ChooseCategory(_) => "choose category",
            NavAction::AllCategories => "all categories",
            NavAction::ResetProgress => "reset progress",
            NavAction::PlayerMenu => "player menu",
            NavAction::MultiplayerMenu => "two-player menu",
            NavAction::StartMultiplayer(_) => "start two-player quiz",
            NavAction::Hint => "hint",
            NavAction::Retry => "retry",
            NavAction::Skip => "skip",
            NavAction::Back => "back",
            NavAction::MainMenu => "main menu",
            NavAction::Exit => "exit",
        }
    }
}

enum Run {
    Solo(QuizSession),
    Multiplayer {
        session: MultiplayerSession,
        last_turn: Option<TurnOutcome>,
    },
}

/// Application context: owns the selected player, the active run and the shell.
///
/// Every input is handled to completion before returning. Failures never escape;
/// they are logged and handed to the shell as notices, leaving prior state intact.
pub struct QuizEngine<S: Shell> {
    config: AppConfig,
    store: ProfileStore,
    catalog: Option<CategoryCatalog>,
    profile: Option<PlayerProfile>,
    run: Option<Run>,
    screen: Screen,
    images: ImageCache<S::Image>,
    shell: S,
    rng: StdRng,
}

impl<S: Shell> QuizEngine<S> {
    pub fn new(config: AppConfig, shell: S) -> Result<Self, Error> {
        let store = ProfileStore::open(&config.players_dir)?;
        Ok(Self {
            config,
            store,
            catalog: None,
            profile: None,
            run: None,
            screen: Screen::Welcome {
                highlights: Vec::new(),
            },
            images: ImageCache::new(),
            shell,
            rng: StdRng::from_entropy(),
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Discover categories and draw the welcome screen.
    pub fn start(&mut self) {
        if let Err(err) = self.reload_catalog() {
            self.report(err);
        }
        self.show_welcome();
    }

    pub fn navigate(&mut self, action: NavAction) {
        let name = action.name();
        if let Err(err) = self.try_navigate(action) {
            warn!("Action '{}' failed on {} screen", name, self.screen.title());
            self.report(err);
        }
    }

    pub fn submit(&mut self, text: &str) {
        if let Err(err) = self.try_submit(text) {
            self.report(err);
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    pub fn catalog(&self) -> Option<&CategoryCatalog> {
        self.catalog.as_ref()
    }

    pub fn profile(&self) -> Option<&PlayerProfile> {
        self.profile.as_ref()
    }

    pub fn quiz(&self) -> Option<&QuizSession> {
        match &self.run {
            Some(Run::Solo(session)) => Some(session),
            _ => None,
        }
    }

    pub fn multiplayer(&self) -> Option<&MultiplayerSession> {
        match &self.run {
            Some(Run::Multiplayer { session, .. }) => Some(session),
            _ => None,
        }
    }

    pub fn cached_images(&self) -> usize {
        self.images.len()
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut S {
        &mut self.shell
    }

    fn try_navigate(&mut self, action: NavAction) -> Result<(), Error> {
        let name = action.name();
        match action {
            NavAction::Start => {
                self.require(matches!(self.screen, Screen::Welcome { .. }), name)?;
                self.show_player_select()
            }
            NavAction::PlayerMenu => {
                self.require(
                    matches!(
                        self.screen,
                        Screen::CategorySelect { .. } | Screen::End(_)
                    ),
                    name,
                )?;
                self.run = None;
                self.show_player_select()
            }
            NavAction::SelectPlayer(player) => {
                self.require(matches!(self.screen, Screen::PlayerSelect { .. }), name)?;
                self.select_player(&player)
            }
            NavAction::CreatePlayer(player) => {
                self.require(matches!(self.screen, Screen::PlayerSelect { .. }), name)?;
                self.create_player(&player)
            }
            NavAction::DeletePlayer(player) => {
                self.require(matches!(self.screen, Screen::PlayerSelect { .. }), name)?;
                self.delete_player(&player)
            }
            NavAction::ChooseCategory(category) => {
                self.require(matches!(self.screen, Screen::CategorySelect { .. }), name)?;
                self.start_solo(PoolScope::Category(category))
            }
            NavAction::AllCategories => {
                self.require(matches!(self.screen, Screen::CategorySelect { .. }), name)?;
                self.start_solo(PoolScope::All)
            }
            NavAction::ResetProgress => {
                self.require(matches!(self.screen, Screen::CategorySelect { .. }), name)?;
                self.reset_progress()
            }
            NavAction::MultiplayerMenu => {
                self.require(matches!(self.screen, Screen::CategorySelect { .. }), name)?;
                let catalog = self.catalog.as_ref().ok_or(Error::ChoiceUnavailable(name))?;
                let categories = catalog.names().map(str::to_string).collect();
                self.show(Screen::MultiplayerMenu { categories });
                Ok(())
            }
            NavAction::StartMultiplayer(scope) => {
                self.require(matches!(self.screen, Screen::MultiplayerMenu { .. }), name)?;
                self.start_multiplayer(scope)
            }
            NavAction::Hint => {
                match self.run.as_mut() {
                    Some(Run::Solo(session)) => session.hint()?,
                    _ => return Err(Error::ChoiceUnavailable(name)),
                };
                self.render_run()
            }
            NavAction::Retry => {
                match self.run.as_mut() {
                    Some(Run::Solo(session)) => session.retry()?,
                    _ => return Err(Error::ChoiceUnavailable(name)),
                }
                self.render_run()
            }
            NavAction::Skip => {
                match self.run.as_mut() {
                    Some(Run::Solo(session)) => session.skip(&mut self.rng)?,
                    _ => return Err(Error::ChoiceUnavailable(name)),
                }
                self.render_run()
            }
            NavAction::Back => {
                self.require(
                    self.run.is_some() || matches!(self.screen, Screen::MultiplayerMenu { .. }),
                    name,
                )?;
                self.run = None;
                self.show_category_select()
            }
            NavAction::MainMenu => {
                self.require(matches!(self.screen, Screen::End(_)), name)?;
                self.show_category_select()
            }
            NavAction::Exit => {
                self.run = None;
                self.show_welcome();
                Ok(())
            }
        }
    }

    fn try_submit(&mut self, text: &str) -> Result<(), Error> {
        let persist = match self.run.as_mut() {
            Some(Run::Solo(session)) => {
                let profile = self.profile.as_mut().ok_or(Error::NoActiveQuiz)?;
                session.submit(profile, text, &mut self.rng)?.is_correct()
            }
            Some(Run::Multiplayer { session, last_turn }) => {
                *last_turn = Some(session.submit(text, &mut self.rng)?);
                false
            }
            None => return Err(Error::NoActiveQuiz),
        };
        if persist {
            self.persist_profile();
        }
        self.render_run()
    }

    fn require(&self, allowed: bool, action: &'static str) -> Result<(), Error> {
        if allowed {
            Ok(())
        } else {
            Err(Error::ChoiceUnavailable(action))
        }
    }

    fn reload_catalog(&mut self) -> Result<&CategoryCatalog, Error> {
        let catalog = CategoryCatalog::discover(&self.config)?;
        Ok(self.catalog.insert(catalog))
    }

    fn select_player(&mut self, name: &str) -> Result<(), Error> {
        let loaded = self.store.load(name)?;
        let mut profile = loaded.profile;
        self.reload_catalog()?.align_stats(&mut profile);

        if !loaded.missing.is_empty() {
            self.shell.notify(&Notice::warning(format!(
                "Missing data in player record: {}",
                loaded.missing.join(", ")
            )));
        }
        info!("Selected player {}", profile.name);
        self.profile = Some(profile);
        self.show_category_select()
    }

    fn create_player(&mut self, name: &str) -> Result<(), Error> {
        self.reload_catalog()?;
        let mut profile = self.store.create(name)?;
        if let Some(catalog) = &self.catalog {
            catalog.align_stats(&mut profile);
        }
        self.shell
            .notify(&Notice::info(format!("Player {} created", profile.name)));
        self.profile = Some(profile);
        self.persist_profile();
        self.show_category_select()
    }

    fn delete_player(&mut self, name: &str) -> Result<(), Error> {
        self.store.delete(name)?;
        if self.profile.as_ref().is_some_and(|p| p.name == name.trim()) {
            self.profile = None;
        }
        self.shell
            .notify(&Notice::info(format!("Player {} deleted", name.trim())));
        self.show_player_select()
    }

    /// Backup first, best effort. A failed backup is reported but never blocks the reset.
    fn reset_progress(&mut self) -> Result<(), Error> {
        let profile = self
            .profile
            .as_mut()
            .ok_or(Error::ChoiceUnavailable("reset progress"))?;
        if let Err(err) = self.store.backup(&profile.name) {
            warn!("Backup before reset failed for {}: {}", profile.name, err);
            self.shell
                .notify(&Notice::warning(format!("Backup before reset failed: {}", err)));
        }
        match &self.catalog {
            Some(catalog) => profile.reset(catalog.names()),
            None => profile.reset(std::iter::empty()),
        }
        info!("Progress reset for {}", profile.name);
        let message = format!("Progress for {} has been reset", profile.name);

        self.persist_profile();
        self.shell.notify(&Notice::info(message));
        self.show_category_select()
    }

    fn start_solo(&mut self, scope: PoolScope) -> Result<(), Error> {
        let catalog = self.catalog.as_ref().ok_or(Error::NoActiveQuiz)?;
        let profile = self.profile.as_mut().ok_or(Error::NoActiveQuiz)?;
        let pool = ImagePool::build(scope, catalog, &mut self.rng)?;
        let session = QuizSession::start(pool, self.config.max_attempts, profile, &mut self.rng)?;
        self.run = Some(Run::Solo(session));
        self.render_run()
    }

    fn start_multiplayer(&mut self, scope: PoolScope) -> Result<(), Error> {
        let catalog = self.catalog.as_ref().ok_or(Error::NoActiveQuiz)?;
        let pool = ImagePool::build(scope, catalog, &mut self.rng)?;
        let session = MultiplayerSession::start(pool, &mut self.rng)?;
        self.run = Some(Run::Multiplayer {
            session,
            last_turn: None,
        });
        self.render_run()
    }

    /// An unpersisted profile stays in memory; play continues.
    fn persist_profile(&mut self) {
        if let Some(profile) = &self.profile {
            if let Err(err) = self.store.save(profile) {
                error!("Error saving progress for {}: {}", profile.name, err);
                self.shell.notify(&Notice::error(format!(
                    "Could not save progress: {}",
                    err
                )));
            }
        }
    }

    fn render_run(&mut self) -> Result<(), Error> {
        let screen = match &self.run {
            Some(Run::Solo(session)) => {
                let profile = self.profile.as_ref().ok_or(Error::NoActiveQuiz)?;
                match session.current() {
                    Some(item) => Screen::Quiz(QuizView::new(session, profile, self.image_path(item))),
                    None => Screen::End(EndView::Solo {
                        scope: session.scope().to_string(),
                        score: profile.score,
                        high_score: profile.high_score,
                    }),
                }
            }
            Some(Run::Multiplayer { session, last_turn }) => match session.current() {
                Some(item) => Screen::Multiplayer(MultiplayerView {
                    scope: session.scope().to_string(),
                    image: self.image_path(item),
                    current_player: session.current_player(),
                    scores: session.scores(),
                    last_turn: last_turn.clone(),
                    turns: session.turns(),
                    total_turns: session.total_turns(),
                }),
                None => Screen::End(EndView::Multiplayer {
                    scores: session.scores(),
                    standing: session.standing(),
                }),
            },
            None => return Err(Error::NoActiveQuiz),
        };

        if matches!(screen, Screen::End(_)) {
            self.run = None;
        }
        self.show(screen);
        Ok(())
    }

    fn image_path(&self, item: &QuestionItem) -> PathBuf {
        match &self.catalog {
            Some(catalog) => catalog.image_path(&item.category, &item.file_name),
            None => self
                .config
                .base_folder
                .join(&item.category)
                .join(&item.file_name),
        }
    }

    fn show_welcome(&mut self) {
        let highlights = self
            .catalog
            .as_ref()
            .map(|catalog| catalog.highlights(self.config.highlights_count))
            .unwrap_or_default();
        self.show(Screen::Welcome { highlights });
    }

    fn show_player_select(&mut self) -> Result<(), Error> {
        let players = self.store.list()?.into_iter().collect();
        self.show(Screen::PlayerSelect { players });
        Ok(())
    }

    /// Entering the category menu always clears the streak.
    fn show_category_select(&mut self) -> Result<(), Error> {
        let catalog = self
            .catalog
            .as_ref()
            .ok_or(Error::ChoiceUnavailable("category select"))?;
        let profile = self
            .profile
            .as_mut()
            .ok_or(Error::ChoiceUnavailable("category select"))?;
        profile.streak = 0;
        let screen = Screen::CategorySelect {
            player: profile.name.clone(),
            categories: catalog.all_stats(profile),
        };
        self.show(screen);
        Ok(())
    }

    fn show(&mut self, screen: Screen) {
        let image_path = match &screen {
            Screen::Quiz(view) => Some(view.image.clone()),
            Screen::Multiplayer(view) => Some(view.image.clone()),
            _ => None,
        };
        self.screen = screen;

        let shell = &mut self.shell;
        let image = match image_path {
            Some(path) => match self.images.get_or_load(&path, |p| shell.load_image(p)) {
                Ok(handle) => Some(handle),
                Err(err) => {
                    warn!("Could not load image {}: {}", path.display(), err);
                    shell.notify(&Notice::error(err.to_string()));
                    None
                }
            },
            None => None,
        };
        shell.render(&self.screen, image);
    }

    fn report(&mut self, err: Error) {
        let notice = match &err {
            Error::Io(_) | Error::Json(_) | Error::Config(_) | Error::CorruptProfile { .. } => {
                error!("{}", err);
                Notice::error(err.to_string())
            }
            _ => {
                warn!("{}", err);
                Notice::warning(err.to_string())
            }
        };
        self.shell.notify(&notice);
    }
}
