mod commands;
mod confirm;
mod input;
mod logging;
mod shell;

use std::fs;
use std::io::{self, BufRead, Write};
use std::process;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands};
use confirm::prompt_confirm;
use dotenv::dotenv;
use input::Input;
use shell::TerminalShell;
use sign_quiz_core::{AppConfig, CategoryCatalog, ProfileStore, QuizEngine};
use tracing::{error, info, warn};

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let mut config = match sign_quiz_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();
    if let Some(base_folder) = &args.base_folder {
        config = config.with_base_folder(base_folder);
    }
    if let Some(players_dir) = &args.players_dir {
        config = config.with_players_dir(players_dir);
    }

    if !config.base_folder.exists() {
        warn!(
            "Category folder {} is missing, creating it",
            config.base_folder.display()
        );
        if let Err(err) = fs::create_dir_all(&config.base_folder) {
            error!("Could not create {}: {}", config.base_folder.display(), err);
        }
    }

    match args.command {
        Some(Commands::Play) => {
            if let Err(err) = run_play(config) {
                error!("Error: {:#}", err);
            }
        }
        Some(Commands::Players) => {
            if let Err(err) = run_players(&config) {
                error!("Error: {:#}", err);
            }
        }
        Some(Commands::CreatePlayer { name }) => {
            let result = ProfileStore::open(&config.players_dir).and_then(|store| store.create(&name));
            match result {
                Ok(profile) => println!("Player {} created", profile.name.green()),
                Err(err) => error!("Error creating player {}: {}", name, err),
            }
        }
        Some(Commands::DeletePlayer { name }) => {
            match prompt_confirm(&format!("Are you sure you want to delete player {}?", name)) {
                Ok(true) => {
                    let result =
                        ProfileStore::open(&config.players_dir).and_then(|store| store.delete(&name));
                    match result {
                        Ok(()) => println!("Player {} deleted", name),
                        Err(err) => error!("Error deleting player {}: {}", name, err),
                    }
                }
                Ok(false) => println!("Player {} kept", name),
                Err(err) => error!("Could not read confirmation: {}", err),
            }
        }
        Some(Commands::Categories { player }) => {
            if let Err(err) = run_categories(&config, player.as_deref()) {
                error!("Error: {:#}", err);
            }
        }
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }

    Ok(())
}

fn run_play(config: AppConfig) -> anyhow::Result<()> {
    let mut engine =
        QuizEngine::new(config, TerminalShell::new()).context("Could not open player records")?;
    engine.start();
    info!("Interactive session started");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match input::parse(engine.screen(), &line) {
            Some(Input::Quit) => break,
            Some(Input::Nav(action)) => engine.navigate(action),
            Some(Input::Submit(text)) => engine.submit(&text),
            Some(Input::Confirm { prompt, action }) => {
                if prompt_confirm(&prompt)? {
                    engine.navigate(action);
                }
            }
            None => println!("{}", input::usage(engine.screen()).yellow()),
        }
    }

    info!("Interactive session ended");
    Ok(())
}

fn run_players(config: &AppConfig) -> anyhow::Result<()> {
    let store = ProfileStore::open(&config.players_dir)?;
    let players = store.list()?;
    if players.is_empty() {
        println!("No players in {}", store.dir().display());
        return Ok(());
    }
    for name in players {
        match store.load(&name) {
            Ok(loaded) => println!(
                "{:<20} score {:>4}   high score {:>4}",
                name.bold(),
                loaded.profile.score,
                loaded.profile.high_score
            ),
            Err(err) => println!("{:<20} {}", name.bold(), err.to_string().red()),
        }
    }
    Ok(())
}

fn run_categories(config: &AppConfig, player: Option<&str>) -> anyhow::Result<()> {
    let catalog = CategoryCatalog::discover(config).with_context(|| {
        format!(
            "Could not read category folder {}",
            config.base_folder.display()
        )
    })?;
    if catalog.is_empty() {
        println!("No categories in {}", catalog.base().display());
        return Ok(());
    }

    match player {
        Some(name) => {
            let store = ProfileStore::open(&config.players_dir)?;
            let mut profile = store.load(name)?.profile;
            catalog.align_stats(&mut profile);
            for info in catalog.all_stats(&profile) {
                println!("{}", shell::mastery_row(&info));
            }
        }
        None => {
            for name in catalog.names() {
                println!("{:<20} {:>3} images", name, catalog.total_images(name)?);
            }
        }
    }
    Ok(())
}
