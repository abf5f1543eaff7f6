use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sign-quiz")]
#[command(about = "Learn sign-language gestures: see the sign, type the word", long_about = None)]
pub struct Cli {
    /// Directory with one subdirectory of images per category
    #[arg(long, global = true)]
    pub base_folder: Option<PathBuf>,

    /// Directory holding player records
    #[arg(long, global = true)]
    pub players_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start an interactive quiz session
    Play,
    /// List player records
    Players,
    /// Create an empty player record
    CreatePlayer { name: String },
    /// Delete a player record
    DeletePlayer { name: String },
    /// List categories with image counts and, for a player, mastery
    Categories {
        #[arg(long)]
        player: Option<String>,
    },
    /// Print configuration values
    PrintConfig,
}
