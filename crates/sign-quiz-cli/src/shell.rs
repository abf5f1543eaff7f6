use colored::*;
use sign_quiz_core::{
    CategoryInfo, EndView, Error, MultiplayerView, Notice, NoticeLevel, QuizState, QuizView,
    Screen, Shell, Standing,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A terminal cannot show the picture itself, so the handle records where it is
/// and how big it is. Loading fails the same way a real image decoder would.
#[derive(Debug, Clone)]
pub struct TerminalImage {
    pub path: PathBuf,
    pub bytes: u64,
}

/// Colored text shell for the interactive `play` command.
pub struct TerminalShell {
    rendered: usize,
}

impl TerminalShell {
    pub fn new() -> Self {
        Self { rendered: 0 }
    }
}

impl Shell for TerminalShell {
    type Image = TerminalImage;

    fn load_image(&mut self, path: &Path) -> Result<TerminalImage, Error> {
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() => Ok(TerminalImage {
                path: path.to_path_buf(),
                bytes: meta.len(),
            }),
            Ok(_) => Err(Error::ImageNotFound(path.to_path_buf())),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(Error::ImageNotFound(path.to_path_buf()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn render(&mut self, screen: &Screen, image: Option<&TerminalImage>) {
        if self.rendered > 0 {
            println!();
        }
        self.rendered += 1;
        println!("{}", format!("== {} ==", screen.title()).bold());

        match screen {
            Screen::Welcome { highlights } => {
                println!("{}", "Welcome to the sign quiz!".bold().cyan());
                if !highlights.is_empty() {
                    println!("Signs of the month:");
                    for path in highlights {
                        println!("  {}", display_name(path).yellow());
                    }
                }
            }
            Screen::PlayerSelect { players } => {
                if players.is_empty() {
                    println!("No players yet.");
                }
                for (i, name) in players.iter().enumerate() {
                    println!("  {:>2}. {}", i + 1, name);
                }
            }
            Screen::CategorySelect { player, categories } => {
                println!("Player: {}", player.bold());
                for (i, info) in categories.iter().enumerate() {
                    println!("  {:>2}. {}", i + 1, category_line(info));
                }
            }
            Screen::Quiz(view) => render_quiz(view, image),
            Screen::MultiplayerMenu { categories } => {
                println!("Two players take turns. Pick a category:");
                for (i, name) in categories.iter().enumerate() {
                    println!("  {:>2}. {}", i + 1, name);
                }
            }
            Screen::Multiplayer(view) => render_multiplayer(view, image),
            Screen::End(view) => render_end(view),
        }

        println!("{}", crate::input::usage(screen).dimmed());
    }

    fn notify(&mut self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Info => println!("{}", notice.message.green()),
            NoticeLevel::Warning => println!("{} {}", "warning:".yellow().bold(), notice.message),
            NoticeLevel::Error => println!("{} {}", "error:".red().bold(), notice.message),
        }
    }
}

fn render_quiz(view: &QuizView, image: Option<&TerminalImage>) {
    println!(
        "{} | score {} | streak {} | best {} | {}",
        view.scope.bold(),
        view.score.to_string().green(),
        view.streak,
        view.high_score,
        view.difficulty
    );
    println!(
        "Progress: {}/{} ({:.0}%)",
        view.answered, view.total, view.progress_percent
    );
    match &view.state {
        QuizState::CorrectFeedback => println!("{}", "Correct!".green().bold()),
        QuizState::IncorrectFeedback { attempts } => {
            println!("{} (attempt {})", "Wrong, try again.".red(), attempts);
            if view.hint_suggested {
                println!("{}", "Stuck? Type :hint for a hint.".yellow());
            }
        }
        QuizState::HintOffered { hint } => println!("Hint: {}", hint.yellow().bold()),
        QuizState::AwaitingAnswer | QuizState::Complete => {}
    }
    print_image(&view.image, image);
}

fn render_multiplayer(view: &MultiplayerView, image: Option<&TerminalImage>) {
    println!(
        "{} | turn {}/{} | Player 1: {} | Player 2: {}",
        view.scope.bold(),
        view.turns + 1,
        view.total_turns,
        view.scores[0],
        view.scores[1]
    );
    if let Some(turn) = &view.last_turn {
        if turn.correct {
            println!("{}", format!("Player {} was right!", turn.player + 1).green());
        } else {
            println!(
                "{}",
                format!("Player {} missed. It was: {}", turn.player + 1, turn.answer).red()
            );
        }
    }
    println!("{}", format!("Player {}'s turn", view.current_player + 1).bold());
    print_image(&view.image, image);
}

fn render_end(view: &EndView) {
    match view {
        EndView::Solo {
            scope,
            score,
            high_score,
        } => {
            println!("{}", format!("You finished {}!", scope).bold().green());
            println!("Score: {}   High score: {}", score, high_score);
        }
        EndView::Multiplayer { scores, standing } => {
            println!("Player 1: {}   Player 2: {}", scores[0], scores[1]);
            match standing {
                Standing::Winner(player) => println!(
                    "{}",
                    format!("Player {} wins!", player + 1).bold().green()
                ),
                Standing::Tie => println!("{}", "It's a tie!".bold().yellow()),
            }
        }
    }
}

/// Name, counts and mastery. Counts can pass the image total after repeated
/// cycles; the percentage shown stops at 100.
pub fn mastery_row(info: &CategoryInfo) -> String {
    format!(
        "{:<20} {:>3}/{:<3} {:>5.1}%",
        info.name,
        info.correct_count,
        info.total_images,
        info.mastery_percent.min(100.0)
    )
}

fn category_line(info: &CategoryInfo) -> String {
    let line = mastery_row(info);
    match hex_to_rgb(info.color()) {
        Some((r, g, b)) => line.truecolor(r, g, b).to_string(),
        None => line,
    }
}

fn print_image(path: &Path, image: Option<&TerminalImage>) {
    match image {
        Some(image) => println!(
            "[sign: {} ({} bytes)]",
            image.path.display().to_string().cyan(),
            image.bytes
        ),
        None => println!("[sign unavailable: {}]", path.display().to_string().red()),
    }
}

fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#FFB3BA"), Some((255, 179, 186)));
        assert_eq!(hex_to_rgb("FFB3BA"), None);
        assert_eq!(hex_to_rgb("#FFF"), None);
    }

    #[test]
    fn test_mastery_row_caps_at_hundred() {
        let info = CategoryInfo {
            name: "Farger".to_string(),
            total_images: 2,
            correct_count: 5,
            mastery_percent: 250.0,
            color_index: 1,
        };
        let row = mastery_row(&info);
        assert!(row.contains("5/2"));
        assert!(row.ends_with("100.0%"));

        let half = CategoryInfo {
            correct_count: 1,
            mastery_percent: 50.0,
            ..info
        };
        assert!(mastery_row(&half).ends_with(" 50.0%"));
    }

    #[test]
    fn test_load_image_reports_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hund.png");
        let mut shell = TerminalShell::new();

        assert!(matches!(
            shell.load_image(&path),
            Err(Error::ImageNotFound(p)) if p == path
        ));

        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"png").unwrap();
        let image = shell.load_image(&path).unwrap();
        assert_eq!(image.bytes, 3);
    }
}
