use sign_quiz_core::{NavAction, PoolScope, Screen};

/// What a typed line means on the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Nav(NavAction),
    Submit(String),
    /// Destructive action; ask before sending it.
    Confirm { prompt: String, action: NavAction },
    Quit,
}

pub fn usage(screen: &Screen) -> &'static str {
    match screen {
        Screen::Welcome { .. } => "[enter] start   q quit",
        Screen::PlayerSelect { .. } => "<number|name> select   new <name>   delete <number|name>   q quit",
        Screen::CategorySelect { .. } => {
            "<number|name> play category   all   two   reset   players   q quit"
        }
        Screen::Quiz(_) => "type the word   :hint   :retry   :skip   :back   :q quit",
        Screen::MultiplayerMenu { .. } => "<number|name> category   all   back   q quit",
        Screen::Multiplayer(_) => "type the word   :back   :q quit",
        Screen::End(_) => "[enter] main menu   players   exit   q quit",
    }
}

pub fn parse(screen: &Screen, line: &str) -> Option<Input> {
    let line = line.trim_end_matches(['\r', '\n']);
    match screen {
        Screen::Quiz(_) | Screen::Multiplayer(_) => return parse_answer(screen, line),
        _ => {}
    }

    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
        return Some(Input::Quit);
    }
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (trimmed, ""),
    };
    let word = word.to_lowercase();

    match screen {
        Screen::Welcome { .. } => match word.as_str() {
            "" | "start" => Some(Input::Nav(NavAction::Start)),
            _ => None,
        },
        Screen::PlayerSelect { players } => match word.as_str() {
            "new" if !rest.is_empty() => Some(Input::Nav(NavAction::CreatePlayer(rest.to_string()))),
            "delete" => pick(players, rest).map(|name| Input::Confirm {
                prompt: format!("Are you sure you want to delete player {}?", name),
                action: NavAction::DeletePlayer(name),
            }),
            _ => pick(players, trimmed).map(|name| Input::Nav(NavAction::SelectPlayer(name))),
        },
        Screen::CategorySelect { categories, .. } => match word.as_str() {
            "all" => Some(Input::Nav(NavAction::AllCategories)),
            "two" => Some(Input::Nav(NavAction::MultiplayerMenu)),
            "players" => Some(Input::Nav(NavAction::PlayerMenu)),
            "reset" => Some(Input::Confirm {
                prompt: "Are you sure you want to reset your progress?".to_string(),
                action: NavAction::ResetProgress,
            }),
            _ => {
                let names: Vec<String> = categories.iter().map(|c| c.name.clone()).collect();
                pick(&names, trimmed).map(|name| Input::Nav(NavAction::ChooseCategory(name)))
            }
        },
        Screen::MultiplayerMenu { categories } => match word.as_str() {
            "all" => Some(Input::Nav(NavAction::StartMultiplayer(PoolScope::All))),
            "back" => Some(Input::Nav(NavAction::Back)),
            _ => pick(categories, trimmed)
                .map(|name| Input::Nav(NavAction::StartMultiplayer(PoolScope::Category(name)))),
        },
        Screen::End(_) => match word.as_str() {
            "" | "menu" => Some(Input::Nav(NavAction::MainMenu)),
            "players" => Some(Input::Nav(NavAction::PlayerMenu)),
            "exit" => Some(Input::Nav(NavAction::Exit)),
            _ => None,
        },
        Screen::Quiz(_) | Screen::Multiplayer(_) => None,
    }
}

fn parse_answer(screen: &Screen, line: &str) -> Option<Input> {
    let command = match line.trim().strip_prefix(':') {
        Some(command) => command.trim().to_lowercase(),
        None => return Some(Input::Submit(line.to_string())),
    };
    let solo = matches!(screen, Screen::Quiz(_));
    match command.as_str() {
        "q" | "quit" => Some(Input::Quit),
        "back" => Some(Input::Nav(NavAction::Back)),
        "hint" if solo => Some(Input::Nav(NavAction::Hint)),
        "retry" if solo => Some(Input::Nav(NavAction::Retry)),
        "skip" if solo => Some(Input::Nav(NavAction::Skip)),
        _ => None,
    }
}

/// A 1-based list number or an exact (case-insensitive) name.
fn pick(names: &[String], choice: &str) -> Option<String> {
    if choice.is_empty() {
        return None;
    }
    if let Ok(number) = choice.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|i| names.get(i))
            .cloned();
    }
    names
        .iter()
        .find(|name| name.eq_ignore_ascii_case(choice))
        .cloned()
}
