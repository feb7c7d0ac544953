//! Game loop commands

use noire_domain::Difficulty;

/// A parsed line of player input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameCommand {
    /// Show the case file
    Case,
    /// List suspects with question counters
    Suspects,
    /// Select a suspect by 1-based roster number
    Talk(usize),
    /// Free text: a question for the selected suspect
    Ask(String),
    /// Show the dialogue with the selected suspect
    Thread,
    /// Accuse a suspect by 1-based roster number
    Accuse(usize),
    /// Leave the intro and start questioning
    Begin,
    /// Generate a new case, optionally at a different difficulty
    New(Option<Difficulty>),
    Reset,
    Reload,
    Help,
    Quit,
    /// Recognized command with unusable arguments
    Invalid(String),
    Unknown(String),
}

impl GameCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(command) = line.strip_prefix('/') else {
            return GameCommand::Ask(line.to_string());
        };

        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts.next();

        match name.as_str() {
            "case" => GameCommand::Case,
            "suspects" | "s" => GameCommand::Suspects,
            "talk" | "t" => Self::numbered(arg, "talk", GameCommand::Talk),
            "thread" => GameCommand::Thread,
            "accuse" => Self::numbered(arg, "accuse", GameCommand::Accuse),
            "begin" => GameCommand::Begin,
            "new" => match arg.map(str::parse::<Difficulty>) {
                None => GameCommand::New(None),
                Some(Ok(difficulty)) => GameCommand::New(Some(difficulty)),
                Some(Err(e)) => GameCommand::Invalid(e.to_string()),
            },
            "reset" => GameCommand::Reset,
            "reload" => GameCommand::Reload,
            "help" | "h" | "?" => GameCommand::Help,
            "quit" | "exit" | "q" => GameCommand::Quit,
            _ => GameCommand::Unknown(line.to_string()),
        }
    }

    fn numbered(arg: Option<&str>, name: &str, build: fn(usize) -> GameCommand) -> GameCommand {
        match arg.and_then(|a| a.parse::<usize>().ok()) {
            Some(n) if n >= 1 => build(n),
            _ => GameCommand::Invalid(format!("Usage: /{} <suspect number>", name)),
        }
    }
}
