//! REPL (Read-Eval-Print Loop) for playing a case

use super::command::GameCommand;
use crate::ConsoleFormatter;
use crate::ProgressReporter;
use noire_application::{SessionController, SessionError};
use noire_domain::{Difficulty, Phase, Session, Suspect};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use tracing::debug;

/// How the loop should obtain its first session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartMode {
    /// Resume the saved game if there is one, otherwise generate a case
    ResumeOrNew,
    /// Always generate a fresh case
    New,
}

/// Interactive game REPL
pub struct GameRepl {
    controller: SessionController,
    progress: ProgressReporter,
    difficulty: Option<Difficulty>,
    selected: Option<String>,
}

impl GameRepl {
    pub fn new(controller: SessionController) -> Self {
        Self {
            controller,
            progress: ProgressReporter::default(),
            difficulty: None,
            selected: None,
        }
    }

    /// Set whether to show a spinner during provider calls
    pub fn with_progress(mut self, show: bool) -> Self {
        self.progress = ProgressReporter::new(show);
        self
    }

    /// Difficulty for cases generated without an explicit level
    pub fn with_difficulty(mut self, difficulty: Option<Difficulty>) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self, mode: StartMode) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = dirs::data_dir().map(|p| p.join("noire").join("history.txt"));
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();
        self.open_first_case(mode).await;

        loop {
            let readline = rl.readline(&self.prompt());

            match readline {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(line);
                    if self.handle(&mut rl, GameCommand::parse(line)).await {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    async fn open_first_case(&mut self, mode: StartMode) {
        if mode == StartMode::ResumeOrNew
            && self.controller.has_saved_game()
            && let Some(session) = self.controller.resume_saved_game()
        {
            let limit = session.question_policy().limit();
            println!(
                "Resuming your {} case ({}).",
                session.difficulty().config().label.to_lowercase(),
                session.current_phase().display_name()
            );
            Self::print_phase_screen(session, limit);
            return;
        }

        self.new_game(self.difficulty).await;
    }

    fn prompt(&self) -> String {
        let Some(session) = self.controller.game_state() else {
            return "noire> ".to_string();
        };
        match session.current_phase() {
            Phase::Intro => "case> ".to_string(),
            Phase::Investigation => match self.selected_suspect(session) {
                Some(suspect) => format!("{}> ", suspect.name),
                None => "investigate> ".to_string(),
            },
            Phase::Won | Phase::Lost => "closed> ".to_string(),
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│                    NOIRE                    │");
        println!("│         a murder mystery in questions       │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Type /help for commands.");
        println!();
    }

    fn print_help(&self) {
        println!();
        println!("Commands:");
        println!("  /case             - Show the case file");
        println!("  /begin            - Start the investigation");
        println!("  /suspects, /s     - List suspects and questions asked");
        println!("  /talk <n>, /t <n> - Turn to suspect number n");
        println!("  <text>            - Ask the current suspect a question");
        println!("  /thread           - Show your conversation with the current suspect");
        println!("  /accuse <n>       - Accuse suspect number n (final!)");
        println!("  /new [difficulty] - Start a new case (easy, medium, hard)");
        println!("  /reset            - Abandon the case and delete the saved game");
        println!("  /reload           - Reset and restart noire");
        println!("  /quit, /q         - Exit (the game is saved)");
        println!();
    }

    fn print_phase_screen(session: &Session, limit: usize) {
        match session.current_phase() {
            Phase::Intro => {
                println!("{}", ConsoleFormatter::case_file(session));
                println!("Type /begin when you are ready to question the suspects.");
            }
            Phase::Investigation => {
                println!("{}", ConsoleFormatter::suspect_list(session, limit, None));
                println!("Use /talk <n> to question a suspect, /accuse <n> to name the killer.");
            }
            Phase::Won | Phase::Lost => {
                println!(
                    "This case is closed ({}). Use /new to take another.",
                    session.current_phase().display_name()
                );
            }
        }
    }

    fn selected_suspect<'a>(&self, session: &'a Session) -> Option<&'a Suspect> {
        self.selected.as_deref().and_then(|id| session.suspect(id))
    }

    fn suspect_by_number(session: &Session, number: usize) -> Option<&Suspect> {
        number.checked_sub(1).and_then(|i| session.suspects().get(i))
    }

    /// Dispatch one command. Returns true if the loop should exit.
    async fn handle(&mut self, rl: &mut DefaultEditor, command: GameCommand) -> bool {
        debug!("Game command: {:?}", command);

        match command {
            GameCommand::Quit => {
                println!("Bye! Your case is saved.");
                return true;
            }
            GameCommand::Help => self.print_help(),
            GameCommand::Invalid(message) => println!("{}", ConsoleFormatter::notice(&message)),
            GameCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
            GameCommand::New(difficulty) => {
                self.new_game(difficulty.or(self.difficulty)).await;
            }
            GameCommand::Reset => {
                self.controller.reset_game();
                self.selected = None;
                println!("Case abandoned. Use /new to start another.");
            }
            GameCommand::Reload => {
                println!("Restarting...");
                self.selected = None;
                self.controller.reset_and_reload();
                return true;
            }
            GameCommand::Case => match self.controller.game_state() {
                Some(session) => println!("{}", ConsoleFormatter::case_file(session)),
                None => Self::print_no_game(),
            },
            GameCommand::Suspects => match self.controller.game_state() {
                Some(session) => println!(
                    "{}",
                    ConsoleFormatter::suspect_list(
                        session,
                        session.question_policy().limit(),
                        self.selected.as_deref()
                    )
                ),
                None => Self::print_no_game(),
            },
            GameCommand::Begin => match self.controller.start_investigation() {
                Ok(session) => {
                    Self::print_phase_screen(session, session.question_policy().limit())
                }
                Err(e) => Self::print_error(&e),
            },
            GameCommand::Talk(number) => self.talk(number),
            GameCommand::Thread => match self.controller.game_state() {
                Some(session) => match self.selected_suspect(session) {
                    Some(suspect) => println!(
                        "{}",
                        ConsoleFormatter::thread(suspect, session.conversation(&suspect.id))
                    ),
                    None => println!(
                        "{}",
                        ConsoleFormatter::notice("Choose a suspect first with /talk <n>.")
                    ),
                },
                None => Self::print_no_game(),
            },
            GameCommand::Ask(question) => self.ask(&question).await,
            GameCommand::Accuse(number) => self.accuse(rl, number),
        }

        false
    }

    async fn new_game(&mut self, difficulty: Option<Difficulty>) {
        self.selected = None;
        let level = difficulty.unwrap_or(self.controller.rules().default_difficulty);
        let result = {
            let _spinner = self.progress.start(format!(
                "Writing a {} case with {} suspects...",
                level.as_str(),
                level.suspect_count()
            ));
            self.controller.start_new_game(Some(level)).await.map(|_| ())
        };

        match result {
            Ok(()) => {
                if let Some(session) = self.controller.game_state() {
                    Self::print_phase_screen(session, session.question_policy().limit());
                }
            }
            Err(e) => {
                Self::print_error(&e);
                if e.is_generation_failure() {
                    println!("The case writer stumbled. No case is open; try /new again.");
                } else {
                    println!("No case is open. Try /new again.");
                }
            }
        }
    }

    fn talk(&mut self, number: usize) {
        let Some(session) = self.controller.game_state() else {
            return Self::print_no_game();
        };
        if session.current_phase() != Phase::Investigation {
            return Self::print_phase_hint(session.current_phase());
        }
        let Some(suspect) = Self::suspect_by_number(session, number) else {
            return println!(
                "{}",
                ConsoleFormatter::notice(&format!("There is no suspect number {}.", number))
            );
        };

        println!("{}", ConsoleFormatter::suspect_profile(suspect));
        if let Ok(remaining) = self.controller.remaining_questions(&suspect.id) {
            println!(
                "{}",
                ConsoleFormatter::remaining(remaining, session.question_policy().limit())
            );
        }
        self.selected = Some(suspect.id.clone());
    }

    async fn ask(&mut self, question: &str) {
        let Some(session) = self.controller.game_state() else {
            return Self::print_no_game();
        };
        if session.current_phase() != Phase::Investigation {
            return Self::print_phase_hint(session.current_phase());
        }
        let Some(suspect) = self.selected_suspect(session).cloned() else {
            return println!(
                "{}",
                ConsoleFormatter::notice("Choose a suspect first with /talk <n>.")
            );
        };

        let result = {
            let _spinner = self
                .progress
                .start(format!("{} considers the question...", suspect.name));
            self.controller
                .ask_character(&suspect.id, question)
                .await
                .map(|session| {
                    let reply =
                        ConsoleFormatter::latest_reply(&suspect, session.conversation(&suspect.id));
                    let remaining = session.remaining_questions(&suspect.id).unwrap_or(0);
                    (reply, remaining, session.question_policy().limit())
                })
        };

        match result {
            Ok((reply, remaining, limit)) => {
                println!("{}", reply);
                println!("{}", ConsoleFormatter::remaining(remaining, limit));
            }
            Err(e) if e.is_question_limit() => {
                println!(
                    "{}",
                    ConsoleFormatter::notice(&format!(
                        "{} Question someone else, or make your accusation.",
                        e
                    ))
                );
            }
            Err(e) => Self::print_error(&e),
        }
    }

    fn accuse(&mut self, rl: &mut DefaultEditor, number: usize) {
        let Some(session) = self.controller.game_state() else {
            return Self::print_no_game();
        };
        let Some(suspect) = Self::suspect_by_number(session, number) else {
            return println!(
                "{}",
                ConsoleFormatter::notice(&format!("There is no suspect number {}.", number))
            );
        };
        let (suspect_id, name) = (suspect.id.clone(), suspect.name.clone());

        let confirmed = matches!(
            rl.readline(&format!("Accuse {}? This ends the case. [y/N] ", name)),
            Ok(answer) if answer.trim().eq_ignore_ascii_case("y")
                || answer.trim().eq_ignore_ascii_case("yes")
        );
        if !confirmed {
            println!("Accusation withdrawn.");
            return;
        }

        match self.controller.make_accusation(&suspect_id) {
            Ok(verdict) => {
                println!("{}", ConsoleFormatter::verdict(&verdict));
                println!("Use /new to take another case.");
            }
            Err(e) => Self::print_error(&e),
        }
        self.selected = None;
    }

    fn print_phase_hint(phase: Phase) {
        let hint = match phase {
            Phase::Intro => "Start the investigation with /begin first.",
            _ => "This case is closed. Use /new to take another.",
        };
        println!("{}", ConsoleFormatter::notice(hint));
    }

    fn print_no_game() {
        println!(
            "{}",
            ConsoleFormatter::notice("No active game. Start one with /new.")
        );
    }

    fn print_error(error: &SessionError) {
        eprintln!("{}", ConsoleFormatter::error(&error.to_string()));
    }
}
