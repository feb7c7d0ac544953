//! Console output formatter for game screens

use colored::Colorize;
use noire_application::Verdict;
use noire_domain::{ConversationThread, Phase, Session, Speaker, Suspect};

/// Formats sessions, dialogue and verdicts for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// The case file shown in the intro phase
    pub fn case_file(session: &Session) -> String {
        let case = session.case();
        let mut output = String::new();

        output.push_str(&Self::header("Case File"));
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n",
            "Difficulty:".cyan().bold(),
            session.difficulty().config().label
        ));
        output.push_str(&format!("{} {}\n", "Setting:".cyan().bold(), case.setting));
        output.push_str(&format!("{} {}\n", "Victim:".cyan().bold(), case.victim));
        output.push_str(&format!(
            "{} {}\n",
            "Weapon:".cyan().bold(),
            case.murder_weapon
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Location:".cyan().bold(),
            case.murder_location
        ));
        output.push_str(&format!("{} {}\n", "Time:".cyan().bold(), case.murder_time));
        if let Some(belongings) = &case.belongings {
            output.push_str(&format!("{} {}\n", "Belongings:".cyan().bold(), belongings));
        }

        output.push_str(&Self::section_header("Background"));
        output.push_str(&case.backstory);
        output.push('\n');

        output.push_str(&Self::section_header(&format!(
            "Suspects ({})",
            session.suspects().len()
        )));
        for (index, suspect) in session.suspects().iter().enumerate() {
            output.push_str(&format!(
                "  {}. {} ({}, {})\n     {}\n",
                index + 1,
                suspect.name.bold(),
                suspect.age,
                suspect.occupation,
                suspect.description.dimmed()
            ));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Numbered roster with per-suspect question counters
    pub fn suspect_list(session: &Session, question_limit: usize, selected: Option<&str>) -> String {
        let mut output = String::new();
        output.push_str(&Self::section_header("Suspects"));

        for (index, suspect) in session.suspects().iter().enumerate() {
            let asked = session
                .conversation(&suspect.id)
                .map_or(0, |t| t.player_question_count());
            let counter = format!("{}/{}", asked, question_limit);
            let counter = if asked >= question_limit {
                counter.red()
            } else {
                counter.dimmed()
            };
            let marker = if selected == Some(suspect.id.as_str()) {
                ">".green().bold().to_string()
            } else {
                " ".to_string()
            };

            output.push_str(&format!(
                "{} {}. {} - {} [{}]\n",
                marker,
                index + 1,
                suspect.name.bold(),
                suspect.occupation,
                counter
            ));
        }

        output
    }

    /// Profile shown when the player turns to a suspect
    pub fn suspect_profile(suspect: &Suspect) -> String {
        let mut output = format!(
            "{}\n{} {}, {}\n{} {}\n",
            format!("── {} ──", suspect.name).yellow().bold(),
            "Age/occupation:".cyan(),
            suspect.age,
            suspect.occupation,
            "Alibi:".cyan(),
            suspect.alibi
        );
        if !suspect.connections.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                "Knows:".cyan(),
                suspect.connections.join(", ")
            ));
        }
        output
    }

    /// Full dialogue with one suspect
    pub fn thread(suspect: &Suspect, thread: Option<&ConversationThread>) -> String {
        let Some(thread) = thread.filter(|t| !t.is_empty()) else {
            return format!("{}\n", format!("You have not spoken to {} yet.", suspect.name).dimmed());
        };

        let mut output = Self::section_header(&format!("Conversation with {}", suspect.name));
        for message in thread.messages() {
            let line = match message.speaker {
                Speaker::Player => format!("{} {}", "You:".green().bold(), message.content),
                Speaker::Character => Self::character_line(&suspect.name, &message.content),
            };
            output.push_str(&line);
            output.push('\n');
        }
        output
    }

    /// The latest reply in a thread
    pub fn latest_reply(suspect: &Suspect, thread: Option<&ConversationThread>) -> String {
        thread
            .and_then(|t| t.messages().last())
            .filter(|m| !m.is_from_player())
            .map(|m| Self::character_line(&suspect.name, &m.content))
            .unwrap_or_default()
    }

    /// Counter shown after each answer
    pub fn remaining(remaining: usize, limit: usize) -> String {
        let text = format!("({} of {} questions left)", remaining, limit);
        if remaining == 0 {
            text.red().to_string()
        } else {
            text.dimmed().to_string()
        }
    }

    /// Result screen after an accusation
    pub fn verdict(verdict: &Verdict<'_>) -> String {
        let summary = verdict.session.summary();
        let mut output = String::new();

        let title = match summary.outcome {
            Phase::Won => "Case Solved".green().bold(),
            _ => "Case Closed, Killer Free".red().bold(),
        };
        output.push_str(&format!("\n{}\n", title));

        if verdict.correct {
            output.push_str("You named the killer. Justice is served.\n");
        } else {
            output.push_str("You accused the wrong person.\n");
        }

        if let Some(killer) = summary.killer {
            output.push_str(&format!(
                "{} {} ({})\n",
                "The killer was".cyan(),
                killer.name.bold(),
                killer.occupation
            ));
        }

        output.push_str(&format!(
            "\n{} {} questions to {} suspects; {} answers were lies.\n",
            "Investigation:".cyan().bold(),
            summary.questions_asked,
            summary.suspects_questioned,
            summary.lies_told
        ));
        output
    }

    /// Inline, non-fatal notice (for example the question cap)
    pub fn notice(message: &str) -> String {
        format!("{} {}", "!".yellow().bold(), message.yellow())
    }

    pub fn error(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }

    fn character_line(name: &str, content: &str) -> String {
        format!("{} {}", format!("{}:", name).yellow().bold(), content)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noire_domain::{CaseFile, Difficulty, Question};

    fn session() -> Session {
        colored::control::set_override(false);
        let characters = ["Ada", "Basil", "Cora"]
            .iter()
            .enumerate()
            .map(|(i, name)| Suspect {
                id: format!("s{}", i),
                name: name.to_string(),
                age: 40 + i as u32,
                occupation: "Guest".to_string(),
                description: "Quiet".to_string(),
                backstory: String::new(),
                alibi: "Dining room".to_string(),
                connections: vec![],
                is_killer: i == 1,
            })
            .collect();
        let case = CaseFile {
            setting: "Country manor, 1928".to_string(),
            victim: "Lord Pell".to_string(),
            murder_weapon: "Poker".to_string(),
            murder_location: "Study".to_string(),
            murder_time: "Midnight".to_string(),
            backstory: "A storm kept everyone inside.".to_string(),
            belongings: None,
            characters,
        };
        Session::new("t", Difficulty::Easy, case)
    }

    #[test]
    fn test_case_file_lists_suspects() {
        let output = ConsoleFormatter::case_file(&session());
        assert!(output.contains("Setting: Country manor, 1928"));
        assert!(output.contains("Suspects (3)"));
        assert!(output.contains("2. Basil (41, Guest)"));
        assert!(!output.contains("Belongings"));
    }

    #[test]
    fn test_suspect_list_counters() {
        let mut s = session();
        let q = Question::try_new("Where?").unwrap();
        s.record_question("s2", &q).unwrap();
        let output = ConsoleFormatter::suspect_list(&s, 10, Some("s2"));
        assert!(output.contains("  1. Ada - Guest [0/10]"));
        assert!(output.contains("> 3. Cora - Guest [1/10]"));
    }

    #[test]
    fn test_empty_thread() {
        let s = session();
        let output = ConsoleFormatter::thread(&s.suspects()[0], s.conversation("s0"));
        assert!(output.contains("You have not spoken to Ada yet."));
    }

    #[test]
    fn test_thread_and_latest_reply() {
        let mut s = session();
        let q = Question::try_new("Where were you?").unwrap();
        s.record_question("s1", &q).unwrap();
        s.record_reply("s1", "In the study. No, the hall.", true)
            .unwrap();

        let suspect = &s.suspects()[1];
        let output = ConsoleFormatter::thread(suspect, s.conversation("s1"));
        assert!(output.contains("You: Where were you?"));
        assert!(output.contains("Basil: In the study. No, the hall."));
        assert_eq!(
            ConsoleFormatter::latest_reply(suspect, s.conversation("s1")),
            "Basil: In the study. No, the hall."
        );
    }

    #[test]
    fn test_verdict_screen() {
        let mut s = session();
        let correct = s.resolve_accusation("s0").unwrap();
        let output = ConsoleFormatter::verdict(&Verdict {
            correct,
            session: &s,
        });
        assert!(output.contains("Case Closed, Killer Free"));
        assert!(output.contains("The killer was Basil (Guest)"));
        assert!(output.contains("0 questions to 0 suspects"));
    }
}
