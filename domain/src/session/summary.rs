//! End-of-case investigation summary

use crate::case::entities::Suspect;
use crate::session::entities::Session;
use crate::session::phase::Phase;

/// Statistics shown when a case is closed (Value Object)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvestigationSummary<'a> {
    pub outcome: Phase,
    pub killer: Option<&'a Suspect>,
    pub questions_asked: usize,
    pub lies_told: usize,
    pub suspects_questioned: usize,
}

impl Session {
    pub fn summary(&self) -> InvestigationSummary<'_> {
        let threads: Vec<_> = self.conversations().collect();
        InvestigationSummary {
            outcome: self.current_phase(),
            killer: self.case().killer(),
            questions_asked: threads.iter().map(|t| t.player_question_count()).sum(),
            lies_told: threads
                .iter()
                .flat_map(|t| t.messages())
                .filter(|m| m.is_flagged_lie())
                .count(),
            suspects_questioned: threads.iter().filter(|t| !t.is_empty()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::case::entities::fixtures::case_with;
    use crate::core::question::Question;
    use crate::policy::difficulty::Difficulty;
    use crate::session::entities::Session;
    use crate::session::phase::Phase;

    #[test]
    fn test_summary_counts() {
        let mut s = Session::new("x", Difficulty::Easy, case_with(3, 0));
        let q = Question::try_new("Alibi?").unwrap();

        s.record_question("s0", &q).unwrap();
        s.record_reply("s0", "Library.", true).unwrap();
        s.record_question("s0", &q).unwrap();
        s.record_reply("s0", "Still the library.", true).unwrap();
        s.record_question("s2", &q).unwrap();
        s.record_reply("s2", "Kitchen.", false).unwrap();
        s.resolve_accusation("s0").unwrap();

        let summary = s.summary();
        assert_eq!(summary.outcome, Phase::Won);
        assert_eq!(summary.killer.unwrap().id, "s0");
        assert_eq!(summary.questions_asked, 3);
        assert_eq!(summary.lies_told, 2);
        assert_eq!(summary.suspects_questioned, 2);
    }
}
