//! Quiz session state
//!
//! A round goes: ask, grade, gather the balls above the arena, wait for
//! Drop, let them fall onto the collector, tally, then ask again (or repeat
//! the same question after a wrong answer).

use glam::Vec2;

use crate::content::{Choice, Question};
use crate::schedule::Guard;

/// Where the current round stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuizPhase {
    /// Game not selected
    #[default]
    Idle,
    /// Prompt and choices showing
    Asking,
    /// Answer graded; balls easing toward the gather point
    Gathering,
    /// Balls gathered; Drop button showing
    AwaitingDrop,
    /// Balls falling; scoring is scheduled
    Dropping,
    /// Arena frozen; round delta on the collector
    Scoring,
    /// Every question answered
    Finished,
}

#[derive(Debug, Clone, Default)]
pub struct Quiz {
    pub phase: QuizPhase,
    /// Bumped on every start and stop; deferred tasks carry the epoch they
    /// were scheduled in
    pub epoch: u32,
    /// Index of the current question
    pub index: usize,
    /// Running total shown on the collector between rounds
    pub score: i32,
    /// Grade of the last answer
    pub correct: bool,
    /// Where the balls are pulled while gathering
    pub gather_target: Option<Vec2>,
    /// Pool indices tallied in the current round
    pub collected: Vec<usize>,
}

impl Quiz {
    /// Game selected (including after the last question)
    pub fn is_active(&self) -> bool {
        self.phase != QuizPhase::Idle
    }

    pub fn is_live(&self, epoch: u32) -> bool {
        self.is_active() && self.epoch == epoch
    }

    /// Guard for a task scheduled now
    pub fn liveness(&self) -> Guard<Quiz> {
        let epoch = self.epoch;
        Box::new(move |quiz: &Quiz| quiz.is_live(epoch))
    }

    /// Reset for a fresh session (or stop, when `active` is false)
    pub fn restart(&mut self, active: bool) {
        self.epoch = self.epoch.wrapping_add(1);
        self.phase = if active { QuizPhase::Asking } else { QuizPhase::Idle };
        self.index = 0;
        self.score = 0;
        self.correct = false;
        self.gather_target = None;
        self.collected.clear();
    }

    /// Current question, or `None` once the list is exhausted
    pub fn current<'a>(&self, questions: &'a [Question]) -> Option<&'a Question> {
        questions.get(self.index)
    }

    /// Grade `choice` against the current question.
    ///
    /// Returns `None` when no question is being asked.
    pub fn grade(&mut self, questions: &[Question], choice: Choice) -> Option<bool> {
        if self.phase != QuizPhase::Asking {
            return None;
        }
        let question = self.current(questions)?;
        self.correct = question.answer == choice;
        Some(self.correct)
    }

    /// Signed contribution of a ball label to this round
    pub fn signed(&self, label: i32) -> i32 {
        if self.correct { label } else { -label }
    }

    /// Move on after a round; only a correct answer advances
    pub fn advance(&mut self) {
        if self.correct {
            self.index += 1;
        }
    }
}

/// Collector caption for a round delta: always signed, `-0` after a miss
pub fn round_caption(delta: i32, correct: bool) -> String {
    match (delta, correct) {
        (0, true) => "+0".to_string(),
        (0, false) => "-0".to_string(),
        (d, _) if d > 0 => format!("+{d}"),
        (d, _) => d.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions() -> Vec<Question> {
        vec![
            Question {
                prompt: "The answer is B".into(),
                answer: Choice::B,
            },
            Question {
                prompt: "The answer is C".into(),
                answer: Choice::C,
            },
        ]
    }

    #[test]
    fn test_grade_only_while_asking() {
        let qs = questions();
        let mut quiz = Quiz::default();
        assert_eq!(quiz.grade(&qs, Choice::B), None);

        quiz.restart(true);
        assert_eq!(quiz.grade(&qs, Choice::A), Some(false));
        assert!(!quiz.correct);
        assert_eq!(quiz.grade(&qs, Choice::B), Some(true));
    }

    #[test]
    fn test_wrong_answer_repeats_question() {
        let qs = questions();
        let mut quiz = Quiz::default();
        quiz.restart(true);
        quiz.grade(&qs, Choice::D);
        quiz.advance();
        assert_eq!(quiz.index, 0);
        quiz.grade(&qs, Choice::B);
        quiz.advance();
        assert_eq!(quiz.current(&qs).map(|q| q.answer), Some(Choice::C));
    }

    #[test]
    fn test_restart_invalidates_old_guards() {
        let mut quiz = Quiz::default();
        quiz.restart(true);
        let guard = quiz.liveness();
        assert!(guard(&quiz));

        quiz.restart(true);
        assert!(!guard(&quiz));
        assert!(quiz.liveness()(&quiz));
    }

    #[test]
    fn test_stopped_quiz_is_not_live() {
        let mut quiz = Quiz::default();
        quiz.restart(true);
        let epoch = quiz.epoch;
        quiz.phase = QuizPhase::Idle;
        assert!(!quiz.is_live(epoch));
    }

    #[test]
    fn test_round_caption() {
        assert_eq!(round_caption(12, true), "+12");
        assert_eq!(round_caption(-7, false), "-7");
        assert_eq!(round_caption(0, true), "+0");
        assert_eq!(round_caption(0, false), "-0");
    }

    #[test]
    fn test_signed_labels() {
        let mut quiz = Quiz::default();
        quiz.correct = true;
        assert_eq!(quiz.signed(4), 4);
        quiz.correct = false;
        assert_eq!(quiz.signed(4), -4);
    }
}
