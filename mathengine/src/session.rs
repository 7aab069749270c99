//! Per-student practice state. A [`Session`] is owned by the caller; nothing here is global.

use crate::equivalence::Grader;
use crate::feedback::{Area, Exercise, Feedback};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Running statistics of answers given in one area.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PracticeStats {
    pub correct: u32,
    pub total: u32,

    /// Number of correct answers in a row, up to the last answer.
    pub streak: u32,
    pub best_streak: u32,
}

impl PracticeStats {
    /// Records an answer.
    pub fn record(&mut self, is_correct: bool) {
        self.total += 1;
        if is_correct {
            self.correct += 1;
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
        } else {
            self.streak = 0;
        }
    }

    /// Returns the percentage of correct answers, or 0 if nothing was answered.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.total) * 100.0
        }
    }
}

/// The length of an exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExamSettings {
    questions: u32,
    minutes: u32,
}

impl ExamSettings {
    pub const MIN_QUESTIONS: u32 = 5;
    pub const MAX_QUESTIONS: u32 = 20;
    pub const MIN_MINUTES: u32 = 10;
    pub const MAX_MINUTES: u32 = 60;

    /// Creates exam settings, clamping both values to their allowed range.
    pub fn new(questions: u32, minutes: u32) -> Self {
        Self {
            questions: questions.clamp(Self::MIN_QUESTIONS, Self::MAX_QUESTIONS),
            minutes: minutes.clamp(Self::MIN_MINUTES, Self::MAX_MINUTES),
        }
    }

    /// Returns the number of questions in the exam.
    pub fn questions(&self) -> u32 {
        self.questions
    }

    /// Returns the time limit in minutes.
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Returns the time limit in seconds.
    pub fn seconds(&self) -> u64 {
        u64::from(self.minutes) * 60
    }
}

impl Default for ExamSettings {
    fn default() -> Self {
        Self::new(10, 30)
    }
}

/// The practice state of one student.
#[derive(Debug, Clone)]
pub struct Session {
    arithmetic: PracticeStats,
    algebra: PracticeStats,
    current: Option<(Area, Exercise)>,
    grader: Grader,
}

impl Default for Session {
    fn default() -> Self {
        Self::with_grader(Grader::strict())
    }
}

impl Session {
    /// Creates an empty session that grades with a [strict](Grader::strict) grader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty session that grades with the given grader.
    pub fn with_grader(grader: Grader) -> Self {
        Self {
            arithmetic: PracticeStats::default(),
            algebra: PracticeStats::default(),
            current: None,
            grader,
        }
    }

    /// Sets the exercise being answered, replacing any previous one.
    pub fn set_exercise(&mut self, area: Area, exercise: Exercise) {
        self.current = Some((area, exercise));
    }

    /// Returns the exercise being answered, if any.
    pub fn current_exercise(&self) -> Option<&Exercise> {
        self.current.as_ref().map(|(_, exercise)| exercise)
    }

    /// Grades an answer to the current exercise, records the outcome in the exercise's area, and
    /// clears the exercise.
    ///
    /// Returns [`None`] if there is no current exercise.
    pub fn answer(&mut self, user: &str) -> Option<Feedback> {
        let (area, exercise) = self.current.take()?;
        let feedback = self.grader.check_answer(user, &exercise);
        let stats = self.stats_mut(area);
        stats.record(feedback.is_correct);
        debug!(
            target: "mathengine::session",
            area = area.label(),
            correct = feedback.is_correct,
            streak = stats.streak,
            "answer recorded",
        );
        Some(feedback)
    }

    /// Returns the statistics of the given area.
    pub fn stats(&self, area: Area) -> &PracticeStats {
        match area {
            Area::Arithmetic => &self.arithmetic,
            Area::Algebra => &self.algebra,
        }
    }

    fn stats_mut(&mut self, area: Area) -> &mut PracticeStats {
        match area {
            Area::Arithmetic => &mut self.arithmetic,
            Area::Algebra => &mut self.algebra,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn streaks() {
        let mut stats = PracticeStats::default();
        for outcome in [true, true, false, true, true, true, false] {
            stats.record(outcome);
        }
        assert_eq!(stats, PracticeStats {
            correct: 5,
            total: 7,
            streak: 0,
            best_streak: 3,
        });
        assert_float_absolute_eq!(stats.accuracy(), 500.0 / 7.0, 1e-9);
    }

    #[test]
    fn empty_accuracy() {
        assert_float_absolute_eq!(PracticeStats::default().accuracy(), 0.0, 1e-12);
    }

    #[test]
    fn exam_settings_clamped() {
        let default = ExamSettings::default();
        assert_eq!((default.questions(), default.minutes()), (10, 30));
        assert_eq!(default.seconds(), 1800);

        let settings = ExamSettings::new(100, 1);
        assert_eq!((settings.questions(), settings.minutes()), (20, 10));

        let settings = ExamSettings::new(0, 61);
        assert_eq!((settings.questions(), settings.minutes()), (5, 60));
    }

    #[test]
    fn answering_clears_exercise() {
        let mut session = Session::new();
        assert_eq!(session.answer("1"), None);

        session.set_exercise(Area::Arithmetic, Exercise::new("1/2 + 1/4", "3/4"));
        assert_eq!(session.current_exercise().map(Exercise::answer), Some("3/4"));

        let feedback = session.answer("0.75").unwrap();
        assert!(feedback.is_correct);
        assert_eq!(session.current_exercise(), None);
        assert_eq!(session.answer("0.75"), None);
        assert_eq!(session.stats(Area::Arithmetic).correct, 1);
        assert_eq!(session.stats(Area::Algebra).total, 0);
    }

    #[test]
    fn stats_per_area() {
        let mut session = Session::new();
        session.set_exercise(Area::Algebra, Exercise::new("x + x", "2x"));
        assert!(!session.answer("x^2").unwrap().is_correct);
        session.set_exercise(Area::Algebra, Exercise::new("x * x", "x^2"));
        assert!(session.answer("x^2").unwrap().is_correct);

        let algebra = session.stats(Area::Algebra);
        assert_eq!((algebra.correct, algebra.total, algebra.streak), (1, 2, 1));
        assert_eq!(session.stats(Area::Arithmetic).total, 0);
    }

    #[test]
    fn sessions_grade_strictly() {
        let mut session = Session::new();
        session.set_exercise(Area::Arithmetic, Exercise::new("1/3", "0.333333333333333"));
        assert!(!session.answer("0.33333333333333").unwrap().is_correct);

        let mut session = Session::with_grader(Grader::default());
        session.set_exercise(Area::Arithmetic, Exercise::new("1/3", "0.333333333333333"));
        assert!(session.answer("0.33333333333333").unwrap().is_correct);
    }
}
