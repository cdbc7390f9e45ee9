//! Sequential execution of the path.
//!
//! [`Session`] walks lessons and their koans lazily, one koan per call to
//! `next`, and fuses itself after the first koan that does not pass.
//! [`run`] drains a session into a [`RunResult`].

use tracing::{debug, info};

use crate::diagnostics::LoadError;
use crate::discovery::Discovery;
use crate::koan::{
    panic, AssertionFailure, Case, ExecutionError, Interruption, Lesson, SourceLocation,
};

/// Outcome of a single koan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed(AssertionFailure),
    Errored(ExecutionError),
}

impl Outcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }
}

/// One executed koan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseRecord {
    pub lesson: String,
    pub case: String,
    /// 1-based position across the whole path.
    pub position: usize,
    pub outcome: Outcome,
}

/// What stopped the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Obstacle {
    Assertion(AssertionFailure),
    Execution(ExecutionError),
    Load(LoadError),
}

impl Obstacle {
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Obstacle::Assertion(failure) => failure.location.as_ref(),
            Obstacle::Execution(error) => error.location.as_ref(),
            Obstacle::Load(_) => None,
        }
    }
}

/// The first koan, in path order, that did not pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopPoint {
    pub lesson: String,
    /// `None` when the lesson itself failed to load.
    pub case: Option<String>,
    pub position: usize,
    pub obstacle: Obstacle,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunResult {
    /// Executed koans in order, ending with the stop point if there is one.
    pub records: Vec<CaseRecord>,
    pub stop: Option<StopPoint>,
    pub total_count: usize,
    pub passed_count: usize,
    pub lessons_total: usize,
    pub lessons_completed: usize,
}

impl RunResult {
    /// Enlightenment: nothing stopped the run.
    pub fn is_complete(&self) -> bool {
        self.stop.is_none()
    }

    /// Fraction of the path walked, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.total_count == 0 {
            return if self.is_complete() { 1.0 } else { 0.0 };
        }
        self.passed_count as f64 / self.total_count as f64
    }
}

/// Lazy walk over every koan of every lesson, in order.
pub struct Session<'a> {
    lessons: &'a [Lesson],
    lesson: usize,
    case: usize,
    position: usize,
    halted: bool,
}

impl<'a> Session<'a> {
    pub fn new(lessons: &'a [Lesson]) -> Self {
        Self {
            lessons,
            lesson: 0,
            case: 0,
            position: 0,
            halted: false,
        }
    }

    fn next_case(&mut self) -> Option<(&'a Lesson, &'a Case)> {
        while let Some(lesson) = self.lessons.get(self.lesson) {
            if let Some(case) = lesson.cases().get(self.case) {
                self.case += 1;
                return Some((lesson, case));
            }
            self.lesson += 1;
            self.case = 0;
        }
        None
    }
}

impl Iterator for Session<'_> {
    type Item = CaseRecord;

    fn next(&mut self) -> Option<CaseRecord> {
        if self.halted {
            return None;
        }
        let (lesson, case) = self.next_case()?;
        self.position += 1;

        debug!(lesson = lesson.name(), koan = case.name(), "contemplating");
        let outcome = execute(case);
        debug!(
            lesson = lesson.name(),
            koan = case.name(),
            passed = outcome.is_passed(),
            "koan finished"
        );
        if !outcome.is_passed() {
            self.halted = true;
        }
        Some(CaseRecord {
            lesson: lesson.name().to_string(),
            case: case.name().to_string(),
            position: self.position,
            outcome,
        })
    }
}

/// Runs one koan body. Panics are caught and reported as execution errors.
pub fn execute(case: &Case) -> Outcome {
    match panic::catch(|| case.call()) {
        Ok(Ok(())) => Outcome::Passed,
        Ok(Err(Interruption::Assertion(failure))) => Outcome::Failed(failure),
        Ok(Err(Interruption::Execution(error))) => Outcome::Errored(error),
        Err(panicked) => Outcome::Errored(ExecutionError {
            message: panicked.message,
            location: panicked.location,
        }),
    }
}

/// Walks `lessons` until the first koan that does not pass.
pub fn run(lessons: &[Lesson]) -> RunResult {
    let mut result = RunResult {
        total_count: lessons.iter().map(Lesson::len).sum(),
        lessons_total: lessons.len(),
        ..RunResult::default()
    };

    for record in Session::new(lessons) {
        let stop = match &record.outcome {
            Outcome::Passed => None,
            Outcome::Failed(failure) => Some(Obstacle::Assertion(failure.clone())),
            Outcome::Errored(error) => Some(Obstacle::Execution(error.clone())),
        };
        match stop {
            None => {
                result.passed_count += 1;
                result.records.push(record);
            }
            Some(obstacle) => {
                info!(
                    lesson = %record.lesson,
                    koan = %record.case,
                    position = record.position,
                    "path halted"
                );
                result.stop = Some(StopPoint {
                    lesson: record.lesson.clone(),
                    case: Some(record.case.clone()),
                    position: record.position,
                    obstacle,
                });
                result.records.push(record);
                break;
            }
        }
    }

    result.lessons_completed = completed_lessons(lessons, result.passed_count);
    result
}

/// Runs a discovery. A lesson that failed to load counts as one unfinished
/// step and becomes the stop point once everything before it has passed.
pub fn run_discovery(discovery: &Discovery) -> RunResult {
    let mut result = run(&discovery.lessons);
    let Some(obstacle) = &discovery.obstacle else {
        return result;
    };

    result.total_count += 1;
    result.lessons_total += 1;
    if result.stop.is_none() {
        info!(lesson = obstacle.lesson(), "path halted at a lesson that failed to load");
        result.stop = Some(StopPoint {
            lesson: obstacle.lesson().to_string(),
            case: None,
            position: result.passed_count + 1,
            obstacle: Obstacle::Load(obstacle.clone()),
        });
    }
    result
}

fn completed_lessons(lessons: &[Lesson], passed: usize) -> usize {
    let mut walked = 0;
    lessons
        .iter()
        .take_while(|lesson| {
            walked += lesson.len();
            walked <= passed
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::koan::{assert_equal, assert_true};

    fn lesson(rank: u32, name: &str, cases: Vec<Case>) -> Lesson {
        Lesson::new(rank, name, cases)
    }

    #[test]
    fn session_fuses_after_first_failure() {
        let lessons = vec![lesson(
            1,
            "only",
            vec![
                Case::new(1, "fails", || assert_true(false)),
                Case::new(2, "never", || Ok(())),
            ],
        )];
        let mut session = Session::new(&lessons);
        assert!(!session.next().unwrap().outcome.is_passed());
        assert!(session.next().is_none());
    }

    #[test]
    fn panics_become_execution_errors() {
        let case = Case::new(1, "boom", || {
            let values: Vec<u8> = Vec::new();
            assert_equal(0u8, values[3])
        });
        match execute(&case) {
            Outcome::Errored(error) => {
                assert!(error.message.contains("index out of bounds"));
                assert!(error.location.is_some());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn empty_path_is_complete() {
        let result = run(&[]);
        assert!(result.is_complete());
        assert_eq!(result.progress(), 1.0);
    }

    #[test]
    fn completed_lessons_count_only_fully_passed_lessons() {
        let lessons = vec![
            lesson(1, "a", vec![Case::new(1, "a1", || Ok(()))]),
            lesson(
                2,
                "b",
                vec![
                    Case::new(1, "b1", || Ok(())),
                    Case::new(2, "b2", || assert_true(false)),
                ],
            ),
        ];
        let result = run(&lessons);
        assert_eq!(result.lessons_completed, 1);
        assert_eq!(result.lessons_total, 2);
    }

    #[test]
    fn load_obstacle_stops_an_otherwise_clean_run() {
        let discovery = Discovery {
            lessons: vec![lesson(1, "a", vec![Case::new(1, "a1", || Ok(()))])],
            obstacle: Some(LoadError::Empty {
                lesson: "b".to_string(),
            }),
        };
        let result = run_discovery(&discovery);
        assert!(!result.is_complete());
        assert_eq!(result.passed_count, 1);
        assert_eq!(result.total_count, 2);
        assert!(result.progress() < 1.0);
        let stop = result.stop.expect("stop point");
        assert_eq!(stop.lesson, "b");
        assert_eq!(stop.case, None);
        assert_eq!(stop.position, 2);
    }
}
