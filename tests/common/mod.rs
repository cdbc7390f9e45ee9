//! Shared builders for engine and report tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use koans::koan::{assert_true, Case, Lesson};

/// Names of executed koans, in execution order.
pub type ExecutionLog = Rc<RefCell<Vec<String>>>;

pub fn log() -> ExecutionLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Builds lessons `lesson_1..` with `shape[i]` koans each. The koan at
/// 1-based global position `failing` fails its assertion; every koan records
/// itself in `log` when it runs.
pub fn shaped(shape: &[usize], failing: Option<usize>, log: &ExecutionLog) -> Vec<Lesson> {
    let mut position = 0;
    shape
        .iter()
        .enumerate()
        .map(|(l, &count)| {
            let lesson = format!("lesson_{}", l + 1);
            let cases = (1..=count)
                .map(|c| {
                    position += 1;
                    let fails = failing == Some(position);
                    let label = format!("{lesson}::case_{c}");
                    let log = Rc::clone(log);
                    Case::new(c as u32, format!("case_{c}"), move || {
                        log.borrow_mut().push(label.clone());
                        assert_true(!fails)
                    })
                })
                .collect();
            Lesson::new(l as u32 + 1, lesson, cases)
        })
        .collect()
}
