use std::collections::HashSet;

use tracing::{debug, warn};

use crate::config::KoansConfig;
use crate::diagnostics::{KoanError, LoadError};
use crate::koan::{panic, Case, Lesson};

/// Builds the koans of one lesson.
pub type LessonBuilder = Box<dyn Fn() -> Vec<Case>>;

/// A lesson registered under its discovery key, not yet loaded.
pub struct LessonEntry {
    key: String,
    build: LessonBuilder,
}

impl LessonEntry {
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Every lesson the harness knows about, keyed `NN_name`.
///
/// Registration order is irrelevant; the rank prefix decides the path.
#[derive(Default)]
pub struct Curriculum {
    entries: Vec<LessonEntry>,
}

impl Curriculum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lesson<F>(mut self, key: impl Into<String>, build: F) -> Self
    where
        F: Fn() -> Vec<Case> + 'static,
    {
        self.register(key, build);
        self
    }

    pub fn register<F>(&mut self, key: impl Into<String>, build: F)
    where
        F: Fn() -> Vec<Case> + 'static,
    {
        self.entries.push(LessonEntry {
            key: key.into(),
            build: Box::new(build),
        });
    }

    pub fn entries(&self) -> &[LessonEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lessons loaded in path order, plus the obstacle that stopped loading.
#[derive(Debug, Default)]
pub struct Discovery {
    pub lessons: Vec<Lesson>,
    pub obstacle: Option<LoadError>,
}

impl Discovery {
    pub fn case_count(&self) -> usize {
        self.lessons.iter().map(Lesson::len).sum()
    }
}

/// Loads the curriculum in rank order.
///
/// Malformed keys, shared ranks and unknown manifest entries are harness
/// faults and fail the whole discovery. A lesson that cannot be loaded is
/// recorded as the obstacle, and no lesson after it is loaded.
pub fn discover(curriculum: &Curriculum, config: &KoansConfig) -> Result<Discovery, KoanError> {
    let mut ranked = Vec::with_capacity(curriculum.len());
    for entry in curriculum.entries() {
        let (rank, name) = parse_key(&entry.key)?;
        ranked.push((rank, name, entry));
    }
    ranked.sort_by_key(|(rank, _, _)| *rank);

    for pair in ranked.windows(2) {
        if pair[0].0 == pair[1].0 {
            return Err(KoanError::DuplicateRank {
                rank: pair[0].0,
                first: pair[0].2.key.clone(),
                second: pair[1].2.key.clone(),
            });
        }
    }
    let mut names = HashSet::new();
    for (_, name, _) in &ranked {
        if !names.insert(*name) {
            return Err(KoanError::DuplicateName {
                name: name.to_string(),
            });
        }
    }

    if let Some(manifest) = &config.lessons {
        if let Some(unknown) = manifest.iter().find(|n| !names.contains(n.as_str())) {
            return Err(KoanError::UnknownLesson {
                name: unknown.clone(),
            });
        }
        ranked.retain(|(_, name, _)| manifest.iter().any(|m| m.as_str() == *name));
    }

    let mut discovery = Discovery::default();
    for (rank, name, entry) in ranked {
        match load_lesson(rank, name, entry) {
            Ok(lesson) => {
                debug!(rank, lesson = name, koans = lesson.len(), "discovered lesson");
                discovery.lessons.push(lesson);
            }
            Err(obstacle) => {
                warn!(lesson = name, "{obstacle}");
                discovery.obstacle = Some(obstacle);
                break;
            }
        }
    }
    Ok(discovery)
}

/// Splits `NN_name` into its numeric rank and name.
pub fn parse_key(key: &str) -> Result<(u32, &str), KoanError> {
    let missing_rank = || KoanError::MissingRank {
        key: key.to_string(),
    };
    let digits = key.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return Err(missing_rank());
    }
    let rank = key[..digits].parse().map_err(|_| missing_rank())?;
    match key[digits..].strip_prefix('_') {
        Some(name) if !name.is_empty() => Ok((rank, name)),
        _ => Err(KoanError::MissingName {
            key: key.to_string(),
        }),
    }
}

fn load_lesson(rank: u32, name: &str, entry: &LessonEntry) -> Result<Lesson, LoadError> {
    let cases = panic::catch(|| (entry.build)()).map_err(|panicked| LoadError::Broken {
        lesson: name.to_string(),
        message: match panicked.location {
            Some(location) => format!("{} at {location}", panicked.message),
            None => panicked.message,
        },
    })?;
    let cases = order_cases(name, cases)?;
    Ok(Lesson::new(rank, name, cases))
}

/// Puts cases in sequence-number order, refusing any order that is not
/// fully determined.
fn order_cases(lesson: &str, mut cases: Vec<Case>) -> Result<Vec<Case>, LoadError> {
    let ambiguous = |reason: String| LoadError::AmbiguousOrder {
        lesson: lesson.to_string(),
        reason,
    };
    if cases.is_empty() {
        return Err(LoadError::Empty {
            lesson: lesson.to_string(),
        });
    }
    cases.sort_by_key(Case::seq);

    if let Some(case) = cases.iter().find(|c| c.seq() == 0) {
        return Err(ambiguous(format!(
            "koan '{}' has sequence number 0; numbering starts at 1",
            case.name()
        )));
    }
    for pair in cases.windows(2) {
        if pair[0].seq() == pair[1].seq() {
            return Err(ambiguous(format!(
                "koans '{}' and '{}' share sequence number {}",
                pair[0].name(),
                pair[1].name(),
                pair[0].seq()
            )));
        }
    }
    let mut names = HashSet::new();
    if let Some(case) = cases.iter().find(|c| !names.insert(c.name())) {
        return Err(ambiguous(format!("koan name '{}' is used twice", case.name())));
    }
    Ok(cases)
}
