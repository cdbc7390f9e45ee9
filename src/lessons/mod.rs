//! The lessons on the path.
//!
//! Each lesson lives in its own file and exposes `koans()`, built with the
//! [`koans!`](crate::koans) macro so that declaration order is the order the
//! learner meets them. The rank in each key decides where the lesson sits on
//! the path.

use crate::discovery::Curriculum;

pub mod about_asserts;
pub mod about_associated_items;
pub mod about_sets;

/// The full curriculum, in no particular registration order.
pub fn curriculum() -> Curriculum {
    Curriculum::new()
        .with_lesson("01_about_asserts", about_asserts::koans)
        .with_lesson("02_about_sets", about_sets::koans)
        .with_lesson("03_about_associated_items", about_associated_items::koans)
}
