//! Every koan is a small assertion waiting to become true.

use crate::koan::{__, assert_equal, assert_match, assert_true, Case, KoanResult};
use crate::koans;

pub fn koans() -> Vec<Case> {
    koans![
        assert_truth,
        assert_with_equality,
        fill_in_values,
        strings_are_searched,
        sometimes_we_need_to_know_the_type,
    ]
}

/// We shall contemplate truth by testing reality, via asserts.
fn assert_truth() -> KoanResult {
    assert_true(false) // This should be true
}

fn assert_with_equality() -> KoanResult {
    let expected_value = __;
    let actual_value = 1 + 1;
    assert_equal(expected_value, actual_value)
}

fn fill_in_values() -> KoanResult {
    assert_equal(__, 1 + 1)
}

fn strings_are_searched() -> KoanResult {
    // A pattern only has to appear somewhere in the text.
    assert_match(__, "the path is long")
}

fn sometimes_we_need_to_know_the_type() -> KoanResult {
    let name = std::any::type_name::<&str>();
    assert_equal(__, name)
}
