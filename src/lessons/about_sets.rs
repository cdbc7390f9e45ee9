use std::collections::{BTreeSet, HashSet};

use crate::koan::{__, assert_equal, assert_false, assert_true, Case, KoanResult};
use crate::koans;

pub fn koans() -> Vec<Case> {
    koans![
        sets_keep_values_unique,
        sets_are_unordered,
        sorted_sets_keep_their_values_in_order,
        sets_have_algebra,
        sets_answer_membership,
        sets_compare_as_subsets,
    ]
}

fn sets_keep_values_unique() -> KoanResult {
    let highlanders = [
        "MacLeod", "Ramirez", "MacLeod", "Matunas", "MacLeod", "Malcolm", "MacLeod",
    ];
    let there_can_only_be_one: HashSet<&str> = highlanders.into_iter().collect();

    assert_equal(__, there_can_only_be_one.len())?;
    assert_equal(
        HashSet::from(["MacLeod", "Ramirez", "Malcolm"]),
        there_can_only_be_one,
    )
}

fn sets_are_unordered() -> KoanResult {
    let digits: HashSet<char> = "12345".chars().collect();
    assert_equal(HashSet::from(['2', '3', '4', '1']), digits)
}

fn sorted_sets_keep_their_values_in_order() -> KoanResult {
    let digits: BTreeSet<char> = "13245".chars().collect();
    let in_order: Vec<char> = digits.into_iter().collect();
    assert_equal(vec!['5', '4', '3', '2', '1'], in_order)
}

fn sets_have_algebra() -> KoanResult {
    let scotsmen = BTreeSet::from(["MacLeod", "Wallace", "Willie"]);
    let warriors = BTreeSet::from(["MacLeod", "Wallace", "Leonidas"]);

    // Elements in scotsmen but not in warriors.
    assert_equal(__, &scotsmen - &warriors)?;
    // Elements in either.
    assert_equal(BTreeSet::from(["MacLeod", "Willie"]), &scotsmen | &warriors)?;
    // Elements in both.
    assert_equal(BTreeSet::from(["Wallace"]), &scotsmen & &warriors)?;
    // Elements in exactly one of them.
    assert_equal(BTreeSet::from(["Leonidas"]), &scotsmen ^ &warriors)
}

fn sets_answer_membership() -> KoanResult {
    let numbers = HashSet::from([127, 0, 0, 1]);
    let letters: HashSet<char> = "apocalypse now".chars().collect();

    assert_false(numbers.contains(&127))?;
    assert_true(letters.contains(&'c'))?;
    assert_true(letters.contains(&'w'))
}

fn sets_compare_as_subsets() -> KoanResult {
    let cake: HashSet<char> = "cake".chars().collect();
    let cherry_cake: HashSet<char> = "cherry cake".chars().collect();
    let pie: HashSet<char> = "pie".chars().collect();

    assert_false(cake.is_subset(&cherry_cake))?;
    assert_true(cherry_cake.is_superset(&cake))?;
    assert_true(cake.is_disjoint(&pie))
}
