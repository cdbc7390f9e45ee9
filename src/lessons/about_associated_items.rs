//! Types carry more than data: functions, constants and shared state can
//! belong to the type itself rather than to any one value of it.

use std::cell::RefCell;
use std::mem;

use crate::koan::{
    __, assert_equal, assert_match, assert_panics, assert_true, Case, KoanResult,
};
use crate::koans;

pub fn koans() -> Vec<Case> {
    koans![
        values_of_a_unit_struct_take_no_space,
        types_can_be_named_at_runtime,
        associated_functions_belong_to_the_type,
        methods_belong_to_values,
        associated_constants_are_shared_by_every_value,
        trait_defaults_can_be_overridden,
        fully_qualified_syntax_picks_the_trait,
        values_do_not_share_fields,
        type_level_state_is_shared,
        shared_state_refuses_a_second_borrow,
    ]
}

// ------------------------------------------------------------------

struct Dog;

fn values_of_a_unit_struct_take_no_space() -> KoanResult {
    let _fido = Dog;
    assert_equal(__, mem::size_of::<Dog>())
}

fn types_can_be_named_at_runtime() -> KoanResult {
    assert_match(__, std::any::type_name::<Dog>())
}

// ------------------------------------------------------------------

struct Dog2;

impl Dog2 {
    fn growl() -> String {
        "associated growl, no self".to_string()
    }

    fn bark(&self) -> String {
        "method bark, self: &Dog2".to_string()
    }
}

fn associated_functions_belong_to_the_type() -> KoanResult {
    assert_match(__, Dog2::growl())
}

fn methods_belong_to_values() -> KoanResult {
    let fido = Dog2;
    assert_match("associated", fido.bark())?;
    // A method is an associated function whose first argument is the value.
    assert_equal(fido.bark(), Dog2::bark(&fido))
}

// ------------------------------------------------------------------

struct Dog3 {
    name: String,
}

impl Dog3 {
    const LEGS: u32 = 4;

    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

fn associated_constants_are_shared_by_every_value() -> KoanResult {
    let fido = Dog3::new("Fido");
    let rover = Dog3::new("Rover");
    assert_equal(__, Dog3::LEGS)?;
    assert_true(fido.name == rover.name)
}

// ------------------------------------------------------------------

trait Speak {
    fn speak(&self) -> String {
        "...".to_string()
    }

    fn name(&self) -> &'static str;
}

trait Perform {
    fn speak(&self) -> String {
        "a performance".to_string()
    }
}

struct Puppy;
struct Hound;

impl Speak for Puppy {
    fn name(&self) -> &'static str {
        "puppy"
    }
}

impl Speak for Hound {
    fn speak(&self) -> String {
        "AROOO".to_string()
    }

    fn name(&self) -> &'static str {
        "hound"
    }
}

impl Perform for Hound {}

fn trait_defaults_can_be_overridden() -> KoanResult {
    assert_equal("AROOO", Puppy.speak())?;
    assert_equal(__, Speak::speak(&Hound))
}

fn fully_qualified_syntax_picks_the_trait() -> KoanResult {
    let hound = Hound;
    assert_equal(__, <Hound as Perform>::speak(&hound))?;
    assert_equal("AROOO", <Hound as Speak>::speak(&hound))?;
    assert_equal(__, Speak::name(&hound))
}

// ------------------------------------------------------------------

thread_local! {
    static PACK_NAME: RefCell<String> = RefCell::new(String::new());
}

struct Dog4 {
    name: String,
}

impl Dog4 {
    fn set_pack_name(name: &str) {
        PACK_NAME.with(|pack| *pack.borrow_mut() = name.to_string());
    }

    fn pack_name() -> String {
        PACK_NAME.with(|pack| pack.borrow().clone())
    }
}

fn values_do_not_share_fields() -> KoanResult {
    let mut fido = Dog4 {
        name: "Fido".to_string(),
    };
    let rover = Dog4 {
        name: "Rover".to_string(),
    };
    fido.name.push_str(" the Brave");
    assert_equal(__, fido.name)?;
    assert_equal("Rover the Brave", rover.name)
}

fn type_level_state_is_shared() -> KoanResult {
    Dog4::set_pack_name("Fido's pack");
    let first = Dog4::pack_name();
    Dog4::set_pack_name("Rover's pack");
    assert_equal(first, Dog4::pack_name())?;
    assert_equal(__, Dog4::pack_name())
}

fn shared_state_refuses_a_second_borrow() -> KoanResult {
    assert_panics(__, || {
        PACK_NAME.with(|pack| {
            let _writer = pack.borrow_mut();
            pack.borrow().len()
        })
    })
}
